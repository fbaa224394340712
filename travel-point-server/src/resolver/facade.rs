//! The resolution entry point.
//!
//! [`Resolver::resolve`] is the typed core. [`Resolver::resolve_travel_point`]
//! and [`Resolver::resolve_facility`] wrap it for presentation code: they
//! never fail, and report errors as a [`LookupResult`] whose `point` starts
//! with [`ERROR_MARKER`].

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error};

use crate::domain::{InputField, LotKey, ParsedAddress, ResolveError, TravelPoint};
use crate::reference::{Range, ReferenceData};

use super::range::find_range;
use super::town::{MatchTier, TownMatcher};

/// Prefix of `LookupResult::point` when resolution failed.
pub const ERROR_MARKER: &str = "エラー: ";

/// A successful resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Town key of the matched entry.
    pub town: String,
    /// How the town was matched.
    pub tier: MatchTier,
    /// Lot number key used for the range lookup.
    pub key: LotKey,
    /// The range containing the key.
    pub range: Range,
}

impl Resolution {
    /// The travel point, possibly ambiguous.
    pub fn point(&self) -> &TravelPoint {
        self.range.location()
    }
}

/// Outcome category of a [`LookupResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStatus {
    /// One travel point.
    Resolved,
    /// Either of two travel points; the caller must not pick one.
    Ambiguous,
    /// No travel point; `point` carries the error message.
    Failed,
}

/// Result handed to presentation code.
///
/// A `point` starting with [`ERROR_MARKER`] is a failure. A `point` with "or"
/// between two names is an ambiguous success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupResult {
    pub point: String,
    /// Town key of the matched entry; empty if none matched.
    pub matched_town: String,
    /// Matched range, e.g. "0〜5"; empty if none matched.
    pub matched_range_description: String,
}

impl LookupResult {
    /// Shape a successful resolution.
    pub fn resolved(resolution: &Resolution) -> Self {
        Self {
            point: resolution.point().label().to_string(),
            matched_town: resolution.town.clone(),
            matched_range_description: resolution.range.to_string(),
        }
    }

    /// Shape a failure. Match details stay empty; the message names the town.
    pub fn failed(err: &ResolveError) -> Self {
        Self {
            point: format!("{ERROR_MARKER}{err}"),
            matched_town: String::new(),
            matched_range_description: String::new(),
        }
    }

    /// True when `point` carries the error marker.
    pub fn is_error(&self) -> bool {
        self.point.starts_with(ERROR_MARKER)
    }

    /// True when `point` names two candidate travel points.
    pub fn is_ambiguous(&self) -> bool {
        !self.is_error()
            && TravelPoint::new(&self.point).is_ok_and(|point| point.is_ambiguous())
    }

    /// Outcome category.
    pub fn status(&self) -> LookupStatus {
        if self.is_error() {
            LookupStatus::Failed
        } else if self.is_ambiguous() {
            LookupStatus::Ambiguous
        } else {
            LookupStatus::Resolved
        }
    }
}

impl From<Result<Resolution, ResolveError>> for LookupResult {
    fn from(result: Result<Resolution, ResolveError>) -> Self {
        match result {
            Ok(resolution) => LookupResult::resolved(&resolution),
            Err(err) => LookupResult::failed(&err),
        }
    }
}

/// Resolves addresses and facilities against one reference dataset.
#[derive(Debug, Clone)]
pub struct Resolver {
    data: Arc<ReferenceData>,
}

impl Resolver {
    /// Create a resolver over a loaded dataset.
    pub fn new(data: Arc<ReferenceData>) -> Self {
        Self { data }
    }

    /// The dataset this resolver reads.
    pub fn data(&self) -> &ReferenceData {
        &self.data
    }

    /// Resolve a town name and raw lot number.
    ///
    /// The lot number is parsed first; a blank one is the zero key, while
    /// one with no usable digits fails with [`ResolveError::NotANumber`]
    /// instead of being treated as zero.
    pub fn resolve(&self, town_name: &str, house_number: &str) -> Result<Resolution, ResolveError> {
        if town_name.trim().is_empty() {
            return Err(ResolveError::EmptyInput(InputField::Town));
        }

        let key = LotKey::parse(house_number)?;
        let town = TownMatcher::new(&self.data).find(town_name)?;
        let range = find_range(town.entry, key)?;

        Ok(Resolution {
            town: town.entry.town().to_string(),
            tier: town.tier,
            key,
            range: range.clone(),
        })
    }

    /// Resolve a full postal address such as "天草市浄南町4番15号".
    ///
    /// An address outside the municipality fails with
    /// [`ResolveError::TownNotFound`] naming the whole address.
    pub fn resolve_address(&self, full_address: &str) -> Result<Resolution, ResolveError> {
        let parsed = ParsedAddress::split(full_address, self.data.municipality());
        if parsed.town_name.is_empty() {
            return Err(ResolveError::TownNotFound {
                town: full_address.trim().to_string(),
            });
        }
        self.resolve(&parsed.town_name, &parsed.raw_house_number)
    }

    /// Resolve a facility by name via its registered address.
    pub fn resolve_facility_address(&self, name: &str) -> Result<Resolution, ResolveError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ResolveError::EmptyInput(InputField::Facility));
        }
        let facility = self
            .data
            .facility(name)
            .ok_or_else(|| ResolveError::FacilityNotFound {
                name: name.to_string(),
            })?;
        debug!(facility = name, address = %facility.address, "resolving facility");
        self.resolve_address(&facility.address)
    }

    /// Resolve a town name and raw lot number for presentation.
    ///
    /// Never panics outward; every failure is an error-marked result.
    pub fn resolve_travel_point(&self, town_name: &str, house_number: &str) -> LookupResult {
        guarded(|| self.resolve(town_name, house_number))
    }

    /// Resolve a facility for presentation.
    pub fn resolve_facility(&self, name: &str) -> LookupResult {
        guarded(|| self.resolve_facility_address(name))
    }
}

/// Run a resolution, turning a panic into an `Internal` failure.
fn guarded(resolve: impl FnOnce() -> Result<Resolution, ResolveError>) -> LookupResult {
    let result = panic::catch_unwind(AssertUnwindSafe(resolve)).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        error!(%message, "resolution panicked");
        Err(ResolveError::Internal { message })
    });

    LookupResult::from(result)
}
