//! Town range tables and facility records.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{LotKey, TravelPoint};

use super::error::DataError;

/// A half-open lot number interval `[start, end)` mapped to a travel point.
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    start: f64,
    end: f64,
    location: TravelPoint,
}

impl Range {
    /// Create a range. `end = None` means the range is unbounded above.
    pub fn new(start: f64, end: Option<f64>, location: &str) -> Result<Self, DataError> {
        let end = end.unwrap_or(f64::INFINITY);
        if !start.is_finite() {
            return Err(DataError::Invalid(format!(
                "range start must be finite, got {start}"
            )));
        }
        // Also rejects NaN ends
        if start.partial_cmp(&end) != Some(Ordering::Less) {
            return Err(DataError::Invalid(format!(
                "range start {start} must be below end {end}"
            )));
        }
        let location = TravelPoint::new(location)
            .map_err(|e| DataError::Invalid(format!("range {start}〜{end}: {e}")))?;

        Ok(Self {
            start,
            end,
            location,
        })
    }

    /// Inclusive lower bound.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Exclusive upper bound (`f64::INFINITY` when unbounded).
    pub fn end(&self) -> f64 {
        self.end
    }

    /// True when the range has no upper bound.
    pub fn is_unbounded(&self) -> bool {
        self.end.is_infinite()
    }

    /// The travel point for lots in this range.
    pub fn location(&self) -> &TravelPoint {
        &self.location
    }

    /// `start <= key < end`.
    pub fn contains(&self, key: LotKey) -> bool {
        let k = key.value();
        self.start <= k && k < self.end
    }
}

/// Renders as "0〜5", or "2080〜" when unbounded.
impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unbounded() {
            write!(f, "{}〜", self.start)
        } else {
            write!(f, "{}〜{}", self.start, self.end)
        }
    }
}

/// Something odd about how a town's ranges cover `[0, ∞)`.
#[derive(Debug, Clone, PartialEq)]
pub enum CoverageIssue {
    /// Lots in `[from, to)` fall in no range.
    Gap { from: f64, to: f64 },
    /// A range starts before the previous one ends; the earlier one wins.
    Overlap { at: f64 },
}

impl fmt::Display for CoverageIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoverageIssue::Gap { from, to } if to.is_infinite() => write!(f, "gap {from}〜"),
            CoverageIssue::Gap { from, to } => write!(f, "gap {from}〜{to}"),
            CoverageIssue::Overlap { at } => write!(f, "overlap at {at}"),
        }
    }
}

/// The lot ranges of one town, in authored order.
///
/// Order matters: the resolver takes the first range that contains a key.
#[derive(Debug, Clone, PartialEq)]
pub struct TownRangeEntry {
    town: String,
    ranges: Vec<Range>,
}

impl TownRangeEntry {
    /// Create an entry. The town key must be non-blank and at least one range
    /// is required.
    pub fn new(town: &str, ranges: Vec<Range>) -> Result<Self, DataError> {
        let town = town.trim();
        if town.is_empty() {
            return Err(DataError::Invalid("town key cannot be empty".into()));
        }
        if ranges.is_empty() {
            return Err(DataError::Invalid(format!("town {town} has no ranges")));
        }
        Ok(Self {
            town: town.to_string(),
            ranges,
        })
    }

    /// The town key as it appears in the table.
    pub fn town(&self) -> &str {
        &self.town
    }

    /// Ranges in table order.
    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    /// Walk the ranges in order and report gaps and overlaps in the cover of
    /// `[0, ∞)`.
    pub fn coverage_issues(&self) -> Vec<CoverageIssue> {
        let mut issues = Vec::new();
        let mut covered_to = 0.0_f64;

        for range in &self.ranges {
            if range.start > covered_to {
                issues.push(CoverageIssue::Gap {
                    from: covered_to,
                    to: range.start,
                });
            } else if range.start < covered_to {
                issues.push(CoverageIssue::Overlap { at: range.start });
            }
            covered_to = covered_to.max(range.end);
        }

        if covered_to.is_finite() {
            issues.push(CoverageIssue::Gap {
                from: covered_to,
                to: f64::INFINITY,
            });
        }

        issues
    }
}

/// The entry used for towns that are not listed individually.
///
/// It applies when the input starts with `scope` (any input, if unset) and
/// contains none of the `excluded` names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatchAll {
    /// Town key of the entry to fall back to.
    pub town: String,
    /// Prefix the input must start with.
    #[serde(default)]
    pub scope: Option<String>,
    /// Names whose presence in the input disables the fallback.
    #[serde(default)]
    pub excluded: Vec<String>,
}

impl CatchAll {
    /// Whether an unmatched town name may fall back to this entry.
    pub fn applies_to(&self, town_name: &str) -> bool {
        let in_scope = self
            .scope
            .as_deref()
            .is_none_or(|scope| town_name.starts_with(scope));
        in_scope && !self.excluded.iter().any(|name| town_name.contains(name.as_str()))
    }
}

/// A named facility and its postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityRecord {
    pub name: String,
    pub address: String,
}
