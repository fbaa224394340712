//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::reference::FacilityRecord;
use crate::resolver::{LookupResult, LookupStatus};

/// Request to resolve a town and lot number.
#[derive(Debug, Default, Deserialize)]
pub struct ResolveRequest {
    /// Town name, e.g. "浄南町"
    #[serde(default)]
    pub town: String,

    /// Lot number in local notation, e.g. "4番15号"
    #[serde(default)]
    pub number: String,
}

/// Request to resolve a registered facility.
#[derive(Debug, Default, Deserialize)]
pub struct FacilityRequest {
    /// Facility name as listed in the reference data
    #[serde(default)]
    pub name: String,
}

/// A resolution result.
#[derive(Debug, Serialize)]
pub struct LookupResponse {
    /// Travel point label, or error-marked message
    pub point: String,

    /// Matched town key (empty if none)
    pub matched_town: String,

    /// Matched range, e.g. "0〜5" (empty if none)
    pub matched_range_description: String,

    /// Outcome category
    pub status: LookupStatus,
}

impl From<&LookupResult> for LookupResponse {
    fn from(result: &LookupResult) -> Self {
        Self {
            point: result.point.clone(),
            matched_town: result.matched_town.clone(),
            matched_range_description: result.matched_range_description.clone(),
            status: result.status(),
        }
    }
}

/// A facility in the picklist.
#[derive(Debug, Serialize)]
pub struct FacilitySummary {
    pub name: String,
    pub address: String,
}

impl From<&FacilityRecord> for FacilitySummary {
    fn from(record: &FacilityRecord) -> Self {
        Self {
            name: record.name.clone(),
            address: record.address.clone(),
        }
    }
}

/// Response listing facilities in table order.
#[derive(Debug, Serialize)]
pub struct FacilityListResponse {
    pub facilities: Vec<FacilitySummary>,
}

/// Response listing town keys in table order.
#[derive(Debug, Serialize)]
pub struct TownListResponse {
    /// Municipality the towns belong to
    pub municipality: String,

    /// Town keys
    pub towns: Vec<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
