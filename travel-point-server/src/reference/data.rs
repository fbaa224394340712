//! The read-only reference dataset.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use super::error::DataError;
use super::table::{CatchAll, FacilityRecord, Range, TownRangeEntry};

/// Dataset compiled into the binary.
const BUILTIN_DATASET: &str = include_str!("../../data/amakusa.json");

/// Generic "town" suffix stripped when comparing town names.
const DEFAULT_TOWN_SUFFIX: &str = "町";

/// Town tables, catch-all rule and facility list for one municipality.
///
/// Built once at startup and never mutated; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    municipality: String,
    town_suffix: String,
    towns: Vec<TownRangeEntry>,
    catch_all: Option<CatchAll>,
    facilities: Vec<FacilityRecord>,
}

impl ReferenceData {
    /// The dataset shipped with the server.
    pub fn builtin() -> Result<Self, DataError> {
        Self::from_json_str(BUILTIN_DATASET)
    }

    /// Load a dataset from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Parse and validate a dataset from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        let dto: DatasetDto = serde_json::from_str(json)?;
        dto.into_data()
    }

    /// Municipality name that prefixes every address, e.g. "天草市".
    pub fn municipality(&self) -> &str {
        &self.municipality
    }

    /// Suffix stripped from both sides in the second matching tier.
    pub fn town_suffix(&self) -> &str {
        &self.town_suffix
    }

    /// Town entries in table order.
    pub fn towns(&self) -> &[TownRangeEntry] {
        &self.towns
    }

    /// The catch-all rule, if the dataset has one.
    pub fn catch_all(&self) -> Option<&CatchAll> {
        self.catch_all.as_ref()
    }

    /// The entry the catch-all rule points at.
    pub fn catch_all_entry(&self) -> Option<&TownRangeEntry> {
        let rule = self.catch_all.as_ref()?;
        self.towns.iter().find(|t| t.town() == rule.town)
    }

    /// Facilities in table order.
    pub fn facilities(&self) -> &[FacilityRecord] {
        &self.facilities
    }

    /// Look up a facility by exact name.
    pub fn facility(&self, name: &str) -> Option<&FacilityRecord> {
        self.facilities.iter().find(|f| f.name == name)
    }
}

/// Builder for reference datasets.
///
/// Mostly useful for tests and for embedding small tables in code.
#[derive(Debug)]
pub struct ReferenceDataBuilder {
    municipality: String,
    town_suffix: String,
    towns: Vec<(String, Vec<(f64, Option<f64>, String)>)>,
    catch_all: Option<CatchAll>,
    facilities: Vec<FacilityRecord>,
}

impl ReferenceDataBuilder {
    /// Start a dataset for the given municipality.
    pub fn new(municipality: &str) -> Self {
        Self {
            municipality: municipality.to_string(),
            town_suffix: DEFAULT_TOWN_SUFFIX.to_string(),
            towns: Vec::new(),
            catch_all: None,
            facilities: Vec::new(),
        }
    }

    /// Override the stripped town suffix.
    pub fn town_suffix(mut self, suffix: &str) -> Self {
        self.town_suffix = suffix.to_string();
        self
    }

    /// Add a town with `(start, end, location)` ranges; `end = None` is unbounded.
    pub fn town(mut self, town: &str, ranges: &[(f64, Option<f64>, &str)]) -> Self {
        let ranges = ranges
            .iter()
            .map(|(start, end, loc)| (*start, *end, (*loc).to_string()))
            .collect();
        self.towns.push((town.to_string(), ranges));
        self
    }

    /// Set the catch-all rule.
    pub fn catch_all(mut self, town: &str, scope: Option<&str>, excluded: &[&str]) -> Self {
        self.catch_all = Some(CatchAll {
            town: town.to_string(),
            scope: scope.map(str::to_string),
            excluded: excluded.iter().map(|s| (*s).to_string()).collect(),
        });
        self
    }

    /// Add a facility.
    pub fn facility(mut self, name: &str, address: &str) -> Self {
        self.facilities.push(FacilityRecord {
            name: name.to_string(),
            address: address.to_string(),
        });
        self
    }

    /// Validate and build the dataset.
    pub fn build(self) -> Result<ReferenceData, DataError> {
        DatasetDto {
            municipality: self.municipality,
            town_suffix: self.town_suffix,
            towns: self
                .towns
                .into_iter()
                .map(|(town, ranges)| TownDto {
                    town,
                    ranges: ranges
                        .into_iter()
                        .map(|(start, end, location)| RangeDto {
                            start,
                            end,
                            location,
                        })
                        .collect(),
                })
                .collect(),
            catch_all: self.catch_all,
            facilities: self.facilities,
        }
        .into_data()
    }
}

/// On-disk dataset shape.
#[derive(Debug, Deserialize)]
struct DatasetDto {
    municipality: String,
    #[serde(default = "default_town_suffix")]
    town_suffix: String,
    towns: Vec<TownDto>,
    #[serde(default)]
    catch_all: Option<CatchAll>,
    #[serde(default)]
    facilities: Vec<FacilityRecord>,
}

#[derive(Debug, Deserialize)]
struct TownDto {
    town: String,
    ranges: Vec<RangeDto>,
}

#[derive(Debug, Deserialize)]
struct RangeDto {
    start: f64,
    #[serde(default)]
    end: Option<f64>,
    location: String,
}

fn default_town_suffix() -> String {
    DEFAULT_TOWN_SUFFIX.to_string()
}

impl DatasetDto {
    /// Convert to validated reference data.
    fn into_data(self) -> Result<ReferenceData, DataError> {
        let municipality = self.municipality.trim().to_string();
        if municipality.is_empty() {
            return Err(DataError::Invalid("municipality cannot be empty".into()));
        }

        let mut seen = HashSet::new();
        let mut towns = Vec::with_capacity(self.towns.len());
        for town in self.towns {
            let ranges = town
                .ranges
                .into_iter()
                .map(|r| Range::new(r.start, r.end, &r.location))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| match e {
                    DataError::Invalid(reason) => {
                        DataError::Invalid(format!("town {}: {reason}", town.town))
                    }
                    other => other,
                })?;
            let entry = TownRangeEntry::new(&town.town, ranges)?;
            if !seen.insert(entry.town().to_string()) {
                return Err(DataError::Invalid(format!(
                    "duplicate town {}",
                    entry.town()
                )));
            }
            towns.push(entry);
        }

        if let Some(rule) = &self.catch_all {
            if !seen.contains(rule.town.as_str()) {
                return Err(DataError::Invalid(format!(
                    "catch-all names unknown town {}",
                    rule.town
                )));
            }
        }

        let mut names = HashSet::new();
        for facility in &self.facilities {
            if facility.name.trim().is_empty() {
                return Err(DataError::Invalid("facility name cannot be empty".into()));
            }
            if !names.insert(facility.name.as_str()) {
                return Err(DataError::Invalid(format!(
                    "duplicate facility {}",
                    facility.name
                )));
            }
        }

        Ok(ReferenceData {
            municipality,
            town_suffix: self.town_suffix,
            towns,
            catch_all: self.catch_all,
            facilities: self.facilities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SMALL: &str = r#"{
        "municipality": "天草市",
        "towns": [
            { "town": "浄南町", "ranges": [
                { "start": 0, "end": 5, "location": "本渡" },
                { "start": 5, "location": "佐伊津" }
            ] }
        ],
        "facilities": [ { "name": "体育館", "address": "天草市浄南町2番1号" } ]
    }"#;

    #[test]
    fn parse_small_dataset() {
        let data = ReferenceData::from_json_str(SMALL).unwrap();
        assert_eq!(data.municipality(), "天草市");
        assert_eq!(data.town_suffix(), "町");
        assert_eq!(data.towns().len(), 1);
        assert!(data.towns()[0].ranges()[1].is_unbounded());
        assert!(data.catch_all().is_none());
        assert!(data.catch_all_entry().is_none());
        assert_eq!(data.facility("体育館").unwrap().address, "天草市浄南町2番1号");
        assert!(data.facility("図書館").is_none());
    }

    #[test]
    fn builtin_dataset_is_valid() {
        let data = ReferenceData::builtin().unwrap();
        assert_eq!(data.municipality(), "天草市");
        assert!(!data.towns().is_empty());
        assert!(!data.facilities().is_empty());
        assert!(data.catch_all_entry().is_some());
    }

    #[test]
    fn builtin_dataset_covers_every_lot() {
        let data = ReferenceData::builtin().unwrap();
        for town in data.towns() {
            assert!(
                town.coverage_issues().is_empty(),
                "{} has coverage issues: {:?}",
                town.town(),
                town.coverage_issues()
            );
        }
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SMALL.as_bytes()).unwrap();

        let data = ReferenceData::load(file.path()).unwrap();
        assert_eq!(data.towns()[0].town(), "浄南町");
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReferenceData::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn reject_malformed_json() {
        let err = ReferenceData::from_json_str("{").unwrap_err();
        assert!(matches!(err, DataError::Json(_)));
    }

    #[test]
    fn reject_empty_municipality() {
        let err = ReferenceDataBuilder::new(" ").build().unwrap_err();
        assert!(err.to_string().contains("municipality"));
    }

    #[test]
    fn reject_duplicate_town() {
        let err = ReferenceDataBuilder::new("天草市")
            .town("浄南町", &[(0.0, None, "本渡")])
            .town("浄南町", &[(0.0, None, "佐伊津")])
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid reference data: duplicate town 浄南町");
    }

    #[test]
    fn reject_bad_range_names_town() {
        let err = ReferenceDataBuilder::new("天草市")
            .town("浄南町", &[(5.0, Some(1.0), "本渡")])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("town 浄南町"));
    }

    #[test]
    fn reject_unknown_catch_all_town() {
        let err = ReferenceDataBuilder::new("天草市")
            .town("浄南町", &[(0.0, None, "本渡")])
            .catch_all("その他", None, &[])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("catch-all"));
    }

    #[test]
    fn reject_duplicate_facility() {
        let err = ReferenceDataBuilder::new("天草市")
            .town("浄南町", &[(0.0, None, "本渡")])
            .facility("体育館", "天草市浄南町1")
            .facility("体育館", "天草市浄南町2")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("duplicate facility"));
    }

    #[test]
    fn builder_catch_all_entry() {
        let data = ReferenceDataBuilder::new("天草市")
            .town_suffix("町")
            .town("浄南町", &[(0.0, None, "本渡")])
            .town("その他", &[(0.0, None, "支所")])
            .catch_all("その他", None, &["本渡"])
            .build()
            .unwrap();
        assert_eq!(data.catch_all_entry().unwrap().town(), "その他");
        assert_eq!(data.catch_all().unwrap().excluded, vec!["本渡".to_string()]);
    }
}
