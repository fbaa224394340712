//! Matching an input town name to a reference entry.
//!
//! Tiers are tried in order and the first hit in table order wins:
//!
//! 1. exact equality with the town key;
//! 2. equality after stripping the generic town suffix from both sides;
//! 3. the catch-all entry, if its rule applies to the input.
//!
//! Partial or substring matching is never attempted: "南町" does not match
//! "浄南町".

use std::fmt;

use tracing::debug;

use crate::domain::ResolveError;
use crate::reference::{ReferenceData, TownRangeEntry};

/// Which tier produced a town match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    /// Input equals the town key.
    Exact,
    /// Input equals the town key once the town suffix is removed from both.
    SuffixStripped,
    /// No entry matched; the catch-all entry was used.
    CatchAll,
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MatchTier::Exact => "exact",
            MatchTier::SuffixStripped => "suffix-stripped",
            MatchTier::CatchAll => "catch-all",
        })
    }
}

/// A town entry together with how it was found.
#[derive(Debug, Clone, Copy)]
pub struct TownMatch<'a> {
    pub entry: &'a TownRangeEntry,
    pub tier: MatchTier,
}

/// Finds town entries in a reference dataset.
#[derive(Debug, Clone, Copy)]
pub struct TownMatcher<'a> {
    data: &'a ReferenceData,
}

impl<'a> TownMatcher<'a> {
    /// Create a matcher over the given dataset.
    pub fn new(data: &'a ReferenceData) -> Self {
        Self { data }
    }

    /// Find the entry for `town_name`.
    ///
    /// Returns [`ResolveError::TownNotFound`] naming the input when no tier
    /// matches and the catch-all does not apply.
    pub fn find(&self, town_name: &str) -> Result<TownMatch<'a>, ResolveError> {
        let town_name = town_name.trim();
        let towns = self.data.towns();

        if let Some(entry) = towns.iter().find(|t| t.town() == town_name) {
            return Ok(self.hit(town_name, entry, MatchTier::Exact));
        }

        let stripped = self.strip_suffix(town_name);
        if !stripped.is_empty() {
            if let Some(entry) = towns
                .iter()
                .find(|t| self.strip_suffix(t.town()) == stripped)
            {
                return Ok(self.hit(town_name, entry, MatchTier::SuffixStripped));
            }
        }

        if !town_name.is_empty() {
            let catch_all = self
                .data
                .catch_all()
                .filter(|rule| rule.applies_to(town_name))
                .and_then(|_| self.data.catch_all_entry());
            if let Some(entry) = catch_all {
                return Ok(self.hit(town_name, entry, MatchTier::CatchAll));
            }
        }

        debug!(town = town_name, "no town entry matched");
        Err(ResolveError::TownNotFound {
            town: town_name.to_string(),
        })
    }

    fn strip_suffix<'s>(&self, name: &'s str) -> &'s str {
        let suffix = self.data.town_suffix();
        if suffix.is_empty() {
            return name;
        }
        name.strip_suffix(suffix).unwrap_or(name)
    }

    fn hit(&self, input: &str, entry: &'a TownRangeEntry, tier: MatchTier) -> TownMatch<'a> {
        debug!(input, town = entry.town(), %tier, "matched town");
        TownMatch { entry, tier }
    }
}
