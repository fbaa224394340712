//! Travel point labels.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// "or" between two point names, spaced ("本渡 or 佐伊津") or not ("本渡or佐伊津").
static AMBIGUITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*or\s*").expect("valid ambiguity pattern"));

/// Error returned when a travel point label is empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("travel point label cannot be empty")]
pub struct EmptyTravelPoint;

/// The reference location a travel-expense distance is measured from.
///
/// Some lot ranges are deliberately assigned to either of two points
/// ("本渡 or 佐伊津"). Such a label is kept verbatim; nothing in this crate
/// picks one side.
///
/// # Examples
///
/// ```
/// use travel_point_server::domain::TravelPoint;
///
/// let single = TravelPoint::new("本渡").unwrap();
/// assert!(!single.is_ambiguous());
///
/// let either = TravelPoint::new("本渡 or 佐伊津").unwrap();
/// assert!(either.is_ambiguous());
/// assert_eq!(either.candidates(), vec!["本渡", "佐伊津"]);
/// assert_eq!(either.label(), "本渡 or 佐伊津");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TravelPoint(String);

impl TravelPoint {
    /// Create a travel point from its label.
    pub fn new(label: &str) -> Result<Self, EmptyTravelPoint> {
        if label.trim().is_empty() {
            return Err(EmptyTravelPoint);
        }
        Ok(TravelPoint(label.to_string()))
    }

    /// The label exactly as authored in the reference data.
    pub fn label(&self) -> &str {
        &self.0
    }

    /// The candidate point names. One entry unless the label is ambiguous.
    ///
    /// An "or" touching a Latin letter is part of a word ("Harbor") and does
    /// not separate names.
    pub fn candidates(&self) -> Vec<&str> {
        let label = self.0.as_str();
        let mut names = Vec::new();
        let mut start = 0;

        for m in AMBIGUITY.find_iter(label) {
            let or_start = m.start() + (m.as_str().len() - m.as_str().trim_start().len());
            let or_end = or_start + "or".len();
            let before = label[..or_start].chars().next_back();
            let after = label[or_end..].chars().next();
            if before.is_some_and(|c| c.is_ascii_alphabetic())
                || after.is_some_and(|c| c.is_ascii_alphabetic())
            {
                continue;
            }
            names.push(label[start..m.start()].trim());
            start = m.end();
        }
        names.push(label[start..].trim());
        names.retain(|name| !name.is_empty());

        if names.len() > 1 {
            names
        } else {
            vec![label.trim()]
        }
    }

    /// True when the label names more than one acceptable point.
    pub fn is_ambiguous(&self) -> bool {
        self.candidates().len() > 1
    }
}

impl fmt::Debug for TravelPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TravelPoint({})", self.0)
    }
}

impl fmt::Display for TravelPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_point() {
        let p = TravelPoint::new("本渡").unwrap();
        assert_eq!(p.label(), "本渡");
        assert_eq!(p.candidates(), vec!["本渡"]);
        assert!(!p.is_ambiguous());
    }

    #[test]
    fn ambiguous_point_keeps_label() {
        let p = TravelPoint::new("本渡  or  佐伊津").unwrap();
        assert!(p.is_ambiguous());
        assert_eq!(p.candidates(), vec!["本渡", "佐伊津"]);
        assert_eq!(p.label(), "本渡  or  佐伊津");
    }

    #[test]
    fn unspaced_or_is_ambiguous() {
        let p = TravelPoint::new("本渡or佐伊津").unwrap();
        assert!(p.is_ambiguous());
        assert_eq!(p.candidates(), vec!["本渡", "佐伊津"]);
        assert_eq!(p.label(), "本渡or佐伊津");

        let p = TravelPoint::new("本渡 or佐伊津").unwrap();
        assert_eq!(p.candidates(), vec!["本渡", "佐伊津"]);
    }

    #[test]
    fn word_containing_or_next_to_separator() {
        let p = TravelPoint::new("Harbor or Portland").unwrap();
        assert_eq!(p.candidates(), vec!["Harbor", "Portland"]);
    }

    #[test]
    fn or_inside_a_word_is_not_ambiguous() {
        let p = TravelPoint::new("Oregon Center").unwrap();
        assert!(!p.is_ambiguous());
        let p = TravelPoint::new("Harbor").unwrap();
        assert!(!p.is_ambiguous());
    }

    #[test]
    fn dangling_or_is_not_ambiguous() {
        let p = TravelPoint::new("本渡 or ").unwrap();
        assert!(!p.is_ambiguous());
        let p = TravelPoint::new("or佐伊津").unwrap();
        assert!(!p.is_ambiguous());
        assert_eq!(p.candidates(), vec!["or佐伊津"]);
        assert!(!TravelPoint::new("or").unwrap().is_ambiguous());
    }

    #[test]
    fn reject_empty() {
        assert_eq!(TravelPoint::new(""), Err(EmptyTravelPoint));
        assert_eq!(TravelPoint::new("  "), Err(EmptyTravelPoint));
    }

    #[test]
    fn display_and_debug() {
        let p = TravelPoint::new("牛深").unwrap();
        assert_eq!(format!("{}", p), "牛深");
        assert_eq!(format!("{:?}", p), "TravelPoint(牛深)");
    }
}
