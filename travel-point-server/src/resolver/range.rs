//! Finding the lot range a key falls in.

use tracing::debug;

use crate::domain::{LotKey, ResolveError};
use crate::reference::{Range, TownRangeEntry};

/// Find the first range of `entry`, in table order, with `start <= key < end`.
///
/// A key equal to one range's end belongs to the next range, so well-formed
/// contiguous data needs no boundary special case. Data with gaps yields
/// [`ResolveError::RangeNotFound`] for keys in a gap.
pub fn find_range(entry: &TownRangeEntry, key: LotKey) -> Result<&Range, ResolveError> {
    match entry.ranges().iter().find(|r| r.contains(key)) {
        Some(range) => {
            debug!(town = entry.town(), %key, range = %range, "matched range");
            Ok(range)
        }
        None => {
            debug!(town = entry.town(), %key, "no range contains key");
            Err(ResolveError::RangeNotFound {
                town: entry.town().to_string(),
                key,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: f64, end: Option<f64>, loc: &str) -> Range {
        Range::new(start, end, loc).unwrap()
    }

    fn entry(ranges: Vec<Range>) -> TownRangeEntry {
        TownRangeEntry::new("浄南町", ranges).unwrap()
    }

    fn key(s: &str) -> LotKey {
        LotKey::parse(s).unwrap()
    }

    fn location(e: &TownRangeEntry, k: &str) -> String {
        find_range(e, key(k)).unwrap().location().label().to_string()
    }

    #[test]
    fn key_inside_first_range() {
        let e = entry(vec![range(0.0, Some(5.0), "本渡"), range(5.0, None, "佐伊津")]);
        assert_eq!(location(&e, "4番15号"), "本渡");
        assert_eq!(location(&e, "0"), "本渡");
    }

    #[test]
    fn boundary_key_goes_to_next_range() {
        let e = entry(vec![
            range(0.0, Some(5.0), "本渡"),
            range(5.0, Some(99999.0), "佐伊津"),
        ]);
        assert_eq!(location(&e, "5"), "佐伊津");
        assert_eq!(location(&e, "4番99号"), "本渡");
    }

    #[test]
    fn fractional_boundary() {
        let e = entry(vec![range(0.0, Some(5.3), "本渡"), range(5.3, None, "佐伊津")]);
        assert_eq!(location(&e, "5-2"), "本渡");
        assert_eq!(location(&e, "5-3"), "佐伊津");
        assert_eq!(location(&e, "5-25"), "本渡");
    }

    #[test]
    fn key_past_last_end_is_not_found() {
        let e = entry(vec![range(0.0, Some(5.0), "本渡")]);
        let err = find_range(&e, key("5")).unwrap_err();
        assert_eq!(
            err,
            ResolveError::RangeNotFound {
                town: "浄南町".into(),
                key: key("5"),
            }
        );
    }

    #[test]
    fn key_in_gap_is_not_found() {
        let e = entry(vec![range(0.0, Some(5.0), "本渡"), range(10.0, None, "佐伊津")]);
        assert!(find_range(&e, key("7")).is_err());
        assert_eq!(location(&e, "10"), "佐伊津");
    }

    #[test]
    fn overlapping_ranges_first_in_table_order_wins() {
        let e = entry(vec![range(0.0, Some(10.0), "本渡"), range(5.0, None, "佐伊津")]);
        assert_eq!(location(&e, "7"), "本渡");
        assert_eq!(location(&e, "10"), "佐伊津");
    }

    #[test]
    fn table_order_not_sorted_order() {
        let e = entry(vec![range(5.0, None, "佐伊津"), range(0.0, Some(5.0), "本渡")]);
        assert_eq!(location(&e, "1"), "本渡");
        assert_eq!(location(&e, "6"), "佐伊津");
    }

    #[test]
    fn ambiguous_location_passes_through() {
        let e = entry(vec![range(0.0, None, "本渡 or 佐伊津")]);
        let r = find_range(&e, key("1")).unwrap();
        assert_eq!(r.location().label(), "本渡 or 佐伊津");
        assert!(r.location().is_ambiguous());
    }
}
