//! Lot number (番地) normalisation.

use std::fmt;

/// Error returned when a lot number has no usable numeric part.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid lot number {raw:?}: {reason}")]
pub struct InvalidLotNumber {
    raw: String,
    reason: &'static str,
}

impl InvalidLotNumber {
    /// The input that failed to parse.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// Separator every lot/number token is normalised to.
const SEPARATOR: char = '.';

/// Lot-number tokens, longest first so that "番地" wins over "番".
const LOT_TOKENS: [&str; 4] = ["番地", "番", "号", "の"];

/// Hyphen-like characters seen in hand-typed addresses.
///
/// 'ー' (U+30FC) and 'ｰ' are the long-vowel marks an IME produces when a
/// hyphen is typed in kana mode; they separate numbers here.
const HYPHENS: [char; 11] = [
    '-', '‐', '‑', '‒', '–', '—', '―', '−', 'ー', '－', 'ｰ',
];

/// A comparable key derived from a lot number.
///
/// The integer part is the primary lot number and the fractional part is the
/// secondary number, concatenated as literal decimal digits: "4番15号" is
/// `4.15`, and "1-2-3" is `1.2` because only the first two components take
/// part in travel-distance comparison.
///
/// A `LotKey` is always finite.
///
/// # Examples
///
/// ```
/// use travel_point_server::domain::LotKey;
///
/// assert_eq!(LotKey::parse("４番１５号").unwrap().value(), 4.15);
/// assert_eq!(LotKey::parse("1470番地").unwrap().value(), 1470.0);
/// assert_eq!(LotKey::parse("1-2-3").unwrap().value(), 1.2);
///
/// // No lot number at all is the zero key
/// assert_eq!(LotKey::parse("").unwrap(), LotKey::ZERO);
///
/// // Text without digits is rejected rather than coerced to zero
/// assert!(LotKey::parse("甲").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct LotKey(f64);

impl LotKey {
    /// Key used for addresses that carry no lot number.
    pub const ZERO: LotKey = LotKey(0.0);

    /// Parse a raw lot number string.
    ///
    /// Blank input yields [`LotKey::ZERO`]. Input that is not blank but has no
    /// numeric component, or has components that are not plain digits after
    /// normalisation, is an error.
    pub fn parse(raw: &str) -> Result<Self, InvalidLotNumber> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return Ok(Self::ZERO);
        }

        let mut segments = normalized.split(SEPARATOR).filter(|s| !s.is_empty());
        let literal = match (segments.next(), segments.next()) {
            (Some(primary), Some(secondary)) => format!("{primary}{SEPARATOR}{secondary}"),
            (Some(primary), None) => primary.to_string(),
            (None, _) => return Err(invalid(raw, "no numeric component")),
        };

        if !literal
            .chars()
            .all(|c| c.is_ascii_digit() || c == SEPARATOR)
        {
            return Err(invalid(raw, "contains non-numeric characters"));
        }

        match literal.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(LotKey(value)),
            _ => Err(invalid(raw, "out of range")),
        }
    }

    /// Returns the numeric key.
    pub fn value(&self) -> f64 {
        self.0
    }
}

fn invalid(raw: &str, reason: &'static str) -> InvalidLotNumber {
    InvalidLotNumber {
        raw: raw.to_string(),
        reason,
    }
}

/// Trim the ends, fold full-width digits to ASCII, and turn every lot token,
/// hyphen and interior space into [`SEPARATOR`].
///
/// "4 15" is therefore `4.15`, never `415`.
fn normalize(raw: &str) -> String {
    let mut folded: String = raw
        .trim()
        .chars()
        .map(fold_digit)
        .map(|c| {
            if c.is_whitespace() || HYPHENS.contains(&c) {
                SEPARATOR
            } else {
                c
            }
        })
        .collect();

    for token in LOT_TOKENS {
        folded = folded.replace(token, &SEPARATOR.to_string());
    }

    folded
}

/// Map a full-width digit (U+FF10..U+FF19) to its ASCII form.
fn fold_digit(c: char) -> char {
    match c {
        '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
        _ => c,
    }
}

impl fmt::Debug for LotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LotKey({})", self.0)
    }
}

impl fmt::Display for LotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// A bare integer parses to itself
        #[test]
        fn integer_roundtrip(n in 0u32..100_000) {
            let k = LotKey::parse(&n.to_string()).unwrap();
            prop_assert_eq!(k.value(), n as f64);
        }

        /// "A番B号" and "A-B" always agree
        #[test]
        fn notations_agree(a in 0u32..10_000, b in 1u32..1_000) {
            let kanji = LotKey::parse(&format!("{a}番{b}号")).unwrap();
            let hyphen = LotKey::parse(&format!("{a}-{b}")).unwrap();
            prop_assert_eq!(kanji, hyphen);
        }

        /// Space-separated numbers agree with the hyphenated form
        #[test]
        fn spaced_notation_agrees(a in 0u32..10_000, b in 1u32..1_000) {
            let spaced = LotKey::parse(&format!("{a} {b}")).unwrap();
            let hyphen = LotKey::parse(&format!("{a}-{b}")).unwrap();
            prop_assert_eq!(spaced, hyphen);
        }

        /// A third component never changes the key
        #[test]
        fn third_component_ignored(a in 0u32..10_000, b in 1u32..1_000, c in 0u32..1_000) {
            let two = LotKey::parse(&format!("{a}-{b}")).unwrap();
            let three = LotKey::parse(&format!("{a}-{b}-{c}")).unwrap();
            prop_assert_eq!(two, three);
        }

        /// The primary number is the integer part
        #[test]
        fn integer_part_is_primary(a in 0u32..10_000, b in 1u32..1_000) {
            let k = LotKey::parse(&format!("{a}番{b}号")).unwrap();
            prop_assert_eq!(k.value().trunc(), a as f64);
        }

        /// Parsing never panics and never yields a non-finite key
        #[test]
        fn never_panics(s in "\\PC{0,20}") {
            if let Ok(k) = LotKey::parse(&s) {
                prop_assert!(k.value().is_finite());
            }
        }
    }
}
