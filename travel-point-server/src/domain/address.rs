//! Splitting a full address into town name and lot number.

use std::sync::LazyLock;

use regex::Regex;

/// Town name, then everything from the first (ASCII or full-width) digit on.
static TOWN_AND_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?P<town>.*?)(?P<number>[0-9０-９].*)$").expect("valid address pattern")
});

/// An address broken into the parts the resolver needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedAddress {
    /// Town name within the municipality, e.g. "本渡町広瀬".
    pub town_name: String,
    /// Raw lot number text, e.g. "1470番地". Empty if the address has none.
    pub raw_house_number: String,
}

impl ParsedAddress {
    /// Create a parsed address from its parts, trimming both.
    pub fn new(town_name: &str, raw_house_number: &str) -> Self {
        Self {
            town_name: town_name.trim().to_string(),
            raw_house_number: raw_house_number.trim().to_string(),
        }
    }

    /// Split a full address on the municipality name.
    ///
    /// Only the text after the first occurrence of `municipality` is used. If
    /// the municipality is absent both fields come back empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use travel_point_server::domain::ParsedAddress;
    ///
    /// let parsed = ParsedAddress::split("熊本県天草市本渡町広瀬1470番地", "天草市");
    /// assert_eq!(parsed.town_name, "本渡町広瀬");
    /// assert_eq!(parsed.raw_house_number, "1470番地");
    ///
    /// assert!(ParsedAddress::split("熊本市中央区1番", "天草市").is_empty());
    /// ```
    pub fn split(full_address: &str, municipality: &str) -> Self {
        if municipality.is_empty() {
            return Self::default();
        }
        let Some((_, rest)) = full_address.split_once(municipality) else {
            return Self::default();
        };

        match TOWN_AND_NUMBER.captures(rest) {
            Some(caps) => Self::new(&caps["town"], &caps["number"]),
            None => Self::new(rest, ""),
        }
    }

    /// True when neither a town nor a lot number could be extracted.
    pub fn is_empty(&self) -> bool {
        self.town_name.is_empty() && self.raw_house_number.is_empty()
    }

    /// True when the address carries a lot number.
    pub fn has_house_number(&self) -> bool {
        !self.raw_house_number.is_empty()
    }
}
