//! Address to travel point resolution.
//!
//! Three steps, composed by [`Resolver`]: parse the lot number into a
//! [`LotKey`](crate::domain::LotKey), match the town name to a reference
//! entry, then find the entry's range containing the key.

mod facade;
mod range;
mod town;

pub use facade::{ERROR_MARKER, LookupResult, LookupStatus, Resolution, Resolver};
pub use range::find_range;
pub use town::{MatchTier, TownMatch, TownMatcher};
