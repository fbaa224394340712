//! Domain types for travel point resolution.
//!
//! Value types built from user input. Each enforces its invariants at
//! construction time, so the resolver can trust what it receives.

mod address;
mod error;
mod lot_number;
mod travel_point;

pub use address::ParsedAddress;
pub use error::{InputField, ResolveError};
pub use lot_number::{InvalidLotNumber, LotKey};
pub use travel_point::{EmptyTravelPoint, TravelPoint};
