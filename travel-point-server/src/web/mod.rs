//! Web layer for travel point lookup.
//!
//! Provides an HTML form and HTTP endpoints for resolving addresses and
//! facilities.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
