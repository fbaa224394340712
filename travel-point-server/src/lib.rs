//! Travel point server.
//!
//! A web application that answers: "Which travel point does this address
//! in the municipality belong to?" Addresses are matched to a town entry
//! and their lot number located in that town's range table.

pub mod config;
pub mod domain;
pub mod reference;
pub mod resolver;
pub mod web;
