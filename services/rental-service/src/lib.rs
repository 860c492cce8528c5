//! Rental Service Library
//!
//! Greeting endpoints, one of which calls the first-name service.

pub mod config;
pub mod error;
pub mod routes;
pub mod upstream;

pub use config::Config;
pub use error::BonjourError;
pub use routes::{router, AppState};
pub use upstream::{HttpNameSource, NameSource};
