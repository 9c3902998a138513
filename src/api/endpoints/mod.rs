//! API endpoint handlers.

pub mod analyze;
pub mod health;
