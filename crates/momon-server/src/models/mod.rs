//! Momon Data Models
//!
//! Request/response DTOs for the HTTP surface.

mod monster;

pub use monster::*;
