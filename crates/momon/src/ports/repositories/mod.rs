//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod identity_repository;
mod monster_repository;

pub use identity_repository::*;
pub use monster_repository::*;
