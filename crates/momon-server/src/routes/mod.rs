//! Momon API Routes
//!
//! - /api/v1/monsters - Monster creation and listing (per device)
//! - /api/v1/monsters/:id - Monster detail

pub mod monster;
pub mod swagger;
