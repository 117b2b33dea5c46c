//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! repositories and external services.

mod identity_service;
mod image_store;
mod monster_service;

pub use identity_service::IdentityService;
pub use image_store::{ArchivingImageStore, PassThroughImageStore};
pub use monster_service::MonsterService;
