//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Identity: Pseudonymous caller keyed by device id
//! - PersonaDescriptor: AI-derived monster persona (ephemeral)
//! - MonsterRecord: Persisted monster
//! - ImageUpload: Caller-supplied image payload

mod identity;
mod monster;
mod persona;
mod upload;

pub use identity::*;
pub use monster::*;
pub use persona::*;
pub use upload::*;
