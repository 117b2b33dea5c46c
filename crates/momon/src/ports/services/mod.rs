//! Service Ports
//!
//! Abstract interfaces for external services.

mod clock;
mod image_store;
mod persona_generator;

pub use clock::*;
pub use image_store::*;
pub use persona_generator::*;
