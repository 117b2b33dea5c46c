//! Momon Domain Library
//!
//! Core domain types and interfaces for the Momon monster generator.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities
//!   - `entities/`: Core domain models (Identity, PersonaDescriptor, MonsterRecord)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `services/`: External service interfaces (generation, image storage, clock)
//!
//! # Usage
//!
//! ```rust,ignore
//! use momon::domain::{Identity, MonsterRecord};
//! use momon::ports::{IdentityRepository, PersonaGenerator};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    DomainError, Identity, ImageUpload, MonsterRecord, NewMonster, PersonaDescriptor,
};
pub use ports::{
    Clock,
    // Repositories
    IdentityRepository,
    // External services
    ImageFetcher,
    ImageStore,
    MonsterRepository,
    ObjectStorage,
    PersonaGenerator,
    SystemClock,
};
