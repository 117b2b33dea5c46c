//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod http_fetcher;
pub mod mock;
pub mod openai;
pub mod postgres;
pub mod s3;

// Re-exports
pub use http_fetcher::HttpImageFetcher;
pub use mock::MockPersonaGenerator;
pub use openai::OpenAiPersonaGenerator;
pub use postgres::{PgIdentityRepository, PgMonsterRepository};
pub use s3::S3ObjectStorage;
