//! PostgreSQL Repository Implementations

mod identity_repository;
mod monster_repository;

pub use identity_repository::PgIdentityRepository;
pub use monster_repository::PgMonsterRepository;

use momon::DomainError;

/// Map sqlx errors into domain errors, keeping unique violations distinct
fn map_db_error(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            DomainError::Conflict(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
