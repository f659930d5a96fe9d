use async_trait::async_trait;
use sqlx::Database;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for appending a record to an append-only log
///
/// The store assigns the surrogate key on insert; whatever id the input
/// carries is ignored. The append is atomic with respect to the caller's
/// transaction context.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The entity type that must implement Identifiable trait
///
/// # Example
/// ```ignore
/// impl Append<Postgres, AuditoriaModel> for AuditoriaRepositoryImpl {
///     async fn append(&self, item: AuditoriaModel) -> Result<AuditoriaModel, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait Append<DB: Database, T: Identifiable>: Send + Sync {
    /// Persist one record
    ///
    /// # Arguments
    /// * `item` - The record to persist; its id field is assigned by the store
    ///
    /// # Returns
    /// * `Ok(T)` - The persisted record with its assigned id
    /// * `Err` - An error if the insert could not be executed
    async fn append(&self, item: T) -> Result<T, Box<dyn std::error::Error + Send + Sync>>;
}
