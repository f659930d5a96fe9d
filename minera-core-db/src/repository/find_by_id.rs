use async_trait::async_trait;
use sqlx::Database;

/// Generic repository trait for finding one read-model row by its ID
///
/// Returns an Option to handle cases where the entity might not exist.
/// `T` is a read model rather than a table row: lookups may enrich the
/// base row (for audit records, the actor's display name via outer join).
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The read-model type returned by the lookup
///
/// # Example
/// ```ignore
/// impl FindById<Postgres, AuditoriaConUsuario> for AuditoriaRepositoryImpl {
///     async fn find_by_id(&self, id: i32) -> Result<Option<AuditoriaConUsuario>, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait FindById<DB: Database, T>: Send + Sync {
    /// Find an entity by its unique identifier
    ///
    /// # Arguments
    /// * `id` - The surrogate key of the entity to find
    ///
    /// # Returns
    /// * `Ok(Some(T))` - The found entity
    /// * `Ok(None)` - If the entity does not exist
    /// * `Err` - An error if the query could not be executed
    async fn find_by_id(&self, id: i32)
        -> Result<Option<T>, Box<dyn std::error::Error + Send + Sync>>;
}
