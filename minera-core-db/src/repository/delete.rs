use async_trait::async_trait;
use sqlx::Database;

/// Generic repository trait for deleting one entity by its ID
///
/// Audit records are never destroyed in normal flow; this trait backs the
/// administrative correction path only.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
///
/// # Example
/// ```ignore
/// impl Delete<Postgres> for AuditoriaRepositoryImpl {
///     async fn delete(&self, id: i32) -> Result<bool, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait Delete<DB: Database>: Send + Sync {
    /// Delete an entity by its unique identifier
    ///
    /// # Arguments
    /// * `id` - The surrogate key of the entity to delete
    ///
    /// # Returns
    /// * `Ok(true)` - The entity existed and was deleted
    /// * `Ok(false)` - No entity with that id exists
    /// * `Err` - An error if the delete could not be executed
    async fn delete(&self, id: i32) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;
}
