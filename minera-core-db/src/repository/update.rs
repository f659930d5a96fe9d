use async_trait::async_trait;
use sqlx::Database;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for overwriting one entity by its ID
///
/// Audit records are write-once in normal flow; this trait backs the
/// administrative correction path only.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The entity type that must implement Identifiable trait
///
/// # Example
/// ```ignore
/// impl Update<Postgres, AuditoriaModel> for AuditoriaRepositoryImpl {
///     async fn update(&self, id: i32, item: AuditoriaModel) -> Result<Option<AuditoriaModel>, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait Update<DB: Database, T: Identifiable>: Send + Sync {
    /// Overwrite an entity
    ///
    /// # Arguments
    /// * `id` - The surrogate key of the entity to overwrite
    /// * `item` - The new field values
    ///
    /// # Returns
    /// * `Ok(Some(T))` - The updated entity
    /// * `Ok(None)` - If no entity with that id exists
    /// * `Err` - An error if the update could not be executed
    async fn update(
        &self,
        id: i32,
        item: T,
    ) -> Result<Option<T>, Box<dyn std::error::Error + Send + Sync>>;
}
