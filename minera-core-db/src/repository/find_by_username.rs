use async_trait::async_trait;
use sqlx::Database;

/// Generic repository trait for looking an entity up by username
///
/// Backs actor resolution in the audit logger: a `sub` claim is resolved
/// to a user record, and a miss is an `Ok(None)`, never an error.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The entity type returned by the lookup
///
/// # Example
/// ```ignore
/// impl FindByUsername<Postgres, UsuarioModel> for UsuarioRepositoryImpl {
///     async fn find_by_username(&self, nombre_usuario: &str) -> Result<Option<UsuarioModel>, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait FindByUsername<DB: Database, T>: Send + Sync {
    /// Find an entity by its unique username
    ///
    /// # Arguments
    /// * `nombre_usuario` - The username to look up
    ///
    /// # Returns
    /// * `Ok(Some(T))` - The found entity
    /// * `Ok(None)` - If no entity with that username exists
    /// * `Err` - An error if the query could not be executed
    async fn find_by_username(
        &self,
        nombre_usuario: &str,
    ) -> Result<Option<T>, Box<dyn std::error::Error + Send + Sync>>;
}
