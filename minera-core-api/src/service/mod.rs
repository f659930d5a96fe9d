pub mod audit_logger;
pub mod auditorias;
pub mod reporte;

pub use audit_logger::*;
pub use auditorias::*;
pub use reporte::*;

use async_trait::async_trait;

use crate::domain::auditoria::{Auditoria, NuevaAuditoria};
use crate::domain::usuario::Usuario;
use crate::error::ApiResult;

/// Persistence boundary of the audit subsystem.
///
/// Implementations wrap one database session: `append` is atomic within
/// that session's transaction scope, and `rollback` must restore the
/// session to a clean, reusable state after a failed write.
///
/// # Example
/// ```ignore
/// let store = PostgresAuditoriaStore::new(repos.auditoria_repository.clone(), executor);
/// let guardada = store.append(nueva).await?;
/// ```
#[async_trait]
pub trait AuditoriaStore: Send + Sync {
    /// Persist a candidate record, returning it with the assigned id.
    async fn append(&self, nueva: NuevaAuditoria) -> ApiResult<Auditoria>;

    /// Fetch one record, enriched with the actor's display name.
    async fn find_by_id(&self, id: i32) -> ApiResult<Option<Auditoria>>;

    /// Fetch records ordered by `aud_fecha` descending, enriched with the
    /// actor's display name.
    async fn list_all(&self, offset: usize, limit: usize) -> ApiResult<Vec<Auditoria>>;

    /// Administrative correction: overwrite an existing record.
    async fn update(&self, id: i32, cambios: NuevaAuditoria) -> ApiResult<Option<Auditoria>>;

    /// Administrative correction: remove a record.
    async fn delete(&self, id: i32) -> ApiResult<bool>;

    /// Restore the session after a failed write so later operations on the
    /// same session are unaffected.
    async fn rollback(&self) -> ApiResult<()>;
}

/// Username lookup against the user directory, used for actor resolution.
#[async_trait]
pub trait DirectorioUsuarios: Send + Sync {
    async fn find_by_username(&self, nombre_usuario: &str) -> ApiResult<Option<Usuario>>;
}
