use crate::domain::auditoria::{Auditoria, NuevaAuditoria};
use crate::domain::filtros::FiltrosExportacion;
use crate::error::{ApiError, ApiResult};
use crate::service::reporte;
use crate::service::AuditoriaStore;

/// Record ceiling for a single export. The report is request-scoped, so
/// the candidate set is bounded instead of streamed.
const LIMITE_EXPORTACION: usize = 10_000;

/// Write service over the audit store.
///
/// Thin orchestration: truncates candidate records defensively, delegates
/// to the store, and maps missing ids to `NotFound` on the administrative
/// correction paths.
pub struct ServicioAuditorias<S> {
    store: S,
}

impl<S: AuditoriaStore> ServicioAuditorias<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persist a candidate record. Text fields are truncated to the column
    /// limits here even when the caller already truncated them.
    pub async fn crear(&self, nueva: NuevaAuditoria) -> ApiResult<Auditoria> {
        self.store.append(nueva.truncada()).await
    }

    pub async fn obtener(&self, id: i32) -> ApiResult<Auditoria> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Auditoria {id}")))
    }

    /// Records ordered most recent first.
    pub async fn listar(&self, offset: usize, limit: usize) -> ApiResult<Vec<Auditoria>> {
        self.store.list_all(offset, limit).await
    }

    /// Administrative correction passthrough.
    pub async fn actualizar(&self, id: i32, cambios: NuevaAuditoria) -> ApiResult<Auditoria> {
        self.store
            .update(id, cambios.truncada())
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Auditoria {id}")))
    }

    /// Administrative correction passthrough.
    pub async fn eliminar(&self, id: i32) -> ApiResult<()> {
        if self.store.delete(id).await? {
            Ok(())
        } else {
            Err(ApiError::NotFound(format!("Auditoria {id}")))
        }
    }

    /// Loads the candidate set, applies the filters and renders the PDF
    /// report.
    pub async fn exportar_pdf(&self, filtros: &FiltrosExportacion) -> ApiResult<Vec<u8>> {
        let items = self.store.list_all(0, LIMITE_EXPORTACION).await?;
        let filtrados = filtros.aplicar(items);
        reporte::generar_pdf(&filtrados, filtros)
    }

    /// Session recovery hook for the audit logger's failure isolation.
    pub async fn rollback(&self) -> ApiResult<()> {
        self.store.rollback().await
    }
}
