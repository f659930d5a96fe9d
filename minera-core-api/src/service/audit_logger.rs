use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::auditoria::{
    truncar, NuevaAuditoria, ACCION_CREATE, ACCION_DELETE, ACCION_MAX, ACCION_UPDATE,
    DESCRIPCION_MAX, ENTIDAD_MAX,
};
use crate::domain::descripcion::{serializar_descripcion, ValorDescripcion};
use crate::domain::usuario::Claims;
use crate::error::ApiError;
use crate::service::auditorias::ServicioAuditorias;
use crate::service::{AuditoriaStore, DirectorioUsuarios};

/// Failure-isolated audit facade.
///
/// Every business write path calls this after its mutation commits. The
/// contract is fire-and-forget: a failed audit write rolls the session
/// back, emits a diagnostic, and returns normally — the triggering
/// operation's outcome is never affected.
pub struct AuditLogger<S, D> {
    servicio: ServicioAuditorias<S>,
    directorio: D,
    usuario_actual: Claims,
}

impl<S: AuditoriaStore, D: DirectorioUsuarios> AuditLogger<S, D> {
    pub fn new(store: S, directorio: D, usuario_actual: Claims) -> Self {
        Self {
            servicio: ServicioAuditorias::new(store),
            directorio,
            usuario_actual,
        }
    }

    /// Records `accion` over `entidad`.
    ///
    /// `descripcion` is serialized without ever failing, text fields are
    /// truncated to the column limits, the actor is resolved from the
    /// claims unless overridden, and the timestamp defaults to now (UTC).
    pub async fn log(
        &self,
        accion: &str,
        entidad: &str,
        descripcion: impl Into<ValorDescripcion>,
        aud_usuario: Option<i32>,
        aud_fecha: Option<DateTime<Utc>>,
    ) {
        let descripcion = serializar_descripcion(&descripcion.into());
        let usuario = match aud_usuario {
            Some(id) => id,
            None => self.resolver_usuario().await,
        };

        let nueva = NuevaAuditoria {
            accion: truncar(accion, ACCION_MAX),
            entidad: truncar(entidad, ENTIDAD_MAX),
            descripcion: truncar(&descripcion, DESCRIPCION_MAX),
            aud_fecha: aud_fecha.unwrap_or_else(Utc::now),
            aud_usuario: usuario,
        };

        if let Err(error) = self.servicio.crear(nueva).await {
            // Reset the session first: a poisoned transaction must not
            // leak into the operations that follow on this session.
            if let Err(rb) = self.servicio.rollback().await {
                tracing::error!(
                    "No se pudo restablecer la sesión tras un fallo de auditoría: {rb}"
                );
            }
            match error {
                ApiError::DatabaseError(detalle) => tracing::warn!(
                    "Fallo al crear el registro de auditoría para {accion} en {entidad}: \
                     {detalle}. La operación principal se completó, pero el registro de \
                     auditoría no se realizó."
                ),
                otro => tracing::error!(
                    "Error inesperado al crear el registro de auditoría para {accion} en \
                     {entidad}: {otro}"
                ),
            }
        }
    }

    /// Records the creation of `entidad` with id `entity_id` and the
    /// creation payload.
    pub async fn log_creacion(
        &self,
        entidad: &str,
        entity_id: i32,
        payload: Option<serde_json::Value>,
    ) {
        let descripcion = json!({
            "id": entity_id,
            "data": payload.unwrap_or_else(|| json!({})),
        });
        self.log(ACCION_CREATE, entidad, descripcion, None, None).await;
    }

    /// Records an update of `entidad` with the changed fields.
    pub async fn log_actualizacion(
        &self,
        entidad: &str,
        entity_id: i32,
        changes: Option<serde_json::Value>,
    ) {
        let descripcion = json!({
            "id": entity_id,
            "changes": changes.unwrap_or_else(|| json!({})),
        });
        self.log(ACCION_UPDATE, entidad, descripcion, None, None).await;
    }

    /// Records the deletion of `entidad` with id `entity_id`.
    pub async fn log_eliminacion(&self, entidad: &str, entity_id: i32) {
        self.log(ACCION_DELETE, entidad, json!({ "id": entity_id }), None, None)
            .await;
    }

    /// Actor resolution: explicit numeric claim, then directory lookup by
    /// username, then `0`. Lookup misses and lookup errors both resolve to
    /// `0` — this path never propagates.
    async fn resolver_usuario(&self) -> i32 {
        if let Some(id) = self.usuario_actual.id {
            return id;
        }
        let Some(sub) = self.usuario_actual.sub.as_deref() else {
            return 0;
        };
        match self.directorio.find_by_username(sub).await {
            Ok(Some(usuario)) => usuario.id_usuario,
            Ok(None) => 0,
            Err(error) => {
                tracing::debug!("Fallo al resolver el usuario '{sub}': {error}");
                0
            }
        }
    }
}
