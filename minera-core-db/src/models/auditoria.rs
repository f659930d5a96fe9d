use chrono::{DateTime, Utc};
use minera_core_api::domain::auditoria::Auditoria;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::identifiable::Identifiable;

/// # Documentation
/// - Row of the `auditoria` table, one immutable entry per audited
///   business mutation.
/// - Written exactly once by the audit logger; the update/delete paths
///   exist only for administrative correction.
/// - `descripcion` is opaque text at this layer (usually a JSON document,
///   plain text when serialization fell back).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditoriaModel {
    /// Assigned by the store on insert; `0` for a not-yet-persisted row.
    pub id_auditoria: i32,
    pub accion: String,
    pub entidad: String,
    pub descripcion: String,
    pub aud_fecha: DateTime<Utc>,
    /// Acting user; `0` when the actor could not be resolved.
    pub aud_usuario: i32,
}

impl Identifiable for AuditoriaModel {
    fn get_id(&self) -> i32 {
        self.id_auditoria
    }
}

/// Read model: an `auditoria` row enriched with the actor's display name
/// via LEFT JOIN against `usuario`. A missing user never excludes the row;
/// `usuario_nombre` is simply `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditoriaConUsuario {
    pub auditoria: AuditoriaModel,
    pub usuario_nombre: Option<String>,
}

impl From<AuditoriaConUsuario> for Auditoria {
    fn from(valor: AuditoriaConUsuario) -> Self {
        let AuditoriaConUsuario {
            auditoria,
            usuario_nombre,
        } = valor;
        Auditoria {
            id_auditoria: auditoria.id_auditoria,
            accion: auditoria.accion,
            entidad: auditoria.entidad,
            descripcion: auditoria.descripcion,
            aud_fecha: auditoria.aud_fecha,
            aud_usuario: auditoria.aud_usuario,
            usuario_nombre,
        }
    }
}

impl From<AuditoriaModel> for Auditoria {
    fn from(auditoria: AuditoriaModel) -> Self {
        Auditoria {
            id_auditoria: auditoria.id_auditoria,
            accion: auditoria.accion,
            entidad: auditoria.entidad,
            descripcion: auditoria.descripcion,
            aud_fecha: auditoria.aud_fecha,
            aud_usuario: auditoria.aud_usuario,
            usuario_nombre: None,
        }
    }
}
