use minera_core_db::models::auditoria::{AuditoriaConUsuario, AuditoriaModel};
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

use crate::executor::Executor;
use crate::utils::TryFromRow;

/// Columns selected by every enriched read. The outer join keeps records
/// whose actor has no matching `usuario` row.
pub(super) const SELECT_CON_USUARIO: &str = r#"
    SELECT a.id_auditoria, a.accion, a.entidad, a.descripcion,
           a.aud_fecha, a.aud_usuario,
           u.nombre_completo AS usuario_nombre
    FROM auditoria a
    LEFT JOIN usuario u ON a.aud_usuario = u.id_usuario
"#;

pub struct AuditoriaRepositoryImpl {
    pub(crate) executor: Executor,
}

impl AuditoriaRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for AuditoriaModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(AuditoriaModel {
            id_auditoria: row.try_get("id_auditoria")?,
            accion: row.try_get("accion")?,
            entidad: row.try_get("entidad")?,
            descripcion: row.try_get("descripcion")?,
            aud_fecha: row.try_get("aud_fecha")?,
            aud_usuario: row.try_get("aud_usuario")?,
        })
    }
}

impl TryFromRow<PgRow> for AuditoriaConUsuario {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(AuditoriaConUsuario {
            auditoria: AuditoriaModel::try_from_row(row)?,
            usuario_nombre: row.try_get("usuario_nombre")?,
        })
    }
}
