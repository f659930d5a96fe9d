use minera_core_db::models::usuario::UsuarioModel;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

use crate::executor::Executor;
use crate::utils::TryFromRow;

pub struct UsuarioRepositoryImpl {
    pub(crate) executor: Executor,
}

impl UsuarioRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for UsuarioModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(UsuarioModel {
            id_usuario: row.try_get("id_usuario")?,
            nombre_usuario: row.try_get("nombre_usuario")?,
            nombre_completo: row.try_get("nombre_completo")?,
        })
    }
}
