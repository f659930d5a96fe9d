use minera_core_api::domain::usuario::Usuario;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::identifiable::Identifiable;

/// Row of the `usuario` table, reduced to what actor resolution and the
/// left-join enrichment need.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UsuarioModel {
    pub id_usuario: i32,
    pub nombre_usuario: String,
    pub nombre_completo: Option<String>,
}

impl Identifiable for UsuarioModel {
    fn get_id(&self) -> i32 {
        self.id_usuario
    }
}

impl From<UsuarioModel> for Usuario {
    fn from(usuario: UsuarioModel) -> Self {
        Usuario {
            id_usuario: usuario.id_usuario,
            nombre_usuario: usuario.nombre_usuario,
            nombre_completo: usuario.nombre_completo,
        }
    }
}
