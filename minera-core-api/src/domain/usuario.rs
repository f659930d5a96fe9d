use serde::{Deserialize, Serialize};

/// A user-directory entry, as needed for actor resolution and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usuario {
    pub id_usuario: i32,
    pub nombre_usuario: String,
    pub nombre_completo: Option<String>,
}

/// Claims of the authenticated caller, passed explicitly into the audit
/// logger.
///
/// Either claim may be absent: `id` is preferred when numeric, `sub` is the
/// username to resolve through the user directory. An empty context
/// attributes the action to user `0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub sub: Option<String>,
}

impl Claims {
    pub fn de_id(id: i32) -> Self {
        Self {
            id: Some(id),
            sub: None,
        }
    }

    pub fn de_sub(sub: impl Into<String>) -> Self {
        Self {
            id: None,
            sub: Some(sub.into()),
        }
    }
}
