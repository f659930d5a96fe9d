use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{ApiError, ApiResult};

/// Action tag written by the audit logger after a creation.
pub const ACCION_CREATE: &str = "CREATE";
/// Action tag written by the audit logger after an update.
pub const ACCION_UPDATE: &str = "UPDATE";
/// Action tag written by the audit logger after a deletion.
pub const ACCION_DELETE: &str = "DELETE";

/// Column limits of the `auditoria` table, in characters.
///
/// Values longer than the limit are truncated on the write path, never
/// rejected.
pub const ACCION_MAX: usize = 50;
pub const ENTIDAD_MAX: usize = 100;
pub const DESCRIPCION_MAX: usize = 5000;

/// Truncates `valor` to at most `max` characters, keeping the prefix.
///
/// Counts characters rather than bytes: the underlying columns are
/// NVARCHAR-style character columns.
pub fn truncar(valor: &str, max: usize) -> String {
    valor.chars().take(max).collect()
}

/// A persisted audit record, enriched with the actor's display name.
///
/// `usuario_nombre` comes from an outer join against the user directory and
/// is `None` when `aud_usuario` matches no known user; the record itself is
/// still returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Auditoria {
    pub id_auditoria: i32,
    pub accion: String,
    pub entidad: String,
    pub descripcion: String,
    pub aud_fecha: DateTime<Utc>,
    pub aud_usuario: i32,
    pub usuario_nombre: Option<String>,
}

/// Candidate audit record, as accepted by the write service.
///
/// The `Validate` constraints belong to the administrative create/update
/// endpoints (400-equivalent on violation). The audit logger never
/// validates: it truncates to the column limits instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NuevaAuditoria {
    #[validate(length(min = 1, max = 50))]
    pub accion: String,
    #[validate(length(min = 1, max = 100))]
    pub entidad: String,
    #[validate(length(max = 5000))]
    pub descripcion: String,
    pub aud_fecha: DateTime<Utc>,
    pub aud_usuario: i32,
}

impl NuevaAuditoria {
    /// Returns a copy with every text field truncated to its column limit.
    pub fn truncada(self) -> Self {
        Self {
            accion: truncar(&self.accion, ACCION_MAX),
            entidad: truncar(&self.entidad, ENTIDAD_MAX),
            descripcion: truncar(&self.descripcion, DESCRIPCION_MAX),
            aud_fecha: self.aud_fecha,
            aud_usuario: self.aud_usuario,
        }
    }

    /// Boundary validation for the administrative CRUD endpoints.
    pub fn validar(&self) -> ApiResult<()> {
        self.validate()
            .map_err(|e| ApiError::ValidationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn truncar_keeps_short_values_intact() {
        assert_eq!(truncar("CREATE", ACCION_MAX), "CREATE");
        assert_eq!(truncar("", ACCION_MAX), "");
    }

    #[test]
    fn truncar_cuts_to_exactly_the_limit() {
        let largo = "x".repeat(120);
        let truncado = truncar(&largo, ACCION_MAX);
        assert_eq!(truncado.chars().count(), ACCION_MAX);
        assert!(largo.starts_with(&truncado));
    }

    #[test]
    fn truncar_counts_characters_not_bytes() {
        let acentuado = "á".repeat(60);
        let truncado = truncar(&acentuado, ACCION_MAX);
        assert_eq!(truncado.chars().count(), ACCION_MAX);
    }

    #[test]
    fn truncada_applies_every_column_limit() {
        let nueva = NuevaAuditoria {
            accion: "A".repeat(80),
            entidad: "E".repeat(150),
            descripcion: "D".repeat(6000),
            aud_fecha: Utc::now(),
            aud_usuario: 1,
        }
        .truncada();

        assert_eq!(nueva.accion.chars().count(), ACCION_MAX);
        assert_eq!(nueva.entidad.chars().count(), ENTIDAD_MAX);
        assert_eq!(nueva.descripcion.chars().count(), DESCRIPCION_MAX);
    }

    #[test]
    fn validar_rejects_empty_accion() {
        let nueva = NuevaAuditoria {
            accion: String::new(),
            entidad: "PropiedadMinera".into(),
            descripcion: String::new(),
            aud_fecha: Utc::now(),
            aud_usuario: 0,
        };
        assert!(matches!(
            nueva.validar(),
            Err(ApiError::ValidationError(_))
        ));
    }
}
