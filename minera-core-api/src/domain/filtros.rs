use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::auditoria::Auditoria;
use crate::domain::descripcion::{contiene_id_transaccion, Descripcion};

/// Filter specification accepted by the export endpoint.
///
/// Field names on the wire keep the frontend contract (`idTransaccion`,
/// `fechaDesde`, `fechaHasta`). Every criterion is optional; an absent or
/// empty criterion matches everything, supplied criteria combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FiltrosExportacion {
    #[serde(default)]
    pub usuario: Option<String>,
    #[serde(default)]
    pub entidad: Vec<String>,
    #[serde(default)]
    pub accion: Vec<String>,
    #[serde(default, rename = "idTransaccion")]
    pub id_transaccion: Option<String>,
    #[serde(default, rename = "fechaDesde")]
    pub fecha_desde: Option<DateTime<Utc>>,
    #[serde(default, rename = "fechaHasta")]
    pub fecha_hasta: Option<DateTime<Utc>>,
}

impl FiltrosExportacion {
    /// Trimmed, lowercased actor criterion; `None` when blank.
    pub fn usuario_normalizado(&self) -> Option<String> {
        normalizar(self.usuario.as_deref())
    }

    /// Lowercased entity membership set; empty means no filter.
    pub fn entidades_normalizadas(&self) -> Vec<String> {
        self.entidad.iter().map(|e| e.to_lowercase()).collect()
    }

    /// Lowercased action membership set; empty means no filter.
    pub fn acciones_normalizadas(&self) -> Vec<String> {
        self.accion.iter().map(|a| a.to_lowercase()).collect()
    }

    /// Trimmed, lowercased transaction-id criterion; `None` when blank.
    pub fn id_transaccion_normalizado(&self) -> Option<String> {
        normalizar(self.id_transaccion.as_deref())
    }

    /// True when at least one criterion is active.
    pub fn hay_filtros(&self) -> bool {
        self.usuario_normalizado().is_some()
            || !self.entidad.is_empty()
            || !self.accion.is_empty()
            || self.id_transaccion_normalizado().is_some()
            || self.fecha_desde.is_some()
            || self.fecha_hasta.is_some()
    }

    /// Applies every supplied criterion to `item`.
    pub fn coincide(&self, item: &Auditoria) -> bool {
        if let Some(filtro) = self.usuario_normalizado() {
            let nombre = item
                .usuario_nombre
                .as_deref()
                .unwrap_or_default()
                .to_lowercase();
            let id = item.aud_usuario.to_string();
            if !nombre.contains(&filtro) && !id.contains(&filtro) {
                return false;
            }
        }

        let entidades = self.entidades_normalizadas();
        if !entidades.is_empty() && !entidades.contains(&item.entidad.to_lowercase()) {
            return false;
        }

        let acciones = self.acciones_normalizadas();
        if !acciones.is_empty() && !acciones.contains(&item.accion.to_lowercase()) {
            return false;
        }

        if let Some(filtro) = self.id_transaccion_normalizado() {
            if !coincide_id_transaccion(&item.descripcion, &filtro) {
                return false;
            }
        }

        coincide_rango_fechas(Some(item.aud_fecha), self.fecha_desde, self.fecha_hasta)
    }

    /// Filters a candidate set, keeping input order.
    pub fn aplicar(&self, items: Vec<Auditoria>) -> Vec<Auditoria> {
        items.into_iter().filter(|item| self.coincide(item)).collect()
    }
}

fn normalizar(valor: Option<&str>) -> Option<String> {
    let limpio = valor.unwrap_or_default().trim().to_lowercase();
    if limpio.is_empty() {
        None
    } else {
        Some(limpio)
    }
}

/// Transaction-id search over a raw description column.
///
/// A description that parses as structured data gets the recursive
/// key-aware walk; one that does not falls back to a plain substring
/// search. The asymmetry is deliberate and matches the observed behavior
/// of the export endpoint.
pub fn coincide_id_transaccion(descripcion: &str, filtro: &str) -> bool {
    if filtro.is_empty() {
        return true;
    }
    if descripcion.is_empty() {
        return false;
    }
    match Descripcion::parse(descripcion) {
        Descripcion::Estructurada(valor) => contiene_id_transaccion(&valor, filtro),
        Descripcion::Texto(texto) => texto.to_lowercase().contains(filtro),
    }
}

/// Inclusive date-range check. A record with no resolvable timestamp fails
/// as soon as either bound is supplied.
pub fn coincide_rango_fechas(
    fecha: Option<DateTime<Utc>>,
    desde: Option<DateTime<Utc>>,
    hasta: Option<DateTime<Utc>>,
) -> bool {
    if desde.is_none() && hasta.is_none() {
        return true;
    }
    let Some(fecha) = fecha else {
        return false;
    };
    if let Some(desde) = desde {
        if fecha < desde {
            return false;
        }
    }
    if let Some(hasta) = hasta {
        if fecha > hasta {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn auditoria(descripcion: &str) -> Auditoria {
        Auditoria {
            id_auditoria: 1,
            accion: "CREATE".into(),
            entidad: "PropiedadMinera".into(),
            descripcion: descripcion.into(),
            aud_fecha: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
            aud_usuario: 7,
            usuario_nombre: Some("Ana Gómez".into()),
        }
    }

    #[test]
    fn sin_filtros_todo_coincide() {
        let filtros = FiltrosExportacion::default();
        assert!(filtros.coincide(&auditoria("{}")));
        assert!(!filtros.hay_filtros());
    }

    #[test]
    fn usuario_matches_name_or_id() {
        let mut filtros = FiltrosExportacion {
            usuario: Some("gómez".into()),
            ..Default::default()
        };
        assert!(filtros.coincide(&auditoria("{}")));

        filtros.usuario = Some("7".into());
        assert!(filtros.coincide(&auditoria("{}")));

        filtros.usuario = Some("pérez".into());
        assert!(!filtros.coincide(&auditoria("{}")));
    }

    #[test]
    fn usuario_blank_is_no_filter() {
        let filtros = FiltrosExportacion {
            usuario: Some("   ".into()),
            ..Default::default()
        };
        assert!(!filtros.hay_filtros());
        assert!(filtros.coincide(&auditoria("{}")));
    }

    #[test]
    fn entidad_y_accion_son_membresia_exacta() {
        let filtros = FiltrosExportacion {
            entidad: vec!["propiedadminera".into()],
            accion: vec!["create".into(), "update".into()],
            ..Default::default()
        };
        assert!(filtros.coincide(&auditoria("{}")));

        let otros = FiltrosExportacion {
            entidad: vec!["Expediente".into()],
            ..Default::default()
        };
        assert!(!otros.coincide(&auditoria("{}")));
    }

    #[test]
    fn id_transaccion_estructurado() {
        let descripcion = json!({"datos": {"idTransaccion": "T123"}}).to_string();
        assert!(coincide_id_transaccion(&descripcion, "t123"));

        let otra = json!({"datos": {"idTransaccion": "T999"}}).to_string();
        assert!(!coincide_id_transaccion(&otra, "t123"));
    }

    #[test]
    fn id_transaccion_texto_plano_usa_substring() {
        assert!(coincide_id_transaccion("pago con idTransaccion T123", "t123"));
        assert!(!coincide_id_transaccion("sin referencia", "t123"));
    }

    #[test]
    fn rango_de_fechas_es_inclusivo() {
        let desde = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let hasta = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap();
        let dentro = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let fuera = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();

        assert!(coincide_rango_fechas(Some(dentro), Some(desde), Some(hasta)));
        assert!(!coincide_rango_fechas(Some(fuera), Some(desde), Some(hasta)));
        assert!(coincide_rango_fechas(Some(desde), Some(desde), Some(hasta)));
    }

    #[test]
    fn sin_fecha_falla_con_cualquier_limite() {
        let limite = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(coincide_rango_fechas(None, None, None));
        assert!(!coincide_rango_fechas(None, Some(limite), None));
        assert!(!coincide_rango_fechas(None, None, Some(limite)));
    }

    #[test]
    fn deserializa_los_nombres_del_frontend() {
        let filtros: FiltrosExportacion = serde_json::from_str(
            r#"{"usuario": "ana", "entidad": ["PropiedadMinera"], "accion": [],
                "idTransaccion": "T1", "fechaDesde": "2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(filtros.usuario.as_deref(), Some("ana"));
        assert_eq!(filtros.id_transaccion.as_deref(), Some("T1"));
        assert!(filtros.fecha_desde.is_some());
        assert!(filtros.fecha_hasta.is_none());
    }
}
