use serde_json::Value;

/// Key-name fragment the transaction-id filter looks for, lowercase.
const CLAVE_ID_TRANSACCION: &str = "idtransaccion";

/// The persisted `descripcion` column, parsed on read.
///
/// The store treats the column as opaque text; most rows hold a JSON
/// document but plain text is valid (it is the serialization fallback).
#[derive(Debug, Clone, PartialEq)]
pub enum Descripcion {
    Texto(String),
    Estructurada(Value),
}

impl Descripcion {
    /// Parses a raw column value. Anything that is not valid JSON is kept
    /// as raw text.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(valor) => Descripcion::Estructurada(valor),
            Err(_) => Descripcion::Texto(raw.to_string()),
        }
    }
}

/// A description payload on its way into the log.
///
/// Strings pass through untouched; everything else is serialized to JSON
/// with a string-form fallback, so building a description can never fail.
#[derive(Debug, Clone)]
pub enum ValorDescripcion {
    Texto(String),
    Dato(Value),
}

impl From<&str> for ValorDescripcion {
    fn from(valor: &str) -> Self {
        ValorDescripcion::Texto(valor.to_string())
    }
}

impl From<String> for ValorDescripcion {
    fn from(valor: String) -> Self {
        ValorDescripcion::Texto(valor)
    }
}

impl From<Value> for ValorDescripcion {
    fn from(valor: Value) -> Self {
        match valor {
            Value::String(texto) => ValorDescripcion::Texto(texto),
            otro => ValorDescripcion::Dato(otro),
        }
    }
}

/// Serializes a description payload. Total: text is returned as-is and a
/// structured value that cannot be encoded falls back to its display form.
pub fn serializar_descripcion(valor: &ValorDescripcion) -> String {
    match valor {
        ValorDescripcion::Texto(texto) => texto.clone(),
        ValorDescripcion::Dato(dato) => {
            serde_json::to_string(dato).unwrap_or_else(|_| dato.to_string())
        }
    }
}

/// String form of a scalar leaf: strings unquoted, everything else as its
/// JSON rendering.
pub fn forma_texto(valor: &Value) -> String {
    match valor {
        Value::String(texto) => texto.clone(),
        otro => otro.to_string(),
    }
}

/// Flattens a structured description into ordered `(label, value)` pairs
/// for display.
///
/// Null and the empty sequence collapse to a single `Detalle` entry
/// regardless of the accumulated prefix, matching the list rendering the
/// report clients expect.
pub fn aplanar(valor: &Value, prefijo: &str) -> Vec<(String, String)> {
    match valor {
        Value::Null => vec![("Detalle".to_string(), "Sin datos".to_string())],
        Value::Array(items) if items.is_empty() => {
            vec![("Detalle".to_string(), "[]".to_string())]
        }
        Value::Array(items) => items
            .iter()
            .enumerate()
            .flat_map(|(indice, item)| {
                let nuevo = if prefijo.is_empty() {
                    format!("[{indice}]")
                } else {
                    format!("{prefijo}[{indice}]")
                };
                aplanar(item, &nuevo)
            })
            .collect(),
        Value::Object(mapa) => mapa
            .iter()
            .flat_map(|(clave, item)| {
                let nuevo = if prefijo.is_empty() {
                    clave.clone()
                } else {
                    format!("{prefijo}.{clave}")
                };
                aplanar(item, &nuevo)
            })
            .collect(),
        escalar => {
            let etiqueta = if prefijo.is_empty() {
                "Detalle".to_string()
            } else {
                prefijo.to_string()
            };
            vec![(etiqueta, forma_texto(escalar))]
        }
    }
}

/// Recursive walk looking for any mapping key containing `idtransaccion`
/// (case-insensitive) whose value's string form contains `filtro`.
///
/// `filtro` must already be lowercase.
pub fn contiene_id_transaccion(valor: &Value, filtro: &str) -> bool {
    match valor {
        Value::Object(mapa) => mapa.iter().any(|(clave, item)| {
            (clave.to_lowercase().contains(CLAVE_ID_TRANSACCION)
                && forma_texto(item).to_lowercase().contains(filtro))
                || contiene_id_transaccion(item, filtro)
        }),
        Value::Array(items) => items
            .iter()
            .any(|item| contiene_id_transaccion(item, filtro)),
        _ => false,
    }
}
