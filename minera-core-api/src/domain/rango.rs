//! Helpers for the list endpoints' react-admin pagination convention:
//! a `range=[start,end]` query parameter answered with a
//! `Content-Range: <resource> <start>-<end>/<total>` header.

/// Parses a raw `range` parameter.
///
/// A missing or malformed value falls back to the full `[0, total-1]`
/// window instead of failing the request.
pub fn parsear_rango(raw: Option<&str>, total: usize) -> (usize, usize) {
    let defecto = (0, total.saturating_sub(1));
    match raw {
        Some(raw) => serde_json::from_str::<(usize, usize)>(raw).unwrap_or(defecto),
        None => defecto,
    }
}

/// Formats the `Content-Range` header value for a paginated listing.
pub fn content_range(recurso: &str, inicio: usize, fin: usize, total: usize) -> String {
    format!("{recurso} {inicio}-{fin}/{total}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsea_un_rango_valido() {
        assert_eq!(parsear_rango(Some("[0,9]"), 50), (0, 9));
        assert_eq!(parsear_rango(Some("[10, 19]"), 50), (10, 19));
    }

    #[test]
    fn rango_invalido_cae_al_defecto() {
        assert_eq!(parsear_rango(Some("no-json"), 50), (0, 49));
        assert_eq!(parsear_rango(Some("[1]"), 50), (0, 49));
        assert_eq!(parsear_rango(None, 0), (0, 0));
    }

    #[test]
    fn formatea_content_range() {
        assert_eq!(content_range("auditorias", 0, 9, 50), "auditorias 0-9/50");
    }
}
