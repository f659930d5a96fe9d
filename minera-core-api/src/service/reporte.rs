use std::io::BufWriter;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocumentReference, PdfLayerReference};

use crate::domain::auditoria::Auditoria;
use crate::domain::descripcion::{aplanar, Descripcion};
use crate::domain::filtros::FiltrosExportacion;
use crate::error::{ApiError, ApiResult};

/// Header values the HTTP layer attaches to the export response.
pub const DISPOSICION_CONTENIDO: &str = "attachment; filename=\"auditorias.pdf\"";
pub const TIPO_CONTENIDO: &str = "application/pdf";

const TITULO: &str = "Reporte de Auditorías";

// A4, manual cursor layout. Page styling is not a contract; only the row
// content and the summary line are.
const ANCHO_PAGINA: f32 = 210.0;
const ALTO_PAGINA: f32 = 297.0;
const MARGEN_IZQUIERDO: f32 = 10.0;
const MARGEN_INFERIOR: f32 = 15.0;
const Y_INICIAL: f32 = 282.0;
const ALTO_LINEA: f32 = 4.0;

// Column start positions (mm) and text widths (characters).
const COLUMNAS: [(&str, f32, usize); 6] = [
    ("ID", 10.0, 6),
    ("Fecha", 22.0, 19),
    ("Acción", 56.0, 13),
    ("Entidad", 81.0, 17),
    ("Usuario", 113.0, 15),
    ("Detalle", 141.0, 38),
];

/// Detail-column lines for one record.
///
/// A structured description is flattened into `label: value` lines; raw
/// text is rendered verbatim; an empty column gets a placeholder.
pub fn detalle_texto(descripcion: &str) -> Vec<String> {
    if descripcion.is_empty() {
        return vec!["Sin detalle disponible".to_string()];
    }
    match Descripcion::parse(descripcion) {
        Descripcion::Estructurada(valor) => aplanar(&valor, "")
            .into_iter()
            .map(|(etiqueta, valor)| format!("{etiqueta}: {valor}"))
            .collect(),
        Descripcion::Texto(texto) => vec![texto],
    }
}

/// Human-readable summary line: total row count plus the active criteria.
pub fn resumen_filtros(filtros: &FiltrosExportacion, total: usize) -> String {
    let mut resumen = format!("Total de registros: {total}");
    if !filtros.hay_filtros() {
        return resumen;
    }

    let mut partes = Vec::new();
    if let Some(usuario) = filtros.usuario_normalizado() {
        partes.push(format!("Usuario: {usuario}"));
    }
    let entidades = filtros.entidades_normalizadas();
    if !entidades.is_empty() {
        partes.push(format!("Entidades: {}", entidades.join(", ")));
    }
    let acciones = filtros.acciones_normalizadas();
    if !acciones.is_empty() {
        partes.push(format!("Acciones: {}", acciones.join(", ")));
    }
    if let Some(id_transaccion) = filtros.id_transaccion_normalizado() {
        partes.push(format!("ID Transacción: {id_transaccion}"));
    }
    if let Some(desde) = filtros.fecha_desde {
        partes.push(format!("Desde: {}", desde.format("%d/%m/%Y")));
    }
    if let Some(hasta) = filtros.fecha_hasta {
        partes.push(format!("Hasta: {}", hasta.format("%d/%m/%Y")));
    }

    resumen.push_str(" | Filtros: ");
    resumen.push_str(&partes.join(" - "));
    resumen
}

/// Actor column label: display name, else the numeric id, else blank for
/// the unresolved actor `0`.
fn etiqueta_usuario(item: &Auditoria) -> String {
    match (&item.usuario_nombre, item.aud_usuario) {
        (Some(nombre), _) => nombre.clone(),
        (None, 0) => String::new(),
        (None, id) => id.to_string(),
    }
}

/// Greedy word wrap at `ancho` characters; overlong words are split.
fn envolver(texto: &str, ancho: usize) -> Vec<String> {
    let mut lineas = Vec::new();
    let mut actual = String::new();
    for palabra in texto.split_whitespace() {
        let mut palabra = palabra;
        while palabra.chars().count() > ancho {
            let corte: String = palabra.chars().take(ancho).collect();
            palabra = &palabra[corte.len()..];
            if !actual.is_empty() {
                lineas.push(std::mem::take(&mut actual));
            }
            lineas.push(corte);
        }
        let requerido = actual.chars().count()
            + if actual.is_empty() { 0 } else { 1 }
            + palabra.chars().count();
        if requerido > ancho && !actual.is_empty() {
            lineas.push(std::mem::take(&mut actual));
        }
        if !actual.is_empty() {
            actual.push(' ');
        }
        actual.push_str(palabra);
    }
    if !actual.is_empty() {
        lineas.push(actual);
    }
    if lineas.is_empty() {
        lineas.push(String::new());
    }
    lineas
}

fn recortar(texto: &str, ancho: usize) -> String {
    texto.chars().take(ancho).collect()
}

fn mm(valor: f32) -> Mm {
    Mm(valor as _)
}

struct EscritorPdf {
    doc: PdfDocumentReference,
    capa: PdfLayerReference,
    fuente: IndirectFontRef,
    negrita: IndirectFontRef,
    y: f32,
}

impl EscritorPdf {
    fn nueva_pagina(&mut self) {
        let (pagina, capa) = self.doc.add_page(mm(ANCHO_PAGINA), mm(ALTO_PAGINA), "Capa");
        self.capa = self.doc.get_page(pagina).get_layer(capa);
        self.y = Y_INICIAL;
        self.encabezado_tabla();
    }

    fn asegurar_espacio(&mut self, alto: f32) {
        if self.y - alto < MARGEN_INFERIOR {
            self.nueva_pagina();
        }
    }

    fn encabezado_tabla(&mut self) {
        for (titulo, x, _) in COLUMNAS {
            self.capa
                .use_text(titulo, 8.0, mm(x), mm(self.y), &self.negrita);
        }
        self.y -= ALTO_LINEA + 1.0;
    }

    fn fila(&mut self, item: &Auditoria) {
        let detalle = detalle_texto(&item.descripcion)
            .iter()
            .flat_map(|linea| envolver(linea, COLUMNAS[5].2))
            .collect::<Vec<_>>();
        let alto = detalle.len() as f32 * ALTO_LINEA + 1.0;
        self.asegurar_espacio(alto);

        let celdas = [
            item.id_auditoria.to_string(),
            item.aud_fecha.format("%d/%m/%Y %H:%M:%S").to_string(),
            item.accion.clone(),
            item.entidad.clone(),
            etiqueta_usuario(item),
        ];
        for ((_, x, ancho), celda) in COLUMNAS.iter().zip(celdas.iter()) {
            self.capa
                .use_text(recortar(celda, *ancho), 8.0, mm(*x), mm(self.y), &self.fuente);
        }
        let x_detalle = COLUMNAS[5].1;
        let mut y_linea = self.y;
        for linea in &detalle {
            self.capa
                .use_text(linea.as_str(), 8.0, mm(x_detalle), mm(y_linea), &self.fuente);
            y_linea -= ALTO_LINEA;
        }
        self.y -= alto;
    }
}

/// Renders the filtered record set as a tabular PDF and returns the bytes.
pub fn generar_pdf(items: &[Auditoria], filtros: &FiltrosExportacion) -> ApiResult<Vec<u8>> {
    let (doc, pagina, capa) =
        printpdf::PdfDocument::new(TITULO, mm(ANCHO_PAGINA), mm(ALTO_PAGINA), "Capa");
    let fuente = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ApiError::InternalError(format!("No se pudo preparar el PDF: {e}")))?;
    let negrita = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ApiError::InternalError(format!("No se pudo preparar el PDF: {e}")))?;

    let capa = doc.get_page(pagina).get_layer(capa);
    let mut escritor = EscritorPdf {
        doc,
        capa,
        fuente,
        negrita,
        y: Y_INICIAL,
    };

    escritor.capa.use_text(
        TITULO,
        14.0,
        mm(MARGEN_IZQUIERDO),
        mm(escritor.y),
        &escritor.negrita,
    );
    escritor.y -= 2.0 * ALTO_LINEA;

    for linea in envolver(&resumen_filtros(filtros, items.len()), 110) {
        escritor.capa.use_text(
            linea.as_str(),
            9.0,
            mm(MARGEN_IZQUIERDO),
            mm(escritor.y),
            &escritor.fuente,
        );
        escritor.y -= ALTO_LINEA;
    }
    escritor.y -= ALTO_LINEA;
    escritor.encabezado_tabla();

    for item in items {
        escritor.fila(item);
    }

    let mut buffer = BufWriter::new(Vec::new());
    escritor
        .doc
        .save(&mut buffer)
        .map_err(|e| ApiError::InternalError(format!("No se pudo generar el PDF: {e}")))?;
    buffer
        .into_inner()
        .map_err(|e| ApiError::InternalError(format!("No se pudo generar el PDF: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn auditoria(id: i32, descripcion: String) -> Auditoria {
        Auditoria {
            id_auditoria: id,
            accion: "CREATE".into(),
            entidad: "PropiedadMinera".into(),
            descripcion,
            aud_fecha: Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap(),
            aud_usuario: 7,
            usuario_nombre: Some("Ana Gómez".into()),
        }
    }

    #[test]
    fn detalle_estructurado_se_aplana_en_lineas() {
        let descripcion = json!({"id": 3, "data": {"Nombre": "Mina Sur"}}).to_string();
        let lineas = detalle_texto(&descripcion);
        assert!(lineas.contains(&"id: 3".to_string()));
        assert!(lineas.contains(&"data.Nombre: Mina Sur".to_string()));
    }

    #[test]
    fn detalle_texto_plano_va_verbatim() {
        assert_eq!(detalle_texto("no es json"), vec!["no es json".to_string()]);
        assert_eq!(
            detalle_texto(""),
            vec!["Sin detalle disponible".to_string()]
        );
    }

    #[test]
    fn resumen_sin_filtros_solo_el_total() {
        let resumen = resumen_filtros(&FiltrosExportacion::default(), 3);
        assert_eq!(resumen, "Total de registros: 3");
    }

    #[test]
    fn resumen_lista_los_filtros_activos() {
        let filtros = FiltrosExportacion {
            usuario: Some("Ana".into()),
            entidad: vec!["PropiedadMinera".into()],
            fecha_desde: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        let resumen = resumen_filtros(&filtros, 1);
        assert_eq!(
            resumen,
            "Total de registros: 1 | Filtros: Usuario: ana - \
             Entidades: propiedadminera - Desde: 01/01/2024"
        );
    }

    #[test]
    fn envolver_respeta_el_ancho() {
        let lineas = envolver("uno dos tres cuatro cinco", 9);
        assert!(lineas.iter().all(|linea| linea.chars().count() <= 9));
        assert_eq!(lineas.join(" "), "uno dos tres cuatro cinco");
    }

    #[test]
    fn envolver_parte_palabras_demasiado_largas() {
        let lineas = envolver(&"x".repeat(25), 10);
        assert_eq!(lineas.len(), 3);
    }

    #[test]
    fn genera_un_pdf_no_vacio() {
        let items = vec![
            auditoria(1, json!({"id": 1, "data": {"Nombre": "Mina Sur"}}).to_string()),
            auditoria(2, "texto crudo".into()),
        ];
        let bytes = generar_pdf(&items, &FiltrosExportacion::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn pagina_cuando_hay_muchas_filas() {
        let items: Vec<Auditoria> = (0..200)
            .map(|i| auditoria(i, json!({"id": i}).to_string()))
            .collect();
        let bytes = generar_pdf(&items, &FiltrosExportacion::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn etiqueta_usuario_cae_al_id_y_luego_a_vacio() {
        let mut item = auditoria(1, String::new());
        item.usuario_nombre = None;
        assert_eq!(etiqueta_usuario(&item), "7");
        item.aud_usuario = 0;
        assert_eq!(etiqueta_usuario(&item), "");
    }
}
