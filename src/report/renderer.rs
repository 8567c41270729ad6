//! PDF rendering of the full numerology report.

use std::io::{BufWriter, Write};

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use tempfile::NamedTempFile;
use thiserror::Error;

use super::ReportData;
use crate::content;

/// Errors that can occur while producing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to lay out the report: {0}")]
    Render(String),

    #[error("Failed to write the report file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report generation timed out")]
    Timeout,

    #[error("Report generation was interrupted: {0}")]
    Interrupted(String),
}

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;

const TITLE_SIZE: f32 = 22.0;
const HEADING_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 11.0;
const LINE_HEIGHT_MM: f32 = 6.0;

/// Characters per wrapped body line at the body font size.
const WRAP_COLUMNS: usize = 88;

/// One-shot renderer for report PDFs.
///
/// Stateless and cheap to clone; `render` is blocking and is expected to
/// run on a blocking-friendly executor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportRenderer;

impl ReportRenderer {
    /// Creates a renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Renders the report to a scratch file.
    ///
    /// The returned [`NamedTempFile`] deletes itself on drop, which is the
    /// cleanup guarantee for every exit path of the delivery sequence.
    pub fn render(&self, data: &ReportData) -> Result<NamedTempFile, ReportError> {
        let (doc, page, layer) = PdfDocument::new(
            "Informe Numerológico",
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "contenido",
        );

        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Render(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Render(e.to_string()))?;

        let layer = doc.get_page(page).get_layer(layer);
        let mut cursor = Cursor::top_of_page(&layer);

        cursor.line(&bold, TITLE_SIZE, "Informe Numerológico");
        cursor.skip(1.0);
        cursor.line(&regular, BODY_SIZE, &format!("Nombre: {}", data.name));
        cursor.line(
            &regular,
            BODY_SIZE,
            &format!("Fecha de nacimiento: {}", data.birth_date),
        );
        cursor.skip(1.0);

        cursor.section(
            &bold,
            &regular,
            &format!("Número mágico: {}", data.life_path),
            content::life_path_meaning(data.life_path),
        );
        cursor.section(
            &bold,
            &regular,
            &format!("Número de expresión: {}", data.expression),
            content::life_path_meaning(data.expression),
        );
        cursor.section(
            &bold,
            &regular,
            &format!("Signo del zodiaco: {}", data.zodiac),
            content::zodiac_blurb(data.zodiac),
        );
        cursor.section(
            &bold,
            &regular,
            &format!("Horóscopo chino: {}", data.chinese),
            content::chinese_blurb(data.chinese),
        );

        let mut file = tempfile::Builder::new()
            .prefix("numerologia-")
            .suffix(".pdf")
            .tempfile()?;

        {
            let mut writer = BufWriter::new(file.as_file_mut());
            doc.save(&mut writer)
                .map_err(|e| ReportError::Render(e.to_string()))?;
            writer.flush()?;
        }

        Ok(file)
    }
}

/// Writing position on the single report page.
struct Cursor<'a> {
    layer: &'a PdfLayerReference,
    y: f32,
}

impl<'a> Cursor<'a> {
    fn top_of_page(layer: &'a PdfLayerReference) -> Self {
        Self {
            layer,
            y: PAGE_HEIGHT_MM - MARGIN_MM,
        }
    }

    /// Writes one line and moves down.
    fn line(&mut self, font: &IndirectFontRef, size: f32, text: &str) {
        self.layer
            .use_text(text, size, Mm(MARGIN_MM), Mm(self.y), font);
        self.y -= LINE_HEIGHT_MM * (size / BODY_SIZE);
    }

    /// Leaves vertical space of `lines` body lines.
    fn skip(&mut self, lines: f32) {
        self.y -= LINE_HEIGHT_MM * lines;
    }

    /// Writes a bold heading followed by word-wrapped body text.
    fn section(
        &mut self,
        heading_font: &IndirectFontRef,
        body_font: &IndirectFontRef,
        heading: &str,
        body: &str,
    ) {
        self.line(heading_font, HEADING_SIZE, heading);
        for wrapped in wrap(body, WRAP_COLUMNS) {
            self.line(body_font, BODY_SIZE, &wrapped);
        }
        self.skip(1.0);
    }
}

/// Greedy word wrap by character count.
fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > columns {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
