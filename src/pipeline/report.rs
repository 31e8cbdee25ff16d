//! PDF health report generation via `printpdf`.
//!
//! Layout: title, patient information (one line per field), the analysis
//! narrative split into paragraphs on blank lines, and a small grey
//! disclaimer. US Letter with one-inch margins; text that runs past the
//! bottom margin continues on a new page.

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::*;

use crate::models::PatientMetadata;
use crate::upload::sanitize_filename;

pub const REPORT_TITLE: &str = "BloodSense Health Report";

pub const DISCLAIMER: &str = "Disclaimer: This report is generated based on the provided blood test results and \
personal information. It should not be considered as a substitute for professional medical advice. Please \
consult with your healthcare provider before making any changes to your diet, exercise, or medication routine.";

const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;
const MARGIN_MM: f32 = 25.4;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("PDF font error: {0}")]
    Font(String),

    #[error("PDF save error: {0}")]
    Save(String),

    #[error("Cannot write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders a patient report to disk and returns where it was written.
pub trait ReportRenderer: Send + Sync {
    fn render(&self, patient: &PatientMetadata, analysis: &str) -> Result<PathBuf, RenderError>;
}

/// `printpdf` renderer writing `report_<name>.pdf` files into one directory.
#[derive(Debug, Clone)]
pub struct PdfReportRenderer {
    output_dir: PathBuf,
}

impl PdfReportRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

impl ReportRenderer for PdfReportRenderer {
    fn render(&self, patient: &PatientMetadata, analysis: &str) -> Result<PathBuf, RenderError> {
        std::fs::create_dir_all(&self.output_dir)?;
        let output_path = report_path_for(&self.output_dir, &patient.name);

        let bytes = generate_report_pdf(patient, analysis)?;
        std::fs::write(&output_path, bytes)?;

        tracing::info!(path = %output_path.display(), "PDF report generated");
        Ok(output_path)
    }
}

/// Deterministic report location: spaces become `_`, then anything that
/// could escape the directory is sanitized away.
pub fn report_path_for(output_dir: &Path, patient_name: &str) -> PathBuf {
    let name = sanitize_filename(&patient_name.replace(' ', "_"));
    output_dir.join(format!("report_{name}.pdf"))
}

/// Split narrative text into non-blank paragraphs on blank lines.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Builds the report PDF. Returns PDF bytes.
pub fn generate_report_pdf(patient: &PatientMetadata, analysis: &str) -> Result<Vec<u8>, RenderError> {
    let (doc, page1, layer1) = PdfDocument::new(
        REPORT_TITLE,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Font(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Font(e.to_string()))?;

    let mut page = PageCursor::new(&doc, page1, layer1);

    // Title
    page.text(REPORT_TITLE, 18.0, &bold, 9.0);
    page.space(8.0);

    // Patient information
    page.text("Patient Information", 14.0, &bold, 7.0);
    page.space(3.0);
    for (label, value) in patient.report_lines() {
        for line in wrap_text(&format!("{label}: {value}"), 90) {
            page.text(&line, 10.0, &font, 5.0);
        }
        page.space(2.0);
    }
    page.space(5.0);

    // Analysis
    page.text("Health Analysis & Recommendations", 14.0, &bold, 7.0);
    page.space(3.0);
    for paragraph in split_paragraphs(analysis) {
        for line in wrap_text(paragraph, 85) {
            page.text(&line, 11.0, &font, 5.5);
        }
        page.space(4.0);
    }

    // Disclaimer
    page.space(8.0);
    page.set_grey(0.5);
    for line in wrap_text(DISCLAIMER, 110) {
        page.text(&line, 8.0, &font, 4.0);
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| RenderError::Save(e.to_string()))?;
    buf.into_inner()
        .map_err(|e| RenderError::Save(e.to_string()))
}

/// Writes top-down lines, starting a new page when the bottom margin is hit.
struct PageCursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
    grey: Option<f32>,
}

impl<'a> PageCursor<'a> {
    fn new(doc: &'a PdfDocumentReference, page: PdfPageIndex, layer: PdfLayerIndex) -> Self {
        Self {
            doc,
            layer: doc.get_page(page).get_layer(layer),
            y: PAGE_HEIGHT_MM - MARGIN_MM,
            grey: None,
        }
    }

    fn text(&mut self, text: &str, size: f32, font: &IndirectFontRef, advance: f32) {
        if self.y - advance < MARGIN_MM {
            self.new_page();
        }
        self.layer.use_text(text, size, Mm(MARGIN_MM), Mm(self.y), font);
        self.y -= advance;
    }

    fn space(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn set_grey(&mut self, level: f32) {
        self.grey = Some(level);
        self.apply_fill();
    }

    fn apply_fill(&self) {
        if let Some(level) = self.grey {
            self.layer
                .set_fill_color(Color::Greyscale(Greyscale::new(level, None)));
        }
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT_MM - MARGIN_MM;
        self.apply_fill();
    }
}

/// Simple word-wrap helper for PDF text rendering.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
