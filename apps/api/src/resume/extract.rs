//! Document-to-text adapters.
//!
//! `TextExtractor` is the pluggable seam; `ExtractorRegistry` routes a
//! `RawDocument` to the first extractor that claims its declared media type.
//! Extraction is synchronous and may block on the decode library, so async
//! callers run it through `spawn_blocking`.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use bytes::Bytes;
use docx_rs::{DocumentChild, ParagraphChild, RunChild, TableCellContent, TableChild, TableRowChild};
use tracing::debug;

use crate::errors::EngineError;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// An uploaded document: raw bytes plus the media type the client declared.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Bytes,
    pub media_type: String,
}

impl RawDocument {
    pub fn new(bytes: impl Into<Bytes>, media_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: media_type.into(),
        }
    }
}

/// Format-specific text extraction. Implementations must not retry internally.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, EngineError>;

    fn supported_types(&self) -> &[&str];

    fn supports(&self, media_type: &str) -> bool {
        self.supported_types().contains(&media_type)
    }

    fn name(&self) -> &str;
}

/// PDF text extraction via pdf-extract.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, EngineError> {
        // pdf-extract panics on some malformed object graphs (e.g. a page with no /MediaBox)
        match panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
            Ok(result) => {
                result.map_err(|e| EngineError::extraction_failed(self.name(), e.to_string()))
            }
            Err(payload) => Err(EngineError::extraction_failed(
                self.name(),
                panic_message(payload.as_ref()),
            )),
        }
    }

    fn supported_types(&self) -> &[&str] {
        &[PDF_MEDIA_TYPE]
    }

    fn name(&self) -> &str {
        "pdf-extract"
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("decoder panicked: {detail}")
}

/// DOCX text extraction via docx-rs. Paragraphs and table cells each become a line.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxTextExtractor;

impl DocxTextExtractor {
    fn paragraph_text(p: &docx_rs::Paragraph) -> String {
        let mut text = String::new();
        for child in &p.children {
            match child {
                ParagraphChild::Run(r) => Self::push_run(&mut text, r),
                ParagraphChild::Hyperlink(h) => {
                    for child in &h.children {
                        if let ParagraphChild::Run(r) = child {
                            Self::push_run(&mut text, r);
                        }
                    }
                }
                _ => {}
            }
        }
        text
    }

    fn push_run(text: &mut String, run: &docx_rs::Run) {
        for run_child in &run.children {
            match run_child {
                RunChild::Text(t) => text.push_str(&t.text),
                RunChild::Tab(_) => text.push('\t'),
                RunChild::Break(_) => text.push('\n'),
                _ => {}
            }
        }
    }

    fn table_lines(t: &docx_rs::Table, lines: &mut Vec<String>) {
        for row in &t.rows {
            let TableChild::TableRow(r) = row;
            for cell in &r.cells {
                let TableRowChild::TableCell(c) = cell;
                for content in &c.children {
                    if let TableCellContent::Paragraph(p) = content {
                        lines.push(Self::paragraph_text(p));
                    }
                }
            }
        }
    }
}

impl TextExtractor for DocxTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, EngineError> {
        let docx = docx_rs::read_docx(bytes)
            .map_err(|e| EngineError::extraction_failed(self.name(), e.to_string()))?;

        let mut lines: Vec<String> = Vec::new();
        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(p) => lines.push(Self::paragraph_text(p)),
                DocumentChild::Table(t) => Self::table_lines(t, &mut lines),
                _ => {}
            }
        }

        Ok(lines.join("\n"))
    }

    fn supported_types(&self) -> &[&str] {
        &[DOCX_MEDIA_TYPE]
    }

    fn name(&self) -> &str {
        "docx-rs"
    }
}

/// Media-type router over registered extractors.
#[derive(Clone)]
pub struct ExtractorRegistry {
    extractors: Vec<Arc<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// PDF and DOCX.
    pub fn with_defaults() -> Self {
        Self::new()
            .register(Arc::new(PdfTextExtractor))
            .register(Arc::new(DocxTextExtractor))
    }

    pub fn register(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.extractors.push(extractor);
        self
    }

    pub fn supports(&self, media_type: &str) -> bool {
        self.extractors.iter().any(|e| e.supports(media_type))
    }

    pub fn supported_types(&self) -> Vec<&str> {
        self.extractors
            .iter()
            .flat_map(|e| e.supported_types().iter().copied())
            .collect()
    }

    /// Rejects unknown media types before any decode is attempted.
    pub fn extract(&self, document: &RawDocument) -> Result<String, EngineError> {
        let extractor = self
            .extractors
            .iter()
            .find(|e| e.supports(&document.media_type))
            .ok_or_else(|| EngineError::UnsupportedFormat(document.media_type.clone()))?;

        debug!(
            "Extracting {} bytes of {} with {}",
            document.bytes.len(),
            document.media_type,
            extractor.name()
        );
        extractor.extract_text(&document.bytes)
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Builds a DOCX whose paragraphs are `lines`, in order.
    pub(crate) fn build_docx(lines: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for line in lines {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*line)));
        }
        let mut cursor = Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).unwrap();
        cursor.into_inner()
    }

    /// Assembles a PDF from numbered object bodies (`1 0 obj` is the catalog),
    /// with a correct xref table.
    pub(crate) fn build_pdf(objects: &[String]) -> Vec<u8> {
        let mut out = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }
        let xref = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
        for offset in offsets {
            out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref}\n%%EOF\n",
                objects.len() + 1
            )
            .as_bytes(),
        );
        out
    }

    fn content_stream(content: &str) -> String {
        format!("<< /Length {} >>\nstream\n{content}\nendstream", content.len())
    }

    /// One letter-size page showing `text` in Helvetica.
    pub(crate) fn single_line_pdf(text: &str) -> Vec<u8> {
        build_pdf(&[
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
                .to_string(),
            content_stream(&format!("BT /F1 24 Tf 72 720 Td ({text}) Tj ET")),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        ])
    }

    /// Well-formed container, but the page has neither /MediaBox nor /Resources.
    pub(crate) fn page_without_media_box_pdf() -> Vec<u8> {
        build_pdf(&[
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /Contents 4 0 R >>".to_string(),
            content_stream("BT (Jane Doe) Tj ET"),
        ])
    }

    struct CountingExtractor {
        calls: AtomicUsize,
    }

    impl TextExtractor for CountingExtractor {
        fn extract_text(&self, bytes: &[u8]) -> Result<String, EngineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(String::from_utf8_lossy(bytes).into_owned())
        }

        fn supported_types(&self) -> &[&str] {
            &["text/markdown"]
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[test]
    fn test_default_registry_supports_pdf_and_docx_only() {
        let registry = ExtractorRegistry::with_defaults();
        assert!(registry.supports(PDF_MEDIA_TYPE));
        assert!(registry.supports(DOCX_MEDIA_TYPE));
        assert!(!registry.supports("text/plain"));
        assert_eq!(registry.supported_types(), vec![PDF_MEDIA_TYPE, DOCX_MEDIA_TYPE]);
    }

    #[test]
    fn test_plain_text_is_unsupported_format() {
        let registry = ExtractorRegistry::with_defaults();
        let result = registry.extract(&RawDocument::new(&b"Jane Doe"[..], "text/plain"));
        assert!(matches!(result, Err(EngineError::UnsupportedFormat(t)) if t == "text/plain"));
    }

    #[test]
    fn test_unsupported_format_never_reaches_an_extractor() {
        let counting = Arc::new(CountingExtractor {
            calls: AtomicUsize::new(0),
        });
        let registry = ExtractorRegistry::new().register(counting.clone());
        let result = registry.extract(&RawDocument::new(&b"x"[..], "image/png"));
        assert!(matches!(result, Err(EngineError::UnsupportedFormat(_))));
        assert_eq!(counting.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_registered_extractor_is_used_for_its_type() {
        let registry = ExtractorRegistry::new().register(Arc::new(CountingExtractor {
            calls: AtomicUsize::new(0),
        }));
        let text = registry
            .extract(&RawDocument::new(&b"# Jane Doe"[..], "text/markdown"))
            .unwrap();
        assert_eq!(text, "# Jane Doe");
    }

    #[test]
    fn test_corrupt_pdf_is_extraction_failed() {
        let registry = ExtractorRegistry::with_defaults();
        let result = registry.extract(&RawDocument::new(&b"not a pdf at all"[..], PDF_MEDIA_TYPE));
        match result {
            Err(EngineError::ExtractionFailed { extractor, .. }) => {
                assert_eq!(extractor, "pdf-extract")
            }
            other => panic!("expected ExtractionFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_pdf_text_is_extracted() {
        let text = PdfTextExtractor
            .extract_text(&single_line_pdf("Jane Doe"))
            .unwrap();
        assert!(text.contains("Jane Doe"), "extracted: {text:?}");
    }

    #[test]
    fn test_pdf_decoder_panic_is_extraction_failed() {
        let registry = ExtractorRegistry::with_defaults();
        let result = registry.extract(&RawDocument::new(page_without_media_box_pdf(), PDF_MEDIA_TYPE));
        match result {
            Err(EngineError::ExtractionFailed { extractor, .. }) => {
                assert_eq!(extractor, "pdf-extract")
            }
            other => panic!("expected ExtractionFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_corrupt_docx_is_extraction_failed() {
        let result = DocxTextExtractor.extract_text(b"PK\x03\x04 truncated");
        assert!(matches!(result, Err(EngineError::ExtractionFailed { .. })));
    }

    #[test]
    fn test_docx_paragraphs_become_lines() {
        let bytes = build_docx(&["Jane Doe", "jane@example.com", "EXPERIENCE"]);
        let text = DocxTextExtractor.extract_text(&bytes).unwrap();
        assert_eq!(text, "Jane Doe\njane@example.com\nEXPERIENCE");
    }

    #[test]
    fn test_docx_table_cells_become_lines() {
        let table = Table::new(vec![TableRow::new(vec![
            TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text("Rust"))),
            TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text("Docker"))),
        ])]);
        let mut cursor = Cursor::new(Vec::new());
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("SKILLS")))
            .add_table(table)
            .build()
            .pack(&mut cursor)
            .unwrap();

        let text = DocxTextExtractor.extract_text(&cursor.into_inner()).unwrap();
        assert_eq!(text, "SKILLS\nRust\nDocker");
    }
}
