//! Text extraction: turns an uploaded résumé document into plain text for the
//! score engine. PDF goes through `pdf-extract`, DOCX through `docx-rs`.
//!
//! Extraction is CPU-bound. Async callers run it on the blocking pool.

use thiserror::Error;

pub mod docx;

/// Accepted upload formats, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Doc,
    Docx,
}

impl DocumentKind {
    /// Returns `None` for anything outside the allow-list (including no extension).
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "doc" => Some(DocumentKind::Doc),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Doc => "doc",
            DocumentKind::Docx => "docx",
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("could not read PDF: {0}")]
    Pdf(String),

    #[error("could not open document package: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("could not read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse document: {0}")]
    Docx(String),

    #[error("document expands past the {limit_bytes} byte limit")]
    TooLarge { limit_bytes: u64 },

    #[error("document package has no {0} part")]
    MissingDocumentPart(&'static str),

    #[error("{0} parser failed on this document")]
    ParserPanic(&'static str),

    #[error("legacy binary .doc files are not supported; save the file as .docx or .pdf")]
    LegacyDoc,
}

/// Extracts the full plain text of a document.
pub fn extract_text(kind: DocumentKind, bytes: &[u8]) -> Result<String, ExtractionError> {
    match kind {
        DocumentKind::Pdf => {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))
        }
        DocumentKind::Docx => docx::extract_text(bytes),
        // A .doc is only readable when it is really an OOXML package under the old extension.
        DocumentKind::Doc => docx::extract_text(bytes).map_err(|e| match e {
            ExtractionError::Archive(_) => ExtractionError::LegacyDoc,
            other => other,
        }),
    }
}
