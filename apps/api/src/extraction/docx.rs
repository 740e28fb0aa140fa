//! DOCX reader. Parses the package with `docx-rs` and walks the document body.
//!
//! Every paragraph (including empty ones) ends with a blank line, tabs become
//! `\t` and breaks become `\n`. Table cells are read paragraph by paragraph.
//! Styles, drawings and field codes are dropped.

use std::io::{self, Cursor, Read};

use docx_rs::{
    DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCellContent, TableChild,
    TableRowChild,
};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::extraction::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Cap on the total inflated size of all package entries.
pub const MAX_INFLATED_BYTES: u64 = 64 * 1024 * 1024;

static ENTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:#x([0-9A-Fa-f]+)|#([0-9]+)|(amp|lt|gt|quot|apos));")
        .expect("xml entity pattern is valid")
});

pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    extract_text_within(bytes, MAX_INFLATED_BYTES)
}

fn extract_text_within(bytes: &[u8], limit_bytes: u64) -> Result<String, ExtractionError> {
    check_package(bytes, limit_bytes)?;
    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let mut out = String::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(p) => push_paragraph(&mut out, p),
            DocumentChild::Table(t) => push_table(&mut out, t),
            _ => {}
        }
    }
    Ok(out)
}

/// Inflates every entry into a sink, stopping once `limit_bytes` is exceeded,
/// so the parser never sees a package that expands past the limit.
fn check_package(bytes: &[u8], limit_bytes: u64) -> Result<(), ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    match archive.by_name(DOCUMENT_PART) {
        Ok(_) => {}
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(ExtractionError::MissingDocumentPart(DOCUMENT_PART))
        }
        Err(e) => return Err(e.into()),
    }

    let mut inflated: u64 = 0;
    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        let remaining = limit_bytes - inflated;
        inflated += io::copy(&mut entry.take(remaining + 1), &mut io::sink())?;
        if inflated > limit_bytes {
            return Err(ExtractionError::TooLarge { limit_bytes });
        }
    }
    Ok(())
}

fn push_paragraph(out: &mut String, paragraph: &Paragraph) {
    push_paragraph_children(out, &paragraph.children);
    out.push_str("\n\n");
}

fn push_paragraph_children(out: &mut String, children: &[ParagraphChild]) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        // docx-rs keeps run text XML-escaped
                        RunChild::Text(text) => out.push_str(&unescape_xml(&text.text)),
                        RunChild::Tab(_) => out.push('\t'),
                        RunChild::Break(_) => out.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_paragraph_children(out, &link.children),
            _ => {}
        }
    }
}

#[allow(unreachable_patterns, irrefutable_let_patterns)]
fn push_table(out: &mut String, table: &Table) {
    for row in &table.rows {
        let TableChild::TableRow(row) = row else { continue };
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell else { continue };
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(p) => push_paragraph(out, p),
                    TableCellContent::Table(t) => push_table(out, t),
                    _ => {}
                }
            }
        }
    }
}

fn unescape_xml(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let code = caps
                .get(1)
                .and_then(|hex| u32::from_str_radix(hex.as_str(), 16).ok())
                .or_else(|| caps.get(2).and_then(|dec| dec.as_str().parse().ok()));
            if let Some(code) = code {
                return char::from_u32(code).map(String::from).unwrap_or_default();
            }
            match caps.get(3).map(|m| m.as_str()) {
                Some("amp") => "&",
                Some("lt") => "<",
                Some("gt") => ">",
                Some("quot") => "\"",
                _ => "'",
            }
            .to_string()
        })
        .into_owned()
}

/// Builds a DOCX with one single-run paragraph per entry; `""` gives an empty paragraph.
#[cfg(test)]
pub(crate) fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
    let mut docx = docx_rs::Docx::new();
    for text in paragraphs {
        let paragraph = if text.is_empty() {
            Paragraph::new()
        } else {
            Paragraph::new().add_run(docx_rs::Run::new().add_text(*text))
        };
        docx = docx.add_paragraph(paragraph);
    }
    let mut cursor = Cursor::new(Vec::new());
    docx.build().pack(&mut cursor).unwrap();
    cursor.into_inner()
}

/// Packs raw `w:body` markup into a minimal OOXML package, the way Word lays one out.
#[cfg(test)]
pub(crate) fn build_package(body: &str) -> Vec<u8> {
    use std::io::Write;

    let parts = [
        (
            "[Content_Types].xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#.to_string(),
        ),
        (
            "_rels/.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#.to_string(),
        ),
        (
            "word/_rels/document.xml.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"></Relationships>"#.to_string(),
        ),
        (
            DOCUMENT_PART,
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
            ),
        ),
    ];

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in parts {
        writer
            .start_file(name, zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_paragraphs_are_separated_by_blank_lines() {
        let bytes = build_docx(&["Jane Doe", "Skills"]);
        assert_eq!(extract_text(&bytes).unwrap(), "Jane Doe\n\nSkills\n\n");
    }

    #[test]
    fn test_empty_paragraphs_keep_their_lines() {
        let bytes = build_docx(&["A", "", "", "B"]);
        assert_eq!(extract_text(&bytes).unwrap(), "A\n\n\n\n\n\nB\n\n");
    }

    #[test]
    fn test_self_closing_paragraphs_keep_their_lines() {
        let bytes = build_package(
            "<w:p><w:r><w:t>A</w:t></w:r></w:p><w:p/><w:p/><w:p><w:r><w:t>B</w:t></w:r></w:p>",
        );
        assert_eq!(extract_text(&bytes).unwrap(), "A\n\n\n\n\n\nB\n\n");
    }

    #[test]
    fn test_runs_tabs_and_breaks() {
        let paragraph = Paragraph::new().add_run(
            docx_rs::Run::new()
                .add_text("2019")
                .add_tab()
                .add_text("Acme")
                .add_break(docx_rs::BreakType::TextWrapping)
                .add_text("Engineer"),
        );
        let mut cursor = Cursor::new(Vec::new());
        docx_rs::Docx::new()
            .add_paragraph(paragraph)
            .build()
            .pack(&mut cursor)
            .unwrap();
        let text = extract_text(&cursor.into_inner()).unwrap();
        assert_eq!(text, "2019\tAcme\nEngineer\n\n");
    }

    #[test]
    fn test_table_cells_are_read_as_paragraphs() {
        let cell = docx_rs::TableCell::new()
            .add_paragraph(Paragraph::new().add_run(docx_rs::Run::new().add_text("cell")));
        let table = docx_rs::Table::new(vec![docx_rs::TableRow::new(vec![cell])]);
        let mut cursor = Cursor::new(Vec::new());
        docx_rs::Docx::new()
            .add_table(table)
            .build()
            .pack(&mut cursor)
            .unwrap();
        assert_eq!(extract_text(&cursor.into_inner()).unwrap(), "cell\n\n");
    }

    #[test]
    fn test_ampersands_survive() {
        let bytes = build_docx(&["R&D <team>"]);
        assert_eq!(extract_text(&bytes).unwrap(), "R&D <team>\n\n");
    }

    #[test]
    fn test_entities_are_decoded() {
        assert_eq!(unescape_xml("R&amp;D &lt;team&gt; &quot;x&quot; &apos;y&apos;"), "R&D <team> \"x\" 'y'");
        assert_eq!(unescape_xml("caf&#233; &#x2013; ok"), "café – ok");
        assert_eq!(unescape_xml("plain"), "plain");
    }

    #[test]
    fn test_package_without_document_part() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(b"<w:styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = extract_text(&bytes).unwrap_err();
        assert!(matches!(err, ExtractionError::MissingDocumentPart(DOCUMENT_PART)));
    }

    #[test]
    fn test_highly_compressible_part_is_rejected() {
        // 1 MiB of spaces deflates to a few KiB
        let padding = " ".repeat(1024 * 1024);
        let bytes = build_package(&format!("<w:p><w:r><w:t>A</w:t></w:r></w:p>{padding}"));
        assert!(bytes.len() < 64 * 1024, "fixture is {} bytes", bytes.len());

        let err = extract_text_within(&bytes, 512 * 1024).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::TooLarge { limit_bytes } if limit_bytes == 512 * 1024
        ));
    }

    #[test]
    fn test_package_under_limit_is_read() {
        let bytes = build_docx(&["Education"]);
        assert_eq!(extract_text_within(&bytes, MAX_INFLATED_BYTES).unwrap(), "Education\n\n");
    }

    #[test]
    fn test_non_zip_is_archive_error() {
        let err = extract_text(b"%PDF-1.7").unwrap_err();
        assert!(matches!(err, ExtractionError::Archive(_)));
    }
}
