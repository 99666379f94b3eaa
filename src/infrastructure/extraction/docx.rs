//! DOCX extraction using docx-rs

use std::panic::{self, AssertUnwindSafe};

use docx_rs::{
    DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCellContent, TableChild,
    TableRowChild,
};

use crate::domain::extraction::{
    DocumentExtractor, DocumentKind, ExtractedDocument, ExtractionError,
};

/// Extracts paragraph text from Word documents. Tables are flattened cell by cell.
#[derive(Debug, Clone, Default)]
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }

    fn paragraph_text(p: &Paragraph) -> String {
        let mut text = String::new();

        for child in &p.children {
            match child {
                ParagraphChild::Run(run) => push_run_text(&mut text, &run.children),
                ParagraphChild::Hyperlink(link) => {
                    for child in &link.children {
                        if let ParagraphChild::Run(run) = child {
                            push_run_text(&mut text, &run.children);
                        }
                    }
                }
                _ => {}
            }
        }

        text
    }

    fn table_paragraphs(table: &Table, out: &mut Vec<String>) {
        for row in &table.rows {
            let TableChild::TableRow(row) = row;
            for cell in &row.cells {
                let TableRowChild::TableCell(cell) = cell;
                for content in &cell.children {
                    if let TableCellContent::Paragraph(p) = content {
                        out.push(Self::paragraph_text(p));
                    }
                }
            }
        }
    }

    fn paragraphs(bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        let docx = panic::catch_unwind(AssertUnwindSafe(|| docx_rs::read_docx(bytes)))
            .map_err(|_| {
                ExtractionError::corrupt(DocumentKind::Docx, "parser panicked on malformed document")
            })?
            .map_err(|e| ExtractionError::corrupt(DocumentKind::Docx, e.to_string()))?;

        let mut paragraphs = Vec::new();
        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(p) => paragraphs.push(Self::paragraph_text(p)),
                DocumentChild::Table(t) => Self::table_paragraphs(t, &mut paragraphs),
                _ => {}
            }
        }

        Ok(paragraphs)
    }
}

fn push_run_text(text: &mut String, children: &[RunChild]) {
    for child in children {
        match child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}

impl DocumentExtractor for DocxExtractor {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Docx
    }

    fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument, ExtractionError> {
        if bytes.is_empty() {
            return Err(ExtractionError::NoTextFound);
        }

        let text = Self::paragraphs(bytes)?
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        ExtractedDocument::new(text, DocumentKind::Docx).ok_or(ExtractionError::NoTextFound)
    }

    fn name(&self) -> &'static str {
        "docx"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Run, TableCell, TableRow};
    use std::io::Cursor;

    fn pack(docx: Docx) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).unwrap();
        cursor.into_inner()
    }

    fn para(text: &str) -> Paragraph {
        Paragraph::new().add_run(Run::new().add_text(text))
    }

    #[test]
    fn test_paragraphs_joined_and_blank_skipped() {
        let bytes = pack(
            Docx::new()
                .add_paragraph(para("  Dear team,  "))
                .add_paragraph(para("   "))
                .add_paragraph(para("The launch moved to Friday.")),
        );

        let doc = DocxExtractor::new().extract(&bytes).unwrap();
        assert_eq!(doc.text(), "Dear team,\nThe launch moved to Friday.");
        assert_eq!(doc.kind(), DocumentKind::Docx);
    }

    #[test]
    fn test_table_cells_flattened() {
        let table = Table::new(vec![TableRow::new(vec![
            TableCell::new().add_paragraph(para("Owner")),
            TableCell::new().add_paragraph(para("Due date")),
        ])]);

        let bytes = pack(Docx::new().add_paragraph(para("Action items")).add_table(table));

        let doc = DocxExtractor::new().extract(&bytes).unwrap();
        assert_eq!(doc.text(), "Action items\nOwner\nDue date");
    }

    #[test]
    fn test_empty_document_is_no_text() {
        let bytes = pack(Docx::new().add_paragraph(Paragraph::new()));

        assert_eq!(
            DocxExtractor::new().extract(&bytes).unwrap_err(),
            ExtractionError::NoTextFound
        );
    }

    #[test]
    fn test_garbage_is_corrupt() {
        let err = DocxExtractor::new().extract(b"PK\x03\x04 not really a zip").unwrap_err();
        assert_eq!(err.code(), "corrupt_document");
    }
}
