// src/storage/mod.rs
use crate::combiner::CombinedDocument;
use crate::utils::error::StorageError;
use docx_rs::{Docx, Paragraph, Run, Style, StyleType};
use std::fs;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

/// File name offered for the generated paper.
pub const DEFAULT_OUTPUT_FILE: &str = "combined_questions.docx";

/// MIME type for download surfaces.
pub const DOCX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const HEADING_STYLE_ID: &str = "Heading1";

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Writes the combined paper as a .docx, replacing any earlier file of the same name.
    pub fn save_document(&self, document: &CombinedDocument, file_name: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(file_name);

        let file = fs::File::create(&file_path)
            .map_err(StorageError::IoError)?;
        write_docx(document, file)?;

        tracing::info!(
            "Saved {} questions in {} sections to {}",
            document.question_count(),
            document.sections.len(),
            file_path.display()
        );

        Ok(file_path)
    }

    /// Saves a JSON manifest next to the document: `<stem>_manifest.json`.
    pub fn save_manifest(&self, document: &CombinedDocument, file_name: &str) -> Result<PathBuf, StorageError> {
        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("combined_questions");
        let file_path = self.base_dir.join(format!("{}_manifest.json", stem));

        let sections: Vec<_> = document
            .sections
            .iter()
            .map(|s| {
                serde_json::json!({
                    "label": s.label,
                    "heading": s.heading(),
                    "question_count": s.questions.len(),
                })
            })
            .collect();

        let manifest = serde_json::json!({
            "document": file_name,
            "mime_type": DOCX_MIME_TYPE,
            "question_count": document.question_count(),
            "sections": sections,
            "generated_at": chrono::Utc::now().to_rfc3339(),
        });

        let manifest_str = serde_json::to_string_pretty(&manifest)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, manifest_str)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved manifest to {}", file_path.display());

        Ok(file_path)
    }
}

/// Lays out the combined paper: a Heading 1 per section, then one paragraph per question.
pub fn render_docx(document: &CombinedDocument) -> Docx {
    let heading_style = Style::new(HEADING_STYLE_ID, StyleType::Paragraph)
        .name("Heading 1")
        .bold()
        .size(32);

    let mut docx = Docx::new().add_style(heading_style);
    for section in &document.sections {
        docx = docx.add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(section.heading()))
                .style(HEADING_STYLE_ID),
        );
        for question in &section.questions {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(question.as_str())));
        }
    }
    docx
}

/// Packs the rendered paper into any seekable writer.
pub fn write_docx<W: Write + Seek>(document: &CombinedDocument, writer: W) -> Result<(), StorageError> {
    render_docx(document)
        .build()
        .pack(writer)
        .map_err(|e| StorageError::PackagingError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combiner::combine;
    use crate::extractors::docx::paragraphs_from_bytes;
    use std::io::Cursor;

    fn sample_document() -> CombinedDocument {
        combine(vec![
            ("A", vec!["q1".to_string(), "q2".to_string()]),
            ("B", vec!["q3".to_string()]),
        ])
    }

    #[test]
    fn test_written_docx_reads_back_in_order() {
        let mut buf = Cursor::new(Vec::new());
        write_docx(&sample_document(), &mut buf).unwrap();

        let paragraphs: Vec<String> = paragraphs_from_bytes(&buf.into_inner())
            .unwrap()
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .collect();
        assert_eq!(
            paragraphs,
            vec!["Questions from A", "q1", "q2", "Questions from B", "q3"]
        );
    }

    #[test]
    fn test_empty_document_is_still_well_formed() {
        let mut buf = Cursor::new(Vec::new());
        write_docx(&CombinedDocument::default(), &mut buf).unwrap();

        let paragraphs = paragraphs_from_bytes(&buf.into_inner()).unwrap();
        assert!(paragraphs.iter().all(|p| p.trim().is_empty()));
    }

    #[test]
    fn test_save_document_and_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(tmp.path().join("out")).unwrap();
        let doc = sample_document();

        let doc_path = storage.save_document(&doc, DEFAULT_OUTPUT_FILE).unwrap();
        assert_eq!(doc_path, tmp.path().join("out").join(DEFAULT_OUTPUT_FILE));
        assert!(doc_path.is_file());

        let manifest_path = storage.save_manifest(&doc, DEFAULT_OUTPUT_FILE).unwrap();
        assert!(manifest_path.ends_with("combined_questions_manifest.json"));

        let manifest: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(manifest_path).unwrap()).unwrap();
        assert_eq!(manifest["mime_type"], DOCX_MIME_TYPE);
        assert_eq!(manifest["question_count"], 3);
        assert_eq!(manifest["sections"][0]["label"], "A");
        assert_eq!(manifest["sections"][1]["question_count"], 1);
    }
}
