// src/papers/models.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File extension that marks a question paper as eligible.
pub const PAPER_EXTENSION: &str = "docx";

/// One question paper on disk, identified by its exam code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub label: String,  // Exam code, e.g. "CS101_2023"
    pub path: PathBuf,  // Location of the .docx file
}

impl SourceDocument {
    pub fn new(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }

    /// Builds a document from a file path, deriving the label by stripping
    /// the `.docx` extension from the file name. Returns `None` for files
    /// that are not question papers.
    pub fn from_path(path: &Path) -> Option<Self> {
        let is_paper = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(PAPER_EXTENSION))
            .unwrap_or(false);
        if !is_paper {
            return None;
        }

        let label = path.file_stem()?.to_str()?;
        // Word leaves "~$name.docx" lock files next to open documents
        if label.is_empty() || label.starts_with("~$") {
            return None;
        }

        Some(Self::new(label, path))
    }

    /// File name component, used by the search to match against as well.
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }
}

/// Companion index mapping exam code to file name inside the paper directory.
///
/// Stored as a flat JSON object: `{"CS101_2023": "cs101-final.docx"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExamIndex {
    pub entries: BTreeMap<String, String>,
}

impl ExamIndex {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
