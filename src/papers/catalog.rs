// src/papers/catalog.rs
use crate::papers::models::{ExamIndex, SourceDocument, PAPER_EXTENSION};
use crate::utils::error::CatalogError;
use std::fs;
use std::path::{Path, PathBuf};

/// Index file picked up automatically from the paper directory.
pub const DEFAULT_INDEX_FILE: &str = "index.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub document: SourceDocument,
    pub available: bool, // false when an index entry points at a file that does not exist
}

/// The set of question papers the user can search and select from.
#[derive(Debug, Clone)]
pub struct Catalog {
    dir: PathBuf,
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Scans `dir` (non-recursively) for `.docx` papers, sorted by exam code.
    /// A missing directory yields an empty catalog.
    pub fn scan<P: AsRef<Path>>(dir: P) -> Result<Self, CatalogError> {
        let dir = dir.as_ref().to_path_buf();

        if !dir.exists() {
            tracing::warn!("Question paper directory '{}' does not exist, catalog is empty", dir.display());
            return Ok(Self { dir, entries: Vec::new() });
        }

        let read_dir = fs::read_dir(&dir).map_err(|source| CatalogError::ReadDir {
            path: dir.clone(),
            source,
        })?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|source| CatalogError::ReadDir {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Some(document) = SourceDocument::from_path(&path) {
                tracing::trace!("Found paper {} at {}", document.label, path.display());
                entries.push(CatalogEntry { document, available: true });
            }
        }

        entries.sort_by(|a, b| a.document.label.cmp(&b.document.label));
        tracing::debug!("Scanned {} papers in {}", entries.len(), dir.display());

        Ok(Self { dir, entries })
    }

    /// Builds the catalog from a companion index when one is available.
    ///
    /// With `index_path` unset, `<dir>/index.json` is used if it exists; otherwise
    /// this falls back to a plain directory scan.
    pub fn open<P: AsRef<Path>>(dir: P, index_path: Option<&Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let index_path = match index_path {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let candidate = dir.join(DEFAULT_INDEX_FILE);
                candidate.is_file().then_some(candidate)
            }
        };

        match index_path {
            Some(path) => {
                let raw = fs::read_to_string(&path).map_err(|source| CatalogError::IndexRead {
                    path: path.clone(),
                    source,
                })?;
                let index = ExamIndex::from_json(&raw).map_err(|source| CatalogError::IndexParse {
                    path: path.clone(),
                    source,
                })?;
                if index.is_empty() {
                    tracing::warn!("Exam index {} lists no papers", path.display());
                }
                tracing::info!("Loaded exam index {} ({} codes)", path.display(), index.len());
                Ok(Self::with_index(dir, &index))
            }
            None => Self::scan(dir),
        }
    }

    /// Catalog whose entries are exactly the index entries, in exam-code order.
    pub fn with_index<P: AsRef<Path>>(dir: P, index: &ExamIndex) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let entries = index
            .entries
            .iter()
            .map(|(code, file_name)| {
                let path = dir.join(file_name);
                let available = path.is_file();
                if !available {
                    tracing::warn!("Index entry {} points at missing file {}", code, path.display());
                }
                CatalogEntry {
                    document: SourceDocument::new(code.clone(), path),
                    available,
                }
            })
            .collect();

        Self { dir, entries }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive substring search over exam codes and file names.
    /// An empty (or blank) query matches everything.
    pub fn search(&self, query: &str) -> Vec<&CatalogEntry> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.entries.iter().collect();
        }

        self.entries
            .iter()
            .filter(|entry| {
                entry.document.label.to_lowercase().contains(&needle)
                    || entry.document.file_name().to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Resolves an exam code to its paper. Unknown codes map to
    /// `<dir>/<code>.docx`, so a missing file surfaces when it is opened.
    pub fn resolve(&self, code: &str) -> SourceDocument {
        self.entries
            .iter()
            .find(|entry| entry.document.label == code)
            .map(|entry| entry.document.clone())
            .unwrap_or_else(|| {
                tracing::debug!("Exam code {} not in catalog, assuming {}.{}", code, code, PAPER_EXTENSION);
                SourceDocument::new(code, self.dir.join(format!("{}.{}", code, PAPER_EXTENSION)))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    fn labels(entries: &[&CatalogEntry]) -> Vec<String> {
        entries.iter().map(|e| e.document.label.clone()).collect()
    }

    #[test]
    fn test_scan_lists_only_papers_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "PHY200.docx");
        touch(tmp.path(), "CS101.docx");
        touch(tmp.path(), "notes.txt");
        touch(tmp.path(), "~$CS101.docx");
        fs::create_dir(tmp.path().join("archive.docx")).unwrap();

        let catalog = Catalog::scan(tmp.path()).unwrap();
        let all = catalog.search("");
        assert_eq!(labels(&all), vec!["CS101", "PHY200"]);
        assert!(all.iter().all(|e| e.available));
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let catalog = Catalog::scan(tmp.path().join("nope")).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "CS101_2022.docx");
        touch(tmp.path(), "CS101_2023.docx");
        touch(tmp.path(), "MATH150.docx");

        let catalog = Catalog::scan(tmp.path()).unwrap();
        assert_eq!(labels(&catalog.search("cs101")), vec!["CS101_2022", "CS101_2023"]);
        assert_eq!(labels(&catalog.search("  2023 ")), vec!["CS101_2023"]);
        assert!(catalog.search("bio").is_empty());
        assert_eq!(catalog.search("   ").len(), 3);
    }

    #[test]
    fn test_index_drives_catalog_and_flags_missing_files() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "final-exam.docx");
        fs::write(
            tmp.path().join(DEFAULT_INDEX_FILE),
            r#"{"CS101": "final-exam.docx", "GONE": "deleted.docx"}"#,
        )
        .unwrap();

        let catalog = Catalog::open(tmp.path(), None).unwrap();
        assert_eq!(catalog.len(), 2);

        let found = catalog.search("cs101");
        let cs = found[0];
        assert!(cs.available);
        assert_eq!(cs.document.path, tmp.path().join("final-exam.docx"));

        // File names are searchable too
        assert_eq!(labels(&catalog.search("final")), vec!["CS101"]);

        let missing = catalog.search("GONE");
        assert!(!missing[0].available);
    }

    #[test]
    fn test_empty_index_gives_empty_catalog() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "CS101.docx");
        fs::write(tmp.path().join(DEFAULT_INDEX_FILE), "{}").unwrap();

        // The index alone defines the catalog, even when it lists nothing
        let catalog = Catalog::open(tmp.path(), None).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_malformed_index_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let index = tmp.path().join("codes.json");
        fs::write(&index, "not json").unwrap();

        let err = Catalog::open(tmp.path(), Some(&index)).unwrap_err();
        assert!(matches!(err, CatalogError::IndexParse { .. }));
    }

    #[test]
    fn test_resolve_falls_back_to_code_file_name() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "CS101.docx");
        let catalog = Catalog::scan(tmp.path()).unwrap();

        assert_eq!(catalog.resolve("CS101").path, tmp.path().join("CS101.docx"));

        let unknown = catalog.resolve("XYZ9");
        assert_eq!(unknown.label, "XYZ9");
        assert_eq!(unknown.path, tmp.path().join("XYZ9.docx"));
    }
}
