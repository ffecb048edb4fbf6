// src/extractors/mod.rs
pub mod docx;
pub mod question;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use question::{
    extract,
    extract_paragraphs,
    ExtractionPolicy,
    LoadedPaper,
    Question,
    QuestionExtractor,
};
