// src/extractors/question.rs

// --- Imports ---
use crate::extractors::docx::read_paragraphs;
use crate::papers::models::SourceDocument;
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// One selectable unit of text taken from a paper. Never empty, always trimmed.
pub type Question = String;

// --- Regex Patterns (Lazy Static) ---
// Opening marker: three asterisks followed by the question number, e.g. "***12"
pub(crate) static QUESTION_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*{3}\d+").expect("Failed to compile QUESTION_MARKER_RE")
});

// Closing conditions, all equally valid:
//   - a run of three or more asterisks
//   - an ellipsis, written as dots or as the single character
//   - any asterisk run at the very end of the text
pub(crate) static QUESTION_TERMINATOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*{3,}|\.{3,}|…|\*+\s*\z").expect("Failed to compile QUESTION_TERMINATOR_RE")
});

/// Which rule produced a paper's questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExtractionPolicy {
    /// Spans opened by a `***N` marker.
    Delimited,
    /// No markers found: one question per non-blank paragraph.
    Paragraph,
}

/// Extracts questions from paragraph-joined text.
///
/// Pure and deterministic: the same input always yields the same list.
pub fn extract(content: &str) -> Vec<Question> {
    extract_with_policy(content).0
}

/// Joins paragraphs with newlines and extracts from the result, so delimited
/// spans may cross paragraph boundaries. The fallback works on the paragraphs
/// themselves, so a paragraph holding a soft line break stays one question.
pub fn extract_paragraphs<S: AsRef<str>>(paragraphs: &[S]) -> (Vec<Question>, ExtractionPolicy) {
    let joined = paragraphs
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<_>>()
        .join("\n");

    match extract_with_policy(&joined) {
        (questions, ExtractionPolicy::Delimited) => (questions, ExtractionPolicy::Delimited),
        _ => (non_blank(paragraphs.iter().map(|p| p.as_ref())), ExtractionPolicy::Paragraph),
    }
}

/// Same as `extract`, also returning which policy produced the questions.
pub fn extract_with_policy(content: &str) -> (Vec<Question>, ExtractionPolicy) {
    let delimited = delimited_spans(content);
    if !delimited.is_empty() {
        return (delimited, ExtractionPolicy::Delimited);
    }
    (non_blank(content.lines()), ExtractionPolicy::Paragraph)
}

fn non_blank<'a>(paragraphs: impl Iterator<Item = &'a str>) -> Vec<Question> {
    paragraphs
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Byte ranges `(marker_start, body_start, body_end)` of every delimited
/// question, before trimming. A body runs to the next marker (or end of
/// text) and is cut at its first terminator.
pub(crate) fn delimited_ranges(content: &str) -> Vec<(usize, usize, usize)> {
    let markers: Vec<_> = QUESTION_MARKER_RE.find_iter(content).collect();

    markers
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let limit = markers.get(i + 1).map_or(content.len(), |next| next.start());
            let body = &content[marker.end()..limit];
            let end = QUESTION_TERMINATOR_RE
                .find(body)
                .map_or(limit, |term| marker.end() + term.start());
            (marker.start(), marker.end(), end)
        })
        .collect()
}

fn delimited_spans(content: &str) -> Vec<Question> {
    delimited_ranges(content)
        .into_iter()
        .map(|(_, start, end)| content[start..end].trim())
        .filter(|q| !q.is_empty())
        .map(str::to_string)
        .collect()
}

// --- Per-document loading ---

/// Result of loading one paper. A failed paper carries its error and
/// contributes no questions; it never stops other papers from loading.
#[derive(Debug)]
pub struct LoadedPaper {
    pub document: SourceDocument,
    pub questions: Vec<Question>,
    pub policy: ExtractionPolicy,
    pub error: Option<ExtractError>,
}

impl LoadedPaper {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

pub struct QuestionExtractor;

impl QuestionExtractor {
    pub fn new() -> Self { Self {} }

    /// Reads the paper and extracts its questions. Strict variant for callers
    /// that want the error.
    pub fn extract_document(&self, source: &SourceDocument) -> Result<(Vec<Question>, ExtractionPolicy), ExtractError> {
        let paragraphs = read_paragraphs(source)?;
        let (questions, policy) = extract_paragraphs(&paragraphs);
        tracing::debug!(
            "Extracted {} questions from {} ({} paragraphs, {:?} policy)",
            questions.len(),
            source.label,
            paragraphs.len(),
            policy
        );
        Ok((questions, policy))
    }

    /// Like `extract_document`, but a failure becomes an empty paper with the
    /// error attached. Warning the user is left to the caller.
    pub fn load(&self, source: &SourceDocument) -> LoadedPaper {
        match self.extract_document(source) {
            Ok((questions, policy)) => {
                if questions.is_empty() {
                    tracing::info!("Paper {} has no extractable questions", source.label);
                }
                LoadedPaper {
                    document: source.clone(),
                    questions,
                    policy,
                    error: None,
                }
            }
            Err(e) => {
                tracing::debug!("Load failed for {}: {:?}", source.label, e);
                LoadedPaper {
                    document: source.clone(),
                    questions: Vec::new(),
                    policy: ExtractionPolicy::Paragraph,
                    error: Some(e),
                }
            }
        }
    }
}

impl Default for QuestionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_delimited_spans() {
        let content = "***1 foo ***\n***2 bar ***";
        let (questions, policy) = extract_with_policy(content);
        assert_eq!(policy, ExtractionPolicy::Delimited);
        assert_eq!(questions, vec!["foo", "bar"]);
    }

    #[test]
    fn test_spans_cross_paragraph_boundaries() {
        let paragraphs = [
            "Section A",
            "***1 Define entropy.",
            "Give one example.***",
            "",
            "***2 State Ohm's law ***",
        ];
        let (questions, policy) = extract_paragraphs(&paragraphs);
        assert_eq!(policy, ExtractionPolicy::Delimited);
        assert_eq!(
            questions,
            vec!["Define entropy.\nGive one example.", "State Ohm's law"]
        );
    }

    #[test]
    fn test_all_terminators_close_a_question() {
        assert_eq!(extract("***1 dots close here... trailing"), vec!["dots close here"]);
        assert_eq!(extract("***1 unicode ellipsis… rest"), vec!["unicode ellipsis"]);
        assert_eq!(extract("***1 trailing asterisk *"), vec!["trailing asterisk"]);
        assert_eq!(extract("***1 long run ****** after"), vec!["long run"]);
    }

    #[test]
    fn test_next_marker_closes_unterminated_question() {
        assert_eq!(
            extract("***1 first question ***2 second question"),
            vec!["first question", "second question"]
        );
    }

    #[test]
    fn test_empty_spans_are_discarded() {
        assert_eq!(extract("***1 *** ***2   ***3 real one ***"), vec!["real one"]);
    }

    #[test]
    fn test_falls_back_to_paragraphs_without_markers() {
        let content = "  What is a monad?  \n\n\t\nExplain borrowing.\n";
        let (questions, policy) = extract_with_policy(content);
        assert_eq!(policy, ExtractionPolicy::Paragraph);
        assert_eq!(questions, vec!["What is a monad?", "Explain borrowing."]);
    }

    #[test]
    fn test_paragraph_fallback_keeps_soft_breaks_together() {
        let paragraphs = ["Match the pairs:\na) x\tb) y", "   ", "Next question"];
        let (questions, policy) = extract_paragraphs(&paragraphs);
        assert_eq!(policy, ExtractionPolicy::Paragraph);
        assert_eq!(questions, vec!["Match the pairs:\na) x\tb) y", "Next question"]);
    }

    #[test]
    fn test_only_empty_spans_falls_back_to_paragraphs() {
        // Markers present but every body is empty
        let (questions, policy) = extract_with_policy("***1 ***\n***2 ...");
        assert_eq!(policy, ExtractionPolicy::Paragraph);
        assert_eq!(questions, vec!["***1 ***", "***2 ..."]);
    }

    #[test]
    fn test_results_are_trimmed_and_non_empty() {
        let inputs = ["", "   \n  ", "***1  a  ***", "x\n  y  \n", "***7\n\n b \n"];
        for input in inputs {
            for q in extract(input) {
                assert!(!q.is_empty());
                assert_eq!(q, q.trim());
            }
        }
        assert!(extract("").is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let content = "***1 alpha ***\nnoise\n***2 beta...";
        assert_eq!(extract(content), extract(content));
    }

    #[test]
    fn test_load_of_missing_paper_is_empty_with_error() {
        let tmp = tempfile::tempdir().unwrap();
        let source = SourceDocument::new("MISSING", tmp.path().join("MISSING.docx"));

        let loaded = QuestionExtractor::new().load(&source);
        assert!(!loaded.is_ok());
        assert!(loaded.questions.is_empty());
        assert_eq!(loaded.error.as_ref().map(|e| e.label()), Some("MISSING"));
    }
}
