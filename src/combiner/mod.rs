// src/combiner/mod.rs
use crate::extractors::Question;
use crate::selection::Selection;
use serde::Serialize;
use std::fmt::Write as _;

/// One paper's block in the combined output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub label: String,
    pub questions: Vec<Question>,
}

impl Section {
    pub fn heading(&self) -> String {
        format!("Questions from {}", self.label)
    }
}

/// Ordered sections, ready to be written out once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CombinedDocument {
    pub sections: Vec<Section>,
}

/// Groups each label's questions under its heading, in the order supplied.
/// No deduplication: a question appearing under two labels is emitted twice.
pub fn combine<I, L>(sections: I) -> CombinedDocument
where
    I: IntoIterator<Item = (L, Vec<Question>)>,
    L: Into<String>,
{
    CombinedDocument {
        sections: sections
            .into_iter()
            .map(|(label, questions)| Section {
                label: label.into(),
                questions,
            })
            .collect(),
    }
}

impl CombinedDocument {
    pub fn from_selection(selection: &Selection) -> Self {
        combine(
            selection
                .entries()
                .iter()
                .map(|e| (e.code.clone(), e.questions.clone())),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }

    /// Numbered plain-text listing of every section.
    pub fn preview(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            let _ = writeln!(out, "{}:", section.heading());
            if section.questions.is_empty() {
                let _ = writeln!(out, "  (no questions)");
            }
            for (idx, question) in section.questions.iter().enumerate() {
                let _ = writeln!(out, "  {}. {}", idx + 1, question);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(items: &[&str]) -> Vec<Question> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_combine_empty_has_no_sections() {
        let doc = combine(Vec::<(String, Vec<Question>)>::new());
        assert!(doc.is_empty());
        assert_eq!(doc.preview(), "");
    }

    #[test]
    fn test_combine_preserves_section_and_question_order() {
        let doc = combine(vec![("A", q(&["q1", "q2"])), ("B", q(&["q3"]))]);

        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].heading(), "Questions from A");
        assert_eq!(doc.sections[0].questions, vec!["q1", "q2"]);
        assert_eq!(doc.sections[1].heading(), "Questions from B");
        assert_eq!(doc.sections[1].questions, vec!["q3"]);
    }

    #[test]
    fn test_empty_section_keeps_its_heading() {
        let doc = combine(vec![("EMPTY", Vec::new()), ("B", q(&["q"]))]);
        assert_eq!(doc.sections.len(), 2);
        assert!(doc.sections[0].questions.is_empty());
        assert_eq!(doc.question_count(), 1);
    }

    #[test]
    fn test_no_deduplication_across_sections() {
        let doc = combine(vec![("A", q(&["same"])), ("B", q(&["same"]))]);
        assert_eq!(doc.question_count(), 2);
    }

    #[test]
    fn test_from_selection_and_preview() {
        let mut selection = Selection::new();
        selection.record("CS101", 2, q(&["Define a tree.", "What is a heap?"]));
        selection.record("PHY200", 1, Vec::new());

        let doc = CombinedDocument::from_selection(&selection);
        assert_eq!(
            doc.preview(),
            "Questions from CS101:\n  1. Define a tree.\n  2. What is a heap?\n\
             Questions from PHY200:\n  (no questions)\n"
        );
    }
}
