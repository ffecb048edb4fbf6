// src/extractors/docx.rs
//
// A .docx file is a ZIP archive of XML parts; docx-rs gives a typed tree:
// Document -> Paragraph -> Run -> Text. Only top-level body paragraphs are
// read; tables, headers and footers are not question text.

use crate::papers::models::SourceDocument;
use crate::utils::error::ExtractError;
use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};
use std::fs;

/// Reads the plain text of every body paragraph of a paper, in document order.
/// Blank paragraphs are kept; callers decide what a question is.
pub fn read_paragraphs(source: &SourceDocument) -> Result<Vec<String>, ExtractError> {
    let bytes = fs::read(&source.path).map_err(|e| ExtractError::Open {
        label: source.label.clone(),
        path: source.path.clone(),
        source: e,
    })?;

    paragraphs_from_bytes(&bytes).map_err(|message| ExtractError::Parse {
        label: source.label.clone(),
        path: source.path.clone(),
        message,
    })
}

/// Parses an in-memory .docx and returns its paragraph texts.
pub fn paragraphs_from_bytes(bytes: &[u8]) -> Result<Vec<String>, String> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| e.to_string())?;

    let paragraphs = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
            _ => None,
        })
        .collect();

    Ok(paragraphs)
}

/// Concatenates the runs of one paragraph. Tabs and line breaks map to
/// `\t` and `\n` so the text reads the way it renders.
fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    for child in &para.children {
        push_child_text(child, &mut text);
    }
    text
}

fn push_child_text(child: &ParagraphChild, out: &mut String) {
    match child {
        ParagraphChild::Run(run) => {
            for rc in &run.children {
                match rc {
                    RunChild::Text(t) => out.push_str(&t.text),
                    RunChild::Tab(_) => out.push('\t'),
                    RunChild::Break(_) => out.push('\n'),
                    _ => {}
                }
            }
        }
        ParagraphChild::Hyperlink(link) => {
            for inner in &link.children {
                push_child_text(inner, out);
            }
        }
        _ => {}
    }
}
