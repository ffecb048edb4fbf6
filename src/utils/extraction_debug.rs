// src/utils/extraction_debug.rs
use crate::extractors::question::delimited_ranges;
use crate::utils::error::StorageError;
use std::fs;
use std::path::Path;

/// Builds an HTML page of a paper's joined text with each `***N` marker and
/// the question body it opens highlighted.
pub fn annotate(content: &str) -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<style>\n");

    // CSS for highlight colors
    html.push_str("body { white-space: pre-wrap; font-family: monospace; }\n");
    html.push_str(".highlight-marker { background-color: #FFFF00; }\n");
    html.push_str(".highlight-question { background-color: #90EE90; }\n");
    html.push_str("</style>\n</head>\n<body>\n");

    let ranges = delimited_ranges(content);
    let mut last_pos = 0;

    for (i, (marker_start, body_start, body_end)) in ranges.into_iter().enumerate() {
        html.push_str(&escape(&content[last_pos..marker_start]));

        html.push_str(&format!(
            "<span class=\"highlight-marker\" title=\"Question {}, marker at {}\">",
            i + 1,
            marker_start
        ));
        html.push_str(&escape(&content[marker_start..body_start]));
        html.push_str("</span>");

        html.push_str(&format!(
            "<span class=\"highlight-question\" title=\"Position: {}-{}\">",
            body_start, body_end
        ));
        html.push_str(&escape(&content[body_start..body_end]));
        html.push_str("</span>");

        last_pos = body_end;
    }

    // Add any remaining content
    if last_pos < content.len() {
        html.push_str(&escape(&content[last_pos..]));
    }

    html.push_str("\n</body>\n</html>");
    html
}

/// Writes the annotated page for one paper.
pub fn save_annotated(content: &str, path: &Path) -> Result<(), StorageError> {
    fs::write(path, annotate(content))?;
    tracing::info!("Saved extraction debug page to {}", path.display());
    Ok(())
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_and_bodies_are_highlighted() {
        let html = annotate("intro\n***1 What is <T>? ***\n***2 second");

        assert!(html.contains("intro\n"));
        assert!(html.contains(r#"<span class="highlight-marker" title="Question 1, marker at 6">***1</span>"#));
        assert!(html.contains("What is &lt;T&gt;? </span>"));
        assert!(html.contains(r#"title="Question 2"#));
        assert!(html.ends_with("</html>"));
    }

    #[test]
    fn test_plain_text_passes_through() {
        let html = annotate("no markers here");
        assert!(html.contains("no markers here"));
        assert!(!html.contains("highlight-marker\" title"));
    }
}
