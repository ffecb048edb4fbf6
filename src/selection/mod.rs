// src/selection/mod.rs
pub mod sampler;

pub use sampler::{clamp_count, sample};

use crate::extractors::Question;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// How many questions the user asked for from one paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PickCount {
    All,
    Exactly(usize),
}

impl PickCount {
    /// The count to sample once the paper's size is known, clamped to `[1, available]`.
    pub fn resolve(self, available: usize) -> Option<usize> {
        match self {
            PickCount::All => clamp_count(available, available),
            PickCount::Exactly(n) => clamp_count(n, available),
        }
    }
}

/// A `CODE=N` (or bare `CODE` for every question) request from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickRequest {
    pub code: String,
    pub count: PickCount,
}

impl FromStr for PickRequest {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (code, count) = match s.split_once('=') {
            Some((code, n)) => {
                let n: usize = n
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid question count '{}' in '{}'", n.trim(), s))?;
                (code, PickCount::Exactly(n))
            }
            None => (s, PickCount::All),
        };

        let code = code.trim();
        if code.is_empty() {
            return Err(format!("missing exam code in '{}'", s));
        }
        // Codes become file names inside the paper directory
        if code.contains(|c: char| c == '/' || c == '\\') || code.contains("..") {
            return Err(format!("exam code '{}' must not contain path separators or '..'", code));
        }
        Ok(Self {
            code: code.to_string(),
            count,
        })
    }
}

impl fmt::Display for PickRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.count {
            PickCount::All => write!(f, "{}", self.code),
            PickCount::Exactly(n) => write!(f, "{}={}", self.code, n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionEntry {
    pub code: String,
    pub requested: usize,
    pub questions: Vec<Question>,
}

/// The user's choice of papers and sampled questions for one generation request.
///
/// Owned by the caller and passed explicitly; entries keep the order in which
/// exam codes were first added.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Selection {
    entries: Vec<SelectionEntry>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an exam code with no questions yet. Returns `false` if the code
    /// is already part of the selection.
    pub fn add_code(&mut self, code: &str) -> bool {
        if self.contains(code) {
            return false;
        }
        self.entries.push(SelectionEntry {
            code: code.to_string(),
            requested: 0,
            questions: Vec::new(),
        });
        true
    }

    /// Stores the sampled questions for `code`, replacing an earlier draw in place.
    pub fn record(&mut self, code: &str, requested: usize, questions: Vec<Question>) {
        match self.entries.iter_mut().find(|e| e.code == code) {
            Some(entry) => {
                entry.requested = requested;
                entry.questions = questions;
            }
            None => self.entries.push(SelectionEntry {
                code: code.to_string(),
                requested,
                questions,
            }),
        }
    }

    /// Drops a code, e.g. when its paper turned out to be unreadable.
    pub fn remove(&mut self, code: &str) -> Option<SelectionEntry> {
        let pos = self.entries.iter().position(|e| e.code == code)?;
        Some(self.entries.remove(pos))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.iter().any(|e| e.code == code)
    }

    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_questions(&self) -> usize {
        self.entries.iter().map(|e| e.questions.len()).sum()
    }
}
