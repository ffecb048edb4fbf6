//! Question paper generator: find exam papers, extract their questions,
//! sample a subset from each and combine them into one .docx.
//!
//! The pure pieces (`extractors::extract`, `selection::sample`,
//! `combiner::combine`) carry no I/O; `papers` and `storage` handle the
//! filesystem.

pub mod combiner;
pub mod extractors;
pub mod papers;
pub mod selection;
pub mod storage;
pub mod utils;
