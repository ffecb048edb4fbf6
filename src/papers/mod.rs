// src/papers/mod.rs
pub mod catalog;
pub mod models;

pub use catalog::Catalog;
