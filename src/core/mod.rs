//! Core module - The concordance pipeline
//!
//! This module provides:
//! - Word -> line-number store (ConcordanceStore)
//! - Line sanitizing and tokenizing
//! - File ingestion
//! - Rendering functions for different output formats
//! - Error types and exit codes

pub mod error;
pub mod ingest;
pub mod model;
pub mod render;
pub mod tokenizer;
