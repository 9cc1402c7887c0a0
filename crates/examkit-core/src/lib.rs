//! examkit-core: Question model, grading, persistence and ranking engine.
//!
//! This crate defines the question/exam data model, the scoring rules for each
//! question variant, the line-oriented persistence format, the append-only
//! result log, and the statistics that per-student and per-exam reports are
//! derived from.

pub mod codec;
pub mod config;
pub mod directory;
pub mod error;
pub mod grading;
pub mod model;
pub mod parser;
pub mod report;
pub mod results;
pub mod session;
pub mod statistics;
pub mod transcript;
