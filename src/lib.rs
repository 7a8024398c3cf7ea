//! Fronter Import - Convert legacy quiz exports to normalized questions.
//!
//! This crate parses the QTI-like XML exported by Blackboard V5/V6
//! ("Fronter") quiz tools and converts each item into a normalized question
//! record ready for YAML output.
//!
//! # Example
//!
//! ```
//! use fronter_import::import_questions;
//!
//! let report = import_questions("<questestinterop/>");
//! assert!(report.questions.is_empty());
//! assert!(report.diagnostics.is_empty());
//! ```
//!
//! # Architecture
//!
//! The importer is organized into several modules:
//!
//! - [`config`]: Configuration constants
//! - [`error`]: Error types and Result alias
//! - [`tree`]: XML document tree
//! - [`path`]: Total path navigation over the tree
//! - [`block`]: Recursive text and ident extraction
//! - [`classify`]: Heuristic question-type classification
//! - [`raw`]: Per-item raw record assembly
//! - [`text`]: Text cleaning and name generation
//! - [`grade`]: Grade-fraction matching
//! - [`cloze`]: Embedded-answer text parsing
//! - [`question`]: Output question records
//! - [`assemble`]: Per-archetype question finalization
//! - [`diagnostics`]: Import diagnostics
//! - [`import`]: Top-level pipeline
//! - [`output`]: YAML generation and file output
//! - [`cli`]: Command-line interface

pub mod assemble;
pub mod block;
pub mod classify;
pub mod cli;
pub mod cloze;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod grade;
pub mod import;
pub mod output;
pub mod path;
pub mod question;
pub mod raw;
pub mod text;
pub mod tree;

// Re-export main functions
pub use import::{import_questions, ImportReport};

// Re-export commonly used items
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use error::{ImportError, Result};
pub use question::Question;
