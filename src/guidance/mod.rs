//! Exam guidance: keyword tables, the matcher and the two-panel result view.

pub mod matcher;
pub mod tables;
pub mod types;
pub mod view;

pub use matcher::analyze;
pub use tables::*;
pub use types::*;
pub use view::*;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Cannot read exam tables at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Exam tables are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Exam tables rejected: {0}")]
    Invalid(String),
}
