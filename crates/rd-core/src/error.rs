//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` through a
//! `#[from]` variant where they need to surface it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `rd-core`.
pub type CoreResult<T> = Result<T, CoreError>;
