//! Error types for style sheet and selector parsing.
//!
//! [`CssError`] is produced when a style sheet cannot be split into rules,
//! at-rules and declarations. [`SelectorError`] is produced when a selector
//! string violates the selector grammar.

use crate::stylesheet::Position;
use thiserror::Error;

/// Errors that can occur while parsing a style sheet.
///
/// # Examples
///
/// ```rust
/// use cssom::{parse_stylesheet, CssError};
///
/// // Missing closing brace
/// let result = parse_stylesheet(".a { color: red;");
/// assert!(matches!(result, Err(CssError::Syntax { .. })));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CssError {
    /// Invalid CSS syntax was encountered.
    ///
    /// The position points at the construct that could not be parsed.
    #[error("CSS syntax error at {position}: {message}")]
    Syntax { position: Position, message: String },
}

/// The selector grammar was violated.
///
/// `offset` is the byte offset into the selector string where parsing
/// stopped making progress.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid selector at offset {offset}: {message}")]
pub struct SelectorError {
    pub offset: usize,
    pub message: String,
}

impl SelectorError {
    pub fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}
