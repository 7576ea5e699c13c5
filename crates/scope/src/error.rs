//! Errors raised while scoping a style sheet.
//!
//! Every error is fatal to the transform that raised it. Each one carries a
//! [`Location`] so the caller can point at the offending CSS.

use cssom::{Position, SelectorError};
use std::fmt;
use thiserror::Error;

/// Where an error happened: the node's source position, if known, and the
/// text of the offending declaration or selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub position: Option<Position>,
    pub fragment: String,
}

impl Location {
    pub fn new(position: Option<Position>, fragment: impl Into<String>) -> Self {
        Self {
            position,
            fragment: fragment.into(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "`{}` at {}", self.fragment, position),
            None => write!(f, "`{}`", self.fragment),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScopeError {
    /// `composes` used inside a rule nested in another rule or an at-rule.
    #[error("composition is not allowed in nested rules: {0}")]
    NestedRule(Location),

    /// `composes` used in a rule whose selector is not a list of single
    /// class or id selectors.
    #[error("composition is only allowed when the selector is a single class or id name: {0}")]
    ComplexSelector(Location),

    /// The `composes` value does not match `name [from global | from "path"]`.
    #[error("invalid composes value: {0}")]
    InvalidComposes(Location),

    /// A rule's selector could not be parsed.
    #[error("{source} in {location}")]
    SelectorParse {
        location: Location,
        #[source]
        source: SelectorError,
    },

    /// `:local(...)` or `:global(...)` without exactly one selector argument.
    #[error(":{pseudo}(...) expected a single selector as argument: {location}")]
    InvalidScopePseudo { pseudo: String, location: Location },
}

impl ScopeError {
    /// The location attached to this error.
    pub fn location(&self) -> &Location {
        match self {
            ScopeError::NestedRule(location)
            | ScopeError::ComplexSelector(location)
            | ScopeError::InvalidComposes(location) => location,
            ScopeError::SelectorParse { location, .. }
            | ScopeError::InvalidScopePseudo { location, .. } => location,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScopeError>;
