//! Messages handed back to the host.

use crate::registry::{Composition, LocalEntry};
use indexmap::IndexMap;
use serde::Serialize;

/// A structured result of one transform.
///
/// Serializes as `{"type": "export-locals", "locals": {...}}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Message {
    ExportLocals { locals: IndexMap<String, LocalEntry> },
}

impl Message {
    /// The exported locals, in the order their names were first seen.
    pub fn locals(&self) -> &IndexMap<String, LocalEntry> {
        match self {
            Message::ExportLocals { locals } => locals,
        }
    }

    /// Scoped name for `name`, if it was exported.
    pub fn local(&self, name: &str) -> Option<&str> {
        self.locals().get(name).map(LocalEntry::local)
    }

    /// Compositions recorded for `name`.
    pub fn composes(&self, name: &str) -> &[Composition] {
        self.locals()
            .get(name)
            .map(LocalEntry::composes)
            .unwrap_or_default()
    }
}
