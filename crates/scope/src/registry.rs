//! Per-run table of local identifiers.
//!
//! The registry maps every original class, id or keyframes name seen during
//! one transform to its scoped name and the compositions declared for it.
//! Entries are created lazily, in the order names are first referenced, and
//! that order is kept in the export record.

use crate::naming::GenerateScopedName;
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;

/// One `composes` reference, as stored on the composing class.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Composition {
    /// A class from the same file; `local` is its scoped name.
    Local { name: String, local: String },
    /// An unscoped name, written as `composes: name from global`.
    Global { name: String },
    /// A name exported by another style sheet, left unresolved.
    Dependency { name: String, specifier: String },
}

impl Composition {
    /// The original name being composed.
    pub fn name(&self) -> &str {
        match self {
            Composition::Local { name, .. }
            | Composition::Global { name }
            | Composition::Dependency { name, .. } => name,
        }
    }
}

/// The registry entry for one original name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LocalEntry {
    local: String,
    composes: Vec<Composition>,
}

impl LocalEntry {
    fn new(local: String) -> Self {
        Self {
            local,
            composes: Vec::new(),
        }
    }

    /// The scoped name. Assigned once, never changed.
    pub fn local(&self) -> &str {
        &self.local
    }

    /// Compositions in declaration order.
    pub fn composes(&self) -> &[Composition] {
        &self.composes
    }
}

/// Insertion-ordered map from original name to [`LocalEntry`].
pub struct Registry {
    entries: IndexMap<String, LocalEntry>,
    generator: Arc<dyn GenerateScopedName>,
    file_path: Option<String>,
    next_index: usize,
}

impl Registry {
    /// Creates an empty registry for one style sheet.
    ///
    /// `file_path` is passed to the generator untouched.
    pub fn new(generator: Arc<dyn GenerateScopedName>, file_path: Option<String>) -> Self {
        Self {
            entries: IndexMap::new(),
            generator,
            file_path,
            next_index: 0,
        }
    }

    /// Returns the entry for `name`, creating it on first use.
    ///
    /// A new entry takes its scoped name from the generator, called with the
    /// current ordinal index, which is then incremented. Calling this again
    /// with the same name returns the same entry.
    pub fn retrieve_local(&mut self, name: &str) -> &LocalEntry {
        self.entry_mut(name)
    }

    fn entry_mut(&mut self, name: &str) -> &mut LocalEntry {
        if !self.entries.contains_key(name) {
            let local = self
                .generator
                .generate(name, self.file_path.as_deref(), self.next_index);
            log::debug!("scoped `{}` as `{}` (index {})", name, local, self.next_index);
            self.next_index += 1;
            self.entries.insert(name.to_string(), LocalEntry::new(local));
        }
        &mut self.entries[name]
    }

    /// Appends `composition` to the entry for `name`, creating the entry if
    /// needed.
    pub fn add_composition(&mut self, name: &str, composition: Composition) {
        self.entry_mut(name).composes.push(composition);
    }

    pub fn get(&self, name: &str) -> Option<&LocalEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LocalEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Consumes the registry, yielding its entries in insertion order.
    pub fn into_locals(self) -> IndexMap<String, LocalEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_registry() -> Registry {
        let generator = |name: &str, _path: Option<&str>, index: usize| format!("{name}-{index}");
        Registry::new(Arc::new(generator), None)
    }

    #[test]
    fn retrieve_local_is_idempotent() {
        let mut registry = counting_registry();
        let first = registry.retrieve_local("a").local().to_string();
        let again = registry.retrieve_local("a").local().to_string();
        assert_eq!(first, "a-0");
        assert_eq!(again, first);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("a"));
        assert!(!registry.contains("b"));
    }

    #[test]
    fn ordinal_index_increments_per_new_name() {
        let mut registry = counting_registry();
        registry.retrieve_local("a");
        registry.retrieve_local("b");
        registry.retrieve_local("a");
        registry.retrieve_local("c");
        let locals: Vec<_> = registry.iter().map(|(_, e)| e.local().to_string()).collect();
        assert_eq!(locals, vec!["a-0", "b-1", "c-2"]);
    }

    #[test]
    fn compositions_survive_later_lookups() {
        let mut registry = counting_registry();
        registry.add_composition("a", Composition::Global { name: "g".into() });
        registry.retrieve_local("a");
        registry.add_composition(
            "a",
            Composition::Dependency {
                name: "d".into(),
                specifier: "./d.css".into(),
            },
        );

        let entry = registry.get("a").unwrap();
        assert_eq!(entry.local(), "a-0");
        let names: Vec<_> = entry.composes().iter().map(Composition::name).collect();
        assert_eq!(names, vec!["g", "d"]);
    }
}
