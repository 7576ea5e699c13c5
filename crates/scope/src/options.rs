//! Transform configuration.
//!
//! [`ScopeOptions`] is what the transform reads. [`ScopeConfig`] is its
//! serializable counterpart for hosts that load settings from a file; it can
//! only pick one of the built-in naming strategies.

use crate::naming::{GenerateScopedName, LongScopedName, NamingStrategy};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Clone)]
pub struct ScopeOptions {
    generate_scoped_name: Arc<dyn GenerateScopedName>,
    root: Option<PathBuf>,
}

impl Default for ScopeOptions {
    fn default() -> Self {
        Self {
            generate_scoped_name: Arc::new(LongScopedName),
            root: None,
        }
    }
}

impl fmt::Debug for ScopeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeOptions")
            .field("generate_scoped_name", &"<generator>")
            .field("root", &self.root)
            .finish()
    }
}

impl ScopeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the name generator.
    pub fn with_generator(mut self, generator: impl GenerateScopedName + 'static) -> Self {
        self.generate_scoped_name = Arc::new(generator);
        self
    }

    /// Uses one of the built-in generators.
    pub fn with_strategy(mut self, strategy: NamingStrategy) -> Self {
        self.generate_scoped_name = strategy.generator();
        self
    }

    /// Makes file paths relative to `root` before they reach the generator.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn generator(&self) -> Arc<dyn GenerateScopedName> {
        Arc::clone(&self.generate_scoped_name)
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// The path handed to the generator for `file_path`.
    ///
    /// Paths under `root` are made relative to it; separators become `/`.
    pub fn generator_path(&self, file_path: &str) -> String {
        let path = Path::new(file_path);
        let relative = self
            .root
            .as_deref()
            .and_then(|root| path.strip_prefix(root).ok())
            .unwrap_or(path);
        relative.to_string_lossy().replace('\\', "/")
    }
}

/// Deserializable options.
///
/// ```rust
/// use css_scope::{NamingStrategy, ScopeConfig};
///
/// let config: ScopeConfig = serde_json::from_str(r#"{ "naming": "short" }"#).unwrap();
/// assert_eq!(config.naming, NamingStrategy::Short);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    pub naming: NamingStrategy,
    pub root: Option<PathBuf>,
}

impl From<ScopeConfig> for ScopeOptions {
    fn from(config: ScopeConfig) -> Self {
        let mut options = ScopeOptions::new().with_strategy(config.naming);
        options.root = config.root;
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_is_used_as_given_without_root() {
        let options = ScopeOptions::new();
        assert_eq!(options.generator_path("/work/app/src/a.css"), "/work/app/src/a.css");
    }

    #[test]
    fn path_is_made_relative_to_root() {
        let options = ScopeOptions::new().with_root("/work/app");
        assert_eq!(options.generator_path("/work/app/src/a.css"), "src/a.css");
        assert_eq!(options.generator_path("/elsewhere/a.css"), "/elsewhere/a.css");
    }

    #[test]
    fn config_converts_to_options() {
        let config = ScopeConfig {
            naming: NamingStrategy::Short,
            root: Some(PathBuf::from("/work")),
        };
        let options = ScopeOptions::from(config);
        assert_eq!(options.root(), Some(Path::new("/work")));
        assert_eq!(options.generator().generate("a", Some(""), 4), "_1B2M2Y4");
    }
}
