//! Scoped name generation.
//!
//! A generator maps `(original name, source file path, ordinal index)` to the
//! name written into the output. Two strategies are built in, both keyed on
//! the first six characters of `base64url(md5(path))`:
//!
//! | Strategy | `foo` in `src/app.css`, index 3 |
//! |---|---|
//! | [`LongScopedName`] | `foo_<digest6>` |
//! | [`ShortScopedName`] | `<digest6>3` |
//!
//! The short form is prefixed with `_` unless the digest starts with a letter.
//!
//! Any `Fn(&str, Option<&str>, usize) -> String` is a generator too.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

const DIGEST_LEN: usize = 6;

/// Produces the scoped replacement for an identifier.
///
/// `index` is a per-run counter supplied by the caller, increasing by one for
/// every distinct name. Implementations must not keep their own state.
pub trait GenerateScopedName: Send + Sync {
    fn generate(&self, name: &str, file_path: Option<&str>, index: usize) -> String;
}

impl<F> GenerateScopedName for F
where
    F: Fn(&str, Option<&str>, usize) -> String + Send + Sync,
{
    fn generate(&self, name: &str, file_path: Option<&str>, index: usize) -> String {
        self(name, file_path, index)
    }
}

/// `base64url(md5(path))` without padding. A missing path hashes as `""`.
pub fn path_digest(file_path: Option<&str>) -> String {
    let digest = md5::compute(file_path.unwrap_or_default().as_bytes());
    URL_SAFE_NO_PAD.encode(digest.0)
}

/// `<name>_<digest6>`. Ignores the index, so names are stable across runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct LongScopedName;

impl GenerateScopedName for LongScopedName {
    fn generate(&self, name: &str, file_path: Option<&str>, _index: usize) -> String {
        let digest = path_digest(file_path);
        format!("{name}_{}", &digest[..DIGEST_LEN])
    }
}

/// `<digest6><index>`, with a leading `_` when the digest does not start
/// with an ASCII letter.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShortScopedName;

impl GenerateScopedName for ShortScopedName {
    fn generate(&self, _name: &str, file_path: Option<&str>, index: usize) -> String {
        let digest = path_digest(file_path);
        let digest = &digest[..DIGEST_LEN];
        let prefix = if digest.starts_with(|c: char| c.is_ascii_alphabetic()) {
            ""
        } else {
            "_"
        };
        format!("{prefix}{digest}{index}")
    }
}

/// Built-in strategies, selectable by name from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingStrategy {
    #[default]
    Long,
    Short,
}

impl NamingStrategy {
    pub fn generator(self) -> Arc<dyn GenerateScopedName> {
        match self {
            NamingStrategy::Long => Arc::new(LongScopedName),
            NamingStrategy::Short => Arc::new(ShortScopedName),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown naming strategy `{0}`, expected `long` or `short`")]
pub struct UnknownStrategy(pub String);

impl FromStr for NamingStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "long" => Ok(NamingStrategy::Long),
            "short" => Ok(NamingStrategy::Short),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for NamingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingStrategy::Long => write!(f, "long"),
            NamingStrategy::Short => write!(f, "short"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_of_missing_path_is_digest_of_empty_string() {
        assert_eq!(path_digest(None), path_digest(Some("")));
        assert_eq!(path_digest(None), "1B2M2Y8AsgTpgAmY7PhCfg");
    }

    #[test]
    fn strategy_from_str() {
        assert_eq!("long".parse::<NamingStrategy>(), Ok(NamingStrategy::Long));
        assert_eq!(" Short ".parse::<NamingStrategy>(), Ok(NamingStrategy::Short));
        assert!("medium".parse::<NamingStrategy>().is_err());
        assert_eq!(NamingStrategy::Short.to_string(), "short");
    }
}
