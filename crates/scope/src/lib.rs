//! # css-scope - local names for CSS modules
//!
//! Rewrites a [`cssom::StyleSheet`] so that its class names, ids and
//! keyframes names are unique to the file they come from, and records which
//! classes compose which.
//!
//! ```rust
//! use css_scope::{ScopeOptions, ScopeTransform};
//!
//! let mut sheet = cssom::parse_stylesheet(
//!     ".title { composes: base; color: red; } :global(.app) .base {}",
//! )
//! .unwrap();
//!
//! let transform = ScopeTransform::new(ScopeOptions::default());
//! let mut messages = Vec::new();
//! transform.run(&mut sheet, Some("src/app.css"), &mut messages).unwrap();
//!
//! let exports = &messages[0];
//! assert_eq!(exports.local("title"), Some("title_WjnDF4"));
//! assert_eq!(exports.composes("title").len(), 1);
//! assert!(sheet.to_css().contains(".app .base_WjnDF4"));
//! ```
//!
//! ## Scoping rules
//!
//! - `.name` and `#name` become `.<scoped>` and `#<scoped>`
//! - `:local(X)` is replaced by `X`, scoped as usual
//! - `:global(X)` is replaced by `X`, left unscoped
//! - `@keyframes name` and matching `animation` / `animation-name` values
//!   are scoped
//! - `composes: a`, `composes: a from global` and
//!   `composes: a from "./file.css"` are recorded and removed
//!
//! ## Modules
//!
//! - [`naming`]: scoped name generators
//! - [`registry`]: per-run table of local names and compositions
//! - [`composes`]: `composes` value grammar
//! - [`transform`]: the scoping pass
//! - [`options`]: configuration
//! - [`exports`]: the export record

pub mod composes;
pub mod error;
pub mod exports;
pub mod naming;
pub mod options;
pub mod registry;
pub mod transform;

pub use error::{Location, ScopeError};
pub use exports::Message;
pub use naming::{GenerateScopedName, LongScopedName, NamingStrategy, ShortScopedName};
pub use options::{ScopeConfig, ScopeOptions};
pub use registry::{Composition, LocalEntry, Registry};
pub use transform::ScopeTransform;
