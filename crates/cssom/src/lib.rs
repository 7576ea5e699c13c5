//! # cssom - CSS object model
//!
//! A small, mutable model of a CSS style sheet plus a selector syntax tree,
//! meant for source-to-source transforms that rename things in place.
//!
//! - **Parsing**: [`parse_stylesheet`] turns CSS text into a [`StyleSheet`]
//!   whose nodes remember their source [`Position`]
//! - **Selectors**: [`parse_selector`] turns selector text into a
//!   [`Selector`] tree; `Display` turns it back into text
//! - **Printing**: [`StyleSheet::to_css`] renders the (possibly rewritten) tree
//!
//! ## Quick Start
//!
//! ```rust
//! use cssom::{parse_selector, parse_stylesheet, Node, Selector};
//!
//! let mut sheet = parse_stylesheet(".title { color: red; }").unwrap();
//! let Node::Rule(rule) = &mut sheet.nodes[0] else { unreachable!() };
//!
//! let mut selector = parse_selector(&rule.selector).unwrap();
//! if let Selector::Compound(parts) = &mut selector {
//!     parts[0] = Selector::class("title_x1");
//! }
//! rule.selector = selector.to_string();
//!
//! assert_eq!(sheet.to_css(), ".title_x1 {\n  color: red;\n}\n");
//! ```
//!
//! ## Selector Support
//!
//! - Type, universal (`*`) and nesting (`&`) selectors
//! - Class (`.name`) and ID (`#name`) selectors, with `\` escapes
//! - Attribute selectors: `[attr]`, `[attr=value]`, `[attr~="v" i]`
//! - Pseudo-classes and pseudo-elements, with opaque (`:nth-child(2n+1)`)
//!   or selector (`:not(.a)`, `:global(.b)`) arguments
//! - Combinators: descendant, `>`, `+`, `~`
//! - Relative selectors (`> img`) via [`parse_relative_selector`], also used
//!   for the argument of `:has(...)`
//! - Selector lists: `.a, .b`

pub mod error;
pub mod parser;
pub mod selector;
pub mod stylesheet;

pub use error::{CssError, SelectorError};
pub use parser::parse_stylesheet;
pub use parser::selectors::{parse_relative_selector, parse_selector};
pub use selector::{Attribute, Pseudo, Selector};
pub use stylesheet::{AtRule, Comment, Declaration, Node, Position, Rule, StyleSheet};
