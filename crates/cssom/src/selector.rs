//! Selector syntax tree and its string form.
//!
//! The tree mirrors how selectors are written rather than how they match:
//!
//! - leaves: [`Selector::Type`], [`Selector::Class`], [`Selector::Id`], ...
//! - [`Selector::Compound`]: leaves written back to back (`a.b#c:hover`)
//! - [`Selector::Complex`]: `left <combinator> right`, left-associative
//! - [`Selector::List`]: comma-separated branches
//! - [`Selector::Relative`]: a branch with a leading combinator (`> img`),
//!   only produced by [`parse_relative_selector`](crate::parse_relative_selector)
//!
//! Rendering with [`Display`](std::fmt::Display) reproduces the parsed text,
//! except that list separators are written as a bare `,`.
//!
//! ```rust
//! use cssom::parse_selector;
//!
//! let selector = parse_selector("ul > li.item:not(.done)").unwrap();
//! assert_eq!(selector.to_string(), "ul > li.item:not(.done)");
//! ```

use std::fmt;

/// An attribute selector such as `[href]` or `[lang|="en"]`.
///
/// `value` keeps its quotes and any trailing flag (`"x" i`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub operator: Option<String>,
    pub value: Option<String>,
}

/// A pseudo-class or pseudo-element.
///
/// `argument` is the raw text between the parentheses, `None` when there
/// are no parentheses at all. `selector` holds the parsed argument for
/// pseudos that take a selector (see [`takes_selector_argument`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pseudo {
    pub name: String,
    pub argument: Option<String>,
    pub selector: Option<Box<Selector>>,
}

impl Pseudo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            argument: None,
            selector: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Type(String),
    Universal,
    /// The `&` nesting selector.
    Nesting,
    Class(String),
    Id(String),
    Attribute(Attribute),
    PseudoClass(Pseudo),
    PseudoElement(Pseudo),
    Compound(Vec<Selector>),
    Complex {
        left: Box<Selector>,
        /// Combinator text including the whitespace around it (`" > "`, `" "`).
        combinator: String,
        right: Box<Selector>,
    },
    List(Vec<Selector>),
    /// A selector anchored by a leading combinator, as in `:has(> img)` or a
    /// nested `> .child { }` rule.
    Relative {
        /// Combinator text including the whitespace after it (`"> "`).
        combinator: String,
        selector: Box<Selector>,
    },
}

impl Selector {
    pub fn class(name: impl Into<String>) -> Self {
        Selector::Class(name.into())
    }

    pub fn id(name: impl Into<String>) -> Self {
        Selector::Id(name.into())
    }

    pub fn complex(left: Selector, combinator: impl Into<String>, right: Selector) -> Self {
        Selector::Complex {
            left: Box::new(left),
            combinator: combinator.into(),
            right: Box::new(right),
        }
    }

    pub fn relative(combinator: impl Into<String>, selector: Selector) -> Self {
        Selector::Relative {
            combinator: combinator.into(),
            selector: Box::new(selector),
        }
    }

    /// The branches of a selector list, or the selector itself.
    pub fn branches(&self) -> &[Selector] {
        match self {
            Selector::List(items) => items,
            other => std::slice::from_ref(other),
        }
    }
}

/// Pseudo-classes whose argument is itself a selector.
const SELECTOR_PSEUDO_CLASSES: &[&str] = &[
    "local",
    "global",
    "not",
    "is",
    "where",
    "has",
    "matches",
    "any",
    "-webkit-any",
    "-moz-any",
    "host",
    "host-context",
];

/// Pseudo-elements whose argument is itself a selector.
const SELECTOR_PSEUDO_ELEMENTS: &[&str] = &["slotted", "cue"];

/// Returns true when the pseudo named `name` parses its argument as a selector.
///
/// Every other pseudo keeps its argument as opaque text (`nth-child(2n+1)`).
pub fn takes_selector_argument(name: &str, element: bool) -> bool {
    let name = name.to_ascii_lowercase();
    let table = if element {
        SELECTOR_PSEUDO_ELEMENTS
    } else {
        SELECTOR_PSEUDO_CLASSES
    };
    table.contains(&name.as_str())
}

/// Returns true when the pseudo's selector argument may start with a
/// combinator (`:has(> img)`).
pub fn takes_relative_argument(name: &str, element: bool) -> bool {
    !element && name.eq_ignore_ascii_case("has")
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}", self.name)?;
        if let Some(operator) = &self.operator {
            write!(f, "{operator}")?;
        }
        if let Some(value) = &self.value {
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}

fn write_pseudo(f: &mut fmt::Formatter<'_>, prefix: &str, pseudo: &Pseudo) -> fmt::Result {
    write!(f, "{prefix}{}", pseudo.name)?;
    match (&pseudo.selector, &pseudo.argument) {
        (Some(selector), _) => write!(f, "({selector})"),
        (None, Some(argument)) => write!(f, "({argument})"),
        (None, None) => Ok(()),
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Type(name) => write!(f, "{name}"),
            Selector::Universal => write!(f, "*"),
            Selector::Nesting => write!(f, "&"),
            Selector::Class(name) => write!(f, ".{name}"),
            Selector::Id(name) => write!(f, "#{name}"),
            Selector::Attribute(attribute) => write!(f, "{attribute}"),
            Selector::PseudoClass(pseudo) => write_pseudo(f, ":", pseudo),
            Selector::PseudoElement(pseudo) => write_pseudo(f, "::", pseudo),
            Selector::Compound(parts) => {
                for part in parts {
                    write!(f, "{part}")?;
                }
                Ok(())
            }
            Selector::Complex {
                left,
                combinator,
                right,
            } => write!(f, "{left}{combinator}{right}"),
            Selector::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Selector::Relative {
                combinator,
                selector,
            } => write!(f, "{combinator}{selector}"),
        }
    }
}
