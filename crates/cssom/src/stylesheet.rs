//! Style sheet tree.
//!
//! A [`StyleSheet`] is an ordered list of [`Node`]s. Rules and at-rules own
//! their children, so the tree can be rewritten in place by whoever holds a
//! `&mut StyleSheet`. Nodes produced by the parser remember where they started
//! in the source text; nodes built by hand carry no position.

use std::fmt;

/// A location in the source text.
///
/// `line` and `column` are 1-based, `column` counts characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Computes the position of byte `offset` within `source`.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A style rule: `selector { ... }`.
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub selector: String,
    pub nodes: Vec<Node>,
    pub position: Option<Position>,
}

impl Rule {
    pub fn new(selector: impl Into<String>, nodes: Vec<Node>) -> Self {
        Self {
            selector: selector.into(),
            nodes,
            position: None,
        }
    }

    /// Declarations directly inside this rule, in source order.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.nodes.iter().filter_map(Node::as_declaration)
    }
}

/// An at-rule: `@name params;` or `@name params { ... }`.
#[derive(Clone, Debug, PartialEq)]
pub struct AtRule {
    pub name: String,
    pub params: String,
    /// `None` for statement at-rules such as `@import`.
    pub nodes: Option<Vec<Node>>,
    pub position: Option<Position>,
}

impl AtRule {
    pub fn new(
        name: impl Into<String>,
        params: impl Into<String>,
        nodes: Option<Vec<Node>>,
    ) -> Self {
        Self {
            name: name.into(),
            params: params.into(),
            nodes,
            position: None,
        }
    }

    /// True for `@keyframes` and its vendor-prefixed spellings.
    pub fn is_keyframes(&self) -> bool {
        let name = self.name.to_ascii_lowercase();
        name == "keyframes"
            || name
                .strip_prefix('-')
                .and_then(|rest| rest.split_once('-'))
                .is_some_and(|(_, rest)| rest == "keyframes")
    }
}

/// A property declaration: `property: value`.
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub important: bool,
    pub position: Option<Position>,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            important: false,
            position: None,
        }
    }
}

/// A block comment. `text` excludes the `/*` and `*/` delimiters.
#[derive(Clone, Debug, PartialEq)]
pub struct Comment {
    pub text: String,
    pub position: Option<Position>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Rule(Rule),
    AtRule(AtRule),
    Declaration(Declaration),
    Comment(Comment),
}

impl Node {
    pub fn as_rule(&self) -> Option<&Rule> {
        match self {
            Node::Rule(rule) => Some(rule),
            _ => None,
        }
    }

    pub fn as_at_rule(&self) -> Option<&AtRule> {
        match self {
            Node::AtRule(at_rule) => Some(at_rule),
            _ => None,
        }
    }

    pub fn as_declaration(&self) -> Option<&Declaration> {
        match self {
            Node::Declaration(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            Node::Rule(rule) => rule.position,
            Node::AtRule(at_rule) => at_rule.position,
            Node::Declaration(decl) => decl.position,
            Node::Comment(comment) => comment.position,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleSheet {
    pub nodes: Vec<Node>,
}

impl StyleSheet {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Prints the tree back to CSS text.
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StyleSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_nodes(f, &self.nodes, 0)
    }
}

fn write_nodes(f: &mut fmt::Formatter<'_>, nodes: &[Node], depth: usize) -> fmt::Result {
    for node in nodes {
        write_node(f, node, depth)?;
    }
    Ok(())
}

fn write_block(f: &mut fmt::Formatter<'_>, nodes: &[Node], depth: usize) -> fmt::Result {
    if nodes.is_empty() {
        return writeln!(f, " {{}}");
    }
    writeln!(f, " {{")?;
    write_nodes(f, nodes, depth + 1)?;
    writeln!(f, "{}}}", indent(depth))
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node, depth: usize) -> fmt::Result {
    let pad = indent(depth);
    match node {
        Node::Rule(rule) => {
            write!(f, "{pad}{}", rule.selector)?;
            write_block(f, &rule.nodes, depth)
        }
        Node::AtRule(at_rule) => {
            write!(f, "{pad}@{}", at_rule.name)?;
            if !at_rule.params.is_empty() {
                write!(f, " {}", at_rule.params)?;
            }
            match &at_rule.nodes {
                Some(nodes) => write_block(f, nodes, depth),
                None => writeln!(f, ";"),
            }
        }
        Node::Declaration(decl) => {
            write!(f, "{pad}{}: {}", decl.property, decl.value)?;
            if decl.important {
                write!(f, " !important")?;
            }
            writeln!(f, ";")
        }
        Node::Comment(comment) => writeln!(f, "{pad}/*{}*/", comment.text),
    }
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_counts_lines_and_columns() {
        let source = ".a {\n  color: red;\n}";
        let pos = Position::from_offset(source, source.find("color").unwrap());
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 3);
        assert_eq!(pos.to_string(), "2:3");
    }

    #[test]
    fn keyframes_detection_accepts_vendor_prefixes() {
        assert!(AtRule::new("keyframes", "spin", Some(vec![])).is_keyframes());
        assert!(AtRule::new("-webkit-keyframes", "spin", Some(vec![])).is_keyframes());
        assert!(AtRule::new("-moz-keyframes", "spin", Some(vec![])).is_keyframes());
        assert!(!AtRule::new("media", "screen", Some(vec![])).is_keyframes());
        assert!(!AtRule::new("-webkit-keyframe", "spin", Some(vec![])).is_keyframes());
    }

    #[test]
    fn printer_formats_nested_blocks() {
        let sheet = StyleSheet::new(vec![
            Node::AtRule(AtRule::new("import", "\"x.css\"", None)),
            Node::AtRule(AtRule::new(
                "media",
                "screen",
                Some(vec![Node::Rule(Rule::new(
                    ".a",
                    vec![Node::Declaration(Declaration::new("color", "red"))],
                ))]),
            )),
            Node::Rule(Rule::new(".b", vec![])),
        ]);

        assert_eq!(
            sheet.to_css(),
            "@import \"x.css\";\n@media screen {\n  .a {\n    color: red;\n  }\n}\n.b {}\n"
        );
    }
}
