//! Style sheet and selector parsing.
//!
//! - [`parse_stylesheet`]: splits CSS text into rules, at-rules, declarations
//!   and comments, recording a [`Position`] for every node
//! - [`selectors`]: selector grammar producing a [`Selector`](crate::Selector) tree
//! - [`values`]: identifiers and balanced scanning shared by both
//!
//! ## Example
//!
//! ```rust
//! use cssom::{parse_stylesheet, Node};
//!
//! let sheet = parse_stylesheet(".a { color: red; }").unwrap();
//! let Node::Rule(rule) = &sheet.nodes[0] else { panic!() };
//! assert_eq!(rule.selector, ".a");
//! assert_eq!(rule.declarations().count(), 1);
//! ```

pub mod selectors;
pub mod values;

use crate::error::CssError;
use crate::parser::values::{find_unnested, parse_ident};
use crate::stylesheet::{AtRule, Comment, Declaration, Node, Position, Rule, StyleSheet};

use nom::{
    IResult,
    bytes::complete::{tag, take_until},
    character::complete::{char, multispace0},
    sequence::{delimited, preceded},
};

/// Parses a full style sheet.
pub fn parse_stylesheet(source: &str) -> Result<StyleSheet, CssError> {
    let parser = SheetParser { source };
    let (_, nodes) = parser.parse_nodes(source, true)?;
    Ok(StyleSheet::new(nodes))
}

struct SheetParser<'s> {
    source: &'s str,
}

/// Parses a comment (e.g., "/* note */") and returns its inner text.
fn parse_comment(input: &str) -> IResult<&str, &str> {
    delimited(tag("/*"), take_until("*/"), tag("*/"))(input)
}

/// Parses an at-rule name (e.g., "@media").
fn parse_at_keyword(input: &str) -> IResult<&str, &str> {
    preceded(char('@'), parse_ident)(input)
}

fn skip_ws(input: &str) -> &str {
    multispace0::<&str, nom::error::Error<&str>>(input)
        .map(|(rest, _)| rest)
        .unwrap_or(input)
}

impl<'s> SheetParser<'s> {
    fn position(&self, at: &str) -> Position {
        Position::from_offset(self.source, self.source.len() - at.len())
    }

    fn error(&self, at: &str, message: impl Into<String>) -> CssError {
        CssError::Syntax {
            position: self.position(at),
            message: message.into(),
        }
    }

    /// Finds the first `{`, `;` or `}` that ends the construct at `input`.
    fn find_terminator(&self, input: &'s str) -> Result<Option<usize>, CssError> {
        find_unnested(input, &['{', ';', '}'])
            .map_err(|at| self.error(&input[at..], "unbalanced brackets or unterminated string"))
    }

    /// Parses nodes until the end of input (top level) or a closing `}`
    /// (inside a block). The closing brace is left for the caller.
    fn parse_nodes(
        &self,
        mut input: &'s str,
        top_level: bool,
    ) -> Result<(&'s str, Vec<Node>), CssError> {
        let mut nodes = Vec::new();

        loop {
            input = skip_ws(input);

            if input.is_empty() {
                if top_level {
                    return Ok((input, nodes));
                }
                return Err(self.error(input, "unexpected end of input, expected `}`"));
            }

            if input.starts_with('}') {
                if top_level {
                    return Err(self.error(input, "unexpected `}`"));
                }
                return Ok((input, nodes));
            }

            if let Some(rest) = input.strip_prefix(';') {
                input = rest;
                continue;
            }

            let (rest, node) = if input.starts_with("/*") {
                self.parse_comment_node(input)?
            } else if input.starts_with('@') {
                self.parse_at_rule(input)?
            } else {
                self.parse_rule_or_declaration(input, top_level)?
            };
            nodes.push(node);
            input = rest;
        }
    }

    fn parse_comment_node(&self, input: &'s str) -> Result<(&'s str, Node), CssError> {
        let (rest, text) =
            parse_comment(input).map_err(|_| self.error(input, "unterminated comment"))?;
        Ok((
            rest,
            Node::Comment(Comment {
                text: text.to_string(),
                position: Some(self.position(input)),
            }),
        ))
    }

    fn parse_block(&self, open: &'s str) -> Result<(&'s str, Vec<Node>), CssError> {
        let (rest, nodes) = self.parse_nodes(&open[1..], false)?;
        // parse_nodes only returns inside a block when it sees `}`
        Ok((&rest[1..], nodes))
    }

    fn parse_at_rule(&self, input: &'s str) -> Result<(&'s str, Node), CssError> {
        let (after_name, name) = parse_at_keyword(input)
            .map_err(|_| self.error(input, "expected at-rule name after `@`"))?;
        let end = self.find_terminator(after_name)?;

        let mut at_rule = AtRule::new(name, "", None);
        at_rule.position = Some(self.position(input));

        let rest = match end {
            Some(i) if after_name[i..].starts_with('{') => {
                at_rule.params = after_name[..i].trim().to_string();
                let (rest, nodes) = self.parse_block(&after_name[i..])?;
                at_rule.nodes = Some(nodes);
                rest
            }
            Some(i) if after_name[i..].starts_with(';') => {
                at_rule.params = after_name[..i].trim().to_string();
                &after_name[i + 1..]
            }
            Some(i) => {
                at_rule.params = after_name[..i].trim().to_string();
                &after_name[i..]
            }
            None => {
                at_rule.params = after_name.trim().to_string();
                ""
            }
        };

        Ok((rest, Node::AtRule(at_rule)))
    }

    fn parse_rule_or_declaration(
        &self,
        input: &'s str,
        top_level: bool,
    ) -> Result<(&'s str, Node), CssError> {
        let end = self.find_terminator(input)?;
        match end {
            Some(i) if input[i..].starts_with('{') => self.parse_rule(input, i),
            _ if top_level => Err(self.error(input, "expected `{` after selector")),
            _ => self.parse_declaration(input, end.unwrap_or(input.len())),
        }
    }

    fn parse_rule(&self, input: &'s str, brace: usize) -> Result<(&'s str, Node), CssError> {
        let selector = input[..brace].trim();
        if selector.is_empty() {
            return Err(self.error(input, "expected a selector before `{`"));
        }

        let (rest, nodes) = self.parse_block(&input[brace..])?;
        let mut rule = Rule::new(selector, nodes);
        rule.position = Some(self.position(input));
        Ok((rest, Node::Rule(rule)))
    }

    fn parse_declaration(&self, input: &'s str, end: usize) -> Result<(&'s str, Node), CssError> {
        let text = &input[..end];
        let Some(colon) = text.find(':') else {
            return Err(self.error(input, "expected `:` in declaration"));
        };

        let property = text[..colon].trim();
        match parse_ident(property) {
            Ok(("", _)) => {}
            _ => return Err(self.error(input, format!("invalid property name `{property}`"))),
        }

        let mut value = text[colon + 1..].trim();
        let mut important = false;
        if let Some(bang) = value.rfind('!') {
            if value[bang + 1..].trim().eq_ignore_ascii_case("important") {
                value = value[..bang].trim_end();
                important = true;
            }
        }

        let mut decl = Declaration::new(property, value);
        decl.important = important;
        decl.position = Some(self.position(input));

        let rest = &input[end..];
        let rest = rest.strip_prefix(';').unwrap_or(rest);
        Ok((rest, Node::Declaration(decl)))
    }
}
