use crate::error::SelectorError;
use crate::parser::values::{find_unnested, parse_ident, parse_parenthesized};
use crate::selector::{
    Attribute, Pseudo, Selector, takes_relative_argument, takes_selector_argument,
};
use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, multispace0},
    combinator::map,
    error::{ErrorKind, ParseError},
    multi::many1,
    sequence::preceded,
};

/// Error carried through the selector combinators.
///
/// `input` is the remaining text at the failure point, which lets the
/// top-level parser turn it back into an offset.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseFailure<'a> {
    pub input: &'a str,
    pub message: String,
}

impl<'a> ParseFailure<'a> {
    fn new(input: &'a str, message: impl Into<String>) -> Self {
        Self {
            input,
            message: message.into(),
        }
    }
}

impl<'a> ParseError<&'a str> for ParseFailure<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        Self::new(input, format!("unexpected input ({kind:?})"))
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

type PResult<'a, T> = IResult<&'a str, T, ParseFailure<'a>>;

/// Upgrades a recoverable error into a failure with a better message.
fn cut<'a>(
    err: nom::Err<ParseFailure<'a>>,
    at: &'a str,
    message: &str,
) -> nom::Err<ParseFailure<'a>> {
    match err {
        nom::Err::Error(_) => nom::Err::Failure(ParseFailure::new(at, message)),
        other => other,
    }
}

fn ws(input: &str) -> PResult<'_, &str> {
    multispace0(input)
}

fn ident(input: &str) -> PResult<'_, &str> {
    parse_ident(input)
        .map_err(|_| nom::Err::Error(ParseFailure::new(input, "expected an identifier")))
}

/// Byte offset of `part` within `source`. `part` must be a subslice of `source`.
fn offset_in(source: &str, part: &str) -> usize {
    let offset = (part.as_ptr() as usize).saturating_sub(source.as_ptr() as usize);
    offset.min(source.len())
}

/// Parses a complete selector string.
///
/// Returns a [`Selector::List`] for comma-separated input, otherwise the
/// single compound or complex selector.
///
/// ```rust
/// use cssom::{parse_selector, Selector};
///
/// let selector = parse_selector(".a, .b").unwrap();
/// assert!(matches!(selector, Selector::List(ref items) if items.len() == 2));
///
/// assert!(parse_selector(".a >").is_err());
/// ```
pub fn parse_selector(source: &str) -> Result<Selector, SelectorError> {
    parse_complete(source, false)
}

/// Parses a selector whose branches may start with a combinator, as in a
/// nested `> .child` rule or the argument of `:has(...)`.
///
/// ```rust
/// use cssom::{parse_relative_selector, parse_selector};
///
/// let selector = parse_relative_selector("> img, + p").unwrap();
/// assert_eq!(selector.to_string(), "> img,+ p");
///
/// assert!(parse_selector("> img").is_err());
/// ```
pub fn parse_relative_selector(source: &str) -> Result<Selector, SelectorError> {
    parse_complete(source, true)
}

fn parse_complete(source: &str, relative: bool) -> Result<Selector, SelectorError> {
    let input = source.trim_start();
    if input.trim_end().is_empty() {
        return Err(SelectorError::new(source.len(), "expected a selector"));
    }

    match selector_list(input, relative) {
        Ok((rest, selector)) => {
            let rest = rest.trim_start();
            if rest.is_empty() {
                Ok(selector)
            } else {
                Err(SelectorError::new(
                    offset_in(source, rest),
                    format!("unexpected `{}`", rest.chars().next().unwrap_or_default()),
                ))
            }
        }
        Err(nom::Err::Error(failure)) | Err(nom::Err::Failure(failure)) => {
            Err(SelectorError::new(offset_in(source, failure.input), failure.message))
        }
        Err(nom::Err::Incomplete(_)) => {
            Err(SelectorError::new(source.len(), "incomplete selector"))
        }
    }
}

/// Parses a comma-separated list of selectors (e.g., ".a, .b > .c").
///
/// With `relative` set, each branch may start with a combinator.
pub fn selector_list(input: &str, relative: bool) -> PResult<'_, Selector> {
    let (mut input, first) =
        branch(input, relative).map_err(|e| cut(e, input, "expected a selector"))?;
    let mut items = vec![first];

    loop {
        let (rest, _) = ws(input)?;
        let Some(after_comma) = rest.strip_prefix(',') else {
            break;
        };
        let (after_ws, _) = ws(after_comma)?;
        let (next, item) = branch(after_ws, relative)
            .map_err(|e| cut(e, after_ws, "expected a selector after `,`"))?;
        items.push(item);
        input = next;
    }

    if items.len() == 1 {
        Ok((input, items.remove(0)))
    } else {
        Ok((input, Selector::List(items)))
    }
}

fn branch(input: &str, relative: bool) -> PResult<'_, Selector> {
    if relative {
        relative_selector(input)
    } else {
        complex_selector(input)
    }
}

fn combinator(input: &str) -> PResult<'_, char> {
    alt((char('>'), char('+'), char('~')))(input)
}

/// Parses a complex selector with an optional leading combinator
/// (e.g., "> img", "+ p.note").
pub fn relative_selector(input: &str) -> PResult<'_, Selector> {
    let Ok((after_op, _)) = combinator(input) else {
        return complex_selector(input);
    };
    let (after_ws, _) = ws(after_op)?;
    let (rest, selector) = complex_selector(after_ws)
        .map_err(|e| cut(e, after_ws, "expected a selector after combinator"))?;
    let text = &input[..input.len() - after_ws.len()];
    Ok((rest, Selector::relative(text, selector)))
}

/// Parses a complex selector with combinators (e.g., "nav > ul li").
///
/// The combinator text, including surrounding whitespace, is kept verbatim.
pub fn complex_selector(input: &str) -> PResult<'_, Selector> {
    let (mut input, mut current) = compound_selector(input)?;

    loop {
        let (rem, _) = ws(input)?;

        // Explicit combinator: >, + or ~
        if let Ok((after_op, _)) = combinator(rem) {
            let (after_ws, _) = ws(after_op)?;
            let (next, right) = compound_selector(after_ws)
                .map_err(|e| cut(e, after_ws, "expected a selector after combinator"))?;
            let combinator = &input[..input.len() - after_ws.len()];
            current = Selector::complex(current, combinator, right);
            input = next;
            continue;
        }

        // Descendant combinator: whitespace followed by another compound
        if rem.len() != input.len() {
            match compound_selector(rem) {
                Ok((next, right)) => {
                    let combinator = &input[..input.len() - rem.len()];
                    current = Selector::complex(current, combinator, right);
                    input = next;
                    continue;
                }
                Err(nom::Err::Error(_)) => break,
                Err(e) => return Err(e),
            }
        }

        break;
    }

    Ok((input, current))
}

/// Parses a compound selector (e.g., "a.link#home:hover").
pub fn compound_selector(input: &str) -> PResult<'_, Selector> {
    map(many1(simple_selector), Selector::Compound)(input)
}

/// Parses one simple selector: type, `*`, `&`, `.class`, `#id`,
/// `[attribute]`, `:pseudo-class` or `::pseudo-element`.
pub fn simple_selector(input: &str) -> PResult<'_, Selector> {
    alt((
        map(preceded(char('#'), ident), |s| Selector::Id(s.to_string())),
        map(preceded(char('.'), ident), |s| Selector::Class(s.to_string())),
        map(preceded(tag("::"), pseudo_element), Selector::PseudoElement),
        map(preceded(char(':'), pseudo_class), Selector::PseudoClass),
        attribute_selector,
        map(char('*'), |_| Selector::Universal),
        map(char('&'), |_| Selector::Nesting),
        map(ident, |s| Selector::Type(s.to_string())),
    ))(input)
}

fn pseudo_element(input: &str) -> PResult<'_, Pseudo> {
    pseudo(input, true)
}

fn pseudo_class(input: &str) -> PResult<'_, Pseudo> {
    pseudo(input, false)
}

fn pseudo(input: &str, element: bool) -> PResult<'_, Pseudo> {
    let (input, name) = ident(input)?;
    let Some(after_open) = input.strip_prefix('(') else {
        return Ok((input, Pseudo::new(name)));
    };

    let (rest, argument) = parse_parenthesized(after_open)
        .map_err(|_| nom::Err::Failure(ParseFailure::new(input, "unbalanced parentheses")))?;

    let selector = if takes_selector_argument(name, element) && !argument.trim().is_empty() {
        let relative = takes_relative_argument(name, element);
        let nested = parse_complete(argument, relative).map_err(|e| {
            let at = &argument[e.offset.min(argument.len())..];
            nom::Err::Failure(ParseFailure::new(at, e.message))
        })?;
        Some(Box::new(nested))
    } else {
        None
    };

    Ok((
        rest,
        Pseudo {
            name: name.to_string(),
            argument: Some(argument.to_string()),
            selector,
        },
    ))
}

fn attribute_selector(input: &str) -> PResult<'_, Selector> {
    let (after_open, _) = char('[')(input)?;
    let close = match find_unnested(after_open, &[']']) {
        Ok(Some(close)) => close,
        _ => {
            return Err(nom::Err::Failure(ParseFailure::new(
                input,
                "unterminated attribute selector",
            )));
        }
    };
    let content = &after_open[..close];
    let rest = &after_open[close + 1..];

    let attribute = match content.find('=') {
        Some(eq) => {
            let op_start = match content[..eq].chars().last() {
                Some('~' | '|' | '^' | '$' | '*') => eq - 1,
                _ => eq,
            };
            let name = content[..op_start].trim();
            let value = content[eq + 1..].trim();
            if name.is_empty() || value.is_empty() {
                return Err(nom::Err::Failure(ParseFailure::new(
                    after_open,
                    "malformed attribute selector",
                )));
            }
            Attribute {
                name: name.to_string(),
                operator: Some(content[op_start..=eq].to_string()),
                value: Some(value.to_string()),
            }
        }
        None => {
            let name = content.trim();
            if name.is_empty() {
                return Err(nom::Err::Failure(ParseFailure::new(
                    after_open,
                    "expected attribute name",
                )));
            }
            Attribute {
                name: name.to_string(),
                operator: None,
                value: None,
            }
        }
    };

    Ok((rest, Selector::Attribute(attribute)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descendant_combinator_keeps_whitespace() {
        let (rest, selector) = complex_selector(".a  .b").unwrap();
        assert!(rest.is_empty());
        match selector {
            Selector::Complex { combinator, .. } => assert_eq!(combinator, "  "),
            other => panic!("expected complex selector, got {other:?}"),
        }
    }

    #[test]
    fn trailing_whitespace_is_not_a_combinator() {
        let (rest, selector) = complex_selector(".a , .b").unwrap();
        assert_eq!(rest, " , .b");
        assert_eq!(selector, Selector::Compound(vec![Selector::class("a")]));
    }

    #[test]
    fn relative_branch_keeps_combinator_text() {
        let (rest, selector) = relative_selector(">  img.hero").unwrap();
        assert!(rest.is_empty());
        match selector {
            Selector::Relative { combinator, .. } => assert_eq!(combinator, ">  "),
            other => panic!("expected relative selector, got {other:?}"),
        }
    }

    #[test]
    fn offsets_point_into_nested_arguments() {
        let err = parse_selector(".a:not(.b >)").unwrap_err();
        assert_eq!(err.offset, 11);
    }
}
