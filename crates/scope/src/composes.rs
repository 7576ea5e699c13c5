//! `composes` declaration values.
//!
//! Three shapes are accepted:
//!
//! ```css
//! composes: button;                    /* local class */
//! composes: reset from global;         /* unscoped name */
//! composes: title from "./type.css";   /* name from another sheet */
//! ```

use cssom::parser::values::parse_ident;
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_till1},
    character::complete::{char, multispace1},
    combinator::{all_consuming, map, opt, value},
    sequence::{delimited, preceded, tuple},
};

/// Where a composed name comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin<'a> {
    Local,
    Global,
    Dependency(&'a str),
}

/// A parsed `composes` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComposesValue<'a> {
    pub name: &'a str,
    pub origin: Origin<'a>,
}

fn quoted(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('\''), take_till1(|c: char| c == '\''), char('\'')),
        delimited(char('"'), take_till1(|c: char| c == '"'), char('"')),
    ))(input)
}

fn origin(input: &str) -> IResult<&str, Origin<'_>> {
    preceded(
        tuple((multispace1, tag("from"), multispace1)),
        alt((
            value(Origin::Global, tag("global")),
            map(quoted, Origin::Dependency),
        )),
    )(input)
}

fn composes_value(input: &str) -> IResult<&str, ComposesValue<'_>> {
    let (input, name) = parse_ident(input)?;
    let (input, origin) = opt(origin)(input)?;
    Ok((
        input,
        ComposesValue {
            name,
            origin: origin.unwrap_or(Origin::Local),
        },
    ))
}

/// Parses a `composes` value, returning `None` when it matches none of the
/// accepted shapes.
pub fn parse_composes(input: &str) -> Option<ComposesValue<'_>> {
    all_consuming(composes_value)(input.trim())
        .ok()
        .map(|(_, parsed)| parsed)
}
