use nom::{
    Finish, IResult,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, multispace0},
    combinator::{cut, map, opt},
    error::{VerboseError, context, convert_error},
    multi::separated_list1,
    sequence::{delimited, preceded, terminated},
};

use crate::select::{RawField, RawSelect};

/// Parse error for selection text.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectParseError(pub String);

impl std::fmt::Display for SelectParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "select parse error: {}", self.0)
    }
}

impl std::error::Error for SelectParseError {}

type PResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// The token that requests every remaining field of a body.
pub const SPREAD: &str = "...";

/// Deepest brace nesting accepted. Parsing and resolution both recurse once
/// per level, so this also bounds the resolver's stack.
pub const MAX_DEPTH: usize = 64;

enum Entry {
    Spread,
    Field(RawField),
}

/// Parse selection text into a [`RawSelect`] tree.
///
/// The text is one comma-separated body without enclosing braces:
/// - `name` takes the field as a whole unit
/// - `name{a,b}` expands the field and selects `a` and `b` inside it
/// - `...` requests every field of the enclosing body not otherwise named
/// - `name{}` is the same as `name{...}`
///
/// Whitespace between tokens is ignored. Text nested more than
/// [`MAX_DEPTH`] braces deep is rejected before parsing.
pub fn parse_select(text: &str) -> Result<RawSelect, SelectParseError> {
    check_depth(text)?;

    let (rest, select) = body(text)
        .finish()
        .map_err(|e| SelectParseError(convert_error(text, e)))?;

    if !rest.is_empty() {
        let offset = text.len() - rest.len();
        return Err(SelectParseError(format!(
            "unexpected input at offset {offset}: {rest:?}"
        )));
    }

    Ok(select)
}

fn check_depth(text: &str) -> Result<(), SelectParseError> {
    let mut depth = 0usize;
    for (offset, c) in text.char_indices() {
        match c {
            '{' => {
                depth += 1;
                if depth > MAX_DEPTH {
                    return Err(SelectParseError(format!(
                        "nesting deeper than {MAX_DEPTH} at offset {offset}"
                    )));
                }
            }
            '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

/// A comma-separated run of entries. Spread entries fold into `all`.
fn body(input: &str) -> PResult<'_, RawSelect> {
    map(separated_list1(char(','), entry), |entries| {
        let mut select = RawSelect::default();
        for entry in entries {
            match entry {
                Entry::Spread => select.all = true,
                Entry::Field(field) => select.fields.push(field),
            }
        }
        select
    })(input)
}

fn entry(input: &str) -> PResult<'_, Entry> {
    delimited(
        multispace0,
        alt((map(tag(SPREAD), |_| Entry::Spread), map(field, Entry::Field))),
        multispace0,
    )(input)
}

fn field(input: &str) -> PResult<'_, RawField> {
    let (input, name) = identifier(input)?;
    let (input, select) = opt(preceded(multispace0, nested))(input)?;
    Ok((
        input,
        RawField {
            name: name.to_string(),
            select,
        },
    ))
}

/// `{ body }` or `{}`. Once the opening brace is seen the body must close.
fn nested(input: &str) -> PResult<'_, RawSelect> {
    preceded(
        char('{'),
        cut(terminated(
            map(opt(body), |select| select.unwrap_or_else(RawSelect::everything)),
            preceded(multispace0, context("closing brace", char('}'))),
        )),
    )(input)
}

fn identifier(input: &str) -> PResult<'_, &str> {
    context(
        "field name",
        take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '$'),
    )(input)
}
