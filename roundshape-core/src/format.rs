/// Parser and writer for the `.shape` text format
///
/// ```text
/// # comments run to the end of the line
/// shape kite
///   anchor 100 50 radius 10 smoothness 8
///   anchor 0 100
///   anchor -100 50 radius 10 smoothness 8
///   anchor 0 -100
/// endshape
/// ```
use std::fmt::Write;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till},
    character::complete::{char, multispace1, not_line_ending, space0, space1, u32 as parse_u32},
    combinator::{opt, recognize},
    multi::{many0, many0_count},
    number::complete::float,
    sequence::{pair, preceded},
    IResult,
};

use crate::error::ParseError;
use crate::geometry::{Anchor, CornerSpec, ShapeSpec};

/// Parse a shape description, returning its optional name and contents
pub fn parse_shape(input: &str) -> Result<(Option<String>, ShapeSpec), ParseError> {
    match parse_shape_impl(input) {
        Ok((rest, parsed)) => {
            let (rest, _) = skip_blank(rest).unwrap_or((rest, ()));
            if rest.is_empty() {
                Ok(parsed)
            } else {
                Err(ParseError::TrailingInput(first_line(rest)))
            }
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(ParseError::Syntax {
            line: line_of(input, e.input),
            context: first_line(e.input),
        }),
        Err(nom::Err::Incomplete(_)) => Err(ParseError::Syntax {
            line: line_of(input, ""),
            context: "unexpected end of input".to_string(),
        }),
    }
}

/// Serialize a shape so that [`parse_shape`] reads it back
pub fn write_shape(name: Option<&str>, spec: &ShapeSpec) -> String {
    let mut out = String::new();
    match name {
        Some(name) => {
            let _ = writeln!(out, "shape {}", name);
        }
        None => out.push_str("shape\n"),
    }
    for (i, anchor) in spec.anchors.iter().enumerate() {
        let _ = write!(out, "  anchor {} {}", anchor.x, anchor.y);
        if let Some(corner) = spec.corners.get(i) {
            if corner.radius != 0.0 {
                let _ = write!(out, " radius {}", corner.radius);
            }
            if corner.smoothness != 1 {
                let _ = write!(out, " smoothness {}", corner.smoothness);
            }
        }
        out.push('\n');
    }
    out.push_str("endshape\n");
    out
}

fn parse_shape_impl(input: &str) -> IResult<&str, (Option<String>, ShapeSpec)> {
    let (input, _) = preceded(skip_blank, tag("shape"))(input)?;
    let (input, name) = preceded(space0, not_line_ending)(input)?;
    let (input, entries) = many0(parse_anchor)(input)?;
    let (input, _) = preceded(skip_blank, tag("endshape"))(input)?;

    let name = name.trim();
    let name = (!name.is_empty()).then(|| name.to_string());

    let mut spec = ShapeSpec::default();
    for (anchor, corner) in entries {
        spec.anchors.push(anchor);
        spec.corners.push(corner);
    }

    Ok((input, (name, spec)))
}

fn parse_anchor(input: &str) -> IResult<&str, (Anchor, CornerSpec)> {
    let (input, _) = preceded(skip_blank, tag("anchor"))(input)?;
    let (input, x) = preceded(space1, float)(input)?;
    let (input, y) = preceded(space1, float)(input)?;
    let (input, radius) = opt(preceded(pair(space1, tag("radius")), preceded(space1, float)))(input)?;
    let (input, smoothness) =
        opt(preceded(pair(space1, tag("smoothness")), preceded(space1, parse_u32)))(input)?;

    let corner = CornerSpec::new(radius.unwrap_or(0.0), smoothness.unwrap_or(1));
    Ok((input, (Anchor::new(x, y), corner)))
}

/// Whitespace and `#` comments
fn skip_blank(input: &str) -> IResult<&str, ()> {
    let comment = recognize(pair(char('#'), take_till(|c| c == '\n')));
    let (input, _) = many0_count(alt((multispace1, comment)))(input)?;
    Ok((input, ()))
}

fn line_of(input: &str, rest: &str) -> usize {
    let offset = input.len().saturating_sub(rest.len());
    input[..offset].matches('\n').count() + 1
}

fn first_line(input: &str) -> String {
    input.lines().next().unwrap_or("").trim().chars().take(40).collect()
}
