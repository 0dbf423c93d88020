//! Directive parsing built on `nom`.
//!
//! A line is split into its colon-separated fields once, then dispatched
//! on the leading tag. Field counts are exact per tag.

use cgshare_common::constants::FIELD_SEPARATOR;
use cgshare_common::error::{CgshareError, Result};
use cgshare_common::types::{GroupId, Score, check_path_segment};
use nom::{
    IResult, Parser,
    bytes::complete::take_while,
    character::complete::char,
    combinator::all_consuming,
    multi::separated_list1,
};

use super::Directive;

/// A single field: everything up to the next separator.
fn field(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c != FIELD_SEPARATOR).parse(input)
}

/// The whole line as separator-delimited fields.
fn fields(input: &str) -> IResult<&str, Vec<&str>> {
    all_consuming(separated_list1(char(FIELD_SEPARATOR), field)).parse(input)
}

/// Splits a trimmed line into its colon-separated fields.
///
/// Empty fields are kept, so `a::b` yields three fields.
///
/// # Errors
///
/// Returns [`CgshareError::Parse`] if the line cannot be split.
pub fn split_fields(line: &str) -> Result<Vec<&str>> {
    let (_, parts) = fields(line.trim()).map_err(|e| CgshareError::parse(line, e.to_string()))?;
    Ok(parts)
}

fn expect_fields(line: &str, tag: &str, parts: &[&str], expected: usize) -> Result<()> {
    if parts.len() == expected {
        Ok(())
    } else {
        Err(CgshareError::parse(
            line,
            format!(
                "{tag} expects {expected} fields, got {}",
                parts.len()
            ),
        ))
    }
}

fn segment(line: &str, what: &str, value: &str) -> Result<String> {
    check_path_segment(value)
        .map_err(|reason| CgshareError::parse(line, format!("{what} {value:?}: {reason}")))?;
    Ok(value.to_owned())
}

fn number<T: std::str::FromStr>(line: &str, what: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| CgshareError::parse(line, format!("{what} {value:?}: {e}")))
}

/// Parses one directive line.
///
/// Leading and trailing whitespace (including the line terminator) is
/// ignored. Unused slots are accepted with any content.
///
/// # Errors
///
/// Returns [`CgshareError::Parse`] for an unknown tag, a wrong field
/// count, an unsafe subsystem or group segment, or a non-numeric
/// task id, share, or score.
pub fn parse_directive(line: &str) -> Result<Directive> {
    let parts = split_fields(line)?;
    let tag = parts[0];

    let directive = match tag {
        "create" | "remove" => {
            expect_fields(line, tag, &parts, 4)?;
            let subsystem = segment(line, "subsystem", parts[1])?;
            let group = GroupId::new(segment(line, "group", parts[3])?);
            if tag == "create" {
                Directive::Create { subsystem, group }
            } else {
                Directive::Remove { subsystem, group }
            }
        }
        "add" => {
            expect_fields(line, tag, &parts, 5)?;
            Directive::Add {
                subsystem: segment(line, "subsystem", parts[1])?,
                group: GroupId::new(segment(line, "group", parts[3])?),
                task: number(line, "task id", parts[4])?,
            }
        }
        "set_limit" => {
            expect_fields(line, tag, &parts, 6)?;
            Directive::SetLimit {
                subsystem: segment(line, "subsystem", parts[1])?,
                group: GroupId::new(segment(line, "group", parts[3])?),
                share: number(line, "share", parts[5])?,
            }
        }
        "score" => {
            expect_fields(line, tag, &parts, 2)?;
            let value: f64 = number(line, "score", parts[1])?;
            if !value.is_finite() {
                return Err(CgshareError::parse(line, "score must be finite"));
            }
            Directive::Score(Score::new(value))
        }
        other => {
            return Err(CgshareError::parse(
                line,
                format!("unknown directive tag {other:?}"),
            ));
        }
    };

    Ok(directive)
}
