//! Shape-based coercion of raw field tokens.

use std::fmt;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

/// Shape of a calendar date token; `D` stands for any ASCII digit.
pub const DATE_SHAPE: &str = "DD-DD-DDDD";

/// Shape of a timestamp token; `D` stands for any ASCII digit.
pub const TIMESTAMP_SHAPE: &str = "DD-DD-DDDD DD:DD:DD";

const TRUE_LITERALS: [&str; 2] = ["true", "yes"];
const FALSE_LITERALS: [&str; 2] = ["false", "no"];

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[month]-[day]-[year]");
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month]-[day]-[year] [hour]:[minute]:[second]");

/// One coerced field of a data line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedField {
    /// `true`/`yes` or `false`/`no`.
    Boolean(bool),
    /// A `MM-DD-YYYY` calendar date.
    Date(Date),
    /// A `MM-DD-YYYY HH:MM:SS` timestamp on the server clock, stored as UTC.
    Timestamp(OffsetDateTime),
    /// Any other token, with backslash escapes removed.
    String(String),
}

impl TypedField {
    /// The boolean value, if this field is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// The calendar date, if this field is one.
    #[must_use]
    pub const fn as_date(&self) -> Option<Date> {
        match self {
            Self::Date(value) => Some(*value),
            _ => None,
        }
    }

    /// The timestamp, if this field is one.
    #[must_use]
    pub const fn as_timestamp(&self) -> Option<OffsetDateTime> {
        match self {
            Self::Timestamp(value) => Some(*value),
            _ => None,
        }
    }

    /// The text, if this field is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }
}

/// Renders the field back into the server's own notation.
///
/// Booleans render as `true`/`false`, so a `yes` token does not round-trip
/// byte for byte.
impl fmt::Display for TypedField {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(value) => write!(formatter, "{value}"),
            Self::Date(date) => write_formatted(formatter, date.format(DATE_FORMAT)),
            Self::Timestamp(stamp) => write_formatted(formatter, stamp.format(TIMESTAMP_FORMAT)),
            Self::String(text) => formatter.write_str(text),
        }
    }
}

fn write_formatted(
    formatter: &mut fmt::Formatter<'_>,
    rendered: Result<String, time::error::Format>,
) -> fmt::Result {
    let text = rendered.map_err(|_| fmt::Error)?;
    formatter.write_str(&text)
}

/// Coerces an unquoted token by shape.
///
/// Literals are matched case-sensitively and before the date shapes. A
/// token with a date shape but an impossible value (month 13, say) is kept
/// as a string.
#[must_use]
pub fn coerce(token: &str) -> TypedField {
    if TRUE_LITERALS.contains(&token) {
        return TypedField::Boolean(true);
    }
    if FALSE_LITERALS.contains(&token) {
        return TypedField::Boolean(false);
    }
    if matches_shape(token, DATE_SHAPE)
        && let Ok(date) = Date::parse(token, DATE_FORMAT)
    {
        return TypedField::Date(date);
    }
    if matches_shape(token, TIMESTAMP_SHAPE)
        && let Ok(stamp) = PrimitiveDateTime::parse(token, TIMESTAMP_FORMAT)
    {
        return TypedField::Timestamp(stamp.assume_utc());
    }
    TypedField::String(unescape(token))
}

/// Removes each backslash that precedes another character, keeping the
/// escaped character. A trailing lone backslash is kept.
#[must_use]
pub fn unescape(token: &str) -> String {
    let mut output = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(current) = chars.next() {
        if current == '\\' {
            output.push(chars.next().unwrap_or(current));
        } else {
            output.push(current);
        }
    }
    output
}

/// Formats a date the way the server expects it in request parameters.
///
/// # Errors
///
/// Propagates formatting failures from `time`.
pub fn format_date(date: Date) -> Result<String, time::error::Format> {
    date.format(DATE_FORMAT)
}

fn matches_shape(token: &str, shape: &str) -> bool {
    token.len() == shape.len()
        && token
            .bytes()
            .zip(shape.bytes())
            .all(|(actual, expected)| match expected {
                b'D' => actual.is_ascii_digit(),
                literal => actual == literal,
            })
}
