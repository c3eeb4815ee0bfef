//! Tokenising data lines into typed records.

use crate::record::Record;

/// Separator between two quoted fields: closing quote, space, opening quote.
pub const FIELD_DELIMITER: &str = "\" \"";

/// Splits a data line into field tokens with their outer quotes removed.
///
/// Only one leading and one trailing quote are stripped from each token, so
/// an empty field (`""`) yields an empty token rather than disappearing.
#[must_use]
pub fn tokenize_line(line: &str) -> Vec<&str> {
    line.split(FIELD_DELIMITER).map(strip_quotes).collect()
}

/// Tokenises and coerces every data line, one [`Record`] per line.
#[must_use]
pub fn parse_typed_lines<S: AsRef<str>>(lines: &[S]) -> Vec<Record> {
    lines
        .iter()
        .map(|line| Record::from_tokens(tokenize_line(line.as_ref())))
        .collect()
}

fn strip_quotes(token: &str) -> &str {
    let without_leading = token.strip_prefix('"').unwrap_or(token);
    without_leading
        .strip_suffix('"')
        .unwrap_or(without_leading)
}
