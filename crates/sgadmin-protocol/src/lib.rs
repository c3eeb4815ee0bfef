//! Reader for the administration server's line-oriented response format.
//!
//! Every response body is one status line followed by zero or more data
//! lines. A data line carries one record as quoted, space-separated fields:
//!
//! ```text
//! OK
//! "42" "Ada Lovelace" "yes" "03-15-2024" "12,13,"
//! ```
//!
//! The format is not self-describing, so each field is coerced by its shape
//! alone: boolean literals first, then `MM-DD-YYYY` dates, then
//! `MM-DD-YYYY HH:MM:SS` timestamps, and finally backslash-unescaped text.
//! Callers attach meaning by zipping a [`Record`] against the field names
//! they expect for the action they issued.
//!
//! # Example
//!
//! ```
//! use sgadmin_protocol::{RawResponse, TypedField, parse_typed_lines};
//!
//! let response = RawResponse::new("OK\n\"7\" \"yes\"\n");
//! let split = response.split();
//! assert!(split.is_success());
//!
//! let records = parse_typed_lines(&split.data);
//! let named = records[0].zip(&["id", "enabled"]);
//! assert_eq!(named.get("enabled"), Some(&TypedField::Boolean(true)));
//! ```

mod field;
mod lines;
mod record;
mod response;

pub use field::{DATE_SHAPE, TIMESTAMP_SHAPE, TypedField, coerce, format_date, unescape};
pub use lines::{FIELD_DELIMITER, parse_typed_lines, tokenize_line};
pub use record::{NamedRecord, Record};
pub use response::{RawResponse, SUCCESS_STATUS, StatusAndData, split_status_and_data};

#[cfg(test)]
mod tests;
