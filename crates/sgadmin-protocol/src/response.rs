//! Status/data separation for raw response bodies.

/// The one status tag the server uses to report success.
pub const SUCCESS_STATUS: &str = "OK";

/// A response body exactly as the server returned it.
///
/// Protocol-level failures are ordinary values: a body whose status tag is
/// not [`SUCCESS_STATUS`] still arrives here, and its data lines usually
/// carry the server's explanation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    body: String,
}

impl RawResponse {
    /// Wraps a response body.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// Builds a success response with no data lines.
    ///
    /// Used where a logical call needed no network round trip at all.
    #[must_use]
    pub fn success() -> Self {
        Self::new(SUCCESS_STATUS)
    }

    /// The unmodified body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consumes the response, returning the body.
    #[must_use]
    pub fn into_body(self) -> String {
        self.body
    }

    /// The status tag, or an empty string for an empty body.
    #[must_use]
    pub fn status(&self) -> &str {
        non_empty_lines(&self.body).next().unwrap_or_default()
    }

    /// Whether the status tag is [`SUCCESS_STATUS`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status() == SUCCESS_STATUS
    }

    /// Splits the body into its status tag and data lines.
    #[must_use]
    pub fn split(&self) -> StatusAndData<'_> {
        split_status_and_data(&self.body)
    }
}

/// A body split into its status tag and data lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusAndData<'a> {
    /// First non-empty line of the body.
    pub status: &'a str,
    /// Every later non-empty line, in order.
    pub data: Vec<&'a str>,
}

impl StatusAndData<'_> {
    /// Whether the status tag is [`SUCCESS_STATUS`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }

    /// Owned copies of the data lines.
    #[must_use]
    pub fn data_owned(&self) -> Vec<String> {
        self.data.iter().map(|line| (*line).to_owned()).collect()
    }
}

/// Splits a body on `\n`, `\r\n` or `\r`, drops empty lines, and treats the
/// first survivor as the status tag.
///
/// The tag is not interpreted here; compare it with [`SUCCESS_STATUS`].
#[must_use]
pub fn split_status_and_data(body: &str) -> StatusAndData<'_> {
    let mut lines = non_empty_lines(body);
    let status = lines.next().unwrap_or_default();
    StatusAndData {
        status,
        data: lines.collect(),
    }
}

fn non_empty_lines(body: &str) -> impl Iterator<Item = &str> {
    body.split(['\n', '\r']).filter(|line| !line.is_empty())
}
