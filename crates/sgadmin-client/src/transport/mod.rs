//! The single capability the dispatcher needs from an HTTP stack.
//!
//! [`HttpTransport`] is the production implementation. Tests substitute
//! their own [`Transport`] to script responses and record requests.

use std::time::Duration;

use url::Url;

use crate::error::TransportError;

mod http;

pub use http::HttpTransport;

/// Executes one form POST and returns the raw response body.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use sgadmin_client::{Transport, TransportError};
/// use url::Url;
///
/// struct AlwaysOk;
///
/// impl Transport for AlwaysOk {
///     fn post_form(
///         &self,
///         _url: &Url,
///         _fields: &[(String, String)],
///         _timeout: Duration,
///     ) -> Result<String, TransportError> {
///         Ok(String::from("OK\n"))
///     }
/// }
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    /// Posts `fields` as `application/x-www-form-urlencoded` to `url`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the server cannot be reached, the
    /// deadline passes, the status is not 2xx, or the body is unreadable.
    fn post_form(
        &self,
        url: &Url,
        fields: &[(String, String)],
        timeout: Duration,
    ) -> Result<String, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post_form(
        &self,
        url: &Url,
        fields: &[(String, String)],
        timeout: Duration,
    ) -> Result<String, TransportError> {
        (**self).post_form(url, fields, timeout)
    }
}
