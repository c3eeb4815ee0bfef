//! Checks applied to a loaded [`Config`](crate::Config) before it is used.

use thiserror::Error;
use url::Url;

/// Problems found in an otherwise well-formed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The server address is not a URL.
    #[error("invalid server address '{value}': {source}")]
    InvalidServer {
        /// Address as configured.
        value: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// The server address uses something other than HTTP(S).
    #[error("unsupported server scheme '{0}', expected http or https")]
    UnsupportedScheme(String),
    /// A credential was left empty.
    #[error("the {0} must be configured")]
    MissingCredential(&'static str),
    /// The request timeout was zero.
    #[error("timeout_secs must be greater than zero")]
    ZeroTimeout,
    /// The chunk size was zero.
    #[error("chunk_size must be greater than zero")]
    ZeroChunkSize,
}

pub(crate) fn parse_server(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|source| ConfigError::InvalidServer {
        value: value.to_owned(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme(other.to_owned())),
    }
}

pub(crate) fn require_credential(name: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingCredential(name));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::{Config, ConfigError};

    fn configured() -> Config {
        Config {
            username: String::from("admin"),
            password: String::from("secret"),
            ..Config::default()
        }
    }

    #[test]
    fn accepts_complete_configuration() {
        assert_eq!(configured().validate(), Ok(()));
    }

    #[rstest]
    #[case("not a url")]
    #[case("")]
    fn rejects_malformed_server(#[case] server: &str) {
        let config = Config {
            server: server.to_owned(),
            ..configured()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidServer { .. })
        ));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let config = Config {
            server: String::from("ftp://licences.example.com/"),
            ..configured()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnsupportedScheme(String::from("ftp")))
        );
    }

    #[test]
    fn reports_missing_username_before_password() {
        let config = Config::default();
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingCredential("username"))
        );
    }

    #[test]
    fn rejects_zero_chunk_size() {
        let config = Config {
            chunk_size: 0,
            ..configured()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroChunkSize));
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = Config {
            timeout_secs: 0,
            ..configured()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));
    }
}
