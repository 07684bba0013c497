use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating notification settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML or does not match the schema.
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// A required field is missing or empty.
    #[error("notification \"{notification}\": {field} is required")]
    MissingField {
        notification: String,
        field: &'static str,
    },

    /// The target URL does not parse as an absolute http(s) URL.
    #[error("notification \"{notification}\": invalid url: {reason}")]
    InvalidUrl {
        notification: String,
        reason: String,
    },

    /// The proxy port is not an integer.
    #[error("notification \"{notification}\": invalid proxy port \"{value}\"")]
    InvalidProxyPort {
        notification: String,
        value: String,
    },

    /// Only one of user and password was given.
    #[error("notification \"{notification}\": user and password must be set together")]
    IncompleteCredentials { notification: String },

    /// A header has an empty name.
    #[error("notification \"{notification}\": header name must not be empty")]
    EmptyHeaderName { notification: String },

    /// Two notifications share a name.
    #[error("duplicate notification name \"{0}\"")]
    DuplicateName(String),

    /// No notification with the requested name exists.
    #[error("no notification named \"{0}\"")]
    NotFound(String),
}
