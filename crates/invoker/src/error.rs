use thiserror::Error;

/// Reasons an invocation can fail.
///
/// Every variant is terminal for the single invocation that produced it.
/// None of them is retried.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The target URL could not be parsed.
    #[error("malformed url \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The method is not a valid HTTP method token.
    #[error("invalid HTTP method \"{0}\"")]
    InvalidMethod(String),

    /// A header name or value cannot be sent over HTTP.
    #[error("invalid header \"{name}\": {reason}")]
    InvalidHeader { name: String, reason: String },

    /// The forward proxy address was rejected.
    #[error("invalid proxy {url}: {source}")]
    Proxy {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The per-invocation HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The connect or request timeout elapsed.
    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// DNS, TCP, TLS or proxy failure, or an I/O error while sending.
    #[error("connection error: {0}")]
    Connection(#[source] reqwest::Error),

    /// The endpoint answered with a client or server error status.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    ResponseBody(#[source] reqwest::Error),
}

impl InvokeError {
    /// Classify an error returned while sending the request.
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::Connection(err)
        }
    }

    /// Classify an error returned while reading the response body.
    pub(crate) fn from_read(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::ResponseBody(err)
        }
    }

    /// HTTP status of the response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
