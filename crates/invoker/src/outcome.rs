use serde::{Deserialize, Serialize};

use crate::error::InvokeError;

/// Response received from the notification endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResponse {
    /// HTTP status code from the endpoint.
    pub status_code: u16,

    /// Response body as UTF-8 text, lines joined with `\n`.
    pub body: String,
}

/// Result of one invocation.
///
/// Failures are already logged by the time this value is returned, so
/// callers that only need fire-and-forget semantics can drop it.
#[derive(Debug)]
pub enum InvocationOutcome {
    /// The request was sent and the response was read.
    Completed(InvocationResponse),
    /// The invocation stopped at the contained error.
    Failed(InvokeError),
}

impl InvocationOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn response(&self) -> Option<&InvocationResponse> {
        match self {
            Self::Completed(response) => Some(response),
            Self::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&InvokeError> {
        match self {
            Self::Completed(_) => None,
            Self::Failed(err) => Some(err),
        }
    }

    /// Convert into a `Result` for callers that want `?` propagation.
    pub fn into_result(self) -> Result<InvocationResponse, InvokeError> {
        match self {
            Self::Completed(response) => Ok(response),
            Self::Failed(err) => Err(err),
        }
    }
}

impl From<Result<InvocationResponse, InvokeError>> for InvocationOutcome {
    fn from(result: Result<InvocationResponse, InvokeError>) -> Self {
        match result {
            Ok(response) => Self::Completed(response),
            Err(err) => Self::Failed(err),
        }
    }
}
