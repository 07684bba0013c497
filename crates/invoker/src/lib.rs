//! Single-shot outbound HTTP notifications.
//!
//! An [`InvocationRequest`] describes one request: target URL, method,
//! ordered headers, an optional body and optional forward-proxy settings.
//! An [`Invoker`] performs it, logs each step through `tracing`, and returns
//! an [`InvocationOutcome`]. Failures are absorbed: they are logged at
//! `error` level and reported in the outcome, never raised.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use notifier_invoker::{InvocationRequest, Invoker, InvokerConfig};
//!
//! # async fn run() {
//! let request = InvocationRequest::new()
//!     .with_url_param("http://example.test/hook")
//!     .with_method("POST")
//!     .with_header("X-Event", "opened")
//!     .with_post_content(Some("{}".to_owned()));
//!
//! // Fire and forget.
//! request.invoke().await;
//!
//! // Or keep the outcome, with custom transport settings.
//! let invoker = Invoker::new(InvokerConfig::default().with_timeout_secs(5));
//! let outcome = invoker.invoke(&request).await;
//! if let Some(response) = outcome.response() {
//!     println!("status {}", response.status_code);
//! }
//! # }
//! ```

pub mod config;
pub mod error;
pub mod invoker;
pub mod outcome;
pub mod proxy;
pub mod request;

pub use config::InvokerConfig;
pub use error::InvokeError;
pub use invoker::Invoker;
pub use outcome::{InvocationOutcome, InvocationResponse};
pub use proxy::ProxyConfig;
pub use request::{Header, InvocationRequest};
