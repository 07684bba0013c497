use serde::{Deserialize, Serialize};

use crate::invoker::Invoker;
use crate::outcome::InvocationOutcome;
use crate::proxy::ProxyConfig;

/// A single request header.
///
/// Names are not required to be unique: repeated names are all sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    name: String,
    value: String,
}

impl Header {
    /// Create a header from a name/value pair.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Everything needed to perform one outbound notification request.
///
/// Built empty and populated through the `with_*` methods, each of which
/// consumes the request and returns the updated value:
///
/// ```rust
/// use notifier_invoker::InvocationRequest;
///
/// let request = InvocationRequest::new()
///     .with_url_param("http://example.test/hook")
///     .with_method("POST")
///     .with_header("X-Event", "opened")
///     .with_post_content(Some("{}".to_owned()));
///
/// assert!(request.should_post_content());
/// ```
///
/// Apart from escaping whitespace in the URL, nothing is validated here.
/// Malformed values surface as a failed outcome when the request is invoked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationRequest {
    url: String,
    method: String,
    post_content: Option<String>,
    headers: Vec<Header>,
    proxy: ProxyConfig,
}

impl InvocationRequest {
    /// Create an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target URL. Each ASCII space, tab, line feed, vertical tab,
    /// form feed or carriage return is replaced by `%20`; no other escaping
    /// is performed.
    #[must_use]
    pub fn with_url_param(mut self, url: &str) -> Self {
        self.url = escape_whitespace(url);
        self
    }

    /// Set the HTTP method, stored verbatim.
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Set the optional request body.
    #[must_use]
    pub fn with_post_content(mut self, post_content: Option<String>) -> Self {
        self.post_content = post_content;
        self
    }

    /// Append a header. Headers are attached in the order they are added.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(name, value));
        self
    }

    #[must_use]
    pub fn with_proxy_server(mut self, host: Option<String>) -> Self {
        self.proxy.host = host;
        self
    }

    #[must_use]
    pub fn with_proxy_port(mut self, port: i32) -> Self {
        self.proxy.port = port;
        self
    }

    #[must_use]
    pub fn with_proxy_user(mut self, user: Option<String>) -> Self {
        self.proxy.user = user;
        self
    }

    #[must_use]
    pub fn with_proxy_password(mut self, password: Option<String>) -> Self {
        self.proxy.password = password;
        self
    }

    /// The target URL after whitespace escaping.
    pub fn url_param(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn post_content(&self) -> Option<&str> {
        self.post_content.as_deref()
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn proxy(&self) -> &ProxyConfig {
        &self.proxy
    }

    /// Whether the request is routed through the configured forward proxy.
    pub fn should_use_proxy(&self) -> bool {
        self.proxy.should_use_proxy()
    }

    /// Whether proxy credentials are supplied. Only consulted when the proxy
    /// is actually used.
    pub fn should_authenticate_proxy(&self) -> bool {
        self.proxy.should_authenticate()
    }

    /// Whether the body is sent. Requires the method to be exactly `POST` or
    /// `PUT` (case-sensitive) and a body to be present.
    pub fn should_post_content(&self) -> bool {
        matches!(self.method.as_str(), "POST" | "PUT") && self.post_content.is_some()
    }

    /// Perform the request with a default [`Invoker`].
    pub async fn invoke(&self) -> InvocationOutcome {
        Invoker::default().invoke(self).await
    }
}

// Space, tab, newline, vertical tab, form feed and carriage return only.
fn is_url_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

fn escape_whitespace(url: &str) -> String {
    let mut escaped = String::with_capacity(url.len());
    for c in url.chars() {
        if is_url_whitespace(c) {
            escaped.push_str("%20");
        } else {
            escaped.push(c);
        }
    }
    escaped
}
