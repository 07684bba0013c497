use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use notifier_invoker::InvocationRequest;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SettingsError;

/// A header configured on a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSetting {
    pub name: String,
    pub value: String,
}

/// Proxy port as written in a settings file: either a TOML integer or a
/// string, the form settings forms usually store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortValue {
    Number(i64),
    Text(String),
}

/// One persisted notification.
///
/// Empty strings are treated the same as absent values.
///
/// # Example
///
/// ```toml
/// [[notifications]]
/// name = "pr-opened"
/// url = "https://ci.example.com/hooks/pr"
/// method = "POST"
/// post_content = '{"event":"opened"}'
/// proxy_server = "proxy.internal"
/// proxy_port = 3128
///
/// [[notifications.headers]]
/// name = "Content-Type"
/// value = "application/json"
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Unique name of this notification within its file.
    pub name: String,
    /// Target URL.
    #[serde(default)]
    pub url: String,
    /// User for Basic authentication against the target.
    #[serde(default)]
    pub user: Option<String>,
    /// Password for Basic authentication against the target.
    #[serde(default)]
    pub password: Option<String>,
    /// HTTP method.
    #[serde(default = "default_method")]
    pub method: String,
    /// Request body, sent only with `POST` and `PUT`.
    #[serde(default)]
    pub post_content: Option<String>,
    /// Headers, attached in the listed order.
    #[serde(default)]
    pub headers: Vec<HeaderSetting>,
    #[serde(default)]
    pub proxy_server: Option<String>,
    #[serde(default)]
    pub proxy_port: Option<PortValue>,
    #[serde(default)]
    pub proxy_user: Option<String>,
    #[serde(default)]
    pub proxy_password: Option<String>,
}

fn default_method() -> String {
    "GET".to_owned()
}

impl std::fmt::Debug for NotificationSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationSettings")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("method", &self.method)
            .field("post_content", &self.post_content)
            .field("headers", &self.headers)
            .field("proxy_server", &self.proxy_server)
            .field("proxy_port", &self.proxy_port)
            .field("proxy_user", &self.proxy_user)
            .field(
                "proxy_password",
                &self.proxy_password.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl NotificationSettings {
    /// Create settings for `name` targeting `url`, with every other field at
    /// its default.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            user: None,
            password: None,
            method: default_method(),
            post_content: None,
            headers: Vec::new(),
            proxy_server: None,
            proxy_port: None,
            proxy_user: None,
            proxy_password: None,
        }
    }

    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    #[must_use]
    pub fn with_post_content(mut self, post_content: impl Into<String>) -> Self {
        self.post_content = Some(post_content.into());
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(HeaderSetting {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn with_proxy(mut self, server: impl Into<String>, port: PortValue) -> Self {
        self.proxy_server = Some(server.into());
        self.proxy_port = Some(port);
        self
    }

    #[must_use]
    pub fn with_proxy_credentials(
        mut self,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.proxy_user = Some(user.into());
        self.proxy_password = Some(password.into());
        self
    }

    /// Check the settings without building a request.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.parsed_proxy_port()?;
        self.check_url()?;

        if self.method.trim().is_empty() {
            return Err(self.missing("method"));
        }
        if self.headers.iter().any(|h| h.name.trim().is_empty()) {
            return Err(SettingsError::EmptyHeaderName {
                notification: self.name.clone(),
            });
        }
        if non_empty(self.user.as_ref()).is_some() != non_empty(self.password.as_ref()).is_some() {
            return Err(SettingsError::IncompleteCredentials {
                notification: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Validate and assemble the request an invoker will perform.
    ///
    /// Configured headers come first, in order, followed by an
    /// `Authorization: Basic` header when target credentials are set.
    pub fn to_invocation_request(&self) -> Result<InvocationRequest, SettingsError> {
        self.validate()?;

        let mut request = InvocationRequest::new()
            .with_url_param(&self.url)
            .with_method(self.method.clone())
            .with_post_content(non_empty(self.post_content.as_ref()));

        for header in &self.headers {
            request = request.with_header(header.name.clone(), header.value.clone());
        }

        if let (Some(user), Some(password)) = (
            non_empty(self.user.as_ref()),
            non_empty(self.password.as_ref()),
        ) {
            let token = STANDARD.encode(format!("{user}:{password}"));
            request = request.with_header("Authorization", format!("Basic {token}"));
        }

        let request = request
            .with_proxy_server(non_empty(self.proxy_server.as_ref()))
            .with_proxy_port(self.parsed_proxy_port()?.unwrap_or(0))
            .with_proxy_user(non_empty(self.proxy_user.as_ref()))
            .with_proxy_password(non_empty(self.proxy_password.as_ref()));

        debug!(
            notification = %self.name,
            url = %request.url_param(),
            proxied = request.should_use_proxy(),
            "assembled invocation request"
        );
        Ok(request)
    }

    /// The proxy port as an integer, `None` when not configured.
    pub fn parsed_proxy_port(&self) -> Result<Option<i32>, SettingsError> {
        let invalid = |value: String| SettingsError::InvalidProxyPort {
            notification: self.name.clone(),
            value,
        };
        match &self.proxy_port {
            None => Ok(None),
            Some(PortValue::Number(n)) => i32::try_from(*n)
                .map(Some)
                .map_err(|_| invalid(n.to_string())),
            Some(PortValue::Text(text)) if text.trim().is_empty() => Ok(None),
            Some(PortValue::Text(text)) => text
                .trim()
                .parse::<i32>()
                .map(Some)
                .map_err(|_| invalid(text.clone())),
        }
    }

    fn check_url(&self) -> Result<(), SettingsError> {
        if self.url.trim().is_empty() {
            return Err(self.missing("url"));
        }
        let escaped = InvocationRequest::new().with_url_param(&self.url);
        let parsed = url::Url::parse(escaped.url_param()).map_err(|e| SettingsError::InvalidUrl {
            notification: self.name.clone(),
            reason: e.to_string(),
        })?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SettingsError::InvalidUrl {
                notification: self.name.clone(),
                reason: format!("unsupported scheme {scheme}"),
            }),
        }
    }

    fn missing(&self, field: &'static str) -> SettingsError {
        SettingsError::MissingField {
            notification: self.name.clone(),
            field,
        }
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}
