use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default connect timeout, in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default whole-request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Transport settings shared by every invocation performed by an
/// [`Invoker`](crate::Invoker).
///
/// # Example
///
/// ```toml
/// [invoker]
/// connect_timeout_secs = 5
/// timeout_secs = 20
/// follow_redirects = false
/// user_agent = "my-notifier/1.0"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokerConfig {
    /// TCP/TLS connect timeout in seconds. Zero selects the default.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds. Zero selects the default.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Whether to follow HTTP redirects.
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,
    /// `User-Agent` header; defaults to `notifier/<version>`.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            timeout_secs: default_timeout_secs(),
            follow_redirects: default_follow_redirects(),
            user_agent: None,
        }
    }
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_follow_redirects() -> bool {
    true
}

impl InvokerConfig {
    /// Connect timeout, falling back to the default when zero.
    pub fn effective_connect_timeout(&self) -> Duration {
        non_zero_secs(self.connect_timeout_secs, DEFAULT_CONNECT_TIMEOUT_SECS)
    }

    /// Request timeout, falling back to the default when zero.
    pub fn effective_timeout(&self) -> Duration {
        non_zero_secs(self.timeout_secs, DEFAULT_TIMEOUT_SECS)
    }

    /// Configured user agent, or `notifier/<version>`.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("notifier/{}", env!("CARGO_PKG_VERSION")))
    }

    /// Set the connect timeout in seconds.
    #[must_use]
    pub fn with_connect_timeout_secs(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    /// Set the request timeout in seconds.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Disable following HTTP redirects.
    #[must_use]
    pub fn with_no_redirects(mut self) -> Self {
        self.follow_redirects = false;
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

fn non_zero_secs(secs: u64, fallback: u64) -> Duration {
    if secs == 0 {
        Duration::from_secs(fallback)
    } else {
        Duration::from_secs(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = InvokerConfig::default();
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.follow_redirects);
        assert!(config.user_agent.is_none());
        assert_eq!(config.effective_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn builder_methods() {
        let config = InvokerConfig::default()
            .with_connect_timeout_secs(2)
            .with_timeout_secs(5)
            .with_no_redirects()
            .with_user_agent("custom/1.0");

        assert_eq!(config.effective_connect_timeout(), Duration::from_secs(2));
        assert_eq!(config.effective_timeout(), Duration::from_secs(5));
        assert!(!config.follow_redirects);
        assert_eq!(config.effective_user_agent(), "custom/1.0");
    }

    #[test]
    fn zero_timeouts_use_defaults() {
        let config = InvokerConfig::default()
            .with_connect_timeout_secs(0)
            .with_timeout_secs(0);
        assert_eq!(
            config.effective_connect_timeout(),
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)
        );
        assert_eq!(
            config.effective_timeout(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn default_user_agent_names_the_crate_version() {
        let agent = InvokerConfig::default().effective_user_agent();
        assert!(agent.starts_with("notifier/"));
    }

    #[test]
    fn toml_defaults() {
        let config: InvokerConfig = toml::from_str("").unwrap();
        assert_eq!(config, InvokerConfig::default());
    }

    #[test]
    fn toml_custom() {
        let toml = r#"
            connect_timeout_secs = 3
            timeout_secs = 12
            follow_redirects = false
            user_agent = "hooks/2"
        "#;
        let config: InvokerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.connect_timeout_secs, 3);
        assert_eq!(config.timeout_secs, 12);
        assert!(!config.follow_redirects);
        assert_eq!(config.user_agent.as_deref(), Some("hooks/2"));
    }
}
