/// Forward-proxy settings carried by an [`InvocationRequest`](crate::InvocationRequest).
///
/// The fields are populated independently; whether the proxy is used, and
/// whether it is authenticated, is decided when the request is invoked.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Proxy host name or address.
    pub host: Option<String>,
    /// Proxy port. Zero or negative disables the proxy.
    pub port: i32,
    /// Proxy user for Basic authentication.
    pub user: Option<String>,
    /// Proxy password for Basic authentication.
    pub password: Option<String>,
}

impl ProxyConfig {
    /// `true` when a non-empty host and a positive port are configured.
    pub fn should_use_proxy(&self) -> bool {
        self.host.as_deref().is_some_and(|host| !host.is_empty()) && self.port > 0
    }

    /// `true` when both user and password are present.
    pub fn should_authenticate(&self) -> bool {
        self.user.is_some() && self.password.is_some()
    }

    /// The proxy address as an `http://host:port` URL, if the proxy is usable.
    pub fn proxy_url(&self) -> Option<String> {
        if !self.should_use_proxy() {
            return None;
        }
        let host = self.host.as_deref()?;
        if host.contains(':') && !host.starts_with('[') {
            Some(format!("http://[{host}]:{}", self.port))
        } else {
            Some(format!("http://{host}:{}", self.port))
        }
    }

    /// The credential pair, if proxy authentication applies.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.user.as_deref(), self.password.as_deref()) {
            (Some(user), Some(password)) => Some((user, password)),
            _ => None,
        }
    }
}

impl std::fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
