use reqwest::header::{CONTENT_LENGTH, HeaderName, HeaderValue};
use reqwest::{Client, Method, Proxy, Url};
use tracing::{debug, error, info, instrument};

use crate::config::InvokerConfig;
use crate::error::InvokeError;
use crate::outcome::{InvocationOutcome, InvocationResponse};
use crate::request::{Header, InvocationRequest};

/// Executes [`InvocationRequest`]s, one HTTP round trip per call.
///
/// A fresh HTTP client is built for every invocation so that proxy routing
/// and proxy credentials belong to that invocation alone. Nothing is shared
/// between concurrent invocations.
#[derive(Debug, Clone, Default)]
pub struct Invoker {
    config: InvokerConfig,
}

impl Invoker {
    /// Create an invoker with the given transport settings.
    pub fn new(config: InvokerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InvokerConfig {
        &self.config
    }

    /// Perform the request and report how it went.
    ///
    /// Never panics and never hands an error back for the caller to handle:
    /// a failure is logged at `error` level and returned as
    /// [`InvocationOutcome::Failed`], which the caller is free to ignore.
    #[instrument(skip(self, request), fields(method = %request.method()))]
    pub async fn invoke(&self, request: &InvocationRequest) -> InvocationOutcome {
        match self.try_invoke(request).await {
            Ok(response) => InvocationOutcome::Completed(response),
            Err(err) => {
                error!(url = %request.url_param(), error = %err, "invocation failed");
                InvocationOutcome::Failed(err)
            }
        }
    }

    async fn try_invoke(
        &self,
        request: &InvocationRequest,
    ) -> Result<InvocationResponse, InvokeError> {
        info!(url = %request.url_param(), "invoking url");

        let url = parse_url(request.url_param())?;
        let client = self.build_client(request)?;
        let method = Method::from_bytes(request.method().as_bytes())
            .map_err(|_| InvokeError::InvalidMethod(request.method().to_owned()))?;

        let mut builder = client.request(method, url);

        for header in request.headers() {
            info!(header = header.name(), value = logged_value(header), "adding header");
            let (name, value) = header_pair(header)?;
            builder = builder.header(name, value);
        }

        if let Some(body) = request
            .post_content()
            .filter(|_| request.should_post_content())
        {
            debug!(method = request.method(), body, "sending request body");
            let bytes = body.as_bytes().to_vec();
            builder = builder
                .header(CONTENT_LENGTH, HeaderValue::from(bytes.len()))
                .body(bytes);
        }

        let response = builder.send().await.map_err(InvokeError::from_send)?;
        let status_code = response.status().as_u16();
        let bytes = response.bytes().await.map_err(InvokeError::from_read)?;
        let body = join_lines(&String::from_utf8_lossy(&bytes));

        if status_code >= 400 {
            return Err(InvokeError::UnexpectedStatus {
                status: status_code,
                body,
            });
        }

        debug!(status = status_code, body = %body, "received response");
        Ok(InvocationResponse { status_code, body })
    }

    /// Build the client for a single invocation: direct, or through the
    /// request's forward proxy with its credentials attached to that proxy.
    fn build_client(&self, request: &InvocationRequest) -> Result<Client, InvokeError> {
        let builder = Client::builder()
            .connect_timeout(self.config.effective_connect_timeout())
            .timeout(self.config.effective_timeout())
            .user_agent(self.config.effective_user_agent())
            .redirect(if self.config.follow_redirects {
                reqwest::redirect::Policy::default()
            } else {
                reqwest::redirect::Policy::none()
            });

        let builder = match request.proxy().proxy_url() {
            Some(proxy_url) => {
                let mut proxy =
                    Proxy::all(proxy_url.as_str()).map_err(|source| InvokeError::Proxy {
                        url: proxy_url.clone(),
                        source,
                    })?;
                if let Some((user, password)) = request.proxy().credentials() {
                    debug!(proxy = %proxy_url, user, "using authenticated proxy");
                    proxy = proxy.basic_auth(user, password);
                } else {
                    debug!(proxy = %proxy_url, "using proxy");
                }
                builder.proxy(proxy)
            }
            // Ambient HTTP_PROXY/HTTPS_PROXY must not reroute a direct request.
            None => builder.no_proxy(),
        };

        builder.build().map_err(InvokeError::Client)
    }
}

fn parse_url(raw: &str) -> Result<Url, InvokeError> {
    let url = Url::parse(raw).map_err(|e| InvokeError::InvalidUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(InvokeError::InvalidUrl {
            url: raw.to_owned(),
            reason: format!("unsupported scheme {scheme}"),
        }),
    }
}

fn header_pair(header: &Header) -> Result<(HeaderName, HeaderValue), InvokeError> {
    let name =
        HeaderName::from_bytes(header.name().as_bytes()).map_err(|e| InvokeError::InvalidHeader {
            name: header.name().to_owned(),
            reason: e.to_string(),
        })?;
    let value = HeaderValue::from_str(header.value()).map_err(|e| InvokeError::InvalidHeader {
        name: header.name().to_owned(),
        reason: e.to_string(),
    })?;
    Ok((name, value))
}

/// Header value as written to the log. Credentials are masked.
fn logged_value(header: &Header) -> &str {
    let name = header.name();
    if name.eq_ignore_ascii_case("authorization") || name.eq_ignore_ascii_case("proxy-authorization")
    {
        "[REDACTED]"
    } else {
        header.value()
    }
}

fn join_lines(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join("\n")
}
