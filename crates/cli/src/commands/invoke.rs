use anyhow::Context;
use clap::Args;
use notifier_invoker::{InvocationRequest, Invoker, InvokerConfig};

use super::{Report, print_reports};
use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct InvokeArgs {
    /// Target URL. Whitespace is escaped before sending.
    #[arg(long)]
    pub url: String,
    /// HTTP method.
    #[arg(long, default_value = "GET")]
    pub method: String,
    /// Request header (NAME=VALUE), repeatable and sent in order.
    #[arg(long, value_parser = parse_key_val)]
    pub header: Vec<(String, String)>,
    /// Request body (string or @file path). Sent only with POST and PUT.
    #[arg(long)]
    pub body: Option<String>,
    /// Forward proxy host.
    #[arg(long)]
    pub proxy_host: Option<String>,
    /// Forward proxy port.
    #[arg(long, requires = "proxy_host")]
    pub proxy_port: Option<i32>,
    /// Proxy user for Basic authentication.
    #[arg(long, requires = "proxy_host")]
    pub proxy_user: Option<String>,
    /// Proxy password for Basic authentication.
    #[arg(long, env = "NOTIFIER_PROXY_PASSWORD", hide_env_values = true)]
    pub proxy_password: Option<String>,
    /// Total request timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
    /// Connect timeout in seconds.
    #[arg(long)]
    pub connect_timeout_secs: Option<u64>,
}

pub(crate) fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid NAME=VALUE: no `=` found in `{s}`"))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

fn read_body(body: &str) -> anyhow::Result<String> {
    match body.strip_prefix('@') {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("failed to read body from {path}"))
        }
        None => Ok(body.to_owned()),
    }
}

impl InvokeArgs {
    fn to_request(&self) -> anyhow::Result<InvocationRequest> {
        let body = self.body.as_deref().map(read_body).transpose()?;

        let mut request = InvocationRequest::new()
            .with_url_param(&self.url)
            .with_method(self.method.clone())
            .with_post_content(body);
        for (name, value) in &self.header {
            request = request.with_header(name.clone(), value.clone());
        }

        Ok(request
            .with_proxy_server(self.proxy_host.clone())
            .with_proxy_port(self.proxy_port.unwrap_or(0))
            .with_proxy_user(self.proxy_user.clone())
            .with_proxy_password(self.proxy_password.clone()))
    }

    fn to_config(&self) -> InvokerConfig {
        let mut config = InvokerConfig::default();
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout_secs(secs);
        }
        if let Some(secs) = self.connect_timeout_secs {
            config = config.with_connect_timeout_secs(secs);
        }
        config
    }
}

pub async fn run(args: &InvokeArgs, format: OutputFormat) -> anyhow::Result<()> {
    let request = args.to_request()?;
    let invoker = Invoker::new(args.to_config());

    let outcome = invoker.invoke(&request).await;
    let report = Report::new(None, request.url_param(), &outcome);
    print_reports(std::slice::from_ref(&report), format)?;

    if outcome.is_failed() {
        anyhow::bail!("invocation of {} failed", request.url_param());
    }
    Ok(())
}
