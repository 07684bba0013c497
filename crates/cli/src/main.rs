//! Notifier CLI
//!
//! Fires one-off or configured HTTP notifications from the command line.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

/// Notifier CLI: send configurable outbound HTTP notifications.
#[derive(Parser, Debug)]
#[command(name = "notifier", version, about)]
struct Cli {
    /// Output format.
    #[arg(long, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Perform a single invocation described by flags.
    Invoke(commands::invoke::InvokeArgs),
    /// Invoke notifications from a settings file.
    Fire(commands::fire::FireArgs),
    /// Validate a settings file without sending anything.
    Validate(commands::validate::ValidateArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Invoke(args) => commands::invoke::run(&args, cli.format).await,
        Command::Fire(args) => commands::fire::run(&args, cli.format).await,
        Command::Validate(args) => commands::validate::run(&args, cli.format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_invoke() {
        let cli = Cli::try_parse_from([
            "notifier",
            "invoke",
            "--url",
            "http://example.test/hook",
            "--method",
            "POST",
            "--header",
            "Content-Type=application/json",
            "--header",
            "X-Empty=",
            "--body",
            "{}",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Text);
        let Command::Invoke(args) = cli.command else {
            panic!("expected invoke");
        };
        assert_eq!(args.url, "http://example.test/hook");
        assert_eq!(args.method, "POST");
        assert_eq!(
            args.header,
            vec![
                ("Content-Type".to_owned(), "application/json".to_owned()),
                ("X-Empty".to_owned(), String::new()),
            ]
        );
        assert_eq!(args.body.as_deref(), Some("{}"));
    }

    #[test]
    fn invoke_defaults_to_get() {
        let cli = Cli::try_parse_from(["notifier", "invoke", "--url", "http://example.test"])
            .unwrap();
        let Command::Invoke(args) = cli.command else {
            panic!("expected invoke");
        };
        assert_eq!(args.method, "GET");
        assert!(args.header.is_empty());
        assert!(args.proxy_host.is_none());
    }

    #[test]
    fn proxy_port_requires_host() {
        assert!(
            Cli::try_parse_from([
                "notifier",
                "invoke",
                "--url",
                "http://example.test",
                "--proxy-port",
                "3128",
            ])
            .is_err()
        );
    }

    #[test]
    fn format_is_global() {
        let cli = Cli::try_parse_from([
            "notifier",
            "validate",
            "--config",
            "notifications.toml",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn parses_fire() {
        let cli = Cli::try_parse_from([
            "notifier",
            "--format",
            "json",
            "fire",
            "--config",
            "notifications.toml",
            "--name",
            "pr-opened",
            "--strict",
        ])
        .unwrap();
        let Command::Fire(args) = cli.command else {
            panic!("expected fire");
        };
        assert_eq!(args.name.as_deref(), Some("pr-opened"));
        assert!(args.strict);
    }

    #[test]
    fn header_without_equals_is_rejected() {
        assert!(
            Cli::try_parse_from([
                "notifier",
                "invoke",
                "--url",
                "http://example.test",
                "--header",
                "NoEquals",
            ])
            .is_err()
        );
    }
}
