use std::path::PathBuf;

use clap::Args;
use notifier_invoker::Invoker;
use notifier_settings::{NotificationSettings, NotificationsFile};
use tracing::info;

use super::{Report, print_reports};
use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct FireArgs {
    /// Settings file (TOML).
    #[arg(long)]
    pub config: PathBuf,
    /// Fire only the notification with this name.
    #[arg(long)]
    pub name: Option<String>,
    /// Exit non-zero when any invocation fails.
    #[arg(long)]
    pub strict: bool,
}

fn select<'a>(
    file: &'a NotificationsFile,
    name: Option<&str>,
) -> anyhow::Result<Vec<&'a NotificationSettings>> {
    Ok(match name {
        Some(name) => vec![file.find(name)?],
        None => file.notifications.iter().collect(),
    })
}

pub async fn run(args: &FireArgs, format: OutputFormat) -> anyhow::Result<()> {
    let file = NotificationsFile::load(&args.config)?;
    file.validate()?;

    let selected = select(&file, args.name.as_deref())?;
    let invoker = Invoker::new(file.invoker.clone());

    let mut reports = Vec::with_capacity(selected.len());
    for notification in selected {
        let request = notification.to_invocation_request()?;
        info!(notification = %notification.name, "firing notification");
        let outcome = invoker.invoke(&request).await;
        reports.push(Report::new(
            Some(notification.name.clone()),
            request.url_param(),
            &outcome,
        ));
    }

    print_reports(&reports, format)?;

    let failed = reports.iter().filter(|r| !r.completed).count();
    if args.strict && failed > 0 {
        anyhow::bail!("{failed} of {} notifications failed", reports.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE: &str = r#"
        [[notifications]]
        name = "first"
        url = "http://example.test/1"

        [[notifications]]
        name = "second"
        url = "http://example.test/2"
    "#;

    #[test]
    fn selects_all_in_file_order() {
        let file = NotificationsFile::from_toml_str(FILE).unwrap();
        let names: Vec<&str> = select(&file, None)
            .unwrap()
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn selects_by_name() {
        let file = NotificationsFile::from_toml_str(FILE).unwrap();
        let selected = select(&file, Some("second")).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].url, "http://example.test/2");

        assert!(select(&file, Some("third")).is_err());
    }

    #[tokio::test]
    async fn strict_fails_on_unreachable_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notifications.toml");
        std::fs::write(
            &path,
            r#"
            [invoker]
            connect_timeout_secs = 1
            timeout_secs = 2

            [[notifications]]
            name = "nowhere"
            url = "http://127.0.0.1:1/hook"
            "#,
        )
        .unwrap();

        let lenient = FireArgs {
            config: path.clone(),
            name: None,
            strict: false,
        };
        run(&lenient, OutputFormat::Json).await.unwrap();

        let strict = FireArgs {
            config: path,
            name: None,
            strict: true,
        };
        assert!(run(&strict, OutputFormat::Json).await.is_err());
    }
}
