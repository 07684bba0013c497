use std::path::PathBuf;

use clap::Args;
use notifier_settings::NotificationsFile;
use serde::Serialize;

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Settings file (TOML).
    #[arg(long)]
    pub config: PathBuf,
}

#[derive(Debug, Serialize)]
struct Summary<'a> {
    valid: bool,
    notifications: Vec<&'a str>,
}

pub fn run(args: &ValidateArgs, format: OutputFormat) -> anyhow::Result<()> {
    let file = NotificationsFile::load(&args.config)?;
    file.validate()?;

    let summary = Summary {
        valid: true,
        notifications: file.notifications.iter().map(|n| n.name.as_str()).collect(),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => {
            println!(
                "{}: {} notification(s) valid",
                args.config.display(),
                summary.notifications.len()
            );
            for name in &summary.notifications {
                println!("  {name}");
            }
        }
    }
    Ok(())
}
