pub mod fire;
pub mod invoke;
pub mod validate;

use notifier_invoker::InvocationOutcome;
use serde::Serialize;

use crate::OutputFormat;

/// Printable summary of one invocation.
#[derive(Debug, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub url: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Report {
    pub fn new(name: Option<String>, url: &str, outcome: &InvocationOutcome) -> Self {
        match outcome {
            InvocationOutcome::Completed(response) => Self {
                name,
                url: url.to_owned(),
                completed: true,
                status: Some(response.status_code),
                body: Some(response.body.clone()),
                error: None,
            },
            InvocationOutcome::Failed(err) => Self {
                name,
                url: url.to_owned(),
                completed: false,
                status: err.status(),
                body: None,
                error: Some(err.to_string()),
            },
        }
    }

    fn text(&self) -> String {
        let label = self.name.as_deref().unwrap_or(&self.url);
        match (&self.error, self.status) {
            (None, Some(status)) => {
                let body = self.body.as_deref().unwrap_or_default();
                if body.is_empty() {
                    format!("{label}: {status}")
                } else {
                    format!("{label}: {status}\n{body}")
                }
            }
            (Some(error), _) => format!("{label}: failed: {error}"),
            (None, None) => format!("{label}: completed"),
        }
    }
}

pub fn print_reports(reports: &[Report], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            if let [report] = reports {
                println!("{}", serde_json::to_string_pretty(report)?);
            } else {
                println!("{}", serde_json::to_string_pretty(reports)?);
            }
        }
        OutputFormat::Text => {
            for report in reports {
                println!("{}", report.text());
            }
        }
    }
    Ok(())
}
