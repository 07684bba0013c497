use std::collections::HashSet;
use std::path::Path;

use notifier_invoker::InvokerConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SettingsError;
use crate::notification::NotificationSettings;

/// A settings file: shared transport settings plus the notifications.
///
/// # Example
///
/// ```toml
/// [invoker]
/// timeout_secs = 10
///
/// [[notifications]]
/// name = "pr-opened"
/// url = "https://ci.example.com/hooks/pr"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationsFile {
    /// Transport settings applied to every invocation.
    #[serde(default)]
    pub invoker: InvokerConfig,
    /// Notifications in file order.
    #[serde(default)]
    pub notifications: Vec<NotificationSettings>,
}

impl NotificationsFile {
    /// Read and parse a settings file. The contents are not validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file = Self::from_toml_str(&contents)?;
        info!(
            path = %path.display(),
            notifications = file.notifications.len(),
            "loaded notification settings"
        );
        Ok(file)
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(contents)?)
    }

    /// Validate every notification and check that names are unique.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let mut seen = HashSet::new();
        for notification in &self.notifications {
            if notification.name.trim().is_empty() {
                return Err(SettingsError::MissingField {
                    notification: notification.url.clone(),
                    field: "name",
                });
            }
            if !seen.insert(notification.name.as_str()) {
                return Err(SettingsError::DuplicateName(notification.name.clone()));
            }
            notification.validate()?;
        }
        Ok(())
    }

    /// Look up a notification by name.
    pub fn find(&self, name: &str) -> Result<&NotificationSettings, SettingsError> {
        self.notifications
            .iter()
            .find(|n| n.name == name)
            .ok_or_else(|| SettingsError::NotFound(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = r#"
        [invoker]
        timeout_secs = 5
        follow_redirects = false

        [[notifications]]
        name = "pr-opened"
        url = "http://example.test/hook"
        method = "POST"
        post_content = "{}"

        [[notifications.headers]]
        name = "X-Event"
        value = "opened"

        [[notifications]]
        name = "pr-merged"
        url = "http://example.test/merged"
        proxy_server = "proxy.local"
        proxy_port = "3128"
    "#;

    #[test]
    fn parses_sample() {
        let file = NotificationsFile::from_toml_str(SAMPLE).unwrap();
        assert_eq!(file.invoker.timeout_secs, 5);
        assert!(!file.invoker.follow_redirects);
        assert_eq!(file.invoker.connect_timeout_secs, 10);
        assert_eq!(file.notifications.len(), 2);
        assert_eq!(file.notifications[0].headers[0].name, "X-Event");
        file.validate().unwrap();

        let merged = file.find("pr-merged").unwrap();
        let request = merged.to_invocation_request().unwrap();
        assert_eq!(request.method(), "GET");
        assert!(request.should_use_proxy());
    }

    #[test]
    fn empty_file_is_valid() {
        let file = NotificationsFile::from_toml_str("").unwrap();
        assert!(file.notifications.is_empty());
        assert_eq!(file.invoker, InvokerConfig::default());
        file.validate().unwrap();
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let toml = r#"
            [[notifications]]
            name = "dup"
            url = "http://example.test/a"

            [[notifications]]
            name = "dup"
            url = "http://example.test/b"
        "#;
        let file = NotificationsFile::from_toml_str(toml).unwrap();
        assert!(matches!(
            file.validate(),
            Err(SettingsError::DuplicateName(name)) if name == "dup"
        ));
    }

    #[test]
    fn first_invalid_notification_is_reported() {
        let toml = r#"
            [[notifications]]
            name = "good"
            url = "http://example.test/a"

            [[notifications]]
            name = "bad"
            url = "http://example.test/b"
            proxy_port = "eighty"
        "#;
        let file = NotificationsFile::from_toml_str(toml).unwrap();
        assert!(matches!(
            file.validate(),
            Err(SettingsError::InvalidProxyPort { notification, .. }) if notification == "bad"
        ));
    }

    #[test]
    fn find_unknown_name() {
        let file = NotificationsFile::from_toml_str(SAMPLE).unwrap();
        assert!(matches!(
            file.find("nope"),
            Err(SettingsError::NotFound(name)) if name == "nope"
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = NotificationsFile::from_toml_str("[[notifications]\nname = ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn missing_name_is_a_parse_error() {
        let toml = r#"
            [[notifications]]
            url = "http://example.test/a"
        "#;
        assert!(matches!(
            NotificationsFile::from_toml_str(toml),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let loaded = NotificationsFile::load(file.path()).unwrap();
        assert_eq!(loaded.notifications.len(), 2);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(
            NotificationsFile::load(&path),
            Err(SettingsError::Io { path: p, .. }) if p == path
        ));
    }
}
