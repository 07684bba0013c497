//! Persisted notification settings.
//!
//! Notifications are stored in a TOML file ([`NotificationsFile`]), checked
//! with [`NotificationsFile::validate`], and turned into ready-to-invoke
//! requests with [`NotificationSettings::to_invocation_request`].
//!
//! ```rust
//! use notifier_settings::NotificationsFile;
//!
//! let file = NotificationsFile::from_toml_str(r#"
//!     [[notifications]]
//!     name = "pr-opened"
//!     url = "http://example.test/hook"
//!     method = "POST"
//!     post_content = "{}"
//! "#).unwrap();
//! file.validate().unwrap();
//!
//! let request = file.find("pr-opened").unwrap().to_invocation_request().unwrap();
//! assert!(request.should_post_content());
//! ```

pub mod error;
pub mod file;
pub mod notification;

pub use error::SettingsError;
pub use file::NotificationsFile;
pub use notification::{HeaderSetting, NotificationSettings, PortValue};
