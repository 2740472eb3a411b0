use crate::adapters::smtp::{SmtpSettings, DEFAULT_SMTP_PORT};
use crate::core::report_builder::DEFAULT_REPORT_FILE;
use crate::core::{ConfigProvider, DataCategory};
use crate::utils::error::Result;
use crate::utils::error_log::DEFAULT_ERROR_LOG;
use crate::utils::validation::{validate_log_path, Validate};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Clone, Parser)]
#[command(name = "daily-report")]
#[command(about = "Fetch Users, Posts and Todos from JSON APIs and email them as an Excel report")]
pub struct ReportConfig {
    /// SMTP server hostname
    #[arg(long, env = "SMTP_HOST")]
    pub smtp_host: Option<String>,

    /// SMTP submission port
    #[arg(long, env = "SMTP_PORT", default_value_t = DEFAULT_SMTP_PORT)]
    pub smtp_port: u16,

    /// SMTP login, also used as the sender address
    #[arg(long, env = "SMTP_USER")]
    pub smtp_user: Option<String>,

    #[arg(long, env = "SMTP_PASS", hide_env_values = true)]
    pub smtp_pass: Option<String>,

    /// Report recipient
    #[arg(long, env = "TO_EMAIL")]
    pub to_email: Option<String>,

    #[arg(long, env = DataCategory::Users.env_var(), default_value = DataCategory::Users.default_url())]
    pub users_url: String,

    #[arg(long, env = DataCategory::Posts.env_var(), default_value = DataCategory::Posts.default_url())]
    pub posts_url: String,

    #[arg(long, env = DataCategory::Todos.env_var(), default_value = DataCategory::Todos.default_url())]
    pub todos_url: String,

    /// Sent as `Authorization: Bearer <API_KEY>` when set
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, default_value = DEFAULT_REPORT_FILE)]
    pub report_path: PathBuf,

    /// Truncated at the start of every run
    #[arg(long, default_value = DEFAULT_ERROR_LOG)]
    pub error_log: PathBuf,

    /// Exit with code 2 when every API call failed
    #[arg(long)]
    pub strict: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

impl ReportConfig {
    pub fn smtp_settings(&self) -> SmtpSettings {
        SmtpSettings {
            host: self.smtp_host.clone(),
            port: self.smtp_port,
            user: self.smtp_user.clone(),
            password: self.smtp_pass.clone(),
        }
    }
}

impl ConfigProvider for ReportConfig {
    fn source_url(&self, category: DataCategory) -> &str {
        match category {
            DataCategory::Users => &self.users_url,
            DataCategory::Posts => &self.posts_url,
            DataCategory::Todos => &self.todos_url,
        }
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }

    fn report_path(&self) -> &Path {
        &self.report_path
    }

    fn sender(&self) -> &str {
        self.smtp_user.as_deref().unwrap_or_default()
    }

    fn recipient(&self) -> &str {
        self.to_email.as_deref().unwrap_or_default()
    }
}

/// Everything except the error log path is checked where it is used, so a bad
/// URL, API key, report path or SMTP port is logged by the run instead of
/// stopping it.
impl Validate for ReportConfig {
    fn validate(&self) -> Result<()> {
        validate_log_path("error_log", &self.error_log)?;

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ReportConfig {
        let mut argv = vec!["daily-report"];
        argv.extend_from_slice(args);
        ReportConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[
            "--users-url",
            "https://jsonplaceholder.typicode.com/users",
            "--posts-url",
            "https://jsonplaceholder.typicode.com/posts",
            "--todos-url",
            "https://jsonplaceholder.typicode.com/todos",
        ]);

        assert_eq!(config.report_path, PathBuf::from("daily_report.xlsx"));
        assert_eq!(config.error_log, PathBuf::from("error.log"));
        assert!(!config.strict);
        assert!(config.validate().is_ok());
        for category in DataCategory::ALL {
            assert_eq!(config.source_url(category), category.default_url());
        }
    }

    #[test]
    fn test_empty_api_key_is_treated_as_unset() {
        let config = parse(&["--api-key", ""]);
        assert_eq!(config.api_key(), None);

        let config = parse(&["--api-key", "token"]);
        assert_eq!(config.api_key(), Some("token"));
    }

    #[test]
    fn test_sender_is_smtp_user() {
        let config = parse(&["--smtp-user", "bot@example.com", "--to-email", "team@example.com"]);
        assert_eq!(config.sender(), "bot@example.com");
        assert_eq!(config.recipient(), "team@example.com");
        assert_eq!(config.smtp_settings().user.as_deref(), Some("bot@example.com"));
    }

    #[test]
    fn test_validation_rejects_unusable_error_log() {
        let mut config = parse(&[]);
        config.error_log = PathBuf::new();
        assert!(config.validate().is_err());

        let temp_dir = tempfile::TempDir::new().unwrap();
        config.error_log = temp_dir.path().to_path_buf();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_run_time_settings_pass_validation() {
        let config = parse(&["--api-key", "two words", "--smtp-port", "0"]);
        assert_eq!(config.api_key(), Some("two words"));
        assert_eq!(config.smtp_port, 0);
        assert!(config.validate().is_ok());

        let mut config = parse(&[]);
        config.report_path = PathBuf::new();
        assert!(config.validate().is_ok());
    }
}
