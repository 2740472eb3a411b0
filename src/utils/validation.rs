use crate::utils::error::{ReportError, Result};
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Only absolute `http`/`https` URLs are fetched.
pub fn validate_source_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| ReportError::InvalidConfigValueError {
        field: "source_url".to_string(),
        value: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(ReportError::InvalidConfigValueError {
            field: "source_url".to_string(),
            value: url.to_string(),
            reason: format!("Unsupported scheme '{}'", scheme),
        }),
    }
}

/// The error log has to be writable for anything else to be reported, so its
/// path is the one setting checked before the run.
pub fn validate_log_path(field_name: &str, path: &Path) -> Result<()> {
    let reason = if path.as_os_str().is_empty() {
        "Path cannot be empty"
    } else if path.is_dir() {
        "Path is a directory"
    } else {
        return Ok(());
    };

    Err(ReportError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: path.display().to_string(),
        reason: reason.to_string(),
    })
}

/// An SMTP setting that is unset or blank counts as missing.
pub fn require_setting<'a>(field_name: &str, value: &'a Option<String>) -> Result<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ReportError::MissingConfigError {
            field: field_name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_source_url() {
        assert!(validate_source_url("https://jsonplaceholder.typicode.com/users").is_ok());
        assert!(validate_source_url("http://127.0.0.1:8080/posts").is_ok());
        assert!(validate_source_url("").is_err());
        assert!(validate_source_url("not a url").is_err());

        let err = validate_source_url("ftp://example.com/todos").unwrap_err();
        assert!(err.to_string().contains("Unsupported scheme 'ftp'"));
    }

    #[test]
    fn test_validate_log_path() {
        let temp_dir = TempDir::new().unwrap();

        assert!(validate_log_path("error_log", &temp_dir.path().join("error.log")).is_ok());
        assert!(validate_log_path("error_log", Path::new("")).is_err());
        assert!(validate_log_path("error_log", temp_dir.path()).is_err());
    }

    #[test]
    fn test_require_setting() {
        let err = require_setting("SMTP_HOST", &None).unwrap_err();
        assert_eq!(err.to_string(), "Missing configuration: SMTP_HOST");

        assert!(require_setting("SMTP_HOST", &Some("   ".to_string())).is_err());
        assert_eq!(
            require_setting("SMTP_HOST", &Some("smtp.example.com".to_string())).unwrap(),
            "smtp.example.com"
        );
    }
}
