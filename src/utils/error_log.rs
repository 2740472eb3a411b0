use crate::utils::error::Result;
use chrono::{DateTime, Local};
use std::fmt::Display;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const DEFAULT_ERROR_LOG: &str = "error.log";

/// A single failure recorded during the run.
#[derive(Debug, Clone)]
pub struct ErrorEntry {
    pub timestamp: DateTime<Local>,
    pub context: String,
    pub message: String,
}

impl ErrorEntry {
    /// `<timestamp> [ERROR] <context>: <message>`
    pub fn to_line(&self) -> String {
        format!(
            "{} [ERROR] {}: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S,%3f"),
            self.context,
            self.message
        )
    }
}

/// Append-only error sink backed by a plain-text file.
///
/// The file is truncated by [`ErrorLog::create`], so whatever it holds at the
/// end of a run was written by that run.
pub struct ErrorLog {
    path: PathBuf,
    entries: Mutex<Vec<ErrorEntry>>,
}

impl ErrorLog {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        File::create(&path)?;

        Ok(Self {
            path,
            entries: Mutex::new(Vec::new()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self, context: &str, error: impl Display) {
        let entry = ErrorEntry {
            timestamp: Local::now(),
            context: context.to_string(),
            message: error.to_string(),
        };

        tracing::error!("❌ {}: {}", entry.context, entry.message);

        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        // 寫檔失敗只影響附件，不中斷流程
        if let Err(e) = self.append_line(&entry.to_line()) {
            tracing::warn!(
                "⚠️ Could not write to error log {}: {}",
                self.path.display(),
                e
            );
        }

        entries.push(entry);
    }

    fn append_line(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)
    }

    pub fn entries(&self) -> Vec<ErrorEntry> {
        match self.entries.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// True when the log file exists and has content.
    pub fn has_content(&self) -> bool {
        fs::metadata(&self.path)
            .map(|meta| meta.is_file() && meta.len() > 0)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_truncates_previous_run() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("error.log");
        std::fs::write(&path, "2024-01-01 00:00:00,000 [ERROR] stale: boom\n").unwrap();

        let log = ErrorLog::create(&path).unwrap();

        assert!(!log.has_content());
        assert!(log.entries().is_empty());
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn test_record_appends_formatted_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("error.log");
        let log = ErrorLog::create(&path).unwrap();

        log.record("API call failed for http://x/users", "timed out");
        log.record("Email sending failed", "connection refused");

        assert!(log.has_content());
        assert_eq!(log.entries().len(), 2);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[ERROR] API call failed for http://x/users: timed out"));
        assert!(lines[1].ends_with("[ERROR] Email sending failed: connection refused"));
    }

    #[test]
    fn test_missing_file_has_no_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("error.log");
        let log = ErrorLog::create(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(!log.has_content());
    }

    #[test]
    fn test_entry_line_format() {
        let entry = ErrorEntry {
            timestamp: Local::now(),
            context: "ctx".to_string(),
            message: "msg".to_string(),
        };
        let line = entry.to_line();

        // 2024-01-01 12:00:00,123 [ERROR] ctx: msg
        assert_eq!(line.find(" [ERROR] "), Some(23));
        assert!(line.ends_with("ctx: msg"));
    }
}
