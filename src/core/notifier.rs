use crate::core::{EmailMessage, MailTransport, RunSummary};
use crate::utils::error::{ReportError, Result};
use crate::utils::error_log::ErrorLog;
use chrono::{DateTime, Timelike, Utc};
use lettre::message::header::{ContentTransferEncoding, ContentType};
use lettre::message::{Attachment, Body, Mailbox, MultiPart, SinglePart};
use lettre::Message;
use std::path::{Path, PathBuf};

pub const SUBJECT: &str = "Daily Multi-API Report";
pub const ERROR_WARNING: &str = "⚠ Some errors were logged during execution. Please check attached system logs on the server / CI artifacts.";

/// Plain-text summary of the run.
pub fn compose_body(summary: &RunSummary, errors_logged: bool, generated_at: DateTime<Utc>) -> String {
    let mut lines = vec![
        "Hello,".to_string(),
        String::new(),
        "Here is your automated multi-API report.".to_string(),
        String::new(),
        format!("Users records: {}", summary.users),
        format!("Posts records: {}", summary.posts),
        format!("Todos records: {}", summary.todos),
    ];

    if errors_logged {
        lines.push(String::new());
        lines.push(ERROR_WARNING.to_string());
    }

    lines.push(String::new());
    lines.push(format!("Generated at: {} UTC", iso_timestamp(generated_at)));
    lines.push(String::new());
    lines.push("-- Automation Bot".to_string());

    lines.join("\n")
}

/// Microseconds are omitted when zero.
fn iso_timestamp(at: DateTime<Utc>) -> String {
    let naive = at.naive_utc();
    if naive.nanosecond() / 1_000 == 0 {
        naive.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        naive.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// The report always, the error log only when it has content.
pub fn select_attachments(report_path: Option<&Path>, error_log: &ErrorLog) -> Vec<PathBuf> {
    let mut attachments: Vec<PathBuf> = report_path.map(Path::to_path_buf).into_iter().collect();

    if error_log.has_content() {
        attachments.push(error_log.path().to_path_buf());
    }

    attachments
}

/// Builds the MIME message. Attachment paths that do not exist are skipped.
pub fn build_message(email: &EmailMessage) -> Result<Message> {
    let from: Mailbox = email.from.parse()?;
    let to: Mailbox = email.to.parse()?;

    let mut multipart = MultiPart::mixed().singlepart(SinglePart::plain(email.body.clone()));

    for path in &email.attachments {
        if !path.exists() {
            tracing::debug!("Skipping missing attachment: {}", path.display());
            continue;
        }

        multipart = multipart.singlepart(attachment_part(path)?);
    }

    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject.clone())
        .multipart(multipart)?;

    Ok(message)
}

fn attachment_part(path: &Path) -> Result<SinglePart> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("attachment")
        .to_string();

    let data = std::fs::read(path)?;
    let body = Body::new_with_encoding(data, ContentTransferEncoding::Base64).map_err(|_| {
        ReportError::ConfigError {
            message: format!("Cannot base64-encode attachment {}", filename),
        }
    })?;
    let content_type = ContentType::parse("application/octet-stream")?;

    Ok(Attachment::new(filename).body(body, content_type))
}

pub struct Notifier<T: MailTransport> {
    transport: T,
}

impl<T: MailTransport> Notifier<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Returns whether the message went out. Failures are recorded in
    /// `error_log`, never returned.
    pub async fn send(&self, email: &EmailMessage, error_log: &ErrorLog) -> bool {
        tracing::info!("📧 Sending email to {}", email.to);

        match self.try_send(email).await {
            Ok(()) => {
                tracing::info!("✅ Email sent successfully!");
                println!("Email sent successfully!");
                true
            }
            Err(e) => {
                error_log.record("Email sending failed", &e);
                println!("ERROR: Email sending failed, check {}", error_log.path().display());
                false
            }
        }
    }

    async fn try_send(&self, email: &EmailMessage) -> Result<()> {
        let message = build_message(email)?;
        self.transport.deliver(message).await
    }
}
