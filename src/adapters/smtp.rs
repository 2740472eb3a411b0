use crate::domain::ports::MailTransport;
use crate::utils::error::Result;
use crate::utils::validation::require_setting;
use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;

pub const DEFAULT_SMTP_PORT: u16 = 587;
const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Default)]
pub struct SmtpSettings {
    pub host: Option<String>,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// STARTTLS submission with user/password auth. One connection per message.
pub struct SmtpMailer {
    settings: SmtpSettings,
}

impl SmtpMailer {
    pub fn new(settings: SmtpSettings) -> Self {
        Self { settings }
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let host = require_setting("SMTP_HOST", &self.settings.host)?;
        let user = require_setting("SMTP_USER", &self.settings.user)?;
        let password = require_setting("SMTP_PASS", &self.settings.password)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
            .port(self.settings.port)
            .timeout(Some(SMTP_TIMEOUT))
            .credentials(Credentials::new(user.to_string(), password.to_string()))
            .build();

        Ok(transport)
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn deliver(&self, message: Message) -> Result<()> {
        let transport = self.transport()?;

        tracing::debug!(
            "Connecting to SMTP server {}:{}",
            self.settings.host.as_deref().unwrap_or_default(),
            self.settings.port
        );
        let response = transport.send(message).await?;
        tracing::debug!("SMTP server replied with code {}", response.code());

        Ok(())
    }
}
