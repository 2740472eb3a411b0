use crate::core::fetcher::ApiFetcher;
use crate::core::notifier::{self, Notifier};
use crate::core::report_builder;
use crate::core::{ConfigProvider, DataCategory, EmailMessage, FetchOutcome, MailTransport, RunSummary};
use crate::utils::error::Result;
use crate::utils::error_log::ErrorLog;
use chrono::Utc;
use std::time::Instant;

/// Fetch → report → email, once.
pub struct ReportJob<C: ConfigProvider, T: MailTransport> {
    config: C,
    fetcher: ApiFetcher,
    notifier: Notifier<T>,
    error_log: ErrorLog,
}

impl<C: ConfigProvider, T: MailTransport> ReportJob<C, T> {
    pub fn new(config: C, transport: T, error_log: ErrorLog) -> Result<Self> {
        let fetcher = ApiFetcher::for_api_key(config.api_key())?;
        Ok(Self::with_fetcher(config, fetcher, transport, error_log))
    }

    pub fn with_fetcher(config: C, fetcher: ApiFetcher, transport: T, error_log: ErrorLog) -> Self {
        Self {
            config,
            fetcher,
            notifier: Notifier::new(transport),
            error_log,
        }
    }

    pub fn error_log(&self) -> &ErrorLog {
        &self.error_log
    }

    /// Every step failure ends up in the error log; the job itself never fails.
    pub async fn run(&self) -> RunSummary {
        let started = Instant::now();
        tracing::info!("🚀 Starting multi-API report job...");

        // 三個來源彼此獨立，並行呼叫但保持順序
        let (users, posts, todos) = tokio::join!(
            self.fetch(DataCategory::Users),
            self.fetch(DataCategory::Posts),
            self.fetch(DataCategory::Todos),
        );

        let mut summary = RunSummary {
            users: users.records.len(),
            posts: posts.records.len(),
            todos: todos.records.len(),
            ..Default::default()
        };
        for (category, outcome) in DataCategory::ALL.iter().zip([&users, &posts, &todos]) {
            if outcome.failed {
                summary.failed_sources.push(*category);
            }
        }

        tracing::info!("📝 Creating Excel report...");
        summary.report_path = match report_builder::build(
            &users.records,
            &posts.records,
            &todos.records,
            self.config.report_path(),
        ) {
            Ok(path) => Some(path),
            Err(e) => {
                self.error_log.record("Report generation failed", &e);
                None
            }
        };

        summary.errors_logged = self.error_log.has_content();
        let email = EmailMessage {
            from: self.config.sender().to_string(),
            to: self.config.recipient().to_string(),
            subject: notifier::SUBJECT.to_string(),
            body: notifier::compose_body(&summary, summary.errors_logged, Utc::now()),
            attachments: notifier::select_attachments(
                summary.report_path.as_deref(),
                &self.error_log,
            ),
        };

        tracing::info!("📧 Sending email...");
        summary.email_sent = self.notifier.send(&email, &self.error_log).await;
        summary.errors_logged = self.error_log.has_content();

        tracing::info!(
            "🏁 Job finished in {:?}: users={}, posts={}, todos={}, failed sources={}",
            started.elapsed(),
            summary.users,
            summary.posts,
            summary.todos,
            summary.failed_sources.len()
        );

        summary
    }

    async fn fetch(&self, category: DataCategory) -> FetchOutcome {
        let url = self.config.source_url(category);
        tracing::debug!("Fetching {} from {}", category.sheet_name(), url);
        self.fetcher.fetch_source(url, &self.error_log).await
    }
}
