use clap::Parser;
use daily_report::utils::{logger, validation::Validate};
use daily_report::{ErrorLog, ReportConfig, ReportJob, SmtpMailer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ReportConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting daily-report");
    if config.verbose {
        tracing::debug!("SMTP settings: {:?}", config.smtp_settings());
        tracing::debug!(
            "Sources: users={}, posts={}, todos={}",
            config.users_url,
            config.posts_url,
            config.todos_url
        );
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let error_log = match ErrorLog::create(&config.error_log) {
        Ok(log) => log,
        Err(e) => {
            eprintln!(
                "❌ Cannot create error log {}: {}",
                config.error_log.display(),
                e
            );
            std::process::exit(1);
        }
    };

    let strict = config.strict;
    let mailer = SmtpMailer::new(config.smtp_settings());
    let job = match ReportJob::new(config, mailer, error_log) {
        Ok(job) => job,
        Err(e) => {
            tracing::error!(
                "❌ Could not set up the HTTP client: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let summary = job.run().await;

    if summary.errors_logged {
        tracing::warn!(
            "⚠️ Errors were logged during execution, see {}",
            job.error_log().path().display()
        );
    }

    println!("Job finished.");

    if strict && summary.all_sources_failed() {
        eprintln!("❌ Every API call failed; exiting with code 2 (--strict)");
        std::process::exit(2);
    }

    Ok(())
}
