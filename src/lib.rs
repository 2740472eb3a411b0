pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::smtp::{SmtpMailer, SmtpSettings};
pub use config::ReportConfig;
pub use core::{fetcher::ApiFetcher, job::ReportJob, notifier::Notifier};
pub use utils::error::{ReportError, Result};
pub use utils::error_log::ErrorLog;
