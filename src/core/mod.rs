pub mod fetcher;
pub mod job;
pub mod notifier;
pub mod report_builder;
pub mod sheet_writer;

pub use crate::domain::model::{
    CellValue, DataCategory, EmailMessage, FetchOutcome, FieldMapping, Record, RunSummary,
    SheetData,
};
pub use crate::domain::ports::{ConfigProvider, MailTransport};
pub use crate::utils::error::Result;
