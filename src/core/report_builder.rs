use crate::core::sheet_writer;
use crate::core::{DataCategory, Record};
use crate::utils::error::Result;
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};

pub const DEFAULT_REPORT_FILE: &str = "daily_report.xlsx";

/// Writes the report to `path`, replacing any existing file.
pub fn build<P: AsRef<Path>>(
    users: &[Record],
    posts: &[Record],
    todos: &[Record],
    path: P,
) -> Result<PathBuf> {
    let path = path.as_ref();
    tracing::info!("📝 Creating Excel report: {}", path.display());

    let mut workbook = Workbook::new();

    for (category, records) in DataCategory::ALL.iter().zip([users, posts, todos]) {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(category.sheet_name())?;
        let sheet = sheet_writer::write(worksheet, records, &category.field_mapping())?;
        tracing::debug!("Sheet {} written with {} rows", sheet.name, sheet.rows.len());
    }

    workbook.save(path)?;
    Ok(path.to_path_buf())
}
