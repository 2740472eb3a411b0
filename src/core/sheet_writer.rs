use crate::core::{CellValue, FieldMapping, Record, SheetData};
use crate::utils::error::Result;
use rust_xlsxwriter::{Format, FormatPattern, Worksheet};

pub const HEADER_FILL: u32 = 0xFFC000;
pub const COLUMN_PADDING: usize = 2;
// Excel 欄寬上限
pub const MAX_COLUMN_WIDTH: usize = 255;

pub fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_pattern(FormatPattern::Solid)
        .set_background_color(HEADER_FILL)
}

/// Projects `records` through `mapping` and renders them into `worksheet`.
pub fn write(worksheet: &mut Worksheet, records: &[Record], mapping: &FieldMapping) -> Result<SheetData> {
    let name = worksheet.name();
    let sheet = SheetData::from_records(&name, mapping, records);
    write_sheet(worksheet, &sheet)?;
    Ok(sheet)
}

pub fn write_sheet(worksheet: &mut Worksheet, sheet: &SheetData) -> Result<()> {
    let header_format = header_format();

    for (col_idx, header) in sheet.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col_idx as u16, header, &header_format)?;
    }

    for (row_idx, row) in sheet.rows.iter().enumerate() {
        let row_num = (row_idx + 1) as u32;
        for (col_idx, cell) in row.iter().enumerate() {
            let col_num = col_idx as u16;
            match cell {
                CellValue::Blank => {}
                CellValue::Text(s) => {
                    worksheet.write_string(row_num, col_num, s)?;
                }
                CellValue::Number(n) => {
                    worksheet.write_number(row_num, col_num, *n)?;
                }
                CellValue::Bool(b) => {
                    worksheet.write_boolean(row_num, col_num, *b)?;
                }
            }
        }
    }

    autosize_columns(worksheet, sheet)
}

fn autosize_columns(worksheet: &mut Worksheet, sheet: &SheetData) -> Result<()> {
    for (col_idx, width) in sheet.column_widths(COLUMN_PADDING).into_iter().enumerate() {
        worksheet.set_column_width(col_idx as u16, width.min(MAX_COLUMN_WIDTH) as f64)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DataCategory;
    use rust_xlsxwriter::Workbook;
    use serde_json::json;

    #[test]
    fn test_write_returns_projected_sheet() {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Users").unwrap();

        let records = vec![
            Record::from(json!({"id": 1, "name": "Ann", "username": "a", "email": "a@x.com"})),
            Record::from(json!({"id": 2, "name": "Bob"})),
        ];
        let sheet = write(worksheet, &records, &DataCategory::Users.field_mapping()).unwrap();

        assert_eq!(sheet.name, "Users");
        assert_eq!(sheet.headers, vec!["ID", "Name", "Username", "Email"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[1][2], CellValue::Blank);
        assert!(workbook.save_to_buffer().is_ok());
    }

    #[test]
    fn test_header_only_sheet() {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        let sheet = write(worksheet, &[], &DataCategory::Posts.field_mapping()).unwrap();

        assert_eq!(sheet.headers.len(), 3);
        assert!(sheet.rows.is_empty());
    }

    #[test]
    fn test_very_long_values_are_written() {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let title = "x".repeat(400);
        let records = vec![Record::from(json!({"id": 1, "userId": 1, "title": title}))];

        let sheet = write(worksheet, &records, &DataCategory::Posts.field_mapping()).unwrap();

        assert_eq!(sheet.column_widths(COLUMN_PADDING)[2], 402);
    }
}
