use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::path::PathBuf;

/// One JSON object returned by a data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub data: Map<String, Value>,
}

impl Record {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(data) => Self { data },
            // 非物件元素保留為空列，維持列數與回應一致
            _ => Self::default(),
        }
    }
}

/// Ordered (display header, source key) pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    columns: Vec<(String, String)>,
}

impl FieldMapping {
    pub fn new(columns: &[(&str, &str)]) -> Self {
        Self {
            columns: columns
                .iter()
                .map(|(header, key)| (header.to_string(), key.to_string()))
                .collect(),
        }
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|(header, _)| header.clone()).collect()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(_, key)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Missing keys become blank cells.
    pub fn project(&self, record: &Record) -> Vec<CellValue> {
        self.keys()
            .map(|key| CellValue::from_json(record.get(key)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Blank,
    Text(String),
    Number(f64),
    Bool(bool),
}

/// Excel rejects longer cell strings.
pub const MAX_CELL_CHARS: usize = 32_767;

/// Largest integer magnitude an f64 holds exactly (2^53).
const MAX_EXACT_INTEGER: u64 = 1 << 53;

impl CellValue {
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => CellValue::Blank,
            Some(Value::String(s)) => CellValue::text(s),
            Some(Value::Bool(b)) => CellValue::Bool(*b),
            Some(Value::Number(n)) => Self::from_number(n),
            Some(other) => CellValue::text(&other.to_string()),
        }
    }

    fn from_number(n: &Number) -> Self {
        let exact = match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => i.unsigned_abs() <= MAX_EXACT_INTEGER,
            (None, Some(u)) => u <= MAX_EXACT_INTEGER,
            (None, None) => true,
        };

        match n.as_f64() {
            Some(f) if exact => CellValue::Number(f),
            // 超過 2^53 的整數以文字保留全部位數
            _ => CellValue::Text(n.to_string()),
        }
    }

    fn text(s: &str) -> Self {
        if s.chars().count() <= MAX_CELL_CHARS {
            CellValue::Text(s.to_string())
        } else {
            CellValue::Text(s.chars().take(MAX_CELL_CHARS).collect())
        }
    }

    /// The text a spreadsheet shows for this cell, used for column sizing.
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Blank => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Bool(true) => "TRUE".to_string(),
            CellValue::Bool(false) => "FALSE".to_string(),
        }
    }
}

/// A worksheet before it is rendered: header row plus data rows.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetData {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetData {
    pub fn from_records(name: &str, mapping: &FieldMapping, records: &[Record]) -> Self {
        Self {
            name: name.to_string(),
            headers: mapping.headers(),
            rows: records.iter().map(|record| mapping.project(record)).collect(),
        }
    }

    /// Longest displayed value per column (header included) plus padding.
    pub fn column_widths(&self, padding: usize) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                let longest_cell = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.display_text().chars().count())
                    .max()
                    .unwrap_or(0);
                header.chars().count().max(longest_cell) + padding
            })
            .collect()
    }
}

/// The three data categories the report covers, in worksheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataCategory {
    Users,
    Posts,
    Todos,
}

impl DataCategory {
    pub const ALL: [DataCategory; 3] = [DataCategory::Users, DataCategory::Posts, DataCategory::Todos];

    pub const fn sheet_name(self) -> &'static str {
        match self {
            DataCategory::Users => "Users",
            DataCategory::Posts => "Posts",
            DataCategory::Todos => "Todos",
        }
    }

    pub fn field_mapping(self) -> FieldMapping {
        match self {
            DataCategory::Users => FieldMapping::new(&[
                ("ID", "id"),
                ("Name", "name"),
                ("Username", "username"),
                ("Email", "email"),
            ]),
            DataCategory::Posts => {
                FieldMapping::new(&[("ID", "id"), ("User ID", "userId"), ("Title", "title")])
            }
            DataCategory::Todos => FieldMapping::new(&[
                ("ID", "id"),
                ("User ID", "userId"),
                ("Title", "title"),
                ("Completed", "completed"),
            ]),
        }
    }

    pub const fn default_url(self) -> &'static str {
        match self {
            DataCategory::Users => "https://jsonplaceholder.typicode.com/users",
            DataCategory::Posts => "https://jsonplaceholder.typicode.com/posts",
            DataCategory::Todos => "https://jsonplaceholder.typicode.com/todos",
        }
    }

    pub const fn env_var(self) -> &'static str {
        match self {
            DataCategory::Users => "API1_URL",
            DataCategory::Posts => "API2_URL",
            DataCategory::Todos => "API3_URL",
        }
    }
}

/// Records fetched from one source, and whether the fetch failed.
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    pub records: Vec<Record>,
    pub failed: bool,
}

#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachments: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub users: usize,
    pub posts: usize,
    pub todos: usize,
    pub failed_sources: Vec<DataCategory>,
    pub report_path: Option<PathBuf>,
    pub errors_logged: bool,
    pub email_sent: bool,
}

impl RunSummary {
    pub fn all_sources_failed(&self) -> bool {
        DataCategory::ALL
            .iter()
            .all(|category| self.failed_sources.contains(category))
    }
}
