use crate::core::{FetchOutcome, Record};
use crate::utils::error::{ReportError, Result};
use crate::utils::error_log::ErrorLog;
use crate::utils::validation::validate_source_url;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// `Authorization: Bearer <key>` when a non-empty key is given, nothing otherwise.
pub fn auth_headers(api_key: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    if let Some(key) = api_key.filter(|key| !key.is_empty()) {
        let value =
            HeaderValue::from_str(&format!("Bearer {}", key)).map_err(|_| unsendable_key())?;
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

fn unsendable_key() -> ReportError {
    ReportError::InvalidConfigValueError {
        field: "API_KEY".to_string(),
        value: "<redacted>".to_string(),
        reason: "Value cannot be sent as an HTTP header".to_string(),
    }
}

/// Objects become a single record, arrays one record per element.
pub fn normalize_payload(payload: Value) -> Result<Vec<Record>> {
    match payload {
        Value::Array(items) => Ok(items.into_iter().map(Record::from).collect()),
        Value::Object(data) => Ok(vec![Record::new(data)]),
        other => Err(ReportError::UnexpectedPayload {
            message: format!("expected a JSON object or array, got {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub struct ApiFetcher {
    client: Client,
    key_rejected: bool,
}

impl ApiFetcher {
    pub fn new(headers: HeaderMap) -> Result<Self> {
        Self::with_timeout(headers, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(headers: HeaderMap, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            key_rejected: false,
        })
    }

    /// A key that cannot be sent as a header does not stop the run: every
    /// fetch then fails and is logged like any other API error.
    pub fn for_api_key(api_key: Option<&str>) -> Result<Self> {
        match auth_headers(api_key) {
            Ok(headers) => Self::new(headers),
            Err(e) => {
                tracing::warn!("⚠️ {}; every API call will be skipped", e);
                let mut fetcher = Self::new(HeaderMap::new())?;
                fetcher.key_rejected = true;
                Ok(fetcher)
            }
        }
    }

    /// Never fails: errors are written to `error_log` and yield no records.
    pub async fn fetch(&self, url: &str, error_log: &ErrorLog) -> Vec<Record> {
        self.fetch_source(url, error_log).await.records
    }

    pub async fn fetch_source(&self, url: &str, error_log: &ErrorLog) -> FetchOutcome {
        tracing::info!("🌐 Calling API: {}", url);

        match self.try_fetch(url).await {
            Ok(records) => {
                tracing::info!("📊 Fetched {} records from {}", records.len(), url);
                FetchOutcome {
                    records,
                    failed: false,
                }
            }
            Err(e) => {
                error_log.record(&format!("API call failed for {}", url), &e);
                println!(
                    "ERROR: API call failed for {}, check {}",
                    url,
                    error_log.path().display()
                );
                FetchOutcome {
                    records: Vec::new(),
                    failed: true,
                }
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<Vec<Record>> {
        if self.key_rejected {
            return Err(unsendable_key());
        }
        validate_source_url(url)?;

        let response = self.client.get(url).send().await?;
        tracing::debug!("API response status: {}", response.status());

        let payload: Value = response.error_for_status()?.json().await?;
        normalize_payload(payload)
    }
}
