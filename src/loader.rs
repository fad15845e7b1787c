//! Reads the bills document from a file or over HTTP.

use crate::error::LoadError;
use crate::types::{Bill, BillCollection};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default location of the bills document, relative to the working directory
pub const DEFAULT_SOURCE: &str = "bills.json";

/// Where the bills document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillSource {
    Path(PathBuf),
    Url(String),
}

impl BillSource {
    /// `http://` and `https://` values are URLs; anything else is a file path
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            BillSource::Url(trimmed.to_string())
        } else {
            BillSource::Path(PathBuf::from(trimmed))
        }
    }
}

impl Default for BillSource {
    fn default() -> Self {
        BillSource::Path(PathBuf::from(DEFAULT_SOURCE))
    }
}

impl fmt::Display for BillSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillSource::Path(path) => write!(f, "{}", path.display()),
            BillSource::Url(url) => f.write_str(url),
        }
    }
}

/// Read and parse the bills document once
pub async fn load(source: &BillSource) -> Result<BillCollection, LoadError> {
    info!(%source, "loading bills");
    let body = match source {
        BillSource::Path(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| LoadError::Io {
                    path: path.display().to_string(),
                    source: e,
                })?
        }
        BillSource::Url(url) => fetch(url).await?,
    };

    let collection = parse_collection(&body)?;
    info!(
        bills = collection.bills.len(),
        skipped = collection.skipped,
        "loaded bills"
    );
    Ok(collection)
}

async fn fetch(url: &str) -> Result<String, LoadError> {
    let http_err = |e| LoadError::Http {
        url: url.to_string(),
        source: e,
    };

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(15))
        .build()
        .map_err(http_err)?;
    let response = client.get(url).send().await.map_err(http_err)?;
    check_status(url, response.status().as_u16())?;
    response.text().await.map_err(http_err)
}

/// Reject anything outside the 2xx range
pub fn check_status(url: &str, status: u16) -> Result<(), LoadError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(LoadError::Status {
            status,
            url: url.to_string(),
        })
    }
}

/// Parse a bills document.
///
/// The top level must be an object. A missing or `null` `bills` array is an
/// empty collection. Each entry is decoded on its own, so one malformed bill
/// is skipped instead of failing the whole document.
pub fn parse_collection(body: &str) -> Result<BillCollection, LoadError> {
    let document: Value = serde_json::from_str(body)?;
    let Value::Object(mut document) = document else {
        return Err(LoadError::Parse(
            "expected a JSON object at the top level".to_string(),
        ));
    };

    let last_updated = match document.remove("last_updated") {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    let entries = match document.remove("bills") {
        Some(Value::Array(entries)) => entries,
        Some(Value::Null) | None => Vec::new(),
        Some(_) => {
            return Err(LoadError::Parse("\"bills\" must be an array".to_string()));
        }
    };

    let mut bills = Vec::with_capacity(entries.len());
    let mut skipped = 0;
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<Bill>(entry) {
            Ok(bill) => bills.push(bill),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed bill");
                skipped += 1;
            }
        }
    }
    debug!(bills = bills.len(), skipped, "parsed bills document");

    Ok(BillCollection {
        last_updated,
        bills,
        skipped,
    })
}
