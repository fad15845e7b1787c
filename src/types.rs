use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// A single piece of legislation as published in the bills document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    #[serde(default, deserialize_with = "nullable")]
    pub bill_number: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    /// Free-text status, e.g. "Passed House"
    #[serde(default, deserialize_with = "nullable")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_action_date: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub sponsors: Vec<Sponsor>,
}

/// Sponsor of a bill
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sponsor {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// The whole bills document, loaded as one unit
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BillCollection {
    pub last_updated: String,
    pub bills: Vec<Bill>,
    /// Entries dropped because they could not be decoded as a bill
    #[serde(skip)]
    pub skipped: usize,
}

impl Bill {
    /// Raw date of the latest action, falling back to the status date
    pub fn action_date_raw(&self) -> Option<&str> {
        non_empty(self.last_action_date.as_deref()).or_else(|| non_empty(self.status_date.as_deref()))
    }

    /// Parsed date of the latest action; `None` when missing or unparsable
    pub fn action_date(&self) -> Option<NaiveDate> {
        self.action_date_raw().and_then(parse_date)
    }

    pub fn analysis_url(&self) -> Option<&str> {
        non_empty(self.analysis_url.as_deref())
    }

    pub fn state_name(&self) -> &str {
        self.state_name.as_deref().unwrap_or("")
    }

    pub fn is_federal(&self) -> bool {
        self.state_code.as_deref() == Some("US")
    }
}

impl Sponsor {
    /// Display label, e.g. "Jane Doe (D)"
    pub fn label(&self) -> String {
        match non_empty(self.party.as_deref()) {
            Some(party) => format!("{} ({})", self.name, party),
            None => self.name.clone(),
        }
    }
}

/// Parse a calendar date from the formats seen in bills documents.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive ISO date-times.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Treat an explicit `null` the same as a missing field
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
