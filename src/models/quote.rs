//! Price data returned by the gold price API, after the envelope has been classified

use std::collections::HashMap;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

/// Date/time information the API attaches to every successful response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateStamp {
    /// Unix seconds, when the server sends one
    pub timestamp: Option<i64>,
    pub date: Option<String>,
    pub time: Option<String>,
}

impl UpdateStamp {
    /// Server date and time joined verbatim, `None` when neither was sent
    pub fn label(&self) -> Option<String> {
        let parts: Vec<&str> = [self.date.as_deref(), self.time.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.timestamp.and_then(|ts| Utc.timestamp_opt(ts, 0).single())
    }
}

/// Buy/sell quote for one instrument at one point in time
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub name: String,
    pub buy: f64,
    pub sell: f64,
    pub change_buy: f64,
    pub change_sell: f64,
    pub currency: String,
}

/// Response to a query for a single instrument
#[derive(Debug, Clone, PartialEq)]
pub struct SingleQuote {
    pub code: String,
    pub quote: Quote,
    pub stamp: UpdateStamp,
}

/// Response to a query without an instrument: every instrument at once
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteSnapshot {
    /// Ordered by the instrument table, unknown codes last
    pub quotes: Vec<(String, Quote)>,
    pub count: Option<u32>,
    pub stamp: UpdateStamp,
}

/// One instrument's quote inside a history entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryQuote {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub buy: f64,
    #[serde(default)]
    pub sell: f64,
    #[serde(default)]
    pub day_change_buy: f64,
    #[serde(default)]
    pub day_change_sell: f64,
    #[serde(default)]
    pub updates: u32,
}

/// One calendar day of history
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryEntry {
    pub date: String,
    #[serde(default)]
    pub prices: HashMap<String, HistoryQuote>,
}

/// Per-day history for one instrument, newest first as served by the API
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySeries {
    pub code: Option<String>,
    pub days: Option<u32>,
    pub entries: Vec<HistoryEntry>,
    pub stamp: UpdateStamp,
}

/// Classified API envelope
#[derive(Debug, Clone, PartialEq)]
pub enum PriceResponse {
    Single(SingleQuote),
    Snapshot(QuoteSnapshot),
    History(HistorySeries),
    /// `success=false`, or a successful envelope carrying none of the known shapes
    Unsuccessful,
}

impl PriceResponse {
    pub fn is_success(&self) -> bool {
        !matches!(self, PriceResponse::Unsuccessful)
    }
}
