//! Rendered price summary, independent of the Discord embed builder

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Human-readable view of a single quote or a quote snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSummary {
    pub title: String,
    pub description: String,
    pub fields: Vec<SummaryField>,
    /// Server date/time, verbatim
    pub footer: Option<String>,
    /// Only set when the server sent a numeric timestamp
    pub timestamp: Option<DateTime<Utc>>,
}
