use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Chart.js configuration understood by QuickChart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub background_color: String,
    pub border_width: u32,
    pub fill: bool,
    pub tension: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub responsive: bool,
    pub plugins: Plugins,
    pub scales: Scales,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub title: Title,
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub display: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub display: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
}

/// Request body for POST /chart/create
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChartRequest<'a> {
    pub chart: &'a ChartConfig,
    pub width: u32,
    pub height: u32,
    pub background_color: &'a str,
    pub format: &'a str,
}

/// Response from POST /chart/create
#[derive(Debug, Clone, Deserialize)]
pub struct CreateChartResponse {
    pub success: bool,
    pub url: Option<String>,
}

#[derive(Error, Debug)]
pub enum ChartError {
    /// Network/request error
    #[error("QuickChart request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx status
    #[error("QuickChart HTTP error ({0}): {1}")]
    Status(u16, String),

    /// Service answered but did not produce a URL
    #[error("QuickChart did not return a chart URL")]
    Rejected,
}
