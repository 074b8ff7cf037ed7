use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use super::models::{ChartConfig, ChartError, CreateChartRequest, CreateChartResponse};

/// QuickChart client: turns a Chart.js configuration into a hosted image URL
pub struct QuickChartClient {
    http_client: HttpClient,
    base_url: String,
    width: u32,
    height: u32,
}

impl QuickChartClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://quickchart.io";

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            width: 500,
            height: 300,
        }
    }

    /// POST /chart/create
    ///
    /// Registers the chart with QuickChart and returns the short URL it is hosted at.
    /// The URL is opaque to us; Discord fetches the image from it.
    pub async fn create_url(&self, chart: &ChartConfig) -> Result<String, ChartError> {
        let url = format!("{}/chart/create", self.base_url);
        let body = CreateChartRequest {
            chart,
            width: self.width,
            height: self.height,
            background_color: "transparent",
            format: "png",
        };

        let response = self.http_client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body_text = response.text().await.unwrap_or_default();
            warn!("QuickChart error {}: {}", status, body_text);
            return Err(ChartError::Status(status, body_text));
        }

        let created = response.json::<CreateChartResponse>().await?;
        match created.url {
            Some(chart_url) if created.success && !chart_url.is_empty() => {
                debug!("QuickChart created {}", chart_url);
                Ok(chart_url)
            }
            _ => Err(ChartError::Rejected),
        }
    }
}
