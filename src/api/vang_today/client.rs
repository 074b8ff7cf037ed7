use reqwest::Client as HttpClient;
use tracing::debug;

use super::models::RawPriceResponse;
use crate::error::{GoldPriceError, MAX_HISTORY_DAYS};
use crate::models::instrument::Instrument;
use crate::models::quote::PriceResponse;

/// Validated query for the price API.
///
/// Only parameters that were supplied end up in the query string.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuery {
    instrument: Option<Instrument>,
    days: Option<i64>,
    action: Option<String>,
}

impl PriceQuery {
    /// Validate raw parameters. Empty strings count as not supplied.
    ///
    /// # Errors
    /// * `MissingParameter` - `days` given without an instrument code
    /// * `InvalidParameter` - code outside the instrument table
    /// * `DaysOutOfRange` - `days` outside 1..=30
    pub fn new(
        code: Option<&str>,
        days: Option<i64>,
        action: Option<&str>,
    ) -> Result<Self, GoldPriceError> {
        let code = code.filter(|c| !c.is_empty());

        if days.is_some() && code.is_none() {
            return Err(GoldPriceError::MissingParameter {
                required: "type",
                dependent: "days",
            });
        }

        let instrument = code.map(str::parse::<Instrument>).transpose()?;

        if let Some(d) = days {
            if !(1..=MAX_HISTORY_DAYS).contains(&d) {
                return Err(GoldPriceError::DaysOutOfRange { days: d });
            }
        }

        Ok(Self {
            instrument,
            days,
            action: action.filter(|a| !a.is_empty()).map(str::to_string),
        })
    }

    /// Query string pairs, in `type`, `days`, `action` order
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(instrument) = self.instrument {
            params.push(("type", instrument.code().to_string()));
        }
        if let Some(days) = self.days {
            params.push(("days", days.to_string()));
        }
        if let Some(action) = &self.action {
            params.push(("action", action.clone()));
        }
        params
    }
}

/// Client for the vang.today gold price API
pub struct GoldPriceClient {
    http_client: HttpClient,
    base_url: String,
}

impl GoldPriceClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://www.vang.today/api/prices";

    /// Create a client against another endpoint (self-hosted mirror, tests)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }

    /// GET /api/prices
    ///
    /// Validates the parameters before anything is sent. A response with
    /// `success=false` is returned as `PriceResponse::Unsuccessful`, not as an error.
    ///
    /// # Arguments
    /// * `code` - Instrument code; omit for every instrument
    /// * `days` - History window in days (1-30), requires `code`
    /// * `action` - Free-form mode selector passed through to the API
    pub async fn fetch_prices(
        &self,
        code: Option<&str>,
        days: Option<i64>,
        action: Option<&str>,
    ) -> Result<PriceResponse, GoldPriceError> {
        let query = PriceQuery::new(code, days, action)?;
        self.fetch(&query).await
    }

    /// Send an already validated query
    pub async fn fetch(&self, query: &PriceQuery) -> Result<PriceResponse, GoldPriceError> {
        let params = query.params();
        debug!("Fetching gold prices from {} with {:?}", self.base_url, params);

        let raw = self
            .http_client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?
            .json::<RawPriceResponse>()
            .await?;

        debug!(
            "Gold price API answered success={} (history: {}, prices: {})",
            raw.success,
            raw.history.as_ref().map_or(0, Vec::len),
            raw.prices.as_ref().map_or(0, |p| p.len())
        );

        Ok(PriceResponse::from(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubServer;

    /// Port 9 (discard) on loopback: any request that escapes validation fails as transport
    const UNREACHABLE: &str = "http://127.0.0.1:9/api/prices";

    #[test]
    fn test_days_without_type_is_missing_parameter() {
        for action in [None, Some("latest")] {
            let err = PriceQuery::new(None, Some(7), action).unwrap_err();
            assert!(matches!(err, GoldPriceError::MissingParameter { required: "type", dependent: "days" }));
            assert!(err.to_string().contains("`type`"));
            assert!(err.to_string().contains("`days`"));
        }
    }

    #[test]
    fn test_days_bounds() {
        for days in [0, -1, 31, 365] {
            let err = PriceQuery::new(Some("SJ9999"), Some(days), None).unwrap_err();
            assert!(matches!(err, GoldPriceError::DaysOutOfRange { .. }), "days={}", days);
        }
        for days in [1, 7, 30] {
            assert!(PriceQuery::new(Some("SJ9999"), Some(days), None).is_ok());
        }
    }

    #[test]
    fn test_params_omit_missing_values() {
        assert!(PriceQuery::new(None, None, None).unwrap().params().is_empty());
        assert!(PriceQuery::new(Some(""), None, Some("")).unwrap().params().is_empty());

        let query = PriceQuery::new(Some("SJ9999"), Some(7), None).unwrap();
        assert_eq!(
            query.params(),
            vec![("type", "SJ9999".to_string()), ("days", "7".to_string())]
        );

        let query = PriceQuery::new(None, None, Some("latest")).unwrap();
        assert_eq!(query.params(), vec![("action", "latest".to_string())]);
    }

    #[tokio::test]
    async fn test_invalid_code_never_reaches_network() {
        let client = GoldPriceClient::with_base_url(UNREACHABLE.to_string());
        let err = client.fetch_prices(Some("NOPE"), None, None).await.unwrap_err();
        assert!(matches!(err, GoldPriceError::InvalidParameter { .. }));
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let client = GoldPriceClient::with_base_url(UNREACHABLE.to_string());
        let err = client.fetch_prices(Some("SJ9999"), None, None).await.unwrap_err();
        assert!(matches!(err, GoldPriceError::Transport(_)));
        assert!(!err.is_validation());
    }

    #[tokio::test]
    async fn test_fetch_sends_query_and_parses_single_quote() {
        let server = StubServer::serve_once(
            "200 OK",
            r#"{"success": true, "type": "SJ9999", "name": "Nhẫn SJC", "buy": 84500000, "sell": 86000000, "change_buy": 0, "change_sell": 0}"#,
        )
        .await;
        let client = GoldPriceClient::with_base_url(server.url("/api/prices"));

        let response = client.fetch_prices(Some("SJ9999"), None, None).await.unwrap();

        assert!(matches!(response, PriceResponse::Single(ref s) if s.code == "SJ9999"));
        let request_line = server.request_line().await;
        assert_eq!(request_line, "GET /api/prices?type=SJ9999 HTTP/1.1");
    }

    #[tokio::test]
    async fn test_unsuccessful_envelope_is_not_an_error() {
        let server = StubServer::serve_once("500 Internal Server Error", r#"{"success": false}"#).await;
        let client = GoldPriceClient::with_base_url(server.url("/api/prices"));

        let response = client.fetch_prices(None, None, None).await.unwrap();

        assert_eq!(response, PriceResponse::Unsuccessful);
        assert_eq!(server.request_line().await, "GET /api/prices HTTP/1.1");
    }
}
