use std::collections::HashMap;
use serde::Deserialize;
use tracing::warn;

use crate::models::instrument::{Instrument, DOMESTIC_CURRENCY};
use crate::models::quote::{
    HistoryEntry, HistorySeries, PriceResponse, Quote, QuoteSnapshot, SingleQuote, UpdateStamp,
};

/// Quote as it appears inside the `prices` map of the all-instruments response
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuote {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub buy: f64,
    #[serde(default)]
    pub sell: f64,
    #[serde(default)]
    pub change_buy: f64,
    #[serde(default)]
    pub change_sell: f64,
    pub currency: Option<String>,
}

/// Top-level envelope from `GET /api/prices`.
///
/// Which fields are populated depends on the query: `type` alone yields the
/// single-instrument fields, no `type` yields `prices`, `type` with `days`
/// yields `history`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPriceResponse {
    pub success: bool,
    pub timestamp: Option<f64>,
    pub time: Option<String>,
    pub date: Option<String>,
    pub count: Option<u32>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    pub buy: Option<f64>,
    pub sell: Option<f64>,
    pub change_buy: Option<f64>,
    pub change_sell: Option<f64>,
    pub currency: Option<String>,
    pub prices: Option<HashMap<String, RawQuote>>,
    pub days: Option<u32>,
    pub history: Option<Vec<HistoryEntry>>,
}

/// Currency for a quote that may not state one: the instrument's own, else domestic
fn resolve_currency(code: &str, currency: Option<String>) -> String {
    currency
        .filter(|c| !c.is_empty())
        .or_else(|| code.parse::<Instrument>().ok().map(|i| i.currency().to_string()))
        .unwrap_or_else(|| DOMESTIC_CURRENCY.to_string())
}

fn display_rank(code: &str) -> usize {
    code.parse::<Instrument>()
        .map(Instrument::rank)
        .unwrap_or(Instrument::ALL.len())
}

impl From<RawPriceResponse> for PriceResponse {
    fn from(raw: RawPriceResponse) -> Self {
        if !raw.success {
            return PriceResponse::Unsuccessful;
        }

        let stamp = UpdateStamp {
            timestamp: raw.timestamp.map(|ts| ts as i64),
            date: raw.date,
            time: raw.time,
        };

        if let Some(entries) = raw.history {
            return PriceResponse::History(HistorySeries {
                code: raw.kind,
                days: raw.days,
                entries,
                stamp,
            });
        }

        if let (Some(name), Some(code)) = (raw.name, raw.kind) {
            let currency = resolve_currency(&code, raw.currency);
            return PriceResponse::Single(SingleQuote {
                quote: Quote {
                    name,
                    buy: raw.buy.unwrap_or_default(),
                    sell: raw.sell.unwrap_or_default(),
                    change_buy: raw.change_buy.unwrap_or_default(),
                    change_sell: raw.change_sell.unwrap_or_default(),
                    currency,
                },
                code,
                stamp,
            });
        }

        if let Some(prices) = raw.prices {
            let mut quotes: Vec<(String, Quote)> = prices
                .into_iter()
                .map(|(code, q)| {
                    let currency = resolve_currency(&code, q.currency);
                    let quote = Quote {
                        name: q.name,
                        buy: q.buy,
                        sell: q.sell,
                        change_buy: q.change_buy,
                        change_sell: q.change_sell,
                        currency,
                    };
                    (code, quote)
                })
                .collect();
            quotes.sort_by(|(a, _), (b, _)| display_rank(a).cmp(&display_rank(b)).then_with(|| a.cmp(b)));

            return PriceResponse::Snapshot(QuoteSnapshot {
                quotes,
                count: raw.count,
                stamp,
            });
        }

        warn!("Gold price API reported success without any price data");
        PriceResponse::Unsuccessful
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> PriceResponse {
        serde_json::from_str::<RawPriceResponse>(body).unwrap().into()
    }

    #[test]
    fn test_unsuccessful_short_circuits() {
        let response = parse(r#"{"success": false, "name": "Nhẫn SJC", "type": "SJ9999", "buy": 1}"#);
        assert_eq!(response, PriceResponse::Unsuccessful);
        assert!(!response.is_success());
    }

    #[test]
    fn test_single_quote() {
        let response = parse(
            r#"{"success": true, "timestamp": 1735787400, "date": "2025-01-02", "time": "10:10",
                "type": "SJ9999", "name": "Nhẫn SJC", "buy": 84500000, "sell": 86000000,
                "change_buy": 500000, "change_sell": -200000}"#,
        );
        let PriceResponse::Single(single) = response else {
            panic!("expected single quote, got {:?}", response);
        };
        assert_eq!(single.code, "SJ9999");
        assert_eq!(single.quote.buy, 84_500_000.0);
        assert_eq!(single.quote.change_sell, -200_000.0);
        assert_eq!(single.quote.currency, "VND");
        assert_eq!(single.stamp.timestamp, Some(1735787400));
    }

    #[test]
    fn test_single_world_spot_takes_instrument_currency() {
        let response = parse(r#"{"success": true, "type": "XAUUSD", "name": "XAU", "buy": 2345.6, "sell": 2346.1}"#);
        let PriceResponse::Single(single) = response else {
            panic!("expected single quote");
        };
        assert_eq!(single.quote.currency, "USD");
    }

    #[test]
    fn test_snapshot_ordered_by_instrument_table() {
        let response = parse(
            r#"{"success": true, "count": 3, "date": "2025-01-02", "time": "10:10", "prices": {
                "SJ9999": {"name": "Nhẫn SJC", "buy": 1, "sell": 2, "change_buy": 0, "change_sell": 0, "currency": "VND"},
                "ZZNEW": {"name": "New", "buy": 1, "sell": 2, "change_buy": 0, "change_sell": 0, "currency": "VND"},
                "XAUUSD": {"name": "World", "buy": 1, "sell": 2, "change_buy": 0, "change_sell": 0, "currency": "USD"}
            }}"#,
        );
        let PriceResponse::Snapshot(snapshot) = response else {
            panic!("expected snapshot");
        };
        let codes: Vec<&str> = snapshot.quotes.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(codes, vec!["XAUUSD", "SJ9999", "ZZNEW"]);
        assert_eq!(snapshot.count, Some(3));
    }

    #[test]
    fn test_history_wins_over_single_fields() {
        let response = parse(
            r#"{"success": true, "type": "SJ9999", "name": "Nhẫn SJC", "days": 2, "history": [
                {"date": "2025-01-02", "prices": {"SJ9999": {"name": "Nhẫn SJC", "buy": 2, "sell": 3, "day_change_buy": 1, "day_change_sell": 1, "updates": 4}}},
                {"date": "2025-01-01", "prices": {"SJ9999": {"name": "Nhẫn SJC", "buy": 1, "sell": 2, "day_change_buy": 0, "day_change_sell": 0, "updates": 2}}}
            ]}"#,
        );
        let PriceResponse::History(series) = response else {
            panic!("expected history");
        };
        assert_eq!(series.entries.len(), 2);
        assert_eq!(series.entries[0].date, "2025-01-02");
        assert_eq!(series.entries[0].prices["SJ9999"].updates, 4);
        assert_eq!(series.days, Some(2));
    }

    #[test]
    fn test_success_without_payload_is_unsuccessful() {
        assert_eq!(parse(r#"{"success": true}"#), PriceResponse::Unsuccessful);
    }
}
