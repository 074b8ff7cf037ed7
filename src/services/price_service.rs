use serenity::builder::{CreateEmbed, CreateEmbedFooter};
use serenity::model::Timestamp;
use tracing::info;

use crate::api::vang_today::GoldPriceClient;
use crate::error::GoldPriceError;
use crate::models::quote::{PriceResponse, Quote, QuoteSnapshot, SingleQuote, UpdateStamp};
use crate::models::summary::{PriceSummary, SummaryField};
use crate::utils::format::{format_change, format_price};

pub const GOLD_COLOR: u32 = 0xffd700;

const EMOJI_LEGEND: &str = "💰 = Buy | 📊 = Sell | 📈 = Change";

/// Fetch current prices and build the summary.
///
/// `code` of `None` asks for every instrument. Returns `Ok(None)` when the API
/// reports `success=false`.
pub async fn get_price_summary(
    client: &GoldPriceClient,
    code: Option<&str>,
) -> Result<Option<PriceSummary>, GoldPriceError> {
    let response = client.fetch_prices(code, None, None).await?;
    if !response.is_success() {
        info!("Gold price API reported failure for {:?}", code);
    }
    Ok(build_summary(&response))
}

/// Build the summary for a single quote or a snapshot; `None` for anything else
pub fn build_summary(response: &PriceResponse) -> Option<PriceSummary> {
    match response {
        PriceResponse::Single(single) => Some(single_summary(single)),
        PriceResponse::Snapshot(snapshot) => Some(snapshot_summary(snapshot)),
        PriceResponse::History(_) | PriceResponse::Unsuccessful => None,
    }
}

fn with_stamp(title: String, description: String, fields: Vec<SummaryField>, stamp: &UpdateStamp) -> PriceSummary {
    PriceSummary {
        title,
        description,
        fields,
        footer: stamp.label().map(|label| format!("Last updated: {}", label)),
        timestamp: stamp.instant(),
    }
}

fn field(name: impl Into<String>, value: String, inline: bool) -> SummaryField {
    SummaryField { name: name.into(), value, inline }
}

fn single_summary(single: &SingleQuote) -> PriceSummary {
    let q = &single.quote;
    let fields = vec![
        field("💰 Buy Price", format_price(q.buy, &q.currency), true),
        field("📊 Sell Price", format_price(q.sell, &q.currency), true),
        field("📈 Change Buy", format_change(q.change_buy, &q.currency), true),
        field("📉 Change Sell", format_change(q.change_sell, &q.currency), true),
    ];

    with_stamp(
        format!("Gold Price - {}", single.code),
        q.name.clone(),
        fields,
        &single.stamp,
    )
}

fn snapshot_line(q: &Quote) -> String {
    format!(
        "💰 {} | 📊 {} | 📈 {}",
        format_price(q.buy, &q.currency),
        format_price(q.sell, &q.currency),
        format_change(q.change_buy, &q.currency)
    )
}

fn snapshot_summary(snapshot: &QuoteSnapshot) -> PriceSummary {
    let fields = snapshot
        .quotes
        .iter()
        .map(|(code, q)| field(format!("{} - {}", code, q.name), snapshot_line(q), false))
        .collect();

    let updated = snapshot.stamp.label().unwrap_or_default();
    with_stamp(
        "Gold Prices".to_string(),
        format!("Updated: {}\n\n{}", updated, EMOJI_LEGEND),
        fields,
        &snapshot.stamp,
    )
}

pub fn create_price_embed(summary: &PriceSummary) -> CreateEmbed {
    let mut embed = CreateEmbed::default()
        .title(&summary.title)
        .description(&summary.description)
        .color(GOLD_COLOR);

    for f in &summary.fields {
        embed = embed.field(&f.name, &f.value, f.inline);
    }

    if let Some(footer) = &summary.footer {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }

    if let Some(ts) = summary.timestamp.and_then(|t| Timestamp::from_unix_timestamp(t.timestamp()).ok()) {
        embed = embed.timestamp(ts);
    }

    embed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp() -> UpdateStamp {
        UpdateStamp {
            timestamp: Some(1_735_787_400),
            date: Some("2025-01-02".to_string()),
            time: Some("10:10".to_string()),
        }
    }

    fn quote(name: &str, buy: f64, sell: f64, change_buy: f64, change_sell: f64, currency: &str) -> Quote {
        Quote {
            name: name.to_string(),
            buy,
            sell,
            change_buy,
            change_sell,
            currency: currency.to_string(),
        }
    }

    #[test]
    fn test_single_view() {
        let response = PriceResponse::Single(SingleQuote {
            code: "SJ9999".to_string(),
            quote: quote("Nhẫn SJC", 64_230_000.0, 65_000_000.0, 15_000.0, -5_000.0, "VND"),
            stamp: stamp(),
        });

        let summary = build_summary(&response).unwrap();

        assert_eq!(summary.title, "Gold Price - SJ9999");
        assert_eq!(summary.description, "Nhẫn SJC");
        let values: Vec<&str> = summary.fields.iter().map(|f| f.value.as_str()).collect();
        assert_eq!(values, vec!["64.23M", "65.00M", "+0.02M", "-0.01M"]);
        assert!(summary.fields.iter().all(|f| f.inline));
        assert_eq!(summary.footer.as_deref(), Some("Last updated: 2025-01-02 10:10"));
        assert_eq!(summary.timestamp.unwrap().timestamp(), 1_735_787_400);
    }

    #[test]
    fn test_single_view_foreign_currency() {
        let response = PriceResponse::Single(SingleQuote {
            code: "XAUUSD".to_string(),
            quote: quote("World", 2_345.6, 2_346.0, 0.0, -1.25, "USD"),
            stamp: UpdateStamp::default(),
        });

        let summary = build_summary(&response).unwrap();

        assert_eq!(summary.fields[0].value, "2345.60");
        assert_eq!(summary.fields[2].value, "0.00");
        assert_eq!(summary.fields[3].value, "-1.25");
        assert_eq!(summary.footer, None);
        assert_eq!(summary.timestamp, None);
    }

    #[test]
    fn test_snapshot_view() {
        let response = PriceResponse::Snapshot(QuoteSnapshot {
            quotes: vec![
                ("XAUUSD".to_string(), quote("World", 2_345.6, 2_346.0, 3.0, 0.0, "USD")),
                ("SJ9999".to_string(), quote("Nhẫn SJC", 84_500_000.0, 86_000_000.0, -500_000.0, 0.0, "VND")),
            ],
            count: Some(2),
            stamp: UpdateStamp { timestamp: None, ..stamp() },
        });

        let summary = build_summary(&response).unwrap();

        assert_eq!(summary.title, "Gold Prices");
        assert_eq!(summary.description.matches(EMOJI_LEGEND).count(), 1);
        assert!(summary.description.starts_with("Updated: 2025-01-02 10:10"));
        assert_eq!(summary.fields[0].name, "XAUUSD - World");
        assert_eq!(summary.fields[0].value, "💰 2345.60 | 📊 2346.00 | 📈 +3.00");
        assert_eq!(summary.fields[1].value, "💰 84.50M | 📊 86.00M | 📈 -0.50M");
        assert!(summary.fields.iter().all(|f| !f.inline));
        assert_eq!(summary.timestamp, None);
    }

    #[test]
    fn test_unrenderable_responses() {
        assert_eq!(build_summary(&PriceResponse::Unsuccessful), None);
    }
}
