use chrono::NaiveDate;
use serenity::builder::CreateEmbed;
use tracing::{debug, info};

use crate::api::quickchart::models::{
    Axis, ChartConfig, ChartData, ChartOptions, Dataset, Legend, Plugins, Scales, Title,
};
use crate::api::quickchart::QuickChartClient;
use crate::api::vang_today::GoldPriceClient;
use crate::error::GoldPriceError;
use crate::models::instrument::{Instrument, DOMESTIC_CURRENCY};
use crate::models::quote::{HistoryEntry, HistorySeries, PriceResponse};
use crate::services::price_service::GOLD_COLOR;
use crate::utils::format::to_millions;

pub const DEFAULT_CHART_INSTRUMENT: &str = "SJ9999";
pub const DEFAULT_CHART_DAYS: i64 = 30;

/// Rendered history chart, ready to embed
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryChart {
    pub instrument: Instrument,
    /// Number of days the API actually returned
    pub entries: usize,
    pub url: String,
}

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw.trim(), format).ok())
}

/// Entries in chronological order.
///
/// When every date parses the entries are sorted by date, so an ordered series
/// stays put. Otherwise the API's newest-first order is reversed.
pub fn oldest_first(entries: &[HistoryEntry]) -> Vec<&HistoryEntry> {
    let dates: Option<Vec<NaiveDate>> = entries.iter().map(|e| parse_date(&e.date)).collect();

    match dates {
        Some(dates) => {
            let mut dated: Vec<(NaiveDate, &HistoryEntry)> = dates.into_iter().zip(entries).collect();
            dated.sort_by_key(|(date, _)| *date);
            dated.into_iter().map(|(_, entry)| entry).collect()
        }
        None => {
            debug!("Unrecognised history date format, reversing API order");
            entries.iter().rev().collect()
        }
    }
}

fn dataset(label: &str, data: Vec<f64>, color: &str, fill: &str) -> Dataset {
    Dataset {
        label: label.to_string(),
        data,
        border_color: color.to_string(),
        background_color: fill.to_string(),
        border_width: 2,
        fill: true,
        tension: 0.3,
    }
}

fn title(text: String) -> Title {
    Title { display: true, text }
}

/// Build the line chart for one instrument's history.
///
/// Fails with `NoData` when the series is empty or any day lacks the instrument.
pub fn build_chart_config(
    series: &HistorySeries,
    instrument: Instrument,
    requested_days: i64,
) -> Result<ChartConfig, GoldPriceError> {
    let code = instrument.code();
    if series.entries.is_empty() {
        return Err(GoldPriceError::NoData(code.to_string()));
    }

    let domestic = instrument.currency() == DOMESTIC_CURRENCY;
    let scale = |v: f64| if domestic { to_millions(v) } else { v };

    let mut labels = Vec::with_capacity(series.entries.len());
    let mut buy = Vec::with_capacity(series.entries.len());
    let mut sell = Vec::with_capacity(series.entries.len());

    for entry in oldest_first(&series.entries) {
        let quote = entry
            .prices
            .get(code)
            .ok_or_else(|| GoldPriceError::NoData(code.to_string()))?;
        labels.push(entry.date.clone());
        buy.push(scale(quote.buy));
        sell.push(scale(quote.sell));
    }

    let (buy_label, sell_label, axis) = if domestic {
        ("Buy Price (M)", "Sell Price (M)", format!("Price (Million {})", DOMESTIC_CURRENCY))
    } else {
        ("Buy Price", "Sell Price", format!("Price ({})", instrument.currency()))
    };

    Ok(ChartConfig {
        kind: "line".to_string(),
        data: ChartData {
            labels,
            datasets: vec![
                dataset(buy_label, buy, "#FFD700", "rgba(255, 215, 0, 0.1)"),
                dataset(sell_label, sell, "#FFA500", "rgba(255, 165, 0, 0.1)"),
            ],
        },
        options: ChartOptions {
            responsive: true,
            plugins: Plugins {
                title: title(format!("Gold Price History - {} ({} days)", code, requested_days)),
                legend: Legend { display: true },
            },
            scales: Scales {
                y: Axis { title: title(axis) },
            },
        },
    })
}

/// Build the chart configuration and have QuickChart host it
pub async fn render_history_chart(
    charts: &QuickChartClient,
    series: &HistorySeries,
    instrument: Instrument,
    requested_days: i64,
) -> Result<String, GoldPriceError> {
    let config = build_chart_config(series, instrument, requested_days)?;
    debug!("Rendering {} point chart for {}", config.data.labels.len(), instrument);
    Ok(charts.create_url(&config).await?)
}

/// Fetch history for `code` and render it.
///
/// Returns `Ok(None)` when the API reports `success=false`.
pub async fn get_history_chart(
    prices: &GoldPriceClient,
    charts: &QuickChartClient,
    code: &str,
    days: i64,
) -> Result<Option<HistoryChart>, GoldPriceError> {
    let response = prices.fetch_prices(Some(code), Some(days), None).await?;

    let series = match response {
        PriceResponse::History(series) => series,
        PriceResponse::Unsuccessful => {
            info!("Gold price API reported failure for {} history", code);
            return Ok(None);
        }
        _ => return Err(GoldPriceError::NoData(code.to_string())),
    };

    // Validated by fetch_prices above
    let instrument = code.parse::<Instrument>()?;
    let url = render_history_chart(charts, &series, instrument, days).await?;
    info!("Rendered {} day chart for {}", series.entries.len(), code);

    Ok(Some(HistoryChart {
        instrument,
        entries: series.entries.len(),
        url,
    }))
}

pub fn create_chart_embed(chart: &HistoryChart) -> CreateEmbed {
    CreateEmbed::default()
        .title(format!("Gold Price History - {} ({} days)", chart.instrument, chart.entries))
        .description(chart.instrument.display_name())
        .image(&chart.url)
        .color(GOLD_COLOR)
}
