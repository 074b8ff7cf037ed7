//! Daily gold price push to a fixed channel.
//!
//! The job owns one timer task at most. `start` and `stop` are idempotent, each
//! fire runs on its own task so that stopping never interrupts a delivery in
//! flight and a failing fire cannot take the timer down with it.

use std::fmt;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serenity::async_trait;
use serenity::builder::CreateMessage;
use serenity::http::Http;
use serenity::model::channel::ChannelType;
use serenity::model::id::{ChannelId, GuildId};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::api::vang_today::GoldPriceClient;
use crate::error::DeliveryError;
use crate::models::instrument::Instrument;
use crate::models::summary::PriceSummary;
use crate::services::price_service;

pub const DAILY_HOUR: u32 = 7;
pub const DAILY_MINUTE: u32 = 0;
pub const DAILY_TIMEZONE: Tz = chrono_tz::Asia::Ho_Chi_Minh;

/// When the job fires next
pub trait Schedule: fmt::Display + Send + Sync {
    /// First fire time strictly after `after`
    fn next_after(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>>;
}

/// Fires once per day at a fixed wall-clock time in a fixed timezone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyTrigger {
    pub hour: u32,
    pub minute: u32,
    pub tz: Tz,
}

impl Default for DailyTrigger {
    fn default() -> Self {
        Self {
            hour: DAILY_HOUR,
            minute: DAILY_MINUTE,
            tz: DAILY_TIMEZONE,
        }
    }
}

impl fmt::Display for DailyTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "daily at {:02}:{:02} {}", self.hour, self.minute, self.tz)
    }
}

impl Schedule for DailyTrigger {
    fn next_after(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let mut date = after.with_timezone(&self.tz).date_naive();
        // A local time can be skipped by a DST gap; give up after a few days
        for _ in 0..4 {
            let candidate = date
                .and_hms_opt(self.hour, self.minute, 0)?
                .and_local_timezone(self.tz)
                .earliest()
                .map(|local| local.with_timezone(&Utc));
            if let Some(candidate) = candidate {
                if candidate > after {
                    return Some(candidate);
                }
            }
            date = date.succ_opt()?;
        }
        None
    }
}

/// Guild and channel the daily summary goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChannel {
    pub id: ChannelId,
    pub name: String,
}

/// Capability the job uses to reach Discord
#[async_trait]
pub trait ChannelGateway: Send + Sync {
    /// Look the destination up; only guild text channels qualify
    async fn resolve_channel(&self, destination: Destination) -> Result<ResolvedChannel, DeliveryError>;

    async fn deliver(&self, channel: &ResolvedChannel, summary: &PriceSummary) -> Result<(), DeliveryError>;
}

/// Gateway backed by the serenity HTTP client
pub struct SerenityGateway {
    http: Arc<Http>,
}

impl SerenityGateway {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ChannelGateway for SerenityGateway {
    async fn resolve_channel(&self, destination: Destination) -> Result<ResolvedChannel, DeliveryError> {
        let Destination { guild_id, channel_id } = destination;

        let guild = guild_id.to_partial_guild(&self.http).await.map_err(|e| {
            debug!("Failed to fetch guild {}: {}", guild_id, e);
            DeliveryError::GuildNotFound(guild_id.get())
        })?;

        let channels = guild.id.channels(&self.http).await.map_err(|e| {
            debug!("Failed to fetch channels of guild {}: {}", guild_id, e);
            DeliveryError::ChannelNotFound(channel_id.get())
        })?;

        match channels.get(&channel_id) {
            Some(channel) if channel.kind == ChannelType::Text => Ok(ResolvedChannel {
                id: channel.id,
                name: channel.name.clone(),
            }),
            _ => Err(DeliveryError::ChannelNotFound(channel_id.get())),
        }
    }

    async fn deliver(&self, channel: &ResolvedChannel, summary: &PriceSummary) -> Result<(), DeliveryError> {
        let embed = price_service::create_price_embed(summary);
        channel
            .id
            .send_message(&self.http, CreateMessage::default().embed(embed))
            .await
            .map_err(|e| DeliveryError::Send(e.to_string()))?;
        Ok(())
    }
}

/// What happened on one fire
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FireOutcome {
    Delivered,
    Unsuccessful,
    FetchFailed,
    Unresolved,
    DeliveryFailed,
}

pub struct DailyPriceJob {
    prices: Arc<GoldPriceClient>,
    gateway: Arc<dyn ChannelGateway>,
    destination: Destination,
    instrument: Instrument,
    schedule: Box<dyn Schedule>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl DailyPriceJob {
    pub fn new(
        prices: Arc<GoldPriceClient>,
        gateway: Arc<dyn ChannelGateway>,
        destination: Destination,
        instrument: Instrument,
    ) -> Self {
        Self::with_schedule(prices, gateway, destination, instrument, Box::new(DailyTrigger::default()))
    }

    pub fn with_schedule(
        prices: Arc<GoldPriceClient>,
        gateway: Arc<dyn ChannelGateway>,
        destination: Destination,
        instrument: Instrument,
        schedule: Box<dyn Schedule>,
    ) -> Self {
        Self {
            prices,
            gateway,
            destination,
            instrument,
            schedule,
            timer: Mutex::new(None),
        }
    }

    pub async fn is_running(&self) -> bool {
        self.timer
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Register the daily timer. Returns `false` if it was already running.
    pub async fn start(self: &Arc<Self>) -> bool {
        let mut timer = self.timer.lock().await;
        if timer.as_ref().is_some_and(|handle| !handle.is_finished()) {
            debug!("Daily gold price job already running");
            return false;
        }

        let job = Arc::clone(self);
        *timer = Some(tokio::spawn(job.run_schedule()));
        info!("Daily gold price job started ({})", self.schedule);
        true
    }

    /// Cancel future fires. A fire already in progress completes on its own.
    /// Returns `false` if the job was not running.
    pub async fn stop(&self) -> bool {
        match self.timer.lock().await.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                info!("Daily gold price job stopped");
                true
            }
            _ => {
                debug!("Daily gold price job was not running");
                false
            }
        }
    }

    async fn run_schedule(self: Arc<Self>) {
        let mut last = Utc::now();
        loop {
            let Some(next) = self.schedule.next_after(last) else {
                error!("Could not compute the next daily fire after {}", last);
                return;
            };
            debug!("Next daily gold price at {}", next);

            let wait = (next - Utc::now()).to_std().unwrap_or_default();
            tokio::time::sleep(wait).await;

            let job = Arc::clone(&self);
            tokio::spawn(async move {
                job.fire().await;
            });

            last = next.max(Utc::now());
        }
    }

    /// Fetch, format and deliver once. Never fails; the outcome is logged and returned.
    pub async fn fire(&self) -> FireOutcome {
        info!("Running daily gold price job...");

        let summary = match price_service::get_price_summary(&self.prices, Some(self.instrument.code())).await {
            Ok(Some(summary)) => summary,
            Ok(None) => {
                error!("Failed to fetch gold prices from API");
                return FireOutcome::Unsuccessful;
            }
            Err(e) => {
                error!("Error in gold price daily job: {}", e);
                return FireOutcome::FetchFailed;
            }
        };

        let channel = match self.gateway.resolve_channel(self.destination).await {
            Ok(channel) => channel,
            Err(e) => {
                warn!("Daily gold price not sent: {}", e);
                return FireOutcome::Unresolved;
            }
        };

        match self.gateway.deliver(&channel, &summary).await {
            Ok(()) => {
                info!("Daily gold price sent to {}", channel.name);
                FireOutcome::Delivered
            }
            Err(e) => {
                error!("Error in gold price daily job: {}", e);
                FireOutcome::DeliveryFailed
            }
        }
    }
}
