use std::sync::Arc;
use serenity::async_trait;
use serenity::model::application::Interaction;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tracing::{info, warn, error, debug};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod error;
mod models;
mod services;
mod utils;
#[cfg(test)]
mod testing;

use api::quickchart::QuickChartClient;
use api::vang_today::GoldPriceClient;
use config::Config;
use services::daily_service::{DailyPriceJob, SerenityGateway};

struct Handler;

struct PriceApi;

impl TypeMapKey for PriceApi {
    type Value = Arc<GoldPriceClient>;
}

struct ChartApi;

impl TypeMapKey for ChartApi {
    type Value = Arc<QuickChartClient>;
}

struct CommandPrefix;

impl TypeMapKey for CommandPrefix {
    type Value = String;
}

struct DailyJob;

impl TypeMapKey for DailyJob {
    type Value = Arc<DailyPriceJob>;
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        commands::handle_message(&ctx, &msg).await;
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);

        commands::register(&ctx).await;

        // `ready` fires again after a reconnect
        let job = ctx.data.read().await.get::<DailyJob>().cloned();
        match job {
            Some(job) => {
                if job.is_running().await {
                    debug!("Daily gold price job was already scheduled");
                } else {
                    job.start().await;
                }
            }
            None => warn!("Daily gold price job not initialized"),
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        commands::handle_interaction(&ctx, &interaction).await;
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive("gold_price_bot=debug".parse().unwrap())
            .add_directive("serenity=warn".parse().unwrap()))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("🤖 Starting gold price bot...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };
    info!(
        "Daily {} summary goes to channel {} in guild {}",
        config.daily_instrument, config.destination.channel_id, config.destination.guild_id
    );

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = match Client::builder(&config.discord_token, intents)
        .event_handler(Handler)
        .await
    {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create client: {}", e);
            return;
        }
    };

    let prices = Arc::new(GoldPriceClient::with_base_url(config.gold_api_url.clone()));
    let charts = Arc::new(QuickChartClient::with_base_url(config.quickchart_url.clone()));
    let job = Arc::new(DailyPriceJob::new(
        prices.clone(),
        Arc::new(SerenityGateway::new(client.http.clone())),
        config.destination,
        config.daily_instrument,
    ));

    {
        let mut data = client.data.write().await;
        data.insert::<PriceApi>(prices);
        data.insert::<ChartApi>(charts);
        data.insert::<CommandPrefix>(config.command_prefix.clone());
        data.insert::<DailyJob>(job.clone());
    }

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
            return;
        }
        info!("Shutting down...");
        job.stop().await;
        shard_manager.shutdown_all().await;
    });

    if let Err(e) = client.start().await {
        error!("Client error: {}", e);
    }
}
