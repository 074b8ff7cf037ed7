pub mod autocomplete;
pub mod goldchart;
pub mod goldprice;
pub mod help;

use std::sync::Arc;
use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::application::{Command, Interaction};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use tracing::{error, info, warn};

use crate::api::quickchart::QuickChartClient;
use crate::api::vang_today::GoldPriceClient;

/// Clients shared by every command, read from the client data map
pub(crate) async fn clients(ctx: &Context) -> Result<(Arc<GoldPriceClient>, Arc<QuickChartClient>), String> {
    let data = ctx.data.read().await;
    let prices = data
        .get::<crate::PriceApi>()
        .ok_or("Gold price client not initialized".to_string())?
        .clone();
    let charts = data
        .get::<crate::ChartApi>()
        .ok_or("Chart client not initialized".to_string())?
        .clone();
    Ok((prices, charts))
}

/// Register the slash commands globally
pub async fn register(ctx: &Context) {
    let commands = vec![goldprice::register(), goldchart::register()];
    match Command::set_global_commands(&ctx.http, commands).await {
        Ok(registered) => info!("Registered {} slash commands", registered.len()),
        Err(e) => error!("Failed to register slash commands: {}", e),
    }
}

pub async fn handle_interaction(ctx: &Context, interaction: &Interaction) {
    match interaction {
        Interaction::Command(command) => {
            let result = match command.data.name.as_str() {
                "goldprice" => goldprice::run(ctx, command).await,
                "goldchart" => goldchart::run(ctx, command).await,
                other => {
                    warn!("Unknown slash command: {}", other);
                    return;
                }
            };
            if let Err(e) = result {
                error!("❌ Error executing /{}: {}", command.data.name, e);
            }
        }
        Interaction::Autocomplete(command) => {
            if let Err(e) = autocomplete::respond(ctx, command).await {
                warn!("Autocomplete for /{} failed: {}", command.data.name, e);
            }
        }
        _ => {}
    }
}

pub async fn handle_message(ctx: &Context, msg: &Message) {
    if msg.author.bot {
        return;
    }

    let prefix = {
        let data = ctx.data.read().await;
        match data.get::<crate::CommandPrefix>() {
            Some(prefix) => prefix.clone(),
            None => return,
        }
    };

    let Some(content) = msg.content.strip_prefix(prefix.as_str()) else {
        return;
    };

    // Parse command and arguments
    let parts: Vec<&str> = content.split_whitespace().collect();
    if parts.is_empty() {
        return;
    }

    let command = parts[0].to_lowercase();
    let args = &parts[1..];

    let result = match command.as_str() {
        "goldprice" | "gp" | "gold" => goldprice::execute(ctx, msg, args).await,
        "goldchart" | "gc" | "chart" => goldchart::execute(ctx, msg, args).await,
        "help" => help::execute(ctx, msg, &prefix).await,
        _ => return,
    };

    if let Err(e) = result {
        error!("❌ Error executing command {}: {}", command, e);

        let embed = CreateEmbed::default()
            .title("Command Error")
            .description(e)
            .color(0xff0000);

        if let Err(e) = msg
            .channel_id
            .send_message(ctx, CreateMessage::default().embed(embed))
            .await
        {
            warn!("Failed to send error message for {}: {}", command, e);
        }
    }
}
