use serenity::builder::{
    CreateCommand, CreateCommandOption, CreateEmbed, CreateMessage, EditInteractionResponse,
};
use serenity::model::application::{CommandInteraction, CommandOptionType, ResolvedValue};
use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::error::MAX_HISTORY_DAYS;
use crate::services::chart_service::{self, DEFAULT_CHART_DAYS, DEFAULT_CHART_INSTRUMENT};
use crate::utils::errors::{user_message, HISTORY_FETCH_FAILED};

const DAYS_USAGE: &str = "❌ Days parameter must be a number between 1 and 30";

pub fn register() -> CreateCommand {
    CreateCommand::new("goldchart")
        .description("Generate a chart for gold price history")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "type",
                "Gold type code (e.g., SJL1L10, SJ9999) - Default: SJ9999",
            )
            .required(false)
            .set_autocomplete(true),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::Integer,
                "days",
                "Number of days for historical data (1-30)",
            )
            .required(false)
            .min_int_value(1)
            .max_int_value(MAX_HISTORY_DAYS as u64),
        )
}

/// Check a day count before anything is fetched
pub fn validate_days(days: i64) -> Result<i64, String> {
    if (1..=MAX_HISTORY_DAYS).contains(&days) {
        Ok(days)
    } else {
        Err(DAYS_USAGE.to_string())
    }
}

/// Parse the optional day count argument of the message command
pub fn parse_days(arg: Option<&str>) -> Result<i64, String> {
    match arg {
        None => Ok(DEFAULT_CHART_DAYS),
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| DAYS_USAGE.to_string())
            .and_then(validate_days),
    }
}

async fn chart_embed(ctx: &Context, code: &str, days: i64) -> Result<CreateEmbed, String> {
    let (prices, charts) = super::clients(ctx).await?;

    match chart_service::get_history_chart(&prices, &charts, code, days).await {
        Ok(Some(chart)) => Ok(chart_service::create_chart_embed(&chart)),
        Ok(None) => Err(HISTORY_FETCH_FAILED.to_string()),
        Err(e) => Err(user_message(&e)),
    }
}

/// `!goldchart [type] [days]`
pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    tracing::info!("🎨 Gold chart command received from user {} with args: {:?}", msg.author.id, args);

    let code = args
        .first()
        .map(|c| c.to_uppercase())
        .unwrap_or_else(|| DEFAULT_CHART_INSTRUMENT.to_string());
    let days = parse_days(args.get(1).copied())?;

    if let Err(e) = msg.channel_id.broadcast_typing(&ctx.http).await {
        tracing::warn!("Failed to broadcast typing: {}", e);
    }

    let embed = chart_embed(ctx, &code, days).await?;

    msg.channel_id
        .send_message(ctx, CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}

/// `/goldchart [type] [days]`
pub async fn run(ctx: &Context, command: &CommandInteraction) -> Result<(), String> {
    command.defer(&ctx.http).await.map_err(|e| e.to_string())?;

    let mut code = DEFAULT_CHART_INSTRUMENT.to_string();
    let mut days = DEFAULT_CHART_DAYS;
    for opt in command.data.options() {
        match (opt.name, opt.value) {
            ("type", ResolvedValue::String(value)) => code = value.trim().to_uppercase(),
            ("days", ResolvedValue::Integer(value)) => days = value,
            _ => {}
        }
    }
    tracing::info!("🎨 /goldchart called by {} for {} ({} days)", command.user.id, code, days);

    let result = match validate_days(days) {
        Ok(days) => chart_embed(ctx, &code, days).await,
        Err(message) => Err(message),
    };

    let response = match result {
        Ok(embed) => EditInteractionResponse::new().embed(embed),
        Err(message) => EditInteractionResponse::new().content(message),
    };

    command
        .edit_response(&ctx.http, response)
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
