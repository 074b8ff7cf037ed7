use serenity::builder::{
    CreateCommand, CreateCommandOption, CreateEmbed, CreateMessage, EditInteractionResponse,
};
use serenity::model::application::{CommandInteraction, CommandOptionType, ResolvedValue};
use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::services::price_service;
use crate::utils::errors::{user_message, FETCH_FAILED};

pub fn register() -> CreateCommand {
    CreateCommand::new("goldprice")
        .description("Fetch current gold prices from vang.today API")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "type",
                "Gold type code (e.g., XAUUSD, SJL1L10, SJ9999)",
            )
            .required(false)
            .set_autocomplete(true),
        )
}

/// Price embed for `code`, or every instrument when `None`.
/// The error is the message to show the user.
async fn price_embed(ctx: &Context, code: Option<&str>) -> Result<CreateEmbed, String> {
    let (prices, _) = super::clients(ctx).await?;

    match price_service::get_price_summary(&prices, code).await {
        Ok(Some(summary)) => Ok(price_service::create_price_embed(&summary)),
        Ok(None) => Err(FETCH_FAILED.to_string()),
        Err(e) => Err(user_message(&e)),
    }
}

/// `!goldprice [type]`
pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    tracing::info!("💰 Gold price command called with args: {:?}", args);

    let code = args.first().map(|c| c.to_uppercase());
    let embed = price_embed(ctx, code.as_deref()).await?;

    msg.channel_id
        .send_message(ctx, CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}

/// `/goldprice [type]`
pub async fn run(ctx: &Context, command: &CommandInteraction) -> Result<(), String> {
    command.defer(&ctx.http).await.map_err(|e| e.to_string())?;

    let code = command
        .data
        .options()
        .into_iter()
        .find_map(|opt| match (opt.name, opt.value) {
            ("type", ResolvedValue::String(code)) => Some(code.trim().to_uppercase()),
            _ => None,
        });
    tracing::info!("💰 /goldprice called by {} with type {:?}", command.user.id, code);

    let response = match price_embed(ctx, code.as_deref()).await {
        Ok(embed) => EditInteractionResponse::new().embed(embed),
        Err(message) => EditInteractionResponse::new().content(message),
    };

    command
        .edit_response(&ctx.http, response)
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
