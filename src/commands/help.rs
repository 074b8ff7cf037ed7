use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::models::instrument::Instrument;
use crate::services::daily_service::{DAILY_HOUR, DAILY_MINUTE, DAILY_TIMEZONE};

pub async fn execute(ctx: &Context, msg: &Message, prefix: &str) -> Result<(), String> {
    let types = Instrument::ALL
        .iter()
        .map(|i| format!("`{}` - {}", i.code(), i.display_name()))
        .collect::<Vec<_>>()
        .join("\n");

    let embed = CreateEmbed::default()
        .title("📖 Gold Price Bot Help")
        .description("Gold prices from vang.today, on demand and every morning.")
        .color(0xffd700)
        .field(
            "💰 Prices",
            format!(
                "`{p}goldprice [type]` - Current prices (all types when omitted)\nAliases: `{p}gp`, `{p}gold`, `/goldprice`",
                p = prefix
            ),
            false,
        )
        .field(
            "📈 Charts",
            format!(
                "`{p}goldchart [type] [days]` - Price history chart (default SJ9999, 30 days, max 30)\nAliases: `{p}gc`, `{p}chart`, `/goldchart`",
                p = prefix
            ),
            false,
        )
        .field("🏷️ Gold Types", types, false)
        .field(
            "⏰ Daily Update",
            format!("Posted every day at {:02}:{:02} ({})", DAILY_HOUR, DAILY_MINUTE, DAILY_TIMEZONE),
            false,
        );

    msg.channel_id
        .send_message(ctx, CreateMessage::default().embed(embed))
        .await
        .map_err(|e| format!("Failed to send help message: {}", e))?;

    Ok(())
}
