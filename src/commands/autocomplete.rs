use serenity::builder::{CreateAutocompleteResponse, CreateInteractionResponse};
use serenity::model::application::CommandInteraction;
use serenity::prelude::Context;

use crate::models::instrument::suggest;

/// Suggest instrument codes for the focused `type` option
pub async fn respond(ctx: &Context, command: &CommandInteraction) -> Result<(), String> {
    let Some(focused) = command.data.autocomplete() else {
        return Ok(());
    };
    if focused.name != "type" {
        return Ok(());
    }

    let choices = suggest(focused.value)
        .into_iter()
        .fold(CreateAutocompleteResponse::new(), |response, (label, code)| {
            response.add_string_choice(label, code)
        });

    command
        .create_response(&ctx.http, CreateInteractionResponse::Autocomplete(choices))
        .await
        .map_err(|e| e.to_string())
}
