//! Poise framework setup: command list, error handler, registration and client start.

use crate::{
    bot::{BotData, commands, handlers},
    config::settings::Settings,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::{env, sync::Arc};
use tracing::{error, info, instrument, warn};

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            let message = handlers::respond::user_message(&error);
            if let Err(e) = handlers::respond::say_ephemeral(ctx, message).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Every slash command the bot registers.
#[must_use]
pub fn commands() -> Vec<poise::Command<BotData, Error>> {
    vec![
        commands::ping(),
        commands::help(),
        commands::mine(),
        commands::balance(),
        commands::leaderboard(),
        commands::shop(),
        commands::inventory(),
        commands::clan(),
        commands::connect4(),
        commands::config(),
    ]
}

fn dev_guild_id() -> Option<serenity::GuildId> {
    let raw = env::var("DEV_GUILD_ID").ok()?;
    match raw.trim().parse::<u64>() {
        Ok(id) if id != 0 => Some(serenity::GuildId::new(id)),
        _ => {
            warn!("Ignoring invalid DEV_GUILD_ID '{}'", raw);
            None
        }
    }
}

/// Builds the framework and runs the gateway client until it stops.
///
/// Commands are registered in `DEV_GUILD_ID` when set (instant updates while
/// developing), globally otherwise.
#[instrument(skip(token, settings, database))]
pub async fn run_bot(
    token: String,
    settings: Arc<Settings>,
    database: DatabaseConnection,
) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands(),
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handlers::components::event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                if let Some(guild_id) = dev_guild_id() {
                    poise::builtins::register_in_guild(ctx, &framework.options().commands, guild_id)
                        .await?;
                    info!("Registered commands in guild {}", guild_id);
                } else {
                    info!("Registering commands globally...");
                    poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                }
                Ok(BotData::new(database, settings))
            })
        })
        .build();

    // Slash commands and components only; no message content needed.
    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names_are_unique() {
        let commands = commands();
        let mut names: Vec<&str> = commands.iter().map(|c| c.name.as_str()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
        assert!(names.contains(&"connect4"));
    }

    #[test]
    fn test_grouped_commands_have_subcommands() {
        let commands = commands();
        let subcommands = |name: &str| {
            commands
                .iter()
                .find(|c| c.name == name)
                .map(|c| c.subcommands.iter().map(|s| s.name.clone()).collect::<Vec<_>>())
                .unwrap_or_default()
        };

        assert_eq!(subcommands("shop"), vec!["list", "buy"]);
        assert_eq!(
            subcommands("clan"),
            vec!["create", "join", "leave", "disband", "info", "upgrade", "channel", "notify"]
        );
        assert_eq!(subcommands("config"), vec!["economy_channel"]);
    }
}
