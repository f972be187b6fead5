//! Bot layer - Discord-facing dashboard pages.
//!
//! Each dashboard page is a slash-command group. Commands mount the matching
//! page controller from [`crate::core`], apply one operation, and render the
//! result as an embed.

/// Discord command implementations (one group per page, plus general)
pub mod commands;
/// Discord interaction handlers (autocomplete)
pub mod handlers;

use crate::{
    core::{ids::IdGenerator, notifications::NotificationsPage},
    errors::{Error, Result},
    models::Material,
    store::DatabaseStore,
};
use poise::serenity_prelude as serenity;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Notification views unused for this long are dropped.
pub const VIEW_IDLE_TIMEOUT: Duration = Duration::from_secs(12 * 60 * 60);

/// One user's notifications view and when they last used it.
#[derive(Debug)]
pub struct NotificationSession {
    /// Current snapshot and read state
    pub page: NotificationsPage,
    /// Last command that touched this view
    pub last_used: Instant,
}

impl NotificationSession {
    /// Starts an empty view at `now`.
    #[must_use]
    pub fn new(now: Instant) -> Self {
        Self {
            page: NotificationsPage::default(),
            last_used: now,
        }
    }
}

/// Drops views idle for at least [`VIEW_IDLE_TIMEOUT`].
pub fn prune_idle_views<K>(views: &mut HashMap<K, NotificationSession>, now: Instant) {
    let before = views.len();
    views.retain(|_, session| {
        now.saturating_duration_since(session.last_used) < VIEW_IDLE_TIMEOUT
    });
    let dropped = before - views.len();
    if dropped > 0 {
        debug!("Dropped {dropped} idle notification views");
    }
}

/// Poise context carrying [`BotData`].
pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// Shared data available to all bot commands.
pub struct BotData {
    /// Persistent key-value store holding every collection
    pub store: DatabaseStore,
    /// Id source for new workers and projects
    pub ids: IdGenerator,
    /// Materials written when the inventory is opened for the first time
    pub material_seed: Vec<Material>,
    /// Held across mount, mutate, and save so two commands never interleave
    /// writes to the same collection
    pub write_lock: Mutex<()>,
    /// Notifications views of recently active users
    pub notification_views: Mutex<HashMap<serenity::UserId, NotificationSession>>,
}

impl BotData {
    /// Creates the shared bot state.
    #[must_use]
    pub fn new(store: DatabaseStore, material_seed: Vec<Material>) -> Self {
        Self {
            store,
            ids: IdGenerator::new(),
            material_seed,
            write_lock: Mutex::new(()),
            notification_views: Mutex::new(HashMap::new()),
        }
    }
}

/// Framework error hook. Validation failures become a private "❌" reply;
/// everything else is logged and reported generically.
async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            let content = match &error {
                Error::Validation { message } => {
                    warn!("Rejected `{}`: {message}", ctx.command().name);
                    format!("❌ {message}")
                }
                Error::MaterialNotFound { .. }
                | Error::WorkerNotFound { .. }
                | Error::ProjectNotFound { .. } => {
                    warn!("Lookup failed in `{}`: {error}", ctx.command().name);
                    format!("❌ {error}")
                }
                _ => {
                    error!("Error in command `{}`: {error:?}", ctx.command().name);
                    "❌ Something went wrong. Please try again later.".to_string()
                }
            };
            let reply = poise::CreateReply::default().content(content).ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// Connects to Discord, registers the dashboard commands, and serves them
/// until the gateway connection ends.
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::materials(),
                commands::labour(),
                commands::projects(),
                commands::notifications(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    // Slash commands need no privileged intents
    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {e:?}"))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {e:?}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prune_idle_views() {
        let start = Instant::now();
        let mut views = HashMap::new();
        views.insert(1_u64, NotificationSession::new(start));
        views.insert(2_u64, NotificationSession::new(start + Duration::from_secs(3600)));

        prune_idle_views(&mut views, start + VIEW_IDLE_TIMEOUT - Duration::from_secs(1));
        assert_eq!(views.len(), 2);

        prune_idle_views(&mut views, start + VIEW_IDLE_TIMEOUT);
        assert!(views.contains_key(&2));
        assert!(!views.contains_key(&1));
    }
}
