//! Notifications Discord commands - derived alerts with per-user read state.
//!
//! Each user gets their own view. Every command re-derives the alerts from
//! the stored projects and materials, keeping which ones the user has read;
//! `/notifications refresh` also clears the read state. Views idle for
//! [`crate::bot::VIEW_IDLE_TIMEOUT`] are dropped. Replies are ephemeral since
//! the read state is private.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            Context, NotificationSession,
            commands::layout::{self, DESCRIPTION_BUDGET},
            prune_idle_views,
        },
        core::notifications::{
            Notification, NotificationKind, NotificationsPage, load_notifications,
        },
        errors::Result,
    };
    use chrono::Utc;
    use poise::serenity_prelude as serenity;
    use std::time::Instant;

    fn kind_icon(kind: NotificationKind) -> &'static str {
        match kind {
            NotificationKind::Warning => "⚠️",
            NotificationKind::Success => "✅",
            NotificationKind::Info => "ℹ️",
        }
    }

    /// Re-derives the caller's view from the stored collections, then runs
    /// `action` on it. Read state carries over; `reset` starts it afresh.
    async fn with_view<T>(
        ctx: Context<'_>,
        reset: bool,
        action: impl FnOnce(&mut NotificationsPage) -> T,
    ) -> Result<T> {
        let data = ctx.data();
        // Derive before locking so a slow read does not hold up other users
        let snapshot = load_notifications(&data.store, Utc::now()).await?;

        let now = Instant::now();
        let mut views = data.notification_views.lock().await;
        prune_idle_views(&mut views, now);
        let session = views
            .entry(ctx.author().id)
            .or_insert_with(|| NotificationSession::new(now));
        session.last_used = now;
        if reset {
            session.page = NotificationsPage::from_notifications(snapshot);
        } else {
            session.page.apply_snapshot(snapshot);
        }
        Ok(action(&mut session.page))
    }

    fn notification_line(notification: &Notification) -> String {
        format!(
            "{} {} · *{}*",
            kind_icon(notification.kind),
            notification.message,
            notification.time
        )
    }

    /// Description and footer for the view, capped to fit one embed.
    fn describe(view: &NotificationsPage) -> (String, String) {
        let visible: Vec<&Notification> = view.visible();
        let mode = if view.show_all() {
            "Showing all notifications · /notifications view_all to hide read"
        } else {
            "Showing unread only · /notifications view_all to show all"
        };
        if visible.is_empty() {
            return ("No new notifications".to_string(), mode.to_string());
        }

        let total = visible.len();
        let body = layout::cap_lines(
            "",
            visible.into_iter().map(notification_line),
            DESCRIPTION_BUDGET,
        );
        let footer = match layout::partial_footer(body.shown, total, "notifications") {
            Some(partial) => format!("{partial} · {mode}"),
            None => mode.to_string(),
        };
        (body.text, footer)
    }

    fn render(view: &NotificationsPage) -> serenity::CreateEmbed {
        let (description, footer) = describe(view);
        serenity::CreateEmbed::default()
            .title(format!("🔔 Notifications ({} new)", view.unread_count()))
            .color(0x00F1_C40F) // Yellow
            .description(description)
            .footer(serenity::CreateEmbedFooter::new(footer))
    }

    async fn send_view(ctx: Context<'_>, embed: serenity::CreateEmbed) -> Result<()> {
        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        Ok(())
    }

    /// Notifications page. Groups viewing and read-state commands.
    #[poise::command(
        slash_command,
        subcommands(
            "notifications_show",
            "notifications_mark_read",
            "notifications_view_all",
            "notifications_refresh"
        )
    )]
    pub async fn notifications(ctx: Context<'_>) -> Result<()> {
        let help_text = "Notifications. Available subcommands:\n\
            `/notifications show` - Show your notifications\n\
            `/notifications mark_read` - Mark every notification as read\n\
            `/notifications view_all` - Toggle showing read notifications\n\
            `/notifications refresh` - Recheck projects and materials";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Shows your notifications.
    #[poise::command(slash_command, rename = "show")]
    pub async fn notifications_show(ctx: Context<'_>) -> Result<()> {
        let embed = with_view(ctx, false, |view| render(view)).await?;
        send_view(ctx, embed).await
    }

    /// Marks every notification as read.
    #[poise::command(slash_command, rename = "mark_read")]
    pub async fn notifications_mark_read(ctx: Context<'_>) -> Result<()> {
        let embed = with_view(ctx, false, |view| {
            view.mark_all_as_read();
            render(view)
        })
        .await?;
        send_view(ctx, embed).await
    }

    /// Toggles between unread-only and all notifications.
    #[poise::command(slash_command, rename = "view_all")]
    pub async fn notifications_view_all(ctx: Context<'_>) -> Result<()> {
        let embed = with_view(ctx, false, |view| {
            view.toggle_show_all();
            render(view)
        })
        .await?;
        send_view(ctx, embed).await
    }

    /// Re-derives notifications from the current projects and materials.
    /// Read state starts over.
    #[poise::command(slash_command, rename = "refresh")]
    pub async fn notifications_refresh(ctx: Context<'_>) -> Result<()> {
        let embed = with_view(ctx, true, |view| render(view)).await?;
        send_view(ctx, embed).await
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::core::notifications::{NotificationKey, NotificationSource};

        fn out_of_stock(position: i64) -> Notification {
            let key = NotificationKey {
                source: NotificationSource::OutOfStock,
                source_id: position,
            };
            Notification {
                key,
                id: key.legacy_id(),
                kind: NotificationKind::Warning,
                message: format!("Material {position:03} is out of stock"),
                time: "Now".to_string(),
            }
        }

        #[test]
        fn test_empty_view_keeps_mode_footer() {
            let view = NotificationsPage::from_notifications(Vec::new());
            let (description, footer) = describe(&view);
            assert_eq!(description, "No new notifications");
            assert!(footer.starts_with("Showing unread only"));
        }

        #[test]
        fn test_long_view_is_capped_with_footer() {
            let alerts = (0..400).map(out_of_stock).collect();
            let view = NotificationsPage::from_notifications(alerts);

            let (description, footer) = describe(&view);
            assert!(description.chars().count() <= DESCRIPTION_BUDGET);
            let shown = description.lines().count();
            assert!(shown < 400);
            assert_eq!(
                footer,
                format!(
                    "Showing {shown} of 400 notifications · Showing unread only · /notifications view_all to show all"
                )
            );
        }
    }
}

// Re-export all commands
pub use inner::*;
