//! General Discord commands - ping and help.
//! These commands touch no stored data.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{bot::Context, config, errors::Result};

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about the dashboard pages.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let map_line = if config::env::map_access_token().is_some() {
            "Site map: configured"
        } else {
            "Site map: not configured (set `MAP_ACCESS_TOKEN`)"
        };

        let help_text = format!(
            "**BuildBoard Help**\n\
        Construction site dashboard. Each page is a command group.\n\n\
        **Pages**\n\
        • `/materials <list|add|toggle|quantity>` - Inventory and stock levels.\n\
        • `/labour <list|add|absent>` - Workforce roster and attendance.\n\
        • `/projects <list|add|rename|deadline|progress|delete>` - Projects and progress.\n\
        • `/notifications <show|mark_read|view_all|refresh>` - Deadline, new project, and stock alerts.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.\n\n\
        {map_line}"
        );

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
