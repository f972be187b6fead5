//! Labour Discord commands - workforce roster and attendance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            Context,
            commands::layout::{self, FIELD_NAME_LIMIT, MAX_EMBED_FIELDS},
            handlers::autocomplete,
        },
        core::labour::{LabourPage, WorkerDraft},
        errors::Result,
        models::{Worker, WorkerStatus},
    };
    use poise::serenity_prelude as serenity;

    /// Availability offered in the add form.
    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum WorkerStatusChoice {
        #[name = "Available"]
        Available,
        #[name = "Assigned"]
        Assigned,
        #[name = "On Leave"]
        OnLeave,
    }

    impl From<WorkerStatusChoice> for WorkerStatus {
        fn from(choice: WorkerStatusChoice) -> Self {
            match choice {
                WorkerStatusChoice::Available => Self::Available,
                WorkerStatusChoice::Assigned => Self::Assigned,
                WorkerStatusChoice::OnLeave => Self::OnLeave,
            }
        }
    }

    fn worker_field(worker: &Worker) -> (String, String, bool) {
        let attendance = if worker.is_absent {
            "❌ Absent"
        } else {
            "✅ Present"
        };
        let name = layout::truncate_chars(
            &format!("{} ({})", worker.name, worker.role),
            FIELD_NAME_LIMIT,
        );
        let value = format!(
            "**Status:** {}\n**Project:** {}\n**Joined:** {}\n{attendance}",
            worker.status,
            worker.project.as_deref().unwrap_or("-"),
            worker.month
        );
        (name, value, true)
    }

    /// Labour page. Groups the roster, hiring, and attendance commands.
    #[poise::command(
        slash_command,
        subcommands("labour_list", "labour_add", "labour_absent")
    )]
    pub async fn labour(ctx: Context<'_>) -> Result<()> {
        let help_text = "Labour management. Available subcommands:\n\
            `/labour list` - Show the roster with headcounts\n\
            `/labour add` - Add a worker\n\
            `/labour absent` - Toggle a worker's attendance";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Shows the roster with availability and attendance counts.
    #[poise::command(slash_command, rename = "list")]
    pub async fn labour_list(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        let page = LabourPage::mount(&data.store, &data.ids).await?;

        if page.workers().is_empty() {
            ctx.say("👷 No workers yet. Add one with `/labour add`.")
                .await?;
            return Ok(());
        }

        let summary = page.summary();
        let header = format!(
            "Available: **{}** · Assigned: **{}** · On leave: **{}** · Absent: **{}**",
            summary.available, summary.assigned, summary.on_leave, summary.absent
        );

        let fields: Vec<_> = page
            .workers()
            .iter()
            .take(MAX_EMBED_FIELDS)
            .map(worker_field)
            .collect();
        let footer = layout::partial_footer(fields.len(), page.workers().len(), "workers");

        let mut embed = serenity::CreateEmbed::default()
            .title("**Labour Management**")
            .color(0x0034_98DB) // Blue
            .description(header)
            .fields(fields);
        if let Some(footer) = footer {
            embed = embed.footer(serenity::CreateEmbedFooter::new(footer));
        }

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Adds a worker to the roster.
    #[poise::command(slash_command, rename = "add")]
    pub async fn labour_add(
        ctx: Context<'_>,
        #[description = "Full name"]
        #[max_length = 100]
        name: String,
        #[description = "Role (e.g., 'Mason', 'Electrician')"]
        #[max_length = 100]
        role: String,
        #[description = "Availability (defaults to Available)"] status: Option<
            WorkerStatusChoice,
        >,
        #[description = "Project the worker is on (optional)"]
        #[max_length = 100]
        project: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let worker = {
            let _guard = data.write_lock.lock().await;
            let mut page = LabourPage::mount(&data.store, &data.ids).await?;
            page.add(WorkerDraft {
                name,
                role,
                status: status.map_or(WorkerStatus::Available, WorkerStatus::from),
                project,
            })
            .await?
        };

        ctx.say(format!(
            "✅ Added **{}** as {} ({}).",
            worker.name, worker.role, worker.status
        ))
        .await?;
        Ok(())
    }

    /// Marks a worker absent, or present again if already absent.
    #[poise::command(slash_command, rename = "absent")]
    pub async fn labour_absent(
        ctx: Context<'_>,
        #[description = "Worker whose attendance to toggle"]
        #[autocomplete = "autocomplete::autocomplete_worker"]
        worker: i64,
    ) -> Result<()> {
        let data = ctx.data();
        let updated = {
            let _guard = data.write_lock.lock().await;
            let mut page = LabourPage::mount(&data.store, &data.ids).await?;
            page.toggle_absent(worker).await?
        };

        let message = if updated.is_absent {
            format!("❌ **{}** marked absent.", updated.name)
        } else {
            format!("✅ **{}** marked present.", updated.name)
        };
        ctx.say(message).await?;
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn worker(name: &str) -> Worker {
            Worker {
                id: 1,
                name: name.to_string(),
                role: "Mason".to_string(),
                status: WorkerStatus::Assigned,
                project: None,
                is_absent: true,
                month: "Oct".to_string(),
            }
        }

        #[test]
        fn test_worker_field() {
            let (name, value, inline) = worker_field(&worker("Kiran"));
            assert_eq!(name, "Kiran (Mason)");
            assert!(value.contains("**Project:** -"));
            assert!(value.ends_with("❌ Absent"));
            assert!(inline);
        }

        #[test]
        fn test_long_worker_name_fits_field_title() {
            let (name, _, _) = worker_field(&worker(&"y".repeat(300)));
            assert_eq!(name.chars().count(), FIELD_NAME_LIMIT);
        }
    }
}

// Re-export all commands
pub use inner::*;
