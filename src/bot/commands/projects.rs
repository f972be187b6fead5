//! Projects Discord commands - project list, edits, and confirmed deletion.
//!
//! Deleting asks for confirmation with Delete/Cancel buttons. Only a press of
//! Delete by the invoking user removes the project; Cancel or letting the
//! prompt expire leaves the list untouched.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            Context,
            commands::layout::{self, FIELD_NAME_LIMIT, MAX_EMBED_FIELDS},
            handlers::autocomplete,
        },
        core::projects::{Confirmation, ProjectDraft, ProjectUpdate, ProjectsPage},
        errors::{Error, Result},
        models::{Project, parse_deadline},
    };
    use poise::serenity_prelude as serenity;
    use std::time::Duration;
    use tracing::info;

    /// How long the delete prompt waits for a button press.
    const CONFIRM_TIMEOUT: Duration = Duration::from_secs(60);

    /// Rejects deadlines that are neither blank nor a calendar date.
    fn check_deadline(raw: &str) -> Result<()> {
        if raw.trim().is_empty() || parse_deadline(raw).is_some() {
            Ok(())
        } else {
            Err(Error::validation(
                "Deadline must be a date like 2026-12-31.",
            ))
        }
    }

    fn progress_bar(progress: i32) -> String {
        let filled = usize::try_from(progress.clamp(0, 100) / 10).unwrap_or(0);
        format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
    }

    fn project_field(project: &Project) -> (String, String, bool) {
        let value = format!(
            "**Deadline:** {}\n**Status:** {}\n{} {}%",
            project.deadline,
            project.status,
            progress_bar(project.progress),
            project.progress
        );
        (
            layout::truncate_chars(&project.name, FIELD_NAME_LIMIT),
            value,
            false,
        )
    }

    /// Projects page. Groups listing, creating, editing, and deleting projects.
    #[poise::command(
        slash_command,
        subcommands(
            "projects_list",
            "projects_add",
            "projects_rename",
            "projects_deadline",
            "projects_progress",
            "projects_delete"
        )
    )]
    pub async fn projects(ctx: Context<'_>) -> Result<()> {
        let help_text = "Project management. Available subcommands:\n\
            `/projects list` - Show all projects with progress\n\
            `/projects add` - Create a project\n\
            `/projects rename` - Change a project's name\n\
            `/projects deadline` - Change a project's deadline\n\
            `/projects progress` - Set a project's progress\n\
            `/projects delete` - Delete a project (asks for confirmation)";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Lists every project with deadline, status, and progress.
    #[poise::command(slash_command, rename = "list")]
    pub async fn projects_list(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        let page = ProjectsPage::mount(&data.store, &data.ids).await?;

        if page.projects().is_empty() {
            ctx.say("🏗️ No projects yet. Create one with `/projects add`.")
                .await?;
            return Ok(());
        }

        let summary = page.summary();
        let header = format!(
            "Total: **{}** · Completed: **{}** · Average progress: **{:.0}%**",
            summary.total, summary.completed, summary.average_progress
        );
        let fields: Vec<_> = page
            .projects()
            .iter()
            .take(MAX_EMBED_FIELDS)
            .map(project_field)
            .collect();
        let footer = layout::partial_footer(fields.len(), page.projects().len(), "projects");

        let mut embed = serenity::CreateEmbed::default()
            .title("**Project Management**")
            .color(0x0027_AE60) // Green
            .description(header)
            .fields(fields);
        if let Some(footer) = footer {
            embed = embed.footer(serenity::CreateEmbedFooter::new(footer));
        }

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Creates a project.
    #[poise::command(slash_command, rename = "add")]
    pub async fn projects_add(
        ctx: Context<'_>,
        #[description = "Project name"]
        #[max_length = 100]
        name: String,
        #[description = "Deadline as YYYY-MM-DD (optional)"]
        #[max_length = 40]
        deadline: Option<String>,
        #[description = "Starting progress in percent (defaults to 0)"]
        #[min = 0]
        #[max = 100]
        progress: Option<i32>,
    ) -> Result<()> {
        if let Some(raw) = &deadline {
            check_deadline(raw)?;
        }

        let data = ctx.data();
        let project = {
            let _guard = data.write_lock.lock().await;
            let mut page = ProjectsPage::mount(&data.store, &data.ids).await?;
            page.add(ProjectDraft {
                name,
                deadline,
                progress: progress.unwrap_or(0),
                status: None,
            })
            .await?
        };

        ctx.say(format!(
            "✅ Created project **{}** (deadline: {}).",
            project.name, project.deadline
        ))
        .await?;
        Ok(())
    }

    async fn apply_update(ctx: Context<'_>, id: i64, update: ProjectUpdate) -> Result<Project> {
        let data = ctx.data();
        let _guard = data.write_lock.lock().await;
        let mut page = ProjectsPage::mount(&data.store, &data.ids).await?;
        page.update(id, update).await
    }

    /// Renames a project.
    #[poise::command(slash_command, rename = "rename")]
    pub async fn projects_rename(
        ctx: Context<'_>,
        #[description = "Project to rename"]
        #[autocomplete = "autocomplete::autocomplete_project"]
        project: i64,
        #[description = "New name"]
        #[max_length = 100]
        name: String,
    ) -> Result<()> {
        let updated = apply_update(
            ctx,
            project,
            ProjectUpdate {
                name: Some(name),
                ..Default::default()
            },
        )
        .await?;

        ctx.say(format!("✏️ Project renamed to **{}**.", updated.name))
            .await?;
        Ok(())
    }

    /// Changes a project's deadline.
    #[poise::command(slash_command, rename = "deadline")]
    pub async fn projects_deadline(
        ctx: Context<'_>,
        #[description = "Project to update"]
        #[autocomplete = "autocomplete::autocomplete_project"]
        project: i64,
        #[description = "New deadline as YYYY-MM-DD"]
        #[max_length = 40]
        deadline: String,
    ) -> Result<()> {
        check_deadline(&deadline)?;
        let updated = apply_update(
            ctx,
            project,
            ProjectUpdate {
                deadline: Some(deadline),
                ..Default::default()
            },
        )
        .await?;

        ctx.say(format!(
            "📅 **{}** is now due {}.",
            updated.name, updated.deadline
        ))
        .await?;
        Ok(())
    }

    /// Sets a project's progress.
    #[poise::command(slash_command, rename = "progress")]
    pub async fn projects_progress(
        ctx: Context<'_>,
        #[description = "Project to update"]
        #[autocomplete = "autocomplete::autocomplete_project"]
        project: i64,
        #[description = "Progress in percent"]
        #[min = 0]
        #[max = 100]
        progress: i32,
    ) -> Result<()> {
        let updated = apply_update(
            ctx,
            project,
            ProjectUpdate {
                progress: Some(progress),
                ..Default::default()
            },
        )
        .await?;

        ctx.say(format!(
            "📈 **{}** {} {}%",
            updated.name,
            progress_bar(updated.progress),
            updated.progress
        ))
        .await?;
        Ok(())
    }

    /// Deletes a project after the user confirms with a button.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn projects_delete(
        ctx: Context<'_>,
        #[description = "Project to delete"]
        #[autocomplete = "autocomplete::autocomplete_project"]
        project: i64,
    ) -> Result<()> {
        let data = ctx.data();
        let page = ProjectsPage::mount(&data.store, &data.ids).await?;
        let name = page
            .get(project)
            .map(|p| p.name.clone())
            .ok_or(Error::ProjectNotFound { id: project })?;
        drop(page);

        let ctx_id = ctx.id();
        let confirm_id = format!("{ctx_id}-delete");
        let cancel_id = format!("{ctx_id}-cancel");
        let buttons = serenity::CreateActionRow::Buttons(vec![
            serenity::CreateButton::new(&confirm_id)
                .label("Delete")
                .style(serenity::ButtonStyle::Danger),
            serenity::CreateButton::new(&cancel_id)
                .label("Cancel")
                .style(serenity::ButtonStyle::Secondary),
        ]);

        let prompt = ctx
            .send(
                poise::CreateReply::default()
                    .content(format!(
                        "⚠️ Are you sure you want to delete **{name}**?"
                    ))
                    .components(vec![buttons])
                    .ephemeral(true),
            )
            .await?;

        let prefix = ctx_id.to_string();
        let press = serenity::ComponentInteractionCollector::new(ctx.serenity_context())
            .author_id(ctx.author().id)
            .channel_id(ctx.channel_id())
            .timeout(CONFIRM_TIMEOUT)
            .filter(move |press| press.data.custom_id.starts_with(&prefix))
            .await;

        let confirmation = match &press {
            Some(press) if press.data.custom_id == confirm_id => Confirmation::Confirmed,
            Some(_) => Confirmation::Declined,
            None => {
                info!("Delete prompt for project {project} expired");
                Confirmation::Declined
            }
        };

        // The list may have changed while the prompt was open
        let removed = {
            let _guard = data.write_lock.lock().await;
            let mut page = ProjectsPage::mount(&data.store, &data.ids).await?;
            page.delete(project, confirmation).await?
        };

        let outcome = match removed {
            Some(removed) => format!("🗑️ Deleted project **{}**.", removed.name),
            None => format!("Kept **{name}**."),
        };

        match press {
            Some(press) => {
                press
                    .create_response(
                        ctx.serenity_context(),
                        serenity::CreateInteractionResponse::UpdateMessage(
                            serenity::CreateInteractionResponseMessage::new()
                                .content(outcome)
                                .components(Vec::new()),
                        ),
                    )
                    .await?;
            }
            None => {
                prompt
                    .edit(
                        ctx,
                        poise::CreateReply::default()
                            .content(outcome)
                            .components(Vec::new()),
                    )
                    .await?;
            }
        }
        Ok(())
    }

}

// Re-export all commands
pub use inner::*;
