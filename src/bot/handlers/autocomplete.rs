//! Autocomplete handlers for Discord slash command parameters.
//!
//! Materials, workers, and projects are selected by index or id, which users
//! never type by hand. These handlers offer the matching records by name and
//! submit the index or id behind the scenes.

use crate::{
    bot::{Context, commands::layout::truncate_chars},
    store::{self, MATERIALS, PROJECTS, WORKERS},
};
use poise::serenity_prelude as serenity;

/// Discord autocomplete limit
const MAX_CHOICES: usize = 25;
/// Longest choice label Discord accepts
const CHOICE_NAME_LIMIT: usize = 100;

fn matches(name: &str, partial_lower: &str) -> bool {
    name.to_lowercase().contains(partial_lower)
}

/// Suggests materials by name; the submitted value is the material's
/// 1-based number, the same one `/materials list` shows.
///
/// Reads the stored list without seeding it, so nothing is offered before the
/// inventory has been opened once.
pub async fn autocomplete_material(
    ctx: Context<'_>,
    partial: &str,
) -> Vec<serenity::AutocompleteChoice> {
    let Ok(Some(materials)) = store::load(&ctx.data().store, MATERIALS).await else {
        return Vec::new();
    };

    let partial_lower = partial.to_lowercase();
    materials
        .into_iter()
        .enumerate()
        .filter(|(_, material)| matches(&material.name, &partial_lower))
        .filter_map(|(index, material)| {
            let position = u32::try_from(index + 1).ok()?;
            Some(serenity::AutocompleteChoice::new(
                truncate_chars(
                    &format!("{position}. {} ({})", material.name, material.status),
                    CHOICE_NAME_LIMIT,
                ),
                position,
            ))
        })
        .take(MAX_CHOICES)
        .collect()
}

/// Suggests workers by name or role; the submitted value is the worker id.
pub async fn autocomplete_worker(
    ctx: Context<'_>,
    partial: &str,
) -> Vec<serenity::AutocompleteChoice> {
    let Ok(Some(workers)) = store::load(&ctx.data().store, WORKERS).await else {
        return Vec::new();
    };

    let partial_lower = partial.to_lowercase();
    workers
        .into_iter()
        .filter(|w| matches(&w.name, &partial_lower) || matches(&w.role, &partial_lower))
        .map(|w| {
            let attendance = if w.is_absent { "absent" } else { "present" };
            serenity::AutocompleteChoice::new(
                truncate_chars(
                    &format!("{} - {} ({attendance})", w.name, w.role),
                    CHOICE_NAME_LIMIT,
                ),
                w.id,
            )
        })
        .take(MAX_CHOICES)
        .collect()
}

/// Suggests projects by name; the submitted value is the project id.
pub async fn autocomplete_project(
    ctx: Context<'_>,
    partial: &str,
) -> Vec<serenity::AutocompleteChoice> {
    let Ok(Some(projects)) = store::load(&ctx.data().store, PROJECTS).await else {
        return Vec::new();
    };

    let partial_lower = partial.to_lowercase();
    projects
        .into_iter()
        .filter(|p| matches(&p.name, &partial_lower))
        .map(|p| {
            serenity::AutocompleteChoice::new(
                truncate_chars(&format!("{} ({}%)", p.name, p.progress), CHOICE_NAME_LIMIT),
                p.id,
            )
        })
        .take(MAX_CHOICES)
        .collect()
}
