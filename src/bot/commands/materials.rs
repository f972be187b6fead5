//! Materials Discord commands - the inventory page.
//!
//! Materials are addressed by their position in the list. The `material`
//! option is the 1-based number shown by `/materials list`; autocomplete
//! fills in the same number.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            Context,
            commands::layout::{self, DESCRIPTION_BUDGET},
            handlers::autocomplete,
        },
        core::materials::{MaterialDraft, MaterialsPage},
        errors::{Error, Result},
        models::{Material, MaterialStatus},
    };
    use poise::serenity_prelude as serenity;

    /// Stock state offered in the add form.
    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum StockChoice {
        #[name = "In Stock"]
        InStock,
        #[name = "Out of Stock"]
        OutOfStock,
    }

    impl From<StockChoice> for MaterialStatus {
        fn from(choice: StockChoice) -> Self {
            match choice {
                StockChoice::InStock => Self::InStock,
                StockChoice::OutOfStock => Self::OutOfStock,
            }
        }
    }

    fn status_marker(status: MaterialStatus) -> &'static str {
        match status {
            MaterialStatus::InStock => "🟢",
            MaterialStatus::OutOfStock => "🔴",
        }
    }

    /// Converts the number shown in the list to a collection index.
    fn index_from_position(position: u32) -> Result<usize> {
        let index = position
            .checked_sub(1)
            .ok_or_else(|| Error::validation("Material numbers start at 1."))?;
        Ok(usize::try_from(index)?)
    }

    fn material_line(position: usize, material: &Material) -> String {
        format!(
            "**{position}. {}** {} {} (qty {})",
            material.name,
            status_marker(material.status),
            material.status,
            material.quantity
        )
    }

    /// Inventory page. Groups listing, adding, and editing materials.
    #[poise::command(
        slash_command,
        subcommands(
            "materials_list",
            "materials_add",
            "materials_toggle",
            "materials_quantity"
        )
    )]
    pub async fn materials(ctx: Context<'_>) -> Result<()> {
        let help_text = "Materials inventory. Available subcommands:\n\
            `/materials list` - Show all materials with stock counts\n\
            `/materials add` - Add a material\n\
            `/materials toggle` - Switch a material between In Stock and Out of Stock\n\
            `/materials quantity` - Set a material's quantity";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Lists every material with the stock summary.
    #[poise::command(slash_command, rename = "list")]
    pub async fn materials_list(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        let page = {
            let _guard = data.write_lock.lock().await;
            MaterialsPage::mount(&data.store, &data.material_seed).await?
        };

        if page.materials().is_empty() {
            ctx.say("📦 No materials yet. Add one with `/materials add`.")
                .await?;
            return Ok(());
        }

        let summary = page.summary();
        let header = format!(
            "🟢 In stock: **{}** · 🔴 Out of stock: **{}** · Total quantity: **{}**\n\n",
            summary.in_stock, summary.out_of_stock, summary.total_quantity
        );
        let lines = page
            .materials()
            .iter()
            .enumerate()
            .map(|(index, material)| material_line(index + 1, material));
        let body = layout::cap_lines(&header, lines, DESCRIPTION_BUDGET);

        let mut embed = serenity::CreateEmbed::default()
            .title("**Materials Inventory**")
            .color(0x00E6_7E22) // Construction orange
            .description(body.text);
        if let Some(footer) =
            layout::partial_footer(body.shown, page.materials().len(), "materials")
        {
            embed = embed.footer(serenity::CreateEmbedFooter::new(footer));
        }

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Adds a material to the end of the inventory.
    #[poise::command(slash_command, rename = "add")]
    pub async fn materials_add(
        ctx: Context<'_>,
        #[description = "Material name (e.g., 'Gravel')"]
        #[max_length = 100]
        name: String,
        #[description = "Units on hand"]
        #[min = 0]
        quantity: f64,
        #[description = "Stock state (defaults to In Stock)"] status: Option<StockChoice>,
    ) -> Result<()> {
        let data = ctx.data();
        let material = {
            let _guard = data.write_lock.lock().await;
            let mut page = MaterialsPage::mount(&data.store, &data.material_seed).await?;
            page.add(MaterialDraft {
                name,
                status: status.map_or(MaterialStatus::InStock, MaterialStatus::from),
                quantity,
            })
            .await?
        };

        ctx.say(format!(
            "✅ Added **{}** ({}, qty {}).",
            material.name, material.status, material.quantity
        ))
        .await?;
        Ok(())
    }

    /// Switches a material between In Stock and Out of Stock.
    #[poise::command(slash_command, rename = "toggle")]
    pub async fn materials_toggle(
        ctx: Context<'_>,
        #[description = "Material number as shown in /materials list"]
        #[autocomplete = "autocomplete::autocomplete_material"]
        #[min = 1]
        material: u32,
    ) -> Result<()> {
        let index = index_from_position(material)?;
        let data = ctx.data();
        let updated = {
            let _guard = data.write_lock.lock().await;
            let mut page = MaterialsPage::mount(&data.store, &data.material_seed).await?;
            page.toggle_status(index).await?
        };

        ctx.say(format!(
            "{} **{}** is now {}.",
            status_marker(updated.status),
            updated.name,
            updated.status
        ))
        .await?;
        Ok(())
    }

    /// Replaces a material's quantity.
    #[poise::command(slash_command, rename = "quantity")]
    pub async fn materials_quantity(
        ctx: Context<'_>,
        #[description = "Material number as shown in /materials list"]
        #[autocomplete = "autocomplete::autocomplete_material"]
        #[min = 1]
        material: u32,
        #[description = "New quantity"]
        #[min = 0]
        quantity: f64,
    ) -> Result<()> {
        let index = index_from_position(material)?;
        let data = ctx.data();
        let updated = {
            let _guard = data.write_lock.lock().await;
            let mut page = MaterialsPage::mount(&data.store, &data.material_seed).await?;
            page.set_quantity(index, quantity).await?
        };

        ctx.say(format!(
            "✅ **{}** quantity set to {}.",
            updated.name, updated.quantity
        ))
        .await?;
        Ok(())
    }

}

// Re-export all commands
pub use inner::*;
