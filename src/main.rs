use buildboard::{
    bot::{self, BotData},
    config,
    errors::Result,
    store::DatabaseStore,
};
use dotenvy::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also come from the environment
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Materials written the first time the inventory is opened
    let material_seed = config::materials::load_material_seed()
        .inspect_err(|e| error!("Failed to load material seed: {e}"))?;
    info!("Loaded {} seed materials.", material_seed.len());

    if config::env::map_access_token().is_some() {
        info!("Map access token configured.");
    } else {
        warn!("MAP_ACCESS_TOKEN not set; site map stays disabled.");
    }

    // 4. Open the database and make sure the key-value table exists
    let db = config::database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 5. Run the bot
    let token = config::env::discord_token()
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))?;

    let data = BotData::new(DatabaseStore::new(db), material_seed);
    bot::run_bot(token, data).await?;

    Ok(())
}
