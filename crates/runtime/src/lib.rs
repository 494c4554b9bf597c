use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::info;

use companion_characters::CharacterService;
use companion_config::AppConfig;
use companion_database::initialize_database;
use companion_responder::Responder;

pub mod telemetry {
    use anyhow::Result;
    use tracing::Level;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_max_level(Level::INFO)
            .with_env_filter(env_filter)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

#[derive(Clone)]
pub struct BackendServices {
    pub db_pool: SqlitePool,
    pub responder: Responder,
}

impl BackendServices {
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let db_pool = initialize_database(&config.database)
            .await
            .context("failed to initialise database")?;

        // The preset library must exist before the first catalog request.
        let seeded = CharacterService::new(db_pool.clone())
            .seed_presets()
            .await
            .context("failed to seed preset characters")?;
        if seeded > 0 {
            info!(count = seeded, "preset characters seeded");
        }

        let responder = Responder::new(&config.responder);

        info!("backend services initialised");

        Ok(Self { db_pool, responder })
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
