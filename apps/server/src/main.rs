use anyhow::Context;
use clap::{Parser, Subcommand};
use sqlx::Row;
use tokio::net::TcpListener;
use tracing::info;

use companion_config::load as load_config;
use companion_gateway::{create_router, GatewayState};
use companion_runtime::{telemetry, BackendServices};
use companion_users::UserService;

const DEMO_USER_EMAIL: &str = "demo@example.com";

#[derive(Parser)]
#[command(name = "companion-backend")]
#[command(about = "Companion backend server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Seed the database with the preset catalog and the demo user
    SeedData,
    /// Dump characters and chats from the database
    DumpData,
    /// Clear chats, messages, images and user-created characters
    ClearData,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server().await,
        Commands::SeedData => seed_data().await,
        Commands::DumpData => dump_data().await,
        Commands::ClearData => clear_data().await,
    }
}

async fn run_server() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("starting Companion backend");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let state = GatewayState::new(
        services.db_pool.clone(),
        config.auth.session_ttl_seconds,
        services.responder.clone(),
    );
    let app = create_router(state);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(companion_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}

async fn seed_data() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    let config = load_config().context("failed to load configuration")?;

    // Initialisation already seeds the preset catalog.
    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let user = UserService::new(services.db_pool.clone())
        .find_or_create(DEMO_USER_EMAIL)
        .await
        .context("failed to seed demo user")?;

    let characters: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM characters")
        .fetch_one(&services.db_pool)
        .await
        .context("failed to count characters")?;

    println!("Seed complete:");
    println!("  characters: {}", characters.0);
    println!("  demo user:  {} (id {})", user.email, user.id);

    Ok(())
}

async fn dump_data() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let characters = sqlx::query(
        r#"
        SELECT id, public_id, user_id, name, personality, created_at
        FROM characters
        ORDER BY id ASC
        "#,
    )
    .fetch_all(&services.db_pool)
    .await
    .context("failed to fetch characters")?;

    println!("=== CHARACTERS ===");
    if characters.is_empty() {
        println!("No characters found in database");
    } else {
        println!("Found {} characters:", characters.len());
        println!(
            "{:<5} {:<28} {:<8} {:<20} {:<40} {:<25}",
            "ID", "Public ID", "Owner", "Name", "Personality", "Created At"
        );
        for row in &characters {
            let owner: Option<i64> = row.try_get("user_id")?;
            println!(
                "{:<5} {:<28} {:<8} {:<20} {:<40} {:<25}",
                row.try_get::<i64, _>("id")?,
                row.try_get::<String, _>("public_id")?,
                owner.map_or("preset".to_string(), |id| id.to_string()),
                row.try_get::<String, _>("name")?,
                row.try_get::<String, _>("personality")?,
                row.try_get::<String, _>("created_at")?,
            );
        }
    }

    let chats = sqlx::query(
        r#"
        SELECT c.id, c.public_id, c.user_id, c.character_id, c.created_at, c.updated_at,
               (SELECT COUNT(*) FROM messages WHERE chat_id = c.id) AS message_count,
               (SELECT COUNT(*) FROM images WHERE chat_id = c.id) AS image_count
        FROM chats c
        ORDER BY c.created_at ASC
        "#,
    )
    .fetch_all(&services.db_pool)
    .await
    .context("failed to fetch chats")?;

    println!();
    println!("=== CHATS ===");
    if chats.is_empty() {
        println!("No chats found in database");
    } else {
        println!("Found {} chats:", chats.len());
        println!(
            "{:<5} {:<28} {:<8} {:<10} {:<10} {:<8} {:<25} {:<25}",
            "ID", "Public ID", "User", "Character", "Messages", "Images", "Created At", "Updated At"
        );
        for row in &chats {
            println!(
                "{:<5} {:<28} {:<8} {:<10} {:<10} {:<8} {:<25} {:<25}",
                row.try_get::<i64, _>("id")?,
                row.try_get::<String, _>("public_id")?,
                row.try_get::<i64, _>("user_id")?,
                row.try_get::<i64, _>("character_id")?,
                row.try_get::<i64, _>("message_count")?,
                row.try_get::<i64, _>("image_count")?,
                row.try_get::<String, _>("created_at")?,
                row.try_get::<String, _>("updated_at")?,
            );
        }
    }

    Ok(())
}

async fn clear_data() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let messages = sqlx::query("DELETE FROM messages")
        .execute(&services.db_pool)
        .await
        .context("failed to clear messages")?;
    let images = sqlx::query("DELETE FROM images")
        .execute(&services.db_pool)
        .await
        .context("failed to clear images")?;
    let chats = sqlx::query("DELETE FROM chats")
        .execute(&services.db_pool)
        .await
        .context("failed to clear chats")?;
    let characters = sqlx::query("DELETE FROM characters WHERE user_id IS NOT NULL")
        .execute(&services.db_pool)
        .await
        .context("failed to clear user-created characters")?;

    println!("Cleared:");
    println!("  messages:   {}", messages.rows_affected());
    println!("  images:     {}", images.rows_affected());
    println!("  chats:      {}", chats.rows_affected());
    println!("  characters: {} (user-created only)", characters.rows_affected());

    Ok(())
}
