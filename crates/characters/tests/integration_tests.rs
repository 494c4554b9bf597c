//! Integration tests for the characters crate.

use companion_characters::{
    CharacterService, CreateCharacterRequest, UpdateCharacterRequest, PRESET_CHARACTERS,
};
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn create_test_pool() -> (SqlitePool, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("characters_integration.db");
    let db_url = format!("sqlite://{}", db_path.display());

    std::fs::File::create(&db_path).unwrap();
    let pool = SqlitePool::connect(&db_url).await.unwrap();

    sqlx::query(
        "CREATE TABLE characters (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            public_id TEXT NOT NULL UNIQUE,
            user_id INTEGER,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            personality TEXT NOT NULL,
            avatar_url TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    )
    .execute(&pool)
    .await
    .unwrap();

    (pool, temp_dir)
}

#[tokio::test]
async fn catalog_lifecycle() {
    let (pool, _temp_dir) = create_test_pool().await;
    let service = CharacterService::new(pool);

    service.seed_presets().await.unwrap();

    // A user creates their own character next to the presets.
    let own = service
        .create(
            7,
            &CreateCharacterRequest {
                name: "Pixel".to_string(),
                description: "A retro gaming buddy.".to_string(),
                personality: "Playful, nostalgic".to_string(),
                avatar_url: Some("https://placekitten.com/510/750".to_string()),
            },
        )
        .await
        .unwrap();

    let visible = service.list(7).await.unwrap();
    assert_eq!(visible.len(), PRESET_CHARACTERS.len() + 1);

    // Rename it, then delete it; the catalog shrinks back to the presets.
    service
        .update(
            &own.public_id,
            7,
            &UpdateCharacterRequest {
                name: Some("Pixel II".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(service.get(&own.public_id).await.unwrap().name, "Pixel II");

    service.delete(&own.public_id, 7).await.unwrap();
    assert_eq!(service.list(7).await.unwrap().len(), PRESET_CHARACTERS.len());
}
