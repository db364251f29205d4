//! Persisted league engine snapshot

use crate::StorageError;
use headliner_core::EngineSnapshot;
use sqlx::{Row, SqlitePool};

type Result<T> = std::result::Result<T, StorageError>;

/// Load the stored snapshot, or None on a fresh database
pub async fn load(pool: &SqlitePool) -> Result<Option<EngineSnapshot>> {
    let row = sqlx::query("SELECT snapshot FROM season_state WHERE id = 1")
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => {
            let json: String = row.get("snapshot");
            Ok(Some(EngineSnapshot::from_json(&json)?))
        }
        None => Ok(None),
    }
}

/// Replace the stored snapshot
pub async fn save(pool: &SqlitePool, snapshot: &EngineSnapshot) -> Result<()> {
    let json = snapshot.to_json()?;

    sqlx::query(
        "INSERT INTO season_state (id, snapshot, updated_at)
         VALUES (1, ?, strftime('%s', 'now'))
         ON CONFLICT(id)
         DO UPDATE SET snapshot = excluded.snapshot, updated_at = strftime('%s', 'now')",
    )
    .bind(json)
    .execute(pool)
    .await?;

    tracing::debug!(
        leagues = snapshot.leagues.len(),
        rosters = snapshot.rosters.len(),
        date = %snapshot.date,
        "Season state saved"
    );
    Ok(())
}
