//! Player accounts and login credentials

use crate::StorageError;
use headliner_core::types::{CreatePlayer, Player, PlayerId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

type Result<T> = std::result::Result<T, StorageError>;

fn player_from_row(row: &SqliteRow) -> Player {
    let created_at = chrono::DateTime::from_timestamp(row.get::<i64, _>("created_at"), 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default();

    Player {
        id: row.get("id"),
        name: row.get("player_name"),
        username: row.get("username"),
        created_at,
    }
}

async fn insert(
    tx: &mut Transaction<'_, Sqlite>,
    player: &CreatePlayer,
) -> Result<PlayerId> {
    let name = player.name.trim();
    let username = player.username.trim();
    if name.is_empty() || username.is_empty() {
        return Err(StorageError::invalid("player name and username are required"));
    }

    let result = sqlx::query("INSERT INTO players (player_name, username) VALUES (?, ?)")
        .bind(name)
        .bind(username)
        .execute(&mut **tx)
        .await;

    match result {
        Ok(done) => Ok(done.last_insert_rowid()),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            Err(StorageError::UsernameTaken(username.to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

/// Register a new player without credentials
///
/// Name and username are trimmed and must be non-empty.
///
/// # Errors
///
/// Returns `UsernameTaken` if the username is already registered
pub async fn create(pool: &SqlitePool, player: CreatePlayer) -> Result<Player> {
    let mut tx = pool.begin().await?;
    let id = insert(&mut tx, &player).await?;
    tx.commit().await?;

    tracing::debug!(player_id = id, "Player created");
    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StorageError::not_found("Player", id))
}

/// Create a player together with their password hash, atomically
pub async fn create_with_credentials(
    pool: &SqlitePool,
    player: CreatePlayer,
    password_hash: &str,
) -> Result<Player> {
    let mut tx = pool.begin().await?;
    let id = insert(&mut tx, &player).await?;

    sqlx::query("INSERT INTO player_credentials (player_id, password_hash) VALUES (?, ?)")
        .bind(id)
        .bind(password_hash)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::debug!(player_id = id, "Player registered");
    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StorageError::not_found("Player", id))
}

/// Get a player by ID
pub async fn get_by_id(pool: &SqlitePool, id: PlayerId) -> Result<Option<Player>> {
    let row = sqlx::query("SELECT id, player_name, username, created_at FROM players WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(player_from_row))
}

/// Get a player by username
pub async fn get_by_username(pool: &SqlitePool, username: &str) -> Result<Option<Player>> {
    let row = sqlx::query(
        "SELECT id, player_name, username, created_at FROM players WHERE username = ?",
    )
    .bind(username.trim())
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(player_from_row))
}

/// Get all players, ordered by id
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Player>> {
    let rows = sqlx::query("SELECT id, player_name, username, created_at FROM players ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(player_from_row).collect())
}

/// Delete a player and their credentials
///
/// Returns false if no such player existed.
pub async fn delete(pool: &SqlitePool, id: PlayerId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM players WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Get a player's password hash, or None if no credentials are set
pub async fn get_password_hash(pool: &SqlitePool, player_id: PlayerId) -> Result<Option<String>> {
    let row = sqlx::query("SELECT password_hash FROM player_credentials WHERE player_id = ?")
        .bind(player_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.get("password_hash")))
}

/// Create or update a player's password hash
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `player_id` - Player ID
/// * `password_hash` - Hashed password (already hashed with bcrypt)
pub async fn set_password_hash(
    pool: &SqlitePool,
    player_id: PlayerId,
    password_hash: &str,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO player_credentials (player_id, password_hash, updated_at)
         VALUES (?, ?, strftime('%s', 'now'))
         ON CONFLICT(player_id)
         DO UPDATE SET password_hash = excluded.password_hash, updated_at = strftime('%s', 'now')",
    )
    .bind(player_id)
    .bind(password_hash)
    .execute(pool)
    .await?;

    Ok(())
}
