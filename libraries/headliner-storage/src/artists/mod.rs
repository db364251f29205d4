//! Artist catalog queries
//!
//! Artists are imported in bulk (CLI `import-artists`) and read by the
//! engine through [`SqliteArtistCatalog`](crate::SqliteArtistCatalog).

use crate::StorageError;
use headliner_core::rank_search_results;
use headliner_core::types::{Artist, ArtistId, CreateArtist, SeasonDate};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

type Result<T> = std::result::Result<T, StorageError>;

const MAX_POPULARITY: u32 = 100;

fn artist_from_row(row: &SqliteRow) -> Artist {
    Artist {
        id: row.get("id"),
        name: row.get("name"),
        price: row.get::<i64, _>("price") as u64,
        listeners: row.get::<i64, _>("listeners") as u64,
        popularity: row.get::<i64, _>("popularity") as u32,
    }
}

fn validate(artist: &CreateArtist) -> Result<()> {
    if artist.name.trim().is_empty() {
        return Err(StorageError::invalid("artist name is required"));
    }
    if artist.popularity > MAX_POPULARITY {
        return Err(StorageError::invalid(format!(
            "popularity {} exceeds {MAX_POPULARITY}",
            artist.popularity
        )));
    }
    if i64::try_from(artist.price).is_err() || i64::try_from(artist.listeners).is_err() {
        return Err(StorageError::invalid("price or listeners out of range"));
    }
    for record in &artist.performance {
        SeasonDate::new(record.month, record.year)
            .map_err(|e| StorageError::invalid(e.to_string()))?;
        if i64::try_from(record.points).is_err() {
            return Err(StorageError::invalid(format!(
                "points for {}/{} out of range",
                record.month, record.year
            )));
        }
    }
    Ok(())
}

async fn insert(tx: &mut Transaction<'_, Sqlite>, artist: &CreateArtist) -> Result<ArtistId> {
    let id = sqlx::query(
        "INSERT INTO artists (name, price, listeners, popularity) VALUES (?, ?, ?, ?)",
    )
    .bind(artist.name.trim())
    .bind(artist.price as i64)
    .bind(artist.listeners as i64)
    .bind(i64::from(artist.popularity))
    .execute(&mut **tx)
    .await?
    .last_insert_rowid();

    for record in &artist.performance {
        sqlx::query(
            "INSERT INTO artist_performance (artist_id, year, month, points)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(artist_id, year, month) DO UPDATE SET points = excluded.points",
        )
        .bind(id)
        .bind(record.year)
        .bind(i64::from(record.month))
        .bind(record.points as i64)
        .execute(&mut **tx)
        .await?;
    }

    Ok(id)
}

/// Add one artist with its recorded performance
pub async fn create(pool: &SqlitePool, artist: CreateArtist) -> Result<Artist> {
    validate(&artist)?;

    let mut tx = pool.begin().await?;
    let id = insert(&mut tx, &artist).await?;
    tx.commit().await?;

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StorageError::not_found("Artist", id))
}

/// Import a batch of artists in one transaction
///
/// Either every artist is imported or none is. Returns the number imported.
pub async fn import(pool: &SqlitePool, artists: Vec<CreateArtist>) -> Result<usize> {
    for artist in &artists {
        validate(artist)?;
    }

    let mut tx = pool.begin().await?;
    for artist in &artists {
        insert(&mut tx, artist).await?;
    }
    tx.commit().await?;

    tracing::info!(count = artists.len(), "Artists imported");
    Ok(artists.len())
}

/// Get an artist by ID
pub async fn get_by_id(pool: &SqlitePool, id: ArtistId) -> Result<Option<Artist>> {
    let row = sqlx::query("SELECT id, name, price, listeners, popularity FROM artists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(artist_from_row))
}

/// Case-insensitive substring search on the artist name
///
/// SQLite's `lower()` only folds ASCII, so names are matched in Rust with
/// Unicode lowercasing. Ordered by popularity descending, then id ascending.
pub async fn search(pool: &SqlitePool, term: &str, limit: usize) -> Result<Vec<Artist>> {
    let needle = term.trim().to_lowercase();
    let rows = sqlx::query("SELECT id, name, price, listeners, popularity FROM artists")
        .fetch_all(pool)
        .await?;

    let candidates = rows
        .iter()
        .map(artist_from_row)
        .filter(|artist| artist.name.to_lowercase().contains(&needle))
        .collect();
    Ok(rank_search_results(candidates, limit))
}

/// Number of artists in the catalog
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM artists")
        .fetch_one(pool)
        .await?;

    Ok(row.get("count"))
}

/// Recorded points for an artist in a period, if any
pub async fn get_performance(
    pool: &SqlitePool,
    artist_id: ArtistId,
    period: SeasonDate,
) -> Result<Option<u64>> {
    let row = sqlx::query(
        "SELECT points FROM artist_performance WHERE artist_id = ? AND year = ? AND month = ?",
    )
    .bind(artist_id)
    .bind(period.year())
    .bind(i64::from(period.month()))
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.get::<i64, _>("points") as u64))
}
