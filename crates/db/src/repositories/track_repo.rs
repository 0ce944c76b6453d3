//! Repository for the `tracks` table.

use chrono::Utc;
use setlist_core::filter::{FilterClause, TrackPredicate};
use setlist_core::track::{fold_for_search, normalize_optional_text};
use setlist_core::types::{new_id, DbId};
use sqlx::SqlitePool;

use crate::models::track::{CreateTrack, Track, UpdateTrack};
use crate::repositories::SetRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, title, artist, bpm, camelot_key, genre, subgenre, duration, \
    link_spotify, link_soundcloud, link_beatport, link_youtube, \
    notes, created_at, updated_at";

/// Provides CRUD operations for tracks.
pub struct TrackRepo;

impl TrackRepo {
    /// Insert a new track, returning the created row.
    ///
    /// The caller is expected to have run [`CreateTrack::validate`]. Text
    /// fields are trimmed and blank optional fields stored as `NULL`.
    pub async fn create(pool: &SqlitePool, input: &CreateTrack) -> Result<Track, sqlx::Error> {
        let now = Utc::now();
        let title = input.title.trim();
        let artist = input.artist.trim();
        let links = input.links.clone().unwrap_or_default().normalized();

        let query = format!(
            "INSERT INTO tracks \
                (id, title, artist, bpm, camelot_key, genre, subgenre, duration, \
                 link_spotify, link_soundcloud, link_beatport, link_youtube, notes, \
                 title_folded, artist_folded, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $16) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(new_id())
            .bind(title)
            .bind(artist)
            .bind(input.bpm)
            .bind(input.key.trim())
            .bind(input.genre.trim())
            .bind(normalize_optional_text(input.subgenre.as_deref()))
            .bind(input.duration.trim())
            .bind(&links.spotify)
            .bind(&links.soundcloud)
            .bind(&links.beatport)
            .bind(&links.youtube)
            .bind(normalize_optional_text(input.notes.as_deref()))
            .bind(fold_for_search(title))
            .bind(fold_for_search(artist))
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find a track by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Track>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tracks WHERE id = $1");
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tracks matching `predicate`, newest first.
    ///
    /// Ties on `created_at` fall back to id order, which for v7 ids is also
    /// creation order.
    pub async fn list(
        pool: &SqlitePool,
        predicate: &TrackPredicate,
    ) -> Result<Vec<Track>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        for clause in predicate.clauses() {
            let condition = match clause {
                FilterClause::Search(_) => format!(
                    "(instr(title_folded, ${param_idx}) > 0 \
                      OR instr(artist_folded, ${param_idx}) > 0)"
                ),
                FilterClause::BpmAtLeast(_) => format!("bpm >= ${param_idx}"),
                FilterClause::BpmAtMost(_) => format!("bpm <= ${param_idx}"),
                FilterClause::KeyIs(_) => format!("camelot_key = ${param_idx}"),
                FilterClause::GenreIs(_) => format!("genre = ${param_idx}"),
            };
            conditions.push(condition);
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM tracks {where_clause} \
             ORDER BY created_at DESC, id DESC"
        );

        let mut q = sqlx::query_as::<_, Track>(&query);
        for clause in predicate.clauses() {
            q = match clause {
                FilterClause::Search(needle) => q.bind(needle.as_str()),
                FilterClause::BpmAtLeast(bpm) | FilterClause::BpmAtMost(bpm) => q.bind(*bpm),
                FilterClause::KeyIs(value) | FilterClause::GenreIs(value) => q.bind(value.as_str()),
            };
        }

        q.fetch_all(pool).await
    }

    /// Apply a partial update. Only supplied fields change.
    ///
    /// The stored row is read and the patch merged onto it inside one
    /// transaction. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateTrack,
    ) -> Result<Option<Track>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Take the write lock before reading; a read lock cannot be upgraded
        // while another writer is waiting.
        let claimed = sqlx::query("UPDATE tracks SET updated_at = updated_at WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if claimed.rows_affected() == 0 {
            return Ok(None);
        }

        let select = format!("SELECT {COLUMNS} FROM tracks WHERE id = $1");
        let current = sqlx::query_as::<_, Track>(&select)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        let next = input.apply_to(&current);

        let update = format!(
            "UPDATE tracks SET \
                title = $2, artist = $3, bpm = $4, camelot_key = $5, genre = $6, \
                subgenre = $7, duration = $8, link_spotify = $9, link_soundcloud = $10, \
                link_beatport = $11, link_youtube = $12, notes = $13, \
                title_folded = $14, artist_folded = $15, updated_at = $16 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let track = sqlx::query_as::<_, Track>(&update)
            .bind(id)
            .bind(&next.title)
            .bind(&next.artist)
            .bind(next.bpm)
            .bind(&next.key)
            .bind(&next.genre)
            .bind(&next.subgenre)
            .bind(&next.duration)
            .bind(&next.links.spotify)
            .bind(&next.links.soundcloud)
            .bind(&next.links.beatport)
            .bind(&next.links.youtube)
            .bind(&next.notes)
            .bind(fold_for_search(&next.title))
            .bind(fold_for_search(&next.artist))
            .bind(Utc::now())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(track))
    }

    /// Delete a track and remove it from every set, in one transaction.
    ///
    /// Returns `false` (and changes nothing) if no row with the given `id`
    /// exists.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query("DELETE FROM tracks WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }

        let detached = SetRepo::remove_track_everywhere_in(&mut tx, id).await?;
        tx.commit().await?;

        tracing::debug!(track_id = %id, sets = detached, "Track removed from sets");
        Ok(true)
    }
}
