//! Repository for the `sets` and `set_tracks` tables.

use std::collections::HashMap;

use chrono::Utc;
use setlist_core::membership::{dedupe_ids, resolve_refs, unresolved_refs};
use setlist_core::track::normalize_optional_text;
use setlist_core::types::{new_id, DbId};
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};

use crate::models::set::{CreateSet, Set, SetWithTracks, UpdateSet};
use crate::models::track::Track;

/// Column list for the `sets` table.
const COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Column list for the `tracks` table (used in JOIN queries).
const TRACK_COLUMNS: &str = "\
    t.id, t.title, t.artist, t.bpm, t.camelot_key, t.genre, t.subgenre, t.duration, \
    t.link_spotify, t.link_soundcloud, t.link_beatport, t.link_youtube, \
    t.notes, t.created_at, t.updated_at";

/// Provides CRUD operations for sets and their track membership.
pub struct SetRepo;

impl SetRepo {
    /// Insert a new set with its initial track list.
    ///
    /// Repeated ids are collapsed to their first occurrence. Track ids are
    /// not checked for existence. The returned set carries unresolved
    /// references.
    pub async fn create(pool: &SqlitePool, input: &CreateSet) -> Result<SetWithTracks, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO sets (id, name, description, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $4) \
             RETURNING {COLUMNS}"
        );
        let set = sqlx::query_as::<_, Set>(&query)
            .bind(new_id())
            .bind(input.name.trim())
            .bind(normalize_optional_text(input.description.as_deref()))
            .bind(Utc::now())
            .fetch_one(&mut *tx)
            .await?;

        let track_ids = dedupe_ids(&input.tracks);
        Self::set_tracks_inner(&mut tx, set.id, &track_ids).await?;

        tx.commit().await?;
        Ok(SetWithTracks {
            set,
            tracks: unresolved_refs(&track_ids),
        })
    }

    /// Find a set row by its ID, without membership.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Set>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sets WHERE id = $1");
        sqlx::query_as::<_, Set>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a set by ID with its track references resolved.
    ///
    /// References whose track no longer exists come back as
    /// [`TrackRef::Missing`](setlist_core::membership::TrackRef::Missing).
    pub async fn find_by_id_with_tracks(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<SetWithTracks>, sqlx::Error> {
        let Some(set) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let mut conn = pool.acquire().await?;
        let track_ids = Self::track_ids_in(&mut conn, id).await?;
        let tracks = Self::get_tracks_for_set(&mut conn, id).await?;

        Ok(Some(SetWithTracks {
            set,
            tracks: resolve_refs(&track_ids, tracks),
        }))
    }

    /// List all sets, newest first, with unresolved track references.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<SetWithTracks>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sets ORDER BY created_at DESC, id DESC");
        let sets = sqlx::query_as::<_, Set>(&query).fetch_all(pool).await?;

        let rows = sqlx::query_as::<_, (DbId, DbId)>(
            "SELECT set_id, track_id FROM set_tracks ORDER BY set_id, position",
        )
        .fetch_all(pool)
        .await?;

        let mut membership: HashMap<DbId, Vec<DbId>> = HashMap::new();
        for (set_id, track_id) in rows {
            membership.entry(set_id).or_default().push(track_id);
        }

        Ok(sets
            .into_iter()
            .map(|set| {
                let track_ids = membership.remove(&set.id).unwrap_or_default();
                SetWithTracks {
                    tracks: unresolved_refs(&track_ids),
                    set,
                }
            })
            .collect())
    }

    /// Update a set. Only supplied fields are applied.
    ///
    /// If `tracks` is `Some`, replaces the membership wholesale. Returns the
    /// resolved set, or `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateSet,
    ) -> Result<Option<SetWithTracks>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "UPDATE sets SET \
                name = COALESCE($2, name), \
                description = CASE WHEN $3 THEN $4 ELSE description END, \
                updated_at = $5 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(input.name.as_deref().map(str::trim))
        .bind(input.description.is_some())
        .bind(normalize_optional_text(input.description.as_deref()))
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        if let Some(ref track_ids) = input.tracks {
            Self::set_tracks_inner(&mut tx, id, &dedupe_ids(track_ids)).await?;
        }

        tx.commit().await?;
        Self::find_by_id_with_tracks(pool, id).await
    }

    /// Delete a set and its membership rows. Tracks are untouched.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Membership
    // -----------------------------------------------------------------------

    /// Append a track to a set (idempotent).
    ///
    /// A track already in the set keeps its position. Returns the resolved
    /// set, or `None` if the set does not exist. The track's existence is
    /// the caller's concern.
    pub async fn add_track(
        pool: &SqlitePool,
        set_id: DbId,
        track_id: DbId,
    ) -> Result<Option<SetWithTracks>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !Self::lock_in(&mut tx, set_id).await? {
            return Ok(None);
        }

        let result = sqlx::query(
            "INSERT INTO set_tracks (set_id, track_id, position) \
             SELECT $1, $2, COALESCE(MAX(position), -1) + 1 \
             FROM set_tracks WHERE set_id = $1 \
             ON CONFLICT (set_id, track_id) DO NOTHING",
        )
        .bind(set_id)
        .bind(track_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() > 0 {
            Self::touch_in(&mut tx, set_id).await?;
        }

        tx.commit().await?;
        Self::find_by_id_with_tracks(pool, set_id).await
    }

    /// Remove a track from a set. Removing an absent track is a no-op.
    ///
    /// Returns the resolved set, or `None` if the set does not exist.
    pub async fn remove_track(
        pool: &SqlitePool,
        set_id: DbId,
        track_id: DbId,
    ) -> Result<Option<SetWithTracks>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !Self::lock_in(&mut tx, set_id).await? {
            return Ok(None);
        }

        let result = sqlx::query("DELETE FROM set_tracks WHERE set_id = $1 AND track_id = $2")
            .bind(set_id)
            .bind(track_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() > 0 {
            Self::touch_in(&mut tx, set_id).await?;
        }

        tx.commit().await?;
        Self::find_by_id_with_tracks(pool, set_id).await
    }

    /// Replace the membership with `track_ids`, in that order.
    ///
    /// The list is not checked against the current membership: a subset
    /// prunes the set and unknown ids become dangling references. Repeated
    /// ids are collapsed to their first occurrence. Returns the resolved
    /// set, or `None` if the set does not exist.
    pub async fn reorder(
        pool: &SqlitePool,
        set_id: DbId,
        track_ids: &[DbId],
    ) -> Result<Option<SetWithTracks>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !Self::touch_in(&mut tx, set_id).await? {
            return Ok(None);
        }
        Self::set_tracks_inner(&mut tx, set_id, &dedupe_ids(track_ids)).await?;

        tx.commit().await?;
        Self::find_by_id_with_tracks(pool, set_id).await
    }

    /// Remove a track from every set that references it.
    ///
    /// Returns the number of sets that changed; zero is not an error.
    pub async fn remove_track_everywhere(
        pool: &SqlitePool,
        track_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let changed = Self::remove_track_everywhere_in(&mut tx, track_id).await?;
        tx.commit().await?;
        Ok(changed)
    }

    /// [`Self::remove_track_everywhere`] within an existing transaction.
    pub async fn remove_track_everywhere_in(
        tx: &mut Transaction<'_, Sqlite>,
        track_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        sqlx::query(
            "UPDATE sets SET updated_at = $2 \
             WHERE id IN (SELECT set_id FROM set_tracks WHERE track_id = $1)",
        )
        .bind(track_id)
        .bind(Utc::now())
        .execute(&mut **tx)
        .await?;

        let result = sqlx::query("DELETE FROM set_tracks WHERE track_id = $1")
            .bind(track_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Track ids of a set in position order.
    async fn track_ids_in(
        conn: &mut SqliteConnection,
        set_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT track_id FROM set_tracks WHERE set_id = $1 ORDER BY position",
        )
        .bind(set_id)
        .fetch_all(conn)
        .await
    }

    /// Existing tracks referenced by a set. Dangling ids are absent.
    async fn get_tracks_for_set(
        conn: &mut SqliteConnection,
        set_id: DbId,
    ) -> Result<Vec<Track>, sqlx::Error> {
        let query = format!(
            "SELECT {TRACK_COLUMNS} \
             FROM tracks t \
             JOIN set_tracks st ON st.track_id = t.id \
             WHERE st.set_id = $1 \
             ORDER BY st.position"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(set_id)
            .fetch_all(conn)
            .await
    }

    /// Take the write lock with a no-op write on the set row, leaving
    /// `updated_at` as it was. Returns `false` if the set does not exist.
    ///
    /// Must be the first statement of a transaction that reads before it
    /// writes.
    async fn lock_in(tx: &mut Transaction<'_, Sqlite>, set_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE sets SET updated_at = updated_at WHERE id = $1")
            .bind(set_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Bump `updated_at`. Returns `false` if the set does not exist.
    async fn touch_in(tx: &mut Transaction<'_, Sqlite>, set_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE sets SET updated_at = $2 WHERE id = $1")
            .bind(set_id)
            .bind(Utc::now())
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace membership rows within an existing transaction.
    ///
    /// Deletes existing rows, then inserts `track_ids` with positions
    /// `0..n`. `track_ids` must already be free of repeats.
    async fn set_tracks_inner(
        tx: &mut Transaction<'_, Sqlite>,
        set_id: DbId,
        track_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM set_tracks WHERE set_id = $1")
            .bind(set_id)
            .execute(&mut **tx)
            .await?;

        for (position, &track_id) in track_ids.iter().enumerate() {
            sqlx::query("INSERT INTO set_tracks (set_id, track_id, position) VALUES ($1, $2, $3)")
                .bind(set_id)
                .bind(track_id)
                .bind(position as i64)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }
}
