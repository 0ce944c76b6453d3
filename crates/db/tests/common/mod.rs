//! Shared helpers for repository integration tests.

#![allow(dead_code)]

use setlist_db::models::set::CreateSet;
use setlist_db::models::track::CreateTrack;
use setlist_db::{create_memory_pool, run_migrations, DbPool};
use setlist_core::types::DbId;

/// A fresh, migrated in-memory database.
pub async fn test_pool() -> DbPool {
    let pool = create_memory_pool().await.expect("in-memory pool");
    run_migrations(&pool).await.expect("migrations");
    pool
}

pub fn new_track(title: &str, artist: &str, bpm: f64, key: &str, genre: &str) -> CreateTrack {
    CreateTrack {
        title: title.to_string(),
        artist: artist.to_string(),
        bpm,
        key: key.to_string(),
        genre: genre.to_string(),
        subgenre: None,
        duration: "6:00".to_string(),
        links: None,
        notes: None,
    }
}

pub fn new_set(name: &str, tracks: Vec<DbId>) -> CreateSet {
    CreateSet {
        name: name.to_string(),
        description: None,
        tracks,
    }
}
