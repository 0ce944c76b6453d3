//! Integration tests for the track repository.
//!
//! Exercises `TrackRepo` against a migrated in-memory database:
//! - create / find_by_id round trip
//! - filtered listing (search, BPM range, key, genre)
//! - partial updates
//! - delete, including removal from sets

mod common;

use assert_matches::assert_matches;
use common::{new_set, new_track, test_pool};
use setlist_core::filter::TrackFilter;
use setlist_core::membership::TrackRef;
use setlist_db::models::track::{TrackLinks, UpdateTrack};
use setlist_db::repositories::{SetRepo, TrackRepo};

fn filter() -> TrackFilter {
    TrackFilter::default()
}

// ---------------------------------------------------------------------------
// Test: create / find
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_and_find() {
    let pool = test_pool().await;

    let mut input = new_track("  Strobe ", "deadmau5", 128.0, "8A", "Progressive House");
    input.subgenre = Some("   ".to_string());
    input.links = Some(TrackLinks {
        beatport: Some("https://beatport.com/track/strobe".to_string()),
        spotify: Some(String::new()),
        ..Default::default()
    });

    let track = TrackRepo::create(&pool, &input).await.unwrap();
    assert_eq!(track.title, "Strobe");
    assert_eq!(track.subgenre, None);
    assert_eq!(track.links.spotify, None);
    assert_eq!(
        track.links.beatport.as_deref(),
        Some("https://beatport.com/track/strobe")
    );
    assert_eq!(track.created_at, track.updated_at);

    let found = TrackRepo::find_by_id(&pool, track.id)
        .await
        .unwrap()
        .expect("track should exist");
    assert_eq!(found, track);
}

#[tokio::test]
async fn test_find_unknown_returns_none() {
    let pool = test_pool().await;
    let found = TrackRepo::find_by_id(&pool, setlist_core::types::new_id())
        .await
        .unwrap();
    assert!(found.is_none());
}

// ---------------------------------------------------------------------------
// Test: filtered listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_newest_first() {
    let pool = test_pool().await;
    let first = TrackRepo::create(&pool, &new_track("A", "X", 120.0, "1A", "House"))
        .await
        .unwrap();
    let second = TrackRepo::create(&pool, &new_track("B", "Y", 121.0, "1A", "House"))
        .await
        .unwrap();

    let predicate = filter().build().unwrap();
    let tracks = TrackRepo::list(&pool, &predicate).await.unwrap();
    let ids: Vec<_> = tracks.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[tokio::test]
async fn test_list_breaks_created_at_ties_by_id_descending() {
    let pool = test_pool().await;
    let mut ids = Vec::new();
    for title in ["A", "B", "C"] {
        let track = TrackRepo::create(&pool, &new_track(title, "X", 120.0, "1A", "House"))
            .await
            .unwrap();
        ids.push(track.id);
    }

    sqlx::query("UPDATE tracks SET created_at = $1")
        .bind(chrono::Utc::now())
        .execute(&pool)
        .await
        .unwrap();

    let predicate = filter().build().unwrap();
    let listed: Vec<_> = TrackRepo::list(&pool, &predicate)
        .await
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect();

    ids.sort_by(|a, b| b.cmp(a));
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn test_list_bpm_range_is_inclusive() {
    let pool = test_pool().await;
    for bpm in [120.0, 125.0, 128.0, 130.0, 132.0] {
        TrackRepo::create(&pool, &new_track("T", "A", bpm, "8A", "House"))
            .await
            .unwrap();
    }

    let predicate = TrackFilter {
        bpm_min: Some(125.0),
        bpm_max: Some(130.0),
        ..filter()
    }
    .build()
    .unwrap();
    let mut bpms: Vec<f64> = TrackRepo::list(&pool, &predicate)
        .await
        .unwrap()
        .iter()
        .map(|t| t.bpm)
        .collect();
    bpms.sort_by(f64::total_cmp);
    assert_eq!(bpms, vec![125.0, 128.0, 130.0]);
}

#[tokio::test]
async fn test_list_search_matches_title_or_artist_case_insensitively() {
    let pool = test_pool().await;
    let strobe = TrackRepo::create(
        &pool,
        &new_track("Strobe", "deadmau5", 128.0, "8A", "Progressive House"),
    )
    .await
    .unwrap();
    let ghosts = TrackRepo::create(
        &pool,
        &new_track("Ghosts 'n' Stuff", "Deadmau5", 128.0, "5A", "Electro House"),
    )
    .await
    .unwrap();
    TrackRepo::create(&pool, &new_track("Opus", "Eric Prydz", 126.0, "4A", "Progressive House"))
        .await
        .unwrap();

    let by_artist = TrackFilter {
        search: Some("DEADMAU".to_string()),
        ..filter()
    }
    .build()
    .unwrap();
    let mut ids: Vec<_> = TrackRepo::list(&pool, &by_artist)
        .await
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect();
    ids.sort();
    let mut expected = vec![strobe.id, ghosts.id];
    expected.sort();
    assert_eq!(ids, expected);

    let by_title = TrackFilter {
        search: Some("strob".to_string()),
        ..filter()
    }
    .build()
    .unwrap();
    let found = TrackRepo::list(&pool, &by_title).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, strobe.id);
}

#[tokio::test]
async fn test_list_search_treats_wildcards_literally() {
    let pool = test_pool().await;
    TrackRepo::create(&pool, &new_track("100% Pure", "A", 128.0, "8A", "House"))
        .await
        .unwrap();
    TrackRepo::create(&pool, &new_track("Pure", "B", 128.0, "8A", "House"))
        .await
        .unwrap();

    let predicate = TrackFilter {
        search: Some("0%".to_string()),
        ..filter()
    }
    .build()
    .unwrap();
    let found = TrackRepo::list(&pool, &predicate).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "100% Pure");
}

#[tokio::test]
async fn test_list_combines_filters_with_and() {
    let pool = test_pool().await;
    let strobe = TrackRepo::create(
        &pool,
        &new_track("Strobe", "deadmau5", 128.0, "8A", "Progressive House"),
    )
    .await
    .unwrap();
    TrackRepo::create(&pool, &new_track("Opus", "Eric Prydz", 126.0, "4A", "Progressive House"))
        .await
        .unwrap();
    TrackRepo::create(&pool, &new_track("Windowlicker", "Aphex Twin", 120.0, "8A", "Electronica"))
        .await
        .unwrap();

    let predicate = TrackFilter {
        key: Some("8A".to_string()),
        genre: Some("Progressive House".to_string()),
        ..filter()
    }
    .build()
    .unwrap();
    let found = TrackRepo::list(&pool, &predicate).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, strobe.id);

    let nothing = TrackFilter {
        key: Some("8A".to_string()),
        bpm_max: Some(100.0),
        ..filter()
    }
    .build()
    .unwrap();
    assert!(TrackRepo::list(&pool, &nothing).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Test: update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_update_merges_supplied_fields() {
    let pool = test_pool().await;
    let mut input = new_track("Strobe", "deadmau5", 128.0, "8A", "Progressive House");
    input.notes = Some("Peak time".to_string());
    let track = TrackRepo::create(&pool, &input).await.unwrap();

    let patch = UpdateTrack {
        bpm: Some(126.0),
        title: Some("Strobe (Radio Edit)".to_string()),
        ..Default::default()
    };
    let updated = TrackRepo::update(&pool, track.id, &patch)
        .await
        .unwrap()
        .expect("track should exist");
    assert_eq!(updated.bpm, 126.0);
    assert_eq!(updated.title, "Strobe (Radio Edit)");
    assert_eq!(updated.artist, "deadmau5");
    assert_eq!(updated.notes.as_deref(), Some("Peak time"));
    assert_eq!(updated.created_at, track.created_at);
    assert!(updated.updated_at >= track.updated_at);

    let searched = TrackFilter {
        search: Some("radio edit".to_string()),
        ..filter()
    }
    .build()
    .unwrap();
    assert_eq!(TrackRepo::list(&pool, &searched).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_unknown_returns_none() {
    let pool = test_pool().await;
    let result = TrackRepo::update(
        &pool,
        setlist_core::types::new_id(),
        &UpdateTrack::default(),
    )
    .await
    .unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Test: delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_delete_removes_track_from_every_set() {
    let pool = test_pool().await;
    let keep = TrackRepo::create(&pool, &new_track("Keep", "A", 124.0, "1A", "House"))
        .await
        .unwrap();
    let doomed = TrackRepo::create(&pool, &new_track("Doomed", "B", 124.0, "1A", "House"))
        .await
        .unwrap();

    let mut set_ids = Vec::new();
    for name in ["Warm Up", "Peak Hour", "Closing"] {
        let set = SetRepo::create(&pool, &new_set(name, vec![doomed.id, keep.id]))
            .await
            .unwrap();
        set_ids.push(set.set.id);
    }
    let untouched = SetRepo::create(&pool, &new_set("Ambient", vec![keep.id]))
        .await
        .unwrap();

    assert!(TrackRepo::delete(&pool, doomed.id).await.unwrap());
    assert!(TrackRepo::find_by_id(&pool, doomed.id).await.unwrap().is_none());

    for id in set_ids {
        let set = SetRepo::find_by_id_with_tracks(&pool, id)
            .await
            .unwrap()
            .expect("set should exist");
        assert_eq!(set.track_ids(), vec![keep.id]);
        assert_matches!(&set.tracks[0], TrackRef::Resolved(t) if t.id == keep.id);
    }

    let ambient = SetRepo::find_by_id_with_tracks(&pool, untouched.set.id)
        .await
        .unwrap()
        .expect("set should exist");
    assert_eq!(ambient.track_ids(), vec![keep.id]);
    assert_eq!(ambient.set.updated_at, untouched.set.updated_at);
}

#[tokio::test]
async fn test_delete_unknown_returns_false() {
    let pool = test_pool().await;
    let deleted = TrackRepo::delete(&pool, setlist_core::types::new_id())
        .await
        .unwrap();
    assert!(!deleted);
}
