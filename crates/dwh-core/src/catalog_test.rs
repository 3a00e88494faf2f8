use super::*;
use crate::schema::ColumnType;
use std::collections::HashSet;

#[test]
fn test_all_tables_order() {
    let names: Vec<&str> = ALL_TABLES.iter().map(|t| t.name).collect();
    assert_eq!(
        names,
        vec![
            "staging_events",
            "staging_songs",
            "songplays",
            "users",
            "songs",
            "artists",
            "time"
        ]
    );
}

#[test]
fn test_table_names_unique() {
    let names: HashSet<&str> = ALL_TABLES.iter().map(|t| t.name).collect();
    assert_eq!(names.len(), ALL_TABLES.len());
}

#[test]
fn test_staging_tables_have_no_keys() {
    let staging: Vec<&TableDef> = staging_tables().collect();
    assert_eq!(staging.len(), 2);
    for t in staging {
        assert!(t.primary_key().is_none(), "{} has a key", t.name);
        assert!(t.sort_key.is_none(), "{} has a sort key", t.name);
    }
}

#[test]
fn test_final_tables_have_keys_and_sort_keys() {
    let finals: Vec<&TableDef> = final_tables().collect();
    assert_eq!(finals.len(), 5);
    for t in finals {
        assert!(t.primary_key().is_some(), "{} has no key", t.name);
        let sort_key = t.sort_key.expect("final tables declare a sort key");
        assert!(
            t.column(sort_key).is_some(),
            "{} sorts by unknown column {}",
            t.name,
            sort_key
        );
    }
}

#[test]
fn test_sort_keys() {
    assert_eq!(SONGPLAYS.sort_key, Some("start_time"));
    assert_eq!(USERS.sort_key, Some("user_id"));
    assert_eq!(SONGS.sort_key, Some("song_id"));
    assert_eq!(ARTISTS.sort_key, Some("artist_id"));
    assert_eq!(TIME.sort_key, Some("start_time"));
}

#[test]
fn test_songplay_required_columns() {
    for name in ["start_time", "user_id", "song_id", "artist_id"] {
        assert!(SONGPLAYS.column(name).unwrap().not_null, "{name} must be NOT NULL");
    }
    let key = SONGPLAYS.primary_key().unwrap();
    assert_eq!(key.name, "songplay_id");
    assert!(key.identity);
}

#[test]
fn test_staging_events_columns() {
    assert_eq!(STAGING_EVENTS.columns.len(), 18);
    assert_eq!(STAGING_EVENTS.column("ts").unwrap().data_type, ColumnType::BigInt);
    assert_eq!(STAGING_SONGS.columns.len(), 10);
}

#[test]
fn test_table_lookup() {
    assert_eq!(table("time").map(|t| t.kind), Some(TableKind::Dimension));
    assert_eq!(table("songplays").map(|t| t.kind), Some(TableKind::Fact));
    assert!(table("nonexistent").is_none());
}
