//! The Sparkify star schema
//!
//! Two staging tables land raw JSON from object storage; one fact table and
//! four dimension tables are populated from them. [`ALL_TABLES`] fixes the
//! order tables are dropped and created in.

use crate::schema::{Column, TableDef, TableKind};

use crate::schema::ColumnType::{BigInt, Char, Integer, Real, Timestamp, Varchar};

/// Raw log events, one row per event
pub const STAGING_EVENTS: TableDef = TableDef {
    name: "staging_events",
    kind: TableKind::Staging,
    columns: &[
        Column::new("artist", Varchar),
        Column::new("auth", Varchar),
        Column::new("firstName", Varchar),
        Column::new("gender", Varchar),
        Column::new("itemInSession", Integer),
        Column::new("lastName", Varchar),
        Column::new("length", Real),
        Column::new("level", Varchar),
        Column::new("location", Varchar),
        Column::new("method", Varchar),
        Column::new("page", Varchar),
        Column::new("registration", Real),
        Column::new("sessionId", Integer),
        Column::new("song", Varchar),
        Column::new("status", Integer),
        Column::new("ts", BigInt),
        Column::new("userAgent", Varchar),
        Column::new("userId", Integer),
    ],
    sort_key: None,
};

/// Raw song catalog, one row per song file
pub const STAGING_SONGS: TableDef = TableDef {
    name: "staging_songs",
    kind: TableKind::Staging,
    columns: &[
        Column::new("num_songs", Integer),
        Column::new("artist_id", Varchar),
        Column::new("artist_latitude", Real),
        Column::new("artist_longitude", Real),
        Column::new("artist_location", Varchar),
        Column::new("artist_name", Varchar),
        Column::new("song_id", Varchar),
        Column::new("title", Varchar),
        Column::new("duration", Real),
        Column::new("year", Real),
    ],
    sort_key: None,
};

/// One row per song play
pub const SONGPLAYS: TableDef = TableDef {
    name: "songplays",
    kind: TableKind::Fact,
    columns: &[
        Column::new("songplay_id", Integer).identity().primary_key(),
        Column::new("start_time", Timestamp).not_null(),
        Column::new("user_id", Integer).not_null(),
        Column::new("level", Varchar),
        Column::new("song_id", Varchar).not_null(),
        Column::new("artist_id", Varchar).not_null(),
        Column::new("session_id", Integer),
        Column::new("location", Varchar),
        Column::new("user_agent", Varchar),
    ],
    sort_key: Some("start_time"),
};

/// App users
pub const USERS: TableDef = TableDef {
    name: "users",
    kind: TableKind::Dimension,
    columns: &[
        Column::new("user_id", Integer).primary_key(),
        Column::new("first_name", Varchar),
        Column::new("last_name", Varchar),
        Column::new("gender", Char(1)),
        Column::new("level", Varchar),
    ],
    sort_key: Some("user_id"),
};

/// Songs in the catalog
pub const SONGS: TableDef = TableDef {
    name: "songs",
    kind: TableKind::Dimension,
    columns: &[
        Column::new("song_id", Varchar).primary_key(),
        Column::new("title", Varchar),
        Column::new("artist_id", Varchar),
        Column::new("year", Integer),
        Column::new("duration", Real),
    ],
    sort_key: Some("song_id"),
};

/// Artists in the catalog
pub const ARTISTS: TableDef = TableDef {
    name: "artists",
    kind: TableKind::Dimension,
    columns: &[
        Column::new("artist_id", Varchar).primary_key(),
        Column::new("name", Varchar),
        Column::new("location", Varchar),
        Column::new("latitude", Real),
        Column::new("longitude", Real),
    ],
    sort_key: Some("artist_id"),
};

/// Play timestamps broken into calendar units
pub const TIME: TableDef = TableDef {
    name: "time",
    kind: TableKind::Dimension,
    columns: &[
        Column::new("start_time", Timestamp).primary_key(),
        Column::new("hour", Integer),
        Column::new("day", Integer),
        Column::new("week", Integer),
        Column::new("month", Integer),
        Column::new("year", Integer),
        Column::new("weekday", Varchar),
    ],
    sort_key: Some("start_time"),
};

/// Every table, in drop/create order
pub const ALL_TABLES: [&TableDef; 7] = [
    &STAGING_EVENTS,
    &STAGING_SONGS,
    &SONGPLAYS,
    &USERS,
    &SONGS,
    &ARTISTS,
    &TIME,
];

/// Staging tables, in bulk-load order
pub fn staging_tables() -> impl Iterator<Item = &'static TableDef> {
    ALL_TABLES.into_iter().filter(|t| t.is_staging())
}

/// Fact and dimension tables, in population order
pub fn final_tables() -> impl Iterator<Item = &'static TableDef> {
    ALL_TABLES.into_iter().filter(|t| !t.is_staging())
}

/// Look up a table by name
pub fn table(name: &str) -> Option<&'static TableDef> {
    ALL_TABLES.into_iter().find(|t| t.name == name)
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
