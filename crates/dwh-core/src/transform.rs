//! Staging-to-star-schema transforms
//!
//! Each fact or dimension table is populated by one `INSERT ... SELECT` from
//! the staging tables. The target column list comes from the projections,
//! which are declared in the target table's catalog order.

use crate::catalog::{ARTISTS, SONGPLAYS, SONGS, STAGING_EVENTS, STAGING_SONGS, TIME, USERS};
use crate::dialect::Dialect;
use crate::schema::TableDef;
use crate::sql_utils::quote_literal;

/// Page value marking a song play in the event log
pub const NEXT_SONG_PAGE: &str = "NextSong";

/// A target column and the source expression that fills it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    /// Target column name
    pub column: &'static str,
    /// Source expression
    pub expr: String,
}

impl Projection {
    fn new(column: &'static str, expr: impl Into<String>) -> Self {
        Self {
            column,
            expr: expr.into(),
        }
    }

    fn render(&self) -> String {
        if self.expr == self.column {
            self.expr.clone()
        } else {
            format!("{} AS {}", self.expr, self.column)
        }
    }
}

/// How duplicate source rows are collapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dedup {
    /// `SELECT DISTINCT` over the projected columns
    Distinct,
    /// Keep one row per key: the first under `order_by`, which should
    /// order on every projected source column so the pick is deterministic
    FirstPerKey {
        /// Target key column
        key: &'static str,
        /// Window ordering over source columns
        order_by: &'static str,
    },
}

/// An `INSERT INTO target SELECT ... FROM staging` transform
#[derive(Debug, Clone)]
pub struct InsertSelect {
    /// Table being populated
    pub target: &'static TableDef,
    /// Projections in target column order
    pub projections: Vec<Projection>,
    /// FROM clause body
    pub from: String,
    /// Predicates joined with AND
    pub filters: Vec<String>,
    /// Duplicate handling
    pub dedup: Dedup,
}

impl InsertSelect {
    /// Render the statement for a dialect
    pub fn render(&self, dialect: &dyn Dialect) -> String {
        let columns: Vec<&str> = self.projections.iter().map(|p| p.column).collect();
        let mut sql = format!(
            "INSERT INTO {} ({})\n",
            dialect.quote_table(self.target.name),
            columns.join(", ")
        );

        match self.dedup {
            Dedup::Distinct => {
                sql.push_str("SELECT DISTINCT\n");
                sql.push_str(&self.select_list("    ", None));
                sql.push_str(&format!("FROM {}\n", self.from));
                sql.push_str(&self.where_clause(""));
            }
            Dedup::FirstPerKey { key, order_by } => {
                let partition = self
                    .projections
                    .iter()
                    .find(|p| p.column == key)
                    .map_or(key, |p| p.expr.as_str());
                let row_number = format!(
                    "ROW_NUMBER() OVER (PARTITION BY {} ORDER BY {}) AS row_num",
                    partition, order_by
                );

                sql.push_str("SELECT\n");
                sql.push_str(&format!("    {}\n", columns.join(",\n    ")));
                sql.push_str("FROM (\n    SELECT\n");
                sql.push_str(&self.select_list("        ", Some(&row_number)));
                sql.push_str(&format!("    FROM {}\n", self.from));
                sql.push_str(&self.where_clause("    "));
                sql.push_str(") AS ranked\nWHERE row_num = 1\n");
            }
        }

        sql.truncate(sql.trim_end().len());
        sql
    }

    fn select_list(&self, indent: &str, extra: Option<&str>) -> String {
        let items: Vec<String> = self
            .projections
            .iter()
            .map(Projection::render)
            .chain(extra.map(String::from))
            .collect();
        let separator = format!(",\n{}", indent);
        format!("{}{}\n", indent, items.join(&separator))
    }

    fn where_clause(&self, indent: &str) -> String {
        if self.filters.is_empty() {
            return String::new();
        }
        let separator = format!("\n{}    AND ", indent);
        format!("{}WHERE {}\n", indent, self.filters.join(&separator))
    }
}

/// Song plays: staged songs joined to `NextSong` events on title, artist and
/// duration. Events with no matching song are dropped.
pub fn songplays(dialect: &dyn Dialect) -> InsertSelect {
    InsertSelect {
        target: &SONGPLAYS,
        projections: vec![
            Projection::new("start_time", dialect.epoch_ms_to_timestamp("e.ts")),
            Projection::new("user_id", "e.userId"),
            Projection::new("level", "e.level"),
            Projection::new("song_id", "s.song_id"),
            Projection::new("artist_id", "s.artist_id"),
            Projection::new("session_id", "e.sessionId"),
            Projection::new("location", "e.location"),
            Projection::new("user_agent", "e.userAgent"),
        ],
        from: format!(
            "{} AS s\nINNER JOIN {} AS e\n    ON s.title = e.song\n    AND s.artist_name = e.artist\n    AND s.duration = e.length",
            dialect.quote_table(STAGING_SONGS.name),
            dialect.quote_table(STAGING_EVENTS.name)
        ),
        filters: vec![format!("e.page = {}", quote_literal(NEXT_SONG_PAGE))],
        dedup: Dedup::Distinct,
    }
}

/// Users seen playing a song.
///
/// A user's level can change between sessions, so one user can appear with
/// several column values. One row per user is kept, taken from their latest
/// event. That ordering is a chosen rule rather than something the source
/// data dictates; the remaining columns break ties on equal timestamps.
pub fn users(dialect: &dyn Dialect) -> InsertSelect {
    InsertSelect {
        target: &USERS,
        projections: vec![
            Projection::new("user_id", "userId"),
            Projection::new("first_name", "firstName"),
            Projection::new("last_name", "lastName"),
            Projection::new("gender", "gender"),
            Projection::new("level", "level"),
        ],
        from: dialect.quote_table(STAGING_EVENTS.name),
        filters: vec![
            "userId IS NOT NULL".to_string(),
            format!("page = {}", quote_literal(NEXT_SONG_PAGE)),
        ],
        dedup: Dedup::FirstPerKey {
            key: "user_id",
            order_by: "ts DESC, level, firstName, lastName, gender",
        },
    }
}

/// Songs from the staged catalog, one row per `song_id`
pub fn songs(dialect: &dyn Dialect) -> InsertSelect {
    InsertSelect {
        target: &SONGS,
        projections: vec![
            Projection::new("song_id", "song_id"),
            Projection::new("title", "title"),
            Projection::new("artist_id", "artist_id"),
            Projection::new("year", "CAST(year AS INTEGER)"),
            Projection::new("duration", "duration"),
        ],
        from: dialect.quote_table(STAGING_SONGS.name),
        filters: vec!["song_id IS NOT NULL".to_string()],
        dedup: Dedup::FirstPerKey {
            key: "song_id",
            order_by: "title, artist_id, year, duration",
        },
    }
}

/// Artists from the staged catalog. A null `artist_id` is left for the
/// engine to reject.
pub fn artists(dialect: &dyn Dialect) -> InsertSelect {
    InsertSelect {
        target: &ARTISTS,
        projections: vec![
            Projection::new("artist_id", "artist_id"),
            Projection::new("name", "artist_name"),
            Projection::new("location", "artist_location"),
            Projection::new("latitude", "artist_latitude"),
            Projection::new("longitude", "artist_longitude"),
        ],
        from: dialect.quote_table(STAGING_SONGS.name),
        filters: Vec::new(),
        dedup: Dedup::FirstPerKey {
            key: "artist_id",
            order_by: "artist_name, artist_location, artist_latitude, artist_longitude",
        },
    }
}

/// Calendar breakdown of every event timestamp. `start_time` is derived with
/// the same expression as [`songplays`] so the two always join.
pub fn time(dialect: &dyn Dialect) -> InsertSelect {
    InsertSelect {
        target: &TIME,
        projections: vec![
            Projection::new("start_time", "start_time"),
            Projection::new("hour", "EXTRACT(HOUR FROM start_time)"),
            Projection::new("day", "EXTRACT(DAY FROM start_time)"),
            Projection::new("week", "EXTRACT(WEEK FROM start_time)"),
            Projection::new("month", "EXTRACT(MONTH FROM start_time)"),
            Projection::new("year", "EXTRACT(YEAR FROM start_time)"),
            Projection::new("weekday", dialect.weekday_name("start_time")),
        ],
        from: format!(
            "(\n    SELECT {} AS start_time\n    FROM {}\n    WHERE ts IS NOT NULL\n) AS events",
            dialect.epoch_ms_to_timestamp("ts"),
            dialect.quote_table(STAGING_EVENTS.name)
        ),
        filters: Vec::new(),
        dedup: Dedup::Distinct,
    }
}

/// Every transform, in population order
pub fn all(dialect: &dyn Dialect) -> Vec<InsertSelect> {
    vec![
        songplays(dialect),
        users(dialect),
        songs(dialect),
        artists(dialect),
        time(dialect),
    ]
}

#[cfg(test)]
#[path = "transform_test.rs"]
mod tests;
