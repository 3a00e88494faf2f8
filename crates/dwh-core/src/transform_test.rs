use super::*;
use crate::catalog::final_tables;
use crate::dialect::{DuckDbDialect, RedshiftDialect};

#[test]
fn test_projections_cover_insertable_columns_in_order() {
    for transform in all(&RedshiftDialect) {
        let expected: Vec<&str> = transform
            .target
            .insertable_columns()
            .map(|c| c.name)
            .collect();
        let actual: Vec<&str> = transform.projections.iter().map(|p| p.column).collect();
        assert_eq!(actual, expected, "projection mismatch for {}", transform.target.name);
    }
}

#[test]
fn test_transforms_follow_final_table_order() {
    let targets: Vec<&str> = all(&DuckDbDialect).iter().map(|t| t.target.name).collect();
    let finals: Vec<&str> = final_tables().map(|t| t.name).collect();
    assert_eq!(targets, finals);
}

#[test]
fn test_first_per_key_partitions_on_target_key() {
    for transform in all(&RedshiftDialect) {
        if let Dedup::FirstPerKey { key, .. } = transform.dedup {
            let pk = transform.target.primary_key().map(|c| c.name);
            assert_eq!(Some(key), pk, "{} dedups on a non-key column", transform.target.name);
        }
    }
}

#[test]
fn test_songplays_redshift_sql() {
    let sql = songplays(&RedshiftDialect).render(&RedshiftDialect);
    assert_eq!(
        sql,
        "INSERT INTO songplays (start_time, user_id, level, song_id, artist_id, session_id, location, user_agent)
SELECT DISTINCT
    TIMESTAMP 'epoch' + (e.ts / 1000) * INTERVAL '1 second' AS start_time,
    e.userId AS user_id,
    e.level AS level,
    s.song_id AS song_id,
    s.artist_id AS artist_id,
    e.sessionId AS session_id,
    e.location AS location,
    e.userAgent AS user_agent
FROM staging_songs AS s
INNER JOIN staging_events AS e
    ON s.title = e.song
    AND s.artist_name = e.artist
    AND s.duration = e.length
WHERE e.page = 'NextSong'"
    );
}

#[test]
fn test_users_redshift_sql() {
    let sql = users(&RedshiftDialect).render(&RedshiftDialect);
    assert_eq!(
        sql,
        "INSERT INTO users (user_id, first_name, last_name, gender, level)
SELECT
    user_id,
    first_name,
    last_name,
    gender,
    level
FROM (
    SELECT
        userId AS user_id,
        firstName AS first_name,
        lastName AS last_name,
        gender,
        level,
        ROW_NUMBER() OVER (PARTITION BY userId ORDER BY ts DESC, level, firstName, lastName, gender) AS row_num
    FROM staging_events
    WHERE userId IS NOT NULL
        AND page = 'NextSong'
) AS ranked
WHERE row_num = 1"
    );
}

#[test]
fn test_artists_have_no_null_filter() {
    let sql = artists(&RedshiftDialect).render(&RedshiftDialect);
    assert!(!sql.contains("IS NOT NULL"));
    assert!(sql.contains("PARTITION BY artist_id"));
    assert!(sql.contains("artist_name AS name"));
}

#[test]
fn test_songs_filter_null_ids() {
    let sql = songs(&RedshiftDialect).render(&RedshiftDialect);
    assert!(sql.contains("WHERE song_id IS NOT NULL"));
    assert!(sql.contains("CAST(year AS INTEGER) AS year"));
}

#[test]
fn test_time_and_songplays_share_epoch_expression() {
    for dialect in [&RedshiftDialect as &dyn Dialect, &DuckDbDialect] {
        let songplays_sql = songplays(dialect).render(dialect);
        let time_sql = time(dialect).render(dialect);

        let fact_expr = dialect.epoch_ms_to_timestamp("e.ts");
        let time_expr = dialect.epoch_ms_to_timestamp("ts");
        assert!(songplays_sql.contains(&format!("{} AS start_time", fact_expr)));
        assert!(time_sql.contains(&format!("SELECT {} AS start_time", time_expr)));
        assert_eq!(fact_expr.replace("e.ts", "ts"), time_expr);
    }
}

#[test]
fn test_time_redshift_sql() {
    let sql = time(&RedshiftDialect).render(&RedshiftDialect);
    assert_eq!(
        sql,
        "INSERT INTO time (start_time, hour, day, week, month, year, weekday)
SELECT DISTINCT
    start_time,
    EXTRACT(HOUR FROM start_time) AS hour,
    EXTRACT(DAY FROM start_time) AS day,
    EXTRACT(WEEK FROM start_time) AS week,
    EXTRACT(MONTH FROM start_time) AS month,
    EXTRACT(YEAR FROM start_time) AS year,
    TO_CHAR(start_time, 'Day') AS weekday
FROM (
    SELECT TIMESTAMP 'epoch' + (ts / 1000) * INTERVAL '1 second' AS start_time
    FROM staging_events
    WHERE ts IS NOT NULL
) AS events"
    );
}

#[test]
fn test_duckdb_quotes_tables_in_transforms() {
    let sql = time(&DuckDbDialect).render(&DuckDbDialect);
    assert!(sql.starts_with("INSERT INTO \"time\" ("));
    assert!(sql.contains("FROM \"staging_events\""));
    assert!(sql.contains("dayname(start_time) AS weekday"));
}

#[test]
fn test_no_trailing_whitespace() {
    for transform in all(&DuckDbDialect) {
        let sql = transform.render(&DuckDbDialect);
        assert_eq!(sql.trim_end(), sql);
        assert!(!sql.ends_with(';'));
    }
}

#[test]
fn test_first_per_key_orders_on_every_source_column() {
    for transform in all(&RedshiftDialect) {
        let Dedup::FirstPerKey { key, order_by } = transform.dedup else {
            continue;
        };
        for projection in transform.projections.iter().filter(|p| p.column != key) {
            let source = projection
                .expr
                .trim_start_matches("CAST(")
                .split_whitespace()
                .next()
                .unwrap_or_default();
            assert!(
                order_by.split(", ").any(|term| term.split_whitespace().next() == Some(source)),
                "{}: '{}' missing from ORDER BY {}",
                transform.target.name,
                source,
                order_by
            );
        }
    }
}
