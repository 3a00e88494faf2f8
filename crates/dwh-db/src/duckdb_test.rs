use super::*;
use dwh_core::{Phase, Statement};

#[tokio::test]
async fn test_in_memory() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert_eq!(db.db_type(), "duckdb");
}

#[tokio::test]
async fn test_new_memory_alias() {
    let db = DuckDbBackend::new(":memory:").unwrap();
    assert!(!db.relation_exists("anything").await.unwrap());
}

#[tokio::test]
async fn test_from_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("warehouse.duckdb");
    {
        let db = DuckDbBackend::from_path(&path).unwrap();
        db.execute_batch("CREATE TABLE persisted (id INT)")
            .await
            .unwrap();
    }
    let db = DuckDbBackend::from_path(&path).unwrap();
    assert!(db.relation_exists("persisted").await.unwrap());
}

#[tokio::test]
async fn test_query_count() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE nums AS SELECT * FROM range(10) t(n)")
        .await
        .unwrap();

    let count = db.query_count("SELECT * FROM nums").await.unwrap();
    assert_eq!(count, 10);
}

#[tokio::test]
async fn test_execute_returns_affected_rows() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute("CREATE TABLE t (id INT)").await.unwrap();
    let rows = db
        .execute("INSERT INTO t VALUES (1), (2), (3)")
        .await
        .unwrap();
    assert_eq!(rows, 3);
}

#[tokio::test]
async fn test_execute_batch() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(
        "CREATE TABLE t1 (id INT); CREATE TABLE t2 (id INT); INSERT INTO t1 VALUES (1);",
    )
    .await
    .unwrap();

    assert!(db.relation_exists("t1").await.unwrap());
    assert!(db.relation_exists("t2").await.unwrap());
}

#[tokio::test]
async fn test_relation_not_exists() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert!(!db.relation_exists("nonexistent").await.unwrap());
    assert!(!db.relation_exists("main.nonexistent").await.unwrap());
}

#[tokio::test]
async fn test_query_rows_renders_text_and_nulls() {
    let db = DuckDbBackend::in_memory().unwrap();
    let rows = db
        .query_rows("SELECT 1 AS id, 'paid' AS level, NULL AS gender, 2.5 AS length")
        .await
        .unwrap();
    assert_eq!(
        rows,
        vec![vec![
            Some("1".to_string()),
            Some("paid".to_string()),
            None,
            Some("2.5".to_string()),
        ]]
    );
}

#[tokio::test]
async fn test_query_sample_rows() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE people AS SELECT * FROM (VALUES (1, 'Ada'), (2, NULL), (3, 'Lin')) t(id, name)")
        .await
        .unwrap();

    let rows = db
        .query_sample_rows("SELECT * FROM people", 2)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);

    let mut rows = db
        .query_sample_rows("SELECT * FROM people WHERE id <= 2", 10)
        .await
        .unwrap();
    rows.sort();
    assert_eq!(rows, vec!["1, Ada".to_string(), "2, NULL".to_string()]);
}

#[tokio::test]
async fn test_missing_table_error() {
    let db = DuckDbBackend::in_memory().unwrap();
    let err = db.query_count("SELECT * FROM missing").await.unwrap_err();
    assert!(matches!(err, DbError::TableNotFound(_)), "{err}");
}

#[tokio::test]
async fn test_execute_statements_in_order() {
    let db = DuckDbBackend::in_memory().unwrap();
    let statements = vec![
        Statement::new(Phase::Create, "t", "CREATE TABLE t (id INT PRIMARY KEY)"),
        Statement::new(Phase::Insert, "t", "INSERT INTO t VALUES (1), (2)"),
    ];

    let affected = db.execute_statements(&statements).await.unwrap();
    assert_eq!(affected, 2);
    assert_eq!(db.query_count("SELECT * FROM t").await.unwrap(), 2);
}

#[tokio::test]
async fn test_execute_statements_stops_at_failure() {
    let db = DuckDbBackend::in_memory().unwrap();
    let statements = vec![
        Statement::new(Phase::Create, "t", "CREATE TABLE t (id INT PRIMARY KEY)"),
        Statement::new(Phase::Insert, "t", "INSERT INTO t VALUES (1), (1)"),
        Statement::new(Phase::Create, "never", "CREATE TABLE never (id INT)"),
    ];

    let err = db.execute_statements(&statements).await.unwrap_err();
    match &err {
        DbError::StatementFailed { phase, table, .. } => {
            assert_eq!(*phase, Phase::Insert);
            assert_eq!(table, "t");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.is_constraint_violation());
    assert!(err.to_string().starts_with("[D005] insert statement for 't' failed"));
    assert!(!db.relation_exists("never").await.unwrap());
}
