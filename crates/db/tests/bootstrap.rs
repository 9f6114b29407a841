//! Schema bootstrap and connection settings.

use sqlx::SqlitePool;

#[sqlx::test(migrations = false)]
async fn test_schema_bootstrap_is_idempotent(pool: SqlitePool) {
    labsite_db::initialize_schema(&pool).await.unwrap();
    labsite_db::initialize_schema(&pool).await.unwrap();

    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
         ORDER BY name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for expected in [
        "news",
        "patents",
        "projects",
        "publication_keywords",
        "publications",
        "research_items",
        "team_members",
        "todos",
        "users",
    ] {
        assert!(
            tables.iter().any(|t| t == expected),
            "missing table {expected}, found {tables:?}"
        );
    }
}

#[sqlx::test(migrations = false)]
async fn test_health_check(pool: SqlitePool) {
    labsite_db::health_check(&pool).await.unwrap();
}

#[tokio::test]
async fn test_create_pool_creates_missing_directories() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("app.db");
    let url = format!("sqlite://{}", db_path.display());

    let pool = labsite_db::create_pool(&url).await.unwrap();
    labsite_db::initialize_schema(&pool).await.unwrap();

    let foreign_keys: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(foreign_keys, 1);
    assert!(db_path.exists());
    pool.close().await;
}

#[sqlx::test(migrations = false)]
async fn test_check_constraints_reject_bad_enum_text(pool: SqlitePool) {
    labsite_db::initialize_schema(&pool).await.unwrap();

    let result = sqlx::query(
        "INSERT INTO todos (text, completed, priority, created_by, created_at, updated_at) \
         VALUES ('x', 0, 'urgent', 1, '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z')",
    )
    .execute(&pool)
    .await;
    assert!(result.is_err());
}
