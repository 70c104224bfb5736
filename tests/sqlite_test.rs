//! Round-trips through an in-memory SQLite database via sqlx

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use opt_value::{DriverValue, Optional, ScanConfig};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};

async fn setup_test_pool() -> Result<SqlitePool> {
    let _ = env_logger::builder().is_test(true).try_init();

    // A single connection keeps the in-memory database alive between queries
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .context("Failed to connect to in-memory database")?;

    sqlx::query(
        "CREATE TABLE people (
            id INTEGER PRIMARY KEY,
            nickname TEXT,
            age INTEGER,
            active INTEGER
        )",
    )
    .execute(&pool)
    .await
    .context("Failed to create people table")?;

    Ok(pool)
}

/// Test binding and reading Optional columns through sqlx
#[tokio::test]
async fn test_optional_columns_roundtrip() -> Result<()> {
    let pool = setup_test_pool().await?;

    sqlx::query("INSERT INTO people (id, nickname, age) VALUES (?, ?, ?)")
        .bind(1_i64)
        .bind(Optional::<String>::empty())
        .bind(Optional::of(36_i64))
        .execute(&pool)
        .await?;
    sqlx::query("INSERT INTO people (id, nickname, age) VALUES (?, ?, ?)")
        .bind(2_i64)
        .bind(Optional::of("bob".to_string()))
        .bind(Optional::<i64>::empty())
        .execute(&pool)
        .await?;

    let rows: Vec<(i64, Optional<String>, Optional<i64>)> =
        sqlx::query_as("SELECT id, nickname, age FROM people ORDER BY id")
            .fetch_all(&pool)
            .await?;

    assert_eq!(
        rows,
        vec![
            (1, Optional::empty(), Optional::of(36)),
            (2, Optional::of("bob".to_string()), Optional::empty()),
        ]
    );
    Ok(())
}

/// Test that an empty Optional is stored as SQL NULL
#[tokio::test]
async fn test_null_is_stored_as_sql_null() -> Result<()> {
    let pool = setup_test_pool().await?;

    sqlx::query("INSERT INTO people (id, nickname) VALUES (?, ?)")
        .bind(1_i64)
        .bind(Optional::<String>::empty())
        .execute(&pool)
        .await?;

    let nulls: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM people WHERE nickname IS NULL")
        .fetch_one(&pool)
        .await?;
    assert_eq!(nulls, 1);
    Ok(())
}

/// Test reading DriverValue from a row and scanning it into Optionals
#[tokio::test]
async fn test_driver_value_scan_from_row() -> Result<()> {
    let pool = setup_test_pool().await?;

    sqlx::query("INSERT INTO people (id, nickname, age, active) VALUES (?, ?, ?, ?)")
        .bind(1_i64)
        .bind(Optional::of("ann".to_string()).value())
        .bind(Optional::of(41_i64).value())
        .bind(Optional::<i64>::empty().value())
        .execute(&pool)
        .await?;

    let row = sqlx::query("SELECT nickname, age, active FROM people WHERE id = ?")
        .bind(1_i64)
        .fetch_one(&pool)
        .await?;

    let nickname: DriverValue = row.try_get("nickname")?;
    let age: DriverValue = row.try_get("age")?;
    let active: DriverValue = row.try_get("active")?;
    assert_eq!(nickname, DriverValue::Text("ann".to_string()));
    assert_eq!(age, DriverValue::Integer(41));
    assert_eq!(active, DriverValue::Null);

    let mut scanned_age = Optional::<i64>::empty();
    scanned_age.scan(age)?;
    assert_eq!(scanned_age, Optional::of(41));

    let mut scanned_active = Optional::of(1_i64);
    scanned_active.scan(active)?;
    assert!(!scanned_active.exists());

    // text column read into an integer: strict fails and names the value
    let mut wrong = Optional::<i64>::empty();
    let err = wrong.scan(nickname).unwrap_err();
    assert!(err.to_string().contains("'ann'"), "{err}");
    assert!(!wrong.exists());
    Ok(())
}

/// Test that a stored boolean reads back as an integer and scans leniently
#[tokio::test]
async fn test_lenient_scan_of_sqlite_boolean() -> Result<()> {
    let pool = setup_test_pool().await?;

    sqlx::query("INSERT INTO people (id, active) VALUES (?, ?)")
        .bind(1_i64)
        .bind(Optional::of(true))
        .execute(&pool)
        .await?;

    let active: DriverValue = sqlx::query_scalar("SELECT active FROM people WHERE id = 1")
        .fetch_one(&pool)
        .await?;
    assert_eq!(active, DriverValue::Integer(1));

    let mut flag = Optional::<bool>::empty();
    assert!(flag.scan(active.clone()).is_err());
    flag.scan_with(active, &ScanConfig::lenient())?;
    assert_eq!(flag, Optional::of(true));
    Ok(())
}

/// Test that timestamps and booleans come back by storage class and scan leniently
#[tokio::test]
async fn test_timestamp_roundtrip_needs_lenient_scan() -> Result<()> {
    let pool = setup_test_pool().await?;

    sqlx::query("CREATE TABLE events (id INTEGER PRIMARY KEY, happened_at DATETIME, done BOOLEAN)")
        .execute(&pool)
        .await
        .context("Failed to create events table")?;

    let happened_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 15).unwrap();
    sqlx::query("INSERT INTO events (id, happened_at, done) VALUES (?, ?, ?)")
        .bind(1_i64)
        .bind(Optional::of(happened_at).value())
        .bind(Optional::of(true).value())
        .execute(&pool)
        .await?;

    let (stored_at, stored_done): (DriverValue, DriverValue) =
        sqlx::query_as("SELECT happened_at, done FROM events WHERE id = 1")
            .fetch_one(&pool)
            .await?;

    // declared column types are not reported back, only the storage class
    assert!(matches!(stored_at, DriverValue::Text(_)), "{stored_at:?}");
    assert_eq!(stored_done, DriverValue::Integer(1));

    let mut when = Optional::<DateTime<Utc>>::empty();
    assert!(when.scan(stored_at.clone()).is_err());
    assert!(!when.exists());
    when.scan_with(stored_at, &ScanConfig::lenient())?;
    assert_eq!(when, Optional::of(happened_at));

    let mut done = Optional::<bool>::empty();
    done.scan_with(stored_done, &ScanConfig::lenient())?;
    assert_eq!(done, Optional::of(true));
    Ok(())
}
