use {
    crate::domain::{
        audit::{AuditRecord, AuditStatus},
        error::StoreError,
        id::RecordId,
    },
    chrono::{DateTime, Utc},
    sqlx::sqlite::{
        SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
    },
    std::{str::FromStr, time::Duration},
};

/// Append-only audit log backed by a SQLite file.
///
/// All appends go through a single-connection writer pool, one transaction
/// each. Reads use a separate pool and only ever see committed rows (WAL).
/// Cloning yields another handle to the same store.
#[derive(Clone)]
pub struct AuditStore {
    writer: SqlitePool,
    reader: SqlitePool,
}

type RecordRow = (String, i64, String, String, String);

impl AuditStore {
    /// Opens (or creates) the store at `database_url` and runs migrations.
    /// Requires a file-backed URL; `:memory:` would give each pool its own database.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Full)
            .busy_timeout(Duration::from_secs(5));

        let parent = options
            .get_filename()
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty());
        if let Some(dir) = parent {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(sqlx::Error::Io)?;
        }

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options.clone())
            .await?;

        sqlx::migrate!("./migrations")
            .run(&writer)
            .await
            .map_err(sqlx::Error::from)?;

        let reader = SqlitePoolOptions::new()
            .max_connections(8)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await?;

        Ok(Self { writer, reader })
    }

    /// Durably appends one record. On error nothing is written.
    ///
    /// The stored `created_at` is never older than the newest stored record,
    /// so timestamps stay non-decreasing in storage order.
    pub async fn append(&self, record: &AuditRecord) -> Result<(), StoreError> {
        let payload = serde_json::to_string(&record.payload)?;
        let response = serde_json::to_string(&record.response)?;
        let submitted_us = record.created_at.timestamp_micros();

        let mut tx = self.writer.begin().await?;

        let newest_us: Option<i64> =
            sqlx::query_scalar("SELECT MAX(created_at_us) FROM audit_records")
                .fetch_one(&mut *tx)
                .await?;
        let created_at_us = newest_us.map_or(submitted_us, |newest| newest.max(submitted_us));

        sqlx::query(
            r#"
            INSERT INTO audit_records (id, created_at_us, payload, response, status)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.id.as_str())
        .bind(created_at_us)
        .bind(payload)
        .bind(response)
        .bind(record.status.as_str())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Up to `limit` most recently appended records, newest first.
    pub async fn recent(&self, limit: usize) -> Result<Vec<AuditRecord>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, RecordRow>(
            r#"
            SELECT id, created_at_us, payload, response, status
            FROM audit_records
            ORDER BY seq DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.reader)
        .await?;

        rows.into_iter().map(decode_row).collect()
    }

    pub async fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM audit_records")
            .fetch_one(&self.reader)
            .await?;
        Ok(count.max(0) as u64)
    }

    pub async fn close(&self) {
        self.writer.close().await;
        self.reader.close().await;
    }
}

fn decode_row(
    (id, created_at_us, payload, response, status): RecordRow,
) -> Result<AuditRecord, StoreError> {
    let created_at = DateTime::<Utc>::from_timestamp_micros(created_at_us).ok_or_else(|| {
        StoreError::Serialization(format!("created_at out of range: {created_at_us}"))
    })?;

    Ok(AuditRecord {
        id: RecordId::new(id)?,
        created_at,
        payload: serde_json::from_str(&payload)?,
        response: serde_json::from_str(&response)?,
        status: AuditStatus::try_from(status.as_str())?,
    })
}
