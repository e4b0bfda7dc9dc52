use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::kv::{read_value, write_value};
use spendsync_core::constants::{EMPTY_QUEUE_JSON, PENDING_SMS_KEY};
use spendsync_core::errors::{Error, Result};
use spendsync_core::queue::{append_to_blob, decode_queue, PendingQueueRepositoryTrait};
use spendsync_core::sms::SmsEvent;

/// Pending SMS queue persisted as one JSON blob in `app_settings`.
///
/// Every mutation is a job on the writer actor, so appends and drains are
/// serialized and each runs in its own immediate transaction.
pub struct SqlitePendingQueueRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    key: String,
}

/// Reports storage problems as queue errors.
fn queue_err(err: Error) -> Error {
    Error::Queue(err.into_queue_error())
}

impl SqlitePendingQueueRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self::with_key(pool, writer, PENDING_SMS_KEY)
    }

    pub fn with_key(pool: Arc<DbPool>, writer: WriteHandle, key: &str) -> Self {
        SqlitePendingQueueRepository {
            pool,
            writer,
            key: key.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Moves a corrupt blob aside and resets the queue.
    ///
    /// The blob is kept under `<key>.corrupt.<epoch-ms>`; that key is returned.
    /// Returns `None` when the stored blob decodes fine.
    pub async fn recover_corrupt(&self) -> Result<Option<String>> {
        let key = self.key.clone();
        self.writer
            .exec(move |conn| {
                let raw = read_value(conn, &key)?.unwrap_or_else(|| EMPTY_QUEUE_JSON.to_string());
                let reason = match decode_queue(&raw) {
                    Ok(_) => return Ok(None),
                    Err(e) => e,
                };

                let backup_key = format!("{}.corrupt.{}", key, Utc::now().timestamp_millis());
                write_value(conn, &backup_key, &raw)?;
                write_value(conn, &key, EMPTY_QUEUE_JSON)?;
                warn!(
                    "Pending queue was corrupt ({}); moved to '{}' and reset",
                    reason, backup_key
                );
                Ok(Some(backup_key))
            })
            .await
            .map_err(queue_err)
    }
}

#[async_trait]
impl PendingQueueRepositoryTrait for SqlitePendingQueueRepository {
    async fn append(&self, event: SmsEvent) -> Result<()> {
        let key = self.key.clone();
        self.writer
            .exec(move |conn| {
                let raw = read_value(conn, &key)?.unwrap_or_else(|| EMPTY_QUEUE_JSON.to_string());
                let updated = append_to_blob(&raw, event)?;
                write_value(conn, &key, &updated)
            })
            .await
            .map_err(queue_err)
    }

    async fn drain_all(&self) -> Result<Vec<SmsEvent>> {
        let key = self.key.clone();
        self.writer
            .exec(move |conn| {
                let raw = read_value(conn, &key)?.unwrap_or_else(|| EMPTY_QUEUE_JSON.to_string());
                // A corrupt blob fails the job and the transaction leaves it untouched
                let entries = decode_queue(&raw)?;
                if raw != EMPTY_QUEUE_JSON {
                    write_value(conn, &key, EMPTY_QUEUE_JSON)?;
                }
                debug!("Drained {} pending SMS", entries.len());
                Ok(entries)
            })
            .await
            .map_err(queue_err)
    }

    async fn drain_raw(&self) -> Result<String> {
        let key = self.key.clone();
        self.writer
            .exec(move |conn| {
                let raw = read_value(conn, &key)?.unwrap_or_else(|| EMPTY_QUEUE_JSON.to_string());
                if raw != EMPTY_QUEUE_JSON {
                    write_value(conn, &key, EMPTY_QUEUE_JSON)?;
                }
                Ok(raw)
            })
            .await
            .map_err(queue_err)
    }

    async fn pending_len(&self) -> Result<usize> {
        let mut conn = get_connection(&self.pool).map_err(queue_err)?;
        let raw = read_value(&mut conn, &self.key)
            .map_err(queue_err)?
            .unwrap_or_else(|| EMPTY_QUEUE_JSON.to_string());
        Ok(decode_queue(&raw)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use spendsync_core::errors::QueueError;
    use tempfile::tempdir;

    /// Creates a repository on a fresh temp database.
    /// The temp dir is returned to keep it alive for the test.
    async fn create_test_repository() -> (SqlitePendingQueueRepository, Arc<DbPool>, tempfile::TempDir)
    {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());

        let repo = SqlitePendingQueueRepository::new(Arc::clone(&pool), writer);
        (repo, pool, temp_dir)
    }

    fn set_blob(pool: &DbPool, key: &str, blob: &str) {
        let mut conn = get_connection(pool).expect("Failed to get connection");
        write_value(&mut conn, key, blob).expect("Failed to write blob");
    }

    fn get_blob(pool: &DbPool, key: &str) -> Option<String> {
        let mut conn = get_connection(pool).expect("Failed to get connection");
        read_value(&mut conn, key).expect("Failed to read blob")
    }

    fn event(ts: i64) -> SmsEvent {
        SmsEvent::new(
            Some("VM-HDFCBK".to_string()),
            format!("Rs {} debited from a/c XX1234", ts),
            ts,
        )
    }

    #[tokio::test]
    async fn test_migration_seeds_empty_queue() {
        let (repo, pool, _dir) = create_test_repository().await;
        assert_eq!(get_blob(&pool, PENDING_SMS_KEY).as_deref(), Some("[]"));
        assert_eq!(repo.pending_len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_append_then_drain_round_trip() {
        let (repo, pool, _dir) = create_test_repository().await;
        for ts in 1..=4 {
            repo.append(event(ts)).await.unwrap();
        }
        assert_eq!(repo.pending_len().await.unwrap(), 4);

        let drained = repo.drain_all().await.unwrap();
        assert_eq!(drained, (1..=4).map(event).collect::<Vec<_>>());
        assert!(repo.drain_all().await.unwrap().is_empty());
        assert_eq!(get_blob(&pool, PENDING_SMS_KEY).as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_queue_survives_reopening_the_database() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("app.db").to_string_lossy().to_string();

        {
            let pool = create_pool(&db_path).unwrap();
            run_migrations(&pool).unwrap();
            let repo = SqlitePendingQueueRepository::new(pool.clone(), spawn_writer((*pool).clone()));
            repo.append(event(10)).await.unwrap();
        }

        let pool = create_pool(&db_path).unwrap();
        run_migrations(&pool).unwrap();
        let repo = SqlitePendingQueueRepository::new(pool.clone(), spawn_writer((*pool).clone()));
        assert_eq!(repo.drain_all().await.unwrap(), vec![event(10)]);
    }

    #[tokio::test]
    async fn test_drain_raw_returns_stored_json_and_resets() {
        let (repo, _pool, _dir) = create_test_repository().await;
        repo.append(event(1)).await.unwrap();

        let raw = repo.drain_raw().await.unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed[0]["sender"], "VM-HDFCBK");
        assert_eq!(parsed[0]["timestamp"], 1);

        assert_eq!(repo.drain_raw().await.unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_missing_key_reads_as_empty_queue() {
        let (_repo, pool, _dir) = create_test_repository().await;
        let repo = SqlitePendingQueueRepository::with_key(
            pool.clone(),
            spawn_writer((*pool).clone()),
            "test.unseeded",
        );

        assert_eq!(repo.drain_raw().await.unwrap(), "[]");
        assert!(repo.drain_all().await.unwrap().is_empty());
        repo.append(event(1)).await.unwrap();
        assert_eq!(repo.pending_len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_serialized() {
        let (repo, _pool, _dir) = create_test_repository().await;
        let repo = Arc::new(repo);

        let appends = (0..40).map(|ts| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.append(event(ts)).await })
        });
        for result in futures::future::join_all(appends).await {
            result.unwrap().unwrap();
        }

        let mut seen: Vec<i64> = repo
            .drain_all()
            .await
            .unwrap()
            .iter()
            .map(|e| e.timestamp())
            .collect();
        seen.sort();
        assert_eq!(seen, (0..40).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_corrupt_blob_surfaces_and_is_left_in_place() {
        let (repo, pool, _dir) = create_test_repository().await;
        set_blob(&pool, PENDING_SMS_KEY, "[{\"sender\": \"BANK\",");

        let err = repo.append(event(1)).await.unwrap_err();
        assert!(matches!(err, Error::Queue(QueueError::CorruptState(_))));
        let err = repo.drain_all().await.unwrap_err();
        assert!(matches!(err, Error::Queue(QueueError::CorruptState(_))));

        assert_eq!(
            get_blob(&pool, PENDING_SMS_KEY).as_deref(),
            Some("[{\"sender\": \"BANK\",")
        );
    }

    #[tokio::test]
    async fn test_recover_corrupt_moves_blob_aside() {
        let (repo, pool, _dir) = create_test_repository().await;
        assert_eq!(repo.recover_corrupt().await.unwrap(), None);

        set_blob(&pool, PENDING_SMS_KEY, "not json");
        let backup_key = repo.recover_corrupt().await.unwrap().expect("blob moved");

        assert!(backup_key.starts_with("flutter.pending_sms.corrupt."));
        assert_eq!(get_blob(&pool, &backup_key).as_deref(), Some("not json"));
        assert_eq!(get_blob(&pool, PENDING_SMS_KEY).as_deref(), Some("[]"));

        repo.append(event(2)).await.unwrap();
        assert_eq!(repo.drain_all().await.unwrap(), vec![event(2)]);
    }
}
