/*!
 * Review queue over the durable store.
 *
 * This is the high-level API for escalated translation failures. Status
 * transitions are resolved atomically by conditional updates guarded on the
 * current status, so concurrent reviewers racing on the same item cannot
 * push it out of a terminal state.
 */

use anyhow::{anyhow, Result};
use chrono::Utc;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::connection::StoreConnection;
use super::models::{NewReviewItem, ReviewItem, ReviewStats, ReviewStatus};

/// Durable queue of items escalated to human review
#[derive(Clone)]
pub struct ReviewQueue {
    /// Backing store connection
    db: StoreConnection,
}

impl ReviewQueue {
    /// Create a queue over the given store connection
    pub fn new(db: StoreConnection) -> Self {
        Self { db }
    }

    /// Create a queue at the default store location
    pub fn new_default() -> Result<Self> {
        let db = StoreConnection::new_default()?;
        Ok(Self::new(db))
    }

    /// Create a queue over an in-memory store (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = StoreConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Enqueue a new item and return its identifier
    ///
    /// The item starts pending with a creation timestamp; it is never
    /// deleted by this library.
    pub async fn add(&self, item: NewReviewItem) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let source_hash = Self::hash_source(&item.source_text);
        let created_at = Utc::now().to_rfc3339();
        let failed_strategies = serde_json::to_string(&item.failed_strategies)?;

        debug!("Enqueuing review item {} ({} chars)", id, item.source_text.len());

        let stored_id = id.clone();
        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO review_items (
                        id, source_text, source_hash, page_number, attempted_translation,
                        error_message, failed_strategies, status, created_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                    "#,
                    params![
                        stored_id,
                        item.source_text,
                        source_hash,
                        item.page_number,
                        item.attempted_translation,
                        item.error_message,
                        failed_strategies,
                        ReviewStatus::Pending.to_string(),
                        created_at,
                    ],
                )?;
                Ok(())
            })
            .await?;

        Ok(id)
    }

    /// Get a review item by id
    pub async fn get_item(&self, id: &str) -> Result<Option<ReviewItem>> {
        let id = id.to_string();

        self.db
            .execute_async(move |conn| {
                let item = conn
                    .query_row(
                        &format!("{} WHERE id = ?1", Self::SELECT_ITEM),
                        [id],
                        Self::row_to_item,
                    )
                    .optional()?;
                Ok(item)
            })
            .await
    }

    /// Pending items, most recent first
    pub async fn get_queue(&self, limit: usize) -> Result<Vec<ReviewItem>> {
        self.db
            .execute_async(move |conn| {
                let mut statement = conn.prepare(&format!(
                    "{} WHERE status = 'pending' ORDER BY created_at DESC, rowid DESC LIMIT ?1",
                    Self::SELECT_ITEM
                ))?;

                let items = statement
                    .query_map([limit as i64], Self::row_to_item)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(items)
            })
            .await
    }

    /// Record a human-supplied translation: pending -> completed
    pub async fn mark_complete(
        &self,
        id: &str,
        translation: &str,
        reviewed_by: Option<&str>,
        notes: Option<&str>,
    ) -> Result<()> {
        let id = id.to_string();
        let translation = translation.to_string();
        let reviewer = reviewed_by.map(|s| s.to_string());
        let notes = notes.map(|s| s.to_string());
        let completed_at = Utc::now().to_rfc3339();

        self.db
            .execute_async(move |conn| {
                // Conditional update guarded on the current status keeps the
                // transition atomic under concurrent reviewers
                let updated = conn.execute(
                    r#"
                    UPDATE review_items
                    SET status = 'completed', translation = ?2, reviewer = ?3,
                        notes = ?4, completed_at = ?5
                    WHERE id = ?1 AND status = 'pending'
                    "#,
                    params![id, translation, reviewer, notes, completed_at],
                )?;

                if updated == 0 {
                    return Err(Self::transition_error(conn, &id, "completed"));
                }
                Ok(())
            })
            .await
    }

    /// Mark an item as not needing translation: pending -> skipped
    pub async fn mark_skipped(&self, id: &str, reason: Option<&str>) -> Result<()> {
        let id = id.to_string();
        let reason = reason.map(|s| s.to_string());
        let completed_at = Utc::now().to_rfc3339();

        self.db
            .execute_async(move |conn| {
                let updated = conn.execute(
                    r#"
                    UPDATE review_items
                    SET status = 'skipped', notes = ?2, completed_at = ?3
                    WHERE id = ?1 AND status = 'pending'
                    "#,
                    params![id, reason, completed_at],
                )?;

                if updated == 0 {
                    return Err(Self::transition_error(conn, &id, "skipped"));
                }
                Ok(())
            })
            .await
    }

    /// Counts of items by status
    pub async fn get_stats(&self) -> Result<ReviewStats> {
        self.db
            .execute_async(|conn| {
                let mut statement =
                    conn.prepare("SELECT status, COUNT(*) FROM review_items GROUP BY status")?;

                let mut stats = ReviewStats::default();
                let rows = statement.query_map([], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
                })?;

                for row in rows {
                    let (status, count) = row?;
                    match status.parse::<ReviewStatus>() {
                        Ok(ReviewStatus::Pending) => stats.pending = count as u64,
                        Ok(ReviewStatus::Completed) => stats.completed = count as u64,
                        Ok(ReviewStatus::Skipped) => stats.skipped = count as u64,
                        Err(_) => {}
                    }
                }

                Ok(stats)
            })
            .await
    }

    /// SHA-256 hex digest of the source text
    fn hash_source(source_text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(source_text.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Column list shared by the item queries
    const SELECT_ITEM: &'static str = r#"
        SELECT id, source_text, source_hash, page_number, attempted_translation,
               error_message, failed_strategies, status, translation, reviewer,
               notes, created_at, completed_at
        FROM review_items
    "#;

    /// Map a row to a ReviewItem
    fn row_to_item(row: &Row<'_>) -> rusqlite::Result<ReviewItem> {
        let failed_strategies: String = row.get(6)?;
        let status: String = row.get(7)?;

        Ok(ReviewItem {
            id: row.get(0)?,
            source_text: row.get(1)?,
            source_hash: row.get(2)?,
            page_number: row.get(3)?,
            attempted_translation: row.get(4)?,
            error_message: row.get(5)?,
            failed_strategies: serde_json::from_str(&failed_strategies).unwrap_or_default(),
            status: status.parse().unwrap_or(ReviewStatus::Pending),
            translation: row.get(8)?,
            reviewer: row.get(9)?,
            notes: row.get(10)?,
            created_at: row.get(11)?,
            completed_at: row.get(12)?,
        })
    }

    /// Build the error for a rejected status transition
    fn transition_error(conn: &Connection, id: &str, target: &str) -> anyhow::Error {
        let current: Option<String> = conn
            .query_row(
                "SELECT status FROM review_items WHERE id = ?1",
                [id],
                |row| row.get(0),
            )
            .optional()
            .ok()
            .flatten();

        match current {
            None => anyhow!("Review item not found: {}", id),
            Some(status) => anyhow!(
                "Review item {} is '{}', cannot transition to '{}'",
                id,
                status,
                target
            ),
        }
    }
}
