/*!
 * Durable review queue for escalated translation failures.
 *
 * This module provides SQLite-based persistence for review items: chunks
 * whose translation could not be recovered by any fallback strategy. Items
 * are never deleted; status moves monotonically from pending to completed
 * or skipped, enforced by conditional updates in the backing store.
 */

// Allow dead code and unused imports - review types are for library consumers
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod connection;
pub mod models;
pub mod queue;
pub mod schema;

// Re-export main types
pub use connection::StoreConnection;
pub use models::{NewReviewItem, ReviewItem, ReviewStats, ReviewStatus};
pub use queue::ReviewQueue;
