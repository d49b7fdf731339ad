/*!
 * Review queue entity models and DTOs.
 *
 * These structures map directly to the review store table and provide
 * type-safe access to persisted data.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Review item status enumeration
///
/// Transitions are monotonic: pending moves to completed or skipped, and
/// terminal states never change again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// Item awaiting human review
    Pending,
    /// A human supplied a translation
    Completed,
    /// A human decided no translation is needed
    Skipped,
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewStatus::Pending => write!(f, "pending"),
            ReviewStatus::Completed => write!(f, "completed"),
            ReviewStatus::Skipped => write!(f, "skipped"),
        }
    }
}

impl std::str::FromStr for ReviewStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ReviewStatus::Pending),
            "completed" => Ok(ReviewStatus::Completed),
            "skipped" => Ok(ReviewStatus::Skipped),
            _ => Err(anyhow::anyhow!("Invalid review status: {}", s)),
        }
    }
}

/// Data needed to enqueue a new review item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReviewItem {
    /// Source text that could not be translated
    pub source_text: String,

    /// Page the text came from, when known
    pub page_number: Option<u32>,

    /// Partial or low-quality translation produced before escalation, if any
    pub attempted_translation: Option<String>,

    /// Message of the error that triggered escalation
    pub error_message: String,

    /// Names of the strategies that failed before escalation
    pub failed_strategies: Vec<String>,
}

/// A persisted review item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewItem {
    /// Queue-assigned identifier
    pub id: String,

    /// Source text that could not be translated
    pub source_text: String,

    /// SHA-256 hash of the source text, for dedup-friendly lookups
    pub source_hash: String,

    /// Page the text came from, when known
    pub page_number: Option<u32>,

    /// Partial translation produced before escalation, if any
    pub attempted_translation: Option<String>,

    /// Message of the error that triggered escalation
    pub error_message: String,

    /// Names of the strategies that failed before escalation
    pub failed_strategies: Vec<String>,

    /// Current status
    pub status: ReviewStatus,

    /// Human-supplied translation, set on completion
    pub translation: Option<String>,

    /// Who reviewed the item, when recorded
    pub reviewer: Option<String>,

    /// Reviewer notes or skip reason
    pub notes: Option<String>,

    /// Creation timestamp (RFC 3339)
    pub created_at: String,

    /// Completion timestamp (RFC 3339), set on a terminal transition
    pub completed_at: Option<String>,
}

/// Counts of review items by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewStats {
    /// Items awaiting review
    pub pending: u64,

    /// Items completed with a human translation
    pub completed: u64,

    /// Items skipped by a reviewer
    pub skipped: u64,
}

impl ReviewStats {
    /// Total number of items ever enqueued
    pub fn total(&self) -> u64 {
        self.pending + self.completed + self.skipped
    }
}
