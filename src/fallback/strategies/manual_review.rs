/*!
 * Manual-review fallback strategy.
 *
 * The terminal strategy: performs no translation call, synchronously
 * persists the failing request into the review queue, and returns a
 * well-formed placeholder result. Registered last, it guarantees the
 * orchestrator always completes.
 */

use async_trait::async_trait;
use log::info;

use crate::errors::StrategyError;
use crate::fallback::{FallbackRequest, FallbackStrategy};
use crate::review::{NewReviewItem, ReviewQueue};
use crate::translator::TranslationOutcome;

/// Strategy name used in logs and metadata
pub const NAME: &str = "manual_review";

/// Escalates a failing request to the durable review queue
#[derive(Clone)]
pub struct ManualReviewStrategy {
    /// Review queue collaborator
    queue: ReviewQueue,
}

impl std::fmt::Debug for ManualReviewStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualReviewStrategy").finish()
    }
}

impl ManualReviewStrategy {
    /// Create the strategy around a review queue
    pub fn new(queue: ReviewQueue) -> Self {
        Self { queue }
    }
}

#[async_trait]
impl FallbackStrategy for ManualReviewStrategy {
    fn name(&self) -> &str {
        NAME
    }

    async fn execute(
        &self,
        request: &FallbackRequest,
    ) -> Result<TranslationOutcome, StrategyError> {
        let item = NewReviewItem {
            source_text: request.text.clone(),
            page_number: request.page_number,
            attempted_translation: None,
            error_message: request.error.clone(),
            failed_strategies: request.attempted_strategies.clone(),
        };

        let review_id = self
            .queue
            .add(item)
            .await
            .map_err(|e| StrategyError::ReviewPersistFailure(e.to_string()))?;

        info!(
            "Escalated {} chars to manual review as item {}",
            request.text.chars().count(),
            review_id
        );

        let mut outcome = TranslationOutcome::new(
            format!("[pending human review: {}]", review_id),
            0.0,
        );
        outcome.metadata.requires_manual_review = true;
        outcome.metadata.review_id = Some(review_id);
        outcome.metadata.fallback_strategy = Some(NAME.to_string());
        Ok(outcome)
    }
}
