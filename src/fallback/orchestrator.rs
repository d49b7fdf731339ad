/*!
 * Fallback orchestrator.
 *
 * Runs registered strategies strictly one at a time in registration order.
 * Later strategies are progressively more expensive and more drastic
 * (including durable writes), so speculative parallel execution would waste
 * cost or double-write.
 */

use log::{info, warn};
use std::sync::Arc;

use crate::errors::{FallbackError, StrategyError};
use crate::fallback::{FallbackRequest, FallbackStrategy};
use crate::translator::TranslationOutcome;

/// Runs registered fallback strategies in priority order until one succeeds
#[derive(Debug, Default)]
pub struct FallbackOrchestrator {
    /// Registered strategies; registration order is priority order
    strategies: Vec<Arc<dyn FallbackStrategy>>,
}

impl FallbackOrchestrator {
    /// Create an orchestrator with no strategies registered
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a strategy; first registered is first tried
    pub fn register_strategy(&mut self, strategy: Arc<dyn FallbackStrategy>) {
        self.strategies.push(strategy);
    }

    /// Names of the registered strategies, in priority order
    pub fn strategy_names(&self) -> Vec<String> {
        self.strategies
            .iter()
            .map(|s| s.name().to_string())
            .collect()
    }

    /// Run the cascade for a failing request
    ///
    /// The first success wins and is stamped with the winning strategy's
    /// name; strategies after the winner are never invoked. A strategy's
    /// failure is logged and converted into "advance to the next strategy".
    /// Only total exhaustion propagates, as one aggregate error naming every
    /// failed strategy - unless the review store write itself fails, which
    /// propagates immediately.
    pub async fn execute_fallback(
        &self,
        request: FallbackRequest,
        original_error: &impl ToString,
    ) -> Result<TranslationOutcome, FallbackError> {
        let mut request = request;
        if request.error.is_empty() {
            request.error = original_error.to_string();
        }

        info!(
            "Starting fallback cascade for {} chars (error: {})",
            request.text.chars().count(),
            original_error.to_string()
        );

        for strategy in &self.strategies {
            match strategy.execute(&request).await {
                Ok(mut outcome) => {
                    outcome.metadata.fallback_used = true;
                    // Keep a more specific value if the strategy set one
                    if outcome.metadata.fallback_strategy.is_none() {
                        outcome.metadata.fallback_strategy = Some(strategy.name().to_string());
                    }
                    info!("Fallback strategy '{}' succeeded", strategy.name());
                    return Ok(outcome);
                }
                Err(StrategyError::ReviewPersistFailure(message)) => {
                    // The last line of defense failed; nothing to advance to
                    return Err(FallbackError::ReviewPersistFailure(message));
                }
                Err(error) => {
                    warn!("Fallback strategy '{}' failed: {}", strategy.name(), error);
                    request.attempted_strategies.push(strategy.name().to_string());
                }
            }
        }

        Err(FallbackError::AllStrategiesFailed {
            failed: request.attempted_strategies,
        })
    }
}
