/*!
 * Alternative-provider fallback strategy.
 *
 * Requests the next untried backend from the provider rotation and retries
 * with the original prompt verbatim, so any difference in outcome is
 * attributable to provider choice alone.
 */

use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use crate::errors::StrategyError;
use crate::fallback::{FallbackRequest, FallbackStrategy};
use crate::translator::{ProviderRotation, TranslationOutcome, Translator};

/// Strategy name used in logs and metadata
pub const NAME: &str = "alternative_provider";

/// Retries the translation against the next untried backend
#[derive(Debug)]
pub struct AlternativeProviderStrategy {
    /// Translator collaborator
    translator: Arc<dyn Translator>,

    /// Provider rotation collaborator
    rotation: Arc<dyn ProviderRotation>,
}

impl AlternativeProviderStrategy {
    /// Create the strategy around a translator and a provider rotation
    pub fn new(translator: Arc<dyn Translator>, rotation: Arc<dyn ProviderRotation>) -> Self {
        Self {
            translator,
            rotation,
        }
    }
}

#[async_trait]
impl FallbackStrategy for AlternativeProviderStrategy {
    fn name(&self) -> &str {
        NAME
    }

    async fn execute(
        &self,
        request: &FallbackRequest,
    ) -> Result<TranslationOutcome, StrategyError> {
        // Fail without a call when nothing remains
        let provider = self
            .rotation
            .next_provider()
            .ok_or(StrategyError::ProviderExhausted)?;

        debug!("Retrying with alternative provider '{}'", provider);

        // Original prompt verbatim, only the provider overridden
        let options = request.options.with_provider(&provider);
        let mut outcome = self.translator.translate(&request.text, &options).await?;

        if outcome.metadata.model_used.is_none() {
            outcome.metadata.model_used = Some(provider);
        }
        Ok(outcome)
    }
}
