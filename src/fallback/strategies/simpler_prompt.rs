/*!
 * Simpler-prompt fallback strategy.
 *
 * Re-invokes translation with a minimal instruction, dropping the glossary,
 * worked examples and neighboring-page context. Trades contextual richness
 * for robustness against whatever made the richer prompt fail.
 */

use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use crate::errors::StrategyError;
use crate::fallback::{FallbackRequest, FallbackStrategy};
use crate::translator::{TranslationOutcome, Translator};

/// Strategy name used in logs and metadata
pub const NAME: &str = "simpler_prompt";

/// Retries the translation with a stripped-down prompt
#[derive(Debug)]
pub struct SimplerPromptStrategy {
    /// Translator collaborator
    translator: Arc<dyn Translator>,
}

impl SimplerPromptStrategy {
    /// Create the strategy around a translator
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self { translator }
    }
}

#[async_trait]
impl FallbackStrategy for SimplerPromptStrategy {
    fn name(&self) -> &str {
        NAME
    }

    async fn execute(
        &self,
        request: &FallbackRequest,
    ) -> Result<TranslationOutcome, StrategyError> {
        debug!("Retrying {} chars with minimal prompt", request.text.chars().count());

        let minimal = request.options.minimal();
        let outcome = self.translator.translate(&request.text, &minimal).await?;
        Ok(outcome)
    }
}
