/*!
 * Cascading fallback for failed translation attempts.
 *
 * When a chunk's translation attempt fails, registered strategies run in
 * priority order until one succeeds. Each strategy takes a progressively
 * more conservative approach; the terminal strategy escalates to a durable
 * human-review queue so the caller's pipeline never aborts.
 *
 * Submodules:
 * - `orchestrator`: Runs registered strategies in order
 * - `strategies`: The four strategy implementations
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::chunking::Chunk;
use crate::errors::StrategyError;
use crate::translator::{PromptOptions, TranslationOutcome};

// Re-export main types for easier usage
pub use self::orchestrator::FallbackOrchestrator;
pub use self::strategies::{
    AlternativeProviderStrategy, ManualReviewStrategy, SimplerPromptStrategy,
    SmallerChunkStrategy,
};

// Submodules
pub mod orchestrator;
pub mod strategies;

/// The failing work a fallback strategy is asked to recover
#[derive(Debug, Clone)]
pub struct FallbackRequest {
    /// Source text of the failing chunk
    pub text: String,

    /// Page the text came from, when known
    pub page_number: Option<u32>,

    /// Prompt options of the original failed attempt
    pub options: PromptOptions,

    /// Message of the error that triggered the cascade
    pub error: String,

    /// Names of the strategies that already failed on this request,
    /// in the order they ran
    pub attempted_strategies: Vec<String>,
}

impl FallbackRequest {
    /// Build a request from a failing chunk and the error it hit
    pub fn from_chunk(chunk: &Chunk, options: &PromptOptions, error: &impl ToString) -> Self {
        Self {
            text: chunk.text.clone(),
            page_number: chunk.page_number,
            options: options.clone(),
            error: error.to_string(),
            attempted_strategies: Vec::new(),
        }
    }

    /// Build a request from bare text
    pub fn from_text(text: &str, options: &PromptOptions, error: &impl ToString) -> Self {
        Self {
            text: text.to_string(),
            page_number: None,
            options: options.clone(),
            error: error.to_string(),
            attempted_strategies: Vec::new(),
        }
    }
}

/// One member of the ordered list of recovery approaches
///
/// Strategies are held as trait objects by the orchestrator and dispatched
/// dynamically, first registered first tried.
#[async_trait]
pub trait FallbackStrategy: Send + Sync + Debug {
    /// Stable name used in logs, metadata stamps and review records
    fn name(&self) -> &str;

    /// Attempt to recover the failing request
    async fn execute(&self, request: &FallbackRequest)
        -> Result<TranslationOutcome, StrategyError>;
}
