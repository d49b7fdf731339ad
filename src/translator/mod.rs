/*!
 * Translator collaborator boundary.
 *
 * This module defines the traits the library depends on for actual
 * translation work. The library owns no backend protocol; any client that
 * satisfies these signatures can sit behind it:
 * - `Translator`: single and batch translation calls
 * - `ProviderRotation`: hands out the next untried backend identifier
 *
 * Also defines the request/outcome types flowing through the fallback
 * cascade, and a mock translator for tests.
 */

use async_trait::async_trait;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::Mutex;

use crate::errors::TranslationError;

pub mod mock;
pub mod prompts;

// Re-export for easier usage
pub use mock::MockTranslator;

/// How much contextual richness goes into the translation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContextLevel {
    /// Full prompt: glossary, worked examples, neighboring-page context
    #[default]
    Rich,
    /// Minimal instruction only; trades richness for robustness
    Minimal,
}

/// Options accompanying a translation call
#[derive(Debug, Clone, Default)]
pub struct PromptOptions {
    /// Richness of the assembled prompt
    pub context_level: ContextLevel,

    /// Backend override; `None` lets the translator pick its default
    pub provider: Option<String>,

    /// Glossary term pairs, included in rich prompts only
    pub glossary: Vec<(String, String)>,

    /// Neighboring-page context, included in rich prompts only
    pub neighbor_context: Option<String>,
}

impl PromptOptions {
    /// Options for a full-context prompt
    pub fn rich() -> Self {
        Self {
            context_level: ContextLevel::Rich,
            ..Self::default()
        }
    }

    /// Options for a minimal-instruction prompt
    ///
    /// Glossary and neighboring context are dropped entirely so whatever
    /// made the richer prompt fail cannot recur through them.
    pub fn minimal(&self) -> Self {
        Self {
            context_level: ContextLevel::Minimal,
            provider: self.provider.clone(),
            glossary: Vec::new(),
            neighbor_context: None,
        }
    }

    /// Same options with only the provider overridden
    pub fn with_provider(&self, provider: &str) -> Self {
        let mut options = self.clone();
        options.provider = Some(provider.to_string());
        options
    }
}

/// Metadata attached to a translation outcome
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutcomeMetadata {
    /// Name of the fallback strategy that produced the outcome, if any
    pub fallback_strategy: Option<String>,

    /// Whether any fallback strategy was involved
    pub fallback_used: bool,

    /// Whether the outcome is a placeholder awaiting human review
    pub requires_manual_review: bool,

    /// Identifier of the persisted review item, when escalated
    pub review_id: Option<String>,

    /// Model that produced the translation, when known
    pub model_used: Option<String>,

    /// Number of sub-chunks combined into this outcome, when re-split
    pub chunks_used: Option<usize>,
}

/// Result of a translation attempt
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationOutcome {
    /// The translated text
    pub translation: String,

    /// Confidence in [0, 1]
    pub confidence: f64,

    /// Outcome metadata
    pub metadata: OutcomeMetadata,
}

impl TranslationOutcome {
    /// Create an outcome with default metadata, clamping confidence to [0, 1]
    pub fn new(translation: impl Into<String>, confidence: f64) -> Self {
        Self {
            translation: translation.into(),
            confidence: confidence.clamp(0.0, 1.0),
            metadata: OutcomeMetadata::default(),
        }
    }
}

/// Common trait for translation backends
///
/// This trait defines the only surface the library depends on; concrete
/// backends and their API protocols live outside it. Retry-with-backoff
/// against a single backend belongs behind this trait, not in front of it.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate a single text
    async fn translate(
        &self,
        text: &str,
        options: &PromptOptions,
    ) -> Result<TranslationOutcome, TranslationError>;

    /// Translate several texts with the same options
    ///
    /// The default implementation translates sequentially; backends with a
    /// native batch endpoint should override it.
    async fn translate_batch(
        &self,
        texts: &[String],
        options: &PromptOptions,
    ) -> Result<Vec<TranslationOutcome>, TranslationError> {
        let mut outcomes = Vec::with_capacity(texts.len());
        for text in texts {
            outcomes.push(self.translate(text, options).await?);
        }
        Ok(outcomes)
    }
}

/// Hands out the next untried backend identifier
pub trait ProviderRotation: Send + Sync + Debug {
    /// The next untried provider, or `None` when all are exhausted
    fn next_provider(&self) -> Option<String>;
}

/// Fixed list of alternative providers, each handed out once
#[derive(Debug)]
pub struct ProviderList {
    /// Remaining untried providers
    remaining: Mutex<VecDeque<String>>,
}

impl ProviderList {
    /// Create a rotation over the given providers, tried in order
    pub fn new(providers: Vec<String>) -> Self {
        Self {
            remaining: Mutex::new(providers.into()),
        }
    }
}

impl ProviderRotation for ProviderList {
    fn next_provider(&self) -> Option<String> {
        self.remaining
            .lock()
            .ok()
            .and_then(|mut remaining| remaining.pop_front())
    }
}
