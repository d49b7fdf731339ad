/*!
 * Mock translator for testing.
 *
 * Provides a scriptable implementation of the Translator trait so the
 * chunking pipeline and the fallback cascade can be exercised without any
 * external API calls. Each call is recorded for later assertions.
 */

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::errors::TranslationError;
use crate::translator::prompts::render_system_prompt;
use crate::translator::{ContextLevel, PromptOptions, TranslationOutcome, Translator};

/// One recorded translation call
#[derive(Debug, Clone)]
pub struct CallRecord {
    /// Text passed to the call
    pub text: String,

    /// Provider override in effect, if any
    pub provider: Option<String>,

    /// Context level in effect
    pub context_level: ContextLevel,

    /// The system prompt that would have been sent
    pub system_prompt: String,
}

/// Scriptable mock implementation of the Translator trait
#[derive(Debug, Default)]
pub struct MockTranslator {
    /// Scripted responses, popped front-first; empty means echo success
    responses: Mutex<VecDeque<Result<TranslationOutcome, TranslationError>>>,

    /// When set, every call fails with this transient error message
    failure: Mutex<Option<String>>,

    /// Every call made against this mock
    calls: Arc<Mutex<Vec<CallRecord>>>,
}

impl MockTranslator {
    /// Create a mock that echoes every input as a successful translation
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that fails every call with a transient error
    pub fn always_failing(message: &str) -> Self {
        let mock = Self::new();
        *mock.failure.lock().unwrap() = Some(message.to_string());
        mock
    }

    /// Queue a successful response with the given translation and confidence
    pub fn push_success(&self, translation: &str, confidence: f64) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(TranslationOutcome::new(translation, confidence)));
    }

    /// Queue a transient failure
    pub fn push_transient_failure(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(TranslationError::Transient(message.to_string())));
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Snapshot of every recorded call
    pub fn calls(&self) -> Vec<CallRecord> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        options: &PromptOptions,
    ) -> Result<TranslationOutcome, TranslationError> {
        self.calls.lock().unwrap().push(CallRecord {
            text: text.to_string(),
            provider: options.provider.clone(),
            context_level: options.context_level,
            system_prompt: render_system_prompt(options),
        });

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(TranslationError::Transient(message));
        }

        if let Some(scripted) = self.responses.lock().unwrap().pop_front() {
            return scripted;
        }

        let mut outcome = TranslationOutcome::new(format!("[translated] {}", text), 0.95);
        outcome.metadata.model_used = Some(
            options
                .provider
                .clone()
                .unwrap_or_else(|| "mock-default".to_string()),
        );
        Ok(outcome)
    }
}
