/*!
 * Tests for the four fallback strategy implementations
 */

use std::sync::Arc;

use transprep::errors::StrategyError;
use transprep::fallback::{
    AlternativeProviderStrategy, FallbackStrategy, ManualReviewStrategy, SimplerPromptStrategy,
    SmallerChunkStrategy,
};
use transprep::review::ReviewQueue;
use transprep::script::ScriptProfile;
use transprep::translator::{ContextLevel, MockTranslator, ProviderList};

use crate::common::request_for;

// =========================================================================
// SimplerPrompt
// =========================================================================

#[tokio::test]
async fn test_simplerPrompt_execute_shouldRetryWithMinimalContext() {
    let translator = Arc::new(MockTranslator::new());
    let strategy = SimplerPromptStrategy::new(translator.clone());

    let mut request = request_for("difficult passage");
    request.options.glossary.push(("a".to_string(), "ब".to_string()));

    let outcome = strategy.execute(&request).await.unwrap();
    assert!(!outcome.translation.is_empty());

    let calls = translator.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].context_level, ContextLevel::Minimal);
    assert!(!calls[0].system_prompt.contains("Glossary"));
}

// =========================================================================
// AlternativeProvider
// =========================================================================

#[tokio::test]
async fn test_alternativeProvider_execute_shouldUseNextProvider() {
    let translator = Arc::new(MockTranslator::new());
    let rotation = Arc::new(ProviderList::new(vec!["backup-model".to_string()]));
    let strategy = AlternativeProviderStrategy::new(translator.clone(), rotation);

    let outcome = strategy.execute(&request_for("text")).await.unwrap();
    assert_eq!(outcome.metadata.model_used.as_deref(), Some("backup-model"));

    let calls = translator.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].provider.as_deref(), Some("backup-model"));

    // Original prompt reused verbatim, only the provider differs
    assert_eq!(calls[0].context_level, ContextLevel::Rich);
}

#[tokio::test]
async fn test_alternativeProvider_execute_withExhaustedRotation_shouldFailWithoutCalling() {
    let translator = Arc::new(MockTranslator::new());
    let rotation = Arc::new(ProviderList::new(Vec::new()));
    let strategy = AlternativeProviderStrategy::new(translator.clone(), rotation);

    let error = strategy.execute(&request_for("text")).await.unwrap_err();
    assert!(matches!(error, StrategyError::ProviderExhausted));
    assert_eq!(translator.call_count(), 0);
}

// =========================================================================
// SmallerChunk
// =========================================================================

#[tokio::test]
async fn test_smallerChunk_execute_shouldAverageSubConfidences() {
    let translator = Arc::new(MockTranslator::new());
    translator.push_success("first half done", 0.7);
    translator.push_success("second half done", 0.9);

    let strategy =
        SmallerChunkStrategy::new(translator.clone(), ScriptProfile::devanagari());

    let request = request_for("First paragraph of the text.\n\nSecond paragraph of the text.");
    let outcome = strategy.execute(&request).await.unwrap();

    assert_eq!(outcome.confidence, 0.8);
    assert_eq!(outcome.translation, "first half done\n\nsecond half done");
    assert_eq!(outcome.metadata.chunks_used, Some(2));
    assert_eq!(translator.call_count(), 2);
}

#[tokio::test]
async fn test_smallerChunk_execute_withTinyText_shouldFailUnsplittable() {
    let translator = Arc::new(MockTranslator::new());
    let strategy =
        SmallerChunkStrategy::new(translator.clone(), ScriptProfile::devanagari());

    let error = strategy.execute(&request_for("too short")).await.unwrap_err();
    assert!(matches!(error, StrategyError::UnsplittableText(_)));
    assert_eq!(translator.call_count(), 0);
}

// =========================================================================
// ManualReview
// =========================================================================

#[tokio::test]
async fn test_manualReview_execute_shouldPersistAndReturnPlaceholder() {
    let queue = ReviewQueue::new_in_memory().unwrap();
    let strategy = ManualReviewStrategy::new(queue.clone());

    let pending_before = queue.get_stats().await.unwrap().pending;

    let mut request = request_for("unrecoverable text");
    request.page_number = Some(12);
    request.attempted_strategies =
        vec!["simpler_prompt".to_string(), "alternative_provider".to_string()];

    let outcome = strategy.execute(&request).await.unwrap();

    assert_eq!(outcome.confidence, 0.0);
    assert!(outcome.metadata.requires_manual_review);
    let review_id = outcome.metadata.review_id.expect("review id must be set");
    assert!(!review_id.is_empty());

    let stats = queue.get_stats().await.unwrap();
    assert_eq!(stats.pending, pending_before + 1);

    let item = queue.get_item(&review_id).await.unwrap().unwrap();
    assert_eq!(item.source_text, "unrecoverable text");
    assert_eq!(item.page_number, Some(12));
    assert_eq!(item.error_message, "initial attempt failed");
    assert_eq!(
        item.failed_strategies,
        vec!["simpler_prompt".to_string(), "alternative_provider".to_string()]
    );
}
