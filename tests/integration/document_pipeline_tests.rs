/*!
 * End-to-end document translation tests
 *
 * Exercises the full path: chunking, concurrent translation, fallback
 * cascade and escalation to the review queue.
 */

use std::sync::Arc;

use transprep::app_config::ChunkerConfig;
use transprep::chunking::Chunker;
use transprep::fallback::{
    FallbackOrchestrator, ManualReviewStrategy, SimplerPromptStrategy, SmallerChunkStrategy,
};
use transprep::pipeline::DocumentTranslator;
use transprep::review::ReviewQueue;
use transprep::script::ScriptProfile;
use transprep::translator::{MockTranslator, PromptOptions, Translator};

use crate::common::init_test_logging;

fn long_document() -> String {
    let mut text = String::new();
    for i in 0..10 {
        text.push_str(&format!("Sentence number {} of a long document. ", i));
        text.push_str("यह एक हिन्दी वाक्य है। ");
    }
    text
}

fn full_orchestrator(translator: Arc<dyn Translator>, queue: ReviewQueue) -> FallbackOrchestrator {
    let mut orchestrator = FallbackOrchestrator::new();
    orchestrator.register_strategy(Arc::new(SimplerPromptStrategy::new(translator.clone())));
    orchestrator.register_strategy(Arc::new(SmallerChunkStrategy::new(
        translator,
        ScriptProfile::devanagari(),
    )));
    orchestrator.register_strategy(Arc::new(ManualReviewStrategy::new(queue)));
    orchestrator
}

#[tokio::test]
async fn test_translateDocument_withHealthyTranslator_shouldTranslateEveryChunk() {
    init_test_logging();
    let translator = Arc::new(MockTranslator::new());
    let queue = ReviewQueue::new_in_memory().unwrap();
    let orchestrator = full_orchestrator(translator.clone(), queue.clone());

    let chunker = Chunker::with_defaults(ChunkerConfig {
        max_tokens: 25,
        ..ChunkerConfig::default()
    });
    let driver = DocumentTranslator::new(chunker, translator, Arc::new(orchestrator), 4);

    let text = long_document();
    let translated = driver
        .translate_document(&text, &PromptOptions::rich())
        .await
        .unwrap();

    assert!(translated.len() > 1);
    for (i, chunk) in translated.iter().enumerate() {
        assert_eq!(chunk.chunk.id, i);
        assert!(!chunk.outcome.metadata.fallback_used);
        assert!(chunk.outcome.translation.starts_with("[translated]"));
    }

    // Nothing escalated
    assert_eq!(queue.get_stats().await.unwrap().pending, 0);
}

/// Driving the pipeline from synchronous test code
#[test]
fn test_translateDocument_withSingleChunkDocument_shouldReturnOneChunk() {
    init_test_logging();
    let translator = Arc::new(MockTranslator::new());
    let queue = ReviewQueue::new_in_memory().unwrap();
    let orchestrator = full_orchestrator(translator.clone(), queue);

    let chunker = Chunker::with_defaults(ChunkerConfig::default());
    let driver = DocumentTranslator::new(chunker, translator, Arc::new(orchestrator), 4);

    let translated = tokio_test::block_on(async {
        driver
            .translate_document("A short document.", &PromptOptions::rich())
            .await
    })
    .unwrap();

    assert_eq!(translated.len(), 1);
    assert!(translated[0].outcome.translation.starts_with("[translated]"));
    assert!(!translated[0].outcome.metadata.fallback_used);
}

#[tokio::test]
async fn test_translateDocument_withOneFailingChunk_shouldRecoverViaFallback() {
    init_test_logging();
    let translator = Arc::new(MockTranslator::new());
    // The first chunk's initial attempt fails; the simpler-prompt retry
    // succeeds, so the document still completes without escalation
    translator.push_transient_failure("model overloaded");

    let queue = ReviewQueue::new_in_memory().unwrap();
    let orchestrator = full_orchestrator(translator.clone(), queue.clone());

    let chunker = Chunker::with_defaults(ChunkerConfig {
        max_tokens: 25,
        ..ChunkerConfig::default()
    });
    // One chunk at a time so the scripted failure lands deterministically
    let driver = DocumentTranslator::new(chunker, translator, Arc::new(orchestrator), 1);

    let text = long_document();
    let translated = driver
        .translate_document(&text, &PromptOptions::rich())
        .await
        .unwrap();

    let recovered: Vec<_> = translated
        .iter()
        .filter(|c| c.outcome.metadata.fallback_used)
        .collect();
    assert_eq!(recovered.len(), 1);
    assert_eq!(
        recovered[0].outcome.metadata.fallback_strategy.as_deref(),
        Some("simpler_prompt")
    );

    assert_eq!(queue.get_stats().await.unwrap().pending, 0);
}

#[tokio::test]
async fn test_translateDocument_withDeadTranslator_shouldEscalateEveryChunkAndFinish() {
    init_test_logging();
    let translator = Arc::new(MockTranslator::always_failing("backend down"));
    let queue = ReviewQueue::new_in_memory().unwrap();
    let orchestrator = full_orchestrator(translator.clone(), queue.clone());

    let chunker = Chunker::with_defaults(ChunkerConfig {
        max_tokens: 25,
        ..ChunkerConfig::default()
    });
    let driver = DocumentTranslator::new(chunker, translator, Arc::new(orchestrator), 2);

    let text = long_document();
    let translated = driver
        .translate_document(&text, &PromptOptions::rich())
        .await
        .unwrap();

    // Every chunk still produced a well-formed placeholder outcome
    assert!(!translated.is_empty());
    for chunk in &translated {
        assert!(chunk.outcome.metadata.requires_manual_review);
        assert_eq!(chunk.outcome.confidence, 0.0);
        assert!(chunk.outcome.metadata.review_id.is_some());
        assert_eq!(
            chunk.outcome.metadata.fallback_strategy.as_deref(),
            Some("manual_review")
        );
    }

    // One review item per chunk, all pending
    let stats = queue.get_stats().await.unwrap();
    assert_eq!(stats.pending, translated.len() as u64);

    // Review records name the strategies that failed before escalation
    let pending = queue.get_queue(100).await.unwrap();
    for item in pending {
        assert!(item
            .failed_strategies
            .contains(&"simpler_prompt".to_string()));
        assert!(item.failed_strategies.contains(&"smaller_chunk".to_string()));
    }
}
