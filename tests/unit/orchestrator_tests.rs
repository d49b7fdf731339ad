/*!
 * Tests for the fallback orchestrator cascade
 */

use std::sync::atomic::Ordering;
use std::sync::Arc;

use transprep::errors::FallbackError;
use transprep::fallback::FallbackOrchestrator;

use crate::common::{request_for, ScriptedStrategy};

#[tokio::test]
async fn test_executeFallback_withSecondStrategySucceeding_shouldShortCircuit() {
    let s1 = Arc::new(ScriptedStrategy::failing("S1"));
    let s2 = Arc::new(ScriptedStrategy::succeeding("S2", 0.9));
    let s3 = Arc::new(ScriptedStrategy::succeeding("S3", 0.9));
    let s3_calls = s3.call_counter();

    let mut orchestrator = FallbackOrchestrator::new();
    orchestrator.register_strategy(s1.clone());
    orchestrator.register_strategy(s2.clone());
    orchestrator.register_strategy(s3);

    let outcome = orchestrator
        .execute_fallback(request_for("some failing text"), &"boom")
        .await
        .unwrap();

    assert_eq!(outcome.metadata.fallback_strategy.as_deref(), Some("S2"));
    assert!(outcome.metadata.fallback_used);
    assert_eq!(s1.call_counter().load(Ordering::SeqCst), 1);
    assert_eq!(s2.call_counter().load(Ordering::SeqCst), 1);

    // Strategies after the winner are never invoked
    assert_eq!(s3_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_executeFallback_withAllStrategiesFailing_shouldNameEveryFailure() {
    let mut orchestrator = FallbackOrchestrator::new();
    orchestrator.register_strategy(Arc::new(ScriptedStrategy::failing("S1")));
    orchestrator.register_strategy(Arc::new(ScriptedStrategy::failing("S2")));

    let error = orchestrator
        .execute_fallback(request_for("hopeless text"), &"boom")
        .await
        .unwrap_err();

    match error {
        FallbackError::AllStrategiesFailed { failed } => {
            assert_eq!(failed, vec!["S1".to_string(), "S2".to_string()]);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_executeFallback_withNoStrategies_shouldFailWithEmptyList() {
    let orchestrator = FallbackOrchestrator::new();

    let error = orchestrator
        .execute_fallback(request_for("text"), &"boom")
        .await
        .unwrap_err();

    match error {
        FallbackError::AllStrategiesFailed { failed } => assert!(failed.is_empty()),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_executeFallback_withFirstStrategySucceeding_shouldStampFirstName() {
    let mut orchestrator = FallbackOrchestrator::new();
    orchestrator.register_strategy(Arc::new(ScriptedStrategy::succeeding("first", 0.8)));
    orchestrator.register_strategy(Arc::new(ScriptedStrategy::succeeding("second", 0.8)));

    let outcome = orchestrator
        .execute_fallback(request_for("text"), &"boom")
        .await
        .unwrap();

    assert_eq!(outcome.metadata.fallback_strategy.as_deref(), Some("first"));
}

#[test]
fn test_registerStrategy_shouldPreserveRegistrationOrder() {
    let mut orchestrator = FallbackOrchestrator::new();
    orchestrator.register_strategy(Arc::new(ScriptedStrategy::failing("a")));
    orchestrator.register_strategy(Arc::new(ScriptedStrategy::failing("b")));
    orchestrator.register_strategy(Arc::new(ScriptedStrategy::failing("c")));

    assert_eq!(orchestrator.strategy_names(), vec!["a", "b", "c"]);
}
