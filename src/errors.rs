/*!
 * Error types for the transprep library.
 *
 * This module contains custom error types for different parts of the library,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors reported by a Translator collaborator
///
/// The transient/fatal split lets callers distinguish failures worth handing
/// to the fallback cascade from failures that no strategy can recover.
#[derive(Error, Debug, Clone)]
pub enum TranslationError {
    /// Failure that a different approach might recover from
    #[error("transient translation failure: {0}")]
    Transient(String),

    /// Failure that will reproduce regardless of approach
    #[error("fatal translation failure: {0}")]
    Fatal(String),
}

impl TranslationError {
    /// Whether this error is worth retrying with a different strategy
    pub fn is_transient(&self) -> bool {
        matches!(self, TranslationError::Transient(_))
    }
}

/// Errors raised by a single fallback strategy
#[derive(Error, Debug)]
pub enum StrategyError {
    /// SmallerChunk cannot subdivide the text any further
    #[error("text cannot be meaningfully subdivided: {0}")]
    UnsplittableText(String),

    /// AlternativeProvider has no untried backend left
    #[error("no alternative providers remain")]
    ProviderExhausted,

    /// The underlying translation call failed
    #[error("translation failed: {0}")]
    Translation(#[from] TranslationError),

    /// The durable review store write failed; aborts the cascade instead
    /// of being skipped over
    #[error("failed to persist review item: {0}")]
    ReviewPersistFailure(String),
}

/// Errors raised by the fallback orchestrator
#[derive(Error, Debug)]
pub enum FallbackError {
    /// Every registered strategy failed; names every failed strategy
    /// for diagnosability
    #[error("all fallback strategies failed: [{}]", failed.join(", "))]
    AllStrategiesFailed {
        /// Names of the strategies that failed, in the order they ran
        failed: Vec<String>,
    },

    /// The terminal escalation write failed
    #[error("failed to persist review item: {0}")]
    ReviewPersistFailure(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error loading or validating configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a translation call
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error from the fallback cascade
    #[error("Fallback error: {0}")]
    Fallback(#[from] FallbackError),

    /// Error from the review store
    #[error("Review store error: {0}")]
    Review(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Config(error.to_string())
    }
}
