/*!
 * # transprep - Translation Preparation Library
 *
 * A Rust library that prepares long, mixed-script documents for translation
 * by an external text-generation backend. Every fragment of a document
 * eventually yields either a translation or a durably-recorded human-review
 * item - never a silent drop.
 *
 * ## Features
 *
 * - Script-aware token estimation for mixed-script text
 * - Sentence-boundary detection with abbreviation and parenthesis handling
 * - Adaptive chunking into token-bounded, sentence-respecting segments
 * - Cascading fallback strategies when a translation attempt fails:
 *   - Simpler prompt (drop contextual richness)
 *   - Alternative provider rotation
 *   - Smaller chunk re-splitting
 *   - Escalation to a durable human-review queue
 * - SQLite-backed review queue with atomic status transitions
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `script`: Script profiles for the target language's dense script
 * - `chunking`: Token estimation, boundary detection and chunking:
 *   - `chunking::token_estimator`: Script-aware token estimation
 *   - `chunking::boundaries`: Sentence boundary detection
 *   - `chunking::chunker`: Document chunking
 * - `translator`: Translator collaborator traits and prompt assembly
 * - `fallback`: Fallback strategy trait, implementations and orchestrator
 * - `review`: Durable review queue backed by SQLite
 * - `pipeline`: Document-level translation driver
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod script;
pub mod chunking;
pub mod translator;
pub mod fallback;
pub mod review;
pub mod pipeline;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use script::ScriptProfile;
pub use chunking::{Chunk, Chunker, SentenceBoundaryDetector, TokenEstimator};
pub use fallback::{
    AlternativeProviderStrategy, FallbackOrchestrator, FallbackRequest, FallbackStrategy,
    ManualReviewStrategy, SimplerPromptStrategy, SmallerChunkStrategy,
};
pub use pipeline::{DocumentTranslator, TranslatedChunk};
pub use review::ReviewQueue;
pub use translator::{TranslationOutcome, Translator};
pub use errors::{AppError, FallbackError, StrategyError, TranslationError};
