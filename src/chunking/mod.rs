/*!
 * Chunking subsystem for long mixed-script documents.
 *
 * This module splits arbitrary-length text into token-bounded,
 * sentence-respecting segments. It is split into several submodules:
 *
 * - `token_estimator`: Script-aware generation-cost estimation
 * - `boundaries`: Sentence boundary detection with abbreviation and
 *   parenthesis exclusion
 * - `chunker`: Greedy sentence accumulation into bounded chunks
 */

// Re-export main types for easier usage
pub use self::boundaries::{BoundaryKind, SentenceBoundary, SentenceBoundaryDetector};
pub use self::chunker::{Chunk, Chunker};
pub use self::token_estimator::TokenEstimator;

// Submodules
pub mod boundaries;
pub mod chunker;
pub mod token_estimator;
