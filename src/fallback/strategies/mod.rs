/*!
 * Fallback strategy implementations.
 *
 * Four strategies, ordered from least to most drastic by the composing
 * application:
 * - `simpler_prompt`: Retry with a minimal instruction
 * - `alternative_provider`: Retry against the next untried backend
 * - `smaller_chunk`: Re-split the failing text in two and retry the halves
 * - `manual_review`: Escalate to the durable review queue (terminal)
 */

// Re-export strategy types
pub use self::alternative_provider::AlternativeProviderStrategy;
pub use self::manual_review::ManualReviewStrategy;
pub use self::simpler_prompt::SimplerPromptStrategy;
pub use self::smaller_chunk::SmallerChunkStrategy;

// Submodules
pub mod alternative_provider;
pub mod manual_review;
pub mod simpler_prompt;
pub mod smaller_chunk;
