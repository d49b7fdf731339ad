/*!
 * Adaptive document chunking.
 *
 * Splits arbitrary-length text into token-bounded, sentence-respecting
 * chunks. Sentences are accumulated greedily while the estimated token
 * count stays within the configured bound; a trailing slice of each sealed
 * chunk is carried into the next one as optional overlap context.
 */

use log::{debug, warn};

use crate::app_config::ChunkerConfig;
use crate::chunking::boundaries::SentenceBoundaryDetector;
use crate::chunking::token_estimator::TokenEstimator;

/// A contiguous, token-bounded span of the source document
///
/// Created once by [`Chunker::chunk`] and immutable thereafter. Offsets are
/// character offsets into the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Sequence-ordered identifier, monotonically increasing
    pub id: usize,

    /// The chunk text, a verbatim slice of the source
    pub text: String,

    /// Estimated token count of `text` (overlap excluded)
    pub token_count: usize,

    /// Start character offset into the source document
    pub start_offset: usize,

    /// End character offset into the source document (exclusive)
    pub end_offset: usize,

    /// Page number the chunk came from, when known
    pub page_number: Option<u32>,

    /// Context copied from the end of the previous chunk; never counted
    /// toward this chunk's token bound
    pub overlap_prefix: Option<String>,
}

/// Splits documents into ordered, token-bounded chunks
#[derive(Debug, Clone)]
pub struct Chunker {
    /// Chunking configuration
    config: ChunkerConfig,

    /// Script-aware token estimator
    estimator: TokenEstimator,

    /// Sentence boundary detector
    detector: SentenceBoundaryDetector,
}

impl Chunker {
    /// Create a chunker from its configuration and components
    pub fn new(
        config: ChunkerConfig,
        estimator: TokenEstimator,
        detector: SentenceBoundaryDetector,
    ) -> Self {
        Self {
            config,
            estimator,
            detector,
        }
    }

    /// Create a chunker with default components for the estimator's script
    pub fn with_defaults(config: ChunkerConfig) -> Self {
        let estimator = TokenEstimator::default();
        let detector = SentenceBoundaryDetector::new(estimator.script().clone());
        Self::new(config, estimator, detector)
    }

    /// Create a chunker from the application configuration
    pub fn from_config(config: &crate::app_config::Config) -> Self {
        let estimator = TokenEstimator::with_ratios(
            config.script.clone(),
            config.estimator.chars_per_token,
            config.estimator.tokens_per_word,
        );
        let detector = SentenceBoundaryDetector::new(config.script.clone());
        Self::new(config.chunker.clone(), estimator, detector)
    }

    /// The configuration this chunker was built with
    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// The token estimator this chunker uses
    pub fn estimator(&self) -> &TokenEstimator {
        &self.estimator
    }

    /// Split a document into ordered chunks
    ///
    /// A document that already fits the token bound is returned as a single
    /// chunk. A lone sentence whose own estimate exceeds the bound is
    /// emitted whole as an oversized chunk rather than dropped - a
    /// documented, accepted limitation.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        self.chunk_with_page(text, None)
    }

    /// Split a document into ordered chunks, tagging each with a page number
    pub fn chunk_with_page(&self, text: &str, page_number: Option<u32>) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        let total_chars = text.chars().count();
        let total_estimate = self.estimator.estimate(text);

        // Fast path: the whole document fits in one chunk
        if total_estimate <= self.config.max_tokens {
            return vec![Chunk {
                id: 0,
                text: text.to_string(),
                token_count: total_estimate,
                start_offset: 0,
                end_offset: total_chars,
                page_number,
                overlap_prefix: None,
            }];
        }

        debug!(
            "Document estimate {} exceeds bound {}, chunking {} chars",
            total_estimate, self.config.max_tokens, total_chars
        );

        if self.config.respect_sentences {
            self.chunk_by_sentences(text, page_number)
        } else {
            self.chunk_by_token_windows(text, page_number)
        }
    }

    /// Greedy sentence accumulation under the token bound
    fn chunk_by_sentences(&self, text: &str, page_number: Option<u32>) -> Vec<Chunk> {
        let chars: Vec<char> = text.chars().collect();
        let spans = self.detector.sentence_spans(text);

        let mut chunks: Vec<Chunk> = Vec::new();
        let mut overlap: Option<String> = None;
        let mut chunk_start: Option<usize> = None;
        let mut chunk_end = 0;

        for span in spans {
            if let Some(start) = chunk_start {
                let candidate: String = chars[start..span.end].iter().collect();

                if self.estimator.estimate(&candidate) <= self.config.max_tokens {
                    // The sentence still fits; extend the running chunk
                    chunk_end = span.end;
                    continue;
                }

                // Seal the running chunk before placing this sentence
                overlap = self.push_chunk(
                    &mut chunks,
                    &chars,
                    start,
                    chunk_end,
                    page_number,
                    overlap.take(),
                );
                chunk_start = None;
            }

            let lone: String = chars[span.start..span.end].iter().collect();
            let lone_estimate = self.estimator.estimate(&lone);

            if lone_estimate > self.config.max_tokens {
                // A lone sentence that alone exceeds the bound is emitted
                // whole rather than dropped or infinitely re-split
                warn!(
                    "Sentence at offset {} estimates {} tokens, above the {} bound; emitting oversized chunk",
                    span.start, lone_estimate, self.config.max_tokens
                );
                overlap = self.push_chunk(
                    &mut chunks,
                    &chars,
                    span.start,
                    span.end,
                    page_number,
                    overlap.take(),
                );
            } else {
                chunk_start = Some(span.start);
                chunk_end = span.end;
            }
        }

        if let Some(start) = chunk_start {
            self.push_chunk(&mut chunks, &chars, start, chunk_end, page_number, overlap);
        }

        chunks
    }

    /// Cut the text at token-bound offsets when sentence structure is not
    /// respected
    fn chunk_by_token_windows(&self, text: &str, page_number: Option<u32>) -> Vec<Chunk> {
        let chars: Vec<char> = text.chars().collect();
        let total = chars.len();

        let mut chunks = Vec::new();
        let mut overlap: Option<String> = None;
        let mut start = 0;

        while start < total {
            let mut end = self
                .estimator
                .find_max_fit(text, self.config.max_tokens, start);
            if end <= start {
                // Not even one character fits; force progress
                end = start + 1;
            }

            overlap = self.push_chunk(&mut chunks, &chars, start, end, page_number, overlap.take());
            start = end;
        }

        chunks
    }

    /// Seal a chunk and return the overlap text for the chunk after it
    fn push_chunk(
        &self,
        chunks: &mut Vec<Chunk>,
        chars: &[char],
        start: usize,
        end: usize,
        page_number: Option<u32>,
        overlap_prefix: Option<String>,
    ) -> Option<String> {
        let chunk_text: String = chars[start..end].iter().collect();
        let token_count = self.estimator.estimate(&chunk_text);

        let next_overlap = self.trailing_overlap(&chunk_text);

        chunks.push(Chunk {
            id: chunks.len(),
            text: chunk_text,
            token_count,
            start_offset: start,
            end_offset: end,
            page_number,
            overlap_prefix,
        });

        next_overlap
    }

    /// Trailing slice of a sealed chunk carried into the next one as context
    fn trailing_overlap(&self, chunk_text: &str) -> Option<String> {
        if self.config.overlap_fraction <= 0.0 {
            return None;
        }

        let chars: Vec<char> = chunk_text.chars().collect();
        let keep = ((chars.len() as f64) * self.config.overlap_fraction).ceil() as usize;
        if keep == 0 || keep >= chars.len() {
            return None;
        }

        let overlap: String = chars[chars.len() - keep..].iter().collect();
        let trimmed = overlap.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(overlap)
        }
    }
}
