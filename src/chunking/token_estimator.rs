/*!
 * Script-aware token estimation.
 *
 * Exact subword tokenization is backend-specific; this estimator uses a
 * conservative additive heuristic so chunks never silently exceed a model's
 * context window, at the cost of occasionally under-packing a chunk.
 */

use crate::script::ScriptProfile;

/// Default characters-per-token ratio for dense-script characters
pub const DEFAULT_CHARS_PER_TOKEN: f64 = 4.0;

/// Default tokens-per-word ratio for everything else
pub const DEFAULT_TOKENS_PER_WORD: f64 = 1.3;

/// Estimates the generation cost of a text span
///
/// Characters are partitioned into the target script's dense set versus all
/// other characters. Dense characters cost `ceil(count / chars_per_token)`
/// tokens; the remainder costs `ceil(words * tokens_per_word)` tokens, where
/// words are whitespace-delimited non-empty substrings. The estimate is
/// deterministic, zero for empty input, and non-decreasing as characters are
/// appended - `find_max_fit` relies on that monotonicity.
#[derive(Debug, Clone)]
pub struct TokenEstimator {
    /// Dense script definition
    script: ScriptProfile,

    /// Characters per token for dense-script characters
    chars_per_token: f64,

    /// Tokens per word for non-dense text
    tokens_per_word: f64,
}

impl TokenEstimator {
    /// Create an estimator with the default ratios
    pub fn new(script: ScriptProfile) -> Self {
        Self::with_ratios(script, DEFAULT_CHARS_PER_TOKEN, DEFAULT_TOKENS_PER_WORD)
    }

    /// Create an estimator with explicit ratios
    ///
    /// Ratios are heuristic constants tied to a tokenizer family; different
    /// backends tokenize differently, so they stay configurable.
    pub fn with_ratios(script: ScriptProfile, chars_per_token: f64, tokens_per_word: f64) -> Self {
        Self {
            script,
            chars_per_token,
            tokens_per_word,
        }
    }

    /// The script profile this estimator was built with
    pub fn script(&self) -> &ScriptProfile {
        &self.script
    }

    /// Estimate the token cost of the given text
    pub fn estimate(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }

        let mut dense_chars = 0usize;
        let mut other = String::new();

        for ch in text.chars() {
            if self.script.contains(ch) {
                dense_chars += 1;
            } else {
                other.push(ch);
            }
        }

        let dense_tokens = (dense_chars as f64 / self.chars_per_token).ceil() as usize;
        let word_count = other.split_whitespace().count();
        let other_tokens = (word_count as f64 * self.tokens_per_word).ceil() as usize;

        dense_tokens + other_tokens
    }

    /// Find the largest end offset (in characters) such that the span
    /// `text[start..end]` fits within `max_tokens`
    ///
    /// Binary search over end offsets; correct because `estimate` is
    /// non-decreasing under appended characters. Returns `start` when not
    /// even one character fits.
    pub fn find_max_fit(&self, text: &str, max_tokens: usize, start: usize) -> usize {
        let chars: Vec<char> = text.chars().collect();
        let total = chars.len();
        if start >= total {
            return total;
        }

        let mut low = start;
        let mut high = total;

        while low < high {
            let mid = (low + high + 1) / 2;
            let candidate: String = chars[start..mid].iter().collect();

            if self.estimate(&candidate) <= max_tokens {
                low = mid;
            } else {
                high = mid - 1;
            }
        }

        low
    }
}

impl Default for TokenEstimator {
    fn default() -> Self {
        Self::new(ScriptProfile::default())
    }
}
