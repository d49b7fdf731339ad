/*!
 * Smaller-chunk fallback strategy.
 *
 * Independently re-splits the failing text into exactly two pieces, trying
 * separators in priority order, translates each half and concatenates the
 * results. Splitting is one level deep only - halves are never recursively
 * re-split.
 */

use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use crate::errors::StrategyError;
use crate::fallback::{FallbackRequest, FallbackStrategy};
use crate::script::ScriptProfile;
use crate::translator::{TranslationOutcome, Translator};

/// Strategy name used in logs and metadata
pub const NAME: &str = "smaller_chunk";

/// Below this many characters a split is refused outright
const MIN_SPLITTABLE_CHARS: usize = 20;

/// Minimum length for the hard character-count midpoint fallback
const MIN_MIDPOINT_CHARS: usize = 40;

/// Retries a failing chunk as two independently translated halves
#[derive(Debug)]
pub struct SmallerChunkStrategy {
    /// Translator collaborator
    translator: Arc<dyn Translator>,

    /// Script profile supplying the script-specific terminator separator
    script: ScriptProfile,
}

impl SmallerChunkStrategy {
    /// Create the strategy around a translator and script profile
    pub fn new(translator: Arc<dyn Translator>, script: ScriptProfile) -> Self {
        Self { translator, script }
    }

    /// Split the text into two pieces at the best available separator
    ///
    /// Separator priority: paragraph break, script sentence terminator,
    /// single line break, then a hard character-count midpoint when the text
    /// is long enough for the halves to be meaningful.
    fn split_in_two(&self, text: &str) -> Option<(String, String)> {
        let chars: Vec<char> = text.chars().collect();
        let total = chars.len();
        if total < MIN_SPLITTABLE_CHARS {
            return None;
        }

        if let Some(cut) = Self::cut_near_middle(&chars, |window| {
            window.len() >= 2 && window[0] == '\n' && window[1] == '\n'
        }) {
            // Cut after the paragraph break
            return Self::split_at(&chars, cut + 2);
        }

        let script = self.script.clone();
        if let Some(cut) =
            Self::cut_near_middle(&chars, move |window| script.is_terminator(window[0]))
        {
            // Keep the terminator with the first half
            return Self::split_at(&chars, cut + 1);
        }

        if let Some(cut) = Self::cut_near_middle(&chars, |window| window[0] == '\n') {
            return Self::split_at(&chars, cut + 1);
        }

        if total >= MIN_MIDPOINT_CHARS {
            return Self::split_at(&chars, total / 2);
        }

        None
    }

    /// Find the separator occurrence closest to the text midpoint
    ///
    /// Balanced halves keep both sub-requests comfortably under the bound
    /// that the original text already satisfied.
    fn cut_near_middle<F>(chars: &[char], matches: F) -> Option<usize>
    where
        F: Fn(&[char]) -> bool,
    {
        let middle = chars.len() / 2;

        (0..chars.len())
            .filter(|&i| matches(&chars[i..]))
            .min_by_key(|&i| middle.abs_diff(i))
    }

    /// Materialize the two halves, refusing cuts that leave one half empty
    fn split_at(chars: &[char], cut: usize) -> Option<(String, String)> {
        if cut == 0 || cut >= chars.len() {
            return None;
        }

        let first: String = chars[..cut].iter().collect();
        let second: String = chars[cut..].iter().collect();
        if first.trim().is_empty() || second.trim().is_empty() {
            return None;
        }

        Some((first, second))
    }
}

#[async_trait]
impl FallbackStrategy for SmallerChunkStrategy {
    fn name(&self) -> &str {
        NAME
    }

    async fn execute(
        &self,
        request: &FallbackRequest,
    ) -> Result<TranslationOutcome, StrategyError> {
        let (first, second) = self.split_in_two(&request.text).ok_or_else(|| {
            StrategyError::UnsplittableText(format!(
                "{} chars with no usable separator",
                request.text.chars().count()
            ))
        })?;

        debug!(
            "Re-split failing chunk into {} + {} chars",
            first.chars().count(),
            second.chars().count()
        );

        // One level deep only: the halves go straight to the translator
        let first_outcome = self.translator.translate(&first, &request.options).await?;
        let second_outcome = self.translator.translate(&second, &request.options).await?;

        let mut outcome = TranslationOutcome::new(
            format!("{}\n\n{}", first_outcome.translation, second_outcome.translation),
            (first_outcome.confidence + second_outcome.confidence) / 2.0,
        );
        outcome.metadata.chunks_used = Some(2);
        outcome.metadata.model_used = first_outcome.metadata.model_used;
        Ok(outcome)
    }
}
