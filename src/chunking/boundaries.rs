/*!
 * Sentence boundary detection.
 *
 * Locates valid sentence-ending positions in mixed-script text. A terminator
 * only counts as a boundary when it is not inside an unbalanced parenthetical
 * span and, for the Latin full stop, when it does not terminate a known
 * abbreviation.
 */

use crate::script::ScriptProfile;

/// Latin sentence terminators recognized alongside the script-specific ones
const LATIN_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Abbreviation tokens that suppress a following full stop
const ABBREVIATIONS: [&str; 10] = [
    "dr", "mr", "mrs", "ms", "prof", "sr", "jr", "etc", "e.g", "i.e",
];

/// How many characters before a full stop are inspected for an abbreviation
const ABBREVIATION_WINDOW: usize = 10;

/// Kind of sentence terminator found at a boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryKind {
    /// Script-specific terminator (e.g. danda or double danda)
    Script,
    /// Latin terminator (`.`, `!`, `?`)
    Latin,
}

/// A sentence-ending position located during detection
///
/// Created transiently; not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceBoundary {
    /// Character index of the terminator in the source text
    pub index: usize,

    /// The terminator character itself
    pub terminator: char,

    /// Whether the terminator is script-specific or Latin
    pub kind: BoundaryKind,
}

/// Contiguous span of characters forming one sentence unit
///
/// Spans tile the source text: each span starts where the previous one
/// ended, so concatenating them reproduces the text exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceSpan {
    /// Start character offset (inclusive)
    pub start: usize,

    /// End character offset (exclusive)
    pub end: usize,
}

/// Detects sentence boundaries in mixed-script text
#[derive(Debug, Clone)]
pub struct SentenceBoundaryDetector {
    /// Script profile supplying the script-specific terminators
    script: ScriptProfile,
}

impl SentenceBoundaryDetector {
    /// Create a detector for the given script
    pub fn new(script: ScriptProfile) -> Self {
        Self { script }
    }

    /// Whether the character at `index` in `text` is a valid sentence
    /// boundary
    ///
    /// True iff the character is a recognized terminator, the position is
    /// not inside an unbalanced parenthetical span, and a full stop does
    /// not terminate a known abbreviation.
    pub fn is_sentence_boundary(&self, ch: char, index: usize, text: &str) -> bool {
        let chars: Vec<char> = text.chars().collect();

        // Unmatched opening parentheses before the index
        let mut depth = 0i32;
        for &c in chars.iter().take(index) {
            match c {
                '(' => depth += 1,
                ')' => depth = (depth - 1).max(0),
                _ => {}
            }
        }

        self.check_boundary(ch, index, &chars, depth)
    }

    /// Detect all sentence boundaries in the text, sorted by index
    pub fn detect_boundaries(&self, text: &str) -> Vec<SentenceBoundary> {
        let chars: Vec<char> = text.chars().collect();
        let mut boundaries = Vec::new();
        let mut depth = 0i32;

        for (index, &ch) in chars.iter().enumerate() {
            if self.check_boundary(ch, index, &chars, depth) {
                let kind = if self.script.is_terminator(ch) {
                    BoundaryKind::Script
                } else {
                    BoundaryKind::Latin
                };
                boundaries.push(SentenceBoundary {
                    index,
                    terminator: ch,
                    kind,
                });
            }

            match ch {
                '(' => depth += 1,
                ')' => depth = (depth - 1).max(0),
                _ => {}
            }
        }

        boundaries
    }

    /// Split the text into sentence spans that tile the whole input
    ///
    /// Each span ends just after its terminator; the final span carries any
    /// trailing remainder. The chunker works on spans so chunk offsets stay
    /// anchored in the source document.
    pub fn sentence_spans(&self, text: &str) -> Vec<SentenceSpan> {
        let total = text.chars().count();
        let mut spans = Vec::new();
        let mut start = 0;

        for boundary in self.detect_boundaries(text) {
            let end = boundary.index + 1;
            if end > start {
                spans.push(SentenceSpan { start, end });
                start = end;
            }
        }

        if start < total {
            spans.push(SentenceSpan { start, end: total });
        }

        spans
    }

    /// Split the text into trimmed sentences
    ///
    /// Cuts at each boundary inclusive of the terminator, trims, drops
    /// empties, and appends any trailing remainder. No boundaries yield the
    /// whole text as one sentence; empty text yields an empty list.
    pub fn split_into_sentences(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();

        self.sentence_spans(text)
            .into_iter()
            .filter_map(|span| {
                let sentence: String = chars[span.start..span.end].iter().collect();
                let trimmed = sentence.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect()
    }

    /// Boundary check against a precomputed parenthesis depth
    fn check_boundary(&self, ch: char, index: usize, chars: &[char], open_depth: i32) -> bool {
        let is_terminator = self.script.is_terminator(ch) || LATIN_TERMINATORS.contains(&ch);
        if !is_terminator {
            return false;
        }

        // Inside an unbalanced parenthetical span
        if open_depth > 0 {
            return false;
        }

        // Abbreviation exclusion applies to the Latin full stop only
        if ch == '.' && self.ends_with_abbreviation(chars, index) {
            return false;
        }

        true
    }

    /// Whether the characters preceding `index` end with a known
    /// abbreviation token
    fn ends_with_abbreviation(&self, chars: &[char], index: usize) -> bool {
        let window_start = index.saturating_sub(ABBREVIATION_WINDOW);
        let window: String = chars[window_start..index]
            .iter()
            .collect::<String>()
            .to_lowercase();

        for abbreviation in ABBREVIATIONS {
            if !window.ends_with(abbreviation) {
                continue;
            }

            // The abbreviation must stand as its own token, so "Cedr." is
            // not mistaken for "Dr."
            let prefix = &window[..window.len() - abbreviation.len()];
            match prefix.chars().last() {
                None => return true,
                Some(c) if !c.is_alphanumeric() => return true,
                Some(_) => {}
            }
        }

        false
    }
}

impl Default for SentenceBoundaryDetector {
    fn default() -> Self {
        Self::new(ScriptProfile::default())
    }
}
