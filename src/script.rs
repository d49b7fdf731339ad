/*!
 * Script profiles for mixed-script text handling.
 *
 * A script profile describes the target language's "dense script": the
 * Unicode ranges whose characters tokenize much more densely than
 * whitespace-delimited Latin words, plus the script-specific sentence
 * terminators. The chunking subsystem is parameterized on a profile so the
 * same machinery works for any target script.
 */

use serde::{Deserialize, Serialize};

/// Inclusive range of Unicode codepoints belonging to a script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodepointRange {
    /// First codepoint in the range
    pub start: u32,

    /// Last codepoint in the range (inclusive)
    pub end: u32,
}

impl CodepointRange {
    /// Create a new inclusive codepoint range
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Whether the given character falls inside this range
    pub fn contains(&self, ch: char) -> bool {
        let cp = ch as u32;
        cp >= self.start && cp <= self.end
    }
}

/// Profile of the target language's native script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptProfile {
    /// Human-readable script name
    pub name: String,

    /// Codepoint ranges that count as dense-script characters
    pub ranges: Vec<CodepointRange>,

    /// Script-specific single sentence terminator
    pub terminator: char,

    /// Script-specific double sentence terminator
    pub double_terminator: char,
}

impl ScriptProfile {
    /// Devanagari profile: the main block with danda and double danda
    /// terminators
    pub fn devanagari() -> Self {
        Self {
            name: "devanagari".to_string(),
            ranges: vec![CodepointRange::new(0x0900, 0x097F)],
            terminator: '\u{0964}',        // ।
            double_terminator: '\u{0965}', // ॥
        }
    }

    /// Whether the given character belongs to the dense script
    pub fn contains(&self, ch: char) -> bool {
        self.ranges.iter().any(|range| range.contains(ch))
    }

    /// Whether the given character is one of the script-specific sentence
    /// terminators
    pub fn is_terminator(&self, ch: char) -> bool {
        ch == self.terminator || ch == self.double_terminator
    }
}

impl Default for ScriptProfile {
    fn default() -> Self {
        Self::devanagari()
    }
}
