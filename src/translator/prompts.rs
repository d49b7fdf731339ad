/*!
 * Prompt assembly for translation calls.
 *
 * Two registers: a rich prompt that carries glossary terms and neighboring
 * context, and a minimal instruction used when the rich prompt itself is
 * suspected of causing a failure.
 */

use crate::translator::{ContextLevel, PromptOptions};

/// System prompt for full-context translation
pub const RICH_INSTRUCTION: &str = r#"You are an expert document translator.

## Your Role
- Translate the passage naturally while preserving meaning and register
- Maintain consistency with the provided glossary
- Use the neighboring context to resolve ambiguous references
- Preserve numbers, names and inline formatting exactly

## Output Requirements
- Return only the translated passage, no commentary"#;

/// Minimal instruction used by the simpler-prompt fallback
pub const MINIMAL_INSTRUCTION: &str =
    "Translate the following passage. Return only the translation.";

/// Render the system prompt for the given options
///
/// Rich prompts append the glossary and neighboring context; the minimal
/// register ignores both.
pub fn render_system_prompt(options: &PromptOptions) -> String {
    match options.context_level {
        ContextLevel::Minimal => MINIMAL_INSTRUCTION.to_string(),
        ContextLevel::Rich => {
            let mut prompt = RICH_INSTRUCTION.to_string();

            if !options.glossary.is_empty() {
                prompt.push_str("\n\n## Glossary\n");
                for (term, translation) in &options.glossary {
                    prompt.push_str(&format!("- {} -> {}\n", term, translation));
                }
            }

            if let Some(context) = &options.neighbor_context {
                prompt.push_str("\n\n## Neighboring Context\n");
                prompt.push_str(context);
            }

            prompt
        }
    }
}
