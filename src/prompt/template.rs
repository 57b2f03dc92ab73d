//! Fixed prompt template and placeholder substitution.

use crate::prompt::Presets;

/// Number of candidate prompts the model is asked to produce.
const PROMPT_COUNT: &str = "5";

/// The generation template. Three placeholder tokens are substituted
/// positionally: `{count}`, `{presets}`, `{ideas}`.
const PROMPT_TEMPLATE: &str = "\
You are a professional prompt engineer for text-to-image models. \
Based on the user's ideas below, write {count} distinct, richly detailed \
image prompts in English. Each prompt must describe a single image in one \
paragraph: subject, setting, mood, and rendering details. Number the \
prompts and output nothing else.
{presets}
User ideas: {ideas}";

/// Build the final prompt string for a request.
///
/// Substitution is plain string replacement with no escaping; input text
/// containing a placeholder token corrupts the output. Replacement runs in
/// template order: count, presets, ideas.
pub fn build_prompt(text: &str, presets: &Presets) -> String {
    PROMPT_TEMPLATE
        .replace("{count}", PROMPT_COUNT)
        .replace("{presets}", &presets.describe())
        .replace("{ideas}", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_are_substituted() {
        let prompt = build_prompt("a cat", &Presets::default());
        assert!(prompt.contains("write 5 distinct"));
        assert!(prompt.contains("User ideas: a cat"));
        assert!(!prompt.contains("{count}"));
        assert!(!prompt.contains("{presets}"));
        assert!(!prompt.contains("{ideas}"));
    }

    #[test]
    fn test_empty_presets_leave_empty_section() {
        let prompt = build_prompt("a cat", &Presets::default());
        // The presets placeholder collapses to an empty line.
        assert!(prompt.contains("else.\n\nUser ideas:"));
    }

    #[test]
    fn test_style_preset_appears_as_sentence() {
        let presets = Presets {
            style: "cyberpunk".to_string(),
            ..Default::default()
        };
        let prompt = build_prompt("a cat", &presets);
        assert!(prompt.contains("The style of the image is cyberpunk"));
    }
}
