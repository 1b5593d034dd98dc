//! Fixed prompt template for creative-writing suggestions.

/// Wrap the author's text in the suggestion-request template.
///
/// The template is a fixed string contract with the generation
/// backend, not something callers compose.
pub fn build_prompt(document: &str) -> String {
    format!(
        "You are a professional creative-writing assistant. Based on the \
following text, offer the author creative suggestions covering plot \
twists and character development.

Text:
{document}

Please provide 3-5 concrete suggestions, each including:
1. The suggestion kind (plot twist / character development)
2. The suggestion itself
3. Why it might help

Keep the wording clear and concise."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_document_verbatim() {
        let prompt = build_prompt("The lighthouse keeper counted the ships.");
        assert!(prompt.contains("The lighthouse keeper counted the ships."));
    }

    #[test]
    fn prompt_keeps_fixed_instructions() {
        let prompt = build_prompt("anything");
        assert!(prompt.starts_with("You are a professional creative-writing assistant."));
        assert!(prompt.contains("3-5 concrete suggestions"));
    }
}
