// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You output only valid JSON. \
    No markdown, no explanation, no code fence. \
    Never add text before or after the JSON.";

/// Truncates prompt input to at most `max_chars` characters, on a char boundary.
pub fn clip(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Substitutes `{name}` placeholders in a single left-to-right pass.
/// Inserted values are never rescanned, so user text that happens to contain a
/// placeholder is left alone. Unknown `{...}` spans are copied through.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let hit = values
            .iter()
            .find(|(name, _)| tail.starts_with(name) && tail[name.len()..].starts_with('}'));

        match hit {
            Some((name, value)) => {
                out.push_str(value);
                rest = &tail[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_short_text_unchanged() {
        assert_eq!(clip("resume", 100), "resume");
    }

    #[test]
    fn test_clip_counts_chars_not_bytes() {
        assert_eq!(clip("ééé", 2), "éé");
    }

    #[test]
    fn test_fill_substitutes_known_placeholders() {
        let out = fill(
            "Role: {role}\nReturn {\"ok\": true} for {role}.",
            &[("role", "Data Analyst")],
        );
        assert_eq!(out, "Role: Data Analyst\nReturn {\"ok\": true} for Data Analyst.");
    }

    #[test]
    fn test_fill_does_not_rescan_inserted_text() {
        let out = fill(
            "RESUME: {resume}\nJD: {jd}",
            &[("resume", "I wrote {jd} templates"), ("jd", "Rust engineer")],
        );
        assert_eq!(out, "RESUME: I wrote {jd} templates\nJD: Rust engineer");
    }

    #[test]
    fn test_fill_keeps_unmatched_braces() {
        assert_eq!(fill("{ {x} {", &[("y", "1")]), "{ {x} {");
    }
}
