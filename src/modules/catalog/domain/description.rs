use regex::Regex;
use std::sync::OnceLock;

pub const DESCRIPTION_LIMIT: usize = 180;
pub const MISSING_DESCRIPTION: &str = "No description available.";

fn line_break_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)<br\s*/?>").expect("static regex"))
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]+>").expect("static regex"))
}

/// Turn an AniList HTML synopsis into a short plain-text blurb.
///
/// `<br>` variants become spaces, remaining tags are dropped, and text longer
/// than [`DESCRIPTION_LIMIT`] characters is cut and suffixed with `...`.
pub fn clean_description(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|text| !text.trim().is_empty()) else {
        return MISSING_DESCRIPTION.to_string();
    };

    let spaced = line_break_pattern().replace_all(raw, " ");
    let plain = tag_pattern().replace_all(&spaced, "");
    let plain = plain.trim();

    if plain.chars().count() > DESCRIPTION_LIMIT {
        let cut: String = plain.chars().take(DESCRIPTION_LIMIT).collect();
        format!("{}...", cut)
    } else {
        plain.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_breaks_become_spaces() {
        assert_eq!(
            clean_description(Some("First line.<br>Second<BR />third")),
            "First line. Second third"
        );
    }

    #[test]
    fn other_tags_are_stripped() {
        assert_eq!(
            clean_description(Some("<i>Italic</i> and <b>bold</b>")),
            "Italic and bold"
        );
    }

    #[test]
    fn long_text_is_truncated_with_ellipsis() {
        let text = "x".repeat(200);
        let cleaned = clean_description(Some(&text));
        assert_eq!(cleaned.chars().count(), DESCRIPTION_LIMIT + 3);
        assert!(cleaned.ends_with("..."));
    }

    #[test]
    fn short_text_keeps_no_ellipsis() {
        assert_eq!(clean_description(Some("Short.")), "Short.");
    }

    #[test]
    fn missing_description_uses_placeholder() {
        assert_eq!(clean_description(None), MISSING_DESCRIPTION);
        assert_eq!(clean_description(Some("  ")), MISSING_DESCRIPTION);
    }
}
