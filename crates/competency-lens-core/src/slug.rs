//! URL slugs for lens names.

/// Convert a display name into a URL-safe href segment.
///
/// Lowercases, drops every character that is not an ASCII word character
/// (`[a-z0-9_]`) or a separator, and collapses each run of separators into
/// one hyphen. Spaces and hyphens are both separators, so the output is a
/// fixed point: `slugify(slugify(s)) == slugify(s)`.
///
/// Hyphenated names keep their hyphen (`"Self-Awareness"` becomes
/// `"self-awareness"`), so they differ from hrefs built by stripping
/// hyphens (`"selfawareness"`); links of that older form fall back to the
/// "all" lens.
///
/// ```rust
/// use competency_lens_core::slug::slugify;
///
/// assert_eq!(slugify("Open & Honest Communication"), "open-honest-communication");
/// ```
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_sep = false;
    for c in s.to_lowercase().chars() {
        if c == ' ' || c == '-' {
            pending_sep = true;
        } else if c.is_ascii_alphanumeric() || c == '_' {
            if pending_sep {
                out.push('-');
                pending_sep = false;
            }
            out.push(c);
        }
    }
    if pending_sep {
        out.push('-');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ampersand_collapses() {
        assert_eq!(
            slugify("Open & Honest Communication"),
            "open-honest-communication"
        );
    }

    #[test]
    fn test_punctuation_stripped() {
        assert_eq!(slugify("Self-Awareness!"), "self-awareness");
        assert_eq!(slugify("R&D (Team)"), "rd-team");
    }

    #[test]
    fn test_edge_spaces_kept_as_single_hyphen() {
        assert_eq!(slugify("  Tech  "), "-tech-");
    }

    #[test]
    fn test_non_ascii_dropped() {
        assert_eq!(slugify("Café Culture"), "caf-culture");
    }

    #[test]
    fn test_hyphen_kept_as_separator() {
        assert_eq!(slugify("Self-Awareness"), "self-awareness");
    }

    #[test]
    fn test_idempotent() {
        for s in [
            "Open & Honest Communication",
            "A - B",
            "  leading",
            "trailing  ",
            "snake_case name",
            "",
            "---",
        ] {
            let once = slugify(s);
            assert_eq!(slugify(&once), once, "not a fixed point for {:?}", s);
        }
    }
}
