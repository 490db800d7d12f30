//! Group id generation from user-supplied names.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\-]+").unwrap());
static REPEATED_HYPHENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").unwrap());

/// Lowercase, spaces to hyphens, strip non-word characters, collapse hyphens.
/// Falls back to `group-<now_ms>` when nothing survives.
pub fn slugify(name: &str, now_ms: i64) -> String {
    let lowered = name.trim().to_lowercase();
    let hyphenated = WHITESPACE.replace_all(&lowered, "-");
    let stripped = NON_WORD.replace_all(&hyphenated, "");
    let slug = REPEATED_HYPHENS.replace_all(&stripped, "-");

    if slug.is_empty() {
        format!("group-{}", now_ms)
    } else {
        slug.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_slug() {
        assert_eq!(slugify("Phrasal Verbs", 0), "phrasal-verbs");
        assert_eq!(slugify("  Daily   Talk  ", 0), "daily-talk");
    }

    #[test]
    fn test_strips_symbols_and_collapses() {
        assert_eq!(slugify("Work & Office!", 0), "work-office");
        assert_eq!(slugify("a -- b", 0), "a-b");
    }

    #[test]
    fn test_non_ascii_letters_are_dropped() {
        assert_eq!(slugify("Günlük", 0), "gnlk");
    }

    #[test]
    fn test_fallback_for_symbols_only() {
        assert_eq!(slugify("!!!", 1234), "group-1234");
        assert_eq!(slugify("", 99), "group-99");
        assert_eq!(slugify("çğş", 7), "group-7");
    }
}
