//! Text cleaning applied to every raw record before filtering.

use std::sync::LazyLock;

use regex::Regex;

/// `scheme://...` tokens and bare `http`-prefixed tokens.
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z][A-Za-z0-9+.\-]*://\S*|\bhttp\S*").expect("valid url regex")
});

static CONTROL_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n\t]+").expect("valid control regex"));

/// Anything that is not a letter, digit, underscore, whitespace, or a quote
/// mark. Spelled out instead of `\w`, which also keeps joiners, connector
/// punctuation and combining marks.
static SYMBOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[^\p{L}\p{N}_\s'"]"#).expect("valid symbol regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Clean raw text: strip URLs, control runs, and punctuation other than
/// quotes, then collapse whitespace and trim.
///
/// Pure and idempotent: `normalize(&normalize(s)) == normalize(s)`.
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut current = clean_once(text);
    // Dropping symbols can glue a new `http` token together ("h.ttp" -> "http").
    loop {
        let next = clean_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_once(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = URL_RE.replace_all(text, "");
    let text = CONTROL_RUN_RE.replace_all(&text, " ");
    let text = SYMBOL_RE.replace_all(&text, "");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_url_and_punctuation() {
        assert_eq!(normalize("Check http://evil.com NOW!!"), "Check NOW");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n "), "");
    }

    #[test]
    fn strips_non_http_schemes() {
        assert_eq!(
            normalize("mirror at ftp://files.example.org/pub and done"),
            "mirror at and done"
        );
    }

    #[test]
    fn strips_bare_http_tokens() {
        assert_eq!(normalize("see httpsomething here"), "see here");
    }

    #[test]
    fn http_inside_a_word_is_kept() {
        assert_eq!(normalize("libhttp rocks"), "libhttp rocks");
    }

    #[test]
    fn control_runs_become_single_spaces() {
        assert_eq!(normalize("line one\r\n\r\nline\ttwo"), "line one line two");
    }

    #[test]
    fn keeps_quotes_underscores_and_digits() {
        assert_eq!(
            normalize(r#"it's "snake_case" v2.0 (beta)"#),
            r#"it's "snake_case" v20 beta"#
        );
    }

    #[test]
    fn drops_nul_and_other_controls() {
        assert_eq!(normalize("bad\u{0}byte\u{7}s"), "badbytes");
    }

    #[test]
    fn keeps_non_ascii_letters() {
        assert_eq!(normalize("café — naïve!"), "café naïve");
    }

    #[test]
    fn drops_emoji_joiner_sequences() {
        let cleaned = normalize("dev \u{1F468}\u{200D}\u{1F4BB} life is great");
        assert_eq!(cleaned, "dev life is great");
        assert!(!cleaned.contains('\u{200D}'));
    }

    #[test]
    fn drops_connector_punctuation_and_combining_marks() {
        assert_eq!(
            normalize("tie\u{203F}bar and combining e\u{0301}"),
            "tiebar and combining e"
        );
    }

    #[test]
    fn invisible_leftovers_do_not_split_equal_text() {
        assert_eq!(
            normalize("dev \u{200D} life is great"),
            normalize("dev life is great")
        );
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        assert_eq!(normalize("   lots    of     space   "), "lots of space");
    }

    #[test]
    fn punctuation_only_input_becomes_empty() {
        assert_eq!(normalize("!!! ??? ..."), "");
    }

    #[test]
    fn idempotent_on_fixtures() {
        let fixtures = [
            "Check http://evil.com NOW!!",
            "h.ttp://sneaky.example rest",
            "h!ttpfoo bar",
            "a:/!/b c",
            "mixed\tcontrol\r\nchars and https://x.y/z?q=1 more",
            r#"quotes ' and " stay"#,
            "",
            "émoji 🚀 launch!!!",
        ];
        for s in fixtures {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn glued_http_token_is_removed() {
        // After the '!' is dropped the token reads "httpfoo", which is a URL-shaped token.
        assert_eq!(normalize("h!ttpfoo bar"), "bar");
    }
}
