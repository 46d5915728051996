//! Title cleanup for strings that still carry LaTeX leftovers from the
//! article extraction pipeline.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // `$^{12}$` or `$^12$`
    static ref SUPERSCRIPT: Regex = Regex::new(r"\$\^\{?([0-9]+)\}?\$").unwrap();
}

/// Normalizes a raw article title into display text.
///
/// Superscripts collapse to caret notation (`CO$^{2}$` becomes `CO^2`), any
/// remaining `$` is dropped and `\-` becomes `-`. The superscript rewrite has
/// to run first, since it needs the dollar signs to find its pattern.
pub fn sanitize(title: Option<&str>) -> String {
    let title = match title {
        Some(t) if !t.is_empty() => t,
        _ => return String::new(),
    };

    let title = SUPERSCRIPT.replace_all(title, "^${1}");
    let title = title.replace('$', "");
    title.replace("\\-", "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize(None), "");
        assert_eq!(sanitize(Some("")), "");
    }

    #[rstest]
    #[case("Title with $symbols$", "Title with symbols")]
    #[case("CO$^{2}$", "CO^2")]
    #[case("CO$^2$", "CO^2")]
    #[case("H$^{2}$O", "H^2O")]
    #[case("x$^{10}$", "x^10")]
    #[case("x$^5$", "x^5")]
    #[case("Some\\-title", "Some-title")]
    #[case("Multi\\-word\\-title", "Multi-word-title")]
    #[case("CO$^{2}$ \\- The $future$ of energy", "CO^2 - The future of energy")]
    #[case("H$^{2}$O + CO$^{2}$ equation", "H^2O + CO^2 equation")]
    #[case(
        "$Complex$ title with $^{3}$ and \\- formatting",
        "Complex title with ^3 and - formatting"
    )]
    #[case("Regular Title", "Regular Title")]
    #[case("Simple text with spaces", "Simple text with spaces")]
    fn test_sanitize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize(Some(input)), expected);
    }

    #[test]
    fn test_superscript_needs_digits() {
        // no digits, so only the dollar signs go
        assert_eq!(sanitize(Some("x$^{n}$")), "x^{n}");
        assert_eq!(sanitize(Some("x$^$")), "x^");
    }

    #[test]
    fn test_unicode_and_whitespace_untouched() {
        assert_eq!(sanitize(Some("Énergie  de\tfusion ⚛")), "Énergie  de\tfusion ⚛");
        assert_eq!(sanitize(Some("  padded  ")), "  padded  ");
    }

    #[test]
    fn test_only_ascii_digits_collapse() {
        // Arabic-Indic digit is not a superscript exponent
        assert_eq!(sanitize(Some("x$^٢$")), "x^٢");
    }

    #[rstest]
    #[case("CO$^{2}$ \\- The $future$ of energy")]
    #[case("$Complex$ title with $^{3}$ and \\- formatting")]
    #[case("Title with $symbols$")]
    #[case("H$^{2}$O")]
    #[case("Plain")]
    fn test_idempotent(#[case] input: &str) {
        let once = sanitize(Some(input));
        assert_eq!(sanitize(Some(&once)), once);
    }
}
