use regex::Regex;
use std::sync::OnceLock;

/// Perl-like quote word: split on runs of ASCII whitespace and commas.
///
/// Separators at either end produce an empty first or last token, and an
/// empty input yields a single empty token.
///
/// # Examples
/// ```
/// use reqkit::qw;
/// assert_eq!(qw("a, b  c"), vec!["a", "b", "c"]);
/// assert_eq!(qw(" a,b "), vec!["", "a", "b", ""]);
/// ```
pub fn qw(x: &str) -> Vec<&str> {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    let separators = SEPARATORS.get_or_init(|| Regex::new(r"(?-u:[\s,])+").unwrap());
    separators.split(x).collect()
}

pub fn starts_with(haystack: &str, needle: &str) -> bool {
    haystack.starts_with(needle)
}
