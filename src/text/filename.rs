use regex::Regex;
use std::sync::OnceLock;

/// Make a user supplied file name safe to store.
///
/// Strips shell/URL/filesystem special characters, turns whitespace and
/// hyphen runs into a single `-`, and trims `.`, `-`, `_` from both ends.
///
/// # Examples
/// ```
/// use reqkit::sanitize_filename;
/// assert_eq!(sanitize_filename("My File? (2024).txt"), "My-File-2024.txt");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    static SPECIAL: OnceLock<Regex> = OnceLock::new();
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();

    let special = SPECIAL.get_or_init(|| {
        Regex::new(r#"[?\[\]/\\=<>:;,'"&$#*()|~`!{}%+’«»”“\x00]"#).unwrap()
    });
    let separators = SEPARATORS.get_or_init(|| Regex::new(r"[\s-]+").unwrap());

    let stripped = special.replace_all(name, "");
    let joined = separators.replace_all(&stripped, "-");
    joined.trim_matches(['.', '-', '_']).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_basic() {
        assert_eq!(sanitize_filename("My File? (2024).txt"), "My-File-2024.txt");
        assert_eq!(sanitize_filename("report.pdf"), "report.pdf");
    }

    #[test]
    fn test_sanitize_collapses_separators() {
        assert_eq!(sanitize_filename("a  -  b\t\nc"), "a-b-c");
        assert_eq!(sanitize_filename("a---b"), "a-b");
    }

    #[test]
    fn test_sanitize_strips_path_characters() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "etcpasswd");
        assert_eq!(sanitize_filename("C:\\boot.ini"), "Cboot.ini");
    }

    #[test]
    fn test_sanitize_trims_edges() {
        assert_eq!(sanitize_filename("._hidden_."), "hidden");
        assert_eq!(sanitize_filename(" -draft- "), "draft");
        assert_eq!(sanitize_filename("«quoted» “name”.md"), "quoted-name.md");
    }

    #[test]
    fn test_sanitize_everything_removed() {
        assert_eq!(sanitize_filename("?*<>|"), "");
        assert_eq!(sanitize_filename("..."), "");
    }
}
