/// Normalize a path string without consulting the filesystem.
///
/// Backslashes become slashes, repeated slashes collapse, `.` segments are
/// dropped and `..` cancels the segment before it. A `..` that has nothing
/// to cancel (start of a relative path, another `..`, or the root of an
/// absolute path) is kept. A leading slash and a trailing slash survive,
/// except that a relative path which cancels out entirely yields `""`.
///
/// # Examples
/// ```
/// use reqkit::normalize_path;
/// assert_eq!(normalize_path("a/./b//c/../d"), "a/b/d");
/// assert_eq!(normalize_path("../a"), "../a");
/// ```
pub fn normalize_path(path: &str) -> String {
    let mut unified = String::with_capacity(path.len());
    for c in path.chars().map(|c| if c == '\\' { '/' } else { c }) {
        if c == '/' && unified.ends_with('/') {
            continue;
        }
        unified.push(c);
    }

    let mut stack: Vec<&str> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "." => {}
            ".." => match stack.last() {
                None | Some(&("" | "..")) => stack.push(".."),
                Some(_) => {
                    stack.pop();
                }
            },
            _ => stack.push(segment),
        }
    }

    // Only an empty segment is left: the root of an absolute path, or the
    // trailing slash of a relative path that cancelled out entirely
    if stack == [""] {
        return if unified.starts_with('/') {
            "/".to_string()
        } else {
            String::new()
        };
    }

    stack.join("/")
}
