//! Small shared helpers

/// Slug an arbitrary project name into a valid package name: lowercase,
/// `[a-z0-9-]` only, dashes collapsed and trimmed from both ends.
/// Returns an empty string when nothing usable remains.
pub fn to_valid_package_name(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.trim().to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_matches('-').to_string()
}
