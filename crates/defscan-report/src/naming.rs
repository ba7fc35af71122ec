//! Report file naming.

/// Characters rejected in file names on at least one supported platform.
const INVALID_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Uppercases the first character, leaving the rest untouched.
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Replaces characters that cannot appear in a file name with `_`.
pub fn sanitize_filename(value: &str) -> String {
    let sanitized: String = value
        .chars()
        .map(|ch| {
            if ch.is_control() || INVALID_FILENAME_CHARS.contains(&ch) {
                '_'
            } else {
                ch
            }
        })
        .collect();
    // Windows drops trailing dots and spaces silently.
    let trimmed = sanitized.trim_end_matches(['.', ' ']);
    if trimmed.is_empty() {
        "_".to_string()
    } else {
        trimmed.to_string()
    }
}

/// `Report_<Name>.xml` for a definition name.
pub fn report_file_name(name: &str) -> String {
    format!("Report_{}.xml", sanitize_filename(&capitalize_first(name)))
}
