//! Claude Code stores each project under a directory named after its working
//! directory with every `/` replaced by `-`.
//!
//! The encoding is lossy: a `-` in the original path decodes as a separator.

/// `-Users-me-code-app` -> `/Users/me/code/app`
pub fn decode_project_path(encoded: &str) -> String {
    if encoded.is_empty() {
        return String::new();
    }
    let trimmed = encoded.strip_prefix('-').unwrap_or(encoded);
    format!("/{}", trimmed.replace('-', "/"))
}

/// `/Users/me/code/app` -> `-Users-me-code-app`
pub fn encode_project_path(path: &str) -> String {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    format!("-{}", trimmed.replace('/', "-"))
}

/// Last component of a decoded project path.
pub fn project_name(decoded: &str) -> &str {
    decoded
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(decoded)
}
