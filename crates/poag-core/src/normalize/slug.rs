use crate::ir::HttpMethod;

/// Derive the stable group identifier from a raw URL-template path.
///
/// Runs of non-alphanumeric characters collapse to single hyphens, the
/// result is lower-cased, and leading/trailing hyphens are trimmed. The
/// empty/root path maps to the reserved slug `root`.
pub fn slug(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut pending_hyphen = false;

    for ch in path.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    if out.is_empty() {
        return "root".to_string();
    }
    out
}

/// Derive the unique operation identifier `{verb-lower}-{slug}`.
pub fn operation_id(method: HttpMethod, path: &str) -> String {
    format!("{}-{}", method.as_str().to_ascii_lowercase(), slug(path))
}
