//! Account-id normalization.

/// Replace the last two characters of ids at least `min_len` characters
/// long with `suffix`. Shorter ids pass through unchanged.
pub fn normalize_account_id(id: &str, min_len: usize, suffix: &str) -> String {
    let chars = id.chars().count();
    if chars < min_len || chars < 2 {
        return id.to_string();
    }
    let cut = id
        .char_indices()
        .nth(chars - 2)
        .map(|(i, _)| i)
        .unwrap_or(id.len());
    format!("{}{}", &id[..cut], suffix)
}
