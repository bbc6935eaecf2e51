//! Helpers for textual domain names.

/// Returns `true` when the name ends with the root label separator.
pub fn is_fqdn(name: &str) -> bool {
    name.ends_with('.')
}

/// Appends the root separator when it is absent.
pub fn fqdn(name: &str) -> String {
    if is_fqdn(name) {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}

/// Number of labels in a name. The root name `"."` and the empty name have none.
pub fn count_labels(name: &str) -> usize {
    name.trim_end_matches('.')
        .split('.')
        .filter(|label| !label.is_empty())
        .count()
}
