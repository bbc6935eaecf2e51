use dnsql_domain::{count_labels, fqdn, is_fqdn};

/// Expands a partial hostname into the ordered list of fully-qualified
/// candidates, following resolver `ndots` semantics.
///
/// A fully-qualified `partial` is returned as the only candidate. Otherwise
/// names with more than `ndots` labels are tried as-is first; shorter names
/// are tried against every search domain first and as-is last.
pub fn expand(partial: &str, search: &[String], ndots: u32) -> Vec<String> {
    if is_fqdn(partial) {
        return vec![partial.to_string()];
    }

    let fq = fqdn(partial);
    let absolute_first = count_labels(partial) > ndots as usize;

    let mut candidates = Vec::with_capacity(search.len() + 1);
    if absolute_first {
        candidates.push(fq.clone());
    }

    for suffix in search {
        let suffix = suffix.trim_start_matches('.');
        if suffix.is_empty() {
            // root search entry, same as the bare name
            candidates.push(fq.clone());
        } else {
            candidates.push(fqdn(&format!("{}{}", fq, suffix)));
        }
    }

    if !absolute_first {
        candidates.push(fq);
    }

    candidates
}
