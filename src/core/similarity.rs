use std::collections::BTreeSet;

/// Fraction of `wanted` that `offered` covers: |wanted ∩ offered| / |wanted|
///
/// Asymmetric: extra entries in `offered` never lower the result.
/// An empty `wanted` set yields 0.0.
#[inline]
pub fn overlap_fraction(wanted: &BTreeSet<String>, offered: &BTreeSet<String>) -> f64 {
    if wanted.is_empty() {
        return 0.0;
    }

    let covered = wanted.intersection(offered).count();
    covered as f64 / wanted.len() as f64
}

/// Jaccard similarity: |a ∩ b| / |a ∪ b|
///
/// Defined as 0.0 when both sets are empty.
#[inline]
pub fn jaccard_similarity(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(b).count();
    // |a ∪ b| without allocating the union
    let union = a.len() + b.len() - intersection;

    intersection as f64 / union as f64
}

/// Entries present in both sets, in sorted order
pub fn shared_tokens(a: &BTreeSet<String>, b: &BTreeSet<String>) -> Vec<String> {
    a.intersection(b).cloned().collect()
}
