use std::cmp::Ordering;

/// Leading digits-and-dots run of a host version string, with any trailing
/// dot trimmed. Release suffixes like `"-dev"` or `"-beta1"` are dropped;
/// a string with no leading digit yields `""`.
pub fn numeric_prefix(version: &str) -> &str {
    let end = version
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(version.len());
    version[..end].trim_end_matches('.')
}

/// Compares two dotted versions component-wise and numerically, so
/// `"9.10"` sorts after `"9.9"`. When one version is a strict prefix of the
/// other, the shorter one is older: `"9.4"` predates `"9.4.0"`.
pub fn compare(a: &str, b: &str) -> Ordering {
    let parts = |v: &str| -> Vec<u64> {
        v.split('.')
            .filter(|c| !c.is_empty())
            .map(|c| c.parse::<u64>().unwrap_or(0))
            .collect()
    };
    let (a, b) = (parts(a), parts(b));
    for (x, y) in a.iter().zip(b.iter()) {
        match x.cmp(y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}

/// Min-inclusive, max-exclusive range test against the numeric prefix of
/// `version`. A version with no numeric prefix never qualifies.
pub fn within_bounds(version: &str, min: &str, max: &str) -> bool {
    let v = numeric_prefix(version);
    compare(v, min) != Ordering::Less && compare(v, max) == Ordering::Less
}
