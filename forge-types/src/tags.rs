//! Tag normalization.

/// Normalizes a tag list into its canonical stored form.
///
/// Tags are trimmed and lower-cased; empty tags are dropped and duplicates
/// collapse onto their first occurrence, so the list behaves as a
/// case-insensitive set while keeping the user's ordering.
#[must_use]
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.as_ref().trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}
