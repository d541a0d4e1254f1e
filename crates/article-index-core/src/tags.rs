//! Tag normalization for free-form tag input.
//!
//! Users type tags as a single field, e.g. `"go, rust"` or `"go rust"`.
//! Commas and whitespace both separate tags; empty pieces are dropped and
//! duplicates collapse. Case is preserved: `Rust` and `rust` are distinct tags.

use std::collections::BTreeSet;

/// Split a raw tag field into a normalized tag set.
///
/// ```rust
/// use article_index_core::tags::normalize_tags;
///
/// let tags = normalize_tags("go, rust");
/// assert_eq!(tags.into_iter().collect::<Vec<_>>(), vec!["go", "rust"]);
/// ```
pub fn normalize_tags(raw: &str) -> BTreeSet<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
