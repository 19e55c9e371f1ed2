//! Phrase normalization and rubric keyword sets.
//!
//! Submissions and rubric keywords are compared only after both pass through
//! [`normalize_phrase`], so the matcher never sees raw text.

use serde::{Deserialize, Serialize};

/// Normalize free text for matching.
///
/// Lowercases the input, maps punctuation and whitespace to single spaces,
/// and collapses runs. A hyphen survives only when it sits directly between
/// two alphanumeric characters, so compound terms like `connection-pool`
/// stay intact while stray dashes become separators.
///
/// Normalization is idempotent: normalizing a normalized string is a no-op.
///
/// # Examples
///
/// ```
/// use incident_drill::core::keywords::normalize_phrase;
///
/// assert_eq!(normalize_phrase("  Connection-Pool   exhaustion!! "), "connection-pool exhaustion");
/// assert_eq!(normalize_phrase("idle -- in transaction"), "idle in transaction");
/// ```
#[must_use]
pub fn normalize_phrase(input: &str) -> String {
    let lowered = input.to_lowercase();
    let chars: Vec<char> = lowered.chars().collect();
    let mut mapped = String::with_capacity(lowered.len());

    for (i, &c) in chars.iter().enumerate() {
        if c.is_alphanumeric() {
            mapped.push(c);
        } else if c == '-'
            && i > 0
            && chars[i - 1].is_alphanumeric()
            && chars.get(i + 1).is_some_and(|n| n.is_alphanumeric())
        {
            mapped.push('-');
        } else {
            mapped.push(' ');
        }
    }

    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Check whether `needle` occurs in `haystack` on token boundaries.
///
/// Both arguments must already be normalized. An occurrence counts only when
/// the characters immediately before and after it are non-alphanumeric or the
/// string edge, so `cache` is found in `cache miss` and `cache-store` but not
/// in `cached` or `cachestore`.
///
/// # Examples
///
/// ```
/// use incident_drill::core::keywords::contains_bounded;
///
/// assert!(contains_bounded("the connection pool was empty", "connection pool"));
/// assert!(contains_bounded("a cache-store outage", "cache"));
/// assert!(!contains_bounded("everything was cached", "cache"));
/// ```
#[must_use]
pub fn contains_bounded(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }

    let mut search_from = 0;
    while let Some(offset) = haystack[search_from..].find(needle) {
        let start = search_from + offset;
        let end = start + needle.len();

        let left_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let right_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());

        if left_ok && right_ok {
            return true;
        }

        // Advance past the first character of this occurrence, on a char
        // boundary, and keep scanning for a later bounded occurrence.
        let step = haystack[start..].chars().next().map_or(1, char::len_utf8);
        search_from = start + step;
    }

    false
}

/// Errors building a [`KeywordSet`] from raw rubric entries
#[derive(Debug, thiserror::Error)]
pub enum KeywordSetError {
    #[error("no usable keywords: every entry was empty after normalization")]
    NoUsableKeywords,
}

/// A case's rubric keywords, normalized and deduplicated.
///
/// Built once per case at corpus load so matching never re-normalizes the
/// rubric. Entries keep their first-occurrence order for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordSet {
    entries: Vec<String>,
}

impl KeywordSet {
    /// Build a set from raw rubric entries.
    ///
    /// Entries are normalized; duplicates and entries that normalize to
    /// nothing are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`KeywordSetError::NoUsableKeywords`] if nothing survives
    /// normalization, since a case with an empty rubric can never be graded.
    pub fn build<S: AsRef<str>>(raw: &[S]) -> Result<Self, KeywordSetError> {
        let mut entries: Vec<String> = Vec::with_capacity(raw.len());
        for entry in raw {
            let normalized = normalize_phrase(entry.as_ref());
            if !normalized.is_empty() && !entries.contains(&normalized) {
                entries.push(normalized);
            }
        }

        if entries.is_empty() {
            return Err(KeywordSetError::NoUsableKeywords);
        }

        Ok(Self { entries })
    }

    /// Number of distinct normalized keywords (the match-ratio denominator)
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the normalized entries in rubric order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Entries of the set found in `normalized_text` on token boundaries
    #[must_use]
    pub fn hits<'a>(&'a self, normalized_text: &str) -> Vec<&'a str> {
        self.entries
            .iter()
            .map(String::as_str)
            .filter(|keyword| contains_bounded(normalized_text, keyword))
            .collect()
    }
}
