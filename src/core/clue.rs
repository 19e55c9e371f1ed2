use serde::{Deserialize, Serialize};

use crate::core::types::ClueKind;

/// A single piece of evidence within a case.
///
/// Clue ids run `1..=N` within a case, ordered by significance: clue 1 is the
/// broad symptom every session starts with, later clues point increasingly
/// directly at the root cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    /// Position in the reveal order, 1-based
    pub id: u32,

    /// What sort of evidence this is
    pub kind: ClueKind,

    /// The evidence itself (log excerpt, graph reading, snippet, quote)
    pub content: String,

    /// Optional nudge toward interpreting this clue, billed separately
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Clue {
    pub fn new(id: u32, kind: ClueKind, content: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            content: content.into(),
            hint: None,
        }
    }

    #[cfg(test)]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Whether asking for a hint on this clue can succeed
    pub fn has_hint(&self) -> bool {
        self.hint.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_hint() {
        let bare = Clue::new(1, ClueKind::Logs, "ERROR PoolTimeout");
        assert!(!bare.has_hint());

        let hinted = Clue::new(2, ClueKind::Metrics, "pool flat at max").with_hint("what is capped?");
        assert!(hinted.has_hint());
    }

    #[test]
    fn test_hint_omitted_from_json_when_absent() {
        let clue = Clue::new(1, ClueKind::Config, "ttl=-1");
        let json = serde_json::to_string(&clue).unwrap();
        assert!(!json.contains("hint"));

        let back: Clue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, clue);
    }
}
