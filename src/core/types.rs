use serde::{Deserialize, Serialize};

/// Unique identifier for a case in the corpus
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CaseId(pub String);

impl CaseId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Difficulty grade of a case, ordered from easiest to hardest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Junior,
    Mid,
    Senior,
    Principal,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Junior => write!(f, "junior"),
            Self::Mid => write!(f, "mid"),
            Self::Senior => write!(f, "senior"),
            Self::Principal => write!(f, "principal"),
        }
    }
}

/// Kind of evidence a clue carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClueKind {
    /// Excerpts from service or system logs
    Logs,
    /// Dashboard readings and time-series observations
    Metrics,
    /// Configuration fragments, manifests, flags
    Config,
    /// Source snippets from the affected system
    Code,
    /// What people on the incident said or saw
    Testimony,
}

impl std::fmt::Display for ClueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logs => write!(f, "logs"),
            Self::Metrics => write!(f, "metrics"),
            Self::Config => write!(f, "config"),
            Self::Code => write!(f, "code"),
            Self::Testimony => write!(f, "testimony"),
        }
    }
}

/// How well a submitted diagnosis matched the case rubric
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchClass {
    /// No rubric keyword found
    NoMatch,
    /// Some keywords found, below the strong threshold
    Partial,
    /// Keyword coverage at or above the strong threshold
    Strong,
}

impl std::fmt::Display for MatchClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoMatch => write!(f, "no match"),
            Self::Partial => write!(f, "partial"),
            Self::Strong => write!(f, "strong"),
        }
    }
}

/// Lifecycle state of a drill session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Created but not yet started; no clue revealed
    NotStarted,
    /// Accepting reveals and submissions
    InProgress,
    /// A submission has been graded and scored
    Submitted,
    /// Finished; rejects all further actions
    Closed,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not started"),
            Self::InProgress => write!(f, "in progress"),
            Self::Submitted => write!(f, "submitted"),
            Self::Closed => write!(f, "closed"),
        }
    }
}
