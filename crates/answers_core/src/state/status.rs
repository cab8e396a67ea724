//! Submission status tracking.

use serde::{Deserialize, Serialize};

/// Secondary lifecycle flag for the answers document.
///
/// Absent (`None` at the state level) until the first successful submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswersStatus {
    /// Last remote submit succeeded and nothing changed since.
    Submitted,
    /// Content changed after a successful submit.
    Edited,
}

impl AnswersStatus {
    /// Stable string form used in log lines and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Edited => "edited",
        }
    }

    /// Applies the content-edit demotion rule.
    ///
    /// `Submitted` becomes `Edited`; `Edited` and unset are returned as-is.
    pub fn demote_on_edit(status: Option<Self>) -> Option<Self> {
        match status {
            Some(Self::Submitted) => Some(Self::Edited),
            other => other,
        }
    }
}
