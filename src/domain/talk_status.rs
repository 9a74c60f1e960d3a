//! TalkStatus - lifecycle of a talk submission.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::foundation::ValidationError;

/// Lifecycle status of a submitted talk.
///
/// Only [`TalkStatus::Approved`] talks may appear in the public index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TalkStatus {
    Submitted,
    Approved,
    Rejected,
    Draft,
    Withdrawn,
}

impl TalkStatus {
    /// Returns true if talks in this status may be publicly visible.
    pub fn is_public(&self) -> bool {
        matches!(self, TalkStatus::Approved)
    }

    /// Upstream wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TalkStatus::Submitted => "SUBMITTED",
            TalkStatus::Approved => "APPROVED",
            TalkStatus::Rejected => "REJECTED",
            TalkStatus::Draft => "DRAFT",
            TalkStatus::Withdrawn => "WITHDRAWN",
        }
    }
}

impl fmt::Display for TalkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TalkStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "" => Err(ValidationError::empty_field("status")),
            "SUBMITTED" => Ok(TalkStatus::Submitted),
            "APPROVED" => Ok(TalkStatus::Approved),
            "REJECTED" => Ok(TalkStatus::Rejected),
            "DRAFT" => Ok(TalkStatus::Draft),
            "WITHDRAWN" => Ok(TalkStatus::Withdrawn),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown value '{}'", other),
            )),
        }
    }
}
