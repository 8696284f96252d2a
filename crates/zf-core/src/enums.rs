//! Status and categorization enums for ZenFocus.
//!
//! `TaskStatus` uses lowercase serialization and carries the lifecycle state
//! machine via `allowed_next_states()`. `Quadrant` is stored by the record
//! service as the integers `1..=4`.

use std::borrow::Cow;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a task.
///
/// ```text
/// backlog → basket → completed
///         ← basket (returned)
/// ```
///
/// There is no `backlog → completed` edge: a task has to be focused before it
/// can be finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Backlog,
    Basket,
    Completed,
}

impl TaskStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Backlog => &[Self::Basket],
            Self::Basket => &[Self::Backlog, Self::Completed],
            Self::Completed => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.allowed_next_states().is_empty()
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Basket => "basket",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Quadrant
// ---------------------------------------------------------------------------

/// Eisenhower quadrant of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Quadrant {
    /// Urgent and important.
    Q1,
    /// Not urgent, important.
    Q2,
    /// Urgent, not important.
    Q3,
    /// Neither urgent nor important.
    Q4,
}

impl Quadrant {
    /// All quadrants in board display order.
    pub const ALL: [Self; 4] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4];

    /// Numeric identifier used by the record service.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Q1 => 1,
            Self::Q2 => 2,
            Self::Q3 => 3,
            Self::Q4 => 4,
        }
    }

    #[must_use]
    pub const fn is_urgent(self) -> bool {
        matches!(self, Self::Q1 | Self::Q3)
    }

    #[must_use]
    pub const fn is_important(self) -> bool {
        matches!(self, Self::Q1 | Self::Q2)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Q1 => "q1",
            Self::Q2 => "q2",
            Self::Q3 => "q3",
            Self::Q4 => "q4",
        }
    }
}

impl TryFrom<u8> for Quadrant {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Q1),
            2 => Ok(Self::Q2),
            3 => Ok(Self::Q3),
            4 => Ok(Self::Q4),
            other => Err(CoreError::Validation(format!(
                "quadrant must be between 1 and 4, got {other}"
            ))),
        }
    }
}

impl From<Quadrant> for u8 {
    fn from(quadrant: Quadrant) -> Self {
        quadrant.number()
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl JsonSchema for Quadrant {
    fn schema_name() -> Cow<'static, str> {
        "Quadrant".into()
    }

    fn json_schema(_generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "integer",
            "enum": [1, 2, 3, 4],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Serde roundtrip tests ---

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_json:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, $expected_json);
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(status_backlog, TaskStatus, TaskStatus::Backlog, "\"backlog\"");
    test_serde_roundtrip!(status_basket, TaskStatus, TaskStatus::Basket, "\"basket\"");
    test_serde_roundtrip!(
        status_completed,
        TaskStatus,
        TaskStatus::Completed,
        "\"completed\""
    );

    test_serde_roundtrip!(quadrant_one, Quadrant, Quadrant::Q1, "1");
    test_serde_roundtrip!(quadrant_four, Quadrant, Quadrant::Q4, "4");

    #[test]
    fn quadrant_out_of_range_rejected() {
        assert!(serde_json::from_str::<Quadrant>("0").is_err());
        assert!(serde_json::from_str::<Quadrant>("5").is_err());
        assert!(serde_json::from_str::<Quadrant>("\"q1\"").is_err());
    }

    // --- Transition tests ---

    #[test]
    fn task_valid_transitions() {
        assert!(TaskStatus::Backlog.can_transition_to(TaskStatus::Basket));
        assert!(TaskStatus::Basket.can_transition_to(TaskStatus::Backlog));
        assert!(TaskStatus::Basket.can_transition_to(TaskStatus::Completed));
    }

    #[test]
    fn task_invalid_transitions() {
        assert!(!TaskStatus::Backlog.can_transition_to(TaskStatus::Completed));
        assert!(!TaskStatus::Backlog.can_transition_to(TaskStatus::Backlog));
        assert!(!TaskStatus::Completed.can_transition_to(TaskStatus::Basket));
        assert!(!TaskStatus::Completed.can_transition_to(TaskStatus::Backlog));
    }

    #[test]
    fn completed_is_terminal() {
        assert!(TaskStatus::Completed.is_terminal());
        assert!(!TaskStatus::Backlog.is_terminal());
        assert!(!TaskStatus::Basket.is_terminal());
    }

    #[test]
    fn quadrant_axes() {
        assert!(Quadrant::Q1.is_urgent() && Quadrant::Q1.is_important());
        assert!(!Quadrant::Q2.is_urgent() && Quadrant::Q2.is_important());
        assert!(Quadrant::Q3.is_urgent() && !Quadrant::Q3.is_important());
        assert!(!Quadrant::Q4.is_urgent() && !Quadrant::Q4.is_important());
    }

    #[test]
    fn quadrant_numbers_roundtrip_through_u8() {
        for quadrant in Quadrant::ALL {
            assert_eq!(Quadrant::try_from(u8::from(quadrant)).unwrap(), quadrant);
        }
    }

    // --- Display / as_str tests ---

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", TaskStatus::Basket), "basket");
        assert_eq!(format!("{}", Quadrant::Q3), "q3");
    }
}
