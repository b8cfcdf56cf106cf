use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A savings goal: reach `target_value` by the time the user is `target_age`.
///
/// Goals are replace-only; edits create a new goal and remove the old one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Unique identifier
    pub id: Uuid,

    /// Display name (e.g., "House down payment")
    pub name: String,

    /// User age at which the goal should be funded
    pub target_age: u32,

    /// Amount needed (always >= 0)
    pub target_value: f64,
}

impl Goal {
    pub fn new(name: impl Into<String>, target_age: u32, target_value: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            target_age,
            target_value,
        }
    }

    /// Years remaining until the goal's target age. Negative when overdue.
    pub fn years_left(&self, age: u32) -> i64 {
        i64::from(self.target_age) - i64::from(age)
    }
}

/// Investment horizon a goal (or an asset class) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalBucket {
    Short,
    Medium,
    Long,
}

impl GoalBucket {
    pub const ALL: [GoalBucket; 3] = [GoalBucket::Short, GoalBucket::Medium, GoalBucket::Long];
}

impl std::fmt::Display for GoalBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalBucket::Short => write!(f, "short"),
            GoalBucket::Medium => write!(f, "medium"),
            GoalBucket::Long => write!(f, "long"),
        }
    }
}
