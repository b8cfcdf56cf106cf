use serde::{Deserialize, Serialize};

use super::action::UserAction;
use super::financials::{FinancialSnapshot, Financials};
use super::goal::Goal;
use super::profile::UserProfile;

/// Everything stored for one user. This is what a repository persists.
///
/// Contains: profile, the current financials, dated snapshots for trend
/// views, goals, and actions the user has picked up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// User id (the phone number used at sign-up)
    pub id: String,

    pub profile: UserProfile,

    /// Latest financials entered by the user
    #[serde(default)]
    pub financials: Financials,

    /// Past financials, kept sorted by date, at most one per date
    #[serde(default)]
    pub snapshots: Vec<FinancialSnapshot>,

    #[serde(default)]
    pub goals: Vec<Goal>,

    #[serde(default)]
    pub actions: Vec<UserAction>,
}

impl UserRecord {
    pub fn new(id: impl Into<String>, profile: UserProfile) -> Self {
        Self {
            id: id.into(),
            profile,
            financials: Financials::default(),
            snapshots: Vec::new(),
            goals: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Insert or replace the snapshot for `snapshot.date`, keeping date order.
    pub fn upsert_snapshot(&mut self, snapshot: FinancialSnapshot) {
        match self
            .snapshots
            .binary_search_by_key(&snapshot.date, |s| s.date)
        {
            Ok(idx) => self.snapshots[idx] = snapshot,
            Err(idx) => self.snapshots.insert(idx, snapshot),
        }
    }
}
