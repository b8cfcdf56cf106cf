use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Identifier of a suggested action. The catalog is closed: the engine only
/// ever emits these keys, and the UI owns the copy for each one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionKey {
    #[serde(rename = "savingsRatio")]
    SavingsRatio,
    #[serde(rename = "financialAssetRatio")]
    FinancialAssetRatio,
    #[serde(rename = "liquidityRatio")]
    LiquidityRatio,
    #[serde(rename = "leverageRatio")]
    LeverageRatio,
    #[serde(rename = "debtToIncomeRatio")]
    DebtToIncomeRatio,
    #[serde(rename = "wealthRatio")]
    WealthRatio,
    #[serde(rename = "protection-life")]
    ProtectionLife,
    #[serde(rename = "protection-health")]
    ProtectionHealth,
    #[serde(rename = "protection-car")]
    ProtectionCar,
    #[serde(rename = "protection-property")]
    ProtectionProperty,
    #[serde(rename = "goals-overall")]
    GoalsOverall,
    #[serde(rename = "goals-short")]
    GoalsShort,
    #[serde(rename = "goals-medium")]
    GoalsMedium,
    #[serde(rename = "goals-long")]
    GoalsLong,
    #[serde(rename = "retirement")]
    Retirement,
    #[serde(rename = "asset-allocation-persona-aggressive")]
    AllocationPersonaAggressive,
    #[serde(rename = "asset-allocation-persona-conservative")]
    AllocationPersonaConservative,
    #[serde(rename = "asset-allocation-age-aggressive")]
    AllocationAgeAggressive,
    #[serde(rename = "asset-allocation-age-conservative")]
    AllocationAgeConservative,
}

impl ActionKey {
    pub const ALL: [ActionKey; 19] = [
        ActionKey::SavingsRatio,
        ActionKey::FinancialAssetRatio,
        ActionKey::LiquidityRatio,
        ActionKey::LeverageRatio,
        ActionKey::DebtToIncomeRatio,
        ActionKey::WealthRatio,
        ActionKey::ProtectionLife,
        ActionKey::ProtectionHealth,
        ActionKey::ProtectionCar,
        ActionKey::ProtectionProperty,
        ActionKey::GoalsOverall,
        ActionKey::GoalsShort,
        ActionKey::GoalsMedium,
        ActionKey::GoalsLong,
        ActionKey::Retirement,
        ActionKey::AllocationPersonaAggressive,
        ActionKey::AllocationPersonaConservative,
        ActionKey::AllocationAgeAggressive,
        ActionKey::AllocationAgeConservative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKey::SavingsRatio => "savingsRatio",
            ActionKey::FinancialAssetRatio => "financialAssetRatio",
            ActionKey::LiquidityRatio => "liquidityRatio",
            ActionKey::LeverageRatio => "leverageRatio",
            ActionKey::DebtToIncomeRatio => "debtToIncomeRatio",
            ActionKey::WealthRatio => "wealthRatio",
            ActionKey::ProtectionLife => "protection-life",
            ActionKey::ProtectionHealth => "protection-health",
            ActionKey::ProtectionCar => "protection-car",
            ActionKey::ProtectionProperty => "protection-property",
            ActionKey::GoalsOverall => "goals-overall",
            ActionKey::GoalsShort => "goals-short",
            ActionKey::GoalsMedium => "goals-medium",
            ActionKey::GoalsLong => "goals-long",
            ActionKey::Retirement => "retirement",
            ActionKey::AllocationPersonaAggressive => "asset-allocation-persona-aggressive",
            ActionKey::AllocationPersonaConservative => "asset-allocation-persona-conservative",
            ActionKey::AllocationAgeAggressive => "asset-allocation-age-aggressive",
            ActionKey::AllocationAgeConservative => "asset-allocation-age-conservative",
        }
    }
}

impl std::fmt::Display for ActionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActionKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| CoreError::ActionNotFound(s.to_string()))
    }
}

/// Progress of an action the user chose to work on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionStatus {
    InProgress,
    Completed,
}

/// An action the user has picked up from the action plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAction {
    pub key: ActionKey,
    pub status: ActionStatus,
    pub started_on: NaiveDate,
    #[serde(default)]
    pub completed_on: Option<NaiveDate>,
}

impl UserAction {
    pub fn start(key: ActionKey, date: NaiveDate) -> Self {
        Self {
            key,
            status: ActionStatus::InProgress,
            started_on: date,
            completed_on: None,
        }
    }
}
