use crate::models::financials::Financials;
use crate::models::metrics::{Protection, ProtectionScore, Totals};
use crate::models::policy::{Policy, Threshold};
use crate::services::normalization_service::NormalizationService;

/// Scores insurance adequacy for life, health, car and property cover.
pub struct ProtectionService {
    normalization: NormalizationService,
}

impl ProtectionService {
    pub fn new() -> Self {
        Self {
            normalization: NormalizationService::new(),
        }
    }

    pub fn compute(&self, financials: &Financials, totals: &Totals, policy: &Policy) -> Protection {
        let n = &self.normalization;
        let insurance = &financials.insurance;
        let assets = &financials.assets;

        // Life: cover vs a multiple of annual income. Without income any
        // cover at all counts as full.
        let life_cover = n.amount(insurance.life);
        let life_target = totals.annual_income * policy.life_cover_income_multiple;
        let life_score = if life_target > 0.0 {
            life_cover / life_target * 100.0
        } else if life_cover > 0.0 {
            100.0
        } else {
            0.0
        };

        let health_cover = n.amount(insurance.health);
        let health_score = n.ratio_or(health_cover, policy.health_cover_target, 0.0) * 100.0;

        let car_value = n.amount(assets.car);
        let property_value = n.amount(assets.house) + n.amount(assets.other_property);

        Protection {
            life: score(life_cover, life_target, life_score, &policy.life_protection),
            health: score(
                health_cover,
                policy.health_cover_target,
                health_score,
                &policy.health_protection,
            ),
            car: self.asset_cover(n.amount(insurance.car), car_value, policy),
            property: self.asset_cover(n.amount(insurance.property), property_value, policy),
        }
    }

    /// Any cover on an owned asset is compliant; nothing owned means nothing to protect.
    fn asset_cover(&self, cover: f64, insured_value: f64, policy: &Policy) -> ProtectionScore {
        let value = if insured_value > 0.0 {
            if cover > 0.0 {
                100.0
            } else {
                0.0
            }
        } else {
            100.0
        };
        score(cover, insured_value, value, &policy.asset_protection)
    }
}

impl Default for ProtectionService {
    fn default() -> Self {
        Self::new()
    }
}

fn score(cover: f64, target: f64, value: f64, threshold: &Threshold) -> ProtectionScore {
    ProtectionScore {
        cover,
        target,
        score: value,
        status: threshold.classify(value),
    }
}
