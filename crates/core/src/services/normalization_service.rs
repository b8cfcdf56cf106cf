use crate::models::financials::{FinancialItem, Frequency};

/// Converts income/expense lines to a common monthly and annual basis.
///
/// This is the single place where missing or non-finite input is turned
/// into 0, so every downstream service works on clean numbers.
pub struct NormalizationService;

impl NormalizationService {
    pub fn new() -> Self {
        Self
    }

    /// A raw amount with non-finite and negative values read as 0.
    pub fn amount(&self, value: f64) -> f64 {
        if value.is_finite() && value > 0.0 {
            value
        } else {
            0.0
        }
    }

    /// Monthly equivalent of a line. Missing line → 0.
    pub fn monthly(&self, item: Option<&FinancialItem>) -> f64 {
        match item {
            Some(item) => {
                let value = self.amount(item.value);
                match item.frequency {
                    Frequency::Monthly => value,
                    Frequency::Annual => value / 12.0,
                }
            }
            None => 0.0,
        }
    }

    /// Annual equivalent of a line. Missing line → 0.
    pub fn annual(&self, item: Option<&FinancialItem>) -> f64 {
        match item {
            Some(item) => {
                let value = self.amount(item.value);
                match item.frequency {
                    Frequency::Monthly => value * 12.0,
                    Frequency::Annual => value,
                }
            }
            None => 0.0,
        }
    }

    /// The line's raw value if it was entered with `frequency`, else 0.
    pub fn raw_if(&self, item: Option<&FinancialItem>, frequency: Frequency) -> f64 {
        match item {
            Some(item) if item.frequency == frequency => self.amount(item.value),
            _ => 0.0,
        }
    }

    /// `numerator / denominator`, or `fallback` when the denominator is not positive.
    pub fn ratio_or(&self, numerator: f64, denominator: f64, fallback: f64) -> f64 {
        if denominator > 0.0 {
            numerator / denominator
        } else {
            fallback
        }
    }
}

impl Default for NormalizationService {
    fn default() -> Self {
        Self::new()
    }
}
