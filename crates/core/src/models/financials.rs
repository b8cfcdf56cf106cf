use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// How often a recurring income or expense line occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Monthly,
    Annual,
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Monthly => write!(f, "monthly"),
            Frequency::Annual => write!(f, "annual"),
        }
    }
}

/// One income or expense line. Replaced wholesale on edit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialItem {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub value: f64,
    #[serde(default)]
    pub frequency: Frequency,
}

impl FinancialItem {
    pub fn new(value: f64, frequency: Frequency) -> Self {
        Self { value, frequency }
    }

    pub fn monthly(value: f64) -> Self {
        Self::new(value, Frequency::Monthly)
    }

    pub fn annual(value: f64) -> Self {
        Self::new(value, Frequency::Annual)
    }
}

/// Asset holdings by category. Every field defaults to 0.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Assets {
    #[serde(deserialize_with = "null_as_zero")]
    pub cash_in_hand: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub savings_account: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub fixed_deposit: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub recurring_deposit: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub gold: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub stocks: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub mutual_funds: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub crypto: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub nps: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub ppf: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub pf: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub sukanya_samriddhi: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub house: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub car: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub other_property: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub other: f64,
}

impl Assets {
    /// `(field name, value)` for every category, in declaration order.
    pub fn fields(&self) -> [(&'static str, f64); 16] {
        [
            ("cashInHand", self.cash_in_hand),
            ("savingsAccount", self.savings_account),
            ("fixedDeposit", self.fixed_deposit),
            ("recurringDeposit", self.recurring_deposit),
            ("gold", self.gold),
            ("stocks", self.stocks),
            ("mutualFunds", self.mutual_funds),
            ("crypto", self.crypto),
            ("nps", self.nps),
            ("ppf", self.ppf),
            ("pf", self.pf),
            ("sukanyaSamriddhi", self.sukanya_samriddhi),
            ("house", self.house),
            ("car", self.car),
            ("otherProperty", self.other_property),
            ("other", self.other),
        ]
    }
}

/// Outstanding debt by category.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Liabilities {
    #[serde(deserialize_with = "null_as_zero")]
    pub home_loan: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub personal_loan: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub car_loan: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub credit_card: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub other: f64,
}

impl Liabilities {
    pub fn fields(&self) -> [(&'static str, f64); 5] {
        [
            ("homeLoan", self.home_loan),
            ("personalLoan", self.personal_loan),
            ("carLoan", self.car_loan),
            ("creditCard", self.credit_card),
            ("other", self.other),
        ]
    }
}

/// Income lines. An absent line contributes nothing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Income {
    pub salary: Option<FinancialItem>,
    pub bonus: Option<FinancialItem>,
    pub business: Option<FinancialItem>,
    pub rental: Option<FinancialItem>,
    pub other: Option<FinancialItem>,
}

impl Income {
    pub fn items(&self) -> [(&'static str, Option<&FinancialItem>); 5] {
        [
            ("salary", self.salary.as_ref()),
            ("bonus", self.bonus.as_ref()),
            ("business", self.business.as_ref()),
            ("rental", self.rental.as_ref()),
            ("other", self.other.as_ref()),
        ]
    }
}

/// Expense lines, grouped loosely as housing/utilities, daily living,
/// personal/family, lifestyle and other.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Expenses {
    // Housing & utilities
    pub rent: Option<FinancialItem>,
    pub emi: Option<FinancialItem>,
    pub maintenance: Option<FinancialItem>,
    pub utilities: Option<FinancialItem>,
    // Daily living
    pub groceries: Option<FinancialItem>,
    pub transport: Option<FinancialItem>,
    pub household_help: Option<FinancialItem>,
    pub mobile_internet: Option<FinancialItem>,
    // Personal & family
    pub education: Option<FinancialItem>,
    pub healthcare: Option<FinancialItem>,
    pub insurance_premium: Option<FinancialItem>,
    // Lifestyle
    pub dining_out: Option<FinancialItem>,
    pub entertainment: Option<FinancialItem>,
    pub shopping: Option<FinancialItem>,
    pub travel: Option<FinancialItem>,
    pub other: Option<FinancialItem>,
}

impl Expenses {
    pub fn items(&self) -> [(&'static str, Option<&FinancialItem>); 16] {
        [
            ("rent", self.rent.as_ref()),
            ("emi", self.emi.as_ref()),
            ("maintenance", self.maintenance.as_ref()),
            ("utilities", self.utilities.as_ref()),
            ("groceries", self.groceries.as_ref()),
            ("transport", self.transport.as_ref()),
            ("householdHelp", self.household_help.as_ref()),
            ("mobileInternet", self.mobile_internet.as_ref()),
            ("education", self.education.as_ref()),
            ("healthcare", self.healthcare.as_ref()),
            ("insurancePremium", self.insurance_premium.as_ref()),
            ("diningOut", self.dining_out.as_ref()),
            ("entertainment", self.entertainment.as_ref()),
            ("shopping", self.shopping.as_ref()),
            ("travel", self.travel.as_ref()),
            ("other", self.other.as_ref()),
        ]
    }
}

/// Sum assured per insurance kind.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Insurance {
    #[serde(deserialize_with = "null_as_zero")]
    pub life: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub health: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub car: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub property: f64,
}

impl Insurance {
    pub fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("life", self.life),
            ("health", self.health),
            ("car", self.car),
            ("property", self.property),
        ]
    }
}

/// A user's complete financial picture at one point in time.
///
/// Partially populated records are valid: any missing field reads as 0.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Financials {
    pub assets: Assets,
    pub liabilities: Liabilities,
    pub income: Income,
    pub expenses: Expenses,
    pub insurance: Insurance,
}

impl Financials {
    /// Every raw numeric value in the record, labelled `section.field`.
    /// Used for input validation.
    pub fn labelled_values(&self) -> Vec<(String, f64)> {
        let mut values = Vec::new();
        for (name, v) in self.assets.fields() {
            values.push((format!("assets.{name}"), v));
        }
        for (name, v) in self.liabilities.fields() {
            values.push((format!("liabilities.{name}"), v));
        }
        for (name, item) in self.income.items() {
            if let Some(item) = item {
                values.push((format!("income.{name}"), item.value));
            }
        }
        for (name, item) in self.expenses.items() {
            if let Some(item) = item {
                values.push((format!("expenses.{name}"), item.value));
            }
        }
        for (name, v) in self.insurance.fields() {
            values.push((format!("insurance.{name}"), v));
        }
        values
    }
}

/// Financials captured on a given date. Stored per user to drive trend views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    pub date: NaiveDate,
    pub financials: Financials,
}

/// Amounts sent as JSON `null` read as 0, same as absent ones.
fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}
