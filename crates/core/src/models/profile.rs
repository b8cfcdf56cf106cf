use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Money personality chosen by the user during onboarding.
///
/// Deserialization accepts the same spellings as `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Persona {
    Guardian,
    Planner,
    Adventurer,
    Spender,
    Seeker,
    Accumulator,
}

/// Risk appetite implied by a persona, used by the allocation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskAppetite {
    Low,
    High,
    /// No persona-based expectation; the age rule applies.
    Neutral,
}

impl Persona {
    pub const ALL: [Persona; 6] = [
        Persona::Guardian,
        Persona::Planner,
        Persona::Adventurer,
        Persona::Spender,
        Persona::Seeker,
        Persona::Accumulator,
    ];

    pub fn risk_appetite(&self) -> RiskAppetite {
        match self {
            Persona::Guardian | Persona::Spender => RiskAppetite::Low,
            Persona::Adventurer | Persona::Accumulator => RiskAppetite::High,
            Persona::Planner | Persona::Seeker => RiskAppetite::Neutral,
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Persona::Guardian => write!(f, "Guardian"),
            Persona::Planner => write!(f, "Planner"),
            Persona::Adventurer => write!(f, "Adventurer"),
            Persona::Spender => write!(f, "Spender"),
            Persona::Seeker => write!(f, "Seeker"),
            Persona::Accumulator => write!(f, "Accumulator"),
        }
    }
}

impl std::str::FromStr for Persona {
    type Err = CoreError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Persona::ALL
            .into_iter()
            .find(|p| p.to_string().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::ValidationError(format!("Unknown persona '{s}'")))
    }
}

impl TryFrom<String> for Persona {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Account role. Advisors see aggregated data for their linked clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Client,
    Advisor,
}

/// Per-user demographic data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: String,

    /// Preferred source of age when present.
    pub date_of_birth: Option<NaiveDate>,

    /// Age as entered by the user. Treated as current on whatever date
    /// metrics are requested for; only history shifts it, relative to the
    /// reference date passed to `age_on`.
    pub age: Option<u32>,

    pub persona: Option<Persona>,

    pub role: Role,

    /// User id of the advisor this client is linked to, if any.
    pub advisor_id: Option<String>,
}

impl UserProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Age on `date`.
    ///
    /// With a date of birth this is exact. Otherwise the stored `age` is taken
    /// to be current as of `reference` and shifted by the whole years between
    /// `reference` and `date`.
    pub fn age_on(&self, date: NaiveDate, reference: NaiveDate) -> Option<u32> {
        if let Some(dob) = self.date_of_birth {
            let years = full_years_between(dob, date);
            return u32::try_from(years).ok();
        }

        let age = i64::from(self.age?);
        let shifted = if date <= reference {
            age - full_years_between(date, reference)
        } else {
            age + full_years_between(reference, date)
        };
        u32::try_from(shifted).ok()
    }

    /// Engine input for a computation dated `date`.
    pub fn demographics_on(&self, date: NaiveDate, reference: NaiveDate) -> Demographics {
        Demographics {
            age: self.age_on(date, reference),
            persona: self.persona,
        }
    }
}

/// Whole years from `from` to `to`. Negative when `to` precedes `from`.
fn full_years_between(from: NaiveDate, to: NaiveDate) -> i64 {
    if to < from {
        return -full_years_between(to, from);
    }
    let mut years = i64::from(to.year() - from.year());
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    years
}

/// The subset of a profile the metrics engine depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Demographics {
    pub age: Option<u32>,
    pub persona: Option<Persona>,
}

impl Demographics {
    pub fn new(age: u32, persona: Option<Persona>) -> Self {
        Self {
            age: Some(age),
            persona,
        }
    }
}
