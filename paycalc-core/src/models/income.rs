use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Weeks per year used to annualise weekly figures.
pub const WEEKS_PER_YEAR: Decimal = Decimal::from_parts(52, 0, 0, false, 0);

/// Base salary, either stated annually or as an hourly wage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum IncomeSpec {
    Annual {
        amount: Decimal,
    },
    Hourly {
        rate: Decimal,
        hours_per_week: Decimal,
    },
}

impl IncomeSpec {
    /// Hourly wage when the income was stated hourly.
    pub fn hourly_rate(&self) -> Option<Decimal> {
        match self {
            Self::Annual { .. } => None,
            Self::Hourly { rate, .. } => Some(*rate),
        }
    }
}

/// An addition to the base salary.
///
/// Percentage bonuses scale the base annual income; the other kinds are
/// weekly amounts annualised over [`WEEKS_PER_YEAR`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BonusEntry {
    /// `percent` of the base annual income (10 means 10%).
    Percentage { percent: Decimal },
    /// Premium per hour, paid on `hours` hours each week.
    HourlyPremium { amount: Decimal, hours: Decimal },
    /// Allowance per unit of distance, `distance` units each week.
    TravelAllowance { amount: Decimal, distance: Decimal },
}
