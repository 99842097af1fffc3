use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether an amount is a percentage of income or a dollar figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountKind {
    Percentage,
    FixedAmount,
}

/// A requested voluntary contribution to one savings plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionSpec {
    pub kind: AmountKind,
    pub amount: Decimal,
}

impl ContributionSpec {
    pub fn percentage(percent: Decimal) -> Self {
        Self {
            kind: AmountKind::Percentage,
            amount: percent,
        }
    }

    pub fn fixed(amount: Decimal) -> Self {
        Self {
            kind: AmountKind::FixedAmount,
            amount,
        }
    }
}

/// Retirement-plan and tax-free-savings requests; either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoluntaryContributions {
    #[serde(default)]
    pub retirement: Option<ContributionSpec>,
    #[serde(default)]
    pub tax_free: Option<ContributionSpec>,
}
