//! Value parsers for the compact command-line forms.
//!
//! | Flag          | Forms |
//! |---------------|-------|
//! | `--bonus`     | `percentage:10`, `premium:<per hour>:<hours per week>`, `travel:<per unit>:<units per week>` |
//! | `--rrsp`, `--tfsa` | `percent:5`, `amount:3000` |
//! | `--deduction` | `<name>:percent:2`, `<name>:amount:500` |
//! | `--frequency` | `monthly`, `bi-weekly`, `annual` |

use std::str::FromStr;

use paycalc_core::calculations::PaymentFrequency;
use paycalc_core::{AmountKind, BonusEntry, ContributionSpec, DeductionEntry, ProvinceCode};
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgError {
    #[error("unknown province '{0}'")]
    UnknownProvince(String),

    #[error("expected {expected}, got '{value}'")]
    Malformed {
        expected: &'static str,
        value: String,
    },

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("unknown kind '{0}'; expected percent or amount")]
    UnknownAmountKind(String),

    #[error("unknown payment frequency '{0}'")]
    UnknownFrequency(String),
}

fn number(value: &str) -> Result<Decimal, ArgError> {
    Decimal::from_str(value.trim()).map_err(|_| ArgError::InvalidNumber(value.to_string()))
}

fn amount_kind(value: &str) -> Result<AmountKind, ArgError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "percent" | "percentage" | "pct" => Ok(AmountKind::Percentage),
        "amount" | "fixed" => Ok(AmountKind::FixedAmount),
        _ => Err(ArgError::UnknownAmountKind(value.to_string())),
    }
}

pub fn parse_province(value: &str) -> Result<ProvinceCode, ArgError> {
    ProvinceCode::parse(value).ok_or_else(|| ArgError::UnknownProvince(value.to_string()))
}

pub fn parse_bonus(value: &str) -> Result<BonusEntry, ArgError> {
    let parts: Vec<&str> = value.split(':').collect();
    match parts.as_slice() {
        [kind, percent] if kind.eq_ignore_ascii_case("percentage") => {
            Ok(BonusEntry::Percentage {
                percent: number(percent)?,
            })
        }
        [kind, amount, hours] if kind.eq_ignore_ascii_case("premium") => {
            Ok(BonusEntry::HourlyPremium {
                amount: number(amount)?,
                hours: number(hours)?,
            })
        }
        [kind, amount, distance] if kind.eq_ignore_ascii_case("travel") => {
            Ok(BonusEntry::TravelAllowance {
                amount: number(amount)?,
                distance: number(distance)?,
            })
        }
        _ => Err(ArgError::Malformed {
            expected: "percentage:<pct>, premium:<amount>:<hours> or travel:<amount>:<distance>",
            value: value.to_string(),
        }),
    }
}

pub fn parse_contribution(value: &str) -> Result<ContributionSpec, ArgError> {
    let Some((kind, amount)) = value.split_once(':') else {
        return Err(ArgError::Malformed {
            expected: "percent:<pct> or amount:<dollars>",
            value: value.to_string(),
        });
    };
    Ok(ContributionSpec {
        kind: amount_kind(kind)?,
        amount: number(amount)?,
    })
}

pub fn parse_deduction(value: &str) -> Result<DeductionEntry, ArgError> {
    let mut parts = value.rsplitn(3, ':');
    let (Some(amount), Some(kind), Some(name)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(ArgError::Malformed {
            expected: "<name>:percent:<pct> or <name>:amount:<dollars>",
            value: value.to_string(),
        });
    };
    Ok(DeductionEntry {
        name: name.trim().to_string(),
        kind: amount_kind(kind)?,
        amount: number(amount)?,
        description: None,
    })
}

pub fn parse_frequency(value: &str) -> Result<PaymentFrequency, ArgError> {
    match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
        "monthly" => Ok(PaymentFrequency::Monthly),
        "bi-weekly" | "biweekly" => Ok(PaymentFrequency::BiWeekly),
        "annual" | "yearly" => Ok(PaymentFrequency::Annual),
        _ => Err(ArgError::UnknownFrequency(value.to_string())),
    }
}
