use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::jurisdiction::ProvinceCode;

/// Which reference table a fallback warning refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    FederalBrackets,
    ProvincialBrackets,
    StatutoryRates,
    ContributionLimits,
    MinimumWage,
}

impl fmt::Display for TableKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            Self::FederalBrackets => "federal brackets",
            Self::ProvincialBrackets => "provincial brackets",
            Self::StatutoryRates => "statutory rates",
            Self::ContributionLimits => "contribution limits",
            Self::MinimumWage => "minimum wage",
        };
        f.write_str(name)
    }
}

/// Non-fatal advisory attached to a successful result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValidationWarning {
    BelowMinimumWage {
        province: ProvinceCode,
        tax_year: i32,
        hourly_rate: Decimal,
        minimum_wage: Decimal,
    },
    TableFallback {
        table: TableKind,
        requested_year: i32,
        used_year: i32,
    },
}

impl fmt::Display for ValidationWarning {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::BelowMinimumWage {
                province,
                tax_year,
                hourly_rate,
                minimum_wage,
            } => write!(
                f,
                "hourly rate {hourly_rate} is below the {province} minimum wage of {minimum_wage} for {tax_year}"
            ),
            Self::TableFallback {
                table,
                requested_year,
                used_year,
            } => write!(
                f,
                "no {table} for {requested_year}; using {used_year} values"
            ),
        }
    }
}
