use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::deduction::ResolvedDeduction;
use super::jurisdiction::ProvinceCode;
use super::warning::ValidationWarning;

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);
const BI_WEEKLY_PERIODS: Decimal = Decimal::from_parts(26, 0, 0, false, 0);

/// The tax year whose table was actually used for each lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableProvenance {
    pub requested_year: i32,
    pub federal_year: i32,
    pub provincial_year: i32,
    pub statutory_year: i32,
    pub limits_year: i32,
}

impl TableProvenance {
    /// True when any table came from a year other than the one requested.
    pub fn used_fallback(&self) -> bool {
        [
            self.federal_year,
            self.provincial_year,
            self.statutory_year,
            self.limits_year,
        ]
        .iter()
        .any(|&year| year != self.requested_year)
    }
}

/// An annual figure split into pay periods for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriods {
    pub annual: Decimal,
    pub monthly: Decimal,
    pub bi_weekly: Decimal,
}

impl PayPeriods {
    pub fn from_annual(annual: Decimal) -> Self {
        Self {
            annual,
            monthly: crate::calculations::common::round_half_up(annual / MONTHS_PER_YEAR),
            bi_weekly: crate::calculations::common::round_half_up(annual / BI_WEEKLY_PERIODS),
        }
    }
}

/// Full breakdown of one payroll tax calculation.
///
/// Annual figures are authoritative; see [`TaxResult::take_home_periods`]
/// for per-period views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub province: ProvinceCode,
    pub tables: TableProvenance,

    pub gross_income: Decimal,
    pub retirement_contribution: Decimal,
    pub taxable_income: Decimal,

    pub federal_tax: Decimal,
    pub provincial_tax: Decimal,
    pub total_tax: Decimal,

    pub pension_contribution: Decimal,
    pub insurance_contribution: Decimal,

    /// Rates are fractions of taxable income (0.25 means 25%).
    pub federal_rate: Decimal,
    pub provincial_rate: Decimal,
    pub effective_rate: Decimal,
    pub federal_marginal_rate: Decimal,
    pub provincial_marginal_rate: Decimal,

    pub tax_free_contribution: Decimal,
    pub deductions: Vec<ResolvedDeduction>,
    pub total_deductions: Decimal,

    /// Taxable income less income tax and statutory contributions.
    pub net_income: Decimal,
    /// Net income less the tax-free contribution and all deductions.
    pub take_home: Decimal,

    pub warnings: Vec<ValidationWarning>,
}

impl TaxResult {
    pub fn net_income_periods(&self) -> PayPeriods {
        PayPeriods::from_annual(self.net_income)
    }

    pub fn take_home_periods(&self) -> PayPeriods {
        PayPeriods::from_annual(self.take_home)
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
