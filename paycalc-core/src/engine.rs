//! The payroll tax calculation pipeline.
//!
//! # Steps
//!
//! | Step | Value |
//! |------|-------|
//! | 1    | Gross income: base salary plus bonuses |
//! | 2    | Retirement contribution, resolved against gross income |
//! | 3    | Taxable income: gross − retirement contribution |
//! | 4    | Federal and provincial tax, each on the same taxable income |
//! | 5    | Pension- and insurance-style contributions on taxable income |
//! | 6    | Tax-free savings contribution (does not change taxable income) |
//! | 7    | Deductions, resolved against gross income |
//! | 8    | Net income: taxable − taxes − statutory contributions |
//! | 9    | Take-home: net − tax-free contribution − deductions |
//! | 10   | Federal, provincial and effective rates over taxable income |
//!
//! The order is significant: the retirement contribution reduces the tax
//! base while the tax-free contribution and deductions only reduce pay.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::{
    StatutoryContributions, base_annual_income, bonus_amount, check_minimum_wage,
    compute_annual_gross_income, compute_bracket_tax, marginal_rate, resolve_deductions, resolve_retirement_contribution,
    resolve_tax_free_contribution,
};
use crate::calculations::common::ratio_or_zero;
use crate::tables::{ConfigurationError, Resolved, TableProvider};
use crate::{
    AmountKind, BonusEntry, ContributionSpec, IncomeSpec, Jurisdiction, TableKind,
    TableProvenance, TaxInput, TaxResult, ValidationWarning,
};

const MAX_HOURS_PER_WEEK: Decimal = Decimal::from_parts(168, 0, 0, false, 0);

/// Ceiling for every input amount and for the annual gross income: one
/// trillion. Keeps all later arithmetic well inside `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Malformed caller input, rejected before any computation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: String, value: Decimal },

    #[error("{field} must be a percentage between 0 and 100, got {value}")]
    PercentageOutOfRange { field: String, value: Decimal },

    #[error("{field} must not exceed {max}, got {value}", max = MAX_AMOUNT)]
    TooLarge { field: String, value: Decimal },

    #[error("hours per week must be between 0 and 168, got {0}")]
    HoursOutOfRange(Decimal),

    #[error("deduction name must not be empty")]
    EmptyDeductionName,
}

/// Everything that can stop a calculation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalculationError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("invalid input: {0}")]
    Input(#[from] InputError),
}

fn non_negative(
    field: impl Into<String>,
    value: Decimal,
) -> Result<(), InputError> {
    if value < Decimal::ZERO {
        return Err(InputError::Negative {
            field: field.into(),
            value,
        });
    }
    at_most_max(field, value)
}

fn at_most_max(
    field: impl Into<String>,
    value: Decimal,
) -> Result<(), InputError> {
    if value > MAX_AMOUNT {
        return Err(InputError::TooLarge {
            field: field.into(),
            value,
        });
    }
    Ok(())
}

fn percentage(
    field: impl Into<String>,
    value: Decimal,
) -> Result<(), InputError> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(InputError::PercentageOutOfRange {
            field: field.into(),
            value,
        });
    }
    Ok(())
}

fn validate_amount(
    field: &str,
    kind: AmountKind,
    amount: Decimal,
) -> Result<(), InputError> {
    match kind {
        AmountKind::Percentage => percentage(field, amount),
        AmountKind::FixedAmount => non_negative(field, amount),
    }
}

fn validate_contribution(
    field: &str,
    spec: Option<&ContributionSpec>,
) -> Result<(), InputError> {
    match spec {
        Some(spec) => validate_amount(field, spec.kind, spec.amount),
        None => Ok(()),
    }
}

/// Checks every numeric field of `input`.
///
/// # Errors
///
/// Returns [`InputError`] for negative amounts, amounts or a gross income
/// above [`MAX_AMOUNT`], percentages outside 0 to 100, weekly hours outside
/// 0 to 168, or an unnamed deduction.
pub fn validate_input(input: &TaxInput) -> Result<(), InputError> {
    match &input.income {
        IncomeSpec::Annual { amount } => non_negative("annual income", *amount)?,
        IncomeSpec::Hourly {
            rate,
            hours_per_week,
        } => {
            non_negative("hourly rate", *rate)?;
            if *hours_per_week < Decimal::ZERO || *hours_per_week > MAX_HOURS_PER_WEEK {
                return Err(InputError::HoursOutOfRange(*hours_per_week));
            }
        }
    }

    for (index, bonus) in input.bonuses.iter().enumerate() {
        match bonus {
            BonusEntry::Percentage { percent } => {
                non_negative(format!("bonus {index} percent"), *percent)?;
            }
            BonusEntry::HourlyPremium { amount, hours } => {
                non_negative(format!("bonus {index} amount"), *amount)?;
                non_negative(format!("bonus {index} hours"), *hours)?;
            }
            BonusEntry::TravelAllowance { amount, distance } => {
                non_negative(format!("bonus {index} amount"), *amount)?;
                non_negative(format!("bonus {index} distance"), *distance)?;
            }
        }
    }

    // Each term is bounded above, so the running total cannot overflow
    // before it crosses the ceiling.
    let base = base_annual_income(&input.income);
    at_most_max("base annual income", base)?;
    input.bonuses.iter().try_fold(base, |gross, bonus| {
        let gross = gross + bonus_amount(bonus, base);
        at_most_max("gross income", gross).map(|()| gross)
    })?;

    validate_contribution(
        "retirement contribution",
        input.contributions.retirement.as_ref(),
    )?;
    validate_contribution(
        "tax-free contribution",
        input.contributions.tax_free.as_ref(),
    )?;

    for deduction in &input.deductions {
        if deduction.name.trim().is_empty() {
            return Err(InputError::EmptyDeductionName);
        }
        validate_amount(
            &format!("deduction '{}'", deduction.name),
            deduction.kind,
            deduction.amount,
        )?;
    }

    Ok(())
}

fn note_fallback<T>(
    resolved: &Resolved<T>,
    table: TableKind,
    warnings: &mut Vec<ValidationWarning>,
) {
    if resolved.is_fallback() {
        warn!(
            %table,
            requested_year = resolved.requested_year,
            used_year = resolved.year,
            "reference table missing for requested year; using fallback"
        );
        warnings.push(ValidationWarning::TableFallback {
            table,
            requested_year: resolved.requested_year,
            used_year: resolved.year,
        });
    }
}

/// Entry point for payroll tax calculations.
///
/// The calculator owns nothing but its table provider, so it can be shared
/// freely between threads; every call is independent.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use rust_decimal_macros::dec;
/// use paycalc_core::tables::TableSet;
/// use paycalc_core::{
///     ContributionLimits, IncomeSpec, Jurisdiction, ProvinceCode, StatutoryRates, TaxBracket,
///     TaxCalculator, TaxInput,
/// };
///
/// let mut builder = TableSet::builder();
/// builder
///     .add_brackets(Jurisdiction::Federal, 2025, vec![TaxBracket::new(dec!(0), None, dec!(0.15))])
///     .unwrap()
///     .add_brackets(
///         Jurisdiction::Provincial(ProvinceCode::Quebec),
///         2025,
///         vec![TaxBracket::new(dec!(0), None, dec!(0.14))],
///     )
///     .unwrap()
///     .add_statutory_rates(StatutoryRates {
///         tax_year: 2025,
///         pension_rate: dec!(0.064),
///         pension_exemption: dec!(3500),
///         pension_cap: dec!(4339.20),
///         insurance_rate: dec!(0.0131),
///         insurance_exemption: dec!(0),
///         insurance_cap: dec!(860.67),
///     })
///     .unwrap()
///     .add_contribution_limits(ContributionLimits {
///         tax_year: 2025,
///         retirement_cap: dec!(32490),
///         retirement_income_fraction: dec!(0.18),
///         tax_free_cap: dec!(7000),
///     })
///     .unwrap();
///
/// let calculator = TaxCalculator::new(Arc::new(builder.build()));
/// let input = TaxInput::new(
///     ProvinceCode::Quebec,
///     2025,
///     IncomeSpec::Annual { amount: dec!(40000) },
/// );
///
/// let result = calculator.calculate(&input).unwrap();
///
/// assert_eq!(result.federal_tax, dec!(6000));
/// assert_eq!(result.provincial_tax, dec!(5600));
/// ```
#[derive(Debug, Clone)]
pub struct TaxCalculator<P> {
    tables: P,
}

impl<P: TableProvider> TaxCalculator<P> {
    pub fn new(tables: P) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &P {
        &self.tables
    }

    /// Runs the full pipeline for `input`.
    ///
    /// # Errors
    ///
    /// * [`CalculationError::Input`] when the input fails [`validate_input`].
    /// * [`CalculationError::Configuration`] when a required table is missing
    ///   for every year.
    pub fn calculate(
        &self,
        input: &TaxInput,
    ) -> Result<TaxResult, CalculationError> {
        validate_input(input)?;

        let tables = self.tables.snapshot();
        let year = input.tax_year;
        let mut warnings = Vec::new();

        let federal = tables.brackets(Jurisdiction::Federal, year)?;
        let provincial = tables.brackets(Jurisdiction::Provincial(input.province), year)?;
        let statutory = tables.statutory_rates(year)?;
        let limits = tables.contribution_limits(year)?;

        note_fallback(&federal, TableKind::FederalBrackets, &mut warnings);
        note_fallback(&provincial, TableKind::ProvincialBrackets, &mut warnings);
        note_fallback(&statutory, TableKind::StatutoryRates, &mut warnings);
        note_fallback(&limits, TableKind::ContributionLimits, &mut warnings);

        if let Some(hourly_rate) = input.income.hourly_rate() {
            if let Some(floor) = tables.minimum_wage(input.province, year) {
                note_fallback(&floor, TableKind::MinimumWage, &mut warnings);
            }
            warnings.extend(check_minimum_wage(
                hourly_rate,
                input.province,
                year,
                &tables,
            ));
        }

        let gross_income = compute_annual_gross_income(&input.income, &input.bonuses);

        let retirement_contribution = resolve_retirement_contribution(
            input.contributions.retirement.as_ref(),
            gross_income,
            limits.value,
        );
        let taxable_income = gross_income - retirement_contribution;

        let federal_tax = compute_bracket_tax(taxable_income, federal.value);
        let provincial_tax = compute_bracket_tax(taxable_income, provincial.value);
        let total_tax = federal_tax + provincial_tax;

        let statutory_contributions = StatutoryContributions::compute(taxable_income, statutory.value);

        let tax_free_contribution = resolve_tax_free_contribution(
            input.contributions.tax_free.as_ref(),
            gross_income,
            limits.value,
        );

        let deductions = resolve_deductions(&input.deductions, gross_income);

        let net_income =
            taxable_income - federal_tax - provincial_tax - statutory_contributions.total();
        let take_home = net_income - tax_free_contribution - deductions.total;

        debug!(
            province = %input.province,
            year,
            %gross_income,
            %taxable_income,
            %federal_tax,
            %provincial_tax,
            %net_income,
            %take_home,
            "payroll tax calculated"
        );

        Ok(TaxResult {
            province: input.province,
            tables: TableProvenance {
                requested_year: year,
                federal_year: federal.year,
                provincial_year: provincial.year,
                statutory_year: statutory.year,
                limits_year: limits.year,
            },
            gross_income,
            retirement_contribution,
            taxable_income,
            federal_tax,
            provincial_tax,
            total_tax,
            pension_contribution: statutory_contributions.pension,
            insurance_contribution: statutory_contributions.insurance,
            federal_rate: ratio_or_zero(federal_tax, taxable_income),
            provincial_rate: ratio_or_zero(provincial_tax, taxable_income),
            effective_rate: ratio_or_zero(total_tax, taxable_income),
            federal_marginal_rate: marginal_rate(taxable_income, federal.value),
            provincial_marginal_rate: marginal_rate(taxable_income, provincial.value),
            tax_free_contribution,
            deductions: deductions.entries,
            total_deductions: deductions.total,
            net_income,
            take_home,
            warnings,
        })
    }
}
