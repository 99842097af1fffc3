//! Plain-text and JSON rendering of calculation results.

use std::fmt::Write;

use paycalc_core::calculations::{MortgagePayment, PaymentFrequency};
use paycalc_core::{CalculationError, PayPeriods, TableSet, TaxResult};
use rust_decimal::Decimal;
use serde::Serialize;

const LABEL_WIDTH: usize = 28;
const VALUE_WIDTH: usize = 14;

fn money(value: Decimal) -> String {
    format!("{value:.2}")
}

fn percent(rate: Decimal) -> String {
    format!("{:.2}%", rate * Decimal::ONE_HUNDRED)
}

fn line(
    out: &mut String,
    label: &str,
    value: String,
) {
    let _ = writeln!(out, "{label:<LABEL_WIDTH$}{value:>VALUE_WIDTH$}");
}

fn periods(
    out: &mut String,
    label: &str,
    periods: PayPeriods,
) {
    let _ = writeln!(
        out,
        "{label:<LABEL_WIDTH$}{:>VALUE_WIDTH$}{:>VALUE_WIDTH$}{:>VALUE_WIDTH$}",
        money(periods.annual),
        money(periods.monthly),
        money(periods.bi_weekly),
    );
}

/// Multi-line breakdown of a single calculation.
pub fn render_tax(result: &TaxResult) -> String {
    let mut out = String::new();
    let tables = &result.tables;
    let _ = writeln!(
        out,
        "Province {}, tax year {}",
        result.province, tables.requested_year
    );
    if tables.used_fallback() {
        let _ = writeln!(
            out,
            "Tables used: federal {}, provincial {}, statutory {}, limits {}",
            tables.federal_year, tables.provincial_year, tables.statutory_year, tables.limits_year
        );
    }
    out.push('\n');

    line(&mut out, "Gross income", money(result.gross_income));
    line(
        &mut out,
        "Retirement contribution",
        money(result.retirement_contribution),
    );
    line(&mut out, "Taxable income", money(result.taxable_income));
    out.push('\n');

    line(&mut out, "Federal tax", money(result.federal_tax));
    line(&mut out, "Provincial tax", money(result.provincial_tax));
    line(&mut out, "Total tax", money(result.total_tax));
    line(&mut out, "Pension contribution", money(result.pension_contribution));
    line(
        &mut out,
        "Insurance contribution",
        money(result.insurance_contribution),
    );
    out.push('\n');

    line(&mut out, "Federal rate", percent(result.federal_rate));
    line(&mut out, "Provincial rate", percent(result.provincial_rate));
    line(&mut out, "Effective rate", percent(result.effective_rate));
    line(
        &mut out,
        "Marginal rate",
        percent(result.federal_marginal_rate + result.provincial_marginal_rate),
    );
    out.push('\n');

    line(
        &mut out,
        "Tax-free contribution",
        money(result.tax_free_contribution),
    );
    for deduction in &result.deductions {
        line(&mut out, &format!("  {}", deduction.name), money(deduction.amount));
    }
    line(&mut out, "Total deductions", money(result.total_deductions));
    out.push('\n');

    let _ = writeln!(
        out,
        "{:<LABEL_WIDTH$}{:>VALUE_WIDTH$}{:>VALUE_WIDTH$}{:>VALUE_WIDTH$}",
        "", "annual", "monthly", "bi-weekly"
    );
    periods(&mut out, "Net income", result.net_income_periods());
    periods(&mut out, "Take-home pay", result.take_home_periods());

    if result.has_warnings() {
        out.push('\n');
        for warning in &result.warnings {
            let _ = writeln!(out, "warning: {warning}");
        }
    }
    out
}

fn frequency_label(frequency: PaymentFrequency) -> &'static str {
    match frequency {
        PaymentFrequency::Monthly => "monthly",
        PaymentFrequency::BiWeekly => "bi-weekly",
        PaymentFrequency::Annual => "annual",
    }
}

pub fn render_mortgage(payment: &MortgagePayment) -> String {
    let mut out = String::new();
    line(&mut out, "Principal", money(payment.principal));
    line(&mut out, "Monthly payment", money(payment.monthly));
    line(&mut out, "Bi-weekly payment", money(payment.bi_weekly));
    line(&mut out, "Annual payment", money(payment.annual));
    line(&mut out, "Total paid", money(payment.total_paid));
    line(&mut out, "Total interest", money(payment.total_interest));
    out.push('\n');
    line(
        &mut out,
        &format!("Payment ({})", frequency_label(payment.frequency)),
        money(payment.selected()),
    );
    out
}

fn join_years(years: impl Iterator<Item = i32>) -> String {
    years.map(|y| y.to_string()).collect::<Vec<_>>().join(", ")
}

/// Years on record per table, one line per jurisdiction or table.
pub fn render_tables(tables: &TableSet) -> String {
    let mut out = String::new();
    let mut current: Option<String> = None;

    let _ = writeln!(out, "Tax brackets:");
    for (jurisdiction, year, schedule) in tables.bracket_tables() {
        let code = jurisdiction.code().to_string();
        if current.as_ref() != Some(&code) {
            if current.is_some() {
                out.push('\n');
            }
            let _ = write!(out, "  {code:<4}");
            current = Some(code);
        }
        let _ = write!(out, " {year} ({} brackets)", schedule.brackets().len());
    }
    if current.is_some() {
        out.push('\n');
    }

    let _ = writeln!(out, "Statutory rates: {}", join_years(tables.statutory_years()));
    let _ = writeln!(
        out,
        "Contribution limits: {}",
        join_years(tables.contribution_limit_years())
    );

    let _ = writeln!(out, "Minimum wages:");
    for (province, year, rate) in tables.minimum_wage_entries() {
        let _ = writeln!(out, "  {:<4} {year} {}", province.as_str(), money(rate));
    }
    out
}

/// One batch row, as serialised for `--json`.
#[derive(Debug, Serialize)]
pub struct BatchEntry<'a> {
    pub row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<&'a TaxResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> BatchEntry<'a> {
    pub fn new(
        row: usize,
        outcome: &'a Result<TaxResult, CalculationError>,
    ) -> Self {
        match outcome {
            Ok(result) => Self {
                row,
                result: Some(result),
                error: None,
            },
            Err(err) => Self {
                row,
                result: None,
                error: Some(err.to_string()),
            },
        }
    }
}

/// Summary table for a batch run.
pub fn render_batch(entries: &[BatchEntry<'_>]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<4}{:>6}{:>VALUE_WIDTH$}{:>VALUE_WIDTH$}{:>VALUE_WIDTH$}{:>VALUE_WIDTH$}",
        "row", "prov", "year", "gross", "total tax", "net", "take-home"
    );
    for entry in entries {
        match (entry.result, &entry.error) {
            (Some(result), _) => {
                let _ = writeln!(
                    out,
                    "{:>4}  {:<4}{:>6}{:>VALUE_WIDTH$}{:>VALUE_WIDTH$}{:>VALUE_WIDTH$}{:>VALUE_WIDTH$}",
                    entry.row,
                    result.province.as_str(),
                    result.tables.requested_year,
                    money(result.gross_income),
                    money(result.total_tax),
                    money(result.net_income),
                    money(result.take_home),
                );
                for warning in &result.warnings {
                    let _ = writeln!(out, "      warning: {warning}");
                }
            }
            (None, Some(error)) => {
                let _ = writeln!(out, "{:>4}  error: {error}", entry.row);
            }
            (None, None) => {}
        }
    }
    out
}

/// Pretty-printed JSON for any serialisable report.
///
/// # Errors
///
/// Propagates serialisation failures.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
