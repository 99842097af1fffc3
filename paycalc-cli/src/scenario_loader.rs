//! CSV loader for batch payroll scenarios.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter.
//!
//! | Column           | Required | Type    | Notes |
//! |------------------|----------|---------|-------|
//! | `province`       | yes      | string  | Two-letter code, e.g. `QC` |
//! | `tax_year`       | yes      | integer | e.g. `2025` |
//! | `annual_income`  | one of   | decimal | Annual salary |
//! | `hourly_rate`    | one of   | decimal | Requires `hours_per_week` |
//! | `hours_per_week` | with `hourly_rate` | decimal | |
//! | `rrsp_percent`   | no       | decimal | At most one of `rrsp_percent` / `rrsp_amount` |
//! | `rrsp_amount`    | no       | decimal | |
//! | `tfsa_percent`   | no       | decimal | At most one of `tfsa_percent` / `tfsa_amount` |
//! | `tfsa_amount`    | no       | decimal | |
//!
//! Leave a cell empty for "not set".
//!
//! ### Example
//!
//! ```csv
//! province,tax_year,annual_income,hourly_rate,hours_per_week,rrsp_percent,rrsp_amount,tfsa_percent,tfsa_amount
//! QC,2025,85000,,,5,,,3000
//! ON,2025,,22.50,37.5,,,,
//! ```

use std::path::{Path, PathBuf};

use paycalc_core::{ContributionSpec, IncomeSpec, ProvinceCode, TaxInput, VoluntaryContributions};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CsvRow {
    province: String,
    tax_year: i32,
    #[serde(default)]
    annual_income: Option<Decimal>,
    #[serde(default)]
    hourly_rate: Option<Decimal>,
    #[serde(default)]
    hours_per_week: Option<Decimal>,
    #[serde(default)]
    rrsp_percent: Option<Decimal>,
    #[serde(default)]
    rrsp_amount: Option<Decimal>,
    #[serde(default)]
    tfsa_percent: Option<Decimal>,
    #[serde(default)]
    tfsa_amount: Option<Decimal>,
}

/// Errors that can occur while loading or converting scenario rows.
///
/// `row` is 1-based, excluding the header.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioLoadError {
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("unrecognised province '{province}' on row {row}")]
    InvalidProvince { province: String, row: usize },

    #[error("row {row} needs either annual_income or hourly_rate with hours_per_week")]
    MissingIncome { row: usize },

    #[error("row {row} sets both annual_income and hourly_rate")]
    AmbiguousIncome { row: usize },

    #[error("row {row} sets both {plan}_percent and {plan}_amount")]
    AmbiguousContribution { plan: &'static str, row: usize },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn contribution(
    plan: &'static str,
    percent: Option<Decimal>,
    amount: Option<Decimal>,
    row: usize,
) -> Result<Option<ContributionSpec>, ScenarioLoadError> {
    match (percent, amount) {
        (Some(_), Some(_)) => Err(ScenarioLoadError::AmbiguousContribution { plan, row }),
        (Some(percent), None) => Ok(Some(ContributionSpec::percentage(percent))),
        (None, Some(amount)) => Ok(Some(ContributionSpec::fixed(amount))),
        (None, None) => Ok(None),
    }
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<TaxInput, ScenarioLoadError> {
    let province =
        ProvinceCode::parse(&row.province).ok_or_else(|| ScenarioLoadError::InvalidProvince {
            province: row.province.clone(),
            row: row_number,
        })?;

    let income = match (row.annual_income, row.hourly_rate, row.hours_per_week) {
        (Some(_), Some(_), _) => {
            return Err(ScenarioLoadError::AmbiguousIncome { row: row_number });
        }
        (Some(amount), None, _) => IncomeSpec::Annual { amount },
        (None, Some(rate), Some(hours_per_week)) => IncomeSpec::Hourly {
            rate,
            hours_per_week,
        },
        (None, _, _) => return Err(ScenarioLoadError::MissingIncome { row: row_number }),
    };

    let mut input = TaxInput::new(province, row.tax_year, income);
    input.contributions = VoluntaryContributions {
        retirement: contribution("rrsp", row.rrsp_percent, row.rrsp_amount, row_number)?,
        tax_free: contribution("tfsa", row.tfsa_percent, row.tfsa_amount, row_number)?,
    };
    Ok(input)
}

/// Parse CSV text and return one [`TaxInput`] per row, in file order.
///
/// # Errors
///
/// * [`ScenarioLoadError::Parse`] if the CSV is structurally invalid.
/// * The other variants when a row cannot be turned into a scenario.
pub fn load_from_str(input: &str) -> Result<Vec<TaxInput>, ScenarioLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Read a file from disk and delegate to [`load_from_str`].
///
/// # Errors
///
/// [`ScenarioLoadError::Io`] when the file cannot be read, otherwise as
/// [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<TaxInput>, ScenarioLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ScenarioLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}
