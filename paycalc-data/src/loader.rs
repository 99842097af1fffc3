//! CSV loading of the reference tables.
//!
//! ## Files
//!
//! | File                      | Columns |
//! |---------------------------|---------|
//! | `tax_brackets.csv`        | `jurisdiction,tax_year,min_income,max_income,rate` |
//! | `statutory_rates.csv`     | `tax_year,pension_rate,pension_exemption,pension_cap,insurance_rate,insurance_exemption,insurance_cap` |
//! | `contribution_limits.csv` | `tax_year,retirement_cap,retirement_income_fraction,tax_free_cap` |
//! | `minimum_wages.csv`       | `province,tax_year,hourly_rate` |
//!
//! `jurisdiction` is `FED` for the federal schedule or a two-letter province
//! code. An empty `max_income` marks the unbounded top bracket. Rates are
//! fractions (`0.15` for 15%).
//!
//! A copy of every file is compiled into the crate; [`TableLoader::shipped`]
//! builds from those alone, while [`TableLoader::load_dir`] lets a directory
//! override any subset of them.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use paycalc_core::{
    ContributionLimits, Jurisdiction, ProvinceCode, StatutoryRates, TableError, TableSet,
    TaxBracket,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const BRACKETS_FILE: &str = "tax_brackets.csv";
pub const STATUTORY_RATES_FILE: &str = "statutory_rates.csv";
pub const CONTRIBUTION_LIMITS_FILE: &str = "contribution_limits.csv";
pub const MINIMUM_WAGES_FILE: &str = "minimum_wages.csv";

const SHIPPED_BRACKETS: &str = include_str!("../data/tax_brackets.csv");
const SHIPPED_STATUTORY_RATES: &str = include_str!("../data/statutory_rates.csv");
const SHIPPED_CONTRIBUTION_LIMITS: &str = include_str!("../data/contribution_limits.csv");
const SHIPPED_MINIMUM_WAGES: &str = include_str!("../data/minimum_wages.csv");

/// Errors that can occur when loading reference tables.
#[derive(Debug, Error)]
pub enum TableLoaderError {
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("unknown jurisdiction '{code}' on row {row}")]
    UnknownJurisdiction { code: String, row: usize },

    #[error("unknown province '{code}' on row {row}")]
    UnknownProvince { code: String, row: usize },

    #[error("invalid table: {0}")]
    Table(#[from] TableError),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Deserialize)]
struct BracketRow {
    jurisdiction: String,
    tax_year: i32,
    min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    max_income: Option<Decimal>,
    rate: Decimal,
}

#[derive(Debug, Deserialize)]
struct MinimumWageRow {
    province: String,
    tax_year: i32,
    hourly_rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// One row of `tax_brackets.csv` with its jurisdiction resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketRecord {
    pub jurisdiction: Jurisdiction,
    pub tax_year: i32,
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

/// One row of `minimum_wages.csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimumWageRecord {
    pub province: ProvinceCode,
    pub tax_year: i32,
    pub hourly_rate: Decimal,
}

/// Raw CSV text for each table file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSources {
    pub brackets: Cow<'static, str>,
    pub statutory_rates: Cow<'static, str>,
    pub contribution_limits: Cow<'static, str>,
    pub minimum_wages: Cow<'static, str>,
}

impl TableSources {
    /// The copies compiled into this crate.
    pub fn shipped() -> Self {
        Self {
            brackets: Cow::Borrowed(SHIPPED_BRACKETS),
            statutory_rates: Cow::Borrowed(SHIPPED_STATUTORY_RATES),
            contribution_limits: Cow::Borrowed(SHIPPED_CONTRIBUTION_LIMITS),
            minimum_wages: Cow::Borrowed(SHIPPED_MINIMUM_WAGES),
        }
    }

    /// Reads each file from `dir`, keeping the shipped copy for any file that
    /// does not exist there.
    ///
    /// # Errors
    ///
    /// [`TableLoaderError::Io`] when a file exists but cannot be read.
    pub fn from_dir(dir: &Path) -> Result<Self, TableLoaderError> {
        if !dir.is_dir() {
            warn!(dir = %dir.display(), "table directory not found; using shipped tables");
        }

        Ok(Self {
            brackets: read_or_shipped(dir, BRACKETS_FILE, SHIPPED_BRACKETS)?,
            statutory_rates: read_or_shipped(dir, STATUTORY_RATES_FILE, SHIPPED_STATUTORY_RATES)?,
            contribution_limits: read_or_shipped(
                dir,
                CONTRIBUTION_LIMITS_FILE,
                SHIPPED_CONTRIBUTION_LIMITS,
            )?,
            minimum_wages: read_or_shipped(dir, MINIMUM_WAGES_FILE, SHIPPED_MINIMUM_WAGES)?,
        })
    }
}

fn read_or_shipped(
    dir: &Path,
    file_name: &str,
    shipped: &'static str,
) -> Result<Cow<'static, str>, TableLoaderError> {
    let path = dir.join(file_name);
    match std::fs::read_to_string(&path) {
        Ok(contents) => {
            info!(path = %path.display(), "loaded table override");
            Ok(Cow::Owned(contents))
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no override; using shipped copy");
            Ok(Cow::Borrowed(shipped))
        }
        Err(source) => Err(TableLoaderError::Io { path, source }),
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader)
}

/// Parses the table files and assembles a validated [`TableSet`].
pub struct TableLoader;

impl TableLoader {
    /// Parse `tax_brackets.csv` rows in file order.
    ///
    /// # Errors
    ///
    /// * [`TableLoaderError::Parse`] for malformed rows.
    /// * [`TableLoaderError::UnknownJurisdiction`] for a code that is neither
    ///   `FED` nor a province. `row` is 1-based, excluding the header.
    pub fn parse_brackets<R: Read>(reader: R) -> Result<Vec<BracketRecord>, TableLoaderError> {
        csv_reader(reader)
            .deserialize::<BracketRow>()
            .enumerate()
            .map(|(idx, result)| {
                let row = result?;
                let jurisdiction = Jurisdiction::parse(&row.jurisdiction).ok_or_else(|| {
                    TableLoaderError::UnknownJurisdiction {
                        code: row.jurisdiction.clone(),
                        row: idx + 1,
                    }
                })?;
                Ok(BracketRecord {
                    jurisdiction,
                    tax_year: row.tax_year,
                    min_income: row.min_income,
                    max_income: row.max_income,
                    rate: row.rate,
                })
            })
            .collect()
    }

    /// # Errors
    ///
    /// [`TableLoaderError::Parse`] for malformed rows.
    pub fn parse_statutory_rates<R: Read>(
        reader: R
    ) -> Result<Vec<StatutoryRates>, TableLoaderError> {
        let mut records = Vec::new();
        for result in csv_reader(reader).deserialize() {
            let record: StatutoryRates = result?;
            records.push(record);
        }
        Ok(records)
    }

    /// # Errors
    ///
    /// [`TableLoaderError::Parse`] for malformed rows.
    pub fn parse_contribution_limits<R: Read>(
        reader: R
    ) -> Result<Vec<ContributionLimits>, TableLoaderError> {
        let mut records = Vec::new();
        for result in csv_reader(reader).deserialize() {
            let record: ContributionLimits = result?;
            records.push(record);
        }
        Ok(records)
    }

    /// # Errors
    ///
    /// * [`TableLoaderError::Parse`] for malformed rows.
    /// * [`TableLoaderError::UnknownProvince`] for an unrecognised code.
    pub fn parse_minimum_wages<R: Read>(
        reader: R
    ) -> Result<Vec<MinimumWageRecord>, TableLoaderError> {
        csv_reader(reader)
            .deserialize::<MinimumWageRow>()
            .enumerate()
            .map(|(idx, result)| {
                let row = result?;
                let province = ProvinceCode::parse(&row.province).ok_or_else(|| {
                    TableLoaderError::UnknownProvince {
                        code: row.province.clone(),
                        row: idx + 1,
                    }
                })?;
                Ok(MinimumWageRecord {
                    province,
                    tax_year: row.tax_year,
                    hourly_rate: row.hourly_rate,
                })
            })
            .collect()
    }

    /// Parse every source and validate the result.
    ///
    /// Bracket rows are grouped by jurisdiction and year and sorted by lower
    /// bound, so row order within a file does not matter.
    ///
    /// # Errors
    ///
    /// Any parse error, or [`TableLoaderError::Table`] when a table fails
    /// validation (gaps, overlaps, out-of-range rates, duplicates).
    pub fn build(sources: &TableSources) -> Result<TableSet, TableLoaderError> {
        let mut grouped: BTreeMap<(Jurisdiction, i32), Vec<TaxBracket>> = BTreeMap::new();
        for record in Self::parse_brackets(sources.brackets.as_bytes())? {
            grouped
                .entry((record.jurisdiction, record.tax_year))
                .or_default()
                .push(TaxBracket::new(
                    record.min_income,
                    record.max_income,
                    record.rate,
                ));
        }

        let mut builder = TableSet::builder();
        let bracket_tables = grouped.len();
        for ((jurisdiction, tax_year), mut brackets) in grouped {
            brackets.sort_by(|a, b| a.min_income.cmp(&b.min_income));
            builder.add_brackets(jurisdiction, tax_year, brackets)?;
        }

        let statutory = Self::parse_statutory_rates(sources.statutory_rates.as_bytes())?;
        let statutory_count = statutory.len();
        for rates in statutory {
            builder.add_statutory_rates(rates)?;
        }

        let limits = Self::parse_contribution_limits(sources.contribution_limits.as_bytes())?;
        let limits_count = limits.len();
        for limit in limits {
            builder.add_contribution_limits(limit)?;
        }

        let wages = Self::parse_minimum_wages(sources.minimum_wages.as_bytes())?;
        let wages_count = wages.len();
        for wage in wages {
            builder.add_minimum_wage(wage.province, wage.tax_year, wage.hourly_rate)?;
        }

        info!(
            bracket_tables,
            statutory_years = statutory_count,
            limit_years = limits_count,
            minimum_wages = wages_count,
            "reference tables loaded"
        );
        Ok(builder.build())
    }

    /// Tables built from the shipped copies only.
    ///
    /// # Errors
    ///
    /// Only if the shipped data itself is invalid.
    pub fn shipped() -> Result<TableSet, TableLoaderError> {
        Self::build(&TableSources::shipped())
    }

    /// Tables from `dir`, falling back file by file to the shipped copies.
    ///
    /// # Errors
    ///
    /// See [`TableSources::from_dir`] and [`TableLoader::build`].
    pub fn load_dir(dir: &Path) -> Result<TableSet, TableLoaderError> {
        Self::build(&TableSources::from_dir(dir)?)
    }
}

#[cfg(test)]
mod tests {
    use paycalc_core::BracketError;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const BRACKETS_CSV: &str = "\
jurisdiction,tax_year,min_income,max_income,rate
FED,2025,0,50000,0.15
FED,2025,50000,,0.20
QC,2025,0,,0.14
";

    const STATUTORY_CSV: &str = "\
tax_year,pension_rate,pension_exemption,pension_cap,insurance_rate,insurance_exemption,insurance_cap
2025,0.064,3500,4339.20,0.0131,0,860.67
";

    const LIMITS_CSV: &str = "\
tax_year,retirement_cap,retirement_income_fraction,tax_free_cap
2025,32490,0.18,7000
";

    const WAGES_CSV: &str = "\
province,tax_year,hourly_rate
QC,2025,16.10
";

    fn sources(brackets: &'static str) -> TableSources {
        TableSources {
            brackets: Cow::Borrowed(brackets),
            statutory_rates: Cow::Borrowed(STATUTORY_CSV),
            contribution_limits: Cow::Borrowed(LIMITS_CSV),
            minimum_wages: Cow::Borrowed(WAGES_CSV),
        }
    }

    // =========================================================================
    // parse tests
    // =========================================================================

    #[test]
    fn parse_brackets_resolves_jurisdictions() {
        let records = TableLoader::parse_brackets(BRACKETS_CSV.as_bytes()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0],
            BracketRecord {
                jurisdiction: Jurisdiction::Federal,
                tax_year: 2025,
                min_income: dec!(0),
                max_income: Some(dec!(50000)),
                rate: dec!(0.15),
            }
        );
        assert_eq!(records[1].max_income, None);
        assert_eq!(
            records[2].jurisdiction,
            Jurisdiction::Provincial(ProvinceCode::Quebec)
        );
    }

    #[test]
    fn parse_brackets_rejects_unknown_jurisdiction() {
        let csv = "jurisdiction,tax_year,min_income,max_income,rate\nFED,2025,0,,0.15\nXX,2025,0,,0.10";

        let err = TableLoader::parse_brackets(csv.as_bytes()).unwrap_err();

        match err {
            TableLoaderError::UnknownJurisdiction { code, row } => {
                assert_eq!(code, "XX");
                assert_eq!(row, 2);
            }
            other => panic!("expected UnknownJurisdiction, got {other:?}"),
        }
    }

    #[test]
    fn parse_brackets_rejects_bad_decimal() {
        let csv = "jurisdiction,tax_year,min_income,max_income,rate\nFED,2025,abc,,0.15";

        let err = TableLoader::parse_brackets(csv.as_bytes()).unwrap_err();

        assert!(matches!(err, TableLoaderError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn parse_statutory_rates_reads_all_columns() {
        let records = TableLoader::parse_statutory_rates(STATUTORY_CSV.as_bytes()).unwrap();

        assert_eq!(
            records,
            vec![StatutoryRates {
                tax_year: 2025,
                pension_rate: dec!(0.064),
                pension_exemption: dec!(3500),
                pension_cap: dec!(4339.20),
                insurance_rate: dec!(0.0131),
                insurance_exemption: dec!(0),
                insurance_cap: dec!(860.67),
            }]
        );
    }

    #[test]
    fn parse_minimum_wages_rejects_unknown_province() {
        let csv = "province,tax_year,hourly_rate\nZZ,2025,15";

        let err = TableLoader::parse_minimum_wages(csv.as_bytes()).unwrap_err();

        assert!(matches!(
            err,
            TableLoaderError::UnknownProvince { row: 1, .. }
        ));
    }

    #[test]
    fn parse_empty_file_yields_no_rows() {
        let csv = "tax_year,retirement_cap,retirement_income_fraction,tax_free_cap\n";

        let records = TableLoader::parse_contribution_limits(csv.as_bytes()).unwrap();

        assert!(records.is_empty());
    }

    // =========================================================================
    // build tests
    // =========================================================================

    #[test]
    fn build_assembles_table_set() {
        let tables = TableLoader::build(&sources(BRACKETS_CSV)).unwrap();

        let federal = tables.brackets(Jurisdiction::Federal, 2025).unwrap();
        assert_eq!(federal.value.brackets().len(), 2);
        assert_eq!(
            tables.minimum_wage(ProvinceCode::Quebec, 2025).map(|w| w.value),
            Some(dec!(16.10))
        );
    }

    #[test]
    fn build_sorts_bracket_rows() {
        let shuffled = "\
jurisdiction,tax_year,min_income,max_income,rate
FED,2025,50000,,0.20
FED,2025,0,50000,0.15
";

        let tables = TableLoader::build(&sources(shuffled)).unwrap();

        let federal = tables.brackets(Jurisdiction::Federal, 2025).unwrap();
        assert_eq!(federal.value.brackets()[0].min_income, dec!(0));
    }

    #[test]
    fn build_rejects_gap_between_brackets() {
        let gap = "\
jurisdiction,tax_year,min_income,max_income,rate
FED,2025,0,40000,0.15
FED,2025,50000,,0.20
";

        let err = TableLoader::build(&sources(gap)).unwrap_err();

        assert!(
            matches!(
                err,
                TableLoaderError::Table(TableError::Brackets {
                    source: BracketError::NotContiguous { .. },
                    ..
                })
            ),
            "got {err:?}"
        );
    }

    #[test]
    fn load_dir_without_directory_uses_shipped_tables() {
        let tables = TableLoader::load_dir(Path::new("/nonexistent/paycalc/tables")).unwrap();

        assert_eq!(tables, TableLoader::shipped().unwrap());
    }
}
