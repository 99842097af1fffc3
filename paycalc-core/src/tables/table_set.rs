use std::collections::BTreeMap;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    BracketError, BracketSchedule, ContributionLimits, Jurisdiction, ProvinceCode, RateTableError,
    StatutoryRates, TaxBracket,
};

/// Errors raised while assembling a [`TableSet`]. Tables are validated once,
/// at load time, so a bad table never reaches a calculation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("invalid {jurisdiction} brackets for {tax_year}: {source}")]
    Brackets {
        jurisdiction: Jurisdiction,
        tax_year: i32,
        #[source]
        source: BracketError,
    },

    #[error("invalid statutory rates for {tax_year}: {source}")]
    StatutoryRates {
        tax_year: i32,
        #[source]
        source: RateTableError,
    },

    #[error("invalid contribution limits for {tax_year}: {source}")]
    ContributionLimits {
        tax_year: i32,
        #[source]
        source: RateTableError,
    },

    #[error("minimum wage for {province} {tax_year} must be non-negative, got {rate}")]
    NegativeMinimumWage {
        province: ProvinceCode,
        tax_year: i32,
        rate: Decimal,
    },

    #[error("duplicate {table} entry for {key}")]
    Duplicate { table: &'static str, key: String },
}

/// A missing table with nothing to fall back to.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("no {jurisdiction} bracket table for {tax_year} or any other year")]
    MissingBrackets {
        jurisdiction: Jurisdiction,
        tax_year: i32,
    },

    #[error("no statutory rates table for {tax_year} or any other year")]
    MissingStatutoryRates { tax_year: i32 },

    #[error("no contribution limits table for {tax_year} or any other year")]
    MissingContributionLimits { tax_year: i32 },
}

/// A table lookup result carrying the year that was actually used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    pub year: i32,
    pub requested_year: i32,
}

impl<T> Resolved<T> {
    pub fn is_fallback(&self) -> bool {
        self.year != self.requested_year
    }
}

/// Exact year if present, otherwise the most recent year on record.
fn resolve_year<V>(
    years: impl DoubleEndedIterator<Item = (i32, V)> + Clone,
    requested_year: i32,
) -> Option<Resolved<V>> {
    let mut fallback = years.clone();
    let (year, value) = years
        .into_iter()
        .find(|(year, _)| *year == requested_year)
        .or_else(|| fallback.next_back())?;

    Some(Resolved {
        value,
        year,
        requested_year,
    })
}

/// Every reference table the engine consults, frozen after construction.
///
/// Build one with [`TableSetBuilder`]; replace it wholesale (see
/// [`ReloadableTables`](super::ReloadableTables)) rather than editing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSet {
    brackets: BTreeMap<(Jurisdiction, i32), BracketSchedule>,
    statutory_rates: BTreeMap<i32, StatutoryRates>,
    contribution_limits: BTreeMap<i32, ContributionLimits>,
    minimum_wages: BTreeMap<(ProvinceCode, i32), Decimal>,
}

impl TableSet {
    pub fn builder() -> TableSetBuilder {
        TableSetBuilder::default()
    }

    /// # Errors
    ///
    /// [`ConfigurationError::MissingBrackets`] when the jurisdiction has no
    /// table for any year.
    pub fn brackets(
        &self,
        jurisdiction: Jurisdiction,
        tax_year: i32,
    ) -> Result<Resolved<&BracketSchedule>, ConfigurationError> {
        let years = self
            .brackets
            .range((jurisdiction, i32::MIN)..=(jurisdiction, i32::MAX))
            .map(|((_, year), schedule)| (*year, schedule));

        resolve_year(years, tax_year).ok_or(ConfigurationError::MissingBrackets {
            jurisdiction,
            tax_year,
        })
    }

    /// # Errors
    ///
    /// [`ConfigurationError::MissingStatutoryRates`] when no year is on record.
    pub fn statutory_rates(
        &self,
        tax_year: i32,
    ) -> Result<Resolved<&StatutoryRates>, ConfigurationError> {
        let years = self.statutory_rates.iter().map(|(year, r)| (*year, r));
        resolve_year(years, tax_year)
            .ok_or(ConfigurationError::MissingStatutoryRates { tax_year })
    }

    /// # Errors
    ///
    /// [`ConfigurationError::MissingContributionLimits`] when no year is on record.
    pub fn contribution_limits(
        &self,
        tax_year: i32,
    ) -> Result<Resolved<&ContributionLimits>, ConfigurationError> {
        let years = self.contribution_limits.iter().map(|(year, l)| (*year, l));
        resolve_year(years, tax_year)
            .ok_or(ConfigurationError::MissingContributionLimits { tax_year })
    }

    /// Hourly minimum wage; `None` when the province has no entry at all.
    pub fn minimum_wage(
        &self,
        province: ProvinceCode,
        tax_year: i32,
    ) -> Option<Resolved<Decimal>> {
        let years = self
            .minimum_wages
            .range((province, i32::MIN)..=(province, i32::MAX))
            .map(|((_, year), rate)| (*year, *rate));
        resolve_year(years, tax_year)
    }

    /// All `(jurisdiction, year)` pairs with a bracket table, in order.
    pub fn bracket_tables(&self) -> impl Iterator<Item = (Jurisdiction, i32, &BracketSchedule)> {
        self.brackets
            .iter()
            .map(|((jurisdiction, year), schedule)| (*jurisdiction, *year, schedule))
    }

    pub fn statutory_years(&self) -> impl Iterator<Item = i32> + '_ {
        self.statutory_rates.keys().copied()
    }

    pub fn contribution_limit_years(&self) -> impl Iterator<Item = i32> + '_ {
        self.contribution_limits.keys().copied()
    }

    pub fn minimum_wage_entries(&self) -> impl Iterator<Item = (ProvinceCode, i32, Decimal)> + '_ {
        self.minimum_wages
            .iter()
            .map(|((province, year), rate)| (*province, *year, *rate))
    }

    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
            && self.statutory_rates.is_empty()
            && self.contribution_limits.is_empty()
            && self.minimum_wages.is_empty()
    }
}

/// Validating builder for [`TableSet`]. Each `add_*` call checks its entry
/// and rejects duplicates.
#[derive(Debug, Default)]
pub struct TableSetBuilder {
    tables: TableSet,
}

impl TableSetBuilder {
    /// # Errors
    ///
    /// [`TableError::Brackets`] when the brackets are not a valid schedule,
    /// [`TableError::Duplicate`] when the pair was already added.
    pub fn add_brackets(
        &mut self,
        jurisdiction: Jurisdiction,
        tax_year: i32,
        brackets: Vec<TaxBracket>,
    ) -> Result<&mut Self, TableError> {
        let schedule = BracketSchedule::new(brackets).map_err(|source| TableError::Brackets {
            jurisdiction,
            tax_year,
            source,
        })?;

        if self.tables.brackets.contains_key(&(jurisdiction, tax_year)) {
            return Err(TableError::Duplicate {
                table: "brackets",
                key: format!("{jurisdiction} {tax_year}"),
            });
        }
        self.tables.brackets.insert((jurisdiction, tax_year), schedule);
        Ok(self)
    }

    /// # Errors
    ///
    /// [`TableError::StatutoryRates`] or [`TableError::Duplicate`].
    pub fn add_statutory_rates(
        &mut self,
        rates: StatutoryRates,
    ) -> Result<&mut Self, TableError> {
        let tax_year = rates.tax_year;
        rates
            .validate()
            .map_err(|source| TableError::StatutoryRates { tax_year, source })?;

        if self.tables.statutory_rates.contains_key(&tax_year) {
            return Err(TableError::Duplicate {
                table: "statutory rates",
                key: tax_year.to_string(),
            });
        }
        self.tables.statutory_rates.insert(tax_year, rates);
        Ok(self)
    }

    /// # Errors
    ///
    /// [`TableError::ContributionLimits`] or [`TableError::Duplicate`].
    pub fn add_contribution_limits(
        &mut self,
        limits: ContributionLimits,
    ) -> Result<&mut Self, TableError> {
        let tax_year = limits.tax_year;
        limits
            .validate()
            .map_err(|source| TableError::ContributionLimits { tax_year, source })?;

        if self.tables.contribution_limits.contains_key(&tax_year) {
            return Err(TableError::Duplicate {
                table: "contribution limits",
                key: tax_year.to_string(),
            });
        }
        self.tables.contribution_limits.insert(tax_year, limits);
        Ok(self)
    }

    /// # Errors
    ///
    /// [`TableError::NegativeMinimumWage`] or [`TableError::Duplicate`].
    pub fn add_minimum_wage(
        &mut self,
        province: ProvinceCode,
        tax_year: i32,
        rate: Decimal,
    ) -> Result<&mut Self, TableError> {
        if rate < Decimal::ZERO {
            return Err(TableError::NegativeMinimumWage {
                province,
                tax_year,
                rate,
            });
        }

        if self.tables.minimum_wages.contains_key(&(province, tax_year)) {
            return Err(TableError::Duplicate {
                table: "minimum wage",
                key: format!("{province} {tax_year}"),
            });
        }
        self.tables.minimum_wages.insert((province, tax_year), rate);
        Ok(self)
    }

    pub fn build(self) -> TableSet {
        self.tables
    }
}
