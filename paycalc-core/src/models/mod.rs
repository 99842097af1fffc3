mod contribution_limits;
mod contributions;
mod deduction;
mod income;
mod jurisdiction;
mod statutory_rates;
mod tax_bracket;
mod tax_input;
mod tax_result;
mod warning;

pub use contribution_limits::ContributionLimits;
pub use contributions::{AmountKind, ContributionSpec, VoluntaryContributions};
pub use deduction::{DeductionEntry, ResolvedDeduction, ResolvedDeductions};
pub use income::{BonusEntry, IncomeSpec, WEEKS_PER_YEAR};
pub use jurisdiction::{Jurisdiction, ProvinceCode};
pub use statutory_rates::{RateTableError, StatutoryRates};
pub use tax_bracket::{BracketError, BracketSchedule, TaxBracket};
pub use tax_input::TaxInput;
pub use tax_result::{PayPeriods, TableProvenance, TaxResult};
pub use warning::{TableKind, ValidationWarning};
