use serde::{Deserialize, Serialize};

use super::contributions::VoluntaryContributions;
use super::deduction::DeductionEntry;
use super::income::{BonusEntry, IncomeSpec};
use super::jurisdiction::ProvinceCode;

/// Everything one payroll tax calculation needs from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxInput {
    pub province: ProvinceCode,
    pub tax_year: i32,
    pub income: IncomeSpec,
    #[serde(default)]
    pub bonuses: Vec<BonusEntry>,
    #[serde(default)]
    pub contributions: VoluntaryContributions,
    #[serde(default)]
    pub deductions: Vec<DeductionEntry>,
}

impl TaxInput {
    /// An input with no bonuses, contributions or deductions.
    pub fn new(
        province: ProvinceCode,
        tax_year: i32,
        income: IncomeSpec,
    ) -> Self {
        Self {
            province,
            tax_year,
            income,
            bonuses: Vec::new(),
            contributions: VoluntaryContributions::default(),
            deductions: Vec::new(),
        }
    }
}
