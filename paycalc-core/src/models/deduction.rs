use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::contributions::AmountKind;

/// A named post-tax deduction (union dues, insurance premiums, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionEntry {
    pub name: String,
    pub kind: AmountKind,
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
}

/// A deduction with its dollar amount worked out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDeduction {
    pub name: String,
    pub description: Option<String>,
    pub kind: AmountKind,
    pub amount: Decimal,
}

/// All deductions of one calculation plus their sum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDeductions {
    pub total: Decimal,
    pub entries: Vec<ResolvedDeduction>,
}
