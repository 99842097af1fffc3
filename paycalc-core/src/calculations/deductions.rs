//! Post-tax deductions: each is a fixed amount or a percentage of gross
//! income. They never change the tax computation itself.

use rust_decimal::Decimal;

use crate::calculations::common::{percent_of, round_half_up};
use crate::{AmountKind, DeductionEntry, ResolvedDeduction, ResolvedDeductions};

/// Resolves every entry against `annual_income` and sums them.
pub fn resolve_deductions(
    entries: &[DeductionEntry],
    annual_income: Decimal,
) -> ResolvedDeductions {
    let entries: Vec<ResolvedDeduction> = entries
        .iter()
        .map(|entry| {
            let amount = match entry.kind {
                AmountKind::Percentage => percent_of(annual_income, entry.amount),
                AmountKind::FixedAmount => entry.amount,
            };
            ResolvedDeduction {
                name: entry.name.clone(),
                description: entry.description.clone(),
                kind: entry.kind,
                amount: round_half_up(amount),
            }
        })
        .collect();

    ResolvedDeductions {
        total: entries.iter().map(|e| e.amount).sum(),
        entries,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn entry(
        name: &str,
        kind: AmountKind,
        amount: Decimal,
    ) -> DeductionEntry {
        DeductionEntry {
            name: name.to_string(),
            kind,
            amount,
            description: None,
        }
    }

    #[test]
    fn empty_list_totals_zero() {
        let result = resolve_deductions(&[], dec!(80000));

        assert_eq!(result, ResolvedDeductions::default());
    }

    #[test]
    fn mixes_fixed_and_percentage_entries() {
        let entries = vec![
            entry("union dues", AmountKind::Percentage, dec!(1.5)),
            entry("parking", AmountKind::FixedAmount, dec!(1200)),
        ];

        let result = resolve_deductions(&entries, dec!(80000));

        assert_eq!(result.entries[0].amount, dec!(1200.00));
        assert_eq!(result.entries[1].amount, dec!(1200));
        assert_eq!(result.total, dec!(2400.00));
    }

    #[test]
    fn keeps_name_and_description() {
        let mut group_insurance = entry("group insurance", AmountKind::FixedAmount, dec!(600));
        group_insurance.description = Some("employer plan".to_string());

        let result = resolve_deductions(&[group_insurance], dec!(80000));

        assert_eq!(result.entries[0].name, "group insurance");
        assert_eq!(
            result.entries[0].description.as_deref(),
            Some("employer plan")
        );
    }

    #[test]
    fn percentage_rounds_to_cents() {
        let entries = vec![entry("pension top-up", AmountKind::Percentage, dec!(1))];

        let result = resolve_deductions(&entries, dec!(33333.33));

        assert_eq!(result.total, dec!(333.33));
    }
}
