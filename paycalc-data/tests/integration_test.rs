//! Integration tests against the shipped reference tables.

use std::sync::Arc;

use paycalc_core::calculations::compute_bracket_tax;
use paycalc_core::{
    ContributionSpec, IncomeSpec, Jurisdiction, ProvinceCode, TaxCalculator, TaxInput,
    ValidationWarning,
};
use paycalc_data::TableLoader;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

const PROVINCES: [ProvinceCode; 4] = [
    ProvinceCode::Quebec,
    ProvinceCode::Ontario,
    ProvinceCode::BritishColumbia,
    ProvinceCode::Alberta,
];

#[test]
fn test_shipped_tables_load() {
    let tables = TableLoader::shipped().expect("shipped tables should be valid");

    assert!(!tables.is_empty());
    assert_eq!(tables.statutory_years().collect::<Vec<_>>(), vec![2023, 2024, 2025]);
    assert_eq!(
        tables.contribution_limit_years().collect::<Vec<_>>(),
        vec![2023, 2024, 2025]
    );
}

#[test]
fn test_every_shipped_jurisdiction_has_each_year() {
    let tables = TableLoader::shipped().expect("shipped tables should be valid");

    for year in 2023..=2025 {
        let federal = tables.brackets(Jurisdiction::Federal, year).unwrap();
        assert!(!federal.is_fallback(), "federal {year}");

        for province in PROVINCES {
            let provincial = tables
                .brackets(Jurisdiction::Provincial(province), year)
                .unwrap();
            assert!(!provincial.is_fallback(), "{province} {year}");
            assert!(tables.minimum_wage(province, year).is_some());
        }
    }
}

#[test]
fn test_bracket_table_count() {
    let tables = TableLoader::shipped().expect("shipped tables should be valid");

    // federal plus four provinces, three years each
    assert_eq!(tables.bracket_tables().count(), 15);
}

#[test]
fn test_federal_2025_schedule() {
    let tables = TableLoader::shipped().expect("shipped tables should be valid");
    let federal = tables.brackets(Jurisdiction::Federal, 2025).unwrap().value;

    let brackets = federal.brackets();
    assert_eq!(brackets.len(), 5);
    assert_eq!(brackets[0].max_income, Some(dec!(57375)));
    assert_eq!(brackets[0].tax_rate, dec!(0.15));
    assert_eq!(brackets[4].min_income, dec!(253414));
    assert_eq!(brackets[4].max_income, None);
    assert_eq!(brackets[4].tax_rate, dec!(0.33));

    // 57375 * 0.15 + 27625 * 0.205
    assert_eq!(compute_bracket_tax(dec!(85000), federal), dec!(14269));
}

#[test]
fn test_quebec_2025_calculation() {
    let tables = TableLoader::shipped().expect("shipped tables should be valid");
    let calculator = TaxCalculator::new(Arc::new(tables));
    let input = TaxInput::new(
        ProvinceCode::Quebec,
        2025,
        IncomeSpec::Annual {
            amount: dec!(50000),
        },
    );

    let result = calculator.calculate(&input).unwrap();

    assert_eq!(result.federal_tax, dec!(7500));
    assert_eq!(result.provincial_tax, dec!(7000));
    // (50000 - 3500) * 0.064 and 50000 * 0.0131
    assert_eq!(result.pension_contribution, dec!(2976.00));
    assert_eq!(result.insurance_contribution, dec!(655.00));
    assert_eq!(result.net_income, dec!(31869.00));
    assert!(result.warnings.is_empty());
}

#[test]
fn test_contributions_against_shipped_limits() {
    let tables = TableLoader::shipped().expect("shipped tables should be valid");
    let calculator = TaxCalculator::new(Arc::new(tables));
    let mut input = TaxInput::new(
        ProvinceCode::Ontario,
        2024,
        IncomeSpec::Annual {
            amount: dec!(250000),
        },
    );
    input.contributions.retirement = Some(ContributionSpec::fixed(dec!(40000)));
    input.contributions.tax_free = Some(ContributionSpec::fixed(dec!(9000)));

    let result = calculator.calculate(&input).unwrap();

    assert_eq!(result.retirement_contribution, dec!(31560));
    assert_eq!(result.taxable_income, dec!(218440));
    assert_eq!(result.tax_free_contribution, dec!(7000));
    assert_eq!(result.pension_contribution, dec!(4160.00));
    assert_eq!(result.insurance_contribution, dec!(834.24));
}

#[test]
fn test_minimum_wage_warning_with_shipped_floor() {
    let tables = TableLoader::shipped().expect("shipped tables should be valid");
    let calculator = TaxCalculator::new(Arc::new(tables));
    let input = TaxInput::new(
        ProvinceCode::Ontario,
        2025,
        IncomeSpec::Hourly {
            rate: dec!(16),
            hours_per_week: dec!(40),
        },
    );

    let result = calculator.calculate(&input).unwrap();

    assert_eq!(
        result.warnings,
        vec![ValidationWarning::BelowMinimumWage {
            province: ProvinceCode::Ontario,
            tax_year: 2025,
            hourly_rate: dec!(16),
            minimum_wage: dec!(17.60),
        }]
    );
}

#[test]
fn test_future_year_falls_back_to_latest() {
    let tables = TableLoader::shipped().expect("shipped tables should be valid");
    let calculator = TaxCalculator::new(Arc::new(tables));
    let input = TaxInput::new(
        ProvinceCode::Alberta,
        2027,
        IncomeSpec::Annual {
            amount: dec!(70000),
        },
    );

    let result = calculator.calculate(&input).unwrap();

    assert!(result.tables.used_fallback());
    assert_eq!(result.tables.provincial_year, 2025);
    assert_eq!(result.tables.statutory_year, 2025);
}
