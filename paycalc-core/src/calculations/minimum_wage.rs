//! Advisory minimum-wage check for hourly incomes.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::tables::TableSet;
use crate::{ProvinceCode, ValidationWarning};

/// Returns a warning when `hourly_rate` is below the province's floor.
///
/// The check never fails: a province with no floor on record yields `None`.
/// When the year itself is missing, the most recent floor is used.
pub fn check_minimum_wage(
    hourly_rate: Decimal,
    province: ProvinceCode,
    tax_year: i32,
    tables: &TableSet,
) -> Option<ValidationWarning> {
    let Some(floor) = tables.minimum_wage(province, tax_year) else {
        debug!(%province, tax_year, "no minimum wage on record; skipping check");
        return None;
    };

    if hourly_rate >= floor.value {
        return None;
    }

    warn!(
        %province,
        tax_year = floor.year,
        %hourly_rate,
        minimum_wage = %floor.value,
        "hourly rate below minimum wage"
    );
    Some(ValidationWarning::BelowMinimumWage {
        province,
        tax_year: floor.year,
        hourly_rate,
        minimum_wage: floor.value,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn tables() -> TableSet {
        let mut builder = TableSet::builder();
        builder
            .add_minimum_wage(ProvinceCode::Quebec, 2024, dec!(15.75))
            .unwrap()
            .add_minimum_wage(ProvinceCode::Quebec, 2025, dec!(16.10))
            .unwrap();
        builder.build()
    }

    #[test]
    fn rate_below_floor_warns() {
        let warning = check_minimum_wage(dec!(15.00), ProvinceCode::Quebec, 2025, &tables());

        assert_eq!(
            warning,
            Some(ValidationWarning::BelowMinimumWage {
                province: ProvinceCode::Quebec,
                tax_year: 2025,
                hourly_rate: dec!(15.00),
                minimum_wage: dec!(16.10),
            })
        );
    }

    #[test]
    fn rate_at_floor_is_fine() {
        assert_eq!(
            check_minimum_wage(dec!(16.10), ProvinceCode::Quebec, 2025, &tables()),
            None
        );
    }

    #[test]
    fn floor_depends_on_year() {
        assert_eq!(
            check_minimum_wage(dec!(16.00), ProvinceCode::Quebec, 2024, &tables()),
            None
        );
    }

    #[test]
    fn missing_year_uses_latest_floor() {
        let warning = check_minimum_wage(dec!(16.00), ProvinceCode::Quebec, 2026, &tables());

        assert!(matches!(
            warning,
            Some(ValidationWarning::BelowMinimumWage { tax_year: 2025, .. })
        ));
    }

    #[test]
    fn province_without_floor_is_skipped() {
        assert_eq!(
            check_minimum_wage(dec!(1.00), ProvinceCode::Yukon, 2025, &tables()),
            None
        );
    }
}
