use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// One line of the final seller report.
///
/// This struct is the final output of the `ReportBuilder`. Monetary fields are
/// already rounded and carry a fixed number of fractional digits, so their
/// serialized form is stable (e.g. `"15.00"`, never `"15"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerReportEntry {
    pub seller_id: String,
    pub name: String,
    pub revenue: Decimal,
    pub profit: Decimal,
    pub sales_count: usize,
    pub top_products: Vec<TopProduct>,
    pub bonus: Decimal,
}

/// A SKU and the number of units a seller moved.
///
/// The quantity is normalized (`3`, not `3.0`), fractional only when the
/// units sold were.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopProduct {
    pub sku: String,
    pub quantity: Decimal,
}

/// Rounds half away from zero (`1.005 -> 1.01`, `-1.005 -> -1.01`) and pads
/// the result so it always carries exactly `decimal_places` digits.
pub fn round_money(value: Decimal, decimal_places: u32) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimal_places);
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_money(dec!(1.005), 2), dec!(1.01));
        assert_eq!(round_money(dec!(-1.005), 2), dec!(-1.01));
        assert_eq!(round_money(dec!(2.344), 2), dec!(2.34));
        assert_eq!(round_money(dec!(2.345), 2), dec!(2.35));
    }

    #[test]
    fn always_carries_requested_scale() {
        let whole = round_money(dec!(15), 2);
        assert_eq!(whole.scale(), 2);
        assert_eq!(whole.to_string(), "15.00");

        let short = round_money(dec!(0.5), 2);
        assert_eq!(short.to_string(), "0.50");

        assert_eq!(round_money(Decimal::ZERO, 2).to_string(), "0.00");
    }

    #[test]
    fn serializes_money_as_fixed_point_strings() {
        let entry = SellerReportEntry {
            seller_id: "seller_1".to_string(),
            name: "Ann Lee".to_string(),
            revenue: round_money(dec!(120), 2),
            profit: round_money(dec!(99.999), 2),
            sales_count: 2,
            top_products: vec![TopProduct {
                sku: "A".to_string(),
                quantity: dec!(2.5),
            }],
            bonus: round_money(dec!(15), 2),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["revenue"], "120.00");
        assert_eq!(json["profit"], "100.00");
        assert_eq!(json["bonus"], "15.00");
        assert_eq!(json["top_products"][0]["quantity"], "2.5");
    }
}
