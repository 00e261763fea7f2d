//! The two pluggable calculations of a report run.
//!
//! Both are plain traits with a blanket implementation for closures, so a
//! caller can pass either one of the provided rules or an ad hoc function.

use crate::accumulator::SellerAccumulator;
use configuration::BonusSettings;
use core_types::{Product, PurchaseItem};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Computes the realized revenue of a single receipt line.
///
/// Implementations must be pure: the builder calls them once per matched
/// line and assumes the same inputs always produce the same amount. `None`
/// means the amount does not fit in a `Decimal`; the builder turns it into
/// an `InvalidInput` error instead of panicking.
pub trait RevenueRule {
    fn revenue(&self, item: &PurchaseItem, product: &Product) -> Option<Decimal>;
}

impl<F> RevenueRule for F
where
    F: Fn(&PurchaseItem, &Product) -> Option<Decimal>,
{
    fn revenue(&self, item: &PurchaseItem, product: &Product) -> Option<Decimal> {
        self(item, product)
    }
}

/// Computes a seller's bonus from its post-ranking position.
///
/// `index` is zero-based, `total` is the number of ranked sellers
/// (`0 <= index < total`). `None` signals an overflow, as for [`RevenueRule`].
pub trait BonusRule {
    fn bonus(&self, index: usize, total: usize, seller: &SellerAccumulator) -> Option<Decimal>;
}

impl<F> BonusRule for F
where
    F: Fn(usize, usize, &SellerAccumulator) -> Option<Decimal>,
{
    fn bonus(&self, index: usize, total: usize, seller: &SellerAccumulator) -> Option<Decimal> {
        self(index, total, seller)
    }
}

/// `sale_price * quantity * (1 - discount / 100)`.
///
/// The discount is not clamped: a discount above 100 yields negative revenue,
/// a negative discount inflates it. Range checks belong to whoever produces
/// the batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRevenue;

impl RevenueRule for SimpleRevenue {
    fn revenue(&self, item: &PurchaseItem, _product: &Product) -> Option<Decimal> {
        let discount_factor =
            Decimal::ONE.checked_sub(item.discount.checked_div(Decimal::ONE_HUNDRED)?)?;
        item.sale_price
            .checked_mul(item.quantity)?
            .checked_mul(discount_factor)
    }
}

/// Rank-tiered bonus on profit.
///
/// Tiers are checked in order:
/// 1. first place gets `first_place_pct`;
/// 2. last place gets nothing, provided there is more than one seller;
/// 3. second and third place get `podium_pct`;
/// 4. everyone else gets `default_pct`.
///
/// A lone seller is first, not last, and keeps the first-place bonus. With two
/// or three sellers the final position is also a podium position, and the
/// last-place rule wins.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfitRankBonus {
    first_place_pct: Decimal,
    podium_pct: Decimal,
    default_pct: Decimal,
}

impl ProfitRankBonus {
    /// Percentages are given as whole percent values (`15` means 15%).
    pub fn new(first_place_pct: Decimal, podium_pct: Decimal, default_pct: Decimal) -> Self {
        Self {
            first_place_pct,
            podium_pct,
            default_pct,
        }
    }

    pub fn from_settings(settings: &BonusSettings) -> Self {
        Self::new(
            settings.first_place_pct,
            settings.podium_pct,
            settings.default_pct,
        )
    }

    fn pct_for(&self, index: usize, total: usize) -> Decimal {
        let is_last = total > 1 && index == total - 1;
        match index {
            0 => self.first_place_pct,
            _ if is_last => Decimal::ZERO,
            1 | 2 => self.podium_pct,
            _ => self.default_pct,
        }
    }
}

impl Default for ProfitRankBonus {
    fn default() -> Self {
        Self::new(dec!(15), dec!(10), dec!(5))
    }
}

impl BonusRule for ProfitRankBonus {
    fn bonus(&self, index: usize, total: usize, seller: &SellerAccumulator) -> Option<Decimal> {
        // Scale the percentage first so a large profit is not pushed over the
        // limit by the intermediate product.
        let rate = self.pct_for(index, total).checked_div(Decimal::ONE_HUNDRED)?;
        seller.profit().checked_mul(rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Seller;

    fn item(sale_price: Decimal, quantity: Decimal, discount: Decimal) -> PurchaseItem {
        PurchaseItem {
            sku: "SKU_001".to_string(),
            sale_price,
            quantity,
            discount,
        }
    }

    fn product() -> Product {
        Product {
            sku: "SKU_001".to_string(),
            purchase_price: dec!(50),
        }
    }

    fn seller_with_profit(profit: Decimal) -> SellerAccumulator {
        let mut acc = SellerAccumulator::new(&Seller {
            id: "s".to_string(),
            first_name: "Test".to_string(),
            last_name: "Seller".to_string(),
        });
        acc.record_item("SKU_001", profit, Decimal::ONE).unwrap();
        acc
    }

    #[test]
    fn revenue_applies_discount() {
        let revenue = SimpleRevenue.revenue(&item(dec!(100), dec!(3), dec!(10)), &product());
        assert_eq!(revenue, Some(dec!(270)));
    }

    #[test]
    fn revenue_scales_with_fractional_quantity() {
        let revenue = SimpleRevenue.revenue(&item(dec!(4), dec!(1.5), dec!(25)), &product());
        assert_eq!(revenue, Some(dec!(4.5)));
    }

    #[test]
    fn revenue_overflow_is_none() {
        let huge = item(
            Decimal::from_scientific("1e20").unwrap(),
            Decimal::from_scientific("1e12").unwrap(),
            Decimal::ZERO,
        );
        assert_eq!(SimpleRevenue.revenue(&huge, &product()), None);
    }

    #[test]
    fn full_discount_yields_zero_revenue() {
        let revenue = SimpleRevenue.revenue(&item(dec!(100), dec!(3), dec!(100)), &product());
        assert_eq!(revenue, Some(Decimal::ZERO));
    }

    #[test]
    fn out_of_range_discount_is_not_clamped() {
        let over = SimpleRevenue.revenue(&item(dec!(100), dec!(1), dec!(150)), &product());
        assert_eq!(over, Some(dec!(-50)));

        let under = SimpleRevenue.revenue(&item(dec!(100), dec!(1), dec!(-20)), &product());
        assert_eq!(under, Some(dec!(120)));
    }

    #[test]
    fn closures_are_revenue_rules() {
        let gross =
            |item: &PurchaseItem, _product: &Product| item.sale_price.checked_mul(item.quantity);
        assert_eq!(
            gross.revenue(&item(dec!(10), dec!(4), dec!(50)), &product()),
            Some(dec!(40))
        );
    }

    #[test]
    fn bonus_tiers() {
        let rule = ProfitRankBonus::default();
        let seller = seller_with_profit(dec!(1000));

        assert_eq!(rule.bonus(0, 5, &seller), Some(dec!(150)));
        assert_eq!(rule.bonus(1, 5, &seller), Some(dec!(100)));
        assert_eq!(rule.bonus(2, 5, &seller), Some(dec!(100)));
        assert_eq!(rule.bonus(3, 5, &seller), Some(dec!(50)));
        assert_eq!(rule.bonus(4, 5, &seller), Some(Decimal::ZERO));
    }

    #[test]
    fn lone_seller_keeps_first_place_bonus() {
        let rule = ProfitRankBonus::default();
        let seller = seller_with_profit(dec!(200));

        assert_eq!(rule.bonus(0, 1, &seller), Some(dec!(30)));
    }

    #[test]
    fn last_place_overrides_podium() {
        let rule = ProfitRankBonus::default();
        let seller = seller_with_profit(dec!(200));

        // Two sellers: index 1 is both second and last.
        assert_eq!(rule.bonus(1, 2, &seller), Some(Decimal::ZERO));
        // Three sellers: index 2 is both third and last.
        assert_eq!(rule.bonus(2, 3, &seller), Some(Decimal::ZERO));
        assert_eq!(rule.bonus(1, 3, &seller), Some(dec!(20)));
    }

    #[test]
    fn bonus_on_huge_profit_does_not_overflow_midway() {
        let rule = ProfitRankBonus::default();
        // profit * 15 would not fit, profit * 0.15 does.
        let seller = seller_with_profit(Decimal::from_scientific("7e27").unwrap());

        assert_eq!(
            rule.bonus(0, 2, &seller),
            Decimal::from_scientific("1.05e27").ok()
        );
    }

    #[test]
    fn middle_ranks_get_default_tier() {
        let rule = ProfitRankBonus::default();
        let seller = seller_with_profit(dec!(100));

        for index in 3..9 {
            assert_eq!(rule.bonus(index, 10, &seller), Some(dec!(5)));
        }
        assert_eq!(rule.bonus(9, 10, &seller), Some(Decimal::ZERO));
    }

    #[test]
    fn custom_tiers_from_settings() {
        let settings = BonusSettings {
            first_place_pct: dec!(20),
            podium_pct: dec!(12.5),
            default_pct: dec!(1),
        };
        let rule = ProfitRankBonus::from_settings(&settings);
        let seller = seller_with_profit(dec!(400));

        assert_eq!(rule.bonus(0, 6, &seller), Some(dec!(80)));
        assert_eq!(rule.bonus(1, 6, &seller), Some(dec!(50)));
        assert_eq!(rule.bonus(4, 6, &seller), Some(dec!(4)));
    }
}
