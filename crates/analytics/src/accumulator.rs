use crate::report::TopProduct;
use core_types::Seller;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Running totals for one seller while the purchase records are replayed.
///
/// Accumulators only live for the duration of a single report build. They are
/// handed to the [`BonusRule`](crate::rules::BonusRule) after ranking and then
/// frozen into a [`SellerReportEntry`](crate::report::SellerReportEntry).
#[derive(Debug, Clone, PartialEq)]
pub struct SellerAccumulator {
    id: String,
    name: String,
    revenue: Decimal,
    profit: Decimal,
    sales_count: usize,
    // Kept in first-seen order so ties in the top products list are deterministic.
    products_sold: Vec<(String, Decimal)>,
    sku_positions: HashMap<String, usize>,
}

impl SellerAccumulator {
    /// Creates a zeroed accumulator for `seller`.
    pub fn new(seller: &Seller) -> Self {
        Self {
            id: seller.id.clone(),
            name: seller.display_name(),
            revenue: Decimal::ZERO,
            profit: Decimal::ZERO,
            sales_count: 0,
            products_sold: Vec::new(),
            sku_positions: HashMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sum of the receipt totals, unrounded.
    pub fn revenue(&self) -> Decimal {
        self.revenue
    }

    /// Sum of per-item revenue minus purchase cost, unrounded.
    pub fn profit(&self) -> Decimal {
        self.profit
    }

    pub fn sales_count(&self) -> usize {
        self.sales_count
    }

    /// Units sold per SKU, in the order each SKU was first sold.
    pub fn products_sold(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.products_sold
            .iter()
            .map(|(sku, quantity)| (sku.as_str(), *quantity))
    }

    pub fn quantity_sold(&self, sku: &str) -> Option<Decimal> {
        self.sku_positions
            .get(sku)
            .map(|&position| self.products_sold[position].1)
    }

    /// Counts one receipt towards this seller.
    ///
    /// Nothing is booked if the revenue total would overflow.
    pub(crate) fn record_sale(&mut self, total_amount: Decimal) -> Result<(), Overflow> {
        self.revenue = self
            .revenue
            .checked_add(total_amount)
            .ok_or(Overflow("revenue"))?;
        self.sales_count += 1;
        Ok(())
    }

    /// Books the profit and units of one receipt line.
    ///
    /// Either both totals move or neither does.
    pub(crate) fn record_item(
        &mut self,
        sku: &str,
        profit: Decimal,
        quantity: Decimal,
    ) -> Result<(), Overflow> {
        let new_profit = self.profit.checked_add(profit).ok_or(Overflow("profit"))?;

        match self.sku_positions.get(sku) {
            Some(&position) => {
                let sold = &mut self.products_sold[position].1;
                *sold = sold.checked_add(quantity).ok_or(Overflow("quantity"))?;
            }
            None => {
                self.sku_positions
                    .insert(sku.to_string(), self.products_sold.len());
                self.products_sold.push((sku.to_string(), quantity));
            }
        }

        self.profit = new_profit;
        Ok(())
    }

    /// The best-selling SKUs by quantity, highest first, at most `limit` long.
    ///
    /// Equal quantities keep the order in which the SKUs were first sold.
    pub fn top_products(&self, limit: usize) -> Vec<TopProduct> {
        let mut ranked: Vec<&(String, Decimal)> = self.products_sold.iter().collect();
        // `sort_by` is stable, which is what gives the first-seen tie-break.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        ranked
            .into_iter()
            .take(limit)
            .map(|(sku, quantity)| TopProduct {
                sku: sku.clone(),
                quantity: quantity.normalize(),
            })
            .collect()
    }
}

/// A running total that no longer fits in a `Decimal`, named by the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Overflow(pub(crate) &'static str);
