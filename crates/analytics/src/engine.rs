use crate::accumulator::{Overflow, SellerAccumulator};
use crate::error::AnalyticsError;
use crate::report::{round_money, SellerReportEntry};
use crate::rules::{BonusRule, ProfitRankBonus, RevenueRule, SimpleRevenue};
use configuration::Settings;
use core_types::{Product, SalesBatch};
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info, warn};

/// Turns a `SalesBatch` into a ranked per-seller report.
///
/// The builder owns the two injected rules and the output shaping knobs. It
/// holds no per-run state, so one builder can produce any number of reports.
pub struct ReportBuilder {
    revenue_rule: Option<Box<dyn RevenueRule>>,
    bonus_rule: Option<Box<dyn BonusRule>>,
    top_products_limit: usize,
    decimal_places: u32,
}

impl ReportBuilder {
    /// A builder with no rules installed. Both must be supplied before
    /// [`build`](Self::build) succeeds.
    pub fn new() -> Self {
        Self {
            revenue_rule: None,
            bonus_rule: None,
            top_products_limit: 10,
            decimal_places: 2,
        }
    }

    /// A builder with `SimpleRevenue` and the standard `ProfitRankBonus`.
    pub fn with_defaults() -> Self {
        Self::new()
            .revenue_rule(SimpleRevenue)
            .bonus_rule(ProfitRankBonus::default())
    }

    /// A builder with the default rules, tiered and shaped by `settings`.
    pub fn with_settings(settings: &Settings) -> Self {
        Self::new()
            .revenue_rule(SimpleRevenue)
            .bonus_rule(ProfitRankBonus::from_settings(&settings.bonus))
            .top_products_limit(settings.report.top_products_limit)
            .decimal_places(settings.report.decimal_places)
    }

    pub fn revenue_rule(mut self, rule: impl RevenueRule + 'static) -> Self {
        self.revenue_rule = Some(Box::new(rule));
        self
    }

    pub fn bonus_rule(mut self, rule: impl BonusRule + 'static) -> Self {
        self.bonus_rule = Some(Box::new(rule));
        self
    }

    pub fn top_products_limit(mut self, limit: usize) -> Self {
        self.top_products_limit = limit;
        self
    }

    pub fn decimal_places(mut self, decimal_places: u32) -> Self {
        self.decimal_places = decimal_places;
        self
    }

    /// Parses `json` into a batch and builds the report from it.
    pub fn build_from_json(&self, json: &str) -> Result<Vec<SellerReportEntry>, AnalyticsError> {
        let batch = SalesBatch::from_json_str(json)?;
        self.build(&batch)
    }

    /// Same as [`build_from_json`](Self::build_from_json) for an already parsed document.
    pub fn build_from_value(&self, value: Value) -> Result<Vec<SellerReportEntry>, AnalyticsError> {
        let batch = SalesBatch::from_value(value)?;
        self.build(&batch)
    }

    /// The main entry point for producing a report.
    ///
    /// # Arguments
    ///
    /// * `batch` - The sellers, products and receipts to aggregate.
    ///
    /// # Returns
    ///
    /// One entry per seller, ordered by profit (highest first, ties in input
    /// order), or an `AnalyticsError` if the batch has no sellers or a rule
    /// is missing. Nothing is accumulated when either of those is returned.
    /// Amounts too large for a `Decimal` end the run with `InvalidInput`
    /// naming the offending field.
    pub fn build(&self, batch: &SalesBatch) -> Result<Vec<SellerReportEntry>, AnalyticsError> {
        if batch.sellers.is_empty() {
            return Err(AnalyticsError::InvalidInput(
                "sellers must not be empty".to_string(),
            ));
        }
        let revenue_rule = self
            .revenue_rule
            .as_deref()
            .ok_or(AnalyticsError::MissingStrategy("revenue rule"))?;
        let bonus_rule = self
            .bonus_rule
            .as_deref()
            .ok_or(AnalyticsError::MissingStrategy("bonus rule"))?;

        info!(
            sellers = batch.sellers.len(),
            products = batch.products.len(),
            purchase_records = batch.purchase_records.len(),
            "Building seller report"
        );

        let mut sellers = self.accumulate(batch, revenue_rule)?;

        // `sort_by` is stable: equal profits keep their input order.
        sellers.sort_by(|a, b| b.profit().cmp(&a.profit()));

        let total = sellers.len();
        let report: Vec<SellerReportEntry> = sellers
            .iter()
            .enumerate()
            .map(|(index, seller)| {
                let bonus = bonus_rule
                    .bonus(index, total, seller)
                    .ok_or_else(|| overflow(format!("bonus of seller `{}`", seller.id())))?;
                Ok(self.freeze(seller, bonus))
            })
            .collect::<Result<_, AnalyticsError>>()?;

        info!(entries = report.len(), "Seller report built");

        Ok(report)
    }

    /// Replays every receipt into a fresh accumulator per seller.
    ///
    /// The returned accumulators are in seller input order.
    fn accumulate(
        &self,
        batch: &SalesBatch,
        revenue_rule: &dyn RevenueRule,
    ) -> Result<Vec<SellerAccumulator>, AnalyticsError> {
        let products: HashMap<&str, &Product> = batch
            .products
            .iter()
            .map(|product| (product.sku.as_str(), product))
            .collect();

        let mut sellers: Vec<SellerAccumulator> =
            batch.sellers.iter().map(SellerAccumulator::new).collect();
        let seller_index: HashMap<&str, usize> = batch
            .sellers
            .iter()
            .enumerate()
            .map(|(position, seller)| (seller.id.as_str(), position))
            .collect();

        let mut skipped_records = 0usize;
        let mut skipped_items = 0usize;

        for record in &batch.purchase_records {
            let Some(&position) = seller_index.get(record.seller_id.as_str()) else {
                debug!(seller_id = %record.seller_id, "Skipping record for unknown seller");
                skipped_records += 1;
                continue;
            };
            let seller = &mut sellers[position];
            seller.record_sale(record.total_amount).map_err(|_| {
                overflow(format!(
                    "total_amount of a purchase record for seller `{}`",
                    record.seller_id
                ))
            })?;

            for item in &record.items {
                let Some(product) = products.get(item.sku.as_str()) else {
                    debug!(sku = %item.sku, seller_id = %record.seller_id, "Skipping item for unknown SKU");
                    skipped_items += 1;
                    continue;
                };

                let line = || format!("SKU `{}` sold by `{}`", item.sku, record.seller_id);
                let revenue = revenue_rule
                    .revenue(item, product)
                    .ok_or_else(|| overflow(format!("sale_price × quantity of {}", line())))?;
                let cost = product
                    .purchase_price
                    .checked_mul(item.quantity)
                    .ok_or_else(|| overflow(format!("purchase_price × quantity of {}", line())))?;
                let profit = revenue
                    .checked_sub(cost)
                    .ok_or_else(|| overflow(format!("profit of {}", line())))?;
                seller
                    .record_item(&item.sku, profit, item.quantity)
                    .map_err(|Overflow(total)| {
                        overflow(format!("{total} total after {}", line()))
                    })?;
            }
        }

        if skipped_records > 0 && skipped_records == batch.purchase_records.len() {
            warn!(
                skipped_records,
                "No purchase record matched a known seller"
            );
        } else if skipped_records > 0 || skipped_items > 0 {
            info!(skipped_records, skipped_items, "Ignored unknown references");
        }

        Ok(sellers)
    }

    fn freeze(&self, seller: &SellerAccumulator, bonus: Decimal) -> SellerReportEntry {
        SellerReportEntry {
            seller_id: seller.id().to_string(),
            name: seller.name().to_string(),
            revenue: round_money(seller.revenue(), self.decimal_places),
            profit: round_money(seller.profit(), self.decimal_places),
            sales_count: seller.sales_count(),
            top_products: seller.top_products(self.top_products_limit),
            bonus: round_money(bonus, self.decimal_places),
        }
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn overflow(what: String) -> AnalyticsError {
    warn!(%what, "Amount exceeds the decimal range");
    AnalyticsError::InvalidInput(format!("{what} overflows the decimal range"))
}

impl fmt::Debug for ReportBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportBuilder")
            .field("revenue_rule", &self.revenue_rule.is_some())
            .field("bonus_rule", &self.bonus_rule.is_some())
            .field("top_products_limit", &self.top_products_limit)
            .field("decimal_places", &self.decimal_places)
            .finish()
    }
}
