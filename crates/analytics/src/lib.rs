//! # Sales Analytics Engine
//!
//! This crate turns a batch of sales data into a ranked per-seller report:
//! revenue, profit, sales count, best-selling products and a rank-based bonus.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** This crate performs no I/O. It depends only on `core-types`
//!   for the input model and `configuration` for the typed settings.
//! - **Injected Rules:** Revenue and bonus calculations are supplied by the
//!   caller through the `RevenueRule` and `BonusRule` traits (closures work too).
//!   `SimpleRevenue` and `ProfitRankBonus` implement the standard policy.
//! - **Stateless Calculation:** `ReportBuilder::build` borrows the batch and
//!   returns a fresh report. Repeated calls with the same input yield the same
//!   output.
//!
//! ## Public API
//!
//! - `ReportBuilder`: Validates the batch, aggregates, ranks and formats.
//! - `SellerReportEntry` / `TopProduct`: The report rows.
//! - `SellerAccumulator`: The running totals handed to a `BonusRule`.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod accumulator;
pub mod engine;
pub mod error;
pub mod report;
pub mod rules;

// Re-export the key components to create a clean, public-facing API.
pub use accumulator::SellerAccumulator;
pub use engine::ReportBuilder;
pub use error::AnalyticsError;
pub use report::{SellerReportEntry, TopProduct};
pub use rules::{BonusRule, ProfitRankBonus, RevenueRule, SimpleRevenue};
