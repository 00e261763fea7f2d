//! # Sales Core Types
//!
//! The shared data model of the sales-report workspace: the reference data
//! (`Seller`, `Product`), the transactional data (`PurchaseRecord`,
//! `PurchaseItem`) and the `SalesBatch` that bundles them for one report run.
//!
//! This crate has no knowledge of how a report is computed or displayed. It only
//! knows how a batch is shaped and how to read one from JSON.

pub mod batch;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use batch::SalesBatch;
pub use error::CoreError;
pub use structs::{Product, PurchaseItem, PurchaseRecord, Seller};
