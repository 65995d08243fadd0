//! # Verification Core
//!
//! A library for three-way invoice verification: reconciling an invoice
//! against its purchase order and goods receipt to detect pricing and
//! quantity discrepancies before payment approval.
//!
//! ## Features
//!
//! - **Three-way matching**: line-item reconciliation across invoice,
//!   purchase order, and goods receipt with a 5% variance tolerance
//! - **Variance analysis**: per-line price/quantity/amount variances and
//!   aggregate summaries with pass/warning/fail escalation
//! - **Document ingestion**: best-effort field scraping from extracted
//!   invoice text, validated before use
//! - **Storage abstraction**: database-agnostic design with trait-based
//!   storage
//!
//! ## Quick Start
//!
//! ```rust
//! use verification_core::{Invoice, LineItem, MatchEngine, PurchaseOrder, GoodsReceipt};
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//!
//! // Build the three documents, then:
//! // let result = MatchEngine::new().verify(&invoice, &po, &gr);
//! ```

pub mod ingest;
pub mod matching;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use ingest::*;
pub use matching::*;
pub use traits::*;
pub use types::*;
