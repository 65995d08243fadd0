//! Core types and data structures for the verification system

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One billed, ordered, or received item within a document
///
/// The `description` field is the matching key used by the reconciliation
/// engine (case-insensitive exact equality, no trimming).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Free-text item label
    pub description: String,
    /// Quantity billed/ordered/received
    pub quantity: BigDecimal,
    /// Price per unit
    pub unit_price: BigDecimal,
    /// Line amount; expected to be roughly quantity x unit_price but never
    /// validated as such
    pub amount: BigDecimal,
}

impl LineItem {
    /// Create a new line item with an explicit amount
    pub fn new(
        description: String,
        quantity: BigDecimal,
        unit_price: BigDecimal,
        amount: BigDecimal,
    ) -> Self {
        Self {
            description,
            quantity,
            unit_price,
            amount,
        }
    }

    /// Create a line item with the amount derived from quantity x unit_price
    pub fn from_unit_price(
        description: String,
        quantity: BigDecimal,
        unit_price: BigDecimal,
    ) -> Self {
        let amount = &quantity * &unit_price;
        Self::new(description, quantity, unit_price, amount)
    }
}

/// Supplier invoice submitted for payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier, assigned once at creation
    pub id: String,
    /// Invoice number as printed on the document
    pub invoice_number: String,
    /// Vendor name
    pub vendor_name: String,
    /// Date of the invoice
    pub invoice_date: NaiveDate,
    /// Total invoice amount
    pub total_amount: BigDecimal,
    /// Billed line items, in document order
    pub line_items: Vec<LineItem>,
    /// Free-form lifecycle status (not state-machine enforced)
    pub status: String,
    /// When the invoice was recorded
    pub created_at: NaiveDateTime,
}

impl Invoice {
    /// Create a new invoice with status "pending"
    pub fn new(
        id: String,
        invoice_number: String,
        vendor_name: String,
        invoice_date: NaiveDate,
        total_amount: BigDecimal,
        line_items: Vec<LineItem>,
    ) -> Self {
        Self {
            id,
            invoice_number,
            vendor_name,
            invoice_date,
            total_amount,
            line_items,
            status: "pending".to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Purchase order authorizing a purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// Unique identifier, assigned once at creation
    pub id: String,
    /// PO number
    pub po_number: String,
    /// Vendor name
    pub vendor_name: String,
    /// Date the order was placed
    pub po_date: NaiveDate,
    /// Total ordered amount
    pub total_amount: BigDecimal,
    /// Ordered line items, in document order
    pub line_items: Vec<LineItem>,
    /// Free-form lifecycle status (not state-machine enforced)
    pub status: String,
    /// When the purchase order was recorded
    pub created_at: NaiveDateTime,
}

impl PurchaseOrder {
    /// Create a new purchase order with status "open"
    pub fn new(
        id: String,
        po_number: String,
        vendor_name: String,
        po_date: NaiveDate,
        total_amount: BigDecimal,
        line_items: Vec<LineItem>,
    ) -> Self {
        Self {
            id,
            po_number,
            vendor_name,
            po_date,
            total_amount,
            line_items,
            status: "open".to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Goods receipt confirming delivery against a purchase order
///
/// The `po_number` cross-reference is informational; the engine never checks
/// that it matches the purchase order passed alongside. Correctness of that
/// association is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoodsReceipt {
    /// Unique identifier, assigned once at creation
    pub id: String,
    /// GR number
    pub gr_number: String,
    /// Purchase order number this receipt refers to
    pub po_number: String,
    /// Vendor name
    pub vendor_name: String,
    /// Date the goods were received
    pub receipt_date: NaiveDate,
    /// Total received amount
    pub total_amount: BigDecimal,
    /// Received line items, in document order
    pub line_items: Vec<LineItem>,
    /// Free-form lifecycle status (not state-machine enforced)
    pub status: String,
    /// When the goods receipt was recorded
    pub created_at: NaiveDateTime,
}

impl GoodsReceipt {
    /// Create a new goods receipt with status "received"
    pub fn new(
        id: String,
        gr_number: String,
        po_number: String,
        vendor_name: String,
        receipt_date: NaiveDate,
        total_amount: BigDecimal,
        line_items: Vec<LineItem>,
    ) -> Self {
        Self {
            id,
            gr_number,
            po_number,
            vendor_name,
            receipt_date,
            total_amount,
            line_items,
            status: "received".to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Errors that can occur in the verification system
#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),
    #[error("Purchase order not found: {0}")]
    PurchaseOrderNotFound(String),
    #[error("Goods receipt not found: {0}")]
    GoodsReceiptNotFound(String),
    #[error("Verification result not found: {0}")]
    VerificationNotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for verification operations
pub type VerifyResult<T> = Result<T, VerificationError>;
