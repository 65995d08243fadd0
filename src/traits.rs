//! Traits for storage abstraction and extensibility

use async_trait::async_trait;

use crate::matching::engine::VerificationResult;
use crate::types::*;

/// Storage abstraction for documents and verification results
///
/// This trait allows the verification core to work with any storage backend
/// (PostgreSQL, MongoDB, SQLite, in-memory, etc.) by implementing these
/// methods. The engine itself never touches storage; resolution of documents
/// by identifier and persistence of results happen at this boundary.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Save an invoice to storage
    async fn save_invoice(&mut self, invoice: &Invoice) -> VerifyResult<()>;

    /// Get an invoice by ID
    async fn get_invoice(&self, invoice_id: &str) -> VerifyResult<Option<Invoice>>;

    /// List all invoices
    async fn list_invoices(&self) -> VerifyResult<Vec<Invoice>>;

    /// Save a purchase order to storage
    async fn save_purchase_order(&mut self, po: &PurchaseOrder) -> VerifyResult<()>;

    /// Get a purchase order by ID
    async fn get_purchase_order(&self, po_id: &str) -> VerifyResult<Option<PurchaseOrder>>;

    /// List all purchase orders
    async fn list_purchase_orders(&self) -> VerifyResult<Vec<PurchaseOrder>>;

    /// Save a goods receipt to storage
    async fn save_goods_receipt(&mut self, gr: &GoodsReceipt) -> VerifyResult<()>;

    /// Get a goods receipt by ID
    async fn get_goods_receipt(&self, gr_id: &str) -> VerifyResult<Option<GoodsReceipt>>;

    /// List all goods receipts
    async fn list_goods_receipts(&self) -> VerifyResult<Vec<GoodsReceipt>>;

    /// Save a verification result to storage
    ///
    /// Results are immutable; implementations only ever insert and read
    /// them back verbatim.
    async fn save_verification(&mut self, result: &VerificationResult) -> VerifyResult<()>;

    /// Get a verification result by ID
    async fn get_verification(&self, result_id: &str) -> VerifyResult<Option<VerificationResult>>;

    /// List all verification results
    async fn list_verifications(&self) -> VerifyResult<Vec<VerificationResult>>;
}

/// Trait for implementing custom document validation rules
///
/// Ingested documents are untrusted (the OCR/scraping boundary is lossy and
/// heuristic), so they pass through a validator before being stored.
pub trait DocumentValidator: Send + Sync {
    /// Validate an invoice before saving
    fn validate_invoice(&self, invoice: &Invoice) -> VerifyResult<()>;

    /// Validate a purchase order before saving
    fn validate_purchase_order(&self, po: &PurchaseOrder) -> VerifyResult<()>;

    /// Validate a goods receipt before saving
    fn validate_goods_receipt(&self, gr: &GoodsReceipt) -> VerifyResult<()>;
}

/// Default document validator with basic rules
pub struct DefaultDocumentValidator;

impl DocumentValidator for DefaultDocumentValidator {
    fn validate_invoice(&self, invoice: &Invoice) -> VerifyResult<()> {
        if invoice.invoice_number.trim().is_empty() {
            return Err(VerificationError::Validation(
                "Invoice number cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_purchase_order(&self, po: &PurchaseOrder) -> VerifyResult<()> {
        if po.po_number.trim().is_empty() {
            return Err(VerificationError::Validation(
                "PO number cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_goods_receipt(&self, gr: &GoodsReceipt) -> VerifyResult<()> {
        if gr.gr_number.trim().is_empty() {
            return Err(VerificationError::Validation(
                "GR number cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
