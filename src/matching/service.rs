//! Verification service orchestrating documents, storage, and the engine

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::matching::engine::{MatchEngine, VerificationResult};
use crate::traits::*;
use crate::types::*;

/// Main verification service coordinating document storage and three-way
/// matching
///
/// Persistence is an injected capability: the service owns a
/// [`DocumentStore`] implementation and neither the service nor the engine
/// depends on any process-global storage handle.
pub struct VerificationService<S: DocumentStore> {
    storage: S,
    engine: MatchEngine,
    validator: Box<dyn DocumentValidator>,
}

impl<S: DocumentStore> VerificationService<S> {
    /// Create a new verification service with the given storage backend
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            engine: MatchEngine::new(),
            validator: Box::new(DefaultDocumentValidator),
        }
    }

    /// Create a new verification service with a custom validator
    pub fn with_validator(storage: S, validator: Box<dyn DocumentValidator>) -> Self {
        Self {
            storage,
            engine: MatchEngine::new(),
            validator,
        }
    }

    // Document operations

    /// Create and persist a new invoice
    pub async fn create_invoice(
        &mut self,
        invoice_number: String,
        vendor_name: String,
        invoice_date: NaiveDate,
        total_amount: BigDecimal,
        line_items: Vec<LineItem>,
    ) -> VerifyResult<Invoice> {
        let invoice = Invoice::new(
            uuid::Uuid::new_v4().to_string(),
            invoice_number,
            vendor_name,
            invoice_date,
            total_amount,
            line_items,
        );
        self.validator.validate_invoice(&invoice)?;
        self.storage.save_invoice(&invoice).await?;
        Ok(invoice)
    }

    /// Get an invoice by ID
    pub async fn get_invoice(&self, invoice_id: &str) -> VerifyResult<Option<Invoice>> {
        self.storage.get_invoice(invoice_id).await
    }

    /// List all invoices
    pub async fn list_invoices(&self) -> VerifyResult<Vec<Invoice>> {
        self.storage.list_invoices().await
    }

    /// Create and persist a new purchase order
    pub async fn create_purchase_order(
        &mut self,
        po_number: String,
        vendor_name: String,
        po_date: NaiveDate,
        total_amount: BigDecimal,
        line_items: Vec<LineItem>,
    ) -> VerifyResult<PurchaseOrder> {
        let po = PurchaseOrder::new(
            uuid::Uuid::new_v4().to_string(),
            po_number,
            vendor_name,
            po_date,
            total_amount,
            line_items,
        );
        self.validator.validate_purchase_order(&po)?;
        self.storage.save_purchase_order(&po).await?;
        Ok(po)
    }

    /// Get a purchase order by ID
    pub async fn get_purchase_order(&self, po_id: &str) -> VerifyResult<Option<PurchaseOrder>> {
        self.storage.get_purchase_order(po_id).await
    }

    /// List all purchase orders
    pub async fn list_purchase_orders(&self) -> VerifyResult<Vec<PurchaseOrder>> {
        self.storage.list_purchase_orders().await
    }

    /// Create and persist a new goods receipt
    pub async fn create_goods_receipt(
        &mut self,
        gr_number: String,
        po_number: String,
        vendor_name: String,
        receipt_date: NaiveDate,
        total_amount: BigDecimal,
        line_items: Vec<LineItem>,
    ) -> VerifyResult<GoodsReceipt> {
        let gr = GoodsReceipt::new(
            uuid::Uuid::new_v4().to_string(),
            gr_number,
            po_number,
            vendor_name,
            receipt_date,
            total_amount,
            line_items,
        );
        self.validator.validate_goods_receipt(&gr)?;
        self.storage.save_goods_receipt(&gr).await?;
        Ok(gr)
    }

    /// Get a goods receipt by ID
    pub async fn get_goods_receipt(&self, gr_id: &str) -> VerifyResult<Option<GoodsReceipt>> {
        self.storage.get_goods_receipt(gr_id).await
    }

    /// List all goods receipts
    pub async fn list_goods_receipts(&self) -> VerifyResult<Vec<GoodsReceipt>> {
        self.storage.list_goods_receipts().await
    }

    // Verification operations

    /// Run a three-way match over three stored documents and persist the
    /// result
    ///
    /// Any unresolvable document is a hard precondition failure: the engine
    /// is never invoked with partial data.
    pub async fn verify(
        &mut self,
        invoice_id: &str,
        po_id: &str,
        gr_id: &str,
    ) -> VerifyResult<VerificationResult> {
        let invoice = self
            .storage
            .get_invoice(invoice_id)
            .await?
            .ok_or_else(|| VerificationError::InvoiceNotFound(invoice_id.to_string()))?;
        let po = self
            .storage
            .get_purchase_order(po_id)
            .await?
            .ok_or_else(|| VerificationError::PurchaseOrderNotFound(po_id.to_string()))?;
        let gr = self
            .storage
            .get_goods_receipt(gr_id)
            .await?
            .ok_or_else(|| VerificationError::GoodsReceiptNotFound(gr_id.to_string()))?;

        let result = self.engine.verify(&invoice, &po, &gr);
        tracing::debug!(
            invoice_id,
            po_id,
            gr_id,
            overall_status = %result.overall_status,
            "three-way match completed"
        );

        self.storage.save_verification(&result).await?;
        Ok(result)
    }

    /// Get a verification result by ID
    pub async fn get_verification(
        &self,
        result_id: &str,
    ) -> VerifyResult<Option<VerificationResult>> {
        self.storage.get_verification(result_id).await
    }

    /// Get a verification result by ID, returning an error if not found
    pub async fn get_verification_required(
        &self,
        result_id: &str,
    ) -> VerifyResult<VerificationResult> {
        self.storage
            .get_verification(result_id)
            .await?
            .ok_or_else(|| VerificationError::VerificationNotFound(result_id.to_string()))
    }

    /// List all verification results
    pub async fn list_verifications(&self) -> VerifyResult<Vec<VerificationResult>> {
        self.storage.list_verifications().await
    }
}
