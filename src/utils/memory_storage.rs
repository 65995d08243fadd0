//! In-memory storage implementation for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::matching::engine::VerificationResult;
use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    invoices: Arc<RwLock<HashMap<String, Invoice>>>,
    purchase_orders: Arc<RwLock<HashMap<String, PurchaseOrder>>>,
    goods_receipts: Arc<RwLock<HashMap<String, GoodsReceipt>>>,
    verifications: Arc<RwLock<HashMap<String, VerificationResult>>>,
}

impl MemoryStore {
    /// Create a new memory store instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.invoices.write().unwrap().clear();
        self.purchase_orders.write().unwrap().clear();
        self.goods_receipts.write().unwrap().clear();
        self.verifications.write().unwrap().clear();
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn save_invoice(&mut self, invoice: &Invoice) -> VerifyResult<()> {
        self.invoices
            .write()
            .unwrap()
            .insert(invoice.id.clone(), invoice.clone());
        Ok(())
    }

    async fn get_invoice(&self, invoice_id: &str) -> VerifyResult<Option<Invoice>> {
        Ok(self.invoices.read().unwrap().get(invoice_id).cloned())
    }

    async fn list_invoices(&self) -> VerifyResult<Vec<Invoice>> {
        Ok(self.invoices.read().unwrap().values().cloned().collect())
    }

    async fn save_purchase_order(&mut self, po: &PurchaseOrder) -> VerifyResult<()> {
        self.purchase_orders
            .write()
            .unwrap()
            .insert(po.id.clone(), po.clone());
        Ok(())
    }

    async fn get_purchase_order(&self, po_id: &str) -> VerifyResult<Option<PurchaseOrder>> {
        Ok(self.purchase_orders.read().unwrap().get(po_id).cloned())
    }

    async fn list_purchase_orders(&self) -> VerifyResult<Vec<PurchaseOrder>> {
        Ok(self
            .purchase_orders
            .read()
            .unwrap()
            .values()
            .cloned()
            .collect())
    }

    async fn save_goods_receipt(&mut self, gr: &GoodsReceipt) -> VerifyResult<()> {
        self.goods_receipts
            .write()
            .unwrap()
            .insert(gr.id.clone(), gr.clone());
        Ok(())
    }

    async fn get_goods_receipt(&self, gr_id: &str) -> VerifyResult<Option<GoodsReceipt>> {
        Ok(self.goods_receipts.read().unwrap().get(gr_id).cloned())
    }

    async fn list_goods_receipts(&self) -> VerifyResult<Vec<GoodsReceipt>> {
        Ok(self
            .goods_receipts
            .read()
            .unwrap()
            .values()
            .cloned()
            .collect())
    }

    async fn save_verification(&mut self, result: &VerificationResult) -> VerifyResult<()> {
        self.verifications
            .write()
            .unwrap()
            .insert(result.id.clone(), result.clone());
        Ok(())
    }

    async fn get_verification(
        &self,
        result_id: &str,
    ) -> VerifyResult<Option<VerificationResult>> {
        Ok(self.verifications.read().unwrap().get(result_id).cloned())
    }

    async fn list_verifications(&self) -> VerifyResult<Vec<VerificationResult>> {
        Ok(self
            .verifications
            .read()
            .unwrap()
            .values()
            .cloned()
            .collect())
    }
}
