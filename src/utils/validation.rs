//! Validation utilities

use bigdecimal::BigDecimal;

use crate::traits::*;
use crate::types::*;

/// Validate that a document number is usable as an identifier
pub fn validate_document_number(number: &str) -> VerifyResult<()> {
    if number.trim().is_empty() {
        return Err(VerificationError::Validation(
            "Document number cannot be empty".to_string(),
        ));
    }

    if number.len() > 50 {
        return Err(VerificationError::Validation(
            "Document number cannot exceed 50 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate that a vendor name is present
pub fn validate_vendor_name(name: &str) -> VerifyResult<()> {
    if name.trim().is_empty() {
        return Err(VerificationError::Validation(
            "Vendor name cannot be empty".to_string(),
        ));
    }

    if name.len() > 200 {
        return Err(VerificationError::Validation(
            "Vendor name cannot exceed 200 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate a single line item
///
/// Quantity must be non-negative; unit price should be non-negative but is
/// not enforced upstream, so only the quantity is rejected here. The amount
/// is deliberately not checked against quantity x unit_price.
pub fn validate_line_item(item: &LineItem) -> VerifyResult<()> {
    if item.description.trim().is_empty() {
        return Err(VerificationError::Validation(
            "Line item description cannot be empty".to_string(),
        ));
    }

    if item.quantity < BigDecimal::from(0) {
        return Err(VerificationError::Validation(format!(
            "Line item '{}' has a negative quantity",
            item.description
        )));
    }

    Ok(())
}

/// Strict document validator for untrusted (ingested) documents
///
/// Applies the basic number checks plus vendor and line-item validation.
pub struct StrictDocumentValidator;

impl DocumentValidator for StrictDocumentValidator {
    fn validate_invoice(&self, invoice: &Invoice) -> VerifyResult<()> {
        validate_document_number(&invoice.invoice_number)?;
        validate_vendor_name(&invoice.vendor_name)?;
        for item in &invoice.line_items {
            validate_line_item(item)?;
        }
        Ok(())
    }

    fn validate_purchase_order(&self, po: &PurchaseOrder) -> VerifyResult<()> {
        validate_document_number(&po.po_number)?;
        validate_vendor_name(&po.vendor_name)?;
        for item in &po.line_items {
            validate_line_item(item)?;
        }
        Ok(())
    }

    fn validate_goods_receipt(&self, gr: &GoodsReceipt) -> VerifyResult<()> {
        validate_document_number(&gr.gr_number)?;
        validate_document_number(&gr.po_number)?;
        validate_vendor_name(&gr.vendor_name)?;
        for item in &gr.line_items {
            validate_line_item(item)?;
        }
        Ok(())
    }
}
