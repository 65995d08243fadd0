//! Best-effort invoice field scraping from extracted document text
//!
//! This is the OCR boundary of the system: upstream tooling turns a scanned
//! or printable invoice into plain text, and this parser scrapes structured
//! fields out of it with regular expressions. The scraping is lossy and
//! heuristic by design; its output is untrusted and must pass through
//! [`ParsedInvoice::try_into_invoice`] before it reaches the matching
//! engine.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::Invoice;

/// Fields scraped from raw invoice text
///
/// Unrecovered fields keep their defaults: empty strings and a zero total.
/// Line items are never recovered from text; they have to be entered or
/// corrected by hand before verification.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParsedInvoice {
    /// Scraped invoice number, empty if not found
    pub invoice_number: String,
    /// Scraped date string in its original form, empty if not found
    pub invoice_date: String,
    /// Scraped total amount, 0 if not found
    pub total_amount: BigDecimal,
}

impl ParsedInvoice {
    /// Promote the scraped fields to a structurally valid [`Invoice`]
    ///
    /// Fails when the scrape did not recover a usable invoice number or
    /// date. The resulting invoice has no line items.
    pub fn try_into_invoice(self, vendor_name: String) -> Result<Invoice, IngestError> {
        if self.invoice_number.trim().is_empty() {
            return Err(IngestError::MissingField("invoice_number"));
        }
        let invoice_date = parse_scraped_date(&self.invoice_date)?;

        Ok(Invoice::new(
            uuid::Uuid::new_v4().to_string(),
            self.invoice_number,
            vendor_name,
            invoice_date,
            self.total_amount,
            Vec::new(),
        ))
    }
}

/// Parse a scraped date like `3/14/2024`, `3-14-24`, or `03/14/2024`
fn parse_scraped_date(raw: &str) -> Result<NaiveDate, IngestError> {
    const FORMATS: [&str; 4] = ["%m/%d/%Y", "%m-%d-%Y", "%m/%d/%y", "%m-%d-%y"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| IngestError::InvalidDate(raw.to_string()))
}

/// Regex-based invoice text scraper
#[derive(Debug)]
pub struct InvoiceTextParser {
    invoice_number_re: Regex,
    total_amount_re: Regex,
    date_re: Regex,
}

impl Default for InvoiceTextParser {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceTextParser {
    /// Create a parser with the standard field patterns
    pub fn new() -> Self {
        Self {
            invoice_number_re: Regex::new(r"(?i)invoice\s*#?\s*:?\s*(\w+)")
                .expect("invoice number regex"),
            total_amount_re: Regex::new(r"(?i)total\s*:?\s*\$?(\d+\.?\d*)")
                .expect("total amount regex"),
            date_re: Regex::new(r"(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})").expect("date regex"),
        }
    }

    /// Scrape invoice fields from extracted text
    ///
    /// Never fails: fields that cannot be found are left at their defaults.
    pub fn parse(&self, text: &str) -> ParsedInvoice {
        let mut parsed = ParsedInvoice::default();

        if let Some(caps) = self.invoice_number_re.captures(text) {
            parsed.invoice_number = caps[1].to_string();
        }

        if let Some(caps) = self.total_amount_re.captures(text) {
            // The pattern only admits digits and a dot, so this parses
            // unless the capture is a lone dot-less overflow, which
            // BigDecimal handles as well.
            if let Ok(amount) = caps[1].parse::<BigDecimal>() {
                parsed.total_amount = amount;
            }
        }

        if let Some(caps) = self.date_re.captures(text) {
            parsed.invoice_date = caps[1].to_string();
        }

        if parsed.invoice_number.is_empty() {
            tracing::debug!("no invoice number recovered from text");
        }

        parsed
    }
}

/// Errors from promoting scraped text to a structured document
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Required field missing from scraped text: {0}")]
    MissingField(&'static str),
    #[error("Unrecognized date format: {0}")]
    InvalidDate(String),
}
