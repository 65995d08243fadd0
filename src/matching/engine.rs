//! Three-way match reconciliation engine
//!
//! The engine is a pure function over three in-memory documents: it performs
//! no I/O, holds no state across invocations, and is safe to call
//! concurrently. Given identical inputs the numeric and status fields of the
//! result are reproducible; only the identifier and timestamps differ.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::{GoodsReceipt, Invoice, LineItem, PurchaseOrder};

/// Outcome for a single invoice line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// All variances within tolerance
    Pass,
    /// Unit price deviates from the PO price beyond tolerance
    PriceVariance,
    /// Quantity deviates from the GR quantity beyond tolerance
    QuantityVariance,
    /// No PO or GR line with a matching description
    NoMatch,
}

impl MatchStatus {
    /// Wire/storage representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Pass => "pass",
            MatchStatus::PriceVariance => "price_variance",
            MatchStatus::QuantityVariance => "quantity_variance",
            MatchStatus::NoMatch => "no_match",
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate verdict for a verification run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    /// Every line matched within tolerance
    Pass,
    /// Exactly one line tripped a price or quantity variance
    Warning,
    /// Two or more variant lines, or any unmatched line
    Fail,
}

impl OverallStatus {
    /// Wire/storage representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallStatus::Pass => "pass",
            OverallStatus::Warning => "warning",
            OverallStatus::Fail => "fail",
        }
    }
}

impl std::fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-line match record
///
/// PO and GR figures are reported as 0 when the corresponding document has
/// no line with a matching description. Variance percentages are the raw
/// ratios multiplied by 100; `amount_variance` is an absolute dollar figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemMatch {
    /// Invoice line description (the matching key)
    pub description: String,
    /// Quantity billed on the invoice
    pub invoice_qty: BigDecimal,
    /// Unit price billed on the invoice
    pub invoice_price: BigDecimal,
    /// Line amount billed on the invoice
    pub invoice_amount: BigDecimal,
    /// Quantity on the matched PO line, 0 if unmatched
    pub po_qty: BigDecimal,
    /// Unit price on the matched PO line, 0 if unmatched
    pub po_price: BigDecimal,
    /// Quantity on the matched GR line, 0 if unmatched
    pub gr_qty: BigDecimal,
    /// Price variance as a percentage of the PO unit price
    pub price_variance_pct: BigDecimal,
    /// Quantity variance as a percentage of the GR quantity
    pub quantity_variance_pct: BigDecimal,
    /// Absolute difference between the invoice amount and what should have
    /// been billed (PO unit price x GR quantity)
    pub amount_variance: BigDecimal,
    /// Outcome for this line
    pub status: MatchStatus,
}

/// Result of one three-way match verification run
///
/// Immutable once produced: a result is stored and later retrieved verbatim,
/// never updated. Document references are identifiers only; the result does
/// not own the documents it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Unique identifier, freshly generated per invocation
    pub id: String,
    /// Identifier of the verified invoice
    pub invoice_id: String,
    /// Identifier of the purchase order
    pub po_id: String,
    /// Identifier of the goods receipt
    pub gr_id: String,
    /// When the verification was computed
    pub verification_date: chrono::NaiveDateTime,
    /// Aggregate verdict
    pub overall_status: OverallStatus,
    /// One record per invoice line item, in invoice order
    pub line_item_matches: Vec<LineItemMatch>,
    /// Running sum of absolute amount variances across all lines
    pub total_variance: BigDecimal,
    /// Running sum of price variance ratios across all lines
    pub price_variance: BigDecimal,
    /// Running sum of quantity variance ratios across all lines
    pub quantity_variance: BigDecimal,
    /// When the result record was created
    pub created_at: chrono::NaiveDateTime,
}

/// Variance figures for one line, kept as raw ratios for aggregation
struct LineVariances {
    price_diff: BigDecimal,
    qty_diff: BigDecimal,
    amount_diff: BigDecimal,
}

/// Three-way match engine
///
/// Matches each invoice line item against the purchase order and goods
/// receipt by description, computes price/quantity/amount variances against
/// a fixed 5% tolerance, and folds per-line outcomes into an overall
/// pass/warning/fail verdict.
#[derive(Debug, Default)]
pub struct MatchEngine;

impl MatchEngine {
    /// Create a new match engine
    pub fn new() -> Self {
        Self
    }

    /// The maximum relative variance allowed before a line is flagged (5%)
    ///
    /// Fixed by policy; not configurable per document or vendor.
    pub fn tolerance() -> BigDecimal {
        BigDecimal::from(5) / BigDecimal::from(100)
    }

    /// Verify an invoice against its purchase order and goods receipt
    ///
    /// The three documents are assumed structurally valid and correctly
    /// associated; the engine does not check that `gr.po_number` refers to
    /// `po`. Always returns a result for well-formed input.
    pub fn verify(
        &self,
        invoice: &Invoice,
        po: &PurchaseOrder,
        gr: &GoodsReceipt,
    ) -> VerificationResult {
        let mut line_matches = Vec::with_capacity(invoice.line_items.len());
        let mut total_variance = BigDecimal::from(0);
        let mut price_variance = BigDecimal::from(0);
        let mut quantity_variance = BigDecimal::from(0);

        for item in &invoice.line_items {
            let (record, variances) = self.match_line(item, po, gr);
            total_variance += &variances.amount_diff;
            price_variance += &variances.price_diff;
            quantity_variance += &variances.qty_diff;
            line_matches.push(record);
        }

        let overall_status = line_matches
            .iter()
            .fold(OverallStatus::Pass, |acc, m| Self::escalate(acc, m.status));

        let now = chrono::Utc::now().naive_utc();
        VerificationResult {
            id: uuid::Uuid::new_v4().to_string(),
            invoice_id: invoice.id.clone(),
            po_id: po.id.clone(),
            gr_id: gr.id.clone(),
            verification_date: now,
            overall_status,
            line_item_matches: line_matches,
            total_variance,
            price_variance,
            quantity_variance,
            created_at: now,
        }
    }

    /// Match one invoice line against the PO and GR and compute variances
    fn match_line(
        &self,
        item: &LineItem,
        po: &PurchaseOrder,
        gr: &GoodsReceipt,
    ) -> (LineItemMatch, LineVariances) {
        let key = item.description.to_lowercase();

        // First match by stored line-item order; duplicate descriptions
        // beyond the first are ignored.
        let po_match = po
            .line_items
            .iter()
            .find(|li| li.description.to_lowercase() == key);
        let gr_match = gr
            .line_items
            .iter()
            .find(|li| li.description.to_lowercase() == key);

        let zero = BigDecimal::from(0);
        let (variances, status) = match (po_match, gr_match) {
            (Some(po_item), Some(gr_item)) => {
                let price_diff = if po_item.unit_price > zero {
                    (&item.unit_price - &po_item.unit_price).abs() / &po_item.unit_price
                } else {
                    // Zero-division policy: report no variance rather than
                    // fail. This masks true variance when the PO price is
                    // zero; auditing callers should flag it separately.
                    tracing::warn!(
                        description = %item.description,
                        "PO unit price is not positive, price variance reported as 0"
                    );
                    zero.clone()
                };

                let qty_diff = if gr_item.quantity > zero {
                    (&item.quantity - &gr_item.quantity).abs() / &gr_item.quantity
                } else {
                    tracing::warn!(
                        description = %item.description,
                        "GR quantity is not positive, quantity variance reported as 0"
                    );
                    zero.clone()
                };

                // "Should have been billed": PO unit price x GR quantity.
                let amount_diff = (&item.amount - &po_item.unit_price * &gr_item.quantity).abs();

                let tolerance = Self::tolerance();
                // The quantity check runs after the price check and wins
                // when both thresholds are exceeded.
                let status = if qty_diff > tolerance {
                    MatchStatus::QuantityVariance
                } else if price_diff > tolerance {
                    MatchStatus::PriceVariance
                } else {
                    MatchStatus::Pass
                };

                (
                    LineVariances {
                        price_diff,
                        qty_diff,
                        amount_diff,
                    },
                    status,
                )
            }
            _ => (
                // No computation attempted; all variance figures stay 0.
                LineVariances {
                    price_diff: zero.clone(),
                    qty_diff: zero.clone(),
                    amount_diff: zero.clone(),
                },
                MatchStatus::NoMatch,
            ),
        };

        let record = LineItemMatch {
            description: item.description.clone(),
            invoice_qty: item.quantity.clone(),
            invoice_price: item.unit_price.clone(),
            invoice_amount: item.amount.clone(),
            po_qty: po_match.map_or_else(|| zero.clone(), |li| li.quantity.clone()),
            po_price: po_match.map_or_else(|| zero.clone(), |li| li.unit_price.clone()),
            gr_qty: gr_match.map_or_else(|| zero.clone(), |li| li.quantity.clone()),
            price_variance_pct: &variances.price_diff * BigDecimal::from(100),
            quantity_variance_pct: &variances.qty_diff * BigDecimal::from(100),
            amount_variance: variances.amount_diff.clone(),
            status,
        };

        (record, variances)
    }

    /// Escalation reducer: pass -> warning -> fail, never improving
    ///
    /// A variant line takes pass to warning and any later variant line takes
    /// warning to fail, so two or more variant lines anywhere force fail. An
    /// unmatched line forces fail unconditionally.
    fn escalate(current: OverallStatus, line: MatchStatus) -> OverallStatus {
        match (current, line) {
            (_, MatchStatus::NoMatch) => OverallStatus::Fail,
            (current, MatchStatus::Pass) => current,
            (OverallStatus::Pass, _) => OverallStatus::Warning,
            _ => OverallStatus::Fail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn invoice_with(items: Vec<LineItem>) -> Invoice {
        Invoice::new(
            "inv1".to_string(),
            "INV-001".to_string(),
            "Acme Corp".to_string(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            items.iter().map(|i| &i.amount).sum(),
            items,
        )
    }

    fn po_with(items: Vec<LineItem>) -> PurchaseOrder {
        PurchaseOrder::new(
            "po1".to_string(),
            "PO-001".to_string(),
            "Acme Corp".to_string(),
            NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(),
            items.iter().map(|i| &i.amount).sum(),
            items,
        )
    }

    fn gr_with(items: Vec<LineItem>) -> GoodsReceipt {
        GoodsReceipt::new(
            "gr1".to_string(),
            "GR-001".to_string(),
            "PO-001".to_string(),
            "Acme Corp".to_string(),
            NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(),
            items.iter().map(|i| &i.amount).sum(),
            items,
        )
    }

    fn laptop_line(qty: i32, price: i32) -> LineItem {
        LineItem::from_unit_price(
            "Laptops".to_string(),
            BigDecimal::from(qty),
            BigDecimal::from(price),
        )
    }

    #[test]
    fn test_quantity_variance_yields_warning() {
        // Invoice bills 10 at 1000; PO ordered 10 at 1050; GR received 9.
        // Price variance 50/1050 is within 5%, quantity variance 1/9 is not.
        let invoice = invoice_with(vec![laptop_line(10, 1000)]);
        let po = po_with(vec![laptop_line(10, 1050)]);
        let gr = gr_with(vec![laptop_line(9, 1050)]);

        let result = MatchEngine::new().verify(&invoice, &po, &gr);

        assert_eq!(result.overall_status, OverallStatus::Warning);
        assert_eq!(result.line_item_matches.len(), 1);

        let line = &result.line_item_matches[0];
        assert_eq!(line.status, MatchStatus::QuantityVariance);
        assert!(line.price_variance_pct < BigDecimal::from(5));
        assert!(line.quantity_variance_pct > BigDecimal::from(5));
        // |10000 - 1050 * 9| = 550
        assert_eq!(line.amount_variance, BigDecimal::from(550));
        assert_eq!(result.total_variance, BigDecimal::from(550));
    }

    #[test]
    fn test_two_variant_lines_escalate_to_fail() {
        // Two variant lines anywhere force fail, even when each on its own
        // would only be a warning. Preserved business rule; see DESIGN.md.
        let invoice = invoice_with(vec![
            laptop_line(10, 1000),
            LineItem::from_unit_price(
                "Docking Stations".to_string(),
                BigDecimal::from(5),
                BigDecimal::from(100),
            ),
        ]);
        let po = po_with(vec![
            laptop_line(10, 1050),
            LineItem::from_unit_price(
                "Docking Stations".to_string(),
                BigDecimal::from(5),
                BigDecimal::from(200),
            ),
        ]);
        let gr = gr_with(vec![
            laptop_line(9, 1050),
            LineItem::from_unit_price(
                "Docking Stations".to_string(),
                BigDecimal::from(5),
                BigDecimal::from(200),
            ),
        ]);

        let result = MatchEngine::new().verify(&invoice, &po, &gr);

        assert_eq!(result.overall_status, OverallStatus::Fail);
        assert_eq!(result.line_item_matches[0].status, MatchStatus::QuantityVariance);
        assert_eq!(result.line_item_matches[1].status, MatchStatus::PriceVariance);
    }

    #[test]
    fn test_no_match_forces_fail() {
        let invoice = invoice_with(vec![
            laptop_line(10, 1000),
            LineItem::from_unit_price(
                "Monitors".to_string(),
                BigDecimal::from(4),
                BigDecimal::from(300),
            ),
        ]);
        let po = po_with(vec![laptop_line(10, 1000)]);
        let gr = gr_with(vec![laptop_line(10, 1000)]);

        let result = MatchEngine::new().verify(&invoice, &po, &gr);

        assert_eq!(result.overall_status, OverallStatus::Fail);

        let monitors = &result.line_item_matches[1];
        assert_eq!(monitors.status, MatchStatus::NoMatch);
        assert_eq!(monitors.po_qty, BigDecimal::from(0));
        assert_eq!(monitors.po_price, BigDecimal::from(0));
        assert_eq!(monitors.gr_qty, BigDecimal::from(0));
        assert_eq!(monitors.price_variance_pct, BigDecimal::from(0));
        assert_eq!(monitors.quantity_variance_pct, BigDecimal::from(0));
        assert_eq!(monitors.amount_variance, BigDecimal::from(0));
    }

    #[test]
    fn test_partial_match_reports_found_side_figures() {
        // Present on the PO but missing from the GR: still no_match, but the
        // record keeps the PO figures it did find.
        let invoice = invoice_with(vec![laptop_line(10, 1000)]);
        let po = po_with(vec![laptop_line(10, 1000)]);
        let gr = gr_with(vec![]);

        let result = MatchEngine::new().verify(&invoice, &po, &gr);

        let line = &result.line_item_matches[0];
        assert_eq!(line.status, MatchStatus::NoMatch);
        assert_eq!(line.po_qty, BigDecimal::from(10));
        assert_eq!(line.po_price, BigDecimal::from(1000));
        assert_eq!(line.gr_qty, BigDecimal::from(0));
        assert_eq!(result.overall_status, OverallStatus::Fail);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let invoice = invoice_with(vec![LineItem::from_unit_price(
            "LAPTOPS".to_string(),
            BigDecimal::from(10),
            BigDecimal::from(1000),
        )]);
        let po = po_with(vec![laptop_line(10, 1000)]);
        let gr = gr_with(vec![LineItem::from_unit_price(
            "laptops".to_string(),
            BigDecimal::from(10),
            BigDecimal::from(1000),
        )]);

        let result = MatchEngine::new().verify(&invoice, &po, &gr);

        assert_eq!(result.overall_status, OverallStatus::Pass);
        assert_eq!(result.line_item_matches[0].status, MatchStatus::Pass);
    }

    #[test]
    fn test_first_match_wins_on_duplicate_descriptions() {
        let invoice = invoice_with(vec![laptop_line(10, 1000)]);
        // Two PO lines share the description; only the first is used.
        let po = po_with(vec![laptop_line(10, 1000), laptop_line(99, 9999)]);
        let gr = gr_with(vec![laptop_line(10, 1000)]);

        let result = MatchEngine::new().verify(&invoice, &po, &gr);

        let line = &result.line_item_matches[0];
        assert_eq!(line.po_price, BigDecimal::from(1000));
        assert_eq!(line.status, MatchStatus::Pass);
    }

    #[test]
    fn test_zero_po_price_reports_zero_price_variance() {
        let invoice = invoice_with(vec![laptop_line(10, 1000)]);
        let po = po_with(vec![laptop_line(10, 0)]);
        let gr = gr_with(vec![laptop_line(10, 0)]);

        let result = MatchEngine::new().verify(&invoice, &po, &gr);

        let line = &result.line_item_matches[0];
        assert_eq!(line.price_variance_pct, BigDecimal::from(0));
        assert_eq!(line.status, MatchStatus::Pass);
        // amount_diff = |10000 - 0 * 10| = 10000 still accumulates
        assert_eq!(result.total_variance, BigDecimal::from(10000));
    }

    #[test]
    fn test_zero_gr_quantity_reports_zero_quantity_variance() {
        let invoice = invoice_with(vec![laptop_line(10, 1000)]);
        let po = po_with(vec![laptop_line(10, 1000)]);
        let gr = gr_with(vec![laptop_line(0, 1000)]);

        let result = MatchEngine::new().verify(&invoice, &po, &gr);

        let line = &result.line_item_matches[0];
        assert_eq!(line.quantity_variance_pct, BigDecimal::from(0));
        assert_eq!(line.status, MatchStatus::Pass);
        // amount_diff = |10000 - 1000 * 0| = 10000
        assert_eq!(line.amount_variance, BigDecimal::from(10000));
    }

    #[test]
    fn test_quantity_check_overrides_price_label_on_single_line() {
        // One line exceeding both thresholds is still a single variant line:
        // the label is quantity_variance and the overall verdict is warning.
        let invoice = invoice_with(vec![laptop_line(10, 1000)]);
        let po = po_with(vec![laptop_line(10, 500)]);
        let gr = gr_with(vec![laptop_line(5, 500)]);

        let result = MatchEngine::new().verify(&invoice, &po, &gr);

        let line = &result.line_item_matches[0];
        assert_eq!(line.status, MatchStatus::QuantityVariance);
        assert!(line.price_variance_pct > BigDecimal::from(5));
        assert_eq!(result.overall_status, OverallStatus::Warning);
    }

    #[test]
    fn test_empty_invoice_passes_with_zero_aggregates() {
        let invoice = invoice_with(vec![]);
        let po = po_with(vec![laptop_line(10, 1000)]);
        let gr = gr_with(vec![laptop_line(10, 1000)]);

        let result = MatchEngine::new().verify(&invoice, &po, &gr);

        assert_eq!(result.overall_status, OverallStatus::Pass);
        assert!(result.line_item_matches.is_empty());
        assert_eq!(result.total_variance, BigDecimal::from(0));
        assert_eq!(result.price_variance, BigDecimal::from(0));
        assert_eq!(result.quantity_variance, BigDecimal::from(0));
    }

    #[test]
    fn test_one_record_per_invoice_line_in_order() {
        let invoice = invoice_with(vec![
            laptop_line(1, 10),
            LineItem::from_unit_price("Mice".to_string(), BigDecimal::from(2), BigDecimal::from(20)),
            LineItem::from_unit_price("Keyboards".to_string(), BigDecimal::from(3), BigDecimal::from(30)),
        ]);
        let po = po_with(vec![laptop_line(1, 10)]);
        let gr = gr_with(vec![laptop_line(1, 10)]);

        let result = MatchEngine::new().verify(&invoice, &po, &gr);

        let descriptions: Vec<_> = result
            .line_item_matches
            .iter()
            .map(|m| m.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["Laptops", "Mice", "Keyboards"]);
    }

    #[test]
    fn test_verification_is_idempotent_modulo_identity_fields() {
        let invoice = invoice_with(vec![laptop_line(10, 1000)]);
        let po = po_with(vec![laptop_line(10, 1050)]);
        let gr = gr_with(vec![laptop_line(9, 1050)]);

        let engine = MatchEngine::new();
        let first = engine.verify(&invoice, &po, &gr);
        let second = engine.verify(&invoice, &po, &gr);

        assert_ne!(first.id, second.id);
        assert_eq!(first.overall_status, second.overall_status);
        assert_eq!(first.line_item_matches, second.line_item_matches);
        assert_eq!(first.total_variance, second.total_variance);
        assert_eq!(first.price_variance, second.price_variance);
        assert_eq!(first.quantity_variance, second.quantity_variance);
    }

    #[test]
    fn test_status_serialization_forms() {
        assert_eq!(
            serde_json::to_string(&MatchStatus::QuantityVariance).unwrap(),
            "\"quantity_variance\""
        );
        assert_eq!(
            serde_json::to_string(&OverallStatus::Warning).unwrap(),
            "\"warning\""
        );
        assert_eq!(MatchStatus::NoMatch.as_str(), "no_match");
        assert_eq!(OverallStatus::Fail.as_str(), "fail");
    }
}
