//! Three-way match verification example

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use verification_core::utils::MemoryStore;
use verification_core::{LineItem, VerificationService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("🧾 Verification Core - Three-Way Match Example\n");

    let storage = MemoryStore::new();
    let mut service = VerificationService::new(storage);

    // 1. Record the three documents
    println!("📄 Recording documents...");

    let invoice = service
        .create_invoice(
            "INV-2024-0042".to_string(),
            "Acme Supplies".to_string(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            BigDecimal::from(10600),
            vec![
                LineItem::from_unit_price(
                    "Laptops".to_string(),
                    BigDecimal::from(10),
                    BigDecimal::from(1000),
                ),
                LineItem::from_unit_price(
                    "Docking Stations".to_string(),
                    BigDecimal::from(6),
                    BigDecimal::from(100),
                ),
            ],
        )
        .await?;
    println!("  ✓ Invoice {} recorded", invoice.invoice_number);

    let po = service
        .create_purchase_order(
            "PO-2024-0108".to_string(),
            "Acme Supplies".to_string(),
            NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(),
            BigDecimal::from(11100),
            vec![
                LineItem::from_unit_price(
                    "Laptops".to_string(),
                    BigDecimal::from(10),
                    BigDecimal::from(1050),
                ),
                LineItem::from_unit_price(
                    "Docking Stations".to_string(),
                    BigDecimal::from(6),
                    BigDecimal::from(100),
                ),
            ],
        )
        .await?;
    println!("  ✓ Purchase order {} recorded", po.po_number);

    let gr = service
        .create_goods_receipt(
            "GR-2024-0315".to_string(),
            po.po_number.clone(),
            "Acme Supplies".to_string(),
            NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(),
            BigDecimal::from(10050),
            vec![
                LineItem::from_unit_price(
                    "Laptops".to_string(),
                    BigDecimal::from(9),
                    BigDecimal::from(1050),
                ),
                LineItem::from_unit_price(
                    "Docking Stations".to_string(),
                    BigDecimal::from(6),
                    BigDecimal::from(100),
                ),
            ],
        )
        .await?;
    println!("  ✓ Goods receipt {} recorded\n", gr.gr_number);

    // 2. Run the three-way match
    println!("🔍 Running three-way match...\n");
    let result = service.verify(&invoice.id, &po.id, &gr.id).await?;

    for line in &result.line_item_matches {
        println!(
            "  {} — status: {}, price variance: {}%, quantity variance: {}%, amount variance: {}",
            line.description,
            line.status,
            line.price_variance_pct.round(2),
            line.quantity_variance_pct.round(2),
            line.amount_variance.round(2),
        );
    }

    println!("\n📋 Overall status: {}", result.overall_status);
    println!("  Total amount variance: {}", result.total_variance.round(2));

    // 3. Results are persisted and retrievable by id
    let stored = service.get_verification_required(&result.id).await?;
    println!("\n💾 Stored verification {} retrieved verbatim", stored.id);

    Ok(())
}
