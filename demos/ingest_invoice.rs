//! Invoice text ingestion example

use verification_core::ingest::InvoiceTextParser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("📄 Verification Core - Invoice Ingestion Example\n");

    let extracted_text = "\
ACME SUPPLIES LTD\n\
Invoice #: INV4821\n\
Date: 3/14/2024\n\
\n\
10 x Laptops .............. $10,000.00\n\
6 x Docking Stations ...... $600.00\n\
\n\
Total: $10600.00\n";

    let parser = InvoiceTextParser::new();
    let parsed = parser.parse(extracted_text);

    println!("Scraped fields:");
    println!("  invoice number: {:?}", parsed.invoice_number);
    println!("  date:           {:?}", parsed.invoice_date);
    println!("  total amount:   {}", parsed.total_amount);
    println!("  (line items are never recovered from text)\n");

    // Scraped output is untrusted; promote it through validation before use.
    let invoice = parsed.try_into_invoice("Acme Supplies".to_string())?;
    println!(
        "✓ Validated invoice {} dated {}, total {}",
        invoice.invoice_number, invoice.invoice_date, invoice.total_amount
    );
    println!("  Line items must be entered by hand before verification.");

    Ok(())
}
