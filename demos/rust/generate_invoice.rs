/// Invoice example: a single-page A4 invoice with an item table and totals.
///
/// Run with:
///   cargo run --example generate_invoice -p invoice-demos [logo.png|logo.jpg]
///
/// Set RUST_LOG=debug to see the computed totals and table placement.
///
/// Opens output at: demos/output/invoice.pdf
use std::error::Error;
use std::fs;

use invoice_pdf::{InvoiceHeader, InvoiceLineItem, InvoiceRenderer, LogoImage};
use log::info;
use rust_decimal::Decimal;

fn line_items() -> Vec<InvoiceLineItem> {
    vec![
        InvoiceLineItem::new("Web Development Services", 40, Decimal::new(15000, 2)),
        InvoiceLineItem::new("UI/UX Design", 20, Decimal::new(12500, 2)),
        InvoiceLineItem::new("Server Setup & Configuration", 1, Decimal::new(50000, 2)),
        InvoiceLineItem::new("Monthly Maintenance", 3, Decimal::new(19999, 2)),
        InvoiceLineItem::new("Brand Identity Guide", 1, Decimal::new(249995, 3)),
    ]
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut header = InvoiceHeader::new(
        "Acme Web Studio",
        "Jane Roe",
        "jane.roe@example.com",
        "$",
        Decimal::from(18),
    );
    if let Some(path) = std::env::args().nth(1) {
        let logo = LogoImage::decode(&fs::read(&path)?)?;
        info!("using logo {} ({}x{})", path, logo.width, logo.height);
        header = header.with_logo(logo);
    }

    let bytes = InvoiceRenderer::default()
        .with_compression(true)
        .render(&header, &line_items())?;

    fs::create_dir_all("demos/output")?;
    let path = "demos/output/invoice.pdf";
    fs::write(path, &bytes)?;
    println!("Written to {} ({} bytes)", path, bytes.len());
    Ok(())
}
