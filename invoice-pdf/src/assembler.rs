use log::{debug, info, warn};

use crate::calculator::{compute, format_amount};
use crate::error::Result;
use crate::invoice::{InvoiceHeader, InvoiceLineItem};
use crate::layout::{TableGeometry, TableLayout};
use crate::page::PageLayout;
use crate::renderer::{DrawingSurface, PdfSurface};

pub const THANK_YOU_NOTE: &str = "Thank you for your business!";
pub const PAYMENT_TERMS_NOTE: &str = "Terms & Conditions: Payment due within 30 days.";

// Header and footer line offsets, in points below the line they follow.
const TIME_LINE_DROP: f64 = 20.0;
const CUSTOMER_LINE_DROP: f64 = 60.0;
const EMAIL_LINE_DROP: f64 = 80.0;
const FOOTER_LINE_GAP: f64 = 20.0;

/// Renders invoices onto a fixed single-page layout.
#[derive(Debug, Clone, Default)]
pub struct InvoiceRenderer {
    pub layout: PageLayout,
    /// Flate-compress the page content stream.
    pub compress: bool,
}

impl InvoiceRenderer {
    pub fn new(layout: PageLayout) -> Self {
        InvoiceRenderer {
            layout,
            compress: false,
        }
    }

    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }

    /// Render one invoice to PDF bytes.
    ///
    /// Nothing is returned unless every step succeeds. Identical
    /// inputs, including the header timestamp, produce identical bytes.
    pub fn render(&self, header: &InvoiceHeader, items: &[InvoiceLineItem]) -> Result<Vec<u8>> {
        let table = self.prepare(header, items)?;

        let mut surface = PdfSurface::new(self.layout.page_width, self.layout.page_height)?;
        surface.set_compression(self.compress)?;
        debug!(
            "opened {}x{}pt surface, compression {}",
            self.layout.page_width,
            self.layout.page_height,
            if self.compress { "on" } else { "off" }
        );

        let bytes = self.draw(&mut surface, header, &table)?;
        info!(
            "rendered invoice for {:?}: {} items, {} bytes",
            header.customer_name,
            items.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Draw one invoice onto `surface` and finish it.
    ///
    /// All validation and layout happen before the first draw call,
    /// so a rejected invoice leaves the surface untouched.
    pub fn render_onto<S: DrawingSurface>(
        &self,
        surface: &mut S,
        header: &InvoiceHeader,
        items: &[InvoiceLineItem],
    ) -> Result<Vec<u8>> {
        let table = self.prepare(header, items)?;
        self.draw(surface, header, &table)
    }

    /// Check the layout and the invoice, compute totals and place the
    /// item table. Touches no surface.
    fn prepare(&self, header: &InvoiceHeader, items: &[InvoiceLineItem]) -> Result<TableGeometry> {
        let layout = &self.layout;
        layout
            .validate()
            .inspect_err(|e| warn!("rejecting page layout: {}", e))?;

        let (rows, totals) = compute(items, header.tax_percent, &header.currency_symbol)
            .and_then(|computed| header.validate().map(|()| computed))
            .inspect_err(|e| warn!("rejecting invoice: {}", e))?;
        debug!(
            "totals: subtotal {} tax {} grand total {}",
            format_amount(totals.subtotal),
            format_amount(totals.tax_amount),
            format_amount(totals.grand_total)
        );

        let (table_x, table_y) = layout.table_origin();
        let table = TableLayout::from_page(layout)
            .layout(&rows, table_x, table_y)
            .inspect_err(|e| warn!("item table does not fit: {}", e))?;
        debug!(
            "table: {} rows, {}pt tall, top at {}",
            table.row_count(),
            table.height(),
            table_y
        );
        Ok(table)
    }

    fn draw<S: DrawingSurface>(
        &self,
        surface: &mut S,
        header: &InvoiceHeader,
        table: &TableGeometry,
    ) -> Result<Vec<u8>> {
        let layout = &self.layout;

        let title = format!("Invoice - {}", header.company_name);
        surface.set_info("Title", &title)?;
        surface.set_info("Creator", "invoice-pdf")?;
        surface.set_info(
            "CreationDate",
            &header.issued_at.format("D:%Y%m%d%H%M%S").to_string(),
        )?;

        surface.draw_border_rect(&layout.border_box(), layout.border_stroke)?;

        if let Some(logo) = &header.logo {
            surface.draw_image(logo, &layout.logo_box())?;
        }

        let left = layout.left_margin;
        let top = layout.top_margin;
        let meta_x = left + layout.meta_column_offset;
        let body = layout.body_style();
        surface.draw_text(left, top, &title, layout.title_style())?;
        let date = format!("Invoice Date: {}", header.issue_date());
        let time = format!("Purchase Time: {}", header.issue_time());
        surface.draw_text(meta_x, top, &date, body)?;
        surface.draw_text(meta_x, top - TIME_LINE_DROP, &time, body)?;

        let customer = format!("Customer: {}", header.customer_name);
        let email = format!("Email: {}", header.customer_email);
        surface.draw_text(left, top - CUSTOMER_LINE_DROP, &customer, body)?;
        surface.draw_text(left, top - EMAIL_LINE_DROP, &email, body)?;

        surface.draw_table(table)?;

        let bottom = layout.bottom_margin;
        let footer = layout.footer_style();
        surface.draw_text(left, bottom + FOOTER_LINE_GAP, THANK_YOU_NOTE, footer)?;
        surface.draw_text(left, bottom, PAYMENT_TERMS_NOTE, footer)?;

        surface.finish()
    }
}

/// Render an invoice with the default A4 layout.
pub fn render_invoice(header: &InvoiceHeader, items: &[InvoiceLineItem]) -> Result<Vec<u8>> {
    InvoiceRenderer::default().render(header, items)
}
