//! Line, subtotal, tax and grand-total arithmetic, and the display
//! rows built from it.
//!
//! Amounts accumulate at full `Decimal` precision. Rounding to two
//! places happens only when a value is turned into display text.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{InvoiceError, Result};
use crate::invoice::InvoiceLineItem;
use crate::layout::COLUMN_COUNT;

/// Totals derived from the line items. `grand_total` is always
/// exactly `subtotal + tax_amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputedTotals {
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub grand_total: Decimal,
}

/// Which of the three closing rows a summary row is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    Subtotal,
    Tax,
    GrandTotal,
}

/// One display row of the item table, tagged by role so styling
/// never depends on row position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    Header([String; COLUMN_COUNT]),
    Item([String; COLUMN_COUNT]),
    Summary {
        kind: SummaryKind,
        label: String,
        value: String,
    },
}

impl TableRow {
    /// The four cell strings, left to right. Summary rows leave the
    /// first two columns blank.
    pub fn cells(&self) -> [&str; COLUMN_COUNT] {
        match self {
            TableRow::Header(c) | TableRow::Item(c) => {
                [c[0].as_str(), c[1].as_str(), c[2].as_str(), c[3].as_str()]
            }
            TableRow::Summary { label, value, .. } => {
                ["", "", label.as_str(), value.as_str()]
            }
        }
    }
}

/// Round for display: two places, halves away from zero.
pub fn round_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount as it appears on the page, e.g. `250.00`.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", round_display(amount))
}

/// Compute totals and the full row sequence for the item table.
///
/// Rows come out as one header row, one row per item in input order,
/// then Subtotal, Tax and Grand Total.
pub fn compute(
    items: &[InvoiceLineItem],
    tax_percent: Decimal,
    currency: &str,
) -> Result<(Vec<TableRow>, ComputedTotals)> {
    validate(items, tax_percent)?;

    let mut rows = Vec::with_capacity(items.len() + 4);
    rows.push(TableRow::Header([
        "Item".to_string(),
        "Quantity".to_string(),
        format!("Unit Price ({})", currency),
        format!("Total Price ({})", currency),
    ]));

    let mut subtotal = Decimal::ZERO;
    for item in items {
        let line_total = item.line_total().ok_or_else(|| overflow(&item.name))?;
        subtotal = subtotal
            .checked_add(line_total)
            .ok_or_else(|| overflow("subtotal"))?;
        rows.push(TableRow::Item([
            item.name.clone(),
            item.quantity.to_string(),
            format_amount(item.unit_price),
            format_amount(line_total),
        ]));
    }

    let tax_amount = tax_on(subtotal, tax_percent).ok_or_else(|| overflow("tax amount"))?;
    let grand_total = subtotal
        .checked_add(tax_amount)
        .ok_or_else(|| overflow("grand total"))?;
    let totals = ComputedTotals {
        subtotal,
        tax_amount,
        grand_total,
    };

    let money = |amount: Decimal| format!("{} {}", currency, format_amount(amount));
    rows.push(TableRow::Summary {
        kind: SummaryKind::Subtotal,
        label: "Subtotal:".to_string(),
        value: money(totals.subtotal),
    });
    rows.push(TableRow::Summary {
        kind: SummaryKind::Tax,
        label: format!("Tax ({}%):", tax_percent.normalize()),
        value: money(totals.tax_amount),
    });
    rows.push(TableRow::Summary {
        kind: SummaryKind::GrandTotal,
        label: "Grand Total:".to_string(),
        value: money(totals.grand_total),
    });

    Ok((rows, totals))
}

/// `subtotal × tax_percent / 100`, or `None` on overflow.
fn tax_on(subtotal: Decimal, tax_percent: Decimal) -> Option<Decimal> {
    subtotal
        .checked_mul(tax_percent)
        .and_then(|product| product.checked_div(Decimal::ONE_HUNDRED))
}

fn overflow(what: &str) -> InvoiceError {
    InvoiceError::invalid_input(format!("amount overflows: {}", what))
}

fn validate(items: &[InvoiceLineItem], tax_percent: Decimal) -> Result<()> {
    if items.is_empty() {
        return Err(InvoiceError::invalid_input("invoice has no line items"));
    }
    if tax_percent < Decimal::ZERO || tax_percent > Decimal::ONE_HUNDRED {
        return Err(InvoiceError::invalid_input(format!(
            "tax percentage {} is outside 0..=100",
            tax_percent
        )));
    }
    for (i, item) in items.iter().enumerate() {
        if item.quantity == 0 {
            return Err(InvoiceError::invalid_input(format!(
                "item {} ({:?}) has zero quantity",
                i + 1,
                item.name
            )));
        }
        if item.unit_price < Decimal::ZERO {
            return Err(InvoiceError::invalid_input(format!(
                "item {} ({:?}) has negative unit price {}",
                i + 1,
                item.name,
                item.unit_price
            )));
        }
    }
    Ok(())
}
