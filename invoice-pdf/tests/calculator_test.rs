use invoice_pdf::calculator::round_display;
use invoice_pdf::{compute, InvoiceError, InvoiceLineItem, SummaryKind, TableRow};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn item(name: &str, qty: u32, cents: i64) -> InvoiceLineItem {
    InvoiceLineItem::new(name, qty, Decimal::new(cents, 2))
}

fn widget_and_gadget() -> Vec<InvoiceLineItem> {
    vec![item("Widget", 2, 5000), item("Gadget", 1, 15000)]
}

// -------------------------------------------------------
// Totals
// -------------------------------------------------------

#[test]
fn widget_gadget_totals() {
    let (rows, totals) = compute(&widget_and_gadget(), Decimal::from(18), "$").unwrap();
    assert_eq!(totals.subtotal, Decimal::from(250));
    assert_eq!(totals.tax_amount, Decimal::from(45));
    assert_eq!(totals.grand_total, Decimal::from(295));
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[4].cells()[3], "$ 45.00");
    assert_eq!(rows[5].cells()[3], "$ 295.00");
}

#[test]
fn subtotal_keeps_full_precision() {
    let items = [InvoiceLineItem::new("Service", 1, Decimal::new(99995, 3))];
    let (rows, totals) = compute(&items, Decimal::from(10), "$").unwrap();

    assert_eq!(totals.subtotal, Decimal::new(99995, 3));
    assert_eq!(totals.tax_amount, Decimal::new(99995, 4));
    assert_eq!(totals.grand_total, Decimal::new(109995, 3));
    assert_eq!(totals.grand_total, totals.subtotal + totals.tax_amount);

    let summary: Vec<&str> = rows[2..].iter().map(|r| r.cells()[3]).collect();
    assert_eq!(summary, ["$ 100.00", "$ 10.00", "$ 110.00"]);
}

#[test]
fn zero_tax_means_grand_total_equals_subtotal() {
    let (rows, totals) = compute(&widget_and_gadget(), Decimal::ZERO, "€").unwrap();
    assert!(totals.tax_amount.is_zero());
    assert_eq!(totals.grand_total, totals.subtotal);
    assert_eq!(rows[4].cells()[2], "Tax (0%):");
    assert_eq!(rows[4].cells()[3], "€ 0.00");
}

#[test]
fn fractional_tax_label() {
    let (rows, _) = compute(&widget_and_gadget(), Decimal::new(75, 1), "$").unwrap();
    assert_eq!(rows[4].cells()[2], "Tax (7.5%):");
}

#[test]
fn full_tax_doubles_the_subtotal() {
    let (_, totals) = compute(&widget_and_gadget(), Decimal::ONE_HUNDRED, "$").unwrap();
    assert_eq!(totals.grand_total, Decimal::from(500));
}

// -------------------------------------------------------
// Row sequence
// -------------------------------------------------------

#[test]
fn header_row_carries_currency() {
    let (rows, _) = compute(&widget_and_gadget(), Decimal::from(18), "£").unwrap();
    assert_eq!(
        rows[0],
        TableRow::Header([
            "Item".to_string(),
            "Quantity".to_string(),
            "Unit Price (£)".to_string(),
            "Total Price (£)".to_string(),
        ])
    );
}

#[test]
fn item_rows_keep_input_order() {
    let items = vec![item("Zeta", 1, 100), item("Alpha", 3, 250), item("Mid", 2, 1)];
    let (rows, _) = compute(&items, Decimal::from(5), "$").unwrap();
    assert_eq!(rows[1].cells(), ["Zeta", "1", "1.00", "1.00"]);
    assert_eq!(rows[2].cells(), ["Alpha", "3", "2.50", "7.50"]);
    assert_eq!(rows[3].cells(), ["Mid", "2", "0.01", "0.02"]);
}

#[test]
fn summary_rows_close_the_table() {
    let (rows, _) = compute(&widget_and_gadget(), Decimal::from(18), "$").unwrap();
    let kinds: Vec<SummaryKind> = rows
        .iter()
        .filter_map(|r| match r {
            TableRow::Summary { kind, .. } => Some(*kind),
            _ => None,
        })
        .collect();
    assert_eq!(
        kinds,
        [SummaryKind::Subtotal, SummaryKind::Tax, SummaryKind::GrandTotal]
    );
    assert_eq!(rows[3].cells(), ["", "", "Subtotal:", "$ 250.00"]);
    assert_eq!(rows[4].cells()[2], "Tax (18%):");
    assert_eq!(rows[5].cells()[2], "Grand Total:");
}

// -------------------------------------------------------
// Rejected input
// -------------------------------------------------------

#[test]
fn empty_item_list_is_invalid() {
    let err = compute(&[], Decimal::from(18), "$").unwrap_err();
    assert!(matches!(err, InvoiceError::InvalidInvoiceInput(_)));
}

#[test]
fn zero_quantity_is_invalid() {
    let err = compute(&[item("Widget", 0, 100)], Decimal::from(18), "$").unwrap_err();
    assert!(matches!(err, InvoiceError::InvalidInvoiceInput(_)));
}

#[test]
fn negative_price_is_invalid() {
    let err = compute(&[item("Refund", 1, -100)], Decimal::from(18), "$").unwrap_err();
    assert!(matches!(err, InvoiceError::InvalidInvoiceInput(_)));
}

#[test]
fn tax_out_of_range_is_invalid() {
    for tax in [Decimal::from(-1), Decimal::new(10001, 2)] {
        let err = compute(&widget_and_gadget(), tax, "$").unwrap_err();
        assert!(matches!(err, InvoiceError::InvalidInvoiceInput(_)));
    }
}

#[test]
fn line_total_overflow_is_invalid() {
    let items = [InvoiceLineItem::new("Big", 2, Decimal::MAX)];
    let err = compute(&items, Decimal::ZERO, "$").unwrap_err();
    assert!(matches!(err, InvoiceError::InvalidInvoiceInput(_)));
}

#[test]
fn subtotal_overflow_is_invalid() {
    let half = Decimal::MAX / Decimal::TWO + Decimal::ONE;
    let items = [
        InvoiceLineItem::new("First", 1, half),
        InvoiceLineItem::new("Second", 1, half),
    ];
    let err = compute(&items, Decimal::ZERO, "$").unwrap_err();
    assert!(matches!(err, InvoiceError::InvalidInvoiceInput(_)));
}

#[test]
fn tax_overflow_is_invalid() {
    let items = [InvoiceLineItem::new("Big", 1, Decimal::MAX / Decimal::TEN)];
    let err = compute(&items, Decimal::from(18), "$").unwrap_err();
    assert!(matches!(err, InvoiceError::InvalidInvoiceInput(_)));
}

#[test]
fn free_items_are_valid() {
    let (_, totals) = compute(&[item("Sample", 4, 0)], Decimal::from(18), "$").unwrap();
    assert!(totals.grand_total.is_zero());
}

// -------------------------------------------------------
// Properties
// -------------------------------------------------------

fn arb_item() -> impl Strategy<Value = InvoiceLineItem> {
    ("[A-Za-z ]{0,12}", 1u32..1_000, 0i64..10_000_000, 0u32..4).prop_map(
        |(name, qty, mantissa, scale)| {
            InvoiceLineItem::new(name, qty, Decimal::new(mantissa, scale))
        },
    )
}

fn arb_tax() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|basis_points| Decimal::new(basis_points, 2))
}

proptest! {
    #[test]
    fn totals_are_internally_consistent(
        items in prop::collection::vec(arb_item(), 1..12),
        tax in arb_tax(),
    ) {
        let (_, totals) = compute(&items, tax, "$").unwrap();
        let expected: Decimal = items
            .iter()
            .map(|i| Decimal::from(i.quantity) * i.unit_price)
            .sum();
        prop_assert_eq!(totals.subtotal, expected);
        prop_assert_eq!(totals.grand_total, totals.subtotal + totals.tax_amount);
        prop_assert!(totals.tax_amount >= Decimal::ZERO);
    }

    #[test]
    fn row_shape_is_fixed(
        items in prop::collection::vec(arb_item(), 1..12),
        tax in arb_tax(),
    ) {
        let (rows, _) = compute(&items, tax, "$").unwrap();
        prop_assert_eq!(rows.len(), items.len() + 4);
        prop_assert!(matches!(rows[0], TableRow::Header(_)));
        for (row, item) in rows[1..=items.len()].iter().zip(&items) {
            prop_assert!(matches!(row, TableRow::Item(_)));
            prop_assert_eq!(row.cells()[0], item.name.as_str());
        }
        let tail = &rows[items.len() + 1..];
        prop_assert!(matches!(tail[0], TableRow::Summary { kind: SummaryKind::Subtotal, .. }), "tail[0] is not a Subtotal summary row");
        prop_assert!(matches!(tail[1], TableRow::Summary { kind: SummaryKind::Tax, .. }), "tail[1] is not a Tax summary row");
        prop_assert!(matches!(tail[2], TableRow::Summary { kind: SummaryKind::GrandTotal, .. }), "tail[2] is not a GrandTotal summary row");
    }

    #[test]
    fn displayed_values_round_once(
        items in prop::collection::vec(arb_item(), 1..6),
        tax in arb_tax(),
    ) {
        let (rows, totals) = compute(&items, tax, "$").unwrap();
        let n = rows.len();
        prop_assert_eq!(
            rows[n - 3].cells()[3],
            format!("$ {:.2}", round_display(totals.subtotal))
        );
        prop_assert_eq!(
            rows[n - 2].cells()[3],
            format!("$ {:.2}", round_display(totals.tax_amount))
        );
        prop_assert_eq!(
            rows[n - 1].cells()[3],
            format!("$ {:.2}", round_display(totals.grand_total))
        );
    }

    #[test]
    fn zero_tax_property(items in prop::collection::vec(arb_item(), 1..8)) {
        let (_, totals) = compute(&items, Decimal::ZERO, "$").unwrap();
        prop_assert!(totals.tax_amount.is_zero());
        prop_assert_eq!(totals.grand_total, totals.subtotal);
    }
}
