use crate::record::LineItem;

/// Tax applied to every invoice subtotal. The only copy of the rate:
/// the layout derives its tax label from it.
pub const TAX_RATE: f64 = 0.05;

/// A line item paired with its recomputed amount.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    /// `quantity * unit_price`, unrounded.
    pub amount: f64,
}

/// Totals derived for one render. Never written back to the record.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedTotals {
    pub items: Vec<PricedItem>,
    pub subtotal: f64,
    pub tax_amount: f64,
    pub grand_total: f64,
}

/// Price every item and sum them in input order.
///
/// Amounts keep full precision; rounding to cents happens only when a
/// value is formatted for display. Any amount persisted on the input
/// items is ignored.
pub fn compute_totals(line_items: &[LineItem]) -> RenderedTotals {
    let items: Vec<PricedItem> = line_items
        .iter()
        .map(|item| PricedItem {
            description: item.description.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            amount: item.quantity as f64 * item.unit_price,
        })
        .collect();

    let subtotal = items.iter().fold(0.0, |sum, item| sum + item.amount);
    let tax_amount = subtotal * TAX_RATE;

    RenderedTotals {
        items,
        subtotal,
        tax_amount,
        grand_total: subtotal + tax_amount,
    }
}

/// Label for the tax line, e.g. `"Tax (5%):"`.
pub fn tax_label() -> String {
    format!("Tax ({:.0}%):", TAX_RATE * 100.0)
}
