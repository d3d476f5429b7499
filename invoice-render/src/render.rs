use tracing::debug;

use crate::config::RenderConfig;
use crate::emitter::{emit_page, PdfEmitter};
use crate::error::Result;
use crate::layout::layout_invoice;
use crate::record::InvoiceRecord;
use crate::totals::{compute_totals, RenderedTotals};

/// A finished invoice document and the totals printed on it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedInvoice {
    /// Complete single-page PDF (`application/pdf`).
    pub bytes: Vec<u8>,
    pub totals: RenderedTotals,
}

pub const CONTENT_TYPE: &str = "application/pdf";

/// Compute totals, lay out the page and serialize it to PDF.
///
/// `record` must already be validated: at least one line item, finite
/// non-negative prices, positive quantities. Emitter failures are
/// returned as-is; no partial document is ever produced.
#[tracing::instrument(skip_all, fields(invoice = %record.invoice_number))]
pub fn render_invoice(record: &InvoiceRecord, config: &RenderConfig) -> Result<RenderedInvoice> {
    let totals = compute_totals(&record.line_items);
    debug!(
        items = totals.items.len(),
        subtotal = totals.subtotal,
        tax = totals.tax_amount,
        total = totals.grand_total,
        "computed totals"
    );

    let generated_on = config.resolve_generated_on();
    let layout = layout_invoice(record, &totals, config, generated_on);
    debug!(
        primitives = layout.primitives.len(),
        variant = ?config.layout_variant,
        "laid out page"
    );

    let emitter = PdfEmitter::new(config.compress)?
        .with_info("Title", &format!("Invoice {}", record.invoice_number))
        .with_info("Creator", &config.creator);
    let bytes = emit_page(emitter, &layout)?;
    debug!(bytes = bytes.len(), "serialized document");

    Ok(RenderedInvoice { bytes, totals })
}
