//! Deterministic single-page invoice rendering.
//!
//! [`render_invoice`] turns a validated [`InvoiceRecord`] into PDF bytes
//! plus the [`RenderedTotals`] it printed. The intermediate steps are
//! public for callers that need the primitive list
//! ([`layout_invoice`]) or their own backend ([`DocumentEmitter`]).

pub mod config;
pub mod emitter;
pub mod error;
pub mod format;
pub mod layout;
pub mod primitives;
pub mod record;
pub mod render;
pub mod textflow;
pub mod totals;

pub use config::{LayoutVariant, RenderConfig};
pub use emitter::{emit_page, DocumentEmitter, PdfEmitter};
pub use error::{RenderError, Result};
pub use format::{format_date, format_date_like, format_money, parse_date_like};
pub use layout::{layout_invoice, PageLayout, Region};
pub use primitives::{FontFace, LineSegment, Primitive, Rectangle, TextRun};
pub use record::{Client, Company, InvoiceRecord, InvoiceStatus, LineItem};
pub use render::{render_invoice, RenderedInvoice, CONTENT_TYPE};
pub use textflow::{split_lines, LINE_HEIGHT};
pub use totals::{compute_totals, PricedItem, RenderedTotals, TAX_RATE};

pub use pdf_core::Color;
