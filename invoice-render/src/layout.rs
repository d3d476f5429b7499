//! Single-pass layout of an invoice onto one A4 page.
//!
//! Every region is a pure function from the running Y cursor (PDF
//! coordinates, origin bottom-left) and its data to a [`Block`]: the
//! primitives it draws and the cursor it leaves for the next region.
//! [`layout_invoice`] folds the regions top to bottom. A region's
//! position depends only on the constants below and on the line counts
//! of the regions above it.

use chrono::NaiveDate;
use pdf_core::Color;

use crate::config::{LayoutVariant, RenderConfig};
use crate::format::{format_date, format_money};
use crate::primitives::{FontFace, Primitive};
use crate::record::{Client, Company, InvoiceRecord, InvoiceStatus};
use crate::textflow::{flow_below, line_y, stack_lines, LINE_HEIGHT};
use crate::totals::{tax_label, PricedItem, RenderedTotals};

// -------------------------------------------------------
// Geometry
// -------------------------------------------------------

/// ISO A4 in points.
pub const PAGE_WIDTH: f64 = 595.28;
pub const PAGE_HEIGHT: f64 = 841.89;

pub const MARGIN: f64 = 40.0;
pub const HEADER_HEIGHT: f64 = 80.0;
pub const ROW_HEIGHT: f64 = 25.0;
/// Description, Quantity, Unit Price, Amount.
pub const COLUMN_WIDTHS: [f64; 4] = [280.0, 70.0, 80.0, 90.0];
pub const TABLE_WIDTH: f64 = 520.0;
/// Right edge shared by the table, the meta column and the dividers.
pub const CONTENT_RIGHT: f64 = MARGIN + TABLE_WIDTH;

/// Gap between the header band and the first text baseline.
const BLOCK_GAP: f64 = 35.0;
const SECTION_GAP: f64 = 30.0;
const CELL_PADDING: f64 = 8.0;
/// Baseline offset from the bottom of a table row.
const CELL_BASELINE: f64 = 9.0;
const META_WIDTH: f64 = 200.0;
const META_ROW: f64 = 18.0;
const BADGE_PADDING: f64 = 8.0;
const BADGE_HEIGHT: f64 = 16.0;

const TITLE_SIZE: f64 = 28.0;
const NAME_SIZE: f64 = 16.0;
const HEADING_SIZE: f64 = 11.0;
const BODY_SIZE: f64 = 10.0;
const BADGE_SIZE: f64 = 9.0;
const TOTAL_SIZE: f64 = 12.0;
const FOOTER_SIZE: f64 = 9.0;

// -------------------------------------------------------
// Palette
// -------------------------------------------------------

pub const HEADER_FILL: Color = Color::rgb(0.16, 0.32, 0.6);
pub const TEXT_COLOR: Color = Color::gray(0.13);
pub const MUTED_COLOR: Color = Color::gray(0.4);
pub const DIVIDER_COLOR: Color = Color::gray(0.75);
pub const TABLE_HEADER_FILL: Color = Color::gray(0.2);
pub const BAND_FILL: Color = Color::gray(0.95);
pub const TOTAL_FILL: Color = Color::rgb(0.89, 0.93, 0.98);
pub const PAID_BADGE_FILL: Color = Color::rgb(0.18, 0.62, 0.33);
pub const UNPAID_BADGE_FILL: Color = Color::rgb(0.8, 0.22, 0.2);

pub const TITLE: &str = "INVOICE";
pub const TABLE_HEADINGS: [&str; 4] = ["Description", "Quantity", "Unit Price", "Amount"];
pub const THANK_YOU: &str = "Thank you for your business!";

// -------------------------------------------------------
// Output types
// -------------------------------------------------------

/// Fixed page regions, in drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Header,
    Company,
    InvoiceMeta,
    Divider,
    Client,
    LineItems,
    Totals,
    Notes,
    PaymentInfo,
    Footer,
}

/// What one region draws and where it leaves the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub cursor: f64,
    pub primitives: Vec<Primitive>,
}

/// Where a region's primitives sit in [`PageLayout::primitives`].
#[derive(Debug, Clone, PartialEq)]
pub struct RegionExtent {
    pub region: Region,
    pub start: usize,
    pub end: usize,
    /// Cursor after the region.
    pub cursor: f64,
}

/// The complete, ordered drawing of one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub width: f64,
    pub height: f64,
    pub primitives: Vec<Primitive>,
    pub regions: Vec<RegionExtent>,
}

impl PageLayout {
    fn new() -> Self {
        PageLayout {
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
            primitives: Vec::new(),
            regions: Vec::new(),
        }
    }

    pub fn region(&self, region: Region) -> Option<&RegionExtent> {
        self.regions.iter().find(|r| r.region == region)
    }

    /// Primitives drawn by `region`; empty if the region was omitted.
    pub fn primitives_in(&self, region: Region) -> &[Primitive] {
        self.region(region)
            .map_or(&[][..], |r| &self.primitives[r.start..r.end])
    }

    /// Cursor left by the last region drawn.
    pub fn cursor(&self) -> f64 {
        self.regions.last().map_or(PAGE_HEIGHT, |r| r.cursor)
    }

    /// Append a region and advance the cursor to the block's.
    fn push(&mut self, region: Region, block: Block) {
        let start = self.primitives.len();
        self.primitives.extend(block.primitives);
        self.regions.push(RegionExtent {
            region,
            start,
            end: self.primitives.len(),
            cursor: block.cursor,
        });
    }

    /// Append a region drawn beside the flow; the cursor stays put.
    fn overlay(&mut self, region: Region, block: Block) {
        let cursor = self.cursor();
        self.push(region, Block { cursor, ..block });
    }
}

// -------------------------------------------------------
// Page
// -------------------------------------------------------

/// Lay out `record` with its precomputed `totals`.
///
/// Pure: the footer date comes from `generated_on`, never from a clock,
/// so identical arguments give identical layouts.
pub fn layout_invoice(
    record: &InvoiceRecord,
    totals: &RenderedTotals,
    config: &RenderConfig,
    generated_on: NaiveDate,
) -> PageLayout {
    let variant = config.layout_variant;
    let mut page = PageLayout::new();

    page.push(Region::Header, header_band(PAGE_HEIGHT));
    let band_bottom = page.cursor();
    page.push(Region::Company, company_block(band_bottom, &record.company));
    page.overlay(Region::InvoiceMeta, meta_block(band_bottom, record, variant));
    page.push(Region::Divider, divider(page.cursor()));
    page.push(Region::Client, client_block(page.cursor(), &record.client));
    page.push(Region::LineItems, line_item_table(page.cursor(), &totals.items));
    page.push(Region::Totals, totals_block(page.cursor(), totals));
    if let Some(block) = notes_block(page.cursor(), record.notes.as_deref()) {
        page.push(Region::Notes, block);
    }
    if variant.shows_payment_info() {
        page.push(
            Region::PaymentInfo,
            payment_block(page.cursor(), record, totals),
        );
    }
    page.push(
        Region::Footer,
        footer(page.cursor(), generated_on, &config.payment_terms),
    );
    page
}

// -------------------------------------------------------
// Regions
// -------------------------------------------------------

/// Full-width band hanging from `cursor` with the title inside it.
pub fn header_band(cursor: f64) -> Block {
    let bottom = cursor - HEADER_HEIGHT;
    Block {
        cursor: bottom,
        primitives: vec![
            Primitive::filled_rect(0.0, bottom, PAGE_WIDTH, HEADER_HEIGHT, HEADER_FILL),
            Primitive::text(
                MARGIN,
                cursor - 50.0,
                TITLE,
                FontFace::Bold,
                TITLE_SIZE,
                Color::WHITE,
            ),
        ],
    }
}

/// Name, address lines, then email and phone flowed below the address.
pub fn company_block(cursor: f64, company: &Company) -> Block {
    let name_y = cursor - BLOCK_GAP;
    let base_y = name_y - 20.0;
    let mut primitives = vec![Primitive::text(
        MARGIN,
        name_y,
        &company.name,
        FontFace::Bold,
        NAME_SIZE,
        TEXT_COLOR,
    )];
    let address_lines = push_stacked(&mut primitives, &company.address, base_y);

    let email_y = flow_below(base_y, address_lines);
    let phone_y = email_y - LINE_HEIGHT;
    primitives.push(body_text(
        MARGIN,
        email_y,
        format!("Email: {}", company.email),
    ));
    primitives.push(body_text(
        MARGIN,
        phone_y,
        format!("Phone: {}", company.phone),
    ));
    Block {
        cursor: phone_y,
        primitives,
    }
}

/// Right-hand column level with the company name: number, dates and,
/// for the detailed layout, the status badge. Anchored at `cursor`
/// rather than flowing from the company block.
pub fn meta_block(cursor: f64, record: &InvoiceRecord, variant: LayoutVariant) -> Block {
    let first_y = cursor - BLOCK_GAP;
    let label_x = CONTENT_RIGHT - META_WIDTH;
    let rows = [
        ("Invoice #:", record.invoice_number.clone()),
        ("Date:", format_date(record.invoice_date)),
        ("Due Date:", format_date(record.due_date)),
    ];

    let mut primitives = Vec::new();
    let mut y = first_y;
    for (label, value) in rows {
        primitives.push(label_text(label_x, y, label));
        primitives.push(Primitive::text_right(
            CONTENT_RIGHT,
            y,
            value,
            FontFace::Regular,
            BODY_SIZE,
            TEXT_COLOR,
        ));
        y -= META_ROW;
    }

    if variant.shows_status_badge() {
        primitives.push(label_text(label_x, y, "Status:"));
        primitives.extend(status_badge(CONTENT_RIGHT, y, record.status));
        y -= META_ROW;
    }

    Block {
        cursor: y + META_ROW,
        primitives,
    }
}

/// Badge fill for `status`: paid is green, every other status red.
pub fn badge_color(status: InvoiceStatus) -> Color {
    if status.is_paid() {
        PAID_BADGE_FILL
    } else {
        UNPAID_BADGE_FILL
    }
}

/// Filled badge ending at `right`, then its label on top.
fn status_badge(right: f64, baseline: f64, status: InvoiceStatus) -> [Primitive; 2] {
    let label = status.label();
    let width = FontFace::Bold.measure(label, BADGE_SIZE) + 2.0 * BADGE_PADDING;
    let x = right - width;
    [
        Primitive::filled_rect(x, baseline - 4.0, width, BADGE_HEIGHT, badge_color(status)),
        Primitive::text(
            x + BADGE_PADDING,
            baseline,
            label,
            FontFace::Bold,
            BADGE_SIZE,
            Color::WHITE,
        ),
    ]
}

/// Full-width rule one section gap below `cursor`.
pub fn divider(cursor: f64) -> Block {
    let y = cursor - SECTION_GAP;
    Block {
        cursor: y,
        primitives: vec![Primitive::hline(MARGIN, CONTENT_RIGHT, y, 1.0, DIVIDER_COLOR)],
    }
}

/// "BILL TO:" label, name, address lines, then email below the address.
pub fn client_block(cursor: f64, client: &Client) -> Block {
    let label_y = cursor - 25.0;
    let name_y = label_y - 18.0;
    let base_y = name_y - LINE_HEIGHT;
    let mut primitives = vec![
        Primitive::text(
            MARGIN,
            label_y,
            "BILL TO:",
            FontFace::Bold,
            HEADING_SIZE,
            MUTED_COLOR,
        ),
        Primitive::text(
            MARGIN,
            name_y,
            &client.name,
            FontFace::Bold,
            TOTAL_SIZE,
            TEXT_COLOR,
        ),
    ];
    let address_lines = push_stacked(&mut primitives, &client.address, base_y);

    let email_y = flow_below(base_y, address_lines);
    primitives.push(body_text(MARGIN, email_y, format!("Email: {}", client.email)));
    Block {
        cursor: email_y,
        primitives,
    }
}

/// Header row plus one fixed-height row per item. Rows at even
/// zero-based indices get the band fill.
pub fn line_item_table(cursor: f64, items: &[PricedItem]) -> Block {
    let top = cursor - SECTION_GAP;
    let mut primitives = Vec::with_capacity(5 + items.len() * 5);

    let header_bottom = top - ROW_HEIGHT;
    primitives.push(Primitive::filled_rect(
        MARGIN,
        header_bottom,
        TABLE_WIDTH,
        ROW_HEIGHT,
        TABLE_HEADER_FILL,
    ));
    primitives.extend(row_cells(
        TABLE_HEADINGS.map(String::from),
        header_bottom + CELL_BASELINE,
        FontFace::Bold,
        Color::WHITE,
    ));

    let mut row_bottom = header_bottom;
    for (index, item) in items.iter().enumerate() {
        row_bottom -= ROW_HEIGHT;
        if is_banded(index) {
            primitives.push(Primitive::filled_rect(
                MARGIN,
                row_bottom,
                TABLE_WIDTH,
                ROW_HEIGHT,
                BAND_FILL,
            ));
        }
        primitives.extend(row_cells(
            [
                item.description.clone(),
                item.quantity.to_string(),
                format_money(item.unit_price),
                format_money(item.amount),
            ],
            row_bottom + CELL_BASELINE,
            FontFace::Regular,
            TEXT_COLOR,
        ));
    }

    Block {
        cursor: row_bottom,
        primitives,
    }
}

/// Whether the zero-based table row `index` gets the band fill.
pub fn is_banded(index: usize) -> bool {
    index % 2 == 0
}

/// Subtotal, tax and a highlighted grand total, right-aligned under the
/// last two table columns.
pub fn totals_block(cursor: f64, totals: &RenderedTotals) -> Block {
    let edges = column_edges();
    let label_right = edges[3] - CELL_PADDING;
    let value_right = edges[4] - CELL_PADDING;
    let mut primitives = Vec::with_capacity(7);

    let subtotal_y = cursor - 20.0;
    let tax_y = subtotal_y - META_ROW;
    for (y, label, value) in [
        (subtotal_y, "Subtotal:".to_string(), totals.subtotal),
        (tax_y, tax_label(), totals.tax_amount),
    ] {
        primitives.push(Primitive::text_right(
            label_right,
            y,
            label,
            FontFace::Regular,
            BODY_SIZE,
            MUTED_COLOR,
        ));
        primitives.push(Primitive::text_right(
            value_right,
            y,
            format_money(value),
            FontFace::Regular,
            BODY_SIZE,
            TEXT_COLOR,
        ));
    }

    let band_bottom = tax_y - 10.0 - ROW_HEIGHT;
    let baseline = band_bottom + 8.0;
    primitives.push(Primitive::filled_rect(
        edges[2],
        band_bottom,
        edges[4] - edges[2],
        ROW_HEIGHT,
        TOTAL_FILL,
    ));
    primitives.push(Primitive::text_right(
        label_right,
        baseline,
        "Total:",
        FontFace::Bold,
        TOTAL_SIZE,
        TEXT_COLOR,
    ));
    primitives.push(Primitive::text_right(
        value_right,
        baseline,
        format_money(totals.grand_total),
        FontFace::Bold,
        TOTAL_SIZE,
        TEXT_COLOR,
    ));

    Block {
        cursor: band_bottom,
        primitives,
    }
}

/// "Notes:" heading and note lines. `None` when there is nothing to
/// say, in which case no space is reserved either.
pub fn notes_block(cursor: f64, notes: Option<&str>) -> Option<Block> {
    let notes = notes.filter(|n| !n.trim().is_empty())?;
    let label_y = cursor - SECTION_GAP;
    let base_y = label_y - META_ROW;
    let mut primitives = vec![heading_text(MARGIN, label_y, "Notes:")];
    let lines = push_stacked(&mut primitives, notes, base_y);
    Some(Block {
        cursor: line_y(base_y, lines - 1),
        primitives,
    })
}

/// Amount due (or paid-in-full notice) and the payment reference.
pub fn payment_block(cursor: f64, record: &InvoiceRecord, totals: &RenderedTotals) -> Block {
    let heading_y = cursor - SECTION_GAP;
    let first_y = heading_y - META_ROW;
    let status_line = if record.status.is_paid() {
        "This invoice has been paid in full.".to_string()
    } else {
        format!(
            "Amount due: {} by {}",
            format_money(totals.grand_total),
            format_date(record.due_date)
        )
    };
    let reference_line = format!("Payment reference: {}", record.invoice_number);
    let second_y = first_y - LINE_HEIGHT;

    Block {
        cursor: second_y,
        primitives: vec![
            heading_text(MARGIN, heading_y, "Payment Information"),
            body_text(MARGIN, first_y, status_line),
            body_text(MARGIN, second_y, reference_line),
        ],
    }
}

/// Rule, thank-you line, generation date and payment terms.
pub fn footer(cursor: f64, generated_on: NaiveDate, payment_terms: &str) -> Block {
    let rule_y = cursor - SECTION_GAP;
    let thanks_y = rule_y - META_ROW;
    let generated_y = thanks_y - LINE_HEIGHT;
    let terms_y = generated_y - LINE_HEIGHT;
    Block {
        cursor: terms_y,
        primitives: vec![
            Primitive::hline(MARGIN, CONTENT_RIGHT, rule_y, 0.5, DIVIDER_COLOR),
            Primitive::text(
                MARGIN,
                thanks_y,
                THANK_YOU,
                FontFace::Regular,
                BODY_SIZE,
                TEXT_COLOR,
            ),
            Primitive::text(
                MARGIN,
                generated_y,
                format!("Generated on {}", format_date(generated_on)),
                FontFace::Regular,
                FOOTER_SIZE,
                MUTED_COLOR,
            ),
            Primitive::text(
                MARGIN,
                terms_y,
                payment_terms,
                FontFace::Regular,
                FOOTER_SIZE,
                MUTED_COLOR,
            ),
        ],
    }
}

// -------------------------------------------------------
// Helpers
// -------------------------------------------------------

/// Left edge of each column plus the table's right edge.
pub fn column_edges() -> [f64; 5] {
    let mut edges = [MARGIN; 5];
    for (i, width) in COLUMN_WIDTHS.iter().enumerate() {
        edges[i + 1] = edges[i] + width;
    }
    edges
}

/// First cell left-aligned, the numeric cells right-aligned.
fn row_cells(cells: [String; 4], baseline: f64, face: FontFace, color: Color) -> Vec<Primitive> {
    let edges = column_edges();
    cells
        .into_iter()
        .enumerate()
        .map(|(col, text)| {
            if col == 0 {
                Primitive::text(edges[0] + CELL_PADDING, baseline, text, face, BODY_SIZE, color)
            } else {
                Primitive::text_right(
                    edges[col + 1] - CELL_PADDING,
                    baseline,
                    text,
                    face,
                    BODY_SIZE,
                    color,
                )
            }
        })
        .collect()
}

/// Draw the lines of `text` from `base_y` down and return how many
/// lines were stacked. Trailing line breaks are dropped; blank lines
/// inside the text take up space but draw nothing.
fn push_stacked(primitives: &mut Vec<Primitive>, text: &str, base_y: f64) -> usize {
    let lines = stack_lines(text.trim_end(), base_y);
    let count = lines.len();
    primitives.extend(
        lines
            .into_iter()
            .filter(|(line, _)| !line.is_empty())
            .map(|(line, y)| {
                Primitive::text(MARGIN, y, line, FontFace::Regular, BODY_SIZE, MUTED_COLOR)
            }),
    );
    count
}

fn body_text(x: f64, y: f64, text: String) -> Primitive {
    Primitive::text(x, y, text, FontFace::Regular, BODY_SIZE, TEXT_COLOR)
}

fn label_text(x: f64, y: f64, text: &str) -> Primitive {
    Primitive::text(x, y, text, FontFace::Bold, BODY_SIZE, MUTED_COLOR)
}

fn heading_text(x: f64, y: f64, text: &str) -> Primitive {
    Primitive::text(x, y, text, FontFace::Bold, HEADING_SIZE, TEXT_COLOR)
}
