use chrono::NaiveDate;
use invoice_render::layout::{
    badge_color, is_banded, BAND_FILL, HEADER_FILL, HEADER_HEIGHT, PAGE_HEIGHT, PAGE_WIDTH,
    PAID_BADGE_FILL, ROW_HEIGHT, TABLE_HEADER_FILL, UNPAID_BADGE_FILL,
};
use invoice_render::{
    compute_totals, layout_invoice, Client, Company, FontFace, InvoiceRecord, InvoiceStatus,
    LayoutVariant, LineItem, PageLayout, Primitive, Region, RenderConfig,
};
use proptest::prelude::*;

const EPS: f64 = 1e-9;

fn generated_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
}

fn sample_record() -> InvoiceRecord {
    InvoiceRecord {
        invoice_number: "INV-1".to_string(),
        invoice_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        due_date: NaiveDate::from_ymd_opt(2024, 2, 4).unwrap(),
        company: Company {
            name: "Northwind Studio".to_string(),
            address: "42 Harbour Road\nPortsmouth PO1 3AX".to_string(),
            email: "billing@northwind.test".to_string(),
            phone: "+44 23 9200 0000".to_string(),
        },
        client: Client {
            name: "Acme Corporation".to_string(),
            address: "123 Business Ave\nNew York, NY 10001".to_string(),
            email: "accounts@acme.test".to_string(),
        },
        notes: Some("Thanks for the quick turnaround.".to_string()),
        status: InvoiceStatus::Sent,
        line_items: vec![
            LineItem::new("Consulting", 2, 100.0),
            LineItem::new("Workshop", 1, 450.0),
            LineItem::new("Travel", 3, 35.0),
        ],
    }
}

fn layout_with(record: &InvoiceRecord, config: &RenderConfig) -> PageLayout {
    let totals = compute_totals(&record.line_items);
    layout_invoice(record, &totals, config, generated_on())
}

fn layout(record: &InvoiceRecord) -> PageLayout {
    layout_with(record, &RenderConfig::default())
}

fn texts(primitives: &[Primitive]) -> Vec<&str> {
    primitives
        .iter()
        .filter_map(|p| p.as_text())
        .map(|t| t.text.as_str())
        .collect()
}

fn text_y(primitives: &[Primitive], text: &str) -> f64 {
    primitives
        .iter()
        .filter_map(|p| p.as_text())
        .find(|t| t.text == text)
        .map(|t| t.y)
        .unwrap_or_else(|| panic!("no text run {:?}", text))
}

/// Every vertical coordinate a primitive carries.
fn ys(primitive: &Primitive) -> Vec<f64> {
    match primitive {
        Primitive::Text(t) => vec![t.y],
        Primitive::Rectangle(r) => vec![r.y],
        Primitive::Line(l) => vec![l.from.1, l.to.1],
    }
}

#[test]
fn regions_are_drawn_in_fixed_order() {
    let page = layout(&sample_record());
    let order: Vec<Region> = page.regions.iter().map(|r| r.region).collect();
    assert_eq!(
        order,
        [
            Region::Header,
            Region::Company,
            Region::InvoiceMeta,
            Region::Divider,
            Region::Client,
            Region::LineItems,
            Region::Totals,
            Region::Notes,
            Region::PaymentInfo,
            Region::Footer,
        ]
    );
    let mut next = 0;
    for extent in &page.regions {
        assert_eq!(extent.start, next);
        next = extent.end;
    }
    assert_eq!(next, page.primitives.len());
}

#[test]
fn page_is_a4() {
    let page = layout(&sample_record());
    assert_eq!(page.width, 595.28);
    assert_eq!(page.height, 841.89);
}

#[test]
fn header_band_spans_top_of_page_then_title() {
    let page = layout(&sample_record());
    let header = page.primitives_in(Region::Header);
    let band = header[0].as_rectangle().expect("band first");
    assert_eq!(band.x, 0.0);
    assert_eq!(band.width, PAGE_WIDTH);
    assert_eq!(band.height, HEADER_HEIGHT);
    assert!((band.y + band.height - PAGE_HEIGHT).abs() < EPS);
    assert_eq!(band.fill, HEADER_FILL);

    let title = header[1].as_text().expect("title second");
    assert_eq!(title.text, "INVOICE");
    assert_eq!(title.face, FontFace::Bold);
    assert!(title.y > band.y && title.y < PAGE_HEIGHT);
}

#[test]
fn three_line_company_address_pushes_contact_lines() {
    let mut record = sample_record();
    record.company.address = "Unit 4\n42 Harbour Road\nPortsmouth".to_string();
    let page = layout(&record);
    let company = page.primitives_in(Region::Company);

    let name = company[0].as_text().unwrap();
    assert_eq!(name.text, "Northwind Studio");
    assert_eq!(name.face, FontFace::Bold);

    let base_y = text_y(company, "Unit 4");
    assert!((text_y(company, "42 Harbour Road") - (base_y - 15.0)).abs() < EPS);
    assert!((text_y(company, "Portsmouth") - (base_y - 30.0)).abs() < EPS);
    assert!((text_y(company, "Email: billing@northwind.test") - (base_y - 45.0)).abs() < EPS);
    assert!((text_y(company, "Phone: +44 23 9200 0000") - (base_y - 60.0)).abs() < EPS);
}

fn assert_shifted_below(extra_line: impl Fn(&mut InvoiceRecord), changed: Region) {
    let base = layout(&sample_record());
    let mut record = sample_record();
    extra_line(&mut record);
    let grown = layout(&record);

    assert_eq!(base.regions.len(), grown.regions.len());
    let changed_at = base.regions.iter().position(|r| r.region == changed).unwrap();
    for (i, (a, b)) in base.regions.iter().zip(&grown.regions).enumerate() {
        if i < changed_at {
            assert_eq!(a, b, "{:?} moved", a.region);
            assert_eq!(base.primitives_in(a.region), grown.primitives_in(b.region));
        } else {
            assert!((a.cursor - b.cursor - 15.0).abs() < EPS, "{:?} cursor", a.region);
        }
        if i > changed_at && a.region != Region::InvoiceMeta {
            let before = base.primitives_in(a.region);
            let after = grown.primitives_in(b.region);
            assert_eq!(before.len(), after.len());
            for (p, q) in before.iter().zip(after) {
                for (y0, y1) in ys(p).into_iter().zip(ys(q)) {
                    assert!((y0 - y1 - 15.0).abs() < EPS, "{:?} shifted by {}", a.region, y0 - y1);
                }
            }
        }
    }
}

#[test]
fn extra_company_address_line_moves_everything_below_by_one_line() {
    assert_shifted_below(
        |r| r.company.address.push_str("\nUnited Kingdom"),
        Region::Company,
    );
}

#[test]
fn extra_client_address_line_moves_everything_below_by_one_line() {
    assert_shifted_below(|r| r.client.address.push_str("\nUSA"), Region::Client);
}

#[test]
fn extra_note_line_moves_payment_and_footer() {
    assert_shifted_below(
        |r| r.notes.as_mut().unwrap().push_str("\nPlease quote the reference."),
        Region::Notes,
    );
}

#[test]
fn trailing_line_breaks_flow_the_same_in_every_block() {
    let plain = layout(&sample_record());
    let mut padded = sample_record();
    padded.company.address.push('\n');
    padded.client.address.push_str("\r\n");
    padded.notes = padded.notes.map(|n| n + "\n");
    assert_eq!(layout(&padded), plain);
}

#[test]
fn meta_block_does_not_follow_company_height() {
    let base = layout(&sample_record());
    let mut record = sample_record();
    record.company.address = "a\nb\nc\nd\ne".to_string();
    let grown = layout(&record);
    assert_eq!(
        base.primitives_in(Region::InvoiceMeta),
        grown.primitives_in(Region::InvoiceMeta)
    );
}

#[test]
fn meta_block_lists_number_and_formatted_dates() {
    let page = layout(&sample_record());
    let meta = texts(page.primitives_in(Region::InvoiceMeta));
    assert!(meta.contains(&"INV-1"));
    assert!(meta.contains(&"January 5, 2024"));
    assert!(meta.contains(&"February 4, 2024"));
}

#[test]
fn badge_rectangle_is_drawn_before_its_label() {
    for status in InvoiceStatus::ALL {
        let mut record = sample_record();
        record.status = status;
        let page = layout(&record);
        let meta = page.primitives_in(Region::InvoiceMeta);

        let rects: Vec<_> = meta.iter().filter_map(|p| p.as_rectangle()).collect();
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].fill, badge_color(status));

        let rect_at = meta.iter().position(|p| p.as_rectangle().is_some()).unwrap();
        let label = meta[rect_at + 1].as_text().expect("label follows badge");
        assert_eq!(label.text, status.label());
        assert!(label.x >= rects[0].x && label.x < rects[0].x + rects[0].width);
    }
}

#[test]
fn only_paid_gets_paid_badge() {
    for status in InvoiceStatus::ALL {
        let expected = if status == InvoiceStatus::Paid {
            PAID_BADGE_FILL
        } else {
            UNPAID_BADGE_FILL
        };
        assert_eq!(badge_color(status), expected, "{:?}", status);
    }
    for raw in ["paid", "PAID", "Paid"] {
        let status: InvoiceStatus = raw.parse().unwrap();
        assert_eq!(badge_color(status), PAID_BADGE_FILL);
    }
}

#[test]
fn divider_spans_content_width_below_company() {
    let page = layout(&sample_record());
    let line = page.primitives_in(Region::Divider)[0].as_line().unwrap();
    let company_bottom = page.region(Region::Company).unwrap().cursor;
    assert_eq!(line.from.1, line.to.1);
    assert!(line.from.1 < company_bottom);
    assert_eq!(line.from.0, 40.0);
    assert_eq!(line.to.0, 560.0);
}

#[test]
fn client_block_starts_with_bill_to() {
    let page = layout(&sample_record());
    let client = texts(page.primitives_in(Region::Client));
    assert_eq!(
        client,
        [
            "BILL TO:",
            "Acme Corporation",
            "123 Business Ave",
            "New York, NY 10001",
            "Email: accounts@acme.test",
        ]
    );
}

#[test]
fn single_item_table_has_one_banded_row() {
    let mut record = sample_record();
    record.line_items = vec![LineItem::new("Consulting", 2, 100.0)];
    let page = layout(&record);
    let table = page.primitives_in(Region::LineItems);

    let header = table[0].as_rectangle().unwrap();
    assert_eq!(header.fill, TABLE_HEADER_FILL);
    assert_eq!(
        texts(&table[1..5]),
        ["Description", "Quantity", "Unit Price", "Amount"]
    );

    let bands: Vec<_> = table
        .iter()
        .filter_map(|p| p.as_rectangle())
        .filter(|r| r.fill == BAND_FILL)
        .collect();
    assert_eq!(bands.len(), 1);
    assert_eq!(texts(&table[6..]), ["Consulting", "2", "$100.00", "$200.00"]);

    let totals = texts(page.primitives_in(Region::Totals));
    assert!(totals.contains(&"$200.00"));
    assert!(totals.contains(&"Tax (5%):"));
    assert!(totals.contains(&"$10.00"));
    assert!(totals.contains(&"$210.00"));
}

#[test]
fn numeric_cells_are_right_aligned() {
    let mut record = sample_record();
    record.line_items = vec![
        LineItem::new("Short", 1, 5.0),
        LineItem::new("Long", 1000, 12345.0),
    ];
    let page = layout(&record);
    let table = page.primitives_in(Region::LineItems);
    let right_edge = |text: &str| {
        let run = table
            .iter()
            .filter_map(|p| p.as_text())
            .find(|t| t.text == text)
            .unwrap();
        run.x + run.face.measure(&run.text, run.size)
    };
    assert!((right_edge("1") - right_edge("1000")).abs() < EPS);
    assert!((right_edge("$5.00") - right_edge("$12345.00")).abs() < EPS);

    let lefts: Vec<f64> = ["Short", "Long"]
        .iter()
        .map(|d| {
            table
                .iter()
                .filter_map(|p| p.as_text())
                .find(|t| t.text == *d)
                .unwrap()
                .x
        })
        .collect();
    assert_eq!(lefts[0], lefts[1]);
}

#[test]
fn grand_total_band_precedes_bold_total() {
    let page = layout(&sample_record());
    let totals = page.primitives_in(Region::Totals);
    let band_at = totals.iter().position(|p| p.as_rectangle().is_some()).unwrap();
    let after: Vec<_> = totals[band_at + 1..].iter().filter_map(|p| p.as_text()).collect();
    assert_eq!(after.len(), 2);
    assert!(after.iter().all(|t| t.face == FontFace::Bold));
    assert_eq!(after[0].text, "Total:");
}

#[test]
fn absent_or_blank_notes_reserve_no_space() {
    let mut absent = sample_record();
    absent.notes = None;
    let mut blank = sample_record();
    blank.notes = Some("   ".to_string());

    let a = layout(&absent);
    let b = layout(&blank);
    assert!(a.region(Region::Notes).is_none());
    assert_eq!(a, b);

    let totals_bottom = a.region(Region::Totals).unwrap().cursor;
    let with_notes = layout(&sample_record());
    let payment_top = |page: &PageLayout| {
        text_y(page.primitives_in(Region::PaymentInfo), "Payment Information")
    };
    assert!((payment_top(&a) - (totals_bottom - 30.0)).abs() < EPS);
    assert!(payment_top(&with_notes) < payment_top(&a));
}

#[test]
fn simple_variant_drops_badge_and_payment_info() {
    let config = RenderConfig::default().with_layout_variant(LayoutVariant::Simple);
    let page = layout_with(&sample_record(), &config);
    assert!(page.region(Region::PaymentInfo).is_none());
    let meta = page.primitives_in(Region::InvoiceMeta);
    assert!(meta.iter().all(|p| p.as_rectangle().is_none()));
    assert!(!texts(meta).contains(&"SENT"));

    let detailed = layout(&sample_record());
    assert_eq!(
        page.primitives_in(Region::LineItems),
        detailed.primitives_in(Region::LineItems)
    );
}

#[test]
fn payment_info_reflects_status() {
    let page = layout(&sample_record());
    let payment = texts(page.primitives_in(Region::PaymentInfo));
    assert_eq!(payment[1], "Amount due: $792.75 by February 4, 2024");
    assert_eq!(payment[2], "Payment reference: INV-1");

    let mut paid = sample_record();
    paid.status = InvoiceStatus::Paid;
    let page = layout(&paid);
    let payment = texts(page.primitives_in(Region::PaymentInfo));
    assert_eq!(payment[1], "This invoice has been paid in full.");
}

#[test]
fn footer_carries_generation_date_and_terms() {
    let config = RenderConfig {
        payment_terms: "Net 15".to_string(),
        ..RenderConfig::default()
    };
    let page = layout_with(&sample_record(), &config);
    let footer = page.primitives_in(Region::Footer);
    assert!(footer[0].as_line().is_some());
    assert_eq!(
        texts(footer),
        ["Thank you for your business!", "Generated on February 1, 2024", "Net 15"]
    );
}

#[test]
fn identical_input_gives_identical_layout() {
    let record = sample_record();
    assert_eq!(layout(&record), layout(&record));
}

fn record_with_items(n: usize) -> InvoiceRecord {
    let mut record = sample_record();
    record.line_items = (0..n)
        .map(|i| LineItem::new(format!("Item {}", i), i as u32 + 1, 10.0))
        .collect();
    record
}

proptest! {
    #[test]
    fn banded_rows_are_exactly_the_even_indices(n in 1usize..20) {
        let page = layout(&record_with_items(n));
        let table = page.primitives_in(Region::LineItems);
        let header = table[0].as_rectangle().unwrap();

        let banded: Vec<usize> = table
            .iter()
            .filter_map(|p| p.as_rectangle())
            .filter(|r| r.fill == BAND_FILL)
            .map(|r| ((header.y - r.y) / ROW_HEIGHT).round() as usize - 1)
            .collect();
        let expected: Vec<usize> = (0..n).filter(|&i| is_banded(i)).collect();
        prop_assert_eq!(&banded, &expected);
        prop_assert!(banded.iter().all(|i| i % 2 == 0));
    }

    #[test]
    fn table_grows_by_one_row_per_item(n in 1usize..20) {
        let page = layout(&record_with_items(n));
        let extent = page.region(Region::LineItems).unwrap();
        let client_bottom = page.region(Region::Client).unwrap().cursor;
        let height = client_bottom - 30.0 - extent.cursor;
        prop_assert!((height - ROW_HEIGHT * (n as f64 + 1.0)).abs() < EPS);
    }
}
