/// Invoice example: render one invoice record to a single-page PDF.
///
/// Run with:
///   cargo run --example generate_invoice -p invoice-demos -- [invoice.json] [out.pdf]
///
/// Without arguments a built-in sample record is rendered to
/// demos/output/rust-invoice.pdf. `INVOICE_LAYOUT=simple` and
/// `INVOICE_COMPRESS=0` adjust the output; `RUST_LOG=debug` shows the
/// render steps.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use invoice_render::{
    render_invoice, Client, Company, InvoiceRecord, InvoiceStatus, LineItem, RenderConfig,
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut args = std::env::args().skip(1);
    let record = match args.next() {
        Some(path) => load_record(Path::new(&path))?,
        None => sample_record()?,
    };
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("demos/output/rust-invoice.pdf"));

    let config = RenderConfig::from_env().context("reading INVOICE_* settings")?;
    let rendered = render_invoice(&record, &config)
        .with_context(|| format!("rendering invoice {}", record.invoice_number))?;

    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    fs::write(&output, &rendered.bytes)
        .with_context(|| format!("writing {}", output.display()))?;

    tracing::info!(
        path = %output.display(),
        bytes = rendered.bytes.len(),
        total = rendered.totals.grand_total,
        "wrote invoice"
    );
    Ok(())
}

fn load_record(path: &Path) -> anyhow::Result<InvoiceRecord> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let record: InvoiceRecord =
        serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))?;
    anyhow::ensure!(
        !record.line_items.is_empty(),
        "invoice {} has no line items",
        record.invoice_number
    );
    Ok(record)
}

fn sample_record() -> anyhow::Result<InvoiceRecord> {
    let date = |y, m, d| {
        NaiveDate::from_ymd_opt(y, m, d).with_context(|| format!("bad date {}-{}-{}", y, m, d))
    };
    Ok(InvoiceRecord {
        invoice_number: "INV-2024-0042".to_string(),
        invoice_date: date(2024, 1, 5)?,
        due_date: date(2024, 2, 4)?,
        company: Company {
            name: "Northwind Studio".to_string(),
            address: "42 Harbour Road\nSuite 5\nPortsmouth PO1 2AB".to_string(),
            email: "billing@northwind.test".to_string(),
            phone: "+44 23 9200 0000".to_string(),
        },
        client: Client {
            name: "Acme Corporation".to_string(),
            address: "123 Business Ave\nSpringfield".to_string(),
            email: "accounts@acme.test".to_string(),
        },
        notes: Some("Please include the invoice number with your payment.".to_string()),
        status: InvoiceStatus::Sent,
        line_items: vec![
            LineItem::new("Website redesign", 1, 450.0),
            LineItem::new("Hosting (12 months)", 12, 15.0),
            LineItem::new("Support hours", 2, 45.0),
        ],
    })
}
