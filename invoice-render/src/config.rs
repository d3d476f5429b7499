use std::env;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::Deserialize;

use crate::error::RenderError;

/// Which of the two page layouts to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutVariant {
    /// Header, parties, table, totals, notes and footer only.
    Simple,
    /// Adds the status badge and the payment information section.
    #[default]
    Detailed,
}

impl LayoutVariant {
    pub fn shows_status_badge(&self) -> bool {
        matches!(self, LayoutVariant::Detailed)
    }

    pub fn shows_payment_info(&self) -> bool {
        matches!(self, LayoutVariant::Detailed)
    }
}

impl FromStr for LayoutVariant {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(LayoutVariant::Simple),
            "detailed" => Ok(LayoutVariant::Detailed),
            _ => Err(RenderError::UnknownLayoutVariant(s.to_string())),
        }
    }
}

pub const DEFAULT_PAYMENT_TERMS: &str = "Payment is due within 30 days of the invoice date.";

/// Render options. Every field has a default, so partial TOML/JSON
/// documents deserialize.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub layout_variant: LayoutVariant,
    /// Flate-compress the page content stream.
    pub compress: bool,
    /// Date printed in the footer. `None` means today, read once per
    /// render before layout starts.
    pub generated_on: Option<NaiveDate>,
    pub payment_terms: String,
    /// `/Creator` entry of the document info dictionary.
    pub creator: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            layout_variant: LayoutVariant::default(),
            compress: true,
            generated_on: None,
            payment_terms: DEFAULT_PAYMENT_TERMS.to_string(),
            creator: concat!("invoice-render ", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl RenderConfig {
    /// Defaults overlaid with `INVOICE_LAYOUT` (`simple`/`detailed`) and
    /// `INVOICE_COMPRESS` (`0`/`false` disables compression).
    pub fn from_env() -> Result<Self, RenderError> {
        let mut config = RenderConfig::default();
        if let Ok(layout) = env::var("INVOICE_LAYOUT") {
            config.layout_variant = layout.parse()?;
        }
        if let Ok(compress) = env::var("INVOICE_COMPRESS") {
            config.compress = !matches!(compress.trim(), "0" | "false" | "no" | "off");
        }
        Ok(config)
    }

    pub fn with_layout_variant(mut self, variant: LayoutVariant) -> Self {
        self.layout_variant = variant;
        self
    }

    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn with_generated_on(mut self, date: NaiveDate) -> Self {
        self.generated_on = Some(date);
        self
    }

    /// The footer date for this render.
    pub fn resolve_generated_on(&self) -> NaiveDate {
        self.generated_on
            .unwrap_or_else(|| Local::now().date_naive())
    }
}
