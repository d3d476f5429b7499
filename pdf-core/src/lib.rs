pub mod document;
pub mod fonts;
pub mod graphics;
pub mod objects;
pub mod writer;

pub use document::PdfDocument;
pub use fonts::{BuiltinFont, FontId, FontMetrics};
pub use graphics::Color;
