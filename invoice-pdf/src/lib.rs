pub mod assembler;
pub mod calculator;
pub mod document;
pub mod error;
pub mod fonts;
pub mod graphics;
pub mod images;
pub mod invoice;
pub mod layout;
pub mod objects;
pub mod page;
pub mod renderer;
pub mod writer;

pub use assembler::{render_invoice, InvoiceRenderer, PAYMENT_TERMS_NOTE, THANK_YOU_NOTE};
pub use calculator::{compute, format_amount, ComputedTotals, SummaryKind, TableRow};
pub use document::PdfDocument;
pub use error::{InvoiceError, Result};
pub use fonts::{FontWeight, TextStyle};
pub use graphics::Color;
pub use images::{ColorSpace, LogoImage, SampleEncoding};
pub use invoice::{InvoiceHeader, InvoiceLineItem};
pub use layout::{
    CellStyle, LayoutBox, PlacedCell, Rule, TableGeometry, TableLayout, TextAlign, COLUMN_COUNT,
};
pub use page::{PageLayout, A4_HEIGHT, A4_WIDTH};
pub use renderer::{DrawingSurface, PdfSurface};
