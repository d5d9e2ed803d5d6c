use crate::document::PdfDocument;
use crate::error::{InvoiceError, Result};
use crate::fonts::{measure_text, TextStyle};
use crate::graphics::Color;
use crate::images::LogoImage;
use crate::layout::{LayoutBox, PlacedCell, TableGeometry, TextAlign};

/// Helvetica cap height in em, used to center text vertically.
const CAP_HEIGHT: f64 = 0.718;

/// Horizontal padding for left- and right-aligned cell text.
const CELL_PADDING: f64 = 4.0;

/// The drawing primitives an invoice page is built from.
///
/// Once `finish` has returned, every further call fails with
/// `DocumentAlreadyFinalized`.
pub trait DrawingSurface {
    /// Record a document metadata entry. Surfaces without metadata
    /// ignore it.
    fn set_info(&mut self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    /// Stroke the outline of `bounds`.
    fn draw_border_rect(&mut self, bounds: &LayoutBox, stroke_width: f64) -> Result<()>;

    /// Draw one line of text with its baseline starting at (x, y).
    fn draw_text(&mut self, x: f64, y: f64, text: &str, style: TextStyle) -> Result<()>;

    /// Paint `image` stretched into `bounds`.
    fn draw_image(&mut self, image: &LogoImage, bounds: &LayoutBox) -> Result<()>;

    /// Paint a laid-out table: backgrounds, text, grid, then rules.
    fn draw_table(&mut self, table: &TableGeometry) -> Result<()>;

    /// Seal the document and return its bytes.
    fn finish(&mut self) -> Result<Vec<u8>>;
}

/// A `DrawingSurface` producing a single-page PDF in memory.
pub struct PdfSurface {
    doc: Option<PdfDocument<Vec<u8>>>,
}

impl PdfSurface {
    pub fn new(page_width: f64, page_height: f64) -> Result<Self> {
        let doc = PdfDocument::new(Vec::new(), page_width, page_height)?;
        Ok(PdfSurface { doc: Some(doc) })
    }

    /// Flate-compress the page content when the surface is finished.
    pub fn set_compression(&mut self, enabled: bool) -> Result<()> {
        self.doc_mut()?.set_compression(enabled);
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.doc.is_none()
    }

    fn doc_mut(&mut self) -> Result<&mut PdfDocument<Vec<u8>>> {
        self.doc.as_mut().ok_or(InvoiceError::DocumentAlreadyFinalized)
    }
}

impl DrawingSurface for PdfSurface {
    fn set_info(&mut self, key: &str, value: &str) -> Result<()> {
        self.doc_mut()?.set_info(key, value);
        Ok(())
    }

    fn draw_border_rect(&mut self, bounds: &LayoutBox, stroke_width: f64) -> Result<()> {
        self.doc_mut()?
            .save_state()
            .set_stroke_color(Color::BLACK)
            .set_line_width(stroke_width)
            .rect(bounds.x, bounds.y, bounds.width, bounds.height)
            .stroke()
            .restore_state();
        Ok(())
    }

    fn draw_text(&mut self, x: f64, y: f64, text: &str, style: TextStyle) -> Result<()> {
        self.doc_mut()?.place_text_styled(text, x, y, &style);
        Ok(())
    }

    fn draw_image(&mut self, image: &LogoImage, bounds: &LayoutBox) -> Result<()> {
        self.doc_mut()?
            .place_image(image, bounds.x, bounds.y, bounds.width, bounds.height)?;
        Ok(())
    }

    fn draw_table(&mut self, table: &TableGeometry) -> Result<()> {
        let doc = self.doc_mut()?;

        for cell in &table.cells {
            if let Some(bg) = cell.style.background {
                let b = &cell.bounds;
                doc.save_state()
                    .set_fill_color(bg)
                    .rect(b.x, b.y, b.width, b.height)
                    .fill()
                    .restore_state();
            }
        }

        for cell in table.cells.iter().filter(|c| !c.text.is_empty()) {
            let (x, y) = text_origin(cell);
            doc.save_state()
                .set_fill_color(cell.style.text_color)
                .place_text_styled(&cell.text, x, y, &cell.style.text)
                .restore_state();
        }

        if table.grid_width > 0.0 {
            doc.save_state()
                .set_stroke_color(table.grid_color)
                .set_line_width(table.grid_width);
            for cell in &table.cells {
                let b = &cell.bounds;
                doc.rect(b.x, b.y, b.width, b.height);
            }
            doc.stroke().restore_state();
        }

        for rule in &table.rules {
            doc.save_state()
                .set_stroke_color(table.grid_color)
                .set_line_width(rule.width)
                .move_to(rule.x0, rule.y)
                .line_to(rule.x1, rule.y)
                .stroke()
                .restore_state();
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<Vec<u8>> {
        let doc = self.doc.take().ok_or(InvoiceError::DocumentAlreadyFinalized)?;
        Ok(doc.end_document()?)
    }
}

/// Baseline start of a cell's text so that it sits vertically
/// centered and horizontally aligned per the cell style.
fn text_origin(cell: &PlacedCell) -> (f64, f64) {
    let b = &cell.bounds;
    let style = &cell.style;
    let text_width = measure_text(&cell.text, style.text);
    let x = match style.align {
        TextAlign::Left => b.x + CELL_PADDING,
        TextAlign::Center => b.x + (b.width - text_width) / 2.0,
        TextAlign::Right => b.right() - CELL_PADDING - text_width,
    };
    let y = b.y + (b.height - CAP_HEIGHT * style.text.size) / 2.0;
    (x, y)
}
