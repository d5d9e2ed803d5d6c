use crate::error::{InvoiceError, Result};
use crate::fonts::TextStyle;
use crate::layout::{LayoutBox, COLUMN_COUNT};

/// A4 in points.
pub const A4_WIDTH: f64 = 595.28;
pub const A4_HEIGHT: f64 = 841.89;

/// Fixed geometry of the invoice page.
///
/// Coordinates use PDF's bottom-left origin. `top_margin` is the
/// baseline of the title line, not a distance from the page top.
/// Column widths stay fixed when the page size changes.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub page_width: f64,
    pub page_height: f64,
    pub left_margin: f64,
    /// Subtracted, together with the left margin, from the page width
    /// to give the border width.
    pub right_margin: f64,
    pub top_margin: f64,
    pub bottom_margin: f64,
    /// Distance the border sits outside the left and bottom margins.
    pub border_inset: f64,
    pub border_stroke: f64,
    pub logo_width: f64,
    pub logo_height: f64,
    /// Offset of the date/time column from the left margin.
    pub meta_column_offset: f64,
    pub title_size: f64,
    pub body_size: f64,
    pub footer_size: f64,
    /// Distance from the title baseline down to the table's top edge.
    pub table_offset: f64,
    pub column_widths: [f64; COLUMN_COUNT],
    pub row_height: f64,
    pub cell_font_size: f64,
    pub grid_stroke: f64,
    pub rule_stroke: f64,
    /// Space kept free above the bottom margin for the footer lines.
    pub footer_clearance: f64,
}

impl Default for PageLayout {
    fn default() -> Self {
        PageLayout {
            page_width: A4_WIDTH,
            page_height: A4_HEIGHT,
            left_margin: 50.0,
            right_margin: 50.0,
            top_margin: 600.0,
            bottom_margin: 50.0,
            border_inset: 10.0,
            border_stroke: 2.0,
            logo_width: 100.0,
            logo_height: 50.0,
            meta_column_offset: 300.0,
            title_size: 18.0,
            body_size: 12.0,
            footer_size: 10.0,
            table_offset: 180.0,
            column_widths: [200.0, 80.0, 100.0, 100.0],
            row_height: 20.0,
            cell_font_size: 10.0,
            grid_stroke: 1.0,
            rule_stroke: 1.0,
            footer_clearance: 40.0,
        }
    }
}

impl PageLayout {
    /// Check that every size is positive and the table fits inside
    /// the border.
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("page width", self.page_width),
            ("page height", self.page_height),
            ("border stroke", self.border_stroke),
            ("logo width", self.logo_width),
            ("logo height", self.logo_height),
            ("title size", self.title_size),
            ("body size", self.body_size),
            ("footer size", self.footer_size),
            ("row height", self.row_height),
            ("cell font size", self.cell_font_size),
        ];
        for (what, value) in sizes {
            if !(value > 0.0 && value.is_finite()) {
                return Err(InvoiceError::InvalidLayout(format!(
                    "{} must be positive, got {}",
                    what, value
                )));
            }
        }
        if let Some(w) = self
            .column_widths
            .iter()
            .find(|w| !(**w > 0.0 && w.is_finite()))
        {
            return Err(InvoiceError::InvalidLayout(format!(
                "column widths must be positive, got {}",
                w
            )));
        }
        if self.top_margin <= self.bottom_margin {
            return Err(InvoiceError::InvalidLayout(
                "top margin must lie above the bottom margin".to_string(),
            ));
        }

        let border = self.border_box();
        let table_right = self.left_margin + self.table_width();
        if table_right > border.x + border.width {
            return Err(InvoiceError::InvalidLayout(format!(
                "table is {}pt wide but the border ends at {}pt",
                self.table_width(),
                border.x + border.width
            )));
        }
        Ok(())
    }

    pub fn table_width(&self) -> f64 {
        self.column_widths.iter().sum()
    }

    /// The page border, drawn before anything else.
    pub fn border_box(&self) -> LayoutBox {
        LayoutBox {
            x: self.left_margin - self.border_inset,
            y: self.bottom_margin - self.border_inset,
            width: self.page_width - self.left_margin - self.right_margin,
            height: self.top_margin - self.bottom_margin + 2.0 * self.border_inset,
        }
    }

    /// Fixed slot of the logo, just under the title baseline.
    pub fn logo_box(&self) -> LayoutBox {
        LayoutBox {
            x: self.left_margin,
            y: self.top_margin - self.logo_height,
            width: self.logo_width,
            height: self.logo_height,
        }
    }

    /// Top-left corner of the item table.
    pub fn table_origin(&self) -> (f64, f64) {
        (self.left_margin, self.top_margin - self.table_offset)
    }

    /// Lowest y the table's bottom edge may reach.
    pub fn table_floor(&self) -> f64 {
        self.bottom_margin + self.footer_clearance
    }

    pub fn title_style(&self) -> TextStyle {
        TextStyle::bold(self.title_size)
    }

    pub fn body_style(&self) -> TextStyle {
        TextStyle::regular(self.body_size)
    }

    pub fn footer_style(&self) -> TextStyle {
        TextStyle::regular(self.footer_size)
    }
}
