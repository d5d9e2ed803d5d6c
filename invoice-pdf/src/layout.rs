//! Table layout: turns tagged rows into cell boxes, per-cell styles
//! and the extra ruled lines, all in page coordinates.
//!
//! Rows are stacked top-down from the origin with one uniform height.
//! Text is never wrapped or reflowed; content wider than its column
//! is the caller's concern.

use crate::calculator::{SummaryKind, TableRow};
use crate::error::{InvoiceError, Result};
use crate::fonts::{FontWeight, TextStyle};
use crate::graphics::Color;
use crate::page::PageLayout;

/// The item table always has four columns.
pub const COLUMN_COUNT: usize = 4;

/// Header band background (#4CAF50).
pub const HEADER_BACKGROUND: u32 = 0x4CAF50;
/// Background for item rows (#F0F0F0).
pub const ITEM_BACKGROUND: u32 = 0xF0F0F0;

/// A rectangle in page coordinates. `(x, y)` is the bottom-left
/// corner, matching PDF's origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LayoutBox {
    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Horizontal placement of text inside its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Visual style carried alongside a cell's geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellStyle {
    pub background: Option<Color>,
    pub text_color: Color,
    pub text: TextStyle,
    pub align: TextAlign,
}

/// A cell with its final box and style.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCell {
    pub text: String,
    pub bounds: LayoutBox,
    pub style: CellStyle,
}

/// A horizontal line spanning the full table width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub x0: f64,
    pub x1: f64,
    pub y: f64,
    pub width: f64,
}

/// Output of the layout engine, consumed by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct TableGeometry {
    /// Cells row by row, left to right.
    pub cells: Vec<PlacedCell>,
    /// Emphasis lines below the header and above the summary block.
    pub rules: Vec<Rule>,
    /// Stroke width of the outline drawn around every cell.
    pub grid_width: f64,
    pub grid_color: Color,
    /// Bounding box of the whole table.
    pub bounds: LayoutBox,
}

impl TableGeometry {
    pub fn height(&self) -> f64 {
        self.bounds.height
    }

    pub fn row_count(&self) -> usize {
        self.cells.len() / COLUMN_COUNT
    }
}

/// Fixed sizing for the item table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    pub column_widths: [f64; COLUMN_COUNT],
    pub row_height: f64,
    pub font_size: f64,
    pub grid_width: f64,
    pub rule_width: f64,
    /// Lowest y the bottom edge of the table may reach.
    pub floor_y: f64,
}

impl TableLayout {
    pub fn from_page(page: &PageLayout) -> Self {
        TableLayout {
            column_widths: page.column_widths,
            row_height: page.row_height,
            font_size: page.cell_font_size,
            grid_width: page.grid_stroke,
            rule_width: page.rule_stroke,
            floor_y: page.table_floor(),
        }
    }

    /// Place `rows` with the table's top-left corner at
    /// `(origin_x, origin_y)`.
    ///
    /// Fails with `InvalidLayout` when a column width or the row height
    /// is not a positive finite number, and with `LayoutOverflow` when
    /// the rows do not fit above `floor_y`.
    pub fn layout(
        &self,
        rows: &[TableRow],
        origin_x: f64,
        origin_y: f64,
    ) -> Result<TableGeometry> {
        self.check_sizes()?;

        let height = self.row_height * rows.len() as f64;
        let table_bottom = origin_y - height;
        if table_bottom < self.floor_y {
            return Err(InvoiceError::LayoutOverflow {
                table_bottom,
                floor: self.floor_y,
            });
        }

        let width: f64 = self.column_widths.iter().sum();
        let mut cells = Vec::with_capacity(rows.len() * COLUMN_COUNT);
        let mut rules = Vec::new();
        let mut rule_at = |y: f64| {
            rules.push(Rule {
                x0: origin_x,
                x1: origin_x + width,
                y,
                width: self.rule_width,
            })
        };

        for (i, row) in rows.iter().enumerate() {
            let row_top = origin_y - self.row_height * i as f64;
            let row_bottom = row_top - self.row_height;
            let style = self.row_style(row);

            match row {
                TableRow::Header(_) => rule_at(row_bottom),
                TableRow::Summary {
                    kind: SummaryKind::Subtotal | SummaryKind::GrandTotal,
                    ..
                } => rule_at(row_top),
                _ => {}
            }

            let mut col_x = origin_x;
            for (text, &col_width) in row.cells().iter().zip(&self.column_widths) {
                cells.push(PlacedCell {
                    text: text.to_string(),
                    bounds: LayoutBox {
                        x: col_x,
                        y: row_bottom,
                        width: col_width,
                        height: self.row_height,
                    },
                    style,
                });
                col_x += col_width;
            }
        }

        Ok(TableGeometry {
            cells,
            rules,
            grid_width: self.grid_width,
            grid_color: Color::BLACK,
            bounds: LayoutBox {
                x: origin_x,
                y: table_bottom,
                width,
                height,
            },
        })
    }

    fn check_sizes(&self) -> Result<()> {
        let positive = |v: f64| v > 0.0 && v.is_finite();
        if let Some(w) = self.column_widths.iter().find(|w| !positive(**w)) {
            return Err(InvoiceError::InvalidLayout(format!(
                "column widths must be positive, got {}",
                w
            )));
        }
        if !positive(self.row_height) {
            return Err(InvoiceError::InvalidLayout(format!(
                "row height must be positive, got {}",
                self.row_height
            )));
        }
        Ok(())
    }

    fn row_style(&self, row: &TableRow) -> CellStyle {
        let (background, text_color, weight) = match row {
            TableRow::Header(_) => (
                Some(Color::from_hex(HEADER_BACKGROUND)),
                Color::WHITESMOKE,
                FontWeight::Bold,
            ),
            TableRow::Item(_) => (
                Some(Color::from_hex(ITEM_BACKGROUND)),
                Color::BLACK,
                FontWeight::Regular,
            ),
            TableRow::Summary { .. } => (None, Color::BLACK, FontWeight::Regular),
        };
        CellStyle {
            background,
            text_color,
            text: TextStyle {
                weight,
                size: self.font_size,
            },
            align: TextAlign::Center,
        }
    }
}

impl Default for TableLayout {
    fn default() -> Self {
        TableLayout::from_page(&PageLayout::default())
    }
}
