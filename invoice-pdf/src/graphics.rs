/// RGB color for fills and strokes.
///
/// Each component is in the range 0.0 (none) to 1.0 (full intensity).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITESMOKE: Color = Color::rgb(0.96, 0.96, 0.96);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color { r, g, b }
    }

    /// Build a color from a 24-bit `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xFF) as f64 / 255.0;
        Color::rgb(channel(16), channel(8), channel(0))
    }
}
