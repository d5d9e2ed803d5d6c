/// The two font weights an invoice page reserves. Both are the
/// standard Helvetica family, so nothing is embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Regular,
    Bold,
}

impl FontWeight {
    /// Resource name used in content streams.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            FontWeight::Regular => "F1",
            FontWeight::Bold => "F2",
        }
    }

    /// PDF `/BaseFont` name.
    pub fn base_font(&self) -> &'static str {
        match self {
            FontWeight::Regular => "Helvetica",
            FontWeight::Bold => "Helvetica-Bold",
        }
    }

    /// Width of one WinAnsi-encoded byte in 1/1000 em.
    fn byte_width(&self, b: u8) -> u16 {
        let table = match self {
            FontWeight::Regular => &HELVETICA_WIDTHS,
            FontWeight::Bold => &HELVETICA_BOLD_WIDTHS,
        };
        match b {
            32..=126 => table[(b - 32) as usize],
            0x95 => 350,
            0x97 => 1000,
            0x91 | 0x92 => 222,
            _ => DEFAULT_WIDTH,
        }
    }
}

/// Font selection for one piece of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub weight: FontWeight,
    /// Size in points.
    pub size: f64,
}

impl TextStyle {
    pub fn regular(size: f64) -> Self {
        TextStyle {
            weight: FontWeight::Regular,
            size,
        }
    }

    pub fn bold(size: f64) -> Self {
        TextStyle {
            weight: FontWeight::Bold,
            size,
        }
    }
}

/// Measure the rendered width of `text` in points.
pub fn measure_text(text: &str, style: TextStyle) -> f64 {
    let units: u32 = encode_win_ansi(text)
        .into_iter()
        .map(|b| style.weight.byte_width(b) as u32)
        .sum();
    units as f64 * style.size / 1000.0
}

/// Encode text for the WinAnsiEncoding the page fonts declare.
///
/// Latin-1 maps through directly. Characters outside the encoding
/// become `?`, except the rupee sign which is spelled `Rs.`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        match win_ansi_byte(ch) {
            Some(b) => out.push(b),
            None if ch == '\u{20B9}' => out.extend_from_slice(b"Rs."),
            None => out.push(b'?'),
        }
    }
    out
}

fn win_ansi_byte(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => {
            let b = match ch {
                '€' => 0x80,
                '‚' => 0x82,
                'ƒ' => 0x83,
                '„' => 0x84,
                '…' => 0x85,
                '†' => 0x86,
                '‡' => 0x87,
                'ˆ' => 0x88,
                '‰' => 0x89,
                'Š' => 0x8A,
                '‹' => 0x8B,
                'Œ' => 0x8C,
                'Ž' => 0x8E,
                '‘' => 0x91,
                '’' => 0x92,
                '“' => 0x93,
                '”' => 0x94,
                '•' => 0x95,
                '–' => 0x96,
                '—' => 0x97,
                '˜' => 0x98,
                '™' => 0x99,
                'š' => 0x9A,
                '›' => 0x9B,
                'œ' => 0x9C,
                'ž' => 0x9E,
                'Ÿ' => 0x9F,
                _ => return None,
            };
            Some(b)
        }
    }
}

/// Widths outside ASCII that are not listed explicitly.
const DEFAULT_WIDTH: u16 = 556;

/// Helvetica widths for ASCII 32..=126, 1/1000 em (Adobe AFM).
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold widths for ASCII 32..=126, 1/1000 em (Adobe AFM).
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passes_through() {
        assert_eq!(encode_win_ansi("Total: 9.50"), b"Total: 9.50".to_vec());
    }

    #[test]
    fn currency_symbols() {
        assert_eq!(encode_win_ansi("€"), vec![0x80]);
        assert_eq!(encode_win_ansi("£"), vec![0xA3]);
        assert_eq!(encode_win_ansi("₹ 10"), b"Rs. 10".to_vec());
        assert_eq!(encode_win_ansi("日"), b"?".to_vec());
    }

    #[test]
    fn measure_uses_weight_table() {
        // 'b' is 556 regular and 611 bold.
        assert_eq!(measure_text("b", TextStyle::regular(10.0)), 5.56);
        assert_eq!(measure_text("b", TextStyle::bold(10.0)), 6.11);
    }

    #[test]
    fn measure_scales_with_size() {
        let small = measure_text("Grand Total:", TextStyle::regular(10.0));
        let large = measure_text("Grand Total:", TextStyle::regular(20.0));
        assert!((large - 2.0 * small).abs() < 1e-9);
    }
}
