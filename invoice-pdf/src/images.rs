use crate::error::{InvoiceError, Result};

/// PDF color space of decoded image samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    DeviceRGB,
    DeviceGray,
}

impl ColorSpace {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceRGB => "DeviceRGB",
            ColorSpace::DeviceGray => "DeviceGray",
        }
    }
}

/// How `LogoImage::samples` is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleEncoding {
    /// Untouched JPEG stream, embedded with `DCTDecode`.
    Jpeg,
    /// Uncompressed 8-bit samples, row-major.
    Raw,
}

/// A decoded company logo, ready to embed as an image XObject.
///
/// The logo is read-only input to a render call; decoding happens
/// once, on the caller's side.
#[derive(Debug, Clone, PartialEq)]
pub struct LogoImage {
    pub width: u32,
    pub height: u32,
    pub color_space: ColorSpace,
    pub encoding: SampleEncoding,
    pub samples: Vec<u8>,
    /// 8-bit alpha channel, present for PNGs with transparency.
    pub alpha: Option<Vec<u8>>,
}

impl LogoImage {
    /// Decode PNG or JPEG bytes, detected from the leading magic.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.starts_with(&[0xFF, 0xD8]) {
            decode_jpeg(bytes)
        } else if bytes.starts_with(b"\x89PNG") {
            decode_png(bytes)
        } else {
            Err(InvoiceError::UnsupportedImage(
                "expected PNG or JPEG data".to_string(),
            ))
        }
    }
}

fn decode_jpeg(bytes: &[u8]) -> Result<LogoImage> {
    let (width, height, components) = jpeg_frame_header(bytes)?;
    let color_space = match components {
        1 => ColorSpace::DeviceGray,
        3 => ColorSpace::DeviceRGB,
        n => {
            return Err(InvoiceError::UnsupportedImage(format!(
                "JPEG with {} components",
                n
            )))
        }
    };
    Ok(LogoImage {
        width,
        height,
        color_space,
        encoding: SampleEncoding::Jpeg,
        samples: bytes.to_vec(),
        alpha: None,
    })
}

/// Walk the JPEG marker segments up to the first SOF0..SOF3 and
/// return (width, height, components).
fn jpeg_frame_header(data: &[u8]) -> Result<(u32, u32, u8)> {
    let truncated = || InvoiceError::UnsupportedImage("truncated JPEG".to_string());
    let mut i = 2;
    while i + 3 < data.len() {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }
        let marker = data[i + 1];
        match marker {
            0xC0..=0xC3 => {
                let frame = data.get(i + 5..i + 10).ok_or_else(truncated)?;
                let height = u16::from_be_bytes([frame[0], frame[1]]) as u32;
                let width = u16::from_be_bytes([frame[2], frame[3]]) as u32;
                return Ok((width, height, frame[4]));
            }
            // Fill bytes and standalone markers carry no length.
            0xFF | 0x00 => i += 1,
            0xD0..=0xD9 => i += 2,
            _ => {
                let len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
                i += 2 + len;
            }
        }
    }
    Err(InvoiceError::UnsupportedImage(
        "no frame header in JPEG".to_string(),
    ))
}

fn decode_png(bytes: &[u8]) -> Result<LogoImage> {
    let png_err = |e: png::DecodingError| InvoiceError::UnsupportedImage(format!("PNG: {}", e));

    let mut decoder = png::Decoder::new(bytes);
    // Palette and low bit depths expand to 8-bit channels.
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info().map_err(png_err)?;
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).map_err(png_err)?;
    buf.truncate(info.buffer_size());

    let (color_space, channels) = match info.color_type {
        png::ColorType::Rgb => (ColorSpace::DeviceRGB, 3),
        png::ColorType::Rgba => (ColorSpace::DeviceRGB, 4),
        png::ColorType::Grayscale => (ColorSpace::DeviceGray, 1),
        png::ColorType::GrayscaleAlpha => (ColorSpace::DeviceGray, 2),
        other => {
            return Err(InvoiceError::UnsupportedImage(format!(
                "PNG color type {:?}",
                other
            )))
        }
    };

    let (samples, alpha) = if channels % 2 == 0 {
        split_alpha(&buf, channels)
    } else {
        (buf, None)
    };

    Ok(LogoImage {
        width: info.width,
        height: info.height,
        color_space,
        encoding: SampleEncoding::Raw,
        samples,
        alpha,
    })
}

/// Separate the trailing alpha channel from interleaved pixels.
fn split_alpha(buf: &[u8], channels: usize) -> (Vec<u8>, Option<Vec<u8>>) {
    let pixels = buf.len() / channels;
    let mut color = Vec::with_capacity(pixels * (channels - 1));
    let mut alpha = Vec::with_capacity(pixels);
    for px in buf.chunks_exact(channels) {
        color.extend_from_slice(&px[..channels - 1]);
        alpha.push(px[channels - 1]);
    }
    (color, Some(alpha))
}
