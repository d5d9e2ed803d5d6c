use std::io::Read;

use flate2::read::ZlibDecoder;
use invoice_pdf::{Color, ColorSpace, LogoImage, PdfDocument, SampleEncoding, TextStyle};

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn make_doc() -> PdfDocument<Vec<u8>> {
    PdfDocument::new(Vec::new(), 595.28, 841.89).unwrap()
}

fn gray_logo() -> LogoImage {
    LogoImage {
        width: 2,
        height: 2,
        color_space: ColorSpace::DeviceGray,
        encoding: SampleEncoding::Raw,
        samples: vec![0, 64, 128, 255],
        alpha: None,
    }
}

#[test]
fn empty_document_is_well_formed() {
    let bytes = make_doc().end_document().unwrap();
    let output = String::from_utf8_lossy(&bytes);
    assert!(output.starts_with("%PDF-1.7\n"));
    assert!(output.contains("/Type /Catalog /Pages 2 0 R"));
    assert!(output.contains("/Count 1"));
    assert!(output.contains("/MediaBox [0.0 0.0 595.28 841.89]"));
    assert!(output.ends_with("%%EOF\n"));
}

#[test]
fn fonts_declare_win_ansi_encoding() {
    let bytes = make_doc().end_document().unwrap();
    let output = String::from_utf8_lossy(&bytes);
    assert!(output.contains("/BaseFont /Helvetica /Encoding /WinAnsiEncoding"));
    assert!(output.contains("/BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding"));
    assert!(output.contains("/F1 3 0 R /F2 4 0 R"));
}

#[test]
fn styled_text_operators() {
    let mut doc = make_doc();
    doc.place_text_styled("Invoice - Acme", 50.0, 600.0, &TextStyle::bold(18.0));
    doc.place_text_styled("Email: a@b.c", 50.0, 520.0, &TextStyle::regular(12.0));
    let bytes = doc.end_document().unwrap();
    assert!(contains(&bytes, b"BT\n/F2 18 Tf\n50 600 Td\n(Invoice - Acme) Tj\nET\n"));
    assert!(contains(&bytes, b"/F1 12 Tf\n50 520 Td\n(Email: a@b.c) Tj"));
}

#[test]
fn text_is_encoded_and_escaped() {
    let mut doc = make_doc();
    doc.place_text_styled("Total (€)", 0.0, 0.0, &TextStyle::regular(10.0));
    let bytes = doc.end_document().unwrap();
    assert!(contains(&bytes, b"(Total \\(\x80\\)) Tj"));
}

#[test]
fn path_and_color_operators() {
    let mut doc = make_doc();
    doc.save_state()
        .set_stroke_color(Color::rgb(1.0, 0.0, 0.0))
        .set_fill_color(Color::rgb(0.5, 0.5, 0.5))
        .set_line_width(2.0)
        .rect(40.0, 40.0, 495.28, 570.0)
        .stroke()
        .move_to(50.0, 400.0)
        .line_to(530.0, 400.0)
        .stroke()
        .restore_state();
    let bytes = doc.end_document().unwrap();
    let output = String::from_utf8_lossy(&bytes);
    assert!(output.contains("q\n1 0 0 RG\n0.5 0.5 0.5 rg\n2 w\n"));
    assert!(output.contains("40 40 495.28 570 re\nS\n"));
    assert!(output.contains("50 400 m\n530 400 l\nS\nQ\n"));
}

#[test]
fn info_dictionary_is_referenced_from_trailer() {
    let mut doc = make_doc();
    doc.set_info("Title", "Invoice - Acme")
        .set_info("CreationDate", "D:20240309070530");
    let bytes = doc.end_document().unwrap();
    let output = String::from_utf8_lossy(&bytes);
    assert!(output.contains("<< /Title (Invoice - Acme) /CreationDate (D:20240309070530) >>"));
    assert!(output.contains("/Info "));
}

#[test]
fn compressed_content_inflates_to_operators() {
    let mut doc = make_doc();
    doc.set_compression(true);
    doc.place_text_styled("Hello", 20.0, 20.0, &TextStyle::regular(12.0));
    let bytes = doc.end_document().unwrap();
    assert!(!contains(&bytes, b"(Hello) Tj"));
    assert!(contains(&bytes, b"/Filter /FlateDecode"));

    let start = bytes
        .windows(b"stream\n".len())
        .position(|w| w == b"stream\n")
        .unwrap()
        + b"stream\n".len();
    let end = start
        + bytes[start..]
            .windows(b"\nendstream".len())
            .position(|w| w == b"\nendstream")
            .unwrap();
    let mut inflated = String::new();
    ZlibDecoder::new(&bytes[start..end])
        .read_to_string(&mut inflated)
        .unwrap();
    assert!(inflated.contains("(Hello) Tj"));
}

#[test]
fn placed_image_is_an_xobject_resource() {
    let mut doc = make_doc();
    doc.place_image(&gray_logo(), 50.0, 550.0, 100.0, 50.0).unwrap();
    let bytes = doc.end_document().unwrap();
    let output = String::from_utf8_lossy(&bytes);
    assert!(output.contains("/Subtype /Image /Width 2 /Height 2 /ColorSpace /DeviceGray"));
    assert!(output.contains("/Filter /FlateDecode"));
    assert!(output.contains("q\n100 0 0 50 50 550 cm\n/Im1 Do\nQ\n"));
    assert!(output.contains("/XObject << /Im1 5 0 R >>"));
}

#[test]
fn alpha_channel_becomes_smask() {
    let logo = LogoImage {
        color_space: ColorSpace::DeviceRGB,
        samples: vec![255; 12],
        alpha: Some(vec![0, 85, 170, 255]),
        ..gray_logo()
    };
    let mut doc = make_doc();
    doc.place_image(&logo, 0.0, 0.0, 10.0, 10.0).unwrap();
    let bytes = doc.end_document().unwrap();
    let output = String::from_utf8_lossy(&bytes);
    // SMask is written first (obj 5), the color image refers to it.
    assert!(output.contains("/ColorSpace /DeviceRGB"));
    assert!(output.contains("/SMask 5 0 R"));
    assert!(output.contains("/Im1 6 0 R"));
}

#[test]
fn jpeg_samples_pass_through_with_dct_filter() {
    let jpeg = vec![0xFF, 0xD8, 0xFF, 0xD9];
    let logo = LogoImage {
        color_space: ColorSpace::DeviceRGB,
        encoding: SampleEncoding::Jpeg,
        samples: jpeg.clone(),
        ..gray_logo()
    };
    let mut doc = make_doc();
    doc.place_image(&logo, 0.0, 0.0, 10.0, 10.0).unwrap();
    let bytes = doc.end_document().unwrap();
    assert!(contains(
        &bytes,
        b"/Filter /DCTDecode /Length 4 >>\nstream\n\xFF\xD8\xFF\xD9\nendstream"
    ));
}
