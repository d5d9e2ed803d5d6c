use std::io::{self, Write};

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::fonts::{encode_win_ansi, FontWeight, TextStyle};
use crate::graphics::Color;
use crate::images::{LogoImage, SampleEncoding};
use crate::objects::{ObjId, PdfObject};
use crate::writer::{escape_pdf_bytes, format_coord, PdfWriter};

const CATALOG_OBJ: ObjId = ObjId(1, 0);
const PAGES_OBJ: ObjId = ObjId(2, 0);
const FONT_REGULAR_OBJ: ObjId = ObjId(3, 0);
const FONT_BOLD_OBJ: ObjId = ObjId(4, 0);
const FIRST_FREE_OBJ_NUM: u32 = 5;

/// Builder for a one-page PDF document.
///
/// Generic over `Write` so it works with in-memory buffers as well
/// as files. Drawing methods append operators to the page content;
/// image XObjects are written to the output as soon as they are
/// placed. `end_document` writes the page, the document structure
/// and the xref table.
pub struct PdfDocument<W: Write> {
    writer: PdfWriter<W>,
    info: Vec<(String, PdfObject)>,
    width: f64,
    height: f64,
    content_ops: Vec<u8>,
    /// (resource name, object) for every image on the page.
    images: Vec<(String, ObjId)>,
    next_obj_num: u32,
    compress: bool,
}

impl<W: Write> PdfDocument<W> {
    /// Start a document whose single page is `width` x `height`
    /// points. Writes the header and both font objects immediately.
    pub fn new(writer: W, width: f64, height: f64) -> io::Result<Self> {
        let mut pdf_writer = PdfWriter::new(writer);
        pdf_writer.write_header()?;

        for (id, weight) in [
            (FONT_REGULAR_OBJ, FontWeight::Regular),
            (FONT_BOLD_OBJ, FontWeight::Bold),
        ] {
            let font = PdfObject::dict(vec![
                ("Type", PdfObject::name("Font")),
                ("Subtype", PdfObject::name("Type1")),
                ("BaseFont", PdfObject::name(weight.base_font())),
                ("Encoding", PdfObject::name("WinAnsiEncoding")),
            ]);
            pdf_writer.write_object(id, &font)?;
        }

        Ok(PdfDocument {
            writer: pdf_writer,
            info: Vec::new(),
            width,
            height,
            content_ops: Vec::new(),
            images: Vec::new(),
            next_obj_num: FIRST_FREE_OBJ_NUM,
            compress: false,
        })
    }

    /// Flate-compress the page content stream.
    pub fn set_compression(&mut self, enabled: bool) -> &mut Self {
        self.compress = enabled;
        self
    }

    /// Add a document info entry (e.g. "Title", "CreationDate").
    pub fn set_info(&mut self, key: &str, value: &str) -> &mut Self {
        self.info.push((key.to_string(), PdfObject::text(value)));
        self
    }

    fn push_op(&mut self, op: String) {
        self.content_ops.extend_from_slice(op.as_bytes());
    }

    fn alloc_id(&mut self) -> ObjId {
        let id = ObjId(self.next_obj_num, 0);
        self.next_obj_num += 1;
        id
    }

    pub fn save_state(&mut self) -> &mut Self {
        self.content_ops.extend_from_slice(b"q\n");
        self
    }

    pub fn restore_state(&mut self) -> &mut Self {
        self.content_ops.extend_from_slice(b"Q\n");
        self
    }

    pub fn set_stroke_color(&mut self, c: Color) -> &mut Self {
        self.push_op(format!(
            "{} {} {} RG\n",
            format_coord(c.r),
            format_coord(c.g),
            format_coord(c.b)
        ));
        self
    }

    pub fn set_fill_color(&mut self, c: Color) -> &mut Self {
        self.push_op(format!(
            "{} {} {} rg\n",
            format_coord(c.r),
            format_coord(c.g),
            format_coord(c.b)
        ));
        self
    }

    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        self.push_op(format!("{} w\n", format_coord(width)));
        self
    }

    /// Append a rectangle path with its bottom-left corner at (x, y).
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.push_op(format!(
            "{} {} {} {} re\n",
            format_coord(x),
            format_coord(y),
            format_coord(width),
            format_coord(height)
        ));
        self
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.push_op(format!("{} {} m\n", format_coord(x), format_coord(y)));
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.push_op(format!("{} {} l\n", format_coord(x), format_coord(y)));
        self
    }

    pub fn stroke(&mut self) -> &mut Self {
        self.content_ops.extend_from_slice(b"S\n");
        self
    }

    pub fn fill(&mut self) -> &mut Self {
        self.content_ops.extend_from_slice(b"f\n");
        self
    }

    /// Place a single line of text with its baseline starting at
    /// (x, y), in the current fill color.
    pub fn place_text_styled(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        style: &TextStyle,
    ) -> &mut Self {
        self.push_op(format!(
            "BT\n/{} {} Tf\n{} {} Td\n(",
            style.weight.pdf_name(),
            format_coord(style.size),
            format_coord(x),
            format_coord(y),
        ));
        let encoded = escape_pdf_bytes(&encode_win_ansi(text));
        self.content_ops.extend_from_slice(&encoded);
        self.content_ops.extend_from_slice(b") Tj\nET\n");
        self
    }

    /// Embed `image` and paint it stretched into the given box.
    pub fn place_image(
        &mut self,
        image: &LogoImage,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> io::Result<&mut Self> {
        let id = self.write_image(image)?;
        let name = format!("Im{}", self.images.len() + 1);
        self.push_op(format!(
            "q\n{} 0 0 {} {} {} cm\n/{} Do\nQ\n",
            format_coord(width),
            format_coord(height),
            format_coord(x),
            format_coord(y),
            name,
        ));
        self.images.push((name, id));
        Ok(self)
    }

    fn write_image(&mut self, image: &LogoImage) -> io::Result<ObjId> {
        let smask = match &image.alpha {
            Some(alpha) => {
                let id = self.alloc_id();
                let obj = PdfObject::stream(
                    vec![
                        ("Type", PdfObject::name("XObject")),
                        ("Subtype", PdfObject::name("Image")),
                        ("Width", PdfObject::Integer(image.width as i64)),
                        ("Height", PdfObject::Integer(image.height as i64)),
                        ("ColorSpace", PdfObject::name("DeviceGray")),
                        ("BitsPerComponent", PdfObject::Integer(8)),
                        ("Filter", PdfObject::name("FlateDecode")),
                    ],
                    deflate(alpha)?,
                );
                self.writer.write_object(id, &obj)?;
                Some(id)
            }
            None => None,
        };

        let (filter, data) = match image.encoding {
            SampleEncoding::Jpeg => ("DCTDecode", image.samples.clone()),
            SampleEncoding::Raw => ("FlateDecode", deflate(&image.samples)?),
        };
        let mut dict = vec![
            ("Type", PdfObject::name("XObject")),
            ("Subtype", PdfObject::name("Image")),
            ("Width", PdfObject::Integer(image.width as i64)),
            ("Height", PdfObject::Integer(image.height as i64)),
            ("ColorSpace", PdfObject::name(image.color_space.pdf_name())),
            ("BitsPerComponent", PdfObject::Integer(8)),
            ("Filter", PdfObject::name(filter)),
        ];
        if let Some(smask_id) = smask {
            dict.push(("SMask", PdfObject::Reference(smask_id)));
        }

        let id = self.alloc_id();
        self.writer.write_object(id, &PdfObject::stream(dict, data))?;
        Ok(id)
    }

    /// Write the page, pages tree, catalog, info dictionary, xref and
    /// trailer. Consumes the builder and returns the inner writer.
    pub fn end_document(mut self) -> io::Result<W> {
        let content_id = self.alloc_id();
        let content = std::mem::take(&mut self.content_ops);
        let content_stream = if self.compress {
            PdfObject::stream(
                vec![("Filter", PdfObject::name("FlateDecode"))],
                deflate(&content)?,
            )
        } else {
            PdfObject::stream(vec![], content)
        };
        self.writer.write_object(content_id, &content_stream)?;
        let page_id = self.alloc_id();

        let mut resources = vec![(
            "Font",
            PdfObject::dict(vec![
                (FontWeight::Regular.pdf_name(), PdfObject::Reference(FONT_REGULAR_OBJ)),
                (FontWeight::Bold.pdf_name(), PdfObject::Reference(FONT_BOLD_OBJ)),
            ]),
        )];
        if !self.images.is_empty() {
            let xobjects = self
                .images
                .iter()
                .map(|(name, id)| (name.as_str(), PdfObject::Reference(*id)))
                .collect();
            resources.push(("XObject", PdfObject::dict(xobjects)));
        }

        let page = PdfObject::dict(vec![
            ("Type", PdfObject::name("Page")),
            ("Parent", PdfObject::Reference(PAGES_OBJ)),
            ("MediaBox", PdfObject::rect(0.0, 0.0, self.width, self.height)),
            ("Contents", PdfObject::Reference(content_id)),
            ("Resources", PdfObject::dict(resources)),
        ]);
        self.writer.write_object(page_id, &page)?;

        let pages = PdfObject::dict(vec![
            ("Type", PdfObject::name("Pages")),
            ("Kids", PdfObject::array(vec![PdfObject::Reference(page_id)])),
            ("Count", PdfObject::Integer(1)),
        ]);
        self.writer.write_object(PAGES_OBJ, &pages)?;

        let catalog = PdfObject::dict(vec![
            ("Type", PdfObject::name("Catalog")),
            ("Pages", PdfObject::Reference(PAGES_OBJ)),
        ]);
        self.writer.write_object(CATALOG_OBJ, &catalog)?;

        let info_id = if self.info.is_empty() {
            None
        } else {
            let id = self.alloc_id();
            let entries = std::mem::take(&mut self.info);
            self.writer
                .write_object(id, &PdfObject::Dictionary(entries))?;
            Some(id)
        };

        self.writer.write_xref_and_trailer(CATALOG_OBJ, info_id)?;
        Ok(self.writer.into_inner())
    }
}

/// Zlib-compress `data` for a `FlateDecode` stream.
fn deflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
