use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::PdfResult;
use crate::graphics::{Color, ContentOps, Rect};
use crate::images::{self, ImageData, ImageFit, ImageFormat, ImageId};
use crate::objects::{ObjId, PdfObject};
use crate::writer::PdfWriter;

const CATALOG_OBJ: ObjId = ObjId(1, 0);
const PAGES_OBJ: ObjId = ObjId(2, 0);
const FIRST_FREE_OBJ_NUM: u32 = 3;

/// Incremental PDF builder.
///
/// Generic over `Write` so it works with files (`BufWriter<File>`),
/// in-memory buffers (`Vec<u8>`), or any other writer.
///
/// Images are written once, when loaded, and referenced from every page
/// that places them. `end_page()` flushes the page's content stream and
/// dictionary, so only the open page is ever held in memory.
pub struct PdfDocument<W: Write> {
    writer: PdfWriter<W>,
    info: Vec<(String, String)>,
    page_obj_ids: Vec<ObjId>,
    current_page: Option<PageBuilder>,
    next_obj_num: u32,
    compress: bool,
    images: Vec<EmbeddedImage>,
}

struct PageBuilder {
    width: f64,
    height: f64,
    ops: ContentOps,
    /// Indices into `PdfDocument::images`, in resource-name order.
    images: BTreeSet<usize>,
}

struct EmbeddedImage {
    obj_id: ObjId,
    width: u32,
    height: u32,
}

fn xobject_name(index: usize) -> String {
    format!("Im{}", index + 1)
}

impl PdfDocument<BufWriter<File>> {
    /// Create a document that writes to a new file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> PdfDocument<W> {
    /// Create a document over `writer`. The header is written immediately.
    pub fn new(writer: W) -> io::Result<Self> {
        let mut pdf_writer = PdfWriter::new(writer);
        pdf_writer.write_header()?;

        Ok(PdfDocument {
            writer: pdf_writer,
            info: Vec::new(),
            page_obj_ids: Vec::new(),
            current_page: None,
            next_obj_num: FIRST_FREE_OBJ_NUM,
            compress: false,
            images: Vec::new(),
        })
    }

    /// Set a document info entry (e.g. "Creator", "Title").
    pub fn set_info(&mut self, key: &str, value: &str) -> &mut Self {
        self.info.push((key.to_string(), value.to_string()));
        self
    }

    /// Flate-compress content streams and decoded image samples.
    /// Applies to everything written after the call.
    pub fn set_compression(&mut self, enabled: bool) -> &mut Self {
        self.compress = enabled;
        self
    }

    /// Number of pages finished so far.
    pub fn page_count(&self) -> usize {
        self.page_obj_ids.len()
    }

    /// Pixel dimensions of a loaded image.
    pub fn image_size(&self, image: &ImageId) -> (u32, u32) {
        let img = &self.images[image.0];
        (img.width, img.height)
    }

    fn alloc_obj(&mut self) -> ObjId {
        let id = ObjId(self.next_obj_num, 0);
        self.next_obj_num += 1;
        id
    }

    fn page(&mut self) -> &mut PageBuilder {
        self.current_page
            .as_mut()
            .expect("drawing operation called with no open page")
    }

    fn encode(&self, data: Vec<u8>) -> io::Result<(Vec<u8>, bool)> {
        if !self.compress {
            return Ok((data, false));
        }
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&data)?;
        Ok((encoder.finish()?, true))
    }

    // -------------------------------------------------------
    // Images
    // -------------------------------------------------------

    /// Decode JPEG or PNG bytes and embed them as an image XObject.
    pub fn load_image_bytes(&mut self, data: Vec<u8>) -> PdfResult<ImageId> {
        let image = images::load_image(data)?;
        self.embed_image(image)
    }

    /// Read and embed an image file.
    pub fn load_image_file<P: AsRef<Path>>(&mut self, path: P) -> PdfResult<ImageId> {
        let data = std::fs::read(path)?;
        self.load_image_bytes(data)
    }

    fn embed_image(&mut self, image: ImageData) -> PdfResult<ImageId> {
        let ImageData {
            width,
            height,
            format,
            color_space,
            bits_per_component,
            data,
            smask_data,
            inverted,
        } = image;

        let smask_id = match smask_data {
            Some(alpha) => {
                let id = self.alloc_obj();
                let (bytes, flated) = self.encode(alpha)?;
                let mut dict = vec![
                    ("Type", PdfObject::name("XObject")),
                    ("Subtype", PdfObject::name("Image")),
                    ("Width", PdfObject::Integer(width as i64)),
                    ("Height", PdfObject::Integer(height as i64)),
                    ("ColorSpace", PdfObject::name("DeviceGray")),
                    ("BitsPerComponent", PdfObject::Integer(8)),
                ];
                if flated {
                    dict.push(("Filter", PdfObject::name("FlateDecode")));
                }
                self.writer.write_object(id, &PdfObject::stream(dict, bytes))?;
                Some(id)
            }
            None => None,
        };

        let id = self.alloc_obj();
        let (bytes, filter) = match format {
            // Already DCT-compressed; never flate it a second time.
            ImageFormat::Jpeg => (data, Some("DCTDecode")),
            ImageFormat::Png => {
                let (bytes, flated) = self.encode(data)?;
                (bytes, flated.then_some("FlateDecode"))
            }
        };
        let mut dict = vec![
            ("Type", PdfObject::name("XObject")),
            ("Subtype", PdfObject::name("Image")),
            ("Width", PdfObject::Integer(width as i64)),
            ("Height", PdfObject::Integer(height as i64)),
            ("ColorSpace", PdfObject::name(color_space.pdf_name())),
            ("BitsPerComponent", PdfObject::Integer(bits_per_component as i64)),
        ];
        if let Some(filter) = filter {
            dict.push(("Filter", PdfObject::name(filter)));
        }
        if inverted {
            let decode = [1, 0, 1, 0, 1, 0, 1, 0].map(PdfObject::Integer).to_vec();
            dict.push(("Decode", PdfObject::array(decode)));
        }
        if let Some(smask) = smask_id {
            dict.push(("SMask", smask.reference()));
        }
        self.writer.write_object(id, &PdfObject::stream(dict, bytes))?;

        self.images.push(EmbeddedImage {
            obj_id: id,
            width,
            height,
        });
        Ok(ImageId(self.images.len() - 1))
    }

    /// Draw a loaded image into `rect` on the current page.
    pub fn place_image(&mut self, image: &ImageId, rect: &Rect, fit: ImageFit) -> &mut Self {
        let (w, h) = self.image_size(image);
        let placement = images::calculate_placement(w, h, rect, fit);
        let name = xobject_name(image.0);

        let page = self.page();
        page.images.insert(image.0);
        page.ops.save_state();
        if let Some(clip) = &placement.clip {
            page.ops.clip_rect(clip);
        }
        page.ops.draw_xobject(
            &name,
            placement.x,
            placement.y,
            placement.width,
            placement.height,
        );
        page.ops.restore_state();
        self
    }

    // -------------------------------------------------------
    // Paths
    // -------------------------------------------------------

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.page().ops.move_to(x, y);
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.page().ops.line_to(x, y);
        self
    }

    /// Stroke a single straight segment from `(x1, y1)` to `(x2, y2)`.
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> &mut Self {
        let ops = &mut self.page().ops;
        ops.move_to(x1, y1);
        ops.line_to(x2, y2);
        ops.stroke();
        self
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.page().ops.rect(&Rect::new(x, y, width, height));
        self
    }

    pub fn close_path(&mut self) -> &mut Self {
        self.page().ops.close_path();
        self
    }

    pub fn stroke(&mut self) -> &mut Self {
        self.page().ops.stroke();
        self
    }

    pub fn fill(&mut self) -> &mut Self {
        self.page().ops.fill();
        self
    }

    pub fn fill_stroke(&mut self) -> &mut Self {
        self.page().ops.fill_stroke();
        self
    }

    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        self.page().ops.set_line_width(width);
        self
    }

    pub fn set_stroke_color(&mut self, color: Color) -> &mut Self {
        self.page().ops.set_stroke_color(color);
        self
    }

    pub fn set_fill_color(&mut self, color: Color) -> &mut Self {
        self.page().ops.set_fill_color(color);
        self
    }

    pub fn save_state(&mut self) -> &mut Self {
        self.page().ops.save_state();
        self
    }

    pub fn restore_state(&mut self) -> &mut Self {
        self.page().ops.restore_state();
        self
    }

    // -------------------------------------------------------
    // Pages and document
    // -------------------------------------------------------

    /// Begin a new page with the given dimensions in points.
    /// A page that is still open is finished first.
    pub fn begin_page(&mut self, width: f64, height: f64) -> io::Result<&mut Self> {
        if self.current_page.is_some() {
            self.end_page()?;
        }
        self.current_page = Some(PageBuilder {
            width,
            height,
            ops: ContentOps::default(),
            images: BTreeSet::new(),
        });
        Ok(self)
    }

    /// Write the open page's content stream and page dictionary.
    pub fn end_page(&mut self) -> io::Result<()> {
        let page = self
            .current_page
            .take()
            .expect("end_page called with no open page");

        let content_id = self.alloc_obj();
        let page_id = self.alloc_obj();

        let (bytes, flated) = self.encode(page.ops.into_bytes())?;
        let stream_dict = if flated {
            vec![("Filter", PdfObject::name("FlateDecode"))]
        } else {
            vec![]
        };
        self.writer
            .write_object(content_id, &PdfObject::stream(stream_dict, bytes))?;

        let mut resources = Vec::new();
        if !page.images.is_empty() {
            let xobjects: Vec<(String, PdfObject)> = page
                .images
                .iter()
                .map(|&i| (xobject_name(i), self.images[i].obj_id.reference()))
                .collect();
            resources.push(("XObject", PdfObject::Dictionary(xobjects)));
        }

        let page_dict = PdfObject::dict(vec![
            ("Type", PdfObject::name("Page")),
            ("Parent", PAGES_OBJ.reference()),
            (
                "MediaBox",
                PdfObject::rectangle(0.0, 0.0, page.width, page.height),
            ),
            ("Contents", content_id.reference()),
            ("Resources", PdfObject::dict(resources)),
        ]);
        self.writer.write_object(page_id, &page_dict)?;

        self.page_obj_ids.push(page_id);
        Ok(())
    }

    /// Finish the document: info dictionary, page tree, catalog, xref
    /// and trailer. Returns the underlying writer.
    pub fn end_document(mut self) -> io::Result<W> {
        if self.current_page.is_some() {
            self.end_page()?;
        }

        let info_id = if self.info.is_empty() {
            None
        } else {
            let id = self.alloc_obj();
            let entries = self
                .info
                .iter()
                .map(|(k, v)| (k.as_str(), PdfObject::literal_string(v)))
                .collect();
            self.writer.write_object(id, &PdfObject::dict(entries))?;
            Some(id)
        };

        let kids = self.page_obj_ids.iter().map(|id| id.reference()).collect();
        let pages = PdfObject::dict(vec![
            ("Type", PdfObject::name("Pages")),
            ("Kids", PdfObject::array(kids)),
            ("Count", PdfObject::Integer(self.page_obj_ids.len() as i64)),
        ]);
        self.writer.write_object(PAGES_OBJ, &pages)?;

        let catalog = PdfObject::dict(vec![
            ("Type", PdfObject::name("Catalog")),
            ("Pages", PAGES_OBJ.reference()),
        ]);
        self.writer.write_object(CATALOG_OBJ, &catalog)?;

        self.writer.write_xref_and_trailer(CATALOG_OBJ, info_id)?;
        Ok(self.writer.into_inner())
    }
}
