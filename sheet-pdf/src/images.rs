use crate::graphics::Rect;

/// Opaque handle to an image embedded in a `PdfDocument`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub usize);

/// Errors produced while decoding image data.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("image data too short to detect format ({0} bytes)")]
    TooShort(usize),

    #[error("unsupported image format (expected JPEG or PNG)")]
    UnsupportedFormat,

    #[error("JPEG error: {0}")]
    Jpeg(String),

    #[error("PNG decode error: {0}")]
    Png(#[from] png::DecodingError),

    #[error("unsupported color layout: {0}")]
    UnsupportedColor(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

/// How an image is scaled into its bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFit {
    /// Scale to fit within the rect, preserving aspect ratio, centered.
    Fit,
    /// Scale to cover the rect, clipping overflow.
    Fill,
    /// Stretch to fill the rect exactly (may distort).
    Stretch,
    /// Natural size: 1 pixel = 1 point, anchored at the rect's top-left.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    DeviceRGB,
    DeviceGray,
    DeviceCMYK,
}

impl ColorSpace {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceRGB => "DeviceRGB",
            ColorSpace::DeviceGray => "DeviceGray",
            ColorSpace::DeviceCMYK => "DeviceCMYK",
        }
    }
}

/// Decoded image ready for embedding.
#[derive(Debug)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    pub color_space: ColorSpace,
    pub bits_per_component: u8,
    /// Raw 8-bit samples for PNG, the untouched file for JPEG.
    pub data: Vec<u8>,
    /// Separate alpha channel, if the source had one.
    pub smask_data: Option<Vec<u8>>,
    /// Samples are stored inverted (Adobe CMYK JPEG) and need a
    /// reversed `/Decode` array.
    pub inverted: bool,
}

/// Where an image lands on the page, in PDF coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePlacement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Clip applied before drawing (Fill mode only).
    pub clip: Option<Rect>,
}

/// Detect image format from magic bytes.
pub fn detect_format(data: &[u8]) -> Result<ImageFormat, ImageError> {
    if data.len() < 4 {
        return Err(ImageError::TooShort(data.len()));
    }
    if data[0] == 0xFF && data[1] == 0xD8 {
        Ok(ImageFormat::Jpeg)
    } else if data[..4] == [0x89, b'P', b'N', b'G'] {
        Ok(ImageFormat::Png)
    } else {
        Err(ImageError::UnsupportedFormat)
    }
}

/// Parse raw JPEG or PNG bytes.
pub fn load_image(data: Vec<u8>) -> Result<ImageData, ImageError> {
    match detect_format(&data)? {
        ImageFormat::Jpeg => parse_jpeg(data),
        ImageFormat::Png => parse_png(data),
    }
}

/// JPEG is embedded as-is (DCTDecode); only the frame header is read.
fn parse_jpeg(data: Vec<u8>) -> Result<ImageData, ImageError> {
    let (width, height, components) = jpeg_dimensions(&data)?;
    let color_space = match components {
        1 => ColorSpace::DeviceGray,
        3 => ColorSpace::DeviceRGB,
        4 => ColorSpace::DeviceCMYK,
        n => {
            return Err(ImageError::UnsupportedColor(format!(
                "JPEG with {} components",
                n
            )))
        }
    };
    let inverted = color_space == ColorSpace::DeviceCMYK && has_adobe_marker(&data);

    Ok(ImageData {
        width,
        height,
        format: ImageFormat::Jpeg,
        color_space,
        bits_per_component: 8,
        data,
        smask_data: None,
        inverted,
    })
}

/// True if an APP14 "Adobe" segment precedes the scan data.
fn has_adobe_marker(data: &[u8]) -> bool {
    let mut i = 2;
    while i + 4 <= data.len() && data[i] == 0xFF {
        let marker = data[i + 1];
        if marker == 0xDA || marker == 0xD9 {
            break;
        }
        let seg_len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        if marker == 0xEE && data[i + 4..].starts_with(b"Adobe") {
            return true;
        }
        i += 2 + seg_len;
    }
    false
}

/// Walk JPEG segments until a SOF0-SOF3 marker and read its frame header.
fn jpeg_dimensions(data: &[u8]) -> Result<(u32, u32, u8), ImageError> {
    let len = data.len();
    let mut i = 0;
    while i + 1 < len {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }
        let marker = data[i + 1];
        if (0xC0..=0xC3).contains(&marker) {
            if i + 9 >= len {
                return Err(ImageError::Jpeg("SOF marker truncated".to_string()));
            }
            let height = u16::from_be_bytes([data[i + 5], data[i + 6]]) as u32;
            let width = u16::from_be_bytes([data[i + 7], data[i + 8]]) as u32;
            if width == 0 || height == 0 {
                return Err(ImageError::Jpeg(format!("zero-sized frame {}x{}", width, height)));
            }
            return Ok((width, height, data[i + 9]));
        }
        // Fill bytes and stuffed zeros.
        if marker == 0xFF || marker == 0x00 {
            i += 1;
            continue;
        }
        // SOI, EOI and RSTn carry no length.
        if marker == 0xD8 || marker == 0xD9 || (0xD0..=0xD7).contains(&marker) {
            i += 2;
            continue;
        }
        if i + 3 >= len {
            break;
        }
        let seg_len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        i += 2 + seg_len;
    }
    Err(ImageError::Jpeg("no SOF marker found".to_string()))
}

fn parse_png(data: Vec<u8>) -> Result<ImageData, ImageError> {
    let mut decoder = png::Decoder::new(data.as_slice());
    // Expand palettes and low bit depths, strip 16-bit to 8-bit.
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    let (width, height) = (info.width, info.height);
    let (color_space, channels, has_alpha) = match info.color_type {
        png::ColorType::Rgb => (ColorSpace::DeviceRGB, 3, false),
        png::ColorType::Rgba => (ColorSpace::DeviceRGB, 4, true),
        png::ColorType::Grayscale => (ColorSpace::DeviceGray, 1, false),
        png::ColorType::GrayscaleAlpha => (ColorSpace::DeviceGray, 2, true),
        other => return Err(ImageError::UnsupportedColor(format!("PNG {:?}", other))),
    };

    let (data, smask_data) = if has_alpha {
        split_alpha(&buf, channels)
    } else {
        (buf, None)
    };

    Ok(ImageData {
        width,
        height,
        format: ImageFormat::Png,
        color_space,
        bits_per_component: 8,
        data,
        smask_data,
        inverted: false,
    })
}

/// Separate the trailing alpha sample of each pixel into its own plane.
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

/// Compute where an `img_w × img_h` pixel image lands inside `rect`.
pub fn calculate_placement(img_w: u32, img_h: u32, rect: &Rect, fit: ImageFit) -> ImagePlacement {
    let iw = img_w as f64;
    let ih = img_h as f64;

    match fit {
        ImageFit::Fit | ImageFit::Fill => {
            let scale_x = rect.width / iw;
            let scale_y = rect.height / ih;
            let scale = if fit == ImageFit::Fit {
                scale_x.min(scale_y)
            } else {
                scale_x.max(scale_y)
            };
            let w = iw * scale;
            let h = ih * scale;
            ImagePlacement {
                x: rect.x + (rect.width - w) / 2.0,
                y: rect.y + (rect.height - h) / 2.0,
                width: w,
                height: h,
                clip: (fit == ImageFit::Fill).then_some(*rect),
            }
        }
        ImageFit::Stretch => ImagePlacement {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            clip: None,
        },
        ImageFit::None => ImagePlacement {
            x: rect.x,
            y: rect.top() - ih,
            width: iw,
            height: ih,
            clip: None,
        },
    }
}
