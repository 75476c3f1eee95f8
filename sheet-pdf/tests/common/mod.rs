#![allow(dead_code)]

/// Encode a solid-color 8-bit PNG of the given size.
pub fn png_bytes(width: u32, height: u32, color: png::ColorType) -> Vec<u8> {
    let channels = match color {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        other => panic!("fixture does not support {:?}", other),
    };
    let pixels = vec![0x80u8; (width * height) as usize * channels];
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&pixels).unwrap();
    }
    out
}

/// 100x80 RGB PNG.
pub fn test_png() -> Vec<u8> {
    png_bytes(100, 80, png::ColorType::Rgb)
}

/// 100x80 RGBA PNG.
pub fn test_png_alpha() -> Vec<u8> {
    png_bytes(100, 80, png::ColorType::Rgba)
}

/// Header-only baseline JPEG: SOI, SOF0 (300x200, 3 components), EOI.
/// Enough for embedding since JPEG data is passed through untouched.
pub fn test_jpeg() -> Vec<u8> {
    vec![
        0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0xC8, 0x01, 0x2C, 0x03, 0x01, 0x22,
        0x00, 0x02, 0x11, 0x01, 0x03, 0x11, 0x01, 0xFF, 0xD9,
    ]
}

/// Header-only CMYK JPEG (300x200, 4 components), optionally with the
/// APP14 "Adobe" segment Photoshop writes.
pub fn test_jpeg_cmyk(adobe: bool) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8];
    if adobe {
        data.extend_from_slice(&[0xFF, 0xEE, 0x00, 0x0E]);
        data.extend_from_slice(b"Adobe");
        data.extend_from_slice(&[0x00, 0x64, 0x00, 0x00, 0x00, 0x00, 0x00]);
    }
    data.extend_from_slice(&[
        0xFF, 0xC0, 0x00, 0x14, 0x08, 0x00, 0xC8, 0x01, 0x2C, 0x04, 0x01, 0x11, 0x00, 0x02,
        0x11, 0x00, 0x03, 0x11, 0x00, 0x04, 0x11, 0x00, 0xFF, 0xD9,
    ]);
    data
}

pub fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

pub fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    find_bytes(haystack, needle).is_some()
}
