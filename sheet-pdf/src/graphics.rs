use crate::writer::format_number;

/// RGB color for stroke and fill operations.
///
/// Each component is in the range 0.0 (none) to 1.0 (full intensity).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };

    /// Create a color from RGB components (each 0.0–1.0).
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color { r, g, b }
    }

    /// Create a grayscale color (r = g = b = level).
    pub fn gray(level: f64) -> Self {
        Color::rgb(level, level, level)
    }
}

/// A rectangle in PDF user space: `(x, y)` is the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }
}

/// Accumulates content-stream operators for one page.
#[derive(Debug, Default)]
pub(crate) struct ContentOps {
    buf: Vec<u8>,
}

impl ContentOps {
    fn op(&mut self, operands: &[f64], operator: &str) {
        for v in operands {
            self.buf.extend_from_slice(format_number(*v).as_bytes());
            self.buf.push(b' ');
        }
        self.buf.extend_from_slice(operator.as_bytes());
        self.buf.push(b'\n');
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.op(&[x, y], "m");
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.op(&[x, y], "l");
    }

    pub fn rect(&mut self, rect: &Rect) {
        self.op(&[rect.x, rect.y, rect.width, rect.height], "re");
    }

    pub fn close_path(&mut self) {
        self.op(&[], "h");
    }

    pub fn stroke(&mut self) {
        self.op(&[], "S");
    }

    pub fn fill(&mut self) {
        self.op(&[], "f");
    }

    pub fn fill_stroke(&mut self) {
        self.op(&[], "B");
    }

    /// Intersect the clip path with `rect` and discard the path.
    pub fn clip_rect(&mut self, rect: &Rect) {
        self.op(&[rect.x, rect.y, rect.width, rect.height], "re W n");
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.op(&[width], "w");
    }

    pub fn set_stroke_color(&mut self, c: Color) {
        self.op(&[c.r, c.g, c.b], "RG");
    }

    pub fn set_fill_color(&mut self, c: Color) {
        self.op(&[c.r, c.g, c.b], "rg");
    }

    pub fn save_state(&mut self) {
        self.op(&[], "q");
    }

    pub fn restore_state(&mut self) {
        self.op(&[], "Q");
    }

    /// Paint an XObject scaled to `width × height` at `(x, y)`.
    pub fn draw_xobject(&mut self, name: &str, x: f64, y: f64, width: f64, height: f64) {
        self.op(&[width, 0.0, 0.0, height, x, y], "cm");
        self.buf.extend_from_slice(format!("/{} Do\n", name).as_bytes());
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
