use sheet_pdf::{Color, PdfDocument};

/// One card outline centered on a letter page with corner trim marks.
fn main() {
    let path = "trim_marks.pdf";
    let mut doc = PdfDocument::create(path).unwrap();
    doc.set_info("Creator", "sheet-pdf");
    doc.set_info("Title", "Trim Marks Demo");
    doc.set_compression(true);
    doc.begin_page(612.0, 792.0).unwrap();

    let (x, y, w, h) = (180.0, 324.0, 252.0, 144.0);

    // Card face
    doc.save_state();
    doc.set_fill_color(Color::gray(0.92));
    doc.set_stroke_color(Color::gray(0.6));
    doc.set_line_width(0.5);
    doc.rect(x, y, w, h).fill_stroke();
    doc.restore_state();

    // Corner marks, offset 6pt from the trim edge, 18pt long
    let gap = 6.0;
    let len = 18.0;
    doc.set_stroke_color(Color::BLACK);
    doc.set_line_width(0.25);
    for (cx, cy, dx, dy) in [
        (x, y, -1.0, -1.0),
        (x + w, y, 1.0, -1.0),
        (x, y + h, -1.0, 1.0),
        (x + w, y + h, 1.0, 1.0),
    ] {
        doc.line(cx + dx * gap, cy, cx + dx * (gap + len), cy);
        doc.line(cx, cy + dy * gap, cx, cy + dy * (gap + len));
    }

    // Orientation marker below the card
    doc.set_fill_color(Color::rgb(0.8, 0.1, 0.1));
    doc.move_to(306.0, 300.0)
        .line_to(296.0, 285.0)
        .line_to(316.0, 285.0)
        .close_path()
        .fill();

    doc.end_page().unwrap();
    doc.end_document().unwrap();
    println!("Generated: {}", path);
}
