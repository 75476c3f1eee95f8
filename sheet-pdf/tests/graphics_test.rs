use sheet_pdf::{Color, PdfDocument};

fn render(draw: impl FnOnce(&mut PdfDocument<Vec<u8>>)) -> String {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.begin_page(612.0, 792.0).unwrap();
    draw(&mut doc);
    let bytes = doc.end_document().unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[test]
fn stroke_line_produces_operators() {
    let output = render(|doc| {
        doc.move_to(100.0, 200.0);
        doc.line_to(300.0, 400.0);
        doc.stroke();
    });
    assert!(output.contains("100 200 m\n300 400 l\nS\n"));
}

#[test]
fn line_is_move_line_stroke() {
    let output = render(|doc| {
        doc.line(0.0, 36.0, 27.0, 36.0);
    });
    assert!(output.contains("0 36 m\n27 36 l\nS\n"));
}

#[test]
fn color_and_width_operators() {
    let output = render(|doc| {
        doc.set_stroke_color(Color::rgb(1.0, 0.0, 0.0))
            .set_fill_color(Color::rgb(0.0, 0.5, 1.0))
            .set_line_width(0.72);
    });
    assert!(output.contains("1 0 0 RG\n"));
    assert!(output.contains("0 0.5 1 rg\n"));
    assert!(output.contains("0.72 w\n"));
}

#[test]
fn rect_fill_and_close() {
    let output = render(|doc| {
        doc.rect(50.0, 50.0, 200.0, 100.0).fill();
        doc.move_to(0.0, 0.0)
            .line_to(100.0, 0.0)
            .line_to(50.0, 100.0)
            .close_path()
            .fill_stroke();
    });
    assert!(output.contains("50 50 200 100 re\nf\n"));
    assert!(output.contains("h\nB\n"));
}

#[test]
fn save_restore_state() {
    let output = render(|doc| {
        doc.save_state().set_line_width(5.0).restore_state();
    });
    assert!(output.contains("q\n5 w\nQ\n"));
}

#[test]
fn black_constant_and_gray() {
    assert_eq!(Color::BLACK, Color::rgb(0.0, 0.0, 0.0));
    let c = Color::gray(0.5);
    assert_eq!((c.r, c.g, c.b), (0.5, 0.5, 0.5));
}

#[test]
fn page_without_images_has_empty_resources() {
    let output = render(|doc| {
        doc.line(0.0, 0.0, 10.0, 10.0);
    });
    assert!(output.contains("/Resources << >>"));
    assert!(!output.contains("/XObject"));
}
