mod common;

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use common::contains_bytes;
use sheet_pdf::PdfDocument;

#[test]
fn full_workflow_produces_valid_pdf() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.set_info("Creator", "cardsheet");
    doc.set_info("Title", "Business cards");
    doc.begin_page(612.0, 792.0).unwrap();
    doc.line(0.0, 36.0, 27.0, 36.0);
    doc.end_page().unwrap();
    let bytes = doc.end_document().unwrap();

    assert!(bytes.starts_with(b"%PDF-1.7\n"));
    assert!(bytes.ends_with(b"%%EOF\n"));
    assert!(contains_bytes(&bytes, b"/Type /Catalog"));
    assert!(contains_bytes(&bytes, b"/Type /Pages"));
    assert!(contains_bytes(&bytes, b"/Type /Page "));
    assert!(contains_bytes(&bytes, b"/MediaBox [0 0 612 792]"));
    assert!(contains_bytes(&bytes, b"(cardsheet)"));
    assert!(contains_bytes(&bytes, b"(Business cards)"));
    assert!(contains_bytes(&bytes, b"xref\n"));
    assert!(contains_bytes(&bytes, b"trailer\n"));
    assert!(contains_bytes(&bytes, b"startxref\n"));
    assert!(contains_bytes(&bytes, b"/Root 1 0 R"));
    assert!(contains_bytes(&bytes, b"/Info"));
}

#[test]
fn empty_page_has_zero_length_content() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.begin_page(612.0, 792.0).unwrap();
    doc.end_page().unwrap();
    let bytes = doc.end_document().unwrap();
    assert!(contains_bytes(&bytes, b"/Count 1"));
    assert!(contains_bytes(&bytes, b"/Length 0"));
}

#[test]
fn xref_size_matches_object_count() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.set_info("Creator", "test");
    doc.begin_page(612.0, 792.0).unwrap();
    doc.end_page().unwrap();
    let bytes = doc.end_document().unwrap();

    // 1=Catalog, 2=Pages, 3=Content, 4=Page, 5=Info
    assert!(contains_bytes(&bytes, b"/Size 6"));
    assert!(contains_bytes(&bytes, b"xref\n0 6\n"));
}

#[test]
fn page_dimensions_are_kept_per_page() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.begin_page(612.0, 792.0).unwrap();
    doc.begin_page(595.44, 841.68).unwrap();
    let bytes = doc.end_document().unwrap();
    assert!(contains_bytes(&bytes, b"/Count 2"));
    assert!(contains_bytes(&bytes, b"/MediaBox [0 0 612 792]"));
    assert!(contains_bytes(&bytes, b"/MediaBox [0 0 595.44 841.68]"));
}

/// end_page writes page data out immediately instead of buffering it
/// until end_document.
#[test]
fn end_page_flushes_to_writer() {
    struct TrackingWriter {
        byte_count: Rc<RefCell<usize>>,
        inner: Vec<u8>,
    }

    impl Write for TrackingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let n = self.inner.write(buf)?;
            *self.byte_count.borrow_mut() += n;
            Ok(n)
        }
        fn flush(&mut self) -> io::Result<()> {
            self.inner.flush()
        }
    }

    let counter = Rc::new(RefCell::new(0usize));
    let writer = TrackingWriter {
        byte_count: counter.clone(),
        inner: Vec::new(),
    };

    let mut doc = PdfDocument::new(writer).unwrap();
    let after_init = *counter.borrow();

    doc.begin_page(612.0, 792.0).unwrap();
    doc.line(0.0, 0.0, 100.0, 100.0);
    assert_eq!(*counter.borrow(), after_init);

    doc.end_page().unwrap();
    assert!(*counter.borrow() > after_init);
    assert_eq!(doc.page_count(), 1);
}

#[test]
fn end_document_closes_open_page() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.begin_page(612.0, 792.0).unwrap();
    doc.line(1.0, 2.0, 3.0, 4.0);
    let bytes = doc.end_document().unwrap();
    assert!(contains_bytes(&bytes, b"/Count 1"));
    assert!(contains_bytes(&bytes, b"1 2 m\n3 4 l\nS\n"));
}

#[test]
fn compressed_content_is_smaller_and_flagged() {
    let make_pdf = |compress: bool| -> Vec<u8> {
        let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
        doc.set_compression(compress);
        doc.begin_page(612.0, 792.0).unwrap();
        for i in 0..200 {
            doc.line(0.0, i as f64, 27.0, i as f64);
        }
        doc.end_document().unwrap()
    };

    let plain = make_pdf(false);
    let compressed = make_pdf(true);
    assert!(compressed.len() < plain.len());
    assert!(contains_bytes(&compressed, b"/Filter /FlateDecode"));
    assert!(!contains_bytes(&plain, b"FlateDecode"));
}

#[test]
fn identical_input_gives_identical_bytes() {
    let make_pdf = || -> Vec<u8> {
        let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
        doc.set_compression(true);
        doc.set_info("Creator", "cardsheet");
        doc.begin_page(612.0, 792.0).unwrap();
        doc.rect(54.0, 36.0, 252.0, 144.0).stroke();
        doc.end_document().unwrap()
    };
    assert_eq!(make_pdf(), make_pdf());
}

#[test]
fn create_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdf");

    let mut doc = PdfDocument::create(&path).unwrap();
    doc.begin_page(612.0, 792.0).unwrap();
    doc.line(0.0, 0.0, 612.0, 792.0);
    doc.end_document().unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.7\n"));
    assert!(bytes.ends_with(b"%%EOF\n"));
}
