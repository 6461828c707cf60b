//! Fixture helpers for CLI integration tests.

use std::path::PathBuf;

use lopdf::{dictionary, Document, Object, ObjectId, Stream};

/// Build a single-page PDF with the given content stream and a Helvetica
/// font registered under `/F1`.
pub fn build_pdf(content: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.as_bytes().to_vec(),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Contents" => content_id,
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        },
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::from(page_id)],
            "Count" => 1i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save fixture PDF");
    buf
}

/// Write fixture bytes to a uniquely named file in the temp directory.
pub fn write_temp_pdf(bytes: &[u8], tag: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("tabulon-cli-{}-{tag}.pdf", std::process::id()));
    std::fs::write(&path, bytes).expect("failed to write fixture PDF");
    path
}

/// A 2×2 ruled grid of thin filled bars with one glyph per cell.
pub fn ruled_grid_content() -> &'static str {
    "50 699.5 200 1 re f\n\
     50 679.5 200 1 re f\n\
     50 659.5 200 1 re f\n\
     49.5 660 1 40 re f\n\
     149.5 660 1 40 re f\n\
     249.5 660 1 40 re f\n\
     BT /F1 12 Tf 60 690 Td (A) Tj ET\n\
     BT /F1 12 Tf 160 690 Td (B) Tj ET\n\
     BT /F1 12 Tf 60 670 Td (C) Tj ET\n\
     BT /F1 12 Tf 160 670 Td (D) Tj ET"
}
