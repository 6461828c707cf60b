use std::path::Path;

use tabulon::{detector, Document, Settings};

pub fn run(file: &Path, password: Option<&str>) -> Result<(), i32> {
    let doc = Document::open(file, password).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    println!("Pages: {}", doc.page_count());
    let settings = Settings::default();
    for number in 1..=doc.page_count() {
        let page = doc.page(number).map_err(|e| {
            eprintln!("Error: {e}");
            1
        })?;
        let bounds = page.bounds();
        println!(
            "page {number}: {:.1} x {:.1} pt, rotation {}, {} glyphs, {} rulings{}",
            bounds.width,
            bounds.height,
            page.rotation(),
            page.glyphs().len(),
            page.processed_rulings().len(),
            if detector::is_tabular(&page, &settings) {
                ", ruled table structure"
            } else {
                ""
            },
        );
    }
    Ok(())
}
