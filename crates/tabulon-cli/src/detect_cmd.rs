use std::path::Path;

use tabulon::{detector, Document, Settings};

use crate::shared::resolve_pages;

pub fn run(file: &Path, pages: Option<&str>, password: Option<&str>) -> Result<(), i32> {
    let doc = Document::open(file, password).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    let numbers = match resolve_pages(pages)? {
        Some(list) => list,
        None => (1..=doc.page_count()).collect(),
    };

    let settings = Settings::default();
    let mut found = 0usize;
    for number in numbers {
        let page = doc.page(number).map_err(|e| {
            eprintln!("Error: {e}");
            1
        })?;
        for region in detector::detect_with_text_edges(&page, &settings) {
            found += 1;
            println!(
                "page {number}: top={:.1} left={:.1} bottom={:.1} right={:.1}",
                region.top,
                region.left,
                region.bottom(),
                region.right(),
            );
        }
    }
    if found == 0 {
        println!("No table regions found.");
    }
    Ok(())
}
