//! Extraction orchestration: pages → method dispatch → tables.

use std::path::Path;

use tabulon_core::{cmp_reading_order, detector, lattice, stream, Page, Settings, Table};

use crate::document::Document;
use crate::error::Error;
use crate::options::{ExtractOptions, Method};

/// Extract tables from a PDF with default settings.
pub fn extract(path: impl AsRef<Path>, options: &ExtractOptions) -> Result<Vec<Table>, Error> {
    extract_with_settings(path, options, &Settings::default())
}

/// Extract tables from a PDF.
///
/// Pages are processed in the requested order. With `guess` set, table
/// regions are detected first and each region is extracted on its own;
/// otherwise the whole page (or the configured area) goes through the
/// selected method. Tables come back in reading order within each page.
pub fn extract_with_settings(
    path: impl AsRef<Path>,
    options: &ExtractOptions,
    settings: &Settings,
) -> Result<Vec<Table>, Error> {
    options.validate()?;
    let document = Document::open(path, options.password.as_deref())?;

    let numbers: Vec<usize> = match &options.pages {
        Some(pages) => pages.clone(),
        None => (1..=document.page_count()).collect(),
    };

    let mut tables = Vec::new();
    for number in numbers {
        let mut page = document.page_with_settings(number, settings)?;
        if let Some(area) = &options.area {
            page = page.get_area(area.top, area.left, area.bottom, area.right);
        }

        let mut page_tables = if options.guess {
            let mut found = Vec::new();
            for region in detector::detect_with_text_edges(&page, settings) {
                let sub = page.get_area(region.top, region.left, region.bottom(), region.right());
                found.extend(run_method(&sub, options, settings));
            }
            found
        } else {
            run_method(&page, options, settings)
        };

        page_tables.sort_by(|a, b| cmp_reading_order(&a.bounds(), &b.bounds()));
        tables.extend(page_tables);
    }
    Ok(tables)
}

fn run_method(page: &Page, options: &ExtractOptions, settings: &Settings) -> Vec<Table> {
    match options.method {
        Method::Lattice => lattice::extract_tables(page, settings),
        Method::Stream => stream::extract_tables(page, options.columns.as_deref(), settings),
        Method::Auto => {
            let ruled = lattice::extract_tables(page, settings);
            if ruled.is_empty() {
                stream::extract_tables(page, options.columns.as_deref(), settings)
            } else {
                ruled
            }
        }
    }
}
