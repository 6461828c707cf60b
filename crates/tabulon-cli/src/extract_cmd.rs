use std::path::Path;

use tabulon::{extract, ExtractOptions, Method};

use crate::cli::{MethodArg, OutputFormat};
use crate::shared::{parse_area, parse_columns, resolve_pages};
use crate::writers;

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: &Path,
    pages: Option<&str>,
    format: &OutputFormat,
    method: &MethodArg,
    area: Option<&str>,
    columns: Option<&str>,
    guess: bool,
    password: Option<&str>,
) -> Result<(), i32> {
    let area = area
        .map(parse_area)
        .transpose()
        .map_err(|e| {
            eprintln!("Error: {e}");
            1
        })?;
    let columns = columns
        .map(parse_columns)
        .transpose()
        .map_err(|e| {
            eprintln!("Error: {e}");
            1
        })?;

    let options = ExtractOptions {
        pages: resolve_pages(pages)?,
        method: match method {
            MethodArg::Lattice => Method::Lattice,
            MethodArg::Stream => Method::Stream,
            MethodArg::Auto => Method::Auto,
        },
        area,
        columns,
        guess,
        password: password.map(str::to_string),
    };

    let tables = extract(file, &options).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    let rendered = match format {
        OutputFormat::Csv => writers::write_csv(&tables),
        OutputFormat::Tsv => writers::write_tsv(&tables),
        OutputFormat::Json => writers::write_json(&tables),
        OutputFormat::Markdown => writers::write_markdown(&tables),
    };
    print!("{rendered}");
    if matches!(format, OutputFormat::Json) {
        println!();
    }
    Ok(())
}
