use tabulon::Area;

use crate::page_range::parse_page_range;

/// Parse a "top,left,bottom,right" area argument.
pub fn parse_area(input: &str) -> Result<Area, String> {
    let parts: Vec<f64> = input
        .split(',')
        .map(|p| {
            p.trim()
                .parse::<f64>()
                .map_err(|_| format!("invalid area coordinate: '{}'", p.trim()))
        })
        .collect::<Result<_, _>>()?;
    match parts[..] {
        [top, left, bottom, right] => Ok(Area::new(top, left, bottom, right)),
        _ => Err(format!(
            "area takes four coordinates (top,left,bottom,right), got {}",
            parts.len()
        )),
    }
}

/// Parse a comma-separated list of column x-positions.
pub fn parse_columns(input: &str) -> Result<Vec<f64>, String> {
    input
        .split(',')
        .map(|p| {
            p.trim()
                .parse::<f64>()
                .map_err(|_| format!("invalid column position: '{}'", p.trim()))
        })
        .collect()
}

/// Resolve an optional page range string into 1-based page numbers.
pub fn resolve_pages(pages: Option<&str>) -> Result<Option<Vec<usize>>, i32> {
    match pages {
        Some(range) => {
            let parsed = parse_page_range(range).map_err(|e| {
                eprintln!("Error: {e}");
                1
            })?;
            if parsed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(parsed))
            }
        }
        None => Ok(None),
    }
}

/// Escape a string for CSV output.
///
/// If the text contains commas, double quotes, or newlines, wraps it in
/// double quotes and escapes any internal double quotes by doubling them.
pub fn csv_escape(text: &str) -> String {
    if text.contains(',') || text.contains('"') || text.contains('\n') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}
