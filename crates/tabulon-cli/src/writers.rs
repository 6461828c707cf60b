//! Output formatters: CSV, TSV, JSON, and Markdown.
//!
//! All four consume the same shape — the table's dense 2-D cell-text grid
//! plus its metadata — and render to a string for stdout.

use tabulon::Table;

use crate::shared::csv_escape;

/// Tables as CSV, blank-line separated.
pub fn write_csv(tables: &[Table]) -> String {
    let mut out = String::new();
    for (i, table) in tables.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for row in table.text_grid() {
            let cells: Vec<String> = row.iter().map(|c| csv_escape(c)).collect();
            out.push_str(&cells.join(","));
            out.push('\n');
        }
    }
    out
}

/// Tables as TSV; tabs and newlines inside cells collapse to spaces.
pub fn write_tsv(tables: &[Table]) -> String {
    let mut out = String::new();
    for (i, table) in tables.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for row in table.text_grid() {
            let cells: Vec<String> = row
                .iter()
                .map(|c| c.replace(['\t', '\n'], " "))
                .collect();
            out.push_str(&cells.join("\t"));
            out.push('\n');
        }
    }
    out
}

/// Tables as a JSON array with page, method, bounds, and rows.
pub fn write_json(tables: &[Table]) -> String {
    let entries: Vec<serde_json::Value> = tables
        .iter()
        .map(|table| {
            let bounds = table.bounds();
            serde_json::json!({
                "page": table.page_number(),
                "method": table.method().as_str(),
                "bounds": {
                    "top": bounds.top,
                    "left": bounds.left,
                    "bottom": bounds.bottom(),
                    "right": bounds.right(),
                },
                "rows": table.text_grid(),
            })
        })
        .collect();
    serde_json::to_string(&entries).expect("table grids are valid JSON")
}

/// Tables as GitHub-flavored Markdown pipe tables, first row as header.
pub fn write_markdown(tables: &[Table]) -> String {
    let mut out = String::new();
    for (i, table) in tables.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let grid = table.text_grid();
        let Some(header) = grid.first() else {
            continue;
        };
        out.push_str(&markdown_row(header));
        out.push_str(&format!(
            "|{}\n",
            " --- |".repeat(table.col_count().max(1))
        ));
        for row in &grid[1..] {
            out.push_str(&markdown_row(row));
        }
    }
    out
}

fn markdown_row(cells: &[String]) -> String {
    let escaped: Vec<String> = cells
        .iter()
        .map(|c| c.replace('|', "\\|").replace('\n', " "))
        .collect();
    format!("| {} |\n", escaped.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabulon::{Cell, ExtractionMethod, Rect, TextChunk, TextElement};

    fn chunk(text: &str, top: f64, left: f64) -> TextChunk {
        TextChunk::new(TextElement::new(
            Rect::new(top, left, 5.0, 8.0),
            text,
            "Helvetica",
            8.0,
            2.0,
        ))
    }

    fn table(rows: &[&[&str]]) -> Table {
        let mut table = Table::new(1, ExtractionMethod::Lattice);
        for (r, row) in rows.iter().enumerate() {
            for (c, text) in row.iter().enumerate() {
                let rect = Rect::new(r as f64 * 10.0, c as f64 * 50.0, 50.0, 10.0);
                let mut cell = Cell::new(rect);
                if !text.is_empty() {
                    cell.push_chunk(chunk(text, rect.top + 1.0, rect.left + 1.0));
                }
                table.insert(r, c, cell);
            }
        }
        table
    }

    #[test]
    fn test_csv_simple() {
        let t = table(&[&["a", "b"], &["c", "d"]]);
        assert_eq!(write_csv(&[t]), "a,b\nc,d\n");
    }

    #[test]
    fn test_csv_quoting() {
        let t = table(&[&["a,b", "say \"hi\""]]);
        assert_eq!(write_csv(&[t]), "\"a,b\",\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn test_csv_multiple_tables_blank_line_separated() {
        let a = table(&[&["a"]]);
        let b = table(&[&["b"]]);
        assert_eq!(write_csv(&[a, b]), "a\n\nb\n");
    }

    #[test]
    fn test_tsv() {
        let t = table(&[&["a", "b"], &["c", "d"]]);
        assert_eq!(write_tsv(&[t]), "a\tb\nc\td\n");
    }

    #[test]
    fn test_json_shape() {
        let t = table(&[&["a", "b"]]);
        let json = write_json(&[t]);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["page"], 1);
        assert_eq!(parsed[0]["method"], "lattice");
        assert_eq!(parsed[0]["rows"][0][0], "a");
        assert_eq!(parsed[0]["rows"][0][1], "b");
    }

    #[test]
    fn test_markdown() {
        let t = table(&[&["h1", "h2"], &["a", "b"]]);
        let md = write_markdown(&[t]);
        assert_eq!(md, "| h1 | h2 |\n| --- | --- |\n| a | b |\n");
    }

    #[test]
    fn test_markdown_escapes_pipes() {
        let t = table(&[&["a|b"]]);
        assert!(write_markdown(&[t]).contains("a\\|b"));
    }

    #[test]
    fn test_empty_tables() {
        assert_eq!(write_csv(&[]), "");
        assert_eq!(write_json(&[]), "[]");
        assert_eq!(write_markdown(&[]), "");
    }

    // --- CSV round trip ---

    /// Minimal CSV parser for the round-trip check.
    fn parse_csv(input: &str) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        let mut row = Vec::new();
        let mut field = String::new();
        let mut quoted = false;
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            if quoted {
                match c {
                    '"' if chars.peek() == Some(&'"') => {
                        chars.next();
                        field.push('"');
                    }
                    '"' => quoted = false,
                    other => field.push(other),
                }
            } else {
                match c {
                    '"' => quoted = true,
                    ',' => row.push(std::mem::take(&mut field)),
                    '\n' => {
                        row.push(std::mem::take(&mut field));
                        rows.push(std::mem::take(&mut row));
                    }
                    other => field.push(other),
                }
            }
        }
        if !field.is_empty() || !row.is_empty() {
            row.push(field);
            rows.push(row);
        }
        rows
    }

    #[test]
    fn test_csv_round_trip_is_structurally_identical() {
        let source = vec![
            vec!["plain".to_string(), "with,comma".to_string()],
            vec!["say \"hi\"".to_string(), "multi\nline".to_string()],
        ];
        let t = table(&[
            &["plain", "with,comma"],
            &["say \"hi\"", "multi\nline"],
        ]);
        let csv = write_csv(&[t]);
        let parsed = parse_csv(&csv);
        assert_eq!(parsed, source);
    }
}
