//! Extract tables from PDF documents.
//!
//! Two reconstruction algorithms share a pipeline: **lattice** rebuilds a
//! table from its ruled cell borders, **stream** infers columns from the
//! whitespace structure of the text. `Auto` tries lattice first and falls
//! back to stream. Detection (`guess`) finds candidate table regions before
//! extraction.
//!
//! # Example
//!
//! ```ignore
//! use tabulon::{extract, ExtractOptions};
//!
//! let tables = extract("report.pdf", &ExtractOptions::default())?;
//! for table in &tables {
//!     println!("page {}: {} rows", table.page_number(), table.row_count());
//! }
//! ```

/// High-level document access.
pub mod document;
/// The workspace error type.
pub mod error;
/// Extraction orchestration.
pub mod extract;
/// Extraction options and validation.
pub mod options;

pub use document::Document;
pub use error::Error;
pub use extract::{extract, extract_with_settings};
pub use options::{Area, ExtractOptions, Method};

pub use tabulon_core::{
    detector, lattice, stream, Cell, ExtractionMethod, Page, PageBuilder, Rect, Ruling, Settings,
    Table, TextChunk, TextElement,
};
