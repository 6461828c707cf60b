//! lopdf-backed PDF access for tabulon.
//!
//! This crate is the boundary to the PDF byte layer: it opens documents
//! (including encrypted ones), exposes page geometry (media box, crop box,
//! rotation), and interprets content streams into positioned glyph records
//! and path-painting events consumed by `tabulon-core`.
//!
//! # Modules
//!
//! - [`document`] — [`PdfDocument`]: opening, decryption, page geometry
//! - [`interpreter`] — content-stream interpretation, [`ContentSink`]
//! - [`fonts`] — width tables and ToUnicode text mapping
//! - [`error`] — [`ParseError`]

/// Document opening and page-level access.
pub mod document;
/// Backend error types.
pub mod error;
/// Minimal font width and text mapping support.
pub mod fonts;
/// Content-stream interpretation.
pub mod interpreter;

pub use document::{PdfBox, PdfDocument};
pub use error::ParseError;
pub use fonts::Font;
pub use interpreter::{ContentSink, GlyphEvent, PageFrame};
