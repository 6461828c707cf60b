//! Backend-independent types and algorithms for tabulon.
//!
//! This crate holds everything between the PDF parser and the output
//! formatters: geometry primitives, ruling reconstruction and normalization,
//! the glyph → word → line pipeline, the lattice and stream table
//! extractors, and the table-region detectors. It has no required external
//! dependencies — all functionality is pure Rust.
//!
//! # Modules
//!
//! - [`geometry`] — [`Point`], [`Rect`], reading order, overlap predicates
//! - [`ruling`] — [`Ruling`] normalization, collapsing, intersections
//! - [`spatial_index`] — grid-bucketed rectangle lookup
//! - [`clipper`] — Cohen-Sutherland ruling clipping
//! - [`graphics`] — path-painting events → rulings ([`RulingReceiver`])
//! - [`text`] — positioned glyphs and script direction
//! - [`chunk`] — word and line merging ([`TextChunk`], [`Line`])
//! - [`projection`] — 1-D projection profiles and clustering
//! - [`table`] — [`Cell`] and sparse [`Table`] grids
//! - [`page`] — the [`Page`] model with cached derived state
//! - [`lattice`] — ruling-driven table reconstruction
//! - [`stream`] — text-layout-driven table reconstruction
//! - [`detector`] — table-region discovery
//! - [`settings`] — the [`Settings`] configuration record

/// Cohen-Sutherland clipping of rulings against rectangles.
pub mod clipper;
/// Glyph → word (chunk) → line merging with RTL support.
pub mod chunk;
/// Table-region detectors: ruling-driven and text-edge-driven.
pub mod detector;
/// Geometric primitives: points, rectangles, ordering, overlap.
pub mod geometry;
/// Graphics-stream receiver: path events, CTM stack, ruling emission.
pub mod graphics;
/// Lattice extraction from the ruling network.
pub mod lattice;
/// The page model: glyphs, rulings, spatial index, cached processing.
pub mod page;
/// 1-D projection profiles, gap detection, and position clustering.
pub mod projection;
/// Rulings: construction, normalization, collapsing, intersections.
pub mod ruling;
/// Tuning thresholds for the whole pipeline.
pub mod settings;
/// Grid-bucketed spatial lookup over rectangles.
pub mod spatial_index;
/// Stream extraction from glyph positions.
pub mod stream;
/// Cells and sparse table grids.
pub mod table;
/// Positioned glyphs and script direction classification.
pub mod text;

pub use chunk::{merge_lines, merge_words, Line, TextChunk};
pub use clipper::clip_ruling;
pub use detector::{detect_with_rulings, detect_with_text_edges, is_tabular};
pub use geometry::{cmp_reading_order, Point, Rect};
pub use graphics::{Ctm, PathEvent, RulingReceiver};
pub use page::{Page, PageBuilder};
pub use projection::{cluster_positions, ProjectionProfile};
pub use ruling::{
    collapse_oriented_rulings, find_intersections, Orientation, Ruling, ORIENTATION_TOLERANCE,
};
pub use settings::Settings;
pub use spatial_index::SpatialIndex;
pub use table::{Cell, ExtractionMethod, Table};
pub use text::{direction_of, is_rtl, Direction, TextElement};
