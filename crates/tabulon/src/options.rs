//! Extraction options and their combination rules.

use crate::error::Error;

/// Which reconstruction algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// Reconstruct from ruling lines.
    Lattice,
    /// Reconstruct from glyph positions.
    Stream,
    /// Lattice first, stream when no ruled table is found.
    #[default]
    Auto,
}

/// A page sub-area in top-left page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Area {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Area {
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }
}

/// Caller-facing knobs for one extraction run.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// 1-based page numbers; `None` means every page.
    pub pages: Option<Vec<usize>>,
    /// Reconstruction method.
    pub method: Method,
    /// Restrict extraction to this page area.
    pub area: Option<Area>,
    /// Explicit column x-positions for stream extraction.
    pub columns: Option<Vec<f64>>,
    /// Run table-region detection and extract per detected region.
    pub guess: bool,
    /// Password for encrypted documents.
    pub password: Option<String>,
}

impl ExtractOptions {
    /// Check the option combination rules.
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(pages) = &self.pages {
            if pages.is_empty() {
                return Err(Error::InvalidOptions("page list is empty".into()));
            }
            if pages.contains(&0) {
                return Err(Error::InvalidOptions(
                    "page numbers are 1-based; 0 is not a page".into(),
                ));
            }
        }
        if let Some(area) = &self.area {
            if area.bottom <= area.top || area.right <= area.left {
                return Err(Error::InvalidOptions(format!(
                    "degenerate area: top={} left={} bottom={} right={}",
                    area.top, area.left, area.bottom, area.right
                )));
            }
        }
        if let Some(columns) = &self.columns {
            if columns.iter().any(|c| !c.is_finite()) {
                return Err(Error::InvalidOptions(
                    "column positions must be finite".into(),
                ));
            }
            if self.method == Method::Lattice {
                return Err(Error::InvalidOptions(
                    "explicit columns only apply to stream extraction".into(),
                ));
            }
        }
        if self.guess && self.area.is_some() {
            return Err(Error::InvalidOptions(
                "area and guess are mutually exclusive".into(),
            ));
        }
        Ok(())
    }
}
