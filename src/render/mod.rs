//! Chart rendering abstraction layer for courtstats
//!
//! The render module provides a pluggable interface for drawing the four
//! analysis charts. One trait method per chart kind keeps the pipeline
//! independent of any drawing backend and lets tests capture chart data
//! with a recording double instead of producing artifacts.
//!
//! # Example
//!
//! ```rust,ignore
//! use courtstats::render::{Renderer, VegaLiteRenderer};
//!
//! let mut renderer = VegaLiteRenderer::new("charts");
//! analysis.render(&mut renderer)?;
//! ```

use crate::Result;

pub mod page;
pub mod vegalite;

pub use vegalite::VegaLiteRenderer;

/// One labelled bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

/// A bar chart: title, axis titles, fill color, bars in display order.
///
/// `name` is the artifact stem a file-producing renderer uses
/// (e.g. `top_tallest` → `top_tallest.html`).
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub name: String,
    pub title: String,
    /// Title of the category axis (player or team names).
    pub category_title: String,
    /// Title of the value axis (height, points).
    pub value_title: String,
    pub color: String,
    pub bars: Vec<Bar>,
}

/// One histogram bin with its occupancy.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u32,
}

/// A histogram: title, axis titles, fill color, bins in ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramChart {
    pub name: String,
    pub title: String,
    pub value_title: String,
    pub count_title: String,
    pub color: String,
    pub bins: Vec<HistogramBin>,
}

/// Trait for chart renderers
///
/// One method per chart kind the pipeline draws. Implementations decide
/// what "drawing" means: the Vega-Lite renderer writes embeddable pages,
/// test doubles just record the chart data they were handed.
pub trait Renderer {
    /// Draw a horizontal bar chart (category axis vertical).
    fn horizontal_bar(&mut self, chart: &BarChart) -> Result<()>;

    /// Draw a vertical bar chart (category axis horizontal).
    fn vertical_bar(&mut self, chart: &BarChart) -> Result<()>;

    /// Draw a histogram over numeric bins.
    fn histogram(&mut self, chart: &HistogramChart) -> Result<()>;
}
