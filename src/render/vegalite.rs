//! Vega-Lite renderer implementation
//!
//! Converts chart descriptions into Vega-Lite v5 JSON specs and writes each
//! one as a self-contained vega-embed HTML page. Every chart is two layers:
//! a `bar` mark and a `text` mark carrying the per-element value annotation.
//!
//! # Mapping Strategy
//!
//! - bar chart → `bar` mark, nominal category axis with `sort: null` so the
//!   precomputed ranking order survives
//! - histogram → `bar` mark with `x`/`x2` bin edges (bins are precomputed,
//!   Vega-Lite only draws them)
//! - annotations → `text` mark layer, two-decimal values for measurements,
//!   integers for counts

use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tracing::info;

use crate::format;
use crate::render::{page, BarChart, HistogramChart, Renderer};
use crate::{CourtstatsError, Result};

const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";
const CHART_WIDTH: u32 = 640;
const CHART_HEIGHT: u32 = 360;

/// Build the Vega-Lite spec for a horizontal bar chart.
pub fn horizontal_bar_spec(chart: &BarChart) -> Value {
    let values: Vec<Value> = chart
        .bars
        .iter()
        .map(|bar| {
            json!({
                "label": bar.label,
                "value": bar.value,
                "annotation": format::two_decimals(bar.value),
            })
        })
        .collect();

    json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": chart.title,
        "width": CHART_WIDTH,
        "height": CHART_HEIGHT,
        "data": {"values": values},
        "layer": [
            {
                "mark": {"type": "bar", "color": chart.color},
                "encoding": {
                    "y": {
                        "field": "label",
                        "type": "nominal",
                        "sort": null,
                        "title": chart.category_title
                    },
                    "x": {
                        "field": "value",
                        "type": "quantitative",
                        "title": chart.value_title
                    }
                }
            },
            {
                "mark": {"type": "text", "align": "left", "baseline": "middle", "dx": 4},
                "encoding": {
                    "y": {"field": "label", "type": "nominal", "sort": null},
                    "x": {"field": "value", "type": "quantitative"},
                    "text": {"field": "annotation", "type": "nominal"}
                }
            }
        ]
    })
}

/// Build the Vega-Lite spec for a vertical bar chart.
pub fn vertical_bar_spec(chart: &BarChart) -> Value {
    let values: Vec<Value> = chart
        .bars
        .iter()
        .map(|bar| {
            json!({
                "label": bar.label,
                "value": bar.value,
                "annotation": format::two_decimals(bar.value),
            })
        })
        .collect();

    json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": chart.title,
        "width": CHART_WIDTH,
        "height": CHART_HEIGHT,
        "data": {"values": values},
        "layer": [
            {
                "mark": {"type": "bar", "color": chart.color},
                "encoding": {
                    "x": {
                        "field": "label",
                        "type": "nominal",
                        "sort": null,
                        "title": chart.category_title
                    },
                    "y": {
                        "field": "value",
                        "type": "quantitative",
                        "title": chart.value_title
                    }
                }
            },
            {
                "mark": {"type": "text", "baseline": "bottom", "dy": -4},
                "encoding": {
                    "x": {"field": "label", "type": "nominal", "sort": null},
                    "y": {"field": "value", "type": "quantitative"},
                    "text": {"field": "annotation", "type": "nominal"}
                }
            }
        ]
    })
}

/// Build the Vega-Lite spec for a histogram.
///
/// Bin edges are already computed; each bar spans `bin_start`..`bin_end`
/// via the `x`/`x2` channel pair, and the annotation sits at the bin
/// midpoint.
pub fn histogram_spec(chart: &HistogramChart) -> Value {
    let values: Vec<Value> = chart
        .bins
        .iter()
        .map(|bin| {
            json!({
                "bin_start": bin.lower,
                "bin_end": bin.upper,
                "bin_mid": (bin.lower + bin.upper) / 2.0,
                "count": bin.count,
                "annotation": format::count(bin.count),
            })
        })
        .collect();

    json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": chart.title,
        "width": CHART_WIDTH,
        "height": CHART_HEIGHT,
        "data": {"values": values},
        "layer": [
            {
                "mark": {"type": "bar", "color": chart.color, "stroke": "black"},
                "encoding": {
                    "x": {
                        "field": "bin_start",
                        "type": "quantitative",
                        "bin": {"binned": true},
                        "title": chart.value_title
                    },
                    "x2": {"field": "bin_end"},
                    "y": {
                        "field": "count",
                        "type": "quantitative",
                        "title": chart.count_title
                    }
                }
            },
            {
                "mark": {"type": "text", "baseline": "bottom", "dy": -4},
                "encoding": {
                    "x": {"field": "bin_mid", "type": "quantitative"},
                    "y": {"field": "count", "type": "quantitative"},
                    "text": {"field": "annotation", "type": "nominal"}
                }
            }
        ]
    })
}

/// Renderer that writes one vega-embed HTML page per chart
///
/// Pages land in the output directory as `<name>.html`, with the raw spec
/// alongside as `<name>.vl.json` for programmatic use.
pub struct VegaLiteRenderer {
    out_dir: PathBuf,
    written: Vec<PathBuf>,
}

impl VegaLiteRenderer {
    /// Create a renderer writing into `out_dir` (created on first chart).
    pub fn new(out_dir: impl AsRef<Path>) -> Self {
        Self {
            out_dir: out_dir.as_ref().to_path_buf(),
            written: Vec::new(),
        }
    }

    /// Paths of every page written so far, in render order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn present(&mut self, name: &str, title: &str, spec: &Value) -> Result<()> {
        std::fs::create_dir_all(&self.out_dir).map_err(|e| {
            CourtstatsError::RenderError(format!(
                "Failed to create output directory '{}': {}",
                self.out_dir.display(),
                e
            ))
        })?;

        let json = serde_json::to_string_pretty(spec).map_err(|e| {
            CourtstatsError::RenderError(format!("Failed to serialize chart spec: {}", e))
        })?;
        let spec_path = self.out_dir.join(format!("{}.vl.json", name));
        std::fs::write(&spec_path, &json).map_err(|e| {
            CourtstatsError::RenderError(format!(
                "Failed to write '{}': {}",
                spec_path.display(),
                e
            ))
        })?;

        let html_path = self.out_dir.join(format!("{}.html", name));
        std::fs::write(&html_path, page::chart_page(title, spec)).map_err(|e| {
            CourtstatsError::RenderError(format!(
                "Failed to write '{}': {}",
                html_path.display(),
                e
            ))
        })?;

        info!(chart = name, path = %html_path.display(), "chart written");
        self.written.push(html_path);
        Ok(())
    }
}

impl Renderer for VegaLiteRenderer {
    fn horizontal_bar(&mut self, chart: &BarChart) -> Result<()> {
        let spec = horizontal_bar_spec(chart);
        self.present(&chart.name, &chart.title, &spec)
    }

    fn vertical_bar(&mut self, chart: &BarChart) -> Result<()> {
        let spec = vertical_bar_spec(chart);
        self.present(&chart.name, &chart.title, &spec)
    }

    fn histogram(&mut self, chart: &HistogramChart) -> Result<()> {
        let spec = histogram_spec(chart);
        self.present(&chart.name, &chart.title, &spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Bar, HistogramBin};

    fn bar_chart() -> BarChart {
        BarChart {
            name: "top_tallest".to_string(),
            title: "Top 5 Tallest Players".to_string(),
            category_title: "Player Name".to_string(),
            value_title: "Height (cm)".to_string(),
            color: "skyblue".to_string(),
            bars: vec![
                Bar {
                    label: "B".to_string(),
                    value: 215.0,
                },
                Bar {
                    label: "A".to_string(),
                    value: 210.0,
                },
            ],
        }
    }

    #[test]
    fn test_horizontal_bar_spec_structure() {
        let spec = horizontal_bar_spec(&bar_chart());

        assert_eq!(spec["$schema"], VEGA_LITE_SCHEMA);
        assert_eq!(spec["title"], "Top 5 Tallest Players");
        assert_eq!(spec["layer"].as_array().unwrap().len(), 2);

        // Bar layer: category on y, value on x
        assert_eq!(spec["layer"][0]["mark"]["type"], "bar");
        assert_eq!(spec["layer"][0]["mark"]["color"], "skyblue");
        assert_eq!(spec["layer"][0]["encoding"]["y"]["type"], "nominal");
        assert_eq!(spec["layer"][0]["encoding"]["y"]["sort"], Value::Null);
        assert_eq!(spec["layer"][0]["encoding"]["x"]["title"], "Height (cm)");

        // Text layer annotates with two decimals
        assert_eq!(spec["layer"][1]["mark"]["type"], "text");
        assert_eq!(spec["data"]["values"][0]["annotation"], "215.00");
        assert_eq!(spec["data"]["values"][1]["annotation"], "210.00");
    }

    #[test]
    fn test_vertical_bar_spec_structure() {
        let spec = vertical_bar_spec(&bar_chart());

        assert_eq!(spec["layer"][0]["encoding"]["x"]["type"], "nominal");
        assert_eq!(spec["layer"][0]["encoding"]["y"]["type"], "quantitative");
        // Ranking order is preserved, not alphabetized
        assert_eq!(spec["data"]["values"][0]["label"], "B");
    }

    #[test]
    fn test_histogram_spec_structure() {
        let chart = HistogramChart {
            name: "age_distribution".to_string(),
            title: "Player Age Distribution".to_string(),
            value_title: "Age".to_string(),
            count_title: "Frequency".to_string(),
            color: "purple".to_string(),
            bins: vec![
                HistogramBin {
                    lower: 20.0,
                    upper: 22.0,
                    count: 3,
                },
                HistogramBin {
                    lower: 22.0,
                    upper: 24.0,
                    count: 0,
                },
            ],
        };
        let spec = histogram_spec(&chart);

        assert_eq!(spec["layer"][0]["encoding"]["x"]["field"], "bin_start");
        assert_eq!(spec["layer"][0]["encoding"]["x2"]["field"], "bin_end");
        assert_eq!(spec["layer"][0]["encoding"]["x"]["bin"]["binned"], true);

        // Counts annotate as integers at the bin midpoint
        assert_eq!(spec["data"]["values"][0]["annotation"], "3");
        assert_eq!(spec["data"]["values"][0]["bin_mid"], 21.0);
        assert_eq!(spec["data"]["values"][1]["count"], 0);
    }

    #[test]
    fn test_empty_chart_serializes() {
        let chart = BarChart {
            bars: Vec::new(),
            ..bar_chart()
        };
        let spec = horizontal_bar_spec(&chart);
        assert_eq!(spec["data"]["values"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_renderer_writes_page_and_spec() {
        let out_dir = std::env::temp_dir().join(format!("courtstats-render-{}", std::process::id()));
        let mut renderer = VegaLiteRenderer::new(&out_dir);

        renderer.horizontal_bar(&bar_chart()).unwrap();

        assert_eq!(renderer.written().len(), 1);
        let html = std::fs::read_to_string(out_dir.join("top_tallest.html")).unwrap();
        assert!(html.contains("vega-embed"));
        assert!(html.contains("Top 5 Tallest Players"));
        assert!(out_dir.join("top_tallest.vl.json").exists());

        std::fs::remove_dir_all(out_dir).ok();
    }
}
