use serde::{Deserialize, Serialize};
use slopegraph_core::config::Margins;
use slopegraph_core::{Segment, TextAnchor};

/// A straight stroke in pixel space, style already resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlopeLineData {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: String,
    #[serde(rename = "strokeWidth")]
    pub stroke_width: f64,
    #[serde(rename = "dashArray", default, skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Baseline {
    Middle,
    Hanging,
    Alphabetic,
}

/// A positioned text run in pixel space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlopeTextData {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub fill: String,
    #[serde(rename = "fontSize")]
    pub font_size: f64,
    #[serde(rename = "fontFamily", default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(rename = "fontWeight", default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    pub anchor: TextAnchor,
    pub baseline: Baseline,
}

/// One layer of the chart: strokes or a batch of text runs, tagged with the
/// group name the SVG backend uses as a `<g class=...>` wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SlopegraphDrawable {
    #[serde(rename = "line")]
    Line {
        group: String,
        data: Vec<SlopeLineData>,
    },
    #[serde(rename = "text")]
    Text {
        group: String,
        data: Vec<SlopeTextData>,
    },
}

/// Affine data-to-pixel mapping. A degenerate domain maps everything to the
/// range midpoint rather than dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn apply(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d0 == d1 {
            return r0 + (r1 - r0) * 0.5;
        }
        let t = (v - d0) / (d1 - d0);
        r0 + t * (r1 - r0)
    }
}

/// The fully positioned chart: everything an SVG (or any vector) backend
/// needs, with no dependence on the original table.
///
/// `segments` is the full per-observation segment list in data space,
/// duplicates included, so callers can recompute or verify any
/// observation's coordinates. Stroke deduplication only affects
/// `drawables`, which hold the pixel-mapped geometry in paint order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlopegraphLayout {
    pub width: f64,
    pub height: f64,
    #[serde(rename = "backgroundColor")]
    pub background_color: String,
    pub margins: Margins,
    #[serde(rename = "xScale")]
    pub x_scale: LinearScale,
    #[serde(rename = "yScale")]
    pub y_scale: LinearScale,
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub drawables: Vec<SlopegraphDrawable>,
}
