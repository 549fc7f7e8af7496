//! Layout and SVG rendering for slopegraphs.
//!
//! [`layout_slopegraph`] turns a table plus configuration into a
//! [`SlopegraphLayout`]: the full data-space segment list and a pixel-space
//! drawable list in paint order. [`render_slopegraph_svg`] serializes a
//! layout to a standalone SVG string. Both steps are deterministic, so the
//! same inputs always produce byte-identical SVG.

#![forbid(unsafe_code)]

pub mod dedup;
pub mod layout;
pub mod model;
pub mod svg;
pub mod text;

pub use dedup::draw_set;
pub use layout::layout_slopegraph;
pub use model::{
    Baseline, LinearScale, SlopeLineData, SlopeTextData, SlopegraphDrawable, SlopegraphLayout,
};
pub use slopegraph_core::{Error, Result};
pub use svg::{SvgRenderOptions, render_slopegraph_svg};
pub use text::{DeterministicTextMeasurer, TextMeasurer, TextMetrics};

use slopegraph_core::{SlopegraphConfig, Table};
use std::sync::Arc;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
        }
    }
}

/// [`layout_slopegraph`] with the measurer taken from [`LayoutOptions`].
pub fn layout_table(
    table: &Table,
    config: &SlopegraphConfig,
    options: &LayoutOptions,
) -> Result<SlopegraphLayout> {
    layout::layout_slopegraph(table, config, options.text_measurer.as_ref())
}
