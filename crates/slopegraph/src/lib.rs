#![forbid(unsafe_code)]

//! `slopegraph` draws Edward Tufte's table-graphic: one line per
//! observation connecting its values across ordered periods, numbers at
//! every endpoint and names along both edges.
//!
//! The base crate re-exports the headless model (tables, segments, styling,
//! configuration). Enable the `render` feature for layout and SVG output
//! via [`render`].
//!
//! # Features
//!
//! - `render`: enable layout + SVG rendering (`slopegraph::render`)

pub use slopegraph_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use slopegraph_render::model::{
        Baseline, LinearScale, SlopeLineData, SlopeTextData, SlopegraphDrawable, SlopegraphLayout,
    };
    pub use slopegraph_render::svg::{SvgRenderOptions, render_slopegraph_svg};
    pub use slopegraph_render::text::{DeterministicTextMeasurer, TextMeasurer, TextMetrics};
    pub use slopegraph_render::{LayoutOptions, layout_slopegraph, layout_table};

    use crate::{Result, SlopegraphConfig, Table};

    /// Converts an arbitrary string into a conservative SVG `id` token so
    /// multiple charts can share one page without id collisions.
    ///
    /// Trims whitespace, replaces unsupported characters with `-`, and
    /// prefixes `s-` when the result would not start with an ASCII letter.
    pub fn sanitize_svg_id(raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return "s-untitled".to_string();
        }

        let mut out = String::with_capacity(raw.len() + 2);
        for ch in raw.chars() {
            let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == ':' || ch == '.';
            out.push(if ok { ch } else { '-' });
        }

        let starts_ok = out.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        if !starts_ok {
            out.insert_str(0, "s-");
        }

        while out.contains("--") {
            out = out.replace("--", "-");
        }
        let out = out.trim_matches('-');
        if out.is_empty() || out == "s" {
            return "s-untitled".to_string();
        }
        out.to_string()
    }

    /// One-call table-to-SVG pipeline.
    pub fn render_table_svg(
        table: &Table,
        config: &SlopegraphConfig,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let layout = layout_table(table, config, layout_options)?;
        Ok(render_slopegraph_svg(&layout, svg_options))
    }

    /// Bundles a configuration and rendering options so UI integrations do
    /// not have to thread three parameters through every call. CPU-bound
    /// and I/O-free.
    #[derive(Clone, Default)]
    pub struct Renderer {
        pub config: SlopegraphConfig,
        pub layout: LayoutOptions,
        pub svg: SvgRenderOptions,
    }

    impl Renderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_config(mut self, config: SlopegraphConfig) -> Self {
            self.config = config;
            self
        }

        pub fn layout_table(&self, table: &Table) -> Result<SlopegraphLayout> {
            layout_table(table, &self.config, &self.layout)
        }

        pub fn render_svg(&self, table: &Table) -> Result<String> {
            render_table_svg(table, &self.config, &self.layout, &self.svg)
        }

        pub fn render_svg_with_diagram_id(&self, table: &Table, diagram_id: &str) -> Result<String> {
            let mut svg = self.svg.clone();
            svg.diagram_id = Some(sanitize_svg_id(diagram_id));
            render_table_svg(table, &self.config, &self.layout, &svg)
        }
    }
}
