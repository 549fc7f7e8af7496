use crate::model::{Baseline, SlopeTextData, SlopegraphDrawable, SlopegraphLayout};
use slopegraph_core::TextAnchor;
use std::fmt::Write as _;

#[derive(Debug, Clone, Default)]
pub struct SvgRenderOptions {
    /// Id for the root `<svg>` element; grouped charts on one page need
    /// distinct ids.
    pub diagram_id: Option<String>,
}

/// Serializes a positioned layout to a standalone SVG document. Pure
/// string building over the drawable list; the output is byte-stable for a
/// given layout.
pub fn render_slopegraph_svg(layout: &SlopegraphLayout, options: &SvgRenderOptions) -> String {
    let diagram_id = options.diagram_id.as_deref().unwrap_or("slopegraph");
    let diagram_id_esc = escape_xml(diagram_id);

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg id="{id}" width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" viewBox="0 0 {w} {h}" role="graphics-document document" aria-roledescription="slopegraph">"#,
        id = diagram_id_esc,
        w = fmt(layout.width),
        h = fmt(layout.height),
    );

    let _ = write!(
        &mut out,
        r#"<rect width="{w}" height="{h}" class="background" fill="{fill}"/>"#,
        w = fmt(layout.width),
        h = fmt(layout.height),
        fill = escape_xml(&layout.background_color),
    );

    for drawable in &layout.drawables {
        match drawable {
            SlopegraphDrawable::Line { group, data } => {
                if data.is_empty() {
                    continue;
                }
                let _ = write!(&mut out, r#"<g class="{}">"#, escape_xml(group));
                for line in data {
                    let _ = write!(
                        &mut out,
                        r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{stroke}" stroke-width="{sw}""#,
                        x1 = fmt(line.x1),
                        y1 = fmt(line.y1),
                        x2 = fmt(line.x2),
                        y2 = fmt(line.y2),
                        stroke = escape_xml(&line.stroke),
                        sw = fmt(line.stroke_width),
                    );
                    if let Some(dash) = &line.dash_array {
                        let _ = write!(&mut out, r#" stroke-dasharray="{}""#, escape_xml(dash));
                    }
                    out.push_str("/>");
                }
                out.push_str("</g>");
            }
            SlopegraphDrawable::Text { group, data } => {
                if data.is_empty() {
                    continue;
                }
                let _ = write!(&mut out, r#"<g class="{}">"#, escape_xml(group));
                for text in data {
                    write_text(&mut out, text);
                }
                out.push_str("</g>");
            }
        }
    }

    out.push_str("</svg>\n");
    out
}

fn write_text(out: &mut String, text: &SlopeTextData) {
    let _ = write!(
        out,
        r#"<text x="{x}" y="{y}" fill="{fill}" font-size="{size}px""#,
        x = fmt(text.x),
        y = fmt(text.y),
        fill = escape_xml(&text.fill),
        size = fmt(text.font_size),
    );
    if let Some(family) = &text.font_family {
        let _ = write!(out, r#" font-family="{}""#, escape_xml(family));
    }
    if let Some(weight) = &text.font_weight {
        let _ = write!(out, r#" font-weight="{}""#, escape_xml(weight));
    }
    let _ = write!(
        out,
        r#" text-anchor="{anchor}" dominant-baseline="{baseline}">{body}</text>"#,
        anchor = anchor_attr(text.anchor),
        baseline = baseline_attr(text.baseline),
        body = escape_xml(&text.text),
    );
}

fn anchor_attr(anchor: TextAnchor) -> &'static str {
    match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    }
}

fn baseline_attr(baseline: Baseline) -> &'static str {
    match baseline {
        Baseline::Middle => "middle",
        Baseline::Hanging => "hanging",
        Baseline::Alphabetic => "alphabetic",
    }
}

fn fmt(v: f64) -> String {
    // Round-trippable decimal form, with -0 and sub-nanometre float noise
    // from our own arithmetic snapped away.
    if !v.is_finite() {
        return "0".to_string();
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
