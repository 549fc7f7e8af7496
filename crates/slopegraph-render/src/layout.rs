use slopegraph_core::config::{MarginSpec, Margins, SlopegraphConfig};
use slopegraph_core::geom::point;
use slopegraph_core::{Result, Table, TextAnchor, build_segments};

use crate::dedup::draw_set;
use crate::model::{
    Baseline, LinearScale, SlopeLineData, SlopeTextData, SlopegraphDrawable, SlopegraphLayout,
};
use crate::text::TextMeasurer;

/// Clearance between chart content and adjacent text blocks, px.
const EDGE_GAP: f64 = 8.0;

/// Positions one slopegraph: builds the segment list, resolves styles and
/// produces pixel-space drawables in paint order (title, headers, strokes,
/// endpoint numbers, edge name labels).
///
/// Strokes are drawn from the deduplicated set so tied trajectories are not
/// overprinted, and each shared stroke takes the style of its first
/// observation. Name labels ignore deduplication: every observation with a
/// value at a boundary period gets its own label. All validation runs up
/// front; an `Err` means nothing was laid out.
pub fn layout_slopegraph(
    table: &Table,
    config: &SlopegraphConfig,
    measurer: &dyn TextMeasurer,
) -> Result<SlopegraphLayout> {
    config.validate()?;
    let segments = build_segments(table)?;
    let styles = config.resolve_styles(table.rows())?;
    let period_labels = config.period_labels_for(table)?;

    let periods = table.periods();
    let margins = match config.margins {
        MarginSpec::Explicit(margins) => margins,
        MarginSpec::Auto => auto_margins(table, config, &period_labels, measurer),
    };

    // Name labels live at x = 1 - offset and x = M + offset; putting those
    // positions at the ends of the x domain pins them to the margin edges.
    let x_scale = LinearScale {
        domain: (
            1.0 - config.label_offset,
            periods as f64 + config.label_offset,
        ),
        range: (margins.left, config.width - margins.right),
    };
    let y_scale = LinearScale {
        domain: config
            .y_limits
            .unwrap_or_else(|| padded_value_domain(table)),
        range: (config.height - margins.bottom, margins.top),
    };

    let drawn = draw_set(&segments);
    let mut drawables = Vec::new();

    if let Some(title) = &config.title {
        drawables.push(SlopegraphDrawable::Text {
            group: "title".to_string(),
            data: vec![SlopeTextData {
                text: title.clone(),
                x: config.width / 2.0,
                y: EDGE_GAP,
                fill: config.theme.title_color().to_string(),
                font_size: config.title_font.size,
                font_family: config.title_font.family.clone(),
                font_weight: config.title_font.weight.clone(),
                anchor: TextAnchor::Middle,
                baseline: Baseline::Hanging,
            }],
        });
    }

    let headers: Vec<SlopeTextData> = period_labels
        .iter()
        .enumerate()
        .map(|(j, label)| SlopeTextData {
            text: label.clone(),
            x: x_scale.apply((j + 1) as f64),
            y: margins.top - EDGE_GAP,
            fill: config.theme.header_color().to_string(),
            font_size: config.header_font.size,
            font_family: config.header_font.family.clone(),
            font_weight: config.header_font.weight.clone(),
            anchor: TextAnchor::Middle,
            baseline: Baseline::Alphabetic,
        })
        .collect();
    drawables.push(SlopegraphDrawable::Text {
        group: "headers".to_string(),
        data: headers,
    });

    // Each stroke is pulled in from the period grid lines so it clears the
    // numbers sitting at the exact endpoints. Interpolating along the
    // segment nudges sloped strokes vertically toward each other while
    // leaving flat ones at their value.
    let strokes: Vec<SlopeLineData> = drawn
        .iter()
        .map(|s| {
            let style = s.observation - 1;
            let p1 = point(s.x1 as f64, s.y1);
            let p2 = point(s.x2 as f64, s.y2);
            let a = p1.lerp(p2, config.x_inset);
            let b = p2.lerp(p1, config.x_inset);
            SlopeLineData {
                x1: x_scale.apply(a.x),
                y1: y_scale.apply(a.y),
                x2: x_scale.apply(b.x),
                y2: y_scale.apply(b.y),
                stroke: styles.line_color[style].clone(),
                stroke_width: styles.line_width[style],
                dash_array: styles.line_type[style].dash_array().map(str::to_string),
            }
        })
        .collect();
    drawables.push(SlopegraphDrawable::Line {
        group: "strokes".to_string(),
        data: strokes,
    });

    // Numbers at stroke granularity: coincident ties print once, not
    // stacked on top of each other.
    let mut values = Vec::with_capacity(drawn.len() * 2);
    for s in &drawn {
        let style = s.observation - 1;
        for (x, y) in [(s.x1, s.y1), (s.x2, s.y2)] {
            values.push(SlopeTextData {
                text: format_value(y, config.decimals),
                x: x_scale.apply(x as f64),
                y: y_scale.apply(y),
                fill: styles.number_color[style].clone(),
                font_size: config.number_font.size,
                font_family: config.number_font.family.clone(),
                font_weight: config.number_font.weight.clone(),
                anchor: TextAnchor::Middle,
                baseline: Baseline::Middle,
            });
        }
    }
    drawables.push(SlopegraphDrawable::Text {
        group: "values".to_string(),
        data: values,
    });

    drawables.push(SlopegraphDrawable::Text {
        group: "left-labels".to_string(),
        data: edge_labels(
            table,
            config,
            &styles.label_color,
            x_scale.apply(1.0 - config.label_offset),
            0,
            config.left_label_anchor,
            &y_scale,
        ),
    });
    drawables.push(SlopegraphDrawable::Text {
        group: "right-labels".to_string(),
        data: edge_labels(
            table,
            config,
            &styles.label_color,
            x_scale.apply(periods as f64 + config.label_offset),
            periods - 1,
            config.right_label_anchor,
            &y_scale,
        ),
    });

    tracing::debug!(
        segments = segments.len(),
        strokes = drawn.len(),
        "laid out slopegraph"
    );

    Ok(SlopegraphLayout {
        width: config.width,
        height: config.height,
        background_color: config.theme.background.clone(),
        margins,
        x_scale,
        y_scale,
        segments,
        drawables,
    })
}

/// Data range padded by 1% of its span. A single distinct value pads by
/// 1.0 either side; a table with no values at all falls back to (0, 1).
fn padded_value_domain(table: &Table) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for row in 0..table.rows() {
        for period in 0..table.periods() {
            if let Some(v) = table.value(row, period) {
                min = min.min(v);
                max = max.max(v);
            }
        }
    }
    if min > max {
        return (0.0, 1.0);
    }
    let pad = if min == max { 1.0 } else { (max - min) * 0.01 };
    (min - pad, max + pad)
}

fn auto_margins(
    table: &Table,
    config: &SlopegraphConfig,
    period_labels: &[String],
    measurer: &dyn TextMeasurer,
) -> Margins {
    let last = table.periods() - 1;
    let mut left = 0.0f64;
    let mut right = 0.0f64;
    for row in 0..table.rows() {
        let name = &table.row_names()[row];
        if table.value(row, 0).is_some() {
            left = left.max(measurer.measure(name, &config.label_font).width);
        }
        if table.value(row, last).is_some() {
            right = right.max(measurer.measure(name, &config.label_font).width);
        }
    }

    let mut header_h = 0.0f64;
    for label in period_labels {
        header_h = header_h.max(measurer.measure(label, &config.header_font).height);
    }
    let number_h = measurer.measure("0", &config.number_font).height;

    let mut top = EDGE_GAP + header_h + EDGE_GAP;
    if let Some(title) = &config.title {
        top += measurer.measure(title, &config.title_font).height + EDGE_GAP;
    }
    Margins {
        top: top.max(number_h / 2.0 + EDGE_GAP),
        right: right + EDGE_GAP,
        bottom: number_h / 2.0 + EDGE_GAP,
        left: left + EDGE_GAP,
    }
}

fn edge_labels(
    table: &Table,
    config: &SlopegraphConfig,
    label_color: &[String],
    x: f64,
    period: usize,
    anchor: TextAnchor,
    y_scale: &LinearScale,
) -> Vec<SlopeTextData> {
    let mut out = Vec::new();
    for row in 0..table.rows() {
        // A missing boundary value drops the label, nothing else.
        let Some(v) = table.value(row, period) else {
            continue;
        };
        out.push(SlopeTextData {
            text: table.row_names()[row].clone(),
            x,
            y: y_scale.apply(v),
            fill: label_color[row].clone(),
            font_size: config.label_font.size,
            font_family: config.label_font.family.clone(),
            font_weight: config.label_font.weight.clone(),
            anchor,
            baseline: Baseline::Middle,
        });
    }
    out
}

/// Fixed-decimal formatting for endpoint numbers, with `-0` forms folded to
/// their unsigned spelling.
fn format_value(v: f64, decimals: usize) -> String {
    let s = format!("{v:.decimals$}");
    if s.starts_with('-') && s[1..].bytes().all(|b| b == b'0' || b == b'.') {
        s[1..].to_string()
    } else {
        s
    }
}
