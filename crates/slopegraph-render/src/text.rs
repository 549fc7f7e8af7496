use serde::{Deserialize, Serialize};
use slopegraph_core::FontSpec;
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

/// Measures label text for margin sizing. Layout only needs widths and
/// heights, so callers can plug in anything from the deterministic
/// approximation below to a real font shaper.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> TextMetrics;
}

/// Font-metric-free measurer: width is the text's terminal cell width times
/// a per-character factor, height is line count times a line-height factor.
///
/// Zero factors fall back to 0.6 / 1.2, so `Default` gives a usable
/// measurer. Deterministic across platforms, which keeps layout output
/// byte-stable in tests and snapshot comparisons.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl DeterministicTextMeasurer {
    fn cell_width(line: &str) -> usize {
        line.chars().map(|ch| ch.width().unwrap_or(0)).sum()
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };

        let font_size = font.size.max(1.0);
        let mut max_cells = 0usize;
        let mut line_count = 0usize;
        for line in text.split('\n') {
            max_cells = max_cells.max(Self::cell_width(line));
            line_count += 1;
        }
        let line_count = line_count.max(1);

        TextMetrics {
            width: max_cells as f64 * font_size * char_width_factor,
            height: line_count as f64 * font_size * line_height_factor,
            line_count,
        }
    }
}
