use crate::error::{Error, Result};
use crate::style::{FontSpec, LineType, ResolvedStyles, StyleSpec, TextAnchor};
use crate::table::Table;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};

/// Explicit pixel margins around the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 48.0,
            right: 96.0,
            bottom: 24.0,
            left: 96.0,
        }
    }
}

/// Margin policy: `Auto` measures the edge labels and title to size the
/// margins, `Explicit` uses fixed pixel values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginSpec {
    #[default]
    Auto,
    Explicit(Margins),
}

/// The full configuration surface for one slopegraph rendering call.
///
/// Every field is independently overridable; `Default` (and `#[serde(default)]`
/// for partial JSON configs) supplies the documented defaults. Style channels
/// follow recycling semantics, see [`StyleSpec`]; the `Option`-wrapped color
/// channels inherit the theme foreground when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlopegraphConfig {
    /// Canvas size in pixels.
    pub width: f64,
    pub height: f64,
    pub title: Option<String>,
    /// Value-axis limits; unset means data range padded by 1% of its span.
    pub y_limits: Option<(f64, f64)>,
    /// Overrides the table's period labels for the header row.
    pub period_labels: Option<Vec<String>>,
    /// Decimal places for numeric endpoint labels.
    pub decimals: usize,
    /// Horizontal clearance of edge name labels, in period units.
    pub label_offset: f64,
    /// Horizontal stroke inset from each period position, in period units.
    pub x_inset: f64,
    pub left_label_anchor: TextAnchor,
    pub right_label_anchor: TextAnchor,
    pub line_color: Option<StyleSpec<String>>,
    pub line_type: StyleSpec<LineType>,
    pub line_width: StyleSpec<f64>,
    pub label_color: Option<StyleSpec<String>>,
    pub number_color: Option<StyleSpec<String>>,
    pub label_font: FontSpec,
    pub number_font: FontSpec,
    pub header_font: FontSpec,
    pub title_font: FontSpec,
    pub margins: MarginSpec,
    pub theme: Theme,
}

impl Default for SlopegraphConfig {
    fn default() -> Self {
        Self {
            width: 700.0,
            height: 500.0,
            title: None,
            y_limits: None,
            period_labels: None,
            decimals: 0,
            label_offset: 0.1,
            x_inset: 0.1,
            left_label_anchor: TextAnchor::End,
            right_label_anchor: TextAnchor::Start,
            line_color: None,
            line_type: StyleSpec::Uniform(LineType::Solid),
            line_width: StyleSpec::Uniform(1.0),
            label_color: None,
            number_color: None,
            label_font: FontSpec::sized(14.0),
            number_font: FontSpec::sized(12.0),
            header_font: FontSpec::sized(16.0),
            title_font: FontSpec::bold(20.0),
            margins: MarginSpec::Auto,
            theme: Theme::default(),
        }
    }
}

impl SlopegraphConfig {
    /// Rejects configurations that cannot produce a drawable chart. Run
    /// before any layout work so a bad config never yields partial output.
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(Error::InvalidConfig {
                message: format!("width must be finite and positive, got {}", self.width),
            });
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(Error::InvalidConfig {
                message: format!("height must be finite and positive, got {}", self.height),
            });
        }
        if !self.label_offset.is_finite() || !self.x_inset.is_finite() {
            return Err(Error::InvalidConfig {
                message: "label_offset and x_inset must be finite".to_string(),
            });
        }
        if let Some((lo, hi)) = self.y_limits {
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                return Err(Error::InvalidConfig {
                    message: format!("y_limits must be finite with lo < hi, got ({lo}, {hi})"),
                });
            }
        }
        Ok(())
    }

    /// Broadcasts every style channel to the row count, inheriting the theme
    /// foreground for unset color channels.
    pub fn resolve_styles(&self, rows: usize) -> Result<ResolvedStyles> {
        let foreground = StyleSpec::Uniform(self.theme.foreground.clone());
        Ok(ResolvedStyles {
            line_color: self
                .line_color
                .as_ref()
                .unwrap_or(&foreground)
                .resolve(rows, "line_color")?,
            line_type: self.line_type.resolve(rows, "line_type")?,
            line_width: self.line_width.resolve(rows, "line_width")?,
            label_color: self
                .label_color
                .as_ref()
                .unwrap_or(&foreground)
                .resolve(rows, "label_color")?,
            number_color: self
                .number_color
                .as_ref()
                .unwrap_or(&foreground)
                .resolve(rows, "number_color")?,
        })
    }

    /// Header labels for the table: the configured override (validated
    /// against the period count) or the table's own labels.
    pub fn period_labels_for(&self, table: &Table) -> Result<Vec<String>> {
        match &self.period_labels {
            Some(labels) => {
                if labels.len() != table.periods() {
                    return Err(Error::PeriodLabelCount {
                        labels: labels.len(),
                        periods: table.periods(),
                    });
                }
                Ok(labels.clone())
            }
            None => Ok(table.period_labels().to_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = SlopegraphConfig::default();
        assert_eq!(config.width, 700.0);
        assert_eq!(config.height, 500.0);
        assert_eq!(config.decimals, 0);
        assert_eq!(config.label_offset, 0.1);
        assert_eq!(config.x_inset, 0.1);
        assert_eq!(config.left_label_anchor, TextAnchor::End);
        assert_eq!(config.right_label_anchor, TextAnchor::Start);
        assert_eq!(config.margins, MarginSpec::Auto);
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn partial_json_overrides_keep_defaults() {
        let config: SlopegraphConfig = serde_json::from_str(
            r#"{ "decimals": 1, "line_color": ["red", "blue"], "margins": { "explicit": { "left": 120.0 } } }"#,
        )
        .expect("config json");
        assert_eq!(config.decimals, 1);
        assert_eq!(config.width, 700.0);
        assert_eq!(
            config.line_color,
            Some(StyleSpec::PerObservation(vec![
                "red".to_string(),
                "blue".to_string()
            ]))
        );
        let MarginSpec::Explicit(margins) = config.margins else {
            panic!("expected explicit margins");
        };
        assert_eq!(margins.left, 120.0);
        assert_eq!(margins.top, 48.0);
    }

    #[test]
    fn validate_rejects_degenerate_geometry() {
        let mut config = SlopegraphConfig {
            width: 0.0,
            ..SlopegraphConfig::default()
        };
        assert!(config.validate().is_err());

        config.width = 700.0;
        config.y_limits = Some((5.0, 5.0));
        assert!(config.validate().is_err());

        config.y_limits = Some((0.0, 10.0));
        config.validate().expect("valid again");
    }

    #[test]
    fn unset_color_channels_inherit_foreground() {
        let config = SlopegraphConfig::default();
        let styles = config.resolve_styles(3).expect("styles");
        assert_eq!(styles.line_color, vec!["#333"; 3]);
        assert_eq!(styles.label_color, vec!["#333"; 3]);
        assert_eq!(styles.number_color, vec!["#333"; 3]);
        assert_eq!(styles.line_width, vec![1.0; 3]);
        assert_eq!(styles.line_type, vec![LineType::Solid; 3]);
    }

    #[test]
    fn style_mismatch_surfaces_the_channel_name() {
        let config = SlopegraphConfig {
            line_width: StyleSpec::PerObservation(vec![1.0, 2.0]),
            ..SlopegraphConfig::default()
        };
        let err = config.resolve_styles(3).unwrap_err();
        assert!(err.to_string().starts_with("line_width"));
    }

    #[test]
    fn period_label_override_is_count_checked() {
        let table = Table::from_rows([("a", vec![Some(1.0), Some(2.0)])]).expect("table");
        let config = SlopegraphConfig {
            period_labels: Some(vec!["before".to_string(), "after".to_string()]),
            ..SlopegraphConfig::default()
        };
        assert_eq!(
            config.period_labels_for(&table).expect("labels"),
            vec!["before", "after"]
        );

        let config = SlopegraphConfig {
            period_labels: Some(vec!["only".to_string()]),
            ..SlopegraphConfig::default()
        };
        assert!(config.period_labels_for(&table).is_err());
    }
}
