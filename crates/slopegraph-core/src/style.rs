use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A per-observation style channel: one value for every row, or an explicit
/// vector recycled to the row count.
///
/// Recycling follows the usual vectorized-plotting convention: a single value
/// is repeated for all rows, and a shorter vector is repeated whole as long as
/// its length divides the row count. Anything else is a configuration error
/// rather than a silent truncation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleSpec<T> {
    Uniform(T),
    PerObservation(Vec<T>),
}

impl<T: Clone> StyleSpec<T> {
    /// Broadcasts this spec to exactly `rows` entries, or fails with
    /// [`Error::StyleBroadcast`] naming the offending channel.
    pub fn resolve(&self, rows: usize, what: &'static str) -> Result<Vec<T>> {
        match self {
            StyleSpec::Uniform(v) => Ok(vec![v.clone(); rows]),
            StyleSpec::PerObservation(vs) => {
                if vs.is_empty() || rows % vs.len() != 0 {
                    return Err(Error::StyleBroadcast {
                        what,
                        len: vs.len(),
                        rows,
                    });
                }
                Ok(vs.iter().cloned().cycle().take(rows).collect())
            }
        }
    }
}

impl<T> From<T> for StyleSpec<T> {
    fn from(value: T) -> Self {
        StyleSpec::Uniform(value)
    }
}

impl<T> From<Vec<T>> for StyleSpec<T> {
    fn from(values: Vec<T>) -> Self {
        StyleSpec::PerObservation(values)
    }
}

/// Stroke dash pattern for a trajectory, in the spirit of base-graphics line
/// types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineType {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DotDash,
    LongDash,
}

impl LineType {
    /// SVG `stroke-dasharray` value; `None` for a solid stroke.
    pub fn dash_array(self) -> Option<&'static str> {
        match self {
            LineType::Solid => None,
            LineType::Dashed => Some("8,8"),
            LineType::Dotted => Some("2,4"),
            LineType::DotDash => Some("2,4,8,4"),
            LineType::LongDash => Some("12,6"),
        }
    }
}

/// Horizontal text anchoring relative to the drawn coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    pub family: Option<String>,
    pub size: f64,
    pub weight: Option<String>,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: None,
            size: 14.0,
            weight: None,
        }
    }
}

impl FontSpec {
    pub fn sized(size: f64) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    pub fn bold(size: f64) -> Self {
        Self {
            size,
            weight: Some("bold".to_string()),
            ..Default::default()
        }
    }
}

/// All style channels broadcast to the row count, indexed by 0-based row.
///
/// Segments carry a 1-based observation index; callers subtract 1 when
/// looking up a channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyles {
    pub line_color: Vec<String>,
    pub line_type: Vec<LineType>,
    pub line_width: Vec<f64>,
    pub label_color: Vec<String>,
    pub number_color: Vec<String>,
}
