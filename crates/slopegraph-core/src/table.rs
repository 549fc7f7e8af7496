use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// An observation-by-period value table, the input to slopegraph rendering.
///
/// Rows are observations (each with an identity name used for edge labels),
/// columns are ordered periods. Cells are `Option<f64>`: `None` is a missing
/// value, a first-class input state. Construction rejects ragged rows and
/// non-finite cell values, so every `Table` that exists is rectangular and
/// finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct Table {
    row_names: Vec<String>,
    period_labels: Vec<String>,
    values: Vec<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct RawTable {
    row_names: Vec<String>,
    #[serde(default)]
    period_labels: Option<Vec<String>>,
    values: Vec<Vec<Option<f64>>>,
}

impl TryFrom<RawTable> for Table {
    type Error = Error;

    fn try_from(raw: RawTable) -> Result<Self> {
        let periods = raw
            .period_labels
            .as_ref()
            .map(|l| l.len())
            .or_else(|| raw.values.first().map(|r| r.len()))
            .unwrap_or(0);
        let labels = raw
            .period_labels
            .unwrap_or_else(|| default_period_labels(periods));
        Table::new(raw.row_names, labels, raw.values)
    }
}

fn default_period_labels(periods: usize) -> Vec<String> {
    (1..=periods).map(|j| j.to_string()).collect()
}

impl Table {
    /// Builds a table from explicit row names, period labels and row-major
    /// values. The period labels define the column count; every row must
    /// match it.
    pub fn new(
        row_names: Vec<String>,
        period_labels: Vec<String>,
        values: Vec<Vec<Option<f64>>>,
    ) -> Result<Self> {
        if row_names.len() != values.len() {
            return Err(Error::RowNameCount {
                names: row_names.len(),
                rows: values.len(),
            });
        }
        let periods = period_labels.len();
        for (i, row) in values.iter().enumerate() {
            if row.len() != periods {
                return Err(Error::RaggedRow {
                    row: i + 1,
                    len: row.len(),
                    periods,
                });
            }
            for (j, cell) in row.iter().enumerate() {
                if let Some(v) = cell {
                    if !v.is_finite() {
                        return Err(Error::NonFiniteValue {
                            row: i + 1,
                            period: j + 1,
                        });
                    }
                }
            }
        }
        Ok(Self {
            row_names,
            period_labels,
            values,
        })
    }

    /// Builds a table from `(name, values)` rows, labeling periods "1".."M".
    pub fn from_rows<S, I>(rows: I) -> Result<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Vec<Option<f64>>)>,
    {
        let mut row_names = Vec::new();
        let mut values = Vec::new();
        for (name, row) in rows {
            row_names.push(name.into());
            values.push(row);
        }
        let periods = values.first().map(|r| r.len()).unwrap_or(0);
        Self::new(row_names, default_period_labels(periods), values)
    }

    /// Replaces the period labels, keeping the values.
    pub fn with_period_labels(self, period_labels: Vec<String>) -> Result<Self> {
        if period_labels.len() != self.periods() {
            return Err(Error::PeriodLabelCount {
                labels: period_labels.len(),
                periods: self.periods(),
            });
        }
        Ok(Self {
            period_labels,
            ..self
        })
    }

    /// Number of observations (rows).
    pub fn rows(&self) -> usize {
        self.values.len()
    }

    /// Number of periods (columns).
    pub fn periods(&self) -> usize {
        self.period_labels.len()
    }

    pub fn row_names(&self) -> &[String] {
        &self.row_names
    }

    pub fn period_labels(&self) -> &[String] {
        &self.period_labels
    }

    /// Cell value at 0-based `row`/`period`; `None` means missing.
    pub fn value(&self, row: usize, period: usize) -> Option<f64> {
        self.values[row][period]
    }
}
