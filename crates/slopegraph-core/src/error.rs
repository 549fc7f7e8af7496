pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("a slopegraph needs at least 2 period columns, got {periods}")]
    NotEnoughPeriods { periods: usize },

    #[error("row {row} has {len} values, expected {periods} (one per period)")]
    RaggedRow {
        row: usize,
        len: usize,
        periods: usize,
    },

    #[error("table has {names} row names for {rows} value rows")]
    RowNameCount { names: usize, rows: usize },

    #[error("row {row}, period {period}: cell value must be finite (encode missing values as null)")]
    NonFiniteValue { row: usize, period: usize },

    #[error("{what} has {len} entries; expected 1, {rows}, or a count that divides {rows}")]
    StyleBroadcast {
        what: &'static str,
        len: usize,
        rows: usize,
    },

    #[error("expected {periods} period labels, got {labels}")]
    PeriodLabelCount { labels: usize, periods: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}
