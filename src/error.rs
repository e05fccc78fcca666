use thiserror::Error;

pub type SeriesResult<T> = Result<T, SeriesError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("row {row}: cannot parse {field} from {value:?}: {reason}")]
    Parse {
        row: usize,
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("no observations match key {key}")]
    EmptyResult { key: String },

    #[error("nearest lookup on an empty series")]
    EmptyIndex,

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("json: {0}")]
    Json(String),

    #[error("csv: {0}")]
    Csv(String),
}

impl SeriesError {
    pub(crate) fn parse(
        row: usize,
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Parse {
            row,
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn empty_result(key: impl std::fmt::Debug) -> Self {
        Self::EmptyResult {
            key: format!("{key:?}"),
        }
    }
}
