use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug)]
pub enum MlErr {
    Io(io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    MissingColumn {
        name: String,
    },
    DuplicateColumn {
        name: String,
    },
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
    SizeMismatch {
        a: &'static str,
        b: &'static str,
        got: usize,
        expected: usize,
    },
    EmptyDataset,
    InvalidSplit {
        rows: usize,
        test_size: f64,
    },
    UnsupportedFormat {
        got: u32,
        expected: u32,
    },
    CorruptArtifact(String),
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MlErr::Io(e) => format!("io error: {e}"),
            MlErr::Csv(e) => format!("csv error: {e}"),
            MlErr::Json(e) => format!("json error: {e}"),
            MlErr::MissingColumn { name } => format!("column not found: {name:?}"),
            MlErr::DuplicateColumn { name } => format!("column {name:?} appears more than once"),
            MlErr::InvalidValue { row, column, value } => {
                format!("row {row}, column {column:?}: {value:?} is not a finite number")
            }
            MlErr::SizeMismatch {
                a,
                b,
                got,
                expected,
            } => {
                format!(
                    "There's a size mismatch between {a} and {b}, got {got} and expected {expected}"
                )
            }
            MlErr::EmptyDataset => "the dataset has no rows".to_string(),
            MlErr::InvalidSplit { rows, test_size } => format!(
                "cannot split {rows} row(s) with test size {test_size}, both partitions must be non-empty"
            ),
            MlErr::UnsupportedFormat { got, expected } => {
                format!("unsupported artifact format version {got}, expected {expected}")
            }
            MlErr::CorruptArtifact(msg) => format!("corrupt artifact: {msg}"),
        };

        write!(f, "{s}")
    }
}

impl Error for MlErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MlErr::Io(e) => Some(e),
            MlErr::Csv(e) => Some(e),
            MlErr::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MlErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for MlErr {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<serde_json::Error> for MlErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
