use std::{fmt, io};

use machine_learning::MlErr;

/// The trainer module's result type.
pub type Result<T> = std::result::Result<T, TrainErr>;

/// All errors that can abort a training run.
#[derive(Debug)]
pub enum TrainErr {
    /// An environment variable holds a value that can't be used.
    InvalidConfig {
        var: &'static str,
        value: String,
        reason: String,
    },
    /// Loading, fitting, evaluating or saving failed.
    Ml(MlErr),
    /// The run's output couldn't be written.
    Io(io::Error),
}

impl fmt::Display for TrainErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { var, value, reason } => {
                write!(f, "invalid config: {var}={value:?}: {reason}")
            }
            Self::Ml(e) => write!(f, "{e}"),
            Self::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for TrainErr {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Ml(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MlErr> for TrainErr {
    fn from(e: MlErr) -> Self {
        Self::Ml(e)
    }
}

impl From<io::Error> for TrainErr {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
