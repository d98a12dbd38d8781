use std::{error::Error, fmt, io};

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use machine_learning::MlErr;

use crate::form::FieldErr;

/// The server module's result type.
pub type Result<T> = std::result::Result<T, ServeErr>;

/// Failures that keep the server from starting or running.
#[derive(Debug)]
pub enum ServeErr {
    Io(io::Error),
    /// The artifact couldn't be loaded.
    Ml(MlErr),
    /// The artifact was fitted on other features than the ones the form collects.
    SchemaMismatch {
        expected: Vec<String>,
        got: Vec<String>,
    },
    InvalidConfig {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl fmt::Display for ServeErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServeErr::Io(e) => write!(f, "io error: {e}"),
            ServeErr::Ml(e) => write!(f, "model error: {e}"),
            ServeErr::SchemaMismatch { expected, got } => write!(
                f,
                "the model was fitted on features {got:?} but the form collects {expected:?}"
            ),
            ServeErr::InvalidConfig { var, value, reason } => {
                write!(f, "invalid config: {var}={value:?}: {reason}")
            }
        }
    }
}

impl Error for ServeErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ServeErr::Io(e) => Some(e),
            ServeErr::Ml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ServeErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<MlErr> for ServeErr {
    fn from(value: MlErr) -> Self {
        Self::Ml(value)
    }
}

/// Why a prediction request couldn't be answered.
#[derive(Debug)]
pub enum ApiErr {
    /// A value is missing, not a number or outside its widget bounds.
    Field(FieldErr),
    /// The body couldn't be decoded.
    BadRequest(String),
    PayloadTooLarge,
    /// The model couldn't produce a usable prediction.
    Internal(String),
}

impl ApiErr {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiErr::Field(_) | ApiErr::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiErr::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiErr::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErr::Field(e) => write!(f, "bad request: {e}"),
            ApiErr::BadRequest(msg) => write!(f, "bad request: {msg}"),
            ApiErr::PayloadTooLarge => write!(f, "payload too large"),
            ApiErr::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl Error for ApiErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiErr::Field(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FieldErr> for ApiErr {
    fn from(value: FieldErr) -> Self {
        Self::Field(value)
    }
}

impl From<JsonRejection> for ApiErr {
    fn from(value: JsonRejection) -> Self {
        match value.status() {
            StatusCode::PAYLOAD_TOO_LARGE => Self::PayloadTooLarge,
            _ => Self::BadRequest(value.body_text()),
        }
    }
}

impl IntoResponse for ApiErr {
    fn into_response(self) -> Response {
        (self.status(), format!("{self}\n")).into_response()
    }
}
