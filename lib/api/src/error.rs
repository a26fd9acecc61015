use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use thiserror::Error;

/// Failures while resolving or looking up a toggle.
///
/// None of these mean "disabled": a toggle that cannot be evaluated fails
/// the request that asked for it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ToggleError {
    /// The toggle has no value in configuration. A deployment defect.
    #[error("Key not found in configuration: {key}")]
    ConfigurationMissing { key: String },

    #[error("Value of {key} is not a boolean: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("Toggle {0} is registered more than once")]
    DuplicateToggle(String),

    #[error("Toggle {0} is not registered")]
    UnknownToggle(String),
}

impl IntoResponse for ToggleError {
    fn into_response(self) -> Response {
        let status = match self {
            ToggleError::UnknownToggle(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("{}", self);
        }
        (status, self.to_string()).into_response()
    }
}
