use crate::{
    filter::{process::FilterError, validate::ValidateError},
    mapping::MappingError,
    model::ModelError,
    order::{OrderError, OrderValidateError},
    params::ParamError,
};
use sift_schema::path::PathError;
use thiserror::Error as ThisError;

///
/// Error
///
/// Crate-level aggregation of the module error types, for callers that
/// thread one error through route setup and request handling. Mapping and
/// validation errors are client-class; path errors are schema
/// inconsistencies and fatal; filter/order processing errors indicate a bug
/// in the validation schema and are likewise not recoverable per-request.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    OrderValidate(#[from] OrderValidateError),

    #[error(transparent)]
    Param(#[from] ParamError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Validate(#[from] ValidateError),
}

impl Error {
    /// Whether this error should surface as a client-visible 400-class
    /// response (as opposed to a server-side fault).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Mapping(_) | Self::OrderValidate(_) | Self::Param(_) | Self::Validate(_)
        )
    }
}
