//! Errors raised by the store primitives

use thiserror::Error;

/// Errors that can occur while building or dispatching to a store
#[derive(Error, Debug)]
pub enum ReduxError {
    #[error(
        "Dispatching while constructing your middleware is not allowed. \
         Other middleware would not be applied to this dispatch."
    )]
    ConstructionOrderViolation,

    #[error(
        "bindActionCreators expected an object or a function, instead received {received}. \
         Did you import a single export instead of the whole action creator namespace?"
    )]
    InvalidArgument { received: String },

    #[error("Reducers may not dispatch actions.")]
    ReducerDispatch,

    #[error("Actions must be plain objects. Use custom middleware for other action shapes.")]
    NonPlainAction,

    #[error("Dispatch was called after every handle to its store was dropped.")]
    StoreReleased,

    /// Only ever built and dropped by [`crate::warning`]
    #[error("{0}")]
    Warning(String),

    /// Failure raised by user supplied middleware, passed through unchanged
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
