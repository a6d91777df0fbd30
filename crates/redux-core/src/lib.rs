//! Core primitives of a unidirectional state container
//!
//! This crate provides:
//! - [`apply_middleware`]: a store enhancer that wraps a store's dispatch in
//!   a chain of middleware
//! - [`bind_action_creators`]: turns action creators into functions that
//!   dispatch what they create
//! - [`is_plain_object`], [`warning`] and the reserved [`ActionTypes`]
//! - a minimal [`Store`] for enhancers to wrap, see [`create_store`]
//!
//! # Example
//!
//! ```
//! use redux_core::{
//!     apply_middleware, create_store_enhanced, AnyAction, LoggingMiddleware, Middleware,
//!     Reducer,
//! };
//! use std::rc::Rc;
//!
//! let reducer: Reducer<i64, AnyAction> = Rc::new(|state: &i64, action: &AnyAction| {
//!     if action.is("counter/increment") { state + 1 } else { *state }
//! });
//! let logging: Box<dyn Middleware<i64, AnyAction>> = Box::new(LoggingMiddleware::new());
//! let store = create_store_enhanced(reducer, 0, apply_middleware(vec![logging]))?;
//!
//! store.dispatch(AnyAction::new("counter/increment"))?;
//! assert_eq!(store.get_state(), 1);
//! # Ok::<(), redux_core::ReduxError>(())
//! ```

mod action_types;
mod actions;
mod bind_action_creators;
mod compose;
mod dispatch;
mod error;
mod middleware;
mod store;
mod utils;

pub use action_types::{is_reserved_type, ActionTypes, ReservedAction};
pub use actions::AnyAction;
pub use bind_action_creators::{
    bind_action_creator, bind_action_creators, ActionCreator, ActionCreators,
    BoundActionCreator, BoundActionCreators, CreatorEntry,
};
pub use compose::{compose, Unary};
pub use dispatch::{Dispatch, DispatchResult};
pub use error::ReduxError;
pub use middleware::{
    apply_middleware, from_fn, link, ChainLink, DispatchSlot, LoggingMiddleware, Middleware,
    MiddlewareApi, PlainActionGuard,
};
pub use store::{
    base_creator, create_store, create_store_enhanced, GetState, Reducer, Store, StoreCreator,
    StoreEnhancer, Subscription,
};
pub use utils::{is_plain_object, warning};
