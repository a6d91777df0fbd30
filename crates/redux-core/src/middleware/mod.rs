//! Middleware system
//!
//! Middleware sits between `dispatch` and the reducer. It can inspect,
//! delay, transform or swallow actions, and dispatch new ones.
//!
//! ## Design
//!
//! ```text
//! dispatch(action) → first middleware → … → last middleware → store dispatch → reducer
//! ```
//!
//! A middleware has three levels:
//!
//! 1. [`Middleware::attach`] runs once per store while the chain is being
//!    built. It receives the [`MiddlewareApi`] (`get_state` + `dispatch`).
//!    Dispatching here is an error: the chain does not exist yet.
//! 2. The returned [`ChainLink`] receives `next`, the dispatch of the
//!    middleware after it (or the store's own dispatch for the last one).
//! 3. The [`Dispatch`] built by the link handles each action. Calling `next`
//!    forwards the action down the chain; calling the API's `dispatch` sends
//!    a new action through the whole chain again.
//!
//! ## Example
//!
//! ```rust
//! use redux_core::{from_fn, link, AnyAction, Dispatch, Middleware, MiddlewareApi};
//!
//! let logger: Box<dyn Middleware<i64, AnyAction>> = from_fn(|api: MiddlewareApi<i64, AnyAction>| {
//!     Ok(link(move |next: Dispatch<AnyAction>| {
//!         Dispatch::new(move |action: AnyAction| {
//!             log::debug!("Action: {:?} (state {})", action, api.get_state());
//!             next.call(action)
//!         })
//!     }))
//! });
//! ```

use crate::dispatch::{Dispatch, DispatchResult};
use crate::error::ReduxError;
use crate::store::GetState;

mod apply;
mod logging;
mod plain_action_guard;

pub use apply::{apply_middleware, DispatchSlot};
pub use logging::LoggingMiddleware;
pub use plain_action_guard::PlainActionGuard;

/// Turns the next dispatch in the chain into this middleware's dispatch
pub type ChainLink<A> = Box<dyn FnOnce(Dispatch<A>) -> Dispatch<A>>;

/// The slice of the store a middleware gets to see
pub struct MiddlewareApi<S, A> {
    get_state: GetState<S>,
    dispatch: Dispatch<A>,
}

impl<S, A> MiddlewareApi<S, A> {
    pub fn new(get_state: GetState<S>, dispatch: Dispatch<A>) -> Self {
        Self {
            get_state,
            dispatch,
        }
    }

    /// Current state of the store
    pub fn get_state(&self) -> S {
        (self.get_state)()
    }

    /// Send an action through the whole middleware chain
    pub fn dispatch(&self, action: A) -> DispatchResult<A> {
        self.dispatch.call(action)
    }

    /// The chain's dispatch as a handle, e.g. to hand to bound action creators
    pub fn dispatcher(&self) -> Dispatch<A> {
        self.dispatch.clone()
    }
}

impl<S, A> Clone for MiddlewareApi<S, A> {
    fn clone(&self) -> Self {
        Self {
            get_state: self.get_state.clone(),
            dispatch: self.dispatch.clone(),
        }
    }
}

/// Middleware trait - wraps the store's dispatch
///
/// `attach` is called once per store, in the order the middleware was
/// passed to [`apply_middleware`]. The first middleware ends up outermost:
/// it sees every action first.
pub trait Middleware<S, A> {
    /// Build this middleware's link of the chain
    ///
    /// Returning an error aborts store creation.
    fn attach(&self, api: MiddlewareApi<S, A>) -> Result<ChainLink<A>, ReduxError>;
}

impl<S, A, F> Middleware<S, A> for F
where
    F: Fn(MiddlewareApi<S, A>) -> Result<ChainLink<A>, ReduxError>,
{
    fn attach(&self, api: MiddlewareApi<S, A>) -> Result<ChainLink<A>, ReduxError> {
        self(api)
    }
}

/// Box a closure as a middleware
pub fn from_fn<S, A, F>(f: F) -> Box<dyn Middleware<S, A>>
where
    F: Fn(MiddlewareApi<S, A>) -> Result<ChainLink<A>, ReduxError> + 'static,
{
    Box::new(f)
}

/// Box a closure as a chain link
pub fn link<A, F>(f: F) -> ChainLink<A>
where
    F: FnOnce(Dispatch<A>) -> Dispatch<A> + 'static,
{
    Box::new(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_api_reads_state_and_forwards_dispatch() {
        let state = Rc::new(Cell::new(3));
        let reader = Rc::clone(&state);
        let api = MiddlewareApi::new(
            Rc::new(move || reader.get()),
            Dispatch::new(|action: u32| Ok(action + 1)),
        );

        assert_eq!(api.get_state(), 3);
        state.set(4);
        assert_eq!(api.clone().get_state(), 4);
        assert_eq!(api.dispatch(1).unwrap(), 2);
    }

    #[test]
    fn test_closures_are_middleware() {
        let middleware = from_fn(|_api: MiddlewareApi<(), u32>| {
            Ok(link(|next: Dispatch<u32>| {
                Dispatch::new(move |action: u32| next.call(action * 10))
            }))
        });
        let api = MiddlewareApi::new(Rc::new(|| ()), Dispatch::new(|action: u32| Ok(action)));

        let chain_link = middleware.attach(api).unwrap();
        let dispatch = chain_link(Dispatch::new(|action: u32| Ok(action + 1)));

        assert_eq!(dispatch.call(4).unwrap(), 41);
    }
}
