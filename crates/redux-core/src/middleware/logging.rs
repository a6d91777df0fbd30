//! LoggingMiddleware - logs all actions for debugging

use super::{link, ChainLink, Middleware, MiddlewareApi};
use crate::dispatch::Dispatch;
use crate::error::ReduxError;
use std::fmt::Debug;

/// LoggingMiddleware - logs every action that passes through the chain
///
/// Actions are logged at debug level before they are forwarded, the state
/// that results from them at trace level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl<S, A> Middleware<S, A> for LoggingMiddleware
where
    S: Debug + 'static,
    A: Debug + 'static,
{
    fn attach(&self, api: MiddlewareApi<S, A>) -> Result<ChainLink<A>, ReduxError> {
        Ok(link(move |next: Dispatch<A>| {
            Dispatch::new(move |action: A| {
                log::debug!("Action: {:?}", action);
                let result = next.call(action);
                if let Err(e) = &result {
                    log::debug!("Dispatch failed: {}", e);
                }
                log::trace!("State: {:?}", api.get_state());
                result
            })
        }))
    }
}
