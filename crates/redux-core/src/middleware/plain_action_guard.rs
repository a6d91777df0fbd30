//! PlainActionGuard - only lets plain object actions through

use super::{link, ChainLink, Middleware, MiddlewareApi};
use crate::dispatch::Dispatch;
use crate::error::ReduxError;
use crate::utils::is_plain_object;
use serde::Serialize;

/// Rejects actions that are not plain objects
///
/// Place it after any middleware that turns other action shapes into plain
/// ones, so it sits closest to the store.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainActionGuard;

impl<S, A> Middleware<S, A> for PlainActionGuard
where
    A: Serialize + 'static,
{
    fn attach(&self, _api: MiddlewareApi<S, A>) -> Result<ChainLink<A>, ReduxError> {
        Ok(link(|next: Dispatch<A>| {
            Dispatch::new(move |action: A| {
                if !is_plain_object(&action) {
                    return Err(ReduxError::NonPlainAction);
                }
                next.call(action)
            })
        }))
    }
}
