//! Dispatch handle
//!
//! A `Dispatch` is the function that submits an action for processing. It is a
//! cheap, cloneable handle: middleware capture it, stores hand it out, and the
//! middleware chain wraps one `Dispatch` inside another.

use crate::error::ReduxError;
use std::fmt;
use std::rc::Rc;

/// Result of dispatching an action; usually the action itself
pub type DispatchResult<A> = Result<A, ReduxError>;

/// Cloneable handle to a dispatch function
pub struct Dispatch<A> {
    inner: Rc<dyn Fn(A) -> DispatchResult<A>>,
}

impl<A> Dispatch<A> {
    /// Wrap a function as a dispatch handle
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(A) -> DispatchResult<A> + 'static,
    {
        Self { inner: Rc::new(f) }
    }

    /// Submit an action
    pub fn call(&self, action: A) -> DispatchResult<A> {
        (self.inner)(action)
    }

    /// Whether both handles point at the same underlying function
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&a.inner), Rc::as_ptr(&b.inner))
    }
}

impl<A> Clone for Dispatch<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A> fmt::Debug for Dispatch<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatch")
            .field("ptr", &Rc::as_ptr(&self.inner).cast::<()>())
            .finish()
    }
}
