//! Binding action creators to a dispatch
//!
//! Turns action creators into functions that dispatch what they create, so
//! they can be called directly. This is only a convenience: calling
//! `dispatch.call(creator(args))` yourself works just as well.

use crate::dispatch::{Dispatch, DispatchResult};
use crate::error::ReduxError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Builds an action from its arguments (use a tuple for several)
pub type ActionCreator<Args, A> = Rc<dyn Fn(Args) -> A>;

/// A value found in a creator mapping
pub enum CreatorEntry<Args, A> {
    Creator(ActionCreator<Args, A>),
    /// Anything that is not callable, e.g. a constant exported next to the creators
    Value(Value),
}

impl<Args, A> CreatorEntry<Args, A> {
    pub fn creator<F>(f: F) -> Self
    where
        F: Fn(Args) -> A + 'static,
    {
        Self::Creator(Rc::new(f))
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }
}

/// What can be handed to [`bind_action_creators`]
pub enum ActionCreators<Args, A> {
    Callable(ActionCreator<Args, A>),
    Mapping(BTreeMap<String, CreatorEntry<Args, A>>),
    /// Neither callable nor a mapping; `None` stands for a missing value
    Invalid(Option<Value>),
}

impl<Args, A> ActionCreators<Args, A> {
    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(Args) -> A + 'static,
    {
        Self::Callable(Rc::new(f))
    }

    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, CreatorEntry<Args, A>)>,
    {
        Self::Mapping(
            entries
                .into_iter()
                .map(|(key, entry)| (key.into(), entry))
                .collect(),
        )
    }
}

/// JSON objects and arrays become mappings of plain values (arrays keyed by
/// index); every other JSON value is invalid input.
impl<Args, A> From<Value> for ActionCreators<Args, A> {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::mapping(
                map.into_iter()
                    .map(|(key, value)| (key, CreatorEntry::Value(value))),
            ),
            Value::Array(items) => Self::mapping(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, value)| (index.to_string(), CreatorEntry::Value(value))),
            ),
            other => Self::Invalid(Some(other)),
        }
    }
}

/// An action creator whose result is dispatched on every call
pub struct BoundActionCreator<Args, A> {
    creator: ActionCreator<Args, A>,
    dispatch: Dispatch<A>,
}

impl<Args, A> BoundActionCreator<Args, A> {
    /// Create the action and dispatch it, returning what dispatch returns
    pub fn call(&self, args: Args) -> DispatchResult<A> {
        self.dispatch.call((self.creator)(args))
    }
}

impl<Args, A> Clone for BoundActionCreator<Args, A> {
    fn clone(&self) -> Self {
        Self {
            creator: Rc::clone(&self.creator),
            dispatch: self.dispatch.clone(),
        }
    }
}

/// Result of [`bind_action_creators`], mirroring the shape of its input
pub enum BoundActionCreators<Args, A> {
    Single(BoundActionCreator<Args, A>),
    Mapping(BTreeMap<String, BoundActionCreator<Args, A>>),
}

impl<Args, A> BoundActionCreators<Args, A> {
    /// The bound creator, if a single creator was bound
    pub fn single(&self) -> Option<&BoundActionCreator<Args, A>> {
        match self {
            Self::Single(bound) => Some(bound),
            Self::Mapping(_) => None,
        }
    }

    /// The bound creator under `key`, if a mapping was bound
    pub fn get(&self, key: &str) -> Option<&BoundActionCreator<Args, A>> {
        match self {
            Self::Single(_) => None,
            Self::Mapping(bound) => bound.get(key),
        }
    }

    /// Keys of a bound mapping, in order; empty for a single creator
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Self::Single(_) => Vec::new(),
            Self::Mapping(bound) => bound.keys().map(String::as_str).collect(),
        }
    }
}

/// Bind a single action creator
pub fn bind_action_creator<Args, A>(
    creator: ActionCreator<Args, A>,
    dispatch: &Dispatch<A>,
) -> BoundActionCreator<Args, A> {
    BoundActionCreator {
        creator,
        dispatch: dispatch.clone(),
    }
}

/// Bind a creator, or every creator of a mapping, to `dispatch`.
///
/// Mapping entries that are not creators are left out of the result.
pub fn bind_action_creators<Args, A>(
    action_creators: ActionCreators<Args, A>,
    dispatch: &Dispatch<A>,
) -> Result<BoundActionCreators<Args, A>, ReduxError> {
    match action_creators {
        ActionCreators::Callable(creator) => Ok(BoundActionCreators::Single(
            bind_action_creator(creator, dispatch),
        )),
        ActionCreators::Mapping(entries) => {
            let bound: BTreeMap<_, _> = entries
                .into_iter()
                .filter_map(|(key, entry)| match entry {
                    CreatorEntry::Creator(creator) => {
                        Some((key, bind_action_creator(creator, dispatch)))
                    }
                    CreatorEntry::Value(_) => None,
                })
                .collect();
            log::trace!("Bound {} action creators", bound.len());
            Ok(BoundActionCreators::Mapping(bound))
        }
        ActionCreators::Invalid(value) => Err(ReduxError::InvalidArgument {
            received: received_type(value.as_ref()).to_string(),
        }),
    }
}

fn received_type(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_) | Value::Object(_)) => "object",
    }
}
