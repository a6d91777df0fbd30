//! Counter state, reducer and action creators

use redux_core::{is_reserved_type, ActionCreators, AnyAction, CreatorEntry, Reducer};
use std::rc::Rc;

pub const INCREMENT: &str = "counter/increment";
pub const DECREMENT: &str = "counter/decrement";
pub const ADD: &str = "counter/add";
pub const RESET: &str = "counter/reset";
pub const DOUBLE: &str = "counter/double";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CounterState {
    pub value: i64,
    /// Number of counter actions the reducer has applied
    pub applied: usize,
}

/// Amount carried by an "add" action, 1 if absent
pub fn amount(action: &AnyAction) -> i64 {
    action.get("amount").and_then(|v| v.as_i64()).unwrap_or(1)
}

fn reduce(state: &CounterState, action: &AnyAction) -> CounterState {
    let value = match action.action_type.as_str() {
        INCREMENT => state.value + 1,
        DECREMENT => state.value - 1,
        ADD => state.value + amount(action),
        RESET => 0,
        other => {
            if is_reserved_type(other) {
                log::trace!("Reserved action {}", other);
            }
            return state.clone();
        }
    };

    CounterState {
        value,
        applied: state.applied + 1,
    }
}

pub fn reducer() -> Reducer<CounterState, AnyAction> {
    Rc::new(reduce)
}

/// Action creators keyed by the names used in the script
///
/// "VERSION" is not a creator and is dropped when binding.
pub fn action_creators() -> ActionCreators<Option<i64>, AnyAction> {
    ActionCreators::mapping([
        ("increment", CreatorEntry::creator(|_: Option<i64>| AnyAction::new(INCREMENT))),
        ("decrement", CreatorEntry::creator(|_: Option<i64>| AnyAction::new(DECREMENT))),
        (
            "add",
            CreatorEntry::creator(|amount: Option<i64>| {
                AnyAction::new(ADD).with("amount", amount.unwrap_or(1))
            }),
        ),
        ("reset", CreatorEntry::creator(|_: Option<i64>| AnyAction::new(RESET))),
        ("double", CreatorEntry::creator(|_: Option<i64>| AnyAction::new(DOUBLE))),
        ("VERSION", CreatorEntry::value(1)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use redux_core::{bind_action_creators, create_store, ReservedAction};

    #[test]
    fn test_reducer_applies_counter_actions() {
        let state = CounterState::default();
        let state = reduce(&state, &AnyAction::new(INCREMENT));
        let state = reduce(&state, &AnyAction::new(ADD).with("amount", 4));
        let state = reduce(&state, &AnyAction::new(DECREMENT));

        assert_eq!(
            state,
            CounterState {
                value: 4,
                applied: 3
            }
        );
        assert_eq!(reduce(&state, &AnyAction::new(RESET)).value, 0);
    }

    #[test]
    fn test_reducer_ignores_unknown_actions() {
        let state = CounterState {
            value: 7,
            applied: 2,
        };

        assert_eq!(reduce(&state, &AnyAction::from(ReservedAction::probe())), state);
        assert_eq!(reduce(&state, &AnyAction::new("todos/add")), state);
        // DOUBLE is expanded by middleware, never reduced
        assert_eq!(reduce(&state, &AnyAction::new(DOUBLE)), state);
    }

    #[test]
    fn test_bound_creators() {
        let store = create_store(reducer(), CounterState::default()).unwrap();
        let creators = bind_action_creators(action_creators(), &store.dispatcher()).unwrap();

        assert_eq!(
            creators.keys(),
            vec!["add", "decrement", "double", "increment", "reset"]
        );
        creators.get("add").unwrap().call(Some(3)).unwrap();
        creators.get("increment").unwrap().call(None).unwrap();

        assert_eq!(store.get_state().value, 4);
    }
}
