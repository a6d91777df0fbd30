//! Store enhancer that installs a middleware chain

use super::{Middleware, MiddlewareApi};
use crate::compose::compose;
use crate::dispatch::Dispatch;
use crate::error::ReduxError;
use crate::store::{Reducer, Store, StoreCreator, StoreEnhancer};
use std::cell::RefCell;
use std::rc::Rc;

enum SlotState<A> {
    Unbound,
    Bound(Dispatch<A>),
}

/// Holds the store's final dispatch while the middleware chain is built
///
/// Middleware receive a forwarder that looks the slot up on every call.
/// Until [`DispatchSlot::finalize`] binds the composed dispatch, calling the
/// forwarder fails with [`ReduxError::ConstructionOrderViolation`].
pub struct DispatchSlot<A> {
    state: Rc<RefCell<SlotState<A>>>,
}

impl<A: 'static> DispatchSlot<A> {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(SlotState::Unbound)),
        }
    }

    fn current(state: &RefCell<SlotState<A>>) -> Result<Dispatch<A>, ReduxError> {
        match &*state.borrow() {
            SlotState::Unbound => Err(ReduxError::ConstructionOrderViolation),
            SlotState::Bound(dispatch) => Ok(dispatch.clone()),
        }
    }

    /// Dispatch that always routes through the slot's current value
    ///
    /// Only holds the slot weakly; the dispatch returned by `finalize` owns it.
    pub fn forwarder(&self) -> Dispatch<A> {
        let state = Rc::downgrade(&self.state);
        Dispatch::new(move |action| {
            let state = state.upgrade().ok_or(ReduxError::StoreReleased)?;
            let dispatch = Self::current(&state)?;
            dispatch.call(action)
        })
    }

    /// Bind the final dispatch. Consumes the slot, so it can only happen once.
    pub fn finalize(self, dispatch: Dispatch<A>) -> Dispatch<A> {
        *self.state.borrow_mut() = SlotState::Bound(dispatch);
        let state = self.state;
        Dispatch::new(move |action| Self::current(&state)?.call(action))
    }
}

impl<A: 'static> Default for DispatchSlot<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a store enhancer that applies middleware to the store's dispatch.
///
/// Each middleware gets `get_state` and `dispatch` through its
/// [`MiddlewareApi`]. The first middleware in the list is the outermost one;
/// the last one forwards to the store's own dispatch. With no middleware the
/// store's dispatch is used unchanged.
pub fn apply_middleware<S, A>(middlewares: Vec<Box<dyn Middleware<S, A>>>) -> StoreEnhancer<S, A>
where
    S: Clone + 'static,
    A: 'static,
{
    let middlewares = Rc::new(middlewares);

    Box::new(move |create: StoreCreator<S, A>| {
        let creator: StoreCreator<S, A> =
            Rc::new(move |reducer: Reducer<S, A>, preloaded_state: S| -> Result<Store<S, A>, ReduxError> {
                let store = create(reducer, preloaded_state)?;

                let slot = DispatchSlot::new();
                let api = MiddlewareApi::new(store.state_getter(), slot.forwarder());

                let chain = middlewares
                    .iter()
                    .map(|middleware| middleware.attach(api.clone()))
                    .collect::<Result<Vec<_>, _>>()?;
                log::debug!("Applying {} middleware", chain.len());

                let dispatch = compose(chain)(store.dispatcher());
                Ok(store.with_dispatch(slot.finalize(dispatch)))
            });
        creator
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::AnyAction;
    use crate::compose::Unary;
    use crate::middleware::{from_fn, link};
    use crate::store::{create_store, create_store_enhanced};
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    type Log = Rc<RefCell<Vec<String>>>;

    fn counter() -> Reducer<i64, AnyAction> {
        Rc::new(|state: &i64, action: &AnyAction| {
            match action.action_type.as_str() {
                "counter/increment" => state + 1,
                "counter/add" => {
                    state + action.get("amount").and_then(|v| v.as_i64()).unwrap_or(0)
                }
                _ => *state,
            }
        })
    }

    /// Middleware that records entry and forwards
    fn tracer(name: String, log: Log) -> Box<dyn Middleware<i64, AnyAction>> {
        from_fn(move |_api: MiddlewareApi<i64, AnyAction>| {
            let name = name.clone();
            let log = Rc::clone(&log);
            Ok(link(move |next: Dispatch<AnyAction>| {
                Dispatch::new(move |action: AnyAction| {
                    log.borrow_mut().push(name.clone());
                    next.call(action)
                })
            }))
        })
    }

    /// Middleware that records entry and never calls next
    fn swallower(log: Log) -> Box<dyn Middleware<i64, AnyAction>> {
        from_fn(move |_api: MiddlewareApi<i64, AnyAction>| {
            let log = Rc::clone(&log);
            Ok(link(move |_next: Dispatch<AnyAction>| {
                Dispatch::new(move |action: AnyAction| {
                    log.borrow_mut().push("swallow".to_string());
                    Ok(action)
                })
            }))
        })
    }

    fn build(middlewares: Vec<Box<dyn Middleware<i64, AnyAction>>>) -> Store<i64, AnyAction> {
        create_store_enhanced(counter(), 0, apply_middleware(middlewares)).unwrap()
    }

    #[test]
    fn test_action_reaches_reducer_through_every_chain_length() {
        for n in 0..=5 {
            let log: Log = Rc::new(RefCell::new(Vec::new()));
            let middlewares = (0..n).map(|i| tracer(format!("m{i}"), Rc::clone(&log))).collect();
            let store = build(middlewares);

            store.dispatch(AnyAction::new("counter/increment")).unwrap();

            let expected: Vec<String> = (0..n).map(|i| format!("m{i}")).collect();
            assert_eq!(*log.borrow(), expected, "chain of {n}");
            assert_eq!(store.get_state(), 1, "chain of {n}");
        }
    }

    #[test]
    fn test_swallowing_middleware_stops_the_chain() {
        for position in 0..3 {
            let log: Log = Rc::new(RefCell::new(Vec::new()));
            let mut middlewares: Vec<Box<dyn Middleware<i64, AnyAction>>> = (0..3)
                .map(|i| tracer(format!("m{i}"), Rc::clone(&log)))
                .collect();
            middlewares.insert(position, swallower(Rc::clone(&log)));
            let store = build(middlewares);

            store.dispatch(AnyAction::new("counter/increment")).unwrap();

            let mut expected: Vec<String> = (0..position).map(|i| format!("m{i}")).collect();
            expected.push("swallow".to_string());
            assert_eq!(*log.borrow(), expected);
            assert_eq!(store.get_state(), 0);
        }
    }

    #[test]
    fn test_no_middleware_behaves_like_plain_store() {
        let plain = create_store(counter(), 0).unwrap();
        let enhanced = build(Vec::new());

        for action in [
            AnyAction::new("counter/increment"),
            AnyAction::new("counter/add").with("amount", 4),
            AnyAction::new("unknown"),
        ] {
            let a = plain.dispatch(action.clone()).unwrap();
            let b = enhanced.dispatch(action).unwrap();
            assert_eq!(a, b);
            assert_eq!(plain.get_state(), enhanced.get_state());
        }
        assert_eq!(enhanced.get_state(), 5);
    }

    #[test]
    fn test_dispatch_during_construction_fails() {
        let eager = from_fn(|api: MiddlewareApi<i64, AnyAction>| {
            api.dispatch(AnyAction::new("counter/increment"))?;
            Ok(link(|next: Dispatch<AnyAction>| next))
        });

        let result = create_store_enhanced(counter(), 0, apply_middleware(vec![eager]));

        assert!(matches!(
            result,
            Err(ReduxError::ConstructionOrderViolation)
        ));
    }

    #[test]
    fn test_construction_error_is_reported_even_if_ignored() {
        let outcome: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&outcome);
        let careless = from_fn(move |api: MiddlewareApi<i64, AnyAction>| {
            if let Err(err) = api.dispatch(AnyAction::new("counter/increment")) {
                *sink.borrow_mut() = Some(err.to_string());
            }
            Ok(link(|next: Dispatch<AnyAction>| next))
        });

        let store = build(vec![careless]);

        assert_eq!(store.get_state(), 0);
        let message = outcome.borrow().clone().unwrap();
        assert!(message.starts_with("Dispatching while constructing your middleware"));
    }

    #[test]
    fn test_dispatch_from_handler_reenters_the_chain() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let doubler = from_fn(|api: MiddlewareApi<i64, AnyAction>| {
            Ok(link(move |next: Dispatch<AnyAction>| {
                Dispatch::new(move |action: AnyAction| {
                    if action.is("counter/double") {
                        api.dispatch(AnyAction::new("counter/increment"))?;
                        api.dispatch(AnyAction::new("counter/increment"))?;
                        return Ok(action);
                    }
                    next.call(action)
                })
            }))
        });
        let store = build(vec![tracer("outer".into(), Rc::clone(&log)), doubler]);

        store.dispatch(AnyAction::new("counter/double")).unwrap();

        assert_eq!(store.get_state(), 2);
        // Once for the original action, once per re-dispatched increment
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn test_api_get_state_sees_current_state() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let observer = from_fn(move |api: MiddlewareApi<i64, AnyAction>| {
            let sink = Rc::clone(&sink);
            Ok(link(move |next: Dispatch<AnyAction>| {
                Dispatch::new(move |action: AnyAction| {
                    let result = next.call(action);
                    sink.borrow_mut().push(api.get_state());
                    result
                })
            }))
        });
        let store = build(vec![observer]);

        store.dispatch(AnyAction::new("counter/increment")).unwrap();
        store.dispatch(AnyAction::new("counter/add").with("amount", 10)).unwrap();

        assert_eq!(*seen.borrow(), vec![1, 11]);
    }

    #[test]
    fn test_middleware_can_transform_result() {
        let stamper = from_fn(|_api: MiddlewareApi<i64, AnyAction>| {
            Ok(link(|next: Dispatch<AnyAction>| {
                Dispatch::new(move |action: AnyAction| {
                    next.call(action).map(|action| action.with("handled", true))
                })
            }))
        });
        let store = build(vec![stamper]);

        let action = store.dispatch(AnyAction::new("counter/increment")).unwrap();

        assert_eq!(action.get("handled"), Some(&serde_json::json!(true)));
    }

    #[test]
    fn test_middleware_errors_propagate_unchanged() {
        let failing = from_fn(|_api: MiddlewareApi<i64, AnyAction>| {
            Ok(link(|_next: Dispatch<AnyAction>| {
                Dispatch::new(|_action: AnyAction| Err(anyhow::anyhow!("rate limited").into()))
            }))
        });
        let store = build(vec![failing]);

        let err = store.dispatch(AnyAction::new("counter/increment")).unwrap_err();

        assert!(matches!(err, ReduxError::Other(_)));
        assert_eq!(err.to_string(), "rate limited");
        assert_eq!(store.get_state(), 0);
    }

    #[test]
    fn test_attach_runs_once_per_store() {
        let attached = Rc::new(Cell::new(0));
        let count = Rc::clone(&attached);
        let counting = from_fn(move |_api: MiddlewareApi<i64, AnyAction>| {
            count.set(count.get() + 1);
            Ok(link(|next: Dispatch<AnyAction>| next))
        });
        let create = apply_middleware(vec![counting])(crate::store::base_creator());

        let first = create(counter(), 0).unwrap();
        let second = create(counter(), 10).unwrap();
        first.dispatch(AnyAction::new("counter/increment")).unwrap();

        assert_eq!(attached.get(), 2);
        assert_eq!(first.get_state(), 1);
        assert_eq!(second.get_state(), 10);
    }

    #[test]
    fn test_enhancers_compose() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let outer = apply_middleware(vec![tracer("outer".into(), Rc::clone(&log))]);
        let inner = apply_middleware(vec![tracer("inner".into(), Rc::clone(&log))]);
        let enhancer: Unary<StoreCreator<i64, AnyAction>> = crate::compose::compose(vec![outer, inner]);

        let store = create_store_enhanced(counter(), 0, enhancer).unwrap();
        store.dispatch(AnyAction::new("counter/increment")).unwrap();

        assert_eq!(*log.borrow(), vec!["outer".to_string(), "inner".to_string()]);
        assert_eq!(store.get_state(), 1);
    }

    #[test]
    fn test_slot_forwarder_before_and_after_finalize() {
        let slot = DispatchSlot::new();
        let forwarder = slot.forwarder();

        assert!(matches!(
            forwarder.call(1u32),
            Err(ReduxError::ConstructionOrderViolation)
        ));

        let dispatch = slot.finalize(Dispatch::new(|action: u32| Ok(action + 1)));

        assert_eq!(forwarder.call(1).unwrap(), 2);
        assert_eq!(dispatch.call(2).unwrap(), 3);

        drop(dispatch);
        assert!(matches!(forwarder.call(1), Err(ReduxError::StoreReleased)));
    }
}
