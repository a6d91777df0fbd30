//! Middleware used by the playground, selected by name from the config

use crate::counter::{self, CounterState};
use redux_core::{
    from_fn, link, warning, AnyAction, Dispatch, LoggingMiddleware, Middleware, MiddlewareApi,
    PlainActionGuard,
};

type CounterMiddleware = Box<dyn Middleware<CounterState, AnyAction>>;

/// Swallows "add" actions whose amount is larger than `max_step`
fn limit(max_step: i64) -> CounterMiddleware {
    from_fn(move |_api: MiddlewareApi<CounterState, AnyAction>| {
        Ok(link(move |next: Dispatch<AnyAction>| {
            Dispatch::new(move |action: AnyAction| {
                if action.is(counter::ADD) && counter::amount(&action) > max_step {
                    log::warn!(
                        "Dropping {} by {}: larger than {}",
                        action.action_type,
                        counter::amount(&action),
                        max_step
                    );
                    return Ok(action);
                }
                next.call(action)
            })
        }))
    })
}

/// Turns "double" into two increments sent through the whole chain
fn double() -> CounterMiddleware {
    from_fn(|api: MiddlewareApi<CounterState, AnyAction>| {
        Ok(link(move |next: Dispatch<AnyAction>| {
            Dispatch::new(move |action: AnyAction| {
                if !action.is(counter::DOUBLE) {
                    return next.call(action);
                }
                for _ in 0..2 {
                    api.dispatch(AnyAction::new(counter::INCREMENT))?;
                }
                Ok(action)
            })
        }))
    })
}

/// Build the middleware list in the configured order, skipping unknown names
pub fn from_names(names: &[String], max_step: i64) -> Vec<CounterMiddleware> {
    names
        .iter()
        .filter_map(|name| -> Option<CounterMiddleware> {
            match name.as_str() {
                "logging" => Some(Box::new(LoggingMiddleware::new())),
                "plain-guard" => Some(Box::new(PlainActionGuard)),
                "limit" => Some(limit(max_step)),
                "double" => Some(double()),
                unknown => {
                    warning(&format!("Unknown middleware \"{}\" in config, skipping", unknown));
                    None
                }
            }
        })
        .collect()
}
