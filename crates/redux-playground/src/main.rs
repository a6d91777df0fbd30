//! Scripted counter session
//!
//! Builds a store with the configured middleware, binds the counter's action
//! creators to it and plays the configured script step by step.

mod config;
mod counter;
mod logger;
mod middleware;

use config::PlaygroundConfig;
use counter::CounterState;
use redux_core::{apply_middleware, bind_action_creators, create_store_enhanced, warning};
use std::cell::Cell;
use std::rc::Rc;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = PlaygroundConfig::load();
    logger::init(&config.log_level);
    log::debug!("Config: {:?}", config);

    let middlewares = middleware::from_names(&config.middleware, config.max_step);
    let store = create_store_enhanced(
        counter::reducer(),
        CounterState::default(),
        apply_middleware(middlewares),
    )?;

    let changes = Rc::new(Cell::new(0usize));
    let subscription = {
        let changes = Rc::clone(&changes);
        store.subscribe(move || changes.set(changes.get() + 1))
    };

    let creators = bind_action_creators(counter::action_creators(), &store.dispatcher())?;

    for step in &config.script {
        let Some(creator) = creators.get(&step.action) else {
            warning(&format!("Unknown script action \"{}\", skipping", step.action));
            continue;
        };

        creator.call(step.amount)?;
        let amount = step.amount.map(|a| format!(" {a}")).unwrap_or_default();
        println!(
            "{:<12} -> {}",
            format!("{}{}", step.action, amount),
            store.get_state().value
        );
    }

    subscription.unsubscribe();

    let state = store.get_state();
    println!(
        "Final value: {} ({} actions applied, {} notifications)",
        state.value,
        state.applied,
        changes.get()
    );

    Ok(())
}
