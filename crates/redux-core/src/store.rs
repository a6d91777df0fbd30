use crate::action_types::ReservedAction;
use crate::dispatch::{Dispatch, DispatchResult};
use crate::error::ReduxError;
use crate::utils::warning;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Pure function computing the next state from the current state and an action
pub type Reducer<S, A> = Rc<dyn Fn(&S, &A) -> S>;

/// Reads a snapshot of the current state
pub type GetState<S> = Rc<dyn Fn() -> S>;

/// Builds a store from a reducer and its preloaded state
pub type StoreCreator<S, A> = Rc<dyn Fn(Reducer<S, A>, S) -> Result<Store<S, A>, ReduxError>>;

/// Wraps a store creator, keeping its signature while intercepting the store it builds
pub type StoreEnhancer<S, A> = Box<dyn FnOnce(StoreCreator<S, A>) -> StoreCreator<S, A>>;

type Listener = Rc<dyn Fn()>;

#[derive(Default)]
struct Listeners {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(u64, Listener)>>,
}

impl Listeners {
    fn add(&self, listener: Listener) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, listener));
        id
    }

    fn remove(&self, id: u64) {
        self.entries.borrow_mut().retain(|(entry_id, _)| *entry_id != id);
    }

    fn snapshot(&self) -> Vec<Listener> {
        self.entries
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect()
    }
}

struct StoreCore<S, A> {
    state: RefCell<S>,
    reducer: RefCell<Reducer<S, A>>,
    listeners: Rc<Listeners>,
    is_dispatching: Cell<bool>,
}

/// Clears the dispatching flag even if the reducer panics
struct DispatchingGuard<'a>(&'a Cell<bool>);

impl Drop for DispatchingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<S, A> StoreCore<S, A> {
    fn dispatch(&self, action: A) -> DispatchResult<A> {
        if self.is_dispatching.get() {
            return Err(ReduxError::ReducerDispatch);
        }

        {
            self.is_dispatching.set(true);
            let _guard = DispatchingGuard(&self.is_dispatching);
            let reducer = Rc::clone(&self.reducer.borrow());
            let next = {
                let current = self.state.borrow();
                reducer(&*current, &action)
            };
            *self.state.borrow_mut() = next;
        }

        for listener in self.listeners.snapshot() {
            listener();
        }

        Ok(action)
    }
}

/// Store - holds the state tree and the dispatch function that updates it
///
/// Cloning a store is a shallow copy: clones share state, reducer and
/// listeners. [`Store::with_dispatch`] makes such a copy with a different
/// dispatch, which is how enhancers layer behavior onto a store.
pub struct Store<S, A> {
    core: Rc<StoreCore<S, A>>,
    dispatch: Dispatch<A>,
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            core: Rc::clone(&self.core),
            dispatch: self.dispatch.clone(),
        }
    }
}

impl<S: Clone + 'static, A: 'static> Store<S, A> {
    /// Get a snapshot of the current state
    pub fn get_state(&self) -> S {
        self.core.state.borrow().clone()
    }

    /// Get a state reader that can outlive this handle
    pub fn state_getter(&self) -> GetState<S> {
        let core = Rc::clone(&self.core);
        Rc::new(move || core.state.borrow().clone())
    }

    /// Dispatch an action through whatever dispatch this store carries
    pub fn dispatch(&self, action: A) -> DispatchResult<A> {
        self.dispatch.call(action)
    }

    /// Get the dispatch handle
    pub fn dispatcher(&self) -> Dispatch<A> {
        self.dispatch.clone()
    }

    /// Shallow copy of this store with its dispatch replaced
    pub fn with_dispatch(&self, dispatch: Dispatch<A>) -> Self {
        Self {
            core: Rc::clone(&self.core),
            dispatch,
        }
    }

    /// Register a listener called after every reduced action
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + 'static,
    {
        let id = self.core.listeners.add(Rc::new(listener));
        Subscription {
            listeners: Rc::downgrade(&self.core.listeners),
            id,
            active: Cell::new(true),
        }
    }

    /// Swap the reducer and announce it with the REPLACE action
    pub fn replace_reducer(&self, reducer: Reducer<S, A>) -> Result<(), ReduxError>
    where
        A: From<ReservedAction>,
    {
        *self.core.reducer.borrow_mut() = reducer;
        self.core.dispatch(ReservedAction::Replace.into())?;
        Ok(())
    }
}

/// Handle returned by [`Store::subscribe`]
pub struct Subscription {
    listeners: Weak<Listeners>,
    id: u64,
    active: Cell<bool>,
}

impl Subscription {
    pub fn unsubscribe(&self) {
        if !self.active.replace(false) {
            warning("Listener was already unsubscribed from the store.");
            return;
        }

        if let Some(listeners) = self.listeners.upgrade() {
            listeners.remove(self.id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

/// Create a store and seed its state with the INIT action
pub fn create_store<S, A>(reducer: Reducer<S, A>, preloaded_state: S) -> Result<Store<S, A>, ReduxError>
where
    S: Clone + 'static,
    A: From<ReservedAction> + 'static,
{
    let core = Rc::new(StoreCore {
        state: RefCell::new(preloaded_state),
        reducer: RefCell::new(reducer),
        listeners: Rc::new(Listeners::default()),
        is_dispatching: Cell::new(false),
    });

    let dispatch = {
        let core = Rc::clone(&core);
        Dispatch::new(move |action| core.dispatch(action))
    };

    let store = Store { core, dispatch };
    store.dispatch(ReservedAction::Init.into())?;
    log::debug!("Store created");

    Ok(store)
}

/// [`create_store`] as a [`StoreCreator`], the input every enhancer wraps
pub fn base_creator<S, A>() -> StoreCreator<S, A>
where
    S: Clone + 'static,
    A: From<ReservedAction> + 'static,
{
    Rc::new(create_store::<S, A>)
}

/// Create a store through an enhancer
pub fn create_store_enhanced<S, A>(
    reducer: Reducer<S, A>,
    preloaded_state: S,
    enhancer: StoreEnhancer<S, A>,
) -> Result<Store<S, A>, ReduxError>
where
    S: Clone + 'static,
    A: From<ReservedAction> + 'static,
{
    let create = enhancer(base_creator());
    create(reducer, preloaded_state)
}
