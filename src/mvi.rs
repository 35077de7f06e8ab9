//! Unidirectional state flow for the console.
//!
//! Polled snapshots and local actions enter a [`Store`] as intents. The
//! store's reducer folds each one into the next state, and views are
//! projected from whatever the store currently holds.

use std::fmt;

/// Something that can move a [`Store`]: an observed fact or a local action.
pub trait Intent: fmt::Debug + Send + 'static {}

/// What a [`Store`] holds. `Default` is the state before anything was observed.
pub trait UiState: Clone + PartialEq + Default + fmt::Debug + Send + 'static {}

/// Pure transition function: `(State, Intent) -> State`.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}

/// Single owner of a reducer's state.
pub struct Store<R: Reducer> {
    state: R::State,
}

impl<R: Reducer> Store<R> {
    pub fn new() -> Self {
        Self {
            state: R::State::default(),
        }
    }

    pub fn state(&self) -> &R::State {
        &self.state
    }

    pub fn dispatch(&mut self, intent: R::Intent) {
        tracing::trace!(?intent, "Dispatching intent");
        self.state = R::reduce(std::mem::take(&mut self.state), intent);
    }
}

impl<R: Reducer> Default for Store<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Reducer> fmt::Debug for Store<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store").field("state", &self.state).finish()
    }
}
