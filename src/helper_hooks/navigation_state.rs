use dioxus::prelude::*;

use crate::{context::NavigationState, utils::CCStr};

/// State attached to a navigation, with the location it was attached for
#[derive(Debug, Clone, PartialEq)]
pub struct PendingNavigationState {
    pub target: CCStr,
    pub state: NavigationState,
}

/// The state attached to the navigation in progress, if any.
///
/// A redirect writes it right before navigating, the lazy page rendered at the target location
/// takes it. Any lazy page rendered at another location discards it.
/// Provided by [LazyPageProvider](crate::components::LazyPageProvider).
#[derive(Clone, Copy, PartialEq)]
pub struct NavigationStateCell(Signal<Option<PendingNavigationState>>);

impl NavigationStateCell {
    pub(crate) fn new() -> Self {
        Self(Signal::new(None))
    }

    pub fn peek(&self) -> Option<PendingNavigationState> {
        self.0.peek().clone()
    }

    /// The pending state, if it was attached for `location`
    pub fn peek_for(&self, location: &str) -> Option<NavigationState> {
        self.0
            .peek()
            .as_ref()
            .filter(|pending| &*pending.target == location)
            .map(|pending| pending.state.clone())
    }

    pub fn set(&mut self, pending: Option<PendingNavigationState>) {
        self.0.set(pending);
    }

    /// Empties the cell, returning what it held
    pub fn take(&mut self) -> Option<PendingNavigationState> {
        self.0.with_mut(Option::take)
    }
}

/// Cell of the closest provider, or a cell local to the calling component
pub fn use_navigation_state() -> NavigationStateCell {
    use_hook(|| {
        try_consume_context::<NavigationStateCell>().unwrap_or_else(NavigationStateCell::new)
    })
}

/// The navigation state of the current location, captured once per location.
///
/// The captured value stays stable while the calling component renders the same location.
/// The cell is cleared in an effect after every location change, whether its state was
/// meant for this location or is left over from an earlier navigation.
pub(crate) fn use_location_navigation_state(
    mut cell: NavigationStateCell,
    location: &str,
) -> Option<NavigationState> {
    let mut captured =
        use_hook(|| CopyValue::new((CCStr::from(location), cell.peek_for(location))));
    if &*captured.peek().0 != location {
        // Same instance, new location
        captured.set((CCStr::from(location), cell.peek_for(location)));
    }

    let location = location.to_owned();
    use_effect(use_reactive((&location,), move |(location,)| {
        if let Some(pending) = cell.take() {
            if &*pending.target == location {
                log::debug!("use_location_navigation_state({location}) - state consumed");
            } else {
                log::debug!(
                    "use_location_navigation_state({location}) - discarding state left for {}",
                    pending.target
                );
            }
        }
    }));

    let state = captured.peek().1.clone();
    state
}
