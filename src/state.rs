use crate::{
    error::PageError,
    page::{ContentComponent, InitResult},
};

/// A loaded page module together with the outcome of its initial props resolver
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPage<P, R> {
    pub content: ContentComponent<P>,
    pub outcome: InitResult<P, R>,
}

/// The state of one lazy page instance.
///
/// `Loading` is initial. `Error` and `Ready` are terminal for a load: only a new load
/// (remount, or a route change under [ReloadPolicy::OnRouteChange](crate::config::ReloadPolicy))
/// brings the instance back to `Loading`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<P, R> {
    #[default]
    Loading,
    Error(PageError),
    Ready(LoadedPage<P, R>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Error,
    Success(Outcome),
}

/// How a successful load is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Render,
    Redirect,
}

impl<P, R> LoadState<P, R> {
    pub fn phase(&self) -> LoadPhase {
        match self {
            LoadState::Loading => LoadPhase::Loading,
            LoadState::Error(_) => LoadPhase::Error,
            LoadState::Ready(LoadedPage {
                outcome: InitResult::Props(_),
                ..
            }) => LoadPhase::Success(Outcome::Render),
            LoadState::Ready(LoadedPage {
                outcome: InitResult::Redirect(_),
                ..
            }) => LoadPhase::Success(Outcome::Redirect),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

impl<P, R> From<Result<LoadedPage<P, R>, PageError>> for LoadState<P, R> {
    fn from(value: Result<LoadedPage<P, R>, PageError>) -> Self {
        match value {
            Ok(page) => LoadState::Ready(page),
            Err(e) => LoadState::Error(e),
        }
    }
}

/// Identifies one load of a page instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Counter of the loads started by a page instance.
///
/// Only the completion holding the latest [Ticket] may write the state, so a load superseded
/// by a newer one cannot overwrite it.
#[derive(Debug, Default, Clone, Copy)]
pub struct Revision(u64);

impl Revision {
    pub fn next(&mut self) -> Ticket {
        self.0 += 1;
        Ticket(self.0)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.0 == ticket.0
    }
}
