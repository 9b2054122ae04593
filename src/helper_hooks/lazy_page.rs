use dioxus::prelude::*;

use crate::{
    components::PageRoute,
    config::ReloadPolicy,
    context::PageContext,
    error::PageError,
    loader,
    page::{InitResult, LazyPage, PageModule, PageProps, Redirect, RedirectTarget},
    state::{LoadState, LoadedPage, Revision, Ticket},
    utils::CCStr,
};

use super::navigation_state::{
    use_location_navigation_state, use_navigation_state, NavigationStateCell,
    PendingNavigationState,
};

/// Drives the load of a lazy page for the calling component.
///
/// This is similar to a [Resource] that does not re-run reactively, specialized for pages:
/// 1. The factory runs at most once for the component instance and the load starts at mount
/// 2. The resolver gets a [PageContext] built from the current route
/// 3. A resolved redirect is followed in an effect, once per resolved state
/// 4. With [ReloadPolicy::OnRouteChange] a route change re-runs the resolver on the cached
///    module, including a change that happened while the factory was still running
///
/// The returned state is only written by the latest load, and never once the component is gone:
/// loads are tasks of the component scope and their completion checks its [Ticket].
pub fn use_lazy_page<P: PageProps, R: PageRoute>(
    page: LazyPage<P, R>,
    policy: ReloadPolicy,
) -> ReadOnlySignal<LoadState<P, R>> {
    let route = use_route::<R>();
    let cell = use_navigation_state();
    let navigation_state = use_location_navigation_state(cell, &route.to_string());
    let context = PageContext::from_route(route, navigation_state);

    let slots = PageSlots {
        state: use_signal(|| LoadState::Loading),
        revision: use_hook(|| CopyValue::new(Revision::default())),
        module: use_hook(|| CopyValue::new(None)),
        loaded_for: use_hook(|| CopyValue::new(context.clone())),
        latest: use_hook(|| CopyValue::new(context.clone())),
    };
    let mut latest = slots.latest;
    if *latest.peek() != context {
        latest.set(context.clone());
    }

    // Initial load, once per mount
    use_hook(|| {
        let mut revision = slots.revision;
        let ticket = revision.write().next();
        let context = context.clone();
        let mut module = slots.module;
        log::debug!("use_lazy_page({}) - initial load", context.location.path);
        spawn(async move {
            let result =
                loader::load_page(&page, context, |m| module.set(Some(m.clone()))).await;
            slots.commit(ticket, result);
            if !policy.reloads_on_route_change() {
                return;
            }
            // Route changes seen while the factory ran
            if let Some((ticket, cached, context)) = slots.begin_reload() {
                let result = loader::resolve_page(&cached, context).await;
                slots.commit(ticket, result);
            }
        });
    });

    use_effect(use_reactive((&context,), move |(_context,)| {
        if !policy.reloads_on_route_change() {
            return;
        }
        // Without a cached module the initial load catches up once the factory resolved
        if let Some((ticket, cached, context)) = slots.begin_reload() {
            spawn(async move {
                let result = loader::resolve_page(&cached, context).await;
                slots.commit(ticket, result);
            });
        }
    }));

    use_redirect(slots.state, cell);

    slots.state.into()
}

/// Per-instance storage of [use_lazy_page]
struct PageSlots<P: 'static, R: 'static> {
    state: Signal<LoadState<P, R>>,
    revision: CopyValue<Revision>,
    module: CopyValue<Option<PageModule<P, R>>>,
    /// Context of the load that was started last
    loaded_for: CopyValue<PageContext<R>>,
    /// Context of the last render
    latest: CopyValue<PageContext<R>>,
}

impl<P: 'static, R: 'static> Clone for PageSlots<P, R> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<P: 'static, R: 'static> Copy for PageSlots<P, R> {}

impl<P: PageProps, R: PageRoute> PageSlots<P, R> {
    /// Starts a resolver reload when the route moved since the last load and the module is cached
    fn begin_reload(mut self) -> Option<(Ticket, PageModule<P, R>, PageContext<R>)> {
        let context = self.latest.try_peek().ok()?.clone();
        if *self.loaded_for.try_peek().ok()? == context {
            return None;
        }
        let cached = self.module.try_peek().ok()?.clone()?;
        log::debug!(
            "use_lazy_page({}) - route changed, reloading",
            context.location.path
        );
        self.loaded_for.set(context.clone());
        let ticket = self.revision.write().next();
        self.state.set(LoadState::Loading);
        Some((ticket, cached, context))
    }

    fn commit(mut self, ticket: Ticket, result: Result<LoadedPage<P, R>, PageError>) {
        match self.revision.try_peek() {
            Ok(r) if r.is_current(ticket) => (),
            Ok(_) => {
                log::debug!("use_lazy_page - discarding the result of a superseded load");
                return;
            }
            Err(_) => {
                log::debug!("use_lazy_page - page dropped before its load finished");
                return;
            }
        }
        let next = LoadState::from(result);
        log::debug!("use_lazy_page - load finished: {:?}", next.phase());
        if let LoadState::Error(error) = &next {
            log::error!("{error}");
        }
        match self.state.try_write() {
            Ok(mut current) => *current = next,
            Err(e) => log::warn!("use_lazy_page - could not store the load result: {e}"),
        }
    }
}

/// Follows the redirect of a resolved page, once per resolved state
fn use_redirect<P: PageProps, R: PageRoute>(
    state: Signal<LoadState<P, R>>,
    cell: NavigationStateCell,
) {
    use_effect(move || {
        if let LoadState::Ready(LoadedPage {
            outcome: InitResult::Redirect(redirect),
            ..
        }) = &*state.read()
        {
            follow_redirect(redirect.clone(), cell);
        }
    });
}

fn follow_redirect<R: PageRoute>(redirect: Redirect<R>, mut cell: NavigationStateCell) {
    let Redirect { to, state } = redirect;
    let target = match &to {
        RedirectTarget::Route(route) => route.to_string(),
        // Normalized through the router so it compares with the rendered route
        RedirectTarget::Path(path) => path
            .parse::<R>()
            .map(|route| route.to_string())
            .unwrap_or_else(|_| path.to_string()),
    };
    cell.set(state.map(|state| PendingNavigationState {
        target: CCStr::from(target.as_str()),
        state,
    }));
    log::debug!("follow_redirect - to {target}");
    let failure = match to {
        RedirectTarget::Route(route) => navigator().replace(route),
        RedirectTarget::Path(path) => navigator().replace(path.to_string()),
    };
    if let Some(failure) = failure {
        crate::utils::log_error(format!("redirect failed: {failure:?}"));
    }
}
