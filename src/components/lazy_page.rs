use dioxus::prelude::*;
use serde::Serialize;

use crate::{
    config::use_lazy_page_config,
    helper_hooks::prelude::helper_hooks,
    page::{ContentComponent, InitResult, LazyPage, PageProps},
    state::{LoadState, LoadedPage},
};

/// Bound for the route enum of the router a lazy page lives in.
///
/// Route parameters are read from the route's serde representation, so route enums derive
/// `Serialize` in addition to `Routable`.
pub trait PageRoute: Routable + PartialEq + Serialize {}
impl<T: Routable + PartialEq + Serialize> PageRoute for T {}

/// Renders a [LazyPage] according to its load state.
///
/// - Loading: the configured loading placeholder
/// - Error: the configured error placeholder, given the error
/// - Ready with props: the page component with those props
/// - Ready with a redirect: nothing, the router navigates away
///
/// # Examples
///
/// ```rust,ignore
/// #[component]
/// fn ProfileView(name: String) -> Element {
///     let page = use_hook(pages::profile);
///     rsx! {
///         LazyPageView::<ProfileProps, Route> { page }
///     }
/// }
/// ```
#[component]
pub fn LazyPageView<P: PageProps, R: PageRoute>(page: LazyPage<P, R>) -> Element {
    log::debug!("LazyPageView Rendered");

    let config = use_lazy_page_config();
    let state = helper_hooks::use_lazy_page(page, config.reload);

    use_drop(|| log::debug!("LazyPageView Dropped"));

    #[allow(non_snake_case)]
    let LoadingPlaceholder = config.loading;
    #[allow(non_snake_case)]
    let ErrorPlaceholder = config.error;

    let current = state.read().clone();
    match current {
        LoadState::Loading => rsx! {
            LoadingPlaceholder {}
        },
        LoadState::Error(error) => rsx! {
            ErrorPlaceholder { error }
        },
        LoadState::Ready(LoadedPage {
            outcome: InitResult::Redirect(_),
            ..
        }) => rsx! {},
        LoadState::Ready(LoadedPage {
            content,
            outcome: InitResult::Props(page_props),
        }) => rsx! {
            PageContent::<P> { content, page_props }
        },
    }
}

/// Scope of the loaded page component, so its hooks never mix with the ones of [LazyPageView]
#[component]
fn PageContent<P: PageProps>(content: ContentComponent<P>, page_props: P) -> Element {
    content.render(page_props)
}
