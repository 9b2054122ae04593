use dioxus::prelude::*;

use crate::{config::LazyPageConfig, helper_hooks::prelude::NavigationStateCell};

/// Shares a [LazyPageConfig] and a navigation state cell with every lazy page below it.
///
/// The config is read once, when the provider mounts.
///
/// Place it above the `Router`:
///
/// ```rust,ignore
/// rsx! {
///     LazyPageProvider { config: LazyPageConfig::default().with_loading(Spinner),
///         Router::<Route> {}
///     }
/// }
/// ```
#[component]
pub fn LazyPageProvider(#[props(default)] config: LazyPageConfig, children: Element) -> Element {
    log::debug!("LazyPageProvider Rendered");

    use_context_provider(|| config);
    use_context_provider(NavigationStateCell::new);

    rsx! {
        {children}
    }
}
