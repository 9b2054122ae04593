use dioxus::prelude::*;

use crate::components::placeholders::{
    DefaultErrorPlaceholder, DefaultLoadingPlaceholder, ErrorPlaceholderProps,
};

/// When a mounted lazy page runs its initial props resolver again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReloadPolicy {
    /// One load per mount, route changes reusing the instance are ignored
    #[default]
    Once,
    /// Re-run the resolver (not the factory) whenever the route parameters or location change
    OnRouteChange,
}

impl ReloadPolicy {
    pub fn reloads_on_route_change(self) -> bool {
        matches!(self, ReloadPolicy::OnRouteChange)
    }
}

/// Placeholders and policies shared by every lazy page below a
/// [LazyPageProvider](crate::components::LazyPageProvider).
#[derive(Clone, Copy)]
pub struct LazyPageConfig {
    pub loading: fn() -> Element,
    pub error: Component<ErrorPlaceholderProps>,
    pub reload: ReloadPolicy,
}

impl Default for LazyPageConfig {
    fn default() -> Self {
        Self {
            loading: DefaultLoadingPlaceholder,
            error: DefaultErrorPlaceholder,
            reload: ReloadPolicy::default(),
        }
    }
}

impl LazyPageConfig {
    pub fn with_loading(mut self, loading: fn() -> Element) -> Self {
        self.loading = loading;
        self
    }

    pub fn with_error(mut self, error: Component<ErrorPlaceholderProps>) -> Self {
        self.error = error;
        self
    }

    pub fn with_reload(mut self, reload: ReloadPolicy) -> Self {
        self.reload = reload;
        self
    }
}

impl PartialEq for LazyPageConfig {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::fn_addr_eq(self.loading, other.loading)
            && core::ptr::fn_addr_eq(self.error, other.error)
            && self.reload == other.reload
    }
}

impl core::fmt::Debug for LazyPageConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LazyPageConfig")
            .field("reload", &self.reload)
            .finish_non_exhaustive()
    }
}

/// Config of the closest [LazyPageProvider](crate::components::LazyPageProvider),
/// or the default one
pub fn use_lazy_page_config() -> LazyPageConfig {
    try_use_context::<LazyPageConfig>().unwrap_or_default()
}

/// Initializes `env_logger`, filtering at `warn` unless `RUST_LOG` says otherwise
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_micros()
        .init();
}
