//! # Lazy pages
//!
//! Router pages whose code and initial props are loaded asynchronously on first render.
//!
//! A page is described by a [PageModule](page::PageModule): the page component and an optional
//! initial props resolver computing its props (or a redirect) from the current route. A
//! [LazyPage](page::LazyPage) wraps a factory yielding that module, and
//! [LazyPageView](components::LazyPageView) renders it:
//!
//! - while the module and props load, a loading placeholder
//! - if anything fails, an error placeholder showing the error message
//! - once loaded, the page component with its props, or a navigation to the redirect target
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use lazy_page::prelude::*;
//!
//! #[derive(Clone, Routable, Debug, PartialEq, Serialize, Deserialize)]
//! enum Route {
//!     #[route("/user/:name")]
//!     UserView { name: String },
//! }
//!
//! #[component]
//! fn UserView(name: String) -> Element {
//!     let page = use_hook(|| {
//!         lazy_page(|| async {
//!             let module = PageModule::new(UserPage);
//!             Ok(module.with_initial_props(|ctx: PageContext<Route>| async move {
//!                 let name = ctx.params.get("name").unwrap_or_default().to_owned();
//!                 Ok(InitResult::Props(UserProps { name }))
//!             }))
//!         })
//!     });
//!     rsx! { LazyPageView::<UserProps, Route> { page } }
//! }
//! ```

pub mod components;
pub mod config;
pub mod context;
pub mod error;
mod helper_hooks;
pub mod loader;
pub mod page;
pub mod state;
pub mod utils;

/// Re-exports the types needed to declare and render lazy pages.
pub mod prelude {
    pub use super::components::placeholders::{
        DefaultErrorPlaceholder, DefaultLoadingPlaceholder, ErrorPlaceholderProps,
    };
    pub use super::components::{LazyPageProvider, LazyPageView, PageRoute};
    pub use super::config::{init_logging, use_lazy_page_config, LazyPageConfig, ReloadPolicy};
    pub use super::context::{Location, NavigationState, Params, PageContext};
    pub use super::error::{BoxError, Cause, PageError};
    pub use super::helper_hooks::prelude::*;
    pub use super::page::{
        lazy_page, ContentComponent, InitResult, LazyPage, PageModule, PageProps, Redirect,
        RedirectTarget,
    };
    pub use super::state::{LoadPhase, LoadState, LoadedPage, Outcome};
}
