#![windows_subsystem = "windows"]
mod pages;

use lazy_page::prelude::*;
use serde::{Deserialize, Serialize};

use dioxus::prelude::*;

#[derive(Clone, Routable, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[rustfmt::skip]
pub enum Route {
    #[route("/")]
    HomeView {},
    #[route("/users/:name")]
    UserView { name: String },
    #[route("/legacy/profile/:name")]
    LegacyProfileView { name: String },
    #[route("/broken")]
    BrokenView {},
    #[route("/:..route")]
    PageNotFound { route: Vec<String> },
}

static TITLE: &'static str = "Lazy pages";

#[allow(non_snake_case)]
fn App() -> Element {
    log::debug!("App reload");

    use_drop(|| log::debug!("App Dropped"));
    let page_config = LazyPageConfig::default().with_reload(ReloadPolicy::OnRouteChange);

    rsx! {
        document::Title { "{TITLE}" }
        div { id: "app", class: "text-base",
            LazyPageProvider { config: page_config,
                Router::<Route> {}
            }
        }
    }
}

#[component]
fn HomeView() -> Element {
    let page = use_hook(pages::home);
    rsx! {
        LazyPageView::<pages::HomeProps, Route> { page }
    }
}

#[component]
fn UserView(name: String) -> Element {
    log::debug!("UserView({name}) Rendered");
    let page = use_hook(pages::user);
    rsx! {
        LazyPageView::<pages::UserProps, Route> { page }
    }
}

#[component]
fn LegacyProfileView(name: String) -> Element {
    log::debug!("LegacyProfileView({name}) Rendered");
    let page = use_hook(pages::legacy_profile);
    rsx! {
        LazyPageView::<pages::UserProps, Route> { page }
    }
}

#[component]
fn BrokenView() -> Element {
    let page = use_hook(pages::broken);
    rsx! {
        LazyPageView::<pages::HomeProps, Route> { page }
    }
}

#[component]
fn PageNotFound(route: Vec<String>) -> Element {
    rsx! {
        h1 { "Page not found" }
        p { "We are terribly sorry, but the page you requested doesn't exist." }
        pre { color: "red", "log:\nattemped to navigate to: {route:?}" }
    }
}

fn main() {
    init_logging();

    log::info!("starting app");
    use dioxus::desktop::{Config, WindowBuilder};
    LaunchBuilder::desktop()
        .with_cfg(
            Config::new().with_menu(None).with_window(
                WindowBuilder::new()
                    .with_title(TITLE)
                    .with_inner_size(dioxus::desktop::LogicalSize::new(1280, 800))
                    .with_resizable(true),
            ),
        )
        .launch(App)
}
