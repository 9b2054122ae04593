//! Page modules of the demo. Each factory waits a little to stand for the download of the
//! page code.

use dioxus::prelude::*;
use lazy_page::{prelude::*, utils::async_sleep};

use crate::Route;

const CODE_LOADING_MS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HomeProps;

#[allow(non_snake_case)]
fn HomePage(_: HomeProps) -> Element {
    rsx! {
        h1 { "Lazy pages" }
        ul {
            li {
                Link {
                    to: Route::UserView {
                        name: "ada".to_owned(),
                    },
                    "A user page with initial props"
                }
            }
            li {
                Link {
                    to: Route::LegacyProfileView {
                        name: "grace".to_owned(),
                    },
                    "A legacy page redirecting to the user page"
                }
            }
            li {
                Link { to: Route::BrokenView {}, "A page failing to load its props" }
            }
        }
    }
}

pub fn home() -> LazyPage<HomeProps, Route> {
    lazy_page(|| async {
        async_sleep(CODE_LOADING_MS).await;
        Ok(PageModule::new(HomePage))
    })
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserProps {
    name: String,
    referrer: Option<String>,
}

#[allow(non_snake_case)]
fn UserPage(props: UserProps) -> Element {
    rsx! {
        h1 { "Hello {props.name}" }
        if let Some(referrer) = props.referrer {
            p { class: "italic", "You were redirected from {referrer}" }
        }
        Link { to: Route::HomeView {}, "Back" }
    }
}

pub fn user() -> LazyPage<UserProps, Route> {
    lazy_page(|| async {
        async_sleep(CODE_LOADING_MS).await;
        Ok(
            PageModule::new(UserPage).with_initial_props(|ctx: PageContext<Route>| async move {
                // Stands for fetching the user
                async_sleep(200).await;
                let name = ctx.params.get("name").unwrap_or_default().to_owned();
                let referrer = ctx
                    .location
                    .state
                    .as_ref()
                    .and_then(|s| s.get("from"))
                    .and_then(|from| from.as_str())
                    .map(str::to_owned);
                Ok(InitResult::Props(UserProps { name, referrer }))
            }),
        )
    })
}

pub fn legacy_profile() -> LazyPage<UserProps, Route> {
    lazy_page(|| async {
        Ok(
            PageModule::new(UserPage).with_initial_props(|ctx: PageContext<Route>| async move {
                let name = ctx.params.get("name").unwrap_or_default().to_owned();
                Ok(InitResult::Redirect(
                    Redirect::to_route(Route::UserView { name })
                        .with_state(serde_json::json!({ "from": ctx.location.path })),
                ))
            }),
        )
    })
}

pub fn broken() -> LazyPage<HomeProps, Route> {
    lazy_page(|| async {
        async_sleep(CODE_LOADING_MS).await;
        Ok(
            PageModule::new(HomePage).with_initial_props(|_ctx: PageContext<Route>| async {
                Err("the profile service is unreachable".into())
            }),
        )
    })
}
