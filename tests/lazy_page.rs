use std::{cell::Cell, rc::Rc, time::Duration};

use dioxus::prelude::*;
use dioxus_core::{NoOpMutations, VirtualDom};
use lazy_page::prelude::*;
use serde::Serialize;

#[derive(Clone, Routable, Debug, PartialEq, Serialize)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
    #[route("/other")]
    Other {},
    #[route("/user/:name")]
    User { name: String },
    #[route("/plain")]
    Plain {},
    #[route("/member/:name")]
    Member { name: String },
}

#[derive(Debug, Clone, PartialEq, Default)]
struct GreeterProps {
    message: Option<String>,
}

#[allow(non_snake_case)]
fn Greeter(props: GreeterProps) -> Element {
    let message = props.message.unwrap_or_else(|| "DefaultMessage".to_owned());
    rsx! {
        div { "data-testid": "ContentComponent", "{message}" }
    }
}

/// Greets, then moves on to bob's page when it greeted ada
#[allow(non_snake_case)]
fn Hopper(props: GreeterProps) -> Element {
    let message = props.message.unwrap_or_default();
    let hop = message == "Hi ada";
    use_effect(move || {
        if hop {
            navigator().push(Route::User {
                name: "bob".to_owned(),
            });
        }
    });
    rsx! {
        div { "data-testid": "ContentComponent", "{message}" }
    }
}

#[allow(non_snake_case)]
fn TestLoading() -> Element {
    rsx! {
        div { "data-testid": "LoadingComponent", "Loading..." }
    }
}

#[allow(non_snake_case)]
fn TestError(props: ErrorPlaceholderProps) -> Element {
    rsx! {
        div { "data-testid": "ErrorComponent", "{props.error}" }
    }
}

fn test_config() -> LazyPageConfig {
    LazyPageConfig::default()
        .with_loading(TestLoading)
        .with_error(TestError)
}

#[derive(Clone, PartialEq)]
struct TestPages {
    home: LazyPage<GreeterProps, Route>,
    user: LazyPage<GreeterProps, Route>,
    leave_home_after: Option<Duration>,
}

impl TestPages {
    fn home(home: LazyPage<GreeterProps, Route>) -> Self {
        Self {
            home,
            user: lazy_page(|| async { Err("user page is not routed in this test".into()) }),
            leave_home_after: None,
        }
    }

    fn with_user(mut self, user: LazyPage<GreeterProps, Route>) -> Self {
        self.user = user;
        self
    }

    fn leaving_home_after(mut self, delay: Duration) -> Self {
        self.leave_home_after = Some(delay);
        self
    }
}

#[component]
fn Root(pages: TestPages, config: LazyPageConfig) -> Element {
    use_context_provider(|| pages.clone());
    rsx! {
        LazyPageProvider { config, Router::<Route> {} }
    }
}

/// Re-renders itself a few times, each time with a fresh handle on the same page
#[component]
fn Home() -> Element {
    let pages = use_context::<TestPages>();
    let mut renders = use_signal(|| 0u32);
    use_future(move || async move {
        for _ in 0..5 {
            tokio::task::yield_now().await;
            *renders.write() += 1;
        }
    });

    let nav = navigator();
    let leave_after = pages.leave_home_after;
    use_future(move || async move {
        if let Some(delay) = leave_after {
            tokio::time::sleep(delay).await;
            nav.push(Route::Other {});
        }
    });

    let inner = pages.home.clone();
    let page = lazy_page(move || inner.load_module());
    rsx! {
        span { "data-testid": "Renders", "{renders}" }
        LazyPageView::<GreeterProps, Route> { page }
    }
}

#[component]
fn Other() -> Element {
    let back = navigator().can_go_back();
    rsx! {
        span { "data-testid": "History", "back={back}" }
        div { "data-testid": "ContentComponent", "RedirectMessage" }
    }
}

#[component]
fn User(name: String) -> Element {
    log::debug!("User({name}) Rendered");
    let pages = use_context::<TestPages>();
    rsx! {
        span { "data-testid": "Route", "route={name}" }
        LazyPageView::<GreeterProps, Route> { page: pages.user }
    }
}

/// Not a lazy page, sends the user to bob's page right away
#[component]
fn Plain() -> Element {
    use_effect(|| {
        navigator().push(Route::User {
            name: "bob".to_owned(),
        });
    });
    rsx! {
        div { "PlainMessage" }
    }
}

/// Same page as [User], but moves from ada to bob 5ms after mounting, reusing the instance
#[component]
fn Member(name: String) -> Element {
    let pages = use_context::<TestPages>();
    let nav = navigator();
    let mounted_for = use_hook(|| name.clone());
    use_future(move || {
        let mounted_for = mounted_for.clone();
        async move {
            if mounted_for == "ada" {
                tokio::time::sleep(Duration::from_millis(5)).await;
                nav.push(Route::Member {
                    name: "bob".to_owned(),
                });
            }
        }
    });
    rsx! {
        span { "data-testid": "Route", "route={name}" }
        LazyPageView::<GreeterProps, Route> { page: pages.user }
    }
}

struct Harness {
    dom: VirtualDom,
}

impl Harness {
    fn new(pages: TestPages, config: LazyPageConfig) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut dom = VirtualDom::new_with_props(Root, RootProps { pages, config });
        dom.rebuild_in_place();
        Self { dom }
    }

    fn html(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    /// Lets tasks and effects run until the rendered html satisfies `done`
    async fn settle_until(&mut self, done: impl Fn(&str) -> bool) -> String {
        for _ in 0..200 {
            let html = self.html();
            if done(&html) {
                return html;
            }
            let _ = tokio::time::timeout(Duration::from_millis(10), self.dom.wait_for_work()).await;
            self.dom.render_immediate(&mut NoOpMutations);
        }
        panic!("never settled, last render: {}", self.html());
    }

    /// Lets tasks and effects run for `duration`, whatever gets rendered
    async fn run_for(&mut self, duration: Duration) -> String {
        let dom = &mut self.dom;
        let _ = tokio::time::timeout(duration, async {
            loop {
                dom.wait_for_work().await;
                dom.render_immediate(&mut NoOpMutations);
            }
        })
        .await;
        self.html()
    }
}

/// Wraps a page factory, counting its calls
fn counting<F, Fut>(calls: &Rc<Cell<usize>>, factory: F) -> impl Fn() -> Fut + 'static
where
    F: Fn() -> Fut + 'static,
{
    let calls = calls.clone();
    move || {
        calls.set(calls.get() + 1);
        factory()
    }
}

#[tokio::test]
async fn renders_the_content_with_empty_props_without_resolver() {
    let page = lazy_page(|| async { Ok(PageModule::new(Greeter)) });
    let mut harness = Harness::new(TestPages::home(page), test_config());

    assert!(harness.html().contains("LoadingComponent"));

    let html = harness
        .settle_until(|html| html.contains("ContentComponent"))
        .await;
    assert!(html.contains("DefaultMessage"));
    assert!(!html.contains("LoadingComponent"));
}

#[tokio::test]
async fn renders_the_content_with_the_resolved_props() {
    let page = lazy_page(|| async {
        Ok(
            PageModule::new(Greeter).with_initial_props(|_ctx: PageContext<Route>| async {
                Ok(InitResult::Props(GreeterProps {
                    message: Some("TestMessage".to_owned()),
                }))
            }),
        )
    });
    let mut harness = Harness::new(TestPages::home(page), test_config());

    assert!(harness.html().contains("LoadingComponent"));

    let html = harness.settle_until(|html| html.contains("TestMessage")).await;
    assert!(!html.contains("DefaultMessage"));
}

#[tokio::test]
async fn renders_the_error_placeholder_when_the_resolver_fails() {
    let page = lazy_page(|| async {
        Ok(PageModule::new(Greeter)
            .with_initial_props(|_ctx: PageContext<Route>| async { Err("TestError".into()) }))
    });
    let mut harness = Harness::new(TestPages::home(page), test_config());

    assert!(harness.html().contains("LoadingComponent"));

    let html = harness
        .settle_until(|html| html.contains("ErrorComponent"))
        .await;
    assert!(html.contains("TestError"));
    assert!(!html.contains("ContentComponent"));
}

#[tokio::test]
async fn renders_the_error_placeholder_when_the_resolver_panics() {
    let page = lazy_page(|| async {
        Ok(
            PageModule::new(Greeter).with_initial_props(|_ctx: PageContext<Route>| {
                if true {
                    panic!("boom");
                }
                async { Ok(InitResult::default()) }
            }),
        )
    });
    let mut harness = Harness::new(TestPages::home(page), test_config());

    let html = harness
        .settle_until(|html| html.contains("ErrorComponent"))
        .await;
    assert!(html.contains("boom"));
}

#[tokio::test]
async fn renders_the_error_placeholder_when_the_factory_fails() {
    let page: LazyPage<GreeterProps, Route> =
        lazy_page(|| async { Err("chunk failed to load".into()) });
    let mut harness = Harness::new(TestPages::home(page), test_config());

    let html = harness
        .settle_until(|html| html.contains("ErrorComponent"))
        .await;
    assert!(html.contains("chunk failed to load"));
}

#[tokio::test]
async fn redirect_renders_the_target_route_instead_of_the_page() {
    let page = lazy_page(|| async {
        Ok(
            PageModule::new(Greeter).with_initial_props(|_ctx: PageContext<Route>| async {
                Ok(InitResult::redirect_to_path("/other"))
            }),
        )
    });
    let mut harness = Harness::new(TestPages::home(page), test_config());

    assert!(harness.html().contains("LoadingComponent"));

    let html = harness
        .settle_until(|html| html.contains("RedirectMessage"))
        .await;
    assert!(!html.contains("DefaultMessage"));
    assert!(!html.contains("LoadingComponent"));
}

#[tokio::test]
async fn factory_runs_once_however_often_the_page_re_renders() {
    let calls = Rc::new(Cell::new(0));
    let page = lazy_page(counting(&calls, || async {
        tokio::time::sleep(Duration::from_millis(30)).await;
        Ok(PageModule::new(Greeter))
    }));
    let mut harness = Harness::new(TestPages::home(page), test_config());

    harness
        .settle_until(|html| html.contains("DefaultMessage") && html.contains(">5<"))
        .await;
    assert_eq!(calls.get(), 1);
}

/// Redirects to `target`, telling where the redirect came from
fn redirecting_to(target: &'static str) -> LazyPage<GreeterProps, Route> {
    lazy_page(move || async move {
        Ok(
            PageModule::new(Greeter).with_initial_props(move |ctx: PageContext<Route>| async move {
                Ok(InitResult::Redirect(
                    Redirect::to_path(target)
                        .with_state(serde_json::json!({ "from": ctx.location.path })),
                ))
            }),
        )
    })
}

/// Greets the user named in the route, and where they were redirected from
fn greeting_with_origin() -> LazyPage<GreeterProps, Route> {
    lazy_page(|| async {
        Ok(
            PageModule::new(Greeter).with_initial_props(|ctx: PageContext<Route>| async move {
                let name = ctx.params.get("name").unwrap_or_default().to_owned();
                let from = ctx
                    .location
                    .state
                    .as_ref()
                    .and_then(|s| s.get("from"))
                    .and_then(|f| f.as_str())
                    .unwrap_or("nowhere")
                    .to_owned();
                Ok(InitResult::Props(GreeterProps {
                    message: Some(format!("Hi {name} from {from}")),
                }))
            }),
        )
    })
}

#[tokio::test]
async fn resolver_receives_route_params_and_redirect_state() {
    let pages = TestPages::home(redirecting_to("/user/ada")).with_user(greeting_with_origin());
    let mut harness = Harness::new(pages, test_config());

    harness
        .settle_until(|html| html.contains("Hi ada from /"))
        .await;
}

#[tokio::test]
async fn redirect_state_is_not_handed_to_a_page_reached_by_another_navigation() {
    let pages = TestPages::home(redirecting_to("/plain")).with_user(greeting_with_origin());
    let mut harness = Harness::new(pages, test_config());

    let html = harness
        .settle_until(|html| html.contains("Hi bob from"))
        .await;
    assert!(html.contains("Hi bob from nowhere"), "{html}");
}

#[tokio::test]
async fn redirect_replaces_the_current_history_entry() {
    let page = lazy_page(|| async {
        Ok(
            PageModule::new(Greeter).with_initial_props(|_ctx: PageContext<Route>| async {
                Ok(InitResult::redirect_to_route(Route::Other {}))
            }),
        )
    });
    let mut harness = Harness::new(TestPages::home(page), test_config());

    let html = harness
        .settle_until(|html| html.contains("RedirectMessage"))
        .await;
    assert!(html.contains("back=false"), "{html}");
}

#[tokio::test]
async fn unmounting_before_the_load_finishes_discards_it() {
    let factory_calls = Rc::new(Cell::new(0));
    let resolver_calls = Rc::new(Cell::new(0));
    let counter = resolver_calls.clone();
    let module = PageModule::new(Greeter).with_initial_props(move |_ctx: PageContext<Route>| {
        counter.set(counter.get() + 1);
        async { Ok(InitResult::default()) }
    });
    let page = lazy_page(counting(&factory_calls, move || {
        let module = module.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(40)).await;
            Ok(module)
        }
    }));
    let pages = TestPages::home(page).leaving_home_after(Duration::from_millis(5));
    let mut harness = Harness::new(pages, test_config());

    harness
        .settle_until(|html| html.contains("RedirectMessage"))
        .await;
    let html = harness.run_for(Duration::from_millis(100)).await;
    assert!(html.contains("RedirectMessage"));
    assert!(!html.contains("DefaultMessage"));
    assert!(!html.contains("LoadingComponent"));
    assert_eq!(factory_calls.get(), 1);
    assert_eq!(resolver_calls.get(), 0);
}

#[tokio::test]
async fn route_change_reloads_props_but_not_the_module() {
    let factory_calls = Rc::new(Cell::new(0));
    let resolver_calls = Rc::new(Cell::new(0));
    let home = lazy_page(|| async {
        Ok(
            PageModule::new(Greeter).with_initial_props(|_ctx: PageContext<Route>| async {
                Ok(InitResult::redirect_to_route(Route::User {
                    name: "ada".to_owned(),
                }))
            }),
        )
    });
    let counter = resolver_calls.clone();
    let module = PageModule::new(Hopper).with_initial_props(move |ctx: PageContext<Route>| {
        counter.set(counter.get() + 1);
        async move {
            let name = ctx.params.get("name").unwrap_or_default().to_owned();
            Ok(InitResult::Props(GreeterProps {
                message: Some(format!("Hi {name}")),
            }))
        }
    });
    let user = lazy_page(counting(&factory_calls, move || {
        let module = module.clone();
        async move { Ok(module) }
    }));
    let config = test_config().with_reload(ReloadPolicy::OnRouteChange);
    let mut harness = Harness::new(TestPages::home(home).with_user(user), config);

    harness.settle_until(|html| html.contains("Hi bob")).await;
    assert_eq!(factory_calls.get(), 1);
    assert_eq!(resolver_calls.get(), 2);
}

/// Greets the user named in the route, counting the resolver calls
fn greeting_by_name(
    factory_calls: &Rc<Cell<usize>>,
    resolver_calls: &Rc<Cell<usize>>,
    factory_delay: Duration,
) -> LazyPage<GreeterProps, Route> {
    let counter = resolver_calls.clone();
    let module = PageModule::new(Greeter).with_initial_props(move |ctx: PageContext<Route>| {
        counter.set(counter.get() + 1);
        async move {
            let name = ctx.params.get("name").unwrap_or_default().to_owned();
            Ok(InitResult::Props(GreeterProps {
                message: Some(format!("Hi {name}")),
            }))
        }
    });
    lazy_page(counting(factory_calls, move || {
        let module = module.clone();
        async move {
            tokio::time::sleep(factory_delay).await;
            Ok(module)
        }
    }))
}

fn redirecting_to_member_ada() -> LazyPage<GreeterProps, Route> {
    lazy_page(|| async {
        Ok(
            PageModule::new(Greeter).with_initial_props(|_ctx: PageContext<Route>| async {
                Ok(InitResult::redirect_to_route(Route::Member {
                    name: "ada".to_owned(),
                }))
            }),
        )
    })
}

#[tokio::test]
async fn route_change_during_the_factory_load_is_picked_up() {
    let factory_calls = Rc::new(Cell::new(0));
    let resolver_calls = Rc::new(Cell::new(0));
    let user = greeting_by_name(&factory_calls, &resolver_calls, Duration::from_millis(40));
    let pages = TestPages::home(redirecting_to_member_ada()).with_user(user);
    let config = test_config().with_reload(ReloadPolicy::OnRouteChange);
    let mut harness = Harness::new(pages, config);

    let html = harness
        .settle_until(|html| html.contains("route=bob") && html.contains("Hi bob"))
        .await;
    assert!(!html.contains("Hi ada"));
    let html = harness.run_for(Duration::from_millis(50)).await;
    assert!(html.contains("Hi bob"), "{html}");
    assert_eq!(factory_calls.get(), 1);
    assert_eq!(resolver_calls.get(), 2);
}

#[tokio::test]
async fn default_policy_keeps_the_first_props_when_params_change() {
    let factory_calls = Rc::new(Cell::new(0));
    let resolver_calls = Rc::new(Cell::new(0));
    let user = greeting_by_name(&factory_calls, &resolver_calls, Duration::ZERO);
    let pages = TestPages::home(redirecting_to_member_ada()).with_user(user);
    let mut harness = Harness::new(pages, test_config());

    harness
        .settle_until(|html| html.contains("route=bob") && html.contains("Hi ada"))
        .await;
    let html = harness.run_for(Duration::from_millis(50)).await;
    assert!(html.contains("route=bob") && html.contains("Hi ada"), "{html}");
    assert_eq!(factory_calls.get(), 1);
    assert_eq!(resolver_calls.get(), 1);
}

#[tokio::test]
async fn default_placeholders_show_loading_then_the_error_message() {
    let page = lazy_page(|| async {
        Ok(
            PageModule::new(Greeter).with_initial_props(|_ctx: PageContext<Route>| async {
                Err("boom".into())
            }),
        )
    });
    let mut harness = Harness::new(TestPages::home(page), LazyPageConfig::default());

    assert!(harness.html().contains("Loading..."));

    let html = harness.settle_until(|html| html.contains("boom")).await;
    assert!(html.contains("This page could not be displayed"));
}
