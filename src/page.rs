use std::future::Future;

use dioxus::prelude::*;
use futures_util::future::{FutureExt, LocalBoxFuture};

use crate::{
    context::{NavigationState, PageContext},
    error::BoxError,
    utils::{ptr_eq, CCStr, CheapClone},
};

/// Bound for the props of a lazily loaded page.
///
/// `P::default()` is the "empty props" value given to pages without an initial props resolver.
pub trait PageProps: Clone + PartialEq + Default + 'static {}
impl<T: Clone + PartialEq + Default + 'static> PageProps for T {}

/// The component of a page module
pub struct ContentComponent<P>(fn(P) -> Element);

impl<P> ContentComponent<P> {
    pub fn new(component: fn(P) -> Element) -> Self {
        Self(component)
    }

    pub(crate) fn render(&self, props: P) -> Element {
        (self.0)(props)
    }
}
impl<P> Clone for ContentComponent<P> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<P> Copy for ContentComponent<P> {}
impl<P> PartialEq for ContentComponent<P> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::fn_addr_eq(self.0, other.0)
    }
}
impl<P> core::fmt::Debug for ContentComponent<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ContentComponent({:p})", self.0 as *const ())
    }
}

/// Where a redirecting page sends the user
#[derive(Debug, Clone, PartialEq)]
pub enum RedirectTarget<R> {
    /// A typed route
    Route(R),
    /// A path parsed by the router, e.g. `/other`
    Path(CCStr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Redirect<R> {
    pub to: RedirectTarget<R>,
    /// Handed to the page mounted at the target, see [Location::state](crate::context::Location)
    pub state: Option<NavigationState>,
}

impl<R> Redirect<R> {
    pub fn to_route(route: R) -> Self {
        Self {
            to: RedirectTarget::Route(route),
            state: None,
        }
    }

    pub fn to_path(path: impl Into<CCStr>) -> Self {
        Self {
            to: RedirectTarget::Path(path.into()),
            state: None,
        }
    }

    pub fn with_state(mut self, state: NavigationState) -> Self {
        self.state = Some(state);
        self
    }
}

/// What an initial props resolver decided
#[derive(Debug, Clone, PartialEq)]
pub enum InitResult<P, R> {
    /// Render the page with these props
    Props(P),
    /// Do not render the page, navigate elsewhere
    Redirect(Redirect<R>),
}

impl<P, R> InitResult<P, R> {
    pub fn redirect_to_route(route: R) -> Self {
        Self::Redirect(Redirect::to_route(route))
    }

    pub fn redirect_to_path(path: impl Into<CCStr>) -> Self {
        Self::Redirect(Redirect::to_path(path))
    }
}

impl<P: PageProps, R> Default for InitResult<P, R> {
    fn default() -> Self {
        Self::Props(P::default())
    }
}

type InitialPropsFn<P, R> =
    dyn Fn(PageContext<R>) -> LocalBoxFuture<'static, Result<InitResult<P, R>, BoxError>>;

/// Asynchronous function computing the props of a page from the current route
pub struct InitialPropsResolver<P, R>(CheapClone<InitialPropsFn<P, R>>);

impl<P, R> InitialPropsResolver<P, R> {
    pub fn new<F, Fut>(resolver: F) -> Self
    where
        F: Fn(PageContext<R>) -> Fut + 'static,
        Fut: Future<Output = Result<InitResult<P, R>, BoxError>> + 'static,
    {
        Self(CheapClone::new(move |ctx: PageContext<R>| {
            resolver(ctx).boxed_local()
        }))
    }

    pub(crate) fn call(
        &self,
        ctx: PageContext<R>,
    ) -> LocalBoxFuture<'static, Result<InitResult<P, R>, BoxError>> {
        (self.0)(ctx)
    }
}
impl<P, R> Clone for InitialPropsResolver<P, R> {
    fn clone(&self) -> Self {
        Self(CheapClone::clone(&self.0))
    }
}
impl<P, R> PartialEq for InitialPropsResolver<P, R> {
    fn eq(&self, other: &Self) -> bool {
        ptr_eq(&self.0, &other.0)
    }
}

/// What a page factory yields: the page component and how to compute its props.
pub struct PageModule<P, R> {
    pub content: ContentComponent<P>,
    pub initial_props: Option<InitialPropsResolver<P, R>>,
}

impl<P, R> PageModule<P, R> {
    pub fn new(content: fn(P) -> Element) -> Self {
        Self {
            content: ContentComponent::new(content),
            initial_props: None,
        }
    }

    pub fn with_initial_props<F, Fut>(mut self, resolver: F) -> Self
    where
        F: Fn(PageContext<R>) -> Fut + 'static,
        Fut: Future<Output = Result<InitResult<P, R>, BoxError>> + 'static,
    {
        self.initial_props = Some(InitialPropsResolver::new(resolver));
        self
    }
}
impl<P, R> Clone for PageModule<P, R> {
    fn clone(&self) -> Self {
        Self {
            content: self.content,
            initial_props: self.initial_props.clone(),
        }
    }
}
impl<P, R> PartialEq for PageModule<P, R> {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content && self.initial_props == other.initial_props
    }
}

type PageFactory<P, R> = dyn Fn() -> LocalBoxFuture<'static, Result<PageModule<P, R>, BoxError>>;

/// Handle on a page whose module is loaded on first render.
///
/// Created with [lazy_page] and rendered with [LazyPageView](crate::components::LazyPageView).
/// Cloning is cheap and equality is identity, so it can be passed around as a prop.
pub struct LazyPage<P, R> {
    factory: CheapClone<PageFactory<P, R>>,
}

/// Wraps a page factory into a [LazyPage].
///
/// The factory is called at most once per mounted [LazyPageView](crate::components::LazyPageView).
///
/// ```rust,ignore
/// let page = lazy_page(|| async {
///     Ok(PageModule::new(Greeter).with_initial_props(|ctx: PageContext<Route>| async move {
///         let name = ctx.params.get("name").unwrap_or("stranger").to_owned();
///         Ok(InitResult::Props(GreeterProps { message: Some(format!("Hi {name}")) }))
///     }))
/// });
/// ```
pub fn lazy_page<P, R, F, Fut>(factory: F) -> LazyPage<P, R>
where
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<PageModule<P, R>, BoxError>> + 'static,
{
    LazyPage {
        factory: CheapClone::new(move || factory().boxed_local()),
    }
}

impl<P, R> LazyPage<P, R> {
    /// Runs the factory
    pub fn load_module(&self) -> LocalBoxFuture<'static, Result<PageModule<P, R>, BoxError>> {
        (self.factory)()
    }
}

impl<P: PageProps, R: crate::components::PageRoute> LazyPage<P, R> {
    pub fn render(self) -> Element {
        rsx! {
            crate::components::LazyPageView::<P, R> { page: self }
        }
    }
}

impl<P, R> Clone for LazyPage<P, R> {
    fn clone(&self) -> Self {
        Self {
            factory: CheapClone::clone(&self.factory),
        }
    }
}
impl<P, R> PartialEq for LazyPage<P, R> {
    fn eq(&self, other: &Self) -> bool {
        ptr_eq(&self.factory, &other.factory)
    }
}
