//! The load sequence of a lazy page, independent of any component instance.
//!
//! Panics raised by a factory or a resolver are contained and reported as a [PageError] of
//! the matching kind.

use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;

use crate::{
    context::PageContext,
    error::{Cause, PageError},
    page::{InitResult, LazyPage, PageModule, PageProps},
    state::LoadedPage,
};

/// Runs the page factory
pub async fn load_module<P, R>(page: &LazyPage<P, R>) -> Result<PageModule<P, R>, PageError> {
    log::debug!("load_module - start");
    let module = AssertUnwindSafe(page.load_module())
        .catch_unwind()
        .await
        .map_err(|payload| PageError::Load(Cause::from_panic(payload)))?
        .map_err(PageError::load)?;
    log::debug!("load_module - loaded");
    Ok(module)
}

/// Computes the [InitResult] of a loaded module for the given context.
///
/// Modules without a resolver get the empty props.
pub async fn resolve_initial_props<P: PageProps, R: 'static>(
    module: &PageModule<P, R>,
    ctx: PageContext<R>,
) -> Result<InitResult<P, R>, PageError> {
    let Some(resolver) = module.initial_props.clone() else {
        log::debug!("resolve_initial_props - no resolver, using empty props");
        return Ok(InitResult::default());
    };
    log::debug!("resolve_initial_props - start");
    // Called inside the guarded future, so a panic before the first await is caught too
    let outcome = AssertUnwindSafe(async move { resolver.call(ctx).await })
        .catch_unwind()
        .await
        .map_err(|payload| PageError::InitialProps(Cause::from_panic(payload)))?
        .map_err(PageError::initial_props)?;
    log::debug!("resolve_initial_props - resolved");
    Ok(outcome)
}

/// Resolves the props of an already loaded module
pub async fn resolve_page<P: PageProps, R: 'static>(
    module: &PageModule<P, R>,
    ctx: PageContext<R>,
) -> Result<LoadedPage<P, R>, PageError> {
    let outcome = resolve_initial_props(module, ctx).await?;
    Ok(LoadedPage {
        content: module.content,
        outcome,
    })
}

/// The complete load sequence: factory then initial props resolver.
///
/// `on_module` receives the module as soon as the factory resolved, before the resolver runs.
pub async fn load_page<P: PageProps, R: 'static>(
    page: &LazyPage<P, R>,
    ctx: PageContext<R>,
    on_module: impl FnOnce(&PageModule<P, R>),
) -> Result<LoadedPage<P, R>, PageError> {
    let module = load_module(page).await?;
    on_module(&module);
    resolve_page(&module, ctx).await
}
