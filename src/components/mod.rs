mod lazy_page;
pub mod placeholders;
mod provider;

pub use lazy_page::{LazyPageView, PageRoute};
pub use provider::LazyPageProvider;
