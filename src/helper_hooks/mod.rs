mod lazy_page;
mod navigation_state;

pub mod prelude {
    pub use super::navigation_state::{NavigationStateCell, PendingNavigationState};
    pub mod helper_hooks {
        pub use super::super::lazy_page::use_lazy_page;
        pub use super::super::navigation_state::use_navigation_state;
    }
}
