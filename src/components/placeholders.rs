use dioxus::prelude::*;

use crate::error::PageError;

/// Props handed to the error placeholder of a lazy page
#[derive(Props, Clone, PartialEq)]
pub struct ErrorPlaceholderProps {
    pub error: PageError,
}

/// A skeleton block shown while the page module and its props load.
///
/// The text is kept invisible so the skeleton takes the size of a line of content.
#[allow(non_snake_case)]
pub fn DefaultLoadingPlaceholder() -> Element {
    rsx! {
        div { class: "skeleton w-full", role: "status",
            span { class: "invisible inline-block", "Loading..." }
        }
    }
}

/// Shows the message of the error that prevented the page from loading
#[allow(non_snake_case)]
pub fn DefaultErrorPlaceholder(props: ErrorPlaceholderProps) -> Element {
    let title = if props.error.is_load_failure() {
        "This page could not be loaded"
    } else {
        "This page could not be displayed"
    };
    rsx! {
        div { class: "alert alert-error", role: "alert",
            span { class: "font-bold", "{title}" }
            span { class: "text-error-content", "{props.error}" }
        }
    }
}
