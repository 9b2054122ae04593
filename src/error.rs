use std::any::Any;

use crate::utils::{ptr_eq, CheapClone};

/// Error type accepted from page factories and initial props resolvers
pub type BoxError = Box<dyn std::error::Error + 'static>;

/// Why a lazy page ended up in its error state.
///
/// Both kinds display the message of the original error verbatim, so an error placeholder
/// can simply render `{error}`. Placeholders that want to branch on the failure kind can
/// match on the variant or walk [std::error::Error::source].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PageError {
    /// The page factory failed: the page code could not be loaded
    #[error("{0}")]
    Load(#[source] Cause),
    /// The initial props resolver failed
    #[error("{0}")]
    InitialProps(#[source] Cause),
}

impl PageError {
    pub fn load(error: impl Into<Cause>) -> Self {
        Self::Load(error.into())
    }

    pub fn initial_props(error: impl Into<Cause>) -> Self {
        Self::InitialProps(error.into())
    }

    pub fn cause(&self) -> &Cause {
        match self {
            PageError::Load(cause) | PageError::InitialProps(cause) => cause,
        }
    }

    pub fn is_load_failure(&self) -> bool {
        matches!(self, PageError::Load(_))
    }
}

/// Shared handle on the error that made a load fail.
///
/// Equality is identity: two [Cause] are equal only if they are clones of the same error.
#[derive(Clone)]
pub struct Cause(CheapClone<dyn std::error::Error + 'static>);

impl Cause {
    /// A cause that is only a message
    pub fn msg(message: impl Into<String>) -> Self {
        Self(CheapClone::new(Message(message.into())))
    }

    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_owned()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "panicked while loading the page".to_owned()
        };
        Self::msg(message)
    }

    pub fn inner(&self) -> &(dyn std::error::Error + 'static) {
        self.0.as_ref()
    }
}

impl From<BoxError> for Cause {
    fn from(value: BoxError) -> Self {
        Self(CheapClone::from(value))
    }
}

impl PartialEq for Cause {
    fn eq(&self, other: &Self) -> bool {
        ptr_eq(&self.0, &other.0)
    }
}

impl core::fmt::Debug for Cause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.0, f)
    }
}

impl core::fmt::Display for Cause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Cause {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct Message(String);
