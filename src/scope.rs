//! Component scope definitions.

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// Component scopes controlling instance caching behavior
///
/// # Examples
///
/// ```rust
/// use ferrous_wiring::Scope;
///
/// assert!(Scope::Singleton.is_cached());
/// assert!(!Scope::Prototype.is_cached());
/// assert_eq!(Scope::default(), Scope::Singleton);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum Scope {
    /// Single instance per registry binding, built on first demand and cached forever
    ///
    /// The instance is stored only after its fields are wired and every
    /// post-construct hook has completed, so no caller ever observes a
    /// partially initialized singleton.
    #[default]
    Singleton,
    /// New instance per resolution, never cached
    ///
    /// Every resolution re-runs construction, field injection and hooks.
    Prototype,
}

impl Scope {
    /// Maps the `singleton` flag used by [`Registry::register`](crate::Registry::register) callers.
    pub fn from_singleton(singleton: bool) -> Self {
        if singleton {
            Scope::Singleton
        } else {
            Scope::Prototype
        }
    }

    /// Returns true when resolved instances are memoized.
    pub fn is_cached(self) -> bool {
        self == Scope::Singleton
    }
}
