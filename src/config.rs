//! Resolver configuration.
//!
//! Options can be built in code, read from environment variables, or (with the
//! `config` feature) deserialized from JSON.

use std::env;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default limit on nested resolutions within one top-level call.
///
/// Every level polls a few nested futures, so the limit is kept low enough to
/// fit a 2 MiB thread stack in unoptimized builds. Raise it through
/// [`ResolverOptions::max_depth`] only when resolving on larger stacks.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Tunables for a [`Resolver`](crate::Resolver).
///
/// # Examples
///
/// ```rust
/// use ferrous_wiring::ResolverOptions;
///
/// let options = ResolverOptions::default().strict_strategies(true);
/// assert_eq!(options.max_depth, 64);
/// assert!(options.strict_strategies);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ResolverOptions {
    /// Maximum nesting of dependency resolutions before failing with `DepthExceeded`
    pub max_depth: usize,
    /// Fail strategy fields whose interface has no implementation instead of injecting an empty collection
    pub strict_strategies: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strict_strategies: false,
        }
    }
}

impl ResolverOptions {
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn strict_strategies(mut self, strict: bool) -> Self {
        self.strict_strategies = strict;
        self
    }

    /// Reads `<PREFIX>_MAX_DEPTH` and `<PREFIX>_STRICT_STRATEGIES`.
    ///
    /// Missing variables keep their defaults; unparseable ones are logged and ignored.
    pub fn from_env(prefix: &str) -> Self {
        let mut options = Self::default();
        let prefix = prefix.to_uppercase();

        if let Some(depth) = read_var(&format!("{}_MAX_DEPTH", prefix)) {
            options.max_depth = depth;
        }
        if let Some(strict) = read_var(&format!("{}_STRICT_STRATEGIES", prefix)) {
            options.strict_strategies = strict;
        }
        options
    }

    #[cfg(feature = "config")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn read_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparseable configuration value");
            None
        }
    }
}
