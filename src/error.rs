//! Error types for the dependency injection container.

use std::error::Error as StdError;
use std::sync::Arc;

/// Boxed error type returned by user constructors and hooks.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Dependency injection errors
///
/// Represents the various error conditions that can occur during component
/// registration, resolution, or bulk ordering.
///
/// # Examples
///
/// ```rust
/// use ferrous_wiring::DiError;
///
/// let not_found = DiError::NotFound("userService".to_string());
/// let circular = DiError::Circular(vec!["a".into(), "b".into(), "a".into()]);
///
/// assert_eq!(not_found.to_string(), "Component not found: userService");
/// assert_eq!(circular.to_string(), "Circular dependency: a -> b -> a");
/// ```
#[derive(Debug, Clone, thiserror::Error)]
pub enum DiError {
    /// Nothing is registered under the name
    #[error("Component not found: {0}")]
    NotFound(String),
    /// Circular dependency detected (includes the full chain)
    #[error("Circular dependency: {}", .0.join(" -> "))]
    Circular(Vec<String>),
    /// A pre-built instance was registered twice under the same name
    #[error("Instance already registered: {0}")]
    DuplicateInstance(String),
    /// Downcast of a resolved value failed
    #[error("Type mismatch for {name}: expected {expected}")]
    TypeMismatch { name: String, expected: &'static str },
    /// A component was asked to accept a field it does not declare
    #[error("Component {component} has no injectable field `{field}`")]
    UnknownField { component: &'static str, field: String },
    /// A post-construct hook name the component does not implement
    #[error("Component {component} has no post-construct hook `{hook}`")]
    UnknownHook { component: &'static str, hook: String },
    /// Strict strategy resolution found nothing bound to the interface
    #[error("No implementations registered for interface: {0}")]
    NoImplementations(String),
    /// Maximum resolution depth exceeded
    #[error("Max depth {0} exceeded")]
    DepthExceeded(usize),
    /// Error raised by a component's own constructor or hook, passed through as-is
    #[error(transparent)]
    Component(Arc<dyn StdError + Send + Sync + 'static>),
}

impl DiError {
    /// Wraps an error raised by user code without altering its message or source chain.
    pub fn component(err: impl Into<BoxError>) -> Self {
        DiError::Component(Arc::from(err.into()))
    }

    /// Returns the cycle chain for circular dependency errors.
    pub fn cycle(&self) -> Option<&[String]> {
        match self {
            DiError::Circular(chain) => Some(chain),
            _ => None,
        }
    }

    /// Borrows the original user error when this is a pass-through failure.
    pub fn downcast_component<E: StdError + 'static>(&self) -> Option<&E> {
        match self {
            DiError::Component(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}

/// Result type for DI operations
///
/// A convenience type alias for `Result<T, DiError>` used throughout ferrous-wiring.
pub type DiResult<T> = Result<T, DiError>;
