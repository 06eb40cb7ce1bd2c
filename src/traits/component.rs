//! Component trait implemented by every wired type.

use std::any::{type_name, Any};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{DiError, DiResult};
use crate::resolved::{AnyArc, Resolved};

/// Converts a boxed value into the shared, type-erased form stored by the registry.
pub trait IntoAnyArc {
    fn into_any_arc(self: Box<Self>) -> AnyArc;
}

impl<T: Any + Send + Sync> IntoAnyArc for T {
    fn into_any_arc(self: Box<Self>) -> AnyArc {
        let erased: Box<dyn Any + Send + Sync> = self;
        Arc::from(erased)
    }
}

/// A type the resolver can construct, wire and initialize.
///
/// Construction is always argument-free; the resolver then assigns every
/// declared field through [`inject`](Component::inject) and finally runs each
/// declared hook through [`post_construct`](Component::post_construct), one at
/// a time and in order.
///
/// # Examples
///
/// ```
/// use ferrous_wiring::{Component, DiResult, Resolved};
/// use async_trait::async_trait;
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Clock;
/// impl Component for Clock {}
///
/// #[derive(Default)]
/// struct Scheduler {
///     clock: Option<Arc<Clock>>,
///     started: bool,
/// }
///
/// #[async_trait]
/// impl Component for Scheduler {
///     fn inject(&mut self, field: &str, value: Resolved) -> DiResult<()> {
///         match field {
///             "clock" => self.clock = Some(value.downcast("clock")?),
///             _ => return Err(ferrous_wiring::DiError::UnknownField {
///                 component: "Scheduler",
///                 field: field.to_string(),
///             }),
///         }
///         Ok(())
///     }
///
///     async fn post_construct(&mut self, hook: &str) -> DiResult<()> {
///         assert_eq!(hook, "start");
///         self.started = true;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Component: IntoAnyArc + Send + Sync + 'static {
    /// Assigns a resolved dependency or strategy collection to `field`.
    fn inject(&mut self, field: &str, value: Resolved) -> DiResult<()> {
        drop(value);
        Err(DiError::UnknownField {
            component: type_name::<Self>(),
            field: field.to_string(),
        })
    }

    /// Runs the post-construct hook called `hook`.
    async fn post_construct(&mut self, hook: &str) -> DiResult<()> {
        Err(DiError::UnknownHook {
            component: type_name::<Self>(),
            hook: hook.to_string(),
        })
    }
}
