//! Constructible component classes.

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{BoxError, DiError, DiResult};
use crate::metadata::ComponentMetadata;
use crate::resolved::AnyArc;
use crate::traits::Component;

/// Argument-free constructor producing a bare, unwired instance.
pub(crate) type Ctor = Arc<dyn Fn() -> DiResult<Box<dyn Component>> + Send + Sync>;

/// Maps a finished concrete instance to the form handed out under an interface key.
pub(crate) type ViewFn = Arc<dyn Fn(AnyArc) -> DiResult<AnyArc> + Send + Sync>;

/// A constructible reference plus the metadata describing how to wire it.
///
/// # Examples
///
/// ```rust
/// use ferrous_wiring::{Component, ComponentClass, ComponentMetadata};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// #[derive(Default)]
/// struct English;
/// impl Component for English {}
/// impl Greeter for English {
///     fn greet(&self) -> String { "hello".into() }
/// }
///
/// let class = ComponentClass::builder::<English>(
///     ComponentMetadata::new("english").interface("Greeter"),
/// )
/// .view(|this: Arc<English>| this as Arc<dyn Greeter>)
/// .build();
///
/// assert_eq!(class.name(), "english");
/// assert!(class.type_name().ends_with("English"));
/// ```
pub struct ComponentClass {
    metadata: Arc<ComponentMetadata>,
    ctor: Ctor,
    type_name: &'static str,
    view: Option<ViewFn>,
}

impl ComponentClass {
    /// Class constructed through `T::default()`, without an interface view.
    pub fn of<T: Component + Default>(metadata: ComponentMetadata) -> Arc<Self> {
        Self::builder::<T>(metadata).build()
    }

    pub fn builder<T: Component + Default>(metadata: ComponentMetadata) -> ClassBuilder<T> {
        Self::builder_with(metadata, || Ok::<T, BoxError>(T::default()))
    }

    /// Builder for a class whose constructor may fail.
    ///
    /// Constructor errors reach the caller of `resolve` as [`DiError::Component`].
    pub fn builder_with<T, F, E>(metadata: ComponentMetadata, ctor: F) -> ClassBuilder<T>
    where
        T: Component,
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        let ctor: Ctor = Arc::new(move || match ctor() {
            Ok(instance) => Ok(Box::new(instance) as Box<dyn Component>),
            Err(err) => Err(DiError::component(err)),
        });
        ClassBuilder {
            metadata,
            ctor,
            view: None,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        self.metadata.name()
    }

    pub fn metadata(&self) -> &Arc<ComponentMetadata> {
        &self.metadata
    }

    /// Rust type name of the implementing type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn instantiate(&self) -> DiResult<Box<dyn Component>> {
        (self.ctor)()
    }

    pub(crate) fn interface_view(&self) -> Option<&ViewFn> {
        self.view.as_ref()
    }
}

impl fmt::Debug for ComponentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentClass")
            .field("name", &self.name())
            .field("type_name", &self.type_name)
            .field("has_view", &self.view.is_some())
            .finish()
    }
}

/// Builder returned by [`ComponentClass::builder`].
pub struct ClassBuilder<T> {
    metadata: ComponentMetadata,
    ctor: Ctor,
    view: Option<ViewFn>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Component> ClassBuilder<T> {
    /// Sets how the instance is presented when resolved through its interface key.
    ///
    /// The view is stored as `Arc<Arc<I>>` and read back with
    /// [`Resolved::view`](crate::Resolved::view).
    pub fn view<I, F>(mut self, cast: F) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(Arc<T>) -> Arc<I> + Send + Sync + 'static,
    {
        self.view = Some(Arc::new(move |instance: AnyArc| {
            let concrete = instance.downcast::<T>().map_err(|_| DiError::TypeMismatch {
                name: type_name::<T>().to_string(),
                expected: type_name::<T>(),
            })?;
            Ok(Arc::new(cast(concrete)) as AnyArc)
        }));
        self
    }

    pub fn build(self) -> Arc<ComponentClass> {
        Arc::new(ComponentClass {
            metadata: Arc::new(self.metadata),
            ctor: self.ctor,
            type_name: type_name::<T>(),
            view: self.view,
        })
    }
}
