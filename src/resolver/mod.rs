//! Resolver module for dependency injection.
//!
//! This module contains the [`Resolver`] type which builds, wires and caches
//! components registered in a [`Registry`].

use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::config::ResolverOptions;
use crate::error::{DiError, DiResult};
use crate::internal::ResolutionPath;
use crate::observer::{Observers, ResolutionObserver};
use crate::registry::Registry;
use crate::resolved::{AnyArc, Resolved};

mod construct;

/// Boxed future used to break the recursion between resolution steps.
pub(crate) type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Resolves names to fully wired instances.
///
/// Resolution is recursive and depth-first: a component's declared
/// dependencies are resolved (through the same entry point, sharing one
/// resolution path) before they are assigned, strategy collections are
/// gathered next, then post-construct hooks run one after another. Singletons
/// are cached only after all of that completed.
///
/// # Thread Safety
///
/// `Resolver` is `Send + Sync` and can be shared behind an `Arc`. First-time
/// construction of a singleton is mutually exclusive per binding: concurrent
/// callers wait for the one in-flight construction and receive its instance.
///
/// Cycle detection only sees the path of the calling task. If two tasks start
/// resolving a cyclic graph from opposite ends at the same time, each can hold
/// one singleton's construction while waiting for the other's, and neither
/// returns. Validate batches with [`Registry::register_all`] (which rejects
/// cycles up front) before resolving concurrently.
///
/// # Examples
///
/// ```
/// use ferrous_wiring::{Component, ComponentClass, ComponentMetadata, DiResult, Registry, Resolved, Resolver};
/// use async_trait::async_trait;
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Database { url: String }
///
/// #[async_trait]
/// impl Component for Database {
///     async fn post_construct(&mut self, _hook: &str) -> DiResult<()> {
///         self.url = "postgres://localhost".into();
///         Ok(())
///     }
/// }
///
/// #[derive(Default)]
/// struct UserService { db: Option<Arc<Database>> }
///
/// impl Component for UserService {
///     fn inject(&mut self, field: &str, value: Resolved) -> DiResult<()> {
///         if field == "db" {
///             self.db = Some(value.downcast(field)?);
///         }
///         Ok(())
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let registry = Arc::new(Registry::new());
/// registry.register_class(ComponentClass::of::<Database>(
///     ComponentMetadata::new("database").post_construct("connect"),
/// ));
/// registry.register_class(ComponentClass::of::<UserService>(
///     ComponentMetadata::new("users").depends_on("db", "database"),
/// ));
///
/// let resolver = Resolver::new(registry);
/// let users = resolver.get::<UserService>("users").await.unwrap();
/// assert_eq!(users.db.as_ref().unwrap().url, "postgres://localhost");
/// # }
/// ```
pub struct Resolver {
    registry: Arc<Registry>,
    options: ResolverOptions,
    observers: Observers,
}

impl Resolver {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self::with_options(registry, ResolverOptions::default())
    }

    pub fn with_options(registry: Arc<Registry>, options: ResolverOptions) -> Self {
        Self {
            registry,
            options,
            observers: Observers::default(),
        }
    }

    /// Attaches an observer notified of every construction.
    pub fn add_observer(&mut self, observer: Arc<dyn ResolutionObserver>) -> &mut Self {
        self.observers.add(observer);
        self
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolves `name`: a single binding yields [`Resolved::One`], a
    /// multi-binding yields [`Resolved::Many`] in registration order.
    ///
    /// # Errors
    ///
    /// [`DiError::NotFound`] for unregistered names, [`DiError::Circular`] when
    /// the name is reached again while it is being constructed, and any error
    /// raised by a component's constructor or hooks, unchanged.
    pub async fn resolve(&self, name: &str) -> DiResult<Resolved> {
        let mut path = ResolutionPath::new(self.options.max_depth);
        self.resolve_in(name, &mut path).await
    }

    /// Resolves a single-bound name and downcasts it to `T`.
    pub async fn get<T: Any + Send + Sync>(&self, name: &str) -> DiResult<Arc<T>> {
        self.resolve(name).await?.downcast(name)
    }

    /// Resolves a (possibly multi-bound) name and downcasts every instance to `T`.
    pub async fn get_all<T: Any + Send + Sync>(&self, name: &str) -> DiResult<Vec<Arc<T>>> {
        self.resolve(name).await?.downcast_all(name)
    }

    /// Resolves an interface-level binding to its view, e.g. `Arc<dyn Greeter>`.
    pub async fn get_view<I: ?Sized + Send + Sync + 'static>(&self, name: &str) -> DiResult<Arc<I>> {
        self.resolve(name).await?.view(name)
    }

    /// Every component bound under `interface`, in registration order.
    ///
    /// Returns an empty vector when nothing is bound; see
    /// [`resolve_strategy_strict`](Self::resolve_strategy_strict) for the failing variant.
    pub async fn resolve_strategy(&self, interface: &str) -> DiResult<Vec<AnyArc>> {
        let mut path = ResolutionPath::new(self.options.max_depth);
        self.strategy_in(interface, &mut path).await
    }

    pub async fn resolve_strategy_strict(&self, interface: &str) -> DiResult<Vec<AnyArc>> {
        let items = self.resolve_strategy(interface).await?;
        if items.is_empty() {
            return Err(DiError::NoImplementations(interface.to_string()));
        }
        Ok(items)
    }

    /// Strategy collection read back as interface views.
    pub async fn get_strategy<I: ?Sized + Send + Sync + 'static>(
        &self,
        interface: &str,
    ) -> DiResult<Vec<Arc<I>>> {
        Resolved::Many(self.resolve_strategy(interface).await?).views(interface)
    }

    /// Resolves every name tagged with `component_type`, in registration order.
    pub async fn query(&self, component_type: &str) -> DiResult<Vec<Resolved>> {
        let names = self.registry.query(component_type);
        let mut resolved = Vec::with_capacity(names.len());
        for name in &names {
            resolved.push(self.resolve(name).await?);
        }
        Ok(resolved)
    }
}
