//! # ferrous-wiring
//!
//! Name-keyed, metadata-driven dependency wiring for async Rust applications.
//!
//! ## Features
//!
//! - **Declarative wiring**: components declare the fields they need by dependency key
//! - **Strategies**: inject every implementation bound to an interface, in registration order
//! - **Inheritance**: metadata levels chain, the most-derived declaration of a field wins
//! - **Async lifecycle**: post-construct hooks run sequentially before a singleton is cached
//! - **Circular dependency detection**: failures carry the full resolution path
//! - **Bulk registration**: batches are topologically ordered and checked for cycles up front
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_wiring::{Component, ComponentClass, ComponentMetadata, DiResult, Registry, Resolved, Resolver};
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! // Define your components
//! #[derive(Default)]
//! struct Database {
//!     connection_string: String,
//! }
//!
//! #[async_trait]
//! impl Component for Database {
//!     async fn post_construct(&mut self, _hook: &str) -> DiResult<()> {
//!         self.connection_string = "postgres://localhost".to_string();
//!         Ok(())
//!     }
//! }
//!
//! #[derive(Default)]
//! struct UserService {
//!     db: Option<Arc<Database>>,
//! }
//!
//! impl Component for UserService {
//!     fn inject(&mut self, field: &str, value: Resolved) -> DiResult<()> {
//!         match field {
//!             "db" => self.db = Some(value.downcast(field)?),
//!             _ => {}
//!         }
//!         Ok(())
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! // Register classes
//! let registry = Arc::new(Registry::new());
//! registry.register_class(ComponentClass::of::<Database>(
//!     ComponentMetadata::new("database").post_construct("connect"),
//! ));
//! registry.register_class(ComponentClass::of::<UserService>(
//!     ComponentMetadata::new("userService").depends_on("db", "database"),
//! ));
//!
//! // Resolve fully wired instances
//! let resolver = Resolver::new(registry);
//! let users = resolver.get::<UserService>("userService").await.unwrap();
//! assert_eq!(users.db.as_ref().unwrap().connection_string, "postgres://localhost");
//!
//! // Singletons are shared
//! let again = resolver.get::<UserService>("userService").await.unwrap();
//! assert!(Arc::ptr_eq(&users, &again));
//! # }
//! ```
//!
//! ## Scopes
//!
//! - **Singleton**: Built once on first demand, then shared
//! - **Prototype**: Built and wired anew on every resolution
//!
//! ## Strategies
//!
//! ```rust
//! use ferrous_wiring::{Component, ComponentClass, ComponentMetadata, Registry, Resolver};
//! use std::sync::Arc;
//!
//! trait Handler: Send + Sync {
//!     fn id(&self) -> &'static str;
//! }
//!
//! #[derive(Default)]
//! struct Json;
//! impl Component for Json {}
//! impl Handler for Json {
//!     fn id(&self) -> &'static str { "json" }
//! }
//!
//! #[derive(Default)]
//! struct Xml;
//! impl Component for Xml {}
//! impl Handler for Xml {
//!     fn id(&self) -> &'static str { "xml" }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let registry = Arc::new(Registry::new());
//! registry.register_class(
//!     ComponentClass::builder::<Json>(ComponentMetadata::new("json").interface("Handler"))
//!         .view(|this: Arc<Json>| this as Arc<dyn Handler>)
//!         .build(),
//! );
//! registry.register_class(
//!     ComponentClass::builder::<Xml>(ComponentMetadata::new("xml").interface("Handler"))
//!         .view(|this: Arc<Xml>| this as Arc<dyn Handler>)
//!         .build(),
//! );
//!
//! let resolver = Resolver::new(registry);
//! let handlers = resolver.get_strategy::<dyn Handler>("Handler").await.unwrap();
//! let ids: Vec<_> = handlers.iter().map(|h| h.id()).collect();
//! assert_eq!(ids, ["json", "xml"]);
//! # }
//! ```

// Module declarations
pub mod class;
pub mod config;
pub mod descriptors;
pub mod error;
pub mod graph;
pub mod metadata;
pub mod observer;
pub mod registry;
pub mod resolved;
pub mod resolver;
pub mod scope;
pub mod traits;

// Internal modules
mod internal;

// Re-exports
pub use class::{ClassBuilder, ComponentClass};
pub use config::{ResolverOptions, DEFAULT_MAX_DEPTH};
pub use descriptors::{ComponentDescriptor, RegistrySlot};
pub use error::{BoxError, DiError, DiResult};
pub use graph::DependencyGraph;
pub use metadata::{Chain, ComponentMetadata, DependencyField, FieldTransform, StrategyField};
pub use observer::{ResolutionObserver, TracingObserver};
pub use registry::Registry;
pub use resolved::{AnyArc, Resolved};
pub use resolver::Resolver;
pub use scope::Scope;
pub use traits::{Component, IntoAnyArc};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Default)]
    struct Leaf;
    impl Component for Leaf {}

    #[test]
    fn resolver_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Resolver>();
        assert_send_sync::<Registry>();
        assert_send_sync::<ComponentClass>();
        assert_send_sync::<DiError>();
    }

    #[tokio::test]
    async fn resolve_future_is_send() {
        fn assert_send<F: std::future::Future + Send>(f: F) -> F {
            f
        }

        let registry = Arc::new(Registry::new());
        registry.register_class(ComponentClass::of::<Leaf>(ComponentMetadata::new("leaf")));
        let resolver = Resolver::new(registry);

        let leaf = assert_send(resolver.get::<Leaf>("leaf")).await.unwrap();
        let again = resolver.get::<Leaf>("leaf").await.unwrap();
        assert!(Arc::ptr_eq(&leaf, &again));
    }
}
