//! Component registry holding all bindings.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::class::ComponentClass;
use crate::descriptors::{ComponentDescriptor, RegistrySlot};
use crate::error::{DiError, DiResult};
use crate::graph::DependencyGraph;
use crate::resolved::AnyArc;
use crate::scope::Scope;

/// Name-keyed table of component descriptors.
///
/// Registering a name that is already bound appends to the slot, turning it
/// into an ordered multi-binding. Construction is never eager: even singleton
/// classes are built by the [`Resolver`](crate::Resolver) on first demand.
///
/// The registry uses interior locking so it can be shared with a resolver
/// (`Arc<Registry>`) and still accept incremental registrations.
///
/// # Examples
///
/// ```rust
/// use ferrous_wiring::{Component, ComponentClass, ComponentMetadata, Registry, Scope, DiError};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Audit;
/// impl Component for Audit {}
///
/// let registry = Registry::new();
/// registry.register_class(ComponentClass::of::<Audit>(
///     ComponentMetadata::new("audit").component_type("service"),
/// ));
/// registry.register_instance("port", Arc::new(8080u16)).unwrap();
///
/// assert_eq!(registry.query("service"), ["audit"]);
/// assert!(matches!(
///     registry.register_instance("port", Arc::new(1u16)),
///     Err(DiError::DuplicateInstance(_))
/// ));
/// ```
#[derive(Default)]
pub struct Registry {
    table: RwLock<Table>,
}

#[derive(Default)]
struct Table {
    slots: HashMap<String, RegistrySlot>,
    /// Names in first-registration order
    order: Vec<String>,
}

impl Table {
    fn insert(&mut self, descriptor: ComponentDescriptor) {
        let name = descriptor.name().to_string();
        let slot = match self.slots.remove(&name) {
            Some(existing) => existing.push(descriptor),
            None => {
                self.order.push(name.clone());
                RegistrySlot::Single(descriptor)
            }
        };
        self.slots.insert(name, slot);
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `class` under `name` with the given scope.
    ///
    /// Only `name` is bound; use [`register_class`](Self::register_class) to
    /// honor the class's interface tag as well.
    pub fn register(&self, name: impl Into<String>, class: Arc<ComponentClass>, scope: Scope) {
        let name = name.into();
        debug!(name = %name, class = class.type_name(), ?scope, "Registering component");
        let descriptor = ComponentDescriptor::for_class(name, class, scope);
        self.table.write().insert(descriptor);
    }

    /// Binds a class under its metadata name and scope, and under its interface key if tagged.
    ///
    /// Both bindings share one instance cell, so a singleton is the same
    /// object whichever key reaches it.
    pub fn register_class(&self, class: Arc<ComponentClass>) {
        let metadata = Arc::clone(class.metadata());
        let descriptor = ComponentDescriptor::for_class(
            metadata.name().to_string(),
            Arc::clone(&class),
            metadata.declared_scope(),
        );
        debug!(
            name = metadata.name(),
            class = class.type_name(),
            interface = metadata.interface_key(),
            "Registering component class"
        );

        let mut table = self.table.write();
        match metadata.interface_key() {
            Some(interface) if interface != metadata.name() => {
                let alias = descriptor.interface_alias(interface.to_string());
                table.insert(descriptor);
                table.insert(alias);
            }
            _ => table.insert(descriptor),
        }
    }

    /// Registers a batch of classes in dependency order.
    ///
    /// The whole batch is checked for cycles first; nothing is registered if
    /// one is found. Returns the class names in the order they were bound.
    pub fn register_all(&self, classes: &[Arc<ComponentClass>]) -> DiResult<Vec<String>> {
        let graph = DependencyGraph::from_classes(classes);
        let order = graph.topological_order()?;

        let by_name: HashMap<&str, Vec<&Arc<ComponentClass>>> =
            classes.iter().fold(HashMap::new(), |mut acc, class| {
                acc.entry(class.name()).or_default().push(class);
                acc
            });

        let mut registered = Vec::with_capacity(classes.len());
        for name in &order {
            for class in by_name.get(name.as_str()).into_iter().flatten() {
                self.register_class(Arc::clone(class));
                registered.push(name.clone());
            }
        }
        debug!(count = registered.len(), "Bulk registration complete");
        Ok(registered)
    }

    /// Registers a fully built object, bypassing construction and wiring.
    ///
    /// Fails with [`DiError::DuplicateInstance`] if `name` is already bound.
    pub fn register_instance<T: Any + Send + Sync>(
        &self,
        name: impl Into<String>,
        instance: Arc<T>,
    ) -> DiResult<()> {
        self.register_instance_any(name, instance as AnyArc)
    }

    pub fn register_instance_any(&self, name: impl Into<String>, instance: AnyArc) -> DiResult<()> {
        let name = name.into();
        let mut table = self.table.write();
        if table.slots.contains_key(&name) {
            return Err(DiError::DuplicateInstance(name));
        }
        debug!(name = %name, "Registering instance");
        table.insert(ComponentDescriptor::for_instance(name, instance));
        Ok(())
    }

    /// Raw slot lookup; never constructs anything.
    pub fn lookup(&self, name: &str) -> Option<RegistrySlot> {
        self.table.read().slots.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.read().slots.contains_key(name)
    }

    /// Names whose class carries the component-type tag, in registration order.
    ///
    /// Interface-level bindings are skipped so each class is reported once
    /// under its own name.
    pub fn query(&self, component_type: &str) -> Vec<String> {
        let table = self.table.read();
        table
            .order
            .iter()
            .filter(|name| {
                table.slots.get(name.as_str()).is_some_and(|slot| {
                    slot.descriptors().iter().any(|d| {
                        !d.is_interface_binding() && d.component_type() == Some(component_type)
                    })
                })
            })
            .cloned()
            .collect()
    }

    /// All bound names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.table.read().order.clone()
    }

    /// Snapshot of every descriptor, grouped by name in registration order.
    pub fn descriptors(&self) -> Vec<ComponentDescriptor> {
        let table = self.table.read();
        table
            .order
            .iter()
            .filter_map(|name| table.slots.get(name))
            .flat_map(|slot| slot.descriptors().iter().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.table.read().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
