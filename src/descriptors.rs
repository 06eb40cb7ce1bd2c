//! Component descriptors and registry slots.

use std::fmt;
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::class::ComponentClass;
use crate::error::DiResult;
use crate::resolved::AnyArc;
use crate::scope::Scope;

/// Where a descriptor's instances come from.
#[derive(Clone)]
pub(crate) enum Source {
    /// Built by the resolver from a class.
    Class(Arc<ComponentClass>),
    /// Handed over fully built through `register_instance`.
    Instance,
}

/// One registered binding.
///
/// The instance cell is populated only for singletons, and only once the
/// instance's fields and hooks have completed. A class bound under both its
/// own name and its interface key shares one cell between the two
/// descriptors.
///
/// # Examples
///
/// ```rust
/// use ferrous_wiring::{Component, ComponentClass, ComponentMetadata, Registry, Scope};
///
/// #[derive(Default)]
/// struct Mailer;
/// impl Component for Mailer {}
///
/// let registry = Registry::new();
/// registry.register("mailer", ComponentClass::of::<Mailer>(ComponentMetadata::new("mailer")), Scope::Prototype);
///
/// let slot = registry.lookup("mailer").unwrap();
/// let descriptor = &slot.descriptors()[0];
/// assert_eq!(descriptor.name(), "mailer");
/// assert_eq!(descriptor.scope(), Scope::Prototype);
/// assert!(!descriptor.is_instance());
/// assert!(!descriptor.is_initialized());
/// ```
#[derive(Clone)]
pub struct ComponentDescriptor {
    name: String,
    scope: Scope,
    source: Source,
    via_interface: bool,
    instance: Arc<OnceCell<AnyArc>>,
}

impl ComponentDescriptor {
    pub(crate) fn for_class(name: String, class: Arc<ComponentClass>, scope: Scope) -> Self {
        Self {
            name,
            scope,
            source: Source::Class(class),
            via_interface: false,
            instance: Arc::new(OnceCell::new()),
        }
    }

    pub(crate) fn for_instance(name: String, instance: AnyArc) -> Self {
        Self {
            name,
            scope: Scope::Singleton,
            source: Source::Instance,
            via_interface: false,
            instance: Arc::new(OnceCell::new_with(Some(instance))),
        }
    }

    /// Interface-level binding sharing this descriptor's class and instance cell.
    pub(crate) fn interface_alias(&self, interface: String) -> Self {
        Self {
            name: interface,
            scope: self.scope,
            source: self.source.clone(),
            via_interface: true,
            instance: Arc::clone(&self.instance),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn class(&self) -> Option<&Arc<ComponentClass>> {
        match &self.source {
            Source::Class(class) => Some(class),
            Source::Instance => None,
        }
    }

    pub fn is_instance(&self) -> bool {
        matches!(self.source, Source::Instance)
    }

    /// True when this binding exists because of the class's interface tag.
    pub fn is_interface_binding(&self) -> bool {
        self.via_interface
    }

    /// True once a singleton instance has been cached.
    pub fn is_initialized(&self) -> bool {
        self.instance.initialized()
    }

    /// Component-type tag of the underlying class, if any.
    pub fn component_type(&self) -> Option<&str> {
        self.class().and_then(|class| class.metadata().component_type_tag())
    }

    pub(crate) fn source(&self) -> &Source {
        &self.source
    }

    pub(crate) fn cell(&self) -> &OnceCell<AnyArc> {
        &self.instance
    }

    /// Identity of the instance cell, shared by name and interface bindings.
    pub(crate) fn cell_id(&self) -> usize {
        Arc::as_ptr(&self.instance) as usize
    }

    pub(crate) fn cached(&self) -> Option<AnyArc> {
        self.instance.get().cloned()
    }

    /// Turns a finished instance into what this binding hands out.
    pub(crate) fn present(&self, instance: AnyArc) -> DiResult<AnyArc> {
        match (&self.source, self.via_interface) {
            (Source::Class(class), true) => match class.interface_view() {
                Some(view) => view(instance),
                None => Ok(instance),
            },
            _ => Ok(instance),
        }
    }
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.source {
            Source::Class(class) => class.type_name(),
            Source::Instance => "<instance>",
        };
        f.debug_struct("ComponentDescriptor")
            .field("name", &self.name)
            .field("scope", &self.scope)
            .field("source", &source)
            .field("via_interface", &self.via_interface)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

/// The value stored per name: one descriptor, or an ordered multi-binding.
#[derive(Debug, Clone)]
pub enum RegistrySlot {
    Single(ComponentDescriptor),
    Multi(Vec<ComponentDescriptor>),
}

impl RegistrySlot {
    /// All descriptors in registration order.
    pub fn descriptors(&self) -> &[ComponentDescriptor] {
        match self {
            RegistrySlot::Single(descriptor) => std::slice::from_ref(descriptor),
            RegistrySlot::Multi(descriptors) => descriptors,
        }
    }

    pub fn len(&self) -> usize {
        self.descriptors().len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors().is_empty()
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, RegistrySlot::Multi(_))
    }

    /// Appends a descriptor, promoting a single binding to a multi-binding.
    pub(crate) fn push(self, descriptor: ComponentDescriptor) -> Self {
        match self {
            RegistrySlot::Single(first) => RegistrySlot::Multi(vec![first, descriptor]),
            RegistrySlot::Multi(mut all) => {
                all.push(descriptor);
                RegistrySlot::Multi(all)
            }
        }
    }
}
