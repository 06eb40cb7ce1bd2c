//! Construction, wiring and lifecycle execution.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, trace, warn};

use super::{BoxFuture, Resolver};
use crate::class::ComponentClass;
use crate::descriptors::{ComponentDescriptor, RegistrySlot, Source};
use crate::error::{DiError, DiResult};
use crate::internal::ResolutionPath;
use crate::resolved::{AnyArc, Resolved};
use crate::scope::Scope;

impl Resolver {
    /// Resolves `name` on an existing path; dependency fields come back through here.
    pub(super) fn resolve_in<'a>(
        &'a self,
        name: &'a str,
        path: &'a mut ResolutionPath,
    ) -> BoxFuture<'a, DiResult<Resolved>> {
        Box::pin(async move {
            let slot = self
                .registry
                .lookup(name)
                .ok_or_else(|| DiError::NotFound(name.to_string()))?;

            match slot {
                RegistrySlot::Single(descriptor) => {
                    if let Some(instance) = descriptor.cached() {
                        trace!(name, "Singleton cache hit");
                        return descriptor.present(instance).map(Resolved::One);
                    }
                    self.construct_one(&descriptor, path).await.map(Resolved::One)
                }
                RegistrySlot::Multi(descriptors) => {
                    let mut instances = Vec::with_capacity(descriptors.len());
                    for descriptor in &descriptors {
                        instances.push(self.construct_one(descriptor, path).await?);
                    }
                    Ok(Resolved::Many(instances))
                }
            }
        })
    }

    /// Every descriptor bound under `interface`; nothing bound is an empty collection.
    pub(super) fn strategy_in<'a>(
        &'a self,
        interface: &'a str,
        path: &'a mut ResolutionPath,
    ) -> BoxFuture<'a, DiResult<Vec<AnyArc>>> {
        Box::pin(async move {
            let Some(slot) = self.registry.lookup(interface) else {
                trace!(interface, "No strategy implementations bound");
                return Ok(Vec::new());
            };

            let mut instances = Vec::with_capacity(slot.len());
            for descriptor in slot.descriptors() {
                instances.push(self.construct_one(descriptor, path).await?);
            }
            Ok(instances)
        })
    }

    async fn construct_one(
        &self,
        descriptor: &ComponentDescriptor,
        path: &mut ResolutionPath,
    ) -> DiResult<AnyArc> {
        if let Some(instance) = descriptor.cached() {
            return descriptor.present(instance);
        }

        let name = descriptor.name();
        let class = match descriptor.source() {
            Source::Class(class) => Arc::clone(class),
            // Instance descriptors are created populated.
            Source::Instance => {
                return descriptor
                    .cached()
                    .ok_or_else(|| DiError::NotFound(name.to_string()))
            }
        };

        path.enter(name, descriptor.cell_id())?;
        let started = Instant::now();
        if self.observers.has_observers() {
            self.observers.resolving(name, path.depth());
        }

        let result = match descriptor.scope() {
            Scope::Singleton => {
                let class_ref = &*class;
                let path_ref = &mut *path;
                descriptor
                    .cell()
                    .get_or_try_init(move || self.build(name, class_ref, path_ref))
                    .await
                    .cloned()
            }
            Scope::Prototype => self.build(name, &class, path).await,
        };
        path.leave();

        match &result {
            Ok(_) => self.observers.resolved(name, started.elapsed()),
            Err(error) => {
                warn!(component = name, %error, "Construction failed");
                self.observers.failed(name, error);
            }
        }

        descriptor.present(result?)
    }

    /// Instantiates, wires fields and strategies, then runs hooks in order.
    ///
    /// Boxed so each nesting level keeps its state on the heap.
    fn build<'a>(
        &'a self,
        name: &'a str,
        class: &'a ComponentClass,
        path: &'a mut ResolutionPath,
    ) -> BoxFuture<'a, DiResult<AnyArc>> {
        Box::pin(async move {
            let mut instance = class.instantiate()?;
            let metadata = Arc::clone(class.metadata());

            for dependency in metadata.dependency_fields() {
                let value = self.resolve_in(&dependency.key, path).await?;
                let value = match &dependency.transform {
                    Some(transform) => transform.apply(value),
                    None => value,
                };
                trace!(component = name, field = %dependency.field, key = %dependency.key, "Injecting dependency");
                instance.inject(&dependency.field, value)?;
            }

            for strategy in metadata.strategy_fields() {
                let items = self.strategy_in(&strategy.interface, path).await?;
                if items.is_empty() && self.options.strict_strategies {
                    return Err(DiError::NoImplementations(strategy.interface.clone()));
                }
                let value = Resolved::Many(items);
                let value = match &strategy.transform {
                    Some(transform) => transform.apply(value),
                    None => value,
                };
                trace!(component = name, field = %strategy.field, interface = %strategy.interface, "Injecting strategy");
                instance.inject(&strategy.field, value)?;
            }

            for hook in metadata.post_construct_hooks() {
                debug!(component = name, hook, "Running post-construct hook");
                instance.post_construct(hook).await?;
            }

            Ok(instance.into_any_arc())
        })
    }
}
