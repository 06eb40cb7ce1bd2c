//! Pure-data component metadata.
//!
//! Metadata describes what the resolver wires into a component: the field to
//! dependency-key map, the field to strategy-interface map, post-construct hook
//! names and tags. Each [`ComponentMetadata`] carries only its *own* level;
//! inheritance is modelled by linking a parent with [`ComponentMetadata::extends`]
//! and the walking helpers merge levels most-derived first.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::resolved::{AnyArc, Resolved};
use crate::scope::Scope;

/// Optional post-processing applied to a resolved field value before assignment.
#[derive(Clone)]
pub enum FieldTransform {
    /// Receives the whole resolved value (single instance or collection).
    Whole(Arc<dyn Fn(Resolved) -> Resolved + Send + Sync>),
    /// Receives every instance individually; the shape is preserved.
    Each(Arc<dyn Fn(AnyArc) -> AnyArc + Send + Sync>),
}

impl FieldTransform {
    pub fn whole<F>(f: F) -> Self
    where
        F: Fn(Resolved) -> Resolved + Send + Sync + 'static,
    {
        FieldTransform::Whole(Arc::new(f))
    }

    pub fn each<F>(f: F) -> Self
    where
        F: Fn(AnyArc) -> AnyArc + Send + Sync + 'static,
    {
        FieldTransform::Each(Arc::new(f))
    }

    pub fn apply(&self, value: Resolved) -> Resolved {
        match self {
            FieldTransform::Whole(f) => f(value),
            FieldTransform::Each(f) => value.map_each(|item| f(item)),
        }
    }
}

impl fmt::Debug for FieldTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldTransform::Whole(_) => f.write_str("FieldTransform::Whole"),
            FieldTransform::Each(_) => f.write_str("FieldTransform::Each"),
        }
    }
}

/// A field wired from a single dependency key.
#[derive(Debug, Clone)]
pub struct DependencyField {
    pub field: String,
    pub key: String,
    pub transform: Option<FieldTransform>,
}

/// A field wired with every implementation bound to an interface key.
#[derive(Debug, Clone)]
pub struct StrategyField {
    pub field: String,
    pub interface: String,
    pub transform: Option<FieldTransform>,
}

/// Own-level metadata for one component class.
///
/// # Examples
///
/// ```rust
/// use ferrous_wiring::{ComponentMetadata, Scope};
/// use std::sync::Arc;
///
/// let base = Arc::new(
///     ComponentMetadata::new("baseController")
///         .depends_on("logger", "logger")
///         .post_construct("init"),
/// );
/// let users = ComponentMetadata::new("userController")
///     .component_type("controller")
///     .scope(Scope::Prototype)
///     .depends_on("repo", "userRepository")
///     .post_construct("init")
///     .extends(&base);
///
/// let fields: Vec<_> = users.dependency_fields().iter().map(|f| f.field.as_str()).collect();
/// assert_eq!(fields, ["repo", "logger"]);
/// assert_eq!(users.post_construct_hooks(), ["init"]);
/// ```
#[derive(Debug, Clone)]
pub struct ComponentMetadata {
    name: String,
    scope: Scope,
    component_type: Option<String>,
    interface: Option<String>,
    dependencies: Vec<DependencyField>,
    strategies: Vec<StrategyField>,
    post_construct: Vec<String>,
    parent: Option<Arc<ComponentMetadata>>,
}

impl ComponentMetadata {
    /// Creates singleton-scoped metadata with no fields or hooks.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: Scope::Singleton,
            component_type: None,
            interface: None,
            dependencies: Vec::new(),
            strategies: Vec::new(),
            post_construct: Vec::new(),
            parent: None,
        }
    }

    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn prototype(self) -> Self {
        self.scope(Scope::Prototype)
    }

    /// Tags the component for [`Registry::query`](crate::Registry::query).
    pub fn component_type(mut self, tag: impl Into<String>) -> Self {
        self.component_type = Some(tag.into());
        self
    }

    /// Additionally binds the class under an interface-level key.
    pub fn interface(mut self, key: impl Into<String>) -> Self {
        self.interface = Some(key.into());
        self
    }

    pub fn depends_on(self, field: impl Into<String>, key: impl Into<String>) -> Self {
        self.push_dependency(field.into(), key.into(), None)
    }

    pub fn depends_on_with(
        self,
        field: impl Into<String>,
        key: impl Into<String>,
        transform: FieldTransform,
    ) -> Self {
        self.push_dependency(field.into(), key.into(), Some(transform))
    }

    pub fn strategy(self, field: impl Into<String>, interface: impl Into<String>) -> Self {
        self.push_strategy(field.into(), interface.into(), None)
    }

    pub fn strategy_with(
        self,
        field: impl Into<String>,
        interface: impl Into<String>,
        transform: FieldTransform,
    ) -> Self {
        self.push_strategy(field.into(), interface.into(), Some(transform))
    }

    pub fn post_construct(mut self, hook: impl Into<String>) -> Self {
        self.post_construct.push(hook.into());
        self
    }

    /// Declares `parent` as the next less-derived level.
    pub fn extends(mut self, parent: &Arc<ComponentMetadata>) -> Self {
        self.parent = Some(Arc::clone(parent));
        self
    }

    // Redeclaring a field on the same level replaces it in place.
    fn push_dependency(mut self, field: String, key: String, transform: Option<FieldTransform>) -> Self {
        let entry = DependencyField { field, key, transform };
        match self.dependencies.iter_mut().find(|d| d.field == entry.field) {
            Some(existing) => *existing = entry,
            None => self.dependencies.push(entry),
        }
        self
    }

    fn push_strategy(mut self, field: String, interface: String, transform: Option<FieldTransform>) -> Self {
        let entry = StrategyField { field, interface, transform };
        match self.strategies.iter_mut().find(|s| s.field == entry.field) {
            Some(existing) => *existing = entry,
            None => self.strategies.push(entry),
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_scope(&self) -> Scope {
        self.scope
    }

    pub fn interface_key(&self) -> Option<&str> {
        self.interface.as_deref()
    }

    /// The nearest component-type tag walking towards the root.
    pub fn component_type_tag(&self) -> Option<&str> {
        self.chain().find_map(|level| level.component_type.as_deref())
    }

    pub fn parent(&self) -> Option<&Arc<ComponentMetadata>> {
        self.parent.as_ref()
    }

    /// Own-level dependency declarations, in declaration order.
    pub fn own_dependencies(&self) -> &[DependencyField] {
        &self.dependencies
    }

    pub fn own_strategies(&self) -> &[StrategyField] {
        &self.strategies
    }

    pub fn own_post_construct(&self) -> &[String] {
        &self.post_construct
    }

    /// Iterates this level and its ancestors, most-derived first.
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// Dependency fields across the chain; a field declared at a more-derived
    /// level hides every ancestor entry with the same field name.
    pub fn dependency_fields(&self) -> Vec<&DependencyField> {
        let mut seen = HashSet::new();
        self.chain()
            .flat_map(|level| level.dependencies.iter())
            .filter(|dep| seen.insert(dep.field.as_str()))
            .collect()
    }

    pub fn strategy_fields(&self) -> Vec<&StrategyField> {
        let mut seen = HashSet::new();
        self.chain()
            .flat_map(|level| level.strategies.iter())
            .filter(|strategy| seen.insert(strategy.field.as_str()))
            .collect()
    }

    /// Hook names in invocation order, each name at most once.
    pub fn post_construct_hooks(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.chain()
            .flat_map(|level| level.post_construct.iter())
            .map(String::as_str)
            .filter(|hook| seen.insert(*hook))
            .collect()
    }
}

/// Iterator over a metadata inheritance chain.
pub struct Chain<'a> {
    next: Option<&'a ComponentMetadata>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a ComponentMetadata;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent.as_deref();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_levels() -> ComponentMetadata {
        let grand = Arc::new(
            ComponentMetadata::new("base")
                .component_type("service")
                .depends_on("db", "database")
                .depends_on("cache", "memoryCache")
                .post_construct("init")
                .post_construct("warm"),
        );
        let parent = Arc::new(
            ComponentMetadata::new("middle")
                .depends_on("cache", "redisCache")
                .strategy("handlers", "Handler")
                .post_construct("init")
                .extends(&grand),
        );
        ComponentMetadata::new("leaf")
            .strategy("handlers", "SpecialHandler")
            .post_construct("ready")
            .extends(&parent)
    }

    #[test]
    fn chain_walks_derived_first() {
        let leaf = three_levels();
        let names: Vec<_> = leaf.chain().map(|m| m.name()).collect();
        assert_eq!(names, ["leaf", "middle", "base"]);
    }

    #[test]
    fn derived_field_declarations_win() {
        let leaf = three_levels();
        let deps: Vec<_> = leaf
            .dependency_fields()
            .into_iter()
            .map(|d| (d.field.as_str(), d.key.as_str()))
            .collect();
        assert_eq!(deps, [("cache", "redisCache"), ("db", "database")]);

        let strategies = leaf.strategy_fields();
        assert_eq!(strategies.len(), 1);
        assert_eq!(strategies[0].interface, "SpecialHandler");
    }

    #[test]
    fn hooks_are_deduplicated_by_name() {
        let leaf = three_levels();
        assert_eq!(leaf.post_construct_hooks(), ["ready", "init", "warm"]);
    }

    #[test]
    fn component_type_is_inherited() {
        let leaf = three_levels();
        assert_eq!(leaf.component_type_tag(), Some("service"));
        assert_eq!(ComponentMetadata::new("bare").component_type_tag(), None);
    }

    #[test]
    fn redeclaring_on_same_level_replaces() {
        let meta = ComponentMetadata::new("x")
            .depends_on("a", "first")
            .depends_on("a", "second");
        assert_eq!(meta.own_dependencies().len(), 1);
        assert_eq!(meta.own_dependencies()[0].key, "second");
    }
}
