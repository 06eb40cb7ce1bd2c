//! Static dependency graph over component classes.
//!
//! Used before any construction happens: it orders a batch of classes so that
//! every class comes after the classes it depends on (and after its ancestors),
//! and reports the offending chain when no such order exists.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::class::ComponentClass;
use crate::error::{DiError, DiResult};
use crate::metadata::ComponentMetadata;

/// Directed graph: node → the nodes it depends on.
///
/// Nodes are class names, including ancestor levels reached through
/// [`ComponentMetadata::extends`]. Dependency keys and strategy interfaces
/// expand to every node providing that key, by name or by interface tag; keys
/// nothing in the batch provides are ignored.
///
/// # Examples
///
/// ```rust
/// use ferrous_wiring::{Component, ComponentClass, ComponentMetadata, DependencyGraph};
///
/// #[derive(Default)]
/// struct Stub;
/// impl Component for Stub {}
///
/// let classes = vec![
///     ComponentClass::of::<Stub>(ComponentMetadata::new("api").depends_on("svc", "service")),
///     ComponentClass::of::<Stub>(ComponentMetadata::new("service").depends_on("db", "database")),
///     ComponentClass::of::<Stub>(ComponentMetadata::new("database")),
/// ];
///
/// let order = DependencyGraph::from_classes(&classes).topological_order().unwrap();
/// assert_eq!(order, ["database", "service", "api"]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    nodes: Vec<String>,
    index: HashMap<String, usize>,
    edges: Vec<Vec<usize>>,
}

impl DependencyGraph {
    pub fn from_classes(classes: &[Arc<ComponentClass>]) -> Self {
        let mut graph = DependencyGraph::default();
        let mut providers: HashMap<String, Vec<usize>> = HashMap::new();
        let mut levels: Vec<&ComponentMetadata> = Vec::new();

        for class in classes {
            for level in class.metadata().chain() {
                let node = graph.add_node(level.name());
                push_unique(providers.entry(level.name().to_string()).or_default(), node);
                if let Some(interface) = level.interface_key() {
                    push_unique(providers.entry(interface.to_string()).or_default(), node);
                }
                if !levels.iter().any(|seen| std::ptr::eq(*seen, level)) {
                    levels.push(level);
                }
            }
        }

        for level in levels {
            let from = graph.index[level.name()];
            let targets = level
                .own_dependencies()
                .iter()
                .map(|dep| dep.key.as_str())
                .chain(level.own_strategies().iter().map(|s| s.interface.as_str()));
            for key in targets {
                for &to in providers.get(key).into_iter().flatten() {
                    push_unique(&mut graph.edges[from], to);
                }
            }
            if let Some(parent) = level.parent() {
                let to = graph.index[parent.name()];
                push_unique(&mut graph.edges[from], to);
            }
        }

        debug!(nodes = graph.nodes.len(), "Dependency graph built");
        graph
    }

    fn add_node(&mut self, name: &str) -> usize {
        if let Some(&existing) = self.index.get(name) {
            return existing;
        }
        let id = self.nodes.len();
        self.nodes.push(name.to_string());
        self.index.insert(name.to_string(), id);
        self.edges.push(Vec::new());
        id
    }

    /// Node names in insertion order.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Direct dependencies of `name`, or `None` if it is not a node.
    pub fn dependencies_of(&self, name: &str) -> Option<Vec<&str>> {
        let id = *self.index.get(name)?;
        Some(self.edges[id].iter().map(|&to| self.nodes[to].as_str()).collect())
    }

    /// Kahn's algorithm: dependencies first, ties broken by insertion order.
    ///
    /// Fails with [`DiError::Circular`] carrying the first cycle found when
    /// some nodes can never reach in-degree zero.
    pub fn topological_order(&self) -> DiResult<Vec<String>> {
        let mut in_degree: Vec<usize> = self.edges.iter().map(Vec::len).collect();
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
        for (from, targets) in self.edges.iter().enumerate() {
            for &to in targets {
                dependents[to].push(from);
            }
        }

        let mut queue: VecDeque<usize> = (0..self.nodes.len())
            .filter(|&node| in_degree[node] == 0)
            .collect();
        let mut order = Vec::with_capacity(self.nodes.len());

        while let Some(node) = queue.pop_front() {
            order.push(self.nodes[node].clone());
            for &dependent in &dependents[node] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    queue.push_back(dependent);
                }
            }
        }

        if order.len() != self.nodes.len() {
            let chain = self.find_cycle().unwrap_or_default();
            warn!(cycle = %chain.join(" -> "), "Dependency cycle detected");
            return Err(DiError::Circular(chain));
        }
        Ok(order)
    }

    /// Depth-first search with a recursion stack; returns the chain closed by
    /// the first back-edge, e.g. `["a", "b", "a"]`.
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        let mut state = vec![Visit::New; self.nodes.len()];
        let mut stack = Vec::new();
        (0..self.nodes.len()).find_map(|start| {
            if state[start] == Visit::New {
                self.visit(start, &mut state, &mut stack)
            } else {
                None
            }
        })
    }

    fn visit(&self, node: usize, state: &mut [Visit], stack: &mut Vec<usize>) -> Option<Vec<String>> {
        state[node] = Visit::OnStack;
        stack.push(node);

        for &next in &self.edges[node] {
            match state[next] {
                Visit::OnStack => {
                    let start = stack.iter().position(|&n| n == next).unwrap_or(0);
                    let mut chain: Vec<String> =
                        stack[start..].iter().map(|&n| self.nodes[n].clone()).collect();
                    chain.push(self.nodes[next].clone());
                    return Some(chain);
                }
                Visit::New => {
                    if let Some(chain) = self.visit(next, state, stack) {
                        return Some(chain);
                    }
                }
                Visit::Done => {}
            }
        }

        stack.pop();
        state[node] = Visit::Done;
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    OnStack,
    Done,
}

fn push_unique(targets: &mut Vec<usize>, id: usize) {
    if !targets.contains(&id) {
        targets.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Component;

    #[derive(Default)]
    struct Node;
    impl Component for Node {}

    fn class(metadata: ComponentMetadata) -> Arc<ComponentClass> {
        ComponentClass::of::<Node>(metadata)
    }

    #[test]
    fn diamond_orders_shared_dependency_first() {
        let classes = vec![
            class(ComponentMetadata::new("a").depends_on("c", "c")),
            class(ComponentMetadata::new("b").depends_on("c", "c")),
            class(ComponentMetadata::new("c")),
        ];
        let order = DependencyGraph::from_classes(&classes).topological_order().unwrap();
        assert_eq!(order, ["c", "a", "b"]);
    }

    #[test]
    fn cycle_is_reported_with_chain() {
        let classes = vec![
            class(ComponentMetadata::new("a").depends_on("b", "b")),
            class(ComponentMetadata::new("b").depends_on("c", "c")),
            class(ComponentMetadata::new("c").depends_on("a", "a")),
        ];
        let err = DependencyGraph::from_classes(&classes).topological_order().unwrap_err();
        assert_eq!(err.cycle().unwrap(), ["a", "b", "c", "a"]);
    }

    #[test]
    fn self_dependency_is_a_cycle() {
        let classes = vec![class(ComponentMetadata::new("loop").depends_on("me", "loop"))];
        let graph = DependencyGraph::from_classes(&classes);
        assert_eq!(graph.find_cycle().unwrap(), ["loop", "loop"]);
    }

    #[test]
    fn parents_precede_children() {
        let base = Arc::new(ComponentMetadata::new("base").depends_on("log", "logger"));
        let classes = vec![
            class(ComponentMetadata::new("child").extends(&base)),
            class(ComponentMetadata::new("logger")),
        ];
        let graph = DependencyGraph::from_classes(&classes);
        assert_eq!(graph.dependencies_of("child").unwrap(), ["base"]);
        assert_eq!(graph.dependencies_of("base").unwrap(), ["logger"]);

        let order = graph.topological_order().unwrap();
        assert_eq!(order, ["logger", "base", "child"]);
    }

    #[test]
    fn strategy_interfaces_expand_to_implementations() {
        let classes = vec![
            class(ComponentMetadata::new("router").strategy("routes", "Route")),
            class(ComponentMetadata::new("home").interface("Route")),
            class(ComponentMetadata::new("about").interface("Route")),
        ];
        let graph = DependencyGraph::from_classes(&classes);
        assert_eq!(graph.dependencies_of("router").unwrap(), ["home", "about"]);
        assert_eq!(graph.topological_order().unwrap(), ["home", "about", "router"]);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let classes = vec![class(ComponentMetadata::new("svc").depends_on("cfg", "config"))];
        let graph = DependencyGraph::from_classes(&classes);
        assert!(graph.dependencies_of("svc").unwrap().is_empty());
        assert!(graph.dependencies_of("config").is_none());
    }
}
