/// Property-based tests for component resolution
///
/// These tests verify that resolution behavior follows expected patterns
/// regardless of the shape of the registered graph.

use ferrous_wiring::{
    Component, ComponentClass, ComponentMetadata, DependencyGraph, DiError, DiResult, Registry,
    Resolved, Resolver,
};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Default)]
struct Node {
    children: usize,
}

impl Component for Node {
    fn inject(&mut self, _field: &str, value: Resolved) -> DiResult<()> {
        self.children += value.len();
        Ok(())
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

/// Node `i` depends on every `j < i` picked by the edge mask: always acyclic.
fn acyclic_classes(edges: &[Vec<bool>]) -> Vec<Arc<ComponentClass>> {
    edges
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut metadata = ComponentMetadata::new(format!("n{}", i));
            for (j, &linked) in row.iter().enumerate().take(i) {
                if linked {
                    metadata = metadata.depends_on(format!("f{}", j), format!("n{}", j));
                }
            }
            ComponentClass::of::<Node>(metadata)
        })
        .collect()
}

fn edge_matrix() -> impl Strategy<Value = Vec<Vec<bool>>> {
    (1usize..8).prop_flat_map(|n| prop::collection::vec(prop::collection::vec(any::<bool>(), n), n))
}

proptest! {
    #[test]
    fn topological_order_puts_dependencies_first(edges in edge_matrix()) {
        let classes = acyclic_classes(&edges);
        let graph = DependencyGraph::from_classes(&classes);
        let order = graph.topological_order().unwrap();

        prop_assert_eq!(order.len(), classes.len());
        let mut placed = HashSet::new();
        for name in &order {
            for dependency in graph.dependencies_of(name).unwrap() {
                prop_assert!(placed.contains(dependency), "{} placed before {}", name, dependency);
            }
            placed.insert(name.as_str());
        }
    }
}

proptest! {
    #[test]
    fn every_acyclic_graph_resolves_with_shared_singletons(edges in edge_matrix()) {
        let classes = acyclic_classes(&edges);
        let registry = Arc::new(Registry::new());
        registry.register_all(&classes).unwrap();
        let resolver = Resolver::new(registry);

        runtime().block_on(async {
            for (i, row) in edges.iter().enumerate() {
                let name = format!("n{}", i);
                let first = resolver.get::<Node>(&name).await.unwrap();
                let again = resolver.get::<Node>(&name).await.unwrap();
                assert!(Arc::ptr_eq(&first, &again));
                assert_eq!(first.children, row.iter().take(i).filter(|&&b| b).count());
            }
        });
    }
}

proptest! {
    #[test]
    fn ring_of_any_length_is_reported_as_cycle(len in 1usize..8) {
        let registry = Registry::new();
        for i in 0..len {
            registry.register_class(ComponentClass::of::<Node>(
                ComponentMetadata::new(format!("r{}", i)).depends_on("next", format!("r{}", (i + 1) % len)),
            ));
        }
        let resolver = Resolver::new(Arc::new(registry));

        let err = runtime().block_on(resolver.resolve("r0")).unwrap_err();
        match err {
            DiError::Circular(chain) => {
                prop_assert_eq!(chain.len(), len + 1);
                prop_assert_eq!(chain.first(), chain.last());
            }
            other => prop_assert!(false, "unexpected error {:?}", other),
        }
    }
}
