#![no_main]

use libfuzzer_sys::fuzz_target;
use ferrous_wiring::{Component, ComponentClass, ComponentMetadata, DependencyGraph, Registry};
use std::collections::HashSet;

#[derive(Default)]
struct Node;
impl Component for Node {}

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // First byte picks the node count, every following pair is an edge.
    let count = (data[0] % 16) as usize + 1;
    let mut metadata: Vec<ComponentMetadata> =
        (0..count).map(|i| ComponentMetadata::new(format!("n{}", i))).collect();

    for (k, pair) in data[1..].chunks_exact(2).enumerate() {
        let from = pair[0] as usize % count;
        let to = pair[1] as usize % count;
        let level = std::mem::replace(&mut metadata[from], ComponentMetadata::new(""));
        metadata[from] = level.depends_on(format!("f{}", k), format!("n{}", to));
    }

    let classes: Vec<_> = metadata.into_iter().map(ComponentClass::of::<Node>).collect();
    let graph = DependencyGraph::from_classes(&classes);

    match graph.topological_order() {
        Ok(order) => {
            assert!(graph.find_cycle().is_none());
            let mut placed = HashSet::new();
            for name in &order {
                for dependency in graph.dependencies_of(name).unwrap() {
                    assert!(placed.contains(dependency));
                }
                placed.insert(name.as_str());
            }

            let registry = Registry::new();
            assert_eq!(registry.register_all(&classes).unwrap(), order);
        }
        Err(err) => {
            let chain = err.cycle().expect("ordering only fails on cycles");
            assert!(chain.len() >= 2);
            assert_eq!(chain.first(), chain.last());
        }
    }
});
