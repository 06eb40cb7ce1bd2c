#![no_main]

use libfuzzer_sys::fuzz_target;
use ferrous_wiring::{Component, ComponentClass, ComponentMetadata, DiError, DiResult, Registry, Resolved, Resolver, Scope};
use std::sync::Arc;

#[derive(Default)]
struct Node;

impl Component for Node {
    fn inject(&mut self, _field: &str, _value: Resolved) -> DiResult<()> {
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let count = (data[0] % 8) as usize + 1;
    let registry = Registry::new();

    // Each byte registers one binding: low bits pick the name, the next bits its dependency.
    for &byte in &data[1..] {
        let name = format!("n{}", byte as usize % count);
        let dependency = format!("n{}", (byte >> 3) as usize % (count + 1));
        let scope = Scope::from_singleton(byte & 0x80 == 0);
        let class = ComponentClass::of::<Node>(
            ComponentMetadata::new(name.clone()).depends_on("next", dependency),
        );
        registry.register(name, class, scope);
    }

    let resolver = Resolver::new(Arc::new(registry));
    let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();

    for i in 0..count {
        match rt.block_on(resolver.resolve(&format!("n{}", i))) {
            Ok(_) | Err(DiError::NotFound(_)) | Err(DiError::DepthExceeded(_)) => {}
            Err(DiError::Circular(chain)) => assert_eq!(chain.first().map(String::as_str), Some(format!("n{}", i).as_str())),
            Err(other) => panic!("unexpected error: {}", other),
        }
    }
});
