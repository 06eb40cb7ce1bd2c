use ferrous_wiring::{
    Component, ComponentClass, ComponentMetadata, DiError, Registry, ResolutionObserver, Resolver,
    TracingObserver,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct Leaf;
impl Component for Leaf {}

#[derive(Default)]
struct Events(Mutex<Vec<String>>);

impl ResolutionObserver for Events {
    fn resolving(&self, name: &str, depth: usize) {
        self.0.lock().unwrap().push(format!("resolving {} at {}", name, depth));
    }

    fn resolved(&self, name: &str, _duration: Duration) {
        self.0.lock().unwrap().push(format!("resolved {}", name));
    }

    fn failed(&self, name: &str, error: &DiError) {
        self.0.lock().unwrap().push(format!("failed {}: {}", name, error));
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[tokio::test]
async fn test_observer_sees_nested_constructions() {
    init_tracing();

    let registry = Registry::new();
    registry.register_class(ComponentClass::of::<Leaf>(ComponentMetadata::new("leaf")));
    registry.register_class(ComponentClass::of::<Leaf>(ComponentMetadata::new("missing_dep").depends_on("x", "nowhere")));

    let events = Arc::new(Events::default());
    let mut resolver = Resolver::new(Arc::new(registry));
    resolver
        .add_observer(events.clone())
        .add_observer(Arc::new(TracingObserver));

    resolver.resolve("leaf").await.unwrap();
    // Cache hits are not reported.
    resolver.resolve("leaf").await.unwrap();
    assert!(resolver.resolve("missing_dep").await.is_err());

    let seen = events.0.lock().unwrap().clone();
    assert_eq!(
        seen,
        [
            "resolving leaf at 1",
            "resolved leaf",
            "resolving missing_dep at 1",
            "failed missing_dep: Component not found: nowhere",
        ]
    );
}
