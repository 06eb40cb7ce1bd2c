/// Unit tests for DiError and DiResult types

use ferrous_wiring::{DiError, DiResult};
use std::error::Error;
use std::fmt;

#[derive(Debug)]
struct Refused;

impl fmt::Display for Refused {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("connection refused")
    }
}

impl Error for Refused {}

#[test]
fn test_error_display_not_found() {
    let error = DiError::NotFound("userService".to_string());
    assert_eq!(error.to_string(), "Component not found: userService");
}

#[test]
fn test_error_display_circular() {
    let error = DiError::Circular(vec!["a".into(), "b".into(), "a".into()]);
    assert_eq!(error.to_string(), "Circular dependency: a -> b -> a");
    assert_eq!(error.cycle().unwrap(), ["a", "b", "a"]);
}

#[test]
fn test_error_display_duplicate_instance() {
    let error = DiError::DuplicateInstance("port".to_string());
    assert_eq!(error.to_string(), "Instance already registered: port");
    assert!(error.cycle().is_none());
}

#[test]
fn test_error_display_type_mismatch() {
    let error = DiError::TypeMismatch {
        name: "port".to_string(),
        expected: "alloc::string::String",
    };
    assert_eq!(error.to_string(), "Type mismatch for port: expected alloc::string::String");
}

#[test]
fn test_error_display_unknown_field_and_hook() {
    let field = DiError::UnknownField {
        component: "Server",
        field: "db".to_string(),
    };
    let hook = DiError::UnknownHook {
        component: "Server",
        hook: "start".to_string(),
    };
    assert_eq!(field.to_string(), "Component Server has no injectable field `db`");
    assert_eq!(hook.to_string(), "Component Server has no post-construct hook `start`");
}

#[test]
fn test_error_display_limits() {
    assert_eq!(
        DiError::NoImplementations("Handler".to_string()).to_string(),
        "No implementations registered for interface: Handler"
    );
    assert_eq!(DiError::DepthExceeded(32).to_string(), "Max depth 32 exceeded");
}

#[test]
fn test_component_error_is_transparent() {
    let error = DiError::component(Refused);
    assert_eq!(error.to_string(), "connection refused");
    assert!(error.downcast_component::<Refused>().is_some());
    assert!(error.downcast_component::<std::io::Error>().is_none());

    // Cloning shares the original error.
    let copy = error.clone();
    assert!(copy.downcast_component::<Refused>().is_some());
}

#[test]
fn test_component_error_from_string() {
    let error = DiError::component("bad config");
    assert_eq!(error.to_string(), "bad config");
    assert!(DiError::NotFound("x".into()).downcast_component::<Refused>().is_none());
}

#[test]
fn test_di_result_propagates_with_question_mark() {
    fn inner() -> DiResult<u8> {
        Err(DiError::NotFound("inner".into()))
    }

    fn outer() -> DiResult<u8> {
        let value = inner()?;
        Ok(value + 1)
    }

    assert!(matches!(outer(), Err(DiError::NotFound(name)) if name == "inner"));
}
