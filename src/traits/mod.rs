//! Core traits for the dependency injection container.

mod component;

pub use component::{Component, IntoAnyArc};
