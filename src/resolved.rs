//! Resolution results.

use std::any::{type_name, Any};
use std::sync::Arc;

use crate::error::{DiError, DiResult};

/// Type-erased shared instance as stored in the registry.
pub type AnyArc = Arc<dyn Any + Send + Sync>;

/// The outcome of resolving a name.
///
/// A single-bound name yields `One`; a multi-bound name (several descriptors
/// under the same key) yields `Many`, ordered by registration.
///
/// # Examples
///
/// ```rust
/// use ferrous_wiring::{AnyArc, Resolved};
/// use std::sync::Arc;
///
/// let one = Resolved::One(Arc::new(7u32) as AnyArc);
/// assert_eq!(*one.clone().downcast::<u32>("answer").unwrap(), 7);
/// assert_eq!(one.downcast_all::<u32>("answer").unwrap().len(), 1);
/// ```
#[derive(Clone)]
pub enum Resolved {
    One(AnyArc),
    Many(Vec<AnyArc>),
}

impl Resolved {
    /// Number of instances carried.
    pub fn len(&self) -> usize {
        match self {
            Resolved::One(_) => 1,
            Resolved::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_many(&self) -> bool {
        matches!(self, Resolved::Many(_))
    }

    /// Flattens into a vector; a single value becomes a one-element vector.
    pub fn into_vec(self) -> Vec<AnyArc> {
        match self {
            Resolved::One(item) => vec![item],
            Resolved::Many(items) => items,
        }
    }

    /// Applies `f` to every carried instance, keeping the shape.
    pub fn map_each<F>(self, f: F) -> Resolved
    where
        F: Fn(AnyArc) -> AnyArc,
    {
        match self {
            Resolved::One(item) => Resolved::One(f(item)),
            Resolved::Many(items) => Resolved::Many(items.into_iter().map(f).collect()),
        }
    }

    /// Downcasts a single value to its concrete type.
    ///
    /// `name` is only used to label the error.
    pub fn downcast<T: Any + Send + Sync>(self, name: &str) -> DiResult<Arc<T>> {
        match self {
            Resolved::One(item) => downcast_item(item, name),
            Resolved::Many(_) => Err(mismatch::<T>(name)),
        }
    }

    /// Downcasts every carried value to the same concrete type.
    pub fn downcast_all<T: Any + Send + Sync>(self, name: &str) -> DiResult<Vec<Arc<T>>> {
        self.into_vec()
            .into_iter()
            .map(|item| downcast_item(item, name))
            .collect()
    }

    /// Extracts a single interface view (`Arc<dyn I>`) produced by a class view.
    pub fn view<I: ?Sized + Send + Sync + 'static>(self, name: &str) -> DiResult<Arc<I>> {
        match self {
            Resolved::One(item) => view_item(item, name),
            Resolved::Many(_) => Err(mismatch::<Arc<I>>(name)),
        }
    }

    /// Extracts every carried value as an interface view.
    pub fn views<I: ?Sized + Send + Sync + 'static>(self, name: &str) -> DiResult<Vec<Arc<I>>> {
        self.into_vec()
            .into_iter()
            .map(|item| view_item(item, name))
            .collect()
    }
}

impl std::fmt::Debug for Resolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolved::One(_) => f.write_str("Resolved::One(..)"),
            Resolved::Many(items) => write!(f, "Resolved::Many({} items)", items.len()),
        }
    }
}

fn downcast_item<T: Any + Send + Sync>(item: AnyArc, name: &str) -> DiResult<Arc<T>> {
    item.downcast::<T>().map_err(|_| mismatch::<T>(name))
}

fn view_item<I: ?Sized + Send + Sync + 'static>(item: AnyArc, name: &str) -> DiResult<Arc<I>> {
    item.downcast::<Arc<I>>()
        .map(|outer| Arc::clone(&*outer))
        .map_err(|_| mismatch::<Arc<I>>(name))
}

fn mismatch<T: ?Sized>(name: &str) -> DiError {
    DiError::TypeMismatch {
        name: name.to_string(),
        expected: type_name::<T>(),
    }
}
