//! Host values outside the built-in catalogue.
//!
//! An [`Object`] carries any `'static` value that can be compared and printed. It is
//! encoded by whatever [`Dispatch`](crate::dispatch::Dispatch) has registered for its
//! concrete type.

use std::{
    any::{self, Any, TypeId},
    fmt,
    sync::Arc,
};

/// Object-safe view of an extension value.
///
/// Implemented for every `Any + Debug + PartialEq + Send + Sync` type.
pub trait Extension: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn Extension) -> bool;
}

impl<T: Any + fmt::Debug + PartialEq + Send + Sync> Extension for T {
    fn as_any(&self) -> &dyn Any { self }

    fn dyn_eq(&self, other: &dyn Extension) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .map_or(false, |o| self == o)
    }
}

/// A shared, type-erased host value.
#[derive(Clone)]
pub struct Object {
    inner: Arc<dyn Extension>,
    type_name: &'static str,
}

impl Object {
    pub fn new<T: Extension>(value: T) -> Self {
        Object {
            inner: Arc::new(value),
            type_name: any::type_name::<T>(),
        }
    }

    /// The concrete type's [`TypeId`], used as the dispatch key.
    pub fn type_id(&self) -> TypeId { Any::type_id(self.inner.as_any()) }

    /// The concrete type's name.
    pub fn type_name(&self) -> &'static str { self.type_name }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> { self.inner.as_any().downcast_ref() }

    pub fn is<T: Any>(&self) -> bool { self.type_id() == TypeId::of::<T>() }
}

impl PartialEq for Object {
    fn eq(&self, other: &Object) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner.dyn_eq(&*other.inner)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt::Debug::fmt(&*self.inner, f) }
}
