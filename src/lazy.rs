//! Sources whose length is not known up front.
//!
//! Both are consumed as they are encoded: encoding the same [`LazySeq`] twice writes
//! whatever the iterator has left.

use crate::Value;
use std::{
    fmt,
    io::Read,
    sync::{Arc, Mutex, MutexGuard},
};

type Items = Box<dyn Iterator<Item = Value> + Send>;

/// A lazily produced sequence, encoded as an uncountable aggregate.
#[derive(Clone)]
pub struct LazySeq(Arc<Mutex<Items>>);

impl LazySeq {
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: Send + 'static,
    {
        LazySeq(Arc::new(Mutex::new(Box::new(items.into_iter()))))
    }

    pub(crate) fn lock(&self) -> MutexGuard<Items> { self.0.lock().unwrap_or_else(|e| e.into_inner()) }
}

impl PartialEq for LazySeq {
    fn eq(&self, other: &LazySeq) -> bool { Arc::ptr_eq(&self.0, &other.0) }
}

impl fmt::Debug for LazySeq {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "LazySeq(..)") }
}

type Source = Box<dyn Read + Send>;

/// A byte source, encoded in chunks of `byte_chunk_size`.
#[derive(Clone)]
pub struct ByteStream(Arc<Mutex<Source>>);

impl ByteStream {
    pub fn new<R: Read + Send + 'static>(source: R) -> Self { ByteStream(Arc::new(Mutex::new(Box::new(source)))) }

    pub(crate) fn lock(&self) -> MutexGuard<Source> { self.0.lock().unwrap_or_else(|e| e.into_inner()) }
}

impl PartialEq for ByteStream {
    fn eq(&self, other: &ByteStream) -> bool { Arc::ptr_eq(&self.0, &other.0) }
}

impl fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "ByteStream(..)") }
}
