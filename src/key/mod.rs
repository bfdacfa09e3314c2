//! Key equality strategies.
//!
//! Ids are not restricted to primitives, so the storage core never relies on
//! a native hash or pointer identity for lookups. Every lookup, replacement
//! and deletion goes through a [`KeyEq`] strategy instead.

use std::marker::PhantomData;

/// Equality over identifier values.
///
/// Implementations must be reflexive, symmetric and transitive over the ids
/// used by one aggregate type. An inconsistent strategy is a caller error
/// and is not detected at runtime.
pub trait KeyEq<K: ?Sized>: Send + Sync {
    fn key_eq(&self, a: &K, b: &K) -> bool;
}

/// Compares ids with their `PartialEq` implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueEq;

impl<K: PartialEq + ?Sized> KeyEq<K> for ValueEq {
    fn key_eq(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

impl<K: ?Sized, F> KeyEq<K> for F
where
    F: Fn(&K, &K) -> bool + Send + Sync,
{
    fn key_eq(&self, a: &K, b: &K) -> bool {
        self(a, b)
    }
}

/// Compares ids by a canonical projection, e.g. a normalized string.
pub struct ProjectedEq<F, P> {
    project: F,
    _marker: PhantomData<fn() -> P>,
}

impl<K: ?Sized, P, F> KeyEq<K> for ProjectedEq<F, P>
where
    F: Fn(&K) -> P + Send + Sync,
    P: PartialEq,
{
    fn key_eq(&self, a: &K, b: &K) -> bool {
        (self.project)(a) == (self.project)(b)
    }
}

/// Build a strategy that treats two ids as equal when their projections are.
pub fn by_projection<K: ?Sized, P, F>(project: F) -> ProjectedEq<F, P>
where
    F: Fn(&K) -> P + Send + Sync,
    P: PartialEq,
{
    ProjectedEq {
        project,
        _marker: PhantomData,
    }
}
