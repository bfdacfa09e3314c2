//! InMemoryStorage - RwLock-guarded live and trash partitions.

use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, trace};

use super::GetAllOptions;
use crate::aggregate::Aggregate;
use crate::error::NotFound;
use crate::key::{KeyEq, ValueEq};

/// Both partitions, ordered by first insertion.
struct Partitions<A> {
    live: Vec<A>,
    trash: Vec<A>,
}

/// In-memory aggregate store with soft delete.
///
/// Partitions are ordered association lists scanned with the configured
/// [`KeyEq`] strategy; there is no index. Replacing an id keeps its
/// position. All mutations run under one write guard, so a reader never
/// observes a half-applied `store_all` or `remove_all`.
///
/// Predicates are evaluated on copies after the guard is released, so a
/// predicate may call back into the same storage.
pub struct InMemoryStorage<A: Aggregate> {
    aggregate_name: String,
    key_eq: Box<dyn KeyEq<A::Id>>,
    partitions: RwLock<Partitions<A>>,
}

impl<A: Aggregate> InMemoryStorage<A>
where
    A::Id: PartialEq,
{
    /// Create an empty store comparing ids with `PartialEq`.
    pub fn new(aggregate_name: impl Into<String>) -> Self {
        Self::with_key_eq(aggregate_name, ValueEq)
    }
}

impl<A: Aggregate> InMemoryStorage<A> {
    /// Create an empty store comparing ids with a custom strategy.
    pub fn with_key_eq<Q>(aggregate_name: impl Into<String>, key_eq: Q) -> Self
    where
        Q: KeyEq<A::Id> + 'static,
    {
        Self::from_parts(aggregate_name.into(), Box::new(key_eq))
    }

    pub(crate) fn from_parts(aggregate_name: String, key_eq: Box<dyn KeyEq<A::Id>>) -> Self {
        Self {
            aggregate_name,
            key_eq,
            partitions: RwLock::new(Partitions {
                live: Vec::new(),
                trash: Vec::new(),
            }),
        }
    }

    /// Name used in not-found diagnostics.
    pub fn aggregate_name(&self) -> &str {
        &self.aggregate_name
    }

    // Mutations run every caller-supplied call (key strategy, Clone) before
    // they touch the partitions, so a poisoned guard still protects
    // consistent data.
    fn read(&self) -> RwLockReadGuard<'_, Partitions<A>> {
        self.partitions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Partitions<A>> {
        self.partitions.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn matches_any(&self, aggregate: &A, ids: &[A::Id]) -> bool {
        ids.iter().any(|id| self.key_eq.key_eq(aggregate.id(), id))
    }

    fn not_found(&self, id: &A::Id) -> NotFound {
        debug!(aggregate = %self.aggregate_name, %id, "aggregate not found");
        NotFound::new(&self.aggregate_name, id)
    }

    /// Copy of the live aggregate with this id, if any.
    pub fn find_by_id(&self, id: &A::Id) -> Option<A> {
        let partitions = self.read();
        let found = position(&*self.key_eq, &partitions.live, id).map(|i| partitions.live[i].clone());
        trace!(aggregate = %self.aggregate_name, %id, found = found.is_some(), "find_by_id");
        found
    }

    /// Copy of the live aggregate with this id, or [`NotFound`].
    pub fn get_by_id(&self, id: &A::Id) -> Result<A, NotFound> {
        self.find_by_id(id).ok_or_else(|| self.not_found(id))
    }

    /// Copies of the live aggregates whose id is in `ids`, in store order.
    ///
    /// Missing ids are silently omitted.
    pub fn get_by_ids(&self, ids: &[A::Id]) -> Vec<A> {
        self.get_all_by(|aggregate| self.matches_any(aggregate, ids))
    }

    /// Copies of the live aggregates, followed by the trashed ones when
    /// `options.with_deleted` is set.
    pub fn get_all(&self, options: GetAllOptions) -> Vec<A> {
        let partitions = self.read();
        let mut all = Vec::with_capacity(partitions.live.len() + partitions.trash.len());
        all.extend(partitions.live.iter().cloned());
        if options.with_deleted {
            all.extend(partitions.trash.iter().cloned());
        }
        all
    }

    /// Copies of the live aggregates matching `predicate`, in store order.
    pub fn get_all_by<F>(&self, predicate: F) -> Vec<A>
    where
        F: Fn(&A) -> bool,
    {
        self.get_all(GetAllOptions::default())
            .into_iter()
            .filter(|aggregate| predicate(aggregate))
            .collect()
    }

    /// First live aggregate matching `predicate`.
    pub fn find_one_by<F>(&self, predicate: F) -> Option<A>
    where
        F: Fn(&A) -> bool,
    {
        self.get_all(GetAllOptions::default())
            .into_iter()
            .find(|aggregate| predicate(aggregate))
    }

    /// First live aggregate matching `predicate`, or the error built by
    /// `on_not_found`.
    pub fn get_one_by<F, E, O>(&self, predicate: F, on_not_found: O) -> Result<A, E>
    where
        F: Fn(&A) -> bool,
        O: FnOnce() -> E,
    {
        self.find_one_by(predicate).ok_or_else(on_not_found)
    }

    /// Whether any live aggregate matches `predicate`.
    pub fn exists_by<F>(&self, predicate: F) -> bool
    where
        F: Fn(&A) -> bool,
    {
        self.find_one_by(predicate).is_some()
    }

    /// Number of live aggregates, plus trashed ones with `with_deleted`.
    pub fn count(&self, options: GetAllOptions) -> usize {
        let partitions = self.read();
        if options.with_deleted {
            partitions.live.len() + partitions.trash.len()
        } else {
            partitions.live.len()
        }
    }

    /// Insert or replace `aggregate` in the live partition.
    ///
    /// A copy is stored; the caller keeps the returned value.
    pub fn store(&self, aggregate: A) -> A {
        let mut partitions = self.write();
        let replaced = upsert(&*self.key_eq, &mut partitions.live, aggregate.clone());
        debug!(aggregate = %self.aggregate_name, id = %aggregate.id(), replaced, "stored aggregate");
        aggregate
    }

    /// Store every aggregate, in input order, under a single write guard.
    pub fn store_all<I>(&self, aggregates: I) -> Vec<A>
    where
        I: IntoIterator<Item = A>,
    {
        let aggregates: Vec<A> = aggregates.into_iter().collect();
        let mut partitions = self.write();

        let mut live = partitions.live.clone();
        for aggregate in &aggregates {
            upsert(&*self.key_eq, &mut live, aggregate.clone());
        }
        partitions.live = live;
        debug!(aggregate = %self.aggregate_name, count = aggregates.len(), "stored aggregates");
        aggregates
    }

    /// Move the live aggregate with this id to the trash.
    ///
    /// Removing an id that is not live is a no-op.
    pub fn remove(&self, id: &A::Id) {
        let mut guard = self.write();
        let Partitions { live, trash } = &mut *guard;

        let Some(index) = position(&*self.key_eq, live, id) else {
            trace!(aggregate = %self.aggregate_name, %id, "remove of absent aggregate");
            return;
        };
        let slot = position(&*self.key_eq, trash, live[index].id());

        let removed = live.remove(index);
        put(trash, slot, removed);
        debug!(aggregate = %self.aggregate_name, %id, "moved aggregate to trash");
    }

    /// Move every live aggregate whose id is in `ids` to the trash.
    ///
    /// Matches and trash slots are resolved before the live partition is
    /// split, so a failing key strategy leaves both partitions untouched.
    /// Matching aggregates enter the trash in their live order.
    pub fn remove_all(&self, ids: &[A::Id]) {
        let mut guard = self.write();
        let Partitions { live, trash } = &mut *guard;

        let matched: Vec<bool> = live
            .iter()
            .map(|aggregate| self.matches_any(aggregate, ids))
            .collect();
        let mut slots = live
            .iter()
            .zip(&matched)
            .filter(|(_, hit)| **hit)
            .map(|(aggregate, _)| position(&*self.key_eq, &trash[..], aggregate.id()))
            .collect::<Vec<_>>()
            .into_iter();

        let mut rest = Vec::with_capacity(live.len());
        let mut count = 0usize;
        for (aggregate, hit) in std::mem::take(live).into_iter().zip(matched) {
            if hit {
                put(trash, slots.next().flatten(), aggregate);
                count += 1;
            } else {
                rest.push(aggregate);
            }
        }
        *live = rest;
        debug!(aggregate = %self.aggregate_name, requested = ids.len(), count, "moved aggregates to trash");
    }
}

impl<A: Aggregate> fmt::Debug for InMemoryStorage<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let partitions = self.read();
        f.debug_struct("InMemoryStorage")
            .field("aggregate_name", &self.aggregate_name)
            .field("live", &partitions.live.len())
            .field("trash", &partitions.trash.len())
            .finish()
    }
}

fn position<A: Aggregate>(key_eq: &dyn KeyEq<A::Id>, entries: &[A], id: &A::Id) -> Option<usize> {
    entries.iter().position(|entry| key_eq.key_eq(entry.id(), id))
}

/// Replace the entry with the same id in place, or append. Returns whether
/// an entry was replaced.
fn upsert<A: Aggregate>(key_eq: &dyn KeyEq<A::Id>, entries: &mut Vec<A>, aggregate: A) -> bool {
    let slot = position(key_eq, entries, aggregate.id());
    put(entries, slot, aggregate);
    slot.is_some()
}

fn put<A>(entries: &mut Vec<A>, slot: Option<usize>, aggregate: A) {
    match slot {
        Some(index) => entries[index] = aggregate,
        None => entries.push(aggregate),
    }
}
