//! Predicates - ad hoc aggregate queries without a query language.
//!
//! Any `Fn(&A) -> bool` works as a predicate for the storage queries.
//! [`Predicate`] is the boxed form, used when predicates are built up at
//! runtime and combined with [`union`] or [`intersect`].
//!
//! ```ignore
//! let filter = intersect([
//!     Some(predicate(|o: &Order| o.total > 100)),
//!     customer.map(|c| predicate(move |o: &Order| o.customer == c)),
//! ]);
//! let orders = storage.get_all_by(&filter);
//! ```

/// A boxed, shareable predicate over `T`.
pub type Predicate<'a, T> = Box<dyn Fn(&T) -> bool + Send + Sync + 'a>;

/// Box a closure as a [`Predicate`].
pub fn predicate<'a, T, F>(f: F) -> Predicate<'a, T>
where
    T: 'a,
    F: Fn(&T) -> bool + Send + Sync + 'a,
{
    Box::new(f)
}

/// The predicate that accepts every value.
pub fn always<'a, T: 'a>() -> Predicate<'a, T> {
    Box::new(|_: &T| true)
}

/// True when any present predicate is true.
///
/// `None` slots are dropped rather than treated as always-false. With no
/// predicate left the result accepts everything.
pub fn union<'a, T, I>(predicates: I) -> Predicate<'a, T>
where
    T: 'a,
    I: IntoIterator<Item = Option<Predicate<'a, T>>>,
{
    let predicates: Vec<Predicate<'a, T>> = predicates.into_iter().flatten().collect();
    if predicates.is_empty() {
        return always();
    }
    Box::new(move |value: &T| predicates.iter().any(|p| p(value)))
}

/// True when every present predicate is true. `None` slots are ignored.
pub fn intersect<'a, T, I>(predicates: I) -> Predicate<'a, T>
where
    T: 'a,
    I: IntoIterator<Item = Option<Predicate<'a, T>>>,
{
    let predicates: Vec<Predicate<'a, T>> = predicates.into_iter().flatten().collect();
    Box::new(move |value: &T| predicates.iter().all(|p| p(value)))
}
