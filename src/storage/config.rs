//! StorageConfig - construction options for in-memory storage.

use crate::aggregate::Aggregate;
use crate::key::{KeyEq, ValueEq};

use super::InMemoryStorage;

/// Builder for an [`InMemoryStorage`]: aggregate name, key strategy and
/// the aggregates to seed it with.
pub struct StorageConfig<A: Aggregate> {
    aggregate_name: String,
    key_eq: Box<dyn KeyEq<A::Id>>,
    aggregates: Vec<A>,
}

impl<A: Aggregate> StorageConfig<A>
where
    A::Id: PartialEq,
{
    pub fn new(aggregate_name: impl Into<String>) -> Self {
        Self::with_key_eq(aggregate_name, ValueEq)
    }
}

impl<A: Aggregate> StorageConfig<A> {
    pub fn with_key_eq<Q>(aggregate_name: impl Into<String>, key_eq: Q) -> Self
    where
        Q: KeyEq<A::Id> + 'static,
    {
        Self {
            aggregate_name: aggregate_name.into(),
            key_eq: Box::new(key_eq),
            aggregates: Vec::new(),
        }
    }

    /// Replace the key strategy.
    pub fn key_eq<Q>(mut self, key_eq: Q) -> Self
    where
        Q: KeyEq<A::Id> + 'static,
    {
        self.key_eq = Box::new(key_eq);
        self
    }

    /// Aggregates stored, in order, when the storage is built.
    pub fn aggregates<I>(mut self, aggregates: I) -> Self
    where
        I: IntoIterator<Item = A>,
    {
        self.aggregates.extend(aggregates);
        self
    }

    pub fn build(self) -> InMemoryStorage<A> {
        let storage = InMemoryStorage::from_parts(self.aggregate_name, self.key_eq);
        if !self.aggregates.is_empty() {
            storage.store_all(self.aggregates);
        }
        storage
    }
}

impl<A: Aggregate> From<StorageConfig<A>> for InMemoryStorage<A> {
    fn from(config: StorageConfig<A>) -> Self {
        config.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::GetAllOptions;

    #[derive(Clone, Debug, PartialEq)]
    struct Seat {
        row: char,
        number: u8,
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Booking {
        seat: Seat,
        guest: String,
    }

    impl std::fmt::Display for Seat {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}{}", self.row, self.number)
        }
    }

    impl Aggregate for Booking {
        type Id = Seat;
        fn id(&self) -> &Seat {
            &self.seat
        }
    }

    fn booking(row: char, number: u8, guest: &str) -> Booking {
        Booking {
            seat: Seat { row, number },
            guest: guest.into(),
        }
    }

    #[test]
    fn seeds_in_order() {
        let storage = StorageConfig::new("Booking")
            .aggregates(vec![booking('A', 1, "ann"), booking('B', 2, "bob")])
            .build();

        let all = storage.get_all(GetAllOptions::default());
        assert_eq!(all, vec![booking('A', 1, "ann"), booking('B', 2, "bob")]);
        assert_eq!(storage.aggregate_name(), "Booking");
    }

    #[test]
    fn value_object_ids_with_custom_strategy() {
        let storage: InMemoryStorage<Booking> =
            StorageConfig::with_key_eq("Booking", |a: &Seat, b: &Seat| {
                a.row.eq_ignore_ascii_case(&b.row) && a.number == b.number
            })
            .aggregates(vec![booking('a', 1, "ann")])
            .into();

        storage.store(booking('A', 1, "amy"));
        let found = storage.get_by_id(&Seat { row: 'A', number: 1 }).unwrap();
        assert_eq!(found.guest, "amy");
        assert_eq!(storage.count(GetAllOptions::default()), 1);

        let err = storage.get_by_id(&Seat { row: 'C', number: 9 }).unwrap_err();
        assert_eq!(err.to_string(), "Aggregate Booking not found with id C9");
    }
}
