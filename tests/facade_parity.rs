//! Both in-memory facades, replaying the same operations, must agree on
//! every successful result and on every not-found message.

mod support;

use std::collections::BTreeSet;
use std::sync::Arc;

use aggregate_repository::{
    GetAllOptions, InMemoryRepository, InMemoryResultRepository, InMemoryStorage, Repository,
    ResultRepository, StorageConfig,
};
use proptest::prelude::*;
use support::order::{ids, Order};

#[derive(Debug, Clone)]
enum Op {
    Store(Order),
    StoreAll(Vec<Order>),
    Delete(String),
    DeleteAll(Vec<String>),
    GetById(String),
    GetByIds(Vec<String>),
    FindById(String),
    GetAll(bool),
}

/// Outcome of one operation, with failures reduced to their message.
#[derive(Debug, Clone, PartialEq)]
enum Outcome {
    One(Order),
    Maybe(Option<Order>),
    Many(Vec<Order>),
    Done,
    Failed(String),
}

fn arb_id() -> impl Strategy<Value = String> {
    (0u8..6).prop_map(|n| format!("o{}", n))
}

fn arb_order() -> impl Strategy<Value = Order> {
    (arb_id(), "[a-z]{1,6}", 0u64..10_000, prop::collection::vec("[a-z]{1,4}", 0..3)).prop_map(
        |(id, customer, total_cents, lines)| Order {
            id,
            customer,
            total_cents,
            lines,
        },
    )
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_order().prop_map(Op::Store),
        prop::collection::vec(arb_order(), 0..4).prop_map(Op::StoreAll),
        arb_id().prop_map(Op::Delete),
        prop::collection::vec(arb_id(), 0..4).prop_map(Op::DeleteAll),
        arb_id().prop_map(Op::GetById),
        prop::collection::vec(arb_id(), 0..4).prop_map(Op::GetByIds),
        arb_id().prop_map(Op::FindById),
        any::<bool>().prop_map(Op::GetAll),
    ]
}

fn options(with_deleted: bool) -> GetAllOptions {
    GetAllOptions { with_deleted }
}

async fn run_throwing(repo: &InMemoryRepository<Order>, op: &Op) -> Outcome {
    let outcome = match op.clone() {
        Op::Store(order) => repo.store(order).await.map(Outcome::One),
        Op::StoreAll(orders) => repo.store_all(orders).await.map(Outcome::Many),
        Op::Delete(id) => repo.delete(&id).await.map(|_| Outcome::Done),
        Op::DeleteAll(ids) => repo.delete_all(&ids).await.map(|_| Outcome::Done),
        Op::GetById(id) => repo.get_by_id(&id).await.map(Outcome::One),
        Op::GetByIds(ids) => repo.get_by_ids(&ids).await.map(Outcome::Many),
        Op::FindById(id) => repo.find_by_id(&id).await.map(Outcome::Maybe),
        Op::GetAll(with_deleted) => repo.get_all(options(with_deleted)).await.map(Outcome::Many),
    };
    outcome.unwrap_or_else(|err| Outcome::Failed(err.to_string()))
}

async fn run_result(repo: &InMemoryResultRepository<Order, String>, op: &Op) -> Outcome {
    let outcome = match op.clone() {
        Op::Store(order) => repo.store(order).await.map(Outcome::One),
        Op::StoreAll(orders) => repo.store_all(orders).await.map(Outcome::Many),
        Op::Delete(id) => repo.delete(&id).await.map(|_| Outcome::Done),
        Op::DeleteAll(ids) => repo.delete_all(&ids).await.map(|_| Outcome::Done),
        Op::GetById(id) => repo.get_by_id(&id).await.map(Outcome::One),
        Op::GetByIds(ids) => repo.get_by_ids(&ids).await.map(Outcome::Many),
        Op::FindById(id) => repo.find_by_id(&id).await.map(Outcome::Maybe),
        Op::GetAll(with_deleted) => repo.get_all(options(with_deleted)).await.map(Outcome::Many),
    };
    outcome.unwrap_or_else(Outcome::Failed)
}

fn seeded(seed: &[Order]) -> StorageConfig<Order> {
    StorageConfig::new("Order").aggregates(seed.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn facades_agree_on_every_operation(
        seed in prop::collection::vec(arb_order(), 0..5),
        ops in prop::collection::vec(arb_op(), 1..40),
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let throwing = InMemoryRepository::from_config(seeded(&seed));
            let result: InMemoryResultRepository<Order, String> =
                InMemoryResultRepository::from_config(seeded(&seed), |message| message);

            for op in &ops {
                let expected = run_throwing(&throwing, op).await;
                let actual = run_result(&result, op).await;
                assert_eq!(expected, actual, "diverged on {:?}", op);
            }

            assert_eq!(
                throwing.get_all(GetAllOptions::including_deleted()).await.unwrap(),
                result.get_all(GetAllOptions::including_deleted()).await.unwrap()
            );
        });
    }

    #[test]
    fn bulk_and_singular_stores_agree(orders in prop::collection::vec(arb_order(), 0..12)) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let singular = InMemoryRepository::<Order>::new("Order");
            for order in &orders {
                singular.store(order.clone()).await.unwrap();
            }
            let bulk = InMemoryRepository::<Order>::new("Order");
            bulk.store_all(orders.clone()).await.unwrap();

            let requested = ids(&orders);
            let from_singular = singular.get_by_ids(&requested).await.unwrap();
            let from_bulk = bulk.get_by_ids(&requested).await.unwrap();

            let as_set = |orders: Vec<Order>| -> BTreeSet<(String, String, u64)> {
                orders
                    .into_iter()
                    .map(|o| (o.id, o.customer, o.total_cents))
                    .collect()
            };
            assert_eq!(from_singular.len(), from_bulk.len());
            assert_eq!(as_set(from_singular), as_set(from_bulk));
        });
    }

    #[test]
    fn ordering_follows_first_store_then_removal(
        orders in prop::collection::vec(arb_order(), 0..12),
        removals in prop::collection::vec(arb_id(), 0..6),
    ) {
        let storage = InMemoryStorage::<Order>::new("Order");
        storage.store_all(orders.clone());

        let mut live_order: Vec<String> = Vec::new();
        for order in &orders {
            if !live_order.contains(&order.id) {
                live_order.push(order.id.clone());
            }
        }
        let mut trash_order: Vec<String> = Vec::new();
        for id in &removals {
            if let Some(index) = live_order.iter().position(|live| live == id) {
                live_order.remove(index);
                if !trash_order.contains(id) {
                    trash_order.push(id.clone());
                }
            }
            storage.remove(id);
        }

        prop_assert_eq!(ids(&storage.get_all(GetAllOptions::default())), live_order.clone());
        let mut expected = live_order;
        expected.extend(trash_order);
        prop_assert_eq!(ids(&storage.get_all(GetAllOptions::including_deleted())), expected);
    }
}

#[tokio::test]
async fn shared_storage_reports_identical_messages() {
    support::init_tracing();
    let storage = Arc::new(InMemoryStorage::<Order>::new("Invoice"));
    let throwing = InMemoryRepository::with_storage(Arc::clone(&storage));
    let result: InMemoryResultRepository<Order, String> =
        InMemoryResultRepository::with_storage(storage, |message| message);

    let order = Order::new("ada", 1);
    throwing.store(order.clone()).await.unwrap();
    assert_eq!(result.get_by_id(&order.id).await, Ok(order.clone()));

    result.delete(&order.id).await.unwrap();
    let thrown = throwing.get_by_id(&order.id).await.unwrap_err().to_string();
    let built = result.get_by_id(&order.id).await.unwrap_err();
    assert_eq!(thrown, built);
    assert_eq!(built, format!("Aggregate Invoice not found with id {}", order.id));
}
