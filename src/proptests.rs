//! Model checks: every operation sequence is replayed against a plain
//! `Vec` of pairs that spells out the ordering rules directly.

use proptest::prelude::*;

use crate::{MapError, OrderedMap};

/// Operations that can be performed on an OrderedMap
#[derive(Clone, Debug)]
enum Op {
    Insert(u8, u32),
    Remove(u8),
    MoveToBack(u8),
    PopFront,
    PopBack,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..32u8, any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => (0..32u8).prop_map(Op::Remove),
        1 => (0..32u8).prop_map(Op::MoveToBack),
        1 => Just(Op::PopFront),
        1 => Just(Op::PopBack),
    ]
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(op_strategy(), 0..200)
}

/// The reference: a Vec in iteration order, searched linearly.
#[derive(Default)]
struct Model(Vec<(u8, u32)>);

impl Model {
    fn position(&self, k: u8) -> Option<usize> {
        self.0.iter().position(|(key, _)| *key == k)
    }

    fn insert(&mut self, k: u8, v: u32) -> Option<u32> {
        match self.position(k) {
            Some(i) => Some(std::mem::replace(&mut self.0[i].1, v)),
            None => {
                self.0.push((k, v));
                None
            }
        }
    }

    fn remove(&mut self, k: u8) -> Option<u32> {
        self.position(k).map(|i| self.0.remove(i).1)
    }

    fn move_to_back(&mut self, k: u8) -> bool {
        match self.position(k) {
            Some(i) => {
                let entry = self.0.remove(i);
                self.0.push(entry);
                true
            }
            None => false,
        }
    }
}

/// Applies the ops to both, checking every return value along the way.
fn replay(ops: &[Op]) -> Result<(OrderedMap<u8, u32>, Model), TestCaseError> {
    let mut map = OrderedMap::new();
    let mut model = Model::default();

    for op in ops {
        match *op {
            Op::Insert(k, v) => {
                prop_assert_eq!(model.insert(k, v), map.insert(k, v));
            }
            Op::Remove(k) => {
                prop_assert_eq!(model.remove(k).ok_or(MapError::KeyNotFound), map.remove(&k));
            }
            Op::MoveToBack(k) => {
                prop_assert_eq!(model.move_to_back(k), map.move_to_back(&k).is_ok());
            }
            Op::PopFront => {
                let expected = if model.0.is_empty() {
                    None
                } else {
                    Some(model.0.remove(0))
                };
                prop_assert_eq!(expected, map.pop_front());
            }
            Op::PopBack => {
                prop_assert_eq!(model.0.pop(), map.pop_back());
            }
        }
        prop_assert_eq!(model.0.len(), map.len());
    }

    Ok((map, model))
}

proptest! {
    /// Invariant: iteration matches the model, forwards and backwards
    #[test]
    fn prop_iteration_matches_model(ops in ops_strategy()) {
        let (map, model) = replay(&ops)?;
        map.continuity_test();

        let forward: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(&model.0, &forward);

        let mut backward: Vec<_> = map.iter().rev().map(|(k, v)| (*k, *v)).collect();
        backward.reverse();
        prop_assert_eq!(&model.0, &backward);
    }

    /// Invariant: a key is reachable iff the model holds it, with its value
    #[test]
    fn prop_lookups_match_model(ops in ops_strategy(), probe in 0..32u8) {
        let (map, model) = replay(&ops)?;
        let expected = model.position(probe).map(|i| model.0[i].1);

        prop_assert_eq!(expected.is_some(), map.contains_key(&probe));
        prop_assert_eq!(expected.ok_or(MapError::KeyNotFound), map.get(&probe).copied());
    }

    /// Invariant: distinct keys inserted in order come back in that order
    #[test]
    fn prop_pure_insertion_preserves_order(
        keys in proptest::collection::hash_set(any::<u16>(), 0..100)
    ) {
        let keys: Vec<u16> = keys.into_iter().collect();
        let map: OrderedMap<u16, ()> = keys.iter().map(|k| (*k, ())).collect();

        prop_assert_eq!(keys, map.keys().copied().collect::<Vec<_>>());
    }

    /// Invariant: updating an existing key never moves it
    #[test]
    fn prop_update_preserves_position(ops in ops_strategy(), v in any::<u32>()) {
        let (mut map, _) = replay(&ops)?;
        let before: Vec<u8> = map.keys().copied().collect();

        for k in before.clone() {
            prop_assert!(map.insert(k, v).is_some());
        }

        prop_assert_eq!(before, map.keys().copied().collect::<Vec<_>>());
        prop_assert!(map.values().all(|value| *value == v));
    }

    /// Invariant: remove then insert puts the key at the back
    #[test]
    fn prop_reinsertion_goes_to_back(ops in ops_strategy(), k in 0..32u8) {
        let (mut map, _) = replay(&ops)?;
        let _ = map.remove(&k);
        map.insert(k, 7);

        prop_assert_eq!(Some((&k, &7)), map.back());
    }

    /// Invariant: iterating twice without mutation is identical
    #[test]
    fn prop_iteration_is_idempotent(ops in ops_strategy()) {
        let (map, _) = replay(&ops)?;
        let first: Vec<_> = map.iter().collect();
        let second: Vec<_> = map.iter().collect();
        prop_assert_eq!(first, second);
    }
}
