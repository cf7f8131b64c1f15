#![cfg(test)]

// Property tests for AssocMap kept inside the crate so they can check
// chain-level invariants through crate-private diagnostics.

use crate::assoc_map::AssocMap;
use crate::config::{DuplicatePolicy, MapConfig};
use crate::error::Error;
use crate::key_text::KeyText;
use proptest::prelude::*;
use std::collections::HashMap;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Remove(usize),
    Lookup(usize),
    Contains(String),
    Mutate(usize, i32),
}

fn arb_scenario() -> impl Strategy<Value = (usize, u32, Vec<String>, Vec<OpI>)> {
    (
        1usize..=8,
        1u32..=100,
        proptest::collection::vec("[a-z]{0,5}", 1..=8),
    )
        .prop_flat_map(|(cap, lf, pool)| {
            let idxs: Vec<usize> = (0..pool.len()).collect();
            let idx = proptest::sample::select(idxs);
            let op = prop_oneof![
                3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
                2 => idx.clone().prop_map(OpI::Remove),
                2 => idx.clone().prop_map(OpI::Lookup),
                1 => "[a-z]{0,5}".prop_map(OpI::Contains),
                1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            ];
            proptest::collection::vec(op, 1..80)
                .prop_map(move |ops| (cap, lf, pool.clone(), ops))
        })
}

// Every key has the same text, so every node lands in one chain.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
struct Colliding(String);
impl KeyText for Colliding {
    fn key_text(&self) -> &str {
        ""
    }
}

// Shadow-policy model: per-key stack of values, newest last.
#[derive(Default)]
struct ShadowModel {
    stacks: HashMap<String, Vec<i32>>,
}

impl ShadowModel {
    fn len(&self) -> usize {
        self.stacks.values().map(Vec::len).sum()
    }
    fn top(&self, k: &str) -> Option<i32> {
        self.stacks.get(k).and_then(|s| s.last().copied())
    }
}

/// Drive `sut` with `ops`, comparing against the shadow model after each step.
/// `wrap` builds the map's key type from pool text.
fn run_shadow<K, F>(
    mut sut: AssocMap<K, i32>,
    pool: &[String],
    ops: Vec<OpI>,
    wrap: F,
) -> Result<(), TestCaseError>
where
    K: KeyText + Eq,
    F: Fn(&str) -> K,
{
    let mut model = ShadowModel::default();
    let initial = sut.capacity();
    for op in ops {
        let before = sut.capacity();
        match op {
            OpI::Insert(i, v) => {
                let k = &pool[i];
                prop_assert_eq!(sut.insert(wrap(k), v), None);
                model.stacks.entry(k.clone()).or_default().push(v);
                let after = sut.capacity();
                prop_assert!(after == before || after == before * 2);
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                let expected = model.stacks.get_mut(k).and_then(Vec::pop);
                match (sut.remove(&wrap(k)), expected) {
                    (Ok(v), Some(mv)) => prop_assert_eq!(v, mv),
                    (Err(Error::KeyNotFound), None) => {}
                    (got, want) => {
                        prop_assert!(false, "remove mismatch: {:?} vs {:?}", got, want)
                    }
                }
                prop_assert_eq!(sut.capacity(), before);
            }
            OpI::Lookup(i) => {
                let k = &pool[i];
                let got = sut.lookup(&wrap(k)).ok().copied();
                prop_assert_eq!(got, model.top(k));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(&wrap(&s)), model.top(&s).is_some());
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                match sut.lookup_mut(&wrap(k)) {
                    Ok(vr) => {
                        *vr = vr.saturating_add(d);
                        let top = model
                            .stacks
                            .get_mut(k.as_str())
                            .and_then(|s| s.last_mut());
                        prop_assert!(top.is_some(), "sut found a key the model lacks");
                        if let Some(mv) = top {
                            *mv = mv.saturating_add(d);
                        }
                    }
                    Err(e) => {
                        prop_assert_eq!(e, Error::KeyNotFound);
                        prop_assert!(model.top(k).is_none());
                    }
                }
            }
        }

        // Post-conditions after each op
        // 1) Size parity, counting shadowed nodes
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.len() == 0);
        // 2) Every node is reachable from exactly one head
        let reachable: usize = (0..sut.capacity()).map(|b| sut.chain_len(b)).sum();
        prop_assert_eq!(reachable, sut.len());
        // 3) Capacity is initial * 2^n
        prop_assert_eq!(sut.capacity() % initial, 0);
        prop_assert!((sut.capacity() / initial).is_power_of_two());
    }
    Ok(())
}

// Property: State-machine equivalence against a per-key stack model.
// Invariants exercised across random operation sequences:
// - Latest insert wins on lookup; remove uncovers the shadowed value.
// - `len` counts shadowed nodes and equals the reachable node count.
// - Capacity only doubles, only on insert, from the initial value.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((cap, lf, pool, ops) in arb_scenario()) {
        let sut: AssocMap<String, i32> = AssocMap::new(cap, lf).unwrap();
        run_shadow(sut, &pool, ops, str::to_string)?;
    }
}

// Property: Same state-machine invariants with every key in one chain. This
// stresses equality resolution and unlinking at every chain position.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((cap, lf, pool, ops) in arb_scenario()) {
        let sut: AssocMap<Colliding, i32> = AssocMap::new(cap, lf).unwrap();
        run_shadow(sut, &pool, ops, |s| Colliding(s.to_string()))?;
    }
}

// Property: Under `Overwrite` the map behaves like std's HashMap.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_overwrite_matches_std((cap, lf, pool, ops) in arb_scenario()) {
        let cfg = MapConfig::new()
            .initial_capacity(cap)
            .load_factor_percent(lf)
            .duplicates(DuplicatePolicy::Overwrite);
        let mut sut: AssocMap<String, i32> = AssocMap::with_config(cfg).unwrap();
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    let k = pool[i].clone();
                    prop_assert_eq!(sut.insert(k.clone(), v), model.insert(k, v));
                }
                OpI::Remove(i) => {
                    let k = pool[i].as_str();
                    prop_assert_eq!(sut.remove(k).ok(), model.remove(k));
                }
                OpI::Lookup(i) => {
                    let k = pool[i].as_str();
                    prop_assert_eq!(sut.lookup(k).ok(), model.get(k));
                }
                OpI::Contains(s) => {
                    prop_assert_eq!(sut.contains_key(s.as_str()), model.contains_key(&s));
                }
                OpI::Mutate(i, d) => {
                    let k = pool[i].as_str();
                    if let (Ok(vr), Some(mv)) = (sut.lookup_mut(k), model.get_mut(k)) {
                        *vr = vr.saturating_add(d);
                        *mv = mv.saturating_add(d);
                    }
                }
            }
            prop_assert_eq!(sut.len(), model.len());
        }
    }
}
