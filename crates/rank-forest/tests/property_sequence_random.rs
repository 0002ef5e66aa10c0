//! Randomized operation streams against a `VecDeque` reference, with a
//! seeded PRNG so every run is reproducible.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use rank_forest::{Basic, Splay, Strategy, TreeList};

const OPERATIONS: usize = 1200;
const MAX_BULK: usize = 8;

fn check_equal<S>(list: &TreeList<S>, reference: &VecDeque<u64>)
where
    S: Strategy<Data = u64, Value = u64>,
{
    list.assert_invariants();
    assert_eq!(list.len(), reference.len());
    assert!(list.iter().eq(reference.iter()));
    assert!(list.iter().rev().eq(reference.iter().rev()));
}

fn random_stream<S: Strategy<Data = u64, Value = u64>>(seed: u8) {
    let mut rng = Xoshiro256StarStar::from_seed([seed; 32]);
    let mut list = TreeList::<S>::new();
    let mut reference: VecDeque<u64> = VecDeque::new();

    for counter in 0..OPERATIONS {
        let value = counter as u64;
        let op = if list.is_empty() {
            rng.gen_range(0..4)
        } else {
            rng.gen_range(0..8)
        };
        match op {
            0 => {
                if rng.gen_bool(0.5) {
                    list.push_front(value);
                    reference.push_front(value);
                } else {
                    list.push_back(value);
                    reference.push_back(value);
                }
            }
            1 => {
                let at = rng.gen_range(0..=list.len());
                list.insert(at, value);
                reference.insert(at, value);
            }
            2 => {
                let at = rng.gen_range(0..=list.len());
                let bulk = rng.gen_range(0..=MAX_BULK) as u64;
                let values: Vec<u64> = (0..bulk).map(|j| value * 1000 + j).collect();
                list.insert_many(at, values.iter().copied());
                for (offset, &v) in values.iter().enumerate() {
                    reference.insert(at + offset, v);
                }
            }
            3 => {
                // Read-only probes.
                if !list.is_empty() {
                    let at = rng.gen_range(0..list.len());
                    assert_eq!(list.get(at), reference.get(at));
                    assert_eq!(list.at(at).ok().copied(), reference.get(at).copied());
                    let mut cur = list.cursor_at(at);
                    assert_eq!(cur.index(), at);
                    let forward = (list.len() - at) as isize;
                    cur.advance(forward);
                    assert!(cur.is_end());
                }
                let len = list.len();
                assert!(list.at(len).is_err());
            }
            4 => {
                if rng.gen_bool(0.5) {
                    assert_eq!(list.pop_front(), reference.pop_front());
                } else {
                    assert_eq!(list.pop_back(), reference.pop_back());
                }
            }
            5 => {
                let at = rng.gen_range(0..list.len());
                assert_eq!(list.remove(at), reference.remove(at).unwrap());
            }
            6 => {
                let start = rng.gen_range(0..list.len());
                let end = (start + rng.gen_range(0..=MAX_BULK)).min(list.len());
                list.remove_range(start, end);
                reference.drain(start..end);
            }
            _ => {
                // Split at a random point and immediately join back; the
                // sequence must be unaffected.
                let at = rng.gen_range(0..=list.len());
                let mut tail = list.split_off(at);
                assert_eq!(list.len(), at);
                list.join_back(&mut tail);
                assert!(tail.is_empty());
            }
        }
        check_equal(&list, &reference);
    }

    // A deep copy of the final state diverges independently.
    let mut copy = list.clone();
    check_equal(&copy, &reference);
    copy.push_front(u64::MAX);
    assert_ne!(copy.len(), list.len());
    check_equal(&list, &reference);
}

#[test]
fn random_stream_basic_seed_1() {
    random_stream::<Basic<u64>>(1);
}

#[test]
fn random_stream_basic_seed_2() {
    random_stream::<Basic<u64>>(2);
}

#[test]
fn random_stream_splay_seed_1() {
    random_stream::<Splay<u64>>(1);
}

#[test]
fn random_stream_splay_seed_2() {
    random_stream::<Splay<u64>>(2);
}

/// Mixed-strategy interchange: the same stream applied to both strategies
/// must agree element-for-element at every step.
#[test]
fn strategies_agree_on_the_same_stream() {
    let mut rng = Xoshiro256StarStar::from_seed([9; 32]);
    let mut basic = TreeList::<Basic<u64>>::new();
    let mut splay = TreeList::<Splay<u64>>::new();

    for counter in 0..600u64 {
        let len = basic.len();
        match rng.gen_range(0..4) {
            0 => {
                let at = rng.gen_range(0..=len);
                basic.insert(at, counter);
                splay.insert(at, counter);
            }
            1 if len > 0 => {
                let at = rng.gen_range(0..len);
                assert_eq!(basic.remove(at), splay.remove(at));
            }
            2 if len > 0 => {
                let start = rng.gen_range(0..len);
                let end = (start + rng.gen_range(0..=4)).min(len);
                basic.remove_range(start, end);
                splay.remove_range(start, end);
            }
            _ => {
                basic.push_back(counter);
                splay.push_back(counter);
            }
        }
        basic.assert_invariants();
        splay.assert_invariants();
        assert!(basic.iter().eq(splay.iter()));
    }
}
