mod common;

use std::collections::BTreeSet;

use threaded_avl::AvlSet;

use common::assert_matches_model;
use common::fuzzer::Fuzzer;

#[test]
fn random_insert_erase_against_btreeset_matrix() {
    for seed in 0..16u64 {
        let mut fuzzer = Fuzzer::from_u64(seed);
        let mut set = AvlSet::new();
        let mut model = BTreeSet::new();

        for _ in 0..400 {
            let v = fuzzer.random_int(-64, 64);
            if fuzzer.random() < 0.6 {
                assert_eq!(set.insert(v), model.insert(v), "seed {seed}: insert {v}");
            } else {
                assert_eq!(set.erase(&v), model.remove(&v), "seed {seed}: erase {v}");
            }
            assert_matches_model(&set, &model);
        }
    }
}

#[test]
fn shuffled_fill_and_drain_matrix() {
    let mut fuzzer = Fuzzer::from_u64(0x5eed);
    let mut values: Vec<i64> = (0..500).collect();
    fuzzer.shuffle(&mut values);

    let mut set = AvlSet::new();
    let mut model = BTreeSet::new();
    for &v in &values {
        set.insert(v);
        model.insert(v);
    }
    assert_matches_model(&set, &model);

    fuzzer.shuffle(&mut values);
    for &v in &values {
        assert!(set.erase(&v));
        model.remove(&v);
        assert_matches_model(&set, &model);
    }
    assert!(set.is_empty());
    assert!(set.begin() == set.end());
    assert!(set.rbegin() == set.rend());
}

#[test]
fn random_seed_smoke_matrix() {
    let mut fuzzer = Fuzzer::new(None);
    let seed = fuzzer.seed;
    let mut set = AvlSet::new();
    let mut model = BTreeSet::new();
    let ops = [true, true, false];
    for _ in 0..1_000 {
        let v = fuzzer.random_int(0, 200);
        if *fuzzer.pick(&ops) {
            set.insert(v);
            model.insert(v);
        } else {
            set.erase(&v);
            model.remove(&v);
        }
    }
    assert!(set.assert_valid().is_ok(), "seed {seed:?}");
    assert_matches_model(&set, &model);
}
