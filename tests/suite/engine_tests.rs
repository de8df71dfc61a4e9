//! Cached engine behaviour.

use std::sync::Arc;
use std::thread;

use einfunc::ndarray::array;
use einfunc::{Einfunc, EinfuncConfig, PlanCache, ReduceMode};

use crate::common::{filled, init_logger};

#[test]
fn test_engine_matches_free_function() {
    init_logger();

    let engine = Einfunc::new(EinfuncConfig::new().with_reduce(ReduceMode::Mean));
    let x = filled(&[2, 3, 4, 5], 0);
    let y = filled(&[2, 5], 1);

    let cached = engine
        .call(&[x.clone(), y.clone()], "b c h w, b w -> b h", |t, _| &t[0] * &t[1])
        .unwrap()
        .into_single()
        .unwrap();
    let direct = einfunc::einfunc(
        &[x, y],
        "b c h w, b w -> b h",
        |t, _| &t[0] * &t[1],
        Some(EinfuncConfig::new().with_reduce(ReduceMode::Mean)),
    )
    .unwrap()
    .into_single()
    .unwrap();

    assert_eq!(cached, direct);
}

#[test]
fn test_handle_flag_is_part_of_the_key() {
    let engine = Einfunc::default();
    let v = array![1.0, 2.0].into_dyn();

    engine.call(&[v.clone()], "i -> i", |t, _| t[0].clone()).unwrap();
    engine
        .call_with(
            &[v],
            "i -> i",
            |t, handles| {
                assert_eq!(handles.len(), 1);
                t[0].clone()
            },
            &EinfuncConfig::new().with_handles(true),
        )
        .unwrap();

    let stats = engine.cache().stats();
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.entries, 2);
}

#[test]
fn test_disabled_cache_still_runs() {
    let engine = Einfunc::with_cache_capacity(EinfuncConfig::default(), 0);
    let v = array![1.0, 2.0, 3.0].into_dyn();

    for _ in 0..2 {
        let out = engine.call(&[v.clone()], "i ->", |t, _| t[0].clone()).unwrap();
        assert_eq!(out.into_single().unwrap()[[]], 6.0);
    }
    assert!(engine.cache().is_empty());
}

#[test]
fn test_shared_cache_across_threads() {
    let cache = Arc::new(PlanCache::new(8));
    let patterns = ["i ->", "i j -> j", "i i -> i", "a b, b -> a"];

    let workers: Vec<_> = (0..4)
        .map(|worker| {
            let engine = Einfunc::with_shared_cache(EinfuncConfig::default(), Arc::clone(&cache));
            thread::spawn(move || {
                for round in 0..25 {
                    let pattern = patterns[(worker + round) % patterns.len()];
                    let m = array![[1.0, 2.0], [3.0, 4.0]].into_dyn();
                    let v = array![1.0, 1.0].into_dyn();
                    let tensors = match pattern {
                        "i ->" => vec![v],
                        "a b, b -> a" => vec![m, v],
                        _ => vec![m],
                    };
                    let out = engine
                        .call(&tensors, pattern, |t, _| {
                            t[1..].iter().fold(t[0].clone(), |acc, x| &acc * x)
                        })
                        .unwrap();
                    assert_eq!(out.len(), 1);
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    let stats = cache.stats();
    assert_eq!(stats.entries, patterns.len());
    assert_eq!(stats.hits + stats.misses, 100);
    assert!(stats.misses >= patterns.len() as u64);
}
