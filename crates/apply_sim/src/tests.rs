//! Unit tests for the simulation generator.
//!
//! This module contains tests verifying:
//! - Seed reproducibility and reseeding
//! - Parameter validation for every distribution
//! - Distribution properties (ranges, sample moments)
//! - Sampling with and without replacement, weighted and unweighted

use super::*;
use approx::assert_relative_eq;

/// Verifies that the same seed produces identical sequences.
#[test]
fn test_seed_reproducibility() {
    let mut rng1 = SimRng::from_seed(12345);
    let mut rng2 = SimRng::from_seed(12345);

    for _ in 0..100 {
        assert_eq!(rng1.gen_uniform(), rng2.gen_uniform());
        assert_eq!(rng1.gen_normal(), rng2.gen_normal());
    }
}

/// Verifies that reseeding replays the stream from its start.
#[test]
fn test_set_seed_replays_stream() {
    let mut rng = SimRng::from_seed(1);
    let first = rng.rpois(20, 3.0).unwrap();
    let _ = rng.rnorm(5, 0.0, 1.0).unwrap();

    rng.set_seed(1);
    assert_eq!(rng.seed(), 1);
    assert_eq!(rng.rpois(20, 3.0).unwrap(), first);
}

/// Verifies that different seeds produce different streams.
#[test]
fn test_different_seeds_differ() {
    let a = SimRng::from_seed(1).rnorm(10, 0.0, 1.0).unwrap();
    let b = SimRng::from_seed(2).rnorm(10, 0.0, 1.0).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_runif_range() {
    let mut rng = SimRng::from_seed(42);
    for value in rng.runif(10_000, -2.0, 3.0).unwrap() {
        assert!((-2.0..3.0).contains(&value), "runif value {} out of range", value);
    }
    assert_eq!(rng.runif(3, 5.0, 5.0).unwrap(), vec![5.0; 3]);
}

#[test]
fn test_runif_rejects_bad_bounds() {
    let mut rng = SimRng::from_seed(42);
    assert_eq!(
        rng.runif(1, 1.0, 0.0),
        Err(SimError::InvalidParameter {
            name: "max",
            value: 0.0
        })
    );
    assert!(rng.runif(1, f64::NAN, 1.0).is_err());
}

/// Verifies sample mean and standard deviation of normal draws.
#[test]
fn test_rnorm_moments() {
    let mut rng = SimRng::from_seed(42);
    let draws = rng.rnorm(100_000, 10.0, 2.0).unwrap();

    let n = draws.len() as f64;
    let mean = draws.iter().sum::<f64>() / n;
    let var = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);

    assert_relative_eq!(mean, 10.0, epsilon = 0.05);
    assert_relative_eq!(var.sqrt(), 2.0, epsilon = 0.05);
}

#[test]
fn test_rnorm_zero_sd_is_constant() {
    let mut rng = SimRng::from_seed(3);
    assert_eq!(rng.rnorm(4, 1.5, 0.0).unwrap(), vec![1.5; 4]);
}

#[test]
fn test_rnorm_rejects_negative_sd() {
    let mut rng = SimRng::from_seed(3);
    assert_eq!(
        rng.rnorm(1, 0.0, -1.0),
        Err(SimError::InvalidParameter {
            name: "sd",
            value: -1.0
        })
    );
}

#[test]
fn test_rpois_mean() {
    let mut rng = SimRng::from_seed(7);
    let draws = rng.rpois(50_000, 4.0).unwrap();
    let mean = draws.iter().sum::<u64>() as f64 / draws.len() as f64;
    assert_relative_eq!(mean, 4.0, epsilon = 0.05);
}

#[test]
fn test_rpois_rejects_non_positive_rate() {
    let mut rng = SimRng::from_seed(7);
    assert!(rng.rpois(1, 0.0).is_err());
    assert!(rng.rpois(1, -2.0).is_err());
}

#[test]
fn test_rbinom_bounds_and_mean() {
    let mut rng = SimRng::from_seed(11);
    let draws = rng.rbinom(50_000, 10, 0.3).unwrap();
    assert!(draws.iter().all(|&d| d <= 10));
    let mean = draws.iter().sum::<u64>() as f64 / draws.len() as f64;
    assert_relative_eq!(mean, 3.0, epsilon = 0.05);

    assert_eq!(rng.rbinom(5, 4, 1.0).unwrap(), vec![4; 5]);
    assert_eq!(rng.rbinom(5, 4, 0.0).unwrap(), vec![0; 5]);
}

#[test]
fn test_rbinom_rejects_bad_probability() {
    let mut rng = SimRng::from_seed(11);
    assert!(rng.rbinom(1, 10, 1.5).is_err());
    assert!(rng.rbinom(1, 10, -0.1).is_err());
}

#[test]
fn test_sample_without_replacement_is_permutation() {
    let mut rng = SimRng::from_seed(5);
    let population: Vec<i32> = (1..=10).collect();
    let mut drawn = rng.sample(&population, 10, false, None).unwrap();
    drawn.sort();
    assert_eq!(drawn, population);
}

#[test]
fn test_sample_too_large() {
    let mut rng = SimRng::from_seed(5);
    assert_eq!(
        rng.sample(&[1, 2, 3], 4, false, None),
        Err(SimError::SampleTooLarge {
            size: 4,
            population: 3
        })
    );
    // With replacement the sample may exceed the population.
    assert_eq!(rng.sample(&[1, 2, 3], 10, true, None).unwrap().len(), 10);
}

#[test]
fn test_sample_weighted_with_replacement_respects_zero_weight() {
    let mut rng = SimRng::from_seed(9);
    let drawn = rng
        .sample(&["never", "always"], 200, true, Some(&[0.0, 1.0][..]))
        .unwrap();
    assert!(drawn.iter().all(|&d| d == "always"));
}

#[test]
fn test_sample_weighted_without_replacement() {
    let mut rng = SimRng::from_seed(9);
    let drawn = rng
        .sample(&[1, 2, 3, 4], 3, false, Some(&[1.0, 0.0, 2.0, 5.0][..]))
        .unwrap();
    let mut sorted = drawn.clone();
    sorted.sort();
    assert_eq!(sorted, vec![1, 3, 4]);

    // Only three items carry positive weight.
    assert!(rng
        .sample(&[1, 2, 3, 4], 4, false, Some(&[1.0, 0.0, 2.0, 5.0][..]))
        .is_err());
}

#[test]
fn test_sample_zero_size_from_empty_weighted_population() {
    let mut rng = SimRng::from_seed(9);
    let empty: [i32; 0] = [];
    assert_eq!(rng.sample(&empty, 0, true, Some(&[][..])), Ok(Vec::new()));
    assert_eq!(rng.sample(&empty, 0, false, Some(&[][..])), Ok(Vec::new()));
    assert_eq!(rng.sample(&[1, 2], 0, true, Some(&[1.0, 3.0][..])), Ok(Vec::new()));
}

#[test]
fn test_sample_rejects_bad_weights() {
    let mut rng = SimRng::from_seed(9);
    assert!(matches!(
        rng.sample(&[1, 2], 1, true, Some(&[1.0][..])),
        Err(SimError::InvalidWeights(_))
    ));
    assert!(matches!(
        rng.sample(&[1, 2], 1, true, Some(&[1.0, -1.0][..])),
        Err(SimError::InvalidWeights(_))
    ));
    assert!(matches!(
        rng.sample(&[1, 2], 1, true, Some(&[0.0, 0.0][..])),
        Err(SimError::InvalidWeights(_))
    ));
}

#[test]
fn test_permutation() {
    let mut rng = SimRng::from_seed(13);
    let mut p = rng.permutation(8);
    p.sort();
    assert_eq!(p, (0..8).collect::<Vec<_>>());
    assert!(rng.permutation(0).is_empty());
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn test_reseeding_is_deterministic(seed in any::<u64>(), n in 0usize..50) {
            let mut rng = SimRng::from_seed(seed);
            let first = rng.runif(n, 0.0, 1.0).unwrap();
            rng.set_seed(seed);
            prop_assert_eq!(rng.runif(n, 0.0, 1.0).unwrap(), first);
        }

        #[test]
        fn test_sample_size_respected(
            seed in any::<u64>(),
            population in 1usize..30,
            replace in any::<bool>()
        ) {
            let mut rng = SimRng::from_seed(seed);
            let items: Vec<usize> = (0..population).collect();
            let size = population / 2 + 1;
            let drawn = rng.sample(&items, size, replace, None).unwrap();
            prop_assert_eq!(drawn.len(), size);
            prop_assert!(drawn.iter().all(|&d| d < population));
            if !replace {
                let mut unique = drawn.clone();
                unique.sort();
                unique.dedup();
                prop_assert_eq!(unique.len(), size);
            }
        }
    }
}
