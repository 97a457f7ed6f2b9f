//! Property tests for tour evaluation and annealing results.

use proptest::prelude::*;
use tsp_anneal::anneal::{AnnealConfig, AnnealRunner, CostMode, Neighborhood};
use tsp_anneal::exact::brute_force;
use tsp_anneal::tour::{total_cost, validate_permutation};
use tsp_anneal::DistanceMatrix;

/// Symmetric matrices with small integer costs, so sums are exact in f64.
fn symmetric_matrix(max_n: usize) -> impl Strategy<Value = DistanceMatrix> {
    (2..=max_n).prop_flat_map(|n| {
        prop::collection::vec(0u32..100, n * (n - 1) / 2).prop_map(move |upper| {
            let mut rows = vec![vec![0.0; n]; n];
            let mut k = 0;
            for i in 0..n {
                for j in (i + 1)..n {
                    rows[i][j] = upper[k] as f64;
                    rows[j][i] = upper[k] as f64;
                    k += 1;
                }
            }
            DistanceMatrix::from_rows(&rows).unwrap()
        })
    })
}

fn matrix_and_tour(max_n: usize) -> impl Strategy<Value = (DistanceMatrix, Vec<usize>)> {
    symmetric_matrix(max_n).prop_flat_map(|m| {
        let n = m.len();
        (Just(m), Just((0..n).collect::<Vec<usize>>()).prop_shuffle())
    })
}

fn neighborhood() -> impl Strategy<Value = Neighborhood> {
    prop_oneof![
        Just(Neighborhood::Swap),
        Just(Neighborhood::Reversal),
        Just(Neighborhood::Insertion),
    ]
}

fn quick_config(seed: u64) -> AnnealConfig {
    AnnealConfig::default()
        .with_initial_temperature(100.0)
        .with_min_temperature(0.5)
        .with_cooling_rate(0.97)
        .with_iterations_per_temperature(10)
        .with_seed(seed)
}

proptest! {
    #[test]
    fn cost_is_non_negative((m, tour) in matrix_and_tour(12)) {
        prop_assert!(total_cost(&tour, &m).unwrap() >= 0.0);
    }

    #[test]
    fn cost_is_rotation_invariant((m, tour) in matrix_and_tour(12)) {
        let base = total_cost(&tour, &m).unwrap();
        for k in 0..tour.len() {
            let mut rotated = tour.clone();
            rotated.rotate_left(k);
            prop_assert_eq!(total_cost(&rotated, &m).unwrap(), base);
        }
    }

    #[test]
    fn cost_is_reversal_invariant_for_symmetric((m, tour) in matrix_and_tour(12)) {
        let mut reversed = tour.clone();
        reversed.reverse();
        prop_assert_eq!(total_cost(&reversed, &m).unwrap(), total_cost(&tour, &m).unwrap());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn run_returns_valid_tour_with_exact_cost(
        m in symmetric_matrix(9),
        policy in neighborhood(),
        incremental in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let mode = if incremental { CostMode::Incremental } else { CostMode::Full };
        let config = quick_config(seed).with_cost_mode(mode);
        let result = AnnealRunner::run(&m, &config, &policy).unwrap();

        prop_assert_eq!(result.best_tour.len(), m.len());
        prop_assert!(validate_permutation(result.best_tour.as_slice()).is_ok());
        prop_assert_eq!(result.best_cost, total_cost(result.best_tour.as_slice(), &m).unwrap());
    }

    #[test]
    fn best_history_never_increases(m in symmetric_matrix(9), seed in any::<u64>()) {
        let result = AnnealRunner::solve(&m, &quick_config(seed)).unwrap();
        for window in result.cost_history.windows(2) {
            prop_assert!(window[1] <= window[0]);
        }
        prop_assert_eq!(result.cost_history.last().copied(), Some(result.best_cost));
    }

    #[test]
    fn incremental_history_ends_at_best_cost(
        points in prop::collection::vec((0.0f64..100.0, 0.0f64..100.0), 3..15),
        policy in neighborhood(),
        seed in any::<u64>(),
    ) {
        let rows: Vec<Vec<f64>> = points
            .iter()
            .map(|&(x1, y1)| {
                points
                    .iter()
                    .map(|&(x2, y2)| ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt())
                    .collect()
            })
            .collect();
        let m = DistanceMatrix::from_rows(&rows).unwrap();
        let config = quick_config(seed).with_cost_mode(CostMode::Incremental);
        let result = AnnealRunner::run(&m, &config, &policy).unwrap();
        for window in result.cost_history.windows(2) {
            prop_assert!(window[1] < window[0]);
        }
        prop_assert_eq!(result.cost_history.last().copied(), Some(result.best_cost));
    }

    #[test]
    fn same_seed_same_result(m in symmetric_matrix(9), policy in neighborhood(), seed in any::<u64>()) {
        let config = quick_config(seed);
        let a = AnnealRunner::run(&m, &config, &policy).unwrap();
        let b = AnnealRunner::run(&m, &config, &policy).unwrap();
        prop_assert_eq!(a.best_tour, b.best_tour);
        prop_assert_eq!(a.best_cost, b.best_cost);
    }

    #[test]
    fn never_beats_exhaustive_optimum(m in symmetric_matrix(7), seed in any::<u64>()) {
        let (_, optimum) = brute_force(&m).unwrap();
        let result = AnnealRunner::solve(&m, &quick_config(seed)).unwrap();
        prop_assert!(result.best_cost >= optimum);
    }
}
