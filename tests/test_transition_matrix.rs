//! Tests for the transition matrix builder.
//!
//! Tests cover:
//! - Row-stochasticity for arbitrary sizes and probabilities
//! - CW mirror symmetry
//! - RepAlt repetition bias
//! - Rejection of invalid arguments

use approx::assert_relative_eq;
use proptest::prelude::*;
use trialhist::{BlockType, Topology, TransitionMatrix, TrialHistError};

fn topology() -> impl Strategy<Value = Topology> {
    prop_oneof![Just(Topology::Cw), Just(Topology::RepAlt)]
}

proptest! {
    #[test]
    fn prop_rows_are_stochastic(
        n_ch in 2usize..40,
        tr_prob in 0.001f64..0.999,
        topo in topology(),
    ) {
        let tm = TransitionMatrix::build(n_ch, tr_prob, topo).unwrap();
        prop_assert!(tm.check_row_stochastic(1e-9).is_ok());

        for block in BlockType::ALL {
            let slice = tm.slice(block);
            prop_assert_eq!(slice.len(), n_ch);
            for row in slice {
                prop_assert_eq!(row.len(), n_ch);
                prop_assert!(row.iter().all(|&w| w >= 0.0));
                prop_assert!((row.iter().sum::<f64>() - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn prop_cw_is_exact_transpose(n_ch in 2usize..20, tr_prob in 0.01f64..0.99) {
        let tm = TransitionMatrix::build(n_ch, tr_prob, Topology::Cw).unwrap();
        let m0 = tm.slice(BlockType::Zero);
        let m1 = tm.slice(BlockType::One);
        for i in 0..n_ch {
            for j in 0..n_ch {
                prop_assert_eq!(m1[i][j].to_bits(), m0[j][i].to_bits());
            }
        }
    }

    #[test]
    fn prop_repalt_diagonal(n_ch in 2usize..20, tr_prob in 0.01f64..0.99) {
        let tm = TransitionMatrix::build(n_ch, tr_prob, Topology::RepAlt).unwrap();
        let m1 = tm.slice(BlockType::One);
        let background = (1.0 - tr_prob) / (n_ch - 1) as f64;
        for i in 0..n_ch {
            for j in 0..n_ch {
                let expected = if i == j { tr_prob } else { background };
                prop_assert_eq!(m1[i][j], expected);
            }
        }
    }

    #[test]
    fn prop_block_zero_same_for_both_topologies(n_ch in 2usize..20, tr_prob in 0.01f64..0.99) {
        let cw = TransitionMatrix::build(n_ch, tr_prob, Topology::Cw).unwrap();
        let ra = TransitionMatrix::build(n_ch, tr_prob, Topology::RepAlt).unwrap();
        prop_assert_eq!(cw.slice(BlockType::Zero), ra.slice(BlockType::Zero));
    }
}

#[test]
fn test_three_choice_values() {
    let tm = TransitionMatrix::build(3, 0.9, Topology::RepAlt).unwrap();

    let expected_m0 = [
        [0.05, 0.9, 0.05],
        [0.05, 0.05, 0.9],
        [0.9, 0.05, 0.05],
    ];
    let expected_m1 = [
        [0.9, 0.05, 0.05],
        [0.05, 0.9, 0.05],
        [0.05, 0.05, 0.9],
    ];

    for i in 0..3 {
        for j in 0..3 {
            assert_relative_eq!(tm.slice(BlockType::Zero)[i][j], expected_m0[i][j], epsilon = 1e-12);
            assert_relative_eq!(tm.slice(BlockType::One)[i][j], expected_m1[i][j], epsilon = 1e-12);
        }
    }
}

#[test]
fn test_accessors() {
    let tm = TransitionMatrix::build(5, 0.6, Topology::Cw).unwrap();
    assert_eq!(tm.n_ch(), 5);
    assert_eq!(tm.tr_prob(), 0.6);
    assert_eq!(tm.topology(), Topology::Cw);
    assert_relative_eq!(tm.background(), 0.1, epsilon = 1e-12);
}

#[test]
fn test_invalid_num_choices() {
    for n_ch in [0, 1] {
        assert!(matches!(
            TransitionMatrix::build(n_ch, 0.8, Topology::Cw),
            Err(TrialHistError::InvalidNumChoices(n)) if n == n_ch
        ));
    }
}

#[test]
fn test_invalid_tr_prob() {
    for p in [-0.1, 0.0, 1.0, 1.1, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            TransitionMatrix::build(3, p, Topology::RepAlt),
            Err(TrialHistError::InvalidProbability { name: "tr_prob", .. })
        ));
    }
}

#[test]
fn test_binary_round_trip_keeps_bits() {
    let tm = TransitionMatrix::build(4, 0.85, Topology::RepAlt).unwrap();
    let bytes = bincode::serialize(&tm).unwrap();
    let back: TransitionMatrix = bincode::deserialize(&bytes).unwrap();
    assert_eq!(back, tm);
}
