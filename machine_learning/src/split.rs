use log::info;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{Frame, MlErr, Result};

/// Splits the rows of `frame` into a shuffled train and test partition.
///
/// The permutation is drawn from a `StdRng` seeded with `seed`, so the same frame, test size and
/// seed always yield the same partitions. The test partition holds the first
/// `ceil(test_size * rows)` shuffled rows and the train partition the rest.
///
/// # Arguments
/// * `frame` - The rows to split.
/// * `test_size` - The fraction of rows held out for testing, in the `(0, 1)` range.
/// * `seed` - The seed of the shuffle.
///
/// # Returns
/// A `(train, test)` tuple or `MlErr::InvalidSplit` if either partition would be empty.
pub fn train_test_split(frame: &Frame, test_size: f64, seed: u64) -> Result<(Frame, Frame)> {
    let rows = frame.nrows();
    if rows == 0 {
        return Err(MlErr::EmptyDataset);
    }

    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(MlErr::InvalidSplit { rows, test_size });
    }

    let n_test = (test_size * rows as f64).ceil() as usize;
    if n_test == 0 || n_test >= rows {
        return Err(MlErr::InvalidSplit { rows, test_size });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut indices: Vec<usize> = (0..rows).collect();
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(n_test);
    info!(
        "split {rows} row(s) into {} train and {} test (seed {seed})",
        train_idx.len(),
        test_idx.len()
    );

    Ok((frame.take_rows(train_idx), frame.take_rows(test_idx)))
}

#[cfg(test)]
mod tests {
    use ndarray::Array2;

    use super::*;

    fn frame(rows: usize) -> Frame {
        let data = Array2::from_shape_fn((rows, 2), |(i, j)| (i * 10 + j) as f64);
        Frame::new(vec!["x", "y"], data).unwrap()
    }

    #[test]
    fn split_sizes_follow_ceil_of_test_fraction() {
        let (train, test) = train_test_split(&frame(11), 0.2, 42).unwrap();
        assert_eq!(test.nrows(), 3);
        assert_eq!(train.nrows(), 8);
    }

    #[test]
    fn split_is_a_partition_of_the_rows() {
        let source = frame(25);
        let (train, test) = train_test_split(&source, 0.2, 7).unwrap();

        let mut seen: Vec<f64> = train
            .column("x")
            .unwrap()
            .iter()
            .chain(test.column("x").unwrap().iter())
            .copied()
            .collect();
        seen.sort_by(f64::total_cmp);

        let expected: Vec<f64> = source.column("x").unwrap().to_vec();
        assert_eq!(seen, expected);
    }

    #[test]
    fn split_is_deterministic_for_a_seed() {
        let source = frame(50);
        let a = train_test_split(&source, 0.2, 42).unwrap();
        let b = train_test_split(&source, 0.2, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn split_differs_across_seeds() {
        let source = frame(50);
        let (_, a) = train_test_split(&source, 0.2, 1).unwrap();
        let (_, b) = train_test_split(&source, 0.2, 2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn split_rejects_degenerate_partitions() {
        assert!(matches!(
            train_test_split(&frame(1), 0.2, 42),
            Err(MlErr::InvalidSplit { .. })
        ));
        assert!(matches!(
            train_test_split(&frame(10), 1.0, 42),
            Err(MlErr::InvalidSplit { .. })
        ));
        assert!(matches!(
            train_test_split(&frame(10), 0.0, 42),
            Err(MlErr::InvalidSplit { .. })
        ));
    }
}
