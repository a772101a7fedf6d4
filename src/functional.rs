use ndarray::{ArrayView, Dimension};

use crate::distance::{minkowski_from_diffs, pairwise_minkowski_matrix};
use crate::error::Result;
use crate::input::{check_input, check_same_shape, validate_p};
use crate::reduction::reduce_distance_matrix;
use crate::types::{DistanceOutput, Element, Precision, Reduction};

/// Pairwise Minkowski distances between the rows of `x` and `y`.
///
/// ```text
/// d(x, y) = (sum_k |x_k - y_k|^p)^(1/p)
/// ```
///
/// With `y` omitted the rows of `x` are compared with each other and the
/// diagonal defaults to zero. `reduction` collapses the `[N, M]` matrix
/// along its last axis; `None` keeps the matrix.
///
/// # Errors
///
/// [`Error::InvalidArgument`](crate::Error::InvalidArgument) when `p` is not
/// positive, [`Error::Shape`](crate::Error::Shape) when either input is not
/// 2-D or the feature dimensions differ.
///
/// # Example
///
/// ```rust
/// use minkowski_rs::pairwise_minkowski_distance;
/// use ndarray::array;
///
/// let x = array![[2.0_f64, 3.0], [3.0, 5.0], [5.0, 8.0]];
/// let d = pairwise_minkowski_distance(x.view(), None, 4.0, None, None).unwrap();
/// let d = d.as_matrix().unwrap();
/// assert_eq!(d[[1, 1]], 0.0);
/// assert!((d[[0, 1]] - 2.0305).abs() < 1e-3);
/// ```
pub fn pairwise_minkowski_distance<'a, T: Element, D: Dimension>(
    x: ArrayView<'a, T, D>,
    y: Option<ArrayView<'a, T, D>>,
    p: f64,
    reduction: Option<Reduction>,
    zero_diagonal: Option<bool>,
) -> Result<DistanceOutput<T>> {
    validate_p(p)?;
    let checked = check_input(x, y, zero_diagonal)?;
    let distance = pairwise_minkowski_matrix(checked.x, checked.y, p, checked.zero_diagonal)?;
    Ok(reduce_distance_matrix(distance, reduction.unwrap_or_default()))
}

/// Minkowski distance between `preds` and `target` treated as two flat
/// vectors, whatever their shape.
pub fn minkowski_distance<T: Element, D: Dimension>(
    preds: ArrayView<'_, T, D>,
    target: ArrayView<'_, T, D>,
    p: f64,
) -> Result<T> {
    validate_p(p)?;
    check_same_shape(preds.shape(), target.shape())?;
    Ok(flat_minkowski(preds.iter().copied(), target.iter().copied(), p))
}

/// Distance between two equally long flat sequences, computed in `f64`.
pub(crate) fn flat_minkowski<T, P, Q>(preds: P, target: Q, p: f64) -> T
where
    T: Element,
    P: Iterator<Item = T>,
    Q: Iterator<Item = T>,
{
    let diffs = preds
        .zip(target)
        .map(|(a, b)| Precision::upcast(a) - Precision::upcast(b));
    Precision::downcast(minkowski_from_diffs(diffs, p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use ndarray::{array, Array2};

    fn assert_close(actual: &Array2<f64>, expected: &Array2<f64>, tol: f64) {
        assert_eq!(actual.dim(), expected.dim());
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((a - e).abs() < tol, "{a} vs {e}");
        }
    }

    #[test]
    fn test_with_y() {
        let x = array![[2.0_f64, 3.0], [3.0, 5.0], [5.0, 8.0]];
        let y = array![[1.0_f64, 0.0], [2.0, 1.0]];
        let out = pairwise_minkowski_distance(x.view(), Some(y.view()), 2.0, None, None).unwrap();
        let expected = array![[3.1623_f64, 2.0000], [5.3852, 4.1231], [8.9443, 7.6158]];
        assert_close(out.as_matrix().unwrap(), &expected, 1e-3);

        let out = pairwise_minkowski_distance(x.view(), Some(y.view()), 4.0, None, None).unwrap();
        let expected = array![[3.0092_f64, 2.0000], [5.0317, 4.0039], [8.1222, 7.0583]];
        assert_close(out.as_matrix().unwrap(), &expected, 1e-3);
    }

    #[test]
    fn test_without_y() {
        let x = array![[2.0_f64, 3.0], [3.0, 5.0], [5.0, 8.0]];
        let out = pairwise_minkowski_distance(x.view(), None, 2.0, None, None).unwrap();
        let expected = array![
            [0.0, 2.2361, 5.8310],
            [2.2361, 0.0, 3.6056],
            [5.8310, 3.6056, 0.0]
        ];
        let d = out.as_matrix().unwrap();
        assert_close(d, &expected, 1e-3);
        for i in 0..3 {
            assert_eq!(d[[i, i]], 0.0);
        }

        let out = pairwise_minkowski_distance(x.view(), None, 4.0, None, None).unwrap();
        let expected = array![
            [0.0, 2.0305, 5.1547],
            [2.0305, 0.0, 3.1383],
            [5.1547, 3.1383, 0.0]
        ];
        assert_close(out.as_matrix().unwrap(), &expected, 1e-3);
    }

    #[test]
    fn test_self_comparison_keeps_diagonal_when_asked() {
        let x = array![[1.0_f64, 1.0], [2.0, 2.0]];
        let y = array![[2.0_f64, 1.0], [2.0, 3.0]];
        let kept = pairwise_minkowski_distance(x.view(), Some(y.view()), 1.0, None, None).unwrap();
        assert_eq!(kept.as_matrix().unwrap()[[0, 0]], 1.0);
        let zeroed =
            pairwise_minkowski_distance(x.view(), Some(y.view()), 1.0, None, Some(true)).unwrap();
        assert_eq!(zeroed.as_matrix().unwrap()[[0, 0]], 0.0);
        assert_eq!(zeroed.as_matrix().unwrap()[[1, 1]], 0.0);
    }

    #[test]
    fn test_x_and_y_borrowed_from_different_owners() {
        fn distances_to_origin(x: &Array2<f64>) -> DistanceOutput<f64> {
            let origin = Array2::<f64>::zeros((1, x.ncols()));
            pairwise_minkowski_distance(x.view(), Some(origin.view()), 2.0, None, None).unwrap()
        }

        let x = array![[3.0_f64, 4.0], [6.0, 8.0]];
        let out = distances_to_origin(&x);
        assert_eq!(out.as_matrix().unwrap(), &array![[5.0_f64], [10.0]]);
    }

    #[test]
    fn test_reductions() {
        let x = array![[2.0_f64, 3.0], [3.0, 5.0], [5.0, 8.0]];
        let y = array![[1.0_f64, 0.0], [2.0, 1.0]];
        let full = pairwise_minkowski_distance(x.view(), Some(y.view()), 2.0, None, None).unwrap();
        let full = full.as_matrix().unwrap();

        let sum = pairwise_minkowski_distance(x.view(), Some(y.view()), 2.0, Some(Reduction::Sum), None)
            .unwrap();
        let mean =
            pairwise_minkowski_distance(x.view(), Some(y.view()), 2.0, Some(Reduction::Mean), None)
                .unwrap();
        for i in 0..3 {
            let s = full[[i, 0]] + full[[i, 1]];
            assert!((sum.as_rows().unwrap()[i] - s).abs() < 1e-12);
            assert!((mean.as_rows().unwrap()[i] - s / 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_reduction_parsed_from_str() {
        let x = array![[0.0_f64, 0.0], [3.0, 4.0]];
        let reduction: Reduction = "sum".parse().unwrap();
        let out = pairwise_minkowski_distance(x.view(), None, 2.0, Some(reduction), None).unwrap();
        assert_eq!(out.as_rows().unwrap(), &array![5.0_f64, 5.0]);

        assert!("average".parse::<Reduction>().is_err());
    }

    #[test]
    fn test_invalid_p_rejected() {
        let x = array![[1.0_f64, 2.0]];
        for p in [0.0, -1.0, f64::NAN] {
            let err = pairwise_minkowski_distance(x.view(), None, p, None, None).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)));
        }
    }

    #[test]
    fn test_shape_errors() {
        let x = array![[1.0_f64, 2.0]];
        let y = array![[1.0_f64, 2.0, 3.0]];
        let err = pairwise_minkowski_distance(x.view(), Some(y.view()), 2.0, None, None).unwrap_err();
        assert!(matches!(err, Error::Shape(_)));

        let v = array![1.0_f64, 2.0];
        let err = pairwise_minkowski_distance(v.view(), None, 2.0, None, None).unwrap_err();
        assert!(matches!(err, Error::Shape(_)));
    }

    #[test]
    fn test_chebyshev_limit() {
        let x = array![[0.0_f64, 0.0], [1.0, -7.0]];
        let out = pairwise_minkowski_distance(x.view(), None, f64::INFINITY, None, None).unwrap();
        assert_eq!(out.as_matrix().unwrap()[[0, 1]], 7.0);
    }

    #[test]
    fn test_minkowski_distance_flattens() {
        let preds = array![[0.0_f64, 1.0], [2.0, 3.0]];
        let target = array![[1.0_f64, 1.0], [2.0, 5.0]];
        let d = minkowski_distance(preds.view(), target.view(), 2.0).unwrap();
        assert!((d - 5.0_f64.sqrt()).abs() < 1e-12);

        let d = minkowski_distance(preds.view(), target.view(), 1.0).unwrap();
        assert_eq!(d, 3.0);
    }

    #[test]
    fn test_minkowski_distance_errors() {
        let a = ndarray::Array1::<f64>::zeros(50);
        let b = ndarray::Array1::<f64>::zeros(100);
        let err = minkowski_distance(a.view(), b.view(), 2.0).unwrap_err();
        assert!(matches!(err, Error::Shape(_)));

        let err = minkowski_distance(a.view(), a.view(), -10.0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
