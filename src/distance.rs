use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::types::{Element, Precision};

/// Minkowski distance from a stream of component differences.
/// p=1, p=2 and p=inf take dedicated paths.
pub(crate) fn minkowski_from_diffs<I>(diffs: I, p: f64) -> f64
where
    I: Iterator<Item = f64>,
{
    if p == 2.0 {
        euclidean_distance(diffs)
    } else if p == 1.0 {
        manhattan_distance(diffs)
    } else if p.is_infinite() {
        chebyshev_distance(diffs)
    } else {
        general_minkowski(diffs, p)
    }
}

#[inline]
fn euclidean_distance<I: Iterator<Item = f64>>(diffs: I) -> f64 {
    diffs.map(|d| d * d).sum::<f64>().sqrt()
}

#[inline]
fn manhattan_distance<I: Iterator<Item = f64>>(diffs: I) -> f64 {
    diffs.map(f64::abs).sum()
}

#[inline]
fn chebyshev_distance<I: Iterator<Item = f64>>(diffs: I) -> f64 {
    diffs.map(f64::abs).fold(0.0_f64, f64::max)
}

#[inline]
fn general_minkowski<I: Iterator<Item = f64>>(diffs: I, p: f64) -> f64 {
    let sum: f64 = diffs.map(|d| d.abs().powf(p)).sum();
    sum.powf(1.0 / p)
}

/// Pairwise distance matrix between the rows of `x` `[N, d]` and `y` `[M, d]`.
///
/// Inputs are upcast to `f64` and the `[N, M]` result is cast back to `T`
/// (see [`Precision`]). When `zero_diagonal` is set and the result is square,
/// the diagonal is overwritten with exactly zero after computation.
///
/// Rows of the output are filled in parallel. No `[N, M, d]` difference
/// tensor is materialized; extra memory is the two `f64` input copies.
///
/// `p` is not validated here; callers go through [`crate::input::validate_p`].
pub fn pairwise_minkowski_matrix<T: Element>(
    x: ArrayView2<'_, T>,
    y: ArrayView2<'_, T>,
    p: f64,
    zero_diagonal: bool,
) -> Result<Array2<T>> {
    debug_assert_eq!(x.ncols(), y.ncols());
    let (n, m) = (x.nrows(), y.nrows());
    tracing::debug!(n, m, d = x.ncols(), p, zero_diagonal, "pairwise minkowski");

    let x64 = x.mapv(Precision::upcast::<T>);
    let y64 = y.mapv(Precision::upcast::<T>);

    let cells: Vec<f64> = (0..n)
        .into_par_iter()
        .flat_map_iter(|i| {
            let xi = x64.row(i);
            y64.rows().into_iter().map(move |yj| {
                minkowski_from_diffs(xi.iter().zip(yj.iter()).map(|(a, b)| a - b), p)
            })
        })
        .collect();

    let mut distance = Array2::from_shape_vec((n, m), cells)
        .map_err(|e| Error::shape(format!("distance matrix of shape [{n}, {m}]: {e}")))?;

    if zero_diagonal && n == m {
        distance.diag_mut().fill(0.0);
    }

    Ok(distance.mapv(Precision::downcast::<T>))
}
