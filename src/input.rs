use ndarray::{ArrayView, ArrayView2, Dimension, Ix2};

use crate::error::{Error, Result};

/// Validated pair of `[N, d]` / `[M, d]` views plus the resolved
/// zero-diagonal flag.
#[derive(Debug)]
pub struct CheckedInput<'a, T> {
    pub x: ArrayView2<'a, T>,
    pub y: ArrayView2<'a, T>,
    pub zero_diagonal: bool,
}

/// Check that `x` (and `y`, if given) are 2-D with matching feature
/// dimension. A missing `y` is replaced by `x`.
pub fn check_input<'a, T, D: Dimension>(
    x: ArrayView<'a, T, D>,
    y: Option<ArrayView<'a, T, D>>,
    zero_diagonal: Option<bool>,
) -> Result<CheckedInput<'a, T>> {
    let zero_diagonal = resolve_zero_diagonal(y.is_some(), zero_diagonal);
    let x = as_matrix(x, "x")?;
    let y = match y {
        Some(y) => {
            let y = as_matrix(y, "y")?;
            if x.ncols() != y.ncols() {
                return Err(Error::shape(format!(
                    "Expected argument `y` to have the same feature dimension as `x` ({}) but got {}",
                    x.ncols(),
                    y.ncols()
                )));
            }
            y
        }
        None => x.clone(),
    };

    tracing::trace!(
        n = x.nrows(),
        m = y.nrows(),
        d = x.ncols(),
        zero_diagonal,
        "validated pairwise input"
    );

    Ok(CheckedInput { x, y, zero_diagonal })
}

/// Self-comparison implies a zero diagonal; an explicit `y` does not.
/// An explicit flag always wins.
pub fn resolve_zero_diagonal(y_given: bool, zero_diagonal: Option<bool>) -> bool {
    match zero_diagonal {
        Some(flag) => flag,
        None => !y_given,
    }
}

/// Reject orders the power/root chain cannot use: `p <= 0` and NaN.
/// `p = +inf` is accepted and means the Chebyshev limit.
pub fn validate_p(p: f64) -> Result<()> {
    if p.is_nan() || p <= 0.0 {
        return Err(Error::invalid_argument(format!(
            "Argument `p` must be a positive number, but got {p}"
        )));
    }
    Ok(())
}

/// Predictions and targets are compared element by element, so their
/// shapes have to agree exactly.
pub fn check_same_shape(preds: &[usize], target: &[usize]) -> Result<()> {
    if preds != target {
        return Err(Error::shape(format!(
            "Predictions and targets are expected to have the same shape, but got {preds:?} and {target:?}"
        )));
    }
    Ok(())
}

fn as_matrix<'a, T, D: Dimension>(
    a: ArrayView<'a, T, D>,
    name: &str,
) -> Result<ArrayView2<'a, T>> {
    let ndim = a.ndim();
    a.into_dimensionality::<Ix2>().map_err(|_| {
        Error::shape(format!(
            "Expected argument `{name}` to be a 2D array of shape `[N, d]` but got a {ndim}D array"
        ))
    })
}
