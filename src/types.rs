use std::fmt::Debug;
use std::str::FromStr;

use ndarray::{Array1, Array2, ArrayD};
use num_traits::{Float, NumCast};

use crate::error::Error;

/// Element types accepted by the distance functions.
///
/// Anything implementing `num_traits::Float` qualifies: `f32`, `f64`, and
/// `half::f16` when the `f16` feature is on.
pub trait Element: Float + Debug + Send + Sync + 'static {}

impl<T: Float + Debug + Send + Sync + 'static> Element for T {}

/// Numeric policy shared by the kernel and the reducer: every computation
/// runs in `f64`, and results are cast back to the caller's element type
/// only at the end. Low-precision inputs would otherwise lose most of their
/// significant bits in the `pow`/`root` chain.
pub struct Precision;

impl Precision {
    #[inline]
    pub fn upcast<T: Element>(value: T) -> f64 {
        value.to_f64().unwrap_or(f64::NAN)
    }

    #[inline]
    pub fn downcast<T: Element>(value: f64) -> T {
        <T as NumCast>::from(value).unwrap_or_else(T::nan)
    }
}

/// Row-wise reduction applied to a distance matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reduction {
    /// Average over the last axis.
    Mean,
    /// Sum over the last axis.
    Sum,
    /// Return the matrix unchanged.
    #[default]
    None,
}

impl FromStr for Reduction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mean" => Ok(Reduction::Mean),
            "sum" => Ok(Reduction::Sum),
            "none" => Ok(Reduction::None),
            other => Err(Error::invalid_argument(format!(
                "Expected reduction to be one of `['mean', 'sum', 'none', None]` but got {other}"
            ))),
        }
    }
}

/// Result of a pairwise computation: the full matrix, or one value per row
/// when a reduction was requested.
#[derive(Debug, Clone, PartialEq)]
pub enum DistanceOutput<T> {
    Matrix(Array2<T>),
    Rows(Array1<T>),
}

impl<T> DistanceOutput<T> {
    pub fn as_matrix(&self) -> Option<&Array2<T>> {
        match self {
            DistanceOutput::Matrix(m) => Some(m),
            DistanceOutput::Rows(_) => None,
        }
    }

    pub fn as_rows(&self) -> Option<&Array1<T>> {
        match self {
            DistanceOutput::Rows(r) => Some(r),
            DistanceOutput::Matrix(_) => None,
        }
    }

    pub fn into_dyn(self) -> ArrayD<T> {
        match self {
            DistanceOutput::Matrix(m) => m.into_dyn(),
            DistanceOutput::Rows(r) => r.into_dyn(),
        }
    }
}
