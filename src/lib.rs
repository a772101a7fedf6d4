//! Pairwise Minkowski distances between the rows of two matrices, and a
//! streaming Minkowski distance metric over batched predictions and targets.
//!
//! ```text
//! d(x, y) = (sum_k |x_k - y_k|^p)^(1/p)
//! ```
//!
//! p=1 is Manhattan, p=2 Euclidean and p=inf Chebyshev. All arithmetic is
//! carried out in `f64` and cast back to the input element type.
//!
//! # Example
//!
//! ```rust
//! use minkowski_rs::{pairwise_minkowski_distance, MinkowskiDistance, Reduction};
//! use ndarray::array;
//!
//! let x = array![[0.0_f64, 0.0], [3.0, 4.0]];
//! let rows = pairwise_minkowski_distance(x.view(), None, 2.0, Some(Reduction::Sum), None)?;
//! assert_eq!(rows.as_rows().unwrap(), &array![5.0, 5.0]);
//!
//! let mut metric = MinkowskiDistance::new(1.0)?;
//! metric.update(array![1.0_f64, 2.0].view(), array![2.0, 0.0].view())?;
//! assert_eq!(metric.compute(), 3.0);
//! # Ok::<(), minkowski_rs::Error>(())
//! ```

pub mod distance;
mod error;
mod functional;
pub mod input;
mod metric;
mod reduction;
mod types;

pub use error::{Error, Result};
pub use functional::{minkowski_distance, pairwise_minkowski_distance};
pub use metric::MinkowskiDistance;
pub use reduction::reduce_distance_matrix;
pub use types::{DistanceOutput, Element, Precision, Reduction};

#[cfg(feature = "extension-module")]
mod pybridge {
    use crate::{pairwise_minkowski_distance, MinkowskiDistance, Reduction};
    use numpy::{PyArrayDyn, PyReadonlyArrayDyn};
    use pyo3::prelude::*;

    #[pyfunction]
    #[pyo3(
        name = "pairwise_minkowski_distance",
        signature = (x, y=None, p=2.0, reduction=None, zero_diagonal=None)
    )]
    fn py_pairwise_minkowski_distance<'py>(
        py: Python<'py>,
        x: PyReadonlyArrayDyn<'py, f64>,
        y: Option<PyReadonlyArrayDyn<'py, f64>>,
        p: f64,
        reduction: Option<String>,
        zero_diagonal: Option<bool>,
    ) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
        let reduction = reduction
            .map(|r| r.parse::<Reduction>())
            .transpose()?;
        let y = y.as_ref().map(|y| y.as_array());
        let out = pairwise_minkowski_distance(x.as_array(), y, p, reduction, zero_diagonal)?;
        Ok(PyArrayDyn::from_owned_array(py, out.into_dyn()))
    }

    #[pyclass]
    #[pyo3(name = "RustMinkowskiDistance")]
    struct RustMinkowskiDistance {
        inner: MinkowskiDistance<f64>,
    }

    #[pymethods]
    impl RustMinkowskiDistance {
        #[new]
        #[pyo3(signature = (p=2.0))]
        fn new(p: f64) -> PyResult<Self> {
            Ok(Self {
                inner: MinkowskiDistance::new(p)?,
            })
        }

        #[getter]
        fn p(&self) -> f64 {
            self.inner.p()
        }

        fn update(
            &mut self,
            preds: PyReadonlyArrayDyn<'_, f64>,
            target: PyReadonlyArrayDyn<'_, f64>,
        ) -> PyResult<()> {
            self.inner.update(preds.as_array(), target.as_array())?;
            Ok(())
        }

        fn forward(
            &mut self,
            preds: PyReadonlyArrayDyn<'_, f64>,
            target: PyReadonlyArrayDyn<'_, f64>,
        ) -> PyResult<f64> {
            Ok(self.inner.forward(preds.as_array(), target.as_array())?)
        }

        fn compute(&self) -> f64 {
            self.inner.compute()
        }

        fn reset(&mut self) {
            self.inner.reset();
        }
    }

    #[pymodule]
    pub fn _rust_minkowski(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_class::<RustMinkowskiDistance>()?;
        m.add_function(wrap_pyfunction!(py_pairwise_minkowski_distance, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "extension-module")]
pub use pybridge::_rust_minkowski;
