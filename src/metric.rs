use ndarray::{ArrayView, Dimension};

use crate::error::{Error, Result};
use crate::functional::flat_minkowski;
use crate::input::{check_same_shape, validate_p};
use crate::types::Element;

/// One submitted batch, flattened in logical (row-major) order. Predictions
/// and targets are kept side by side so merging never breaks their pairing.
#[derive(Debug, Clone, PartialEq)]
struct Batch<T> {
    preds: Vec<T>,
    target: Vec<T>,
}

/// Streaming Minkowski distance between predictions and targets.
///
/// Batches are buffered by [`update`](Self::update); [`compute`](Self::compute)
/// flattens every buffered prediction into one vector, every target into a
/// matching vector, and returns the single distance between the two. This is
/// a scalar, not a pairwise matrix.
///
/// Independent instances (one per worker, say) can be combined with
/// [`merge`](Self::merge) before the final `compute`.
#[derive(Debug, Clone)]
pub struct MinkowskiDistance<T = f64> {
    p: f64,
    batches: Vec<Batch<T>>,
}

impl<T: Element> MinkowskiDistance<T> {
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `p` is not a positive number.
    pub fn new(p: f64) -> Result<Self> {
        validate_p(p)?;
        Ok(Self {
            p,
            batches: Vec::new(),
        })
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    /// Buffer one batch. `preds` and `target` may have any dimensionality
    /// but must share the same shape.
    pub fn update<D1: Dimension, D2: Dimension>(
        &mut self,
        preds: ArrayView<'_, T, D1>,
        target: ArrayView<'_, T, D2>,
    ) -> Result<()> {
        check_same_shape(preds.shape(), target.shape())?;
        tracing::trace!(len = preds.len(), batch = self.batches.len(), "minkowski update");
        self.batches.push(Batch {
            preds: preds.iter().copied().collect(),
            target: target.iter().copied().collect(),
        });
        Ok(())
    }

    /// Buffer one batch and return the distance of that batch alone.
    pub fn forward<D1: Dimension, D2: Dimension>(
        &mut self,
        preds: ArrayView<'_, T, D1>,
        target: ArrayView<'_, T, D2>,
    ) -> Result<T> {
        self.update(preds, target)?;
        let batch = &self.batches[self.batches.len() - 1];
        Ok(flat_minkowski(
            batch.preds.iter().copied(),
            batch.target.iter().copied(),
            self.p,
        ))
    }

    /// Distance over everything buffered so far. Buffers are left intact,
    /// so further updates keep accumulating. An empty metric yields zero.
    pub fn compute(&self) -> T {
        tracing::debug!(
            batches = self.batches.len(),
            len = self.len(),
            p = self.p,
            "minkowski compute"
        );
        let preds = self.batches.iter().flat_map(|b| b.preds.iter().copied());
        let target = self.batches.iter().flat_map(|b| b.target.iter().copied());
        flat_minkowski(preds, target, self.p)
    }

    pub fn reset(&mut self) {
        tracing::debug!(batches = self.batches.len(), "minkowski reset");
        self.batches.clear();
    }

    /// Append the batches buffered by `other`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the two metrics use a different `p`.
    pub fn merge(&mut self, other: Self) -> Result<()> {
        if other.p != self.p {
            return Err(Error::invalid_argument(format!(
                "Cannot merge metrics with different `p`: {} and {}",
                self.p, other.p
            )));
        }
        tracing::debug!(
            ours = self.batches.len(),
            theirs = other.batches.len(),
            "minkowski merge"
        );
        self.batches.extend(other.batches);
        Ok(())
    }

    pub fn num_batches(&self) -> usize {
        self.batches.len()
    }

    /// Number of buffered prediction/target pairs.
    pub fn len(&self) -> usize {
        self.batches.iter().map(|b| b.preds.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Element> Default for MinkowskiDistance<T> {
    fn default() -> Self {
        Self {
            p: 2.0,
            batches: Vec::new(),
        }
    }
}
