use ndarray::{Array2, Axis};

use crate::types::{DistanceOutput, Element, Precision, Reduction};

/// Collapse a distance matrix along its last axis, or pass it through.
///
/// Row sums and means are accumulated in `f64` and cast back to `T`.
pub fn reduce_distance_matrix<T: Element>(
    distance: Array2<T>,
    reduction: Reduction,
) -> DistanceOutput<T> {
    match reduction {
        Reduction::None => DistanceOutput::Matrix(distance),
        Reduction::Sum => DistanceOutput::Rows(
            distance
                .mapv(Precision::upcast::<T>)
                .sum_axis(Axis(1))
                .mapv(Precision::downcast::<T>),
        ),
        Reduction::Mean => {
            let m = distance.ncols() as f64;
            DistanceOutput::Rows(
                distance
                    .mapv(Precision::upcast::<T>)
                    .sum_axis(Axis(1))
                    .mapv(|s| Precision::downcast::<T>(s / m)),
            )
        }
    }
}
