use ndarray::{ArrayD, ArrayViewD, IxDyn, ShapeError};

use crate::{ArrayDType, Shape, StridedArray};

/// Conversion to and from ndarray, used as ground truth in tests.
impl<T: ArrayDType> StridedArray<T> {
    /// Copies the logical contents into an owned, standard-layout `ArrayD`.
    pub fn to_ndarray(&self) -> Result<ArrayD<T>, ShapeError> {
        ArrayD::from_shape_vec(IxDyn(&self.shape().to_vec()), self.to_vec())
    }

    /// Copies `array` into a fresh row-major `StridedArray`.
    pub fn from_ndarray(array: ArrayViewD<'_, T>) -> Self {
        let shape = Shape::from(array.shape());
        Self::from_data(array.iter().cloned().collect(), shape)
    }
}
