use crate::{InvariantError, RVec, Shape, StridedArray, Strides};

impl<T> StridedArray<T> {
    /// A view of `self` stretched to `target`, sharing the same storage.
    ///
    /// Dimensions are paired from the right. A dimension is kept when the
    /// target matches it, is 1, or is missing; a source dimension of 1 (or a
    /// missing one) is stretched to the target size with stride 0. Anything
    /// else fails before a view is built.
    ///
    /// For rules, see https://numpy.org/doc/stable/user/basics.broadcasting.html
    pub fn as_shape(&self, target: &Shape) -> Result<Self, InvariantError> {
        let (src_rank, dst_rank) = (self.rank(), target.rank());
        let rank = src_rank.max(dst_rank);

        let mut dims: RVec<usize> = RVec::with_capacity(rank);
        let mut strides: RVec<isize> = RVec::with_capacity(rank);
        for i in 0..rank {
            let src = (i < src_rank).then(|| {
                let axis = src_rank - 1 - i;
                (self.shape()[axis], self.strides()[axis])
            });
            let dst = (i < dst_rank).then(|| target[dst_rank - 1 - i]);

            let (dim, stride) = match (src, dst) {
                (Some((sd, ss)), None) => (sd, ss),
                (Some((sd, ss)), Some(td)) if td == sd || td == 1 => (sd.max(td), ss),
                (Some((1, _)), Some(td)) | (None, Some(td)) => (td, 0),
                _ => {
                    log::debug!("Cannot broadcast {:?} to {:?}", self.shape(), target);
                    return Err(InvariantError::BroadcastingFailed {
                        shape: self.shape().clone(),
                        target: target.clone(),
                    });
                }
            };
            dims.push(dim);
            strides.push(stride);
        }
        dims.reverse();
        strides.reverse();

        let (shape, strides) = (Shape::new(dims), Strides::new(strides));
        log::trace!(
            "as_shape {:?} -> {:?}, strides {:?} -> {:?}",
            self.shape(),
            shape,
            self.strides(),
            strides
        );
        StridedArray::from_parts(self.storage().clone(), shape, strides)
    }
}
