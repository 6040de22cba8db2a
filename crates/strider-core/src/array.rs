use crate::{ArrayDType, Enforcer, Indices, InvariantError, Nested, Shape, Storage, Strides};
use derive_new::new;

/// A multi-dimensional array: a flat buffer read through a shape and strides.
///
/// Several arrays may share one [`Storage`]. Broadcast views created with
/// [`StridedArray::as_shape`] do exactly that, so a write through any of
/// them is visible through all of them.
#[derive(Clone)]
pub struct StridedArray<T> {
    storage: Storage<T>,
    shape: Shape,
    strides: Strides,
}

impl<T> std::fmt::Debug for StridedArray<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StridedArray")
            .field("shape", &self.shape)
            .field("strides", &self.strides)
            .field("storage_len", &self.storage.len())
            .finish()
    }
}

impl<T> StridedArray<T> {
    /// Wraps existing storage with an explicit layout. Nothing is allocated.
    pub fn from_parts(
        storage: Storage<T>,
        shape: Shape,
        strides: Strides,
    ) -> Result<Self, InvariantError> {
        Enforcer::check_stride_rank(&shape, &strides)?;
        Ok(Self {
            storage,
            shape,
            strides,
        })
    }

    /// Canonical row-major array over `data`.
    pub fn from_data(data: Vec<T>, shape: Shape) -> Self {
        let strides = Strides::from(&shape);
        Self {
            storage: Storage::new(data),
            shape,
            strides,
        }
    }

    /// Canonical row-major array with values produced by `f`.
    ///
    /// `f` is called with indices in row-major iteration order.
    pub fn from_fn(shape: Shape, mut f: impl FnMut(&[usize]) -> T) -> Self {
        let data = shape.indices().map(|idx| f(&idx)).collect::<Vec<_>>();
        Self::from_data(data, shape)
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn strides(&self) -> &Strides {
        &self.strides
    }

    pub fn storage(&self) -> &Storage<T> {
        &self.storage
    }

    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// Number of logical elements; may exceed the buffer length for views.
    pub fn numel(&self) -> usize {
        self.shape.numel()
    }

    pub fn is_contiguous(&self) -> bool {
        self.strides == Strides::from(&self.shape)
    }

    /// Whether `self` and `other` read and write the same buffer.
    pub fn shares_storage(&self, other: &StridedArray<T>) -> bool {
        self.storage.ptr_eq(&other.storage)
    }

    #[inline]
    pub fn offset(&self, index: &[usize]) -> isize {
        self.strides.offset(index)
    }

    /// Every index tuple in row-major order.
    pub fn indices(&self) -> Indices {
        self.shape.indices()
    }
}

impl<T: ArrayDType> StridedArray<T> {
    /// Builds an array from nested input with an inferred, row-major layout.
    pub fn from_nested(values: &Nested<T>) -> Self {
        let (data, shape) = flatten_nested(values, None);
        Self::from_data(data, shape)
    }

    /// Builds an array from nested input, overriding shape and/or strides.
    ///
    /// Missing pieces are derived: the shape from the input's first branch,
    /// the strides as row-major for that shape.
    pub fn from_nested_with(
        values: &Nested<T>,
        shape: Option<Shape>,
        strides: Option<Strides>,
    ) -> Result<Self, InvariantError> {
        let (data, shape) = flatten_nested(values, shape);
        let strides = strides.unwrap_or_else(|| Strides::from(&shape));
        Self::from_parts(Storage::new(data), shape, strides)
    }

    /// A fresh row-major array filled with [`ArrayDType::placeholder`].
    pub fn uninit(shape: Shape) -> Self {
        let data = vec![T::placeholder(); shape.numel()];
        Self::from_data(data, shape)
    }

    /// A fresh placeholder-filled buffer of `shape.numel()` elements, read
    /// through `strides` when given.
    pub fn uninit_with(shape: Shape, strides: Option<Strides>) -> Result<Self, InvariantError> {
        let data = vec![T::placeholder(); shape.numel()];
        let strides = strides.unwrap_or_else(|| Strides::from(&shape));
        Self::from_parts(Storage::new(data), shape, strides)
    }

    /// Reads the element at `index`.
    ///
    /// # Panics
    /// Panics if the computed offset falls outside the buffer. Offsets inside
    /// the buffer are never checked against the shape.
    pub fn get(&self, index: &[usize]) -> T {
        let offset = self.offset(index);
        let buffer = self.storage.read();
        buffer[buffer_index(offset, buffer.len())].clone()
    }

    /// Like [`StridedArray::get`], but `None` when the offset is outside the
    /// buffer.
    pub fn checked_get(&self, index: &[usize]) -> Option<T> {
        let offset = usize::try_from(self.offset(index)).ok()?;
        self.storage.read().get(offset).cloned()
    }

    /// Writes `value` at `index`, visible through every array sharing the
    /// storage.
    ///
    /// # Panics
    /// Panics if the computed offset falls outside the buffer.
    pub fn set(&self, index: &[usize], value: T) {
        let offset = self.offset(index);
        let mut buffer = self.storage.write();
        let len = buffer.len();
        buffer[buffer_index(offset, len)] = value;
    }

    /// Elements in row-major logical order, independent of the strides.
    pub fn iter(&self) -> Elements<'_, T> {
        Elements::new(self, self.indices())
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// A contiguous copy that shares nothing with `self`.
    pub fn deep_clone(&self) -> Self {
        Self::from_data(self.to_vec(), self.shape.clone())
    }
}

/// Leaves of `values` in order, with `shape` or the inferred shape.
///
/// An inferred shape that does not cover exactly the leaves is kept, with a
/// warning.
fn flatten_nested<T: ArrayDType>(values: &Nested<T>, shape: Option<Shape>) -> (Vec<T>, Shape) {
    let data = values.flatten().cloned().collect::<Vec<_>>();
    let shape = match shape {
        Some(shape) => shape,
        None => {
            let shape = values.infer_shape().unwrap_or_default();
            if data.len() != shape.numel() {
                log::warn!(
                    "Nested input is not rectangular: inferred {:?} but found {} leaves",
                    shape,
                    data.len()
                );
            }
            shape
        }
    };
    (data, shape)
}

#[inline]
#[track_caller]
fn buffer_index(offset: isize, len: usize) -> usize {
    match usize::try_from(offset) {
        Ok(index) => index,
        Err(_) => panic!("offset {offset} out of range for buffer of length {len}"),
    }
}

/// Observational equality: same shape, same elements in row-major order.
impl<T: ArrayDType> PartialEq for StridedArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.iter().eq(other.iter())
    }
}

/// Row-major element iterator returned by [`StridedArray::iter`].
#[derive(new, Debug, Clone)]
pub struct Elements<'a, T> {
    array: &'a StridedArray<T>,
    indices: Indices,
}

impl<T: ArrayDType> Iterator for Elements<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.indices.next().map(|idx| self.array.get(&idx))
    }
}

impl<T: ArrayDType> From<Nested<T>> for StridedArray<T> {
    fn from(values: Nested<T>) -> Self {
        Self::from_nested(&values)
    }
}

#[cfg(test)]
mod tests {
    use crate::{nested, shape, strides, Nested, StridedArray, Strides};

    fn square() -> StridedArray<i32> {
        StridedArray::from_nested(&nested!([[0, 1], [2, 3]]))
    }

    #[test]
    fn get_set_round_trip() {
        let a = square();
        assert_eq!(a.get(&[1, 0]), 2);
        a.set(&[1, 1], -1);
        assert_eq!(a.get(&[1, 1]), -1);
        assert_eq!(a.get(&[0, 0]), 0);
        assert_eq!(a.get(&[0, 1]), 1);
        assert_eq!(a.get(&[1, 0]), 2);
    }

    #[test]
    fn nested_construction_is_row_major() {
        let a = square();
        assert_eq!(a.shape(), &shape![2, 2]);
        assert_eq!(a.strides(), &strides![2, 1]);
        assert!(a.is_contiguous());
        assert_eq!(a.to_vec(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn explicit_strides_transpose() {
        let a = StridedArray::from_nested_with(
            &nested!([[0, 1, 2], [3, 4, 5]]),
            Some(shape![3, 2]),
            Some(strides![1, 3]),
        )
        .unwrap();
        assert_eq!(a.to_vec(), vec![0, 3, 1, 4, 2, 5]);
        assert!(!a.is_contiguous());
    }

    #[test]
    fn explicit_strides_rank_checked() {
        let err = StridedArray::from_nested_with(
            &nested!([1, 2, 3]),
            None,
            Some(strides![1, 1]),
        );
        assert!(err.is_err());
    }

    #[test]
    fn scalar_input_is_rank_zero() {
        let a = StridedArray::from_nested(&Nested::Scalar(9u8));
        assert_eq!(a.rank(), 0);
        assert_eq!(a.get(&[]), 9);
        assert_eq!(a.to_vec(), vec![9]);
    }

    #[test]
    fn uninit_is_placeholder_filled() {
        let a = StridedArray::<f32>::uninit(shape![2, 3]);
        assert_eq!(a.storage().len(), 6);
        assert!(a.iter().all(|x| x.is_nan()));

        let b = StridedArray::<Option<i32>>::uninit(shape![4]);
        assert_eq!(b.to_vec(), vec![None; 4]);
    }

    #[test]
    fn uninit_with_strides() {
        let a = StridedArray::<i64>::uninit_with(shape![2, 2], Some(strides![1, 2])).unwrap();
        a.set(&[0, 1], 7);
        assert_eq!(a.storage().read()[2], 7);
    }

    #[test]
    fn checked_get_reports_out_of_range() {
        let a = StridedArray::from_parts(
            crate::Storage::new(vec![1, 2]),
            shape![3],
            strides![1],
        )
        .unwrap();
        assert_eq!(a.checked_get(&[1]), Some(2));
        assert_eq!(a.checked_get(&[2]), None);

        let negative =
            StridedArray::from_parts(a.storage().clone(), shape![2], strides![-1]).unwrap();
        assert_eq!(negative.checked_get(&[1]), None);
    }

    #[test]
    #[should_panic]
    fn get_past_buffer_panics() {
        let a = StridedArray::from_data(vec![1, 2], shape![2]);
        let wide = StridedArray::from_parts(a.storage().clone(), shape![2], strides![2]).unwrap();
        wide.get(&[1]);
    }

    #[test]
    fn malformed_strides_read_in_range_values() {
        let a = StridedArray::from_parts(
            crate::Storage::new(vec![10, 20, 30, 40]),
            shape![2, 2],
            strides![1, 1],
        )
        .unwrap();
        assert_eq!(a.get(&[1, 0]), a.get(&[0, 1]));
    }

    #[test]
    fn iteration_restarts_and_follows_logical_order() {
        let a = StridedArray::from_fn(shape![2, 3], |idx| (idx[0] * 10 + idx[1]) as i32);
        let iter = a.iter();
        assert_eq!(iter.clone().collect::<Vec<_>>(), vec![0, 1, 2, 10, 11, 12]);
        assert_eq!(iter.count(), 6);
        assert_eq!(a.iter().count(), 6);
    }

    #[test]
    fn clones_alias_and_deep_clones_do_not() {
        let a = square();
        let alias = a.clone();
        let copy = a.deep_clone();
        alias.set(&[0, 0], 100);
        assert_eq!(a.get(&[0, 0]), 100);
        assert_eq!(copy.get(&[0, 0]), 0);
        assert!(a.shares_storage(&alias));
        assert!(!a.shares_storage(&copy));
    }

    #[test]
    fn equality_ignores_layout() {
        let a = StridedArray::from_data(vec![0, 1, 2, 3], shape![2, 2]);
        let t = StridedArray::from_parts(
            crate::Storage::new(vec![0, 2, 1, 3]),
            shape![2, 2],
            Strides::from(vec![1, 2]),
        )
        .unwrap();
        assert_eq!(a, t);
        assert_ne!(a, StridedArray::from_data(vec![0, 1, 2, 3], shape![4]));
    }

    #[test]
    fn from_nested_value() {
        let a: StridedArray<i32> = nested!([[4, 5, 6]]).into();
        assert_eq!(a.shape(), &shape![1, 3]);
        assert_eq!(a, StridedArray::from_nested(&nested!([[4, 5, 6]])));
    }

    #[test]
    fn ragged_input_still_builds() {
        let _ = env_logger::builder().is_test(true).try_init();
        let ragged = Nested::list([Nested::from(vec![1, 2]), Nested::from(vec![3])]);
        let a = StridedArray::from_nested(&ragged);
        assert_eq!(a.shape(), &shape![2, 2]);
        assert_eq!(a.storage().len(), 3);
        assert_eq!(a.get(&[1, 0]), 3);
    }
}
