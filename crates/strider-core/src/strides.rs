use crate::{rvec, RVec, Shape};

#[derive(Clone, PartialEq, Eq, Default, Hash)]
pub struct Strides(RVec<isize>);

impl Strides {
    pub fn new(strides: RVec<isize>) -> Self {
        Self(strides)
    }

    pub fn to_vec(&self) -> Vec<isize> {
        self.0.to_vec()
    }

    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Linear buffer offset of `index`: `sum(index[i] * strides[i])`.
    ///
    /// May be negative or past the end of the buffer; callers decide what an
    /// out-of-range offset means.
    #[inline]
    pub fn offset(&self, index: &[usize]) -> isize {
        debug_assert_eq!(index.len(), self.rank(), "index rank mismatch");
        index
            .iter()
            .zip(self.0.iter())
            .map(|(&i, &stride)| i as isize * stride)
            .sum()
    }
}

impl std::fmt::Debug for Strides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(first) = self.0.first() else {
            return write!(f, "[]");
        };
        let mut strides = format!("[{}", first);
        for stride in self.0.iter().skip(1) {
            strides.push_str(&format!("x{}", stride));
        }
        write!(f, "{}]", strides)
    }
}

impl std::ops::Index<usize> for Strides {
    type Output = isize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// Row-major (C order) strides: the last axis is contiguous.
impl From<&Shape> for Strides {
    fn from(shape: &Shape) -> Self {
        let mut strides = rvec![];
        let mut stride = 1;
        for size in shape.inner().iter().rev() {
            strides.push(stride);
            stride *= *size as isize;
        }
        strides.reverse();
        Self(strides)
    }
}

impl From<Vec<isize>> for Strides {
    fn from(strides: Vec<isize>) -> Self {
        Self(strides.into())
    }
}
