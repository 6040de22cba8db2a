use crate::{rvec, shape, RVec};

#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Shape(RVec<usize>);

impl Shape {
    pub fn new(shape: RVec<usize>) -> Self {
        Self(shape)
    }

    pub fn inner(&self) -> &RVec<usize> {
        &self.0
    }

    pub fn numel(&self) -> usize {
        self.0.iter().product()
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.0.to_vec()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &usize> {
        self.0.iter()
    }

    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Every index tuple of this shape in row-major order.
    pub fn indices(&self) -> Indices {
        Indices::new(self.clone())
    }

    /// The unified NumPy broadcast shape of `shapes`, if one exists.
    pub fn multi_broadcast(shapes: &[&Shape]) -> Option<Shape> {
        let max_rank = shapes.iter().map(|shape| shape.rank()).max()?;
        let mut shape: Shape = shape![];
        for i in 0..max_rank {
            let mut current_dim_size = 1;
            for shape in shapes {
                let len = shape.rank();
                let dim = if i < len { &shape[len - i - 1] } else { &1 };
                if dim != &1 {
                    if current_dim_size != 1 && dim != &current_dim_size {
                        return None;
                    }
                    current_dim_size = *dim;
                }
            }
            shape.0.insert(0, current_dim_size)
        }
        Some(shape)
    }
}

impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(first) = self.0.first() else {
            return write!(f, "[]");
        };
        let mut shape = format!("[{}", first);
        for dim in self.0.iter().skip(1) {
            shape.push_str(&format!("x{}", dim));
        }
        write!(f, "{}]", shape)
    }
}

impl std::ops::Index<usize> for Shape {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<Vec<usize>> for Shape {
    fn from(shape: Vec<usize>) -> Self {
        Self(shape.into())
    }
}

impl From<&[usize]> for Shape {
    fn from(slice: &[usize]) -> Self {
        Shape(slice.into())
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Shape(dims.iter().copied().collect())
    }
}

/// Row-major walk over the Cartesian product of `0..shape[i]`.
///
/// The last axis varies fastest. A rank-0 shape yields one empty index, a
/// shape with any zero-sized axis yields nothing.
#[derive(Debug, Clone)]
pub struct Indices {
    shape: Shape,
    next: Option<RVec<usize>>,
}

impl Indices {
    pub fn new(shape: Shape) -> Self {
        let next = (shape.numel() > 0).then(|| rvec![0; shape.rank()]);
        Self { shape, next }
    }
}

impl Iterator for Indices {
    type Item = RVec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let mut successor = current.clone();
        for dim in (0..self.shape.rank()).rev() {
            successor[dim] += 1;
            if successor[dim] < self.shape[dim] {
                self.next = Some(successor);
                break;
            }
            successor[dim] = 0;
        }
        Some(current)
    }
}
