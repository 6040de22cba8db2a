use crate::{RVec, Shape};

/// Arbitrarily deep nested input, e.g. `[[0, 1], [2, 3]]`.
///
/// Rectangularity is assumed, not checked: see [`Nested::infer_shape`].
#[derive(Debug, Clone, PartialEq)]
pub enum Nested<T> {
    Scalar(T),
    List(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    pub fn list(items: impl IntoIterator<Item = Nested<T>>) -> Self {
        Nested::List(items.into_iter().collect())
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Nested::List(_))
    }

    /// Shape of the input, read off the first branch at every depth.
    ///
    /// Returns `None` for a bare scalar. Sibling lengths are never compared,
    /// so ragged input silently takes the shape of its first branch.
    pub fn infer_shape(&self) -> Option<Shape> {
        let mut dims = RVec::new();
        let mut node = self;
        while let Nested::List(items) = node {
            dims.push(items.len());
            match items.first() {
                Some(first) => node = first,
                None => break,
            }
        }
        self.is_list().then(|| Shape::new(dims))
    }

    /// Depth-first, left-to-right walk over the scalar leaves.
    pub fn flatten(&self) -> Flatten<'_, T> {
        Flatten::new(self)
    }

    /// Whether every list at the same depth has the same length and every
    /// leaf sits at the same depth.
    pub fn is_rectangular(&self) -> bool {
        match self.infer_shape() {
            Some(shape) => self.matches_dims(&shape.to_vec()),
            None => true,
        }
    }

    fn matches_dims(&self, dims: &[usize]) -> bool {
        match (self, dims.split_first()) {
            (Nested::Scalar(_), None) => true,
            (Nested::List(items), Some((&len, rest))) => {
                items.len() == len && items.iter().all(|item| item.matches_dims(rest))
            }
            _ => false,
        }
    }
}

impl<T> From<Vec<T>> for Nested<T> {
    fn from(values: Vec<T>) -> Self {
        Nested::List(values.into_iter().map(Nested::Scalar).collect())
    }
}

/// Lazy iterator over the leaves of a [`Nested`] value.
#[derive(Debug, Clone)]
pub struct Flatten<'a, T> {
    scalar: Option<&'a T>,
    stack: Vec<std::slice::Iter<'a, Nested<T>>>,
}

impl<'a, T> Flatten<'a, T> {
    fn new(root: &'a Nested<T>) -> Self {
        match root {
            Nested::Scalar(value) => Self {
                scalar: Some(value),
                stack: vec![],
            },
            Nested::List(items) => Self {
                scalar: None,
                stack: vec![items.iter()],
            },
        }
    }
}

impl<'a, T> Iterator for Flatten<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(value) = self.scalar.take() {
            return Some(value);
        }
        loop {
            match self.stack.last_mut()?.next() {
                Some(Nested::Scalar(value)) => return Some(value),
                Some(Nested::List(items)) => self.stack.push(items.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
