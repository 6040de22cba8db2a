use std::fmt::Display;

use crate::{ArrayDType, StridedArray};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("Cannot render an array of rank {0}, only ranks 0 to 2 are supported.")]
    UnsupportedRank(usize),
}

impl<T: ArrayDType + Display> StridedArray<T> {
    /// NumPy-style text for arrays of rank 0, 1 or 2.
    ///
    /// ```
    /// use strider::{nested, StridedArray};
    ///
    /// let a = StridedArray::from_nested(&nested!([[0, 1], [2, 3]]));
    /// assert_eq!(a.render().unwrap(), "[[0, 1],\n [2, 3]]");
    /// ```
    pub fn render(&self) -> Result<String, RenderError> {
        match self.rank() {
            0 => Ok(self.get(&[]).to_string()),
            1 => Ok(render_row((0..self.shape()[0]).map(|j| self.get(&[j])))),
            2 => {
                let rows = (0..self.shape()[0])
                    .map(|i| render_row((0..self.shape()[1]).map(|j| self.get(&[i, j]))))
                    .collect::<Vec<_>>();
                Ok(format!("[{}]", rows.join(",\n ")))
            }
            rank => Err(RenderError::UnsupportedRank(rank)),
        }
    }
}

fn render_row<T: Display>(values: impl Iterator<Item = T>) -> String {
    let cells = values.map(|v| v.to_string()).collect::<Vec<_>>();
    format!("[{}]", cells.join(", "))
}
