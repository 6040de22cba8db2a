mod array;
mod dtype;
mod enforcer;
#[cfg(feature = "testing")]
mod ndarray_ext;
mod nested;
mod ops;
mod render;
mod shape;
mod storage;
mod strides;

pub use array::*;
pub use dtype::*;
pub use enforcer::*;
pub use nested::*;
pub use ops::*;
pub use render::*;
pub use shape::*;
pub use storage::*;
pub use strides::*;

use smallvec::SmallVec;
pub type RVec<T> = SmallVec<[T; 4]>;

//https://github.com/sonos/tract/blob/main/data/src/macros.rs#L2
#[macro_export]
macro_rules! rvec {
    (@one $x:expr) => (1usize);
    ($elem:expr; $n:expr) => ({
        $crate::RVec::from_elem($elem, $n)
    });
    ($($x:expr),*$(,)*) => ({
        let count = 0usize $(+ rvec![@one $x])*;
        #[allow(unused_mut)]
        let mut vec = $crate::RVec::new();
        if count <= vec.inline_size() {
            $(vec.push($x);)*
            vec
        } else {
            $crate::RVec::from_vec(vec![$($x,)*])
        }
    });
}

#[macro_export]
macro_rules! shape {
    ($($x:expr),*$(,)*) => ({
        use $crate::rvec;
        $crate::Shape::new(rvec![$($x,)*])
    });
}

#[macro_export]
macro_rules! strides {
    ($($x:expr),*$(,)*) => ({
        use $crate::rvec;
        $crate::Strides::new(rvec![$($x as isize,)*])
    });
}

/// Builds a [`Nested`] value from bracketed literals.
///
/// Every level must be either all brackets or all scalars.
///
/// ```
/// use strider::{nested, Nested};
///
/// let rows: Nested<i32> = nested!([[0, 1], [2, -3]]);
/// assert_eq!(rows.infer_shape(), Some(strider::shape![2, 2]));
/// ```
#[macro_export]
macro_rules! nested {
    ([$([$($inner:tt)*]),* $(,)?]) => {
        $crate::Nested::List(vec![$($crate::nested!([$($inner)*])),*])
    };
    ([$($x:expr),* $(,)?]) => {
        $crate::Nested::List(vec![$($crate::Nested::Scalar($x)),*])
    };
    ($x:expr) => {
        $crate::Nested::Scalar($x)
    };
}

pub mod prelude {
    pub use crate::{nested, rvec, shape, strides, Nested, Shape, StridedArray, Strides};
}
