use half::{bf16, f16};
use num_traits::Bounded;

/// Element types a [`StridedArray`](crate::StridedArray) can hold.
///
/// `placeholder` is the value written into freshly allocated buffers that
/// have not been filled yet. It is a real value of the type, so reading an
/// unfilled slot is well defined, just not meaningful.
pub trait ArrayDType: Clone + std::fmt::Debug + PartialEq + Send + Sync + 'static {
    fn placeholder() -> Self;
}

macro_rules! map_float_type {
    ($($t:ty),*) => {
        $(
            impl ArrayDType for $t {
                fn placeholder() -> Self {
                    <$t>::NAN
                }
            }
        )*
    };
}

macro_rules! map_signed_type {
    ($($t:ty),*) => {
        $(
            impl ArrayDType for $t {
                fn placeholder() -> Self {
                    <$t as Bounded>::min_value()
                }
            }
        )*
    };
}

macro_rules! map_unsigned_type {
    ($($t:ty),*) => {
        $(
            impl ArrayDType for $t {
                fn placeholder() -> Self {
                    <$t as Bounded>::max_value()
                }
            }
        )*
    };
}

map_float_type!(f32, f64, f16, bf16);
map_signed_type!(i8, i16, i32, i64, isize);
map_unsigned_type!(u8, u16, u32, u64, usize);

impl ArrayDType for bool {
    fn placeholder() -> Self {
        false
    }
}

impl<T: Clone + std::fmt::Debug + PartialEq + Send + Sync + 'static> ArrayDType for Option<T> {
    fn placeholder() -> Self {
        None
    }
}
