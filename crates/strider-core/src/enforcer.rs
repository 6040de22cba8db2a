use crate::{Shape, Strides};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    #[error("Cannot broadcast {shape:?} to {target:?}.")]
    BroadcastingFailed { shape: Shape, target: Shape },
    #[error("Stride rank mismatch, shape has rank {shape} but strides have rank {strides}.")]
    StrideRankMismatch { shape: usize, strides: usize },
}

/// # Enforcer
///
/// Enforcer enforces common invariants on array descriptors.
pub struct Enforcer;

impl Enforcer {
    pub fn check_stride_rank(shape: &Shape, strides: &Strides) -> Result<(), InvariantError> {
        if shape.rank() != strides.rank() {
            return Err(InvariantError::StrideRankMismatch {
                shape: shape.rank(),
                strides: strides.rank(),
            });
        }
        Ok(())
    }

    /// Both operands of an elementwise op must land on one shape.
    pub fn check_aligned(
        lhs: &Shape,
        rhs: &Shape,
        original: (&Shape, &Shape),
    ) -> Result<(), InvariantError> {
        if lhs != rhs {
            return Err(InvariantError::BroadcastingFailed {
                shape: original.0.clone(),
                target: original.1.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{shape, strides};

    #[test]
    fn stride_rank() {
        assert!(Enforcer::check_stride_rank(&shape![2, 3], &strides![3, 1]).is_ok());
        assert_eq!(
            Enforcer::check_stride_rank(&shape![2, 3], &strides![1]),
            Err(InvariantError::StrideRankMismatch {
                shape: 2,
                strides: 1
            })
        );
    }

    #[test]
    fn broadcast_message_names_both_shapes() {
        let err = InvariantError::BroadcastingFailed {
            shape: shape![1, 3],
            target: shape![2, 4],
        };
        assert_eq!(err.to_string(), "Cannot broadcast [1x3] to [2x4].");
    }
}
