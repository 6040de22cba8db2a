use num_traits::NumOps;

use crate::{ArrayDType, Enforcer, InvariantError, StridedArray};
#[cfg(test)]
use test_strategy::Arbitrary;

#[cfg_attr(test, derive(Arbitrary))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn name(&self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
        }
    }

    pub fn operator(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }

    pub fn apply<T: NumOps>(&self, lhs: T, rhs: T) -> T {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => lhs / rhs,
        }
    }
}

impl<T: ArrayDType> StridedArray<T> {
    /// Combines `self` and `other` elementwise after broadcasting each one
    /// towards the other's shape.
    ///
    /// Both views are built before anything is allocated, so an incompatible
    /// pair fails without side effects. The result is a fresh, contiguous
    /// array that shares storage with neither operand.
    pub fn zip_with<U, F>(&self, other: &Self, mut f: F) -> Result<StridedArray<U>, InvariantError>
    where
        U: ArrayDType,
        F: FnMut(T, T) -> U,
    {
        let lhs = self.as_shape(other.shape())?;
        let rhs = other.as_shape(self.shape())?;
        Enforcer::check_aligned(lhs.shape(), rhs.shape(), (self.shape(), other.shape()))?;

        let shape = lhs.shape().clone();
        let mut result = vec![U::placeholder(); shape.numel()];
        for (dst, (l, r)) in result.iter_mut().zip(lhs.iter().zip(rhs.iter())) {
            *dst = f(l, r);
        }
        Ok(StridedArray::from_data(result, shape))
    }

    pub fn binary(&self, other: &Self, op: BinaryOp) -> Result<Self, InvariantError>
    where
        T: NumOps,
    {
        log::debug!(
            "{} {:?} {} {:?}",
            op.name(),
            self.shape(),
            op.operator(),
            other.shape()
        );
        self.zip_with(other, |l, r| op.apply(l, r))
    }

    pub fn add(&self, other: &Self) -> Result<Self, InvariantError>
    where
        T: NumOps,
    {
        self.binary(other, BinaryOp::Add)
    }

    pub fn sub(&self, other: &Self) -> Result<Self, InvariantError>
    where
        T: NumOps,
    {
        self.binary(other, BinaryOp::Sub)
    }

    pub fn mul(&self, other: &Self) -> Result<Self, InvariantError>
    where
        T: NumOps,
    {
        self.binary(other, BinaryOp::Mul)
    }

    pub fn div(&self, other: &Self) -> Result<Self, InvariantError>
    where
        T: NumOps,
    {
        self.binary(other, BinaryOp::Div)
    }
}
