//! Operator overloads that build computation graphs over uncertain values.

use crate::{Uncertain, computation::ComputationNode};
use std::ops::{Add, Div, Mul, Sub};

/// Trait alias for types that support arithmetic operations
pub trait Arithmetic:
    Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> Arithmetic for T where
    T: Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Div<Output = T>
        + Clone
        + Send
        + Sync
        + 'static
{
}

/// Binary operation types for computation graph
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOperation {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOperation {
    #[must_use]
    pub fn apply<T>(self, left: T, right: T) -> T
    where
        T: Arithmetic,
    {
        match self {
            BinaryOperation::Add => left + right,
            BinaryOperation::Sub => left - right,
            BinaryOperation::Mul => left * right,
            BinaryOperation::Div => left / right,
        }
    }
}

/// Implements `op` for `Uncertain<T> op Uncertain<T>`, `Uncertain<T> op T`
/// and `f64 op Uncertain<f64>`. Scalars enter the graph as point masses.
macro_rules! impl_uncertain_op {
    ($trait:ident, $method:ident, $operation:expr) => {
        impl<T> $trait for Uncertain<T>
        where
            T: Arithmetic,
        {
            type Output = Uncertain<T>;

            fn $method(self, rhs: Self) -> Self::Output {
                Uncertain::with_node(ComputationNode::binary_op(self.node, rhs.node, $operation))
            }
        }

        impl<T> $trait<T> for Uncertain<T>
        where
            T: Arithmetic,
        {
            type Output = Uncertain<T>;

            fn $method(self, rhs: T) -> Self::Output {
                $trait::$method(self, Uncertain::point(rhs))
            }
        }

        impl $trait<Uncertain<f64>> for f64 {
            type Output = Uncertain<f64>;

            fn $method(self, rhs: Uncertain<f64>) -> Self::Output {
                $trait::$method(Uncertain::point(self), rhs)
            }
        }
    };
}

impl_uncertain_op!(Add, add, BinaryOperation::Add);
impl_uncertain_op!(Sub, sub, BinaryOperation::Sub);
impl_uncertain_op!(Mul, mul, BinaryOperation::Mul);
impl_uncertain_op!(Div, div, BinaryOperation::Div);
