//! Operator and comparison impls.

use std::{
    cmp::Ordering,
    ops::{
        Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
    },
};

use crate::approx::ApproxEq;

use super::Vector;

impl<T, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for Vector<T, N> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

// More general than what `#[derive(PartialEq)]` would generate.
impl<T, U, const N: usize> PartialEq<Vector<U, N>> for Vector<T, N>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Vector<U, N>) -> bool {
        self.0 == other.0
    }
}

impl<T, const N: usize> Eq for Vector<T, N> where T: Eq {}

impl<T, U, const N: usize> PartialEq<[U; N]> for Vector<T, N>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.0.eq(other)
    }
}

impl<T, U, const N: usize> PartialEq<[U]> for Vector<T, N>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.0.eq(other)
    }
}

impl<T, U, const N: usize> PartialEq<&[U]> for Vector<T, N>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &&[U]) -> bool {
        self.0.eq(*other)
    }
}

/// Lexicographic comparison, starting at the first element.
impl<T, const N: usize> PartialOrd for Vector<T, N>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

/// Lexicographic comparison, starting at the first element.
impl<T, const N: usize> Ord for Vector<T, N>
where
    T: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T, const N: usize> ApproxEq for Vector<T, N>
where
    T: ApproxEq,
{
    type Tolerance = T::Tolerance;

    fn abs_diff_eq(&self, other: &Self, abs_tolerance: Self::Tolerance) -> bool {
        self.0.abs_diff_eq(&other.0, abs_tolerance)
    }

    fn rel_diff_eq(&self, other: &Self, rel_tolerance: Self::Tolerance) -> bool {
        self.0.rel_diff_eq(&other.0, rel_tolerance)
    }

    fn ulps_diff_eq(&self, other: &Self, ulps_tolerance: u32) -> bool {
        self.0.ulps_diff_eq(&other.0, ulps_tolerance)
    }
}

/// Element-wise negation.
impl<T, const N: usize> Neg for Vector<T, N>
where
    T: Neg,
{
    type Output = Vector<T::Output, N>;

    fn neg(self) -> Self::Output {
        self.map(T::neg)
    }
}

// Every binary operator comes in four flavors: vector-vector (element-wise) and vector-scalar
// (broadcast), each with a compound assignment form.
//
// Supporting the scalar form rules out a more generic `Mul<U> for Vector<T, N> where T: Mul<U>`.
macro_rules! binop {
    ($trait:ident :: $method:ident, $assign_trait:ident :: $assign_method:ident, $op:tt) => {
        impl<T, const N: usize> $trait<Vector<T, N>> for Vector<T, N>
        where
            T: $trait,
        {
            type Output = Vector<T::Output, N>;

            #[inline]
            fn $method(self, rhs: Vector<T, N>) -> Self::Output {
                self.zip(rhs).map(|(l, r)| l $op r)
            }
        }

        impl<T, const N: usize> $trait<T> for Vector<T, N>
        where
            T: $trait + Copy,
        {
            type Output = Vector<T::Output, N>;

            #[inline]
            fn $method(self, rhs: T) -> Self::Output {
                self.map(|elem| elem $op rhs)
            }
        }

        impl<T, const N: usize> $assign_trait<Vector<T, N>> for Vector<T, N>
        where
            T: $assign_trait,
        {
            #[inline]
            fn $assign_method(&mut self, rhs: Vector<T, N>) {
                self.iter_mut()
                    .zip(rhs)
                    .for_each(|(lhs, rhs)| lhs.$assign_method(rhs));
            }
        }

        impl<T, const N: usize> $assign_trait<T> for Vector<T, N>
        where
            T: $assign_trait + Copy,
        {
            #[inline]
            fn $assign_method(&mut self, rhs: T) {
                self.iter_mut().for_each(|lhs| lhs.$assign_method(rhs));
            }
        }
    };
}

binop!(Add::add, AddAssign::add_assign, +);
binop!(Sub::sub, SubAssign::sub_assign, -);
binop!(Mul::mul, MulAssign::mul_assign, *);
binop!(Div::div, DivAssign::div_assign, /);

// `scalar * vector` can't be implemented generically over the scalar type.
macro_rules! scalar_lhs_mul {
    ($($scalar:ty),+) => {
        $(
            impl<const N: usize> Mul<Vector<$scalar, N>> for $scalar {
                type Output = Vector<$scalar, N>;

                #[inline]
                fn mul(self, rhs: Vector<$scalar, N>) -> Self::Output {
                    rhs * self
                }
            }
        )+
    };
}
scalar_lhs_mul!(f32, f64, i32);
