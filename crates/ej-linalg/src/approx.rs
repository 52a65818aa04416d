//! Approximate equality for floating-point values and the types built from them.
//!
//! Exact `==` is rarely the right tool for results of rotations, inverses or normalization. This
//! module provides the [`ApproxEq`] trait, implemented by the scalar types and by [`Vector`],
//! [`Matrix`] and [`Quaternion`], and the [`assert_approx_eq!`][crate::assert_approx_eq] and
//! [`assert_approx_ne!`][crate::assert_approx_ne] macros built on top of it.
//!
//! [`Vector`]: crate::Vector
//! [`Matrix`]: crate::Matrix
//! [`Quaternion`]: crate::Quaternion

mod impls;

use std::{fmt, panic::Location};

/// Types that can be compared for *approximate equality*.
///
/// Compound types compare equal when every one of their elements does.
///
/// Background on why there is no single good way to compare floats:
/// <https://randomascii.wordpress.com/2012/02/25/comparing-floating-point-numbers-2012-edition/>
pub trait ApproxEq<Rhs: ?Sized = Self> {
    /// Scalar type of the absolute and relative tolerances ([`f32`] or [`f64`]).
    type Tolerance: DefaultTolerances + Copy;

    /// Returns `true` if `self` and `other` differ by at most `abs_tolerance`.
    fn abs_diff_eq(&self, other: &Rhs, abs_tolerance: Self::Tolerance) -> bool;

    /// Returns `true` if `self` and `other` differ by at most `rel_tolerance` times the larger of
    /// their magnitudes.
    fn rel_diff_eq(&self, other: &Rhs, rel_tolerance: Self::Tolerance) -> bool;

    /// Returns `true` if at most `ulps_tolerance` representable values lie between `self` and
    /// `other`.
    ///
    /// `NaN` never compares equal. `-0.0` and `+0.0` compare equal, any other pair of values with
    /// different signs does not.
    fn ulps_diff_eq(&self, other: &Rhs, ulps_tolerance: u32) -> bool;

    /// Compares `self` and `other` using the default tolerances.
    ///
    /// The values are considered equal if either an absolute comparison with
    /// [`DEFAULT_ABS_TOLERANCE`] or a relative comparison with [`DEFAULT_REL_TOLERANCE`] succeeds.
    /// This is also what the assertion macros do when no comparison is configured.
    ///
    /// [`DEFAULT_ABS_TOLERANCE`]: DefaultTolerances::DEFAULT_ABS_TOLERANCE
    /// [`DEFAULT_REL_TOLERANCE`]: DefaultTolerances::DEFAULT_REL_TOLERANCE
    fn approx_eq(&self, other: &Rhs) -> bool {
        self.abs_diff_eq(other, Self::Tolerance::DEFAULT_ABS_TOLERANCE)
            || self.rel_diff_eq(other, Self::Tolerance::DEFAULT_REL_TOLERANCE)
    }
}

/// Default tolerances of an [`ApproxEq::Tolerance`] type.
pub trait DefaultTolerances {
    const DEFAULT_ABS_TOLERANCE: Self;
    const DEFAULT_REL_TOLERANCE: Self;
    const DEFAULT_ULPS_TOLERANCE: u32;
}

/// Deferred approximate assertion, created by [`assert_approx_eq!`][crate::assert_approx_eq] and
/// [`assert_approx_ne!`][crate::assert_approx_ne].
///
/// The comparison runs when the value is dropped, which happens at the end of the statement that
/// invoked the macro. Before that, the methods [`Asserter::abs`], [`Asserter::rel`] and
/// [`Asserter::ulps`] select which comparisons are performed. The values compare equal if *any*
/// selected comparison succeeds.
///
/// Without any configuration, the assertion uses [`ApproxEq::approx_eq`].
pub struct Asserter<'a, T>
where
    T: ApproxEq + fmt::Debug,
{
    left: &'a T,
    right: &'a T,
    kind: AssertionKind,
    location: &'static Location<'static>,
    msg: Option<fmt::Arguments<'a>>,
    abs: Option<T::Tolerance>,
    rel: Option<T::Tolerance>,
    ulps: Option<u32>,
}

impl<'a, T> Asserter<'a, T>
where
    T: ApproxEq + fmt::Debug,
{
    #[doc(hidden)]
    #[track_caller]
    pub fn new(
        left: &'a T,
        right: &'a T,
        kind: AssertionKind,
        msg: Option<fmt::Arguments<'a>>,
    ) -> Self {
        Self {
            left,
            right,
            kind,
            location: Location::caller(),
            msg,
            abs: None,
            rel: None,
            ulps: None,
        }
    }

    /// Compares the absolute difference of the values against `abs`.
    ///
    /// Suitable for values near zero, where relative comparisons break down.
    pub fn abs(&mut self, abs: T::Tolerance) -> &mut Self {
        self.abs = Some(abs);
        self
    }

    /// Compares the absolute difference of the values against `rel` times the larger magnitude.
    ///
    /// Note that any non-zero value only compares equal to `0.0` with a tolerance of at least 1.
    pub fn rel(&mut self, rel: T::Tolerance) -> &mut Self {
        self.rel = Some(rel);
        self
    }

    /// Compares the values by the number of floats that fit between them.
    pub fn ulps(&mut self, ulps: u32) -> &mut Self {
        self.ulps = Some(ulps);
        self
    }

    fn holds(&self) -> bool {
        if self.abs.is_none() && self.rel.is_none() && self.ulps.is_none() {
            return self.left.approx_eq(self.right);
        }

        self.abs
            .map_or(false, |abs| self.left.abs_diff_eq(self.right, abs))
            || self
                .rel
                .map_or(false, |rel| self.left.rel_diff_eq(self.right, rel))
            || self
                .ulps
                .map_or(false, |ulps| self.left.ulps_diff_eq(self.right, ulps))
    }
}

impl<'a, T> Drop for Asserter<'a, T>
where
    T: ApproxEq + fmt::Debug,
{
    // `#[track_caller]` has no effect on destructors, so the location is captured in `new`.
    fn drop(&mut self) {
        let equal = self.holds();
        let failed = match self.kind {
            AssertionKind::Eq => !equal,
            AssertionKind::Ne => equal,
        };
        if failed {
            assert_failed(self.left, self.right, self.kind, self.location, self.msg);
        }
    }
}

fn assert_failed(
    left: &dyn fmt::Debug,
    right: &dyn fmt::Debug,
    kind: AssertionKind,
    location: &Location<'_>,
    msg: Option<fmt::Arguments<'_>>,
) -> ! {
    let op = match kind {
        AssertionKind::Eq => "==",
        AssertionKind::Ne => "!=",
    };
    // The panic location points into this module; the assertion's own location is printed.
    match msg {
        Some(msg) => panic!(
            "assertion `left {op} right` failed at {location}: {msg}\n  left: {left:?}\n right: {right:?}"
        ),
        None => panic!(
            "assertion `left {op} right` failed at {location}\n  left: {left:?}\n right: {right:?}"
        ),
    }
}

#[doc(hidden)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AssertionKind {
    Eq,
    Ne,
}

/// Asserts that two expressions are approximately equal (using [`ApproxEq`]).
///
/// Works like [`assert_eq!`], but returns an [`Asserter`] that can be used to select the
/// comparison and its tolerance before the check runs at the end of the statement.
///
/// # Examples
///
/// ```
/// # use ej_linalg::*;
/// let one = (0..10).fold(0.0, |acc, _| acc + 0.1);
/// assert_approx_eq!(one, 1.0);
///
/// assert_approx_eq!(100.0, 99.0).abs(1.0);
/// assert_approx_eq!(100.0, 99.0).rel(0.01);
/// assert_approx_eq!(1.0, 1.0 + f64::EPSILON).ulps(1);
///
/// let v = vec3(1.0, 0.0, 0.0);
/// assert_approx_eq!(Quaternion::angle_axis(std::f32::consts::PI, Vec3::Z) * v, -v).abs(1e-6);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::approx::Asserter::new(
            &$lhs,
            &$rhs,
            $crate::approx::AssertionKind::Eq,
            ::core::option::Option::None,
        )
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::approx::Asserter::new(
            &$lhs,
            &$rhs,
            $crate::approx::AssertionKind::Eq,
            ::core::option::Option::Some(::core::format_args!($($arg)+)),
        )
    };
}

/// Asserts that two expressions are *not* approximately equal (using [`ApproxEq`]).
///
/// The counterpart of [`assert_approx_eq!`].
///
/// # Examples
///
/// ```
/// # use ej_linalg::*;
/// assert_approx_ne!(100.0, 99.0).abs(0.5);
/// assert_approx_ne!(1.0, 1.0 + 2.0 * f64::EPSILON).ulps(1);
/// ```
#[macro_export]
macro_rules! assert_approx_ne {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::approx::Asserter::new(
            &$lhs,
            &$rhs,
            $crate::approx::AssertionKind::Ne,
            ::core::option::Option::None,
        )
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::approx::Asserter::new(
            &$lhs,
            &$rhs,
            $crate::approx::AssertionKind::Ne,
            ::core::option::Option::Some(::core::format_args!($($arg)+)),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::ApproxEq;

    #[test]
    #[should_panic(expected = "assertion `left != right` failed")]
    fn fail_ne() {
        assert_approx_ne!(1.0, 1.0);
    }

    #[test]
    #[should_panic(expected = "assertion `left == right` failed")]
    fn fail_eq() {
        assert_approx_eq!(1.0, 2.0);
    }

    #[test]
    #[should_panic(expected = "determinant of the rotation")]
    fn message() {
        assert_approx_eq!(1.0, 2.0, "determinant of the rotation");
    }

    #[test]
    fn default_comparison() {
        assert!(0.1f32.approx_eq(&(0.3 - 0.2)));
        assert!(!1.0f64.approx_eq(&1.001));
        assert!(!f32::NAN.approx_eq(&f32::NAN));
    }

    #[test]
    fn rel() {
        assert_approx_eq!(10.0, 10.01).rel(0.01);
        assert_approx_eq!(1.0, -1.0).rel(2.0);
        assert_approx_eq!(0.0, 0.00001).rel(1.0);
        assert_approx_ne!(0.0, 0.00001).rel(0.5);
    }

    #[test]
    fn ulps() {
        assert_approx_eq!(1.0, 1.0 + f32::EPSILON).ulps(1);
        assert_approx_ne!(1.0, 1.0 + f32::EPSILON).ulps(0);
        assert_approx_eq!(0.0, -0.0).ulps(0);
        assert_approx_ne!(f32::MIN_POSITIVE, -f32::MIN_POSITIVE).ulps(100);
    }

    #[test]
    fn combined() {
        // Either comparison passing is enough.
        assert_approx_eq!(1000.0, 1000.5).abs(0.1).rel(0.001);
        assert_approx_ne!(1000.0, 1002.0).abs(0.1).rel(0.001);
    }

    #[test]
    fn non_finite() {
        assert_approx_ne!(f32::NAN, f32::NAN).abs(1.0);
        assert_approx_ne!(f32::NAN, 0.0).rel(1.0);
        assert_approx_ne!(f64::NAN, f64::NAN).ulps(100);

        assert_approx_eq!(f32::INFINITY, f32::INFINITY).abs(0.0);
        assert_approx_ne!(f32::INFINITY, f32::NEG_INFINITY).rel(10.0);
        assert_approx_ne!(f64::INFINITY, f64::MAX).abs(10000.0);
        assert_approx_eq!(f64::MAX, f64::INFINITY).ulps(1);
    }

    #[test]
    fn arrays() {
        assert_approx_eq!([1.0, 2.0], [1.0, 2.0 + 1e-9]).abs(1e-6);
        assert_approx_ne!([1.0, 2.0], [1.0, 2.5]);
        assert!([0.5f32; 3][..].approx_eq(&[0.5; 3][..]));
    }
}
