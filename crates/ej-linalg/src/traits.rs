use std::ops;

/// Types that have a "zero" value (an additive identity).
pub trait Zero {
    /// The *0* value of this type.
    const ZERO: Self;
}

/// Types that have a "one" value (a multiplicative identity).
pub trait One {
    /// The *1* value of this type.
    const ONE: Self;
}

/// A trait for numeric types that support basic arithmetic operations.
///
/// Every element type of [`Vector`], [`Matrix`] and [`Quaternion`] arithmetic has to implement
/// this. It is implemented automatically for everything that satisfies the bounds.
///
/// [`Vector`]: crate::Vector
/// [`Matrix`]: crate::Matrix
/// [`Quaternion`]: crate::Quaternion
pub trait Number:
    Zero
    + One
    + ops::Neg<Output = Self>
    + ops::Add<Output = Self>
    + ops::Sub<Output = Self>
    + ops::Mul<Output = Self>
    + ops::Div<Output = Self>
    + PartialEq
    + Copy
{
}
impl<T> Number for T where
    T: Zero
        + One
        + ops::Neg<Output = Self>
        + ops::Add<Output = Self>
        + ops::Sub<Output = Self>
        + ops::Mul<Output = Self>
        + ops::Div<Output = Self>
        + PartialEq
        + Copy
{
}

/// Types that support the trigonometric functions.
pub trait Trig: Sized {
    /// Computes the sine of the angle `self` (in radians).
    fn sin(self) -> Self;
    /// Computes the cosine of the angle `self` (in radians).
    fn cos(self) -> Self;
    /// Computes the tangent of the angle `self` (in radians).
    fn tan(self) -> Self;
    fn asin(self) -> Self;
    fn acos(self) -> Self;
    fn atan(self) -> Self;
    /// Four quadrant arctangent of `self` (the y coordinate) and `other` (the x coordinate).
    fn atan2(self, other: Self) -> Self;
    /// Computes sine and cosine of `self` at once.
    fn sin_cos(self) -> (Self, Self);
}

/// Types that support computing their square root.
pub trait Sqrt {
    fn sqrt(self) -> Self;
}

/// Types that have an absolute value.
///
/// Unsigned integers are their own absolute value.
pub trait Abs {
    fn abs(self) -> Self;
}

/// Types that support a `min` and `max` operation.
///
/// [`f32`] and [`f64`] implement this trait in terms of the [`f32::min`] and [`f32::max`] functions
/// ([`f64::min`] and [`f64::max`] respectively). Built-in integer types implement it in terms of
/// [`Ord::min`] and [`Ord::max`].
pub trait MinMax: Sized {
    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;
    fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }
}

/// Floating-point scalars.
///
/// Everything involving angles, square roots or tolerances (normalization, rotations, Euler
/// angles, quaternion extraction) requires this trait.
pub trait Float: Number + Trig + Sqrt + Abs + MinMax + PartialOrd {
    /// The machine epsilon of this type.
    const EPSILON: Self;
    /// Archimedes' constant (π).
    const PI: Self;

    /// Converts a literal constant to this type, rounding if necessary.
    fn from_f64(value: f64) -> Self;
}

/// Lossy, `as`-style conversion between primitive numeric types.
///
/// This is what [`Vector::cast`] and [`Matrix::cast`] use. Conversions follow the semantics of
/// Rust's `as` operator (truncation towards zero for float to integer, saturation on overflow,
/// rounding to nearest for float narrowing).
///
/// [`Vector::cast`]: crate::Vector::cast
/// [`Matrix::cast`]: crate::Matrix::cast
pub trait Cast<U> {
    fn cast(self) -> U;
}

/// Converts an angle in degrees to radians.
///
/// All angles accepted by this library are in radians.
///
/// # Examples
///
/// ```
/// # use ej_linalg::*;
/// assert_approx_eq!(deg_to_rad(180.0f32), std::f32::consts::PI);
/// ```
#[inline]
pub fn deg_to_rad<T: Float>(degrees: T) -> T {
    degrees * (T::PI / T::from_f64(180.0))
}

/// Converts an angle in radians to degrees.
///
/// # Examples
///
/// ```
/// # use ej_linalg::*;
/// assert_approx_eq!(rad_to_deg(std::f64::consts::FRAC_PI_2), 90.0);
/// ```
#[inline]
pub fn rad_to_deg<T: Float>(radians: T) -> T {
    radians * (T::from_f64(180.0) / T::PI)
}

macro_rules! int_impls {
    ($($types:ty),+) => {
        $(
            impl Zero for $types {
                const ZERO: Self = 0;
            }

            impl One for $types {
                const ONE: Self = 1;
            }

            impl MinMax for $types {
                fn min(self, other: Self) -> Self {
                    Ord::min(self, other)
                }

                fn max(self, other: Self) -> Self {
                    Ord::max(self, other)
                }
            }
        )+
    };
}
int_impls!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

macro_rules! signed_abs {
    ($($types:ty),+) => {
        $(
            impl Abs for $types {
                #[inline]
                fn abs(self) -> Self {
                    <$types>::abs(self)
                }
            }
        )+
    };
}
signed_abs!(i8, i16, i32, i64, i128, isize, f32, f64);

macro_rules! unsigned_abs {
    ($($types:ty),+) => {
        $(
            impl Abs for $types {
                #[inline]
                fn abs(self) -> Self {
                    self
                }
            }
        )+
    };
}
unsigned_abs!(u8, u16, u32, u64, u128, usize);

macro_rules! float_impls {
    ($($types:ident),+) => {
        $(
            impl Zero for $types {
                const ZERO: Self = 0.0;
            }

            impl One for $types {
                const ONE: Self = 1.0;
            }

            impl MinMax for $types {
                fn min(self, other: Self) -> Self {
                    <$types>::min(self, other)
                }

                fn max(self, other: Self) -> Self {
                    <$types>::max(self, other)
                }
            }

            impl Sqrt for $types {
                #[inline]
                fn sqrt(self) -> Self {
                    <$types>::sqrt(self)
                }
            }

            impl Trig for $types {
                fn sin(self) -> Self {
                    <$types>::sin(self)
                }

                fn cos(self) -> Self {
                    <$types>::cos(self)
                }

                fn tan(self) -> Self {
                    <$types>::tan(self)
                }

                fn asin(self) -> Self {
                    <$types>::asin(self)
                }

                fn acos(self) -> Self {
                    <$types>::acos(self)
                }

                fn atan(self) -> Self {
                    <$types>::atan(self)
                }

                fn atan2(self, other: Self) -> Self {
                    <$types>::atan2(self, other)
                }

                fn sin_cos(self) -> (Self, Self) {
                    <$types>::sin_cos(self)
                }
            }

            impl Float for $types {
                const EPSILON: Self = $types::EPSILON;
                const PI: Self = std::$types::consts::PI;

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $types
                }
            }
        )+
    };
}
float_impls!(f32, f64);

macro_rules! cast_impls {
    ($($from:ty),+) => {
        $(
            cast_impls!(@to $from => u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);
        )+
    };
    (@to $from:ty => $($to:ty),+) => {
        $(
            impl Cast<$to> for $from {
                #[inline]
                fn cast(self) -> $to {
                    self as $to
                }
            }
        )+
    };
}
cast_impls!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);
