use std::{array, fmt, slice};

use crate::{
    traits::{Abs, Cast, Number, Sqrt},
    Mat2, MinMax, One, Trig, Zero,
};

mod ops;
mod view;

/// A 1-dimensional vector.
pub type Vec1<T> = Vector<T, 1>;
/// A 2-dimensional vector.
pub type Vec2<T> = Vector<T, 2>;
/// A 2-dimensional vector with [`f32`] elements.
pub type Vec2f = Vec2<f32>;
/// A 2-dimensional vector with [`f64`] elements.
pub type Vec2d = Vec2<f64>;
/// A 2-dimensional vector with [`i32`] elements.
pub type Vec2i = Vec2<i32>;
/// A 2-dimensional vector with [`u32`] elements.
pub type Vec2u = Vec2<u32>;
/// A 3-dimensional vector.
pub type Vec3<T> = Vector<T, 3>;
/// A 3-dimensional vector with [`f32`] elements.
pub type Vec3f = Vec3<f32>;
/// A 3-dimensional vector with [`f64`] elements.
pub type Vec3d = Vec3<f64>;
/// A 3-dimensional vector with [`i32`] elements.
pub type Vec3i = Vec3<i32>;
/// A 3-dimensional vector with [`u32`] elements.
pub type Vec3u = Vec3<u32>;
/// A 4-dimensional vector.
pub type Vec4<T> = Vector<T, 4>;
/// A 4-dimensional vector with [`f32`] elements.
pub type Vec4f = Vec4<f32>;
/// A 4-dimensional vector with [`f64`] elements.
pub type Vec4d = Vec4<f64>;
/// A 4-dimensional vector with [`i32`] elements.
pub type Vec4i = Vec4<i32>;
/// A 4-dimensional vector with [`u32`] elements.
pub type Vec4u = Vec4<u32>;

/// An `N`-element column vector storing elements of type `T`.
///
/// The dimension is part of the type: operations between vectors of different lengths do not
/// compile, and changing the dimension requires an explicit [`Vector::resize`]. Likewise, vectors
/// with different element types never mix implicitly; use [`Vector::cast`] to convert.
///
/// # Construction
///
/// - The freestanding [`vec2`], [`vec3`] and [`vec4`] functions create vectors from their elements.
/// - [`Vector::splat`] copies one value into every element.
/// - [`Vector::from_fn`] invokes a closure with the index of each element.
/// - Arrays convert into vectors via [`From`].
/// - [`Default`] initializes each element with its default value, [`Vector::ZERO`] with zero.
/// - For vectors with up to 4 dimensions, `Vector::X`, `Vector::Y`, `Vector::Z` and `Vector::W` are
///   the unit vectors along each axis.
///
/// # Element Access
///
/// - For vectors with up to 4 dimensions, elements can be accessed as fields `x`, `y`, `z` and `w`.
/// - [`Index`] and [`IndexMut`] behave like they do on arrays, including the panic on an
///   out-of-bounds index.
/// - [`Vector::as_array`], [`Vector::as_slice`], [`Vector::as_ptr`] and [`Vector::into_array`]
///   expose the underlying storage, which is always a plain `[T; N]`.
/// - [`bytemuck::Zeroable`] and [`bytemuck::Pod`] are implemented when `T` implements them.
///
/// [`Index`]: std::ops::Index
/// [`IndexMut`]: std::ops::IndexMut
#[derive(Clone, Copy, Hash)]
#[repr(transparent)]
pub struct Vector<T, const N: usize>(pub(crate) [T; N]);

unsafe impl<T: bytemuck::Zeroable, const N: usize> bytemuck::Zeroable for Vector<T, N> {}
unsafe impl<T: bytemuck::Pod, const N: usize> bytemuck::Pod for Vector<T, N> {}

impl<T: Zero, const N: usize> Vector<T, N> {
    /// A vector with each element initialized to [`T::ZERO`][Zero::ZERO].
    pub const ZERO: Self = Self([T::ZERO; N]);
}

impl<T: Zero + One> Vector<T, 1> {
    pub const X: Self = Self([T::ONE]);
}

impl<T: Zero + One> Vector<T, 2> {
    pub const X: Self = Self([T::ONE, T::ZERO]);
    pub const Y: Self = Self([T::ZERO, T::ONE]);
}

impl<T: Zero + One> Vector<T, 3> {
    pub const X: Self = Self([T::ONE, T::ZERO, T::ZERO]);
    pub const Y: Self = Self([T::ZERO, T::ONE, T::ZERO]);
    pub const Z: Self = Self([T::ZERO, T::ZERO, T::ONE]);
}

impl<T: Zero + One> Vector<T, 4> {
    pub const X: Self = Self([T::ONE, T::ZERO, T::ZERO, T::ZERO]);
    pub const Y: Self = Self([T::ZERO, T::ONE, T::ZERO, T::ZERO]);
    pub const Z: Self = Self([T::ZERO, T::ZERO, T::ONE, T::ZERO]);
    pub const W: Self = Self([T::ZERO, T::ZERO, T::ZERO, T::ONE]);
}

impl<T, const N: usize> Vector<T, N> {
    /// Creates a vector with each element initialized to `elem`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// let v = Vector::splat(2);
    /// assert_eq!(v, vec3(2, 2, 2));
    /// ```
    #[inline]
    pub fn splat(elem: T) -> Self
    where
        T: Copy,
    {
        Self([elem; N])
    }

    /// Creates a vector by invoking a closure with the index of each element.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// let v = Vector::from_fn(|i| i * 10);
    /// assert_eq!(v, vec4(0, 10, 20, 30));
    /// ```
    #[inline]
    pub fn from_fn<F>(cb: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        Self(array::from_fn(cb))
    }

    /// Applies a closure to each element, returning a vector of the results.
    #[inline]
    pub fn map<F, U>(self, f: F) -> Vector<U, N>
    where
        F: FnMut(T) -> U,
    {
        Vector(self.0.map(f))
    }

    /// Pairs up the elements of `self` and `other`.
    pub fn zip<U>(self, other: Vector<U, N>) -> Vector<(T, U), N> {
        let mut other = other.0.into_iter();
        // Both iterators yield exactly `N` elements.
        Vector(self.0.map(|a| match other.next() {
            Some(b) => (a, b),
            None => unreachable!(),
        }))
    }

    #[inline]
    pub const fn as_array(&self) -> &[T; N] {
        &self.0
    }

    #[inline]
    pub fn as_mut_array(&mut self) -> &mut [T; N] {
        &mut self.0
    }

    #[inline]
    pub const fn as_slice(&self) -> &[T] {
        &self.0
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.0
    }

    /// Returns a pointer to the first of the `N` contiguous elements.
    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        self.0.as_ptr()
    }

    #[inline]
    pub fn into_array(self) -> [T; N] {
        self.0
    }

    /// Returns an iterator over references to the elements.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.0.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.0.iter_mut()
    }

    /// Changes the number of elements of this vector.
    ///
    /// Growing the vector fills the new elements with zero, shrinking it drops the trailing
    /// elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// assert_eq!(vec2(1, 2).resize::<4>(), vec4(1, 2, 0, 0));
    /// assert_eq!(vec4(1, 2, 3, 4).resize::<3>(), vec3(1, 2, 3));
    /// ```
    pub fn resize<const M: usize>(self) -> Vector<T, M>
    where
        T: Zero + Copy,
    {
        Vector::from_fn(|i| if i < N { self.0[i] } else { T::ZERO })
    }

    /// Converts every element to `U`, following the semantics of the `as` operator.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// assert_eq!(vec3(1.7f32, -0.5, 2.0).cast::<i32>(), vec3(1, 0, 2));
    /// ```
    pub fn cast<U>(self) -> Vector<U, N>
    where
        T: Cast<U>,
    {
        self.map(Cast::cast)
    }

    /// Converts the element type and the dimension at once.
    ///
    /// Equivalent to `self.cast::<U>().resize::<M>()`.
    pub fn convert<U, const M: usize>(self) -> Vector<U, M>
    where
        T: Cast<U>,
        U: Zero + Copy,
    {
        self.cast::<U>().resize::<M>()
    }

    /// Returns the squared length (the sum of the squares of all elements).
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// assert_eq!(vec2(4, 3).sqr_norm(), 25);
    /// ```
    pub fn sqr_norm(&self) -> T
    where
        T: Number,
    {
        self.dot(*self)
    }

    /// Returns the (euclidean) length of this vector.
    pub fn length(&self) -> T
    where
        T: Number + Sqrt,
    {
        self.sqr_norm().sqrt()
    }

    /// Returns the **signed** sum of all elements.
    ///
    /// Despite the name, the elements are *not* made positive before summing them, so this is not
    /// the taxicab norm.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// assert_eq!(vec3(1, -2, 3).l1_norm(), 2);
    /// ```
    pub fn l1_norm(&self) -> T
    where
        T: Number,
    {
        self.0.iter().fold(T::ZERO, |acc, &elem| acc + elem)
    }

    /// Returns the arithmetic mean of the elements ([`Vector::l1_norm`] divided by `N`).
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// assert_eq!(vec4(1.0, 2.0, 3.0, -2.0).mean(), 1.0);
    /// ```
    pub fn mean(&self) -> T
    where
        T: Number,
        usize: Cast<T>,
    {
        self.l1_norm() / Cast::<T>::cast(N)
    }

    /// Divides this vector by its length in place, turning it into a unit vector.
    ///
    /// A zero-length vector has no direction, so normalizing it results in NaN elements.
    pub fn normalize(&mut self) -> &mut Self
    where
        T: Number + Sqrt,
    {
        *self = *self / self.length();
        self
    }

    /// Returns a unit vector pointing in the same direction as `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// let z = vec3(0.0, 0.0, 4.0).normalized();
    /// assert_eq!(z, vec3(0.0, 0.0, 1.0));
    /// ```
    pub fn normalized(mut self) -> Self
    where
        T: Number + Sqrt,
    {
        self.normalize();
        self
    }

    /// Computes the dot product between `self` and `other`.
    ///
    /// Both vectors have to share their element type. Mixing precisions needs an explicit
    /// [`Vector::cast`] first.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// let a = vec3(1, 3, -5);
    /// let b = vec3(4, -2, -1);
    /// assert_eq!(a.dot(b), 3);
    /// ```
    pub fn dot(self, other: Self) -> T
    where
        T: Number,
    {
        self.0
            .into_iter()
            .zip(other.0)
            .fold(T::ZERO, |acc, (a, b)| acc + a * b)
    }

    /// Computes the smallest positive angle between `self` and `other`, in radians.
    ///
    /// Both `self` and `other` must have non-zero length for the result to be meaningful.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// use std::f32::consts::TAU;
    ///
    /// let a = Vec3f::Y;
    /// let b = Vec3f::X;
    /// assert_approx_eq!(a.abs_angle_to(b), TAU / 4.0);
    /// assert_approx_eq!(a.abs_angle_to(-a), TAU / 2.0);
    /// ```
    pub fn abs_angle_to(self, other: Self) -> T
    where
        T: Number + Trig + Sqrt,
    {
        (self.dot(other) / (self.length() * other.length())).acos()
    }

    /// Returns the smallest element.
    ///
    /// When several elements compare equal, the first one wins. Elements that are unordered with
    /// respect to the current minimum (NaN) are skipped, unless the first element is NaN.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// assert_eq!(vec4(3, -1, 7, -1).min_element(), -1);
    /// ```
    pub fn min_element(&self) -> T
    where
        T: PartialOrd + Copy,
    {
        const { assert!(N > 0, "a vector without elements has no minimum") };
        self.0[1..]
            .iter()
            .fold(self.0[0], |min, &elem| if elem < min { elem } else { min })
    }

    /// Returns the largest element.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// assert_eq!(vec4(3.0, -1.0, 7.0, -9.0).max_element(), 7.0);
    /// ```
    pub fn max_element(&self) -> T
    where
        T: PartialOrd + Copy,
    {
        const { assert!(N > 0, "a vector without elements has no maximum") };
        self.0[1..]
            .iter()
            .fold(self.0[0], |max, &elem| if elem > max { elem } else { max })
    }

    /// Returns the smallest absolute value among the elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// assert_eq!(vec3(-4, 2, -3).abs_min(), 2);
    /// ```
    pub fn abs_min(&self) -> T
    where
        T: Abs + PartialOrd + Copy,
    {
        self.map(Abs::abs).min_element()
    }

    /// Returns the largest absolute value among the elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// assert_eq!(vec3(-4, 2, -3).abs_max(), 4);
    /// ```
    pub fn abs_max(&self) -> T
    where
        T: Abs + PartialOrd + Copy,
    {
        self.map(Abs::abs).max_element()
    }

    /// Element-wise minimum between `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// let a = vec3(-1.0, 2.0, f32::NAN);
    /// let b = vec3(3.0, f32::NEG_INFINITY, 0.0);
    /// assert_eq!(a.min(b), b.min(a));
    /// assert_eq!(a.min(b), vec3(-1.0, f32::NEG_INFINITY, 0.0));
    /// ```
    pub fn min(self, other: Self) -> Self
    where
        T: MinMax + Copy,
    {
        Self::from_fn(|i| self[i].min(other[i]))
    }

    /// Element-wise maximum between `self` and `other`.
    pub fn max(self, other: Self) -> Self
    where
        T: MinMax + Copy,
    {
        Self::from_fn(|i| self[i].max(other[i]))
    }

    /// Element-wise clamp of the elements in `self` to the range `min..=max`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// let v = vec3(-5, 2, 9).clamp(Vector::splat(0), Vector::splat(4));
    /// assert_eq!(v, vec3(0, 2, 4));
    /// ```
    pub fn clamp(self, min: Self, max: Self) -> Self
    where
        T: MinMax + Copy,
    {
        Self::from_fn(|i| self[i].clamp(min[i], max[i]))
    }
}

impl<T> Vector<T, 1> {
    /// Appends `value` to this vector.
    pub fn extend(self, value: T) -> Vector<T, 2> {
        let [x] = self.0;
        Vector([x, value])
    }
}

impl<T> Vector<T, 2> {
    /// Removes the last element of this vector.
    pub fn truncate(self) -> Vector<T, 1> {
        let [x, _] = self.0;
        Vector([x])
    }

    /// Appends `value` to this vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// assert_eq!(vec2(1, 2).extend(3), vec3(1, 2, 3));
    /// ```
    pub fn extend(self, value: T) -> Vector<T, 3> {
        let [x, y] = self.0;
        Vector([x, y, value])
    }

    /// Rotates `self` clockwise in the 2D plane.
    ///
    /// This operation assumes that the Y axis points up, and the X axis points to the right.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// use std::f32::consts::TAU;
    ///
    /// assert_approx_eq!(Vec2f::Y.rotate_clockwise(TAU / 4.0), Vec2f::X);
    /// ```
    pub fn rotate_clockwise(self, radians: T) -> Self
    where
        T: Number + Trig,
    {
        Mat2::rotation_clockwise(radians) * self
    }

    /// Rotates `self` counterclockwise in the 2D plane.
    pub fn rotate_counterclockwise(self, radians: T) -> Self
    where
        T: Number + Trig,
    {
        Mat2::rotation_counterclockwise(radians) * self
    }
}

impl<T> Vector<T, 3> {
    /// Removes the last element of this vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// assert_eq!(vec3(1, 2, 3).truncate(), vec2(1, 2));
    /// ```
    pub fn truncate(self) -> Vector<T, 2> {
        let [x, y, _] = self.0;
        Vector([x, y])
    }

    /// Appends `value` to this vector, typically a homogeneous coordinate.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// assert_eq!(vec3(1, 2, 3).extend(1), vec4(1, 2, 3, 1));
    /// ```
    pub fn extend(self, value: T) -> Vector<T, 4> {
        let [x, y, z] = self.0;
        Vector([x, y, z, value])
    }

    /// Computes the cross product of `self` and `other`.
    ///
    /// The result is perpendicular to both inputs and follows the right-hand rule, so swapping the
    /// operands negates it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// assert_eq!(Vec3f::X.cross(Vec3f::Y), Vec3f::Z);
    /// assert_eq!(Vec3f::Y.cross(Vec3f::X), -Vec3f::Z);
    /// ```
    pub fn cross(self, other: Self) -> Self
    where
        T: Number,
    {
        let [a1, a2, a3] = self.0;
        let [b1, b2, b3] = other.0;

        #[rustfmt::skip]
        let cross = vec3(
            a2 * b3 - a3 * b2,
            a3 * b1 - a1 * b3,
            a1 * b2 - a2 * b1,
        );
        cross
    }
}

impl<T> Vector<T, 4> {
    /// Removes the last element of this vector.
    ///
    /// This drops the homogeneous coordinate without dividing by it.
    pub fn truncate(self) -> Vector<T, 3> {
        let [x, y, z, _] = self.0;
        Vector([x, y, z])
    }
}

impl<T, const N: usize> Default for Vector<T, N>
where
    T: Default,
{
    #[inline]
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T, N> {
    #[inline]
    fn from(value: [T; N]) -> Self {
        Self(value)
    }
}

impl<T, const N: usize> From<Vector<T, N>> for [T; N] {
    #[inline]
    fn from(value: Vector<T, N>) -> Self {
        value.0
    }
}

impl<T, const N: usize> IntoIterator for Vector<T, N> {
    type Item = T;
    type IntoIter = array::IntoIter<T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a Vector<T, N> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut Vector<T, N> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter_mut()
    }
}

impl<T, const N: usize> fmt::Debug for Vector<T, N>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tup = f.debug_tuple("Vector");
        for elem in &self.0 {
            tup.field(elem);
        }
        tup.finish()
    }
}

impl<T, const N: usize> fmt::Display for Vector<T, N>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, elem) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            elem.fmt(f)?;
        }
        f.write_str(")")
    }
}

impl<T, const N: usize> AsRef<[T]> for Vector<T, N> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.0
    }
}

impl<T, const N: usize> AsRef<[T; N]> for Vector<T, N> {
    #[inline]
    fn as_ref(&self) -> &[T; N] {
        &self.0
    }
}

impl<T, const N: usize> AsMut<[T]> for Vector<T, N> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.0
    }
}

impl<T, const N: usize> AsMut<[T; N]> for Vector<T, N> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T; N] {
        &mut self.0
    }
}

/// Constructs a [`Vec1`] from its single element.
#[inline]
pub const fn vec1<T>(x: T) -> Vec1<T> {
    Vector([x])
}

/// Constructs a [`Vec2`] from its two elements.
#[inline]
pub const fn vec2<T>(x: T, y: T) -> Vec2<T> {
    Vector([x, y])
}

/// Constructs a [`Vec3`] from its three elements.
#[inline]
pub const fn vec3<T>(x: T, y: T, z: T) -> Vec3<T> {
    Vector([x, y, z])
}

/// Constructs a [`Vec4`] from its four elements.
#[inline]
pub const fn vec4<T>(x: T, y: T, z: T, w: T) -> Vec4<T> {
    Vector([x, y, z, w])
}
