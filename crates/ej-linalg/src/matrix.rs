use std::{array, fmt, slice};

use crate::{
    traits::{Abs, Cast, Float},
    Number, One, Trig, Vec3, Vector, Zero,
};

mod ops;

/// A 2x2 matrix.
pub type Mat2<T> = Matrix<T, 2, 2>;
/// A 2x2 matrix with [`f32`] elements.
pub type Mat2f = Mat2<f32>;
/// A 2x2 matrix with [`f64`] elements.
pub type Mat2d = Mat2<f64>;
/// A 3x3 matrix.
pub type Mat3<T> = Matrix<T, 3, 3>;
/// A 3x3 matrix with [`f32`] elements.
pub type Mat3f = Mat3<f32>;
/// A 3x3 matrix with [`f64`] elements.
pub type Mat3d = Mat3<f64>;
/// A 4x4 matrix.
pub type Mat4<T> = Matrix<T, 4, 4>;
/// A 4x4 matrix with [`f32`] elements.
pub type Mat4f = Mat4<f32>;
/// A 4x4 matrix with [`f64`] elements.
pub type Mat4d = Mat4<f64>;

/// A matrix with 2 rows and 3 columns.
pub type Mat2x3<T> = Matrix<T, 2, 3>;
/// A matrix with 2 rows and 4 columns.
pub type Mat2x4<T> = Matrix<T, 2, 4>;
/// A matrix with 3 rows and 2 columns.
pub type Mat3x2<T> = Matrix<T, 3, 2>;
/// A matrix with 3 rows and 4 columns.
pub type Mat3x4<T> = Matrix<T, 3, 4>;
/// A matrix with 4 rows and 2 columns.
pub type Mat4x2<T> = Matrix<T, 4, 2>;
/// A matrix with 4 rows and 3 columns.
pub type Mat4x3<T> = Matrix<T, 4, 3>;

/// A column-major matrix with `R` rows and `C` columns, and element type `T`.
///
/// The matrix is stored as `C` column [`Vector`]s of length `R`, back to back and without padding,
/// which is the layout graphics APIs expect for uniform data (see [`Matrix::as_slice`]).
///
/// # Construction
///
/// - [`Matrix::from_columns`] and [`Matrix::from_rows`] take an array of column or row vectors (or
///   anything convertible to them, like arrays).
/// - [`Matrix::from_fn`] creates each element by invoking a closure with its row and column.
/// - For square matrices, [`Matrix::from_diagonal`] creates a matrix with the given diagonal and
///   zero everywhere else.
/// - [`Matrix::angle_axis`] creates 3x3 and 4x4 rotation matrices, and
///   [`Matrix::rotation_clockwise`] and [`Matrix::rotation_counterclockwise`] create 2D ones.
/// - [`Matrix::ZERO`] has every element set to 0, [`Matrix::IDENTITY`] has 1 on its diagonal.
///
/// # Element Access
///
/// Indexing with a `(row, column)` tuple addresses a single element, matching common mathematical
/// notation. Indexing with a single `usize` yields a whole column, so `m[col][row]` also works.
///
/// ```
/// # use ej_linalg::*;
/// let mut mat = Matrix::from_rows([
///     [0, 1],
///     [2, 3],
/// ]);
/// mat[(0, 0)] = 4;
/// assert_eq!(mat[(0, 0)], 4);
/// assert_eq!(mat[(0, 1)], 1);
/// assert_eq!(mat[1], vec2(1, 3));
/// assert_eq!(mat[1][0], 1);
/// ```
///
/// Indexing out of bounds panics. [`Matrix::get`] and [`Matrix::get_mut`] return [`Option`]s:
///
/// ```
/// # use ej_linalg::*;
/// let mat = Matrix::from_rows([
///     [0, 1]
/// ]);
/// assert_eq!(mat.get(0, 1), Some(&1));
/// assert_eq!(mat.get(0, 2), None);
/// ```
#[derive(Clone, Copy, Hash)]
#[repr(transparent)]
pub struct Matrix<T, const R: usize, const C: usize>(pub(crate) [Vector<T, R>; C]);

#[rustfmt::skip]
unsafe impl<T: bytemuck::Zeroable, const R: usize, const C: usize> bytemuck::Zeroable for Matrix<T, R, C> {}
unsafe impl<T: bytemuck::Pod, const R: usize, const C: usize> bytemuck::Pod for Matrix<T, R, C> {}

impl<T, const R: usize, const C: usize> Matrix<T, R, C> {
    /// The smaller of `R` and `C`.
    const MIN_DIMENSION: usize = if R > C { C } else { R };

    /// Creates a [`Matrix`] from an array of column vectors.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// let m = Matrix::from_columns([
    ///     [1, 3],
    ///     [2, 4],
    /// ]);
    /// assert_eq!(m[(0, 1)], 2);
    /// assert_eq!(m[(1, 0)], 3);
    /// ```
    pub fn from_columns<U: Into<Vector<T, R>>>(columns: [U; C]) -> Self {
        Self(columns.map(Into::into))
    }

    /// Creates a [`Matrix`] from an array of row vectors.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// let rows = Matrix::from_rows([
    ///     [0, 1],
    ///     [2, 3],
    /// ]);
    /// let columns = Matrix::from_columns([
    ///     [0, 2],
    ///     [1, 3],
    /// ]);
    /// assert_eq!(rows, columns);
    /// ```
    pub fn from_rows<U: Into<Vector<T, C>>>(rows: [U; R]) -> Self
    where
        T: Copy,
    {
        Matrix::<T, C, R>::from_columns(rows).transposed()
    }

    /// Creates a [`Matrix`] by invoking a closure with the `(row, column)` of every element.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// let m = Mat2x3::from_fn(|row, col| row * 10 + col);
    /// assert_eq!(m, Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [10, 11, 12],
    /// ]));
    /// ```
    pub fn from_fn<F>(mut cb: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        Self(array::from_fn(|col| Vector::from_fn(|row| cb(row, col))))
    }

    /// Applies a closure to each element, returning a matrix of the results.
    pub fn map<F, U>(self, mut f: F) -> Matrix<U, R, C>
    where
        F: FnMut(T) -> U,
    {
        Matrix(self.0.map(|col| col.map(&mut f)))
    }

    /// Converts every element to `U`, following the semantics of the `as` operator.
    pub fn cast<U>(self) -> Matrix<U, R, C>
    where
        T: Cast<U>,
    {
        self.map(Cast::cast)
    }

    /// Returns the transpose of this matrix.
    ///
    /// Works for every shape. For square matrices, [`Matrix::transpose`] does the same in place.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// let m = Matrix::from_rows([
    ///     [1, 2, 3],
    /// ]);
    /// assert_eq!(m.transposed(), Matrix::from_columns([[1, 2, 3]]));
    /// ```
    pub fn transposed(self) -> Matrix<T, C, R>
    where
        T: Copy,
    {
        Matrix::from_fn(|row, col| self[(col, row)])
    }

    /// Returns a reference to the element at `(row, col)`, or [`None`] if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.0.get(col)?.as_slice().get(row)
    }

    /// Returns a mutable reference to the element at `(row, col)`, or [`None`] if out of bounds.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        self.0.get_mut(col)?.as_mut_slice().get_mut(row)
    }

    /// Returns the column at index `col`.
    ///
    /// # Panics
    ///
    /// Panics if `col` is out of bounds.
    pub fn column(&self, col: usize) -> Vector<T, R>
    where
        T: Copy,
    {
        self.0[col]
    }

    /// Returns the row at index `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn row(&self, row: usize) -> Vector<T, C>
    where
        T: Copy,
    {
        Vector::from_fn(|col| self[(row, col)])
    }

    #[inline]
    pub fn columns(&self) -> &[Vector<T, R>; C] {
        &self.0
    }

    #[inline]
    pub fn into_columns(self) -> [Vector<T, R>; C] {
        self.0
    }

    /// Returns all `R * C` elements in column-major order.
    ///
    /// This is the representation uniform buffers and `glUniformMatrix*`-style APIs expect.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// let m = Matrix::from_rows([
    ///     [1, 2],
    ///     [3, 4],
    /// ]);
    /// assert_eq!(m.as_slice(), &[1, 3, 2, 4]);
    /// ```
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // Safety: `Matrix` and `Vector` are `repr(transparent)`, so `self` has the layout of
        // `[[T; R]; C]`, which consists of `R * C` contiguous `T`s.
        unsafe { slice::from_raw_parts(self.as_ptr(), R * C) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // Safety: see `as_slice`.
        unsafe { slice::from_raw_parts_mut(self.0.as_mut_ptr().cast::<T>(), R * C) }
    }

    /// Returns a pointer to the first element (row 0, column 0).
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.0.as_ptr().cast::<T>()
    }

    /// Changes the dimensions of this matrix.
    ///
    /// Growing the matrix fills the new elements with zero (so resizing a 3x3 rotation matrix to
    /// 4x4 does *not* produce a valid affine transform, see [`Matrix::angle_axis`]). Shrinking it
    /// drops the trailing rows and columns.
    pub fn resize<const R2: usize, const C2: usize>(self) -> Matrix<T, R2, C2>
    where
        T: Zero + Copy,
    {
        Matrix::from_fn(|row, col| {
            if row < R && col < C {
                self[(row, col)]
            } else {
                T::ZERO
            }
        })
    }
}

impl<T: Zero + Copy, const R: usize, const C: usize> Matrix<T, R, C> {
    /// A matrix with every element set to 0.
    pub const ZERO: Self = Self([Vector::ZERO; C]);
}

impl<T: Zero + One + Copy, const R: usize, const C: usize> Matrix<T, R, C> {
    /// The identity matrix.
    ///
    /// The matrix has the value 1 on its diagonal and 0 everywhere else. Multiplying any vector
    /// with this matrix returns the vector unchanged.
    pub const IDENTITY: Self = {
        let mut this = Self::ZERO;
        let mut i = 0;
        while i < Self::MIN_DIMENSION {
            this.0[i].0[i] = T::ONE;
            i += 1;
        }
        this
    };
}

impl<T, const N: usize> Matrix<T, N, N> {
    /// Returns the identity matrix ([`Matrix::IDENTITY`]).
    #[inline]
    pub fn identity() -> Self
    where
        T: Zero + One + Copy,
    {
        Self::IDENTITY
    }

    /// Returns a [`Vector`] holding the diagonal elements of this square matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [1, 2],
    ///     [3, 4],
    /// ]);
    /// assert_eq!(mat.into_diagonal(), [1, 4]);
    /// ```
    pub fn into_diagonal(self) -> Vector<T, N>
    where
        T: Copy,
    {
        Vector::from_fn(|i| self[(i, i)])
    }

    /// Creates a square matrix with the given diagonal and zero everywhere else.
    pub fn from_diagonal<D: Into<Vector<T, N>>>(diag: D) -> Self
    where
        T: Zero + Copy,
    {
        let diag = diag.into();
        Self::from_fn(|row, col| if row == col { diag[row] } else { T::ZERO })
    }

    /// Returns the sum of the diagonal elements.
    pub fn trace(&self) -> T
    where
        T: Number,
    {
        (0..N).fold(T::ZERO, |acc, i| acc + self[(i, i)])
    }

    /// Transposes this square matrix in place.
    pub fn transpose(&mut self) -> &mut Self
    where
        T: Copy,
    {
        *self = self.transposed();
        self
    }
}

// The inverse and its variants are built on `determinate` and `adjugate`, which have a closed form
// for every supported size.
macro_rules! inverse_impls {
    ($($n:literal),+) => {
        $(
            impl<T: Number> Matrix<T, $n, $n> {
                /// Inverts this matrix in place, using a previously computed determinant.
                ///
                /// Passing a `det` other than [`Matrix::determinate`] yields a scaled inverse.
                pub fn inverse_with(&mut self, det: T) -> &mut Self {
                    *self = self.inversed_with(det);
                    self
                }

                /// Returns the inverse of this matrix, using a previously computed determinant.
                pub fn inversed_with(self, det: T) -> Self {
                    self.adjugate() * (T::ONE / det)
                }

                /// Inverts this matrix in place.
                ///
                /// Singular matrices are not detected: a zero determinant results in infinite or
                /// NaN elements. Use [`Matrix::try_inversed`] when that is a concern.
                pub fn inverse(&mut self) -> &mut Self {
                    let det = self.determinate();
                    self.inverse_with(det)
                }

                /// Returns the inverse of this matrix.
                ///
                /// Like [`Matrix::inverse`], this does not check for singular matrices.
                pub fn inversed(self) -> Self {
                    self.inversed_with(self.determinate())
                }

                /// Returns the inverse of this matrix, or [`None`] if its determinant is exactly
                /// zero.
                pub fn try_inversed(self) -> Option<Self> {
                    let det = self.determinate();
                    if det == T::ZERO {
                        None
                    } else {
                        Some(self.inversed_with(det))
                    }
                }

                /// Returns whether the determinant of this matrix is non-zero.
                ///
                /// This is an exact comparison. Nearly singular matrices pass it but have
                /// numerically useless inverses, see [`Matrix::is_invertible_within`].
                pub fn is_invertible(&self) -> bool {
                    self.determinate() != T::ZERO
                }

                /// Returns whether the magnitude of the determinant exceeds `tolerance`.
                pub fn is_invertible_within(&self, tolerance: T) -> bool
                where
                    T: Abs + PartialOrd,
                {
                    self.determinate().abs() > tolerance
                }
            }
        )+
    };
}

inverse_impls!(2, 3, 4);

impl<T: Number> Matrix<T, 2, 2> {
    /// Returns the determinant of the matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// let m = Matrix::from_columns([[1.0, 3.0], [2.0, 4.0]]);
    /// assert_eq!(m.determinate(), -2.0);
    /// ```
    pub fn determinate(&self) -> T {
        let m = self;
        m[0][0] * m[1][1] - m[1][0] * m[0][1]
    }

    /// Returns the adjugate (the transpose of the cofactor matrix).
    pub fn adjugate(&self) -> Self {
        let m = self;
        Self::from_columns([[m[1][1], -m[0][1]], [-m[1][0], m[0][0]]])
    }

    /// Creates a 2x2 rotation matrix for a clockwise rotation in the XY plane.
    pub fn rotation_clockwise(radians: T) -> Self
    where
        T: Trig,
    {
        Self::rotation_counterclockwise(-radians)
    }

    /// Creates a 2x2 rotation matrix for a counterclockwise rotation in the XY plane.
    pub fn rotation_counterclockwise(radians: T) -> Self
    where
        T: Trig,
    {
        let (sin, cos) = radians.sin_cos();
        Self::from_columns([[cos, sin], [-sin, cos]])
    }
}

impl<T: Number> Matrix<T, 3, 3> {
    /// Returns the determinant of the matrix, expanded along the first row.
    pub fn determinate(&self) -> T {
        let m = self;
        m[0][0] * (m[1][1] * m[2][2] - m[2][1] * m[1][2])
            - m[1][0] * (m[0][1] * m[2][2] - m[2][1] * m[0][2])
            + m[2][0] * (m[0][1] * m[1][2] - m[1][1] * m[0][2])
    }

    /// Returns the adjugate (the transpose of the cofactor matrix).
    pub fn adjugate(&self) -> Self {
        let m = self;
        #[rustfmt::skip]
        let adj = Self::from_columns([
            [
                m[1][1] * m[2][2] - m[2][1] * m[1][2],
                -(m[0][1] * m[2][2] - m[2][1] * m[0][2]),
                m[0][1] * m[1][2] - m[1][1] * m[0][2],
            ],
            [
                -(m[1][0] * m[2][2] - m[2][0] * m[1][2]),
                m[0][0] * m[2][2] - m[2][0] * m[0][2],
                -(m[0][0] * m[1][2] - m[1][0] * m[0][2]),
            ],
            [
                m[1][0] * m[2][1] - m[2][0] * m[1][1],
                -(m[0][0] * m[2][1] - m[2][0] * m[0][1]),
                m[0][0] * m[1][1] - m[1][0] * m[0][1],
            ],
        ]);
        adj
    }

    /// Creates a matrix rotating by `angle` radians around `axis` (Rodrigues' rotation formula).
    ///
    /// `axis` is normalized before use, so it only has to be non-zero. The rotation is
    /// counterclockwise when looking down the axis towards the origin.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// use std::f32::consts::FRAC_PI_2;
    ///
    /// let rot = Mat3::angle_axis(FRAC_PI_2, vec3(0.0, 0.0, 5.0));
    /// assert_approx_eq!(rot * Vec3f::X, Vec3f::Y).abs(1e-6);
    /// ```
    pub fn angle_axis(angle: T, axis: Vec3<T>) -> Self
    where
        T: Float,
    {
        let (s, c) = angle.sin_cos();
        let [a0, a1, a2] = axis.normalized().into_array();
        let one_minus_c = T::ONE - c;
        let [t0, t1, t2] = [a0 * one_minus_c, a1 * one_minus_c, a2 * one_minus_c];

        #[rustfmt::skip]
        let rot = Self::from_columns([
            [t0 * a0 + c,      t0 * a1 + s * a2, t0 * a2 - s * a1],
            [t1 * a0 - s * a2, t1 * a1 + c,      t1 * a2 + s * a0],
            [t2 * a0 + s * a1, t2 * a1 - s * a0, t2 * a2 + c     ],
        ]);
        rot
    }
}

impl<T: Number> Matrix<T, 4, 4> {
    /// Returns the determinant of the matrix.
    ///
    /// Uses cofactor expansion along the first column, with the 2x2 minors of the lower two rows
    /// shared between the cofactors.
    pub fn determinate(&self) -> T {
        let m = self;
        let sub00 = m[2][2] * m[3][3] - m[3][2] * m[2][3];
        let sub01 = m[2][1] * m[3][3] - m[3][1] * m[2][3];
        let sub02 = m[2][1] * m[3][2] - m[3][1] * m[2][2];
        let sub03 = m[2][0] * m[3][3] - m[3][0] * m[2][3];
        let sub04 = m[2][0] * m[3][2] - m[3][0] * m[2][2];
        let sub05 = m[2][0] * m[3][1] - m[3][0] * m[2][1];

        let cof = Vector([
            m[1][1] * sub00 - m[1][2] * sub01 + m[1][3] * sub02,
            -(m[1][0] * sub00 - m[1][2] * sub03 + m[1][3] * sub04),
            m[1][0] * sub01 - m[1][1] * sub03 + m[1][3] * sub05,
            -(m[1][0] * sub02 - m[1][1] * sub04 + m[1][2] * sub05),
        ]);
        m[0].dot(cof)
    }

    /// Returns the adjugate (the transpose of the cofactor matrix).
    pub fn adjugate(&self) -> Self {
        let m = self;
        let coef00 = m[2][2] * m[3][3] - m[3][2] * m[2][3];
        let coef02 = m[1][2] * m[3][3] - m[3][2] * m[1][3];
        let coef03 = m[1][2] * m[2][3] - m[2][2] * m[1][3];

        let coef04 = m[2][1] * m[3][3] - m[3][1] * m[2][3];
        let coef06 = m[1][1] * m[3][3] - m[3][1] * m[1][3];
        let coef07 = m[1][1] * m[2][3] - m[2][1] * m[1][3];

        let coef08 = m[2][1] * m[3][2] - m[3][1] * m[2][2];
        let coef10 = m[1][1] * m[3][2] - m[3][1] * m[1][2];
        let coef11 = m[1][1] * m[2][2] - m[2][1] * m[1][2];

        let coef12 = m[2][0] * m[3][3] - m[3][0] * m[2][3];
        let coef14 = m[1][0] * m[3][3] - m[3][0] * m[1][3];
        let coef15 = m[1][0] * m[2][3] - m[2][0] * m[1][3];

        let coef16 = m[2][0] * m[3][2] - m[3][0] * m[2][2];
        let coef18 = m[1][0] * m[3][2] - m[3][0] * m[1][2];
        let coef19 = m[1][0] * m[2][2] - m[2][0] * m[1][2];

        let coef20 = m[2][0] * m[3][1] - m[3][0] * m[2][1];
        let coef22 = m[1][0] * m[3][1] - m[3][0] * m[1][1];
        let coef23 = m[1][0] * m[2][1] - m[2][0] * m[1][1];

        let fac0 = Vector([coef00, coef00, coef02, coef03]);
        let fac1 = Vector([coef04, coef04, coef06, coef07]);
        let fac2 = Vector([coef08, coef08, coef10, coef11]);
        let fac3 = Vector([coef12, coef12, coef14, coef15]);
        let fac4 = Vector([coef16, coef16, coef18, coef19]);
        let fac5 = Vector([coef20, coef20, coef22, coef23]);

        let vec0 = Vector([m[1][0], m[0][0], m[0][0], m[0][0]]);
        let vec1 = Vector([m[1][1], m[0][1], m[0][1], m[0][1]]);
        let vec2 = Vector([m[1][2], m[0][2], m[0][2], m[0][2]]);
        let vec3 = Vector([m[1][3], m[0][3], m[0][3], m[0][3]]);

        let inv0 = vec1 * fac0 - vec2 * fac1 + vec3 * fac2;
        let inv1 = vec0 * fac0 - vec2 * fac3 + vec3 * fac4;
        let inv2 = vec0 * fac1 - vec1 * fac3 + vec3 * fac5;
        let inv3 = vec0 * fac2 - vec1 * fac4 + vec2 * fac5;

        let (one, neg) = (T::ONE, -T::ONE);
        let sign_a = Vector([one, neg, one, neg]);
        let sign_b = Vector([neg, one, neg, one]);

        Self([inv0 * sign_a, inv1 * sign_b, inv2 * sign_a, inv3 * sign_b])
    }

    /// Creates a 4x4 rotation matrix rotating by `angle` radians around `axis`.
    ///
    /// This is the 3x3 [`Matrix::angle_axis`] rotation with an identity translation part.
    pub fn angle_axis(angle: T, axis: Vec3<T>) -> Self
    where
        T: Float,
    {
        let mut rot = Mat3::angle_axis(angle, axis).resize::<4, 4>();
        rot[(3, 3)] = T::ONE;
        rot
    }

    /// Adds `offset` to the translation part (column 3) of this affine transform.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// let mut m = Mat4::identity();
    /// m.translate(vec3(1, 2, 3));
    /// assert_eq!(m * vec4(0, 0, 0, 1), vec4(1, 2, 3, 1));
    /// ```
    pub fn translate(&mut self, offset: Vec3<T>) -> &mut Self {
        self.0[3] = self.0[3] + offset.extend(T::ZERO);
        self
    }

    /// Returns a copy of this matrix with `offset` added to its translation part.
    pub fn translated(mut self, offset: Vec3<T>) -> Self {
        self.translate(offset);
        self
    }

    /// Multiplies the first three columns of this matrix by the corresponding component of
    /// `factors`.
    ///
    /// For a transform without rotation this scales along the X, Y and Z axes. The translation
    /// part is unaffected.
    pub fn scale(&mut self, factors: Vec3<T>) -> &mut Self {
        for (col, factor) in self.0.iter_mut().zip(factors) {
            *col = *col * factor;
        }
        self
    }

    /// Returns a copy of this matrix with the first three columns scaled by `factors`.
    pub fn scaled(mut self, factors: Vec3<T>) -> Self {
        self.scale(factors);
        self
    }

    /// Applies a rotation by `angle` radians around `axis` to the linear part of this transform.
    ///
    /// Equivalent to `*self = *self * Mat4::angle_axis(angle, axis)`, so the rotation is applied
    /// before the existing transform. Column 3 is left untouched.
    pub fn rotate(&mut self, angle: T, axis: Vec3<T>) -> &mut Self
    where
        T: Float,
    {
        let rot = Mat3::angle_axis(angle, axis);
        let [c0, c1, c2, c3] = self.0;
        let rotated = |j: usize| c0 * rot[j][0] + c1 * rot[j][1] + c2 * rot[j][2];
        self.0 = [rotated(0), rotated(1), rotated(2), c3];
        self
    }

    /// Returns a copy of this matrix with a rotation applied to its linear part.
    ///
    /// See [`Matrix::rotate`].
    pub fn rotated(mut self, angle: T, axis: Vec3<T>) -> Self
    where
        T: Float,
    {
        self.rotate(angle, axis);
        self
    }
}

impl<T, const R: usize, const C: usize> Default for Matrix<T, R, C>
where
    T: Default,
{
    fn default() -> Self {
        Self::from_fn(|_, _| T::default())
    }
}

impl<T, const R: usize, const C: usize> From<[Vector<T, R>; C]> for Matrix<T, R, C> {
    #[inline]
    fn from(columns: [Vector<T, R>; C]) -> Self {
        Self(columns)
    }
}

// Row-wise output, matching how matrices are written down on paper.
struct FormatRow<'a, T, const R: usize, const C: usize> {
    mat: &'a Matrix<T, R, C>,
    row: usize,
    fmt: fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
}

impl<'a, T, const R: usize, const C: usize> fmt::Debug for FormatRow<'a, T, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for col in 0..C {
            if col != 0 {
                f.write_str(", ")?;
            }
            (self.fmt)(&self.mat[(self.row, col)], f)?;
        }
        f.write_str("]")
    }
}

impl<T, const R: usize, const C: usize> Matrix<T, R, C> {
    fn fmt_rows(
        &self,
        f: &mut fmt::Formatter<'_>,
        fmt: fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
    ) -> fmt::Result {
        let mut list = f.debug_list();
        for row in 0..R {
            list.entry(&FormatRow {
                mat: self,
                row,
                fmt,
            });
        }
        list.finish()
    }
}

impl<T: fmt::Debug, const R: usize, const C: usize> fmt::Debug for Matrix<T, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_rows(f, <T as fmt::Debug>::fmt)
    }
}

impl<T: fmt::Display, const R: usize, const C: usize> fmt::Display for Matrix<T, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_rows(f, <T as fmt::Display>::fmt)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use crate::{assert_approx_eq, vec2, vec3, vec4, Vec3d, Vec4d};

    use super::*;

    fn random_invertible<const N: usize>(rng: &mut fastrand::Rng) -> Matrix<f64, N, N> {
        // Strictly diagonally dominant matrices are never singular.
        Matrix::from_fn(|row, col| {
            let elem = rng.f64() * 2.0 - 1.0;
            if row == col {
                elem + N as f64 * 2.0
            } else {
                elem
            }
        })
    }

    #[test]
    fn from_rows_columns() {
        assert_eq!(
            Mat2x3::from_rows([[1, 2, 3], [4, 5, 6]]),
            Mat2x3::from_columns([[1, 4], [2, 5], [3, 6]]),
        );
        let m = Mat2x3::from_rows([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(m.row(1), vec3(4, 5, 6));
        assert_eq!(m.column(2), vec2(3, 6));
    }

    #[test]
    fn diagonal() {
        let mat = Matrix::from_diagonal([1, 2]);

        #[rustfmt::skip]
        assert_eq!(mat, Matrix::from_rows([
            [1, 0],
            [0, 2],
        ]));

        assert_eq!(mat.into_diagonal(), [1, 2]);
        assert_eq!(mat.trace(), 3);
    }

    #[test]
    fn fmt() {
        let mat = Matrix::from_rows([[0, 1], [2, 3]]);

        assert_eq!(format!("{:?}", mat), "[[0, 1], [2, 3]]");
        assert_eq!(format!("{}", Mat2f::IDENTITY), "[[1, 0], [0, 1]]");

        // `#` puts each row on its own line, but not each element.
        assert_eq!(
            format!("{:#?}", mat),
            "
[
    [0, 1],
    [2, 3],
]
"
            .trim()
        );
    }

    #[test]
    fn constants() {
        assert_eq!(format!("{:?}", Mat2f::ZERO), "[[0.0, 0.0], [0.0, 0.0]]");
        assert_eq!(format!("{:?}", Mat2f::IDENTITY), "[[1.0, 0.0], [0.0, 1.0]]");
        assert_eq!(
            Mat2x3::<i32>::IDENTITY,
            Matrix::from_rows([[1, 0, 0], [0, 1, 0]])
        );
        assert_eq!(Mat4f::identity(), Mat4f::IDENTITY);
        assert_eq!(Mat3f::default(), Mat3f::ZERO);
    }

    #[rustfmt::skip]
    #[test]
    fn resize() {
        let mat = Matrix::from_rows([
            [1, 2],
            [3, 4],
        ]);

        let larger = mat.resize::<3, 3>();
        assert_eq!(larger, Matrix::from_rows([
            [1, 2, 0],
            [3, 4, 0],
            [0, 0, 0],
        ]));

        let smaller = mat.resize::<1, 2>();
        assert_eq!(smaller, Matrix::from_rows([
            [1, 2]
        ]));
    }

    #[test]
    fn cast() {
        let m = Matrix::from_rows([[1.5f32, -2.5], [3.0, 4.9]]);
        assert_eq!(m.cast::<i32>(), Matrix::from_rows([[1, -2], [3, 4]]));
    }

    #[test]
    fn transpose() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..20 {
            let m = Mat4x3::from_fn(|_, _| rng.f32());
            assert_eq!(m.transposed().transposed(), m);
            assert_eq!(m.transposed()[(2, 3)], m[(3, 2)]);
        }

        let mut m = Matrix::from_rows([[1, 2], [3, 4]]);
        m.transpose();
        assert_eq!(m, Matrix::from_rows([[1, 3], [2, 4]]));
    }

    #[test]
    fn raw_access() {
        let m = Mat3::from_fn(|row, col| (col * 3 + row) as f32);
        assert_eq!(m.as_slice(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(bytemuck::cast_slice::<_, f32>(&[m]), m.as_slice());

        let mut m = Mat2::<i32>::ZERO;
        m.as_mut_slice()[1] = 5;
        assert_eq!(m[(1, 0)], 5);
        assert_eq!(m.get(1, 0), Some(&5));
        assert_eq!(m.get(2, 0), None);
        *m.get_mut(0, 1).unwrap() = 6;
        assert_eq!(m[1][0], 6);
    }

    #[test]
    fn determinate() {
        assert_eq!(Mat2f::ZERO.determinate(), 0.0);
        assert_eq!(Mat3f::ZERO.determinate(), 0.0);
        assert_eq!(Mat4f::ZERO.determinate(), 0.0);
        assert_eq!(Mat2f::IDENTITY.determinate(), 1.0);
        assert_eq!(Mat3f::IDENTITY.determinate(), 1.0);
        assert_eq!(Mat4f::identity().determinate(), 1.0);

        #[rustfmt::skip]
        let testmat = Matrix::from_rows([
            [-2, -1,  2],
            [ 2,  1,  4],
            [-3,  3, -1],
        ]);
        assert_eq!(testmat.determinate(), 54);
        assert_eq!(testmat.transposed().determinate(), 54);

        #[rustfmt::skip]
        let testmat = Matrix::from_rows([
            [1, 0, 2, -1],
            [3, 0, 0,  5],
            [2, 1, 4, -3],
            [1, 0, 5,  0],
        ]);
        assert_eq!(testmat.determinate(), 30);
        assert_eq!(testmat.transposed().determinate(), 30);

        let diag = Matrix::from_diagonal([2.0, 3.0, 4.0, 0.5]);
        assert_eq!(diag.determinate(), 12.0);
    }

    #[test]
    fn determinate_2x2() {
        let m = Matrix::from_columns([[1.0, 3.0], [2.0, 4.0]]);
        assert_eq!(m.determinate(), -2.0);
        assert!(m.is_invertible());
        assert_approx_eq!(m.inversed(), Matrix::from_rows([[-2.0, 1.0], [1.5, -0.5]]));
    }

    #[test]
    fn adjugate_matches_determinate() {
        let mut rng = fastrand::Rng::with_seed(99);
        for _ in 0..20 {
            let m = Mat4::from_fn(|_, _| rng.f64() * 4.0 - 2.0);
            let det = m.column(0).dot(m.adjugate().row(0));
            assert_approx_eq!(det, m.determinate()).abs(1e-9);

            let m = Mat3::from_fn(|_, _| rng.f64() * 4.0 - 2.0);
            assert_approx_eq!(m * m.adjugate(), Mat3::identity() * m.determinate()).abs(1e-9);
        }
    }

    #[test]
    fn identity_inverse() {
        assert_eq!(Mat4f::identity().inversed(), Mat4f::identity());
        assert_eq!(Mat3f::identity().inversed(), Mat3f::identity());
        assert_eq!(Mat2f::identity().inversed(), Mat2f::identity());
    }

    #[test]
    fn inverse() {
        let mut rng = fastrand::Rng::with_seed(1234);
        for _ in 0..50 {
            let m = random_invertible::<2>(&mut rng);
            assert_approx_eq!(m.inversed() * m, Mat2::identity()).abs(1e-12);
            assert_approx_eq!(m.inversed().inversed(), m).abs(1e-12);

            let m = random_invertible::<3>(&mut rng);
            assert_approx_eq!(m.inversed() * m, Mat3::identity()).abs(1e-12);
            assert_approx_eq!(m.inversed().inversed(), m).abs(1e-12);

            let m = random_invertible::<4>(&mut rng);
            assert_approx_eq!(m.inversed() * m, Mat4::identity()).abs(1e-12);
            assert_approx_eq!(m * m.inversed(), Mat4::identity()).abs(1e-12);
            assert_approx_eq!(m.inversed().inversed(), m).abs(1e-12);
        }
    }

    #[test]
    fn inverse_in_place() {
        let m = Mat4d::IDENTITY
            .translated(vec3(1.0, -2.0, 3.0))
            .rotated(0.7, vec3(1.0, 1.0, 0.0));

        let mut inv = m;
        inv.inverse();
        assert_approx_eq!(inv, m.inversed());

        let mut with_det = m;
        with_det.inverse_with(m.determinate());
        assert_approx_eq!(with_det, inv);
        assert_approx_eq!(m.inversed_with(m.determinate()), inv);

        // The translation of a rigid transform is undone by the inverse.
        assert_approx_eq!(inv * vec4(1.0, -2.0, 3.0, 1.0), Vec4d::W).abs(1e-12);
    }

    #[test]
    fn singular() {
        let m = Mat2d::from_rows([[1.0, 2.0], [2.0, 4.0]]);
        assert!(!m.is_invertible());
        assert_eq!(m.try_inversed(), None);
        assert!(m.inversed().as_slice().iter().any(|e| !e.is_finite()));

        let almost = Mat2d::from_rows([[1.0, 2.0], [2.0, 4.0 + 1e-12]]);
        assert!(almost.is_invertible());
        assert!(!almost.is_invertible_within(1e-9));
        assert!(almost.try_inversed().is_some());

        let m3 = Mat3d::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        assert!(!m3.is_invertible_within(1e-9));
    }

    #[test]
    fn angle_axis() {
        let mut rng = fastrand::Rng::with_seed(42);
        for _ in 0..50 {
            let axis = Vec3d::from_fn(|_| rng.f64() * 2.0 - 1.0).normalized();
            let angle = rng.f64() * 2.0 * PI - PI;
            let rot = Mat3::angle_axis(angle, axis);
            assert_approx_eq!(rot * axis, axis).abs(1e-12);
            assert_approx_eq!(rot.determinate(), 1.0).abs(1e-12);
            assert_approx_eq!(rot.transposed() * rot, Mat3::identity()).abs(1e-12);

            // The axis does not need to be normalized.
            assert_approx_eq!(Mat3::angle_axis(angle, axis * 3.0), rot).abs(1e-12);
        }

        let rot = Mat3d::angle_axis(FRAC_PI_2, Vec3d::Y);
        assert_approx_eq!(rot * Vec3d::Z, Vec3d::X).abs(1e-12);

        let rot4 = Mat4d::angle_axis(FRAC_PI_2, Vec3d::Y);
        assert_eq!(rot4.resize::<3, 3>(), rot);
        assert_eq!(rot4.row(3), Vec4d::W);
        assert_eq!(rot4.column(3), Vec4d::W);
    }

    #[test]
    fn affine() {
        let m = Mat4d::identity()
            .translated(vec3(1.0, 2.0, 3.0))
            .scaled(vec3(2.0, 3.0, 4.0));
        assert_eq!(m * vec4(1.0, 1.0, 1.0, 1.0), vec4(3.0, 5.0, 7.0, 1.0));
        assert_eq!(m * vec4(1.0, 1.0, 1.0, 0.0), vec4(2.0, 3.0, 4.0, 0.0));

        let mut t = Mat4::<i32>::identity();
        t.translate(vec3(1, 0, 0)).translate(vec3(0, 2, 0));
        assert_eq!(t.column(3), vec4(1, 2, 0, 1));
    }

    #[test]
    fn rotate() {
        let m = Mat4d::identity()
            .translated(vec3(5.0, 0.0, 0.0))
            .scaled(vec3(1.0, 2.0, 1.0));
        let axis = vec3(0.3, -1.0, 0.2);
        assert_approx_eq!(m.rotated(1.2, axis), m * Mat4::angle_axis(1.2, axis)).abs(1e-12);
        assert_eq!(m.rotated(1.2, axis).column(3), m.column(3));

        let r = Mat4d::identity().rotated(FRAC_PI_2, Vec3d::Z);
        assert_approx_eq!(r * vec4(1.0, 0.0, 0.0, 1.0), vec4(0.0, 1.0, 0.0, 1.0)).abs(1e-12);
    }

    #[test]
    fn rotation_2d() {
        let cw = Mat2f::rotation_clockwise(0.0);
        assert_eq!(cw, cw.inversed());

        let ccw = Mat2f::rotation_counterclockwise(0.0);
        assert_eq!(ccw, cw);

        let cw = Mat2f::rotation_clockwise(std::f32::consts::PI);
        assert_approx_eq!(cw, cw.inversed()).abs(1e-6);

        let ccw = Mat2d::rotation_counterclockwise(0.4);
        assert_approx_eq!(ccw.inversed(), Mat2d::rotation_clockwise(0.4)).abs(1e-12);
    }
}
