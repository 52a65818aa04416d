mod ops;
mod view;

use std::fmt;

use crate::{vec3, vec4, Cast, Float, Mat3, Mat4, Matrix, Number, One, Sqrt, Vec3, Vector, Zero};

pub type Quatf = Quaternion<f32>;
pub type Quatd = Quaternion<f64>;

/// A quaternion consisting of a real part `w` and 3 imaginary parts `x`, `y` and `z`.
///
/// Unit-length quaternions ("*versors*") are used to represent rotations in 3D space. Multiplying
/// a [`Vec3`] with a unit quaternion rotates the vector, and multiplying two quaternions composes
/// their rotations (`q1 * q2` applies `q2` first).
///
/// The components are stored in `(w, x, y, z)` order, real part first, and are accessible as
/// fields `q.w`, `q.x`, `q.y` and `q.z`.
///
/// None of the operations check for unit length. Rotating with a quaternion that is not
/// normalized will also scale the result.
#[derive(Clone, Copy, Hash)]
#[repr(transparent)]
pub struct Quaternion<T> {
    vec: Vector<T, 4>,
}

unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for Quaternion<T> {}
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for Quaternion<T> {}

impl<T: Zero + One> Quaternion<T> {
    /// The multiplicative identity.
    ///
    /// This is the rotation that leaves every vector unchanged.
    pub const IDENTITY: Self = Self {
        vec: vec4(T::ONE, T::ZERO, T::ZERO, T::ZERO),
    };
}

impl<T> Quaternion<T> {
    /// Creates a quaternion from its real part `w` and the imaginary parts `x`, `y` and `z`.
    #[inline]
    pub const fn from_components(w: T, x: T, y: T, z: T) -> Self {
        Self {
            vec: vec4(w, x, y, z),
        }
    }

    /// Creates a quaternion with real part `w` and all imaginary parts set to zero.
    pub fn from_scalar(w: T) -> Self
    where
        T: Zero,
    {
        Self::from_components(w, T::ZERO, T::ZERO, T::ZERO)
    }

    /// Creates a quaternion from a 4-dimensional [`Vector`] holding `(w, x, y, z)`.
    #[inline]
    pub fn from_vec(vec: Vector<T, 4>) -> Self {
        Self { vec }
    }

    /// Returns the components as a [`Vector`] in `(w, x, y, z)` order.
    #[inline]
    pub fn into_vec(self) -> Vector<T, 4> {
        self.vec
    }

    #[inline]
    pub fn as_vec(&self) -> &Vector<T, 4> {
        &self.vec
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.vec.as_slice()
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.vec.as_ptr()
    }

    /// Converts each component to `U` with `as`-style semantics.
    pub fn cast<U>(self) -> Quaternion<U>
    where
        T: Cast<U>,
    {
        Quaternion {
            vec: self.vec.cast(),
        }
    }

    /// Returns the imaginary part `(x, y, z)`.
    pub fn imaginary(&self) -> Vec3<T>
    where
        T: Copy,
    {
        let [_, x, y, z] = self.vec.into_array();
        vec3(x, y, z)
    }

    /// Computes the 4-dimensional dot product of `self` and `other`.
    pub fn dot(self, other: Self) -> T
    where
        T: Number,
    {
        self.vec.dot(other.vec)
    }

    /// Returns the squared length of this quaternion.
    pub fn sqr_norm(&self) -> T
    where
        T: Number,
    {
        self.vec.sqr_norm()
    }

    /// Returns the length of this quaternion.
    ///
    /// Only quaternions of length one represent pure rotations.
    #[doc(alias = "norm", alias = "magnitude")]
    pub fn length(&self) -> T
    where
        T: Number + Sqrt,
    {
        self.vec.length()
    }

    /// Scales this quaternion to unit length in place.
    ///
    /// A zero quaternion results in NaN components.
    pub fn normalize(&mut self) -> &mut Self
    where
        T: Number + Sqrt,
    {
        self.vec.normalize();
        self
    }

    /// Returns a copy of this quaternion scaled to unit length.
    pub fn normalized(mut self) -> Self
    where
        T: Number + Sqrt,
    {
        self.normalize();
        self
    }

    /// Negates the imaginary part in place.
    pub fn conjugate(&mut self) -> &mut Self
    where
        T: Number,
    {
        *self = self.conjugated();
        self
    }

    /// Returns the conjugate `(w, -x, -y, -z)`.
    ///
    /// For unit quaternions, this is the inverse rotation.
    pub fn conjugated(self) -> Self
    where
        T: Number,
    {
        let [w, x, y, z] = self.vec.into_array();
        Self::from_components(w, -x, -y, -z)
    }

    /// Replaces this quaternion with its multiplicative inverse.
    pub fn inverse(&mut self) -> &mut Self
    where
        T: Number,
    {
        *self = self.inversed();
        self
    }

    /// Returns the multiplicative inverse, the conjugate divided by the squared norm.
    ///
    /// The zero quaternion has no inverse and produces non-finite components.
    pub fn inversed(self) -> Self
    where
        T: Number,
    {
        let inv_sqr_norm = T::ONE / self.sqr_norm();
        Self {
            vec: self.conjugated().vec * inv_sqr_norm,
        }
    }

    /// Converts this quaternion into a 3x3 rotation matrix.
    pub fn to_mat3(self) -> Mat3<T>
    where
        T: Number,
    {
        let [w, x, y, z] = self.vec.into_array();
        let two = T::ONE + T::ONE;
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);

        #[rustfmt::skip]
        let mat = Matrix::from_columns([
            [T::ONE - two * (yy + zz), two * (xy + wz),          two * (xz - wy)         ],
            [two * (xy - wz),          T::ONE - two * (xx + zz), two * (yz + wx)         ],
            [two * (xz + wy),          two * (yz - wx),          T::ONE - two * (xx + yy)],
        ]);
        mat
    }

    /// Converts this quaternion into a 4x4 rotation matrix without translation.
    pub fn to_mat4(self) -> Mat4<T>
    where
        T: Number,
    {
        let mut mat: Mat4<T> = self.to_mat3().resize();
        mat[(3, 3)] = T::ONE;
        mat
    }
}

/// Rotations.
impl<T: Float> Quaternion<T> {
    /// Creates a rotation of `angle` radians around `axis`.
    ///
    /// Unlike [`Matrix::angle_axis`], `axis` is used as-is and has to be normalized by the caller
    /// to get a unit quaternion.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// use std::f32::consts::PI;
    ///
    /// let q = Quaternion::angle_axis(PI, Vec3f::Z);
    /// assert_approx_eq!(q * Vec3f::X, -Vec3f::X).abs(1e-6);
    /// ```
    pub fn angle_axis(angle: T, axis: Vec3<T>) -> Self {
        let (sin, cos) = (angle * T::from_f64(0.5)).sin_cos();
        let [x, y, z] = (axis * sin).into_array();
        Self::from_components(cos, x, y, z)
    }

    /// Creates a rotation of `angle` radians around the X axis.
    pub fn from_rotation_x(angle: T) -> Self {
        Self::angle_axis(angle, Vec3::X)
    }

    /// Creates a rotation of `angle` radians around the Y axis.
    pub fn from_rotation_y(angle: T) -> Self {
        Self::angle_axis(angle, Vec3::Y)
    }

    /// Creates a rotation of `angle` radians around the Z axis.
    pub fn from_rotation_z(angle: T) -> Self {
        Self::angle_axis(angle, Vec3::Z)
    }

    /// Creates a rotation from Euler angles in radians.
    ///
    /// The result rotates around X by `pitch` first, then around Y by `yaw`, then around Z by
    /// `roll`. [`Quaternion::pitch`], [`Quaternion::yaw`] and [`Quaternion::roll`] recover the
    /// angles (outside of gimbal lock, and up to equivalent representations).
    #[doc(alias = "euler")]
    pub fn from_euler_angles(pitch: T, yaw: T, roll: T) -> Self {
        let half = T::from_f64(0.5);
        let (sx, cx) = (pitch * half).sin_cos();
        let (sy, cy) = (yaw * half).sin_cos();
        let (sz, cz) = (roll * half).sin_cos();

        Self::from_components(
            cx * cy * cz + sx * sy * sz,
            sx * cy * cz - cx * sy * sz,
            cx * sy * cz + sx * cy * sz,
            cx * cy * sz - sx * sy * cz,
        )
    }

    /// Creates a rotation from a vector of Euler angles `(pitch, yaw, roll)`.
    pub fn from_euler_vec(angles: Vec3<T>) -> Self {
        let [pitch, yaw, roll] = angles.into_array();
        Self::from_euler_angles(pitch, yaw, roll)
    }

    /// Returns the rotation around the X axis, in radians.
    pub fn pitch(&self) -> T {
        let [w, x, y, z] = self.vec.into_array();
        let two = T::ONE + T::ONE;
        let sin = two * (y * z + w * x);
        let cos = w * w - x * x - y * y + z * z;
        if sin.abs() < T::EPSILON && cos.abs() < T::EPSILON {
            // Gimbal lock, atan2(0, 0) is undefined.
            return two * x.atan2(w);
        }
        sin.atan2(cos)
    }

    /// Returns the rotation around the Y axis, in radians, in the range `[-π/2, π/2]`.
    pub fn yaw(&self) -> T {
        let [w, x, y, z] = self.vec.into_array();
        let two = T::ONE + T::ONE;
        (-two * (x * z - w * y)).clamp(-T::ONE, T::ONE).asin()
    }

    /// Returns the rotation around the Z axis, in radians.
    pub fn roll(&self) -> T {
        let [w, x, y, z] = self.vec.into_array();
        let two = T::ONE + T::ONE;
        let sin = two * (x * y + w * z);
        let cos = w * w + x * x - y * y - z * z;
        if sin.abs() < T::EPSILON && cos.abs() < T::EPSILON {
            return T::ZERO;
        }
        sin.atan2(cos)
    }

    /// Returns `(pitch, yaw, roll)`, the inverse of [`Quaternion::from_euler_vec`].
    pub fn euler_angles(&self) -> Vec3<T> {
        vec3(self.pitch(), self.yaw(), self.roll())
    }

    /// Extracts the rotation from the upper-left 3x3 part of `mat`.
    ///
    /// `mat` should be a pure rotation matrix (orthonormal, determinant 1). This is not checked,
    /// and other matrices yield meaningless results. Matrices smaller than 3x3 are rejected at
    /// compile time.
    pub fn from_matrix<const N: usize>(mat: Matrix<T, N, N>) -> Self {
        const { assert!(N >= 3, "rotation matrices need at least 3 dimensions") }

        let m = |col: usize, row: usize| mat[(row, col)];

        let four_w_sqr_minus_1 = m(0, 0) + m(1, 1) + m(2, 2);
        let four_x_sqr_minus_1 = m(0, 0) - m(1, 1) - m(2, 2);
        let four_y_sqr_minus_1 = m(1, 1) - m(0, 0) - m(2, 2);
        let four_z_sqr_minus_1 = m(2, 2) - m(0, 0) - m(1, 1);

        // Pick the largest component to divide by, for numerical stability.
        let mut biggest_index = 0;
        let mut biggest = four_w_sqr_minus_1;
        for (index, candidate) in [four_x_sqr_minus_1, four_y_sqr_minus_1, four_z_sqr_minus_1]
            .into_iter()
            .enumerate()
        {
            if candidate > biggest {
                biggest = candidate;
                biggest_index = index + 1;
            }
        }

        let biggest_val = (biggest + T::ONE).sqrt() * T::from_f64(0.5);
        let mult = T::from_f64(0.25) / biggest_val;

        match biggest_index {
            0 => Self::from_components(
                biggest_val,
                (m(1, 2) - m(2, 1)) * mult,
                (m(2, 0) - m(0, 2)) * mult,
                (m(0, 1) - m(1, 0)) * mult,
            ),
            1 => Self::from_components(
                (m(1, 2) - m(2, 1)) * mult,
                biggest_val,
                (m(0, 1) + m(1, 0)) * mult,
                (m(2, 0) + m(0, 2)) * mult,
            ),
            2 => Self::from_components(
                (m(2, 0) - m(0, 2)) * mult,
                (m(0, 1) + m(1, 0)) * mult,
                biggest_val,
                (m(1, 2) + m(2, 1)) * mult,
            ),
            _ => Self::from_components(
                (m(0, 1) - m(1, 0)) * mult,
                (m(2, 0) + m(0, 2)) * mult,
                (m(1, 2) + m(2, 1)) * mult,
                biggest_val,
            ),
        }
    }

    /// Creates a rotation that orients the `-Z` axis along `direction`, keeping `up` upwards.
    ///
    /// This is the camera convention of a right-handed coordinate system: the returned rotation
    /// maps `-Z` onto `direction` and `Y` into the plane spanned by `direction` and `up`.
    /// `direction` should be normalized and must not be parallel to `up`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ej_linalg::*;
    /// let q = Quaternion::look_at(Vec3f::X, Vec3f::Y);
    /// assert_approx_eq!(q * -Vec3f::Z, Vec3f::X).abs(1e-6);
    /// ```
    pub fn look_at(direction: Vec3<T>, up: Vec3<T>) -> Self {
        let forward = -direction;
        let right = up.cross(forward);
        let right = right * (T::ONE / right.sqr_norm().max(T::from_f64(1e-5)).sqrt());
        let up = forward.cross(right);

        Self::from_matrix(Mat3::from_columns([right, up, forward]))
    }

    /// Returns the shortest rotation that turns the unit vector `from` into the unit vector
    /// `to`.
    ///
    /// If the vectors point in opposite directions, the rotation is by π around some axis
    /// perpendicular to `from`.
    pub fn rotation_between(from: Vec3<T>, to: Vec3<T>) -> Self {
        let cos_theta = from.dot(to);

        if cos_theta >= T::ONE - T::EPSILON {
            return Self::IDENTITY;
        }

        if cos_theta < T::EPSILON - T::ONE {
            let mut axis = Vec3::Z.cross(from);
            if axis.sqr_norm() < T::EPSILON {
                axis = Vec3::X.cross(from);
            }
            return Self::angle_axis(T::PI, axis.normalized());
        }

        let axis = from.cross(to);
        let s = ((T::ONE + cos_theta) * (T::ONE + T::ONE)).sqrt();
        let inv_s = T::ONE / s;
        let [x, y, z] = (axis * inv_s).into_array();
        Self::from_components(s * T::from_f64(0.5), x, y, z)
    }
}

impl<T: Zero + One> Default for Quaternion<T> {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<T> From<Vector<T, 4>> for Quaternion<T> {
    #[inline]
    fn from(vec: Vector<T, 4>) -> Self {
        Self::from_vec(vec)
    }
}

impl<T> From<Quaternion<T>> for Vector<T, 4> {
    #[inline]
    fn from(quat: Quaternion<T>) -> Self {
        quat.into_vec()
    }
}

impl<T: Number> From<Quaternion<T>> for Mat3<T> {
    #[inline]
    fn from(quat: Quaternion<T>) -> Self {
        quat.to_mat3()
    }
}

impl<T: Number> From<Quaternion<T>> for Mat4<T> {
    #[inline]
    fn from(quat: Quaternion<T>) -> Self {
        quat.to_mat4()
    }
}

impl<T: fmt::Debug> fmt::Debug for Quaternion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quaternion")
            .field("w", &self.w)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("z", &self.z)
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for Quaternion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quaternion{}", self.vec)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use crate::{assert_approx_eq, vec3, Mat3, Mat4, Quatd, Quaternion, Vec3d, Vec3f};

    fn random_unit(rng: &mut fastrand::Rng) -> Quatd {
        Quaternion::from_components(
            rng.f64() - 0.5,
            rng.f64() - 0.5,
            rng.f64() - 0.5,
            rng.f64() - 0.5,
        )
        .normalized()
    }

    #[test]
    fn identity() {
        let q = Quatd::default();
        assert_eq!(q, Quaternion::IDENTITY);
        assert_eq!(q.to_mat3(), Mat3::IDENTITY);
        assert_eq!(q.to_mat4(), Mat4::IDENTITY);
        assert_eq!(q * vec3(1.0, 2.0, 3.0), vec3(1.0, 2.0, 3.0));
        assert_eq!(Quatd::from_scalar(1.0), q);
    }

    #[test]
    fn fields() {
        let mut q = Quaternion::from_components(1, 2, 3, 4);
        assert_eq!((q.w, q.x, q.y, q.z), (1, 2, 3, 4));
        q.w = 5;
        assert_eq!(q.into_vec(), [5, 2, 3, 4]);
        assert_eq!(q.imaginary(), vec3(2, 3, 4));
        assert_eq!(q.as_slice(), &[5, 2, 3, 4]);
    }

    #[test]
    fn fmt() {
        let q = Quaternion::from_components(1, 0, -1, 0);
        assert_eq!(format!("{q}"), "Quaternion(1, 0, -1, 0)");
        assert_eq!(
            format!("{q:?}"),
            "Quaternion { w: 1, x: 0, y: -1, z: 0 }"
        );
    }

    #[test]
    fn rotate_half_turn() {
        let q = Quaternion::angle_axis(std::f32::consts::PI, Vec3f::Z);
        assert_approx_eq!(q * vec3(1.0, 0.0, 0.0), vec3(-1.0, 0.0, 0.0)).abs(1e-6);
    }

    #[test]
    fn axis_rotations_match_matrices() {
        let angle = 0.7;
        for (q, axis) in [
            (Quatd::from_rotation_x(angle), Vec3d::X),
            (Quatd::from_rotation_y(angle), Vec3d::Y),
            (Quatd::from_rotation_z(angle), Vec3d::Z),
        ] {
            assert_approx_eq!(q.to_mat3(), Mat3::angle_axis(angle, axis)).abs(1e-12);
            assert_approx_eq!(Mat4::from(q), Mat4::angle_axis(angle, axis)).abs(1e-12);
        }
    }

    #[test]
    fn conjugate_and_inverse() {
        let q = Quaternion::from_components(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q.conjugated(), Quaternion::from_components(1.0, -2.0, -3.0, -4.0));
        assert_approx_eq!(q * q.inversed(), Quatd::IDENTITY).abs(1e-12);
        assert_approx_eq!(q.inversed() * q, Quatd::IDENTITY).abs(1e-12);

        let mut r = q;
        r.inverse().inverse();
        assert_approx_eq!(r, q).abs(1e-12);

        let mut r = q;
        r.conjugate();
        assert_eq!(r, q.conjugated());

        let unit = q.normalized();
        assert_approx_eq!(unit.inversed(), unit.conjugated()).abs(1e-12);
    }

    #[test]
    fn norms() {
        let q = Quaternion::from_components(1.0, 2.0, 2.0, 4.0);
        assert_eq!(q.sqr_norm(), 25.0);
        assert_eq!(q.length(), 5.0);
        assert_eq!(q.dot(Quatd::IDENTITY), 1.0);
        assert_approx_eq!(q.normalized().length(), 1.0);
    }

    #[test]
    fn matrix_round_trip() {
        let mut rng = fastrand::Rng::with_seed(0x5eed);
        for _ in 0..100 {
            let q = random_unit(&mut rng);
            let back = Quaternion::from_matrix(q.to_mat3());
            assert_approx_eq!(Quaternion::from_matrix(q.to_mat4()), back).abs(1e-9);

            // `q` and `-q` encode the same rotation.
            let back = if back.dot(q) < 0.0 { -back } else { back };
            assert_approx_eq!(back, q).abs(1e-9);
        }
    }

    #[test]
    fn from_matrix_picks_each_branch() {
        for q in [
            Quatd::IDENTITY,
            Quatd::from_rotation_x(PI),
            Quatd::from_rotation_y(PI),
            Quatd::from_rotation_z(PI),
        ] {
            let back = Quaternion::from_matrix(q.to_mat3());
            assert_approx_eq!(back.dot(q).abs(), 1.0).abs(1e-12);
        }
    }

    #[test]
    fn euler_round_trip() {
        let mut rng = fastrand::Rng::with_seed(0xe1e7);
        for _ in 0..100 {
            // Stay clear of yaw = ±π/2 (gimbal lock).
            let angles = vec3(
                (rng.f64() - 0.5) * 2.0 * PI * 0.95,
                (rng.f64() - 0.5) * PI * 0.9,
                (rng.f64() - 0.5) * 2.0 * PI * 0.95,
            );
            let q = Quaternion::from_euler_vec(angles);
            assert_approx_eq!(q.euler_angles(), angles).abs(1e-9);

            let through_matrix = Quaternion::from_matrix(q.to_mat3());
            assert_approx_eq!(through_matrix.euler_angles(), angles).abs(1e-9);
        }
    }

    #[test]
    fn euler_order() {
        let (pitch, yaw, roll) = (0.3, -0.4, 1.1);
        let q = Quatd::from_euler_angles(pitch, yaw, roll);
        let expected = Quatd::from_rotation_z(roll)
            * Quatd::from_rotation_y(yaw)
            * Quatd::from_rotation_x(pitch);
        assert_approx_eq!(q, expected).abs(1e-12);
    }

    #[test]
    fn euler_gimbal_lock() {
        let q = Quatd::from_euler_angles(0.0, FRAC_PI_2, 0.0);
        assert_approx_eq!(q.yaw(), FRAC_PI_2).abs(1e-6);
        assert_eq!(q.roll(), 0.0);
        assert!(q.pitch().is_finite());
    }

    #[test]
    fn look_at() {
        assert_approx_eq!(
            Quatd::look_at(vec3(0.0, 0.0, -1.0), Vec3d::Y),
            Quatd::IDENTITY
        )
        .abs(1e-12);

        let mut rng = fastrand::Rng::with_seed(0x10c4);
        for _ in 0..50 {
            let dir = vec3(rng.f64() - 0.5, rng.f64() - 0.5, rng.f64() - 0.5).normalized();
            if dir.cross(Vec3d::Y).length() < 0.1 {
                continue;
            }
            let q = Quatd::look_at(dir, Vec3d::Y);
            assert_approx_eq!(q * -Vec3d::Z, dir).abs(1e-9);
            // The camera's up vector stays in the vertical plane through `dir`.
            assert_approx_eq!((q * Vec3d::Y).dot(dir.cross(Vec3d::Y)), 0.0).abs(1e-9);
        }
    }

    #[test]
    fn rotation_between() {
        let mut rng = fastrand::Rng::with_seed(0xba11);
        for _ in 0..50 {
            let from = vec3(rng.f64() - 0.5, rng.f64() - 0.5, rng.f64() - 0.5).normalized();
            let to = vec3(rng.f64() - 0.5, rng.f64() - 0.5, rng.f64() - 0.5).normalized();
            let q = Quaternion::rotation_between(from, to);
            assert_approx_eq!(q.length(), 1.0).abs(1e-9);
            assert_approx_eq!(q * from, to).abs(1e-9);
        }

        assert_eq!(
            Quaternion::rotation_between(Vec3d::X, Vec3d::X),
            Quatd::IDENTITY
        );
        for from in [Vec3d::X, Vec3d::Z] {
            let q = Quaternion::rotation_between(from, -from);
            assert_approx_eq!(q * from, -from).abs(1e-9);
        }
    }

    #[test]
    fn cast() {
        let q = Quatd::from_rotation_y(0.25);
        let f = q.cast::<f32>();
        assert_approx_eq!(f.w, q.w as f32);
        assert_approx_eq!(f.y, q.y as f32);
    }

    #[test]
    fn pod() {
        let qs = [Quaternion::from_components(1.0f32, 2.0, 3.0, 4.0)];
        let flat: &[f32] = bytemuck::cast_slice(&qs);
        assert_eq!(flat, &[1.0, 2.0, 3.0, 4.0]);
    }
}
