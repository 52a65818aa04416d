use std::{
    cmp::Ordering,
    ops::{Add, AddAssign, Div, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign},
};

use crate::{approx::ApproxEq, Number, Quaternion, Vec3};

/// Hamilton product.
///
/// The result represents the rotation `rhs` followed by the rotation `self`.
impl<T: Number> Mul for Quaternion<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let [w1, x1, y1, z1] = self.vec.into_array();
        let [w2, x2, y2, z2] = rhs.vec.into_array();

        Quaternion::from_components(
            w1 * w2 - x1 * x2 - y1 * y2 - z1 * z2,
            w1 * x2 + x1 * w2 + y1 * z2 - z1 * y2,
            w1 * y2 - x1 * z2 + y1 * w2 + z1 * x2,
            w1 * z2 + x1 * y2 - y1 * x2 + z1 * w2,
        )
    }
}

impl<T: Number> MulAssign for Quaternion<T> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

/// Rotates a vector (`q * v * q⁻¹` for unit quaternions).
impl<T: Number> Mul<Vec3<T>> for Quaternion<T> {
    type Output = Vec3<T>;

    fn mul(self, rhs: Vec3<T>) -> Self::Output {
        let u = self.imaginary();
        let uv = u.cross(rhs);
        let uuv = u.cross(uv);
        rhs + (uv * self.w + uuv) * (T::ONE + T::ONE)
    }
}

impl<T: Number> Mul<T> for Quaternion<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self::Output {
        Quaternion::from_vec(self.vec * rhs)
    }
}

impl<T: Number> Div<T> for Quaternion<T> {
    type Output = Self;

    fn div(self, rhs: T) -> Self::Output {
        Quaternion::from_vec(self.vec / rhs)
    }
}

impl<T: Number> Add for Quaternion<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Quaternion::from_vec(self.vec + rhs.vec)
    }
}

impl<T: Number> AddAssign for Quaternion<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Number> Sub for Quaternion<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Quaternion::from_vec(self.vec - rhs.vec)
    }
}

impl<T: Number> SubAssign for Quaternion<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Neg> Neg for Quaternion<T> {
    type Output = Quaternion<T::Output>;

    fn neg(self) -> Self::Output {
        Quaternion::from_vec(-self.vec)
    }
}

/// Component access in `(w, x, y, z)` order.
impl<T> Index<usize> for Quaternion<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.vec[index]
    }
}

impl<T> IndexMut<usize> for Quaternion<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.vec[index]
    }
}

impl<T, U> PartialEq<Quaternion<U>> for Quaternion<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Quaternion<U>) -> bool {
        self.vec == other.vec
    }
}

impl<T: Eq> Eq for Quaternion<T> {}

/// Lexicographic comparison in `(w, x, y, z)` order.
impl<T: PartialOrd> PartialOrd for Quaternion<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.vec.partial_cmp(&other.vec)
    }
}

impl<T: Ord> Ord for Quaternion<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.vec.cmp(&other.vec)
    }
}

impl<T: ApproxEq> ApproxEq for Quaternion<T> {
    type Tolerance = T::Tolerance;

    fn abs_diff_eq(&self, other: &Self, abs_tolerance: Self::Tolerance) -> bool {
        self.vec.abs_diff_eq(&other.vec, abs_tolerance)
    }

    fn rel_diff_eq(&self, other: &Self, rel_tolerance: Self::Tolerance) -> bool {
        self.vec.rel_diff_eq(&other.vec, rel_tolerance)
    }

    fn ulps_diff_eq(&self, other: &Self, ulps_tolerance: u32) -> bool {
        self.vec.ulps_diff_eq(&other.vec, ulps_tolerance)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use crate::{assert_approx_eq, vec3, Mat3, Quatd, Quaternion, Vec3d};

    #[test]
    fn hamilton_product() {
        let i = Quaternion::from_components(0, 1, 0, 0);
        let j = Quaternion::from_components(0, 0, 1, 0);
        let k = Quaternion::from_components(0, 0, 0, 1);
        let minus_one = Quaternion::from_components(-1, 0, 0, 0);

        assert_eq!(i * i, minus_one);
        assert_eq!(j * j, minus_one);
        assert_eq!(k * k, minus_one);
        assert_eq!(i * j, k);
        assert_eq!(j * k, i);
        assert_eq!(k * i, j);
        assert_eq!(j * i, -k);
    }

    #[test]
    fn composition_order() {
        let a = Quatd::from_rotation_z(FRAC_PI_2);
        let b = Quatd::from_rotation_x(FRAC_PI_2);
        let v = vec3(0.0, 1.0, 0.0);

        // `b` maps Y to Z, `a` leaves Z alone.
        assert_approx_eq!((a * b) * v, a * (b * v)).abs(1e-12);
        assert_approx_eq!((a * b) * v, Vec3d::Z).abs(1e-12);
        assert_approx_eq!((a * b).to_mat3(), a.to_mat3() * b.to_mat3()).abs(1e-12);

        let mut c = a;
        c *= b;
        assert_eq!(c, a * b);
    }

    #[test]
    fn rotate_vector_matches_matrix() {
        let q = Quatd::angle_axis(1.2, vec3(1.0, -2.0, 0.5).normalized());
        let v = vec3(0.3, 4.0, -1.0);
        assert_approx_eq!(q * v, q.to_mat3() * v).abs(1e-12);
        assert_approx_eq!(q * v, Mat3::from(q) * v).abs(1e-12);
        assert_approx_eq!((q * v).length(), v.length()).abs(1e-12);
    }

    #[test]
    fn elementwise() {
        let a = Quaternion::from_components(1.0, 2.0, 3.0, 4.0);
        let b = Quaternion::from_components(0.5, 0.5, 0.5, 0.5);
        assert_eq!(a + b, Quaternion::from_components(1.5, 2.5, 3.5, 4.5));
        assert_eq!(a - b, Quaternion::from_components(0.5, 1.5, 2.5, 3.5));
        assert_eq!(a * 2.0, Quaternion::from_components(2.0, 4.0, 6.0, 8.0));
        assert_eq!(a / 2.0, Quaternion::from_components(0.5, 1.0, 1.5, 2.0));
        assert_eq!(-b, Quaternion::from_components(-0.5, -0.5, -0.5, -0.5));

        let mut c = a;
        c += b;
        c -= a;
        assert_eq!(c, b);
    }

    #[test]
    fn index_and_order() {
        let mut q = Quaternion::from_components(1, 2, 3, 4);
        assert_eq!(q[0], 1);
        q[3] = 7;
        assert_eq!(q.z, 7);
        assert!(Quaternion::from_components(0, 9, 9, 9) < q);
        assert!(Quaternion::from_components(1, 2, 3, 8) > q);
    }
}
