//! Perspective and orthographic projection matrices.
//!
//! Both projections produce right-handed matrices mapping the view volume to clip space with
//! depth in `[-1, 1]`: the near plane ends up at depth -1, the far plane at +1.

use std::f32::consts::PI;

use anyhow::ensure;
use ej_linalg::{deg_to_rad, Mat4f, Matrix};

use crate::Change;

/// Perspective projection parameters and the resulting matrix.
#[derive(Debug, Clone)]
pub struct Perspective {
    fov_y: f32,
    aspect_ratio: f32,
    near: f32,
    far: f32,
    matrix: Mat4f,
    change: Change,
}

impl Default for Perspective {
    /// 45° vertical field of view, square aspect ratio, depth range `0.1..100`.
    fn default() -> Self {
        Self::new_unchecked(deg_to_rad(45.0), 1.0, 0.1, 100.0)
    }
}

impl Perspective {
    /// Creates a perspective projection.
    ///
    /// # Parameters
    ///
    /// - `fov_y` is the vertical field of view in radians, in the open range `(0, π)`.
    /// - `aspect_ratio` is the viewport's width divided by its height, and must be positive.
    /// - `near` and `far` are the distances of the clipping planes from the camera. They have to
    ///   differ.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the parameters is out of range or not finite.
    pub fn new(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> anyhow::Result<Self> {
        let this = Self::new_unchecked(fov_y, aspect_ratio, near, far);
        this.validate()?;
        Ok(this)
    }

    fn new_unchecked(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let mut this = Self {
            fov_y,
            aspect_ratio,
            near,
            far,
            matrix: Mat4f::IDENTITY,
            change: Change::Clean,
        };
        this.update();
        this
    }

    /// Checks that the current parameters describe a usable projection.
    pub fn validate(&self) -> anyhow::Result<()> {
        let Self {
            fov_y,
            aspect_ratio,
            near,
            far,
            ..
        } = *self;
        ensure!(
            fov_y.is_finite() && aspect_ratio.is_finite() && near.is_finite() && far.is_finite(),
            "perspective parameters must be finite (fov_y={fov_y}, aspect_ratio={aspect_ratio}, near={near}, far={far})"
        );
        ensure!(
            fov_y > 0.0 && fov_y < PI,
            "field of view must be between 0 and π radians, got {fov_y}"
        );
        ensure!(
            aspect_ratio > 0.0,
            "aspect ratio must be positive, got {aspect_ratio}"
        );
        ensure!(near != far, "near and far plane must differ, both are {near}");
        Ok(())
    }

    /// Returns a copy of `self` with a different vertical field of view (in radians).
    pub fn with_fov_y(mut self, fov_y: f32) -> Self {
        self.fov_y = fov_y;
        self.update();
        self
    }

    /// Returns a copy of `self` with a different aspect ratio (width / height).
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self.update();
        self
    }

    /// Returns a copy of `self` with different clipping plane distances.
    pub fn with_depth_range(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self.update();
        self
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn set_fov_y(&mut self, fov_y: f32) {
        self.fov_y = fov_y;
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    pub fn set_near(&mut self, near: f32) {
        self.near = near;
    }

    pub fn set_far(&mut self, far: f32) {
        self.far = far;
    }

    /// Recomputes the matrix from the current parameters and marks it as changed.
    pub fn update(&mut self) {
        let tan_half_fov = (self.fov_y * 0.5).tan();
        let depth = self.far - self.near;

        let mut m = Mat4f::ZERO;
        m[(0, 0)] = 1.0 / (self.aspect_ratio * tan_half_fov);
        m[(1, 1)] = 1.0 / tan_half_fov;
        m[(2, 2)] = -(self.far + self.near) / depth;
        m[(2, 3)] = -(2.0 * self.far * self.near) / depth;
        m[(3, 2)] = -1.0;
        self.matrix = m;

        self.change.mark();
        log::trace!("perspective matrix updated: {:?}", self.matrix);
    }

    pub fn matrix(&self) -> &Mat4f {
        &self.matrix
    }

    /// Returns whether the matrix was recomputed since the last call.
    pub fn take_change(&mut self) -> bool {
        self.change.take()
    }
}

/// Orthographic projection parameters and the resulting matrix.
#[derive(Debug, Clone)]
pub struct Orthographic {
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
    matrix: Mat4f,
    change: Change,
}

impl Default for Orthographic {
    /// The box `[-1, 1] x [-1, 1]`, with depth range `0.1..10`.
    fn default() -> Self {
        Self::new_unchecked(-1.0, 1.0, -1.0, 1.0, 0.1, 10.0)
    }
}

impl Orthographic {
    /// Creates an orthographic projection of the box bounded by the given planes.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the parameters is not finite, or if the box has no extent along
    /// one of the axes (`left == right`, `bottom == top` or `near == far`).
    pub fn new(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> anyhow::Result<Self> {
        let this = Self::new_unchecked(left, right, bottom, top, near, far);
        this.validate()?;
        Ok(this)
    }

    fn new_unchecked(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let mut this = Self {
            left,
            right,
            bottom,
            top,
            near,
            far,
            matrix: Mat4f::IDENTITY,
            change: Change::Clean,
        };
        this.update();
        this
    }

    /// Checks that the current parameters describe a usable projection.
    pub fn validate(&self) -> anyhow::Result<()> {
        let planes = [
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        ];
        ensure!(
            planes.iter().all(|p| p.is_finite()),
            "orthographic planes must be finite, got {planes:?}"
        );
        ensure!(
            self.left != self.right,
            "left and right plane must differ, both are {}",
            self.left
        );
        ensure!(
            self.bottom != self.top,
            "bottom and top plane must differ, both are {}",
            self.bottom
        );
        ensure!(
            self.near != self.far,
            "near and far plane must differ, both are {}",
            self.near
        );
        Ok(())
    }

    /// Returns a copy of `self` with different left, right, bottom and top planes.
    pub fn with_bounds(mut self, left: f32, right: f32, bottom: f32, top: f32) -> Self {
        self.left = left;
        self.right = right;
        self.bottom = bottom;
        self.top = top;
        self.update();
        self
    }

    /// Returns a copy of `self` with different near and far planes.
    pub fn with_depth_range(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self.update();
        self
    }

    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn right(&self) -> f32 {
        self.right
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn set_left(&mut self, left: f32) {
        self.left = left;
    }

    pub fn set_right(&mut self, right: f32) {
        self.right = right;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.bottom = bottom;
    }

    pub fn set_top(&mut self, top: f32) {
        self.top = top;
    }

    pub fn set_near(&mut self, near: f32) {
        self.near = near;
    }

    pub fn set_far(&mut self, far: f32) {
        self.far = far;
    }

    /// Multiplies the left, right, bottom and top planes by `factor`.
    ///
    /// Values below 1 zoom in, values above 1 zoom out. Like the setters, this does not recompute
    /// the matrix.
    pub fn scale_bounds(&mut self, factor: f32) {
        self.left *= factor;
        self.right *= factor;
        self.bottom *= factor;
        self.top *= factor;
    }

    /// Recomputes the matrix from the current parameters and marks it as changed.
    pub fn update(&mut self) {
        let width = self.right - self.left;
        let height = self.top - self.bottom;
        let depth = self.far - self.near;

        #[rustfmt::skip]
        let m = Matrix::from_rows([
            [2.0 / width, 0.0,          0.0,          -(self.right + self.left) / width ],
            [0.0,         2.0 / height, 0.0,          -(self.top + self.bottom) / height],
            [0.0,         0.0,          -2.0 / depth, -(self.far + self.near) / depth   ],
            [0.0,         0.0,          0.0,          1.0                               ],
        ]);
        self.matrix = m;

        self.change.mark();
        log::trace!("orthographic matrix updated: {:?}", self.matrix);
    }

    pub fn matrix(&self) -> &Mat4f {
        &self.matrix
    }

    /// Returns whether the matrix was recomputed since the last call.
    pub fn take_change(&mut self) -> bool {
        self.change.take()
    }
}

/// Either kind of projection.
#[derive(Debug, Clone)]
pub enum Projection {
    Perspective(Perspective),
    Orthographic(Orthographic),
}

impl Default for Projection {
    fn default() -> Self {
        Self::Perspective(Perspective::default())
    }
}

impl Projection {
    pub fn validate(&self) -> anyhow::Result<()> {
        match self {
            Projection::Perspective(p) => p.validate(),
            Projection::Orthographic(o) => o.validate(),
        }
    }

    pub fn update(&mut self) {
        match self {
            Projection::Perspective(p) => p.update(),
            Projection::Orthographic(o) => o.update(),
        }
    }

    pub fn matrix(&self) -> &Mat4f {
        match self {
            Projection::Perspective(p) => p.matrix(),
            Projection::Orthographic(o) => o.matrix(),
        }
    }

    pub fn take_change(&mut self) -> bool {
        match self {
            Projection::Perspective(p) => p.take_change(),
            Projection::Orthographic(o) => o.take_change(),
        }
    }
}

impl From<Perspective> for Projection {
    fn from(p: Perspective) -> Self {
        Self::Perspective(p)
    }
}

impl From<Orthographic> for Projection {
    fn from(o: Orthographic) -> Self {
        Self::Orthographic(o)
    }
}

#[cfg(test)]
mod tests {
    use ej_linalg::{assert_approx_eq, vec4, Vec4f};

    use super::*;

    fn project(m: &Mat4f, point: Vec4f) -> Vec4f {
        let clip = *m * point;
        clip / clip.w
    }

    #[test]
    fn perspective_defaults() {
        let p = Perspective::default();
        assert_approx_eq!(p.fov_y(), 45.0f32.to_radians());
        assert_eq!(p.aspect_ratio(), 1.0);
        assert_eq!(p.near(), 0.1);
        assert_eq!(p.far(), 100.0);
        p.validate().unwrap();
        assert!(Projection::default().validate().is_ok());
    }

    #[test]
    fn perspective_depth_range() {
        let p = Perspective::new(1.2, 16.0 / 9.0, 0.5, 50.0).unwrap();
        let near = project(p.matrix(), vec4(0.0, 0.0, -0.5, 1.0));
        let far = project(p.matrix(), vec4(0.0, 0.0, -50.0, 1.0));
        assert_approx_eq!(near.z, -1.0).abs(1e-5);
        assert_approx_eq!(far.z, 1.0).abs(1e-5);

        // The top edge of the frustum maps to y = 1.
        let top = project(p.matrix(), vec4(0.0, (0.6f32).tan() * 2.0, -2.0, 1.0));
        assert_approx_eq!(top.y, 1.0).abs(1e-5);
        let right = project(p.matrix(), vec4((0.6f32).tan() * 16.0 / 9.0, 0.0, -1.0, 1.0));
        assert_approx_eq!(right.x, 1.0).abs(1e-5);
    }

    #[test]
    fn perspective_validation() {
        assert!(Perspective::new(0.0, 1.0, 0.1, 10.0).is_err());
        assert!(Perspective::new(PI, 1.0, 0.1, 10.0).is_err());
        assert!(Perspective::new(1.0, 0.0, 0.1, 10.0).is_err());
        assert!(Perspective::new(1.0, -2.0, 0.1, 10.0).is_err());
        assert!(Perspective::new(1.0, 1.0, 1.0, 1.0).is_err());
        assert!(Perspective::new(1.0, f32::NAN, 0.1, 10.0).is_err());
        assert!(Perspective::new(1.0, 1.0, 0.1, f32::INFINITY).is_err());

        let err = Perspective::new(1.0, 1.0, 2.0, 2.0).unwrap_err();
        assert!(err.to_string().contains("near and far"), "{err}");

        // Setters don't validate.
        let mut p = Perspective::default();
        p.set_aspect_ratio(0.0);
        assert!(p.validate().is_err());
    }

    #[test]
    fn perspective_builders() {
        let mut p = Perspective::default()
            .with_fov_y(1.0)
            .with_aspect_ratio(2.0)
            .with_depth_range(1.0, 10.0);
        assert_eq!(
            (p.fov_y(), p.aspect_ratio(), p.near(), p.far()),
            (1.0, 2.0, 1.0, 10.0)
        );
        let expected = Perspective::new(1.0, 2.0, 1.0, 10.0).unwrap();
        assert_eq!(p.matrix(), expected.matrix());

        assert!(p.take_change());
        assert!(!p.take_change());
        p.set_far(20.0);
        assert!(!p.take_change());
        p.update();
        assert!(p.take_change());
    }

    #[test]
    fn orthographic_defaults() {
        let o = Orthographic::default();
        assert_eq!(
            (o.left(), o.right(), o.bottom(), o.top(), o.near(), o.far()),
            (-1.0, 1.0, -1.0, 1.0, 0.1, 10.0)
        );
        o.validate().unwrap();
    }

    #[test]
    fn orthographic_maps_box() {
        let o = Orthographic::new(-4.0, 2.0, -1.0, 3.0, 1.0, 5.0).unwrap();
        let m = o.matrix();
        let corner = *m * vec4(-4.0, -1.0, -1.0, 1.0);
        assert_approx_eq!(corner, vec4(-1.0, -1.0, -1.0, 1.0)).abs(1e-6);
        let corner = *m * vec4(2.0, 3.0, -5.0, 1.0);
        assert_approx_eq!(corner, vec4(1.0, 1.0, 1.0, 1.0)).abs(1e-6);
        let center = *m * vec4(-1.0, 1.0, -3.0, 1.0);
        assert_approx_eq!(center, vec4(0.0, 0.0, 0.0, 1.0)).abs(1e-6);
    }

    #[test]
    fn orthographic_validation() {
        assert!(Orthographic::new(1.0, 1.0, -1.0, 1.0, 0.1, 10.0).is_err());
        assert!(Orthographic::new(-1.0, 1.0, 2.0, 2.0, 0.1, 10.0).is_err());
        assert!(Orthographic::new(-1.0, 1.0, -1.0, 1.0, 3.0, 3.0).is_err());
        assert!(Orthographic::new(-1.0, f32::NAN, -1.0, 1.0, 0.1, 10.0).is_err());
        // Mirrored boxes are fine.
        assert!(Orthographic::new(1.0, -1.0, 1.0, -1.0, 10.0, 0.1).is_ok());
    }

    #[test]
    fn orthographic_scale_bounds() {
        let mut o = Orthographic::default().with_bounds(-400.0, 400.0, -300.0, 300.0);
        o.scale_bounds(0.5);
        assert_eq!(
            (o.left(), o.right(), o.bottom(), o.top()),
            (-200.0, 200.0, -150.0, 150.0)
        );
        // Not recomputed yet.
        assert_approx_eq!(o.matrix()[(0, 0)], 1.0 / 400.0);
        o.update();
        assert_approx_eq!(o.matrix()[(0, 0)], 1.0 / 200.0);
    }

    #[test]
    fn projection_dispatch() {
        let mut proj = Projection::from(Orthographic::default());
        assert!(proj.take_change());
        assert_eq!(proj.matrix(), Orthographic::default().matrix());
        proj.update();
        assert!(proj.take_change());
        assert!(matches!(proj, Projection::Orthographic(_)));

        let proj: Projection = Perspective::default().into();
        assert!(proj.validate().is_ok());
    }
}
