use ej_linalg::{vec3, Mat4f, Quatf, Vec3f};

use crate::Change;

/// A view transform defined by a camera position (`eye`) and orientation.
///
/// The matrix transforms world space into view space. It is only recomputed by
/// [`ViewMatrix::update`], so several parameters can be changed before paying for it.
#[derive(Debug, Clone)]
pub struct ViewMatrix {
    eye: Vec3f,
    rotation: Quatf,
    matrix: Mat4f,
    change: Change,
}

impl Default for ViewMatrix {
    fn default() -> Self {
        Self::new(vec3(0.0, 0.0, 1.0), Quatf::IDENTITY)
    }
}

impl ViewMatrix {
    /// Creates a view transform for a camera at `eye` with orientation `rotation`.
    ///
    /// The matrix is computed immediately and reported as changed.
    pub fn new(eye: Vec3f, rotation: Quatf) -> Self {
        let mut this = Self {
            eye,
            rotation,
            matrix: Mat4f::IDENTITY,
            change: Change::Clean,
        };
        this.update();
        this
    }

    pub fn eye(&self) -> Vec3f {
        self.eye
    }

    pub fn eye_mut(&mut self) -> &mut Vec3f {
        &mut self.eye
    }

    pub fn set_eye(&mut self, eye: Vec3f) {
        self.eye = eye;
    }

    pub fn rotation(&self) -> Quatf {
        self.rotation
    }

    pub fn rotation_mut(&mut self) -> &mut Quatf {
        &mut self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Quatf) {
        self.rotation = rotation;
    }

    /// Returns the orientation as Euler angles `(pitch, yaw, roll)`.
    pub fn rotation_euler(&self) -> Vec3f {
        self.rotation.euler_angles()
    }

    /// Sets the orientation from Euler angles `(pitch, yaw, roll)`.
    pub fn set_rotation_euler(&mut self, angles: Vec3f) {
        self.rotation = Quatf::from_euler_vec(angles);
    }

    /// Recomputes the matrix from `eye` and `rotation` and marks it as changed.
    pub fn update(&mut self) {
        self.matrix = Mat4f::IDENTITY.translated(-self.eye) * self.rotation.inversed().to_mat4();
        self.change.mark();
        log::trace!("view matrix updated: {:?}", self.matrix);
    }

    /// Returns the matrix computed by the last [`ViewMatrix::update`].
    pub fn matrix(&self) -> &Mat4f {
        &self.matrix
    }

    /// Returns whether the matrix was recomputed since the last call.
    pub fn take_change(&mut self) -> bool {
        self.change.take()
    }
}

#[cfg(test)]
mod tests {
    use ej_linalg::{assert_approx_eq, vec4, Mat4};

    use super::*;

    #[test]
    fn default_view() {
        let mut view = ViewMatrix::default();
        assert_eq!(view.eye(), vec3(0.0, 0.0, 1.0));
        assert_eq!(view.rotation(), Quatf::IDENTITY);
        assert_eq!(*view.matrix(), Mat4::IDENTITY.translated(vec3(0.0, 0.0, -1.0)));
        assert!(view.take_change());
        assert!(!view.take_change());
    }

    #[test]
    fn eye_maps_to_origin() {
        let mut view = ViewMatrix::new(vec3(1.0, 2.0, 3.0), Quatf::IDENTITY);
        assert_eq!(*view.matrix() * vec4(1.0, 2.0, 3.0, 1.0), vec4(0.0, 0.0, 0.0, 1.0));

        view.set_eye(vec3(0.0, 0.0, 5.0));
        // Setters don't recompute the matrix.
        assert_eq!(*view.matrix() * vec4(1.0, 2.0, 3.0, 1.0), vec4(0.0, 0.0, 0.0, 1.0));
        view.update();
        assert_eq!(*view.matrix() * vec4(0.0, 0.0, 5.0, 1.0), vec4(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn rotation_is_inverted() {
        let rotation = Quatf::from_rotation_y(0.8);
        let view = ViewMatrix::new(Vec3f::ZERO, rotation);
        let dir = rotation * -Vec3f::Z;
        // The camera's viewing direction ends up along -Z in view space.
        assert_approx_eq!(*view.matrix() * dir.extend(0.0), vec4(0.0, 0.0, -1.0, 0.0)).abs(1e-6);
    }

    #[test]
    fn euler_accessors() {
        let mut view = ViewMatrix::default();
        let angles = vec3(0.1, -0.2, 0.3);
        view.set_rotation_euler(angles);
        assert_approx_eq!(view.rotation_euler(), angles).abs(1e-5);

        view.eye_mut().x = 4.0;
        view.rotation_mut().normalize();
        assert_eq!(view.eye().x, 4.0);
    }
}
