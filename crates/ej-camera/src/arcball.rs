use ej_linalg::{vec3, Mat4f, Quatf, Vec2f, Vec3f};

use crate::{Camera, Perspective, ViewMatrix};

/// Zoom speed per scroll step.
const SCROLL_FACTOR: f32 = 0.1;
/// Panning speed relative to the camera distance.
const PAN_FACTOR: f32 = 0.001;
/// The camera never gets closer to the origin than this.
const MIN_DISTANCE: f32 = 0.01;

/// Maps a cursor position to a point on the unit sphere ("arcball") covering the viewport.
///
/// The viewport is mapped to `[-1, 1]` on both axes. Points inside the unit circle are lifted onto
/// the front hemisphere. Points outside of it are projected onto the sphere's silhouette, so the
/// result always has unit length.
pub fn screen_to_arcball(point: Vec2f, viewport_size: Vec2f) -> Vec3f {
    let p = point / viewport_size * 2.0 - 1.0;
    let dist = p.sqr_norm();
    if dist <= 1.0 {
        p.extend((1.0 - dist).sqrt())
    } else {
        p.extend(0.0).normalized()
    }
}

/// A camera orbiting the origin, controlled by dragging the cursor over a virtual trackball.
///
/// The camera uses a [`Perspective`] projection and starts out at `(0, 0, 10)`, looking at the
/// origin.
///
/// - [`ArcBallCamera::begin_drag`], [`ArcBallCamera::drag`] and [`ArcBallCamera::end_drag`]
///   rotate the scene with the cursor.
/// - [`ArcBallCamera::pan`] moves the camera parallel to the view plane instead, for use while a
///   modifier key is held.
/// - [`ArcBallCamera::scroll`] moves the camera towards or away from the origin.
#[derive(Debug, Clone)]
pub struct ArcBallCamera {
    projection: Perspective,
    view: ViewMatrix,
    viewport_size: Vec2f,
    /// Cursor position of the last drag event, `None` while not dragging.
    last_cursor: Option<Vec2f>,
}

impl ArcBallCamera {
    /// Creates an arcball camera for a viewport of the given size in pixels.
    pub fn new(viewport_size: Vec2f) -> Self {
        let projection = Perspective::default().with_aspect_ratio(viewport_size.x / viewport_size.y);
        Self {
            projection,
            view: ViewMatrix::new(vec3(0.0, 0.0, 10.0), Quatf::IDENTITY),
            viewport_size,
            last_cursor: None,
        }
    }

    /// Adapts the camera to a new viewport size, updating the projection's aspect ratio.
    pub fn resize(&mut self, viewport_size: Vec2f) {
        log::debug!("arcball viewport resized to {viewport_size}");
        self.viewport_size = viewport_size;
        self.projection
            .set_aspect_ratio(viewport_size.x / viewport_size.y);
        self.projection.update();
    }

    pub fn is_dragging(&self) -> bool {
        self.last_cursor.is_some()
    }

    pub fn begin_drag(&mut self, cursor: Vec2f) {
        self.last_cursor = Some(cursor);
    }

    pub fn end_drag(&mut self) {
        self.last_cursor = None;
    }

    /// Rotates the camera around the origin to follow the cursor.
    ///
    /// Does nothing unless a drag was started with [`ArcBallCamera::begin_drag`].
    pub fn drag(&mut self, cursor: Vec2f) {
        let Some(last) = self.last_cursor else {
            return;
        };

        let ball = screen_to_arcball(cursor, self.viewport_size);
        let last_ball = screen_to_arcball(last, self.viewport_size);
        let delta = Quatf::rotation_between(ball, last_ball);
        self.view.set_rotation(self.view.rotation() * delta);

        self.last_cursor = Some(cursor);
        self.view.update();
    }

    /// Moves the camera parallel to the view plane to follow the cursor.
    ///
    /// The distance moved scales with the distance from the origin. Like [`ArcBallCamera::drag`],
    /// this requires an active drag.
    pub fn pan(&mut self, cursor: Vec2f) {
        let Some(last) = self.last_cursor else {
            return;
        };

        let eye = self.view.eye();
        let offset = (last - cursor).extend(0.0) * (eye.z * PAN_FACTOR);
        self.view.set_eye(eye + offset);

        self.last_cursor = Some(cursor);
        self.view.update();
    }

    /// Zooms by moving the camera along its Z coordinate.
    ///
    /// Positive `delta` (scrolling up) moves closer by 10% per step.
    pub fn scroll(&mut self, delta: f32) {
        let eye = self.view.eye_mut();
        eye.z *= 1.0 - SCROLL_FACTOR * delta;
        if eye.z < MIN_DISTANCE {
            eye.z = MIN_DISTANCE;
        }
        self.view.update();
    }

    pub fn projection(&self) -> &Perspective {
        &self.projection
    }

    pub fn projection_mut(&mut self) -> &mut Perspective {
        &mut self.projection
    }

    pub fn view_mut(&mut self) -> &mut ViewMatrix {
        &mut self.view
    }
}

impl Camera for ArcBallCamera {
    fn projection_matrix(&self) -> &Mat4f {
        self.projection.matrix()
    }

    fn view(&self) -> &ViewMatrix {
        &self.view
    }
}
