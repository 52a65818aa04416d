use ej_linalg::{vec2, Mat4f, Vec2f};

use crate::{Camera, Orthographic, ViewMatrix};

const SCROLL_FACTOR: f32 = 0.1;

/// An orthographic camera for 2D scenes, with panning and cursor-anchored zooming.
///
/// Initially, one pixel corresponds to one world unit and the world origin is in the center of the
/// viewport. The projection is always centered on the camera: panning moves the view's eye, while
/// zooming scales the projection's extents.
#[derive(Debug, Clone)]
pub struct Camera2D {
    projection: Orthographic,
    view: ViewMatrix,
    /// World units per pixel.
    inv_scale: f32,
    /// Cursor position of the last drag event, `None` while not dragging.
    drag_cursor: Option<Vec2f>,
}

impl Camera2D {
    /// Creates a camera for a viewport of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        let mut this = Self {
            projection: Orthographic::default(),
            view: ViewMatrix::default(),
            inv_scale: 1.0,
            drag_cursor: None,
        };
        this.resize(width, height);
        this
    }

    /// Adapts the projection to a new viewport size, keeping the current zoom level.
    pub fn resize(&mut self, width: u32, height: u32) {
        let half_width = (width >> 1) as f32 * self.inv_scale;
        let half_height = (height >> 1) as f32 * self.inv_scale;
        log::debug!(
            "2D camera resized to {width}x{height}, half extents {half_width}x{half_height}"
        );

        self.projection.set_left(-half_width);
        self.projection.set_right(half_width);
        self.projection.set_bottom(-half_height);
        self.projection.set_top(half_height);
        self.projection.update();
    }

    /// Returns the number of world units covered by one pixel.
    pub fn inv_scale(&self) -> f32 {
        self.inv_scale
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_cursor.is_some()
    }

    pub fn begin_drag(&mut self, cursor: Vec2f) {
        self.drag_cursor = Some(cursor);
    }

    pub fn end_drag(&mut self) {
        self.drag_cursor = None;
    }

    /// Pans the camera so that the scene follows the cursor.
    ///
    /// Does nothing unless a drag was started with [`Camera2D::begin_drag`].
    pub fn drag(&mut self, cursor: Vec2f) {
        let Some(last) = self.drag_cursor else {
            return;
        };

        let offset = (last - cursor) * self.inv_scale;
        let eye = self.view.eye();
        self.view.set_eye(eye + offset.extend(0.0));

        self.drag_cursor = Some(cursor);
        self.view.update();
    }

    /// Zooms in (positive `delta`) or out (negative `delta`) by 10% per step.
    ///
    /// `cursor_centered` is the cursor position in pixels relative to the center of the viewport
    /// (Y pointing up). The world point under the cursor stays in place.
    pub fn scroll(&mut self, delta: f32, cursor_centered: Vec2f) {
        let step = SCROLL_FACTOR * delta;
        let scale = 1.0 - step;

        self.projection.scale_bounds(scale);
        self.projection.update();

        // The point under the cursor is `eye + cursor * inv_scale` before and
        // `eye' + cursor * inv_scale * scale` after zooming.
        let cursor_offset = cursor_centered * self.inv_scale;
        let eye = self.view.eye();
        let eye_2d = vec2(eye.x, eye.y) + cursor_offset * step;
        self.view.set_eye(eye_2d.extend(eye.z));
        self.view.update();

        self.inv_scale *= scale;
        log::debug!("2D camera zoomed, {} world units per pixel", self.inv_scale);
    }

    /// Maps a cursor position relative to the viewport center to world coordinates.
    pub fn cursor_to_world(&self, cursor_centered: Vec2f) -> Vec2f {
        let eye = self.view.eye();
        vec2(eye.x, eye.y) + cursor_centered * self.inv_scale
    }

    pub fn projection(&self) -> &Orthographic {
        &self.projection
    }

    pub fn projection_mut(&mut self) -> &mut Orthographic {
        &mut self.projection
    }

    pub fn view_mut(&mut self) -> &mut ViewMatrix {
        &mut self.view
    }
}

impl Camera for Camera2D {
    fn projection_matrix(&self) -> &Mat4f {
        self.projection.matrix()
    }

    fn view(&self) -> &ViewMatrix {
        &self.view
    }
}

#[cfg(test)]
mod tests {
    use ej_linalg::{assert_approx_eq, vec3, vec4};

    use super::*;

    #[test]
    fn pixel_per_unit() {
        let camera = Camera2D::new(800, 601);
        let o = camera.projection();
        assert_eq!(
            (o.left(), o.right(), o.bottom(), o.top()),
            (-400.0, 400.0, -300.0, 300.0)
        );
        assert_eq!(camera.view().eye(), vec3(0.0, 0.0, 1.0));

        let clip = camera.view_projection() * vec4(400.0, -150.0, 0.0, 1.0);
        assert_approx_eq!(clip.x, 1.0);
        assert_approx_eq!(clip.y, -0.5);
    }

    #[test]
    fn drag_pans() {
        let mut camera = Camera2D::new(100, 100);
        camera.drag(vec2(5.0, 5.0));
        assert_eq!(camera.view().eye(), vec3(0.0, 0.0, 1.0));

        camera.begin_drag(vec2(10.0, 10.0));
        camera.drag(vec2(30.0, 5.0));
        assert_eq!(camera.view().eye(), vec3(-20.0, 5.0, 1.0));
        camera.drag(vec2(30.0, 15.0));
        assert_eq!(camera.view().eye(), vec3(-20.0, -5.0, 1.0));
        camera.end_drag();
        assert!(!camera.is_dragging());
    }

    #[test]
    fn zoom_keeps_cursor_anchored() {
        crate::init_logger!();

        let mut camera = Camera2D::new(640, 480);
        camera.begin_drag(vec2(0.0, 0.0));
        camera.drag(vec2(-30.0, 12.0));
        camera.end_drag();

        let cursor = vec2(100.0, -50.0);
        let before = camera.cursor_to_world(cursor);
        camera.scroll(1.0, cursor);
        assert_approx_eq!(camera.inv_scale(), 0.9);
        assert_approx_eq!(camera.projection().right(), 320.0 * 0.9).abs(1e-4);
        assert_approx_eq!(camera.cursor_to_world(cursor), before).abs(1e-4);

        camera.scroll(-3.0, cursor);
        assert_approx_eq!(camera.inv_scale(), 0.9 * 1.3).abs(1e-6);
        assert_approx_eq!(camera.cursor_to_world(cursor), before).abs(1e-4);
    }

    #[test]
    fn resize_keeps_zoom() {
        let mut camera = Camera2D::new(200, 200);
        camera.scroll(5.0, vec2(0.0, 0.0));
        assert_approx_eq!(camera.inv_scale(), 0.5);
        camera.resize(400, 100);
        let o = camera.projection();
        assert_approx_eq!(o.right(), 100.0);
        assert_approx_eq!(o.top(), 25.0);
    }
}
