//! Camera math for EJ: view and projection matrices, plus the interaction logic of an arcball
//! camera and a 2D pan-and-zoom camera.
//!
//! Everything here is plain data. Window systems feed cursor positions and scroll deltas into the
//! cameras and read back matrices; nothing in this crate talks to a window or a GPU.
//!
//! # Coordinates
//!
//! World space is right-handed with Y pointing up and the camera looking down `-Z`. Projection
//! matrices map the view volume to clip space with depth in `[-1, 1]`.
//!
//! Cursor positions are in pixels with the origin in the *bottom-left* corner of the viewport
//! (Y pointing up), matching world space. Window systems that report positions from the top-left
//! corner need to flip the Y coordinate first.
//!
//! # Change tracking
//!
//! [`ViewMatrix`], [`Perspective`] and [`Orthographic`] remember when their matrix was recomputed.
//! Renderers call `take_change()` to find out whether a uniform buffer needs to be refreshed, see
//! [`Change`].

use ej_linalg::{Mat4f, Vec2f, Vec3f};
use log::LevelFilter;

mod arcball;
mod camera2d;
mod change;
mod projection;
mod view;

pub use arcball::{screen_to_arcball, ArcBallCamera};
pub use camera2d::Camera2D;
pub use change::Change;
pub use projection::{Orthographic, Perspective, Projection};
pub use view::ViewMatrix;

/// Common interface of the cameras in this crate.
pub trait Camera {
    /// Returns the projection matrix.
    fn projection_matrix(&self) -> &Mat4f;

    /// Returns the view transform.
    fn view(&self) -> &ViewMatrix;

    /// Returns the combined `projection * view` matrix, mapping world space to clip space.
    fn view_projection(&self) -> Mat4f {
        *self.projection_matrix() * *self.view().matrix()
    }

    /// Maps a point in normalized device coordinates (`[-1, 1]` on both axes) on the near plane
    /// back to world space.
    ///
    /// Returns [`None`] if the camera matrices are degenerate.
    fn ndc_to_world(&self, ndc: Vec2f) -> Option<Vec3f> {
        let inv = self.view_projection().try_inversed()?;
        let p = inv * ndc.extend(-1.0).extend(1.0);
        Some(p.truncate() / p.w)
    }
}

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = if cfg!(debug_assertions) {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_PKG_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// If `cfg!(debug_assertions)` is enabled, the calling crate and this crate will log at *trace*
/// level. Otherwise, they will log at *debug* level. `RUST_LOG` overrides both.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
