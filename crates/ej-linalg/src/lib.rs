//! Fixed-size linear algebra for real-time 3D graphics and simulation.
//!
//! This library provides the math core of EJ: [`Vector`]s, column-major [`Matrix`] types and
//! [`Quaternion`]s, all generic over their element type and with their dimensions encoded in the
//! type via const generics.
//!
//! # Goals & Non-Goals
//!
//! - Only statically-sized vectors and matrices are supported. Mixing dimensions incorrectly (like
//!   taking the cross product of 4-dimensional vectors, or the determinant of a 5x5 matrix) is a
//!   compile-time error rather than a runtime check.
//! - Matrices have a single, column-major, unpadded data layout. This is what graphics APIs expect
//!   for uniform data, so [`Matrix::as_slice`] or [`bytemuck`] can hand it over without
//!   conversion.
//! - Be generic over the element type, but don't try to support non-[`Copy`] numeric types (eg.
//!   "big decimals").
//! - Numerical preconditions are not checked on the default path. Normalizing a zero vector or
//!   inverting a singular matrix produces NaN or infinite values, like the underlying float
//!   operations would. Checked variants like [`Matrix::try_inversed`] are opt-in.
//! - No SIMD specialization.
//!
//! # Conventions
//!
//! - All angles are in radians. [`deg_to_rad`] and [`rad_to_deg`] convert.
//! - Coordinate systems are right-handed, rotations by positive angles are counterclockwise when
//!   looking down the rotation axis.
//! - Methods that modify `self` in place have a by-value counterpart with an `-ed` suffix
//!   ([`Vector::normalize`] and [`Vector::normalized`], [`Matrix::transpose`] and
//!   [`Matrix::transposed`], ...).
//! - Floating-point results are compared with the [`approx`] module.
//!
//! # Type-level checks
//!
//! The cross product only exists for 3-dimensional vectors:
//!
//! ```compile_fail
//! # use ej_linalg::*;
//! let _ = Vec4f::X.cross(Vec4f::Y);
//! ```
//!
//! Determinants and inverses are only implemented for 2x2, 3x3 and 4x4 matrices:
//!
//! ```compile_fail
//! # use ej_linalg::*;
//! let _ = Matrix::<f32, 5, 5>::IDENTITY.determinate();
//! ```
//!
//! Matrices are built from column vectors, not from bare scalars:
//!
//! ```compile_fail
//! # use ej_linalg::*;
//! let _ = Mat2f::from_columns([1.0f32, 2.0]);
//! ```
//!
//! Quaternions can only be extracted from 3x3 or 4x4 rotation matrices:
//!
//! ```compile_fail
//! # use ej_linalg::*;
//! let _ = Quatf::from_matrix(Mat2f::IDENTITY);
//! ```
//!
//! Dot products take operands of the same scalar type. Mixing precisions needs an explicit
//! [`Vector::cast`], so nothing is narrowed behind the caller's back:
//!
//! ```compile_fail
//! # use ej_linalg::*;
//! let _ = vec3(1.0f32, 2.0, 3.0).dot(vec3(1.0f64, 2.0, 3.0));
//! ```
//!
//! ```
//! # use ej_linalg::*;
//! let d = vec3(1.0f32, 2.0, 3.0).cast::<f64>().dot(vec3(1.0f64, 2.0, 3.0));
//! assert_eq!(d, 14.0);
//! ```

pub mod approx;
mod matrix;
mod quat;
mod traits;
mod vector;

pub use matrix::*;
pub use quat::*;
pub use traits::*;
pub use vector::*;
