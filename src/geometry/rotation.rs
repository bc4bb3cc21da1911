//! Quaternion helpers: euler conversions and the Hamilton product.
//!
//! Euler angles use the intrinsic roll (X), pitch (Y), yaw (Z) convention,
//! applied as R = Rz·Ry·Rx.

use nalgebra::{Quaternion, UnitQuaternion};

use crate::error::PoseError;

use super::homogeneous::MIN_QUAT_NORM;

/// Build a unit quaternion from roll/pitch/yaw angles in radians.
pub fn quaternion_from_euler(roll: f64, pitch: f64, yaw: f64) -> Quaternion<f64> {
    UnitQuaternion::from_euler_angles(roll, pitch, yaw).into_inner()
}

/// Extract (roll, pitch, yaw) in radians from a quaternion.
///
/// The input is normalized first; a (near-)zero norm fails like the
/// matrix encoders do.
pub fn euler_from_quaternion(quat: &Quaternion<f64>) -> Result<(f64, f64, f64), PoseError> {
    let unit = UnitQuaternion::try_new(*quat, MIN_QUAT_NORM).ok_or(
        PoseError::InvalidOrientation { norm: quat.norm() },
    )?;
    Ok(unit.euler_angles())
}

/// Hamilton product q1·q2: rotate by q2 first, then q1.
///
/// No normalization is performed; the result's norm is the product of the
/// input norms.
pub fn quaternion_multiply(q1: &Quaternion<f64>, q2: &Quaternion<f64>) -> Quaternion<f64> {
    q1 * q2
}
