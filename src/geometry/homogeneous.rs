//! Pose ↔ 4×4 homogeneous matrix codec.
//!
//! The homogeneous matrix is a transient intermediate: built from a pose or
//! transform, multiplied, decoded back into (position, orientation), and
//! dropped within a single operation. Every matrix produced here satisfies
//! the rigid-transform invariant: orthonormal 3×3 rotation block, bottom
//! row exactly (0, 0, 0, 1).

use nalgebra::{Matrix3, Matrix4, Quaternion, UnitQuaternion, Vector3};

use crate::error::PoseError;

use super::pose::{Pose, Transform};

/// Quaternion norms at or below this are treated as a degenerate rotation.
pub(crate) const MIN_QUAT_NORM: f64 = 1e-9;

/// Tolerance for the orthonormality / bottom-row checks in the checked decoder.
const RIGIDITY_TOLERANCE: f64 = 1e-6;

/// Builds a homogeneous matrix from a raw quaternion and a translation.
///
/// The quaternion is normalized before use, so a slightly drifted input
/// still yields an orthonormal rotation block. A (near-)zero norm has no
/// defined rotation and fails instead.
fn homogeneous(
    rotation: &Quaternion<f64>,
    translation: &Vector3<f64>,
) -> Result<Matrix4<f64>, PoseError> {
    let unit = UnitQuaternion::try_new(*rotation, MIN_QUAT_NORM).ok_or(
        PoseError::InvalidOrientation {
            norm: rotation.norm(),
        },
    )?;

    let mut mat = unit.to_homogeneous();
    mat.fixed_view_mut::<3, 1>(0, 3).copy_from(translation);
    Ok(mat)
}

/// Encode a pose as a 4×4 homogeneous matrix.
pub fn pose_to_matrix(pose: &Pose) -> Result<Matrix4<f64>, PoseError> {
    homogeneous(&pose.orientation, &pose.position)
}

/// Encode a transform as a 4×4 homogeneous matrix.
pub fn transform_to_matrix(transform: &Transform) -> Result<Matrix4<f64>, PoseError> {
    homogeneous(&transform.rotation, &transform.translation)
}

/// Decode a homogeneous matrix into (translation, orientation quaternion).
///
/// Precondition: the rotation block is orthonormal. Matrices decoded here
/// are produced by this module, so the precondition is not re-validated;
/// use [`checked_matrix_to_pose_parts`] for externally supplied matrices.
///
/// Quaternion extraction uses Shepperd's method: when the trace is not
/// positive, the largest diagonal element selects the branch so the
/// divisor stays well away from zero, which keeps 180° rotations stable.
/// The sign is canonicalized to a non-negative scalar component, so
/// identical inputs always decode to the identical quaternion.
pub fn matrix_to_pose_parts(mat: &Matrix4<f64>) -> (Vector3<f64>, Quaternion<f64>) {
    let translation = Vector3::new(mat[(0, 3)], mat[(1, 3)], mat[(2, 3)]);

    let m = mat;
    let trace = m[(0, 0)] + m[(1, 1)] + m[(2, 2)];

    let (w, x, y, z) = if trace > 0.0 {
        let s = (trace + 1.0).sqrt() * 2.0; // s = 4w
        (
            0.25 * s,
            (m[(2, 1)] - m[(1, 2)]) / s,
            (m[(0, 2)] - m[(2, 0)]) / s,
            (m[(1, 0)] - m[(0, 1)]) / s,
        )
    } else if m[(0, 0)] > m[(1, 1)] && m[(0, 0)] > m[(2, 2)] {
        let s = (1.0 + m[(0, 0)] - m[(1, 1)] - m[(2, 2)]).sqrt() * 2.0; // s = 4x
        (
            (m[(2, 1)] - m[(1, 2)]) / s,
            0.25 * s,
            (m[(0, 1)] + m[(1, 0)]) / s,
            (m[(0, 2)] + m[(2, 0)]) / s,
        )
    } else if m[(1, 1)] > m[(2, 2)] {
        let s = (1.0 + m[(1, 1)] - m[(0, 0)] - m[(2, 2)]).sqrt() * 2.0; // s = 4y
        (
            (m[(0, 2)] - m[(2, 0)]) / s,
            (m[(0, 1)] + m[(1, 0)]) / s,
            0.25 * s,
            (m[(1, 2)] + m[(2, 1)]) / s,
        )
    } else {
        let s = (1.0 + m[(2, 2)] - m[(0, 0)] - m[(1, 1)]).sqrt() * 2.0; // s = 4z
        (
            (m[(1, 0)] - m[(0, 1)]) / s,
            (m[(0, 2)] + m[(2, 0)]) / s,
            (m[(1, 2)] + m[(2, 1)]) / s,
            0.25 * s,
        )
    };

    // Canonical sign: q and -q are the same rotation, pick w >= 0.
    let quat = if w < 0.0 {
        Quaternion::new(-w, -x, -y, -z)
    } else {
        Quaternion::new(w, x, y, z)
    };

    (translation, quat)
}

/// Decode with rigidity validation, for matrices not produced by this crate.
///
/// Checks the bottom row and R·Rᵀ ≈ I (with det(R) > 0, so reflections are
/// rejected too) within tolerance before decoding.
pub fn checked_matrix_to_pose_parts(
    mat: &Matrix4<f64>,
) -> Result<(Vector3<f64>, Quaternion<f64>), PoseError> {
    let bottom_ok = mat[(3, 0)].abs() < RIGIDITY_TOLERANCE
        && mat[(3, 1)].abs() < RIGIDITY_TOLERANCE
        && mat[(3, 2)].abs() < RIGIDITY_TOLERANCE
        && (mat[(3, 3)] - 1.0).abs() < RIGIDITY_TOLERANCE;
    if !bottom_ok {
        return Err(PoseError::MalformedMatrix);
    }

    let rot = mat.fixed_view::<3, 3>(0, 0).into_owned();
    let gram_error = (rot * rot.transpose() - Matrix3::identity()).abs().max();
    if gram_error > RIGIDITY_TOLERANCE || rot.determinant() < 0.0 {
        return Err(PoseError::MalformedMatrix);
    }

    Ok(matrix_to_pose_parts(mat))
}
