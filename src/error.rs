//! Error taxonomy for pose/transform operations.

use thiserror::Error;

/// Errors surfaced by the pose/transform algebra.
///
/// These are purely deterministic math failures: retrying never changes
/// the outcome, so the caller must fix the input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PoseError {
    /// An orientation quaternion with (near-)zero norm was encountered
    /// while building a rotation; the rotation is undefined.
    #[error("orientation quaternion has near-zero norm {norm:.3e}, rotation is undefined")]
    InvalidOrientation { norm: f64 },

    /// A matrix handed to the checked decoder is not a rigid homogeneous
    /// transform: rotation block not orthonormal within tolerance, or
    /// bottom row not (0, 0, 0, 1).
    #[error("matrix is not a rigid homogeneous transform")]
    MalformedMatrix,
}
