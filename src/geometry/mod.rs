//! Geometry core: pose/transform value types and the homogeneous-matrix codec.

pub mod homogeneous;
pub mod pose;
pub mod rotation;

pub use homogeneous::{
    checked_matrix_to_pose_parts, matrix_to_pose_parts, pose_to_matrix, transform_to_matrix,
};
pub use pose::{Path, Pose, Transform};
