//! Pose, Transform and Path value types, and rigid composition.
//!
//! Frame identifiers are caller-owned bookkeeping: they ride along on the
//! values but are never validated here. In particular, [`Transform::apply`]
//! trusts that the transform's child frame matches the pose's frame.

use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use tracing::trace;

use crate::error::PoseError;

use super::homogeneous::{
    MIN_QUAT_NORM, matrix_to_pose_parts, pose_to_matrix, transform_to_matrix,
};

/// Position + orientation of a rigid body, optionally tagged with the
/// frame it is expressed in.
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    pub position: Vector3<f64>,
    /// Raw quaternion (x, y, z, w order on the wire); kept unnormalized so
    /// a degenerate input is detected at encode time instead of being
    /// silently repaired at construction.
    pub orientation: Quaternion<f64>,
    pub frame_id: Option<String>,
}

impl Pose {
    pub fn new(position: Vector3<f64>, orientation: Quaternion<f64>) -> Self {
        Self {
            position,
            orientation,
            frame_id: None,
        }
    }

    /// Pose at the origin with identity orientation.
    pub fn identity() -> Self {
        Self::new(Vector3::zeros(), Quaternion::identity())
    }

    /// Tag this pose with the frame it is expressed in.
    pub fn in_frame(mut self, frame: impl Into<String>) -> Self {
        self.frame_id = Some(frame.into());
        self
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

/// Rigid mapping (translation + rotation) from a child frame into a parent
/// frame, optionally tagged with both frame identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub translation: Vector3<f64>,
    pub rotation: Quaternion<f64>,
    pub parent_frame: Option<String>,
    pub child_frame: Option<String>,
}

impl Transform {
    pub fn new(translation: Vector3<f64>, rotation: Quaternion<f64>) -> Self {
        Self {
            translation,
            rotation,
            parent_frame: None,
            child_frame: None,
        }
    }

    /// Identity transform (no translation, no rotation).
    pub fn identity() -> Self {
        Self::new(Vector3::zeros(), Quaternion::identity())
    }

    /// Tag this transform with its parent (target) and child (source) frames.
    pub fn between_frames(
        mut self,
        parent: impl Into<String>,
        child: impl Into<String>,
    ) -> Self {
        self.parent_frame = Some(parent.into());
        self.child_frame = Some(child.into());
        self
    }

    /// Apply this transform to a pose, returning a fresh pose.
    ///
    /// Computes `M_transform × M_pose` with the transform on the left: the
    /// transform maps the pose's coordinates into the parent frame. The
    /// operand order is load-bearing, reversing it composes the rotations
    /// and translations the wrong way around.
    ///
    /// The input pose is untouched; the result carries the input's
    /// `frame_id` unchanged. No check is made that this transform's child
    /// frame matches the pose's frame.
    pub fn apply(&self, pose: &Pose) -> Result<Pose, PoseError> {
        let m_pose = pose_to_matrix(pose)?;
        let m_transform = transform_to_matrix(self)?;

        let (position, orientation) = matrix_to_pose_parts(&(m_transform * m_pose));

        Ok(Pose {
            position,
            orientation,
            frame_id: pose.frame_id.clone(),
        })
    }

    /// Apply this transform to every pose of a path, preserving order.
    ///
    /// An empty path maps to an empty path. A degenerate orientation
    /// anywhere in the path aborts the whole mapping; no partial path is
    /// returned.
    pub fn apply_to_path(&self, path: &Path) -> Result<Path, PoseError> {
        trace!(poses = path.len(), "transforming path");

        let poses = path
            .poses
            .iter()
            .map(|pose| self.apply(pose))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Path {
            frame_id: path.frame_id.clone(),
            poses,
        })
    }

    /// Rigid inverse: `(Rᵀ, -Rᵀ·t)`, with parent/child frames swapped.
    pub fn inverse(&self) -> Result<Transform, PoseError> {
        let unit = UnitQuaternion::try_new(self.rotation, MIN_QUAT_NORM).ok_or(
            PoseError::InvalidOrientation {
                norm: self.rotation.norm(),
            },
        )?;

        let rot_inv = unit.inverse();
        Ok(Transform {
            translation: -(rot_inv * self.translation),
            rotation: rot_inv.into_inner(),
            parent_frame: self.child_frame.clone(),
            child_frame: self.parent_frame.clone(),
        })
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Ordered sequence of poses, all expressed in the same frame.
///
/// Order is trajectory order (start → goal) and is preserved by every
/// operation; this crate never reorders or interprets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub frame_id: Option<String>,
    pub poses: Vec<Pose>,
}

impl Path {
    pub fn new(poses: Vec<Pose>) -> Self {
        Self {
            frame_id: None,
            poses,
        }
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }
}
