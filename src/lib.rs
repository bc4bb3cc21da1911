pub mod error;
pub mod geometry;

pub use error::PoseError;
pub use geometry::{Path, Pose, Transform};
