pub mod skeleton;

pub use skeleton::{pose_segments, LineSegment, SKELETON_CONNECTIONS};
