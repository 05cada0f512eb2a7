/// Defines the axis-angle and orientation vector representations of a rotation
pub mod orientation;

/// Defines a rigid body pose
pub mod pose;

/// Defines the shapes that describe the space occupied by a frame
pub mod geometry;
