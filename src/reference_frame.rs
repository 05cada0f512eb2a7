//! Defines the reference frames that map joint inputs to poses.
//!
//! Every frame implements the [Frame] trait. The concrete frames are
//!
//! - [StaticFrame] - a fixed pose with zero degrees of freedom
//! - [TailGeometryStaticFrame] - a static frame whose geometry sits at the end of its pose
//! - [TranslationalFrame] - a prismatic joint with one degree of freedom
//! - [RotationalFrame] - a revolute joint with one degree of freedom
//! - [PoseFrame] - a free pose with seven degrees of freedom
//! - [NamedFrame] - a renamed frame
//!
//! The [ReferenceFrame] enum can hold any of these frames.

/// Defines the inputs, limits and joint position messages
pub mod inputs;

/// Defines the frame trait and the state shared by all frames
pub mod frame;

/// Defines the frames with a fixed pose
pub mod static_frame;

/// Defines the prismatic joint frame
pub mod translational_frame;

/// Defines the revolute joint frame
pub mod rotational_frame;

/// Defines the seven degree of freedom pose frame
pub mod pose_frame;

/// Defines the frame that renames another frame
pub mod named_frame;

/// Defines the enum that holds any of the frames
pub mod variants;

/// Defines the persisted link and joint descriptions
pub mod config;

/// Provides random input generation for frames
pub mod sampling;

pub use config::{FrameConfig, JointConfig, JointType, LinkConfig};
pub use frame::{Frame, GeometriesInFrame};
pub use inputs::{
    floats_to_inputs, inputs_to_floats, interpolate_inputs, Evaluated, Input, JointPositions,
    Limit, LimitViolation, LimitViolations, OOB_ERR_STRING,
};
pub use named_frame::NamedFrame;
pub use pose_frame::{pose_to_inputs, PoseFrame};
pub use rotational_frame::RotationalFrame;
pub use sampling::{
    default_rng, random_frame_inputs, restricted_random_frame_inputs, DEFAULT_RANDOM_SEED,
};
pub use static_frame::{StaticFrame, TailGeometryStaticFrame};
pub use translational_frame::TranslationalFrame;
pub use variants::ReferenceFrame;
