#![warn(missing_docs)]

//! Reference frame primitives for robot kinematics.
//!
//! Provides a set of composable coordinate frames that map a joint input vector to a pose
//! relative to the parent frame. Frames validate their inputs against per joint motion
//! limits, interpolate between configurations, report the geometry they occupy for a given
//! configuration and convert between the external joint position units (degrees) and the
//! internal computation units (radians).

use thiserror::Error;

use crate::reference_frame::LimitViolations;

/// Defines the pose, orientation and geometry types used by the reference frames
pub mod spatial_math;

/// Defines the reference frames and the persisted link and joint descriptions
pub mod reference_frame;

/// Defines the different errors for the reference frame crate.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The number of inputs did not match the number of degrees of freedom of the frame.
    #[error("number of inputs does not match frame DoF, expected {expected} but got {actual}")]
    IncorrectDoF {
        /// The number of inputs that were provided
        actual: usize,
        /// The number of degrees of freedom of the frame
        expected: usize,
    },

    /// One or more inputs were outside the motion limits of the frame.
    #[error("{violations}")]
    OutOfBounds {
        /// All the limit violations that were found
        violations: LimitViolations,
    },

    /// A translational frame was created with an axis of zero length.
    #[error("cannot use zero vector as translation axis")]
    ZeroTranslationAxis,

    /// A static frame was created without a pose.
    #[error("pose is required to create frame {name}")]
    MissingPose {
        /// The name of the frame that was being created
        name: String,
    },

    /// Pose frames can not be written to a persisted record.
    #[error("serializing a pose frame is currently not supported")]
    PoseFrameSerializationNotSupported,

    /// Pose frames can not be created from a persisted record.
    #[error("deserializing a pose frame is currently not supported")]
    PoseFrameDeserializationNotSupported,

    /// The frame has more degrees of freedom than a single joint record can describe.
    #[error("cannot serialize frame with {dof} DoF as a single joint record")]
    TooManyDoFForJoint {
        /// The number of degrees of freedom of the frame
        dof: usize,
    },

    /// A persisted record could not be read or written.
    #[error("malformed frame record: {reason}")]
    MalformedRecord {
        /// A description of the problem
        reason: String,
    },

    /// A geometry description had invalid dimensions.
    #[error("invalid geometry: {reason}")]
    InvalidGeometry {
        /// A description of the problem
        reason: String,
    },

    /// An orientation description could not be converted into a rotation.
    #[error("invalid orientation: {reason}")]
    InvalidOrientation {
        /// A description of the problem
        reason: String,
    },
}

impl Error {
    /// Returns a value indicating whether the error is an out of bounds advisory, i.e. the
    /// computation was performed but the inputs were outside the limits of the frame.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, Error::OutOfBounds { .. })
    }
}
