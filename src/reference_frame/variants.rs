use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::trace;

use crate::{spatial_math::pose::Pose, Error};

use super::{
    config::{serialize_frame, FrameConfig, JointType},
    frame::{Frame, GeometriesInFrame},
    inputs::{Evaluated, Input, JointPositions, Limit},
    named_frame::NamedFrame,
    pose_frame::PoseFrame,
    rotational_frame::RotationalFrame,
    static_frame::{StaticFrame, TailGeometryStaticFrame},
    translational_frame::TranslationalFrame,
};

#[cfg(test)]
#[path = "variants_tests.rs"]
mod variants_tests;

/// Holds any of the frames provided by this crate.
#[derive(Clone, Debug, PartialEq)]
pub enum ReferenceFrame {
    /// See [StaticFrame]
    Static(StaticFrame),
    /// See [TailGeometryStaticFrame]
    TailGeometryStatic(TailGeometryStaticFrame),
    /// See [TranslationalFrame]
    Translational(TranslationalFrame),
    /// See [RotationalFrame]
    Rotational(RotationalFrame),
    /// See [PoseFrame]
    Pose(PoseFrame),
    /// See [NamedFrame]
    Named(NamedFrame),
}

impl ReferenceFrame {
    fn as_frame(&self) -> &dyn Frame {
        match self {
            ReferenceFrame::Static(f) => f,
            ReferenceFrame::TailGeometryStatic(f) => f,
            ReferenceFrame::Translational(f) => f,
            ReferenceFrame::Rotational(f) => f,
            ReferenceFrame::Pose(f) => f,
            ReferenceFrame::Named(f) => f,
        }
    }

    /// Creates the frame described by the given persisted description.
    ///
    /// Links become a [StaticFrame], prismatic joints a [TranslationalFrame] and revolute
    /// joints a [RotationalFrame].
    ///
    /// ## Errors
    ///
    /// * [Error::ZeroTranslationAxis] - Returned when a prismatic joint has a zero axis.
    /// * [Error::InvalidGeometry] - Returned when the geometry description is invalid.
    /// * [Error::InvalidOrientation] - Returned when the orientation description is invalid.
    pub fn from_config(config: FrameConfig) -> Result<Self, Error> {
        trace!(id = %config.id(), "creating frame from config");
        match config {
            FrameConfig::Link(link) => StaticFrame::try_from(link).map(ReferenceFrame::Static),
            FrameConfig::Joint(joint) => match joint.joint_type {
                JointType::Prismatic => {
                    TranslationalFrame::try_from(joint).map(ReferenceFrame::Translational)
                }
                JointType::Revolute => {
                    RotationalFrame::try_from(joint).map(ReferenceFrame::Rotational)
                }
            },
        }
    }

    /// Reads a frame from its persisted JSON description.
    ///
    /// ## Errors
    ///
    /// * [Error::MalformedRecord] - Returned when the JSON is not a link or joint record.
    /// * Any error returned by [ReferenceFrame::from_config].
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Self::from_config(FrameConfig::from_json(json)?)
    }

    /// Writes the persisted JSON description of the frame.
    ///
    /// ## Errors
    ///
    /// * [Error::PoseFrameSerializationNotSupported] - Returned for pose frames.
    /// * [Error::MalformedRecord] - Returned when the description can not be written.
    pub fn to_json(&self) -> Result<String, Error> {
        self.config()?.to_json()
    }
}

impl Frame for ReferenceFrame {
    fn name(&self) -> &str {
        self.as_frame().name()
    }

    fn dof(&self) -> &[Limit] {
        self.as_frame().dof()
    }

    fn transform(&self, inputs: &[Input]) -> Result<Evaluated<Pose>, Error> {
        self.as_frame().transform(inputs)
    }

    fn interpolate(&self, from: &[Input], to: &[Input], by: f64) -> Result<Vec<Input>, Error> {
        self.as_frame().interpolate(from, to, by)
    }

    fn geometries(&self, inputs: &[Input]) -> Result<Evaluated<GeometriesInFrame>, Error> {
        self.as_frame().geometries(inputs)
    }

    fn input_from_joint_positions(&self, positions: &JointPositions) -> Vec<Input> {
        self.as_frame().input_from_joint_positions(positions)
    }

    fn joint_positions_from_input(&self, inputs: &[Input]) -> JointPositions {
        self.as_frame().joint_positions_from_input(inputs)
    }

    fn config(&self) -> Result<FrameConfig, Error> {
        self.as_frame().config()
    }
}

impl From<StaticFrame> for ReferenceFrame {
    fn from(frame: StaticFrame) -> Self {
        ReferenceFrame::Static(frame)
    }
}

impl From<TailGeometryStaticFrame> for ReferenceFrame {
    fn from(frame: TailGeometryStaticFrame) -> Self {
        ReferenceFrame::TailGeometryStatic(frame)
    }
}

impl From<TranslationalFrame> for ReferenceFrame {
    fn from(frame: TranslationalFrame) -> Self {
        ReferenceFrame::Translational(frame)
    }
}

impl From<RotationalFrame> for ReferenceFrame {
    fn from(frame: RotationalFrame) -> Self {
        ReferenceFrame::Rotational(frame)
    }
}

impl From<PoseFrame> for ReferenceFrame {
    fn from(frame: PoseFrame) -> Self {
        ReferenceFrame::Pose(frame)
    }
}

impl From<NamedFrame> for ReferenceFrame {
    fn from(frame: NamedFrame) -> Self {
        ReferenceFrame::Named(frame)
    }
}

impl TryFrom<FrameConfig> for ReferenceFrame {
    type Error = Error;

    fn try_from(config: FrameConfig) -> Result<Self, Self::Error> {
        Self::from_config(config)
    }
}

impl Serialize for ReferenceFrame {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_frame(self, serializer)
    }
}

impl<'de> Deserialize<'de> for ReferenceFrame {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let config = FrameConfig::deserialize(deserializer)?;
        ReferenceFrame::from_config(config).map_err(serde::de::Error::custom)
    }
}
