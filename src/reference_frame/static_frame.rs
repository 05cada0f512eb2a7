use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::{
    spatial_math::{geometry::Geometry, orientation::OrientationConfig, pose::Pose},
    Error,
};

use super::{
    config::{serialize_frame, FrameConfig, LinkConfig},
    frame::{BaseFrame, Frame, GeometriesInFrame},
    inputs::{Evaluated, Input, JointPositions, Limit},
};

#[cfg(test)]
#[path = "static_frame_tests.rs"]
mod static_frame_tests;

/// A frame with a fixed translation and rotation relative to its parent.
///
/// A static frame has no degrees of freedom. Its geometry, if any, is located at the origin
/// of the frame.
#[derive(Clone, Debug, PartialEq)]
pub struct StaticFrame {
    base: BaseFrame,
    transform: Pose,
    geometry: Option<Geometry>,
}

impl StaticFrame {
    /// Returns the geometry attached to the frame, if any.
    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    /// Returns the geometries of the frame, moved by the given pose.
    fn geometries_at(&self, inputs: &[Input], pose: &Pose) -> Result<GeometriesInFrame, Error> {
        let geometry = match &self.geometry {
            Some(g) => g,
            None => return Ok(GeometriesInFrame::empty(self.base.name())),
        };
        self.base.check_dof(inputs)?;

        let mut moved = geometry.transform(pose);
        if moved.label().is_empty() {
            moved.set_label(self.base.name());
        }

        Ok(GeometriesInFrame::new(self.base.name(), vec![moved]))
    }

    /// Returns the persisted description of the frame.
    pub fn link_config(&self) -> LinkConfig {
        LinkConfig {
            id: self.base.name().to_string(),
            translation: self.transform.point().into(),
            orientation: Some(OrientationConfig::from_quaternion(
                &self.transform.orientation(),
            )),
            geometry: self.geometry.as_ref().map(|g| g.config()),
        }
    }

    /// Creates a new [StaticFrame].
    ///
    /// ## Parameters
    ///
    /// * 'name' - The name of the frame
    /// * 'pose' - The pose of the frame relative to its parent. Required.
    /// * 'geometry' - The space occupied by the frame, relative to the origin of the frame
    ///
    /// ## Errors
    ///
    /// * [Error::MissingPose] - Returned when no pose is provided.
    pub fn new(
        name: impl Into<String>,
        pose: Option<Pose>,
        geometry: Option<Geometry>,
    ) -> Result<Self, Error> {
        let name = name.into();
        let transform = match pose {
            Some(p) => p,
            None => {
                debug!(frame = %name, "rejecting static frame without a pose");
                return Err(Error::MissingPose { name });
            }
        };

        Ok(Self {
            base: BaseFrame::new(name, Vec::new()),
            transform,
            geometry,
        })
    }

    /// Returns the fixed pose of the frame relative to its parent.
    pub fn pose(&self) -> &Pose {
        &self.transform
    }

    /// Creates a static frame with no translation or rotation relative to its parent.
    pub fn zero(name: impl Into<String>) -> Self {
        Self {
            base: BaseFrame::new(name.into(), Vec::new()),
            transform: Pose::zero(),
            geometry: None,
        }
    }
}

impl Frame for StaticFrame {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn dof(&self) -> &[Limit] {
        self.base.limits()
    }

    fn transform(&self, inputs: &[Input]) -> Result<Evaluated<Pose>, Error> {
        self.base.check_dof(inputs)?;
        Ok(Evaluated::within_limits(self.transform))
    }

    fn interpolate(&self, from: &[Input], to: &[Input], by: f64) -> Result<Vec<Input>, Error> {
        self.base.interpolate(from, to, by)
    }

    fn geometries(&self, inputs: &[Input]) -> Result<Evaluated<GeometriesInFrame>, Error> {
        self.geometries_at(inputs, &Pose::zero())
            .map(Evaluated::within_limits)
    }

    fn input_from_joint_positions(&self, _positions: &JointPositions) -> Vec<Input> {
        Vec::new()
    }

    fn joint_positions_from_input(&self, _inputs: &[Input]) -> JointPositions {
        JointPositions::default()
    }

    fn config(&self) -> Result<FrameConfig, Error> {
        Ok(FrameConfig::Link(self.link_config()))
    }
}

impl TryFrom<LinkConfig> for StaticFrame {
    type Error = Error;

    fn try_from(config: LinkConfig) -> Result<Self, Self::Error> {
        let orientation = match &config.orientation {
            Some(o) => o.parse()?,
            None => OrientationConfig::NoOrientation.parse()?,
        };
        let geometry = config.geometry.as_ref().map(|g| g.parse()).transpose()?;

        StaticFrame::new(
            config.id,
            Some(Pose::new(config.translation.to_vector(), orientation)),
            geometry,
        )
    }
}

impl Serialize for StaticFrame {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_frame(self, serializer)
    }
}

impl<'de> Deserialize<'de> for StaticFrame {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let config = LinkConfig::deserialize(deserializer)?;
        StaticFrame::try_from(config).map_err(serde::de::Error::custom)
    }
}

/// A static frame whose geometry is located at the end of the frame transform, rather than at
/// its origin.
///
/// Used for links where the occupied space lies past the joint offset.
#[derive(Clone, Debug, PartialEq)]
pub struct TailGeometryStaticFrame {
    frame: StaticFrame,
}

impl TailGeometryStaticFrame {
    /// Returns the static frame that describes the transform.
    pub fn inner(&self) -> &StaticFrame {
        &self.frame
    }

    /// Creates a new [TailGeometryStaticFrame].
    ///
    /// ## Parameters
    ///
    /// * 'name' - The name of the frame
    /// * 'pose' - The pose of the frame relative to its parent. Required.
    /// * 'geometry' - The space occupied by the frame, relative to the end of the frame transform
    ///
    /// ## Errors
    ///
    /// * [Error::MissingPose] - Returned when no pose is provided.
    pub fn new(
        name: impl Into<String>,
        pose: Option<Pose>,
        geometry: Option<Geometry>,
    ) -> Result<Self, Error> {
        Ok(Self {
            frame: StaticFrame::new(name, pose, geometry)?,
        })
    }
}

impl From<StaticFrame> for TailGeometryStaticFrame {
    fn from(frame: StaticFrame) -> Self {
        Self { frame }
    }
}

impl Frame for TailGeometryStaticFrame {
    fn name(&self) -> &str {
        self.frame.name()
    }

    fn dof(&self) -> &[Limit] {
        self.frame.dof()
    }

    fn transform(&self, inputs: &[Input]) -> Result<Evaluated<Pose>, Error> {
        self.frame.transform(inputs)
    }

    fn interpolate(&self, from: &[Input], to: &[Input], by: f64) -> Result<Vec<Input>, Error> {
        self.frame.interpolate(from, to, by)
    }

    fn geometries(&self, inputs: &[Input]) -> Result<Evaluated<GeometriesInFrame>, Error> {
        self.frame
            .geometries_at(inputs, self.frame.pose())
            .map(Evaluated::within_limits)
    }

    fn input_from_joint_positions(&self, positions: &JointPositions) -> Vec<Input> {
        self.frame.input_from_joint_positions(positions)
    }

    fn joint_positions_from_input(&self, inputs: &[Input]) -> JointPositions {
        self.frame.joint_positions_from_input(inputs)
    }

    fn config(&self) -> Result<FrameConfig, Error> {
        self.frame.config()
    }
}

impl Serialize for TailGeometryStaticFrame {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_frame(self, serializer)
    }
}

impl<'de> Deserialize<'de> for TailGeometryStaticFrame {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        StaticFrame::deserialize(deserializer).map(TailGeometryStaticFrame::from)
    }
}
