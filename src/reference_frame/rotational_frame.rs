extern crate nalgebra as na;

use na::{Unit, UnitQuaternion, Vector3};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::{
    spatial_math::{orientation::AxisAngle, pose::Pose},
    Error,
};

use super::{
    config::{serialize_frame, FrameConfig, JointConfig, JointType},
    frame::{BaseFrame, Frame, GeometriesInFrame},
    inputs::{Evaluated, Input, JointPositions, Limit},
};

#[cfg(test)]
#[path = "rotational_frame_tests.rs"]
mod rotational_frame_tests;

/// A revolute joint, i.e. a frame that rotates around a fixed axis without translating.
///
/// Inputs and limits are in radians. Joint position messages and persisted limits are in
/// degrees.
///
/// Rotational frames never carry geometry. The space occupied by a rotating link is described
/// by the static or translational frames attached to it.
#[derive(Clone, Debug, PartialEq)]
pub struct RotationalFrame {
    base: BaseFrame,
    axis: Unit<Vector3<f64>>,
}

impl RotationalFrame {
    /// Returns the unit length axis around which the frame rotates.
    pub fn axis(&self) -> &Vector3<f64> {
        self.axis.as_ref()
    }

    /// Returns the persisted description of the frame, with the limits in degrees.
    ///
    /// ## Errors
    ///
    /// * [Error::TooManyDoFForJoint] - Returned when the frame has more than one degree of freedom.
    pub fn joint_config(&self) -> Result<JointConfig, Error> {
        let limits = self.base.limits();
        if limits.len() > 1 {
            return Err(Error::TooManyDoFForJoint { dof: limits.len() });
        }

        Ok(JointConfig {
            id: self.base.name().to_string(),
            joint_type: JointType::Revolute,
            axis: self.axis.into_inner().into(),
            max: limits[0].max.to_degrees(),
            min: limits[0].min.to_degrees(),
            geometry: None,
        })
    }

    /// Creates a new [RotationalFrame].
    ///
    /// ## Parameters
    ///
    /// * 'name' - The name of the frame
    /// * 'axis' - The rotation axis. Only the axis is used, the angle is ignored. An axis of
    ///   zero length is interpreted as the Z-axis.
    /// * 'limit' - The limits of the rotation in radians
    pub fn new(name: impl Into<String>, axis: AxisAngle, limit: Limit) -> Self {
        let normalized = axis.normalized();
        Self {
            base: BaseFrame::new(name.into(), vec![limit]),
            axis: Unit::new_unchecked(normalized.axis()),
        }
    }
}

impl Frame for RotationalFrame {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn dof(&self) -> &[Limit] {
        self.base.limits()
    }

    fn transform(&self, inputs: &[Input]) -> Result<Evaluated<Pose>, Error> {
        // Out of bounds inputs still produce a pose. The violations are passed on to the caller.
        let violations = self.base.validate_inputs(inputs)?;
        if let Some(v) = &violations {
            debug!(frame = %self.base.name(), violations = %v, "extrapolating rotation");
        }

        let rotation = UnitQuaternion::from_axis_angle(&self.axis, inputs[0].value);
        Ok(Evaluated::new(Pose::from_orientation(rotation), violations))
    }

    fn interpolate(&self, from: &[Input], to: &[Input], by: f64) -> Result<Vec<Input>, Error> {
        self.base.interpolate(from, to, by)
    }

    fn geometries(&self, _inputs: &[Input]) -> Result<Evaluated<GeometriesInFrame>, Error> {
        Ok(Evaluated::within_limits(GeometriesInFrame::empty(
            self.base.name(),
        )))
    }

    fn input_from_joint_positions(&self, positions: &JointPositions) -> Vec<Input> {
        positions
            .values
            .iter()
            .map(|v| Input::new(v.to_radians()))
            .collect()
    }

    fn joint_positions_from_input(&self, inputs: &[Input]) -> JointPositions {
        JointPositions::new(inputs.iter().map(|i| i.value.to_degrees()).collect())
    }

    fn config(&self) -> Result<FrameConfig, Error> {
        self.joint_config().map(FrameConfig::Joint)
    }
}

impl TryFrom<JointConfig> for RotationalFrame {
    type Error = Error;

    fn try_from(config: JointConfig) -> Result<Self, Self::Error> {
        if config.joint_type != JointType::Revolute {
            return Err(Error::MalformedRecord {
                reason: format!(
                    "joint {} is {:?}, expected a revolute joint",
                    config.id, config.joint_type
                ),
            });
        }
        if config.geometry.is_some() {
            debug!(frame = %config.id, "ignoring geometry on revolute joint");
        }

        let axis = config.axis.to_vector();
        Ok(RotationalFrame::new(
            config.id,
            AxisAngle::new(0.0, axis.x, axis.y, axis.z),
            Limit::new(config.min.to_radians(), config.max.to_radians()),
        ))
    }
}

impl Serialize for RotationalFrame {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_frame(self, serializer)
    }
}

impl<'de> Deserialize<'de> for RotationalFrame {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let config = JointConfig::deserialize(deserializer)?;
        RotationalFrame::try_from(config).map_err(serde::de::Error::custom)
    }
}
