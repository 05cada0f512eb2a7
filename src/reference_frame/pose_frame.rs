extern crate nalgebra as na;

use na::Vector3;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    spatial_math::{geometry::Geometry, orientation::OrientationVector, pose::Pose},
    Error,
};

use super::{
    config::FrameConfig,
    frame::{BaseFrame, Frame, GeometriesInFrame},
    inputs::{floats_to_inputs, Evaluated, Input, JointPositions, Limit},
};

#[cfg(test)]
#[path = "pose_frame_tests.rs"]
mod pose_frame_tests;

/// The number of degrees of freedom of a [PoseFrame].
const POSE_FRAME_DOF: usize = 7;

/// A frame with seven unconstrained degrees of freedom: X, Y, Z, OX, OY, OZ and Theta.
///
/// The inputs are mapped directly onto a pose, with the translation in millimeters and the
/// rotation as an orientation vector with Theta in radians. In joint position messages
/// Theta is in degrees.
///
/// Pose frames are only created in code and can not be persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct PoseFrame {
    base: BaseFrame,
    geometries: Vec<Geometry>,
}

impl PoseFrame {
    /// Creates a new [PoseFrame].
    ///
    /// ## Parameters
    ///
    /// * 'name' - The name of the frame
    /// * 'geometries' - The space occupied by the frame, relative to the frame origin
    pub fn new(name: impl Into<String>, geometries: Vec<Geometry>) -> Self {
        Self {
            base: BaseFrame::new(name.into(), vec![Limit::unbounded(); POSE_FRAME_DOF]),
            geometries,
        }
    }

    fn pose_from_inputs(&self, inputs: &[Input]) -> Result<Pose, Error> {
        self.base.check_dof(inputs)?;

        let orientation = OrientationVector::new(
            inputs[3].value,
            inputs[4].value,
            inputs[5].value,
            inputs[6].value,
        );
        Ok(Pose::new(
            Vector3::new(inputs[0].value, inputs[1].value, inputs[2].value),
            orientation.to_quaternion(),
        ))
    }
}

impl Frame for PoseFrame {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn dof(&self) -> &[Limit] {
        self.base.limits()
    }

    fn transform(&self, inputs: &[Input]) -> Result<Evaluated<Pose>, Error> {
        self.pose_from_inputs(inputs).map(Evaluated::within_limits)
    }

    /// Interpolates in pose space: the translation linearly and the rotation spherically.
    ///
    /// The result is canonical, i.e. the direction has unit length and Theta lies in
    /// (-PI, PI]. Interpolating between identical inputs that are not canonical returns
    /// the canonical form of those inputs, which describes the same pose.
    fn interpolate(&self, from: &[Input], to: &[Input], by: f64) -> Result<Vec<Input>, Error> {
        let from_pose = self.pose_from_inputs(from)?;
        let to_pose = self.pose_from_inputs(to)?;

        let pose = Pose::interpolate(&from_pose, &to_pose, by);
        Ok(pose_to_inputs(&pose))
    }

    fn geometries(&self, inputs: &[Input]) -> Result<Evaluated<GeometriesInFrame>, Error> {
        let pose = self.pose_from_inputs(inputs)?;
        let geometries = self.geometries.iter().map(|g| g.transform(&pose)).collect();

        Ok(Evaluated::within_limits(GeometriesInFrame::new(
            self.base.name(),
            geometries,
        )))
    }

    fn input_from_joint_positions(&self, positions: &JointPositions) -> Vec<Input> {
        let mut inputs: Vec<Input> = positions.values.iter().map(|v| Input::new(*v)).collect();
        if let Some(theta) = inputs.last_mut() {
            theta.value = theta.value.to_radians();
        }

        inputs
    }

    fn joint_positions_from_input(&self, inputs: &[Input]) -> JointPositions {
        let mut values: Vec<f64> = inputs.iter().map(|i| i.value).collect();
        if let Some(theta) = values.last_mut() {
            *theta = theta.to_degrees();
        }

        JointPositions::new(values)
    }

    fn config(&self) -> Result<FrameConfig, Error> {
        Err(Error::PoseFrameSerializationNotSupported)
    }
}

impl Serialize for PoseFrame {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom(
            Error::PoseFrameSerializationNotSupported,
        ))
    }
}

impl<'de> Deserialize<'de> for PoseFrame {
    fn deserialize<D: Deserializer<'de>>(_deserializer: D) -> Result<Self, D::Error> {
        Err(serde::de::Error::custom(
            Error::PoseFrameDeserializationNotSupported,
        ))
    }
}

impl TryFrom<FrameConfig> for PoseFrame {
    type Error = Error;

    fn try_from(_config: FrameConfig) -> Result<Self, Self::Error> {
        Err(Error::PoseFrameDeserializationNotSupported)
    }
}

/// Converts a pose into the inputs of a [PoseFrame], i.e.
/// `[X, Y, Z, OX, OY, OZ, Theta (in radians)]`.
///
/// The result should only be used with a [PoseFrame].
pub fn pose_to_inputs(pose: &Pose) -> Vec<Input> {
    let point = pose.point();
    let ov = pose.orientation_vector();
    floats_to_inputs(&[point.x, point.y, point.z, ov.ox, ov.oy, ov.oz, ov.theta])
}
