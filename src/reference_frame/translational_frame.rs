extern crate nalgebra as na;

use float_cmp::{ApproxEq, F64Margin};
use na::Vector3;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::{
    spatial_math::{geometry::Geometry, orientation::unit_direction, pose::Pose},
    Error,
};

use super::{
    config::{serialize_frame, FrameConfig, JointConfig, JointType},
    frame::{BaseFrame, Frame, GeometriesInFrame},
    inputs::{Evaluated, Input, JointPositions, Limit},
};

#[cfg(test)]
#[path = "translational_frame_tests.rs"]
mod translational_frame_tests;

/// The margin below which all components of an axis are considered zero.
const ZERO_AXIS_MARGIN: F64Margin = F64Margin {
    ulps: 0,
    epsilon: 1e-8,
};

/// A prismatic joint, i.e. a frame that translates along a fixed axis without rotating.
#[derive(Clone, Debug, PartialEq)]
pub struct TranslationalFrame {
    base: BaseFrame,
    axis: Vector3<f64>,
    geometry: Option<Geometry>,
}

impl TranslationalFrame {
    /// Returns the unit length axis along which the frame translates.
    pub fn axis(&self) -> &Vector3<f64> {
        &self.axis
    }

    /// Returns the geometry attached to the frame, if any.
    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    /// Returns the persisted description of the frame.
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
            joint_type: JointType::Prismatic,
            axis: self.axis.into(),
            max: limits[0].max,
            min: limits[0].min,
            geometry: self.geometry.as_ref().map(|g| g.config()),
        })
    }

    /// Creates a new [TranslationalFrame].
    ///
    /// ## Parameters
    ///
    /// * 'name' - The name of the frame
    /// * 'axis' - The axis along which the frame translates. Does not need to be normalized.
    /// * 'limit' - The limits of the translation in millimeters
    /// * 'geometry' - The space occupied by the frame, relative to the translated origin
    ///
    /// ## Errors
    ///
    /// * [Error::ZeroTranslationAxis] - Returned when the axis has zero length or a component
    ///   that is not finite.
    pub fn new(
        name: impl Into<String>,
        axis: Vector3<f64>,
        limit: Limit,
        geometry: Option<Geometry>,
    ) -> Result<Self, Error> {
        let name = name.into();
        let unit_axis = match unit_direction(&axis) {
            Some(u) if !axis.iter().all(|c| (*c).approx_eq(0.0, ZERO_AXIS_MARGIN)) => u,
            _ => {
                debug!(frame = %name, axis = ?axis, "rejecting degenerate translation axis");
                return Err(Error::ZeroTranslationAxis);
            }
        };

        Ok(Self {
            base: BaseFrame::new(name, vec![limit]),
            axis: unit_axis.into_inner(),
            geometry,
        })
    }
}

impl Frame for TranslationalFrame {
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
            debug!(frame = %self.base.name(), violations = %v, "extrapolating translation");
        }

        let pose = Pose::from_point(self.axis * inputs[0].value);
        Ok(Evaluated::new(pose, violations))
    }

    fn interpolate(&self, from: &[Input], to: &[Input], by: f64) -> Result<Vec<Input>, Error> {
        self.base.interpolate(from, to, by)
    }

    fn geometries(&self, inputs: &[Input]) -> Result<Evaluated<GeometriesInFrame>, Error> {
        let geometry = match &self.geometry {
            Some(g) => g,
            None => {
                return Ok(Evaluated::within_limits(GeometriesInFrame::empty(
                    self.base.name(),
                )))
            }
        };

        let pose = self.transform(inputs)?;
        Ok(pose.map(|p| {
            GeometriesInFrame::new(self.base.name(), vec![geometry.transform(&p)])
        }))
    }

    fn input_from_joint_positions(&self, positions: &JointPositions) -> Vec<Input> {
        positions.values.iter().map(|v| Input::new(*v)).collect()
    }

    fn joint_positions_from_input(&self, inputs: &[Input]) -> JointPositions {
        JointPositions::new(inputs.iter().map(|i| i.value).collect())
    }

    fn config(&self) -> Result<FrameConfig, Error> {
        self.joint_config().map(FrameConfig::Joint)
    }
}

impl TryFrom<JointConfig> for TranslationalFrame {
    type Error = Error;

    fn try_from(config: JointConfig) -> Result<Self, Self::Error> {
        if config.joint_type != JointType::Prismatic {
            return Err(Error::MalformedRecord {
                reason: format!(
                    "joint {} is {:?}, expected a prismatic joint",
                    config.id, config.joint_type
                ),
            });
        }

        let geometry = config.geometry.as_ref().map(|g| g.parse()).transpose()?;
        TranslationalFrame::new(
            config.id,
            config.axis.to_vector(),
            Limit::new(config.min, config.max),
            geometry,
        )
    }
}

impl Serialize for TranslationalFrame {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_frame(self, serializer)
    }
}

impl<'de> Deserialize<'de> for TranslationalFrame {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let config = JointConfig::deserialize(deserializer)?;
        TranslationalFrame::try_from(config).map_err(serde::de::Error::custom)
    }
}
