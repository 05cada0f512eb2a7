use serde::{Serialize, Serializer};

use crate::{spatial_math::pose::Pose, Error};

use super::{
    config::{serialize_frame, FrameConfig},
    frame::{Frame, GeometriesInFrame},
    inputs::{Evaluated, Input, JointPositions, Limit},
    variants::ReferenceFrame,
};

#[cfg(test)]
#[path = "named_frame_tests.rs"]
mod named_frame_tests;

/// A frame that gives another frame a new name.
///
/// All behaviour is passed through to the wrapped frame, except for the name and the key of
/// the geometries.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedFrame {
    name: String,
    frame: Box<ReferenceFrame>,
}

impl NamedFrame {
    /// Returns the wrapped frame.
    pub fn inner(&self) -> &ReferenceFrame {
        &self.frame
    }

    /// Creates a new [NamedFrame].
    ///
    /// ## Parameters
    ///
    /// * 'frame' - The frame that should be renamed
    /// * 'name' - The new name
    pub fn new(frame: impl Into<ReferenceFrame>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frame: Box::new(frame.into()),
        }
    }
}

impl Frame for NamedFrame {
    fn name(&self) -> &str {
        self.name.as_ref()
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
        let geometries = self.frame.geometries(inputs)?;
        Ok(geometries.map(|g| GeometriesInFrame::new(self.name.clone(), g.into_geometries())))
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

impl Serialize for NamedFrame {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_frame(self, serializer)
    }
}
