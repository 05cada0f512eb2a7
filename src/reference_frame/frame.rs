use tracing::trace;

use crate::{
    spatial_math::{geometry::Geometry, pose::Pose},
    Error,
};

use super::{
    config::FrameConfig,
    inputs::{interpolate_inputs, Evaluated, Input, JointPositions, Limit, LimitViolations},
};

#[cfg(test)]
#[path = "frame_tests.rs"]
mod frame_tests;

/// Defines a reference frame, e.g. a joint, a link or a free floating body.
///
/// A frame maps a set of inputs, one per degree of freedom, to the pose that goes from the
/// current frame to the reference frame of its parent. Frames know nothing about their
/// parents or children; composing frames into a kinematic chain is left to the caller.
///
/// Frames are immutable after creation, so all methods can be called from multiple threads
/// at the same time.
pub trait Frame {
    /// Returns the name of the frame.
    fn name(&self) -> &str;

    /// Returns the motion limits of the frame, one per degree of freedom. Frames that
    /// don't move return an empty slice.
    fn dof(&self) -> &[Limit];

    /// Returns the pose that goes from the current frame to the parent reference frame for
    /// the given inputs.
    ///
    /// ## Errors
    ///
    /// * [Error::IncorrectDoF] - Returned when the number of inputs does not match the
    ///   number of degrees of freedom.
    ///
    /// Inputs that are outside the limits of a single degree of freedom joint do not cause an
    /// error. Instead the returned [Evaluated] carries the violations.
    fn transform(&self, inputs: &[Input]) -> Result<Evaluated<Pose>, Error>;

    /// Returns the inputs that lie `by` of the way from `from` to `to`.
    ///
    /// ## Errors
    ///
    /// * [Error::IncorrectDoF] - Returned when either set of inputs does not match the
    ///   number of degrees of freedom.
    fn interpolate(&self, from: &[Input], to: &[Input], by: f64) -> Result<Vec<Input>, Error>;

    /// Returns the geometries of the frame for the given inputs, keyed by the frame name.
    /// A frame without geometry returns an empty collection.
    fn geometries(&self, inputs: &[Input]) -> Result<Evaluated<GeometriesInFrame>, Error>;

    /// Converts a joint position message (degrees / millimeters) to inputs
    /// (radians / millimeters).
    fn input_from_joint_positions(&self, positions: &JointPositions) -> Vec<Input>;

    /// Converts inputs (radians / millimeters) to a joint position message
    /// (degrees / millimeters).
    fn joint_positions_from_input(&self, inputs: &[Input]) -> JointPositions;

    /// Returns the persisted description of the frame.
    fn config(&self) -> Result<FrameConfig, Error>;
}

/// The name and limits shared by all frames.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct BaseFrame {
    name: String,
    limits: Vec<Limit>,
}

impl BaseFrame {
    /// Returns an error if the number of inputs doesn't match the number of limits.
    pub(crate) fn check_dof(&self, inputs: &[Input]) -> Result<(), Error> {
        if inputs.len() != self.limits.len() {
            return Err(Error::IncorrectDoF {
                actual: inputs.len(),
                expected: self.limits.len(),
            });
        }

        Ok(())
    }

    /// Interpolates linearly between two sets of inputs after checking that both match the
    /// number of degrees of freedom.
    pub(crate) fn interpolate(
        &self,
        from: &[Input],
        to: &[Input],
        by: f64,
    ) -> Result<Vec<Input>, Error> {
        self.check_dof(from)?;
        self.check_dof(to)?;
        Ok(interpolate_inputs(from, to, by))
    }

    pub(crate) fn limits(&self) -> &[Limit] {
        &self.limits
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn new(name: String, limits: Vec<Limit>) -> Self {
        Self { name, limits }
    }

    /// Checks the number of inputs and returns the limit violations of the inputs, if any.
    ///
    /// ## Errors
    ///
    /// * [Error::IncorrectDoF] - Returned when the number of inputs doesn't match the number
    ///   of degrees of freedom.
    pub(crate) fn validate_inputs(
        &self,
        inputs: &[Input],
    ) -> Result<Option<LimitViolations>, Error> {
        self.check_dof(inputs)?;

        let violations = LimitViolations::check(inputs, &self.limits);
        if let Some(v) = &violations {
            trace!(frame = %self.name, violations = %v, "inputs outside frame limits");
        }

        Ok(violations)
    }
}

/// The geometries of a frame, keyed by the name of the frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometriesInFrame {
    frame: String,
    geometries: Vec<Geometry>,
}

impl GeometriesInFrame {
    /// Returns the name of the frame the geometries belong to.
    pub fn frame(&self) -> &str {
        self.frame.as_ref()
    }

    /// Returns the geometries.
    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    /// Returns the geometry with the given label, if it exists.
    pub fn geometry_by_label(&self, label: &str) -> Option<&Geometry> {
        self.geometries.iter().find(|g| g.label() == label)
    }

    /// Returns the geometries, consuming the collection.
    pub fn into_geometries(self) -> Vec<Geometry> {
        self.geometries
    }

    /// Returns a value indicating whether there are no geometries.
    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    /// Returns the number of geometries.
    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    /// Creates a new collection of geometries for the given frame.
    pub fn new(frame: impl Into<String>, geometries: Vec<Geometry>) -> Self {
        Self {
            frame: frame.into(),
            geometries,
        }
    }

    /// Creates an empty collection for the given frame.
    pub fn empty(frame: impl Into<String>) -> Self {
        Self::new(frame, Vec::new())
    }
}
