use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Error;

#[cfg(test)]
#[path = "inputs_tests.rs"]
mod inputs_tests;

/// The text that every out of bounds message contains, so that these can be distinguished
/// from other errors by matching on the message.
pub const OOB_ERR_STRING: &str = "input out of bounds";

/// Defines the limits of motion for one degree of freedom of a frame.
///
/// Infinite values are allowed and mean that the motion is unconstrained in that direction.
/// It is expected that `min <= max` but this is not enforced.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Limit {
    /// The lower bound.
    pub min: f64,

    /// The upper bound.
    pub max: f64,
}

impl Limit {
    /// Returns a value indicating whether the given value lies within the limit, boundaries
    /// included.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Creates a new [Limit].
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns the limit that does not constrain motion in either direction.
    pub fn unbounded() -> Self {
        Self {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
        }
    }
}

/// Defines the value for one degree of freedom of a frame.
///
/// The unit depends on the frame: radians for rotations, millimeters for translations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Input {
    /// The value of the input.
    pub value: f64,
}

impl Input {
    /// Creates a new [Input].
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl From<f64> for Input {
    fn from(value: f64) -> Self {
        Self { value }
    }
}

/// Converts a slice of floats into a vector of inputs.
pub fn floats_to_inputs(values: &[f64]) -> Vec<Input> {
    values.iter().map(|v| Input::new(*v)).collect()
}

/// Converts a slice of inputs into a vector of floats.
pub fn inputs_to_floats(inputs: &[Input]) -> Vec<f64> {
    inputs.iter().map(|i| i.value).collect()
}

/// Returns the inputs that lie `by` of the way from `from` to `to`, interpolating each input
/// linearly.
///
/// It is assumed that both slices have the same length. If they don't the result has the
/// length of the shortest slice.
pub fn interpolate_inputs(from: &[Input], to: &[Input], by: f64) -> Vec<Input> {
    from.iter()
        .zip(to.iter())
        .map(|(f, t)| Input::new(f.value + (t.value - f.value) * by))
        .collect()
}

/// The joint position message that is used to exchange joint values with external systems.
///
/// Rotational values are in degrees and translational values in millimeters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JointPositions {
    /// The joint values.
    pub values: Vec<f64>,
}

impl JointPositions {
    /// Creates a new [JointPositions] message.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }
}

/// Describes an input that lies outside the limit of its degree of freedom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LimitViolation {
    /// The index of the degree of freedom.
    pub joint: usize,

    /// The value of the input.
    pub value: f64,

    /// The limit that was violated.
    pub limit: Limit,
}

impl Display for LimitViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "joint {} {}, input {:.5} needs to be within range [{:.5}, {:.5}]",
            self.joint, OOB_ERR_STRING, self.value, self.limit.min, self.limit.max
        )
    }
}

/// The collection of all the limit violations found for a set of inputs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LimitViolations {
    violations: Vec<LimitViolation>,
}

impl LimitViolations {
    /// Returns a value indicating whether there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns an iterator over the violations.
    pub fn iter(&self) -> impl Iterator<Item = &LimitViolation> {
        self.violations.iter()
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Creates a new collection from the given violations.
    pub fn new(violations: Vec<LimitViolation>) -> Self {
        Self { violations }
    }

    /// Checks every input against the limit at the same index and collects all violations.
    ///
    /// Returns `None` if all inputs are within their limits.
    pub fn check(inputs: &[Input], limits: &[Limit]) -> Option<Self> {
        let violations: Vec<LimitViolation> = inputs
            .iter()
            .zip(limits.iter())
            .enumerate()
            .filter(|(_, (input, limit))| !limit.contains(input.value))
            .map(|(joint, (input, limit))| LimitViolation {
                joint,
                value: input.value,
                limit: *limit,
            })
            .collect();

        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }
}

impl Display for LimitViolations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", violation)?;
        }

        Ok(())
    }
}

impl From<LimitViolations> for Error {
    fn from(violations: LimitViolations) -> Self {
        Error::OutOfBounds { violations }
    }
}

/// The result of a frame computation that succeeded, together with any limit violations of
/// the inputs that were used.
///
/// Single degree of freedom joints still compute a valid result when their input lies
/// outside the joint limits, which allows local solvers to extrapolate. Callers that only
/// accept valid configurations should use [Evaluated::into_result], which turns the
/// violations into an [Error::OutOfBounds].
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluated<T> {
    value: T,
    violations: Option<LimitViolations>,
}

impl<T> Evaluated<T> {
    /// Splits the evaluation into the value and the out of bounds error, if any.
    pub fn into_parts(self) -> (T, Option<Error>) {
        (self.value, self.violations.map(Error::from))
    }

    /// Returns the value if all inputs were within their limits, or an
    /// [Error::OutOfBounds] otherwise.
    pub fn into_result(self) -> Result<T, Error> {
        match self.violations {
            Some(violations) => Err(Error::from(violations)),
            None => Ok(self.value),
        }
    }

    /// Returns the value, ignoring any limit violations.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Returns a value indicating whether all inputs were within their limits.
    pub fn is_within_limits(&self) -> bool {
        self.violations.is_none()
    }

    /// Converts the value while keeping the limit violations.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Evaluated<U> {
        Evaluated {
            value: f(self.value),
            violations: self.violations,
        }
    }

    /// Creates a new evaluation.
    pub fn new(value: T, violations: Option<LimitViolations>) -> Self {
        Self {
            value,
            violations: violations.filter(|v| !v.is_empty()),
        }
    }

    /// Returns the computed value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns the limit violations, if any.
    pub fn violations(&self) -> Option<&LimitViolations> {
        self.violations.as_ref()
    }

    /// Creates an evaluation for inputs that were all within their limits.
    pub fn within_limits(value: T) -> Self {
        Self {
            value,
            violations: None,
        }
    }
}
