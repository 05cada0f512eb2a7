//! Defines the different ways of describing the orientation of a reference frame.
//!
//! Internally all rotations are stored as unit quaternions. The types in this module provide
//! the representations that are used at the edges of the crate:
//!
//! - [AxisAngle] describes a rotation of `theta` radians around an axis. The revolute frames
//!   use it to describe their rotation axis.
//! - [OrientationVector] describes the direction in which the Z-axis of the frame points,
//!   together with a rotation of `theta` radians around that direction. The pose frame uses
//!   it to express an orientation as four unconstrained scalar values.
//! - [OrientationConfig] is the persisted form of an orientation.

extern crate nalgebra as na;

use na::{Quaternion, Unit, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::Error;

#[cfg(test)]
#[path = "orientation_tests.rs"]
mod orientation_tests;

/// Below this distance from the Z-axis the longitude of an orientation vector is undefined
/// and is taken to be zero.
const POLE_EPSILON: f64 = 1e-10;

/// Describes a rotation of `theta` radians around the axis `(rx, ry, rz)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisAngle {
    /// The rotation angle in radians.
    pub theta: f64,

    /// The X component of the rotation axis.
    pub rx: f64,

    /// The Y component of the rotation axis.
    pub ry: f64,

    /// The Z component of the rotation axis.
    pub rz: f64,
}

impl AxisAngle {
    /// Returns the rotation axis.
    pub fn axis(&self) -> Vector3<f64> {
        Vector3::new(self.rx, self.ry, self.rz)
    }

    /// Creates a new [AxisAngle] from the given angle and axis components.
    ///
    /// ## Parameters
    ///
    /// * 'theta' - The rotation angle in radians
    /// * 'rx' - The X component of the rotation axis
    /// * 'ry' - The Y component of the rotation axis
    /// * 'rz' - The Z component of the rotation axis
    pub fn new(theta: f64, rx: f64, ry: f64, rz: f64) -> Self {
        Self { theta, rx, ry, rz }
    }

    /// Scales the axis to unit length.
    ///
    /// An axis of zero length, or with a component that is not finite, does not define a
    /// direction. In that case the axis is set to the Z-axis.
    pub fn normalize(&mut self) {
        let axis = unit_direction(&self.axis()).map_or_else(Vector3::z, |u| u.into_inner());
        self.rx = axis.x;
        self.ry = axis.y;
        self.rz = axis.z;
    }

    /// Returns a copy of the current [AxisAngle] with an axis of unit length.
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Returns the rotation as a unit quaternion.
    pub fn to_quaternion(&self) -> UnitQuaternion<f64> {
        let normalized = self.normalized();
        UnitQuaternion::from_axis_angle(&Unit::new_unchecked(normalized.axis()), self.theta)
    }

    /// Returns the axis-angle representation of the given rotation. The identity rotation
    /// is returned as a zero rotation around the Z-axis.
    pub fn from_quaternion(rotation: &UnitQuaternion<f64>) -> Self {
        match rotation.axis_angle() {
            Some((axis, angle)) => Self::new(angle, axis.x, axis.y, axis.z),
            None => Self::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

/// Describes an orientation as the direction of the Z-axis of the rotated frame,
/// `(ox, oy, oz)`, together with a rotation of `theta` radians around that direction.
///
/// The rotation is composed as `Rz(longitude) * Ry(latitude) * Rz(theta)` where the
/// longitude and latitude are the spherical coordinates of the direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientationVector {
    /// The X component of the direction of the rotated Z-axis.
    pub ox: f64,

    /// The Y component of the direction of the rotated Z-axis.
    pub oy: f64,

    /// The Z component of the direction of the rotated Z-axis.
    pub oz: f64,

    /// The rotation around the direction, in radians.
    pub theta: f64,
}

impl OrientationVector {
    /// Returns the orientation vector that describes the given rotation.
    ///
    /// This is the exact inverse of [OrientationVector::to_quaternion] for a normalized
    /// direction and a `theta` in the range (-PI, PI].
    pub fn from_quaternion(rotation: &UnitQuaternion<f64>) -> Self {
        let direction = rotation * Vector3::z();
        let (longitude, latitude) = spherical_angles(&direction);

        let residual = z_then_y_rotation(longitude, latitude).inverse() * rotation;
        let rotated_x = residual * Vector3::x();

        Self {
            ox: direction.x,
            oy: direction.y,
            oz: direction.z,
            theta: rotated_x.y.atan2(rotated_x.x),
        }
    }

    /// Creates a new [OrientationVector].
    ///
    /// ## Parameters
    ///
    /// * 'ox' - The X component of the direction of the rotated Z-axis
    /// * 'oy' - The Y component of the direction of the rotated Z-axis
    /// * 'oz' - The Z component of the direction of the rotated Z-axis
    /// * 'theta' - The rotation around the direction in radians
    pub fn new(ox: f64, oy: f64, oz: f64, theta: f64) -> Self {
        Self { ox, oy, oz, theta }
    }

    /// Returns the direction of the orientation vector scaled to unit length. A zero
    /// direction is interpreted as the Z-axis.
    pub fn direction(&self) -> Vector3<f64> {
        unit_direction(&Vector3::new(self.ox, self.oy, self.oz))
            .map_or_else(Vector3::z, |u| u.into_inner())
    }

    /// Returns the rotation as a unit quaternion.
    pub fn to_quaternion(&self) -> UnitQuaternion<f64> {
        let (longitude, latitude) = spherical_angles(&self.direction());
        z_then_y_rotation(longitude, latitude)
            * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), self.theta)
    }
}

/// Returns the given vector scaled to unit length, or `None` when the vector has zero length
/// or a component that is not finite.
///
/// The vector is divided by its largest component before normalizing, so that the norm of
/// very large or very small vectors neither overflows nor underflows.
pub(crate) fn unit_direction(vector: &Vector3<f64>) -> Option<Unit<Vector3<f64>>> {
    if vector.iter().any(|c| !c.is_finite()) {
        return None;
    }

    let largest = vector.amax();
    if largest == 0.0 {
        return None;
    }

    Some(Unit::new_normalize(vector / largest))
}

/// Returns the longitude and latitude of the given unit direction.
fn spherical_angles(direction: &Vector3<f64>) -> (f64, f64) {
    let radial = direction.x.hypot(direction.y);
    let longitude = if radial < POLE_EPSILON {
        0.0
    } else {
        direction.y.atan2(direction.x)
    };
    let latitude = radial.atan2(direction.z);

    (longitude, latitude)
}

fn z_then_y_rotation(longitude: f64, latitude: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::z_axis(), longitude)
        * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), latitude)
}

/// The persisted form of an [OrientationVector]. Depending on the enclosing
/// [OrientationConfig] the angle is in degrees or radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrientationVectorConfig {
    /// The rotation angle.
    pub th: f64,
    /// The X component of the direction.
    pub x: f64,
    /// The Y component of the direction.
    pub y: f64,
    /// The Z component of the direction.
    pub z: f64,
}

/// The persisted form of an [AxisAngle]. The angle is in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisAngleConfig {
    /// The rotation angle in radians.
    pub th: f64,
    /// The X component of the axis.
    pub x: f64,
    /// The Y component of the axis.
    pub y: f64,
    /// The Z component of the axis.
    pub z: f64,
}

/// The persisted form of a roll, pitch, yaw rotation. All angles are in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EulerAnglesConfig {
    /// The rotation around the X-axis.
    pub roll: f64,
    /// The rotation around the Y-axis.
    pub pitch: f64,
    /// The rotation around the Z-axis.
    pub yaw: f64,
}

/// The persisted form of a quaternion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuaternionConfig {
    /// The scalar part.
    pub w: f64,
    /// The first imaginary part.
    pub x: f64,
    /// The second imaginary part.
    pub y: f64,
    /// The third imaginary part.
    pub z: f64,
}

/// The persisted form of an orientation, stored as `{"type": ..., "value": {...}}`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum OrientationConfig {
    /// The identity rotation.
    NoOrientation,
    /// An orientation vector with the angle in degrees.
    OvDegrees(OrientationVectorConfig),
    /// An orientation vector with the angle in radians.
    OvRadians(OrientationVectorConfig),
    /// An axis-angle rotation.
    AxisAngles(AxisAngleConfig),
    /// A roll, pitch, yaw rotation.
    EulerAngles(EulerAnglesConfig),
    /// A quaternion. Does not need to be normalized.
    Quaternion(QuaternionConfig),
}

impl OrientationConfig {
    /// Creates the persisted form of the given rotation. Rotations are always written as
    /// an orientation vector in degrees.
    pub fn from_quaternion(rotation: &UnitQuaternion<f64>) -> Self {
        let ov = OrientationVector::from_quaternion(rotation);
        OrientationConfig::OvDegrees(OrientationVectorConfig {
            th: ov.theta.to_degrees(),
            x: ov.ox,
            y: ov.oy,
            z: ov.oz,
        })
    }

    /// Returns the rotation described by the configuration.
    ///
    /// ## Errors
    ///
    /// * [Error::InvalidOrientation] - Returned when one of the values is not a finite number
    ///   or when a quaternion has zero length.
    pub fn parse(&self) -> Result<UnitQuaternion<f64>, Error> {
        let values = match self {
            OrientationConfig::NoOrientation => return Ok(UnitQuaternion::identity()),
            OrientationConfig::OvDegrees(c) | OrientationConfig::OvRadians(c) => {
                vec![c.th, c.x, c.y, c.z]
            }
            OrientationConfig::AxisAngles(c) => vec![c.th, c.x, c.y, c.z],
            OrientationConfig::EulerAngles(c) => vec![c.roll, c.pitch, c.yaw],
            OrientationConfig::Quaternion(c) => vec![c.w, c.x, c.y, c.z],
        };
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidOrientation {
                reason: "orientation values must be finite".to_string(),
            });
        }

        let rotation = match self {
            OrientationConfig::NoOrientation => UnitQuaternion::identity(),
            OrientationConfig::OvDegrees(c) => {
                OrientationVector::new(c.x, c.y, c.z, c.th.to_radians()).to_quaternion()
            }
            OrientationConfig::OvRadians(c) => {
                OrientationVector::new(c.x, c.y, c.z, c.th).to_quaternion()
            }
            OrientationConfig::AxisAngles(c) => {
                AxisAngle::new(c.th, c.x, c.y, c.z).to_quaternion()
            }
            OrientationConfig::EulerAngles(c) => {
                UnitQuaternion::from_euler_angles(c.roll, c.pitch, c.yaw)
            }
            OrientationConfig::Quaternion(c) => {
                let q = Quaternion::new(c.w, c.x, c.y, c.z);
                UnitQuaternion::try_new(q, f64::EPSILON).ok_or_else(|| {
                    Error::InvalidOrientation {
                        reason: "quaternion must have a non-zero length".to_string(),
                    }
                })?
            }
        };

        Ok(rotation)
    }
}
