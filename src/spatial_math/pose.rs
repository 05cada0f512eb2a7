extern crate nalgebra as na;

use float_cmp::{ApproxEq, F64Margin};
use na::{Isometry3, Quaternion, Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use super::orientation::OrientationVector;

#[cfg(test)]
#[path = "pose_tests.rs"]
mod pose_tests;

/// Defines a rigid body transform, i.e. a translation together with a rotation.
///
/// A pose describes the location of a child frame in the coordinate system of its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    isometry: Isometry3<f64>,
}

impl Pose {
    /// Returns the pose that first applies `other` and then the current pose, i.e. the
    /// pose of `other` expressed in the parent frame of the current pose.
    pub fn compose(&self, other: &Pose) -> Pose {
        Pose {
            isometry: self.isometry * other.isometry,
        }
    }

    /// Creates a new pose from the given isometry.
    pub fn from_isometry(isometry: Isometry3<f64>) -> Self {
        Self { isometry }
    }

    /// Creates a pose with the given rotation and no translation.
    pub fn from_orientation(orientation: UnitQuaternion<f64>) -> Self {
        Self::new(Vector3::zeros(), orientation)
    }

    /// Creates a pose with the given translation and no rotation.
    pub fn from_point(point: Vector3<f64>) -> Self {
        Self::new(point, UnitQuaternion::identity())
    }

    /// Returns the pose that lies `by` of the way from `from` to `to`.
    ///
    /// The translation is interpolated linearly and the rotation spherically. Values of `by`
    /// outside the range [0, 1] extrapolate.
    pub fn interpolate(from: &Pose, to: &Pose, by: f64) -> Pose {
        let point = from.point().lerp(&to.point(), by);
        let orientation = interpolate_orientation(&from.orientation(), &to.orientation(), by);
        Pose::new(point, orientation)
    }

    /// Returns the inverse of the pose.
    pub fn inverse(&self) -> Pose {
        Pose {
            isometry: self.isometry.inverse(),
        }
    }

    /// Returns the underlying isometry.
    pub fn isometry(&self) -> &Isometry3<f64> {
        &self.isometry
    }

    /// Creates a new pose.
    ///
    /// ## Parameters
    ///
    /// * 'point' - The translation of the pose
    /// * 'orientation' - The rotation of the pose
    pub fn new(point: Vector3<f64>, orientation: UnitQuaternion<f64>) -> Self {
        Self {
            isometry: Isometry3::from_parts(Translation3::from(point), orientation),
        }
    }

    /// Returns the rotation of the pose.
    pub fn orientation(&self) -> UnitQuaternion<f64> {
        self.isometry.rotation
    }

    /// Returns the rotation of the pose as an orientation vector in radians.
    pub fn orientation_vector(&self) -> OrientationVector {
        OrientationVector::from_quaternion(&self.isometry.rotation)
    }

    /// Returns the translation of the pose.
    pub fn point(&self) -> Vector3<f64> {
        self.isometry.translation.vector
    }

    /// Returns the pose with no translation and no rotation.
    pub fn zero() -> Self {
        Self {
            isometry: Isometry3::identity(),
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Isometry3<f64>> for Pose {
    fn from(isometry: Isometry3<f64>) -> Self {
        Self::from_isometry(isometry)
    }
}

impl ApproxEq for Pose {
    type Margin = F64Margin;

    /// Two poses are approximately equal when their translations are approximately equal
    /// component-wise and the angle between their rotations is approximately zero.
    fn approx_eq<M: Into<Self::Margin>>(self, other: Self, margin: M) -> bool {
        let margin = margin.into();
        let a = self.point();
        let b = other.point();
        a.x.approx_eq(b.x, margin)
            && a.y.approx_eq(b.y, margin)
            && a.z.approx_eq(b.z, margin)
            && self
                .orientation()
                .angle_to(&other.orientation())
                .approx_eq(0.0, margin)
    }
}

fn interpolate_orientation(
    from: &UnitQuaternion<f64>,
    to: &UnitQuaternion<f64>,
    by: f64,
) -> UnitQuaternion<f64> {
    // Slerp is undefined when the rotations are (almost) identical, so fall back to a
    // normalized linear interpolation on the same hemisphere.
    from.try_slerp(to, by, f64::EPSILON).unwrap_or_else(|| {
        let target: Quaternion<f64> = if from.coords.dot(&to.coords) < 0.0 {
            -to.into_inner()
        } else {
            to.into_inner()
        };
        UnitQuaternion::new_normalize(from.into_inner().lerp(&target, by))
    })
}

/// The persisted form of a 3D vector, used for translations and axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorConfig {
    /// The X component.
    pub x: f64,
    /// The Y component.
    pub y: f64,
    /// The Z component.
    pub z: f64,
}

impl VectorConfig {
    /// Returns the vector described by the configuration.
    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<Vector3<f64>> for VectorConfig {
    fn from(v: Vector3<f64>) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}
