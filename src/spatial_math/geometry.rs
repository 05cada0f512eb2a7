//! Defines the shapes that describe the space occupied by a reference frame.
//!
//! A [Geometry] is a [Shape] located at a [Pose] relative to the frame that owns it. Frames
//! never hand out their stored geometry. Each request for the occupied space returns a
//! transformed copy.

extern crate nalgebra as na;

use na::Vector3;
use serde::{Deserialize, Serialize};

use crate::Error;

use super::{
    orientation::OrientationConfig,
    pose::{Pose, VectorConfig},
};

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod geometry_tests;

/// Defines the different kinds of shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// A box centered on the origin of the geometry.
    Box {
        /// The lengths of the box along the X, Y and Z axes.
        dimensions: Vector3<f64>,
    },
    /// A sphere centered on the origin of the geometry.
    Sphere {
        /// The radius of the sphere.
        radius: f64,
    },
    /// A capsule centered on the origin of the geometry, with its long axis along the Z-axis.
    Capsule {
        /// The radius of the capsule.
        radius: f64,
        /// The total length of the capsule, including the end caps.
        length: f64,
    },
    /// A single point at the origin of the geometry.
    Point,
}

/// Defines a shape at a given pose, with an optional label.
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    shape: Shape,
    pose: Pose,
    label: String,
}

impl Geometry {
    /// Returns the label of the geometry. An empty string means the geometry has no label.
    pub fn label(&self) -> &str {
        self.label.as_ref()
    }

    /// Creates a new [Geometry].
    ///
    /// ## Parameters
    ///
    /// * 'shape' - The shape of the geometry
    /// * 'pose' - The location of the center of the shape
    /// * 'label' - The label of the geometry. May be empty.
    ///
    /// ## Errors
    ///
    /// * [Error::InvalidGeometry] - Returned when the dimensions of the shape are not
    ///   positive, or a capsule is shorter than twice its radius.
    pub fn new(shape: Shape, pose: Pose, label: impl Into<String>) -> Result<Self, Error> {
        validate_shape(&shape)?;
        Ok(Self {
            shape,
            pose,
            label: label.into(),
        })
    }

    /// Returns the pose of the geometry.
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Sets the label of the geometry.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Returns the shape of the geometry.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns a copy of the geometry moved by the given pose, i.e. the geometry expressed in
    /// the parent frame of `pose`.
    pub fn transform(&self, pose: &Pose) -> Geometry {
        Geometry {
            shape: self.shape,
            pose: pose.compose(&self.pose),
            label: self.label.clone(),
        }
    }

    /// Returns the persisted form of the geometry.
    pub fn config(&self) -> GeometryConfig {
        let (geometry_type, x, y, z, r, l) = match self.shape {
            Shape::Box { dimensions } => (
                GeometryType::Box,
                dimensions.x,
                dimensions.y,
                dimensions.z,
                0.0,
                0.0,
            ),
            Shape::Sphere { radius } => (GeometryType::Sphere, 0.0, 0.0, 0.0, radius, 0.0),
            Shape::Capsule { radius, length } => {
                (GeometryType::Capsule, 0.0, 0.0, 0.0, radius, length)
            }
            Shape::Point => (GeometryType::Point, 0.0, 0.0, 0.0, 0.0, 0.0),
        };

        GeometryConfig {
            geometry_type,
            x,
            y,
            z,
            r,
            l,
            translation: Some(VectorConfig::from(self.pose.point())),
            orientation: Some(OrientationConfig::from_quaternion(
                &self.pose.orientation(),
            )),
            label: if self.label.is_empty() {
                None
            } else {
                Some(self.label.clone())
            },
        }
    }
}

fn validate_shape(shape: &Shape) -> Result<(), Error> {
    let reason = match *shape {
        Shape::Box { dimensions } => {
            if dimensions.iter().all(|d| d.is_finite() && *d > 0.0) {
                return Ok(());
            }
            format!(
                "box dimensions must be positive, got ({}, {}, {})",
                dimensions.x, dimensions.y, dimensions.z
            )
        }
        Shape::Sphere { radius } => {
            if radius.is_finite() && radius > 0.0 {
                return Ok(());
            }
            format!("sphere radius must be positive, got {}", radius)
        }
        Shape::Capsule { radius, length } => {
            if radius.is_finite() && radius > 0.0 && length.is_finite() && length >= 2.0 * radius
            {
                return Ok(());
            }
            format!(
                "capsule radius must be positive and its length at least twice the radius, got radius {} and length {}",
                radius, length
            )
        }
        Shape::Point => return Ok(()),
    };

    Err(Error::InvalidGeometry { reason })
}

/// Defines the persisted shape kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryType {
    /// See [Shape::Box]
    Box,
    /// See [Shape::Sphere]
    Sphere,
    /// See [Shape::Capsule]
    Capsule,
    /// See [Shape::Point]
    Point,
}

/// The persisted form of a [Geometry].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeometryConfig {
    /// The kind of shape.
    #[serde(rename = "type")]
    pub geometry_type: GeometryType,

    /// The length of a box along the X-axis.
    #[serde(default)]
    pub x: f64,

    /// The length of a box along the Y-axis.
    #[serde(default)]
    pub y: f64,

    /// The length of a box along the Z-axis.
    #[serde(default)]
    pub z: f64,

    /// The radius of a sphere or capsule.
    #[serde(default)]
    pub r: f64,

    /// The length of a capsule.
    #[serde(default)]
    pub l: f64,

    /// The offset of the geometry from the origin of the frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<VectorConfig>,

    /// The rotation of the geometry relative to the frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<OrientationConfig>,

    /// The label of the geometry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl GeometryConfig {
    /// Returns the geometry described by the configuration.
    ///
    /// ## Errors
    ///
    /// * [Error::InvalidGeometry] - Returned when the dimensions do not describe a valid shape.
    /// * [Error::InvalidOrientation] - Returned when the orientation offset is not a valid rotation.
    pub fn parse(&self) -> Result<Geometry, Error> {
        let shape = match self.geometry_type {
            GeometryType::Box => Shape::Box {
                dimensions: Vector3::new(self.x, self.y, self.z),
            },
            GeometryType::Sphere => Shape::Sphere { radius: self.r },
            GeometryType::Capsule => Shape::Capsule {
                radius: self.r,
                length: self.l,
            },
            GeometryType::Point => Shape::Point,
        };

        let point = self
            .translation
            .map(|t| t.to_vector())
            .unwrap_or_else(Vector3::zeros);
        let pose = match &self.orientation {
            Some(o) => Pose::new(point, o.parse()?),
            None => Pose::from_point(point),
        };

        Geometry::new(shape, pose, self.label.clone().unwrap_or_default())
    }
}
