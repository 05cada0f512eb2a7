//! Defines the persisted descriptions of frames.
//!
//! Two record shapes exist:
//!
//! - a [LinkConfig] describes a fixed link and maps to a [StaticFrame](super::StaticFrame).
//! - a [JointConfig] describes a single degree of freedom joint and maps to a
//!   [TranslationalFrame](super::TranslationalFrame) for prismatic joints or to a
//!   [RotationalFrame](super::RotationalFrame) for revolute joints.
//!
//! Revolute joint limits are stored in degrees, prismatic joint limits in millimeters.
//! Infinite limits are stored as `null`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::{
    spatial_math::{geometry::GeometryConfig, orientation::OrientationConfig, pose::VectorConfig},
    Error,
};

use super::frame::Frame;

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;

/// The persisted description of a fixed link.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkConfig {
    /// The name of the link.
    pub id: String,

    /// The translation of the link relative to its parent.
    pub translation: VectorConfig,

    /// The rotation of the link relative to its parent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<OrientationConfig>,

    /// The space occupied by the link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<GeometryConfig>,
}

/// The kinds of single degree of freedom joints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointType {
    /// A joint that translates along an axis.
    Prismatic,
    /// A joint that rotates around an axis.
    Revolute,
}

/// The persisted description of a single degree of freedom joint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JointConfig {
    /// The name of the joint.
    pub id: String,

    /// The kind of joint.
    #[serde(rename = "type")]
    pub joint_type: JointType,

    /// The axis of translation or rotation.
    pub axis: VectorConfig,

    /// The upper limit of the joint, in degrees for revolute joints.
    #[serde(
        default = "positive_infinity",
        serialize_with = "serialize_bound",
        deserialize_with = "deserialize_upper_bound"
    )]
    pub max: f64,

    /// The lower limit of the joint, in degrees for revolute joints.
    #[serde(
        default = "negative_infinity",
        serialize_with = "serialize_bound",
        deserialize_with = "deserialize_lower_bound"
    )]
    pub min: f64,

    /// The space occupied by the joint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<GeometryConfig>,
}

/// The key that only joint records carry.
const JOINT_TYPE_KEY: &str = "type";

fn positive_infinity() -> f64 {
    f64::INFINITY
}

fn negative_infinity() -> f64 {
    f64::NEG_INFINITY
}

fn serialize_bound<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_none()
    }
}

fn deserialize_upper_bound<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
}

fn deserialize_lower_bound<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NEG_INFINITY))
}

/// The persisted description of any frame that can be stored.
///
/// Records with a `type` key are read as joints, all other records as links.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FrameConfig {
    /// A single degree of freedom joint.
    Joint(JointConfig),
    /// A fixed link.
    Link(LinkConfig),
}

impl FrameConfig {
    /// Reads a frame description from JSON.
    ///
    /// ## Errors
    ///
    /// * [Error::MalformedRecord] - Returned when the JSON is not a link or joint record.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::MalformedRecord {
            reason: e.to_string(),
        })
    }

    /// Returns the name of the link or joint.
    pub fn id(&self) -> &str {
        match self {
            FrameConfig::Joint(j) => j.id.as_ref(),
            FrameConfig::Link(l) => l.id.as_ref(),
        }
    }

    /// Writes the frame description as JSON.
    ///
    /// ## Errors
    ///
    /// * [Error::MalformedRecord] - Returned when the description can not be written.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(|e| Error::MalformedRecord {
            reason: e.to_string(),
        })
    }
}

impl<'de> Deserialize<'de> for FrameConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = Value::deserialize(deserializer)?;
        let is_joint = match &record {
            Value::Object(fields) => fields.contains_key(JOINT_TYPE_KEY),
            _ => {
                return Err(serde::de::Error::custom(
                    "expected a link or joint record object",
                ))
            }
        };

        if is_joint {
            JointConfig::deserialize(record)
                .map(FrameConfig::Joint)
                .map_err(|e| serde::de::Error::custom(format!("invalid joint record: {}", e)))
        } else {
            LinkConfig::deserialize(record)
                .map(FrameConfig::Link)
                .map_err(|e| serde::de::Error::custom(format!("invalid link record: {}", e)))
        }
    }
}

/// Serializes a frame through its persisted description.
pub(crate) fn serialize_frame<F: Frame + ?Sized, S: Serializer>(
    frame: &F,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    frame
        .config()
        .map_err(serde::ser::Error::custom)?
        .serialize(serializer)
}
