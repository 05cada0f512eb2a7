use std::f64::consts::PI;

use float_cmp::{ApproxEq, F64Margin};
use nalgebra::{UnitQuaternion, Vector3};

use crate::{
    reference_frame::inputs::floats_to_inputs,
    spatial_math::geometry::{Geometry, Shape},
};

use super::*;

const MARGIN: F64Margin = F64Margin {
    ulps: 2,
    epsilon: 1e-6,
};

fn create_pose() -> Pose {
    Pose::new(
        Vector3::new(1.0, 2.0, 3.0),
        UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.5 * PI),
    )
}

fn create_sphere(label: &str) -> Geometry {
    Geometry::new(
        Shape::Sphere { radius: 10.0 },
        Pose::from_point(Vector3::new(0.0, 0.0, 5.0)),
        label,
    )
    .unwrap()
}

#[test]
fn when_creating_static_frame_it_should_have_no_degrees_of_freedom() {
    let frame = StaticFrame::new("link", Some(create_pose()), None).unwrap();

    assert_eq!("link", frame.name());
    assert!(frame.dof().is_empty());
    assert_eq!(&create_pose(), frame.pose());
    assert!(frame.geometry().is_none());
}

#[test]
fn when_creating_static_frame_without_pose_it_should_fail() {
    let result = StaticFrame::new("link", None, None);

    assert_eq!(
        Err(Error::MissingPose {
            name: "link".to_string()
        }),
        result
    );
}

#[test]
fn when_creating_zero_static_frame_it_should_have_the_zero_pose() {
    let frame = StaticFrame::zero("world");

    assert_eq!("world", frame.name());
    assert_eq!(&Pose::zero(), frame.pose());
}

#[test]
fn when_transforming_static_frame_it_should_return_the_stored_pose() {
    let frame = StaticFrame::new("link", Some(create_pose()), None).unwrap();

    let result = frame.transform(&[]).unwrap();

    assert!(result.is_within_limits());
    assert_eq!(create_pose(), result.into_value());
}

#[test]
fn when_transforming_static_frame_with_inputs_it_should_fail() {
    let frame = StaticFrame::new("link", Some(create_pose()), None).unwrap();

    let result = frame.transform(&floats_to_inputs(&[1.0]));

    assert_eq!(
        Err(Error::IncorrectDoF {
            actual: 1,
            expected: 0
        }),
        result
    );
}

#[test]
fn when_interpolating_static_frame_it_should_return_no_inputs() {
    let frame = StaticFrame::zero("link");

    assert_eq!(Ok(Vec::new()), frame.interpolate(&[], &[], 0.5));
    assert!(frame
        .interpolate(&floats_to_inputs(&[1.0]), &[], 0.5)
        .is_err());
}

#[test]
fn when_getting_geometries_of_static_frame_it_should_keep_them_at_the_origin() {
    let frame = StaticFrame::new("link", Some(create_pose()), Some(create_sphere("ball"))).unwrap();

    let result = frame.geometries(&[]).unwrap().into_value();

    assert_eq!("link", result.frame());
    assert_eq!(1, result.len());
    assert_eq!("ball", result.geometries()[0].label());
    assert!(result.geometries()[0]
        .pose()
        .approx_eq(Pose::from_point(Vector3::new(0.0, 0.0, 5.0)), MARGIN));
}

#[test]
fn when_getting_unlabeled_geometries_of_static_frame_it_should_use_the_frame_name() {
    let frame = StaticFrame::new("link", Some(create_pose()), Some(create_sphere(""))).unwrap();

    let result = frame.geometries(&[]).unwrap().into_value();

    assert_eq!("link", result.geometries()[0].label());
    assert_eq!("", frame.geometry().unwrap().label());
}

#[test]
fn when_getting_geometries_of_static_frame_without_geometry_it_should_be_empty() {
    let frame = StaticFrame::zero("link");

    let result = frame.geometries(&[]).unwrap().into_value();

    assert_eq!("link", result.frame());
    assert!(result.is_empty());
}

#[test]
fn when_getting_geometries_of_static_frame_with_inputs_it_should_fail() {
    let frame = StaticFrame::new("link", Some(create_pose()), Some(create_sphere(""))).unwrap();

    assert!(frame.geometries(&floats_to_inputs(&[1.0])).is_err());
}

#[test]
fn when_converting_joint_positions_for_static_frame_it_should_return_nothing() {
    let frame = StaticFrame::zero("link");

    assert!(frame
        .input_from_joint_positions(&JointPositions::new(vec![1.0]))
        .is_empty());
    assert_eq!(
        JointPositions::default(),
        frame.joint_positions_from_input(&[])
    );
}

#[test]
fn when_serializing_static_frame_it_should_write_a_link_record() {
    let frame = StaticFrame::new("link", Some(create_pose()), Some(create_sphere("ball"))).unwrap();

    let config = frame.link_config();

    assert_eq!("link", config.id);
    assert_eq!(1.0, config.translation.x);
    assert_eq!(2.0, config.translation.y);
    assert_eq!(3.0, config.translation.z);
    assert!(matches!(
        config.orientation,
        Some(OrientationConfig::OvDegrees(_))
    ));
    assert!(config.geometry.is_some());
}

#[test]
fn when_round_tripping_static_frame_through_json_it_should_be_equivalent() {
    let frame = StaticFrame::new("link", Some(create_pose()), Some(create_sphere("ball"))).unwrap();

    let json = serde_json::to_string(&frame).unwrap();
    let result: StaticFrame = serde_json::from_str(&json).unwrap();

    assert_eq!("link", result.name());
    assert!(result.pose().approx_eq(create_pose(), MARGIN));

    let geometry = result.geometry().unwrap();
    assert_eq!("ball", geometry.label());
    assert_eq!(&Shape::Sphere { radius: 10.0 }, geometry.shape());
    assert!(geometry
        .pose()
        .approx_eq(Pose::from_point(Vector3::new(0.0, 0.0, 5.0)), MARGIN));
}

#[test]
fn when_reading_link_record_without_orientation_it_should_not_rotate() {
    let json = r#"{"id": "link", "translation": {"x": 0, "y": 0, "z": 10}}"#;

    let frame: StaticFrame = serde_json::from_str(json).unwrap();

    assert_eq!(
        Pose::from_point(Vector3::new(0.0, 0.0, 10.0)),
        frame.transform(&[]).unwrap().into_value()
    );
}

#[test]
fn when_reading_link_record_without_translation_it_should_fail() {
    let json = r#"{"id": "link"}"#;

    assert!(serde_json::from_str::<StaticFrame>(json).is_err());
}

// TailGeometryStaticFrame

#[test]
fn when_getting_geometries_of_tail_geometry_frame_it_should_move_them_by_the_frame_pose() {
    let pose = Pose::from_point(Vector3::new(0.0, 0.0, 100.0));
    let frame = TailGeometryStaticFrame::new("tail", Some(pose), Some(create_sphere(""))).unwrap();

    let result = frame.geometries(&[]).unwrap().into_value();

    assert_eq!("tail", result.frame());
    assert_eq!("tail", result.geometries()[0].label());
    assert!(result.geometries()[0]
        .pose()
        .approx_eq(Pose::from_point(Vector3::new(0.0, 0.0, 105.0)), MARGIN));
}

#[test]
fn when_transforming_tail_geometry_frame_it_should_match_the_static_frame() {
    let inner = StaticFrame::new("tail", Some(create_pose()), None).unwrap();
    let frame = TailGeometryStaticFrame::from(inner.clone());

    assert_eq!("tail", frame.name());
    assert!(frame.dof().is_empty());
    assert_eq!(inner.transform(&[]), frame.transform(&[]));
    assert_eq!(&inner, frame.inner());
}

#[test]
fn when_creating_tail_geometry_frame_without_pose_it_should_fail() {
    assert!(matches!(
        TailGeometryStaticFrame::new("tail", None, None),
        Err(Error::MissingPose { .. })
    ));
}

#[test]
fn when_round_tripping_tail_geometry_frame_it_should_be_read_back_as_tail_geometry_frame() {
    let frame = TailGeometryStaticFrame::new("tail", Some(create_pose()), None).unwrap();

    let json = serde_json::to_string(&frame).unwrap();
    let result: TailGeometryStaticFrame = serde_json::from_str(&json).unwrap();

    assert_eq!("tail", result.name());
    assert!(result.inner().pose().approx_eq(create_pose(), MARGIN));
}
