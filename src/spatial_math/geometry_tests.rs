use std::f64::consts::PI;

use float_cmp::{ApproxEq, F64Margin};
use nalgebra::{UnitQuaternion, Vector3};

use super::*;

const MARGIN: F64Margin = F64Margin {
    ulps: 2,
    epsilon: 1e-6,
};

fn create_box(pose: Pose, label: &str) -> Geometry {
    Geometry::new(
        Shape::Box {
            dimensions: Vector3::new(1.0, 2.0, 3.0),
        },
        pose,
        label,
    )
    .unwrap()
}

#[test]
fn when_creating_geometry_it_should_be_initialized() {
    let pose = Pose::from_point(Vector3::new(1.0, 0.0, 0.0));
    let geometry = create_box(pose, "a");

    assert_eq!("a", geometry.label());
    assert_eq!(&pose, geometry.pose());
    assert_eq!(
        &Shape::Box {
            dimensions: Vector3::new(1.0, 2.0, 3.0)
        },
        geometry.shape()
    );
}

#[test]
fn when_creating_geometry_with_invalid_dimensions_it_should_fail() {
    let shapes = [
        Shape::Box {
            dimensions: Vector3::new(1.0, 0.0, 1.0),
        },
        Shape::Sphere { radius: -1.0 },
        Shape::Capsule {
            radius: 1.0,
            length: 1.0,
        },
        Shape::Sphere { radius: f64::NAN },
    ];

    for shape in shapes {
        match Geometry::new(shape, Pose::zero(), "") {
            Err(Error::InvalidGeometry { .. }) => {}
            r => panic!("Expected an invalid geometry error for {:?}, got {:?}", shape, r),
        }
    }
}

#[test]
fn when_transforming_geometry_it_should_return_a_moved_copy() {
    let geometry = create_box(Pose::from_point(Vector3::new(1.0, 0.0, 0.0)), "a");
    let pose = Pose::new(
        Vector3::new(0.0, 0.0, 5.0),
        UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.5 * PI),
    );

    let moved = geometry.transform(&pose);

    let expected = Pose::new(
        Vector3::new(0.0, 1.0, 5.0),
        UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.5 * PI),
    );
    assert!(moved.pose().approx_eq(expected, MARGIN));
    assert_eq!("a", moved.label());
    assert_eq!(geometry.shape(), moved.shape());

    // The original is untouched
    assert_eq!(&Pose::from_point(Vector3::new(1.0, 0.0, 0.0)), geometry.pose());
}

#[test]
fn when_setting_the_label_on_a_copy_the_original_should_be_unchanged() {
    let geometry = create_box(Pose::zero(), "");
    let mut copy = geometry.transform(&Pose::zero());
    copy.set_label("b");

    assert_eq!("b", copy.label());
    assert_eq!("", geometry.label());
}

#[test]
fn when_writing_geometry_to_config_and_back_it_should_be_unchanged() {
    let geometries = [
        create_box(
            Pose::new(
                Vector3::new(1.0, 2.0, 3.0),
                UnitQuaternion::from_euler_angles(0.1, 0.2, 0.3),
            ),
            "box",
        ),
        Geometry::new(Shape::Sphere { radius: 2.0 }, Pose::zero(), "").unwrap(),
        Geometry::new(
            Shape::Capsule {
                radius: 1.0,
                length: 4.0,
            },
            Pose::from_point(Vector3::new(0.0, 0.0, 2.0)),
            "capsule",
        )
        .unwrap(),
        Geometry::new(Shape::Point, Pose::zero(), "p").unwrap(),
    ];

    for geometry in geometries {
        let result = geometry.config().parse().unwrap();

        assert_eq!(geometry.shape(), result.shape());
        assert_eq!(geometry.label(), result.label());
        assert!(result.pose().approx_eq(*geometry.pose(), MARGIN));
    }
}

#[test]
fn when_reading_geometry_config_from_json_it_should_parse() {
    let json = r#"{"type":"sphere","r":3.5,"translation":{"x":1.0,"y":0.0,"z":0.0},"label":"ball"}"#;
    let config: GeometryConfig = serde_json::from_str(json).unwrap();

    let geometry = config.parse().unwrap();

    assert_eq!(&Shape::Sphere { radius: 3.5 }, geometry.shape());
    assert_eq!("ball", geometry.label());
    assert_eq!(Vector3::new(1.0, 0.0, 0.0), geometry.pose().point());
}

#[test]
fn when_reading_geometry_config_with_unknown_type_it_should_fail() {
    let json = r#"{"type":"torus","r":3.5}"#;
    let result = serde_json::from_str::<GeometryConfig>(json);

    assert!(result.is_err());
}

#[test]
fn when_writing_geometry_to_config_it_should_only_fill_the_fields_of_the_shape() {
    let capsule = Geometry::new(
        Shape::Capsule {
            radius: 1.5,
            length: 4.0,
        },
        Pose::zero(),
        "",
    )
    .unwrap();
    let cuboid = create_box(Pose::zero(), "box");

    let capsule_config = capsule.config();
    let box_config = cuboid.config();

    assert_eq!(GeometryType::Capsule, capsule_config.geometry_type);
    assert_eq!(
        (0.0, 0.0, 0.0, 1.5, 4.0),
        (
            capsule_config.x,
            capsule_config.y,
            capsule_config.z,
            capsule_config.r,
            capsule_config.l
        )
    );
    assert_eq!(None, capsule_config.label);

    assert_eq!(GeometryType::Box, box_config.geometry_type);
    assert_eq!(
        (1.0, 2.0, 3.0, 0.0, 0.0),
        (box_config.x, box_config.y, box_config.z, box_config.r, box_config.l)
    );
    assert_eq!(Some("box".to_string()), box_config.label);
}
