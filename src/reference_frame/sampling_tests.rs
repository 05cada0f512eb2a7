use nalgebra::Vector3;
use proptest::prelude::*;

use crate::reference_frame::{
    inputs::floats_to_inputs, PoseFrame, StaticFrame, TranslationalFrame,
};

use super::*;

fn create_frame() -> TranslationalFrame {
    TranslationalFrame::new(
        "slider",
        Vector3::new(1.0, 0.0, 0.0),
        Limit::new(-10.0, 10.0),
        None,
    )
    .unwrap()
}

#[test]
fn when_sampling_with_the_default_rng_it_should_be_repeatable() {
    let frame = PoseFrame::new("free", Vec::new());

    let first = random_frame_inputs(&frame, &mut default_rng());
    let second = random_frame_inputs(&frame, &mut default_rng());

    assert_eq!(first, second);
}

#[test]
fn when_sampling_a_frame_without_dof_it_should_return_no_inputs() {
    let frame = StaticFrame::zero("link");

    assert!(random_frame_inputs(&frame, &mut default_rng()).is_empty());
    assert_eq!(
        Ok(Vec::new()),
        restricted_random_frame_inputs(&frame, &mut default_rng(), 0.5, &[])
    );
}

#[test]
fn when_sampling_unbounded_frame_it_should_stay_within_the_sampling_bound() {
    let frame = PoseFrame::new("free", Vec::new());
    let mut rng = default_rng();

    for _ in 0..100 {
        let inputs = random_frame_inputs(&frame, &mut rng);

        assert_eq!(7, inputs.len());
        assert!(inputs.iter().all(|i| i.value >= -999.0 && i.value <= 999.0));
    }
}

#[test]
fn when_sampling_restricted_inputs_with_the_wrong_reference_it_should_fail() {
    let frame = create_frame();

    let result = restricted_random_frame_inputs(
        &frame,
        &mut default_rng(),
        0.1,
        &floats_to_inputs(&[0.0, 0.0]),
    );

    assert_eq!(
        Err(Error::IncorrectDoF {
            actual: 2,
            expected: 1
        }),
        result
    );
}

#[test]
fn when_sampling_restricted_inputs_near_the_limit_it_should_clip_the_window() {
    let frame = create_frame();
    let mut rng = default_rng();

    for _ in 0..100 {
        let inputs =
            restricted_random_frame_inputs(&frame, &mut rng, 0.2, &floats_to_inputs(&[9.5]))
                .unwrap();

        assert!(inputs[0].value >= 7.5);
        assert!(inputs[0].value <= 10.0);
    }
}

#[test]
fn when_sampling_through_a_trait_object_it_should_match_the_concrete_frame() {
    let frame = create_frame();
    let dynamic: &dyn Frame = &frame;

    assert_eq!(
        random_frame_inputs(&frame, &mut default_rng()),
        random_frame_inputs(dynamic, &mut default_rng())
    );
}

proptest! {
    #[test]
    fn when_sampling_bounded_frame_it_should_stay_within_the_limits(seed in any::<u64>()) {
        let frame = create_frame();
        let mut rng = StdRng::seed_from_u64(seed);

        let inputs = random_frame_inputs(&frame, &mut rng);

        prop_assert_eq!(1, inputs.len());
        prop_assert!(frame.dof()[0].contains(inputs[0].value));
    }

    #[test]
    fn when_sampling_restricted_inputs_it_should_stay_within_the_window(
        seed in any::<u64>(),
        reference in -10.0f64..10.0,
        restriction in 0.0f64..1.0,
    ) {
        let frame = create_frame();
        let mut rng = StdRng::seed_from_u64(seed);

        let inputs = restricted_random_frame_inputs(
            &frame,
            &mut rng,
            restriction,
            &floats_to_inputs(&[reference]),
        )
        .unwrap();

        let half_window = restriction * 20.0 / 2.0;
        prop_assert!(inputs[0].value >= (reference - half_window).max(-10.0) - 1e-9);
        prop_assert!(inputs[0].value <= (reference + half_window).min(10.0) + 1e-9);
    }
}
