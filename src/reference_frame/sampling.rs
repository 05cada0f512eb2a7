use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::Error;

use super::{
    frame::Frame,
    inputs::{Input, Limit},
};

#[cfg(test)]
#[path = "sampling_tests.rs"]
mod sampling_tests;

/// The seed used by [default_rng].
pub const DEFAULT_RANDOM_SEED: u64 = 1;

/// The bound used for sampling in place of an infinite limit.
const INFINITE_LIMIT_SAMPLING_BOUND: f64 = 999.0;

/// Returns a random number generator seeded with [DEFAULT_RANDOM_SEED], so that sampling is
/// repeatable when the caller has no generator of its own.
#[cfg_attr(test, mutants::skip)] // Cannot easily check mutations of a fixed seed
pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(DEFAULT_RANDOM_SEED)
}

fn sampling_bounds(limit: &Limit) -> (f64, f64) {
    let min = if limit.min == f64::NEG_INFINITY {
        -INFINITE_LIMIT_SAMPLING_BOUND
    } else {
        limit.min
    };
    let max = if limit.max == f64::INFINITY {
        INFINITE_LIMIT_SAMPLING_BOUND
    } else {
        limit.max
    };

    (min, max)
}

/// Returns a random set of inputs for the frame, one per degree of freedom, each within the
/// limits of its degree of freedom.
///
/// Infinite limits are replaced by +/- 999 for the purpose of sampling.
///
/// ## Parameters
///
/// * 'frame' - The frame to generate inputs for
/// * 'rng' - The random number generator, e.g. [default_rng]
pub fn random_frame_inputs<F: Frame + ?Sized, R: Rng>(frame: &F, rng: &mut R) -> Vec<Input> {
    frame
        .dof()
        .iter()
        .map(|limit| {
            let (min, max) = sampling_bounds(limit);
            Input::new(rng.gen::<f64>() * (max - min) + min)
        })
        .collect()
}

/// Returns a random set of inputs for the frame, sampled from a window around a reference
/// set of inputs.
///
/// For each degree of freedom the window is `restriction_percent` of the span of the limit,
/// centered on the reference value and clipped to the limit.
///
/// ## Parameters
///
/// * 'frame' - The frame to generate inputs for
/// * 'rng' - The random number generator, e.g. [default_rng]
/// * 'restriction_percent' - The size of the window as a fraction of the limit span
/// * 'reference' - The inputs around which the window is centered
///
/// ## Errors
///
/// * [Error::IncorrectDoF] - Returned when the number of reference inputs does not match the
///   number of degrees of freedom.
pub fn restricted_random_frame_inputs<F: Frame + ?Sized, R: Rng>(
    frame: &F,
    rng: &mut R,
    restriction_percent: f64,
    reference: &[Input],
) -> Result<Vec<Input>, Error> {
    let dof = frame.dof();
    if reference.len() != dof.len() {
        return Err(Error::IncorrectDoF {
            actual: reference.len(),
            expected: dof.len(),
        });
    }

    Ok(dof
        .iter()
        .zip(reference)
        .map(|(limit, r)| {
            let (min, max) = sampling_bounds(limit);
            let half_window = restriction_percent * (max - min) / 2.0;

            let lower = min.max(r.value - half_window);
            let upper = max.min(r.value + half_window);
            Input::new(rng.gen::<f64>() * (upper - lower) + lower)
        })
        .collect())
}
