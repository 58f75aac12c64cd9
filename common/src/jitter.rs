use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Extent;
use crate::point::Point;

/// Source of per-coordinate offsets for one perturbation step.
pub trait Jitter {
    fn offset(&mut self) -> f64;
}

impl<F: FnMut() -> f64> Jitter for F {
    fn offset(&mut self) -> f64 {
        self()
    }
}

/// Uniform offsets in `[-max_offset, max_offset)`, rounded to one decimal.
#[derive(Debug)]
pub struct RandomJitter<R = StdRng> {
    rng: R,
    max_offset: f64,
}

impl RandomJitter<StdRng> {
    pub fn from_entropy(max_offset: f64) -> Self {
        Self::new(StdRng::from_entropy(), max_offset)
    }
}

impl<R: Rng> RandomJitter<R> {
    pub fn new(rng: R, max_offset: f64) -> Self {
        Self { rng, max_offset }
    }
}

impl<R: Rng> Jitter for RandomJitter<R> {
    fn offset(&mut self) -> f64 {
        let spread = self.max_offset * 2.0;
        if spread <= 0.0 {
            return 0.0;
        }
        let draw = self.rng.gen_range(0.0..spread);
        (draw * 10.0).round() / 10.0 - self.max_offset
    }
}

/// One perturbation step. Points with a zero or NaN coordinate are copied
/// through untouched and consume no offsets; all others are nudged and then
/// clamped into their extents. The x offset is always drawn before the y one.
pub fn perturb(
    points: &[Point],
    jitter: &mut dyn Jitter,
    x_extent: Extent,
    y_extent: Extent,
) -> Vec<Point> {
    points
        .iter()
        .map(|point| {
            if !point.is_plottable() {
                return point.clone();
            }
            let x = x_extent.clamp(point.x + jitter.offset());
            let y = y_extent.clamp(point.y + jitter.offset());
            Point {
                name: point.name.clone(),
                x,
                y,
            }
        })
        .collect()
}
