/*
 * Random Module
 *
 * Every random draw in the simulation (wander jitter, wander construction,
 * particle burst velocities) goes through the RandomSource trait so that a
 * seeded or scripted source can be swapped in for reproducible runs.
 */

use rand::rngs::{StdRng, ThreadRng};
use rand::Rng;

/// A source of uniformly distributed floats in `[0, 1)`.
pub trait RandomSource {
    fn next_f32(&mut self) -> f32;
}

impl RandomSource for StdRng {
    fn next_f32(&mut self) -> f32 {
        self.gen::<f32>()
    }
}

impl RandomSource for ThreadRng {
    fn next_f32(&mut self) -> f32 {
        self.gen::<f32>()
    }
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_f32(&mut self) -> f32 {
        (**self).next_f32()
    }
}

/// Uniform float in `[min, max)`.
pub fn random_range(rng: &mut dyn RandomSource, min: f32, max: f32) -> f32 {
    min + rng.next_f32() * (max - min)
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Values are clamped into `[0, 1)` as they are handed out. An empty list
/// always yields 0.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// How many values have been drawn so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 1.0 - f32::EPSILON)
    }
}
