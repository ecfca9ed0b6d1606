// Lottery draw: six distinct balls from 1 to 45, ascending.

use std::collections::BTreeSet;

use rand::{thread_rng, Rng};
use serde::Serialize;

pub const DRAW_SIZE: usize = 6;
pub const MIN_BALL: u8 = 1;
pub const MAX_BALL: u8 = 45;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Draw {
    numbers: [u8; DRAW_SIZE],
}

impl Draw {
    /// Draws from the thread-local generator.
    pub fn generate() -> Self {
        Self::generate_with(&mut thread_rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_source(|| rng.gen_range(MIN_BALL..=MAX_BALL))
    }

    /// Rejection sampling: keep pulling candidates until six distinct
    /// in-range balls have been seen. Duplicates and out-of-range values
    /// are discarded.
    pub fn from_source<F: FnMut() -> u8>(mut next: F) -> Self {
        let mut seen = BTreeSet::new();
        while seen.len() < DRAW_SIZE {
            let ball = next();
            if (MIN_BALL..=MAX_BALL).contains(&ball) {
                seen.insert(ball);
            }
        }

        let mut numbers = [0; DRAW_SIZE];
        for (slot, ball) in numbers.iter_mut().zip(seen) {
            *slot = ball;
        }
        Self { numbers }
    }

    pub fn numbers(&self) -> &[u8] {
        &self.numbers
    }
}
