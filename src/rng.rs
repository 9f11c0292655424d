//! Seeded randomness for every roll in the simulation.
//!
//! All chance checks go through [`Dice`], so a whole session is reproducible
//! from its seed. Tests can queue scripted values with [`Dice::script`]; they
//! are consumed before the generator is consulted again.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

pub struct Dice {
    rng: Xoshiro256PlusPlus,
    scripted: VecDeque<f64>,
}

impl Dice {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
            scripted: VecDeque::new(),
        }
    }

    /// Queue values to be returned by the next [`roll`](Dice::roll) calls.
    pub fn script(&mut self, values: impl IntoIterator<Item = f64>) {
        self.scripted.extend(values);
    }

    /// Uniform value in `[0, 1)`.
    pub fn roll(&mut self) -> f64 {
        match self.scripted.pop_front() {
            Some(v) => v,
            None => self.rng.gen::<f64>(),
        }
    }

    /// True with probability `p`. Always consumes one roll.
    pub fn chance(&mut self, p: f64) -> bool {
        self.roll() < p
    }

    /// Uniform value in `[lo, hi)`. Always consumes one roll.
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        let r = self.roll();
        if hi <= lo {
            lo
        } else {
            lo + r * (hi - lo)
        }
    }

    /// Uniform index in `0..n`. Returns 0 when `n == 0`.
    pub fn pick(&mut self, n: usize) -> usize {
        let r = self.roll();
        if n == 0 {
            return 0;
        }
        ((r * n as f64) as usize).min(n - 1)
    }

    /// In-place Fisher–Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.pick(i + 1);
            items.swap(i, j);
        }
    }
}
