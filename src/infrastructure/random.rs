use crate::domain::DecisionSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Decision source backed by a `rand` generator.
///
/// Approves when a uniform draw from `[0, 1)` falls below the approval
/// probability, so a probability of 0.7 approves roughly seven reviews in ten.
#[derive(Debug)]
pub struct RngDecision {
    rng: StdRng,
}

impl RngDecision {
    /// Seeds from operating system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// A reproducible sequence of decisions.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when a seed is given, otherwise from entropy.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl DecisionSource for RngDecision {
    fn approve(&mut self, approval_probability: f64) -> bool {
        let draw: f64 = self.rng.gen_range(0.0..1.0);
        draw < approval_probability
    }
}
