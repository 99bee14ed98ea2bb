use rand::Rng;

use crate::decay::Decay;

/// Softmax exploration policy (also known as Boltzmann exploration) with time-decaying temperature
///
/// Action probabilities are proportional to e<sup>Q/τ</sup>. The temperature τ cools by
/// one decay step on every decision, so the policy drifts from exploration toward
/// exploitation over the lifetime of a training run, never resetting between episodes.
pub struct Softmax<D: Decay> {
    temperature: D,
    decisions: u32,
}

impl<D: Decay> Softmax<D> {
    /// Initialize softmax policy with a temperature decay strategy
    pub fn new(decay: D) -> Self {
        Self {
            temperature: decay,
            decisions: 0,
        }
    }

    /// The temperature the next decision will be made at
    pub fn temperature(&self) -> f32 {
        self.temperature.evaluate(self.decisions as f32)
    }

    /// Boltzmann probabilities for a set of Q-values at temperature `tau`
    ///
    /// Weights are computed as e<sup>(Q − max Q)/τ</sup>; the shift keeps every weight
    /// finite for any finite Q-values and any positive temperature without changing
    /// the distribution.
    pub fn probabilities(q_values: &[f32], tau: f32) -> Vec<f32> {
        let max = q_values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let exponentials = q_values.iter().map(|q| ((q - max) / tau).exp());
        let sum: f32 = exponentials.clone().sum();
        exponentials.map(|w| w / sum).collect()
    }

    /// Invoke softmax policy on a set of Q-values, advancing the temperature one decay step
    ///
    /// Samples the Boltzmann distribution by drawing r in [0,1) and walking the
    /// probabilities in index order, subtracting each from r until r falls below the
    /// current one. If floating-point summation leaves the draw unclaimed, the last
    /// action is chosen.
    pub fn choose(&mut self, q_values: &[f32], rng: &mut impl Rng) -> usize {
        assert!(!q_values.is_empty(), "`q_values` is not empty");
        let probabilities = Self::probabilities(q_values, self.temperature());
        self.decisions += 1;

        let mut r = rng.gen::<f32>();
        for (i, p) in probabilities.iter().enumerate() {
            if r < *p {
                return i;
            }
            r -= p;
        }
        q_values.len() - 1
    }
}
