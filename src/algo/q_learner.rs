use rand::Rng;

use crate::{assert_interval, decay, exploration::Softmax};

/// Number of actions per state; one per [`Direction`](crate::grid::Direction)
pub const ACTIONS: usize = 4;

/// Configuration for a [`QLearner`]
pub struct QLearnerConfig {
    /// Learning rate α — must be in `(0,1]`
    pub alpha: f32,
    /// Discount factor γ — must be in `[0,1]`
    pub gamma: f32,
    /// Per-decision multiplier for the Boltzmann temperature — must be in `(0,1)`
    pub temperature_rate: f32,
}

impl Default for QLearnerConfig {
    fn default() -> Self {
        Self {
            alpha: 0.8,
            gamma: 0.9,
            temperature_rate: 0.999,
        }
    }
}

/// A tabular Q-learning agent over a closed integer state space
///
/// Holds a dense Q-table of one fixed-width row per state, a Boltzmann
/// action-selection policy whose temperature starts at 1 and cools by
/// `temperature_rate` on every decision, and applies the one-step TD(0)
/// update. Nothing here ever resets between episodes; the table and the
/// temperature live as long as the learner does.
pub struct QLearner {
    table: Vec<[f32; ACTIONS]>,
    policy: Softmax<decay::Geometric>,
    alpha: f32,
    gamma: f32,
}

impl QLearner {
    /// Initialize a learner with `states` all-zero Q-rows
    ///
    /// **Panics** if `alpha` is not in `(0,1]`, `gamma` is not in `[0,1]`,
    /// or `temperature_rate` is not in `(0,1)`
    pub fn new(states: usize, config: QLearnerConfig) -> Self {
        assert_interval!(config.alpha, 0.0, 1.0);
        assert!(config.alpha > 0.0, "`alpha` must be positive");
        assert_interval!(config.gamma, 0.0, 1.0);
        let temperature = decay::Geometric::new(1.0, config.temperature_rate)
            .expect("`temperature_rate` must be in the interval (0, 1)");
        Self {
            table: vec![[0.0; ACTIONS]; states],
            policy: Softmax::new(temperature),
            alpha: config.alpha,
            gamma: config.gamma,
        }
    }

    pub fn states(&self) -> usize {
        self.table.len()
    }

    pub fn q_values(&self, state: usize) -> &[f32; ACTIONS] {
        &self.table[state]
    }

    /// The temperature the next decision will be made at
    pub fn temperature(&self) -> f32 {
        self.policy.temperature()
    }

    /// Sample an action for `state` from the Boltzmann distribution,
    /// advancing the temperature one decay step
    ///
    /// The temperature cools on every decision, whether or not a Q-update
    /// follows.
    pub fn decide_action(&mut self, state: usize, rng: &mut impl Rng) -> usize {
        self.policy.choose(&self.table[state], rng)
    }

    /// In-place TD(0) update:
    /// Q(s,a) ← (1−α)·Q(s,a) + α·(reward + γ·max<sub>a'</sub> Q(s',a'))
    pub fn update(&mut self, state: usize, action: usize, reward: f32, next_state: usize) {
        let max_next_q = self.table[next_state]
            .iter()
            .copied()
            .fold(f32::NEG_INFINITY, f32::max);
        let q = &mut self.table[state][action];
        *q = (1.0 - self.alpha) * *q + self.alpha * (reward + self.gamma * max_next_q);
    }

    /// One fused acting-and-learning step: decide an action for `state`,
    /// run it through `act` (which performs the environment transition and
    /// reports `(reward, next_state)`), and apply the TD(0) update
    ///
    /// Exactly one decision, one transition, and one online update per call;
    /// there is no batching or replay.
    pub fn learn(
        &mut self,
        state: usize,
        rng: &mut impl Rng,
        act: impl FnOnce(usize) -> (f32, usize),
    ) {
        let action = self.decide_action(state, rng);
        let (reward, next_state) = act(action);
        self.update(state, action, reward, next_state);
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use strum::EnumCount;

    use crate::grid::Direction;

    use super::*;

    #[test]
    fn action_width_matches_directions() {
        assert_eq!(ACTIONS, Direction::COUNT);
    }

    #[test]
    fn table_starts_zeroed() {
        let learner = QLearner::new(10, QLearnerConfig::default());
        assert_eq!(learner.states(), 10);
        for state in 0..10 {
            assert_eq!(learner.q_values(state), &[0.0; ACTIONS]);
        }
        assert_eq!(learner.temperature(), 1.0);
    }

    #[test]
    #[should_panic(expected = "alpha")]
    fn zero_alpha_is_rejected() {
        QLearner::new(
            1,
            QLearnerConfig {
                alpha: 0.0,
                ..Default::default()
            },
        );
    }

    #[test]
    #[should_panic(expected = "temperature_rate")]
    fn unit_temperature_rate_is_rejected() {
        QLearner::new(
            1,
            QLearnerConfig {
                temperature_rate: 1.0,
                ..Default::default()
            },
        );
    }

    #[test]
    fn update_matches_worked_example() {
        // alpha 0.8, gamma 0.9, reward 1, all-zero next row:
        // Q(s,a) = 0.2 * 0 + 0.8 * (1 + 0.9 * 0) = 0.8
        let mut learner = QLearner::new(5, QLearnerConfig::default());
        learner.update(2, 1, 1.0, 4);
        assert!((learner.q_values(2)[1] - 0.8).abs() < 1e-6);

        learner.update(2, 1, 1.0, 4);
        assert!((learner.q_values(2)[1] - (0.2 * 0.8 + 0.8)).abs() < 1e-6);
    }

    #[test]
    fn repeated_updates_converge_to_fixed_point() {
        // Fixed point of the update is r + gamma * max Q(s', .)
        let mut learner = QLearner::new(3, QLearnerConfig {
            alpha: 0.3,
            gamma: 0.9,
            ..Default::default()
        });
        learner.table[1] = [0.0, 2.0, -1.0, 0.5];

        for _ in 0..500 {
            learner.update(0, 2, -0.1, 1);
        }
        let fixed_point = -0.1 + 0.9 * 2.0;
        assert!(
            (learner.q_values(0)[2] - fixed_point).abs() < 1e-4,
            "Q converges to r + gamma * M, got {}",
            learner.q_values(0)[2],
        );
    }

    #[test]
    fn temperature_decays_independently_of_rewards() {
        let mut learner = QLearner::new(2, QLearnerConfig::default());
        let mut rng = StdRng::seed_from_u64(11);

        learner.learn(0, &mut rng, |_| (100.0, 1));
        learner.learn(0, &mut rng, |_| (-100.0, 1));
        learner.decide_action(1, &mut rng);
        assert!(
            (learner.temperature() - 0.999f32.powf(3.0)).abs() < 1e-7,
            "temperature is rate^k after k decisions, learn calls included",
        );
    }

    #[test]
    fn learn_runs_one_transition_and_one_update() {
        let mut learner = QLearner::new(4, QLearnerConfig::default());
        let mut rng = StdRng::seed_from_u64(0);

        let mut calls = 0;
        let mut chosen = usize::MAX;
        learner.learn(1, &mut rng, |action| {
            calls += 1;
            chosen = action;
            (1.0, 3)
        });

        assert_eq!(calls, 1, "the callback runs exactly once");
        assert!(chosen < ACTIONS);
        assert!((learner.q_values(1)[chosen] - 0.8).abs() < 1e-6);
        for (a, &q) in learner.q_values(1).iter().enumerate() {
            if a != chosen {
                assert_eq!(q, 0.0, "only the taken action is updated");
            }
        }
    }
}
