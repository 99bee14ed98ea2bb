use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    agent::{Hunter, Target},
    grid::GridWorld,
};

/// Configuration for a [`Session`]
pub struct SessionConfig {
    /// Number of episodes in the batch
    pub episodes: u32,
    /// Seed for the session's RNG; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            episodes: 1000,
            seed: None,
        }
    }
}

/// A training session: one world, one RNG stream, a batch of episodes
///
/// The session owns the world and the random stream; hunters and targets are
/// borrowed per call so their learners outlive any one session. All
/// randomness — placement, Boltzmann sampling, target wandering — draws from
/// the single stream in a fixed call order, so a seeded session is exactly
/// reproducible.
pub struct Session {
    world: GridWorld,
    rng: StdRng,
    episodes: u32,
}

impl Session {
    pub fn new(world: GridWorld, config: SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            world,
            rng,
            episodes: config.episodes,
        }
    }

    /// Run one episode to capture, returning the number of steps taken
    ///
    /// Clears the world, registers and uniformly places every hunter then
    /// every target, and steps until capture: each step, hunters learn in
    /// slice order, then targets wander in slice order. A capture discovered
    /// mid-step does not cut the step short; the remaining agents still act
    /// before the loop re-checks, so a target can walk off the capture cell.
    /// Returns 0 if the random placement already constitutes a capture.
    /// There is no step cap.
    ///
    /// **Panics** if `hunters` or `targets` is empty
    pub fn run_episode(&mut self, hunters: &mut [Hunter], targets: &mut [Target]) -> u32 {
        assert!(!hunters.is_empty(), "an episode needs at least one hunter");
        assert!(!targets.is_empty(), "an episode needs at least one target");

        self.world.reset();
        for hunter in hunters.iter_mut() {
            hunter.place(&mut self.world, &mut self.rng);
        }
        for target in targets.iter_mut() {
            target.place(&mut self.world, &mut self.rng);
        }

        let mut steps = 0;
        while !self.world.is_caught() {
            for hunter in hunters.iter_mut() {
                hunter.learn(&mut self.world, &mut self.rng);
            }
            for target in targets.iter_mut() {
                target.wander(&mut self.world, &mut self.rng);
            }
            steps += 1;
        }
        steps
    }

    /// Run the configured batch of episodes over the same agents
    ///
    /// Learning persists across the whole batch: Q-tables accumulate and
    /// temperatures keep cooling from episode to episode. Returns the
    /// ordered per-episode step counts — the hand-off artifact for external
    /// aggregation.
    pub fn run(&mut self, hunters: &mut [Hunter], targets: &mut [Target]) -> Vec<u32> {
        let mut step_counts = Vec::with_capacity(self.episodes as usize);
        for episode in 0..self.episodes {
            let steps = self.run_episode(hunters, targets);
            debug!("episode {episode}: caught in {steps} steps");
            step_counts.push(steps);
        }
        info!(
            "ran {} episodes; first caught in {:?} steps, last in {:?}",
            self.episodes,
            step_counts.first(),
            step_counts.last(),
        );
        step_counts
    }
}

#[cfg(test)]
mod tests {
    use crate::{agent::perception::PerceptionWindow, algo::QLearnerConfig};

    use super::*;

    fn small_session(seed: u64, episodes: u32) -> Session {
        Session::new(
            GridWorld::new(10, 10),
            SessionConfig {
                episodes,
                seed: Some(seed),
            },
        )
    }

    #[test]
    fn episode_terminates_and_counts_steps() {
        let mut session = small_session(42, 1);
        let mut hunters = [Hunter::new(
            PerceptionWindow::new(2, 2),
            QLearnerConfig::default(),
        )];
        let mut targets = [Target::new()];

        for _ in 0..20 {
            session.run_episode(&mut hunters, &mut targets);
        }
    }

    #[test]
    fn coincident_spawn_is_a_zero_step_episode() {
        // A 1x1 grid forces hunter and target onto the same cell at
        // placement, so capture holds before any hunter action.
        let mut session = Session::new(
            GridWorld::new(1, 1),
            SessionConfig {
                episodes: 1,
                seed: Some(0),
            },
        );
        let mut hunters = [Hunter::new(
            PerceptionWindow::new(1, 1),
            QLearnerConfig::default(),
        )];
        let mut targets = [Target::new()];

        let before = hunters[0].learner().temperature();
        assert_eq!(session.run_episode(&mut hunters, &mut targets), 0);
        assert_eq!(
            hunters[0].learner().temperature(),
            before,
            "no decision is made in a zero-step episode",
        );
    }

    #[test]
    fn same_seed_reproduces_the_run() {
        let step_counts = |seed| {
            let mut session = small_session(seed, 30);
            let mut hunters = [Hunter::remembering(
                PerceptionWindow::new(1, 1),
                QLearnerConfig::default(),
            )];
            let mut targets = [Target::new()];
            session.run(&mut hunters, &mut targets)
        };

        let a = step_counts(7);
        let b = step_counts(7);
        assert_eq!(a.len(), 30);
        assert_eq!(a, b, "one seed, one trajectory");
    }

    #[test]
    fn learning_persists_across_the_batch() {
        let mut session = small_session(12, 60);
        let mut hunters = [Hunter::new(
            PerceptionWindow::new(2, 2),
            QLearnerConfig::default(),
        )];
        let mut targets = [Target::new()];

        session.run(&mut hunters, &mut targets);
        let learner = hunters[0].learner();
        assert!(
            learner.temperature() < 1.0,
            "temperature has cooled and never reset",
        );
        let touched = (0..learner.states())
            .flat_map(|s| learner.q_values(s).iter())
            .filter(|&&q| q != 0.0)
            .count();
        assert!(touched > 0, "Q-values accumulated over the batch");
    }

    #[test]
    #[should_panic(expected = "at least one target")]
    fn empty_target_roster_is_rejected() {
        let mut session = small_session(0, 1);
        let mut hunters = [Hunter::new(
            PerceptionWindow::new(1, 1),
            QLearnerConfig::default(),
        )];
        session.run_episode(&mut hunters, &mut []);
    }
}
