pub mod perception;

use rand::{seq::SliceRandom, Rng};
use strum::VariantArray;

use crate::{
    algo::{QLearner, QLearnerConfig},
    grid::{Direction, GridWorld, MoverId, MoverKind, Point},
};

use perception::{Direct, Perception, PerceptionWindow, ShortTermMemory};

/// Reward delivered on the step that captures the target
pub const CAPTURE_REWARD: f32 = 1.0;

/// Per-step cost shaping the policy toward faster capture
pub const STEP_COST: f32 = -0.1;

/// A pursuing agent that learns to close on the target
///
/// Owns its [`QLearner`] (sized to the perception window's state space) and
/// a [`Perception`] strategy deciding what it acts on each step. The learner
/// and its temperature persist across episodes; only the registry handle is
/// per-episode.
pub struct Hunter {
    id: Option<MoverId>,
    window: PerceptionWindow,
    learner: QLearner,
    sight: Box<dyn Perception>,
}

impl Hunter {
    /// A hunter that acts only on fresh observations
    pub fn new(window: PerceptionWindow, config: QLearnerConfig) -> Self {
        Self::with_sight(window, config, Box::new(Direct))
    }

    /// A hunter that substitutes short-term memory when the target is out of
    /// view, and skips learning on those guessed steps
    pub fn remembering(window: PerceptionWindow, config: QLearnerConfig) -> Self {
        Self::with_sight(window, config, Box::new(ShortTermMemory::default()))
    }

    pub fn with_sight(
        window: PerceptionWindow,
        config: QLearnerConfig,
        sight: Box<dyn Perception>,
    ) -> Self {
        Self {
            id: None,
            window,
            learner: QLearner::new(window.states(), config),
            sight,
        }
    }

    pub fn learner(&self) -> &QLearner {
        &self.learner
    }

    pub const fn window(&self) -> PerceptionWindow {
        self.window
    }

    /// Register in `world` at a uniformly random cell
    pub fn place(&mut self, world: &mut GridWorld, rng: &mut impl Rng) {
        let pos = world.random_point(rng);
        self.place_at(world, pos);
    }

    pub fn place_at(&mut self, world: &mut GridWorld, pos: Point) {
        self.id = Some(world.add_mover(MoverKind::Hunter, pos));
    }

    /// One acting-and-learning step
    ///
    /// Perceives through the sight strategy and encodes the percept as a
    /// state id. On a fresh observation, one fused [`QLearner::learn`] call
    /// moves the hunter and reinforces the transition: capture pays
    /// [`CAPTURE_REWARD`] and lands in the co-located terminal state,
    /// anything else pays [`STEP_COST`] and lands in the post-move percept's
    /// state. On a guessed observation the hunter only moves — the policy
    /// decision still cools the temperature, but no Q-update is applied to a
    /// transition that may never have happened.
    ///
    /// **Panics** if the hunter has not been placed this episode
    pub fn learn(&mut self, world: &mut GridWorld, rng: &mut impl Rng) {
        let id = self.id.expect("hunter must be placed before learning");
        let window = self.window;
        let fresh = world.perceive(world.position(id), window.range());
        let percept = self.sight.observe(fresh);
        let state = window.state_id(percept.seen);

        if percept.guessed {
            let action = self.learner.decide_action(state, rng);
            world.step_mover(id, direction_for(action));
            return;
        }

        let sight = &mut self.sight;
        self.learner.learn(state, rng, |action| {
            world.step_mover(id, direction_for(action));
            if world.is_caught() {
                (CAPTURE_REWARD, window.state_id(Some((0, 0))))
            } else {
                let after = world.perceive(world.position(id), window.range());
                let next = sight.observe(after);
                (STEP_COST, window.state_id(next.seen))
            }
        });
    }
}

/// A prey agent that wanders uniformly at random and never learns
#[derive(Default)]
pub struct Target {
    id: Option<MoverId>,
}

impl Target {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place(&mut self, world: &mut GridWorld, rng: &mut impl Rng) {
        let pos = world.random_point(rng);
        self.place_at(world, pos);
    }

    pub fn place_at(&mut self, world: &mut GridWorld, pos: Point) {
        self.id = Some(world.add_mover(MoverKind::Target, pos));
    }

    /// Take one uniformly random clamped step
    ///
    /// **Panics** if the target has not been placed this episode
    pub fn wander(&mut self, world: &mut GridWorld, rng: &mut impl Rng) {
        let id = self.id.expect("target must be placed before moving");
        let direction = *Direction::VARIANTS
            .choose(rng)
            .expect("there are four directions");
        world.step_mover(id, direction);
    }
}

fn direction_for(action: usize) -> Direction {
    Direction::from_repr(action).expect("action indices map one-to-one onto directions")
}
