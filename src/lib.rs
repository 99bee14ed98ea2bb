/// Hunters and targets
pub mod agent;

/// Implemented RL algorithms
pub mod algo;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Exploration policies
pub mod exploration;

/// The bounded grid the pursuit plays out on
pub mod grid;

/// Episode and batch drivers
pub mod sim;

mod util;
