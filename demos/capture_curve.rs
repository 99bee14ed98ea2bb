//! Train a single hunter and write its learning curve to CSV
//!
//! The per-episode step counts land in `local/capture_curve.csv` for an
//! external plotting tool to consume.

use std::error::Error;

use pursuit::{
    agent::{perception::PerceptionWindow, Hunter, Target},
    algo::QLearnerConfig,
    grid::GridWorld,
    sim::{Session, SessionConfig},
};

const GRID_SIZE: i32 = 10;
const NUM_EPISODES: u32 = 2000;
const SEED: u64 = 42;

fn main() -> Result<(), Box<dyn Error>> {
    let mut session = Session::new(
        GridWorld::new(GRID_SIZE, GRID_SIZE),
        SessionConfig {
            episodes: NUM_EPISODES,
            seed: Some(SEED),
        },
    );
    let mut hunters = [Hunter::new(
        PerceptionWindow::new(2, 2),
        QLearnerConfig::default(),
    )];
    let mut targets = [Target::new()];

    let step_counts = session.run(&mut hunters, &mut targets);

    std::fs::create_dir_all("local")?;
    let mut writer = csv::Writer::from_path("local/capture_curve.csv")?;
    writer.write_record(["episode", "steps"])?;
    for (episode, steps) in step_counts.iter().enumerate() {
        writer.write_record([episode.to_string(), steps.to_string()])?;
    }
    writer.flush()?;

    let total: u64 = step_counts.iter().map(|&s| s as u64).sum();
    println!(
        "{} episodes, {:.1} steps to capture on average -> local/capture_curve.csv",
        NUM_EPISODES,
        total as f64 / NUM_EPISODES as f64,
    );
    Ok(())
}
