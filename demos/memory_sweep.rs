//! Compare direct and remembering hunters across perception radii
//!
//! Runs one training session per (radius, sight) configuration and prints a
//! bucketed average of steps-to-capture, showing how perception range and
//! short-term memory affect learning speed.

use pursuit::{
    agent::{perception::PerceptionWindow, Hunter, Target},
    algo::QLearnerConfig,
    grid::GridWorld,
    sim::{Session, SessionConfig},
};

const GRID_SIZE: i32 = 10;
const NUM_EPISODES: u32 = 2000;
const BUCKET: usize = 200;
const SEED: u64 = 7;

fn bucket_averages(step_counts: &[u32]) -> Vec<f64> {
    step_counts
        .chunks(BUCKET)
        .map(|chunk| chunk.iter().map(|&s| s as f64).sum::<f64>() / chunk.len() as f64)
        .collect()
}

fn train(hunter: &mut Hunter) -> Vec<u32> {
    let mut session = Session::new(
        GridWorld::new(GRID_SIZE, GRID_SIZE),
        SessionConfig {
            episodes: NUM_EPISODES,
            seed: Some(SEED),
        },
    );
    let mut targets = [Target::new()];
    session.run(std::slice::from_mut(hunter), &mut targets)
}

fn main() {
    println!(
        "{:<20} {}",
        "config",
        (1..=NUM_EPISODES as usize / BUCKET)
            .map(|i| format!("{:>8}", i * BUCKET))
            .collect::<String>(),
    );

    for radius in [1, 2, 3] {
        let window = PerceptionWindow::new(radius, radius);
        for remembering in [false, true] {
            let mut hunter = if remembering {
                Hunter::remembering(window, QLearnerConfig::default())
            } else {
                Hunter::new(window, QLearnerConfig::default())
            };
            let step_counts = train(&mut hunter);

            let label = format!(
                "r={radius} {}",
                if remembering { "remembering" } else { "direct" },
            );
            let row: String = bucket_averages(&step_counts)
                .iter()
                .map(|avg| format!("{avg:>8.1}"))
                .collect();
            println!("{label:<20} {row}");
        }
    }
}
