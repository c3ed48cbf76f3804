// Demonstration: train the double-Q agent on a profiled pipeline and print
// the learned per-layer assignment.
//
// Run from this repo root:
//   cargo run --example train_demo -- --episodes 5000 --seed 42

use std::env;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use offlearn::trainer::DEFAULT_MAX_STEPS;
use offlearn::{
    AgentConfig, DoubleQAgent, PipelineParams, ProfilingCatalog, RunMetrics, SimConfig, Simulator,
    State,
};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = env::args().collect();
    let episodes: usize = arg_value(&args, "--episodes")
        .and_then(|s| s.parse().ok())
        .unwrap_or(5000);
    let seed: u64 = arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let catalog = Arc::new(demo_catalog());
    let mut agent = DoubleQAgent::new(
        Arc::clone(&catalog),
        SimConfig::default(),
        AgentConfig::default(),
        seed,
    );

    let metrics = RunMetrics::from_training(&mut agent, episodes, DEFAULT_MAX_STEPS);
    println!("{}", metrics);

    // Replay one pipeline pass greedily with the channel noise turned off.
    let noiseless = Simulator::new(Arc::clone(&catalog), SimConfig::noiseless());
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = State::initial(catalog.bandwidth_mbps());
    println!("Greedy assignment:");
    loop {
        let action = agent.greedy_action(&state);
        println!("  {}", action);
        let outcome = noiseless.step(&state, &action, &mut rng);
        if outcome.terminal {
            break;
        }
        state = outcome.next_state;
    }
}

/// Five-layer pipeline with measured per-node times and powers.
fn demo_catalog() -> ProfilingCatalog {
    ProfilingCatalog::new(
        vec![1, 3, 2, 4, 1],
        vec![
            vec![1.0],
            vec![35.0, 28.0, 22.0],
            vec![45.0, 40.0],
            vec![30.0, 25.0, 38.0, 42.0],
            vec![1.0],
        ],
        vec![
            vec![0.0],
            vec![16.0, 12.0, 10.0],
            vec![20.0, 24.0],
            vec![12.0, 10.0, 14.0, 18.0],
            vec![0.0],
        ],
        vec![
            vec![0.5],
            vec![12.132, 11.305, 10.596],
            vec![13.304, 12.717],
            vec![11.542, 10.923, 12.553, 13.076],
            vec![0.5],
        ],
        PipelineParams::default(),
    )
    .expect("demo profiling data is well-formed")
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
