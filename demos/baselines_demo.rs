// Demonstration: compare the trained agent against the non-learning
// baselines on the same pipeline.
//
// Run from this repo root:
//   cargo run --example baselines_demo -- --episodes 2000 --seed 42

use std::env;
use std::sync::Arc;

use offlearn::trainer::DEFAULT_MAX_STEPS;
use offlearn::{
    AgentConfig, AllCloudPolicy, AllEdgePolicy, DoubleQAgent, PipelineParams, Policy,
    ProfilingCatalog, RandomPolicy, RunMetrics, SimConfig, Simulator,
};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = env::args().collect();
    let episodes: usize = arg_value(&args, "--episodes")
        .and_then(|s| s.parse().ok())
        .unwrap_or(2000);
    let seed: u64 = arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let catalog = Arc::new(demo_catalog());
    let simulator = Simulator::new(Arc::clone(&catalog), SimConfig::default());

    let mut baselines: Vec<Box<dyn Policy>> = vec![
        Box::new(RandomPolicy::new(Arc::clone(&catalog), seed)),
        Box::new(AllEdgePolicy::new(Arc::clone(&catalog))),
        Box::new(AllCloudPolicy::new(Arc::clone(&catalog))),
    ];
    for policy in &mut baselines {
        let metrics =
            RunMetrics::from_policy(policy.as_mut(), &simulator, episodes, DEFAULT_MAX_STEPS, seed);
        println!("Policy: {}", policy.name());
        println!("{}", metrics);
    }

    let mut agent = DoubleQAgent::new(
        Arc::clone(&catalog),
        SimConfig::default(),
        AgentConfig::default(),
        seed,
    );
    let metrics = RunMetrics::from_training(&mut agent, episodes, DEFAULT_MAX_STEPS);
    println!("Policy: double-q");
    println!("{}", metrics);
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
