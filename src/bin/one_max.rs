//! Console driver for the one-max solver.
//!
//! Runs the GA with the classic parameters (population 100, chromosome
//! length 50, mutation rate 0.001, crossover rate 0.95, elitism count 2)
//! and prints the fittest chromosome each generation.

use onemax_ga::{GaConfig, GaRunner};

fn main() {
    let config = GaConfig::default();

    let result = GaRunner::run_with_observer(&config, |_, best| {
        println!("Best solution: {best}");
    })
    .unwrap_or_else(|err| {
        eprintln!("one_max: {err}");
        std::process::exit(1);
    });

    println!("Found solution in {} generations", result.generations);
    println!("Best solution: {}", result.best);
}
