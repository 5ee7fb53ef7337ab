//! Quick search performance test

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;
use timetable_ga::{
    SearchConfig, SearchEngine,
    schema::{EvaluationConfig, PopulationConfig, generate_school},
};

fn main() {
    println!("=== Search Performance Test ===\n");

    // Test different school sizes
    for (teachers, students) in [(10, 100), (20, 250), (40, 600)] {
        println!("School: {} teachers, {} students", teachers, students);

        let school = generate_school(teachers, students, &mut StdRng::seed_from_u64(42));
        let config = SearchConfig {
            population: PopulationConfig {
                size: 30,
                max_generations: 10,
                stagnation_limit: 10,
                ..Default::default()
            },
            random_seed: Some(42),
            ..Default::default()
        };

        let start = Instant::now();
        let mut engine = match SearchEngine::new(config, school.teachers, school.students) {
            Ok(engine) => engine,
            Err(e) => {
                eprintln!("  {}", e);
                continue;
            }
        };
        let result = match engine.run() {
            Ok(result) => result,
            Err(e) => {
                eprintln!("  {}", e);
                continue;
            }
        };
        let elapsed = start.elapsed();

        let total_evals = result.stats.total_evaluations;
        let evals_per_sec = total_evals as f64 / elapsed.as_secs_f64();

        println!("  Generations:    {}", result.stats.generations);
        println!("  Evaluations:    {}", total_evals);
        println!("  Elapsed:        {:.2}s", elapsed.as_secs_f64());
        println!("  Evals/sec:      {:.1}", evals_per_sec);
        println!("  Best fitness:   {}", result.fitness());
        println!("  Stop reason:    {:?}", result.stats.stop_reason);
        println!();
    }

    println!("=== Parallel vs Sequential (20 teachers, 250 students) ===\n");

    for parallel in [false, true] {
        let school = generate_school(20, 250, &mut StdRng::seed_from_u64(42));
        let config = SearchConfig {
            population: PopulationConfig {
                size: 40,
                max_generations: 5,
                ..Default::default()
            },
            evaluation: EvaluationConfig { parallel },
            random_seed: Some(42),
            ..Default::default()
        };

        let start = Instant::now();
        let Ok(mut engine) = SearchEngine::new(config, school.teachers, school.students) else {
            continue;
        };
        let Ok(result) = engine.run() else {
            continue;
        };
        let elapsed = start.elapsed();

        println!(
            "  parallel={:5}: {:.2}s, {:.1} evals/s, best {}",
            parallel,
            elapsed.as_secs_f64(),
            result.stats.total_evaluations as f64 / elapsed.as_secs_f64(),
            result.fitness()
        );
    }
}
