//! Timetable GA CLI - Run a timetable search from JSON configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use rand::SeedableRng;
use rand::rngs::StdRng;

use timetable_ga::{
    evolution::{
        ProgressCallback, SearchEngine, SearchError, SearchPhase, SearchProgress, TimetableExport,
    },
    schema::{School, SearchConfig, generate_school},
};

/// Failures surfaced by the command line driver.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Error reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error parsing {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Error writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Search(#[from] SearchError),
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [output.json]", args[0]);
        eprintln!();
        eprintln!("Search for a school timetable from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to search configuration file");
        eprintln!("  output.json  Export path (default: timetable.json)");
        eprintln!();
        eprintln!("Teachers and students are read from <config>.school.json when present,");
        eprintln!("otherwise a synthetic school is generated.");
        eprintln!("Example configuration is generated with --example flag.");
        return ExitCode::FAILURE;
    }

    if args[1] == "--example" {
        return match print_example_config() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        };
    }

    let config_path = PathBuf::from(&args[1]);
    let output_path = PathBuf::from(args.get(2).map_or("timetable.json", String::as_str));

    match run(&config_path, &output_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: &Path, output_path: &Path) -> Result<(), CliError> {
    let config: SearchConfig = read_json(config_path)?;

    // Load or generate the school
    let school_path = config_path.with_extension("school.json");
    let school: School = if school_path.exists() {
        read_json(&school_path)?
    } else {
        let seed = config.random_seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        generate_school(config.synthetic.teachers, config.synthetic.students, &mut rng)
    };

    println!("Timetable Search");
    println!("================");
    println!(
        "School: {} teachers, {} students",
        school.teachers.len(),
        school.students.len()
    );
    println!(
        "Population: {} (elite {}, immigrant rate {})",
        config.population.size, config.population.elite, config.population.immigrant_rate
    );
    println!("Max generations: {}", config.population.max_generations);
    println!();

    let mut engine = SearchEngine::new(config, school.teachers, school.students)?;

    let report: ProgressCallback = Box::new(|progress: &SearchProgress| {
        if progress.phase == SearchPhase::Evaluating
            && let Some(best) = progress.best_fitness
        {
            println!(
                "  Generation {}/{}: best={}, avg={:.1}, stagnation={}",
                progress.generation,
                progress.max_generations,
                best,
                progress.avg_fitness,
                progress.stagnation_count
            );
        }
    });

    println!("Running search...");
    let result = engine.run_with_callback(report)?;

    let stats = &result.stats;
    let breakdown = &result.breakdown;
    println!();
    println!("Stopped: {:?} after {} generations", stats.stop_reason, stats.generations);
    println!("Best fitness: {}", result.fitness());
    println!("  load:           {}", breakdown.load);
    println!("  availability:   {}", breakdown.availability);
    println!("  coverage:       {}", breakdown.coverage);
    println!("  student_core:   {}", breakdown.student_core);
    println!("  student_pe:     {}", breakdown.student_pe);
    println!("  gender_balance: {}", breakdown.gender_balance);
    println!("Skipped sections during construction: {}", stats.skipped_sections);
    println!(
        "Time: {:.2}s ({:.1} evaluations/s)",
        stats.elapsed_seconds, stats.evaluations_per_second
    );

    let export = TimetableExport::from_result(&result, engine.teachers(), engine.students());
    export.save(output_path).map_err(|source| CliError::Write {
        path: output_path.to_path_buf(),
        source,
    })?;
    println!("Wrote {}", output_path.display());

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let content = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn print_example_config() -> Result<(), serde_json::Error> {
    let config = SearchConfig::default();
    let school = generate_school(3, 2, &mut StdRng::seed_from_u64(0));

    println!("Example configuration (config.json):");
    println!("{}", serde_json::to_string_pretty(&config)?);
    println!();
    println!("Example school (config.school.json):");
    println!("{}", serde_json::to_string_pretty(&school)?);
    Ok(())
}
