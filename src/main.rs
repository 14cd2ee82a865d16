/// Entry point: plays the built-in levels headlessly and prints a report.

use std::process::ExitCode;

use lavarunner::config::GameConfig;
use lavarunner::sim::{embedded_levels, run_game, standard_dictionary, GameReport, Level, LevelParser};

fn main() -> ExitCode {
    env_logger::init();

    let config = GameConfig::load();
    log::info!("Lava Runner starting with {:?}", config);

    let mut parser = LevelParser::new(standard_dictionary());
    if let Some(seed) = config.general.seed {
        log::info!("Using seed: {seed}");
        parser = parser.with_seed(seed);
    }

    let plans = embedded_levels();
    let mut last_frame: Option<Level> = None;
    let dump_json = config.general.dump_json;

    let result = run_game(&plans, &parser, &config.speed, |level, _events| {
        if dump_json {
            last_frame = Some(level.clone());
        }
    });

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Game error: {e}");
            return ExitCode::FAILURE;
        }
    };

    print_report(&report);

    if let Some(level) = last_frame {
        match serde_json::to_string_pretty(&level) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("could not serialize final level: {e}"),
        }
    }

    if report.completed {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}

fn print_report(report: &GameReport) {
    for (idx, level) in report.levels.iter().enumerate() {
        println!("Level {}: {}", idx + 1, level.name);
        for (n, attempt) in level.attempts.iter().enumerate() {
            println!(
                "  attempt {}: {:?} in {} ticks, {} coin(s)",
                n + 1,
                attempt.outcome,
                attempt.ticks,
                attempt.coins_collected,
            );
        }
    }
    println!();
    if report.completed {
        println!("You win!");
    } else {
        println!("Game over.");
    }
}
