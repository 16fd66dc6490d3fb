use std::path::PathBuf;

use clap::{Parser, Subcommand};
use itertools::Itertools;

use tessolve::{
    generate_move_tables, generate_pruning_tables, solve, Log, LogError, StickerCube, Twist,
};

/// A three-phase 2^4 Rubik's cube solver
#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve the position in an MC4D log file, rewriting its solution as
    /// shorter solutions are found
    Solve {
        /// The path to the log file
        path: PathBuf,
        /// Report only solutions of at most this length
        #[arg(long)]
        max_length: Option<usize>,
    },
    /// Generate any missing move and pruning tables
    GenTables,
    /// Write a log file scrambled by the given number of random twists
    Scramble {
        twists: usize,
        path: PathBuf,
    },
}

fn main() -> Result<(), LogError> {
    match Cli::parse().command {
        Command::Solve { path, max_length } => {
            let log = Log::read(&path)?;
            let cube = StickerCube::solved().twists(log.twists());

            let mut shortest = None;
            for solution in solve(cube, max_length) {
                println!(
                    "Found solution of length {}: {}",
                    solution.len(),
                    solution.iter().map(|m| m.to_string()).join(" ")
                );
                shortest = Some(solution.len());

                // rewrite the log after every improvement so an interrupt
                // keeps the best solution found so far
                let mut improved = log.clone();
                improved
                    .solution
                    .extend(solution.iter().map(|&m| Twist::from(m)));
                improved.write(&path)?;
            }

            match shortest {
                Some(length) => println!("Optimal solution length: {}", length),
                None => println!("No solution within the requested length"),
            }
        }
        Command::GenTables => {
            generate_move_tables();
            generate_pruning_tables();
            println!("All tables present");
        }
        Command::Scramble { twists, path } => {
            Log::scramble_n_twists(twists).write(&path)?;
        }
    }

    Ok(())
}
