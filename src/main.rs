use clap::Parser;
use std::process::ExitCode;
use std::time::Instant;

use crossgen::errors::StructureError;
use crossgen::grid::Crossword;
use crossgen::render;
use crossgen::solver::Generator;
use crossgen::word_list::WordList;

/// Crossword generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the structure file ('_' marks a fillable cell, anything else is blocked)
    structure: String,

    /// Path to the word list file (one word per line)
    words: String,

    /// Optional path to also write the rendered grid to
    #[arg(short, long)]
    output: Option<String>,
}

/// Entry point of the crossgen CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them in a
/// user-friendly way before exiting with a nonzero code.
fn main() -> ExitCode {
    // Set up logging
    let debug_enabled = std::env::var("CROSSGEN_DEBUG").is_ok();
    crossgen::log::init_logger(debug_enabled);

    match try_main() {
        Ok(code) => code,
        Err(e) => {
            // Print the error message to stderr, with detailed formatting if
            // it's a StructureError
            if let Some(structure_err) = e.downcast_ref::<StructureError>() {
                eprintln!("Error: {}", structure_err.display_detailed());
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Core application logic for the crossgen CLI.
///
/// Steps:
/// 1. Parse CLI arguments with Clap.
/// 2. Load the structure and the word list from disk.
/// 3. Solve the puzzle.
/// 4. Print the rendered grid on stdout, or "No solution.".
/// 5. Print performance metrics (timings, counts) on stderr.
///
/// Structural errors (malformed grid, unreadable files) bubble up to
/// [`main`]; an unsatisfiable puzzle is not an error and simply exits with a
/// nonzero status.
fn try_main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let cli = Cli::parse();

    // 1. Load the structure and the word list from disk
    let t_load = Instant::now();
    let structure = std::fs::read_to_string(&cli.structure)?;
    let crossword = Crossword::new(&structure)?;
    let word_list = WordList::load_from_path(&cli.words)?;
    let load_secs = t_load.elapsed().as_secs_f64();

    // 2. Solve the puzzle
    let t_solve = Instant::now();
    let mut generator = Generator::new(crossword, &word_list.words);
    let assignment = generator.solve();
    let solve_secs = t_solve.elapsed().as_secs_f64();

    // 3. Print diagnostics (word-list size, timings) to stderr
    eprintln!(
        "Loaded {} words in {load_secs:.3}s; solved in {solve_secs:.3}s.",
        word_list.words.len()
    );

    // 4. Print the result on stdout
    match assignment {
        Some(assignment) => {
            let rendered = render::render(generator.crossword(), &assignment);
            print!("{rendered}");
            if let Some(path) = cli.output {
                std::fs::write(&path, rendered)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("No solution.");
            Ok(ExitCode::FAILURE)
        }
    }
}
