// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line flags using clap
// 2. Read seed URLs from stdin, one per line
// 3. Hand both to the crawl engine (link_scout::run_crawl)
// 4. Exit with proper code (0 = run completed, 2 = internal error)
//
// Note the division of labor: everything interesting lives in the library
// crate. This file only adapts the process boundary (argv, stdin, exit
// codes) onto the engine's API.
// =============================================================================

use anyhow::Result;
use clap::Parser; // Parser trait enables the parse() method
use std::io::BufRead;

use link_scout::cli::Cli;
use link_scout::run_crawl;

// The #[tokio::main] attribute transforms our async main into a real main
// function: it creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = run completed (whether or not links were found)
//   Err   = configuration or I/O error
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();
    let config = cli.into_config();

    // Seed URLs arrive line-delimited on stdin, read once at startup;
    // the engine trims them and skips blanks and comment lines
    let seeds: Vec<String> = std::io::stdin()
        .lock()
        .lines()
        .collect::<std::result::Result<_, _>>()?;

    // Fetch failures and empty results are diagnostics, not process
    // failures - the run "succeeds" either way
    run_crawl(config, seeds).await?;

    Ok(0)
}
