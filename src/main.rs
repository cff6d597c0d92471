mod cli;
mod cli_main;

use std::process::ExitCode;

use clap::Parser;
use rayon::ThreadPoolBuilder;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use cli::hash::{print_stats, run_hash, HashOptions};
use cli_main::{Cli, Commands};
use smer_hash::pipeline::PipelineConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Setting tracing default failed");
    }

    match cli.command {
        Commands::Hash {
            input,
            output,
            format,
            mode,
            queue_depth,
            threads,
            preview,
            stats,
        } => {
            info!("Starting hash: input = {}, mode = {}, threads = {}", input, mode, threads);

            if let Err(e) = ThreadPoolBuilder::new().num_threads(threads).build_global() {
                error!("Failed to build thread pool: {}", e);
                return ExitCode::FAILURE;
            }

            let opts = HashOptions {
                input,
                output,
                format,
                config: PipelineConfig { mode, queue_depth },
                preview,
            };
            let start = std::time::Instant::now();
            match run_hash(&opts) {
                Ok(run_stats) => {
                    if stats {
                        if let Err(e) = print_stats(&run_stats) {
                            eprintln!("Error writing statistics: {}", e);
                            return ExitCode::FAILURE;
                        }
                    }
                    info!("Hashing completed in {:.2}s", start.elapsed().as_secs_f32());
                }
                Err(e) => {
                    eprintln!("Error during hashing: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }

        Commands::Bench {
            length,
            fill,
            mode,
            queue_depth,
            repeats,
            json,
        } => {
            if !fill.is_ascii() {
                eprintln!("Fill base must be an ASCII character, got '{}'", fill);
                return ExitCode::FAILURE;
            }
            let config = PipelineConfig { mode, queue_depth };
            match cli::benchmark::benchmark_pipeline(length, fill as u8, &config, repeats) {
                Ok(run_stats) => {
                    if json {
                        if let Err(e) = print_stats(&run_stats) {
                            eprintln!("Error writing statistics: {}", e);
                            return ExitCode::FAILURE;
                        }
                    }
                    println!("Test completed successfully.");
                }
                Err(e) => {
                    eprintln!("Error during benchmark: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    ExitCode::SUCCESS
}
