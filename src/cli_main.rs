use clap::{Parser, Subcommand};

use smer_hash::io::hashes::HashFormat;
use smer_hash::pipeline::{ExecutionMode, DEFAULT_QUEUE_DEPTH};

#[derive(Parser, Debug)]
#[command(name = "smer-hash", version, about = "Streaming s-mer hashing over packed DNA", long_about = None)]
pub struct Cli {
    /// Log pipeline stage details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Hash every s-mer of each sequence in a FASTA(.gz) file
    Hash {
        /// Input FASTA(.gz) or raw sequence file
        #[arg(short, long)]
        input: String,

        /// Output file for the hash arrays
        #[arg(short, long)]
        output: Option<String>,

        /// Output format (hex, tsv or binary)
        #[arg(long, default_value = "hex")]
        format: HashFormat,

        /// Stage scheduling (dataflow or sequential)
        #[arg(long, default_value = "dataflow")]
        mode: ExecutionMode,

        /// Capacity of each inter-stage queue
        #[arg(long, default_value_t = DEFAULT_QUEUE_DEPTH)]
        queue_depth: usize,

        /// Number of threads for multi-record input
        #[arg(long, default_value_t = num_cpus::get())]
        threads: usize,

        /// Print the first N hashes of the first record
        #[arg(long, default_value_t = 10)]
        preview: usize,

        /// Print run statistics as JSON
        #[arg(long)]
        stats: bool,
    },

    /// Time the pipeline on a synthetic single-base sequence
    Bench {
        /// Sequence length in symbols
        #[arg(short = 'n', long, default_value_t = 1024)]
        length: usize,

        /// Base used to fill the sequence
        #[arg(long, default_value_t = 'A')]
        fill: char,

        /// Stage scheduling (dataflow or sequential)
        #[arg(long, default_value = "dataflow")]
        mode: ExecutionMode,

        /// Capacity of each inter-stage queue
        #[arg(long, default_value_t = DEFAULT_QUEUE_DEPTH)]
        queue_depth: usize,

        /// Number of timed runs
        #[arg(long, default_value_t = 1)]
        repeats: usize,

        /// Print run statistics as JSON
        #[arg(long)]
        json: bool,
    },
}
