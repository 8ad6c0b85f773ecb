use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::constants::{
    DEFAULT_DATA_DIR, DEFAULT_MAX_NEW_TOKENS, DEFAULT_SERVE_HOST, DEFAULT_SERVE_PORT,
};

#[derive(Parser)]
#[command(name = "wqi-pipeline")]
#[command(about = "Water-quality measurement pipeline")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Stream measurement rows from a CSV file into the event stream
    Ingest {
        #[arg(short, long, help = "Input CSV file")]
        input: PathBuf,

        #[arg(
            short,
            long,
            default_value = DEFAULT_DATA_DIR,
            help = "Local data directory backing the stream and bucket"
        )]
        data_dir: PathBuf,

        #[arg(long, help = "Stream name override")]
        stream_name: Option<String>,

        #[arg(long, help = "Seconds to pause between records")]
        delay_seconds: Option<u64>,

        #[arg(long, help = "Stop after this many rows")]
        limit: Option<usize>,

        #[arg(long, default_value = "false", help = "Memory-map the input file")]
        mmap: bool,
    },

    /// Transform pending stream events and write them to the object store
    Transform {
        #[arg(
            short,
            long,
            default_value = DEFAULT_DATA_DIR,
            help = "Local data directory backing the stream and bucket"
        )]
        data_dir: PathBuf,

        #[arg(long, help = "Stream name override")]
        stream_name: Option<String>,

        #[arg(long, help = "Bucket name override")]
        bucket: Option<String>,

        #[arg(long, help = "Process at most this many events")]
        limit: Option<usize>,
    },

    /// Validate a CSV file without streaming or writing anything
    Validate {
        #[arg(short, long, help = "Input CSV file")]
        input: PathBuf,
    },

    /// Serve lake water-quality summaries over HTTP
    Serve {
        #[arg(long, default_value = DEFAULT_SERVE_HOST)]
        host: String,

        #[arg(long, default_value_t = DEFAULT_SERVE_PORT)]
        port: u16,

        #[arg(long, default_value_t = num_cpus::get(), help = "HTTP worker count")]
        workers: usize,

        #[arg(
            long,
            default_value = "http://127.0.0.1:8080/generate",
            help = "Text-generation endpoint URL"
        )]
        model_endpoint: String,

        #[arg(
            long,
            default_value_t = DEFAULT_MAX_NEW_TOKENS,
            help = "Maximum tokens to request per generation"
        )]
        max_new_tokens: u32,
    },
}
