pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vramfit")]
#[command(about = "Estimate GPU counts for hosting large model tensors", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate how many GPUs a tensor payload needs
    Estimate {
        /// Total tensor payload size in bytes
        #[arg(long, conflicts_with = "params")]
        bytes: Option<u64>,
        /// Parameter count to size instead (e.g. 7B, 70B)
        #[arg(long)]
        params: Option<String>,
        /// Runtime dtype the weights are stored in (e.g. bfloat16, torch.float16)
        #[arg(long, default_value = "bfloat16")]
        dtype: String,
        /// GPU to host on (see `vramfit list-gpus`)
        #[arg(long)]
        gpu: String,
        /// Fraction of VRAM reserved for runtime overhead, in [0, 1)
        #[arg(long, default_value_t = 0.0)]
        overhead: f64,
        /// Attention-head count, for head-divisible rounding
        #[arg(long)]
        heads: Option<u64>,
        /// Emit machine-readable JSON instead of a report
        #[arg(long)]
        json: bool,
    },
    /// List all supported GPUs
    ListGpus,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Estimate {
            bytes,
            params,
            dtype,
            gpu,
            overhead,
            heads,
            json,
        } => commands::estimate(bytes, params.as_deref(), &dtype, &gpu, overhead, heads, json),
        Commands::ListGpus => commands::list_gpus(),
    }
}
