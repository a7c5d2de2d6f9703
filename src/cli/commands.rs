//! CLI command implementations

use anyhow::{bail, Result};
use tracing::debug;
use vramfit::capacity::{compute_gpu_count, get_suggestion_reason_text};
use vramfit::dtype::torch_dtype_to_safetensors_dtype;
use vramfit::gpu::{format_gpu_table, get_gpu_spec};
use vramfit::utils::{estimate_total_bytes, format_bytes, parse_param_count};

pub fn estimate(
    bytes: Option<u64>,
    params: Option<&str>,
    dtype: &str,
    gpu_name: &str,
    overhead: f64,
    heads: Option<u64>,
    json: bool,
) -> Result<()> {
    let gpu = get_gpu_spec(gpu_name)?;
    let storage_dtype = torch_dtype_to_safetensors_dtype(dtype);

    let total_bytes = match (bytes, params) {
        (Some(b), _) => b,
        (None, Some(p)) => estimate_total_bytes(parse_param_count(p)?, storage_dtype),
        (None, None) => bail!("specify a payload size with --bytes or --params"),
    };
    debug!(total_bytes, gpu = gpu.name, %storage_dtype, "estimating GPU count");

    let estimate = compute_gpu_count(total_bytes, gpu, overhead, heads)?;

    if json {
        let report = serde_json::json!({
            "gpu": gpu,
            "total_bytes": total_bytes,
            "overhead": overhead,
            "num_attention_heads": heads,
            "raw_count": estimate.raw_count,
            "suggested_count": estimate.suggested_count,
            "reason": estimate.reason,
            "reason_text": get_suggestion_reason_text(estimate.reason),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let effective_vram = gpu.vram_bytes() as f64 * (1.0 - overhead);

    println!("Payload:    {}", format_bytes(total_bytes));
    println!(
        "GPU:        {} ({} usable after {:.0}% overhead)",
        gpu.name,
        format_bytes(effective_vram as u64),
        overhead * 100.0
    );
    println!("Raw count:  {}", estimate.raw_count);
    println!("Suggested:  {}x {}", estimate.suggested_count, gpu.name);
    println!("Reason:     {}", get_suggestion_reason_text(estimate.reason));

    if let Some(max) = gpu.max_per_node {
        if estimate.suggested_count > u64::from(max) {
            println!();
            println!(
                "⚠️  {} GPUs exceeds the {} limit of {} per node; plan for multiple nodes",
                estimate.suggested_count, gpu.name, max
            );
        }
    }

    Ok(())
}

pub fn list_gpus() -> Result<()> {
    println!("{}", format_gpu_table());
    Ok(())
}
