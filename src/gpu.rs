//! Static GPU catalog and registry access.

use once_cell::sync::Lazy;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GpuError {
    #[error(
        "Unknown GPU '{name}'. Valid options: {valid}\n\
         Use `vramfit list-gpus` to see all supported GPUs."
    )]
    UnknownGpu { name: String, valid: String },
}

/// Capacity profile for one GPU model.
#[derive(Debug, Clone, Serialize)]
pub struct GpuSpec {
    pub name: &'static str,
    pub vram_gib: f64,
    /// Densest configuration a single physical node ships with, when the
    /// part is sold in fixed node topologies.
    pub max_per_node: Option<u32>,
}

impl GpuSpec {
    const fn new(name: &'static str, vram_gib: f64, max_per_node: Option<u32>) -> Self {
        Self {
            name,
            vram_gib,
            max_per_node,
        }
    }

    /// VRAM capacity in whole bytes.
    pub fn vram_bytes(&self) -> u64 {
        (self.vram_gib * (1u64 << 30) as f64) as u64
    }
}

/// Supported GPUs, keyed by the lowercase name accepted on the command line.
///
/// Kept as an ordered list rather than a map: lookups scan a dozen entries,
/// and `format_gpu_table` renders in insertion order.
pub static GPU_REGISTRY: Lazy<Vec<(&'static str, GpuSpec)>> = Lazy::new(|| {
    vec![
        ("b200", GpuSpec::new("B200", 192.0, Some(8))),
        ("h200", GpuSpec::new("H200", 141.0, Some(8))),
        ("h100", GpuSpec::new("H100", 80.0, Some(8))),
        ("gh200", GpuSpec::new("GH200", 96.0, Some(1))),
        ("a100-80", GpuSpec::new("A100-80G", 80.0, Some(8))),
        ("a100-40", GpuSpec::new("A100-40G", 40.0, Some(8))),
        ("l40s", GpuSpec::new("L40S", 48.0, Some(8))),
        ("v100-32", GpuSpec::new("V100-32G", 32.0, Some(8))),
        ("v100-16", GpuSpec::new("V100-16G", 16.0, Some(8))),
        ("a10", GpuSpec::new("A10", 24.0, None)),
        ("rtx4090", GpuSpec::new("RTX 4090", 24.0, None)),
        ("rtx3090", GpuSpec::new("RTX 3090", 24.0, None)),
    ]
});

/// Resolve a user-supplied GPU name to its spec.
///
/// Matching is case-insensitive and ignores surrounding whitespace. A miss
/// lists every valid key in sorted order.
pub fn get_gpu_spec(name: &str) -> Result<&'static GpuSpec, GpuError> {
    let key = name.trim().to_lowercase();
    GPU_REGISTRY
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, spec)| spec)
        .ok_or_else(|| {
            let mut keys: Vec<&str> = GPU_REGISTRY.iter().map(|(k, _)| *k).collect();
            keys.sort_unstable();
            GpuError::UnknownGpu {
                name: name.to_string(),
                valid: keys.join(", "),
            }
        })
}

/// Render the GPU registry as a fixed-width text table.
///
/// One header row, one separator row, one row per registry entry in
/// insertion order. VRAM prints with no decimal places; GPUs without a
/// per-node limit print an em-dash.
pub fn format_gpu_table() -> String {
    let mut lines = vec![
        format!("{:<12} {:>10}  {:>8}", "Name", "VRAM (GiB)", "Max/Node"),
        format!("{} {}  {}", "─".repeat(12), "─".repeat(10), "─".repeat(8)),
    ];
    for (key, spec) in GPU_REGISTRY.iter() {
        let node_str = spec
            .max_per_node
            .map_or_else(|| "—".to_string(), |n| n.to_string());
        lines.push(format!(
            "{:<12} {:>10.0}  {:>8}",
            key, spec.vram_gib, node_str
        ));
    }
    lines.join("\n")
}
