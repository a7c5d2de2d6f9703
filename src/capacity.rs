//! Tensor-parallel GPU count estimation.
//!
//! The core procedure: derive the minimum GPU count whose combined usable
//! VRAM holds a tensor payload, then round that count up to the smallest
//! parallel degree the model can actually shard across.

use anyhow::{bail, Result};
use serde::Serialize;

use crate::gpu::GpuSpec;

/// Conventional tensor-parallel degrees used when the attention-head count
/// is unknown.
pub const COMMON_TP_DEGREES: [u64; 4] = [1, 2, 4, 8];

/// Why `suggested_count` landed where it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionReason {
    HeadDivisible,
    CommonTpDegree,
    RawCapacity,
}

/// Human-readable explanation for a suggestion reason.
pub fn get_suggestion_reason_text(reason: SuggestionReason) -> &'static str {
    match reason {
        SuggestionReason::HeadDivisible => "Rounded up to a head-divisible parallel degree",
        SuggestionReason::CommonTpDegree => "Rounded up to common parallel degree (1/2/4/8)",
        SuggestionReason::RawCapacity => {
            "Used raw capacity count (no higher compatible degree found)"
        }
    }
}

/// Valid tensor-parallel degrees for a model.
///
/// Attention heads must split evenly across shards, so a known head count
/// admits exactly its divisors (1 and the head count included). Without a
/// head count, degrees are restricted to conventional node topologies.
/// Callers must not rely on the ordering; sort before use.
pub fn find_valid_tp_degrees(num_attention_heads: Option<u64>) -> Vec<u64> {
    match num_attention_heads {
        None => COMMON_TP_DEGREES.to_vec(),
        Some(heads) => (1..=heads).filter(|d| heads % d == 0).collect(),
    }
}

/// Result of a capacity estimate.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GpuCountEstimate {
    /// Minimum identical GPUs whose combined usable VRAM holds the payload,
    /// assuming perfectly even sharding.
    pub raw_count: u64,
    /// `raw_count` rounded up to the smallest valid parallel degree, or
    /// `raw_count` itself when no degree qualifies.
    pub suggested_count: u64,
    pub reason: SuggestionReason,
}

/// Estimate how many `gpu`s are needed to host `total_bytes` of tensors.
///
/// `overhead` is the fraction of VRAM reserved for runtime/framework use and
/// must lie in `[0, 1)`. `total_bytes == 0` yields a raw count of 0 (and a
/// suggestion of the smallest valid degree). Pure and deterministic.
pub fn compute_gpu_count(
    total_bytes: u64,
    gpu: &GpuSpec,
    overhead: f64,
    num_attention_heads: Option<u64>,
) -> Result<GpuCountEstimate> {
    if !(0.0..1.0).contains(&overhead) {
        bail!("overhead fraction must be in [0, 1), got {overhead}");
    }

    let effective_vram = gpu.vram_bytes() as f64 * (1.0 - overhead);
    let raw_count = (total_bytes as f64 / effective_vram).ceil() as u64;

    let mut degrees = find_valid_tp_degrees(num_attention_heads);
    degrees.sort_unstable();

    let estimate = match degrees.into_iter().find(|&d| d >= raw_count) {
        Some(suggested) => GpuCountEstimate {
            raw_count,
            suggested_count: suggested,
            reason: if num_attention_heads.is_some() {
                SuggestionReason::HeadDivisible
            } else {
                SuggestionReason::CommonTpDegree
            },
        },
        None => GpuCountEstimate {
            raw_count,
            suggested_count: raw_count,
            reason: SuggestionReason::RawCapacity,
        },
    };
    Ok(estimate)
}
