//! GPU memory capacity estimation for hosting large model tensors.
//!
//! Given a total tensor payload size and a GPU model, this crate computes
//! the minimum number of GPUs whose combined usable VRAM can hold the
//! payload, then rounds that count up to the smallest tensor-parallel
//! degree the model can shard across (a divisor of its attention-head
//! count, or a common 1/2/4/8 degree when the head count is unknown).
//!
//! ## Main Components
//!
//! - `dtype`: storage/runtime numeric-format tags and their byte widths
//! - `gpu`: static GPU catalog, registry access, table rendering
//! - `capacity`: parallel-degree enumeration and the count estimator
//! - `utils`: parameter-count parsing and byte formatting
//!
//! Everything is pure, synchronous computation over immutable static data;
//! the API is safe to call concurrently without synchronization.

pub mod capacity;
pub mod dtype;
pub mod gpu;
pub mod utils;

pub use capacity::{
    compute_gpu_count, find_valid_tp_degrees, get_suggestion_reason_text, GpuCountEstimate,
    SuggestionReason, COMMON_TP_DEGREES,
};
pub use dtype::{
    get_safetensors_dtype_bytes, torch_dtype_to_safetensors_dtype, DtypeError, SafetensorsDtype,
};
pub use gpu::{format_gpu_table, get_gpu_spec, GpuError, GpuSpec, GPU_REGISTRY};
pub use utils::{estimate_total_bytes, format_bytes, parse_param_count};

/// Library errors
pub use anyhow::{Error, Result};
