//! Payload sizing and formatting helpers for the reporting layer.

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::dtype::SafetensorsDtype;

static PARAM_COUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?)\s*[bB]$").unwrap());

/// Parse a parameter-count string like `"7B"` or `"1.8b"` into billions.
pub fn parse_param_count(params: &str) -> Result<f64> {
    let caps = PARAM_COUNT_PATTERN.captures(params.trim()).ok_or_else(|| {
        anyhow!("could not parse parameter count '{params}' (expected e.g. 7B, 70B, 1.8B)")
    })?;
    Ok(caps[1].parse()?)
}

/// Total tensor payload in bytes for a dense model of `params_billions`
/// parameters stored in `dtype`.
pub fn estimate_total_bytes(params_billions: f64, dtype: SafetensorsDtype) -> u64 {
    (params_billions * 1e9 * dtype.bytes() as f64) as u64
}

/// Format bytes as a human-readable binary-unit string.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB"];
    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param_count() {
        assert_eq!(parse_param_count("70B").unwrap(), 70.0);
        assert_eq!(parse_param_count("1.8b").unwrap(), 1.8);
        assert_eq!(parse_param_count(" 7 B ").unwrap(), 7.0);
    }

    #[test]
    fn test_parse_param_count_rejects_garbage() {
        assert!(parse_param_count("seventy").is_err());
        assert!(parse_param_count("70").is_err());
        assert!(parse_param_count("70M").is_err());
        assert!(parse_param_count("").is_err());
    }

    #[test]
    fn test_estimate_total_bytes() {
        assert_eq!(
            estimate_total_bytes(7.0, SafetensorsDtype::F16),
            14_000_000_000
        );
        assert_eq!(
            estimate_total_bytes(0.5, SafetensorsDtype::F32),
            2_000_000_000
        );
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512.00 B");
        assert_eq!(format_bytes(1 << 30), "1.00 GiB");
        assert_eq!(format_bytes(80 * (1u64 << 30)), "80.00 GiB");
        assert_eq!(format_bytes(1 << 40), "1.00 TiB");
    }
}
