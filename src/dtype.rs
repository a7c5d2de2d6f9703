//! Numeric format tags and byte widths for tensor payload sizing.
//!
//! Two tag spaces exist: the storage formats that safetensors headers use
//! (`F16`, `BF16`, ...) and the runtime format names frameworks report
//! (`"float16"`, `"torch.bfloat16"`, ...). Runtime names map many-to-one
//! onto storage tags.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DtypeError {
    #[error("unrecognized safetensors dtype '{0}'")]
    UnknownDtype(String),
}

/// Storage formats a safetensors tensor header can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SafetensorsDtype {
    F64,
    I64,
    U64,
    F32,
    I32,
    U32,
    F16,
    BF16,
    I16,
    U16,
    F8E5M2,
    F8E4M3,
    I8,
    U8,
}

impl SafetensorsDtype {
    /// Byte width of a single element.
    ///
    /// Exhaustive on purpose: the width feeds the capacity computation, so
    /// a new variant without a width must fail to compile.
    pub fn bytes(self) -> u64 {
        match self {
            Self::F64 | Self::I64 | Self::U64 => 8,
            Self::F32 | Self::I32 | Self::U32 => 4,
            Self::F16 | Self::BF16 | Self::I16 | Self::U16 => 2,
            Self::F8E5M2 | Self::F8E4M3 | Self::I8 | Self::U8 => 1,
        }
    }

    /// Canonical tag string as it appears in safetensors headers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::F64 => "F64",
            Self::I64 => "I64",
            Self::U64 => "U64",
            Self::F32 => "F32",
            Self::I32 => "I32",
            Self::U32 => "U32",
            Self::F16 => "F16",
            Self::BF16 => "BF16",
            Self::I16 => "I16",
            Self::U16 => "U16",
            Self::F8E5M2 => "F8_E5M2",
            Self::F8E4M3 => "F8_E4M3",
            Self::I8 => "I8",
            Self::U8 => "U8",
        }
    }
}

impl fmt::Display for SafetensorsDtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SafetensorsDtype {
    type Err = DtypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "F64" => Ok(Self::F64),
            "I64" => Ok(Self::I64),
            "U64" => Ok(Self::U64),
            "F32" => Ok(Self::F32),
            "I32" => Ok(Self::I32),
            "U32" => Ok(Self::U32),
            "F16" => Ok(Self::F16),
            "BF16" => Ok(Self::BF16),
            "I16" => Ok(Self::I16),
            "U16" => Ok(Self::U16),
            "F8_E5M2" => Ok(Self::F8E5M2),
            "F8_E4M3" => Ok(Self::F8E4M3),
            "I8" => Ok(Self::I8),
            "U8" => Ok(Self::U8),
            _ => Err(DtypeError::UnknownDtype(s.to_string())),
        }
    }
}

/// Byte width for a storage-format tag given in its canonical string form.
///
/// Unrecognized tags are a hard error carrying the offending value; there is
/// no silent default on this path.
pub fn get_safetensors_dtype_bytes(dtype: &str) -> Result<u64, DtypeError> {
    Ok(dtype.parse::<SafetensorsDtype>()?.bytes())
}

/// Map a runtime format name (e.g. `"float16"`, `"torch.bfloat16"`) onto the
/// closest storage tag.
///
/// A library-namespace prefix is stripped before matching. Unknown names
/// never fail; they fall back to `F16` because this path runs while
/// estimating from partial model metadata.
pub fn torch_dtype_to_safetensors_dtype(dtype: &str) -> SafetensorsDtype {
    let bare = dtype.rsplit('.').next().unwrap_or(dtype);
    match bare {
        "float32" => SafetensorsDtype::F32,
        "float16" => SafetensorsDtype::F16,
        "bfloat16" => SafetensorsDtype::BF16,
        // Frameworks spell the e4m3 variant both with and without the
        // "fn" (finite/NaN-only) suffix; both store identically.
        "float8_e4m3" | "float8_e4m3fn" => SafetensorsDtype::F8E4M3,
        "float8_e5m2" => SafetensorsDtype::F8E5M2,
        "int8" => SafetensorsDtype::I8,
        _ => SafetensorsDtype::F16,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_per_width_class() {
        assert_eq!(SafetensorsDtype::F64.bytes(), 8);
        assert_eq!(SafetensorsDtype::U64.bytes(), 8);
        assert_eq!(SafetensorsDtype::F32.bytes(), 4);
        assert_eq!(SafetensorsDtype::BF16.bytes(), 2);
        assert_eq!(SafetensorsDtype::I16.bytes(), 2);
        assert_eq!(SafetensorsDtype::F8E5M2.bytes(), 1);
        assert_eq!(SafetensorsDtype::U8.bytes(), 1);
    }

    #[test]
    fn test_lookup_by_canonical_string() {
        assert_eq!(get_safetensors_dtype_bytes("F16").unwrap(), 2);
        assert_eq!(get_safetensors_dtype_bytes("F8_E4M3").unwrap(), 1);
        assert_eq!(get_safetensors_dtype_bytes("I32").unwrap(), 4);
    }

    #[test]
    fn test_unknown_storage_tag_fails_with_value() {
        let err = get_safetensors_dtype_bytes("F128").unwrap_err();
        assert!(err.to_string().contains("F128"));
    }

    #[test]
    fn test_torch_mapping_ignores_namespace_prefix() {
        for name in ["float32", "float16", "bfloat16", "float8_e5m2", "int8"] {
            let bare = torch_dtype_to_safetensors_dtype(name);
            let prefixed = torch_dtype_to_safetensors_dtype(&format!("torch.{name}"));
            assert_eq!(bare, prefixed, "prefix changed mapping for {name}");
        }
        assert_eq!(
            torch_dtype_to_safetensors_dtype("mlx.core.float16"),
            SafetensorsDtype::F16
        );
    }

    #[test]
    fn test_torch_e4m3_spellings_collapse() {
        assert_eq!(
            torch_dtype_to_safetensors_dtype("float8_e4m3"),
            SafetensorsDtype::F8E4M3
        );
        assert_eq!(
            torch_dtype_to_safetensors_dtype("float8_e4m3fn"),
            SafetensorsDtype::F8E4M3
        );
    }

    #[test]
    fn test_torch_mapping_falls_back_to_f16() {
        assert_eq!(
            torch_dtype_to_safetensors_dtype("complex128"),
            SafetensorsDtype::F16
        );
        assert_eq!(torch_dtype_to_safetensors_dtype(""), SafetensorsDtype::F16);
    }

    #[test]
    fn test_display_round_trips() {
        let dt = SafetensorsDtype::F8E5M2;
        assert_eq!(dt.to_string().parse::<SafetensorsDtype>().unwrap(), dt);
    }
}
