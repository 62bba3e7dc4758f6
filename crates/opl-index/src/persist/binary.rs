//! Binary index encoding.
//!
//! Format:
//! - 4 bytes: Magic ("OPLX")
//! - 4 bytes: Schema version (u32 little-endian)
//! - N bytes: rkyv payload

use std::path::Path;

use rkyv::util::AlignedVec;

use super::snapshot::IndexFile;
use super::{CURRENT_SCHEMA_VERSION, MAGIC_BYTES};
use crate::error::{IndexError, Result};

const HEADER_LEN: usize = 8;

pub fn encode(file: &IndexFile) -> Result<Vec<u8>> {
    let payload = rkyv::to_bytes::<rkyv::rancor::Error>(file)
        .map_err(|e| IndexError::Serialization(format!("rkyv serialization failed: {e}")))?;

    let mut output = Vec::with_capacity(HEADER_LEN + payload.len());
    output.extend_from_slice(&MAGIC_BYTES);
    output.extend_from_slice(&CURRENT_SCHEMA_VERSION.to_le_bytes());
    output.extend_from_slice(&payload);
    Ok(output)
}

pub fn decode(bytes: &[u8], path: &Path) -> Result<IndexFile> {
    let corrupt = |reason: String| IndexError::Corrupt {
        path: path.to_path_buf(),
        reason,
    };

    if bytes.len() < HEADER_LEN {
        return Err(corrupt("file too small".to_string()));
    }
    if bytes[0..4] != MAGIC_BYTES {
        return Err(corrupt("not an index file (invalid magic bytes)".to_string()));
    }

    let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    if version > CURRENT_SCHEMA_VERSION {
        return Err(IndexError::UnsupportedVersion {
            found: version,
            max_supported: CURRENT_SCHEMA_VERSION,
            path: path.to_path_buf(),
        });
    }

    // The payload offset in a plain Vec<u8> carries no alignment guarantee.
    let payload = &bytes[HEADER_LEN..];
    let mut aligned = AlignedVec::<16>::with_capacity(payload.len());
    aligned.extend_from_slice(payload);

    rkyv::from_bytes::<IndexFile, rkyv::rancor::Error>(&aligned)
        .map_err(|e| corrupt(format!("rkyv deserialization failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> IndexFile {
        IndexFile {
            schema_version: CURRENT_SCHEMA_VERSION,
            source_stamp: "stamp".to_string(),
            as_of: "2025-01-01".to_string(),
            entries: Vec::new(),
        }
    }

    #[test]
    fn test_header() {
        let bytes = encode(&sample()).unwrap();
        assert_eq!(&bytes[0..4], b"OPLX");
        assert_eq!(&bytes[4..8], &CURRENT_SCHEMA_VERSION.to_le_bytes());
        assert_eq!(decode(&bytes, Path::new("x")).unwrap(), sample());
    }

    #[test]
    fn test_invalid_magic() {
        let err = decode(b"NOT_AN_INDEX_FILE", Path::new("x")).unwrap_err();
        assert!(matches!(err, IndexError::Corrupt { .. }));
    }

    #[test]
    fn test_unsupported_version() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&MAGIC_BYTES);
        bytes.extend_from_slice(&999u32.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 64]);
        let err = decode(&bytes, Path::new("x")).unwrap_err();
        assert!(matches!(err, IndexError::UnsupportedVersion { found: 999, .. }));
    }

    #[test]
    fn test_missing_payload() {
        let bytes = encode(&sample()).unwrap();
        let err = decode(&bytes[..HEADER_LEN], Path::new("x")).unwrap_err();
        assert!(matches!(err, IndexError::Corrupt { .. }));
    }
}
