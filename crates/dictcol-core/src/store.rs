//! Column store: persists one dictionary together with its encoded column.
//!
//! An encoded column is meaningless without the exact dictionary it was built
//! with, so the two are only ever written and read as one artifact.
//!
//! # Artifact Format
//!
//! ```text
//! [Magic: "DCOL" 4 bytes]
//! [Payload length: 8 bytes LE]
//! [Payload: bincode { dictionary, encoded_data }]
//! [CRC32 of payload: 4 bytes LE]
//! ```
//!
//! Saves go through [`write_atomic`], so a failed save never clobbers a
//! previously valid artifact.

use std::io::{self, Write};
use std::mem::size_of;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dictionary::{Code, Dictionary};
use crate::error::{Error, Result};
use crate::util::{crc32, write_atomic};

/// Artifact file magic bytes.
pub const ARTIFACT_MAGIC: &[u8; 4] = b"DCOL";

const HEADER_SIZE: usize = 4 + 8;
const CRC_SIZE: usize = 4;

/// Persisted record: exactly one dictionary and one encoded column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Value to code mapping, in code order.
    pub dictionary: Dictionary,
    /// One code per row of the originating raw column.
    pub encoded_data: Vec<Code>,
}

impl Artifact {
    /// Bundles a dictionary with its encoded column.
    #[must_use]
    pub fn new(dictionary: Dictionary, encoded_data: Vec<Code>) -> Self {
        Self {
            dictionary,
            encoded_data,
        }
    }

    /// Checks the dictionary/column invariants.
    ///
    /// Codes must be dense, every encoded code must have a dictionary entry,
    /// and every dictionary code must appear in the column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArtifactCorrupted`] describing the first violation.
    pub fn validate(&self) -> Result<()> {
        self.dictionary
            .check_dense()
            .map_err(Error::ArtifactCorrupted)?;

        let mut used = vec![false; self.dictionary.len()];
        for (row, &code) in self.encoded_data.iter().enumerate() {
            match used.get_mut(code as usize) {
                Some(slot) => *slot = true,
                None => {
                    return Err(Error::ArtifactCorrupted(format!(
                        "row {row} has code {code} with no dictionary entry"
                    )))
                }
            }
        }

        if let Some(unused) = used.iter().position(|&seen| !seen) {
            return Err(Error::ArtifactCorrupted(format!(
                "dictionary code {unused} is never used"
            )));
        }
        Ok(())
    }

    /// Serializes the artifact into its framed byte representation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if bincode fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let payload =
            bincode::serialize(self).map_err(|e| Error::Serialization(e.to_string()))?;

        let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len() + CRC_SIZE);
        buf.extend_from_slice(ARTIFACT_MAGIC);
        buf.extend_from_slice(&(payload.len() as u64).to_le_bytes());
        buf.extend_from_slice(&payload);
        buf.extend_from_slice(&crc32(&payload).to_le_bytes());
        Ok(buf)
    }

    /// Parses and validates a framed artifact.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArtifactCorrupted`] on bad magic, truncation,
    /// checksum mismatch, undecodable payload or broken invariants.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE + CRC_SIZE {
            return Err(Error::ArtifactCorrupted("artifact too small".to_string()));
        }
        if &data[0..4] != ARTIFACT_MAGIC {
            return Err(Error::ArtifactCorrupted("invalid magic bytes".to_string()));
        }

        let mut len_bytes = [0u8; 8];
        len_bytes.copy_from_slice(&data[4..HEADER_SIZE]);
        let payload_len = usize::try_from(u64::from_le_bytes(len_bytes))
            .map_err(|_| Error::ArtifactCorrupted("payload length overflow".to_string()))?;

        let expected = HEADER_SIZE
            .checked_add(payload_len)
            .and_then(|n| n.checked_add(CRC_SIZE))
            .ok_or_else(|| Error::ArtifactCorrupted("payload length overflow".to_string()))?;
        if data.len() != expected {
            return Err(Error::ArtifactCorrupted(format!(
                "size mismatch: header announces {expected} bytes, file has {}",
                data.len()
            )));
        }

        let payload = &data[HEADER_SIZE..HEADER_SIZE + payload_len];
        let mut crc_bytes = [0u8; 4];
        crc_bytes.copy_from_slice(&data[expected - CRC_SIZE..]);
        let stored = u32::from_le_bytes(crc_bytes);
        let actual = crc32(payload);
        if stored != actual {
            return Err(Error::ArtifactCorrupted(format!(
                "checksum mismatch: expected {stored:08x}, got {actual:08x}"
            )));
        }

        let artifact: Self = bincode::deserialize(payload)
            .map_err(|e| Error::ArtifactCorrupted(format!("invalid payload: {e}")))?;
        artifact.validate()?;
        Ok(artifact)
    }
}

/// Persists `dictionary` and `encoded` as one artifact at `path`.
///
/// Any previous artifact at `path` is fully replaced.
///
/// # Errors
///
/// Returns [`Error::ArtifactCorrupted`] if the pair violates the artifact
/// invariants, [`Error::Serialization`] or [`Error::Io`] on write failure.
pub fn save<P: AsRef<Path>>(dictionary: &Dictionary, encoded: &[Code], path: P) -> Result<()> {
    let path = path.as_ref();
    let artifact = Artifact::new(dictionary.clone(), encoded.to_vec());
    artifact.validate()?;

    let bytes = artifact.to_bytes()?;
    write_atomic(path, |writer| {
        writer.write_all(&bytes)?;
        Ok(())
    })?;

    info!(
        path = %path.display(),
        rows = encoded.len(),
        unique_values = dictionary.len(),
        bytes = bytes.len(),
        "Artifact saved"
    );
    Ok(())
}

/// Loads the dictionary and encoded column stored at `path`.
///
/// # Errors
///
/// Returns [`Error::ArtifactNotFound`] if the file is missing,
/// [`Error::ArtifactCorrupted`] if it is truncated or invalid, and
/// [`Error::Io`] for other read failures.
pub fn load<P: AsRef<Path>>(path: P) -> Result<(Dictionary, Vec<Code>)> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::ArtifactNotFound(path.to_path_buf()),
        _ => Error::Io(e),
    })?;

    let artifact = Artifact::from_bytes(&data)?;
    debug!(
        path = %path.display(),
        rows = artifact.encoded_data.len(),
        unique_values = artifact.dictionary.len(),
        "Artifact loaded"
    );
    Ok((artifact.dictionary, artifact.encoded_data))
}

/// Size statistics of an artifact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtifactStats {
    /// Number of unique values in dictionary.
    pub unique_values: usize,
    /// Number of rows in the encoded column.
    pub rows: usize,
    /// Bytes the raw column would take (value bytes only).
    pub raw_size_bytes: usize,
    /// Dictionary size in bytes (values + codes).
    pub dictionary_size_bytes: usize,
    /// Encoded data size in bytes.
    pub encoded_size_bytes: usize,
    /// Compression ratio (raw / (dictionary + encoded)).
    pub compression_ratio: f64,
}

/// Computes size statistics for a dictionary and its encoded column.
#[must_use]
pub fn stats(dictionary: &Dictionary, encoded: &[Code]) -> ArtifactStats {
    let raw_size: usize = encoded
        .iter()
        .filter_map(|&code| dictionary.value(code))
        .map(str::len)
        .sum();
    let dict_size = dictionary.value_bytes() + dictionary.len() * size_of::<Code>();
    let encoded_size = encoded.len() * size_of::<Code>();
    let compressed_size = dict_size + encoded_size;

    let ratio = if compressed_size > 0 {
        raw_size as f64 / compressed_size as f64
    } else {
        0.0
    };

    ArtifactStats {
        unique_values: dictionary.len(),
        rows: encoded.len(),
        raw_size_bytes: raw_size,
        dictionary_size_bytes: dict_size,
        encoded_size_bytes: encoded_size,
        compression_ratio: ratio,
    }
}
