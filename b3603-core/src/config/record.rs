//! Flash record framing
//!
//! Each persisted record is laid out as:
//!
//! ```text
//! postcard(magic: u32, version: u8, payload) | crc32 (LE)
//! ```
//!
//! The CRC covers the whole postcard body. A record that fails any check
//! is rejected as a unit; callers fall back to factory defaults.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::types::{OutputConfig, SystemConfig};

/// Magic for [`SystemConfig`] records ("B3SY")
pub const SYSTEM_MAGIC: u32 = 0x4233_5359;

/// Magic for [`OutputConfig`] records ("B3OU")
pub const OUTPUT_MAGIC: u32 = 0x4233_4F55;

/// Layout version of both records
pub const RECORD_VERSION: u8 = 1;

/// Upper bound on an encoded record
pub const MAX_RECORD_SIZE: usize = 96;

const CRC_LEN: usize = 4;

/// Record framing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordError {
    /// Serialization failed
    Serialize,
    /// Deserialization failed
    Deserialize,
    /// Output buffer cannot hold the record
    BufferTooSmall,
    /// Record belongs to another type
    BadMagic,
    /// Record written by an incompatible layout
    VersionMismatch,
    /// Checksum does not match the body
    CrcMismatch,
}

/// A persistable configuration record
pub trait Record: Serialize + DeserializeOwned {
    /// Type tag written ahead of the payload
    const MAGIC: u32;
}

impl Record for SystemConfig {
    const MAGIC: u32 = SYSTEM_MAGIC;
}

impl Record for OutputConfig {
    const MAGIC: u32 = OUTPUT_MAGIC;
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    magic: u32,
    version: u8,
    payload: &'a T,
}

#[derive(Deserialize)]
struct OwnedEnvelope<T> {
    magic: u32,
    version: u8,
    payload: T,
}

/// Encode a record into `buf`, returning the used length
pub fn encode<T: Record>(value: &T, buf: &mut [u8]) -> Result<usize, RecordError> {
    if buf.len() <= CRC_LEN {
        return Err(RecordError::BufferTooSmall);
    }

    let body_cap = buf.len() - CRC_LEN;
    let envelope = Envelope {
        magic: T::MAGIC,
        version: RECORD_VERSION,
        payload: value,
    };
    let body_len = postcard::to_slice(&envelope, &mut buf[..body_cap])
        .map_err(|e| match e {
            postcard::Error::SerializeBufferFull => RecordError::BufferTooSmall,
            _ => RecordError::Serialize,
        })?
        .len();

    let crc = crc32(&buf[..body_len]);
    buf[body_len..body_len + CRC_LEN].copy_from_slice(&crc.to_le_bytes());

    Ok(body_len + CRC_LEN)
}

/// Decode and validate a record
pub fn decode<T: Record>(bytes: &[u8]) -> Result<T, RecordError> {
    if bytes.len() <= CRC_LEN {
        return Err(RecordError::Deserialize);
    }

    let (body, tail) = bytes.split_at(bytes.len() - CRC_LEN);
    let stored = u32::from_le_bytes([tail[0], tail[1], tail[2], tail[3]]);
    if stored != crc32(body) {
        return Err(RecordError::CrcMismatch);
    }

    let envelope: OwnedEnvelope<T> =
        postcard::from_bytes(body).map_err(|_| RecordError::Deserialize)?;

    if envelope.magic != T::MAGIC {
        return Err(RecordError::BadMagic);
    }
    if envelope.version != RECORD_VERSION {
        return Err(RecordError::VersionMismatch);
    }

    Ok(envelope.payload)
}

/// CRC32 (IEEE 802.3) of a byte slice
pub fn crc32(data: &[u8]) -> u32 {
    !crc32_update(0xFFFF_FFFF, data)
}

fn crc32_update(crc: u32, data: &[u8]) -> u32 {
    const POLY: u32 = 0xEDB8_8320;
    let mut crc = crc;

    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ POLY;
            } else {
                crc >>= 1;
            }
        }
    }

    crc
}
