//! Configuration flash
//!
//! A small key-value interface over the MCU's data flash. Each key
//! holds one opaque record; integrity checks live in the record format, not
//! here.

/// Storage keys for persisted data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// System record: name, flags, calibration pairs
    SystemConfig = 0,
    /// Output record: setpoints and shutdown thresholds
    OutputConfig = 1,
}

impl StorageKey {
    /// All keys, in storage order
    pub const ALL: [StorageKey; 2] = [StorageKey::SystemConfig, StorageKey::OutputConfig];

    /// Numeric slot index
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Inverse of [`StorageKey::as_u8`]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageKey::SystemConfig),
            1 => Some(StorageKey::OutputConfig),
            _ => None,
        }
    }
}

/// Flash slot errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Program, erase or read reported a fault
    Flash,
    /// Key not found (slot erased)
    NotFound,
    /// Caller's buffer is shorter than the stored record
    BufferTooSmall,
    /// Record does not fit in its slot
    Full,
}

/// Keyed record storage
///
/// Blocking key-value storage. Writes replace the previous value for the
/// key; the firmware only writes on an explicit SAVE, so no wear levelling
/// is required.
pub trait FlashStorage {
    /// Copy the record for `key` into `buffer`, returning its length
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError>;

    /// Replace the record for `key`
    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_roundtrip() {
        for key in StorageKey::ALL {
            assert_eq!(StorageKey::from_u8(key.as_u8()), Some(key));
        }
        assert_eq!(StorageKey::from_u8(7), None);
    }
}
