//! Flash-backed configuration store
//!
//! Each record lives under its own [`StorageKey`] as a framed postcard blob
//! (see `b3603_core::config::record`). Any read, decode or integrity
//! failure falls back to the factory defaults; save failures are logged
//! and otherwise ignored so the command loop keeps running.

use b3603_core::config::record::{self, Record, RecordError, MAX_RECORD_SIZE};
use b3603_core::config::{OutputConfig, SystemConfig};
use b3603_core::traits::ConfigStore;
use b3603_hal::{FlashError, FlashStorage, StorageKey};

/// Configuration persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Flash operation failed
    Flash(FlashError),
    /// Record framing or integrity check failed
    Record(RecordError),
}

impl From<FlashError> for StoreError {
    fn from(e: FlashError) -> Self {
        StoreError::Flash(e)
    }
}

impl From<RecordError> for StoreError {
    fn from(e: RecordError) -> Self {
        StoreError::Record(e)
    }
}

/// [`ConfigStore`] on top of a key-value flash
pub struct FlashConfigStore<F> {
    flash: F,
}

impl<F: FlashStorage> FlashConfigStore<F> {
    pub fn new(flash: F) -> Self {
        Self { flash }
    }

    /// Read and validate one record
    pub fn read<T: Record>(&mut self, key: StorageKey) -> Result<T, StoreError> {
        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let len = self.flash.read(key, &mut buffer)?;
        debug!("read {} bytes for key {}", len, key.as_u8());
        Ok(record::decode(&buffer[..len])?)
    }

    /// Frame and write one record
    pub fn write<T: Record>(&mut self, key: StorageKey, value: &T) -> Result<(), StoreError> {
        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let len = record::encode(value, &mut buffer)?;
        self.flash.write(key, &buffer[..len])?;
        debug!("wrote {} bytes for key {}", len, key.as_u8());
        Ok(())
    }

    fn read_or<T: Record>(&mut self, key: StorageKey, fallback: T) -> T {
        match self.read(key) {
            Ok(value) => value,
            Err(StoreError::Flash(FlashError::NotFound)) => {
                info!("no record for key {}, using defaults", key.as_u8());
                fallback
            }
            Err(e) => {
                warn!("record for key {} unusable: {:?}, using defaults", key.as_u8(), e);
                fallback
            }
        }
    }

    fn write_logged<T: Record>(&mut self, key: StorageKey, value: &T) {
        if let Err(e) = self.write(key, value) {
            warn!("failed to save key {}: {:?}", key.as_u8(), e);
        }
    }

    /// Access the underlying flash
    pub fn flash(&mut self) -> &mut F {
        &mut self.flash
    }
}

impl<F: FlashStorage> ConfigStore for FlashConfigStore<F> {
    fn load_system(&mut self) -> SystemConfig {
        let fallback = self.default_system();
        self.read_or(StorageKey::SystemConfig, fallback)
    }

    fn save_system(&mut self, config: &SystemConfig) {
        self.write_logged(StorageKey::SystemConfig, config);
    }

    fn load_output(&mut self) -> OutputConfig {
        let fallback = self.default_output();
        self.read_or(StorageKey::OutputConfig, fallback)
    }

    fn save_output(&mut self, config: &OutputConfig) {
        self.write_logged(StorageKey::OutputConfig, config);
    }
}
