//! Page-per-key flash storage
//!
//! Each [`StorageKey`] owns one 1KB page at the top of flash. A slot is
//! laid out as a little-endian length halfword followed by the data,
//! padded to the 2-byte program granularity. An erased length (`0xFFFF`)
//! means the key was never written.

use b3603_hal::{FlashError, FlashStorage, StorageKey};
use embassy_stm32::flash::{Blocking, Flash};

#[cfg(feature = "stm32f072cb")]
pub const FLASH_SIZE: u32 = 128 * 1024;
#[cfg(not(feature = "stm32f072cb"))]
pub const FLASH_SIZE: u32 = 64 * 1024;

/// Flash page size for STM32F0 series
pub const FLASH_PAGE_SIZE: u32 = 1024;

/// Largest record accepted by [`PageFlash::write`]
pub const MAX_SLOT_DATA: usize = 128;

const HEADER_LEN: usize = 2;
const ERASED_LEN: u16 = 0xFFFF;

/// Offset of the page holding `key`, relative to the start of flash
pub const fn slot_offset(key: StorageKey) -> u32 {
    let slots = StorageKey::ALL.len() as u32;
    FLASH_SIZE - (slots - key as u32) * FLASH_PAGE_SIZE
}

/// Blocking flash with one page per key
pub struct PageFlash<'d> {
    flash: Flash<'d, Blocking>,
}

impl<'d> PageFlash<'d> {
    pub fn new(flash: Flash<'d, Blocking>) -> Self {
        Self { flash }
    }

    fn erase(&mut self, key: StorageKey) -> Result<(), FlashError> {
        let from = slot_offset(key);
        self.flash
            .blocking_erase(from, from + FLASH_PAGE_SIZE)
            .map_err(|_| FlashError::Flash)
    }
}

impl FlashStorage for PageFlash<'_> {
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let offset = slot_offset(key);

        let mut header = [0u8; HEADER_LEN];
        self.flash
            .blocking_read(offset, &mut header)
            .map_err(|_| FlashError::Flash)?;

        let len = u16::from_le_bytes(header);
        if len == ERASED_LEN {
            return Err(FlashError::NotFound);
        }

        let len = len as usize;
        if len > MAX_SLOT_DATA {
            return Err(FlashError::Flash);
        }
        if len > buffer.len() {
            return Err(FlashError::BufferTooSmall);
        }

        self.flash
            .blocking_read(offset + HEADER_LEN as u32, &mut buffer[..len])
            .map_err(|_| FlashError::Flash)?;

        Ok(len)
    }

    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        if data.len() > MAX_SLOT_DATA {
            return Err(FlashError::Full);
        }

        let mut staging = [0xFFu8; HEADER_LEN + MAX_SLOT_DATA];
        staging[..HEADER_LEN].copy_from_slice(&(data.len() as u16).to_le_bytes());
        staging[HEADER_LEN..HEADER_LEN + data.len()].copy_from_slice(data);

        let used = HEADER_LEN + data.len();
        let padded = used + (used & 1);

        self.erase(key)?;
        self.flash
            .blocking_write(slot_offset(key), &staging[..padded])
            .map_err(|_| FlashError::Flash)
    }
}
