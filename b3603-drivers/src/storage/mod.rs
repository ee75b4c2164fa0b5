//! Configuration storage

pub mod flash_store;

pub use flash_store::{FlashConfigStore, StoreError};
