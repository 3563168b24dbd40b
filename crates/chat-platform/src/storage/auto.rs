//! Pick a storage backend from the configured preference.
//!
//! `Auto` tries localStorage first (persistent) and falls back to memory.
//! An explicitly requested backend that turns out to be unavailable also
//! falls back to memory rather than failing the whole app.

use std::rc::Rc;
use chat_core::ports::StoragePort;
use chat_types::config::{StorageBackendType, StorageConfig};
use super::{LocalStorage, MemoryStorage};

/// Returns a trait object so callers are backend-agnostic.
pub fn auto_detect_storage(config: &StorageConfig) -> Rc<dyn StoragePort> {
    match config.backend {
        StorageBackendType::Memory => {
            log::info!("storage backend: memory");
            Rc::new(MemoryStorage::new())
        }
        StorageBackendType::LocalStorage | StorageBackendType::Auto => {
            match LocalStorage::open() {
                Ok(ls) => {
                    log::info!("storage backend: localStorage");
                    Rc::new(ls)
                }
                Err(e) => {
                    log::warn!("localStorage unavailable ({}), falling back to memory", e);
                    Rc::new(MemoryStorage::new())
                }
            }
        }
    }
}
