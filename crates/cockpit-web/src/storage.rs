//! `localStorage` backend for calibration data.

use cockpit_core::calibration::{KeyValueStore, MemoryStore};
use log::warn;
use web_sys::Storage;

use crate::dom::{self, DomError};

/// Browser storage, or process memory when `localStorage` is unavailable
/// (private browsing, blocked cookies).
pub enum BrowserStore {
    Local(Storage),
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn open() -> Self {
        match dom::window().and_then(|window| {
            window
                .local_storage()
                .map_err(DomError::from_js)?
                .ok_or(DomError::Js("localStorage missing".to_string()))
        }) {
            Ok(storage) => Self::Local(storage),
            Err(err) => {
                warn!("storage: localStorage unavailable, using memory: {:?}", err);
                Self::Memory(MemoryStore::new())
            }
        }
    }
}

impl KeyValueStore for BrowserStore {
    type Error = DomError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        match self {
            Self::Local(storage) => storage.get_item(key).map_err(DomError::from_js),
            Self::Memory(memory) => Ok(memory.raw(key).map(str::to_string)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        match self {
            Self::Local(storage) => storage.set_item(key, value).map_err(DomError::from_js),
            Self::Memory(memory) => {
                let Ok(()) = memory.set(key, value);
                Ok(())
            }
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), Self::Error> {
        match self {
            Self::Local(storage) => storage.remove_item(key).map_err(DomError::from_js),
            Self::Memory(memory) => {
                let Ok(()) = memory.remove(key);
                Ok(())
            }
        }
    }
}
