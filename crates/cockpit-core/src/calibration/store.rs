//! Calibration persistence over a string key-value backend.

use core::{convert::Infallible, fmt::Debug};
use std::collections::HashMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{CalibrationConfig, Point};

/// Key under which the calibration record is kept.
pub const STORAGE_KEY: &str = "cockpitSvgCfg";

/// Abstract string key-value backend.
pub trait KeyValueStore {
    type Error: Debug;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
    fn remove(&mut self, key: &str) -> Result<(), Self::Error>;
}

/// In-process backend.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Self::Error> {
        self.entries.remove(key);
        Ok(())
    }
}

#[derive(Debug)]
pub enum StoreError<E> {
    Backend(E),
    Encode(serde_json::Error),
}

#[derive(Serialize)]
struct RecordOut<'a> {
    quadrilateral: [[f64; 2]; 4],
    anchor: Point,
    label: &'a str,
}

/// Current field names win over the legacy `trapezoid`/`btnAnchor` ones when
/// a record carries both.
#[derive(Deserialize)]
struct RecordIn {
    #[serde(default)]
    quadrilateral: Option<[[f64; 2]; 4]>,
    #[serde(default)]
    trapezoid: Option<[[f64; 2]; 4]>,
    #[serde(default)]
    anchor: Option<Point>,
    #[serde(default, rename = "btnAnchor")]
    btn_anchor: Option<Point>,
    #[serde(default)]
    label: Option<String>,
}

#[derive(Debug)]
pub struct CalibrationStore<K>
where
    K: KeyValueStore,
{
    backend: K,
    key: &'static str,
}

impl<K> CalibrationStore<K>
where
    K: KeyValueStore,
{
    pub fn new(backend: K) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    pub fn with_key(backend: K, key: &'static str) -> Self {
        Self { backend, key }
    }

    /// Stored configuration, or `None` when absent or unreadable.
    ///
    /// Fields missing from the record keep their defaults.
    pub fn load(&self) -> Option<CalibrationConfig> {
        let raw = match self.backend.get(self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!("calibration: store read failed: {:?}", err);
                return None;
            }
        };

        let record = match serde_json::from_str::<Option<RecordIn>>(&raw) {
            Ok(Some(record)) => record,
            Ok(None) => return None,
            Err(err) => {
                debug!("calibration: ignoring malformed record: {}", err);
                return None;
            }
        };

        let mut config = CalibrationConfig::default();
        if let Some(points) = record.quadrilateral.or(record.trapezoid) {
            config.quadrilateral = points.map(|[x, y]| Point::new(x, y));
        }
        if let Some(anchor) = record.anchor.or(record.btn_anchor) {
            config.anchor = anchor;
        }
        if let Some(label) = record.label.filter(|label| !label.is_empty()) {
            config.label = label;
        }
        Some(config)
    }

    pub fn save(&mut self, config: &CalibrationConfig) -> Result<(), StoreError<K::Error>> {
        let record = RecordOut {
            quadrilateral: config.quadrilateral.map(|p| [p.x, p.y]),
            anchor: config.anchor,
            label: &config.label,
        };
        let json = serde_json::to_string(&record).map_err(StoreError::Encode)?;
        self.backend
            .set(self.key, &json)
            .map_err(StoreError::Backend)
    }

    pub fn clear(&mut self) -> Result<(), StoreError<K::Error>> {
        self.backend.remove(self.key).map_err(StoreError::Backend)
    }

    pub fn backend(&self) -> &K {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut K {
        &mut self.backend
    }
}
