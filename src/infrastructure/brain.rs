//! # JSON Brain
//!
//! File-backed implementation of the `ConfigStore` trait.
//! Keeps every key in memory and rewrites `brain.json` on each `set`.

use crate::domain::traits::ConfigStore;
use anyhow::{Context, Result, anyhow};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub struct JsonBrain {
    path: PathBuf,
    data: Mutex<Map<String, Value>>,
}

impl JsonBrain {
    /// Opens the brain at `path`. A missing file starts empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read brain at {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse brain at {}", path.display()))?
        } else {
            Map::new()
        };
        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }
}

impl ConfigStore for JsonBrain {
    fn get(&self, key: &str) -> Option<Value> {
        self.data.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut data = self
            .data
            .lock()
            .map_err(|_| anyhow!("brain lock poisoned"))?;
        data.insert(key.to_string(), value);
        let content = serde_json::to_string_pretty(&*data)?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write brain at {}", self.path.display()))?;
        Ok(())
    }
}
