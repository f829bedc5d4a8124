//! The backing file.

use crate::JsonStoreError;
use campaign_store::{StoreError, SubscriptionMap, SubscriptionStore};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default file name inside the data directory.
pub const DEFAULT_FILE_NAME: &str = "subscriptionCodes.json";

/// Subscription store persisted as one pretty-printed JSON document.
///
/// Writes go to a sibling temp file which is then renamed over the target, so
/// a failed save leaves the previous document intact.
///
/// Single-writer only: two processes pointing at the same file each keep
/// their own cached copy and will overwrite each other's changes.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data_dir>/subscriptionCodes.json`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(DEFAULT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: io::Error) -> JsonStoreError {
        JsonStoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read(&self) -> Result<SubscriptionMap, JsonStoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no subscription file yet");
                return Ok(SubscriptionMap::new());
            }
            Err(e) => return Err(self.io_err(e)),
        };
        serde_json::from_str(&contents).map_err(|source| JsonStoreError::Json {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn write(&self, map: &SubscriptionMap) -> Result<(), JsonStoreError> {
        if map.is_empty() {
            return self.remove();
        }

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.io_err(e))?;
        }

        let body = serde_json::to_vec_pretty(map).map_err(|source| JsonStoreError::Json {
            path: self.path.display().to_string(),
            source,
        })?;

        let tmp = self.temp_path();
        let result = (|| -> io::Result<()> {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&body)?;
            file.sync_all()?;
            fs::rename(&tmp, &self.path)
        })();
        if let Err(e) = result {
            let _ = fs::remove_file(&tmp);
            return Err(self.io_err(e));
        }

        debug!(path = %self.path.display(), records = map.len(), "subscription file saved");
        Ok(())
    }

    fn remove(&self) -> Result<(), JsonStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "no subscriptions left, file deleted");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_err(e)),
        }
    }
}

impl SubscriptionStore for JsonFileStore {
    fn load(&self) -> Result<SubscriptionMap, StoreError> {
        Ok(self.read()?)
    }

    fn save(&self, map: &SubscriptionMap) -> Result<(), StoreError> {
        Ok(self.write(map)?)
    }
}
