//! File-backed slot store.
//!
//! Each slot lives in its own `<key>.json` file inside a capability-scoped
//! data directory. Writes go through a temp-file-and-rename sequence so a
//! crash mid-write never leaves a half-written slot behind; the previous
//! payload survives until the rename lands.

use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};

use crate::domain::ports::{StateSlot, StateStore, StateStoreError};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Durable slot store writing one JSON file per slot.
pub struct JsonFileStore {
    dir: Dir,
}

impl JsonFileStore {
    /// Open a store over an existing data directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let dir = Dir::open_ambient_dir(path, ambient_authority())?;
        Ok(Self { dir })
    }

    /// Wrap an already-opened capability directory.
    #[must_use]
    pub fn from_dir(dir: Dir) -> Self {
        Self { dir }
    }

    fn file_name(slot: StateSlot) -> String {
        format!("{}.json", slot.key())
    }
}

impl StateStore for JsonFileStore {
    fn read(&self, slot: StateSlot) -> Result<Option<String>, StateStoreError> {
        match self.dir.read_to_string(Self::file_name(slot)) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StateStoreError::read(slot, err.to_string())),
        }
    }

    fn write(&self, slot: StateSlot, payload: &str) -> Result<(), StateStoreError> {
        let target = Self::file_name(slot);
        let tmp_name = temp_name(&target);
        write_temp_file(&self.dir, &tmp_name, payload)
            .map_err(|err| StateStoreError::write(slot, err.to_string()))?;
        if let Err(err) = self.dir.rename(&tmp_name, &self.dir, &target) {
            drop(self.dir.remove_file(&tmp_name));
            return Err(StateStoreError::write(slot, err.to_string()));
        }
        sync_directory(&self.dir);
        Ok(())
    }
}

/// A collision-proof hidden temp name alongside the target file.
fn temp_name(target: &str) -> String {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    format!(".{target}.tmp.{}.{nanos}.{counter}", std::process::id())
}

fn write_temp_file(dir: &Dir, tmp_name: &str, payload: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    let written = file
        .write_all(payload.as_bytes())
        .and_then(|()| file.sync_all());
    if let Err(err) = written {
        drop(file);
        drop(dir.remove_file(tmp_name));
        return Err(err);
    }
    Ok(())
}

fn sync_directory(dir: &Dir) {
    // Best effort; a missed directory sync only risks losing the rename on
    // power failure, not corrupting the slot.
    drop(dir.open(".").and_then(|handle| handle.sync_all()));
}
