use super::KeyValueStore;
use crate::error::{Result, VocabError};
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed store: each key maps to `<key>.json` under the data directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(VocabError::Io)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(path).map_err(VocabError::Io)?;
        Ok(Some(value))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;
        fs::write(self.key_path(key), value).map_err(VocabError::Io)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(path).map_err(VocabError::Io)?;
        }
        Ok(())
    }

    fn entries(&self) -> Result<Vec<(String, String)>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(VocabError::Io)? {
            let entry = entry.map_err(VocabError::Io)?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let value = fs::read_to_string(&path).map_err(VocabError::Io)?;
            entries.push((key.to_string(), value));
        }
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::keys;

    #[test]
    fn read_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("data"));
        assert!(store.read(keys::PROGRESS).unwrap().is_none());
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());
        store.write(keys::SETTINGS, "{\"autoSave\":false}").unwrap();
        assert_eq!(
            store.read(keys::SETTINGS).unwrap().as_deref(),
            Some("{\"autoSave\":false}")
        );
    }

    #[test]
    fn remove_deletes_the_file_and_tolerates_absence() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());
        store.write(keys::PROGRESS, "{}").unwrap();
        store.remove(keys::PROGRESS).unwrap();
        assert!(store.read(keys::PROGRESS).unwrap().is_none());
        // A second remove is a no-op, not an error.
        store.remove(keys::PROGRESS).unwrap();
    }

    #[test]
    fn entries_lists_all_persisted_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());
        store.write(keys::PROGRESS, "aa").unwrap();
        store.write(keys::SETTINGS, "bbb").unwrap();

        let entries = store.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries
            .iter()
            .any(|(k, v)| k == keys::PROGRESS && v == "aa"));
        assert!(entries
            .iter()
            .any(|(k, v)| k == keys::SETTINGS && v == "bbb"));
    }
}
