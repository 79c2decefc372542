// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, bail, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File(Vec<u8>),
    Dir,
}

/// In-memory filesystem. Clones share the same underlying tree.
///
/// Every [`FileSystem::write`] is also appended to a log so tests can check
/// what was staged, and in which order.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
    writes: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        let mut files = HashMap::new();
        files.insert(PathBuf::from("."), MockEntry::Dir);

        Self {
            files: Arc::new(Mutex::new(files)),
            writes: Arc::default(),
        }
    }

    /// Paths passed to `write`, oldest first. Seeded files are not included.
    pub fn written(&self) -> Vec<PathBuf> {
        self.writes.lock().unwrap().clone()
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = path.as_ref().to_path_buf();
        let mut files = self.files.lock().unwrap();
        if let Some(parent) = path.parent() {
            Self::ensure_dirs(&mut files, parent);
        }
        files.insert(path, MockEntry::File(content.into()));
    }

    /// Paths of all files directly inside `dir`, sorted.
    pub fn files_in(&self, dir: impl AsRef<Path>) -> Vec<PathBuf> {
        let dir = dir.as_ref();
        let files = self.files.lock().unwrap();
        let mut found: Vec<PathBuf> = files
            .iter()
            .filter(|(p, e)| matches!(e, MockEntry::File(_)) && p.parent() == Some(dir))
            .map(|(p, _)| p.clone())
            .collect();
        found.sort();
        found
    }

    fn ensure_dirs(files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        let mut current = Some(path);
        while let Some(p) = current {
            if p.as_os_str().is_empty() || files.contains_key(p) {
                break;
            }
            files.insert(p.to_path_buf(), MockEntry::Dir);
            current = p.parent();
        }
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let files = self.files.lock().unwrap();
        match files.get(path) {
            Some(MockEntry::File(content)) => Ok(String::from_utf8_lossy(content).into_owned()),
            Some(MockEntry::Dir) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if self.is_dir(path) {
            bail!("cannot write over directory {:?}", path);
        }
        self.add_file(path, contents);
        self.writes.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        files.contains_key(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        matches!(files.get(path), Some(MockEntry::File(_)))
    }

    fn is_dir(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        matches!(files.get(path), Some(MockEntry::Dir))
    }

    fn create_fresh_dir(&self, path: &Path) -> Result<()> {
        let mut files = self.files.lock().unwrap();
        if files.contains_key(path) {
            bail!("directory {:?} already exists", path);
        }
        Self::ensure_dirs(&mut files, path);
        Ok(())
    }
}
