use crate::app_dirs::AppDirs;
use crate::exercises;
use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Single text slot holding the user's raw exercise list. The stored value
/// is the pre-dedup text exactly as typed, so the user's formatting survives
/// a reload; normalization happens at session start, not here.
pub trait ListStore: Debug {
    /// Saved text, or the seed list when the slot is absent or unreadable
    fn load(&self) -> String;
    fn save(&self, text: &str) -> io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileListStore {
    path: PathBuf,
    seed: String,
}

impl FileListStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path =
            AppDirs::list_path().unwrap_or_else(|| PathBuf::from("blok_exercises_v1.txt"));
        Self {
            path,
            seed: exercises::default_list_text(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
            seed: exercises::default_list_text(),
        }
    }

    /// Replaces the fallback seed list (used by `--preset`)
    pub fn with_seed(mut self, seed: String) -> Self {
        self.seed = seed;
        self
    }
}

impl ListStore for FileListStore {
    fn load(&self) -> String {
        match fs::read_to_string(&self.path) {
            Ok(text) => text,
            // Storage unavailable degrades to the seed list
            Err(_) => self.seed.clone(),
        }
    }

    fn save(&self, text: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, text)
    }
}

/// In-memory slot for headless tests. Clones share the slot so a test can
/// keep a handle while the app owns the store.
#[derive(Debug, Clone, Default)]
pub struct MemoryListStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryListStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(text.to_string()))),
        }
    }

    /// Last saved text, if any save happened
    pub fn saved(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl ListStore for MemoryListStore {
    fn load(&self) -> String {
        self.slot
            .borrow()
            .clone()
            .unwrap_or_else(exercises::default_list_text)
    }

    fn save(&self, text: &str) -> io::Result<()> {
        *self.slot.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_raw_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("exercises_v1.txt");
        let store = FileListStore::with_path(&path);

        // Raw text with duplicates and odd spacing persists verbatim
        let raw = "Push-ups\n  push-ups  \n\nSquats\n";
        store.save(raw).unwrap();
        assert_eq!(store.load(), raw);
    }

    #[test]
    fn missing_slot_falls_back_to_seed() {
        let dir = tempdir().unwrap();
        let store = FileListStore::with_path(dir.path().join("absent.txt"));

        assert_eq!(store.load(), exercises::default_list_text());
    }

    #[test]
    fn custom_seed_is_served_when_slot_is_absent() {
        let dir = tempdir().unwrap();
        let store = FileListStore::with_path(dir.path().join("absent.txt"))
            .with_seed("Plank\nV-ups".to_string());

        assert_eq!(store.load(), "Plank\nV-ups");
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("state").join("list.txt");
        let store = FileListStore::with_path(&path);

        store.save("Burpees").unwrap();
        assert_eq!(store.load(), "Burpees");
    }

    #[test]
    fn saved_list_wins_over_seed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("exercises_v1.txt");
        let store = FileListStore::with_path(&path).with_seed("Seed".to_string());

        store.save("Saved").unwrap();
        assert_eq!(store.load(), "Saved");
    }

    #[test]
    fn memory_store_defaults_to_seed_and_records_saves() {
        let store = MemoryListStore::new();
        assert_eq!(store.load(), exercises::default_list_text());
        assert_eq!(store.saved(), None);

        store.save("Lunges").unwrap();
        assert_eq!(store.load(), "Lunges");
        assert_eq!(store.saved(), Some("Lunges".to_string()));
    }
}
