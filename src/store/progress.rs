use std::path::PathBuf;

use crate::store::json_store::JsonStore;
use crate::store::schema::{ProgressData, SettingsData};

/// The learner's persisted progress: which lessons are done, how many
/// badges that earns, and the sound toggle.
///
/// When the backing store can't be opened the whole contract keeps working
/// in memory; a lesson is never failed over a disk problem, saves are
/// best-effort.
pub struct ProgressStore {
    store: Option<JsonStore>,
    progress: ProgressData,
    settings: SettingsData,
}

impl ProgressStore {
    pub fn open() -> Self {
        let store = JsonStore::new().ok();
        Self::from_store(store)
    }

    /// Used by tests to point at a scratch directory.
    #[allow(dead_code)]
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self::from_store(JsonStore::with_base_dir(base_dir).ok())
    }

    /// No persistence at all; everything lives for the process only.
    #[allow(dead_code)] // Used by tests; open() degrades to this on its own
    pub fn in_memory() -> Self {
        Self::from_store(None)
    }

    fn from_store(store: Option<JsonStore>) -> Self {
        let (progress, settings) = match store {
            Some(ref s) => (s.load_progress(), s.load_settings()),
            None => (ProgressData::default(), SettingsData::default()),
        };
        Self {
            store,
            progress,
            settings,
        }
    }

    pub fn is_completed(&self, lesson_id: u32) -> bool {
        self.progress.completed.contains(&lesson_id)
    }

    /// Record a finished lesson. Marking an already-completed lesson again
    /// changes nothing.
    pub fn mark_completed(&mut self, lesson_id: u32) {
        if self.is_completed(lesson_id) {
            return;
        }
        self.progress.completed.push(lesson_id);
        self.progress.badges = self.progress.completed.len() as u32;
        self.progress.last_completed_date =
            Some(chrono::Utc::now().format("%Y-%m-%d").to_string());
        self.save_progress();
    }

    /// Completed lesson ids in the order they were earned.
    pub fn list_completed(&self) -> &[u32] {
        &self.progress.completed
    }

    pub fn badges(&self) -> u32 {
        self.progress.badges
    }

    pub fn reset(&mut self) {
        self.progress = ProgressData::default();
        self.save_progress();
    }

    pub fn sound_enabled(&self) -> bool {
        self.settings.sound_enabled
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.settings.sound_enabled = enabled;
        if let Some(ref store) = self.store {
            let _ = store.save_settings(&self.settings);
        }
    }

    fn save_progress(&self) {
        if let Some(ref store) = self.store {
            let _ = store.save_progress(&self.progress);
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn mark_completed_is_idempotent() {
        let mut store = ProgressStore::in_memory();
        store.mark_completed(2);
        store.mark_completed(2);
        assert_eq!(store.list_completed(), &[2]);
        assert_eq!(store.badges(), 1);
    }

    #[test]
    fn completion_order_is_preserved() {
        let mut store = ProgressStore::in_memory();
        store.mark_completed(5);
        store.mark_completed(1);
        store.mark_completed(3);
        assert_eq!(store.list_completed(), &[5, 1, 3]);
        assert_eq!(store.badges(), 3);
        assert!(store.is_completed(1));
        assert!(!store.is_completed(2));
    }

    #[test]
    fn reset_clears_progress_but_not_settings() {
        let mut store = ProgressStore::in_memory();
        store.mark_completed(1);
        store.set_sound_enabled(false);
        store.reset();
        assert!(store.list_completed().is_empty());
        assert_eq!(store.badges(), 0);
        assert!(!store.sound_enabled());
    }

    #[test]
    fn progress_survives_a_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = ProgressStore::with_base_dir(dir.path().to_path_buf());
            store.mark_completed(2);
            store.mark_completed(6);
            store.set_sound_enabled(false);
        }
        let store = ProgressStore::with_base_dir(dir.path().to_path_buf());
        assert_eq!(store.list_completed(), &[2, 6]);
        assert_eq!(store.badges(), 2);
        assert!(!store.sound_enabled());
    }

    #[test]
    fn in_memory_store_honors_the_full_contract() {
        let mut store = ProgressStore::in_memory();
        assert!(!store.is_completed(4));
        store.mark_completed(4);
        assert!(store.is_completed(4));
        store.reset();
        assert!(!store.is_completed(4));
    }
}
