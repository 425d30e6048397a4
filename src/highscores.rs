//! All-time high score persistence
//!
//! The simulation sees storage as a narrow key-value seam: load an optional
//! score, store a new one. On the web that maps to LocalStorage. Failures are
//! logged and never fatal; the in-memory score stays authoritative for the
//! session.

/// Key-value seam for the persisted all-time high score.
pub trait ScoreStore {
    /// Read the stored score. `None` when nothing has been stored yet.
    fn load(&self) -> Option<u32>;

    /// Store a new score. Must not panic when storage is unavailable.
    fn store(&mut self, points: u32);
}

/// LocalStorage-backed store. A no-op off wasm.
#[derive(Debug, Default)]
pub struct LocalScoreStore;

impl LocalScoreStore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "powder_run_high_score";

    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalScoreStore {
    fn load(&self) -> Option<u32> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()?;

        let json = storage.get_item(Self::STORAGE_KEY).ok()??;
        match serde_json::from_str(&json) {
            Ok(points) => {
                log::info!("Loaded all-time high score: {}", points);
                Some(points)
            }
            Err(err) => {
                log::warn!("Stored high score unreadable, starting from 0: {}", err);
                None
            }
        }
    }

    fn store(&mut self, points: u32) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            log::warn!("LocalStorage unavailable, high score not persisted");
            return;
        };

        if let Ok(json) = serde_json::to_string(&points) {
            if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                log::warn!("Failed to persist high score {}", points);
            }
        }
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
impl ScoreStore for LocalScoreStore {
    fn load(&self) -> Option<u32> {
        None
    }

    fn store(&mut self, _points: u32) {
        // No-op for native
    }
}

/// In-memory store for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    stored: Option<u32>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// What the last `store` call wrote, if any.
    pub fn stored(&self) -> Option<u32> {
        self.stored
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Option<u32> {
        self.stored
    }

    fn store(&mut self, points: u32) {
        self.stored = Some(points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryScoreStore::new();
        assert_eq!(store.load(), None);

        store.store(42);
        assert_eq!(store.load(), Some(42));
        assert_eq!(store.stored(), Some(42));
    }

    #[test]
    fn native_local_store_is_inert() {
        let mut store = LocalScoreStore::new();
        store.store(7);
        assert_eq!(store.load(), None);
    }
}
