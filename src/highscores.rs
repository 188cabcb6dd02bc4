//! High score persistence
//!
//! A single integer, read once at startup and written only when a finished
//! run beats it. Persisted to LocalStorage in the browser.

use std::cell::RefCell;
use std::rc::Rc;

/// LocalStorage key
pub const STORAGE_KEY: &str = "vibeKnightsHighScore";

/// Raw string storage for the high score
pub trait HighScoreStore {
    /// Stored value, if any
    fn load(&self) -> Option<String>;
    fn save(&mut self, value: &str);
}

/// In-memory store (native builds and tests).
///
/// Clones share the same slot, so a test can keep a handle while the
/// controller owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `value`
    pub fn with_value(value: &str) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(value.to_string()))),
        }
    }

    /// Current raw value
    pub fn get(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.get()
    }

    fn save(&mut self, value: &str) {
        *self.slot.borrow_mut() = Some(value.to_string());
    }
}

/// Parse a stored high score. Missing or malformed values count as zero.
///
/// Only whole non-negative integers are accepted: "12.5" reads as 0, not 12.
/// The game never writes anything else.
pub fn parse_high_score(raw: Option<&str>) -> u64 {
    match raw.map(str::trim) {
        None | Some("") => 0,
        Some(s) => s.parse::<u64>().unwrap_or_else(|_| {
            log::warn!("Ignoring malformed high score {:?}", s);
            0
        }),
    }
}

/// The best score seen so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    pub value: u64,
}

impl HighScore {
    /// Read the stored value
    pub fn load(store: &dyn HighScoreStore) -> Self {
        let value = parse_high_score(store.load().as_deref());
        log::info!("Loaded high score {}", value);
        Self { value }
    }

    /// Record a finished run. Writes to the store only if `score` beats the
    /// current value; returns true in that case.
    pub fn submit(&mut self, score: u64, store: &mut dyn HighScoreStore) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        store.save(&score.to_string());
        log::info!("New high score {}", score);
        true
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{HighScoreStore, STORAGE_KEY};

    /// Browser LocalStorage backend
    #[derive(Debug, Default)]
    pub struct LocalStorageStore;

    impl LocalStorageStore {
        fn storage() -> Option<web_sys::Storage> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
        }
    }

    impl HighScoreStore for LocalStorageStore {
        fn load(&self) -> Option<String> {
            Self::storage()?.get_item(STORAGE_KEY).ok().flatten()
        }

        fn save(&mut self, value: &str) {
            match Self::storage() {
                Some(storage) => {
                    if storage.set_item(STORAGE_KEY, value).is_err() {
                        log::warn!("Failed to write high score to LocalStorage");
                    }
                }
                None => log::warn!("LocalStorage unavailable, high score not saved"),
            }
        }
    }
}
