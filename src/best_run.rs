//! Best-run record
//!
//! A single record `{score, distance}` persisted through a [`Storage`]
//! backend. Runs are ranked by score, ties broken by distance. The stored
//! record never gets worse.

use serde::{Deserialize, Serialize};

use crate::persistence::{Storage, StorageError, load_json, save_json};

/// Storage key for the record
pub const STORAGE_KEY: &str = "lane_runner_best_run";

/// A completed run, distance rounded to whole meters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BestRun {
    pub score: u32,
    pub distance: u32,
}

impl BestRun {
    /// Record for a run that ended with `score` after `distance` units
    pub fn from_run(score: u32, distance: f32) -> Self {
        Self {
            score,
            distance: distance.max(0.0).round() as u32,
        }
    }

    /// Whether this run strictly beats `other` (score first, then distance)
    pub fn beats(&self, other: &BestRun) -> bool {
        (self.score, self.distance) > (other.score, other.distance)
    }

    /// Label text for the HUD
    pub fn label(&self) -> String {
        format!("Best: {} / {} m", self.score, self.distance)
    }
}

/// Reads and updates the persisted best run
#[derive(Debug, Clone)]
pub struct BestRunStore<S: Storage> {
    storage: S,
}

impl<S: Storage> BestRunStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Load the stored record. Unreadable or corrupt data counts as no record.
    pub fn load(&self) -> Option<BestRun> {
        match load_json(&self.storage, STORAGE_KEY) {
            Ok(best) => best,
            Err(e) => {
                log::warn!("Failed to read best run: {}", e);
                None
            }
        }
    }

    /// Offer a finished run. Returns true when it is a new record.
    ///
    /// Unreachable storage means no record can be compared, so nothing is
    /// claimed. A corrupt record is replaced. A failed write is logged; the
    /// return value still reflects whether the run outranked the old record.
    pub fn save(&mut self, score: u32, distance: f32) -> bool {
        let current = BestRun::from_run(score, distance);
        let previous = match load_json::<BestRun>(&self.storage, STORAGE_KEY) {
            Ok(best) => best,
            Err(StorageError::Unavailable(reason)) => {
                log::warn!("Best run not saved, storage unavailable: {}", reason);
                return false;
            }
            Err(e) => {
                log::warn!("Replacing unreadable best run: {}", e);
                None
            }
        };
        let is_new_record = match previous {
            None => true,
            Some(best) => current.beats(&best),
        };

        if is_new_record {
            match save_json(&mut self.storage, STORAGE_KEY, &current) {
                Ok(()) => log::info!(
                    "New best run: {} collected, {} m",
                    current.score,
                    current.distance
                ),
                Err(e) => log::warn!("Failed to save best run: {}", e),
            }
        }

        is_new_record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_first_run_is_a_record() {
        let mut store = BestRunStore::new(MemoryStorage::new());
        assert_eq!(store.load(), None);
        assert!(store.save(0, 3.4));
        assert_eq!(store.load(), Some(BestRun { score: 0, distance: 3 }));
    }

    #[test]
    fn test_score_dominates_distance() {
        let mut store = BestRunStore::new(MemoryStorage::new());
        assert!(store.save(5, 100.0));
        assert!(!store.save(3, 200.0));
        assert_eq!(store.load(), Some(BestRun { score: 5, distance: 100 }));
    }

    #[test]
    fn test_distance_breaks_ties() {
        let mut store = BestRunStore::new(MemoryStorage::new());
        store.save(5, 100.0);
        assert!(store.save(5, 150.0));
        assert_eq!(store.load(), Some(BestRun { score: 5, distance: 150 }));
        // An exact tie is not a new record
        assert!(!store.save(5, 150.0));
    }

    #[test]
    fn test_distance_is_rounded() {
        let mut store = BestRunStore::new(MemoryStorage::new());
        store.save(1, 99.5);
        assert_eq!(store.load().map(|b| b.distance), Some(100));
        assert_eq!(
            store.storage().get_raw(STORAGE_KEY),
            Some(r#"{"score":1,"distance":100}"#)
        );
    }

    #[test]
    fn test_corrupt_record_treated_as_absent() {
        let mut storage = MemoryStorage::new();
        storage.insert_raw(STORAGE_KEY, "{\"score\": -4");
        let mut store = BestRunStore::new(storage);
        assert_eq!(store.load(), None);
        assert!(store.save(2, 10.0));
        assert_eq!(store.load(), Some(BestRun { score: 2, distance: 10 }));
    }

    #[test]
    fn test_negative_fields_rejected() {
        let mut storage = MemoryStorage::new();
        storage.insert_raw(STORAGE_KEY, r#"{"score":-1,"distance":5}"#);
        let store = BestRunStore::new(storage);
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_unavailable_storage_claims_no_record() {
        let mut store = BestRunStore::new(MemoryStorage::unavailable());
        assert_eq!(store.load(), None);
        assert!(!store.save(1, 1.0));
        assert!(!store.save(9, 500.0));
    }

    #[test]
    fn test_label() {
        assert_eq!(BestRun { score: 5, distance: 150 }.label(), "Best: 5 / 150 m");
    }
}
