//! Best score tracking
//!
//! A single integer persisted under a fixed key. Absent or unparseable values
//! read as zero.

use crate::persistence::KeyValueStore;

/// Highest score across all runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore(pub u32);

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "lane_dodge_best";

    /// Lenient parse of a stored value
    pub fn parse(raw: Option<&str>) -> Self {
        let value = raw.and_then(|s| s.trim().parse::<u32>().ok()).unwrap_or(0);
        Self(value)
    }

    /// Read the stored best score (0 if missing or corrupt)
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let raw = store.get(Self::STORAGE_KEY);
        let best = Self::parse(raw.as_deref());
        match raw {
            Some(ref s) if best.0 == 0 && s.trim() != "0" => {
                log::warn!("Ignoring unreadable best score {s:?}");
            }
            Some(_) => log::info!("Loaded best score {}", best.0),
            None => log::info!("No best score found, starting fresh"),
        }
        best
    }

    /// Record a finished run. Writes only when the score beats the current best.
    /// Returns true if a new best was set.
    pub fn record<S: KeyValueStore + ?Sized>(&mut self, store: &mut S, score: u32) -> bool {
        if score <= self.0 {
            return false;
        }
        self.0 = score;
        if store.set(Self::STORAGE_KEY, &score.to_string()) {
            log::info!("New best score saved: {score}");
        }
        true
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use proptest::prelude::*;

    #[test]
    fn test_parse_lenient() {
        assert_eq!(BestScore::parse(None), BestScore(0));
        assert_eq!(BestScore::parse(Some("42")), BestScore(42));
        assert_eq!(BestScore::parse(Some(" 17\n")), BestScore(17));
        assert_eq!(BestScore::parse(Some("abc")), BestScore(0));
        assert_eq!(BestScore::parse(Some("-3")), BestScore(0));
        assert_eq!(BestScore::parse(Some("")), BestScore(0));
    }

    #[test]
    fn test_load_missing_defaults_to_zero() {
        let store = MemoryStore::new();
        assert_eq!(BestScore::load(&store).value(), 0);
    }

    #[test]
    fn test_record_only_on_improvement() {
        let mut store = MemoryStore::new();
        store.set(BestScore::STORAGE_KEY, "10");
        let mut best = BestScore::load(&store);
        assert_eq!(best.value(), 10);

        assert!(!best.record(&mut store, 7));
        assert!(!best.record(&mut store, 10));
        assert_eq!(store.get(BestScore::STORAGE_KEY).as_deref(), Some("10"));

        assert!(best.record(&mut store, 11));
        assert_eq!(store.get(BestScore::STORAGE_KEY).as_deref(), Some("11"));
        assert_eq!(BestScore::load(&store).value(), 11);
    }

    proptest! {
        #[test]
        fn prop_best_is_running_max(start in 0u32..1000, scores in prop::collection::vec(0u32..1000, 0..50)) {
            let mut store = MemoryStore::new();
            let mut best = BestScore(start);
            let mut expected = start;
            for score in scores {
                let previous = best.value();
                best.record(&mut store, score);
                expected = expected.max(score);
                prop_assert!(best.value() >= previous);
                prop_assert_eq!(best.value(), expected);
            }
        }
    }
}
