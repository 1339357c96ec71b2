use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, SystemTime};

/// Smallest elapsed time used as a divisor, so two samples taken almost at
/// once cannot produce an absurd rate.
const MIN_ELAPSED: Duration = Duration::from_millis(1);

/// Turns successive samples of cumulative counters into per-second rates.
#[derive(Debug)]
pub struct RateTracker<K> {
    last_sample: HashMap<K, u64>,
    last_sample_time: Option<SystemTime>,
}

impl<K: Eq + Hash + Clone> Default for RateTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> RateTracker<K> {
    pub fn new() -> Self {
        Self {
            last_sample: HashMap::new(),
            last_sample_time: None,
        }
    }

    /// Computes a rate for every key present in both this and the previous
    /// sample, then makes `current` the new baseline.
    ///
    /// Returns an empty map on the first call and whenever `now` is not after
    /// the previous sample time. Counters that went backwards report `0.0`.
    pub fn update(&mut self, current: HashMap<K, u64>, now: SystemTime) -> HashMap<K, f64> {
        let elapsed = self
            .last_sample_time
            .and_then(|last| now.duration_since(last).ok())
            .filter(|elapsed| !elapsed.is_zero());

        let rates = match elapsed {
            Some(elapsed) => {
                let secs = elapsed.max(MIN_ELAPSED).as_secs_f64();
                current
                    .iter()
                    .filter_map(|(key, &value)| {
                        let previous = *self.last_sample.get(key)?;
                        let delta = value.saturating_sub(previous);
                        Some((key.clone(), delta as f64 / secs))
                    })
                    .collect()
            }
            None => HashMap::new(),
        };

        self.last_sample = current;
        self.last_sample_time = Some(now);
        rates
    }

    pub fn has_baseline(&self) -> bool {
        self.last_sample_time.is_some()
    }

    pub fn tracked_keys(&self) -> usize {
        self.last_sample.len()
    }
}
