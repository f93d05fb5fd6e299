//! Per-resource attempt counting against a fixed ceiling.

use std::collections::HashMap;

/// Counts attempts per resource name against a fixed ceiling.
///
/// Counters are scoped to a single deletion pass: counts only ever grow,
/// and the only reset is constructing a fresh counter.
#[derive(Debug)]
pub struct RetryCounter {
    max_retries: u32,
    counts: HashMap<String, u32>,
}

impl RetryCounter {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            counts: HashMap::new(),
        }
    }

    pub fn increment(&mut self, key: &str) {
        *self.counts.entry(key.to_string()).or_insert(0) += 1;
    }

    pub fn count(&self, key: &str) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn is_maxed_out(&self, key: &str) -> bool {
        self.count(key) >= self.max_retries
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}
