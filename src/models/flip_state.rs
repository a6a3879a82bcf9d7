//! Per-card flip flags for the current view. Nothing here is persisted.
use std::collections::HashMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlipState {
    flipped: HashMap<String, bool>,
}

impl FlipState {
    /// Inverts the flag of `id` only. Absent ids count as not flipped.
    pub fn toggle(&mut self, id: &str) {
        let entry = self.flipped.entry(id.to_string()).or_insert(false);
        *entry = !*entry;
    }

    pub fn is_flipped(&self, id: &str) -> bool {
        self.flipped.get(id).copied().unwrap_or(false)
    }

    pub fn clear(&mut self) {
        self.flipped.clear();
    }
}
