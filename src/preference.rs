//! Preference index: O(1) lookups over ordered preference lists (spec §4.2).

use std::collections::HashMap;

use crate::domain::{PostId, PreferenceLists, ShiftType, WorkerId};

/// Identifies a single ordered preference list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKey {
    Specialty(PostId),
    Shift(ShiftType),
    Double,
}

/// Precomputed rank tables over the preference lists, built once per run.
///
/// Rank 0 is the top-priority position. `contains` and `position` are both
/// O(1) hash lookups; nothing here re-scans the original ordered `Vec`s.
#[derive(Debug, Clone, Default)]
pub struct PreferenceIndex {
    ranks: HashMap<ListKey, HashMap<WorkerId, u32>>,
}

impl PreferenceIndex {
    pub fn build(lists: &PreferenceLists) -> Self {
        let mut ranks = HashMap::new();

        for (&post, workers) in &lists.specialists {
            ranks.insert(ListKey::Specialty(post), rank_map(workers));
        }
        for (&shift_type, workers) in &lists.shift_preference {
            ranks.insert(ListKey::Shift(shift_type), rank_map(workers));
        }
        ranks.insert(ListKey::Double, rank_map(&lists.double_volunteers));

        Self { ranks }
    }

    pub fn position(&self, key: ListKey, worker: WorkerId) -> Option<u32> {
        self.ranks.get(&key).and_then(|m| m.get(&worker)).copied()
    }

    pub fn contains(&self, key: ListKey, worker: WorkerId) -> bool {
        self.position(key, worker).is_some()
    }
}

fn rank_map(workers: &[WorkerId]) -> HashMap<WorkerId, u32> {
    workers
        .iter()
        .enumerate()
        .map(|(rank, &worker)| (worker, rank as u32))
        .collect()
}
