//! Bounded transposition table shared between nodes reached by different
//! paths to the same canonical state.

use std::collections::HashMap;

use crate::key::StateKey;

/// Aggregated search statistics for one canonical state.
#[derive(Debug, Clone, Copy, Default)]
pub struct TranspositionEntry {
    pub visits: u32,
    pub total_value: f64,
}

pub type TranspositionTable = HashMap<StateKey, TranspositionEntry>;

/// Adds one visit worth of `value` to `table[key]`, inserting a fresh
/// entry only if the table is under `max_entries`. Existing entries
/// always accumulate, even once the table is at capacity.
pub fn accumulate(table: &mut TranspositionTable, key: &StateKey, value: f64, max_entries: usize) {
    if let Some(entry) = table.get_mut(key) {
        entry.visits += 1;
        entry.total_value += value;
    } else if table.len() < max_entries {
        table.insert(
            key.clone(),
            TranspositionEntry {
                visits: 1,
                total_value: value,
            },
        );
    }
}

/// Folds `other` into `main`, summing visits/value for shared keys and
/// inserting new ones only while `main` stays under `max_entries`.
pub fn merge_into(main: &mut TranspositionTable, other: TranspositionTable, max_entries: usize) {
    for (key, entry) in other {
        match main.get_mut(&key) {
            Some(existing) => {
                existing.visits += entry.visits;
                existing.total_value += entry.total_value;
            }
            None if main.len() < max_entries => {
                main.insert(key, entry);
            }
            None => {}
        }
    }
}
