//! Keyed snapshot diff between two render passes.

use crate::model::expense::ExpenseId;
use std::collections::HashSet;

/// Partition of ids into enter/update/exit sets.
///
/// `enter` and `update` follow the order of the new snapshot, `exit` follows
/// the order of the previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyedDiff {
    pub enter: Vec<ExpenseId>,
    pub update: Vec<ExpenseId>,
    pub exit: Vec<ExpenseId>,
}

impl KeyedDiff {
    /// Diffs two ordered key snapshots.
    pub fn between<'a>(
        previous: impl IntoIterator<Item = &'a ExpenseId>,
        next: impl IntoIterator<Item = &'a ExpenseId>,
    ) -> Self {
        let previous: Vec<&ExpenseId> = previous.into_iter().collect();
        let next: Vec<&ExpenseId> = next.into_iter().collect();
        let previous_set: HashSet<&ExpenseId> = previous.iter().copied().collect();
        let next_set: HashSet<&ExpenseId> = next.iter().copied().collect();

        let mut diff = Self::default();
        for id in &next {
            if previous_set.contains(id) {
                diff.update.push((*id).clone());
            } else {
                diff.enter.push((*id).clone());
            }
        }
        diff.exit = previous
            .into_iter()
            .filter(|id| !next_set.contains(id))
            .cloned()
            .collect();
        diff
    }

    pub fn is_empty(&self) -> bool {
        self.enter.is_empty() && self.update.is_empty() && self.exit.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::KeyedDiff;
    use crate::model::expense::ExpenseId;

    fn ids(values: &[&str]) -> Vec<ExpenseId> {
        values.iter().map(|value| ExpenseId::new(*value)).collect()
    }

    #[test]
    fn partitions_by_key() {
        let previous = ids(&["a", "b", "c"]);
        let next = ids(&["c", "d", "a"]);
        let diff = KeyedDiff::between(&previous, &next);
        assert_eq!(diff.enter, ids(&["d"]));
        assert_eq!(diff.update, ids(&["c", "a"]));
        assert_eq!(diff.exit, ids(&["b"]));
    }

    #[test]
    fn identical_snapshots_only_update() {
        let snapshot = ids(&["a", "b"]);
        let diff = KeyedDiff::between(&snapshot, &snapshot);
        assert!(diff.enter.is_empty());
        assert!(diff.exit.is_empty());
        assert_eq!(diff.update, snapshot);
    }
}
