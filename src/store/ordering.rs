//! Ordering Engine
//!
//! Position management for the item store: next index for inserts, and
//! reorder with a full dense renumbering pass so `order_index` values stay
//! unique with no drift. The renumber reports only the items whose index
//! actually changed, which is the minimal persistence set.

use crate::domain::{DomainError, DomainResult};

use super::ItemStore;

/// Ordering operations over the item store
pub trait OrderingOps {
    /// Next `order_index` for an appended item (max + 1, 0 when empty)
    fn next_order_index(&self) -> i64;

    /// Move the item at display position `source` to `destination`, then
    /// renumber densely. Returns the changed `(item_id, order_index)` set.
    fn reorder(&mut self, source: usize, destination: usize) -> DomainResult<Vec<(String, i64)>>;

    /// Renumber all items to 0..n-1 in display order
    fn renumber(&mut self) -> Vec<(String, i64)>;
}

impl OrderingOps for ItemStore {
    fn next_order_index(&self) -> i64 {
        self.items()
            .iter()
            .map(|i| i.order_index)
            .max()
            .map_or(0, |max| max + 1)
    }

    fn reorder(&mut self, source: usize, destination: usize) -> DomainResult<Vec<(String, i64)>> {
        if source >= self.items.len() {
            return Err(DomainError::InvalidInput(format!(
                "reorder source {} out of range ({} items)",
                source,
                self.items.len()
            )));
        }
        let item = self.items.remove(source);
        let destination = destination.min(self.items.len());
        self.items.insert(destination, item);
        Ok(self.renumber())
    }

    fn renumber(&mut self) -> Vec<(String, i64)> {
        let mut changed = Vec::new();
        for (position, item) in self.items.iter_mut().enumerate() {
            let index = position as i64;
            if item.order_index != index {
                item.order_index = index;
                item.touch();
                changed.push((item.id.clone(), index));
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Board, Item};

    fn store_with(titles: &[&str]) -> ItemStore {
        let items = titles
            .iter()
            .enumerate()
            .map(|(i, title)| Item::new(&format!("i{}", i + 1), "b1", title, i as i64))
            .collect();
        ItemStore::new(Board::new("b1", "Roadmap"), items)
    }

    fn titles(store: &ItemStore) -> Vec<&str> {
        store.items().iter().map(|i| i.title.as_str()).collect()
    }

    fn assert_dense(store: &ItemStore) {
        for (position, item) in store.items().iter().enumerate() {
            assert_eq!(item.order_index, position as i64);
        }
    }

    #[test]
    fn test_move_first_to_third() {
        // spec scenario: [A,B,C,D], move position 0 to 2 -> [B,C,A,D]
        let mut store = store_with(&["A", "B", "C", "D"]);
        let changed = store.reorder(0, 2).unwrap();
        assert_eq!(titles(&store), vec!["B", "C", "A", "D"]);
        assert_dense(&store);
        // D kept index 3, so only three items changed
        assert_eq!(changed.len(), 3);
        assert!(!changed.iter().any(|(id, _)| id == "i4"));
    }

    #[test]
    fn test_move_last_to_front() {
        let mut store = store_with(&["A", "B", "C"]);
        store.reorder(2, 0).unwrap();
        assert_eq!(titles(&store), vec!["C", "A", "B"]);
        assert_dense(&store);
    }

    #[test]
    fn test_destination_clamped() {
        let mut store = store_with(&["A", "B"]);
        store.reorder(0, 99).unwrap();
        assert_eq!(titles(&store), vec!["B", "A"]);
        assert_dense(&store);
    }

    #[test]
    fn test_source_out_of_range() {
        let mut store = store_with(&["A"]);
        assert!(matches!(
            store.reorder(5, 0),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_noop_reorder_changes_nothing() {
        let mut store = store_with(&["A", "B", "C"]);
        let changed = store.reorder(1, 1).unwrap();
        assert!(changed.is_empty());
        assert_eq!(titles(&store), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_next_index_skips_gaps() {
        let items = vec![
            Item::new("i1", "b1", "A", 3),
            Item::new("i2", "b1", "B", 7),
        ];
        let store = ItemStore::new(Board::new("b1", "Roadmap"), items);
        assert_eq!(store.next_order_index(), 8);
    }

    #[test]
    fn test_indices_stay_unique_under_mixed_operations() {
        let mut store = store_with(&["A", "B", "C", "D", "E"]);
        for (src, dst) in [(0, 4), (3, 1), (2, 2), (4, 0), (1, 3)] {
            store.reorder(src, dst).unwrap();
            assert_dense(&store);
        }
        store.insert(Item::new("i6", "b1", "F", 0));
        assert_eq!(store.items().last().unwrap().id, "i6");
        assert_dense(&store);
    }
}
