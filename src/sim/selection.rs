//! Fixed-size rotating selection buffer
//!
//! Always holds exactly [`SELECTION_CAPACITY`] orbs, oldest first. Selecting a
//! category pushes a new orb and evicts the oldest one (FIFO).

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::orb::{EvictedOrb, Orb};
use crate::config::OrbitConfig;
use crate::consts::{CATEGORY_COUNT, SELECTION_CAPACITY};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbSelection {
    /// Active orbs, oldest first
    orbs: [Orb; SELECTION_CAPACITY],
    next_id: u32,
}

impl OrbSelection {
    /// One orb per category in canonical order, evenly spaced on the orbit
    pub fn new(orbit: &OrbitConfig) -> Self {
        let mut next_id = 1;
        let orbs = Category::ALL.map(|category| {
            let orb = Orb::new(next_id, category, category.base_rotation(), orbit);
            next_id += 1;
            orb
        });
        Self { orbs, next_id }
    }

    /// Push a new orb for `category` and evict the oldest.
    ///
    /// The new orb takes over the evicted orb's current rotation so the orbit
    /// stays visually continuous.
    pub fn select(&mut self, category: Category, orbit: &OrbitConfig) -> EvictedOrb {
        let id = self.next_id;
        self.next_id += 1;

        let inherited = self.orbs[0].rotation();
        self.orbs.rotate_left(1);
        let evicted = std::mem::replace(
            &mut self.orbs[SELECTION_CAPACITY - 1],
            Orb::new(id, category, inherited, orbit),
        );
        evicted.evict()
    }

    /// Select by external id; unknown ids are ignored and return `None`
    pub fn select_id(&mut self, id: &str, orbit: &OrbitConfig) -> Option<EvictedOrb> {
        let category = Category::from_id(id)?;
        Some(self.select(category, orbit))
    }

    /// Number of active slots per category index
    pub fn counts(&self) -> [f32; CATEGORY_COUNT] {
        let mut counts = [0.0; CATEGORY_COUNT];
        for orb in &self.orbs {
            counts[orb.category.index()] += 1.0;
        }
        counts
    }

    /// Advance every active orb
    pub fn advance(&mut self, elapsed_ms: f32, orbit: &OrbitConfig) {
        for orb in &mut self.orbs {
            orb.advance(elapsed_ms, orbit);
        }
    }

    /// Active orbs, oldest first
    pub fn orbs(&self) -> &[Orb] {
        &self.orbs
    }

    /// Most recently selected orb
    pub fn newest(&self) -> &Orb {
        &self.orbs[SELECTION_CAPACITY - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use Category::*;

    fn categories(selection: &OrbSelection) -> Vec<Category> {
        selection.orbs().iter().map(|o| o.category).collect()
    }

    #[test]
    fn test_initial_one_of_each() {
        let orbit = OrbitConfig::default();
        let selection = OrbSelection::new(&orbit);
        assert_eq!(selection.orbs().len(), 3);
        assert_eq!(categories(&selection), vec![War, Love, Work]);
        assert_eq!(selection.counts(), [1.0, 1.0, 1.0]);

        let ids: Vec<u32> = selection.orbs().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_fifo_eviction() {
        let orbit = OrbitConfig::default();
        let mut selection = OrbSelection::new(&orbit);

        let first = selection.select(Work, &orbit);
        assert_eq!(first.category, War);
        assert_eq!(first.id, 1);
        selection.select(War, &orbit);
        selection.select(War, &orbit);
        selection.select(Love, &orbit);

        // [Work, War, War, Love] selected from [War, Love, Work] leaves the last three
        assert_eq!(categories(&selection), vec![War, War, Love]);
        assert_eq!(selection.counts(), [2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_unknown_id_is_ignored() {
        let orbit = OrbitConfig::default();
        let mut selection = OrbSelection::new(&orbit);
        assert!(selection.select_id("famine", &orbit).is_none());
        assert_eq!(categories(&selection), vec![War, Love, Work]);

        let evicted = selection.select_id("love", &orbit).unwrap();
        assert_eq!(evicted.category, War);
        assert_eq!(categories(&selection), vec![Love, Work, Love]);
    }

    #[test]
    fn test_new_orb_inherits_evicted_rotation() {
        let orbit = OrbitConfig::default();
        let mut selection = OrbSelection::new(&orbit);
        selection.advance(1234.0, &orbit);

        for _ in 0..4 {
            let oldest_rotation = selection.orbs()[0].rotation();
            let evicted = selection.select(Work, &orbit);
            assert_eq!(evicted.final_rotation, oldest_rotation);
            assert_eq!(selection.newest().rotation(), oldest_rotation);
            selection.advance(16.0, &orbit);
        }

        assert_eq!(categories(&selection), vec![Work, Work, Work]);
        assert_eq!(selection.counts(), [0.0, 0.0, 3.0]);
    }

    #[test]
    fn test_evicted_ids_unique() {
        let orbit = OrbitConfig::default();
        let mut selection = OrbSelection::new(&orbit);
        let mut seen = std::collections::HashSet::new();
        for i in 0..30 {
            let evicted = selection.select(Category::ALL[i % 3], &orbit);
            assert!(seen.insert(evicted.id), "orb {} evicted twice", evicted.id);
            assert!(selection.orbs().iter().all(|o| o.id != evicted.id));
        }
    }

    fn category_strategy() -> impl Strategy<Value = Category> {
        prop_oneof![Just(War), Just(Love), Just(Work)]
    }

    proptest! {
        #[test]
        fn prop_length_and_counts_invariant(picks in prop::collection::vec(category_strategy(), 0..50)) {
            let orbit = OrbitConfig::default();
            let mut selection = OrbSelection::new(&orbit);
            for pick in &picks {
                selection.select(*pick, &orbit);
                prop_assert_eq!(selection.orbs().len(), SELECTION_CAPACITY);
                prop_assert_eq!(selection.counts().iter().sum::<f32>(), 3.0);
            }
            if picks.len() >= 3 {
                prop_assert_eq!(categories(&selection), picks[picks.len() - 3..].to_vec());
            }
        }
    }
}
