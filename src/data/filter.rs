use std::collections::BTreeSet;

use super::model::{Dataset, PlayerRecord};

// ---------------------------------------------------------------------------
// Filter predicate: selected positions and an inclusive age range
// ---------------------------------------------------------------------------

/// Sidebar selection. An empty `positions` set matches nothing.
///
/// `age_min <= age_max` is the caller's responsibility; the sidebar sliders
/// never let the two bounds cross.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub positions: BTreeSet<String>,
    pub age_min: i64,
    pub age_max: i64,
}

impl FilterState {
    pub fn matches(&self, player: &PlayerRecord) -> bool {
        self.positions.contains(&player.position)
            && self.age_min <= player.age
            && player.age <= self.age_max
    }
}

/// Initialise a [`FilterState`] that selects the whole dataset.
pub fn init_filter_state(dataset: &Dataset) -> FilterState {
    let (age_min, age_max) = dataset.age_bounds.unwrap_or((0, 0));
    FilterState {
        positions: dataset.positions.iter().cloned().collect(),
        age_min,
        age_max,
    }
}

// ---------------------------------------------------------------------------
// FilteredView – a borrowed subset of the dataset
// ---------------------------------------------------------------------------

/// Rows of a [`Dataset`] that passed a filter, in file order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// A view over every row.
    #[cfg(test)]
    pub fn all(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    /// Wrap indices computed earlier by [`filtered_indices`].
    pub fn from_indices(dataset: &'a Dataset, indices: Vec<usize>) -> Self {
        debug_assert!(indices.iter().all(|&i| i < dataset.len()));
        Self { dataset, indices }
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a PlayerRecord> + '_ {
        let dataset = self.dataset;
        self.indices.iter().map(move |&i| &dataset.players[i])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Return indices of players that pass the filter.
pub fn filtered_indices(dataset: &Dataset, filters: &FilterState) -> Vec<usize> {
    dataset
        .players
        .iter()
        .enumerate()
        .filter(|(_, p)| filters.matches(p))
        .map(|(i, _)| i)
        .collect()
}

/// Apply `filters` to `dataset`.
pub fn filter<'a>(dataset: &'a Dataset, filters: &FilterState) -> FilteredView<'a> {
    FilteredView::from_indices(dataset, filtered_indices(dataset, filters))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::five_players;

    fn state(positions: &[&str], age_min: i64, age_max: i64) -> FilterState {
        FilterState {
            positions: positions.iter().map(|p| p.to_string()).collect(),
            age_min,
            age_max,
        }
    }

    fn names<'a>(view: &FilteredView<'a>) -> Vec<&'a str> {
        view.rows().map(|p| p.player.as_str()).collect()
    }

    #[test]
    fn default_state_selects_everything() {
        let ds = five_players();
        let view = filter(&ds, &init_filter_state(&ds));
        assert_eq!(names(&view), vec!["Ana", "Bea", "Cid", "Dov", "Eli"]);
    }

    #[test]
    fn outside_hitters_between_18_and_26() {
        let ds = five_players();
        let view = filter(&ds, &state(&["OH"], 18, 26));
        let ages: Vec<i64> = view.rows().map(|p| p.age).collect();
        assert_eq!(ages, vec![20, 25]);

        let view = filter(&ds, &state(&["OH"], 18, 22));
        assert_eq!(names(&view), vec!["Ana"]);
    }

    #[test]
    fn age_bounds_are_inclusive() {
        let ds = five_players();
        let view = filter(&ds, &state(&["OH", "MB", "S", "L"], 22, 28));
        let ages: Vec<i64> = view.rows().map(|p| p.age).collect();
        assert_eq!(ages, vec![25, 22, 28]);
    }

    #[test]
    fn no_positions_selected_gives_empty_view() {
        let ds = five_players();
        let view = filter(&ds, &state(&[], 0, 100));
        assert!(view.is_empty());
    }

    #[test]
    fn unknown_position_matches_nothing() {
        let ds = five_players();
        assert!(filter(&ds, &state(&["DS"], 0, 100)).is_empty());
    }

    #[test]
    fn view_is_exactly_the_rows_satisfying_the_predicate() {
        let ds = five_players();
        for positions in [&["OH"][..], &["MB", "L"], &["OH", "MB", "S", "L"]] {
            for (lo, hi) in [(18, 21), (22, 28), (25, 25), (31, 40)] {
                let fs = state(positions, lo, hi);
                let view = filter(&ds, &fs);
                assert!(view.len() <= ds.len());
                for p in &ds.players {
                    let included = view.rows().any(|r| std::ptr::eq(r, p));
                    assert_eq!(included, fs.matches(p));
                }
            }
        }
    }
}
