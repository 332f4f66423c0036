use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::Config;
use crate::data::filter::{filter, init_filter_state, FilterState, FilteredView};
use crate::data::model::{Dataset, NumericColumn};
use crate::views::{View, ViewParams};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset, shared with the process-wide cache.
    pub dataset: Arc<Dataset>,

    /// Sidebar selection.
    pub filters: FilterState,

    /// Widget values of the six panels.
    pub params: ViewParams,

    /// Tab currently shown.
    pub active_view: View,

    /// Position → colour, shared by every chart.
    pub color_map: ColorMap,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, config: &Config) -> Self {
        let filters = init_filter_state(&dataset);
        let color_map = ColorMap::new(&dataset.positions);
        Self {
            dataset,
            filters,
            params: ViewParams::new(config),
            active_view: View::PositionDistribution,
            color_map,
        }
    }

    /// The players currently passing the sidebar filters. Recomputed on every
    /// call; the dataset is small enough that nothing is memoised.
    pub fn filtered(&self) -> FilteredView<'_> {
        filter(&self.dataset, &self.filters)
    }

    pub fn visible_count(&self) -> usize {
        self.filtered().len()
    }

    fn filters_changed(&self) {
        log::debug!(
            "Filter {:?} ages {}..={} → {} of {} players",
            self.filters.positions,
            self.filters.age_min,
            self.filters.age_max,
            self.visible_count(),
            self.dataset.len()
        );
    }

    /// Toggle a single position in the sidebar filter.
    pub fn toggle_position(&mut self, position: &str) {
        if !self.filters.positions.remove(position) {
            self.filters.positions.insert(position.to_string());
        }
        self.filters_changed();
    }

    /// Select every position.
    pub fn select_all_positions(&mut self) {
        self.filters.positions = self.dataset.positions.iter().cloned().collect();
        self.filters_changed();
    }

    /// Deselect every position.
    pub fn select_no_positions(&mut self) {
        self.filters.positions.clear();
        self.filters_changed();
    }

    /// Move the lower age bound, dragging the upper one along so the range
    /// never inverts.
    pub fn set_age_min(&mut self, age: i64) {
        self.filters.age_min = age;
        self.filters.age_max = self.filters.age_max.max(age);
        self.filters_changed();
    }

    /// Move the upper age bound, dragging the lower one along.
    pub fn set_age_max(&mut self, age: i64) {
        self.filters.age_max = age;
        self.filters.age_min = self.filters.age_min.min(age);
        self.filters_changed();
    }

    /// Flip membership of `column` in the skills-by-position selection.
    pub fn toggle_heatmap_skill(&mut self, column: NumericColumn) {
        toggle(&mut self.params.heatmap_skills, column);
    }

    /// Flip membership of `column` in the correlation selection.
    pub fn toggle_correlation_column(&mut self, column: NumericColumn) {
        toggle(&mut self.params.correlation_columns, column);
    }
}

fn toggle(set: &mut std::collections::BTreeSet<NumericColumn>, column: NumericColumn) {
    if !set.remove(&column) {
        set.insert(column);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::five_players;

    fn state() -> AppState {
        AppState::new(Arc::new(five_players()), &Config::default())
    }

    #[test]
    fn starts_with_everything_visible() {
        let s = state();
        assert_eq!(s.visible_count(), 5);
        assert_eq!(s.filters.age_min, 20);
        assert_eq!(s.filters.age_max, 30);
        assert_eq!(s.active_view, View::PositionDistribution);
        assert_eq!(s.params.top_n, 10);
        assert_eq!(s.params.min_players, 3);
    }

    #[test]
    fn toggling_positions_refilters() {
        let mut s = state();
        s.toggle_position("OH");
        assert_eq!(s.visible_count(), 3);
        s.toggle_position("OH");
        assert_eq!(s.visible_count(), 5);

        s.select_no_positions();
        assert_eq!(s.visible_count(), 0);
        s.select_all_positions();
        assert_eq!(s.visible_count(), 5);
    }

    #[test]
    fn age_bounds_never_cross() {
        let mut s = state();
        s.set_age_max(22);
        s.set_age_min(26);
        assert_eq!((s.filters.age_min, s.filters.age_max), (26, 26));
        assert_eq!(s.visible_count(), 0);

        s.set_age_max(21);
        assert_eq!((s.filters.age_min, s.filters.age_max), (21, 21));
        let names: Vec<&str> = s.filtered().rows().map(|p| p.player.as_str()).collect();
        assert!(names.is_empty());

        s.set_age_max(25);
        let names: Vec<String> = s.filtered().rows().map(|p| p.player.clone()).collect();
        assert_eq!(names, vec!["Bea", "Dov"]);
    }

    #[test]
    fn view_selections_toggle_independently() {
        let mut s = state();
        s.toggle_heatmap_skill(NumericColumn::Attack);
        assert!(!s.params.heatmap_skills.contains(&NumericColumn::Attack));
        assert!(s.params.correlation_columns.contains(&NumericColumn::Attack));

        s.toggle_correlation_column(NumericColumn::Age);
        assert!(s.params.correlation_columns.contains(&NumericColumn::Age));
        assert!(!s.params.heatmap_skills.contains(&NumericColumn::Age));
    }
}
