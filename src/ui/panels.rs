use std::sync::Arc;

use eframe::egui::{self, RichText, ScrollArea, Slider, Ui};

use crate::config::{MIN_PLAYERS_RANGE, TOP_N_RANGE};
use crate::data::model::NumericColumn;
use crate::state::AppState;
use crate::ui::{plot, table};
use crate::views::{self, Guide, Panel, Table, View};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Hold our own handle so the loops below can mutate `state`.
    let dataset = Arc::clone(&state.dataset);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Positions ----
            let n_selected = state.filters.positions.len();
            let n_total = dataset.positions.len();
            ui.strong(format!("Select positions to include  ({n_selected}/{n_total})"));
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_positions();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_positions();
                }
            });
            for position in &dataset.positions {
                let mut checked = state.filters.positions.contains(position);
                let text = RichText::new(position.as_str()).color(state.color_map.color_for(position));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_position(position);
                }
            }
            ui.separator();

            // ---- Age range ----
            ui.strong("Select age range");
            let (lo, hi) = dataset.age_bounds.unwrap_or((0, 0));
            let mut age_min = state.filters.age_min;
            if ui
                .add(Slider::new(&mut age_min, lo..=hi).text("from"))
                .changed()
            {
                state.set_age_min(age_min);
            }
            let mut age_max = state.filters.age_max;
            if ui
                .add(Slider::new(&mut age_max, lo..=hi).text("to"))
                .changed()
            {
                state.set_age_max(age_max);
            }
            ui.separator();

            ui.label(
                RichText::new(format!(
                    "Filtered Players: {} of {}",
                    state.visible_count(),
                    dataset.len()
                ))
                .strong(),
            );
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Title, description and the tab strip.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Volleyball Nations League 2023 - Player Statistics");
    ui.label(
        "Exploratory Data Analysis of player performance statistics \
         from the 2023 Volleyball Nations League.",
    );
    ui.horizontal(|ui: &mut Ui| {
        for view in View::ALL {
            ui.selectable_value(&mut state.active_view, view, view.title());
        }
    });
}

/// Data source note at the bottom of the window.
pub fn footer(ui: &mut Ui) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Data Source:");
        ui.label("Volleyball Nations League 2023 Player Statistics");
        ui.separator();
        ui.strong("Created with:");
        ui.label("Rust, egui, egui_plot");
    });
}

// ---------------------------------------------------------------------------
// Central panel – the active view
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    let view = state.active_view;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(view.heading());
            view_controls(ui, state, view);
            ui.add_space(6.0);

            let panel = views::render(view, &state.filtered(), &state.params);
            draw_panel(ui, state, view, &panel);
        });
}

/// Widgets that only the given view reads.
fn view_controls(ui: &mut Ui, state: &mut AppState, view: View) {
    match view {
        View::SkillsByPosition => {
            ui.label("Select skills to display");
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for skill in NumericColumn::SKILLS {
                    let mut checked = state.params.heatmap_skills.contains(&skill);
                    if ui.checkbox(&mut checked, skill.name()).changed() {
                        state.toggle_heatmap_skill(skill);
                    }
                }
            });
        }
        View::TopAttackers => {
            ui.add(
                Slider::new(&mut state.params.top_n, TOP_N_RANGE)
                    .text("Select number of top players to show"),
            );
        }
        View::SkillCorrelations => {
            ui.label("Select skills for correlation analysis");
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for column in NumericColumn::ALL {
                    let mut checked = state.params.correlation_columns.contains(&column);
                    if ui.checkbox(&mut checked, column.name()).changed() {
                        state.toggle_correlation_column(column);
                    }
                }
            });
        }
        View::CountryPerformance => {
            ui.add(
                Slider::new(&mut state.params.min_players, MIN_PLAYERS_RANGE)
                    .text("Minimum players per country to include"),
            );
        }
        View::PositionDistribution | View::AgeAnalysis => {}
    }
}

fn draw_panel(ui: &mut Ui, state: &AppState, view: View, panel: &Panel) {
    let (charts, table, guide) = match panel {
        Panel::Ready {
            charts,
            table,
            guide,
        } => (charts, table, guide),
        Panel::Empty(reason) => {
            debug_assert!(!reason.is_fatal());
            ui.colored_label(ui.visuals().warn_fg_color, format!("⚠ {reason}"));
            return;
        }
    };

    if let Some(t) = table.as_ref().filter(|t| t.above_charts) {
        table_section(ui, t);
        ui.add_space(8.0);
    }

    if charts.len() == 2 {
        ui.columns(2, |cols: &mut [Ui]| {
            for (i, (col, chart)) in cols.iter_mut().zip(charts).enumerate() {
                plot::chart(col, &format!("{view:?}_{i}"), chart, &state.color_map);
            }
        });
    } else {
        for (i, chart) in charts.iter().enumerate() {
            plot::chart(ui, &format!("{view:?}_{i}"), chart, &state.color_map);
        }
    }

    if let Some(t) = table.as_ref().filter(|t| !t.above_charts) {
        ui.add_space(8.0);
        table_section(ui, t);
    }

    if let Some(g) = guide {
        guide_section(ui, g);
    }
}

fn table_section(ui: &mut Ui, t: &Table) {
    if let Some(title) = t.title {
        ui.strong(title);
    }
    table::table(ui, t);
}

fn guide_section(ui: &mut Ui, guide: &Guide) {
    egui::CollapsingHeader::new(guide.title)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            for (term, meaning) in guide.lines {
                ui.horizontal(|ui: &mut Ui| {
                    ui.strong(*term);
                    ui.label(*meaning);
                });
            }
        });
}
