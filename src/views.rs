//! The six dashboard panels as pure functions.
//!
//! Each builder turns a [`FilteredView`] plus that panel's own widget values
//! into a [`Panel`]: chart and table descriptions, or an empty state. Nothing
//! here touches egui; `ui::plot` and `ui::table` draw the result.

use std::collections::BTreeSet;

use crate::color::ColorScale;
use crate::config::Config;
use crate::data::filter::FilteredView;
use crate::data::model::{resolve_columns, NumericColumn};
use crate::data::stats::{self, AgeSummary};
use crate::error::DashboardError;

const NO_MATCH: &str = "No players match the current filters";

// ---------------------------------------------------------------------------
// Tabs and their widget state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    PositionDistribution,
    SkillsByPosition,
    AgeAnalysis,
    TopAttackers,
    SkillCorrelations,
    CountryPerformance,
}

impl View {
    pub const ALL: [View; 6] = [
        View::PositionDistribution,
        View::SkillsByPosition,
        View::AgeAnalysis,
        View::TopAttackers,
        View::SkillCorrelations,
        View::CountryPerformance,
    ];

    pub fn title(self) -> &'static str {
        match self {
            View::PositionDistribution => "Position Distribution",
            View::SkillsByPosition => "Skills by Position",
            View::AgeAnalysis => "Age Analysis",
            View::TopAttackers => "Top Attackers",
            View::SkillCorrelations => "Skill Correlations",
            View::CountryPerformance => "Country Performance",
        }
    }

    /// Heading shown above the panel body.
    pub fn heading(self) -> &'static str {
        match self {
            View::PositionDistribution => "Player Position Distribution",
            View::SkillsByPosition => "Average Skill Ratings by Position",
            View::AgeAnalysis => "Age Distribution Analysis",
            View::TopAttackers => "Top Attacking Players",
            View::SkillCorrelations => "Skill Correlations",
            View::CountryPerformance => "Country Performance Analysis",
        }
    }
}

/// Per-panel widget values. No panel reads another panel's fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewParams {
    /// Skills shown in the skills-by-position heatmap.
    pub heatmap_skills: BTreeSet<NumericColumn>,
    /// How many players the top-attackers panel lists.
    pub top_n: usize,
    /// Columns of the correlation heatmap.
    pub correlation_columns: BTreeSet<NumericColumn>,
    /// Smallest squad the country panel includes.
    pub min_players: usize,
}

impl ViewParams {
    pub fn new(config: &Config) -> Self {
        Self {
            heatmap_skills: NumericColumn::SKILLS.into_iter().collect(),
            top_n: config.default_top_n,
            correlation_columns: correlation_defaults(&config.default_correlation_columns),
            min_players: config.default_min_players,
        }
    }
}

fn correlation_defaults(names: &[String]) -> BTreeSet<NumericColumn> {
    match resolve_columns(names) {
        Ok(columns) => columns.into_iter().collect(),
        Err(e) => {
            log::warn!("Ignoring default_correlation_columns: {e}");
            resolve_columns(&Config::default().default_correlation_columns)
                .unwrap_or_default()
                .into_iter()
                .collect()
        }
    }
}

impl Default for ViewParams {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

// ---------------------------------------------------------------------------
// Output descriptions
// ---------------------------------------------------------------------------

/// What a panel shows after a recompute.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Ready {
        charts: Vec<Chart>,
        table: Option<Table>,
        guide: Option<Guide>,
    },
    /// Drawn as a warning in place of the charts.
    Empty(DashboardError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub kind: ChartKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    Bars { bars: Vec<BarSpec>, horizontal: bool },
    Heatmap(Heatmap),
    AgeBoxes(Vec<AgeSummary>),
    Scatter(Vec<ScatterGroup>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSpec {
    pub label: String,
    pub value: f64,
    /// Colour by this position; `None` means colour by bar index.
    pub position: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    /// `cells[row][col]`.
    pub cells: Vec<Vec<f64>>,
    /// Hide cells on and above the diagonal.
    pub mask_upper: bool,
    pub scale: ColorScale,
    /// Value mapped to the low and high ends of `scale`.
    pub range: (f64, f64),
    pub decimals: usize,
}

impl Heatmap {
    pub fn is_masked(&self, row: usize, col: usize) -> bool {
        self.mask_upper && col >= row
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterGroup {
    pub position: String,
    /// `[age, attack]` pairs.
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub title: Option<&'static str>,
    /// Draw the table before the charts rather than after them.
    pub above_charts: bool,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    /// Position in the column's gradient, `0.0..=1.0`, if the column is shaded.
    pub shade: Option<f64>,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            shade: None,
        }
    }

    fn shaded(text: String, shade: f64) -> Self {
        Self {
            text,
            shade: Some(shade),
        }
    }
}

/// Static help text shown in a collapsible section under the charts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guide {
    pub title: &'static str,
    pub lines: &'static [(&'static str, &'static str)],
}

pub const POSITION_GUIDE: Guide = Guide {
    title: "View position descriptions",
    lines: &[
        ("OH", "Outside Hitter (primary attackers who also play defense)"),
        ("OP", "Opposite (typically the main attacker, doesn't receive serves)"),
        ("MB", "Middle Blocker (specialize in blocking and quick attacks)"),
        ("S", "Setter (team's playmaker who sets up attacks)"),
        ("L", "Libero (defensive specialist who can't attack)"),
    ],
};

pub const CORRELATION_GUIDE: Guide = Guide {
    title: "Interpretation Guide",
    lines: &[
        ("+1.0", "Perfect positive correlation"),
        ("+0.5 to +0.9", "Strong positive relationship"),
        ("0 to +0.5", "Weak positive relationship"),
        ("0", "No correlation"),
        ("Negative values", "Inverse relationship"),
    ],
};

// ---------------------------------------------------------------------------
// Panel builders
// ---------------------------------------------------------------------------

/// Build the panel for `view`.
pub fn render(view: View, filtered: &FilteredView<'_>, params: &ViewParams) -> Panel {
    match view {
        View::PositionDistribution => position_distribution(filtered),
        View::SkillsByPosition => skills_by_position(filtered, &params.heatmap_skills),
        View::AgeAnalysis => age_analysis(filtered),
        View::TopAttackers => top_attackers(filtered, params.top_n),
        View::SkillCorrelations => skill_correlations(filtered, &params.correlation_columns),
        View::CountryPerformance => country_performance(filtered, params.min_players),
    }
}

fn no_match() -> Panel {
    Panel::Empty(DashboardError::EmptySelection(NO_MATCH.into()))
}

pub fn position_distribution(filtered: &FilteredView<'_>) -> Panel {
    if filtered.is_empty() {
        return no_match();
    }

    let bars = stats::position_counts(filtered)
        .into_iter()
        .map(|(position, n)| BarSpec {
            label: position.clone(),
            value: n as f64,
            position: Some(position),
        })
        .collect();

    Panel::Ready {
        charts: vec![Chart {
            title: "Distribution of Players by Position".into(),
            x_label: "Position",
            y_label: "Number of Players",
            kind: ChartKind::Bars {
                bars,
                horizontal: false,
            },
        }],
        table: None,
        guide: Some(POSITION_GUIDE),
    }
}

pub fn skills_by_position(filtered: &FilteredView<'_>, skills: &BTreeSet<NumericColumn>) -> Panel {
    let skills: Vec<NumericColumn> = skills.iter().copied().collect();
    let matrix = match stats::mean_skills_by_position(filtered, &skills) {
        Ok(m) => m,
        Err(e) => return Panel::Empty(e),
    };
    if matrix.positions.is_empty() {
        return no_match();
    }

    Panel::Ready {
        charts: vec![Chart {
            title: "Average Skill Ratings by Position".into(),
            x_label: "Position",
            y_label: "Skill",
            kind: ChartKind::Heatmap(Heatmap {
                row_labels: matrix.skills.iter().map(|s| s.to_string()).collect(),
                col_labels: matrix.positions,
                range: finite_range(matrix.means.iter().flatten().copied()),
                cells: matrix.means,
                mask_upper: false,
                scale: ColorScale::Sequential,
                decimals: 1,
            }),
        }],
        table: None,
        guide: None,
    }
}

pub fn age_analysis(filtered: &FilteredView<'_>) -> Panel {
    if filtered.is_empty() {
        return no_match();
    }

    let mut groups: Vec<ScatterGroup> = Vec::new();
    for p in filtered.rows() {
        let point = [p.age as f64, p.attack];
        match groups.iter_mut().find(|g| g.position == p.position) {
            Some(g) => g.points.push(point),
            None => groups.push(ScatterGroup {
                position: p.position.clone(),
                points: vec![point],
            }),
        }
    }

    Panel::Ready {
        charts: vec![
            Chart {
                title: "Age Distribution by Position".into(),
                x_label: "Position",
                y_label: "Age",
                kind: ChartKind::AgeBoxes(stats::age_summary_by_position(filtered)),
            },
            Chart {
                title: "Attack Performance by Age".into(),
                x_label: "Age",
                y_label: "Attack Score",
                kind: ChartKind::Scatter(groups),
            },
        ],
        table: None,
        guide: None,
    }
}

pub fn top_attackers(filtered: &FilteredView<'_>, n: usize) -> Panel {
    if filtered.is_empty() {
        return no_match();
    }

    let top = stats::top_n(filtered, n, NumericColumn::Attack);
    let shades = gradient(&top.iter().map(|p| p.attack).collect::<Vec<_>>());

    let rows = top
        .iter()
        .zip(shades)
        .map(|(p, shade)| {
            vec![
                Cell::plain(p.player.clone()),
                Cell::plain(p.country.clone()),
                Cell::shaded(format!("{:.2}", p.attack), shade),
                Cell::plain(p.position.clone()),
                Cell::plain(p.age.to_string()),
            ]
        })
        .collect();

    let bars = top
        .iter()
        .map(|p| BarSpec {
            label: p.player.clone(),
            value: p.attack,
            position: Some(p.position.clone()),
        })
        .collect();

    Panel::Ready {
        charts: vec![Chart {
            title: format!("Top {n} Players by Attack Score"),
            x_label: "Attack Score",
            y_label: "Player",
            kind: ChartKind::Bars {
                bars,
                horizontal: true,
            },
        }],
        table: Some(Table {
            title: None,
            above_charts: true,
            headers: vec!["Player", "Country", "Attack", "Position", "Age"],
            rows,
        }),
        guide: None,
    }
}

pub fn skill_correlations(
    filtered: &FilteredView<'_>,
    columns: &BTreeSet<NumericColumn>,
) -> Panel {
    let columns: Vec<NumericColumn> = columns.iter().copied().collect();
    let matrix = match stats::correlation_matrix(filtered, &columns) {
        Ok(m) => m,
        Err(e) => return Panel::Empty(e),
    };
    let labels: Vec<String> = matrix.columns.iter().map(|c| c.to_string()).collect();

    Panel::Ready {
        charts: vec![Chart {
            title: "Correlation Between Selected Skills".into(),
            x_label: "",
            y_label: "",
            kind: ChartKind::Heatmap(Heatmap {
                row_labels: labels.clone(),
                col_labels: labels,
                cells: matrix.values,
                mask_upper: true,
                scale: ColorScale::Diverging,
                range: (-1.0, 1.0),
                decimals: 2,
            }),
        }],
        table: None,
        guide: Some(CORRELATION_GUIDE),
    }
}

pub fn country_performance(filtered: &FilteredView<'_>, min_players: usize) -> Panel {
    if filtered.is_empty() {
        return no_match();
    }

    let countries = stats::grouped_country_stats(filtered, min_players);
    if countries.is_empty() {
        return Panel::Empty(DashboardError::InsufficientData(format!(
            "No countries have at least {min_players} players with current filters"
        )));
    }

    let bars = |value: fn(&stats::CountryStats) -> f64| -> Vec<BarSpec> {
        countries
            .iter()
            .map(|c| BarSpec {
                label: c.country.clone(),
                value: value(c),
                position: None,
            })
            .collect()
    };

    let attack_shades = gradient(&countries.iter().map(|c| c.mean_attack).collect::<Vec<_>>());
    let block_shades = gradient(&countries.iter().map(|c| c.mean_block).collect::<Vec<_>>());
    let rows = countries
        .iter()
        .zip(attack_shades.into_iter().zip(block_shades))
        .map(|(c, (attack_shade, block_shade))| {
            vec![
                Cell::plain(c.country.clone()),
                Cell::plain(c.players.to_string()),
                Cell::shaded(format!("{:.2}", c.mean_attack), attack_shade),
                Cell::shaded(format!("{:.2}", c.mean_block), block_shade),
                Cell::plain(format!("{:.1}", c.mean_age)),
            ]
        })
        .collect();

    Panel::Ready {
        charts: vec![
            Chart {
                title: format!("Players per Country (min {min_players} players)"),
                x_label: "Country",
                y_label: "Number of Players",
                kind: ChartKind::Bars {
                    bars: bars(|c| c.players as f64),
                    horizontal: false,
                },
            },
            Chart {
                title: "Average Attack Score by Country".into(),
                x_label: "Country",
                y_label: "Average Attack Score",
                kind: ChartKind::Bars {
                    bars: bars(|c| c.mean_attack),
                    horizontal: false,
                },
            },
        ],
        table: Some(Table {
            title: Some("Detailed Country Statistics"),
            above_charts: false,
            headers: vec!["Country", "Players", "Attack", "Block", "Age"],
            rows,
        }),
        guide: None,
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Min–max normalise a column for table shading. A flat column sits at 0.
fn gradient(values: &[f64]) -> Vec<f64> {
    let (lo, hi) = finite_range(values.iter().copied());
    values
        .iter()
        .map(|v| if hi > lo { (v - lo) / (hi - lo) } else { 0.0 })
        .collect()
}

fn finite_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .unwrap_or((0.0, 1.0))
}
