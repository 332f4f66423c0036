//! Descriptive statistics over a [`FilteredView`].
//!
//! Every function here is pure: it reads the view and returns owned results
//! (or references into the dataset) without touching the dataset itself.

use std::collections::{BTreeMap, BTreeSet};

use super::filter::FilteredView;
use super::model::{NumericColumn, PlayerRecord};
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Value counts
// ---------------------------------------------------------------------------

/// Players per position, most common first. Ties keep the order in which the
/// positions first appear in the view.
pub fn position_counts(view: &FilteredView<'_>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for p in view.rows() {
        match counts.iter_mut().find(|(pos, _)| *pos == p.position) {
            Some((_, n)) => *n += 1,
            None => counts.push((p.position.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

// ---------------------------------------------------------------------------
// Group-by means
// ---------------------------------------------------------------------------

/// Mean of each requested skill, per position.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillMatrix {
    /// Row labels.
    pub skills: Vec<NumericColumn>,
    /// Column labels, sorted. Only positions present in the view appear.
    pub positions: Vec<String>,
    /// `means[skill][position]`.
    pub means: Vec<Vec<f64>>,
}

pub fn mean_skills_by_position(
    view: &FilteredView<'_>,
    skills: &[NumericColumn],
) -> Result<SkillMatrix> {
    if skills.is_empty() {
        return Err(DashboardError::EmptySelection(
            "Please select at least one skill to display".into(),
        ));
    }

    // position → (row count, per-skill sums)
    let mut groups: BTreeMap<&str, (usize, Vec<f64>)> = BTreeMap::new();
    for p in view.rows() {
        let (n, sums) = groups
            .entry(p.position.as_str())
            .or_insert_with(|| (0, vec![0.0; skills.len()]));
        *n += 1;
        for (sum, skill) in sums.iter_mut().zip(skills) {
            *sum += skill.value(p);
        }
    }

    let positions = groups.keys().map(|p| p.to_string()).collect();
    let means = skills
        .iter()
        .enumerate()
        .map(|(s, _)| {
            groups
                .values()
                .map(|(n, sums)| sums[s] / *n as f64)
                .collect()
        })
        .collect();

    Ok(SkillMatrix {
        skills: skills.to_vec(),
        positions,
        means,
    })
}

// ---------------------------------------------------------------------------
// Top-N
// ---------------------------------------------------------------------------

/// The `n` players with the highest `column`, highest first. Equal values
/// keep file order. Rows whose value is NaN are skipped.
pub fn top_n<'a>(view: &FilteredView<'a>, n: usize, column: NumericColumn) -> Vec<&'a PlayerRecord> {
    let mut rows: Vec<&PlayerRecord> = view
        .rows()
        .filter(|p| !column.value(p).is_nan())
        .collect();
    // sort_by is stable, so ties stay in view order.
    rows.sort_by(|a, b| column.value(b).total_cmp(&column.value(a)));
    rows.truncate(n);
    rows
}

// ---------------------------------------------------------------------------
// Correlation
// ---------------------------------------------------------------------------

/// Full Pearson correlation matrix.
///
/// A column whose values are all equal has no defined correlation: its whole
/// row and column, diagonal included, are `NaN`. Every other diagonal entry
/// is exactly `1.0`, and `values[i][j] == values[j][i]` bit for bit.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<NumericColumn>,
    pub values: Vec<Vec<f64>>,
}

pub fn correlation_matrix(
    view: &FilteredView<'_>,
    columns: &[NumericColumn],
) -> Result<CorrelationMatrix> {
    let mut seen = BTreeSet::new();
    let columns: Vec<NumericColumn> = columns.iter().copied().filter(|c| seen.insert(*c)).collect();

    if columns.len() < 2 {
        return Err(DashboardError::EmptySelection(
            "Please select at least 2 skills to see correlations".into(),
        ));
    }
    if view.len() < 2 {
        return Err(DashboardError::InsufficientData(format!(
            "Correlations need at least 2 players, the current filters match {}",
            view.len()
        )));
    }

    let series: Vec<Vec<f64>> = columns
        .iter()
        .map(|c| view.rows().map(|p| c.value(p)).collect())
        .collect();
    let constant: Vec<bool> = series
        .iter()
        .map(|xs| xs.iter().all(|x| *x == xs[0]))
        .collect();

    let k = columns.len();
    let mut values = vec![vec![f64::NAN; k]; k];
    for i in 0..k {
        if constant[i] {
            continue;
        }
        values[i][i] = 1.0;
        for j in (i + 1)..k {
            if constant[j] {
                continue;
            }
            let r = pearson(&series[i], &series[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix { columns, values })
}

fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let (dxs, dys) = (deviations(xs), deviations(ys));

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (dx, dy) in dxs.iter().zip(&dys) {
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0)
}

/// Deviations from the mean, rescaled so the largest has magnitude 1.
/// Keeps the sums of squares clear of overflow and underflow.
fn deviations(xs: &[f64]) -> Vec<f64> {
    let mean = xs.iter().sum::<f64>() / xs.len() as f64;
    let devs: Vec<f64> = xs.iter().map(|x| x - mean).collect();
    let scale = devs.iter().fold(0.0_f64, |m, d| m.max(d.abs()));
    devs.into_iter().map(|d| d / scale).collect()
}

// ---------------------------------------------------------------------------
// Country summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CountryStats {
    pub country: String,
    pub players: usize,
    pub mean_attack: f64,
    pub mean_block: f64,
    pub mean_age: f64,
}

/// Per-country aggregates for countries with at least `min_players` players
/// in the view, largest squads first (ties alphabetical).
pub fn grouped_country_stats(view: &FilteredView<'_>, min_players: usize) -> Vec<CountryStats> {
    // country → (count, attack sum, block sum, age sum)
    let mut groups: BTreeMap<&str, (usize, f64, f64, f64)> = BTreeMap::new();
    for p in view.rows() {
        let g = groups.entry(p.country.as_str()).or_insert((0, 0.0, 0.0, 0.0));
        g.0 += 1;
        g.1 += p.attack;
        g.2 += p.block;
        g.3 += p.age as f64;
    }

    let mut stats: Vec<CountryStats> = groups
        .into_iter()
        .filter(|(_, g)| g.0 >= min_players)
        .map(|(country, (n, attack, block, age))| {
            let n_f = n as f64;
            CountryStats {
                country: country.to_string(),
                players: n,
                mean_attack: attack / n_f,
                mean_block: block / n_f,
                mean_age: age / n_f,
            }
        })
        .collect();
    stats.sort_by(|a, b| b.players.cmp(&a.players));
    stats
}

// ---------------------------------------------------------------------------
// Age quartiles
// ---------------------------------------------------------------------------

/// Five-number summary of ages for one position, with Tukey whiskers.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeSummary {
    pub position: String,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Smallest age within `q1 - 1.5 * IQR`.
    pub lower_whisker: f64,
    /// Largest age within `q3 + 1.5 * IQR`.
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

/// One [`AgeSummary`] per position present in the view, sorted by position.
pub fn age_summary_by_position(view: &FilteredView<'_>) -> Vec<AgeSummary> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for p in view.rows() {
        groups.entry(p.position.as_str()).or_default().push(p.age as f64);
    }

    groups
        .into_iter()
        .map(|(position, mut ages)| {
            ages.sort_by(f64::total_cmp);
            let q1 = quantile(&ages, 0.25);
            let q3 = quantile(&ages, 0.75);
            let iqr = q3 - q1;
            let (lo_fence, hi_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

            let inside = ages.iter().copied().filter(|a| (lo_fence..=hi_fence).contains(a));
            let lower_whisker = inside.clone().fold(f64::INFINITY, f64::min);
            let upper_whisker = inside.fold(f64::NEG_INFINITY, f64::max);

            AgeSummary {
                position: position.to_string(),
                min: ages[0],
                q1,
                median: quantile(&ages, 0.5),
                q3,
                max: ages[ages.len() - 1],
                lower_whisker,
                upper_whisker,
                outliers: ages
                    .iter()
                    .copied()
                    .filter(|a| !(lo_fence..=hi_fence).contains(a))
                    .collect(),
            }
        })
        .collect()
}

/// Linear-interpolated quantile of a sorted, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter, FilterState};
    use crate::data::model::fixtures::{five_players, player};
    use crate::data::model::Dataset;

    fn eight_players() -> Dataset {
        Dataset::from_players(vec![
            player("A", "Japan", "OH", 21, 10.0),
            player("B", "Japan", "OP", 24, 18.0),
            player("C", "Japan", "MB", 27, 10.0),
            player("D", "Italy", "OH", 30, 14.0),
            player("E", "Italy", "S", 22, 3.0),
            player("F", "Italy", "L", 26, 0.0),
            player("G", "USA", "OP", 29, 16.0),
            player("H", "Cuba", "OH", 19, 14.0),
        ])
    }

    #[test]
    fn position_counts_on_full_dataset() {
        let ds = five_players();
        let counts = position_counts(&FilteredView::all(&ds));
        assert_eq!(
            counts,
            vec![
                ("OH".to_string(), 2),
                ("MB".to_string(), 1),
                ("S".to_string(), 1),
                ("L".to_string(), 1),
            ]
        );
    }

    #[test]
    fn position_counts_on_empty_view() {
        let ds = five_players();
        let view = FilteredView::from_indices(&ds, Vec::new());
        assert!(position_counts(&view).is_empty());
    }

    #[test]
    fn mean_skills_omit_absent_positions() {
        let ds = five_players();
        let fs = FilterState {
            positions: ["OH", "MB"].iter().map(|s| s.to_string()).collect(),
            age_min: 0,
            age_max: 100,
        };
        let m = mean_skills_by_position(
            &filter(&ds, &fs),
            &[NumericColumn::Attack, NumericColumn::Block],
        )
        .unwrap();

        assert_eq!(m.positions, vec!["MB", "OH"]);
        assert_eq!(m.skills, vec![NumericColumn::Attack, NumericColumn::Block]);
        assert_eq!(m.means[0], vec![8.0, 13.5]);
        assert_eq!(m.means[1], vec![4.0, 6.75]);
    }

    #[test]
    fn mean_skills_need_a_skill() {
        let ds = five_players();
        let err = mean_skills_by_position(&FilteredView::all(&ds), &[]).unwrap_err();
        assert!(matches!(err, DashboardError::EmptySelection(_)));
    }

    #[test]
    fn top_n_larger_than_view_returns_everything_sorted() {
        let ds = eight_players();
        let top = top_n(&FilteredView::all(&ds), 10, NumericColumn::Attack);
        let names: Vec<&str> = top.iter().map(|p| p.player.as_str()).collect();
        // D and H tie on 14.0, as do A and C on 10.0: file order is kept.
        assert_eq!(names, vec!["B", "G", "D", "H", "A", "C", "E", "F"]);
    }

    #[test]
    fn top_n_truncates_and_handles_zero() {
        let ds = eight_players();
        let view = FilteredView::all(&ds);
        let top3: Vec<&str> = top_n(&view, 3, NumericColumn::Attack)
            .iter()
            .map(|p| p.player.as_str())
            .collect();
        assert_eq!(top3, vec!["B", "G", "D"]);
        assert!(top_n(&view, 0, NumericColumn::Attack).is_empty());
    }

    #[test]
    fn correlation_matrix_is_symmetric_with_unit_diagonal() {
        let ds = eight_players();
        let cols = [
            NumericColumn::Attack,
            NumericColumn::Block,
            NumericColumn::Dig,
            NumericColumn::Age,
        ];
        let m = correlation_matrix(&FilteredView::all(&ds), &cols).unwrap();

        for i in 0..cols.len() {
            assert_eq!(m.values[i][i], 1.0);
            for j in 0..cols.len() {
                assert_eq!(m.values[i][j].to_bits(), m.values[j][i].to_bits());
                assert!((-1.0..=1.0).contains(&m.values[i][j]));
            }
        }
        // Block is Attack / 2 in the fixture.
        assert!((m.values[0][1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_is_scale_independent() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [1.0, 2.0, 4.0];
        let expected = pearson(&xs, &ys);
        assert!((expected - 0.981_980_506).abs() < 1e-9);

        for scale in [1e100, 1e-170] {
            let xs: Vec<f64> = xs.iter().map(|x| x * scale).collect();
            let ys: Vec<f64> = ys.iter().map(|y| y * scale).collect();
            assert!((pearson(&xs, &ys) - expected).abs() < 1e-9, "scale {scale}");
        }
    }

    #[test]
    fn constant_column_correlates_to_nan() {
        let ds = eight_players();
        let m = correlation_matrix(
            &FilteredView::all(&ds),
            &[NumericColumn::Attack, NumericColumn::Serve],
        )
        .unwrap();
        assert_eq!(m.values[0][0], 1.0);
        assert!(m.values[1][1].is_nan());
        assert!(m.values[0][1].is_nan());
        assert!(m.values[1][0].is_nan());
    }

    #[test]
    fn correlation_needs_two_columns_and_two_rows() {
        let ds = eight_players();
        let view = FilteredView::all(&ds);
        let err = correlation_matrix(&view, &[NumericColumn::Attack, NumericColumn::Attack]).unwrap_err();
        assert!(matches!(err, DashboardError::EmptySelection(_)));

        let one = FilteredView::from_indices(&ds, vec![0]);
        let err = correlation_matrix(&one, &[NumericColumn::Attack, NumericColumn::Age]).unwrap_err();
        assert!(matches!(err, DashboardError::InsufficientData(_)));
    }

    #[test]
    fn country_stats_threshold() {
        let ds = eight_players();
        let view = FilteredView::all(&ds);

        let all = grouped_country_stats(&view, 1);
        let countries: Vec<&str> = all.iter().map(|c| c.country.as_str()).collect();
        assert_eq!(countries, vec!["Italy", "Japan", "Cuba", "USA"]);

        let japan = &all[1];
        assert_eq!(japan.players, 3);
        assert!((japan.mean_attack - 38.0 / 3.0).abs() < 1e-12);
        assert!((japan.mean_block - 19.0 / 3.0).abs() < 1e-12);
        assert!((japan.mean_age - 24.0).abs() < 1e-12);

        assert_eq!(grouped_country_stats(&view, 3).len(), 2);
        assert!(grouped_country_stats(&view, 4).is_empty());
    }

    #[test]
    fn age_summary_quartiles_and_whiskers() {
        let ds = Dataset::from_players(
            [20, 21, 22, 23, 24, 40]
                .iter()
                .map(|&age| player("x", "Japan", "MB", age, 1.0))
                .chain(std::iter::once(player("y", "Japan", "L", 25, 0.0)))
                .collect(),
        );
        let summary = age_summary_by_position(&FilteredView::all(&ds));
        assert_eq!(summary.len(), 2);

        let libero = &summary[0];
        assert_eq!(libero.position, "L");
        assert_eq!((libero.q1, libero.median, libero.q3), (25.0, 25.0, 25.0));
        assert!(libero.outliers.is_empty());

        let mb = &summary[1];
        assert_eq!(mb.q1, 21.25);
        assert_eq!(mb.median, 22.5);
        assert_eq!(mb.q3, 23.75);
        assert_eq!(mb.lower_whisker, 20.0);
        assert_eq!(mb.upper_whisker, 24.0);
        assert_eq!(mb.outliers, vec![40.0]);
        assert_eq!((mb.min, mb.max), (20.0, 40.0));
    }
}
