use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;

use super::model::{Dataset, PlayerRecord, REQUIRED_COLUMNS};
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Process-wide cache
// ---------------------------------------------------------------------------

/// Holds the dataset once it has been read. Concurrent first calls block on
/// a single initialisation; a failed load leaves the cell empty.
pub struct DatasetCache {
    cell: OnceCell<Arc<Dataset>>,
}

impl DatasetCache {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Return the cached dataset, running `load` only if nothing is cached yet.
    pub fn get_or_load_with<F>(&self, load: F) -> Result<Arc<Dataset>, DashboardError>
    where
        F: FnOnce() -> Result<Dataset, DashboardError>,
    {
        self.cell
            .get_or_try_init(|| load().map(Arc::new))
            .map(Arc::clone)
    }
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new()
    }
}

static DATASET: DatasetCache = DatasetCache::new();

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the player dataset, reading `path` only on the first call in this
/// process. The path is fixed by configuration, so later calls ignore it.
pub fn load(path: &Path) -> Result<Arc<Dataset>, DashboardError> {
    load_with(&DATASET, path)
}

fn load_with(cache: &DatasetCache, path: &Path) -> Result<Arc<Dataset>, DashboardError> {
    cache.get_or_load_with(|| {
        let dataset = read_csv(path).map_err(|e| DashboardError::DataUnavailable {
            path: path.to_path_buf(),
            reason: format!("{e:#}"),
        })?;
        log::info!(
            "Loaded {} players from {} (positions {:?})",
            dataset.len(),
            path.display(),
            dataset.positions
        );
        if dataset.is_empty() {
            log::warn!("{} has a header but no player rows", path.display());
        }
        Ok(dataset)
    })
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Read the CSV at `path` without touching the cache.
///
/// The header must contain every name in [`REQUIRED_COLUMNS`]; other columns
/// are ignored. Any malformed row fails the whole load.
pub fn read_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = reader.headers().context("reading CSV headers")?.clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            anyhow::bail!("CSV missing '{required}' column");
        }
    }

    let mut players = Vec::new();
    for (row_no, result) in reader.deserialize::<PlayerRecord>().enumerate() {
        // +2: one for the header, one for 1-based numbering.
        let record = result.with_context(|| format!("CSV row {}", row_no + 2))?;
        players.push(record);
    }

    Ok(Dataset::from_players(players))
}
