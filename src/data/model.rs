use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// PlayerRecord – one row of the CSV
// ---------------------------------------------------------------------------

/// A single player (one row of the source CSV).
///
/// Header names are matched case-sensitively; any extra columns in the file
/// are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlayerRecord {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "Country")]
    pub country: String,
    /// Usually one of OH, OP, MB, S, L, but not enforced.
    #[serde(rename = "Position")]
    pub position: String,
    #[serde(rename = "Age")]
    pub age: i64,
    #[serde(rename = "Attack")]
    pub attack: f64,
    #[serde(rename = "Block")]
    pub block: f64,
    #[serde(rename = "Serve")]
    pub serve: f64,
    #[serde(rename = "Set")]
    pub set: f64,
    #[serde(rename = "Dig")]
    pub dig: f64,
    #[serde(rename = "Receive")]
    pub receive: f64,
}

/// Header columns that must be present in the CSV.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "Player", "Country", "Position", "Age", "Attack", "Block", "Serve", "Set", "Dig", "Receive",
];

// ---------------------------------------------------------------------------
// NumericColumn – the columns aggregations can be parameterised over
// ---------------------------------------------------------------------------

/// Numeric columns of [`PlayerRecord`]. The declaration order is the display
/// order, so a `BTreeSet<NumericColumn>` iterates the way the UI lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumericColumn {
    Attack,
    Block,
    Serve,
    Set,
    Dig,
    Receive,
    Age,
}

impl NumericColumn {
    /// The six skill ratings.
    pub const SKILLS: [NumericColumn; 6] = [
        NumericColumn::Attack,
        NumericColumn::Block,
        NumericColumn::Serve,
        NumericColumn::Set,
        NumericColumn::Dig,
        NumericColumn::Receive,
    ];

    /// Skills plus age.
    pub const ALL: [NumericColumn; 7] = [
        NumericColumn::Attack,
        NumericColumn::Block,
        NumericColumn::Serve,
        NumericColumn::Set,
        NumericColumn::Dig,
        NumericColumn::Receive,
        NumericColumn::Age,
    ];

    /// Header name as it appears in the CSV.
    pub fn name(self) -> &'static str {
        match self {
            NumericColumn::Attack => "Attack",
            NumericColumn::Block => "Block",
            NumericColumn::Serve => "Serve",
            NumericColumn::Set => "Set",
            NumericColumn::Dig => "Dig",
            NumericColumn::Receive => "Receive",
            NumericColumn::Age => "Age",
        }
    }

    pub fn value(self, record: &PlayerRecord) -> f64 {
        match self {
            NumericColumn::Attack => record.attack,
            NumericColumn::Block => record.block,
            NumericColumn::Serve => record.serve,
            NumericColumn::Set => record.set,
            NumericColumn::Dig => record.dig,
            NumericColumn::Receive => record.receive,
            NumericColumn::Age => record.age as f64,
        }
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NumericColumn {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NumericColumn::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| DashboardError::InsufficientData(format!("Unknown column '{s}'")))
    }
}

/// Resolve a list of column names against the schema.
pub fn resolve_columns<S: AsRef<str>>(names: &[S]) -> Result<Vec<NumericColumn>, DashboardError> {
    names.iter().map(|n| n.as_ref().parse()).collect()
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with the indices the filter widgets need.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// All players, in file order.
    pub players: Vec<PlayerRecord>,
    /// Distinct positions in order of first appearance.
    pub positions: Vec<String>,
    /// Youngest and oldest age, `None` for an empty file.
    pub age_bounds: Option<(i64, i64)>,
}

impl Dataset {
    pub fn from_players(players: Vec<PlayerRecord>) -> Self {
        let mut positions: Vec<String> = Vec::new();
        let mut age_bounds: Option<(i64, i64)> = None;

        for p in &players {
            if !positions.contains(&p.position) {
                positions.push(p.position.clone());
            }
            age_bounds = Some(match age_bounds {
                None => (p.age, p.age),
                Some((lo, hi)) => (lo.min(p.age), hi.max(p.age)),
            });
        }

        Dataset {
            players,
            positions,
            age_bounds,
        }
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::five_players;
    use super::*;

    #[test]
    fn dataset_indexes_positions_in_first_appearance_order() {
        let ds = five_players();
        assert_eq!(ds.positions, vec!["OH", "MB", "S", "L"]);
        assert_eq!(ds.age_bounds, Some((20, 30)));
        assert_eq!(ds.len(), 5);
    }

    #[test]
    fn empty_dataset_has_no_age_bounds() {
        let ds = Dataset::from_players(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.age_bounds, None);
        assert!(ds.positions.is_empty());
    }

    #[test]
    fn column_names_resolve_against_schema() {
        let cols = resolve_columns(&["Attack", "Age"]).unwrap();
        assert_eq!(cols, vec![NumericColumn::Attack, NumericColumn::Age]);

        let err = resolve_columns(&["Attack", "attack"]).unwrap_err();
        assert!(matches!(err, DashboardError::InsufficientData(_)));
    }

    #[test]
    fn age_column_reads_integer_age() {
        let ds = five_players();
        assert_eq!(NumericColumn::Age.value(&ds.players[2]), 30.0);
        assert_eq!(NumericColumn::Attack.value(&ds.players[1]), 15.0);
    }
}
