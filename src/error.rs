use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between reading the CSV and drawing a view.
///
/// Only [`DashboardError::DataUnavailable`] is fatal. The other two variants
/// stay inside the view that produced them and are rendered as a warning in
/// place of its chart.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    /// The dataset could not be read or parsed.
    #[error("Dataset unavailable ({}): {reason}", path.display())]
    DataUnavailable { path: PathBuf, reason: String },

    /// The user deselected everything a view needs.
    #[error("{0}")]
    EmptySelection(String),

    /// The selection is valid but the data cannot support the aggregation.
    #[error("{0}")]
    InsufficientData(String),
}

impl DashboardError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, DashboardError::DataUnavailable { .. })
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_data_unavailable_is_fatal() {
        let fatal = DashboardError::DataUnavailable {
            path: PathBuf::from("VNL2023.csv"),
            reason: "missing".into(),
        };
        assert!(fatal.is_fatal());
        assert!(!DashboardError::EmptySelection("x".into()).is_fatal());
        assert!(!DashboardError::InsufficientData("x".into()).is_fatal());
    }

    #[test]
    fn data_unavailable_message_names_the_file() {
        let err = DashboardError::DataUnavailable {
            path: PathBuf::from("VNL2023.csv"),
            reason: "CSV missing 'Age' column".into(),
        };
        assert_eq!(
            err.to_string(),
            "Dataset unavailable (VNL2023.csv): CSV missing 'Age' column"
        );
    }
}
