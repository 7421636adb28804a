use std::error::Error;
use std::fmt;

/// Errors raised by the selection layer.
///
/// All variants are precondition violations detected synchronously; nothing
/// is retried or swallowed. `Collaborator` wraps failures surfaced by the
/// external collaborators (model fit, tuner, transform application, dataset
/// projection).
#[derive(Debug)]
pub enum SelectionError {
    /// Selection state was read, or `select` was called, before `fit`.
    NotFitted,
    /// A pre-fitted algorithm's feature list does not match the iterator's.
    FeatureMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
    /// Predefined columns are absent from the iterator's feature set.
    ColumnsNotPresent { missing: Vec<String> },
    /// A composed selector was fit with no child selectors.
    EmptyComposition,
    /// Importance-driven selection was asked for scores that were never
    /// computed.
    NoImportances,
    /// An external collaborator failed.
    Collaborator(anyhow::Error),
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SelectionError::NotFitted => write!(f, "selector should be fitted first"),
            SelectionError::FeatureMismatch { expected, found } => write!(
                f,
                "features of the fitted algorithm should match the iterator exactly \
                 (expected {:?}, found {:?})",
                expected, found
            ),
            SelectionError::ColumnsNotPresent { missing } => write!(
                f,
                "columns to select not present in the dataset features: {:?}",
                missing
            ),
            SelectionError::EmptyComposition => {
                write!(f, "composed selector requires at least one child selector")
            }
            SelectionError::NoImportances => {
                write!(f, "no importance scores available; fit an importance estimator first")
            }
            SelectionError::Collaborator(err) => write!(f, "{}", err),
        }
    }
}

impl Error for SelectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SelectionError::Collaborator(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for SelectionError {
    fn from(err: anyhow::Error) -> Self {
        SelectionError::Collaborator(err)
    }
}
