//! Feature importance tables and estimator contracts.
use serde::{Deserialize, Serialize};

use crate::ml_algo::{MlAlgo, Predictions};
use crate::validation::TrainValidIterator;

/// Insertion-ordered table mapping feature names to importance scores.
///
/// No ordering is required on creation; consumers that want a ranking call
/// `sort_descending` first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureScores {
    entries: Vec<(String, f64)>,
}

impl FeatureScores {
    pub fn new() -> Self {
        FeatureScores::default()
    }

    /// Build a table from name/score pairs, keeping the given order.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        FeatureScores {
            entries: pairs.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Score of the named feature, if present.
    pub fn get(&self, feature: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name.as_str() == feature)
            .map(|(_, score)| *score)
    }

    /// Add `score` to the named feature, inserting it at the end if absent.
    pub fn accumulate(&mut self, feature: &str, score: f64) {
        match self
            .entries
            .iter_mut()
            .find(|(name, _)| name.as_str() == feature)
        {
            Some((_, existing)) => *existing += score,
            None => self.entries.push((feature.to_owned(), score)),
        }
    }

    /// Sort by score, highest first. The sort is stable: equal scores keep
    /// their first-seen order.
    pub fn sort_descending(&mut self) {
        self.entries
            .sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(name, score)| (name.as_str(), *score))
    }
}

/// Object that estimates feature importances.
///
/// `fit` must populate the raw importance table before `get_features_score`
/// is called; until then the table is reported as unavailable.
pub trait ImportanceEstimator {
    /// Fit against the iterator, the (possibly just fitted) algorithm, and
    /// any predictions produced while fitting it.
    fn fit(
        &mut self,
        train_valid: &dyn TrainValidIterator,
        algo: Option<&dyn MlAlgo>,
        preds: Option<&Predictions>,
    ) -> anyhow::Result<()>;

    /// Raw importances keyed by output feature name; `None` before fit.
    fn get_features_score(&self) -> Option<&FeatureScores>;
}

/// Estimator that reads the fitted algorithm's own feature scores.
#[derive(Default)]
pub struct ModelBasedImportanceEstimator {
    raw_importances: Option<FeatureScores>,
}

impl ModelBasedImportanceEstimator {
    pub fn new() -> Self {
        ModelBasedImportanceEstimator::default()
    }
}

impl ImportanceEstimator for ModelBasedImportanceEstimator {
    fn fit(
        &mut self,
        _train_valid: &dyn TrainValidIterator,
        algo: Option<&dyn MlAlgo>,
        _preds: Option<&Predictions>,
    ) -> anyhow::Result<()> {
        let algo = algo
            .ok_or_else(|| anyhow::anyhow!("model-based importance estimation requires an algorithm"))?;
        let scores = algo.feature_scores().ok_or_else(|| {
            anyhow::anyhow!("algorithm '{}' does not expose feature scores", algo.name())
        })?;
        log::trace!("Collected {} raw feature scores from '{}'", scores.len(), algo.name());
        self.raw_importances = Some(scores);
        Ok(())
    }

    fn get_features_score(&self) -> Option<&FeatureScores> {
        self.raw_importances.as_ref()
    }
}
