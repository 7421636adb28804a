//! Importance-driven selection with a score cutoff.
use crate::config::AlgoConfig;
use crate::error::SelectionError;
use crate::importance::ImportanceEstimator;
use crate::selectors::base::{SelectionPipeline, Selector};
use crate::validation::{FeaturesPipeline, TrainValidIterator};

/// Selector that fits a model, maps the estimator's raw importances back to
/// input features, and keeps every feature whose mapped score exceeds the
/// cutoff.
///
/// If no feature passes, the single best one is kept so the selection is
/// never empty.
pub struct ImportanceCutoffSelector {
    base: SelectionPipeline,
    cutoff: f64,
}

impl ImportanceCutoffSelector {
    pub fn new(
        features_pipeline: Option<Box<dyn FeaturesPipeline>>,
        ml_algo: AlgoConfig,
        imp_estimator: Box<dyn ImportanceEstimator>,
        cutoff: f64,
    ) -> Self {
        let mut base = SelectionPipeline::new()
            .with_ml_algo(ml_algo)
            .with_importance_estimator(imp_estimator);
        if let Some(pipeline) = features_pipeline {
            base = base.with_features_pipeline(pipeline);
        }
        ImportanceCutoffSelector { base, cutoff }
    }

    /// Fit against the holdout-derived iterator instead of the full one.
    pub fn with_fit_on_holdout(mut self, fit_on_holdout: bool) -> Self {
        self.base = self.base.with_fit_on_holdout(fit_on_holdout);
        self
    }
}

impl Selector for ImportanceCutoffSelector {
    fn base(&self) -> &SelectionPipeline {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SelectionPipeline {
        &mut self.base
    }

    fn perform_selection(
        &mut self,
        _train_valid: &dyn TrainValidIterator,
    ) -> Result<(), SelectionError> {
        let raw = match self
            .base
            .importance_estimator()
            .and_then(|estimator| estimator.get_features_score())
        {
            Some(raw) => raw.clone(),
            None => return Err(SelectionError::NoImportances),
        };

        let cutoff = self.cutoff;
        let selected = {
            let mapped = self.base.map_raw_feature_importances(&raw)?;
            let mut keep: Vec<String> = mapped
                .iter()
                .filter(|(_, score)| *score > cutoff)
                .map(|(name, _)| name.to_owned())
                .collect();
            if keep.is_empty() {
                log::warn!(
                    "No feature importance above cutoff {}; keeping the single best feature",
                    cutoff
                );
                keep.extend(mapped.iter().take(1).map(|(name, _)| name.to_owned()));
            }
            keep
        };

        self.base.set_selected_features(selected);
        Ok(())
    }
}
