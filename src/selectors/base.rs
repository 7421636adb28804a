//! Core selection pipeline state and the selector contract.
use std::collections::HashSet;

use crate::config::AlgoConfig;
use crate::dataset::Dataset;
use crate::error::SelectionError;
use crate::importance::{FeatureScores, ImportanceEstimator};
use crate::ml_algo::tune_and_fit_predict;
use crate::naming::map_feature_sources;
use crate::validation::{FeaturesPipeline, TrainValidIterator};

/// Shared state of a selection pipeline: the optional feature-transform
/// stage, the optional (model, tuner) pair, the optional importance
/// estimator, and the fit outcome.
///
/// A pipeline is either *unfit* (no selection recorded) or *fit* (immutable
/// kept-feature list plus the input-feature snapshot taken at fit time).
/// The transition happens exactly once, inside [`Selector::fit`]; there is
/// no reset.
pub struct SelectionPipeline {
    pub(crate) features_pipeline: Option<Box<dyn FeaturesPipeline>>,
    pub(crate) ml_algo: Option<AlgoConfig>,
    pub(crate) imp_estimator: Option<Box<dyn ImportanceEstimator>>,
    fit_on_holdout: bool,
    pub(crate) in_features: Option<Vec<String>>,
    pub(crate) selected: Option<Vec<String>>,
    mapped_importances: Option<FeatureScores>,
}

impl SelectionPipeline {
    pub fn new() -> Self {
        SelectionPipeline {
            features_pipeline: None,
            ml_algo: None,
            imp_estimator: None,
            fit_on_holdout: false,
            in_features: None,
            selected: None,
            mapped_importances: None,
        }
    }

    /// Attach a composition of feature transforms applied before fitting.
    pub fn with_features_pipeline(mut self, pipeline: Box<dyn FeaturesPipeline>) -> Self {
        self.features_pipeline = Some(pipeline);
        self
    }

    /// Attach the model/tuner pair fitted during selection.
    pub fn with_ml_algo(mut self, algo: AlgoConfig) -> Self {
        self.ml_algo = Some(algo);
        self
    }

    /// Attach the estimator that scores features after the model is fit.
    pub fn with_importance_estimator(mut self, estimator: Box<dyn ImportanceEstimator>) -> Self {
        self.imp_estimator = Some(estimator);
        self
    }

    /// Fit against the holdout-derived iterator instead of the full one.
    pub fn with_fit_on_holdout(mut self, fit_on_holdout: bool) -> Self {
        self.fit_on_holdout = fit_on_holdout;
        self
    }

    pub fn is_fitted(&self) -> bool {
        self.selected.is_some()
    }

    pub fn fit_on_holdout(&self) -> bool {
        self.fit_on_holdout
    }

    /// Features kept by the selection decision.
    pub fn selected_features(&self) -> Result<&[String], SelectionError> {
        self.selected.as_deref().ok_or(SelectionError::NotFitted)
    }

    /// Features visible at input time, order preserved.
    pub fn in_features(&self) -> Result<&[String], SelectionError> {
        self.in_features.as_deref().ok_or(SelectionError::NotFitted)
    }

    /// Input features not kept by the selection, in input order.
    pub fn dropped_features(&self) -> Result<Vec<String>, SelectionError> {
        let selected: HashSet<&str> = self
            .selected_features()?
            .iter()
            .map(String::as_str)
            .collect();
        Ok(self
            .in_features()?
            .iter()
            .filter(|name| !selected.contains(name.as_str()))
            .cloned()
            .collect())
    }

    /// Record the selection decision. Called by `perform_selection`
    /// implementations exactly once.
    pub fn set_selected_features(&mut self, features: Vec<String>) {
        self.selected = Some(features);
    }

    /// Record the input-feature snapshot.
    pub fn set_in_features(&mut self, features: Vec<String>) {
        self.in_features = Some(features);
    }

    pub fn importance_estimator(&self) -> Option<&dyn ImportanceEstimator> {
        self.imp_estimator.as_deref()
    }

    /// Importances re-attributed to input features; `None` if selection
    /// never computed importances.
    pub fn mapped_importances(&self) -> Option<&FeatureScores> {
        self.mapped_importances.as_ref()
    }

    /// Re-attribute raw output-feature importances to the input features
    /// that produced them, summing scores per source.
    ///
    /// The stored table is sorted by score descending; equal scores keep
    /// their first-seen order.
    pub fn map_raw_feature_importances(
        &mut self,
        raw_importances: &FeatureScores,
    ) -> Result<&FeatureScores, SelectionError> {
        let in_features = self.in_features.as_deref().ok_or(SelectionError::NotFitted)?;

        let sources = map_feature_sources(in_features, raw_importances.iter().map(|(name, _)| name));
        let mut mapped = FeatureScores::new();
        for ((_, score), source) in raw_importances.iter().zip(sources) {
            mapped.accumulate(&source, score);
        }
        mapped.sort_descending();

        log::trace!(
            "Mapped {} raw importances onto {} input features",
            raw_importances.len(),
            mapped.len()
        );
        Ok(self.mapped_importances.insert(mapped))
    }
}

impl Default for SelectionPipeline {
    fn default() -> Self {
        SelectionPipeline::new()
    }
}

/// A component that decides which features of a dataset to keep.
///
/// Implementations embed a [`SelectionPipeline`] and expose it through
/// `base`/`base_mut`; the orchestration in the provided `fit` and `select`
/// methods is shared by every selector, while `perform_selection` holds the
/// strategy-specific decision and must record it with
/// [`SelectionPipeline::set_selected_features`].
pub trait Selector {
    fn base(&self) -> &SelectionPipeline;

    fn base_mut(&mut self) -> &mut SelectionPipeline;

    /// Make the selection decision for the (possibly transformed) iterator.
    fn perform_selection(
        &mut self,
        train_valid: &dyn TrainValidIterator,
    ) -> Result<(), SelectionError>;

    /// Find the feature selection for the given iterator.
    ///
    /// Repeated calls are no-ops once the selector is fit.
    fn fit(&mut self, train_valid: &dyn TrainValidIterator) -> Result<(), SelectionError> {
        if self.base().is_fitted() {
            return Ok(());
        }

        let holdout;
        let mut iter: &dyn TrainValidIterator = train_valid;
        if self.base().fit_on_holdout() {
            holdout = train_valid.convert_to_holdout_iterator();
            iter = holdout.as_ref();
        }

        let in_features = iter.features();
        log::debug!("Fitting selector on {} input features", in_features.len());
        self.base_mut().in_features = Some(in_features);

        let transformed = match self.base_mut().features_pipeline.as_mut() {
            Some(pipeline) => Some(iter.apply_feature_pipeline(pipeline.as_mut())?),
            None => None,
        };
        if let Some(transformed) = &transformed {
            iter = transformed.as_ref();
        }

        let preds = match self.base_mut().ml_algo.as_mut() {
            Some(config) => {
                if config.model.is_fitted() {
                    let expected = iter.features();
                    let found = config.model.features();
                    if found != expected {
                        return Err(SelectionError::FeatureMismatch { expected, found });
                    }
                    None
                } else {
                    Some(tune_and_fit_predict(
                        config.model.as_mut(),
                        config.tuner.as_mut(),
                        iter,
                    )?)
                }
            }
            None => None,
        };

        {
            let base = self.base_mut();
            if let Some(estimator) = base.imp_estimator.as_mut() {
                let algo = base.ml_algo.as_ref().map(|config| config.model.as_ref());
                estimator.fit(iter, algo, preds.as_ref())?;
            }
        }

        self.perform_selection(iter)?;

        let base = self.base();
        if let Some(selected) = base.selected.as_ref() {
            log::info!(
                "Selected {} of {} input features",
                selected.len(),
                base.in_features.as_ref().map_or(0, Vec::len)
            );
        }
        Ok(())
    }

    /// Project `dataset` onto the selected features plus any of its
    /// force-input features, returning the new dataset.
    ///
    /// Forced features are appended after the selection, in the dataset's
    /// feature order; the source dataset is untouched.
    fn select(&self, dataset: &dyn Dataset) -> Result<Box<dyn Dataset>, SelectionError> {
        let selected = self.selected_features()?;
        let chosen: HashSet<&str> = selected.iter().map(String::as_str).collect();

        let mut keep = selected.to_vec();
        for feature in dataset.features() {
            if chosen.contains(feature.as_str()) {
                continue;
            }
            if dataset.role(&feature).map_or(false, |role| role.force_input) {
                log::debug!("Keeping force-input feature '{}'", feature);
                keep.push(feature);
            }
        }

        Ok(dataset.select_columns(&keep)?)
    }

    fn is_fitted(&self) -> bool {
        self.base().is_fitted()
    }

    fn selected_features(&self) -> Result<&[String], SelectionError> {
        self.base().selected_features()
    }

    fn in_features(&self) -> Result<&[String], SelectionError> {
        self.base().in_features()
    }

    fn dropped_features(&self) -> Result<Vec<String>, SelectionError> {
        self.base().dropped_features()
    }

    /// Input-feature importances; `None` if selection never computed them.
    fn get_features_score(&self) -> Option<&FeatureScores> {
        self.base().mapped_importances()
    }
}
