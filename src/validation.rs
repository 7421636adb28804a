//! Train/valid iterator and feature-transform contracts, plus the selector
//! composition helper.
//!
//! The iterator owns the train/validation split mechanics (holdout or folds)
//! and the actual application of feature transforms; the selection layer only
//! consumes the surface declared here.
use crate::error::SelectionError;
use crate::selectors::Selector;

/// Composition of feature transforms, as seen from the selection layer.
///
/// Transform fitting and data flow are handled by the iterator that applies
/// the pipeline; at this layer the stage only has to declare which columns it
/// produces.
pub trait FeaturesPipeline {
    /// Names of the derived features this pipeline produces for the given
    /// input features.
    fn derived_features(&self, in_features: &[String]) -> Vec<String>;
}

/// Abstract iterator over train/validation splits.
pub trait TrainValidIterator {
    /// Current feature names, order preserved.
    fn features(&self) -> Vec<String>;

    /// Derive an iterator over a single fixed holdout split.
    fn convert_to_holdout_iterator(&self) -> Box<dyn TrainValidIterator>;

    /// Apply a feature-transform pipeline, yielding an iterator over the
    /// transformed features (names may change).
    fn apply_feature_pipeline(
        &self,
        pipeline: &mut dyn FeaturesPipeline,
    ) -> anyhow::Result<Box<dyn TrainValidIterator>>;

    /// Restrict the visible feature set to `features`, in the given order.
    fn select_features(&self, features: &[String]) -> anyhow::Result<Box<dyn TrainValidIterator>>;
}

/// Apply a selector to an iterator: fit it first if needed, then narrow the
/// iterator to the selected features.
///
/// This is the narrowing step chained selectors use to let each stage see
/// only what the previous stage kept.
pub fn apply_selector(
    train_valid: &dyn TrainValidIterator,
    selector: &mut dyn Selector,
) -> Result<Box<dyn TrainValidIterator>, SelectionError> {
    if !selector.is_fitted() {
        selector.fit(train_valid)?;
    }
    Ok(train_valid.select_features(selector.selected_features()?)?)
}
