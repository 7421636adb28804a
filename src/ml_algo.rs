//! Model and tuner contracts consumed when a selector fits a model to rank
//! features.
use crate::error::SelectionError;
use crate::importance::FeatureScores;
use crate::validation::TrainValidIterator;

/// Out-of-fold predictions produced by fitting a model, one score per
/// validation row.
pub type Predictions = Vec<f32>;

/// A machine-learning algorithm, as seen from the selection layer.
pub trait MlAlgo {
    /// Human readable name for the algorithm.
    fn name(&self) -> &str {
        "ml_algo"
    }

    fn is_fitted(&self) -> bool;

    /// Features the algorithm was fitted on, in order. Meaningful only once
    /// `is_fitted` returns true.
    fn features(&self) -> Vec<String>;

    /// Fit against the iterator and return out-of-fold predictions.
    fn fit_predict(&mut self, train_valid: &dyn TrainValidIterator) -> anyhow::Result<Predictions>;

    /// Per-feature scores of the fitted algorithm, when the backend exposes
    /// them (split gain, coefficients and the like).
    fn feature_scores(&self) -> Option<FeatureScores> {
        None
    }
}

/// Hyperparameter search strategy for an algorithm.
pub trait ParamsTuner {
    /// Search hyperparameters for `algo` on `train_valid`, leaving the best
    /// configuration applied to the algorithm.
    fn tune(
        &mut self,
        algo: &mut dyn MlAlgo,
        train_valid: &dyn TrainValidIterator,
    ) -> anyhow::Result<()>;
}

/// Tuner that keeps the algorithm's existing parameters.
pub struct DefaultTuner;

impl ParamsTuner for DefaultTuner {
    fn tune(
        &mut self,
        _algo: &mut dyn MlAlgo,
        _train_valid: &dyn TrainValidIterator,
    ) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Tune hyperparameters, then fit the algorithm and return its predictions.
pub fn tune_and_fit_predict(
    algo: &mut dyn MlAlgo,
    tuner: &mut dyn ParamsTuner,
    train_valid: &dyn TrainValidIterator,
) -> Result<Predictions, SelectionError> {
    tuner.tune(algo, train_valid)?;
    log::debug!(
        "Fitting '{}' on {} features",
        algo.name(),
        train_valid.features().len()
    );
    let preds = algo.fit_predict(train_valid)?;
    Ok(preds)
}
