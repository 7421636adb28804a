use crate::ml_algo::{DefaultTuner, MlAlgo, ParamsTuner};

/// Central configuration for the model a selector fits: the algorithm plus
/// the tuner that searches its hyperparameters.
///
/// Resolved once at construction; `new` installs the default tuner, which
/// keeps the algorithm's existing parameters. The config owns the boxed
/// model, so the caller's instance is moved in, never aliased.
pub struct AlgoConfig {
    pub model: Box<dyn MlAlgo>,
    pub tuner: Box<dyn ParamsTuner>,
}

impl AlgoConfig {
    pub fn new(model: Box<dyn MlAlgo>) -> Self {
        AlgoConfig {
            model,
            tuner: Box::new(DefaultTuner),
        }
    }

    pub fn with_tuner(model: Box<dyn MlAlgo>, tuner: Box<dyn ParamsTuner>) -> Self {
        AlgoConfig { model, tuner }
    }
}
