//! Shared mock collaborators for the integration tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tabml_selection::importance::{FeatureScores, ImportanceEstimator};
use tabml_selection::ml_algo::{MlAlgo, ParamsTuner, Predictions};
use tabml_selection::validation::{FeaturesPipeline, TrainValidIterator};

pub type CallLog = Rc<RefCell<Vec<String>>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Iterator over a fixed feature list that records which operations were
/// asked of it.
pub struct MockIterator {
    features: Vec<String>,
    log: CallLog,
}

impl MockIterator {
    pub fn new(features: &[&str]) -> Self {
        MockIterator {
            features: features.iter().map(|f| f.to_string()).collect(),
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn log(&self) -> CallLog {
        Rc::clone(&self.log)
    }
}

impl TrainValidIterator for MockIterator {
    fn features(&self) -> Vec<String> {
        self.features.clone()
    }

    fn convert_to_holdout_iterator(&self) -> Box<dyn TrainValidIterator> {
        self.log.borrow_mut().push("convert_to_holdout".to_string());
        Box::new(MockIterator {
            features: self.features.clone(),
            log: Rc::clone(&self.log),
        })
    }

    fn apply_feature_pipeline(
        &self,
        pipeline: &mut dyn FeaturesPipeline,
    ) -> anyhow::Result<Box<dyn TrainValidIterator>> {
        self.log.borrow_mut().push("apply_feature_pipeline".to_string());
        Ok(Box::new(MockIterator {
            features: pipeline.derived_features(&self.features),
            log: Rc::clone(&self.log),
        }))
    }

    fn select_features(&self, features: &[String]) -> anyhow::Result<Box<dyn TrainValidIterator>> {
        for name in features {
            if !self.features.contains(name) {
                anyhow::bail!("unknown feature '{}'", name);
            }
        }
        self.log
            .borrow_mut()
            .push(format!("select_features:{}", features.join(",")));
        Ok(Box::new(MockIterator {
            features: features.to_vec(),
            log: Rc::clone(&self.log),
        }))
    }
}

/// Transform stage that derives one prefixed feature per input feature.
pub struct PrefixPipeline {
    prefix: String,
}

impl PrefixPipeline {
    pub fn new(prefix: &str) -> Self {
        PrefixPipeline {
            prefix: prefix.to_string(),
        }
    }
}

impl FeaturesPipeline for PrefixPipeline {
    fn derived_features(&self, in_features: &[String]) -> Vec<String> {
        in_features
            .iter()
            .map(|f| format!("{}__{}", self.prefix, f))
            .collect()
    }
}

/// Algorithm stub that records fit calls and serves canned feature scores.
pub struct MockAlgo {
    fitted: bool,
    features: Vec<String>,
    scores: Vec<(String, f64)>,
    fit_calls: Rc<Cell<usize>>,
    seen_features: Rc<RefCell<Vec<String>>>,
}

impl MockAlgo {
    pub fn new() -> Self {
        MockAlgo {
            fitted: false,
            features: Vec::new(),
            scores: Vec::new(),
            fit_calls: Rc::new(Cell::new(0)),
            seen_features: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn prefitted(features: &[&str]) -> Self {
        MockAlgo {
            fitted: true,
            features: features.iter().map(|f| f.to_string()).collect(),
            scores: Vec::new(),
            fit_calls: Rc::new(Cell::new(0)),
            seen_features: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Preset the scores reported after fit instead of the positional
    /// default.
    pub fn with_scores(mut self, scores: &[(&str, f64)]) -> Self {
        self.scores = scores
            .iter()
            .map(|(name, score)| (name.to_string(), *score))
            .collect();
        self
    }

    pub fn fit_calls(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.fit_calls)
    }

    /// Handle to the feature list the algorithm was actually fitted on.
    pub fn seen_features(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.seen_features)
    }
}

impl MlAlgo for MockAlgo {
    fn name(&self) -> &str {
        "mock_algo"
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }

    fn features(&self) -> Vec<String> {
        self.features.clone()
    }

    fn fit_predict(&mut self, train_valid: &dyn TrainValidIterator) -> anyhow::Result<Predictions> {
        self.fit_calls.set(self.fit_calls.get() + 1);
        self.features = train_valid.features();
        *self.seen_features.borrow_mut() = self.features.clone();
        if self.scores.is_empty() {
            // Positional default: earlier columns score higher.
            let n = self.features.len();
            self.scores = self
                .features
                .iter()
                .enumerate()
                .map(|(i, f)| (f.clone(), (n - i) as f64))
                .collect();
        }
        self.fitted = true;
        Ok(vec![0.5; 4])
    }

    fn feature_scores(&self) -> Option<FeatureScores> {
        if self.fitted {
            Some(FeatureScores::from_pairs(self.scores.iter().cloned()))
        } else {
            None
        }
    }
}

/// Tuner that counts how often it was asked to search.
pub struct CountingTuner {
    calls: Rc<Cell<usize>>,
}

impl CountingTuner {
    pub fn new() -> Self {
        CountingTuner {
            calls: Rc::new(Cell::new(0)),
        }
    }

    pub fn calls(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.calls)
    }
}

impl ParamsTuner for CountingTuner {
    fn tune(
        &mut self,
        _algo: &mut dyn MlAlgo,
        _train_valid: &dyn TrainValidIterator,
    ) -> anyhow::Result<()> {
        self.calls.set(self.calls.get() + 1);
        Ok(())
    }
}

/// Estimator with a fixed raw score table that records what it was fit with.
pub struct FixedScoreEstimator {
    raw: FeatureScores,
    fitted: bool,
    saw_algo: Rc<Cell<bool>>,
    saw_preds: Rc<Cell<bool>>,
}

impl FixedScoreEstimator {
    pub fn new(raw: &[(&str, f64)]) -> Self {
        FixedScoreEstimator {
            raw: FeatureScores::from_pairs(
                raw.iter().map(|(name, score)| (name.to_string(), *score)),
            ),
            fitted: false,
            saw_algo: Rc::new(Cell::new(false)),
            saw_preds: Rc::new(Cell::new(false)),
        }
    }

    pub fn saw_algo(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.saw_algo)
    }

    pub fn saw_preds(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.saw_preds)
    }
}

impl ImportanceEstimator for FixedScoreEstimator {
    fn fit(
        &mut self,
        _train_valid: &dyn TrainValidIterator,
        algo: Option<&dyn MlAlgo>,
        preds: Option<&Predictions>,
    ) -> anyhow::Result<()> {
        self.saw_algo.set(algo.is_some());
        self.saw_preds.set(preds.is_some());
        self.fitted = true;
        Ok(())
    }

    fn get_features_score(&self) -> Option<&FeatureScores> {
        if self.fitted {
            Some(&self.raw)
        } else {
            None
        }
    }
}
