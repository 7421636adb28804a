//! Sequential composition of selectors.
use crate::error::SelectionError;
use crate::importance::FeatureScores;
use crate::selectors::base::{SelectionPipeline, Selector};
use crate::validation::{apply_selector, TrainValidIterator};

/// Selector that chains child selectors, each narrowing the iterator's
/// visible feature set before the next one fits.
///
/// The composition reports the first child's input features and the last
/// child's selection and importances; intermediate stages only shape what
/// later stages get to see.
pub struct ComposedSelector {
    base: SelectionPipeline,
    selectors: Vec<Box<dyn Selector>>,
}

impl ComposedSelector {
    pub fn new(selectors: Vec<Box<dyn Selector>>) -> Self {
        ComposedSelector {
            base: SelectionPipeline::new(),
            selectors,
        }
    }

    /// The child selectors, in application order.
    pub fn selectors(&self) -> &[Box<dyn Selector>] {
        &self.selectors
    }
}

impl Selector for ComposedSelector {
    fn base(&self) -> &SelectionPipeline {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SelectionPipeline {
        &mut self.base
    }

    fn fit(&mut self, train_valid: &dyn TrainValidIterator) -> Result<(), SelectionError> {
        if self.base.is_fitted() {
            return Ok(());
        }
        if self.selectors.is_empty() {
            return Err(SelectionError::EmptyComposition);
        }

        let mut narrowed: Option<Box<dyn TrainValidIterator>> = None;
        for (stage, selector) in self.selectors.iter_mut().enumerate() {
            let current: &dyn TrainValidIterator = match &narrowed {
                Some(iter) => iter.as_ref(),
                None => train_valid,
            };
            log::debug!(
                "Applying selection stage {} on {} features",
                stage,
                current.features().len()
            );
            narrowed = Some(apply_selector(current, selector.as_mut())?);
        }

        let in_features = self.selectors[0].in_features()?.to_vec();
        self.base.set_in_features(in_features);

        let narrowed = narrowed.ok_or(SelectionError::EmptyComposition)?;
        self.perform_selection(narrowed.as_ref())
    }

    fn perform_selection(
        &mut self,
        _train_valid: &dyn TrainValidIterator,
    ) -> Result<(), SelectionError> {
        let last = self.selectors.last().ok_or(SelectionError::EmptyComposition)?;
        let selected = last.selected_features()?.to_vec();
        self.base.set_selected_features(selected);
        Ok(())
    }

    /// Mapped importances of the final stage; earlier stages' scores are not
    /// aggregated.
    fn get_features_score(&self) -> Option<&FeatureScores> {
        self.selectors.last().and_then(|selector| selector.get_features_score())
    }
}
