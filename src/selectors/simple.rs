//! Trivial selectors: keep everything, or keep a fixed column set.
use std::collections::{BTreeSet, HashSet};

use crate::error::SelectionError;
use crate::selectors::base::{SelectionPipeline, Selector};
use crate::validation::TrainValidIterator;

/// Selector that performs no selection and keeps all input features.
pub struct EmptySelector {
    base: SelectionPipeline,
}

impl EmptySelector {
    pub fn new() -> Self {
        EmptySelector {
            base: SelectionPipeline::new(),
        }
    }
}

impl Default for EmptySelector {
    fn default() -> Self {
        EmptySelector::new()
    }
}

impl Selector for EmptySelector {
    fn base(&self) -> &SelectionPipeline {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SelectionPipeline {
        &mut self.base
    }

    fn perform_selection(
        &mut self,
        train_valid: &dyn TrainValidIterator,
    ) -> Result<(), SelectionError> {
        self.base.set_selected_features(train_valid.features());
        Ok(())
    }
}

/// Selector that keeps an externally supplied fixed column set.
///
/// The columns are held as a set; the realized selection order is
/// deterministic (lexicographic) but not the requested order.
pub struct PredefinedSelector {
    base: SelectionPipeline,
    columns_to_select: BTreeSet<String>,
}

impl PredefinedSelector {
    pub fn new<I, S>(columns_to_select: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PredefinedSelector {
            base: SelectionPipeline::new(),
            columns_to_select: columns_to_select.into_iter().map(Into::into).collect(),
        }
    }
}

impl Selector for PredefinedSelector {
    fn base(&self) -> &SelectionPipeline {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SelectionPipeline {
        &mut self.base
    }

    fn perform_selection(
        &mut self,
        train_valid: &dyn TrainValidIterator,
    ) -> Result<(), SelectionError> {
        let available: HashSet<String> = train_valid.features().into_iter().collect();
        let missing: Vec<String> = self
            .columns_to_select
            .iter()
            .filter(|column| !available.contains(column.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(SelectionError::ColumnsNotPresent { missing });
        }

        let selected: Vec<String> = self.columns_to_select.iter().cloned().collect();
        self.base.set_selected_features(selected);
        Ok(())
    }
}
