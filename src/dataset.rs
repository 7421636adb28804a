//! Dataset contract consumed by the selectors, plus a minimal in-memory
//! implementation used by tests and higher-level tooling.
use std::collections::{HashMap, HashSet};

use ndarray::{Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

/// Per-feature metadata of interest to the selection layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRole {
    /// Always keep this feature regardless of the selection outcome.
    pub force_input: bool,
}

/// An ordered, named collection of feature columns plus per-feature roles.
///
/// Projection by feature-name list returns a new dataset; the source is never
/// mutated. Whether the projection copies or shares storage is the
/// implementation's business.
pub trait Dataset {
    /// Feature names, in column order.
    fn features(&self) -> Vec<String>;

    /// Role of the named feature, if one was declared.
    fn role(&self, feature: &str) -> Option<&FeatureRole>;

    /// Project onto exactly `features`, in the given order, all rows retained.
    fn select_columns(&self, features: &[String]) -> anyhow::Result<Box<dyn Dataset>>;
}

/// In-memory tabular dataset backed by a dense `f32` feature matrix.
#[derive(Debug, Clone)]
pub struct TabularDataset {
    data: Array2<f32>,
    features: Vec<String>,
    roles: HashMap<String, FeatureRole>,
}

impl TabularDataset {
    /// Create a dataset from a feature matrix and matching column names.
    pub fn new(data: Array2<f32>, features: Vec<String>) -> anyhow::Result<Self> {
        if data.ncols() != features.len() {
            anyhow::bail!(
                "feature matrix has {} columns but {} feature names were given",
                data.ncols(),
                features.len()
            );
        }
        let mut seen = HashSet::new();
        for name in &features {
            if !seen.insert(name.as_str()) {
                anyhow::bail!("duplicate feature name '{}'", name);
            }
        }
        Ok(TabularDataset {
            data,
            features,
            roles: HashMap::new(),
        })
    }

    /// Declare a role for one feature.
    pub fn with_role(mut self, feature: impl Into<String>, role: FeatureRole) -> Self {
        self.roles.insert(feature.into(), role);
        self
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    pub fn data(&self) -> &Array2<f32> {
        &self.data
    }

    /// Column view by feature name.
    pub fn column(&self, feature: &str) -> Option<ArrayView1<f32>> {
        let idx = self.features.iter().position(|f| f == feature)?;
        Some(self.data.column(idx))
    }
}

impl Dataset for TabularDataset {
    fn features(&self) -> Vec<String> {
        self.features.clone()
    }

    fn role(&self, feature: &str) -> Option<&FeatureRole> {
        self.roles.get(feature)
    }

    fn select_columns(&self, features: &[String]) -> anyhow::Result<Box<dyn Dataset>> {
        let mut indices = Vec::with_capacity(features.len());
        for name in features {
            let idx = self
                .features
                .iter()
                .position(|f| f == name)
                .ok_or_else(|| anyhow::anyhow!("unknown feature '{}'", name))?;
            indices.push(idx);
        }

        let data = self.data.select(Axis(1), &indices);
        let roles = features
            .iter()
            .filter_map(|name| self.roles.get(name).map(|role| (name.clone(), *role)))
            .collect();

        Ok(Box::new(TabularDataset {
            data,
            features: features.to_vec(),
            roles,
        }))
    }
}
