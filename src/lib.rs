//! tabml-selection: feature selection pipelines for automated machine
//! learning on tabular data.
//!
//! This crate provides the selection layer of an AutoML pipeline: selectors
//! that decide which input features to keep, optionally ranking them with a
//! fitted model's importance scores. Selectors compose into chains where
//! each stage narrows what the next one sees, a selector may transform its
//! features or fit on a holdout split before deciding, and importance
//! scores of derived features are re-attributed to the original input
//! features that produced them.
//!
//! The dataset container, train/valid iterator mechanics, feature
//! transforms, and concrete models are consumed through small trait
//! contracts so the selection logic stays independent of any one backend.
pub mod config;
pub mod dataset;
pub mod error;
pub mod importance;
pub mod ml_algo;
pub mod naming;
pub mod selectors;
pub mod validation;
