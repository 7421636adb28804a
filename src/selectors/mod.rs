//! Selector implementations.
pub mod base;
pub mod composed;
pub mod cutoff;
pub mod simple;

pub use base::{SelectionPipeline, Selector};
pub use composed::ComposedSelector;
pub use cutoff::ImportanceCutoffSelector;
pub use simple::{EmptySelector, PredefinedSelector};
