//! Mapping from derived feature names back to the input features that
//! produced them.
//!
//! Transform stages name their outputs `<stage>__<source>`, nesting one
//! prefix per level (e.g. `ohe__num__age`), so the originating input feature
//! is the longest input name that terminates the output name behind a `__`
//! separator.

/// Resolve each output feature name to its originating input feature name.
///
/// Exact input names map to themselves; derived names map to the longest
/// matching input suffix; names with no match pass through unchanged so
/// their score still surfaces.
pub fn map_feature_sources<'a, I>(in_features: &[String], out_features: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    out_features
        .into_iter()
        .map(|name| source_of(in_features, name))
        .collect()
}

fn source_of(in_features: &[String], out_feature: &str) -> String {
    if in_features.iter().any(|f| f == out_feature) {
        return out_feature.to_owned();
    }

    let mut best: Option<&str> = None;
    for feature in in_features {
        if let Some(prefix) = out_feature.strip_suffix(feature.as_str()) {
            if prefix.ends_with("__") && best.map_or(true, |b| feature.len() > b.len()) {
                best = Some(feature);
            }
        }
    }

    match best {
        Some(feature) => feature.to_owned(),
        None => out_feature.to_owned(),
    }
}
