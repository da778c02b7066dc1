// File: crates/hits-core/src/metric.rs
// Summary: Label formatting for metric-matrix series and hit legends.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::series::Labels;

/// Reserved label carrying the metric name.
pub const NAME_LABEL: &str = "__name__";

static ALIAS_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("static pattern"));

/// Compact label used as the legend name of a stat series:
/// `name {a:"1", b:"2"}` with keys sorted and empty values dropped.
///
/// Returns the empty string when the metric has neither a name nor any
/// non-empty label.
pub fn build_metric_label(metric: &Labels) -> String {
    let name = metric.get(NAME_LABEL).map(String::as_str).unwrap_or("");
    // BTreeMap iteration is already key-sorted.
    let labels = metric
        .iter()
        .filter(|(k, v)| k.as_str() != NAME_LABEL && !v.is_empty())
        .map(|(k, v)| format!("{k}:\"{v}\""))
        .collect::<Vec<_>>()
        .join(", ");

    match (name.is_empty(), labels.is_empty()) {
        (true, true) => String::new(),
        (false, true) => name.to_string(),
        (true, false) => format!("{{{labels}}}"),
        (false, false) => format!("{name} {{{labels}}}"),
    }
}

/// Substitute `{{key}}` placeholders in `alias` with label values; unknown keys become "".
pub fn apply_alias(fields: &Labels, alias: &str) -> String {
    ALIAS_PLACEHOLDER
        .replace_all(alias, |caps: &Captures| {
            fields.get(&caps[1]).cloned().unwrap_or_default()
        })
        .into_owned()
}

/// Full metric name in `name{k="v", ...}` form, or the alias when one is given.
pub fn name_for_metric(metric: &Labels, alias: Option<&str>) -> String {
    if let Some(alias) = alias.filter(|a| !a.is_empty()) {
        return apply_alias(metric, alias);
    }
    let name = metric.get(NAME_LABEL).map(String::as_str).unwrap_or("");
    let fields = metric
        .iter()
        .filter(|(k, _)| k.as_str() != NAME_LABEL)
        .map(|(k, v)| format!("{k}={v:?}"))
        .collect::<Vec<_>>();

    if fields.is_empty() {
        return if name.is_empty() { "value".to_string() } else { name.to_string() };
    }
    format!("{name}{{{}}}", fields.join(", "))
}

/// Legend label for a hit series: the grouping field's value when present,
/// otherwise every field in compact form.
pub fn hits_label(fields: &Labels, group_field: &str) -> String {
    match fields.get(group_field) {
        Some(v) if !v.is_empty() => v.clone(),
        _ => build_metric_label(fields),
    }
}
